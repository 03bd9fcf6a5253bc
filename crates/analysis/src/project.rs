//! Reshapes an API analysis into the plain data the presentation layer renders.

use inci_protocol::{AnalysisResult, CategoryEntry};
use serde::Serialize;

use crate::label::{format_category, format_pill};
use crate::skin::{self, SkinVerdict};
use crate::tier::{HazardTier, PillTone, TierColors};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub highlights: Vec<CategoryView>,
    pub free_from: Vec<FreeFromView>,
    pub skin: SkinVerdict,
    pub ingredients: Vec<IngredientView>,
}

impl ViewModel {
    pub fn category(&self, key: &str) -> Option<&CategoryView> {
        self.highlights.iter().find(|category| category.key == key)
    }

    pub fn free_from_attribute(&self, key: &str) -> Option<&FreeFromView> {
        self.free_from.iter().find(|attribute| attribute.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub key: String,
    pub label: String,
    pub count: i64,
    pub ingredients: Vec<IngredientView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreeFromView {
    pub key: String,
    pub label: String,
    pub pill: String,
    pub count: i64,
    pub tone: PillTone,
    pub colors: TierColors,
    pub ingredients: Vec<IngredientView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientView {
    pub title: String,
    pub ewg_decision: Option<String>,
    pub tier: HazardTier,
    pub colors: TierColors,
    /// False when the reference had no matching row in the ingredients table.
    pub resolved: bool,
}

impl IngredientView {
    fn new(title: String, ewg_decision: Option<String>, resolved: bool) -> Self {
        let tier = if resolved {
            HazardTier::from_decision(ewg_decision.as_deref())
        } else {
            HazardTier::Unknown
        };
        Self {
            title,
            ewg_decision,
            tier,
            colors: tier.colors(),
            resolved,
        }
    }
}

pub fn project(result: &AnalysisResult) -> ViewModel {
    let highlights = result
        .positive
        .iter()
        .filter(|(_, entry)| entry.count > 0)
        .map(|(key, entry)| CategoryView {
            key: key.clone(),
            label: format_category(key),
            count: entry.count,
            ingredients: resolve_list(result, entry),
        })
        .collect();

    let mut free_from: Vec<FreeFromView> = result
        .harmful
        .iter()
        .map(|(key, entry)| {
            let tone = PillTone::for_count(entry.count);
            FreeFromView {
                key: key.clone(),
                label: format_category(key),
                pill: format_pill(key, entry.count),
                count: entry.count,
                tone,
                colors: tone.colors(),
                ingredients: resolve_list(result, entry),
            }
        })
        .collect();
    // Stable: keys keep their relative order inside each group.
    free_from.sort_by_key(|attribute| attribute.tone == PillTone::Contains);

    let ingredients = result
        .ingredients_table
        .iter()
        .map(|record| {
            IngredientView::new(
                record.title.clone(),
                record.ewg_decision().map(str::to_string),
                true,
            )
        })
        .collect();

    ViewModel {
        highlights,
        free_from,
        skin: skin::evaluate(&result.ingredients_table),
        ingredients,
    }
}

pub fn has_highlights(result: &AnalysisResult) -> bool {
    result.positive.values().any(|entry| entry.count > 0)
}

fn resolve_list(result: &AnalysisResult, entry: &CategoryEntry) -> Vec<IngredientView> {
    entry
        .list
        .iter()
        .map(|reference| match result.find_ingredient(&reference.title) {
            Some(record) => IngredientView::new(
                record.title.clone(),
                record.ewg_decision().map(str::to_string),
                true,
            ),
            None => IngredientView::new(reference.title.clone(), None, false),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inci_protocol::{EwgRating, IngredientRecord, IngredientRef, SkinFlags};
    use std::collections::BTreeMap;

    fn entry(count: i64, titles: &[&str]) -> CategoryEntry {
        CategoryEntry {
            count,
            list: titles
                .iter()
                .map(|title| IngredientRef {
                    title: title.to_string(),
                })
                .collect(),
        }
    }

    fn record(title: &str, decision: Option<&str>) -> IngredientRecord {
        IngredientRecord {
            title: title.to_string(),
            ewg: decision.map(|decision| EwgRating {
                decision: Some(decision.to_string()),
            }),
            skin: SkinFlags::default(),
        }
    }

    fn sample() -> AnalysisResult {
        AnalysisResult {
            ingredients_table: vec![
                record("Zinc Oxide", Some("Low Hazard")),
                record("Fragrance", Some("Moderate Hazard - High Hazard")),
                record("Glycerin", Some("low hazard - moderate hazard")),
            ],
            positive: BTreeMap::from([
                ("uv_protecting".to_string(), entry(2, &["Zinc Oxide", "Avobenzone"])),
                ("anti_aging".to_string(), entry(0, &[])),
                ("moisturizing".to_string(), entry(1, &["Glycerin"])),
                ("brightening".to_string(), entry(-1, &[])),
            ]),
            harmful: BTreeMap::from([
                ("fungal_acne_feeding".to_string(), entry(3, &["Glycerin"])),
                ("silicone".to_string(), entry(0, &[])),
                ("fragrance".to_string(), entry(1, &["Fragrance"])),
                ("peg".to_string(), entry(0, &[])),
            ]),
        }
    }

    #[test]
    fn highlights_skip_non_positive_counts() {
        let view = project(&sample());
        let keys: Vec<_> = view.highlights.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["moisturizing", "uv_protecting"]);
        assert_eq!(view.category("uv_protecting").expect("uv").label, "UV Protecting");
        assert!(view.category("anti_aging").is_none());
    }

    #[test]
    fn free_from_keeps_every_attribute_zero_counts_first() {
        let view = project(&sample());
        let keys: Vec<_> = view.free_from.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["peg", "silicone", "fragrance", "fungal_acne_feeding"]
        );
        let peg = view.free_from_attribute("peg").expect("peg");
        assert_eq!(peg.pill, "PEG");
        assert_eq!(peg.tone, PillTone::Free);
        assert_eq!(peg.colors, HazardTier::Safe.colors());
        let fungal = view.free_from_attribute("fungal_acne_feeding").expect("fungal");
        assert_eq!(fungal.pill, "Fungal Acne Feeding (3)");
        assert_eq!(fungal.tone, PillTone::Contains);
        assert_eq!(fungal.colors, HazardTier::ModerateToHigh.colors());
    }

    #[test]
    fn negative_harmful_count_reads_as_free() {
        let mut result = sample();
        result
            .harmful
            .insert("sulfate".to_string(), entry(-2, &[]));
        let view = project(&result);
        let sulfate = view.free_from_attribute("sulfate").expect("sulfate");
        assert_eq!(sulfate.pill, "Sulfate");
        assert_eq!(sulfate.tone, PillTone::Free);
        assert_eq!(sulfate.colors, HazardTier::Safe.colors());
        let keys: Vec<_> = view.free_from.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["peg", "silicone", "sulfate", "fragrance", "fungal_acne_feeding"]
        );
    }

    #[test]
    fn resolves_references_against_table() {
        let view = project(&sample());
        let uv = view.category("uv_protecting").expect("uv");
        assert_eq!(uv.ingredients[0].title, "Zinc Oxide");
        assert_eq!(uv.ingredients[0].tier, HazardTier::Safe);
        assert!(uv.ingredients[0].resolved);
        assert_eq!(uv.ingredients[1].title, "Avobenzone");
        assert_eq!(uv.ingredients[1].tier, HazardTier::Unknown);
        assert_eq!(uv.ingredients[1].ewg_decision, None);
        assert!(!uv.ingredients[1].resolved);
    }

    #[test]
    fn tiers_are_uniform_across_views() {
        let view = project(&sample());
        let from_table = view
            .ingredients
            .iter()
            .find(|i| i.title == "Glycerin")
            .expect("glycerin");
        let from_category = &view.category("moisturizing").expect("moisturizing").ingredients[0];
        let from_attribute =
            &view.free_from_attribute("fungal_acne_feeding").expect("fungal").ingredients[0];
        assert_eq!(from_table.tier, HazardTier::SafeToModerate);
        assert_eq!(from_category.colors, from_table.colors);
        assert_eq!(from_attribute.colors, from_table.colors);
    }

    #[test]
    fn has_highlights_requires_positive_count() {
        assert!(has_highlights(&sample()));
        let mut empty = sample();
        empty.positive = BTreeMap::from([("anti_aging".to_string(), entry(0, &[]))]);
        assert!(!has_highlights(&empty));
    }
}
