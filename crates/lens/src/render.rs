use inci_analysis::{IngredientView, PillTone, Screen};
use serde_json::json;
use std::fmt::Write;
use std::time::SystemTime;

pub(crate) fn render_text(screen: &Screen<'_>, analyzed_at: Option<SystemTime>) -> String {
    let mut out = String::new();
    match screen {
        Screen::Analyze { status } => {
            out.push_str(status.unwrap_or("Press analyze to scan the current page."));
            out.push('\n');
        }
        Screen::Highlights { model } => {
            if let Some(at) = analyzed_at {
                let _ = writeln!(out, "Analyzed at {}", humantime::format_rfc3339_seconds(at));
            }
            let _ = writeln!(out, "Suitable for: {}", model.skin.labels.join(", "));
            out.push_str("\nHighlights\n");
            for category in &model.highlights {
                let _ = writeln!(
                    out,
                    "  {}: {} ingredient(s)  [{}]",
                    category.label, category.count, category.key
                );
            }
            if !model.free_from.is_empty() {
                out.push_str("\nFree from\n");
                for attribute in &model.free_from {
                    let _ = writeln!(
                        out,
                        "  [{}] ({})  [{}]",
                        attribute.pill,
                        tone_name(attribute.tone),
                        attribute.key
                    );
                }
            }
        }
        Screen::CategoryDetail { category } => {
            let _ = writeln!(out, "{} ({})", category.label, category.count);
            push_ingredients(&mut out, &category.ingredients);
        }
        Screen::FreeFromDetail { attribute } => {
            let _ = writeln!(out, "{} ({})", attribute.pill, tone_name(attribute.tone));
            if attribute.ingredients.is_empty() {
                out.push_str("  None found\n");
            } else {
                push_ingredients(&mut out, &attribute.ingredients);
            }
        }
    }
    out
}

pub(crate) fn render_json(screen: &Screen<'_>) -> serde_json::Result<String> {
    let value = match screen {
        Screen::Analyze { status } => json!({ "view": "analyze", "status": status }),
        Screen::Highlights { model } => json!({ "view": "highlights", "report": model }),
        Screen::CategoryDetail { category } => {
            json!({ "view": "category_detail", "category": category })
        }
        Screen::FreeFromDetail { attribute } => {
            json!({ "view": "free_from_detail", "attribute": attribute })
        }
    };
    serde_json::to_string_pretty(&value)
}

fn push_ingredients(out: &mut String, ingredients: &[IngredientView]) {
    for ingredient in ingredients {
        match &ingredient.ewg_decision {
            Some(decision) => {
                let _ = writeln!(
                    out,
                    "  - {} (EWG: {}) [{}]",
                    ingredient.title,
                    decision,
                    ingredient.tier.as_str()
                );
            }
            None => {
                let _ = writeln!(out, "  - {} [{}]", ingredient.title, ingredient.tier.as_str());
            }
        }
    }
}

fn tone_name(tone: PillTone) -> &'static str {
    match tone {
        PillTone::Free => "free",
        PillTone::Contains => "contains",
    }
}
