//! Panel navigation as a pure transition function plus a pure projection to screens.

use serde::Serialize;

use crate::project::{CategoryView, FreeFromView, ViewModel};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    #[default]
    Analyze,
    Highlights,
    CategoryDetail {
        category: String,
    },
    FreeFromDetail {
        attribute: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    AnalysisSucceeded,
    AnalysisFailed,
    SelectCategory(String),
    SelectFreeFrom(String),
    Back,
}

pub fn transition(state: &View, event: &NavEvent) -> View {
    match (state, event) {
        (_, NavEvent::AnalysisSucceeded) => View::Highlights,
        (_, NavEvent::AnalysisFailed) => View::Analyze,
        (View::Highlights, NavEvent::SelectCategory(category)) => View::CategoryDetail {
            category: category.clone(),
        },
        (View::Highlights, NavEvent::SelectFreeFrom(attribute)) => View::FreeFromDetail {
            attribute: attribute.clone(),
        },
        (View::CategoryDetail { .. } | View::FreeFromDetail { .. }, NavEvent::Back) => {
            View::Highlights
        }
        (state, _) => state.clone(),
    }
}

/// What the presentation layer should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen<'a> {
    Analyze { status: Option<&'a str> },
    Highlights { model: &'a ViewModel },
    CategoryDetail { category: &'a CategoryView },
    FreeFromDetail { attribute: &'a FreeFromView },
}

/// Views that need a report fall back to the analyze panel when there is no report, and a
/// detail view whose entry is not in the report falls back to highlights.
pub fn screen<'a>(view: &View, model: Option<&'a ViewModel>, status: Option<&'a str>) -> Screen<'a> {
    let Some(model) = model else {
        return Screen::Analyze { status };
    };
    match view {
        View::Analyze => Screen::Analyze { status },
        View::Highlights => Screen::Highlights { model },
        View::CategoryDetail { category } => model
            .category(category)
            .map(|category| Screen::CategoryDetail { category })
            .unwrap_or(Screen::Highlights { model }),
        View::FreeFromDetail { attribute } => model
            .free_from_attribute(attribute)
            .map(|attribute| Screen::FreeFromDetail { attribute })
            .unwrap_or(Screen::Highlights { model }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::project;
    use inci_protocol::{AnalysisResult, CategoryEntry, IngredientRef};
    use std::collections::BTreeMap;

    fn model() -> ViewModel {
        project(&AnalysisResult {
            ingredients_table: Vec::new(),
            positive: BTreeMap::from([(
                "soothing".to_string(),
                CategoryEntry {
                    count: 1,
                    list: vec![IngredientRef {
                        title: "Allantoin".to_string(),
                    }],
                },
            )]),
            harmful: BTreeMap::from([("paraben".to_string(), CategoryEntry::default())]),
        })
    }

    #[test]
    fn success_opens_highlights_from_anywhere() {
        for state in [
            View::Analyze,
            View::Highlights,
            View::CategoryDetail {
                category: "soothing".to_string(),
            },
        ] {
            assert_eq!(
                transition(&state, &NavEvent::AnalysisSucceeded),
                View::Highlights
            );
        }
    }

    #[test]
    fn failure_returns_to_analyze() {
        let state = View::FreeFromDetail {
            attribute: "paraben".to_string(),
        };
        assert_eq!(transition(&state, &NavEvent::AnalysisFailed), View::Analyze);
    }

    #[test]
    fn highlights_detail_roundtrip() {
        let detail = transition(
            &View::Highlights,
            &NavEvent::SelectCategory("soothing".to_string()),
        );
        assert_eq!(
            detail,
            View::CategoryDetail {
                category: "soothing".to_string()
            }
        );
        assert_eq!(transition(&detail, &NavEvent::Back), View::Highlights);

        let detail = transition(
            &View::Highlights,
            &NavEvent::SelectFreeFrom("paraben".to_string()),
        );
        assert_eq!(transition(&detail, &NavEvent::Back), View::Highlights);
    }

    #[test]
    fn selections_outside_highlights_are_ignored() {
        assert_eq!(
            transition(&View::Analyze, &NavEvent::SelectCategory("x".to_string())),
            View::Analyze
        );
        assert_eq!(transition(&View::Analyze, &NavEvent::Back), View::Analyze);
        assert_eq!(transition(&View::Highlights, &NavEvent::Back), View::Highlights);
    }

    #[test]
    fn screen_projects_selected_entries() {
        let model = model();
        let view = View::CategoryDetail {
            category: "soothing".to_string(),
        };
        match screen(&view, Some(&model), None) {
            Screen::CategoryDetail { category } => assert_eq!(category.label, "Soothing"),
            other => panic!("unexpected screen: {other:?}"),
        }
        let view = View::FreeFromDetail {
            attribute: "paraben".to_string(),
        };
        match screen(&view, Some(&model), None) {
            Screen::FreeFromDetail { attribute } => assert_eq!(attribute.pill, "Paraben"),
            other => panic!("unexpected screen: {other:?}"),
        }
    }

    #[test]
    fn screen_without_report_falls_back_to_analyze() {
        assert_eq!(
            screen(&View::Highlights, None, Some("No ingredients found.")),
            Screen::Analyze {
                status: Some("No ingredients found.")
            }
        );
        let detail = View::CategoryDetail {
            category: "soothing".to_string(),
        };
        assert_eq!(screen(&detail, None, None), Screen::Analyze { status: None });
    }

    #[test]
    fn unknown_detail_entry_shows_highlights() {
        let model = model();
        let missing = View::CategoryDetail {
            category: "missing".to_string(),
        };
        assert_eq!(
            screen(&missing, Some(&model), Some("Results:")),
            Screen::Highlights { model: &model }
        );
        let missing = View::FreeFromDetail {
            attribute: "missing".to_string(),
        };
        assert_eq!(
            screen(&missing, Some(&model), None),
            Screen::Highlights { model: &model }
        );
    }
}
