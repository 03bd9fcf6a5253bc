use inci_protocol::{IngredientRecord, SkinFlags};
use serde::Serialize;

pub const COMBINATION_LABEL: &str = "Combination";
pub const ALL_SKIN_TYPES_LABEL: &str = "All skin types";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkinScores {
    pub dry: i64,
    pub oily: i64,
    pub sensitive: i64,
}

impl SkinScores {
    pub fn add(&mut self, flags: &SkinFlags) {
        self.dry += signal(flags.good_for_dry_skin, flags.bad_for_dry_skin);
        self.oily += signal(flags.good_for_oily_skin, flags.bad_for_oily_skin);
        self.sensitive += signal(flags.good_for_sensitive_skin, flags.bad_for_sensitive_skin);
    }
}

fn signal(good: bool, bad: bool) -> i64 {
    i64::from(good) - i64::from(bad)
}

/// Suitability per skin type. A type with no signals at all sums to zero and counts as
/// suitable. `labels` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkinVerdict {
    pub scores: SkinScores,
    pub dry: bool,
    pub oily: bool,
    pub sensitive: bool,
    pub labels: Vec<String>,
}

pub fn evaluate(ingredients: &[IngredientRecord]) -> SkinVerdict {
    let mut scores = SkinScores::default();
    for record in ingredients {
        scores.add(&record.skin);
    }
    let dry = scores.dry >= 0;
    let oily = scores.oily >= 0;
    let sensitive = scores.sensitive >= 0;
    let labels = narrative(dry, oily, sensitive);
    SkinVerdict {
        scores,
        dry,
        oily,
        sensitive,
        labels,
    }
}

fn narrative(dry: bool, oily: bool, sensitive: bool) -> Vec<String> {
    let mut labels = Vec::new();
    match (dry, oily) {
        (true, true) => labels.push(COMBINATION_LABEL.to_string()),
        (true, false) => labels.push("Dry".to_string()),
        (false, true) => labels.push("Oily".to_string()),
        (false, false) => {}
    }
    if sensitive {
        labels.push("Sensitive".to_string());
    }
    if labels.is_empty() {
        labels.push(ALL_SKIN_TYPES_LABEL.to_string());
    }
    labels
}
