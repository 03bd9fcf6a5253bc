use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub mod config;

pub const DEFAULT_ANALYZE_ENDPOINT: &str =
    "https://api.cosmily.com/api/v1/analyze/ingredient_list";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub ingredients: String,
}

impl AnalyzeRequest {
    pub fn new(ingredients: impl Into<String>) -> Self {
        Self {
            ingredients: ingredients.into(),
        }
    }
}

/// Body returned by the analysis endpoint.
///
/// An `errors` key wins over everything else, so the failure shape is tried first.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Failure(ApiFailure),
    Success(AnalysisEnvelope),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiFailure {
    pub errors: Vec<Value>,
}

impl ApiFailure {
    pub fn joined_message(&self) -> String {
        self.errors
            .iter()
            .map(|err| match err.get("message").and_then(Value::as_str) {
                Some(message) => message.to_string(),
                None => err.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AnalysisEnvelope {
    #[serde(default)]
    pub analysis: Option<AnalysisPayload>,
}

/// Raw `analysis` object; `positive` may be absent when the API found nothing to report.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub ingredients_table: Vec<IngredientRecord>,
    #[serde(default)]
    pub positive: Option<BTreeMap<String, CategoryEntry>>,
    #[serde(default)]
    pub harmful: BTreeMap<String, CategoryEntry>,
}

impl AnalysisPayload {
    pub fn into_result(self) -> Option<AnalysisResult> {
        let positive = self.positive?;
        Some(AnalysisResult {
            ingredients_table: self.ingredients_table,
            positive,
            harmful: self.harmful,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub ingredients_table: Vec<IngredientRecord>,
    pub positive: BTreeMap<String, CategoryEntry>,
    pub harmful: BTreeMap<String, CategoryEntry>,
}

impl AnalysisResult {
    /// First record whose title matches exactly.
    pub fn find_ingredient(&self, title: &str) -> Option<&IngredientRecord> {
        self.ingredients_table
            .iter()
            .find(|record| record.title == title)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IngredientRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ewg: Option<EwgRating>,
    #[serde(flatten)]
    pub skin: SkinFlags,
}

impl IngredientRecord {
    pub fn ewg_decision(&self) -> Option<&str> {
        self.ewg.as_ref().and_then(|ewg| ewg.decision.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EwgRating {
    #[serde(default)]
    pub decision: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkinFlags {
    #[serde(default)]
    pub good_for_dry_skin: bool,
    #[serde(default)]
    pub bad_for_dry_skin: bool,
    #[serde(default)]
    pub good_for_oily_skin: bool,
    #[serde(default)]
    pub bad_for_oily_skin: bool,
    #[serde(default)]
    pub good_for_sensitive_skin: bool,
    #[serde(default)]
    pub bad_for_sensitive_skin: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryEntry {
    pub count: i64,
    #[serde(default)]
    pub list: Vec<IngredientRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngredientRef {
    pub title: String,
}
