use serde::Deserialize;

use crate::DEFAULT_ANALYZE_ENDPOINT;

pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_FALLBACK_ELEMENTS: &str = "div, p, span";
pub const DEFAULT_FALLBACK_PATTERN: &str = "(?i)ingredients";

pub const DEFAULT_SELECTORS: [&str; 4] = [
    "div[data-comp='ProductDetailIngredients']",
    ".product-ingredients",
    "#ingredients",
    ".ProductDetail__ingredients",
];

#[derive(Debug, Default, Deserialize)]
pub struct LensConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    #[serde(default = "default_selectors")]
    pub selectors: Vec<String>,
    #[serde(default = "default_fallback_elements")]
    pub fallback_elements: String,
    #[serde(default = "default_fallback_pattern")]
    pub fallback_pattern: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            selectors: default_selectors(),
            fallback_elements: default_fallback_elements(),
            fallback_pattern: default_fallback_pattern(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ANALYZE_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_selectors() -> Vec<String> {
    DEFAULT_SELECTORS.iter().map(|s| s.to_string()).collect()
}

fn default_fallback_elements() -> String {
    DEFAULT_FALLBACK_ELEMENTS.to_string()
}

fn default_fallback_pattern() -> String {
    DEFAULT_FALLBACK_PATTERN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: LensConfig = toml::from_str("").expect("parse");
        assert_eq!(config.api.endpoint, DEFAULT_ANALYZE_ENDPOINT);
        assert_eq!(config.api.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.scrape.selectors.len(), DEFAULT_SELECTORS.len());
        assert_eq!(config.scrape.fallback_pattern, DEFAULT_FALLBACK_PATTERN);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: LensConfig = toml::from_str(
            r##"
[api]
timeout_ms = 2500

[scrape]
selectors = ["#inci"]
"##,
        )
        .expect("parse");
        assert_eq!(config.api.endpoint, DEFAULT_ANALYZE_ENDPOINT);
        assert_eq!(config.api.timeout_ms, 2500);
        assert_eq!(config.scrape.selectors, vec!["#inci".to_string()]);
        assert_eq!(config.scrape.fallback_elements, DEFAULT_FALLBACK_ELEMENTS);
    }
}
