use anyhow::Context;
use inci_analysis::IngredientSource;
use inci_protocol::config::ScrapeConfig;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const BLOCK_ELEMENTS: [&str; 22] = [
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "footer", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "li", "ol", "p", "section", "tr", "ul",
];
const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Finds the ingredient block of a product page: known selectors first, then the first
/// fallback element whose text mentions ingredients.
#[derive(Debug)]
pub(crate) struct PageScraper {
    selectors: Vec<Selector>,
    fallback: Selector,
    pattern: Regex,
}

impl PageScraper {
    pub(crate) fn from_config(config: &ScrapeConfig) -> anyhow::Result<Self> {
        let selectors = config
            .selectors
            .iter()
            .map(|raw| parse_selector(raw))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let fallback = parse_selector(&config.fallback_elements)?;
        let pattern = Regex::new(&config.fallback_pattern)
            .with_context(|| format!("invalid fallback pattern {}", config.fallback_pattern))?;
        Ok(Self {
            selectors,
            fallback,
            pattern,
        })
    }

    pub(crate) fn scrape(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        for selector in &self.selectors {
            if let Some(element) = document.select(selector).next() {
                let text = inner_text(element);
                if !text.is_empty() {
                    tracing::debug!(selector = ?selector, len = text.len(), "ingredient block matched");
                    return Some(text);
                }
            }
        }
        let found = document
            .select(&self.fallback)
            .map(inner_text)
            .find(|text| !text.is_empty() && self.pattern.is_match(text));
        if found.is_some() {
            tracing::debug!("ingredient block found by text search");
        }
        found
    }
}

fn parse_selector(raw: &str) -> anyhow::Result<Selector> {
    Selector::parse(raw).map_err(|err| anyhow::anyhow!("invalid selector {raw}: {err:?}"))
}

/// Rendered-text approximation: block elements break lines, other whitespace collapses.
pub(crate) fn inner_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_text(element, &mut raw);
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if SKIPPED_ELEMENTS.contains(&name) {
        return;
    }
    if name == "br" {
        out.push('\n');
        return;
    }
    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push('\n');
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
        } else if let Some(child) = ElementRef::wrap(child) {
            push_text(child, out);
        }
    }
    if block {
        out.push('\n');
    }
}

/// Where the raw ingredient text comes from for one run.
pub(crate) enum PageSource {
    Text(String),
    Html { html: String, scraper: PageScraper },
}

impl IngredientSource for PageSource {
    fn ingredient_text(&self) -> Option<String> {
        match self {
            PageSource::Text(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
            PageSource::Html { html, scraper } => scraper.scrape(html),
        }
    }
}
