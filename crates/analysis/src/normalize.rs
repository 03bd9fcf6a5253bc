//! Cleanup of scraped ingredient text into the comma-separated form the analysis API expects.
//!
//! The pipeline is an ordered list of pure string transforms; each step sees the previous
//! step's output.

use regex::Regex;
use std::sync::LazyLock;

static HEADER_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\A(?s:.*?)\n").ok());

// Innermost closing paren ends the group, so `a (b (c) d) e` leaves `a  d) e`.
static PARENTHETICAL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\([^)]*\)").ok());

static PERCENTAGE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?%").ok());

// Semicolons next to commas are swallowed here; the semicolon step would otherwise
// expose new ` ,` runs.
static COMMA_RUN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"[\s;]*,(?:[\s;]*,)*").ok());

const BULLETS: [char; 6] = ['•', '●', '◦', '▪', '‣', '∙'];

pub struct NormalizeStep {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

pub const STEPS: [NormalizeStep; 6] = [
    NormalizeStep {
        name: "strip_header_line",
        apply: strip_header_line,
    },
    NormalizeStep {
        name: "remove_parentheticals",
        apply: remove_parentheticals,
    },
    NormalizeStep {
        name: "bullets_to_commas",
        apply: bullets_to_commas,
    },
    NormalizeStep {
        name: "remove_percentages",
        apply: remove_percentages,
    },
    NormalizeStep {
        name: "collapse_commas",
        apply: collapse_commas,
    },
    NormalizeStep {
        name: "remove_semicolons",
        apply: remove_semicolons,
    },
];

/// Runs every step and trims leftover whitespace and commas from both ends.
pub fn normalize(raw: &str) -> String {
    trim_artifacts(&normalize_untrimmed(raw))
}

pub fn normalize_untrimmed(raw: &str) -> String {
    run_steps(raw, &STEPS)
}

pub fn run_steps(raw: &str, steps: &[NormalizeStep]) -> String {
    steps.iter().fold(raw.to_string(), |text, step| {
        let next = (step.apply)(&text);
        if next != text {
            tracing::trace!(step = step.name, before = text.len(), after = next.len(), "normalize step");
        }
        next
    })
}

/// Drops everything up to and including the first line break. Text without a line break is
/// left alone.
pub fn strip_header_line(text: &str) -> String {
    replace(&HEADER_LINE, text, "", 1)
}

pub fn remove_parentheticals(text: &str) -> String {
    replace(&PARENTHETICAL, text, "", 0)
}

pub fn bullets_to_commas(text: &str) -> String {
    text.chars()
        .map(|c| if BULLETS.contains(&c) { ',' } else { c })
        .collect()
}

pub fn remove_percentages(text: &str) -> String {
    replace(&PERCENTAGE, text, "", 0)
}

pub fn collapse_commas(text: &str) -> String {
    replace(&COMMA_RUN, text, ",", 0)
}

pub fn remove_semicolons(text: &str) -> String {
    text.replace(';', "")
}

pub fn trim_artifacts(text: &str) -> String {
    text.trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

fn replace(pattern: &LazyLock<Option<Regex>>, text: &str, with: &str, limit: usize) -> String {
    match pattern.as_ref() {
        Some(regex) => regex.replacen(text, limit, with).into_owned(),
        None => text.to_string(),
    }
}
