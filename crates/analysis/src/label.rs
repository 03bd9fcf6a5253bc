use regex::Regex;
use std::sync::LazyLock;

/// Phrase fixes applied after the generic sentence-case pass. Longer phrases come first so
/// they win over the single-token acronyms they contain.
pub const PHRASE_OVERRIDES: [(&str, &str); 10] = [
    ("fungal acne feeding", "Fungal Acne Feeding"),
    ("uv protecting", "UV Protecting"),
    ("eu allergen", "EU Allergen"),
    ("peg", "PEG"),
    ("uv", "UV"),
    ("spf", "SPF"),
    ("aha", "AHA"),
    ("bha", "BHA"),
    ("pha", "PHA"),
    ("ewg", "EWG"),
];

static OVERRIDES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    PHRASE_OVERRIDES
        .iter()
        .filter_map(|(phrase, replacement)| {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase)))
                .ok()
                .map(|regex| (regex, *replacement))
        })
        .collect()
});

/// Turns an API category key such as `uv_protecting` into a display label.
pub fn format_category(key: &str) -> String {
    let sentence = sentence_case(key);
    OVERRIDES
        .iter()
        .fold(sentence, |label, (regex, replacement)| {
            regex.replace_all(&label, *replacement).into_owned()
        })
}

/// Free-from pill text: the bare label when absent, the label with its count otherwise.
pub fn format_pill(key: &str, count: i64) -> String {
    let label = format_category(key);
    if count <= 0 {
        label
    } else {
        format!("{label} ({count})")
    }
}

fn sentence_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(idx, word)| {
            let lower = word.to_lowercase();
            if idx > 0 {
                return lower;
            }
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
