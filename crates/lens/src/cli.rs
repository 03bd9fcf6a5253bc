use clap::{Parser, ValueEnum};
use inci_analysis::NavEvent;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Scrape, clean, submit and show the report.
    Analyze,
    /// Print the cleaned ingredient list without contacting the API.
    Normalize,
    /// Print the raw text found in an HTML page.
    Scrape,
}

#[derive(Parser, Debug)]
#[command(
    name = "inci-lens",
    version,
    about = "Cosmetic ingredient list analyzer"
)]
pub(crate) struct Args {
    #[arg(long, value_enum, default_value_t = Mode::Analyze)]
    pub(crate) mode: Mode,
    /// Config file; defaults to ~/.inci-lens/config.toml when present.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Raw ingredient text given inline.
    #[arg(long, conflicts_with_all = ["input", "html"])]
    pub(crate) text: Option<String>,
    /// File holding raw ingredient text; `-` reads stdin.
    #[arg(long, conflicts_with = "html")]
    pub(crate) input: Option<PathBuf>,
    /// Saved product page to scrape.
    #[arg(long)]
    pub(crate) html: Option<PathBuf>,
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
    #[arg(long)]
    pub(crate) timeout_ms: Option<u64>,
    /// Navigation applied after a successful analysis, in order:
    /// `category:<key>`, `free-from:<key>` or `back`.
    #[arg(long = "nav", value_parser = parse_nav)]
    pub(crate) nav: Vec<NavEvent>,
    #[arg(long, default_value_t = false)]
    pub(crate) json: bool,
    #[arg(long)]
    pub(crate) log_dir: Option<PathBuf>,
    #[arg(long, short, default_value_t = false)]
    pub(crate) verbose: bool,
}

pub(crate) fn parse_nav(raw: &str) -> Result<NavEvent, String> {
    let raw = raw.trim();
    if raw == "back" {
        return Ok(NavEvent::Back);
    }
    let (kind, key) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected category:<key>, free-from:<key> or back, got {raw}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in {raw}"));
    }
    match kind {
        "category" => Ok(NavEvent::SelectCategory(key.to_string())),
        "free-from" => Ok(NavEvent::SelectFreeFrom(key.to_string())),
        other => Err(format!("unknown navigation target: {other}")),
    }
}
