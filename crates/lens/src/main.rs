mod cli;
mod client;
mod config;
mod logging;
mod render;
mod scrape;

use crate::cli::{Args, Mode};
use crate::client::HttpBackend;
use crate::config::{load_config, resolve_settings, Settings};
use crate::logging::init_tracing;
use crate::scrape::{PageScraper, PageSource};
use anyhow::Context;
use clap::Parser;
use inci_analysis::{normalize, run_analysis, AnalysisSession, IngredientSource};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let _log_guard = init_tracing(args.log_dir.as_deref(), args.verbose)?;

    let config = load_config(args.config.as_deref())?;
    let settings = resolve_settings(&args, config)?;
    if args.mode == Mode::Scrape && args.html.is_none() {
        anyhow::bail!("--mode scrape needs --html");
    }
    let source = build_source(&args, &settings)?;

    match args.mode {
        Mode::Scrape => match source.ingredient_text() {
            Some(text) => println!("{text}"),
            None => {
                eprintln!("No ingredients found.");
                return Ok(ExitCode::FAILURE);
            }
        },
        Mode::Normalize => match source.ingredient_text() {
            Some(text) => println!("{}", normalize(&text)),
            None => {
                eprintln!("No ingredients found.");
                return Ok(ExitCode::FAILURE);
            }
        },
        Mode::Analyze => return analyze(&args, &settings, &source).await,
    }
    Ok(ExitCode::SUCCESS)
}

async fn analyze(args: &Args, settings: &Settings, source: &PageSource) -> anyhow::Result<ExitCode> {
    let backend = HttpBackend::new(settings.endpoint.clone(), settings.timeout)?;
    let mut session = AnalysisSession::new();
    tracing::info!(endpoint = %settings.endpoint, "starting analysis");
    let outcome = run_analysis(&mut session, source, &backend).await;
    if outcome.is_ok() {
        for event in &args.nav {
            let view = session.navigate(event.clone());
            tracing::debug!(view = ?view, "navigated");
        }
    }

    let screen = session.screen();
    let output = if args.json {
        render::render_json(&screen).context("failed to encode report")?
    } else {
        render::render_text(&screen, session.last().map(|cached| cached.analyzed_at))
    };
    print!("{output}");
    if args.json {
        println!();
    }

    let code = if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };
    session.clear();
    Ok(code)
}

fn build_source(args: &Args, settings: &Settings) -> anyhow::Result<PageSource> {
    if let Some(text) = &args.text {
        return Ok(PageSource::Text(text.clone()));
    }
    if let Some(path) = &args.html {
        let html = read_file(path)?;
        let scraper = PageScraper::from_config(&settings.scrape)?;
        return Ok(PageSource::Html { html, scraper });
    }
    let text = match args.input.as_deref() {
        Some(path) if path != Path::new("-") => read_file(path)?,
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read stdin")?;
            raw
        }
    };
    Ok(PageSource::Text(text))
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
