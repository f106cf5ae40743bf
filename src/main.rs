mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use search_syntax::ConflictKind;
use searchlingo::{init_tracing, EngineConfig, SearchEngine};
use std::process::ExitCode;
use term_catalog::{Diagnostic, Translation, Warning};

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(catalog) = cli.catalog {
        config.catalog = Some(catalog);
    }
    let engine = SearchEngine::from_config(config).context("Failed to set up the engine")?;

    match cli.command {
        Command::Check { query } => match engine.check(&query) {
            Ok(()) => {
                println!("ok");
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                println!("{err}");
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Parse { query, lang } => {
            let analysis = engine.analyze_in(&query, lang.unwrap_or(engine.canonical()));
            report_notes(&analysis.warnings, &analysis.diagnostics);
            let extraction = &analysis.extraction;
            if let Some(tree) = &analysis.tree {
                println!("tree: {tree}");
            }
            println!("included: {}", join(&extraction.included));
            println!("excluded: {}", join(&extraction.excluded));
            for conflict in &extraction.conflicts {
                println!("conflict: {conflict}");
            }
            let rejected = extraction
                .conflicts
                .iter()
                .any(|conflict| matches!(conflict.kind, ConflictKind::Syntax | ConflictKind::ParseError));
            Ok(if rejected {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Translate { queries, from, to } => {
            let translations: Vec<Translation> = match from {
                Some(from) => engine.translate_many(&queries, from, to),
                None => queries
                    .iter()
                    .map(|query| engine.translate_auto(query, to))
                    .collect(),
            };
            for translation in translations {
                report_notes(&translation.warnings, &translation.diagnostics);
                println!("{}", translation.text);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Detect { query } => {
            let candidates = engine.detect(&query);
            if candidates.is_empty() {
                println!("no language matches every term");
            } else {
                for language in candidates.languages() {
                    println!("{language}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn report_notes(warnings: &[Warning], diagnostics: &[Diagnostic]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
    for diagnostic in diagnostics {
        eprintln!("note: {diagnostic}");
    }
}

fn join<'a>(terms: impl IntoIterator<Item = &'a String>) -> String {
    terms
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
