use clap::{Parser, Subcommand};
use std::path::PathBuf;
use term_catalog::Language;

#[derive(Parser)]
#[clap(name = "searchlingo", version, about = "Check, analyze and translate search strings")]
pub struct Cli {
    /// Catalog file (JSON, or gzipped JSON ending in `.gz`). Overrides the config file.
    #[clap(long, global = true)]
    pub catalog: Option<PathBuf>,
    /// Engine config file (JSON).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a query's syntax. Exits non-zero when it is rejected.
    Check { query: String },
    /// Parse a query and list its terms and conflicts.
    Parse {
        query: String,
        /// Language the query is written in. Defaults to the canonical language.
        #[clap(long)]
        lang: Option<Language>,
    },
    /// Translate one or more queries.
    Translate {
        #[clap(required = true)]
        queries: Vec<String>,
        /// Source language; detected per query when omitted.
        #[clap(long)]
        from: Option<Language>,
        #[clap(long)]
        to: Language,
    },
    /// List the languages a query could be written in.
    Detect { query: String },
}
