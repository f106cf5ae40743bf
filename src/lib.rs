//! Search strings for a creature-collecting game: a validator, parser and
//! conflict detector for the query language, and a translator that moves
//! queries between fifteen languages without changing their logic.
//!
//! ```
//! use searchlingo::SearchEngine;
//! use term_catalog::Language;
//!
//! let engine = SearchEngine::bundled().unwrap();
//! let analysis = engine.analyze_in("crypto&erlöst", Language::De);
//! assert_eq!(analysis.canonical_text, "shadow&purified");
//! assert!(!analysis.extraction.is_clean());
//! ```
mod config;
mod engine;
mod logging;

pub use config::*;
pub use engine::*;
pub use logging::*;
