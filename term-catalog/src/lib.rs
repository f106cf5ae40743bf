//! Position-aligned term catalog for search strings, and the translator and
//! language detector built on it.
//!
//! Every language column lists the same concepts in the same order, so a term
//! is translated by finding its index in the source column and reading the
//! target column at that index.
mod catalog;
mod detect;
mod fold;
mod language;
mod lexicon;
mod overlap;
mod persistent;
mod translate;
mod warning;

pub use catalog::*;
pub use detect::*;
pub use fold::*;
pub use language::*;
pub use lexicon::*;
pub use overlap::*;
pub use persistent::*;
pub use translate::*;
pub use warning::*;
