use crate::{ConceptId, Language, OverlapTable, TermCatalog, WarningTable, fold_term};
use term_segmentation::SearchType;
use tracing::trace;

/// A catalog together with the tables that qualify its lookups.
#[derive(Debug, Clone)]
pub struct Lexicon {
    catalog: TermCatalog,
    overlaps: OverlapTable,
    warnings: WarningTable,
}

impl Lexicon {
    pub fn new(catalog: TermCatalog, overlaps: OverlapTable, warnings: WarningTable) -> Self {
        Self {
            catalog,
            overlaps,
            warnings,
        }
    }

    pub fn catalog(&self) -> &TermCatalog {
        &self.catalog
    }

    pub fn overlaps(&self) -> &OverlapTable {
        &self.overlaps
    }

    pub fn warnings(&self) -> &WarningTable {
        &self.warnings
    }

    /// Finds the concept `term` names in `language` when read as
    /// `search_type`. Case and accents are ignored.
    pub fn resolve(&self, term: &str, language: Language, search_type: SearchType) -> Option<ConceptId> {
        self.resolve_folded(&fold_term(term), language, search_type)
    }

    pub fn resolve_folded(
        &self,
        folded: &str,
        language: Language,
        search_type: SearchType,
    ) -> Option<ConceptId> {
        let overlaps = &self.overlaps;
        self.catalog.find(language, folded, |concept| {
            let admitted = overlaps.admits(concept, language, search_type);
            if !admitted {
                trace!(%concept, %language, ?search_type, "overlap skipped candidate");
            }
            admitted
        })
    }
}
