use crate::{ConceptId, Language};
use hashbrown::HashMap;
use term_segmentation::SearchType;

/// Pins a concept in one language to a single search type.
///
/// Some columns spell two concepts the same way (a type and a move both
/// `psíquico`). An entry at `(concept, language)` makes that index match only
/// when the segment classifies as the stored type.
#[derive(Debug, Clone, Default)]
pub struct OverlapTable {
    entries: HashMap<(ConceptId, Language), SearchType>,
}

impl OverlapTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, concept: ConceptId, language: Language, search_type: SearchType) {
        self.entries.insert((concept, language), search_type);
    }

    pub fn get(&self, concept: ConceptId, language: Language) -> Option<SearchType> {
        self.entries.get(&(concept, language)).copied()
    }

    /// Indices without an entry admit every search type.
    pub fn admits(&self, concept: ConceptId, language: Language, search_type: SearchType) -> bool {
        self.get(concept, language)
            .is_none_or(|pinned| pinned == search_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConceptId, Language, SearchType)> + '_ {
        self.entries
            .iter()
            .map(|(&(concept, language), &search_type)| (concept, language, search_type))
    }
}

impl FromIterator<(ConceptId, Language, SearchType)> for OverlapTable {
    fn from_iter<I: IntoIterator<Item = (ConceptId, Language, SearchType)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (concept, language, search_type) in iter {
            table.insert(concept, language, search_type);
        }
        table
    }
}
