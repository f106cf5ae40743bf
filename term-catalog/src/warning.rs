use crate::Language;
use hashbrown::HashMap;
use std::fmt;
use term_segmentation::SearchType;

/// Which search types a warning applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// Written `*` in catalog files.
    Any,
    Only(SearchType),
}

impl Qualifier {
    pub fn admits(self, search_type: SearchType) -> bool {
        match self {
            Qualifier::Any => true,
            Qualifier::Only(only) => only == search_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningEntry {
    pub qualifier: Qualifier,
    /// Shown when the term appears in the query being translated.
    pub source_message: String,
    /// Shown when the term is produced by the translation.
    pub target_message: String,
}

/// Which side of a translation a warning fired for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningRole {
    Source,
    Target,
}

/// A warning fired during one translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub term: String,
    pub language: Language,
    pub role: WarningRole,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.language, self.message)
    }
}

/// Term-specific caveats, keyed on the upper-cased surface term and its
/// language.
#[derive(Debug, Clone, Default)]
pub struct WarningTable {
    entries: HashMap<(String, Language), WarningEntry>,
}

impl WarningTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: &str, language: Language, entry: WarningEntry) {
        self.entries.insert((term.to_uppercase(), language), entry);
    }

    /// The entry for `term` in `language`, if its qualifier accepts
    /// `search_type`. `term` is upper-cased before the lookup.
    pub fn lookup(
        &self,
        term: &str,
        language: Language,
        search_type: SearchType,
    ) -> Option<&WarningEntry> {
        self.entries
            .get(&(term.to_uppercase(), language))
            .filter(|entry| entry.qualifier.admits(search_type))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries as `(upper-cased term, language, entry)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Language, &WarningEntry)> + '_ {
        self.entries
            .iter()
            .map(|((term, language), entry)| (term.as_str(), *language, entry))
    }
}
