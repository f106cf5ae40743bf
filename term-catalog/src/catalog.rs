use crate::{Language, LanguageSet, fold_term};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Position of a concept in every language column. The only identity a
/// concept has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub usize);

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Column {
    surface: Vec<String>,
    // surface[i] run through `fold_term`
    folded: Vec<String>,
}

/// Parallel term lists, one per language, all of the same length.
///
/// Read-only once built; [`CatalogBuilder`] is the only way in.
#[derive(Debug, Clone)]
pub struct TermCatalog {
    columns: BTreeMap<Language, Column>,
    len: usize,
}

impl TermCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Number of concepts.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn languages(&self) -> LanguageSet {
        self.columns.keys().copied().collect()
    }

    pub fn has_language(&self, language: Language) -> bool {
        self.columns.contains_key(&language)
    }

    pub fn surface(&self, language: Language, concept: ConceptId) -> Option<&str> {
        self.columns
            .get(&language)
            .and_then(|column| column.surface.get(concept.0))
            .map(String::as_str)
    }

    /// The whole column for `language`, in concept order.
    pub fn terms(&self, language: Language) -> Option<&[String]> {
        self.columns
            .get(&language)
            .map(|column| column.surface.as_slice())
    }

    /// First concept whose folded term in `language` equals `folded` and that
    /// `admit` accepts. Rejected candidates do not stop the scan.
    pub fn find(
        &self,
        language: Language,
        folded: &str,
        mut admit: impl FnMut(ConceptId) -> bool,
    ) -> Option<ConceptId> {
        let column = self.columns.get(&language)?;
        column
            .folded
            .iter()
            .enumerate()
            .filter(|(_, term)| term.as_str() == folded)
            .map(|(idx, _)| ConceptId(idx))
            .find(|&concept| admit(concept))
    }

    pub fn concepts(&self) -> impl Iterator<Item = ConceptId> {
        (0..self.len).map(ConceptId)
    }
}

/// Collects language columns and checks them once in [`CatalogBuilder::build`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    columns: BTreeMap<Language, Vec<String>>,
}

impl CatalogBuilder {
    /// Adds or replaces the column for `language`.
    pub fn language<S: Into<String>>(
        mut self,
        language: Language,
        terms: impl IntoIterator<Item = S>,
    ) -> Self {
        self.columns
            .insert(language, terms.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<TermCatalog> {
        let Some(canonical) = self.columns.get(&Language::CANONICAL) else {
            bail!("catalog has no `{}` column", Language::CANONICAL);
        };
        let len = canonical.len();
        if len == 0 {
            bail!("catalog has no concepts");
        }
        for (language, terms) in &self.columns {
            if terms.len() != len {
                bail!(
                    "column `{language}` has {} terms, expected {len} like `{}`",
                    terms.len(),
                    Language::CANONICAL
                );
            }
            if let Some(idx) = terms.iter().position(|term| term.trim().is_empty()) {
                bail!("column `{language}` has an empty term at index {idx}");
            }
        }

        let columns = self
            .columns
            .into_iter()
            .map(|(language, surface)| {
                let folded = surface.iter().map(|term| fold_term(term)).collect();
                (language, Column { surface, folded })
            })
            .collect();
        Ok(TermCatalog { columns, len })
    }
}
