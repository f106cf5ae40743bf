use crate::EngineConfig;
use anyhow::{bail, Context, Result};
use search_syntax::{
    analyze, analyze_with_tree, validate_syntax, Ast, ConflictRules, Extraction, SyntaxError,
};
use std::borrow::Cow;
use term_catalog::{
    bundled_lexicon, detect, read_lexicon_from_file, translate, translate_many, Diagnostic,
    Language, LanguageSet, Lexicon, Translation, Warning,
};
use tracing::debug;

/// An [`Extraction`] of a query written in some language, along with what
/// translating it to the canonical language produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// The query as it was analyzed.
    pub canonical_text: String,
    /// Parsed form of `canonical_text`; `None` when it is empty or rejected.
    pub tree: Option<Ast>,
    pub extraction: Extraction,
    pub warnings: Vec<Warning>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Validates, analyzes, translates and detects search strings against one
/// catalog and one set of conflict rules.
pub struct SearchEngine {
    lexicon: Cow<'static, Lexicon>,
    rules: ConflictRules,
    canonical: Language,
}

impl SearchEngine {
    /// The bundled catalog with default rules.
    pub fn bundled() -> Result<Self> {
        Self::from_config(EngineConfig::default())
    }

    pub fn from_config(config: EngineConfig) -> Result<Self> {
        let lexicon = match &config.catalog {
            Some(path) => Cow::Owned(
                read_lexicon_from_file(path).context("Failed to load configured catalog")?,
            ),
            None => Cow::Borrowed(bundled_lexicon()?),
        };
        if !lexicon.catalog().has_language(config.canonical) {
            bail!("catalog has no column for canonical language `{}`", config.canonical);
        }
        Ok(Self {
            lexicon,
            rules: config.rules,
            canonical: config.canonical,
        })
    }

    pub fn new(lexicon: Lexicon, rules: ConflictRules) -> Self {
        Self {
            lexicon: Cow::Owned(lexicon),
            rules,
            canonical: Language::CANONICAL,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn rules(&self) -> &ConflictRules {
        &self.rules
    }

    pub fn canonical(&self) -> Language {
        self.canonical
    }

    pub fn check(&self, text: &str) -> Result<(), SyntaxError> {
        validate_syntax(text)
    }

    /// Analyzes a query already written in the canonical language.
    pub fn analyze(&self, text: &str) -> Extraction {
        analyze(text, &self.rules)
    }

    /// Translates `text` from `language` to the canonical language first, so
    /// conflict rules written in canonical terms apply.
    pub fn analyze_in(&self, text: &str, language: Language) -> Analysis {
        let translation = self.translate(text, language, self.canonical);
        let (tree, extraction) = analyze_with_tree(&translation.text, &self.rules);
        Analysis {
            canonical_text: translation.text,
            tree,
            extraction,
            warnings: translation.warnings,
            diagnostics: translation.diagnostics,
        }
    }

    pub fn translate(&self, text: &str, source: Language, target: Language) -> Translation {
        translate(&self.lexicon, text, source, target)
    }

    /// Detects the source language and translates from it.
    ///
    /// With several candidates the canonical language is preferred, then the
    /// first candidate in declaration order; the choice is reported as a
    /// diagnostic. With none the text comes back unchanged.
    pub fn translate_auto(&self, text: &str, target: Language) -> Translation {
        let candidates = self.detect(text);
        let Some(source) = self.pick_source(candidates) else {
            debug!("no source language detected");
            return Translation {
                text: text.to_string(),
                diagnostics: vec![Diagnostic::UndetectedLanguage],
                ..Translation::default()
            };
        };
        let mut translation = self.translate(text, source, target);
        if candidates.len() > 1 {
            translation.diagnostics.insert(
                0,
                Diagnostic::AmbiguousLanguage {
                    candidates,
                    chosen: source,
                },
            );
        }
        translation
    }

    pub fn detect(&self, text: &str) -> LanguageSet {
        detect(&self.lexicon, text)
    }

    pub fn translate_many<S>(&self, texts: &[S], source: Language, target: Language) -> Vec<Translation>
    where
        S: AsRef<str> + Sync,
    {
        translate_many(&self.lexicon, texts, source, target)
    }

    fn pick_source(&self, candidates: LanguageSet) -> Option<Language> {
        if candidates.has(self.canonical) {
            return Some(self.canonical);
        }
        candidates.languages().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SearchEngine {
        SearchEngine::bundled().unwrap()
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchEngine>();
    }

    #[test]
    fn pick_source_prefers_canonical() {
        let engine = engine();
        assert_eq!(
            engine.pick_source(LanguageSet::FR | LanguageSet::EN),
            Some(Language::En)
        );
        assert_eq!(
            engine.pick_source(LanguageSet::ES_MX | LanguageSet::ES),
            Some(Language::Es)
        );
        assert_eq!(engine.pick_source(LanguageSet::empty()), None);
    }

    #[test]
    fn any_bundled_language_can_be_canonical() {
        let config = EngineConfig {
            canonical: Language::Th,
            ..EngineConfig::default()
        };
        let engine = SearchEngine::from_config(config).unwrap();
        assert_eq!(engine.canonical(), Language::Th);
        assert_eq!(engine.analyze_in("shiny", Language::En).canonical_text, "ไชนี่");
    }
}
