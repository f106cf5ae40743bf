use crate::{Language, LanguageSet, Lexicon, Warning, WarningRole, fold_term};
use hashbrown::HashSet;
use rayon::prelude::*;
use std::fmt;
use term_segmentation::{Piece, SearchType, split_pieces, split_segment};
use tracing::debug;

/// Result of translating one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    /// Term caveats, in the order they fired.
    pub warnings: Vec<Warning>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Things worth telling a user about a translation that are not term
/// warnings. None of them stop a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No entry in the source column; the segment was copied unchanged.
    Unresolved { term: String, search_type: SearchType },
    /// The catalog has no column for this language.
    UnsupportedLanguage { language: Language },
    /// Detection found no language every term belongs to.
    UndetectedLanguage,
    /// Detection found several candidate languages and picked one.
    AmbiguousLanguage {
        candidates: LanguageSet,
        chosen: Language,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unresolved { term, search_type } => {
                write!(f, "no translation for `{term}` ({search_type:?})")
            }
            Diagnostic::UnsupportedLanguage { language } => {
                write!(f, "catalog has no `{language}` column")
            }
            Diagnostic::UndetectedLanguage => {
                f.write_str("could not detect the query language; left unchanged")
            }
            Diagnostic::AmbiguousLanguage { candidates, chosen } => {
                write!(f, "query could be any of {candidates}; read it as `{chosen}`")
            }
        }
    }
}

/// Rewrites every term in `text` from `source` into `target`, keeping
/// operators, markers and numbers where they are.
///
/// ```
/// use term_catalog::{Language, bundled_lexicon, translate};
///
/// let lexicon = bundled_lexicon().unwrap();
/// let translation = translate(lexicon, "shiny&!lucky,cp10-", Language::En, Language::De);
/// assert_eq!(translation.text, "schillernd&!glücks,wp10-");
/// assert!(translation.warnings.is_empty());
/// ```
pub fn translate(lexicon: &Lexicon, text: &str, source: Language, target: Language) -> Translation {
    if source == target {
        return Translation {
            text: text.to_string(),
            ..Translation::default()
        };
    }
    let mut translator = Translator {
        lexicon,
        source,
        target,
        out: Translation::default(),
        fired: HashSet::new(),
    };
    translator.check_languages();
    translator.run(text);
    translator.out
}

/// [`translate`] over a batch, in parallel. Results line up with `texts`.
pub fn translate_many<S>(
    lexicon: &Lexicon,
    texts: &[S],
    source: Language,
    target: Language,
) -> Vec<Translation>
where
    S: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .map(|text| translate(lexicon, text.as_ref(), source, target))
        .collect()
}

struct Translator<'l> {
    lexicon: &'l Lexicon,
    source: Language,
    target: Language,
    out: Translation,
    // (upper-cased term, language, role) already reported
    fired: HashSet<(String, Language, WarningRole)>,
}

impl Translator<'_> {
    fn check_languages(&mut self) {
        let catalog = self.lexicon.catalog();
        for language in [self.source, self.target] {
            let diagnostic = Diagnostic::UnsupportedLanguage { language };
            if !catalog.has_language(language) && !self.out.diagnostics.contains(&diagnostic) {
                debug!(%language, "language missing from catalog");
                self.out.diagnostics.push(diagnostic);
            }
        }
    }

    fn run(&mut self, text: &str) {
        self.out.text.reserve(text.len());
        for piece in split_pieces(text) {
            match piece {
                Piece::Segment(segment) => {
                    let translated = self.segment(segment);
                    self.out.text.push_str(&translated);
                }
                Piece::Separator(separator) => self.out.text.push(separator),
            }
        }
    }

    fn segment(&mut self, text: &str) -> String {
        let segment = split_segment(text);
        if !segment.has_term() {
            return text.to_string();
        }
        let search_type = segment.search_type();
        let lexicon = self.lexicon;

        let Some(concept) = lexicon.resolve_folded(&fold_term(segment.core), self.source, search_type)
        else {
            debug!(term = segment.core, ?search_type, "unresolved term");
            self.out.diagnostics.push(Diagnostic::Unresolved {
                term: segment.core.to_string(),
                search_type,
            });
            return text.to_string();
        };
        let Some(translated) = lexicon.catalog().surface(self.target, concept) else {
            return text.to_string();
        };
        debug!(from = segment.core, to = translated, %concept, "translated term");

        self.fire(segment.core, self.source, WarningRole::Source, search_type);
        self.fire(translated, self.target, WarningRole::Target, search_type);
        segment.with_core(translated)
    }

    fn fire(&mut self, term: &str, language: Language, role: WarningRole, search_type: SearchType) {
        let lexicon = self.lexicon;
        let Some(entry) = lexicon.warnings().lookup(term, language, search_type) else {
            return;
        };
        if !self.fired.insert((term.to_uppercase(), language, role)) {
            return;
        }
        let message = match role {
            WarningRole::Source => &entry.source_message,
            WarningRole::Target => &entry.target_message,
        };
        self.out.warnings.push(Warning {
            term: term.to_string(),
            language,
            role,
            message: message.clone(),
        });
    }
}
