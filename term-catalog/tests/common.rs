#![allow(dead_code)]
//! Shared helpers for `term-catalog` integration tests.

use term_catalog::*;
use term_segmentation::SearchType;

pub fn bundled() -> &'static Lexicon {
    bundled_lexicon().expect("bundled catalog loads")
}

pub fn tr(text: &str, source: Language, target: Language) -> String {
    translate(bundled(), text, source, target).text
}

pub fn messages(translation: &Translation) -> Vec<&str> {
    translation
        .warnings
        .iter()
        .map(|warning| warning.message.as_str())
        .collect()
}

/// Replaces every term with `x` so only the operator layout is left.
pub fn shape(text: &str) -> String {
    search_syntax::tokenize(text)
        .map(|token| match token {
            search_syntax::Token::Filter(_) => "x".to_string(),
            search_syntax::Token::Not => "!".to_string(),
            search_syntax::Token::And => "&".to_string(),
            search_syntax::Token::Or => ",".to_string(),
            search_syntax::Token::EndOfInput => String::new(),
        })
        .collect()
}

/// A two-language catalog small enough to reason about by hand.
pub fn tiny() -> Lexicon {
    let document = CatalogDocument {
        languages: [
            (Language::En, vec!["shiny", "psychic", "psychic", "age"]),
            (Language::Fr, vec!["chromatique", "psy", "psyko", "âge"]),
        ]
        .into_iter()
        .map(|(language, terms)| (language, terms.into_iter().map(String::from).collect()))
        .collect(),
        overlaps: vec![
            OverlapRecord {
                concept: ConceptId(1),
                language: Language::En,
                search_type: SearchType::Name.into(),
            },
            OverlapRecord {
                concept: ConceptId(2),
                language: Language::En,
                search_type: SearchType::Move.into(),
            },
        ],
        warnings: vec![WarningRecord {
            term: "age".into(),
            language: Language::En,
            qualifier: QualifierRecord::Search,
            source_message: "age is days since capture".into(),
            target_message: "âge is days since capture".into(),
        }],
    };
    Lexicon::from_document(document).expect("tiny catalog is valid")
}
