use crate::{LanguageSet, Lexicon, fold_term};
use term_segmentation::{Piece, split_pieces, split_segment};
use tracing::debug;

/// Languages in which every term of `text` resolves.
///
/// Starts from every language the catalog carries and narrows per segment.
/// Empty means no single language explains the query; more than one member
/// means the query reads the same in several languages. A query with no terms
/// at all keeps every language.
///
/// ```
/// use term_catalog::{Language, bundled_lexicon, detect};
///
/// let lexicon = bundled_lexicon().unwrap();
/// assert_eq!(detect(lexicon, "schillernd&!glücks").single(), Some(Language::De));
/// assert!(detect(lexicon, "schillernd&shiny").is_empty());
/// ```
pub fn detect(lexicon: &Lexicon, text: &str) -> LanguageSet {
    let catalog = lexicon.catalog();
    let mut candidates = catalog.languages();
    for piece in split_pieces(text) {
        let Piece::Segment(segment) = piece else {
            continue;
        };
        let segment = split_segment(segment);
        if !segment.has_term() {
            continue;
        }
        let folded = fold_term(segment.core);
        let search_type = segment.search_type();
        let matches: LanguageSet = candidates
            .languages()
            .filter(|&language| {
                lexicon
                    .resolve_folded(&folded, language, search_type)
                    .is_some()
            })
            .collect();
        candidates &= matches;
        debug!(term = segment.core, %candidates, "narrowed languages");
        if candidates.is_empty() {
            break;
        }
    }
    candidates
}
