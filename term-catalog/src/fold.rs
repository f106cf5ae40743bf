use unicode_normalization::UnicodeNormalization;

/// Case- and accent-insensitive key for a term: NFD, drop combining marks in
/// U+0300..=U+036F, lower-case.
///
/// ```
/// use term_catalog::fold_term;
///
/// assert_eq!(fold_term("Psíquico"), "psiquico");
/// assert_eq!(fold_term("ÉCLOS"), "eclos");
/// assert_eq!(fold_term("色違い"), "色違い");
/// ```
pub fn fold_term(term: &str) -> String {
    term.nfd()
        .filter(|ch| !is_combining_diacritic(*ch))
        .collect::<String>()
        .to_lowercase()
}

fn is_combining_diacritic(ch: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_latin_accents_and_case() {
        assert_eq!(fold_term("Glücks"), "glucks");
        assert_eq!(fold_term("MÂLE"), "male");
        assert_eq!(fold_term("compañero"), "companero");
        assert_eq!(fold_term("Psişik"), "psisik");
    }

    #[test]
    fn other_scripts_fold_by_the_same_rule() {
        assert_eq!(fold_term("ВОДА"), "вода");
        assert_eq!(fold_term("色違い"), "色違い");
        // Breve is a combining mark too.
        assert_eq!(fold_term("мифический"), "мифическии");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(fold_term(""), "");
    }
}
