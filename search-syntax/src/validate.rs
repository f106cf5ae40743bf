use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use term_segmentation::{Piece, split_pieces};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("whitespace pattern"));

// An entity-number group opening a segment and running straight into a
// letter: `25shiny`, `1,2shiny`, `!1-151lucky`. Only ASCII digits mark
// numbers; other scripts' digits are term text, as in the segment splitter.
static NUMBER_THEN_LETTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[&|,;:!])([0-9]+(?:-[0-9]*)?)\p{L}").expect("number-then-letter pattern")
});

static NUMBER_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:-[0-9]*)?$").expect("number group pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    EmbeddedWhitespace,
    MissingOperator,
    AndBetweenNumbers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub message: String,
    pub position: usize,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.position)
    }
}

impl std::error::Error for SyntaxError {}

/// Cheap textual checks that catch the mistakes the parser would otherwise
/// accept or misreport. Runs on the raw query before tokenizing.
///
/// ```
/// use search_syntax::{validate_syntax, SyntaxErrorKind};
///
/// assert!(validate_syntax("1,2,3&shiny").is_ok());
/// assert_eq!(validate_syntax("1,2 3").unwrap_err().kind, SyntaxErrorKind::EmbeddedWhitespace);
/// assert_eq!(validate_syntax("12&3").unwrap_err().kind, SyntaxErrorKind::AndBetweenNumbers);
/// ```
pub fn validate_syntax(text: &str) -> Result<(), SyntaxError> {
    if let Some(found) = WHITESPACE.find(text) {
        return Err(SyntaxError {
            kind: SyntaxErrorKind::EmbeddedWhitespace,
            message: "search strings cannot contain whitespace".into(),
            position: found.start(),
        });
    }

    if let Some(group) = NUMBER_THEN_LETTER
        .captures(text)
        .and_then(|captures| captures.get(1))
    {
        return Err(SyntaxError {
            kind: SyntaxErrorKind::MissingOperator,
            message: format!(
                "missing operator between `{}` and the term after it",
                group.as_str()
            ),
            position: group.end(),
        });
    }

    check_and_between_numbers(text)
}

// AND binds tighter than OR, so the operands of an `&` are the segments
// directly around it: `1,2&3` puts `2` and `3` on either side.
fn check_and_between_numbers(text: &str) -> Result<(), SyntaxError> {
    let mut offset = 0;
    let mut previous: Option<&str> = None;
    let mut pending_and: Option<usize> = None;

    for piece in split_pieces(text) {
        match piece {
            Piece::Segment(segment) => {
                if let (Some(position), Some(left)) = (pending_and, previous) {
                    if is_number_group(left) && is_number_group(segment) {
                        return Err(SyntaxError {
                            kind: SyntaxErrorKind::AndBetweenNumbers,
                            message: format!(
                                "`{left}` and `{segment}` are both Pokédex numbers, join them with `,` instead of `&`"
                            ),
                            position,
                        });
                    }
                }
                pending_and = None;
                previous = Some(segment);
                offset += segment.len();
            }
            Piece::Separator(ch) => {
                if matches!(ch, '&' | '|') {
                    pending_and = Some(offset);
                }
                offset += ch.len_utf8();
            }
        }
    }
    Ok(())
}

fn is_number_group(segment: &str) -> bool {
    NUMBER_GROUP.is_match(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(text: &str) -> Option<SyntaxErrorKind> {
        validate_syntax(text).err().map(|error| error.kind)
    }

    #[test]
    fn accepts_common_queries() {
        for text in [
            "",
            "shiny",
            "shiny&!shadow",
            "1,2,3",
            "1-151&shiny",
            "4*,3*&lucky",
            "@1psychic&cp10-1500",
            "+eevee:#favorite",
            "色違い&!キラ",
            "age0-1|distance100-",
        ] {
            assert_eq!(validate_syntax(text), Ok(()), "{text}");
        }
    }

    #[test]
    fn rejects_any_whitespace() {
        let error = validate_syntax("1,2 3").unwrap_err();
        assert_eq!(error.kind, SyntaxErrorKind::EmbeddedWhitespace);
        assert_eq!(error.position, 3);

        assert_eq!(kind_of("shiny\t"), Some(SyntaxErrorKind::EmbeddedWhitespace));
        assert_eq!(kind_of("\nshiny"), Some(SyntaxErrorKind::EmbeddedWhitespace));
        assert_eq!(
            kind_of("shiny\u{3000}lucky"),
            Some(SyntaxErrorKind::EmbeddedWhitespace)
        );
    }

    #[test]
    fn rejects_number_group_running_into_a_letter() {
        let error = validate_syntax("25shiny").unwrap_err();
        assert_eq!(error.kind, SyntaxErrorKind::MissingOperator);
        assert_eq!(error.position, 2);
        assert!(error.message.contains("`25`"));

        assert_eq!(kind_of("1,2shiny"), Some(SyntaxErrorKind::MissingOperator));
        assert_eq!(kind_of("lucky&!1-151shiny"), Some(SyntaxErrorKind::MissingOperator));
        assert_eq!(kind_of("1-shiny"), Some(SyntaxErrorKind::MissingOperator));
        assert_eq!(kind_of("3色違い"), Some(SyntaxErrorKind::MissingOperator));
    }

    #[test]
    fn move_slots_and_inner_digits_are_not_number_groups() {
        assert_eq!(kind_of("@1fire"), None);
        assert_eq!(kind_of("@3water"), None);
        assert_eq!(kind_of("mr2mime"), None);
        assert_eq!(kind_of("4*shiny"), None);
    }

    #[test]
    fn rejects_and_between_number_groups() {
        let error = validate_syntax("12&3").unwrap_err();
        assert_eq!(error.kind, SyntaxErrorKind::AndBetweenNumbers);
        assert_eq!(error.position, 2);
        assert!(error.message.contains("`,`"));

        assert_eq!(kind_of("1,2&3"), Some(SyntaxErrorKind::AndBetweenNumbers));
        assert_eq!(kind_of("1-10|20"), Some(SyntaxErrorKind::AndBetweenNumbers));
        assert_eq!(kind_of("shiny,1&3"), Some(SyntaxErrorKind::AndBetweenNumbers));
    }

    #[test]
    fn and_is_fine_when_one_side_is_a_term() {
        assert_eq!(kind_of("12&shiny"), None);
        assert_eq!(kind_of("shiny&12"), None);
        assert_eq!(kind_of("12,3"), None);
        assert_eq!(kind_of("12&!3"), None);
    }

    #[test]
    fn only_ascii_digits_form_number_groups() {
        assert_eq!(kind_of("１２&3"), None);
        assert_eq!(kind_of("१२&३"), None);
        assert_eq!(kind_of("๑๒shiny"), None);
        assert_eq!(kind_of("12&3"), Some(SyntaxErrorKind::AndBetweenNumbers));
    }

    #[test]
    fn display_includes_position() {
        let error = validate_syntax("a b").unwrap_err();
        assert_eq!(error.to_string(), "search strings cannot contain whitespace (at byte 1)");
    }
}
