// `pikachu`     => prefix "",   core "pikachu", postfix ""
// `!@fire`      => prefix "!@", core "fire",    postfix ""
// `cp1500-2500` => prefix "",   core "cp",      postfix "1500-2500"
// `+eevee`      => prefix "+",  core "eevee",   postfix ""
// `4*`          => prefix "4",  core "",        postfix "*"
// `#favorite`   => prefix "#",  core "favorite", postfix ""
// `25`          => prefix "25", core "",        postfix ""
//
// Separators (`&`, `|`, `,`, `;`, `:`) never belong to a segment, see
// [`split_pieces`].

/// Operator classes shared by the query tokenizer and the translator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Not,
    And,
    Or,
}

impl Operator {
    pub fn classify(ch: char) -> Option<Self> {
        match ch {
            '!' => Some(Self::Not),
            '&' | '|' => Some(Self::And),
            ',' | ';' | ':' => Some(Self::Or),
            _ => None,
        }
    }

    /// AND and OR split a query into segments. NOT is a prefix character and
    /// stays attached to its term.
    pub fn is_separator(self) -> bool {
        !matches!(self, Self::Not)
    }
}

pub fn is_separator_char(ch: char) -> bool {
    Operator::classify(ch).is_some_and(Operator::is_separator)
}

pub const MOVE_MARKER: char = '@';
pub const TAG_MARKER: char = '#';

fn is_prefix_char(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '!' | '+' | '@' | '#' | '-') || ch.is_ascii_digit()
}

fn is_postfix_char(ch: char) -> bool {
    matches!(ch, ' ' | '\n' | '-' | '*') || ch.is_ascii_digit()
}

/// How a segment's surrounding punctuation wants its term to be read.
///
/// The same surface text can name two different things (a Pokémon type and a
/// move, for instance), so lookups use this to pick between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchType {
    /// `@` in the prefix.
    Move,
    /// Digits, a range dash or a star rating in the postfix.
    Search,
    Name,
}

/// One operator-free piece of a query broken into its three parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuerySegment<'s> {
    pub prefix: &'s str,
    pub core: &'s str,
    pub postfix: &'s str,
}

impl<'s> QuerySegment<'s> {
    pub fn search_type(&self) -> SearchType {
        if self.prefix.contains(MOVE_MARKER) {
            SearchType::Move
        } else if self
            .postfix
            .chars()
            .any(|ch| ch.is_ascii_digit() || ch == '-' || ch == '*')
        {
            SearchType::Search
        } else {
            SearchType::Name
        }
    }

    pub fn is_tag(&self) -> bool {
        self.prefix.contains(TAG_MARKER)
    }

    /// Tags and bare markers (entity numbers, star ratings) carry nothing to
    /// look up.
    pub fn has_term(&self) -> bool {
        !self.core.is_empty() && !self.is_tag()
    }

    /// Reassembles the segment around a replacement core.
    pub fn with_core(&self, core: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + core.len() + self.postfix.len());
        out.push_str(self.prefix);
        out.push_str(core);
        out.push_str(self.postfix);
        out
    }
}

/// Splits one segment into `(prefix, core, postfix)`. Total over all inputs.
pub fn split_segment(text: &str) -> QuerySegment<'_> {
    let rest = text.trim_start_matches(is_prefix_char);
    let prefix = &text[..text.len() - rest.len()];
    let core = rest.trim_end_matches(is_postfix_char);
    let postfix = &rest[core.len()..];
    QuerySegment {
        prefix,
        core,
        postfix,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Piece<'s> {
    Segment(&'s str),
    Separator(char),
}

/// Walks a whole query, yielding segments and the separators between them.
///
/// Concatenating every piece gives back the input byte for byte, empty
/// segments included (`a,,b` yields an empty segment between the commas).
pub fn split_pieces(query: &str) -> Pieces<'_> {
    Pieces {
        rest: query,
        pending: None,
        done: false,
    }
}

#[derive(Clone, Debug)]
pub struct Pieces<'s> {
    rest: &'s str,
    pending: Option<char>,
    done: bool,
}

impl<'s> Iterator for Pieces<'s> {
    type Item = Piece<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(separator) = self.pending.take() {
            return Some(Piece::Separator(separator));
        }
        if self.done {
            return None;
        }
        match self
            .rest
            .char_indices()
            .find(|&(_, ch)| is_separator_char(ch))
        {
            Some((idx, ch)) => {
                let segment = &self.rest[..idx];
                self.rest = &self.rest[idx + ch.len_utf8()..];
                self.pending = Some(ch);
                Some(Piece::Segment(segment))
            }
            None => {
                self.done = true;
                Some(Piece::Segment(self.rest))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(text: &str) -> (&str, &str, &str) {
        let segment = split_segment(text);
        (segment.prefix, segment.core, segment.postfix)
    }

    #[test]
    fn test_split_segment() {
        assert_eq!(parts("pikachu"), ("", "pikachu", ""));
        assert_eq!(parts("!@fire"), ("!@", "fire", ""));
        assert_eq!(parts("cp1500-2500"), ("", "cp", "1500-2500"));
        assert_eq!(parts("+eevee"), ("+", "eevee", ""));
        assert_eq!(parts("4*"), ("4", "", "*"));
        assert_eq!(parts("#favorite"), ("#", "favorite", ""));
        assert_eq!(parts("25"), ("25", "", ""));
        assert_eq!(parts("@1psychic"), ("@1", "psychic", ""));
        assert_eq!(parts("hp-100"), ("", "hp", "-100"));
        assert_eq!(parts("age0-1"), ("", "age", "0-1"));
        assert_eq!(parts(" shiny \n"), (" ", "shiny", " \n"));
    }

    #[test]
    fn test_split_segment_edge_cases() {
        // Empty string
        assert_eq!(parts(""), ("", "", ""));

        // Only markers
        assert_eq!(parts("!"), ("!", "", ""));
        assert_eq!(parts("@"), ("@", "", ""));
        assert_eq!(parts("*"), ("", "", "*"));
        assert_eq!(parts("-"), ("-", "", ""));

        // Digits inside the core stay in the core
        assert_eq!(parts("mr2mime"), ("", "mr2mime", ""));

        // Non-ASCII digits are term content
        assert_eq!(parts("２５"), ("", "２５", ""));

        // Unicode terms
        assert_eq!(parts("!色違い"), ("!", "色違い", ""));
        assert_eq!(parts("@サイコキネシス"), ("@", "サイコキネシス", ""));
        assert_eq!(parts("distância10-"), ("", "distância", "10-"));
    }

    #[test]
    fn test_search_type() {
        assert_eq!(split_segment("@fire").search_type(), SearchType::Move);
        assert_eq!(split_segment("!@2water").search_type(), SearchType::Move);
        assert_eq!(split_segment("cp100").search_type(), SearchType::Search);
        assert_eq!(split_segment("distance-").search_type(), SearchType::Search);
        assert_eq!(split_segment("3*").search_type(), SearchType::Search);
        assert_eq!(split_segment("fire").search_type(), SearchType::Name);
        assert_eq!(split_segment("+eevee").search_type(), SearchType::Name);
        // Move marker wins over a numeric postfix.
        assert_eq!(split_segment("@fire1").search_type(), SearchType::Move);
    }

    #[test]
    fn test_tags_and_terms() {
        assert!(split_segment("#trade").is_tag());
        assert!(!split_segment("#trade").has_term());
        assert!(!split_segment("4*").has_term());
        assert!(!split_segment("150").has_term());
        assert!(split_segment("!shiny").has_term());
    }

    #[test]
    fn test_with_core() {
        let segment = split_segment("!@fire");
        assert_eq!(segment.with_core("feuer"), "!@feuer");
        let segment = split_segment("cp10-20");
        assert_eq!(segment.with_core("wp"), "wp10-20");
    }

    #[test]
    fn test_operator_classes() {
        assert_eq!(Operator::classify('!'), Some(Operator::Not));
        assert_eq!(Operator::classify('&'), Some(Operator::And));
        assert_eq!(Operator::classify('|'), Some(Operator::And));
        assert_eq!(Operator::classify(','), Some(Operator::Or));
        assert_eq!(Operator::classify(';'), Some(Operator::Or));
        assert_eq!(Operator::classify(':'), Some(Operator::Or));
        assert_eq!(Operator::classify('a'), None);
        assert!(!is_separator_char('!'));
        assert!(is_separator_char(':'));
    }

    #[test]
    fn test_split_pieces() {
        assert_eq!(
            split_pieces("shiny&!4*,@fire").collect::<Vec<_>>(),
            vec![
                Piece::Segment("shiny"),
                Piece::Separator('&'),
                Piece::Segment("!4*"),
                Piece::Separator(','),
                Piece::Segment("@fire"),
            ]
        );
        assert_eq!(split_pieces("").collect::<Vec<_>>(), vec![Piece::Segment("")]);
        assert_eq!(
            split_pieces("a,,b").collect::<Vec<_>>(),
            vec![
                Piece::Segment("a"),
                Piece::Separator(','),
                Piece::Segment(""),
                Piece::Separator(','),
                Piece::Segment("b"),
            ]
        );
        assert_eq!(
            split_pieces("a&").collect::<Vec<_>>(),
            vec![Piece::Segment("a"), Piece::Separator('&'), Piece::Segment("")]
        );
    }

    #[test]
    fn test_split_pieces_reassembles_input() {
        for query in [
            "shiny&lucky",
            "1,2,3;4:5|6",
            "!shadow&@1psychic&cp10-",
            "色違い&!キラ",
            ",,&&",
        ] {
            let rebuilt: String = split_pieces(query)
                .map(|piece| match piece {
                    Piece::Segment(text) => text.to_string(),
                    Piece::Separator(ch) => ch.to_string(),
                })
                .collect();
            assert_eq!(rebuilt, query);
        }
    }
}
