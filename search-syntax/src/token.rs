use std::fmt;
use term_segmentation::Operator;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Any run of non-operator characters, e.g. `shiny`, `cp10-`, `@fire`.
    Filter(String),
    Not,
    And,
    Or,
    EndOfInput,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Filter(text) => write!(f, "term `{text}`"),
            Token::Not => f.write_str("`!`"),
            Token::And => f.write_str("`&`"),
            Token::Or => f.write_str("`,`"),
            Token::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// A token plus the byte offset it starts at in the query as given, before
/// any case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Returns a lazy tokenizer over `input`. Filter text comes out lower-cased.
///
/// ```
/// use search_syntax::{tokenize, Token};
///
/// let tokens: Vec<Token> = tokenize("Shiny&!4*").collect();
/// assert_eq!(
///     tokens,
///     [
///         Token::Filter("shiny".into()),
///         Token::And,
///         Token::Not,
///         Token::Filter("4*".into()),
///         Token::EndOfInput,
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Tokenizer {
    Tokenizer {
        input: input.to_string(),
        pos: 0,
        finished: false,
    }
}

/// Yields tokens one at a time and ends with exactly one
/// [`Token::EndOfInput`]. Cloning or calling [`Tokenizer::restart`] replays
/// the sequence from the start.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    input: String,
    pos: usize,
    finished: bool,
}

impl Tokenizer {
    pub fn restart(&mut self) {
        self.pos = 0;
        self.finished = false;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Adapts the tokenizer to yield tokens with their offsets.
    pub fn spanned(self) -> SpannedTokens {
        SpannedTokens(self)
    }

    pub fn next_spanned(&mut self) -> Option<Spanned> {
        if self.finished {
            return None;
        }
        self.skip_ws();

        let position = self.pos;
        let Some(ch) = self.peek_char() else {
            self.finished = true;
            return Some(Spanned {
                token: Token::EndOfInput,
                position,
            });
        };

        let token = match Operator::classify(ch) {
            Some(op) => {
                self.pos += ch.len_utf8();
                match op {
                    Operator::Not => Token::Not,
                    Operator::And => Token::And,
                    Operator::Or => Token::Or,
                }
            }
            None => self.read_filter(),
        };
        Some(Spanned { token, position })
    }

    fn read_filter(&mut self) -> Token {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if Operator::classify(ch).is_some() {
                break;
            }
            self.pos += ch.len_utf8();
        }
        // Lower-casing can change byte lengths (`İ` becomes three bytes), so
        // it is applied per filter and offsets stay on the original text.
        Token::Filter(self.input[start..self.pos].trim_end().to_lowercase())
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_spanned().map(|spanned| spanned.token)
    }
}

#[derive(Debug, Clone)]
pub struct SpannedTokens(Tokenizer);

impl Iterator for SpannedTokens {
    type Item = Spanned;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next_spanned()
    }
}
