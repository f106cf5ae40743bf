use crate::{Spanned, Token, tokenize};
use std::{fmt, iter::Peekable};

/// Tokenizes and parses a search string. `Ok(None)` means the query is empty
/// and matches everything.
pub fn parse_query(input: &str) -> Result<Option<Ast>, ParseError> {
    parse(tokenize(input).spanned())
}

/// Parses an already tokenized query. A stream that stops without
/// [`Token::EndOfInput`] is treated as if it had one.
pub fn parse<I>(tokens: I) -> Result<Option<Ast>, ParseError>
where
    I: IntoIterator<Item = Spanned>,
{
    Parser::new(tokens.into_iter()).parse()
}

/// Binary tree over filter terms. `Not` only ever wraps a single term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ast {
    Filter(String),
    Not(String),
    And(Box<Ast>, Box<Ast>),
    Or(Box<Ast>, Box<Ast>),
}

impl Ast {
    pub fn filter(term: impl Into<String>) -> Self {
        Ast::Filter(term.into())
    }

    pub fn not(term: impl Into<String>) -> Self {
        Ast::Not(term.into())
    }

    pub fn and(left: Ast, right: Ast) -> Self {
        Ast::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Ast, right: Ast) -> Self {
        Ast::Or(Box::new(left), Box::new(right))
    }
}

/// Renders the tree back into a compact query. Trees produced by the parser
/// come back out as an equivalent query; a hand-built `And` holding an `Or`
/// has no parenthesis-free spelling and will not.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Filter(term) => f.write_str(term),
            Ast::Not(term) => write!(f, "!{term}"),
            Ast::And(left, right) => write!(f, "{left}&{right}"),
            Ast::Or(left, right) => write!(f, "{left},{right}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub unexpected: Token,
    /// Byte offset into the query as the caller passed it.
    pub position: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unexpected {} (at byte {})", self.unexpected, self.position)
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent over the token stream:
///
/// ```text
/// or_expr  := and_expr ( OR  and_expr )*
/// and_expr := not_expr ( AND not_expr )*
/// not_expr := NOT filter | filter
/// ```
///
/// Both binary levels fold to the left, so `a&b,c` is `(a&b),c` and comma
/// never reaches back into the AND group before it.
struct Parser<I: Iterator<Item = Spanned>> {
    tokens: Peekable<I>,
    last_position: usize,
}

impl<I: Iterator<Item = Spanned>> Parser<I> {
    fn new(tokens: I) -> Self {
        Self {
            tokens: tokens.peekable(),
            last_position: 0,
        }
    }

    fn parse(mut self) -> Result<Option<Ast>, ParseError> {
        if self.at_end() {
            return Ok(None);
        }
        let ast = self.parse_or()?;
        let next = self.advance();
        if next.token != Token::EndOfInput {
            return Err(ParseError {
                unexpected: next.token,
                position: next.position,
            });
        }
        Ok(Some(ast))
    }

    fn parse_or(&mut self) -> Result<Ast, ParseError> {
        let mut left = self.parse_and()?;
        while self.eat(&Token::Or) {
            let right = self.parse_and()?;
            left = Ast::or(left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Ast, ParseError> {
        let mut left = self.parse_not()?;
        while self.eat(&Token::And) {
            let right = self.parse_not()?;
            left = Ast::and(left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Ast, ParseError> {
        if self.eat(&Token::Not) {
            return self.expect_filter().map(Ast::Not);
        }
        self.expect_filter().map(Ast::Filter)
    }

    fn expect_filter(&mut self) -> Result<String, ParseError> {
        let next = self.advance();
        match next.token {
            Token::Filter(term) => Ok(term),
            unexpected => Err(ParseError {
                unexpected,
                position: next.position,
            }),
        }
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.tokens.peek().is_some_and(|next| &next.token == expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn at_end(&mut self) -> bool {
        match self.tokens.peek() {
            None => true,
            Some(next) => next.token == Token::EndOfInput,
        }
    }

    fn advance(&mut self) -> Spanned {
        match self.tokens.next() {
            Some(next) => {
                self.last_position = next.position;
                next
            }
            None => Spanned {
                token: Token::EndOfInput,
                position: self.last_position,
            },
        }
    }
}
