//! # Search String Syntax
//!
//! `search-syntax` validates, tokenizes and parses compact search strings such
//! as `shiny&!shadow,4*` into a small AST, then walks that AST to find which
//! terms are asked for, which are excluded, and which combinations can never
//! match anything.
//!
//! The language has three operators and no grouping:
//! - `!` negates the single term right after it and binds tightest,
//! - `&` and `|` are both AND,
//! - `,`, `;` and `:` are all OR and bind loosest.
//!
//! ## Example
//! ```
//! use search_syntax::{analyze, parse_query, Ast, ConflictRules};
//!
//! let ast = parse_query("shiny&lucky,!shadow").unwrap().unwrap();
//! assert_eq!(
//!     ast,
//!     Ast::or(Ast::and(Ast::filter("shiny"), Ast::filter("lucky")), Ast::not("shadow"))
//! );
//!
//! let extraction = analyze("3*&4*", &ConflictRules::default());
//! assert_eq!(extraction.included.len(), 2);
//! assert_eq!(extraction.conflicts.len(), 1);
//! ```

mod extract;
mod parser;
mod rules;
mod token;
mod validate;

pub use extract::*;
pub use parser::*;
pub use rules::*;
pub use token::*;
pub use validate::*;

/// Runs the whole query pipeline: validation, tokenizing, parsing and
/// extraction. Syntax and parse failures come back as conflict entries rather
/// than as a separate error.
pub fn analyze(text: &str, rules: &ConflictRules) -> Extraction {
    analyze_with_tree(text, rules).1
}

/// [`analyze`], also handing back the parsed tree. The tree is `None` for an
/// empty query and for one that failed validation or parsing.
pub fn analyze_with_tree(text: &str, rules: &ConflictRules) -> (Option<Ast>, Extraction) {
    if let Err(error) = validate_syntax(text) {
        tracing::debug!(%error, "query rejected before parsing");
        return (None, Extraction::failed(ConflictKind::Syntax, error.to_string()));
    }
    match parse_query(text) {
        Ok(Some(ast)) => {
            let extraction = extract(&ast, rules);
            (Some(ast), extraction)
        }
        Ok(None) => (None, Extraction::default()),
        Err(error) => {
            tracing::debug!(%error, "query failed to parse");
            (None, Extraction::failed(ConflictKind::ParseError, error.to_string()))
        }
    }
}
