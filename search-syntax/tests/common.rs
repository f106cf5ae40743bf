#![allow(dead_code)]
//! Shared helpers for `search-syntax` integration tests.

use search_syntax::*;
use std::collections::BTreeSet;

pub fn parse_ok(input: &str) -> Ast {
    parse_query(input)
        .unwrap()
        .unwrap_or_else(|| panic!("expected a non-empty query: {input:?}"))
}

pub fn parse_err(input: &str) -> ParseError {
    parse_query(input).unwrap_err()
}

pub fn analyze_default(input: &str) -> Extraction {
    analyze(input, &ConflictRules::default())
}

pub fn f(term: &str) -> Ast {
    Ast::filter(term)
}

pub fn n(term: &str) -> Ast {
    Ast::not(term)
}

pub fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| item.to_string()).collect()
}

pub fn as_and(ast: &Ast) -> (&Ast, &Ast) {
    match ast {
        Ast::And(left, right) => (left, right),
        other => panic!("expected And, got: {other:?}"),
    }
}

pub fn as_or(ast: &Ast) -> (&Ast, &Ast) {
    match ast {
        Ast::Or(left, right) => (left, right),
        other => panic!("expected Or, got: {other:?}"),
    }
}

pub fn conflict_kinds(extraction: &Extraction) -> Vec<ConflictKind> {
    extraction
        .conflicts
        .iter()
        .map(|conflict| conflict.kind.clone())
        .collect()
}
