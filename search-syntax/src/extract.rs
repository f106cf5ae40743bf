use crate::{Ast, ConflictRules};
use std::collections::BTreeSet;
use std::fmt;

/// What a parsed query asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub included: BTreeSet<String>,
    pub excluded: BTreeSet<String>,
    pub conflicts: Vec<Conflict>,
}

impl Extraction {
    pub(crate) fn failed(kind: ConflictKind, detail: String) -> Self {
        Self {
            conflicts: vec![Conflict {
                kind,
                terms: Vec::new(),
                detail,
            }],
            ..Self::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// Two states that can never hold together, anywhere in the query.
    GloballyExclusive,
    /// Two members of one category joined by AND.
    SameCategory { category: String },
    /// The validator rejected the raw text.
    Syntax,
    ParseError,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Conflict {
    pub kind: ConflictKind,
    /// The clashing terms in sorted order. Empty for syntax and parse errors.
    pub terms: Vec<String>,
    pub detail: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Collects included and excluded terms and reports conflicting
/// combinations.
pub fn extract(ast: &Ast, rules: &ConflictRules) -> Extraction {
    let mut extractor = Extractor {
        rules,
        out: Extraction::default(),
    };
    extractor.check_global(ast);
    extractor.walk(ast);
    extractor.out
}

struct Extractor<'r> {
    rules: &'r ConflictRules,
    out: Extraction,
}

impl Extractor<'_> {
    fn walk(&mut self, ast: &Ast) {
        match ast {
            Ast::Filter(term) => {
                self.out.included.insert(term.clone());
            }
            Ast::Not(term) => {
                self.out.excluded.insert(term.clone());
            }
            Ast::And(left, right) => {
                self.check_and(left, right);
                self.walk(left);
                self.walk(right);
            }
            Ast::Or(left, right) => {
                self.walk(left);
                self.walk(right);
            }
        }
    }

    // Structure-blind: the states in an exclusive pair never co-occur on one
    // entity, so even `shadow,purified` is reported.
    fn check_global(&mut self, ast: &Ast) {
        let mut present = BTreeSet::new();
        collect_positive(ast, &mut present);
        let rules = self.rules;
        for pair in &rules.exclusive {
            let (left, right) = (pair.0.to_lowercase(), pair.1.to_lowercase());
            if left != right && present.contains(&left) && present.contains(&right) {
                self.push(Conflict {
                    kind: ConflictKind::GloballyExclusive,
                    detail: format!("`{left}` and `{right}` can never both be true"),
                    terms: sorted_pair(left, right),
                });
            }
        }
    }

    // Gathers terms from both subtrees, nested OR branches included, so a
    // category member several OR levels down still counts against its AND
    // partner.
    fn check_and(&mut self, left: &Ast, right: &Ast) {
        let mut present = BTreeSet::new();
        collect_all(left, &mut present);
        collect_all(right, &mut present);

        let rules = self.rules;
        for category in &rules.categories {
            let members: Vec<&String> = present
                .iter()
                .filter(|term| category.contains(term))
                .collect();
            for (idx, first) in members.iter().enumerate() {
                for second in &members[idx + 1..] {
                    self.push(Conflict {
                        kind: ConflictKind::SameCategory {
                            category: category.name.clone(),
                        },
                        detail: format!(
                            "`{first}` and `{second}` are both {} and cannot be combined with AND",
                            category.name
                        ),
                        terms: sorted_pair(first.to_string(), second.to_string()),
                    });
                }
            }
        }
    }

    fn push(&mut self, conflict: Conflict) {
        if !self.out.conflicts.contains(&conflict) {
            tracing::trace!(terms = ?conflict.terms, "conflict found");
            self.out.conflicts.push(conflict);
        }
    }
}

fn collect_positive(ast: &Ast, out: &mut BTreeSet<String>) {
    match ast {
        Ast::Filter(term) => {
            out.insert(term.clone());
        }
        Ast::Not(_) => {}
        Ast::And(left, right) | Ast::Or(left, right) => {
            collect_positive(left, out);
            collect_positive(right, out);
        }
    }
}

// Negated terms count the same as plain ones: `3*&!4*` still pairs two
// ratings under one AND.
fn collect_all(ast: &Ast, out: &mut BTreeSet<String>) {
    match ast {
        Ast::Filter(term) | Ast::Not(term) => {
            out.insert(term.clone());
        }
        Ast::And(left, right) | Ast::Or(left, right) => {
            collect_all(left, out);
            collect_all(right, out);
        }
    }
}

fn sorted_pair(left: String, right: String) -> Vec<String> {
    if left <= right {
        vec![left, right]
    } else {
        vec![right, left]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_query;

    fn run(query: &str) -> Extraction {
        let ast = parse_query(query).unwrap().expect("non-empty query");
        extract(&ast, &ConflictRules::default())
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn precedence_example_includes_every_term() {
        let extraction = run("a&b,c");
        assert_eq!(extraction.included, set(&["a", "b", "c"]));
        assert!(extraction.excluded.is_empty());
        assert!(extraction.is_clean());
    }

    #[test]
    fn negated_terms_are_excluded() {
        let extraction = run("a&!b");
        assert_eq!(extraction.included, set(&["a"]));
        assert_eq!(extraction.excluded, set(&["b"]));
    }

    #[test]
    fn duplicates_collapse() {
        let extraction = run("a&b,a&!c,!c");
        assert_eq!(extraction.included, set(&["a", "b"]));
        assert_eq!(extraction.excluded, set(&["c"]));
    }

    #[test]
    fn global_pair_is_flagged_across_or_branches() {
        let extraction = run("shadow&4*,!shadow&purified");
        assert_eq!(extraction.conflicts.len(), 1);
        let conflict = &extraction.conflicts[0];
        assert_eq!(conflict.kind, ConflictKind::GloballyExclusive);
        assert_eq!(conflict.terms, ["purified", "shadow"]);
    }

    #[test]
    fn global_pair_ignores_negated_occurrences() {
        assert!(run("shadow&!purified").is_clean());
        assert!(run("!shadow&!lucky").is_clean());
    }

    #[test]
    fn same_category_is_flagged_only_under_and() {
        let extraction = run("3*&4*");
        assert_eq!(
            extraction.conflicts,
            [Conflict {
                kind: ConflictKind::SameCategory {
                    category: "stars".into()
                },
                terms: vec!["3*".into(), "4*".into()],
                detail: "`3*` and `4*` are both stars and cannot be combined with AND".into(),
            }]
        );
        assert!(run("3*,4*").is_clean());
    }

    #[test]
    fn negated_members_still_count_under_and() {
        let extraction = run("3*&!4*");
        assert_eq!(extraction.conflicts.len(), 1);
        assert_eq!(extraction.conflicts[0].terms, ["3*", "4*"]);
        assert_eq!(run("!male&female").conflicts.len(), 1);
        // A term and its own negation are one member, not a pair.
        assert!(run("male&!male").is_clean());
        assert!(run("3*,!4*").is_clean());
    }

    #[test]
    fn same_category_needs_a_shared_and() {
        assert!(run("4*,lucky&shiny,3*&male").is_clean());
        assert!(run("4*&shiny,3*").is_clean());
        assert_eq!(run("4*&3*,lucky&male").conflicts.len(), 1);
    }

    #[test]
    fn same_category_reaches_through_nested_or() {
        // The parser never puts an OR under an AND, but a built tree can, and
        // the AND above still sees both ratings.
        let ast = Ast::and(Ast::filter("4*"), Ast::or(Ast::filter("lucky"), Ast::filter("3*")));
        let extraction = extract(&ast, &ConflictRules::default());
        assert_eq!(extraction.conflicts.len(), 1);
        assert_eq!(extraction.conflicts[0].terms, ["3*", "4*"]);
    }

    #[test]
    fn repeated_pairs_are_reported_once() {
        let extraction = run("male&female&shiny&female");
        assert_eq!(extraction.conflicts.len(), 1);
        assert_eq!(extraction.conflicts[0].terms, ["female", "male"]);
    }

    #[test]
    fn conflicts_do_not_depend_on_operand_order() {
        assert_eq!(run("shadow&purified").conflicts, run("purified&shadow").conflicts);
        assert_eq!(run("female&male").conflicts, run("male&female").conflicts);
    }

    #[test]
    fn no_rules_means_no_conflicts() {
        let ast = parse_query("shadow&purified&3*&4*").unwrap().unwrap();
        assert!(extract(&ast, &ConflictRules::none()).is_clean());
    }
}
