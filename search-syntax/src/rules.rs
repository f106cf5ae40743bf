use serde::{Deserialize, Serialize};

/// Which term combinations the conflict detector reports.
///
/// Deserializes from JSON; any missing field falls back to the defaults.
///
/// ```
/// use search_syntax::ConflictRules;
///
/// let rules: ConflictRules = serde_json::from_str(r#"{ "exclusive": [["shadow", "purified"]] }"#).unwrap();
/// assert_eq!(rules.exclusive.len(), 1);
/// assert_eq!(rules.categories, ConflictRules::default().categories);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictRules {
    /// Pairs of states no entity can be in at the same time. Flagged wherever
    /// both terms appear in a query, AND or OR alike.
    pub exclusive: Vec<ExclusivePair>,
    /// Groups whose members exclude each other only when combined with AND.
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusivePair(pub String, pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub members: Vec<String>,
}

impl Category {
    pub fn new<S: Into<String>>(name: impl Into<String>, members: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.members
            .iter()
            .any(|member| member.to_lowercase() == term)
    }
}

impl ExclusivePair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self(left.into(), right.into())
    }
}

impl Default for ConflictRules {
    fn default() -> Self {
        Self {
            exclusive: vec![
                ExclusivePair::new("shadow", "purified"),
                ExclusivePair::new("shadow", "lucky"),
            ],
            categories: vec![
                Category::new("stars", ["0*", "1*", "2*", "3*", "4*"]),
                Category::new("gender", ["male", "female", "genderunknown"]),
            ],
        }
    }
}

impl ConflictRules {
    /// Rules that never report anything.
    pub fn none() -> Self {
        Self {
            exclusive: Vec::new(),
            categories: Vec::new(),
        }
    }
}
