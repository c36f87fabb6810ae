use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of form input governing which validation cases apply.
///
/// Kinds form a parent chain: every kind's catalog is its parent's catalog
/// followed by its own cases.
///
/// ```text
/// Generic ─┬─ Text ─┬─ PersonName
///          │        └─ Department
///          ├─ Numeric ─┬─ Salary
///          │           └─ Age
///          └─ Email
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Generic,
    Text,
    PersonName,
    Department,
    Numeric,
    Salary,
    Age,
    Email,
}

impl FieldKind {
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Generic,
        FieldKind::Text,
        FieldKind::PersonName,
        FieldKind::Department,
        FieldKind::Numeric,
        FieldKind::Salary,
        FieldKind::Age,
        FieldKind::Email,
    ];

    /// The kind whose cases this kind inherits. `None` only for `Generic`.
    pub fn parent(self) -> Option<FieldKind> {
        match self {
            FieldKind::Generic => None,
            FieldKind::Text | FieldKind::Numeric | FieldKind::Email => Some(FieldKind::Generic),
            FieldKind::PersonName | FieldKind::Department => Some(FieldKind::Text),
            FieldKind::Salary | FieldKind::Age => Some(FieldKind::Numeric),
        }
    }

    /// Chain from `Generic` down to `self`, inclusive.
    pub fn lineage(self) -> Vec<FieldKind> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent() {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Generic => "generic",
            FieldKind::Text => "text",
            FieldKind::PersonName => "person_name",
            FieldKind::Department => "department",
            FieldKind::Numeric => "numeric",
            FieldKind::Salary => "salary",
            FieldKind::Age => "age",
            FieldKind::Email => "email",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        FieldKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = FieldKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown field kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}
