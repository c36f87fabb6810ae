use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::field_kind::FieldKind;

/// Whether the form accepts or rejects a submission. Used both for the
/// expectation carried by a case and for what was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Accepted,
    Rejected,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted => f.write_str("accepted"),
            Outcome::Rejected => f.write_str("rejected"),
        }
    }
}

/// Raw input placed in a field. Numbers are kept as numbers until the
/// moment they are typed, where they are stringified via `Display`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaseValue {
    Int(i64),
    Decimal(f64),
    Text(String),
}

impl CaseValue {
    pub fn text(s: impl Into<String>) -> Self {
        CaseValue::Text(s.into())
    }
}

impl fmt::Display for CaseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseValue::Int(n) => write!(f, "{}", n),
            CaseValue::Decimal(d) => write!(f, "{}", d),
            CaseValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CaseValue {
    fn from(s: &str) -> Self {
        CaseValue::Text(s.to_string())
    }
}

impl From<String> for CaseValue {
    fn from(s: String) -> Self {
        CaseValue::Text(s)
    }
}

impl From<i64> for CaseValue {
    fn from(n: i64) -> Self {
        CaseValue::Int(n)
    }
}

impl From<f64> for CaseValue {
    fn from(d: f64) -> Self {
        CaseValue::Decimal(d)
    }
}

/// One named (input, expected outcome) pair. Names are unique within a
/// field kind's generated set only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub value: CaseValue,
    pub expected: Outcome,
}

impl TestCase {
    pub fn new(name: &str, value: impl Into<CaseValue>, expected: Outcome) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            expected,
        }
    }

    pub fn accepted(name: &str, value: impl Into<CaseValue>) -> Self {
        Self::new(name, value, Outcome::Accepted)
    }

    pub fn rejected(name: &str, value: impl Into<CaseValue>) -> Self {
        Self::new(name, value, Outcome::Rejected)
    }

    /// The string typed into the input.
    pub fn input(&self) -> String {
        self.value.to_string()
    }

    /// Short stable identifier for a case under a given kind, used to tell
    /// apart seeded variants of the same case name in traces and listings.
    pub fn fingerprint(&self, kind: FieldKind) -> String {
        use sha1::{Digest, Sha1};

        let mut hasher = Sha1::new();
        hasher.update(kind.as_str().as_bytes());
        hasher.update(b"/");
        hasher.update(self.name.as_bytes());
        hasher.update(b"/");
        hasher.update(self.input().as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..12].to_string()
    }
}
