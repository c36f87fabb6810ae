use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::field_kind::FieldKind;
use crate::catalog::test_case::Outcome;
use crate::form::field::FormField;

/// What was actually typed into each input, keyed by field.
pub type FilledValues = BTreeMap<FormField, String>;

/// A displayed value that did not match the (truncated) written value.
/// Diagnostic only: it never fails a run on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadbackMismatch {
    pub field: FormField,
    /// Written value after the field's display limit was applied.
    pub expected: String,
    /// Displayed value, `None` when it could not be read at all.
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl fmt::Display for ReadbackMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.actual, &self.detail) {
            (Some(actual), _) => write!(
                f,
                "{} displays '{}', expected '{}'",
                self.field, actual, self.expected
            ),
            (None, Some(detail)) => write!(
                f,
                "{} could not be read back (expected '{}'): {}",
                self.field, self.expected, detail
            ),
            (None, None) => write!(f, "{} could not be read back", self.field),
        }
    }
}

/// Which post-submit signal contradicted the expected outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutcomeMismatch {
    /// Expected acceptance, but the form is still on screen.
    FormStillVisible,
    /// Expected rejection, but the form went away.
    FormDisappeared,
    /// Form stayed (rejected) but the field is not flagged with the error color.
    BorderColor { expected: String, actual: String },
}

impl fmt::Display for OutcomeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeMismatch::FormStillVisible => {
                f.write_str("visibility mismatch: form is still visible after submit, expected it to close")
            }
            OutcomeMismatch::FormDisappeared => {
                f.write_str("visibility mismatch: form closed after submit, expected it to stay open")
            }
            OutcomeMismatch::BorderColor { expected, actual } => write!(
                f,
                "border-color mismatch: border is {}, expected {}",
                actual, expected
            ),
        }
    }
}

/// Result of one (field, case) validation run that matched its expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub field: FormField,
    pub kind: FieldKind,
    pub case_name: String,
    pub case_id: String,
    pub input: String,
    pub expected: Outcome,
    pub observed: Outcome,
    pub filled: FilledValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readback: Option<ReadbackMismatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

impl ValidationReport {
    /// Whether a readback diagnostic was recorded.
    pub fn has_diagnostics(&self) -> bool {
        self.readback.is_some()
    }
}
