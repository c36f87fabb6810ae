use std::fmt;

use crate::browser::error::DriverError;
use crate::catalog::generator::UnknownTestCase;
use crate::form::field::FormField;
use crate::protocol::report::{OutcomeMismatch, ReadbackMismatch};

/// An input refused the value written to it.
#[derive(Debug)]
pub struct FillFailure {
    pub input: FormField,
    pub value: String,
    pub source: DriverError,
}

impl fmt::Display for FillFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rejected value '{}': {}", self.input, self.value, self.source)
    }
}

/// Fatal outcomes of a validation run. Readback mismatches are not here:
/// they travel as diagnostics in `ValidationReport`.
///
/// Every run-stage variant names the field under test and the case, so the
/// message alone identifies the failing test.
#[derive(Debug)]
pub enum ValidationError {
    /// An input could not take its value; nothing was submitted. `input` is
    /// the refusing input, which need not be the field under test.
    Fill {
        field: FormField,
        case_name: String,
        input: FormField,
        value: String,
        source: DriverError,
    },

    /// The submit button could not be clicked.
    Submit {
        field: FormField,
        case_name: String,
        source: DriverError,
    },

    /// Post-submit state contradicted the expected outcome.
    OutcomeMismatch {
        field: FormField,
        case_name: String,
        mismatch: OutcomeMismatch,
        readback: Option<ReadbackMismatch>,
    },

    /// Post-submit state could not be observed (visibility or border color).
    Classify {
        field: FormField,
        case_name: String,
        source: DriverError,
    },

    /// Requested case name is not in the field kind's catalog.
    UnknownTestCase(UnknownTestCase),

    /// Driver failure outside a run, e.g. while opening the form.
    Driver(DriverError),
}

impl ValidationError {
    pub fn fill(field: FormField, case_name: &str, failure: FillFailure) -> Self {
        ValidationError::Fill {
            field,
            case_name: case_name.to_string(),
            input: failure.input,
            value: failure.value,
            source: failure.source,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Fill {
                field,
                case_name,
                input,
                value,
                source,
            } => write!(
                f,
                "{} [{}]: fill failed, {} rejected value '{}': {}",
                field, case_name, input, value, source
            ),
            ValidationError::Submit {
                field,
                case_name,
                source,
            } => write!(f, "{} [{}]: submit failed: {}", field, case_name, source),
            ValidationError::OutcomeMismatch {
                field,
                case_name,
                mismatch,
                readback,
            } => {
                write!(f, "{} [{}]: {}", field, case_name, mismatch)?;
                if let Some(rb) = readback {
                    write!(f, " (readback: {})", rb)?;
                }
                Ok(())
            }
            ValidationError::Classify {
                field,
                case_name,
                source,
            } => write!(
                f,
                "{} [{}]: form state after submit could not be read: {}",
                field, case_name, source
            ),
            ValidationError::UnknownTestCase(e) => write!(f, "{}", e),
            ValidationError::Driver(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationError::Fill { source, .. } => Some(source),
            ValidationError::Submit { source, .. } => Some(source),
            ValidationError::Classify { source, .. } => Some(source),
            ValidationError::UnknownTestCase(e) => Some(e),
            ValidationError::Driver(e) => Some(e),
            ValidationError::OutcomeMismatch { .. } => None,
        }
    }
}

impl From<UnknownTestCase> for ValidationError {
    fn from(e: UnknownTestCase) -> Self {
        ValidationError::UnknownTestCase(e)
    }
}

impl From<DriverError> for ValidationError {
    fn from(e: DriverError) -> Self {
        ValidationError::Driver(e)
    }
}
