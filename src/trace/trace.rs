use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::form::field::FormField;

/// Protocol stage a trace event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Fill,
    Readback,
    Submit,
    Classify,
}

#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub stage: Stage,

    pub field: FormField,
    pub case_name: String,
    pub case_id: String,

    pub passed: bool,
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(stage: Stage, field: FormField, case_name: &str, case_id: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            stage,
            field,
            case_name: case_name.to_string(),
            case_id: case_id.to_string(),
            passed: true,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn failed(mut self) -> Self {
        self.passed = false;
        self
    }
}
