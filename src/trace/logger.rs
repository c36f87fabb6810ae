use std::{fs::OpenOptions, io::Write, sync::Mutex};

use tracing::warn;

use crate::trace::trace::TraceEvent;

/// Appends one JSON line per `TraceEvent` to a file. A logger that could
/// not open its file, or was built with `disabled()`, drops every event.
pub struct TraceLogger {
    file: Option<Mutex<std::fs::File>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                warn!(path, "trace file unavailable, trace disabled: {}", e);
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Append `event` as one JSON line. Failures are logged and swallowed so
    /// a broken trace file never fails a validation run.
    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.file else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!(stage = ?event.stage, "trace event not serializable: {}", e);
                return;
            }
        };

        let Ok(mut file) = sink.lock() else {
            warn!("trace file mutex poisoned, dropping {:?} event", event.stage);
            return;
        };

        if let Err(e) = writeln!(file, "{}", line).and_then(|_| file.flush()) {
            warn!("could not append trace event: {}", e);
        }
    }
}
