use std::fmt;

#[derive(Debug)]
pub enum DriverError {
    /// Node.js driver process failed to spawn
    SubprocessSpawn { script: String, source: std::io::Error },

    /// JSON parsing failed (driver response)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (request to the driver)
    JsonSerialize { context: String, source: serde_json::Error },

    /// Reading from or writing to the driver process failed
    SessionIO(String),

    /// Driver answered a command with ok=false or a malformed payload
    SessionProtocol { command: String, error: String },

    /// No element matched the selector
    ElementNotFound { element: String, context: String },

    /// Element exists but cannot be interacted with (disabled, detached)
    NotInteractable { element: String, reason: String },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::SubprocessSpawn { script, source } => {
                write!(f, "Failed to spawn {} (is Node.js installed?): {}", script, source)
            }
            DriverError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            DriverError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            DriverError::SessionIO(msg) => write!(f, "Browser session I/O: {}", msg),
            DriverError::SessionProtocol { command, error } => {
                write!(f, "Browser command '{}' failed: {}", command, error)
            }
            DriverError::ElementNotFound { element, context } => {
                write!(f, "Element '{}' not found: {}", element, context)
            }
            DriverError::NotInteractable { element, reason } => {
                write!(f, "Element '{}' is not interactable: {}", element, reason)
            }
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::SubprocessSpawn { source, .. } => Some(source),
            DriverError::JsonParse { source, .. } => Some(source),
            DriverError::JsonSerialize { source, .. } => Some(source),
            _ => None,
        }
    }
}
