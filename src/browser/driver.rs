use serde::{Deserialize, Serialize};

use crate::browser::error::DriverError;
use crate::browser::playwright::SelectorHint;

/// Visibility state an element can be waited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementState {
    Visible,
    Hidden,
}

// ============================================================================
// BrowserDriver trait: the automation backend seen by pages and forms
// ============================================================================

/// Blocking view of a browser page. Every call returns only after the
/// underlying action has completed; waiting and timeouts are the
/// implementation's business.
pub trait BrowserDriver {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    fn reload(&mut self) -> Result<(), DriverError>;

    fn current_url(&mut self) -> Result<String, DriverError>;

    /// Replace the content of an input.
    fn fill(&mut self, selector: &SelectorHint, value: &str) -> Result<(), DriverError>;

    fn click(&mut self, selector: &SelectorHint) -> Result<(), DriverError>;

    /// Wait up to the driver's expect timeout for `selector` to reach
    /// `state`. `Ok(false)` means the timeout elapsed first.
    fn wait_for_state(&mut self, selector: &SelectorHint, state: ElementState) -> Result<bool, DriverError>;

    fn is_enabled(&mut self, selector: &SelectorHint) -> Result<bool, DriverError>;

    /// Current `value` of an input as displayed.
    fn input_value(&mut self, selector: &SelectorHint) -> Result<String, DriverError>;

    /// `getComputedStyle(element).getPropertyValue(property)`.
    fn computed_style(&mut self, selector: &SelectorHint, property: &str) -> Result<String, DriverError>;

    fn inner_text(&mut self, selector: &SelectorHint) -> Result<String, DriverError>;

    fn screenshot(&mut self, path: &str) -> Result<(), DriverError>;

    /// Begin a new trace chunk. Drivers that do not record traces ignore it.
    fn start_trace_chunk(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    /// Close the current trace chunk, saving it to `path` or discarding it
    /// when `path` is `None`.
    fn stop_trace_chunk(&mut self, _path: Option<&str>) -> Result<(), DriverError> {
        Ok(())
    }
}
