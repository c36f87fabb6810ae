use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::browser::driver::{BrowserDriver, ElementState};
use crate::browser::error::DriverError;
use crate::browser::playwright::SelectorHint;

/// Browser launch parameters handed to browser_server.js as its first
/// argument (one JSON object).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchOptions {
    pub browser: String,
    pub headless: bool,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "slowMo")]
    pub slow_mo_ms: u64,
    pub locale: String,
    #[serde(rename = "expectTimeout")]
    pub expect_timeout_ms: u64,
    #[serde(rename = "wsEndpoint", skip_serializing_if = "Option::is_none")]
    pub remote_endpoint: Option<String>,
    #[serde(rename = "videosDir", skip_serializing_if = "Option::is_none")]
    pub videos_dir: Option<String>,
    /// Record a Playwright trace; chunks are saved here on failure.
    #[serde(rename = "tracingDir", skip_serializing_if = "Option::is_none")]
    pub tracing_dir: Option<String>,
}

/// Request sent to browser_server.js over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BrowserRequest {
    Navigate {
        cmd: &'static str,
        url: String,
    },
    Reload {
        cmd: &'static str,
    },
    Action {
        cmd: &'static str,
        action: String,
        selector: SelectorHint,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Screenshot {
        cmd: &'static str,
        path: String,
    },
    CurrentUrl {
        cmd: &'static str,
    },
    Query {
        cmd: &'static str,
        selector: SelectorHint,
    },
    QueryStyle {
        cmd: &'static str,
        selector: SelectorHint,
        property: String,
    },
    WaitForState {
        cmd: &'static str,
        selector: SelectorHint,
        state: ElementState,
    },
    TraceChunk {
        cmd: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
    },
    Quit {
        cmd: &'static str,
    },
}

impl BrowserRequest {
    pub fn navigate(url: &str) -> Self {
        BrowserRequest::Navigate {
            cmd: "navigate",
            url: url.to_string(),
        }
    }

    pub fn reload() -> Self {
        BrowserRequest::Reload { cmd: "reload" }
    }

    pub fn fill(selector: &SelectorHint, value: &str) -> Self {
        BrowserRequest::Action {
            cmd: "action",
            action: "fill".into(),
            selector: selector.clone(),
            value: Some(value.to_string()),
        }
    }

    pub fn click(selector: &SelectorHint) -> Self {
        BrowserRequest::Action {
            cmd: "action",
            action: "click".into(),
            selector: selector.clone(),
            value: None,
        }
    }

    pub fn screenshot(path: &str) -> Self {
        BrowserRequest::Screenshot {
            cmd: "screenshot",
            path: path.to_string(),
        }
    }

    pub fn current_url() -> Self {
        BrowserRequest::CurrentUrl { cmd: "current_url" }
    }

    pub fn query_value(selector: &SelectorHint) -> Self {
        BrowserRequest::Query {
            cmd: "query_value",
            selector: selector.clone(),
        }
    }

    pub fn wait_for_state(selector: &SelectorHint, state: ElementState) -> Self {
        BrowserRequest::WaitForState {
            cmd: "wait_for_state",
            selector: selector.clone(),
            state,
        }
    }

    pub fn start_trace_chunk() -> Self {
        BrowserRequest::TraceChunk {
            cmd: "trace_start_chunk",
            path: None,
        }
    }

    pub fn stop_trace_chunk(path: Option<&str>) -> Self {
        BrowserRequest::TraceChunk {
            cmd: "trace_stop_chunk",
            path: path.map(str::to_string),
        }
    }

    pub fn query_enabled(selector: &SelectorHint) -> Self {
        BrowserRequest::Query {
            cmd: "query_enabled",
            selector: selector.clone(),
        }
    }

    pub fn query_text(selector: &SelectorHint) -> Self {
        BrowserRequest::Query {
            cmd: "query_text",
            selector: selector.clone(),
        }
    }

    pub fn query_style(selector: &SelectorHint, property: &str) -> Self {
        BrowserRequest::QueryStyle {
            cmd: "query_style",
            selector: selector.clone(),
            property: property.to_string(),
        }
    }

    pub fn quit() -> Self {
        BrowserRequest::Quit { cmd: "quit" }
    }
}

/// Response received from browser_server.js over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub reached: Option<bool>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub found: Option<bool>,
}

/// A persistent browser session backed by browser_server.js.
///
/// Launches a long-lived Node.js process that keeps a Playwright browser
/// open. Commands are sent as NDJSON over stdin, responses read from stdout.
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    closed: bool,
}

impl BrowserSession {
    /// Launch a new browser session by spawning `script` with Node.js.
    pub fn launch(script: &str, options: &LaunchOptions) -> Result<Self, DriverError> {
        let options_json = serde_json::to_string(options).map_err(|e| DriverError::JsonSerialize {
            context: "LaunchOptions".into(),
            source: e,
        })?;

        debug!(script, options = %options_json, "launching browser driver");

        let mut child = Command::new("node")
            .arg(script)
            .arg(&options_json)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| DriverError::SubprocessSpawn {
                script: script.into(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            DriverError::SessionIO(format!("Failed to capture stdin of {}", script))
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            DriverError::SessionIO(format!("Failed to capture stdout of {}", script))
        })?;

        let mut reader = BufReader::new(stdout);

        // Wait for the ready signal
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| DriverError::SessionIO(format!("Failed to read ready signal: {}", e)))?;

        let response: BrowserResponse =
            serde_json::from_str(line.trim()).map_err(|e| DriverError::JsonParse {
                context: "browser driver ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(DriverError::SessionProtocol {
                command: "launch".into(),
                error: response
                    .error
                    .unwrap_or_else(|| "Did not receive ready signal".into()),
            });
        }

        Ok(BrowserSession {
            child,
            stdin,
            reader,
            closed: false,
        })
    }

    /// Send a request and read the response.
    fn send(&mut self, request: &BrowserRequest) -> Result<BrowserResponse, DriverError> {
        let json = serde_json::to_string(request).map_err(|e| DriverError::JsonSerialize {
            context: "BrowserRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .map_err(|e| DriverError::SessionIO(format!("Failed to write to driver stdin: {}", e)))?;

        self.stdin
            .flush()
            .map_err(|e| DriverError::SessionIO(format!("Failed to flush driver stdin: {}", e)))?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| DriverError::SessionIO(format!("Failed to read from driver stdout: {}", e)))?;

        if line.trim().is_empty() {
            return Err(DriverError::SessionIO(
                "Empty response from browser driver (process may have died)".into(),
            ));
        }

        serde_json::from_str(line.trim()).map_err(|e| DriverError::JsonParse {
            context: "browser driver response".into(),
            source: e,
        })
    }

    /// Send a request and verify it succeeded.
    fn send_ok(&mut self, request: &BrowserRequest, command_name: &str) -> Result<BrowserResponse, DriverError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(DriverError::SessionProtocol {
                command: command_name.into(),
                error: response.error.unwrap_or_else(|| "Unknown error".into()),
            });
        }
        Ok(response)
    }

    /// Like `send_ok`, but maps `found: false` to `ElementNotFound`.
    fn send_located(
        &mut self,
        request: &BrowserRequest,
        command_name: &str,
        selector: &SelectorHint,
    ) -> Result<BrowserResponse, DriverError> {
        let response = self.send_ok(request, command_name)?;
        if response.found == Some(false) {
            return Err(DriverError::ElementNotFound {
                element: selector.to_string(),
                context: command_name.into(),
            });
        }
        Ok(response)
    }

    /// Quit the browser session.
    pub fn quit(&mut self) -> Result<(), DriverError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // Best-effort: the process may already be gone
        if let Err(e) = self.send(&BrowserRequest::quit()) {
            warn!(error = %e, "browser driver did not acknowledge quit");
        }
        let _ = self.child.wait();
        Ok(())
    }
}

impl BrowserDriver for BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.send_ok(&BrowserRequest::navigate(url), "navigate")?;
        Ok(())
    }

    fn reload(&mut self) -> Result<(), DriverError> {
        self.send_ok(&BrowserRequest::reload(), "reload")?;
        Ok(())
    }

    fn current_url(&mut self) -> Result<String, DriverError> {
        let response = self.send_ok(&BrowserRequest::current_url(), "current_url")?;
        let url = response.url.ok_or_else(|| DriverError::SessionProtocol {
            command: "current_url".into(),
            error: "No URL in current_url response".into(),
        })?;
        Ok(url)
    }

    fn fill(&mut self, selector: &SelectorHint, value: &str) -> Result<(), DriverError> {
        self.send_located(&BrowserRequest::fill(selector, value), "fill", selector)?;
        Ok(())
    }

    fn click(&mut self, selector: &SelectorHint) -> Result<(), DriverError> {
        self.send_located(&BrowserRequest::click(selector), "click", selector)?;
        Ok(())
    }

    fn wait_for_state(&mut self, selector: &SelectorHint, state: ElementState) -> Result<bool, DriverError> {
        let response = self.send_ok(&BrowserRequest::wait_for_state(selector, state), "wait_for_state")?;
        response.reached.ok_or_else(|| DriverError::SessionProtocol {
            command: "wait_for_state".into(),
            error: "No 'reached' flag in wait_for_state response".into(),
        })
    }

    fn is_enabled(&mut self, selector: &SelectorHint) -> Result<bool, DriverError> {
        let response = self.send_located(&BrowserRequest::query_enabled(selector), "query_enabled", selector)?;
        Ok(response.enabled.unwrap_or(false))
    }

    fn input_value(&mut self, selector: &SelectorHint) -> Result<String, DriverError> {
        let response = self.send_located(&BrowserRequest::query_value(selector), "query_value", selector)?;
        Ok(response.value.unwrap_or_default())
    }

    fn computed_style(&mut self, selector: &SelectorHint, property: &str) -> Result<String, DriverError> {
        let response = self.send_located(
            &BrowserRequest::query_style(selector, property),
            "query_style",
            selector,
        )?;
        response.value.ok_or_else(|| DriverError::SessionProtocol {
            command: "query_style".into(),
            error: format!("No value for CSS property '{}'", property),
        })
    }

    fn inner_text(&mut self, selector: &SelectorHint) -> Result<String, DriverError> {
        let response = self.send_located(&BrowserRequest::query_text(selector), "query_text", selector)?;
        Ok(response.text.unwrap_or_default())
    }

    fn screenshot(&mut self, path: &str) -> Result<(), DriverError> {
        self.send_ok(&BrowserRequest::screenshot(path), "screenshot")?;
        Ok(())
    }

    fn start_trace_chunk(&mut self) -> Result<(), DriverError> {
        self.send_ok(&BrowserRequest::start_trace_chunk(), "trace_start_chunk")?;
        Ok(())
    }

    fn stop_trace_chunk(&mut self, path: Option<&str>) -> Result<(), DriverError> {
        self.send_ok(&BrowserRequest::stop_trace_chunk(path), "trace_stop_chunk")?;
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}
