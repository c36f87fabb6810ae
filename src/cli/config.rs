use std::fmt;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::browser::session::LaunchOptions;
use crate::catalog::field_kind::FieldKind;
use crate::form::field::FormField;

pub const DEFAULT_CONFIG_FILE: &str = "form-check.yaml";
pub const VALID_BROWSERS: [&str; 4] = ["chromium", "firefox", "webkit", "remote_browser"];

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-check",
    version,
    about = "Field validation test data and form checks for the registration form"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-check.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Browser: chromium, firefox, webkit or remote_browser
    #[arg(long, global = true)]
    pub browser: Option<String>,

    /// Base URL of the application under test
    #[arg(long, global = true)]
    pub app_url: Option<String>,

    /// Show the browser window
    #[arg(long, global = true)]
    pub headed: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the test-case catalog of a field kind
    Cases {
        /// Field kind, e.g. text, person_name, age, email
        #[arg(long)]
        field: FieldKind,

        /// Seed for reproducible values
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: yaml or json
        #[arg(long, default_value = "yaml")]
        format: String,
    },

    /// Print generated baseline persons as JSON
    Person {
        /// Seed of the first person; person i uses seed + i
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 1)]
        count: usize,
    },

    /// Validate one registration form field in a live browser
    Validate {
        /// Form field: first_name, last_name, email, age, salary, department
        #[arg(long)]
        field: FormField,

        /// Run only this case (default: the whole catalog)
        #[arg(long)]
        case: Option<String>,

        /// Seed for the case catalog
        #[arg(long)]
        seed: Option<u64>,

        /// Seed for the baseline person
        #[arg(long)]
        person_seed: Option<u64>,
    },
}

// ============================================================================
// Settings (optional YAML file)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Optional YAML config file: `form-check.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub browser_name: String,
    pub app_url: String,
    pub headless: bool,
    pub window_size: WindowSize,
    pub slow_mo_ms: u64,
    pub locale: String,
    pub videos_dir: String,
    pub tracing_dir: String,
    pub screenshots_dir: String,
    pub expect_timeout_ms: u64,
    pub remote_browser: Option<String>,
    pub driver_script: String,
    pub trace_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            browser_name: "chromium".to_string(),
            app_url: "https://demoqa.com".to_string(),
            headless: true,
            window_size: WindowSize::default(),
            slow_mo_ms: 0,
            locale: "ru-RU".to_string(),
            videos_dir: "videos".to_string(),
            tracing_dir: "tracing".to_string(),
            screenshots_dir: "screenshots".to_string(),
            expect_timeout_ms: 5000,
            remote_browser: None,
            driver_script: "node/browser_server.js".to_string(),
            trace_file: Some("validation_trace.jsonl".to_string()),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_BROWSERS.contains(&self.browser_name.as_str()) {
            return Err(ConfigError::InvalidBrowser(self.browser_name.clone()));
        }
        if self.browser_name == "remote_browser" && self.remote_browser.is_none() {
            return Err(ConfigError::MissingRemoteEndpoint);
        }
        Ok(())
    }

    /// Apply global CLI flags on top of file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(browser) = &cli.browser {
            self.browser_name = browser.clone();
        }
        if let Some(url) = &cli.app_url {
            self.app_url = url.clone();
        }
        if cli.headed {
            self.headless = false;
        }
        self
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            browser: self.browser_name.clone(),
            headless: self.headless,
            width: self.window_size.width,
            height: self.window_size.height,
            slow_mo_ms: self.slow_mo_ms,
            locale: self.locale.clone(),
            expect_timeout_ms: self.expect_timeout_ms,
            remote_endpoint: self.remote_browser.clone(),
            videos_dir: Some(self.videos_dir.clone()),
            tracing_dir: Some(self.tracing_dir.clone()),
        }
    }
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load settings. A missing default file yields defaults; an explicitly
/// requested file must exist. Malformed YAML is an error. Values are not
/// validated here: CLI overrides come first, then `Settings::validate`.
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    let settings = match std::fs::read_to_string(config_path) {
        Ok(content) => {
            info!("Loading settings from: {}", config_path);
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: config_path.to_string(),
                source: e,
            })?
        }
        Err(e) if path.is_some() => {
            return Err(ConfigError::Read {
                path: config_path.to_string(),
                source: e,
            });
        }
        Err(_) => Settings::default(),
    };
    debug!(?settings, "settings loaded");
    Ok(settings)
}

/// File values, then CLI overrides, then one validation pass over the result.
pub fn resolve_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let settings = load_settings(cli.config.as_deref())?.with_overrides(cli);
    settings.validate()?;
    Ok(settings)
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: String, source: std::io::Error },
    Parse { path: String, source: serde_yaml::Error },
    InvalidBrowser(String),
    MissingRemoteEndpoint,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => write!(f, "Failed to read config '{}': {}", path, source),
            ConfigError::Parse { path, source } => write!(f, "Invalid config '{}': {}", path, source),
            ConfigError::InvalidBrowser(name) => write!(
                f,
                "browser_name must be one of {}, got '{}'",
                VALID_BROWSERS.join(", "),
                name
            ),
            ConfigError::MissingRemoteEndpoint => {
                f.write_str("browser_name is remote_browser but remote_browser endpoint is not set")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
