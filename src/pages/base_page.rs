use tracing::{error, info};

use crate::browser::driver::BrowserDriver;
use crate::browser::error::DriverError;
use crate::pages::routes::AppRoute;

/// Shared page behavior: opening routes against the base URL, reloading,
/// and checking where the browser ended up.
#[derive(Debug, Clone)]
pub struct BasePage {
    pub base_url: String,
}

impl BasePage {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    pub fn open(&self, driver: &mut dyn BrowserDriver, route: AppRoute) -> Result<(), DriverError> {
        let url = route.url(&self.base_url);
        info!("Opening the URN \"{}\"", route.path());
        driver.navigate(&url).map_err(|e| {
            error!("Failed to open {}: {}", url, e);
            e
        })
    }

    pub fn reload(&self, driver: &mut dyn BrowserDriver) -> Result<(), DriverError> {
        info!("Reloading page");
        driver.reload()
    }

    /// Whether the current URL contains `expected`.
    pub fn check_current_url(&self, driver: &mut dyn BrowserDriver, expected: &str) -> Result<bool, DriverError> {
        let url = driver.current_url()?;
        let matches = url.contains(expected);
        if !matches {
            error!("Current url {} does not contain {}", url, expected);
        }
        Ok(matches)
    }
}
