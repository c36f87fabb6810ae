use tracing::{error, info};

use crate::browser::driver::{BrowserDriver, ElementState};
use crate::browser::error::DriverError;
use crate::browser::playwright::SelectorHint;

/// What kind of element a wrapper stands for. Only used to label log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Input,
    Button,
    Text,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Input => "input",
            ElementKind::Button => "button",
            ElementKind::Text => "text",
        }
    }
}

/// A named page element: a selector hint plus the interactions the page
/// objects need. The driver is passed per call, so elements are plain data
/// and pages can be built before any browser exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
    pub selector: SelectorHint,
}

impl Element {
    pub fn new(kind: ElementKind, selector: SelectorHint, name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            selector,
        }
    }

    pub fn input(selector: SelectorHint, name: &str) -> Self {
        Self::new(ElementKind::Input, selector, name)
    }

    pub fn button(selector: SelectorHint, name: &str) -> Self {
        Self::new(ElementKind::Button, selector, name)
    }

    pub fn text(selector: SelectorHint, name: &str) -> Self {
        Self::new(ElementKind::Text, selector, name)
    }

    pub fn type_of(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn fill(&self, driver: &mut dyn BrowserDriver, value: &str) -> Result<(), DriverError> {
        info!("Filling {} \"{}\" to value \"{}\"", self.type_of(), self.name, value);
        driver.fill(&self.selector, value)
    }

    /// Click after checking the element is enabled.
    pub fn click(&self, driver: &mut dyn BrowserDriver) -> Result<(), DriverError> {
        info!("Clicking {} \"{}\"", self.type_of(), self.name);
        if !driver.is_enabled(&self.selector)? {
            error!("{} \"{}\" is not enabled", self.type_of(), self.name);
            return Err(DriverError::NotInteractable {
                element: self.name.clone(),
                reason: "element is disabled".into(),
            });
        }
        driver.click(&self.selector)
    }

    /// Wait for the element to reach `state`. Driver failures are returned,
    /// never folded into the answer.
    pub fn wait_for(&self, driver: &mut dyn BrowserDriver, state: ElementState) -> Result<bool, DriverError> {
        let reached = driver.wait_for_state(&self.selector, state)?;
        info!(
            "{} '{}' {} {:?}",
            self.type_of(),
            self.name,
            if reached { "reached" } else { "did not reach" },
            state
        );
        Ok(reached)
    }

    /// Visibility as a plain answer: a driver failure counts as not visible.
    pub fn check_visible(&self, driver: &mut dyn BrowserDriver) -> bool {
        match self.wait_for(driver, ElementState::Visible) {
            Ok(visible) => visible,
            Err(e) => {
                error!("Element {} '{}' is not visible: {}", self.type_of(), self.name, e);
                false
            }
        }
    }

    pub fn check_enabled(&self, driver: &mut dyn BrowserDriver) -> bool {
        driver.is_enabled(&self.selector).unwrap_or(false)
    }

    pub fn value(&self, driver: &mut dyn BrowserDriver) -> Result<String, DriverError> {
        driver.input_value(&self.selector)
    }

    pub fn css_property(&self, driver: &mut dyn BrowserDriver, property: &str) -> Result<String, DriverError> {
        info!("Getting CSS property {} of {} \"{}\"", property, self.type_of(), self.name);
        driver.computed_style(&self.selector, property).map_err(|e| {
            error!("error getting CSS property {} \"{}\": {}", self.type_of(), self.name, e);
            e
        })
    }

    pub fn text_content(&self, driver: &mut dyn BrowserDriver) -> Result<String, DriverError> {
        driver.inner_text(&self.selector)
    }
}
