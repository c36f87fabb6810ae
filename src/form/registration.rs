use std::collections::BTreeMap;

use tracing::{debug, error, info};

use crate::browser::driver::{BrowserDriver, ElementState};
use crate::browser::error::DriverError;
use crate::catalog::test_case::Outcome;
use crate::data::person::PersonInfo;
use crate::elements::element::Element;
use crate::form::field::{BORDER_PROPERTY, FormField};
use crate::form::locators;
use crate::protocol::error::FillFailure;
use crate::protocol::report::{FilledValues, ReadbackMismatch};

/// The registration form shown over the Web Tables page: a title, six
/// text inputs and a submit button.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub title_form: Element,
    pub inputs: Vec<(FormField, Element)>,
    pub submit_button: Element,
}

impl RegistrationForm {
    pub fn new() -> Self {
        let inputs = FormField::ALL
            .iter()
            .map(|&field| {
                let name = format!("{} field", field.binding().label);
                (field, Element::input(locators::input(field), &name))
            })
            .collect();

        RegistrationForm {
            title_form: Element::text(locators::title_form(), "Title of Registration Form"),
            inputs,
            submit_button: Element::button(locators::submit_button(), "submit button"),
        }
    }

    pub fn input(&self, field: FormField) -> &Element {
        // `inputs` is built from FormField::ALL, so the position always matches
        &self.inputs[field as usize].1
    }

    /// Whether the form is rendered. Driver failures count as not visible.
    pub fn check_visible(&self, driver: &mut dyn BrowserDriver) -> bool {
        self.title_form.check_visible(driver)
    }

    /// Whether the form is still shown after a submit.
    ///
    /// Waits toward the `expected` outcome: for an accepted case the form is
    /// given the expect timeout to close, for a rejected case to show. A
    /// driver failure is an error, not an answer.
    pub fn visible_after_submit(
        &self,
        driver: &mut dyn BrowserDriver,
        expected: Outcome,
    ) -> Result<bool, DriverError> {
        let visible = match expected {
            Outcome::Accepted => !self.title_form.wait_for(driver, ElementState::Hidden)?,
            Outcome::Rejected => self.title_form.wait_for(driver, ElementState::Visible)?,
        };
        info!("Registration form visible after submit: {}", visible);
        Ok(visible)
    }

    /// Fill every input. `target` overrides one field's value, all others
    /// come from `person`. Stops at the first input that refuses its value.
    pub fn fill_form(
        &self,
        driver: &mut dyn BrowserDriver,
        person: &PersonInfo,
        target: Option<(FormField, &str)>,
    ) -> Result<FilledValues, FillFailure> {
        match target {
            Some((field, value)) => info!("Filling form, validating {} with value: {:?}", field, value),
            None => info!("Filling form with all fields from person data"),
        }

        let mut filled = FilledValues::new();
        for (field, input) in &self.inputs {
            let value = match target {
                Some((target_field, value)) if target_field == *field => value.to_string(),
                _ => field.baseline_value(person),
            };

            if let Err(e) = input.fill(driver, &value) {
                error!("Error filling form: {}: {}", field, e);
                return Err(FillFailure {
                    input: *field,
                    value,
                    source: e,
                });
            }
            filled.insert(*field, value);
        }

        debug!(?filled, "filled form");
        Ok(filled)
    }

    /// Compare every input's displayed value with what was written, after
    /// applying the field's display limit. Returns the first mismatch.
    pub fn check_text_in_form(
        &self,
        driver: &mut dyn BrowserDriver,
        filled: &FilledValues,
    ) -> Option<ReadbackMismatch> {
        for (field, input) in &self.inputs {
            let Some(written) = filled.get(field) else {
                return Some(ReadbackMismatch {
                    field: *field,
                    expected: String::new(),
                    actual: None,
                    detail: Some(format!("Field '{}' not found in filled values", field)),
                });
            };

            let expected = field.display_limit().apply(written);
            info!("Checking {} has {:?}", field, expected);

            match input.value(driver) {
                Ok(actual) if actual == expected => {}
                Ok(actual) => {
                    error!("Value check failed for {}: expected {:?}, got {:?}", field, expected, actual);
                    return Some(ReadbackMismatch {
                        field: *field,
                        expected,
                        actual: Some(actual),
                        detail: None,
                    });
                }
                Err(e) => {
                    error!("Error checking field {}: {}", field, e);
                    return Some(ReadbackMismatch {
                        field: *field,
                        expected,
                        actual: None,
                        detail: Some(e.to_string()),
                    });
                }
            }
        }
        None
    }

    pub fn submit(&self, driver: &mut dyn BrowserDriver) -> Result<(), DriverError> {
        self.submit_button.click(driver).map_err(|e| {
            error!("Error clicking submit button: {}", e);
            e
        })
    }

    pub fn border_color(&self, driver: &mut dyn BrowserDriver, field: FormField) -> Result<String, DriverError> {
        let color = self.input(field).css_property(driver, BORDER_PROPERTY)?;
        info!("Color bottom-border '{}': {}", field, color);
        Ok(color)
    }

    /// Whether `field`'s bottom border has the `expected` color.
    pub fn check_field_border_color(
        &self,
        driver: &mut dyn BrowserDriver,
        field: FormField,
        expected: &str,
    ) -> Result<bool, DriverError> {
        let actual = self.border_color(driver, field)?;
        if actual != expected {
            error!("Border of {} is {}, expected {}", field, actual, expected);
        }
        Ok(actual == expected)
    }

    /// Bottom border color of every input.
    pub fn border_colors(&self, driver: &mut dyn BrowserDriver) -> Result<BTreeMap<FormField, String>, DriverError> {
        let mut colors = BTreeMap::new();
        for (field, _) in &self.inputs {
            colors.insert(*field, self.border_color(driver, *field)?);
        }
        info!(?colors, "border colors retrieved");
        Ok(colors)
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}
