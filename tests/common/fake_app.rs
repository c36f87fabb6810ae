use std::collections::{BTreeMap, HashMap, HashSet};

use form_check::browser::driver::{BrowserDriver, ElementState};
use form_check::browser::error::DriverError;
use form_check::browser::playwright::SelectorHint;
use form_check::form::field::{FormField, REJECTION_BORDER_COLOR};
use form_check::form::locators::{SUBMIT_LABEL, TITLE_TEXT};

pub const VALID_BORDER_COLOR: &str = "rgb(40, 167, 69)";
pub const IDLE_BORDER_COLOR: &str = "rgb(206, 212, 218)";

/// In-memory Web Tables page with its registration modal.
///
/// Inputs honor a per-field `maxlength`. Submitting validates every input:
/// if all pass the modal closes, otherwise it stays open and invalid inputs
/// get the rejection border color.
pub struct FakeRegistrationApp {
    pub url: String,
    pub form_open: bool,
    pub values: BTreeMap<FormField, String>,
    pub fills: Vec<(FormField, String)>,
    pub submits: usize,
    pub submitted: bool,
    pub invalid: HashSet<FormField>,
    pub maxlength: HashMap<FormField, usize>,
    pub refuse_fill: Option<FormField>,
    pub submit_disabled: bool,
    pub displayed_override: Option<(FormField, String)>,
    pub rejection_color: String,
    pub screenshots: Vec<String>,
    /// Visibility queries fail once the form was submitted (browser gone).
    pub lose_session_after_submit: bool,
    pub trace_chunks_started: usize,
    /// One entry per closed trace chunk: the save path, or `None` if discarded.
    pub trace_chunks_stopped: Vec<Option<String>>,
}

impl FakeRegistrationApp {
    pub fn new() -> Self {
        let maxlength = HashMap::from([
            (FormField::FirstName, 25),
            (FormField::LastName, 25),
            (FormField::Age, 2),
            (FormField::Salary, 10),
            (FormField::Department, 25),
        ]);
        Self {
            url: "about:blank".into(),
            form_open: false,
            values: BTreeMap::new(),
            fills: Vec::new(),
            submits: 0,
            submitted: false,
            invalid: HashSet::new(),
            maxlength,
            refuse_fill: None,
            submit_disabled: false,
            displayed_override: None,
            rejection_color: REJECTION_BORDER_COLOR.to_string(),
            screenshots: Vec::new(),
            lose_session_after_submit: false,
            trace_chunks_started: 0,
            trace_chunks_stopped: Vec::new(),
        }
    }

    /// Already showing the registration form.
    pub fn with_open_form() -> Self {
        let mut app = Self::new();
        app.open_form();
        app
    }

    fn open_form(&mut self) {
        self.form_open = true;
        self.values.clear();
        self.submitted = false;
        self.invalid.clear();
    }

    pub fn value_of(&self, field: FormField) -> Option<&str> {
        self.values.get(&field).map(|s| s.as_str())
    }

    fn field_for(selector: &SelectorHint) -> Option<FormField> {
        if selector.role.as_deref() != Some("textbox") {
            return None;
        }
        let name = selector.name.as_deref()?;
        FormField::ALL
            .iter()
            .copied()
            .find(|f| f.binding().label == name)
    }

    fn is_button(selector: &SelectorHint, label: &str) -> bool {
        selector.role.as_deref() == Some("button") && selector.name.as_deref() == Some(label)
    }

    fn require_open(&self, selector: &SelectorHint) -> Result<(), DriverError> {
        if self.form_open {
            Ok(())
        } else {
            Err(DriverError::ElementNotFound {
                element: selector.to_string(),
                context: "registration form is closed".into(),
            })
        }
    }

    fn input_field(&self, selector: &SelectorHint) -> Result<FormField, DriverError> {
        self.require_open(selector)?;
        Self::field_for(selector).ok_or_else(|| DriverError::ElementNotFound {
            element: selector.to_string(),
            context: "no such input".into(),
        })
    }
}

impl BrowserDriver for FakeRegistrationApp {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.url = url.to_string();
        self.form_open = false;
        Ok(())
    }

    fn reload(&mut self) -> Result<(), DriverError> {
        self.form_open = false;
        Ok(())
    }

    fn current_url(&mut self) -> Result<String, DriverError> {
        Ok(self.url.clone())
    }

    fn fill(&mut self, selector: &SelectorHint, value: &str) -> Result<(), DriverError> {
        let field = self.input_field(selector)?;
        if self.refuse_fill == Some(field) {
            return Err(DriverError::NotInteractable {
                element: selector.to_string(),
                reason: "input is read-only".into(),
            });
        }
        let stored: String = match self.maxlength.get(&field) {
            Some(&n) => value.chars().take(n).collect(),
            None => value.to_string(),
        };
        self.fills.push((field, value.to_string()));
        self.values.insert(field, stored);
        Ok(())
    }

    fn click(&mut self, selector: &SelectorHint) -> Result<(), DriverError> {
        if Self::is_button(selector, "Add") {
            self.open_form();
            return Ok(());
        }
        if Self::is_button(selector, SUBMIT_LABEL) {
            self.require_open(selector)?;
            self.submits += 1;
            self.submitted = true;
            self.invalid = FormField::ALL
                .iter()
                .copied()
                .filter(|f| !is_valid(*f, self.value_of(*f).unwrap_or("")))
                .collect();
            if self.invalid.is_empty() {
                self.form_open = false;
            }
            return Ok(());
        }
        Err(DriverError::ElementNotFound {
            element: selector.to_string(),
            context: "nothing to click".into(),
        })
    }

    fn wait_for_state(&mut self, selector: &SelectorHint, state: ElementState) -> Result<bool, DriverError> {
        if self.lose_session_after_submit && self.submitted {
            return Err(DriverError::SessionIO(
                "Empty response from browser driver (process may have died)".into(),
            ));
        }
        let on_form = selector.text.as_deref() == Some(TITLE_TEXT)
            || Self::field_for(selector).is_some()
            || Self::is_button(selector, SUBMIT_LABEL);
        let visible = if on_form {
            self.form_open
        } else {
            Self::is_button(selector, "Add")
        };
        Ok(visible == (state == ElementState::Visible))
    }

    fn is_enabled(&mut self, selector: &SelectorHint) -> Result<bool, DriverError> {
        if Self::is_button(selector, "Add") {
            return Ok(true);
        }
        self.require_open(selector)?;
        Ok(!(self.submit_disabled && Self::is_button(selector, SUBMIT_LABEL)))
    }

    fn input_value(&mut self, selector: &SelectorHint) -> Result<String, DriverError> {
        let field = self.input_field(selector)?;
        if let Some((f, shown)) = &self.displayed_override {
            if *f == field {
                return Ok(shown.clone());
            }
        }
        Ok(self.values.get(&field).cloned().unwrap_or_default())
    }

    fn computed_style(&mut self, selector: &SelectorHint, property: &str) -> Result<String, DriverError> {
        let field = self.input_field(selector)?;
        if property != "border-bottom-color" {
            return Ok(String::new());
        }
        let color = if !self.submitted {
            IDLE_BORDER_COLOR.to_string()
        } else if self.invalid.contains(&field) {
            self.rejection_color.clone()
        } else {
            VALID_BORDER_COLOR.to_string()
        };
        Ok(color)
    }

    fn inner_text(&mut self, selector: &SelectorHint) -> Result<String, DriverError> {
        if selector.text.as_deref() == Some(TITLE_TEXT) && self.form_open {
            return Ok(TITLE_TEXT.to_string());
        }
        Err(DriverError::ElementNotFound {
            element: selector.to_string(),
            context: "no text".into(),
        })
    }

    fn screenshot(&mut self, path: &str) -> Result<(), DriverError> {
        self.screenshots.push(path.to_string());
        Ok(())
    }

    fn start_trace_chunk(&mut self) -> Result<(), DriverError> {
        self.trace_chunks_started += 1;
        Ok(())
    }

    fn stop_trace_chunk(&mut self, path: Option<&str>) -> Result<(), DriverError> {
        self.trace_chunks_stopped.push(path.map(str::to_string));
        Ok(())
    }
}

// ============================================================================
// Validation rules of the fake form
// ============================================================================

pub fn is_valid(field: FormField, value: &str) -> bool {
    match field {
        FormField::FirstName | FormField::LastName | FormField::Department => {
            let trimmed = value.trim();
            !trimmed.is_empty() && trimmed.chars().any(|c| c.is_alphanumeric())
        }
        FormField::Email => is_valid_email(value),
        FormField::Age => value.parse::<u32>().map_or(false, |age| (18..=98).contains(&age)),
        FormField::Salary => value
            .parse::<f64>()
            .map_or(false, |salary| salary.is_finite() && salary > 0.0),
    }
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !local.ends_with('-')
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('-')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && value.chars().count() <= 254
        && !value.contains(|c: char| c.is_whitespace() || "<>()'\"".contains(c))
}
