use crate::browser::driver::BrowserDriver;
use crate::browser::error::DriverError;
use crate::browser::playwright::SelectorHint;
use crate::elements::element::Element;
use crate::form::registration::RegistrationForm;
use crate::pages::base_page::BasePage;
use crate::pages::routes::AppRoute;

/// Web Tables page. Its Add button opens the registration form.
#[derive(Debug, Clone)]
pub struct WebTablesPage {
    pub base: BasePage,
    pub add_button: Element,
    pub registration_form: RegistrationForm,
}

impl WebTablesPage {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: BasePage::new(base_url),
            add_button: Element::button(SelectorHint::button("Add"), "Button [Add]"),
            registration_form: RegistrationForm::new(),
        }
    }

    pub fn open(&self, driver: &mut dyn BrowserDriver) -> Result<(), DriverError> {
        self.base.open(driver, AppRoute::WebTables)
    }

    /// Navigate to the page and open a fresh registration form.
    pub fn open_registration_form(&self, driver: &mut dyn BrowserDriver) -> Result<&RegistrationForm, DriverError> {
        self.open(driver)?;
        self.add_button.click(driver)?;
        if !self.registration_form.check_visible(driver) {
            return Err(DriverError::ElementNotFound {
                element: self.registration_form.title_form.name.clone(),
                context: "registration form did not open after clicking Add".into(),
            });
        }
        Ok(&self.registration_form)
    }
}
