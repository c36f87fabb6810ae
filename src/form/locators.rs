use crate::browser::playwright::SelectorHint;
use crate::form::field::FormField;

pub const TITLE_TEXT: &str = "Registration Form";
pub const SUBMIT_LABEL: &str = "Submit";

pub fn title_form() -> SelectorHint {
    SelectorHint::text(TITLE_TEXT)
}

pub fn input(field: FormField) -> SelectorHint {
    SelectorHint::textbox(field.binding().label)
}

pub fn submit_button() -> SelectorHint {
    SelectorHint::button(SUBMIT_LABEL)
}
