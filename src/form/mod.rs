pub mod field;
pub mod locators;
pub mod registration;
