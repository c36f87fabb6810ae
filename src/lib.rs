//! Form field validation for a registration form.
//!
//! Two pieces do the work:
//!
//! - [`catalog`] generates, per field kind, the ordered list of named
//!   boundary and adversarial inputs with the outcome each should produce.
//! - [`protocol`] fills the form with one field overridden, reads values
//!   back, submits, and classifies the result from form visibility and the
//!   field's border color.
//!
//! Everything else ([`browser`], [`elements`], [`form`], [`pages`]) is the
//! page-object layer the protocol drives through the [`browser::driver::BrowserDriver`]
//! trait.

pub mod browser;
pub mod catalog;
pub mod cli;
pub mod data;
pub mod elements;
pub mod form;
pub mod pages;
pub mod protocol;
pub mod trace;

pub use catalog::generator::{find_case, generate};
pub use protocol::validator::validate_field;
