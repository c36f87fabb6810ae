#![allow(dead_code)]

pub mod fake_app;

use form_check::data::person::PersonInfo;

/// Seeded baseline person with a fixed age of 30.
pub fn baseline_person() -> PersonInfo {
    let mut person = PersonInfo::generate(Some(2024));
    person.age = "30".to_string();
    person
}
