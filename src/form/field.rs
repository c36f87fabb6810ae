use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::field_kind::FieldKind;
use crate::data::person::PersonInfo;

/// Border color the form paints on an input that failed validation.
pub const REJECTION_BORDER_COLOR: &str = "rgb(220, 53, 69)";
pub const BORDER_PROPERTY: &str = "border-bottom-color";

/// Inputs of the registration form, in fill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Age,
    Salary,
    Department,
}

/// How much of a written value the input is expected to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLimit {
    Full,
    Chars(usize),
}

impl DisplayLimit {
    /// The part of `written` the input should read back.
    pub fn apply(self, written: &str) -> String {
        match self {
            DisplayLimit::Full => written.to_string(),
            DisplayLimit::Chars(n) => written.chars().take(n).collect(),
        }
    }
}

/// Everything the form layer knows about one input.
#[derive(Debug, Clone, Copy)]
pub struct FieldBinding {
    pub field: FormField,
    pub kind: FieldKind,
    /// Accessible name of the textbox.
    pub label: &'static str,
    pub display: DisplayLimit,
    pub baseline: fn(&PersonInfo) -> &str,
}

static BINDINGS: [FieldBinding; 6] = [
    FieldBinding {
        field: FormField::FirstName,
        kind: FieldKind::PersonName,
        label: "First Name",
        display: DisplayLimit::Chars(25),
        baseline: person_first_name,
    },
    FieldBinding {
        field: FormField::LastName,
        kind: FieldKind::PersonName,
        label: "Last Name",
        display: DisplayLimit::Chars(25),
        baseline: person_last_name,
    },
    FieldBinding {
        field: FormField::Email,
        kind: FieldKind::Email,
        label: "name@example.com",
        display: DisplayLimit::Full,
        baseline: person_email,
    },
    FieldBinding {
        field: FormField::Age,
        kind: FieldKind::Age,
        label: "Age",
        display: DisplayLimit::Chars(2),
        baseline: person_age,
    },
    FieldBinding {
        field: FormField::Salary,
        kind: FieldKind::Salary,
        label: "Salary",
        display: DisplayLimit::Chars(10),
        baseline: person_salary,
    },
    FieldBinding {
        field: FormField::Department,
        kind: FieldKind::Department,
        label: "Department",
        display: DisplayLimit::Chars(25),
        baseline: person_company,
    },
];

fn person_first_name(p: &PersonInfo) -> &str {
    &p.first_name
}

fn person_last_name(p: &PersonInfo) -> &str {
    &p.last_name
}

fn person_email(p: &PersonInfo) -> &str {
    &p.email
}

fn person_age(p: &PersonInfo) -> &str {
    &p.age
}

fn person_salary(p: &PersonInfo) -> &str {
    &p.salary
}

// The department input is fed from the person's company.
fn person_company(p: &PersonInfo) -> &str {
    &p.company
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Age,
        FormField::Salary,
        FormField::Department,
    ];

    pub fn binding(self) -> &'static FieldBinding {
        &BINDINGS[self as usize]
    }

    pub fn kind(self) -> FieldKind {
        self.binding().kind
    }

    pub fn display_limit(self) -> DisplayLimit {
        self.binding().display
    }

    /// Value this field takes when it is not under test.
    pub fn baseline_value(self, person: &PersonInfo) -> String {
        (self.binding().baseline)(person).to_string()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormField::FirstName => "first_name",
            FormField::LastName => "last_name",
            FormField::Email => "email",
            FormField::Age => "age",
            FormField::Salary => "salary",
            FormField::Department => "department",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        FormField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = FormField::ALL.iter().map(|f| f.as_str()).collect();
                format!("unknown form field '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}
