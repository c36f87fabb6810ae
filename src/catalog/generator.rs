use std::fmt;

use tracing::debug;

use crate::catalog::faker::Faker;
use crate::catalog::field_kind::FieldKind;
use crate::catalog::test_case::TestCase;

pub const MAX_TEXT_LEN: usize = 256;
pub const SCRIPT_PAYLOAD: &str = "<script>alert('test')</script>";
pub const SQL_PAYLOAD: &str = "admin' AND 1=1 -- ";
pub const SPECIAL_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
pub const DEPARTMENTS: &[&str] = &["IT", "HR", "Finance", "Marketing", "Operations"];

/// Inclusive range drawn for the `valid_age` case. Upper bound stays below
/// the explicit `99` rejection case.
pub const VALID_AGE: (i64, i64) = (18, 98);

// ============================================================================
// Public entry points
// ============================================================================

/// Generate the ordered catalog for `kind`.
///
/// With `Some(seed)` every randomized value is reproducible. Case names,
/// count and order never depend on the seed.
pub fn generate(kind: FieldKind, seed: Option<u64>) -> Vec<TestCase> {
    let mut faker = Faker::from_option(seed);
    debug!(kind = %kind, seed = faker.seed(), "generating test cases");
    generate_with(kind, &mut faker)
}

/// Generate the catalog for `kind` drawing randomness from `faker`.
///
/// The parent's cases are generated first from the same faker, so for a
/// given seed a kind's catalog starts with exactly its parent's catalog.
pub fn generate_with(kind: FieldKind, faker: &mut Faker) -> Vec<TestCase> {
    match kind {
        FieldKind::Generic => generic_cases(),
        FieldKind::Text => {
            let base = generate_with(FieldKind::Generic, faker);
            extend(base, text_cases(faker))
        }
        FieldKind::PersonName => {
            let base = generate_with(FieldKind::Text, faker);
            extend(base, person_name_cases(faker))
        }
        FieldKind::Department => {
            let base = generate_with(FieldKind::Text, faker);
            extend(base, department_cases(faker))
        }
        FieldKind::Numeric => {
            let base = generate_with(FieldKind::Generic, faker);
            extend(base, numeric_cases(faker))
        }
        FieldKind::Salary => {
            let base = generate_with(FieldKind::Numeric, faker);
            extend(base, salary_cases(faker))
        }
        FieldKind::Age => {
            let base = generate_with(FieldKind::Numeric, faker);
            extend(base, age_cases(faker))
        }
        FieldKind::Email => {
            let base = generate_with(FieldKind::Generic, faker);
            extend(base, email_cases(faker))
        }
    }
}

/// Look up a single case by name in `kind`'s catalog.
pub fn find_case(kind: FieldKind, name: &str, seed: Option<u64>) -> Result<TestCase, UnknownTestCase> {
    generate(kind, seed)
        .into_iter()
        .find(|case| case.name == name)
        .ok_or_else(|| UnknownTestCase {
            kind,
            name: name.to_string(),
        })
}

/// Append-only composition: inherited cases are never dropped or replaced.
fn extend(mut base: Vec<TestCase>, extra: Vec<TestCase>) -> Vec<TestCase> {
    base.extend(extra);
    base
}

// ============================================================================
// Per-kind specializations
// ============================================================================

fn generic_cases() -> Vec<TestCase> {
    vec![TestCase::rejected("empty", "")]
}

fn text_cases(faker: &mut Faker) -> Vec<TestCase> {
    vec![
        TestCase::rejected("two_spaces", "  "),
        TestCase::accepted("max_symbols_256", faker.text_of_len(MAX_TEXT_LEN)),
        TestCase::rejected("over_max_symbols", faker.text_of_len(MAX_TEXT_LEN + 1)),
        TestCase::accepted("space_middle", format!("{} {}", faker.word(), faker.word())),
        TestCase::accepted("space_last", format!("{} ", faker.word())),
        TestCase::accepted("space_first", format!(" {}", faker.word())),
        TestCase::rejected("special_symbols", SPECIAL_SYMBOLS),
        TestCase::accepted("script", SCRIPT_PAYLOAD),
        TestCase::accepted("sql", SQL_PAYLOAD),
    ]
}

fn person_name_cases(faker: &mut Faker) -> Vec<TestCase> {
    vec![
        TestCase::accepted(
            "valid_with_hyphen",
            format!("{}-{}", faker.first_name(), faker.first_name()),
        ),
        TestCase::accepted("valid_with_apostrophe", "O'Connor"),
    ]
}

fn department_cases(faker: &mut Faker) -> Vec<TestCase> {
    vec![
        TestCase::accepted("valid_department", faker.random_element(DEPARTMENTS)),
        TestCase::accepted("valid_long_department", "Research and Development"),
        TestCase::accepted("valid_with_hyphen", "IT-Security"),
    ]
}

fn numeric_cases(faker: &mut Faker) -> Vec<TestCase> {
    vec![
        TestCase::accepted("1", 1_i64),
        TestCase::rejected("zero", 0_i64),
        TestCase::rejected("negative", faker.random_int(-1000, -1)),
        TestCase::rejected("non_numeric", faker.word()),
    ]
}

fn salary_cases(faker: &mut Faker) -> Vec<TestCase> {
    let whole = faker.random_number(5) as f64;
    let salary = ((whole + faker.random_fraction()) * 100.0).round() / 100.0;
    vec![
        TestCase::accepted("valid_salary", salary),
        TestCase::rejected("too_large", 12345678910.12345678910_f64),
    ]
}

fn age_cases(faker: &mut Faker) -> Vec<TestCase> {
    vec![
        TestCase::rejected("-1", -1_i64),
        TestCase::rejected("100", 100_i64),
        TestCase::rejected("99", 99_i64),
        TestCase::accepted("valid_age", faker.random_int(VALID_AGE.0, VALID_AGE.1)),
        TestCase::rejected("too_young", faker.random_int(0, 17)),
        TestCase::rejected("too_old", faker.random_int(101, 200)),
        TestCase::rejected("decimal", 25.5_f64),
    ]
}

fn email_cases(faker: &mut Faker) -> Vec<TestCase> {
    vec![
        TestCase::accepted("valid_email", faker.email()),
        TestCase::accepted("cyrillic", "дом@дом.рф"),
        TestCase::rejected("domain_without_dot", "user@domain"),
        TestCase::rejected("too_long", format!("{}@{}.com", "a".repeat(200), "b".repeat(50))),
        TestCase::rejected("domain_without_at", "userdomain"),
        TestCase::rejected("domain_leading_hyphen", "user@-domain.com"),
        TestCase::rejected("local_part_trailing_hyphen", "user-@domain.com"),
        TestCase::rejected("script", SCRIPT_PAYLOAD),
    ]
}

// ============================================================================
// Errors
// ============================================================================

/// A case name was requested that the kind's catalog does not contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTestCase {
    pub kind: FieldKind,
    pub name: String,
}

impl fmt::Display for UnknownTestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no test case named '{}' in the {} catalog", self.name, self.kind)
    }
}

impl std::error::Error for UnknownTestCase {}
