use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::faker::Faker;

/// Accepted age range for a baseline person (matches the catalog's
/// `valid_age` range).
pub const PERSON_AGE: (i64, i64) = (18, 98);
pub const PERSON_SALARY: (i64, i64) = (15_000, 180_000);
pub const PASSWORD_LEN: usize = 10;

/// A fully valid synthetic person. Supplies the value of every form field
/// that is not under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInfo {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub password_confirmation: String,
    pub address: String,
    pub age: String,
    pub city: String,
    pub company: String,
    pub salary: String,
    pub seed: u64,
}

impl PersonInfo {
    /// Generate a person. Without a seed one is drawn at random and logged so
    /// the person can be regenerated.
    pub fn generate(seed: Option<u64>) -> Self {
        let mut faker = Faker::from_option(seed);
        if seed.is_none() {
            info!(seed = faker.seed(), "generated person seed");
        }
        Self::generate_with(&mut faker)
    }

    pub fn generate_with(faker: &mut Faker) -> Self {
        let password = faker.password(PASSWORD_LEN);
        PersonInfo {
            first_name: faker.first_name(),
            last_name: faker.last_name(),
            middle_name: Some(faker.middle_name()),
            email: faker.email(),
            phone: faker.phone_number(),
            password_confirmation: password.clone(),
            password,
            address: faker.address(),
            age: faker.random_int(PERSON_AGE.0, PERSON_AGE.1).to_string(),
            city: faker.city(),
            company: faker.company(),
            salary: faker.random_int(PERSON_SALARY.0, PERSON_SALARY.1).to_string(),
            seed: faker.seed(),
        }
    }

    /// Generate `count` persons, person `i` seeded with `seed + i`.
    pub fn generate_many(count: usize, seed: Option<u64>) -> Vec<Self> {
        let base = seed.unwrap_or_else(rand::random::<u64>);
        (0..count)
            .map(|i| {
                let person_seed = base.wrapping_add(i as u64);
                info!(person = i + 1, seed = person_seed, "generating person");
                Self::generate(Some(person_seed))
            })
            .collect()
    }
}
