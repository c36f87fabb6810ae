use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// ============================================================================
// Word pools
// ============================================================================

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua", "enim", "minim",
    "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip",
    "commodo", "consequat", "duis", "aute", "irure", "voluptate", "velit", "esse", "cillum",
    "fugiat", "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "proident",
    "sunt", "culpa", "officia", "deserunt", "mollit", "anim",
];

const FIRST_NAMES: &[&str] = &[
    "Anna", "Boris", "Clara", "Daniel", "Elena", "Felix", "Galina", "Henry", "Irina", "Jacob",
    "Kira", "Leonid", "Maria", "Nikolai", "Olga", "Pavel", "Queenie", "Roman", "Sofia", "Timur",
    "Ulyana", "Victor", "Wendy", "Xenia", "Yuri", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Abramov", "Baker", "Chernov", "Dawson", "Egorova", "Fisher", "Gromov", "Harper", "Ivanova",
    "Jensen", "Kuznetsov", "Lawrence", "Morozova", "Novak", "Orlov", "Petrova", "Quinn",
    "Romanov", "Smirnova", "Turner", "Volkov", "Walsh", "Zaitseva",
];

const MIDDLE_NAMES: &[&str] = &[
    "Alexandrovich", "Borisovna", "Dmitrievich", "Igorevna", "Mikhailovich", "Olegovna",
    "Pavlovich", "Sergeevna", "Viktorovich", "Yurievna",
];

const CITIES: &[&str] = &[
    "Kazan", "Samara", "Tver", "Omsk", "Perm", "Tula", "Sochi", "Vologda", "Kaluga", "Ryazan",
];

const STREETS: &[&str] = &[
    "Lenina", "Sadovaya", "Mira", "Gagarina", "Pushkina", "Lesnaya", "Shkolnaya", "Naberezhnaya",
];

const COMPANY_STEMS: &[&str] = &[
    "Vector", "Orbit", "Granite", "Northwind", "Meridian", "Polar", "Aurora", "Summit", "Atlas",
];

const COMPANY_SUFFIXES: &[&str] = &["Group", "Systems", "Labs", "Holding", "Partners", "Trade"];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net", "mail.example.com"];

const PASSWORD_SPECIALS: &[u8] = b"!@#$%^&*()_+";

// ============================================================================
// Faker
// ============================================================================

/// Seedable source of synthetic values.
///
/// Every generator in the crate takes `&mut Faker` explicitly; two fakers
/// built from the same seed produce the same sequence of values.
pub struct Faker {
    rng: StdRng,
    seed: u64,
}

impl Faker {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// A faker with a freshly drawn seed. The seed is still recorded so the
    /// run can be reproduced.
    pub fn unseeded() -> Self {
        Self::seeded(rand::random::<u64>())
    }

    pub fn from_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::unseeded(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[min, max]`.
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Uniform float in `[0, 1)`.
    pub fn random_fraction(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Integer with up to `digits` decimal digits, at least 1.
    pub fn random_number(&mut self, digits: u32) -> i64 {
        let max = 10_i64.pow(digits) - 1;
        self.random_int(1, max)
    }

    pub fn random_element<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    pub fn word(&mut self) -> String {
        self.random_element(WORDS).to_string()
    }

    pub fn first_name(&mut self) -> String {
        self.random_element(FIRST_NAMES).to_string()
    }

    pub fn last_name(&mut self) -> String {
        self.random_element(LAST_NAMES).to_string()
    }

    pub fn middle_name(&mut self) -> String {
        self.random_element(MIDDLE_NAMES).to_string()
    }

    pub fn city(&mut self) -> String {
        self.random_element(CITIES).to_string()
    }

    pub fn company(&mut self) -> String {
        let stem = self.random_element(COMPANY_STEMS);
        let suffix = self.random_element(COMPANY_SUFFIXES);
        format!("{} {}", stem, suffix)
    }

    pub fn address(&mut self) -> String {
        let city = self.city();
        let street = self.random_element(STREETS);
        let house = self.random_int(1, 150);
        let flat = self.random_int(1, 300);
        format!("{}, ul. {}, d. {}, kv. {}", city, street, house, flat)
    }

    pub fn phone_number(&mut self) -> String {
        format!(
            "+7 9{:02} {:03}-{:02}-{:02}",
            self.random_int(0, 99),
            self.random_int(0, 999),
            self.random_int(0, 99),
            self.random_int(0, 99)
        )
    }

    /// Lowercase ASCII address on a reserved example domain.
    pub fn email(&mut self) -> String {
        let first = self.first_name().to_lowercase();
        let last = self.last_name().to_lowercase();
        let n = self.random_int(1, 99);
        let domain = self.random_element(EMAIL_DOMAINS);
        format!("{}.{}{}@{}", first, last, n, domain)
    }

    /// Password of `length` characters containing at least one lowercase
    /// letter, uppercase letter, digit and special character.
    pub fn password(&mut self, length: usize) -> String {
        let lower = b'a' + self.random_int(0, 25) as u8;
        let upper = b'A' + self.random_int(0, 25) as u8;
        let digit = b'0' + self.random_int(0, 9) as u8;
        let special = PASSWORD_SPECIALS[self.random_int(0, PASSWORD_SPECIALS.len() as i64 - 1) as usize];

        let mut chars = vec![lower, upper, digit, special];
        let pool: Vec<u8> = (b'a'..=b'z').chain(b'A'..=b'Z').chain(b'0'..=b'9').collect();
        while chars.len() < length.max(4) {
            let idx = self.random_int(0, pool.len() as i64 - 1) as usize;
            chars.push(pool[idx]);
        }
        chars.shuffle(&mut self.rng);
        chars.into_iter().map(char::from).collect()
    }

    /// Sentence-cased lorem text of exactly `len` characters.
    pub fn text_of_len(&mut self, len: usize) -> String {
        let mut text = String::new();
        while text.chars().count() < len {
            let words = self.random_int(4, 10);
            let mut sentence: Vec<String> = (0..words).map(|_| self.word()).collect();
            if let Some(first) = sentence.first_mut() {
                *first = capitalize(first);
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&sentence.join(" "));
            text.push('.');
        }
        text.chars().take(len).collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Faker::seeded(7);
        let mut b = Faker::seeded(7);
        assert_eq!(a.email(), b.email());
        assert_eq!(a.text_of_len(40), b.text_of_len(40));
        assert_eq!(a.random_int(-5, 5), b.random_int(-5, 5));
    }

    #[test]
    fn text_has_exact_length() {
        let mut faker = Faker::seeded(1);
        assert_eq!(faker.text_of_len(256).chars().count(), 256);
        assert_eq!(faker.text_of_len(257).chars().count(), 257);
    }

    #[test]
    fn password_mixes_character_classes() {
        let mut faker = Faker::seeded(3);
        let pw = faker.password(10);
        assert_eq!(pw.len(), 10);
        assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
        assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
        assert!(pw.chars().any(|c| c.is_ascii_digit()));
        assert!(pw.chars().any(|c| !c.is_ascii_alphanumeric()));
    }
}
