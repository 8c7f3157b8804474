//! Synthetic contact generation
//!
//! Every generated contact has the same shape: two names, a street and a
//! locality, a landline and a mobile number, an email derived from the
//! names, a gender and an organization. Only the content is random.
//!
//! The generator owns its random source. `from_time` seeds it once from
//! the wall clock; `with_seed` gives reproducible output for tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

use xport_core::limits::{
    phone_number_len, EMAIL_DOMAIN, LOCALITY_LEN, NAME_LEN, ORG_FIELD_LEN,
    PHONE_COUNTRY_PREFIX, PHONE_SUBSCRIBER_DIGITS, STREET_LEN,
};
use xport_core::{
    Address, ContactRecord, Gender, Name, Organization, PhoneKind, PhoneNumber,
};

/// Generates structurally identical contacts with random content
#[derive(Debug, Clone)]
pub struct ContactGenerator {
    rng: StdRng,
    seed: u64,
}

impl ContactGenerator {
    /// Generator with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Generator seeded from the current wall-clock time
    pub fn from_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    /// Seed this generator started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate exactly `count` contacts
    pub fn generate(&mut self, count: usize) -> Vec<ContactRecord> {
        (0..count).map(|_| self.contact()).collect()
    }

    /// Generate one contact
    pub fn contact(&mut self) -> ContactRecord {
        let name = Name {
            first: self.lowercase(NAME_LEN),
            last: self.lowercase(NAME_LEN),
        };
        let address = Address {
            street: self.lowercase(STREET_LEN),
            locality: self.lowercase(LOCALITY_LEN),
        };
        let phones = vec![
            PhoneNumber::new(self.phone_number(), PhoneKind::Landline),
            PhoneNumber::new(self.phone_number(), PhoneKind::Mobile),
        ];
        let email = format!("{}.{}@{}", name.first, name.last, EMAIL_DOMAIN);
        let gender = Gender::ALL[self.rng.gen_range(0..Gender::ALL.len())];
        let organization = Organization {
            name: self.lowercase(ORG_FIELD_LEN),
            department: self.lowercase(ORG_FIELD_LEN),
            role: self.lowercase(ORG_FIELD_LEN),
        };

        ContactRecord {
            name,
            address,
            phones,
            email,
            gender,
            organization,
        }
    }

    /// `len` letters sampled uniformly from `a..=z`
    fn lowercase(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(self.rng.gen_range(b'a'..=b'z')))
            .collect()
    }

    /// Country prefix followed by uniformly sampled digits
    fn phone_number(&mut self) -> String {
        let mut number = String::with_capacity(phone_number_len());
        number.push_str(PHONE_COUNTRY_PREFIX);
        for _ in 0..PHONE_SUBSCRIBER_DIGITS {
            number.push(char::from(self.rng.gen_range(b'0'..=b'9')));
        }
        number
    }
}

impl Default for ContactGenerator {
    fn default() -> Self {
        Self::from_time()
    }
}
