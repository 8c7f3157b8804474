//! Field lengths and formats for synthetic contacts
//!
//! Every generated string field is a lowercase ASCII string of a fixed
//! length. Phone numbers are a fixed country prefix followed by a fixed
//! number of subscriber digits.

/// Length of generated first and last names
pub const NAME_LEN: usize = 15;

/// Length of the generated street line
pub const STREET_LEN: usize = 15;

/// Length of the generated locality (city)
pub const LOCALITY_LEN: usize = 20;

/// Length of generated organization name, department and role
pub const ORG_FIELD_LEN: usize = 15;

/// Country prefix of every generated phone number
pub const PHONE_COUNTRY_PREFIX: &str = "+420";

/// Number of digits following the country prefix
pub const PHONE_SUBSCRIBER_DIGITS: usize = 9;

/// Domain of generated email addresses (`first.last@EMAIL_DOMAIN`)
pub const EMAIL_DOMAIN: &str = "example.com";

/// Maximum accepted length of a backend name, in bytes
pub const MAX_BACKEND_NAME_LEN: usize = 64;

/// Total length of a generated phone number
pub const fn phone_number_len() -> usize {
    PHONE_COUNTRY_PREFIX.len() + PHONE_SUBSCRIBER_DIGITS
}

/// Check that `s` is exactly `len` lowercase ASCII letters
pub fn is_lowercase_field(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_lowercase())
}

/// Check that `s` is a prefixed phone number with the expected digit count
pub fn is_generated_phone_number(s: &str) -> bool {
    match s.strip_prefix(PHONE_COUNTRY_PREFIX) {
        Some(rest) => {
            rest.len() == PHONE_SUBSCRIBER_DIGITS && rest.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
