//! Contact model and identifiers
//!
//! A `ContactRecord` is the unit that flows through every phase of a run:
//! generated in memory, written to and read from vCard documents, saved to
//! a backend, fetched back and deleted. Backends address stored records by
//! `ContactId`, which only a backend ever creates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ParseEnumError;

/// Backend-assigned identifier of a stored contact
///
/// A ContactId is a wrapper around a UUID v4. The harness never builds
/// these itself; it stores the ids returned by a save and replays them
/// for fetch and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Create a new random ContactId using UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a ContactId from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Parse a ContactId from its string representation
    ///
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    /// Get the raw bytes of this ContactId
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Legal name
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    /// Given name
    pub first: String,
    /// Family name
    pub last: String,
}

impl Name {
    /// "first last", skipping empty parts
    pub fn formatted(&self) -> String {
        match (self.first.is_empty(), self.last.is_empty()) {
            (false, false) => format!("{} {}", self.first, self.last),
            (false, true) => self.first.clone(),
            (true, false) => self.last.clone(),
            (true, true) => String::new(),
        }
    }
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// Street line
    pub street: String,
    /// City / locality
    pub locality: String,
}

/// Phone number sub-type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneKind {
    /// Fixed line
    Landline,
    /// Cell phone
    Mobile,
}

/// Tagged phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Number as dialed, including the country prefix
    pub number: String,
    /// Sub-type
    pub kind: PhoneKind,
}

impl PhoneNumber {
    /// Create a phone number of the given kind
    pub fn new(number: impl Into<String>, kind: PhoneKind) -> Self {
        Self {
            number: number.into(),
            kind,
        }
    }
}

/// Gender of a contact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Not specified
    #[default]
    Unspecified,
    /// Male
    Male,
    /// Female
    Female,
}

impl Gender {
    /// All variants, in declaration order
    pub const ALL: [Gender; 3] = [Gender::Unspecified, Gender::Male, Gender::Female];

    /// Canonical text form, as written to interchange documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Unspecified => "Unspecified",
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::new("gender", s))
    }
}

/// Employer details
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Organization {
    /// Organization name
    pub name: String,
    /// Department within the organization
    pub department: String,
    /// Role / title
    pub role: String,
}

/// A structured contact
///
/// Immutable once built: every phase hands records around by reference or
/// clones them, and nothing mutates a record after generation or decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Legal name
    pub name: Name,
    /// Postal address
    pub address: Address,
    /// Phone numbers in document order
    pub phones: Vec<PhoneNumber>,
    /// Email address
    pub email: String,
    /// Gender
    pub gender: Gender,
    /// Employer
    pub organization: Organization,
}

impl ContactRecord {
    /// First phone number of the given kind, if any
    pub fn phone(&self, kind: PhoneKind) -> Option<&PhoneNumber> {
        self.phones.iter().find(|p| p.kind == kind)
    }
}
