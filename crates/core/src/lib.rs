//! Core types for the vCard transfer harness
//!
//! This crate defines the foundational types shared by the codec, the
//! storage backends and the benchmark harness:
//! - ContactId: Backend-assigned identifier for stored contacts
//! - ContactRecord: Structured contact (name, address, phones, email, gender, organization)
//! - Gender / PhoneKind: Enumerated contact details
//! - Limits: Field lengths and formats used by synthetic data generation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod types;

pub use error::ParseEnumError;
pub use types::{
    Address, ContactId, ContactRecord, Gender, Name, Organization, PhoneKind, PhoneNumber,
};
