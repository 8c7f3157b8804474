//! vCard 3.0 interchange codec
//!
//! Streaming conversion between `ContactRecord`s and vCard text:
//! - `VCardWriter`: encodes records one at a time onto any `io::Write`
//! - `VCardReader`: decodes records one at a time from any `io::BufRead`
//!
//! Documents use CRLF line endings, fold content lines longer than 75
//! octets and escape `\`, `;`, `,` and newlines in text values.
//!
//! # Example
//!
//! ```
//! use xport_core::ContactRecord;
//! use xport_vcard::{decode, encode};
//!
//! let records = vec![ContactRecord::default()];
//! let bytes = encode(&records).unwrap();
//! assert_eq!(decode(&bytes).unwrap(), records);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
mod mapping;
pub mod property;
pub mod reader;
pub mod writer;

pub use error::{Result, VCardError};
pub use property::Property;
pub use reader::VCardReader;
pub use writer::VCardWriter;

use xport_core::ContactRecord;

/// vCard version written by `VCardWriter`
pub const VERSION: &str = "3.0";

/// Versions accepted by `VCardReader`
pub const SUPPORTED_VERSIONS: [&str; 3] = ["2.1", "3.0", "4.0"];

/// Maximum content line length in octets before folding
pub const MAX_LINE_OCTETS: usize = 75;

/// Encode records into a single in-memory document
pub fn encode(records: &[ContactRecord]) -> Result<Vec<u8>> {
    let mut writer = VCardWriter::new(Vec::new());
    writer.write_all(records)?;
    writer.finish()
}

/// Decode every record of an in-memory document, in document order
pub fn decode(bytes: &[u8]) -> Result<Vec<ContactRecord>> {
    VCardReader::new(bytes).read_all()
}
