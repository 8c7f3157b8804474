//! Error types for vCard encoding and decoding

use std::io;
use thiserror::Error;
use xport_core::ParseEnumError;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, VCardError>;

/// Errors raised while writing or reading vCard documents
///
/// Line numbers are 1-based and refer to the first physical line of the
/// (possibly folded) content line.
#[derive(Debug, Error)]
pub enum VCardError {
    /// I/O error on the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Content line without a `NAME:VALUE` shape
    #[error("line {line}: malformed content line: {reason}")]
    Malformed {
        /// Line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// Content found outside of a BEGIN:VCARD / END:VCARD block
    #[error("line {line}: expected BEGIN:VCARD, found '{found}'")]
    ExpectedBegin {
        /// Line number
        line: usize,
        /// Property name found instead
        found: String,
    },

    /// Input ended before END:VCARD
    #[error("unexpected end of input in vCard starting at line {line}")]
    UnexpectedEof {
        /// Line of the unterminated BEGIN:VCARD
        line: usize,
    },

    /// VERSION other than 2.1, 3.0 or 4.0
    #[error("line {line}: unsupported vCard version '{version}'")]
    UnsupportedVersion {
        /// Line number
        line: usize,
        /// Version string found
        version: String,
    },

    /// Property value that does not map onto the contact model
    #[error("line {line}: {source}")]
    InvalidValue {
        /// Line number
        line: usize,
        /// Underlying parse failure
        #[source]
        source: ParseEnumError,
    },
}

impl VCardError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        VCardError::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
