//! Streaming vCard reader

use std::io::BufRead;

use tracing::trace;
use xport_core::ContactRecord;

use crate::error::{Result, VCardError};
use crate::mapping::apply_property;
use crate::property::Property;
use crate::SUPPORTED_VERSIONS;

/// Joins folded physical lines back into content lines
struct Unfolder<R> {
    inner: R,
    lookahead: Option<(usize, String)>,
    line_no: usize,
}

impl<R: BufRead> Unfolder<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            lookahead: None,
            line_no: 0,
        }
    }

    fn read_physical(&mut self) -> Result<Option<(usize, String)>> {
        let mut buf = String::new();
        if self.inner.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let trimmed = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed);
        Ok(Some((self.line_no, buf)))
    }

    /// Next non-empty content line with its starting line number
    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        loop {
            let (line_no, mut current) = match self.lookahead.take() {
                Some(line) => line,
                None => match self.read_physical()? {
                    Some(line) => line,
                    None => return Ok(None),
                },
            };

            while let Some((next_no, next)) = self.read_physical()? {
                match next.strip_prefix([' ', '\t']) {
                    Some(continuation) => current.push_str(continuation),
                    None => {
                        self.lookahead = Some((next_no, next));
                        break;
                    }
                }
            }

            if !current.trim().is_empty() {
                return Ok(Some((line_no, current)));
            }
        }
    }
}

/// Reads contacts from a vCard document on an `io::BufRead`
///
/// Yields one `ContactRecord` per `BEGIN:VCARD` ... `END:VCARD` block, in
/// document order. Stops at the first error.
pub struct VCardReader<R: BufRead> {
    lines: Unfolder<R>,
    failed: bool,
}

impl<R: BufRead> VCardReader<R> {
    /// Create a reader over `inner`
    pub fn new(inner: R) -> Self {
        Self {
            lines: Unfolder::new(inner),
            failed: false,
        }
    }

    /// Decode every remaining contact
    pub fn read_all(self) -> Result<Vec<ContactRecord>> {
        self.collect()
    }

    fn read_contact(&mut self) -> Result<Option<ContactRecord>> {
        let (begin_line, first) = match self.lines.next_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        let begin = Property::parse(begin_line, &first)?;
        if begin.name != "BEGIN" || !begin.value.eq_ignore_ascii_case("VCARD") {
            return Err(VCardError::ExpectedBegin {
                line: begin_line,
                found: begin.name,
            });
        }

        let mut record = ContactRecord::default();
        loop {
            let (line_no, line) = self
                .lines
                .next_line()?
                .ok_or(VCardError::UnexpectedEof { line: begin_line })?;
            let prop = Property::parse(line_no, &line)?;
            match prop.name.as_str() {
                "END" if prop.value.eq_ignore_ascii_case("VCARD") => break,
                "BEGIN" => {
                    return Err(VCardError::malformed(line_no, "nested BEGIN"));
                }
                "VERSION" => {
                    let version = prop.value.trim();
                    if !SUPPORTED_VERSIONS.contains(&version) {
                        return Err(VCardError::UnsupportedVersion {
                            line: line_no,
                            version: version.to_string(),
                        });
                    }
                }
                _ => apply_property(&mut record, line_no, &prop)?,
            }
        }

        trace!(target: "xport::vcard", line = begin_line, "decoded contact");
        Ok(Some(record))
    }
}

impl<R: BufRead> Iterator for VCardReader<R> {
    type Item = Result<ContactRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_contact() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
