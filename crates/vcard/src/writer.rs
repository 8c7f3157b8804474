//! Streaming vCard writer

use std::io::Write;

use xport_core::ContactRecord;

use crate::error::Result;
use crate::mapping::to_properties;
use crate::property::{fold_line, Property};
use crate::VERSION;

const CRLF: &[u8] = b"\r\n";

/// Writes contacts as vCard 3.0 onto an `io::Write`
///
/// Each call to `write_contact` emits one complete `BEGIN:VCARD` ...
/// `END:VCARD` block. Wrap unbuffered sinks (files) in a `BufWriter`;
/// `finish` flushes and hands the sink back.
///
/// # Example
///
/// ```
/// use xport_core::ContactRecord;
/// use xport_vcard::VCardWriter;
///
/// let mut writer = VCardWriter::new(Vec::new());
/// writer.write_contact(&ContactRecord::default()).unwrap();
/// let bytes = writer.finish().unwrap();
/// assert!(bytes.starts_with(b"BEGIN:VCARD\r\n"));
/// ```
pub struct VCardWriter<W: Write> {
    inner: W,
    written: usize,
}

impl<W: Write> VCardWriter<W> {
    /// Create a writer over `inner`
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Encode one contact
    pub fn write_contact(&mut self, record: &ContactRecord) -> Result<()> {
        self.write_line("BEGIN:VCARD")?;
        self.write_line(&format!("VERSION:{}", VERSION))?;
        for prop in to_properties(record) {
            self.write_property(&prop)?;
        }
        self.write_line("END:VCARD")?;
        self.written += 1;
        Ok(())
    }

    /// Encode every contact in order
    pub fn write_all<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a ContactRecord>,
    {
        for record in records {
            self.write_contact(record)?;
        }
        Ok(())
    }

    /// Number of contacts written so far
    pub fn contacts_written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying sink
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn write_property(&mut self, prop: &Property) -> Result<()> {
        self.write_line(&prop.to_content_line())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        for (i, chunk) in fold_line(line).into_iter().enumerate() {
            if i > 0 {
                self.inner.write_all(b" ")?;
            }
            self.inner.write_all(chunk.as_bytes())?;
            self.inner.write_all(CRLF)?;
        }
        Ok(())
    }
}
