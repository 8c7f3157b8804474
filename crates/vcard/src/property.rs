//! Content lines: `[group.]NAME[;PARAM...]:VALUE`
//!
//! A `Property` is one unfolded content line. Only the `TYPE` parameter is
//! interpreted (both `TYPE=A,B` and bare 2.1-style `;A`); other parameters
//! are dropped. Values are kept in their escaped wire form; use
//! `unescape_text` / `split_structured` to read them.

use crate::error::{Result, VCardError};
use crate::MAX_LINE_OCTETS;

/// One content line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Upper-cased property name, group prefix removed
    pub name: String,
    /// Upper-cased TYPE values
    pub types: Vec<String>,
    /// Raw (escaped) value
    pub value: String,
}

impl Property {
    /// Property with a single text value, escaped
    pub fn text(name: &str, types: &[&str], value: &str) -> Self {
        Self {
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            value: escape_text(value),
        }
    }

    /// Property with a `;`-separated structured value, each component escaped
    pub fn structured(name: &str, types: &[&str], components: &[&str]) -> Self {
        let value = components
            .iter()
            .map(|c| escape_text(c))
            .collect::<Vec<_>>()
            .join(";");
        Self {
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            value,
        }
    }

    /// Whether TYPE contains `ty` (case-insensitive)
    pub fn has_type(&self, ty: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(ty))
    }

    /// Parse an unfolded content line
    pub fn parse(line_no: usize, line: &str) -> Result<Self> {
        let colon = find_value_separator(line)
            .ok_or_else(|| VCardError::malformed(line_no, "missing ':'"))?;
        let (head, value) = (&line[..colon], &line[colon + 1..]);

        let mut parts = head.split(';');
        let raw_name = parts.next().unwrap_or_default().trim();
        let name = match raw_name.rsplit_once('.') {
            Some((_group, name)) => name,
            None => raw_name,
        };
        if name.is_empty() {
            return Err(VCardError::malformed(line_no, "empty property name"));
        }

        let mut types = Vec::new();
        for param in parts {
            match param.split_once('=') {
                Some((key, values)) if key.trim().eq_ignore_ascii_case("TYPE") => {
                    types.extend(
                        values
                            .split(',')
                            .map(|v| v.trim_matches('"').trim().to_ascii_uppercase())
                            .filter(|v| !v.is_empty()),
                    );
                }
                Some(_) => {}
                None if !param.trim().is_empty() => {
                    types.push(param.trim().to_ascii_uppercase());
                }
                None => {}
            }
        }

        Ok(Self {
            name: name.to_ascii_uppercase(),
            types,
            value: value.to_string(),
        })
    }

    /// Render as an unfolded content line (no line terminator)
    pub fn to_content_line(&self) -> String {
        let mut line = String::with_capacity(self.name.len() + self.value.len() + 16);
        line.push_str(&self.name);
        if !self.types.is_empty() {
            line.push_str(";TYPE=");
            line.push_str(&self.types.join(","));
        }
        line.push(':');
        line.push_str(&self.value);
        line
    }
}

/// Position of the `:` separating name/params from the value, skipping quoted params
fn find_value_separator(line: &str) -> Option<usize> {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

/// Escape a text value
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Reverse `escape_text`. Unknown escapes yield the escaped character.
pub fn unescape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Split a structured value on unescaped `;` and unescape each component
pub fn split_structured(value: &str) -> Vec<String> {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ';' => components.push(unescape_text(&std::mem::take(&mut current))),
            c => current.push(c),
        }
    }
    components.push(unescape_text(&current));
    components
}

/// Fold a content line into physical lines of at most `MAX_LINE_OCTETS`
/// octets each, continuation lines starting with a single space.
///
/// Never splits inside a UTF-8 sequence.
pub fn fold_line(line: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = line;
    let mut limit = MAX_LINE_OCTETS;
    while rest.len() > limit {
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push(&rest[..cut]);
        rest = &rest[cut..];
        // continuation lines lose one octet to the leading space
        limit = MAX_LINE_OCTETS - 1;
    }
    out.push(rest);
    out
}
