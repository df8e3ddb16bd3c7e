//! Ordered, case-insensitive header storage.
//!
//! Names keep the casing they were inserted with and are matched
//! case-insensitively. A name may carry several values; on the wire they are
//! written as one comma-joined line.

use std::fmt;

/// Headers that describe the body rather than the message.
const ENTITY_HEADERS: &[&str] = &[
    "Allow",
    "Content-Disposition",
    "Content-Encoding",
    "Content-Language",
    "Content-Length",
    "Content-Location",
    "Content-MD5",
    "Content-Range",
    "Content-Type",
    "Expires",
    "Last-Modified",
];

pub const CONTENT_LENGTH: &str = "Content-Length";
pub const HOST: &str = "Host";
pub const CONNECTION: &str = "Connection";

/// Returns `true` if `name` belongs in the entity (content) header bag.
///
/// ```
/// # use uds_http::http::headers::is_entity_header;
/// assert!(is_entity_header("content-type"));
/// assert!(!is_entity_header("Server"));
/// ```
pub fn is_entity_header(name: &str) -> bool {
    ENTITY_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// One header name with all of its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    /// Name as first inserted.
    pub name: String,
    pub values: Vec<String>,
}

impl HeaderEntry {
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Values joined the way they are written on the wire.
    pub fn joined(&self) -> String {
        self.values.join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<HeaderEntry>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// First value stored for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entry(name)
            .and_then(|e| e.values.first())
            .map(|v| v.as_str())
    }

    /// All values stored for `name`, in arrival order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entry(name).map(|e| e.values.as_slice()).unwrap_or(&[])
    }

    /// Comma-joined value for `name`.
    pub fn joined(&self, name: &str) -> Option<String> {
        self.entry(name).map(HeaderEntry::joined)
    }

    /// Adds a value, merging into an existing entry of the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().trim().to_string();
        let value = value.into().trim().to_string();

        match self.entries.iter_mut().find(|e| e.name_matches(&name)) {
            Some(entry) => entry.values.push(value),
            None => self.entries.push(HeaderEntry {
                name,
                values: vec![value],
            }),
        }
    }

    /// Replaces every value for `name` with `value`. The entry keeps its
    /// position and original casing if it already existed.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().trim().to_string();
        let value = value.into().trim().to_string();

        match self.entries.iter_mut().find(|e| e.name_matches(&name)) {
            Some(entry) => entry.values = vec![value],
            None => self.entries.push(HeaderEntry {
                name,
                values: vec![value],
            }),
        }
    }

    /// Removes `name` and returns its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let index = self.entries.iter().position(|e| e.name_matches(name))?;
        Some(self.entries.remove(index).values)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderEntry> {
        self.entries.iter()
    }

    fn entry(&self, name: &str) -> Option<&HeaderEntry> {
        self.entries.iter().find(|e| e.name_matches(name))
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut HeaderEntry> {
        self.entries.iter_mut().find(|e| e.name_matches(name))
    }

    /// Ensures the `Connection` header asks for closure: adds `close` and
    /// drops any `keep-alive` token, leaving other tokens alone.
    pub(crate) fn force_connection_close(&mut self) {
        match self.entry_mut(CONNECTION) {
            Some(entry) => {
                let mut tokens: Vec<String> = entry
                    .values
                    .iter()
                    .flat_map(|v| v.split(','))
                    .map(|t| t.trim())
                    .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("keep-alive"))
                    .map(str::to_string)
                    .collect();

                if !tokens.iter().any(|t| t.eq_ignore_ascii_case("close")) {
                    tokens.push("close".to_string());
                }
                entry.values = tokens;
            }
            None => self.set(CONNECTION, "close"),
        }
    }
}

/// Writes each entry as `Name: v1, v2\r\n`.
impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{}: {}\r\n", entry.name, entry.joined())?;
        }
        Ok(())
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}
