use serde::{Deserialize, Serialize};

/// Maximum characters of an abstract shown in a search result.
pub const ABSTRACT_PREVIEW_CHARS: usize = 200;

/// Maximum characters of RFC body text returned by `get_rfc_text`.
pub const MAX_RFC_TEXT_CHARS: usize = 50_000;

/// Marker appended to RFC text cut at `MAX_RFC_TEXT_CHARS`.
pub const TRUNCATION_MARKER: &str = "\n\n[... content truncated for length ...]";

/// A search hit projected from a datatracker document record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RfcSummary {
    pub name: String,
    pub title: String,
    pub rev: String,
    /// Abstract capped by [`preview_abstract`].
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

/// Full metadata for a single RFC document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RfcDetail {
    pub name: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub rev: String,
    pub pages: String,
    pub authors: Vec<String>,
    pub stream: String,
    pub group: String,
    pub std_level: String,
    pub intended_std_level: String,
    /// Canonical RFC number as reported by the registry.
    pub rfc: String,
}

impl RfcDetail {
    /// The standard level to display: `std_level`, or `intended_std_level`
    /// when the former is empty.
    pub fn standard_level(&self) -> &str {
        if self.std_level.is_empty() {
            &self.intended_std_level
        } else {
            &self.std_level
        }
    }
}

/// Body text of an RFC, possibly truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRfcText {
    pub number: u64,
    pub body: String,
    pub truncated: bool,
}

impl RawRfcText {
    /// Wraps a fetched body, applying the `MAX_RFC_TEXT_CHARS` cap.
    pub fn new(number: u64, body: &str) -> Self {
        let (kept, truncated) = truncate_chars(body, MAX_RFC_TEXT_CHARS);
        let body = if truncated {
            format!("{}{}", kept, TRUNCATION_MARKER)
        } else {
            kept.to_string()
        };
        Self {
            number,
            body,
            truncated,
        }
    }
}

/// Normalizes a user-supplied RFC identifier into `rfc<number>` form.
///
/// `"4271"`, `"RFC4271"` and `"rfc4271"` all become `"rfc4271"`. Applying it
/// to its own output is a no-op.
pub fn normalize_rfc_identifier(raw: &str) -> String {
    let all_digits = !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit());
    let prefixed = if all_digits || !raw.to_lowercase().starts_with("rfc") {
        format!("rfc{}", raw)
    } else {
        raw.to_string()
    };
    prefixed.to_lowercase()
}

/// Caps an abstract at `ABSTRACT_PREVIEW_CHARS`, appending `...` only when
/// something was cut.
pub fn preview_abstract(text: &str) -> String {
    match truncate_chars(text, ABSTRACT_PREVIEW_CHARS) {
        (kept, true) => format!("{}...", kept),
        (kept, false) => kept.to_string(),
    }
}

/// Returns the first `max_chars` characters of `s` and whether anything was
/// dropped. Cuts on a character boundary.
pub fn truncate_chars(s: &str, max_chars: usize) -> (&str, bool) {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => (&s[..end], true),
        None => (s, false),
    }
}
