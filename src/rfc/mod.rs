//! RFC lookups against the IETF datatracker and the RFC Editor.
//!
//! Each operation performs exactly one outbound GET and returns either a
//! typed payload or a [`FetchError`]. Turning errors into text is the
//! dispatcher's job, not this module's.

/// Text rendering for RFC payloads.
pub mod formatter;

use std::sync::Arc;

use serde_json::Value;

use crate::errors::FetchError;
use crate::fetch::{FetchRequest, HttpFetcher};
use crate::types::{preview_abstract, RawRfcText, RfcDetail, RfcSummary};

pub use formatter::{format_rfc_detail, format_rfc_text, format_search_results};

/// Base URL of the datatracker REST API.
pub const DATATRACKER_API_BASE: &str = "https://datatracker.ietf.org/api/v1";

/// Base URL for plain-text RFC bodies.
pub const RFC_EDITOR_BASE: &str = "https://www.rfc-editor.org/rfc";

/// URL of the document search endpoint.
pub fn search_url() -> String {
    format!("{}/doc/document/", DATATRACKER_API_BASE)
}

/// URL of the detail endpoint for an already-normalized document name.
pub fn document_url(name: &str) -> String {
    format!("{}/doc/document/{}/", DATATRACKER_API_BASE, name)
}

/// URL of the plain-text body of RFC `number`.
pub fn rfc_text_url(number: u64) -> String {
    format!("{}/rfc{}.txt", RFC_EDITOR_BASE, number)
}

/// Issues RFC lookups through an [`HttpFetcher`].
#[derive(Clone)]
pub struct RfcClient {
    fetcher: Arc<dyn HttpFetcher>,
}

impl RfcClient {
    /// Creates a client that sends every request through `fetcher`.
    pub fn new(fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { fetcher }
    }

    /// Searches RFCs whose name contains `query` (case-insensitive).
    pub async fn search(&self, query: &str, limit: u64) -> Result<Vec<RfcSummary>, FetchError> {
        let request = FetchRequest::get(search_url())
            .param("limit", limit)
            .param("name__icontains", query)
            .param("type", "rfc");
        let data = parse_json(&request.url, &self.fetch(request.clone()).await?)?;

        // No `objects` member means no hits; anything but a list is malformed.
        match data.get("objects") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(objects)) => Ok(objects.iter().map(summary_from_record).collect()),
            Some(_) => Err(FetchError::Parse {
                url: request.url,
                message: "'objects' is not a list".to_string(),
            }),
        }
    }

    /// Fetches metadata for a normalized document name such as `rfc7540`.
    pub async fn get_rfc(&self, name: &str) -> Result<RfcDetail, FetchError> {
        let request = FetchRequest::get(document_url(name));
        let data = parse_json(&request.url, &self.fetch(request.clone()).await?)?;
        if !data.is_object() {
            return Err(FetchError::Parse {
                url: request.url,
                message: "expected a JSON object".to_string(),
            });
        }
        Ok(detail_from_record(&data))
    }

    /// Fetches the plain-text body of RFC `number`.
    pub async fn get_rfc_text(&self, number: u64) -> Result<RawRfcText, FetchError> {
        let body = self.fetch(FetchRequest::get(rfc_text_url(number))).await?;
        Ok(RawRfcText::new(number, &body))
    }

    /// Runs the blocking fetch off the async executor.
    async fn fetch(&self, request: FetchRequest) -> Result<String, FetchError> {
        let fetcher = Arc::clone(&self.fetcher);
        let url = request.url.clone();
        tracing::debug!(url = %url, "outbound GET");
        match tokio::task::spawn_blocking(move || fetcher.get(&request)).await {
            Ok(result) => result,
            Err(e) => Err(FetchError::Network {
                url,
                message: format!("fetch task failed: {}", e),
            }),
        }
    }
}

fn parse_json(url: &str, body: &str) -> Result<Value, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn summary_from_record(doc: &Value) -> RfcSummary {
    RfcSummary {
        name: text_field(doc, "name"),
        title: text_field(doc, "title"),
        rev: text_field(doc, "rev"),
        abstract_text: preview_abstract(&text_field(doc, "abstract")),
    }
}

fn detail_from_record(doc: &Value) -> RfcDetail {
    let authors = doc
        .get("authors")
        .and_then(|v| v.as_array())
        .map(|list| {
            list.iter()
                .map(|author| match author {
                    Value::Object(_) => text_field(author, "person"),
                    other => scalar_text(other),
                })
                .collect()
        })
        .unwrap_or_default();

    let mut rfc = text_field(doc, "rfc");
    if rfc.is_empty() {
        rfc = text_field(doc, "rfc_number");
    }

    RfcDetail {
        name: text_field(doc, "name"),
        title: text_field(doc, "title"),
        abstract_text: text_field(doc, "abstract"),
        rev: text_field(doc, "rev"),
        pages: text_field(doc, "pages"),
        authors,
        stream: text_field(doc, "stream"),
        group: text_field(doc, "group"),
        std_level: text_field(doc, "std_level"),
        intended_std_level: text_field(doc, "intended_std_level"),
        rfc,
    }
}

/// Reads `key` from a JSON object as display text; absent or null is empty.
fn text_field(doc: &Value, key: &str) -> String {
    doc.get(key).map(scalar_text).unwrap_or_default()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
