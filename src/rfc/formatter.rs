use crate::types::{RawRfcText, RfcDetail, RfcSummary};

/// Formats search hits as a header line followed by one paragraph per RFC.
pub fn format_search_results(query: &str, results: &[RfcSummary]) -> String {
    let entries: Vec<String> = results
        .iter()
        .map(|r| format!("**{}** - {}\n{}", r.name, r.title, r.abstract_text))
        .collect();

    format!(
        "Found {} RFCs matching '{}':\n\n{}",
        results.len(),
        query,
        entries.join("\n\n")
    )
}

/// Formats RFC metadata as a Markdown document.
pub fn format_rfc_detail(detail: &RfcDetail) -> String {
    let authors = if detail.authors.is_empty() {
        "N/A".to_string()
    } else {
        detail.authors.join(", ")
    };

    let mut out = String::new();
    out.push_str(&format!(
        "# {}: {}\n\n",
        detail.name.to_uppercase(),
        detail.title
    ));
    out.push_str("## Metadata\n");
    out.push_str(&format!("- **Authors**: {}\n", authors));
    out.push_str(&format!("- **Pages**: {}\n", detail.pages));
    out.push_str(&format!("- **Stream**: {}\n", detail.stream));
    out.push_str(&format!("- **Group**: {}\n", detail.group));
    out.push_str(&format!(
        "- **Standard Level**: {}\n",
        detail.standard_level()
    ));
    out.push_str(&format!("- **RFC Number**: {}\n\n", detail.rfc));
    out.push_str("## Abstract\n");
    out.push_str(&detail.abstract_text);
    out.push('\n');
    out
}

/// Prefixes the (possibly truncated) body with a header naming the RFC.
pub fn format_rfc_text(text: &RawRfcText) -> String {
    format!("RFC {} Full Text:\n\n{}", text.number, text.body)
}
