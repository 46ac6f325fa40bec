/// Suffix appended to topic-derived fallback filenames.
const FALLBACK_SUFFIX: &str = "_presentation.pptx";

/// Extract the `filename="..."` token from a content-disposition header
/// value. Quotes around the name are optional.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let rest = rest.trim();
    let name = match rest.strip_prefix('"') {
        Some(quoted) => quoted.split('"').next().unwrap_or(""),
        None => rest.split(';').next().unwrap_or(rest).trim(),
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Derive a filename from the topic when the response carries none:
/// every non-alphanumeric character becomes `_`, then the fixed suffix.
pub fn fallback_filename(topic: &str) -> String {
    let sanitized: String = topic
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{sanitized}{FALLBACK_SUFFIX}")
}

/// Header-supplied name when present, topic-derived fallback otherwise.
pub fn derive_filename(disposition: Option<&str>, topic: &str) -> String {
    disposition
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| fallback_filename(topic))
}
