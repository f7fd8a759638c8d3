//! MIME type detection and display utilities.

/// Fallback when neither content nor extension identify the file.
const OCTET_STREAM: &str = "application/octet-stream";

/// Detect the MIME type of a file.
///
/// Magic bytes win over the file extension; the extension is only consulted
/// when the content is not recognized (plain text has no signature).
pub fn detect_mime(name: &str, content: &[u8]) -> String {
    if let Some(kind) = infer::get(content) {
        return kind.mime_type().to_string();
    }
    mime_guess::from_path(name)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

/// Get an icon string for a MIME type.
pub fn mime_icon(mime: &str) -> &'static str {
    match mime {
        "application/pdf" => "[pdf]",
        m if m.starts_with("image/") => "[img]",
        m if m.contains("word") => "[doc]",
        "text/html" => "[htm]",
        "text/plain" => "[txt]",
        _ => "[---]",
    }
}
