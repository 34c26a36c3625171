//! `data:` URL encoding and decoding for image payloads.

use base64::Engine;

/// Encode PNG bytes as a `data:image/png;base64,` URL.
pub fn encode_png(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

/// Decode a base64 `data:` URL into its MIME type and payload bytes.
/// Returns `None` for anything that is not a well-formed base64 data URL.
pub fn decode(url: &str) -> Option<(String, Vec<u8>)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;
    Some((mime.to_string(), bytes))
}
