use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// The media type that response bodies are resolved for.
pub const APPLICATION_JSON: &str = "application/json";

/// A media type object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// Whether a media type carries raw bytes rather than a JSON document.
pub fn is_binary_media_type(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/octet-stream"
        || essence == "application/pdf"
        || essence == "application/zip"
        || essence.starts_with("image/")
        || essence.starts_with("audio/")
        || essence.starts_with("video/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_media_types() {
        assert!(is_binary_media_type("application/octet-stream"));
        assert!(is_binary_media_type("image/png"));
        assert!(is_binary_media_type("Application/PDF; charset=binary"));
        assert!(!is_binary_media_type(APPLICATION_JSON));
        assert!(!is_binary_media_type("text/plain"));
    }
}
