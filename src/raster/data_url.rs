/// Data URL parsing and building
///
/// Uploads travel through the pipeline as `data:[<mediatype>][;base64],<data>`
/// strings, the same shape a browser file reader produces.

use base64::{engine::general_purpose, Engine as _};

use crate::error::DecodeError;

/// Decode the payload of a data URL into raw bytes
///
/// Non-base64 payloads are taken as literal bytes.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, DecodeError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| DecodeError::Load("not a data URL".to_string()))?;

    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| DecodeError::Load("data URL has no payload".to_string()))?;

    if meta.split(';').any(|part| part == "base64") {
        general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| DecodeError::Load(format!("base64 decode error: {e}")))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

/// Media type declared by a data URL, if any
pub fn media_type(url: &str) -> Option<&str> {
    url.trim()
        .strip_prefix("data:")?
        .split([';', ','])
        .next()
        .filter(|s| !s.is_empty())
}

/// Build a base64 data URL for the given bytes
pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_payload() {
        let url = encode_data_url(b"\x89PNG", "image/png");
        assert!(url.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_url(&url).unwrap(), b"\x89PNG");
        assert_eq!(media_type(&url), Some("image/png"));
    }

    #[test]
    fn test_plain_payload() {
        assert_eq!(decode_data_url("data:,hello").unwrap(), b"hello");
        assert_eq!(media_type("data:,hello"), None);
    }

    #[test]
    fn test_rejects_malformed_urls() {
        assert!(matches!(decode_data_url("https://example.com/ecg.png"), Err(DecodeError::Load(_))));
        assert!(matches!(decode_data_url("data:image/png;base64"), Err(DecodeError::Load(_))));
        assert!(matches!(decode_data_url("data:image/png;base64,@@@"), Err(DecodeError::Load(_))));
    }
}
