//! Decoder module: reverse the Flask session-cookie encoding
//!
//! Tokens are the payload part of a Flask session cookie: URL-safe
//! base64, zlib-compressed when the original cookie started with `.`,
//! JSON underneath. The signature is not present in the export and is
//! not checked.

use std::io::Read;

use anyhow::{Context, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use flate2::read::ZlibDecoder;
use serde_json::Value;

/// URL-safe base64, tolerant of missing padding. Flask strips trailing
/// `=` from cookie payloads, but exported dumps sometimes carry the
/// padded form; accept both.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode one session token into its JSON document.
///
/// Outcomes are deliberately split three ways:
/// - `Ok(Some(value))`: the token decoded to a JSON document
/// - `Ok(None)`: no session data (empty token, or the payload is not
///   valid JSON) - an expected, silent outcome
/// - `Err(_)`: the token is not valid base64; the export itself is
///   suspect and the caller stops the run
///
/// Zlib inflation is attempted and silently skipped when the bytes are
/// not compressed; uncompressed cookies are a normal case.
pub fn decode_session(token: &str) -> Result<Option<Value>> {
    if token.is_empty() {
        return Ok(None);
    }

    let decoded = TOKEN_ENGINE
        .decode(token)
        .context("session token is not valid URL-safe base64")?;

    let payload = match inflate(&decoded) {
        Ok(bytes) => bytes,
        // Not zlib data: the cookie was written uncompressed.
        Err(_) => decoded,
    };

    Ok(serde_json::from_slice(&payload).ok())
}

fn inflate(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(bytes).read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use serde_json::json;
    use std::io::Write;

    /// Forward pipeline: JSON-encode, optionally compress, base64-encode.
    fn encode_token(value: &Value, compress: bool) -> String {
        let json = serde_json::to_vec(value).unwrap();
        let payload = if compress {
            let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
            enc.write_all(&json).unwrap();
            enc.finish().unwrap()
        } else {
            json
        };
        TOKEN_ENGINE.encode(payload)
    }

    #[test]
    fn test_decode_uncompressed_roundtrip() {
        let doc = json!({"locks": ["a", "b"], "user": "alice"});
        let token = encode_token(&doc, false);

        let decoded = decode_session(&token).unwrap();
        assert_eq!(decoded, Some(doc));
    }

    #[test]
    fn test_decode_compressed_roundtrip() {
        let doc = json!({"locks": {"resource": 42}, "other": 1});
        let token = encode_token(&doc, true);

        let decoded = decode_session(&token).unwrap();
        assert_eq!(decoded, Some(doc));
    }

    #[test]
    fn test_decode_accepts_unpadded_token() {
        let doc = json!({"k": "v"});
        let token = encode_token(&doc, false);
        let unpadded = token.trim_end_matches('=');

        let decoded = decode_session(unpadded).unwrap();
        assert_eq!(decoded, Some(doc));
    }

    #[test]
    fn test_empty_token_is_absent() {
        assert_eq!(decode_session("").unwrap(), None);
    }

    #[test]
    fn test_garbage_payload_is_absent_not_error() {
        // Valid base64, but the bytes are neither zlib nor JSON.
        let token = TOKEN_ENGINE.encode(b"not json at all");
        assert_eq!(decode_session(&token).unwrap(), None);
    }

    #[test]
    fn test_invalid_base64_is_fatal() {
        assert!(decode_session("!!!not-base64!!!").is_err());
    }
}
