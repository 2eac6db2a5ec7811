//! Unverified decoding of the claims segment of a bearer token.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;

use filehub_entity::session::TokenClaims;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

/// base64url, padded or not.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Standard alphabet, padded or not. Some issuers emit it in the payload.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Decode the claims of `token` without verifying its signature.
///
/// Returns `None` unless the token has exactly three dot-separated segments
/// and the middle one is base64-encoded JSON.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    let bytes = URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
        .ok()?;
    let value: Value = serde_json::from_slice(&bytes).ok()?;

    Some(TokenClaims::from_value(&value))
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
    use serde_json::json;

    use super::*;

    fn token_with(payload: &[u8], engine: &impl Engine) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", engine.encode(payload))
    }

    #[test]
    fn test_decodes_url_safe_payload() {
        let payload = serde_json::to_vec(&json!({ "sub": "ana", "exp": 10, "role": "admin" }))
            .unwrap();
        let claims = decode_claims(&token_with(&payload, &URL_SAFE_NO_PAD)).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("ana"));
        assert_eq!(claims.exp, Some(10.0));
        assert!(claims.is_admin());
    }

    #[test]
    fn test_decodes_padded_standard_payload() {
        let payload = br#"{"exp":1,"note":"???>>>"}"#;
        let encoded = STANDARD.encode(payload);
        assert!(encoded.contains('/') || encoded.contains('+') || encoded.ends_with('='));
        let claims = decode_claims(&token_with(payload, &STANDARD)).unwrap();
        assert_eq!(claims.exp, Some(1.0));
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!(decode_claims("").is_none());
        assert!(decode_claims("only-one-segment").is_none());
        assert!(decode_claims("two.segments").is_none());
        assert!(decode_claims("a.b.c.d").is_none());
        assert!(decode_claims("a.!!!.c").is_none());

        let not_json = URL_SAFE_NO_PAD.encode("plain text");
        assert!(decode_claims(&format!("a.{not_json}.c")).is_none());
    }
}
