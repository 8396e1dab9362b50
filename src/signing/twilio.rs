//! Twilio request signature (X-Twilio-Signature).
//!
//! The signed data is the full URL followed by every body parameter as `key ++ value`,
//! keys sorted, each key's distinct values sorted. The MAC is HMAC-SHA1 keyed with the
//! account auth token, encoded as padded standard base64.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac as _};
use sha1::Sha1;

use crate::error::{AgentError, Result};
use crate::signing::{RequestSigner, SignedParams};

type HmacSha1 = Hmac<Sha1>;

/// Signer matching the Twilio webhook/MCP signature scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwilioSigner;

impl TwilioSigner {
    pub fn new() -> Self {
        Self
    }

    /// Build the exact string that gets MAC'd.
    pub fn canonical_data(url: &str, params: &SignedParams) -> String {
        let mut data = String::from(url);
        for (key, values) in params {
            let mut values: Vec<&str> = values.iter().map(String::as_str).collect();
            values.sort_unstable();
            values.dedup();
            for value in values {
                data.push_str(key);
                data.push_str(value);
            }
        }
        data
    }

    fn mac(key: &str, data: &str) -> Result<HmacSha1> {
        if key.is_empty() {
            return Err(AgentError::Signing("signing key is empty".to_string()));
        }
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|_| AgentError::Signing("invalid HMAC key".to_string()))?;
        mac.update(data.as_bytes());
        Ok(mac)
    }
}

impl RequestSigner for TwilioSigner {
    fn sign(&self, key: &str, url: &str, params: &SignedParams) -> Result<String> {
        let data = Self::canonical_data(url, params);
        let mac = Self::mac(key, &data)?;
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    fn verify(&self, key: &str, url: &str, params: &SignedParams, signature: &str) -> bool {
        let Ok(got) = STANDARD.decode(signature) else {
            return false;
        };
        let data = Self::canonical_data(url, params);
        match Self::mac(key, &data) {
            Ok(mac) => mac.verify_slice(&got).is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::no_params;

    const TOKEN: &str = "12345";
    const WEBHOOK_URL: &str = "https://mycompany.com/myapp.php?foo=1&bar=2";

    fn webhook_params() -> SignedParams {
        let mut params = SignedParams::new();
        for (k, v) in [
            ("CallSid", "CA1234567890ABCDE"),
            ("Caller", "+14158675309"),
            ("Digits", "1234"),
            ("From", "+14158675309"),
            ("To", "+18005551212"),
        ] {
            params.insert(k.to_string(), vec![v.to_string()]);
        }
        params
    }

    #[test]
    fn test_known_webhook_vector() {
        let sig = TwilioSigner.sign(TOKEN, WEBHOOK_URL, &webhook_params()).unwrap();
        assert_eq!(sig, "RSOYDt4T1cUTdK1PDd93/VVr8B8=");
    }

    #[test]
    fn test_known_endpoint_vectors() {
        let a = TwilioSigner
            .sign(
                "secret-token",
                "https://mcp.example.com/mcp?services=Voice&services=Verify",
                &no_params(),
            )
            .unwrap();
        let b = TwilioSigner
            .sign(
                "secret-token",
                "https://mcp.example.com/mcp?services=Verify&services=Voice",
                &no_params(),
            )
            .unwrap();
        assert_eq!(a, "X1DVfVEDyzPGUKRttQSpcisbJcA=");
        assert_eq!(b, "2W8yj8ZlMG8gS8EhJfoxkPMZ2w0=");
    }

    #[test]
    fn test_canonical_data_sorts_keys() {
        let mut params = SignedParams::new();
        params.insert("b".to_string(), vec!["2".to_string()]);
        params.insert("a".to_string(), vec!["1".to_string()]);
        assert_eq!(TwilioSigner::canonical_data("u", &params), "ua1b2");
    }

    #[test]
    fn test_canonical_data_sorts_and_dedups_values() {
        let mut params = SignedParams::new();
        params.insert(
            "k".to_string(),
            vec!["z".to_string(), "a".to_string(), "z".to_string()],
        );
        assert_eq!(TwilioSigner::canonical_data("u", &params), "ukakz");
    }

    #[test]
    fn test_empty_params_signs_url_only() {
        assert_eq!(TwilioSigner::canonical_data(WEBHOOK_URL, &no_params()), WEBHOOK_URL);
    }

    #[test]
    fn test_deterministic() {
        let a = TwilioSigner.sign(TOKEN, WEBHOOK_URL, &no_params()).unwrap();
        let b = TwilioSigner.sign(TOKEN, WEBHOOK_URL, &no_params()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_character_perturbations_change_signature() {
        let base = TwilioSigner.sign(TOKEN, WEBHOOK_URL, &no_params()).unwrap();

        let key_changed = TwilioSigner.sign("12346", WEBHOOK_URL, &no_params()).unwrap();
        assert_ne!(base, key_changed);

        let url_changed = TwilioSigner
            .sign(TOKEN, "https://mycompany.com/myapp.php?foo=1&bar=3", &no_params())
            .unwrap();
        assert_ne!(base, url_changed);
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = TwilioSigner.sign("", WEBHOOK_URL, &no_params()).unwrap_err();
        assert!(matches!(err, AgentError::Signing(_)));
    }

    #[test]
    fn test_verify_uses_mac_comparison() {
        let params = webhook_params();
        assert!(TwilioSigner.verify(TOKEN, WEBHOOK_URL, &params, "RSOYDt4T1cUTdK1PDd93/VVr8B8="));
        assert!(!TwilioSigner.verify(TOKEN, WEBHOOK_URL, &params, "RSOYDt4T1cUTdK1PDd93/VVr8B8A"));
        assert!(!TwilioSigner.verify(TOKEN, WEBHOOK_URL, &params, "not base64!"));
        assert!(!TwilioSigner.verify("", WEBHOOK_URL, &params, "RSOYDt4T1cUTdK1PDd93/VVr8B8="));
    }
}
