//! Request signing - keyed signatures over endpoint URLs
//!
//! This module provides:
//! - RequestSigner trait so the keyed-hash scheme can be swapped or checked against vectors
//! - TwilioSigner, the HMAC-SHA1 canonicalization the Twilio MCP server verifies
//! - Inbound validation helpers (port variants, bodySHA256)

pub mod twilio;
pub mod validation;

use std::collections::BTreeMap;

use crate::error::Result;

pub use twilio::TwilioSigner;
pub use validation::{body_sha256, validate_request, validate_request_with_body};

/// POST-body parameters folded into a signature, keyed by name.
///
/// A key may repeat, so each maps to every value it was sent with. Keys iterate in sorted order.
pub type SignedParams = BTreeMap<String, Vec<String>>;

/// Computes a keyed signature over a URL and its body parameters.
pub trait RequestSigner: Send + Sync {
    /// Sign `url` together with `params` using `key`.
    fn sign(&self, key: &str, url: &str, params: &SignedParams) -> Result<String>;

    /// Check `signature` against the expected value in constant time.
    fn verify(&self, key: &str, url: &str, params: &SignedParams, signature: &str) -> bool {
        match self.sign(key, url, params) {
            Ok(expected) => constant_time_eq(expected.as_bytes(), signature.as_bytes()),
            Err(_) => false,
        }
    }
}

/// Shorthand for the empty parameter set used when only the URL is signed.
pub fn no_params() -> SignedParams {
    SignedParams::new()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
