//! Validation of inbound signed requests.
//!
//! Proxies commonly add or strip the default port before a request reaches the server, so a
//! signature is accepted if it matches the URL as given or either port variant of it.

use sha2::{Digest, Sha256};
use url::{Position, Url};

use crate::signing::{RequestSigner, SignedParams, no_params};

/// Query parameter carrying the hex SHA-256 of a JSON request body.
pub const BODY_SHA256_PARAM: &str = "bodySHA256";

/// Check `signature` for a form-encoded request.
pub fn validate_request(
    signer: &dyn RequestSigner,
    key: &str,
    signature: &str,
    url: &str,
    params: &SignedParams,
) -> bool {
    url_variants(url)
        .iter()
        .any(|candidate| signer.verify(key, candidate, params, signature))
}

/// Check `signature` for a request whose raw body is hashed into the URL's `bodySHA256`.
pub fn validate_request_with_body(
    signer: &dyn RequestSigner,
    key: &str,
    signature: &str,
    url: &str,
    body: &str,
) -> bool {
    let Some(expected_hash) = query_param(url, BODY_SHA256_PARAM) else {
        log::debug!("URL has no {} parameter", BODY_SHA256_PARAM);
        return false;
    };

    validate_request(signer, key, signature, url, &no_params()) && body_sha256(body) == expected_hash
}

/// Lowercase hex SHA-256 of a request body.
pub fn body_sha256(body: &str) -> String {
    hex::encode(Sha256::digest(body.as_bytes()))
}

/// The URL itself plus the versions with the default port removed and added.
fn url_variants(url: &str) -> Vec<String> {
    let mut variants = vec![url.to_string()];
    if let Some((without, with)) = port_variants(url) {
        for candidate in [without, with] {
            if !variants.contains(&candidate) {
                variants.push(candidate);
            }
        }
    }
    variants
}

fn port_variants(url: &str) -> Option<(String, String)> {
    let mut parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let port = parsed.port_or_known_default()?;
    parsed.set_port(None).ok()?;

    // Url drops a default port on serialization, so the explicit form is spliced in
    let with_port = format!("{}:{}{}", &parsed[..Position::AfterHost], port, &parsed[Position::BeforePath..]);
    Some((parsed.to_string(), with_port))
}

fn query_param(url: &str, name: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
