//! Slack request signing (`v0` scheme)
//!
//! Signature is `v0=` + hex(HMAC-SHA256(secret, "v0:{timestamp}:{body}")).
//! See https://api.slack.com/authentication/verifying-requests-from-slack

use axum::http::{HeaderMap, StatusCode};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// Requests further than this from the local clock are rejected as replays
pub const MAX_CLOCK_SKEW_SECS: u64 = 300;

const VERSION: &str = "v0";

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("missing header {0}")]
    MissingHeader(&'static str),

    #[error("malformed header {header}: {reason}")]
    Malformed {
        header: &'static str,
        reason: String,
    },

    #[error("stale timestamp {timestamp}")]
    Expired { timestamp: i64 },

    #[error("signature mismatch")]
    Mismatch,

    /// HMAC accepts keys of any length, so this cannot fire in practice
    #[error("invalid signing key")]
    Key,
}

impl SignatureError {
    pub fn status(&self) -> StatusCode {
        match self {
            SignatureError::MissingHeader(_) | SignatureError::Malformed { .. } => {
                StatusCode::BAD_REQUEST
            }
            SignatureError::Expired { .. } | SignatureError::Mismatch => StatusCode::UNAUTHORIZED,
            SignatureError::Key => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Verifies inbound requests against the app's signing secret
pub struct SignatureVerifier {
    secret: String,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), SignatureError> {
        self.verify_at(headers, body, chrono::Utc::now().timestamp())
    }

    /// Verify as if the current unix time were `now`
    pub fn verify_at(
        &self,
        headers: &HeaderMap,
        body: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        let raw_timestamp = header(headers, TIMESTAMP_HEADER)?;
        let timestamp: i64 = raw_timestamp.trim().parse().map_err(|_| SignatureError::Malformed {
            header: TIMESTAMP_HEADER,
            reason: format!("not a unix timestamp: {:?}", raw_timestamp),
        })?;

        let signature = header(headers, SIGNATURE_HEADER)?;
        let digest_hex = signature
            .strip_prefix(VERSION)
            .and_then(|s| s.strip_prefix('='))
            .ok_or_else(|| SignatureError::Malformed {
                header: SIGNATURE_HEADER,
                reason: format!("expected {}= prefix", VERSION),
            })?;
        let digest = hex::decode(digest_hex).map_err(|e| SignatureError::Malformed {
            header: SIGNATURE_HEADER,
            reason: e.to_string(),
        })?;

        if now.abs_diff(timestamp) > MAX_CLOCK_SKEW_SECS {
            return Err(SignatureError::Expired { timestamp });
        }

        self.mac(raw_timestamp, body)?
            .verify_slice(&digest)
            .map_err(|_| SignatureError::Mismatch)
    }

    /// The `X-Slack-Signature` value for a body sent at `timestamp`
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> Result<String, SignatureError> {
        let digest = self.mac(timestamp, body)?.finalize().into_bytes();
        Ok(format!("{}={}", VERSION, hex::encode(digest)))
    }

    fn mac(&self, timestamp: &str, body: &[u8]) -> Result<HmacSha256, SignatureError> {
        let mut mac =
            HmacSha256::new_from_slice(self.secret.as_bytes()).map_err(|_| SignatureError::Key)?;
        mac.update(VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        Ok(mac)
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, SignatureError> {
    headers
        .get(name)
        .ok_or(SignatureError::MissingHeader(name))?
        .to_str()
        .map_err(|e| SignatureError::Malformed {
            header: name,
            reason: e.to_string(),
        })
}
