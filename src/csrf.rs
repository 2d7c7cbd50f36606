//! Signed, time-limited form tokens.
//!
//! A token is `"<issued_unix>.<nonce>.<signature>"`, where the signature is
//! the hex HMAC-SHA256 of `"<issued_unix>.<nonce>"` under the server's
//! secret key. Tokens are stateless: any token signed with the current key
//! and younger than the time limit is accepted.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use uuid::Uuid;

use crate::config::SecretKey;

type HmacSha256 = Hmac<Sha256>;

/// Allowed clock skew for tokens stamped slightly in the future.
const MAX_FUTURE_SKEW_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsrfError {
    Missing,
    Malformed,
    BadSignature,
    Expired,
}

impl CsrfError {
    /// The message shown on the form.
    pub fn message(self) -> &'static str {
        match self {
            CsrfError::Missing => "The CSRF token is missing.",
            CsrfError::Expired => "The CSRF token has expired.",
            CsrfError::Malformed | CsrfError::BadSignature => "The CSRF token is invalid.",
        }
    }
}

impl fmt::Display for CsrfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for CsrfError {}

#[derive(Debug, Clone)]
pub struct CsrfTokens {
    secret: SecretKey,
    time_limit_secs: i64,
}

impl CsrfTokens {
    pub fn new(secret: SecretKey, time_limit_secs: u64) -> Self {
        Self {
            secret,
            time_limit_secs: i64::try_from(time_limit_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn issue(&self) -> String {
        self.issue_at(Utc::now())
    }

    pub fn verify(&self, token: &str) -> Result<(), CsrfError> {
        self.verify_at(token, Utc::now())
    }

    fn issue_at(&self, now: DateTime<Utc>) -> String {
        let payload = format!("{}.{}", now.timestamp(), Uuid::new_v4().simple());
        let signature = hex::encode(self.mac(&payload).finalize().into_bytes());
        format!("{}.{}", payload, signature)
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<(), CsrfError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CsrfError::Missing);
        }

        let (payload, signature) = token.rsplit_once('.').ok_or(CsrfError::Malformed)?;
        let (issued, nonce) = payload.split_once('.').ok_or(CsrfError::Malformed)?;
        let issued: i64 = issued.parse().map_err(|_| CsrfError::Malformed)?;
        if nonce.is_empty() {
            return Err(CsrfError::Malformed);
        }
        let signature = hex::decode(signature).map_err(|_| CsrfError::Malformed)?;

        self.mac(payload)
            .verify_slice(&signature)
            .map_err(|_| CsrfError::BadSignature)?;

        let age = now.timestamp().saturating_sub(issued);
        if age > self.time_limit_secs || age < -MAX_FUTURE_SKEW_SECS {
            return Err(CsrfError::Expired);
        }

        Ok(())
    }

    fn mac(&self, payload: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        mac
    }
}
