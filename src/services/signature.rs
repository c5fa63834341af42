// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! WHOOP webhook signature verification.
//!
//! Every webhook request carries `x-whoop-signature` (base64 HMAC-SHA256)
//! and `x-whoop-signature-timestamp` headers. The signed material is the
//! timestamp concatenated with the raw request body, keyed by the WHOOP
//! client secret.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Validates that webhook payloads were signed with the WHOOP client secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    client_secret: String,
}

impl SignatureVerifier {
    /// Create a new verifier keyed by the integration's client secret.
    pub fn new(client_secret: String) -> Self {
        Self { client_secret }
    }

    /// Check `signature` against HMAC-SHA256(secret, timestamp || body),
    /// base64-encoded.
    ///
    /// A mismatch is `false`, never an error. The comparison is
    /// constant-time to avoid leaking the expected digest through timing.
    pub fn verify(&self, signature: &str, timestamp: &str, body: &[u8]) -> bool {
        // HMAC accepts keys of any length, so this cannot fail.
        let mut mac = HmacSha256::new_from_slice(self.client_secret.as_bytes())
            .expect("HMAC key of any length");
        mac.update(timestamp.as_bytes());
        mac.update(body);

        let expected = BASE64.encode(mac.finalize().into_bytes());
        expected.as_bytes().ct_eq(signature.as_bytes()).into()
    }
}
