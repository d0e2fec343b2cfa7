// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Secure random bytes from the operating system CSPRNG via `ring`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pushbridge_core::error::{BridgeError, Result};
use ring::rand::{SecureRandom as _, SystemRandom};
use tracing::{debug, instrument};

/// Upper bound on a single request, to keep a bad argument from the
/// JavaScript side from allocating without limit.
pub const MAX_RANDOM_BYTES: usize = 1024 * 1024;

/// Handle on the system random source.
pub struct SecureRandom {
    rng: SystemRandom,
}

impl Default for SecureRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureRandom {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    /// Fill a fresh buffer of `size` random bytes.
    #[instrument(skip(self))]
    pub fn bytes(&self, size: usize) -> Result<Vec<u8>> {
        if size > MAX_RANDOM_BYTES {
            return Err(BridgeError::InvalidArgument(format!(
                "requested {size} random bytes, limit is {MAX_RANDOM_BYTES}"
            )));
        }
        let mut buf = vec![0u8; size];
        self.rng
            .fill(&mut buf)
            .map_err(|_| BridgeError::Bridge("system random source failed".into()))?;
        debug!("random bytes generated");
        Ok(buf)
    }

    /// `size` random bytes, base64 encoded (standard alphabet, padded).
    pub fn base64(&self, size: usize) -> Result<String> {
        Ok(STANDARD.encode(self.bytes(size)?))
    }
}

/// One-shot helper around [`SecureRandom::base64`].
pub fn random_base64(size: usize) -> Result<String> {
    SecureRandom::new().base64(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_requested_length() {
        let rng = SecureRandom::new();
        assert_eq!(rng.bytes(0).expect("empty").len(), 0);
        assert_eq!(rng.bytes(32).expect("32 bytes").len(), 32);
    }

    #[test]
    fn base64_decodes_to_requested_length() {
        let encoded = random_base64(4096).expect("seed");
        let decoded = STANDARD.decode(&encoded).expect("valid base64");
        assert_eq!(decoded.len(), 4096);
        assert!(!encoded.contains('\n'), "output must not be line wrapped");
    }

    #[test]
    fn consecutive_draws_differ() {
        let rng = SecureRandom::new();
        let a = rng.bytes(32).expect("a");
        let b = rng.bytes(32).expect("b");
        assert_ne!(a, b, "two 256-bit draws colliding means the RNG is broken");
    }

    #[test]
    fn oversized_request_is_rejected() {
        assert!(matches!(
            SecureRandom::new().bytes(MAX_RANDOM_BYTES + 1),
            Err(BridgeError::InvalidArgument(_))
        ));
    }
}
