// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `RNRandomBytes` — secure random bytes for the JavaScript crypto polyfill.

use pushbridge_core::error::Result;
use pushbridge_security::SecureRandom;
use serde_json::{Map, Value};

use crate::registry::{BridgeModule, arg_usize, unknown_method};

pub struct RandomBytesModule {
    rng: SecureRandom,
    seed_len: usize,
}

impl RandomBytesModule {
    pub const NAME: &'static str = "RNRandomBytes";

    pub fn new(seed_len: usize) -> Self {
        Self {
            rng: SecureRandom::new(),
            seed_len,
        }
    }
}

impl BridgeModule for RandomBytesModule {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// `seed`: base64 of `seed_len` random bytes, read once by the polyfill.
    fn constants(&self) -> Result<Map<String, Value>> {
        let mut constants = Map::new();
        constants.insert("seed".into(), Value::String(self.rng.base64(self.seed_len)?));
        Ok(constants)
    }

    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value> {
        match method {
            "randomBytes" => {
                let size = arg_usize(args, 0, method)?;
                Ok(Value::String(self.rng.base64(size)?))
            }
            _ => Err(unknown_method(Self::NAME, method)),
        }
    }
}
