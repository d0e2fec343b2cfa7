// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `AndroidToken` — push registration token lookup.

use std::sync::Arc;

use pushbridge_bridge::traits::PushTokenProvider;
use pushbridge_core::error::Result;
use serde_json::Value;

use crate::registry::{BridgeModule, unknown_method};

pub struct AndroidTokenModule {
    tokens: Arc<dyn PushTokenProvider>,
}

impl AndroidTokenModule {
    pub const NAME: &'static str = "AndroidToken";

    pub fn new(tokens: Arc<dyn PushTokenProvider>) -> Self {
        Self { tokens }
    }
}

impl BridgeModule for AndroidTokenModule {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// `GetInstanceId()` resolves to the token, or `null` if none has been
    /// issued yet.
    fn invoke(&self, method: &str, _args: &[Value]) -> Result<Value> {
        match method {
            "GetInstanceId" => Ok(self.tokens.push_token()?.map_or(Value::Null, Value::String)),
            _ => Err(unknown_method(Self::NAME, method)),
        }
    }
}
