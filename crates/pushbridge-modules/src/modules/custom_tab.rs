// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `ChromeCustomTab` — opens links in the browser's custom tab.

use std::sync::Arc;

use pushbridge_core::error::Result;
use pushbridge_tabs::TabSessionManager;
use serde_json::Value;

use crate::registry::{BridgeModule, arg_str, unknown_method};

pub struct ChromeCustomTabModule {
    tabs: Arc<TabSessionManager>,
}

impl ChromeCustomTabModule {
    pub const NAME: &'static str = "ChromeCustomTab";

    pub fn new(tabs: Arc<TabSessionManager>) -> Self {
        Self { tabs }
    }
}

impl BridgeModule for ChromeCustomTabModule {
    fn name(&self) -> &str {
        Self::NAME
    }

    /// `show(url)` rejects when there is no foreground screen;
    /// `navigate(url)` resolves `false` instead.
    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value> {
        let opened = match method {
            "show" => self.tabs.show(arg_str(args, 0, method)?)?,
            "navigate" => self.tabs.navigate(arg_str(args, 0, method)?)?,
            _ => return Err(unknown_method(Self::NAME, method)),
        };
        Ok(Value::Bool(opened))
    }
}
