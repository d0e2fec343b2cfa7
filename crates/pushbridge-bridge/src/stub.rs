// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// Fallible calls return `PlatformUnavailable`; probes report "absent" so the
// tab manager degrades the same way it does on a phone without a browser.

use std::sync::Arc;

use pushbridge_core::error::{BridgeError, Result};
use pushbridge_core::types::NotificationRequest;

use crate::traits::*;

/// No-op bridge returned on non-mobile platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl KeyValueStore for StubBridge {
    fn get(&self, _namespace: &str, _key: &str) -> Result<Option<String>> {
        tracing::warn!("KeyValueStore::get called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }

    fn set(&self, _namespace: &str, _key: &str, _value: &str) -> Result<()> {
        tracing::warn!("KeyValueStore::set called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }
}

impl NotificationPresenter for StubBridge {
    fn notify(&self, _request: &NotificationRequest) -> Result<()> {
        tracing::warn!("NotificationPresenter::notify called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }

    fn cancel(&self, _id: i32) -> Result<()> {
        Err(BridgeError::PlatformUnavailable)
    }
}

impl BrowserService for StubBridge {
    fn bind_tab_service(
        &self,
        package: &str,
        _connection: Arc<dyn TabServiceConnection>,
    ) -> Result<bool> {
        tracing::debug!(package, "no tab service on stub bridge");
        Ok(false)
    }

    fn resolve_tab_service(&self, _action: &str, _package: &str) -> bool {
        false
    }
}

impl ActivityProvider for StubBridge {
    fn current_activity(&self) -> Option<Arc<dyn Activity>> {
        None
    }
}

impl PushTokenProvider for StubBridge {
    fn push_token(&self) -> Result<Option<String>> {
        tracing::warn!("PushTokenProvider::push_token called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverCalled;

    impl TabServiceConnection for NeverCalled {
        fn on_service_connected(&self, _client: Arc<dyn TabClient>) {
            panic!("stub must never connect");
        }

        fn on_service_disconnected(&self) {}
    }

    #[test]
    fn stub_reports_no_browser_and_no_activity() {
        let bridge = crate::platform_bridge();
        assert_eq!(bridge.platform_name(), "Desktop (stub)");
        assert!(!bridge.resolve_tab_service("any", "com.android.chrome"));
        assert!(bridge.current_activity().is_none());
        let bound = bridge
            .bind_tab_service("com.android.chrome", Arc::new(NeverCalled))
            .expect("bind");
        assert!(!bound);
    }

    #[test]
    fn stub_storage_is_unavailable() {
        assert!(matches!(
            StubBridge.get("Notifications", "current"),
            Err(BridgeError::PlatformUnavailable)
        ));
        assert!(matches!(
            StubBridge.push_token(),
            Err(BridgeError::PlatformUnavailable)
        ));
    }
}
