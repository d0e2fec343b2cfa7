// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the native collaborators the
// bridge modules consume.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use pushbridge_core::error::Result;
use pushbridge_core::types::NotificationRequest;

/// Unified bridge that groups all native collaborators.
pub trait PlatformBridge:
    KeyValueStore + NotificationPresenter + BrowserService + ActivityProvider + PushTokenProvider
{
    /// Human-readable platform name (e.g. "Android").
    fn platform_name(&self) -> &str;
}

/// Small persistent string store scoped by namespace.
///
/// `set` must be durable when it returns: a value written before the process
/// dies is visible to the next process.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if it was never written.
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, namespace: &str, key: &str, value: &str) -> Result<()>;
}

/// Raises, updates and cancels system notifications.
pub trait NotificationPresenter: Send + Sync {
    /// Raise the notification, replacing any shown under the same id.
    fn notify(&self, request: &NotificationRequest) -> Result<()>;

    /// Remove the notification with the given id. Unknown ids are ignored.
    fn cancel(&self, id: i32) -> Result<()>;
}

/// Opaque browser session. Repeated launches through the same session
/// share warm browser state.
pub trait TabSession: Send + Sync + Debug {
    /// Lets a platform backend recover its own concrete session type.
    fn as_any(&self) -> &dyn Any;
}

/// Client handle obtained from a bound tab service.
pub trait TabClient: Send + Sync {
    /// Create a new session. `None` if the browser refused.
    fn new_session(&self) -> Option<Arc<dyn TabSession>>;
}

/// Callback side of a tab-service binding.
///
/// The platform calls these from whatever thread delivers the bind result.
pub trait TabServiceConnection: Send + Sync {
    fn on_service_connected(&self, client: Arc<dyn TabClient>);

    fn on_service_disconnected(&self);
}

/// Access to the system browser's tab service.
pub trait BrowserService: Send + Sync {
    /// Start binding to the tab service of `package`.
    ///
    /// Returns `Ok(true)` when the bind request was accepted. Completion is
    /// reported later (or never) through `connection`.
    fn bind_tab_service(
        &self,
        package: &str,
        connection: Arc<dyn TabServiceConnection>,
    ) -> Result<bool>;

    /// Whether a service answering `action` in `package` is installed.
    fn resolve_tab_service(&self, action: &str, package: &str) -> bool;
}

/// Everything needed to open one URL in a browser tab.
#[derive(Debug, Clone)]
pub struct TabLaunch {
    /// Absolute, already validated URL.
    pub url: String,
    /// Browser package the launch is pinned to.
    pub package: String,
    /// Session to launch into. `None` launches without a session.
    pub session: Option<Arc<dyn TabSession>>,
}

/// A visible screen that can start other activities.
pub trait Activity: Send + Sync {
    fn launch_tab(&self, launch: &TabLaunch) -> Result<()>;
}

/// Resolves the screen currently in the foreground.
pub trait ActivityProvider: Send + Sync {
    fn current_activity(&self) -> Option<Arc<dyn Activity>>;
}

/// Retrieves the device's push-messaging registration token.
pub trait PushTokenProvider: Send + Sync {
    /// Returns `Ok(None)` while the token has not been issued yet.
    fn push_token(&self) -> Result<Option<String>>;
}
