// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pushbridge — Native platform collaborator abstractions.
//
// The notification and tab-session logic never talks to the OS directly.
// It consumes the traits in `traits`, and this crate supplies the Android
// implementation (JNI into the ART runtime) plus a stub for desktop/CI builds.

use std::sync::Arc;

pub mod activity;
pub mod prefs;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

/// Concrete bridge type for the target operating system.
#[cfg(target_os = "android")]
pub type NativeBridge = android::AndroidBridge;

/// Concrete bridge type for the target operating system.
#[cfg(not(target_os = "android"))]
pub type NativeBridge = stub::StubBridge;

/// Retrieves the bridge implementation for the target operating system.
///
/// Returned as a concrete `Arc` so callers can hand the same instance to
/// each consumer as whichever collaborator trait it needs.
pub fn platform_bridge() -> Arc<NativeBridge> {
    #[cfg(target_os = "android")]
    {
        Arc::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: every native capability reports PlatformUnavailable.
        Arc::new(stub::StubBridge)
    }
}
