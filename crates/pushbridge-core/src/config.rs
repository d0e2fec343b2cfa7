// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BridgeError, Result};

/// Runtime settings shared by every bridge module.
///
/// All the fixed identifiers the native side depends on live here so that
/// raise and cancel, read and write, always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Key-value namespace holding the pending notification log.
    pub prefs_namespace: String,
    /// Key under which the serialized log array is stored.
    pub log_key: String,
    /// Identifier of the single aggregated system notification.
    pub notification_id: i32,
    /// How many of the most recent excerpts the expanded body shows.
    pub display_window: usize,
    /// Package of the browser providing the tab service.
    pub browser_package: String,
    /// Intent action used to probe for a tab-capable browser service.
    pub tab_service_action: String,
    /// Main component name registered by the JavaScript shell.
    pub main_component: String,
    /// Launch extra carrying a deep-link URL into the app.
    pub launch_url_extra: String,
    /// Hardware names reported by emulators.
    pub emulator_hardware: Vec<String>,
    /// Length of the random seed exported as a module constant.
    pub seed_len: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            prefs_namespace: "Notifications".into(),
            log_key: "current".into(),
            notification_id: 666,
            display_window: 4,
            browser_package: "com.android.chrome".into(),
            tab_service_action: "android.support.customtabs.action.CustomTabsService".into(),
            main_component: "Discourse".into(),
            launch_url_extra: "discourse_url".into(),
            emulator_hardware: vec!["goldfish".into(), "ranchu".into()],
            seed_len: 4096,
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a JSON file, falling back to defaults when the
    /// file does not exist. Fields missing from the file take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;

        info!(path = %path.display(), "bridge config loaded");
        Ok(config)
    }

    /// Persist the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject settings that would break the notification or tab contracts.
    pub fn validate(&self) -> Result<()> {
        if self.display_window == 0 {
            return Err(BridgeError::InvalidArgument(
                "display_window must be at least 1".into(),
            ));
        }
        if self.prefs_namespace.is_empty() || self.log_key.is_empty() {
            return Err(BridgeError::InvalidArgument(
                "notification log namespace and key must be non-empty".into(),
            ));
        }
        if self.browser_package.is_empty() {
            return Err(BridgeError::InvalidArgument(
                "browser_package must be non-empty".into(),
            ));
        }
        Ok(())
    }
}
