// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Main-screen host glue.
//
// Mirrors the main activity's callbacks: `on_create` captures a deep link
// from the launching intent, `launch_options` hands it to the JavaScript
// shell exactly once, and resume/pause drive the foreground gate.

use std::collections::BTreeMap;
use std::sync::Mutex;

use pushbridge_core::BridgeConfig;
use pushbridge_core::error::Result;
use pushbridge_core::types::LaunchOptions;
use pushbridge_notify::ForegroundGate;
use tracing::debug;

pub struct ActivityHost {
    gate: ForegroundGate,
    init_url: Mutex<Option<String>>,
    main_component: String,
    launch_url_extra: String,
    emulator_hardware: Vec<String>,
}

impl ActivityHost {
    pub fn new(gate: ForegroundGate, config: &BridgeConfig) -> Self {
        Self {
            gate,
            init_url: Mutex::new(None),
            main_component: config.main_component.clone(),
            launch_url_extra: config.launch_url_extra.clone(),
            emulator_hardware: config.emulator_hardware.clone(),
        }
    }

    /// Name of the JavaScript component rendered by the main screen.
    pub fn main_component_name(&self) -> &str {
        &self.main_component
    }

    /// The main screen was created from an intent carrying `extras`.
    pub fn on_create(&self, extras: &BTreeMap<String, String>) {
        let url = extras.get(&self.launch_url_extra).cloned();
        debug!(has_url = url.is_some(), "main screen created");
        *self.init_url.lock().unwrap_or_else(|e| e.into_inner()) = url;
    }

    /// Options for the shell's first render. The deep link is consumed.
    pub fn launch_options(&self, hardware: &str) -> LaunchOptions {
        let url = self
            .init_url
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        LaunchOptions {
            url,
            simulator: self.emulator_hardware.iter().any(|h| h == hardware),
        }
    }

    pub fn on_resume(&self) -> Result<()> {
        self.gate.on_resume()
    }

    pub fn on_pause(&self) {
        self.gate.on_pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pushbridge_bridge::prefs::MemoryStore;
    use pushbridge_bridge::traits::NotificationPresenter;
    use pushbridge_core::types::NotificationRequest;
    use pushbridge_notify::NotificationCenter;

    struct SilentPresenter;

    impl NotificationPresenter for SilentPresenter {
        fn notify(&self, _request: &NotificationRequest) -> Result<()> {
            Ok(())
        }

        fn cancel(&self, _id: i32) -> Result<()> {
            Ok(())
        }
    }

    fn host() -> (ActivityHost, NotificationCenter) {
        let config = BridgeConfig::default();
        let center = NotificationCenter::new(
            Arc::new(MemoryStore::new()),
            Arc::new(SilentPresenter),
            &config,
        );
        (ActivityHost::new(center.gate(), &config), center)
    }

    #[test]
    fn deep_link_is_handed_out_once() {
        let (host, _center) = host();
        let mut extras = BTreeMap::new();
        extras.insert("discourse_url".to_string(), "https://meta.discourse.org/t/42".to_string());
        host.on_create(&extras);

        let first = host.launch_options("qcom");
        assert_eq!(first.url.as_deref(), Some("https://meta.discourse.org/t/42"));
        assert!(!first.simulator);

        assert_eq!(host.launch_options("qcom").url, None);
    }

    #[test]
    fn recreate_without_extra_forgets_old_link() {
        let (host, _center) = host();
        let mut extras = BTreeMap::new();
        extras.insert("discourse_url".to_string(), "https://a.example".to_string());
        host.on_create(&extras);
        host.on_create(&BTreeMap::new());

        assert_eq!(host.launch_options("qcom").url, None);
    }

    #[test]
    fn emulator_hardware_sets_simulator_flag() {
        let (host, _center) = host();
        assert!(host.launch_options("goldfish").simulator);
        assert!(host.launch_options("ranchu").simulator);
        assert!(!host.launch_options("exynos").simulator);
    }

    #[test]
    fn resume_and_pause_drive_the_lifecycle() {
        let (host, center) = host();
        assert!(!center.lifecycle().is_foreground());
        host.on_resume().expect("resume");
        assert!(center.lifecycle().is_foreground());
        host.on_pause();
        assert!(!center.lifecycle().is_foreground());
        assert_eq!(host.main_component_name(), "Discourse");
    }
}
