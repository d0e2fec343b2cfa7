// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types shared by the bridge modules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single text excerpt taken from one inbound push payload.
///
/// Serialized as a bare JSON string so the persisted log stays a plain
/// array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationEntry(pub String);

impl NotificationEntry {
    pub fn new(excerpt: impl Into<String>) -> Self {
        Self(excerpt.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NotificationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Data map delivered by the push transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    pub data: BTreeMap<String, String>,
}

impl PushPayload {
    /// Build a payload carrying only a `body` field.
    pub fn with_body(body: impl Into<String>) -> Self {
        let mut data = BTreeMap::new();
        data.insert("body".to_string(), body.into());
        Self { data }
    }

    /// The excerpt text, if the sender supplied one.
    pub fn body(&self) -> Option<&str> {
        self.data.get("body").map(String::as_str)
    }
}

/// What happens when the user taps the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapAction {
    /// Bring the application's main entry screen to the front, reusing the
    /// existing instance if one is running.
    OpenMainEntry,
}

/// A fully rendered system notification, ready for the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Fixed identifier; repeated raises update instead of stacking.
    pub id: i32,
    pub title: String,
    /// Collapsed body: the newest excerpt.
    pub short_body: String,
    /// Expanded body: the display window joined by newlines.
    pub expanded_body: String,
    /// Badge count (total pending entries).
    pub number: usize,
    pub auto_cancel: bool,
    pub tap_action: TapAction,
}

/// Options handed to the JavaScript shell when the main screen starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchOptions {
    /// Deep-link URL supplied by the launching intent, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Whether the app is running on an emulator.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub simulator: bool,
}
