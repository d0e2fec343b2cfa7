// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Condensed rendering of the pending log.

use pushbridge_core::types::{NotificationEntry, NotificationRequest, TapAction};
use serde::{Deserialize, Serialize};

use crate::log::NotificationLog;

/// What the aggregated notification shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSummary {
    /// Total pending entries.
    pub count: usize,
    /// `"1 new alert"` / `"N new alerts"`.
    pub title: String,
    /// The newest excerpt.
    pub body: String,
    /// Up to `window` newest excerpts, oldest of them first, one per line.
    pub expanded_body: String,
}

impl NotificationSummary {
    /// Render the log. `None` when there is nothing to show.
    pub fn from_log(log: &NotificationLog, window: usize) -> Option<Self> {
        let latest = log.latest()?;
        let expanded_body = log
            .window(window)
            .iter()
            .map(NotificationEntry::as_str)
            .collect::<Vec<_>>()
            .join("\n");

        Some(Self {
            count: log.len(),
            title: alert_title(log.len()),
            body: latest.to_string(),
            expanded_body,
        })
    }

    /// Turn the summary into a presenter request under the fixed id.
    pub fn to_request(&self, id: i32) -> NotificationRequest {
        NotificationRequest {
            id,
            title: self.title.clone(),
            short_body: self.body.clone(),
            expanded_body: self.expanded_body.clone(),
            number: self.count,
            auto_cancel: true,
            tap_action: TapAction::OpenMainEntry,
        }
    }
}

fn alert_title(count: usize) -> String {
    if count == 1 {
        format!("{count} new alert")
    } else {
        format!("{count} new alerts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_of(items: &[&str]) -> NotificationLog {
        items.iter().copied().map(NotificationEntry::new).collect()
    }

    #[test]
    fn empty_log_renders_nothing() {
        assert!(NotificationSummary::from_log(&NotificationLog::new(), 4).is_none());
    }

    #[test]
    fn title_is_singular_only_for_one() {
        assert_eq!(alert_title(1), "1 new alert");
        assert_eq!(alert_title(2), "2 new alerts");
        assert_eq!(alert_title(17), "17 new alerts");
    }

    #[test]
    fn single_entry_summary() {
        let summary = NotificationSummary::from_log(&log_of(&["only"]), 4).expect("summary");
        assert_eq!(summary.count, 1);
        assert_eq!(summary.title, "1 new alert");
        assert_eq!(summary.body, "only");
        assert_eq!(summary.expanded_body, "only");
    }

    #[test]
    fn expanded_body_is_last_window_in_order() {
        let summary =
            NotificationSummary::from_log(&log_of(&["a", "b", "c", "d", "e"]), 4).expect("summary");
        assert_eq!(summary.title, "5 new alerts");
        assert_eq!(summary.body, "e");
        assert_eq!(summary.expanded_body, "b\nc\nd\ne");
    }

    #[test]
    fn request_uses_fixed_id_and_opens_main_entry() {
        let summary = NotificationSummary::from_log(&log_of(&["a", "b"]), 4).expect("summary");
        let request = summary.to_request(666);
        assert_eq!(request.id, 666);
        assert_eq!(request.number, 2);
        assert!(request.auto_cancel);
        assert_eq!(request.tap_action, TapAction::OpenMainEntry);
        assert_eq!(request.short_body, "b");
    }
}
