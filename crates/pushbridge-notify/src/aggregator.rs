// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Notification aggregator — folds inbound push payloads into the persisted
// log and keeps one system notification up to date with the running tally.

use std::sync::Arc;

use pushbridge_bridge::traits::NotificationPresenter;
use pushbridge_core::error::{BridgeError, Result};
use pushbridge_core::types::{NotificationEntry, PushPayload};
use tracing::{debug, info, instrument};

use crate::lifecycle::AppLifecycle;
use crate::log::NotificationLogStore;
use crate::summary::NotificationSummary;

/// What `on_push` did with a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// The app was in the foreground; nothing was recorded or shown.
    Suppressed,
    /// The payload was logged and the notification raised or updated.
    Displayed(NotificationSummary),
}

#[derive(Clone)]
pub struct NotificationAggregator {
    lifecycle: Arc<AppLifecycle>,
    log: Arc<NotificationLogStore>,
    presenter: Arc<dyn NotificationPresenter>,
    notification_id: i32,
    display_window: usize,
}

impl NotificationAggregator {
    pub fn new(
        lifecycle: Arc<AppLifecycle>,
        log: Arc<NotificationLogStore>,
        presenter: Arc<dyn NotificationPresenter>,
        notification_id: i32,
        display_window: usize,
    ) -> Self {
        Self {
            lifecycle,
            log,
            presenter,
            notification_id,
            display_window,
        }
    }

    /// Handle one push payload.
    ///
    /// The foreground check, the log append and the notification raise all
    /// happen under the log transaction, so a concurrent resume either sees
    /// this entry and clears it or runs first and causes suppression.
    #[instrument(skip_all)]
    pub fn on_push(&self, payload: &PushPayload) -> Result<PushOutcome> {
        let tx = self.log.begin()?;

        if self.lifecycle.is_foreground() {
            debug!("app in foreground, push suppressed");
            return Ok(PushOutcome::Suppressed);
        }

        let excerpt = payload.body().unwrap_or_default();
        let log = tx.append(NotificationEntry::new(excerpt))?;

        let summary = NotificationSummary::from_log(&log, self.display_window).ok_or_else(|| {
            BridgeError::Notification("log is empty after appending a push".into())
        })?;

        self.presenter
            .notify(&summary.to_request(self.notification_id))?;
        drop(tx);

        info!(count = summary.count, "aggregated notification updated");
        Ok(PushOutcome::Displayed(summary))
    }
}
