// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wiring for the notification subsystem.

use std::sync::Arc;

use pushbridge_bridge::traits::{KeyValueStore, NotificationPresenter};
use pushbridge_core::BridgeConfig;
use pushbridge_core::error::Result;

use crate::aggregator::NotificationAggregator;
use crate::lifecycle::{AppLifecycle, ForegroundGate};
use crate::log::{NotificationLog, NotificationLogStore};

/// Owns the state shared by the aggregator and the foreground gate.
///
/// Build one per process; hand `aggregator()` to the push-delivery callback
/// and `gate()` to the main screen.
#[derive(Clone)]
pub struct NotificationCenter {
    lifecycle: Arc<AppLifecycle>,
    log: Arc<NotificationLogStore>,
    presenter: Arc<dyn NotificationPresenter>,
    notification_id: i32,
    display_window: usize,
}

impl NotificationCenter {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        presenter: Arc<dyn NotificationPresenter>,
        config: &BridgeConfig,
    ) -> Self {
        Self {
            lifecycle: Arc::new(AppLifecycle::new()),
            log: Arc::new(NotificationLogStore::new(store, config)),
            presenter,
            notification_id: config.notification_id,
            display_window: config.display_window.max(1),
        }
    }

    pub fn aggregator(&self) -> NotificationAggregator {
        NotificationAggregator::new(
            self.lifecycle.clone(),
            self.log.clone(),
            self.presenter.clone(),
            self.notification_id,
            self.display_window,
        )
    }

    pub fn gate(&self) -> ForegroundGate {
        ForegroundGate::new(
            self.lifecycle.clone(),
            self.log.clone(),
            self.presenter.clone(),
            self.notification_id,
        )
    }

    pub fn lifecycle(&self) -> &Arc<AppLifecycle> {
        &self.lifecycle
    }

    /// Entries currently waiting in the persisted log.
    pub fn pending(&self) -> Result<NotificationLog> {
        self.log.snapshot()
    }
}
