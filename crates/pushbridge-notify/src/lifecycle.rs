// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Foreground lifecycle gate.
//
// Two states, FOREGROUND and BACKGROUND, starting in BACKGROUND. Entering the
// foreground clears the pending log and removes the aggregated notification;
// leaving it re-arms aggregation. The gate is the only writer of the flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pushbridge_bridge::traits::NotificationPresenter;
use pushbridge_core::error::Result;
use tracing::{info, instrument, warn};

use crate::log::NotificationLogStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Foreground,
    Background,
}

/// Process-wide visibility of the main screen.
///
/// Constructed once at process start; never persisted, so a restarted
/// process always begins in the background.
#[derive(Debug, Default)]
pub struct AppLifecycle {
    foreground: AtomicBool,
}

impl AppLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_foreground(&self) -> bool {
        self.foreground.load(Ordering::Acquire)
    }

    pub fn state(&self) -> LifecycleState {
        if self.is_foreground() {
            LifecycleState::Foreground
        } else {
            LifecycleState::Background
        }
    }

    pub(crate) fn set_foreground(&self, foreground: bool) {
        self.foreground.store(foreground, Ordering::Release);
    }
}

/// Drives [`AppLifecycle`] from the main screen's resume/pause callbacks.
#[derive(Clone)]
pub struct ForegroundGate {
    lifecycle: Arc<AppLifecycle>,
    log: Arc<NotificationLogStore>,
    presenter: Arc<dyn NotificationPresenter>,
    notification_id: i32,
}

impl ForegroundGate {
    pub fn new(
        lifecycle: Arc<AppLifecycle>,
        log: Arc<NotificationLogStore>,
        presenter: Arc<dyn NotificationPresenter>,
        notification_id: i32,
    ) -> Self {
        Self {
            lifecycle,
            log,
            presenter,
            notification_id,
        }
    }

    /// The main screen became visible.
    ///
    /// The flag is raised even if clearing or cancelling fails, since the
    /// user is looking at the app either way; the first failure is returned.
    #[instrument(skip(self), fields(id = self.notification_id))]
    pub fn on_resume(&self) -> Result<()> {
        let tx = self.log.begin()?;
        let cleared = tx.clear();
        let cancelled = self.presenter.cancel(self.notification_id);
        self.lifecycle.set_foreground(true);
        drop(tx);

        if let Err(e) = &cleared {
            warn!("failed to clear notification log on resume: {e}");
        }
        if let Err(e) = &cancelled {
            warn!("failed to cancel aggregated notification on resume: {e}");
        }
        cleared?;
        cancelled?;

        info!("entered foreground");
        Ok(())
    }

    /// The main screen is no longer visible.
    #[instrument(skip(self))]
    pub fn on_pause(&self) {
        self.lifecycle.set_foreground(false);
        info!("entered background");
    }

    pub fn lifecycle(&self) -> &Arc<AppLifecycle> {
        &self.lifecycle
    }
}
