// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test doubles shared by the unit tests in this crate.

use std::sync::Mutex;

use pushbridge_bridge::traits::NotificationPresenter;
use pushbridge_core::error::Result;
use pushbridge_core::types::NotificationRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Notify(NotificationRequest),
    Cancel(i32),
}

/// Presenter that records every call.
#[derive(Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.lock().expect("presenter lock").clone()
    }

    pub fn notifications(&self) -> Vec<NotificationRequest> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::Notify(request) => Some(request),
                PresenterEvent::Cancel(_) => None,
            })
            .collect()
    }
}

impl NotificationPresenter for RecordingPresenter {
    fn notify(&self, request: &NotificationRequest) -> Result<()> {
        self.events
            .lock()
            .expect("presenter lock")
            .push(PresenterEvent::Notify(request.clone()));
        Ok(())
    }

    fn cancel(&self, id: i32) -> Result<()> {
        self.events
            .lock()
            .expect("presenter lock")
            .push(PresenterEvent::Cancel(id));
        Ok(())
    }
}
