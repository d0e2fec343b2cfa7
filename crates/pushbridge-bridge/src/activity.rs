// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tracks the host's foreground screen.
//
// The process context outlives every screen, so it cannot answer "is there a
// screen to launch from right now". The host reports its screen as it
// resumes and is destroyed, and lookups read whatever is attached.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// Holds the handle of the screen currently attached by the host, if any.
pub struct ActivitySlot<T> {
    current: Mutex<Option<T>>,
}

impl<T: Clone> ActivitySlot<T> {
    pub const fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// Record `handle` as the current screen, replacing any previous one.
    pub fn attach(&self, handle: T) {
        *self.lock() = Some(handle);
        debug!("activity attached");
    }

    /// Clear the slot if `is_current` recognises the attached handle.
    ///
    /// A screen being torn down after its replacement already attached must
    /// not clear the replacement. Returns whether the slot was cleared.
    pub fn detach_if(&self, is_current: impl FnOnce(&T) -> bool) -> bool {
        let mut current = self.lock();
        let matches = current.as_ref().is_some_and(is_current);
        if matches {
            *current = None;
            debug!("activity detached");
        }
        matches
    }

    /// The attached screen, or `None` when the host has none.
    pub fn current(&self) -> Option<T> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Default for ActivitySlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
