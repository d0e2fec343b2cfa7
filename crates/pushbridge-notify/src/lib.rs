// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pushbridge-notify — Aggregates push messages received while the app is in
// the background into one running system notification, and resets that
// tally when the user comes back.

pub mod aggregator;
pub mod center;
pub mod lifecycle;
pub mod log;
pub mod summary;

pub use aggregator::{NotificationAggregator, PushOutcome};
pub use center::NotificationCenter;
pub use lifecycle::{AppLifecycle, ForegroundGate, LifecycleState};
pub use log::{NotificationLog, NotificationLogStore, ParsedLog, parse_log_or_empty};
pub use summary::NotificationSummary;

#[cfg(test)]
pub(crate) mod testing;
