// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pushbridge-tabs — Opens URLs in the system browser's custom tab, reusing
// one warm session across launches when the tab service is bound.

pub mod session;

pub use session::{ConnectionStatus, TabSessionManager};
