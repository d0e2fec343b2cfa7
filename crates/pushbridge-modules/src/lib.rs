// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pushbridge-modules — The named modules the JavaScript shell calls into,
// the registry that dispatches to them, and the main-screen host glue.

pub mod host;
pub mod logging;
pub mod modules;
pub mod registry;
pub mod services;

pub use host::ActivityHost;
pub use registry::{BridgeModule, ModuleRegistry, Reply};
pub use services::BridgeServices;
