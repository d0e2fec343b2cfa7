// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The native modules registered with the JavaScript shell.

pub mod custom_tab;
pub mod random_bytes;
pub mod token;

pub use custom_tab::ChromeCustomTabModule;
pub use random_bytes::RandomBytesModule;
pub use token::AndroidTokenModule;
