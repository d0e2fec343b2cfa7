// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pushbridge-security — Cryptographically secure randomness for the
// JavaScript shell, which has no CSPRNG of its own on older engines.

pub mod random;

pub use random::{SecureRandom, random_base64};
