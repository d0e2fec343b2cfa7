// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for pushbridge.

use thiserror::Error;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Notification log --
    /// Persisted notification log could not be parsed. Always recovered
    /// locally as an empty log; never returned from a public operation.
    #[error("malformed persisted state: {0}")]
    MalformedState(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("notification error: {0}")]
    Notification(String),

    // -- Browser tabs --
    #[error("no current activity")]
    NoActiveContext,

    #[error("{0} not installed")]
    ServiceUnavailable(String),

    #[error("invalid url: {0}")]
    InvalidInput(String),

    // -- Module registry --
    #[error("unknown bridge module: {0}")]
    UnknownModule(String),

    #[error("module {module} has no method {method}")]
    UnknownMethod { module: String, method: String },

    #[error("bridge module already registered: {0}")]
    DuplicateModule(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BridgeError {
    /// Stable error code reported to the JavaScript side next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::MalformedState(_) => "E_MALFORMED_STATE",
            BridgeError::Storage(_) => "E_STORAGE",
            BridgeError::Notification(_) => "E_NOTIFICATION",
            BridgeError::NoActiveContext => "E_NO_ACTIVITY",
            BridgeError::ServiceUnavailable(_) => "E_NOT_INSTALLED",
            BridgeError::InvalidInput(_) => "E_INVALID_URL",
            BridgeError::UnknownModule(_) => "E_UNKNOWN_MODULE",
            BridgeError::UnknownMethod { .. } => "E_UNKNOWN_METHOD",
            BridgeError::DuplicateModule(_) => "E_DUPLICATE_MODULE",
            BridgeError::InvalidArgument(_) => "E_INVALID_ARGUMENT",
            BridgeError::Bridge(_) => "E_BRIDGE",
            BridgeError::PlatformUnavailable => "E_UNAVAILABLE",
            BridgeError::Io(_) => "E_IO",
            BridgeError::Serialization(_) => "E_SERIALIZATION",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
