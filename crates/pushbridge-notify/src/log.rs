// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persistent notification log.
//
// The log is a JSON array of excerpt strings stored under a single key in the
// platform key-value store. It is only ever appended to (new push) or
// replaced wholesale with `[]` (foreground clear).

use std::sync::{Arc, Mutex, MutexGuard};

use pushbridge_bridge::traits::KeyValueStore;
use pushbridge_core::BridgeConfig;
use pushbridge_core::error::{BridgeError, Result};
use pushbridge_core::types::NotificationEntry;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Ordered excerpts awaiting the user's attention, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationLog {
    entries: Vec<NotificationEntry>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[NotificationEntry] {
        &self.entries
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&NotificationEntry> {
        self.entries.last()
    }

    /// The last `size` entries in insertion order.
    pub fn window(&self, size: usize) -> &[NotificationEntry] {
        let start = self.entries.len().saturating_sub(size);
        &self.entries[start..]
    }

    pub fn push(&mut self, entry: NotificationEntry) {
        self.entries.push(entry);
    }

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<NotificationEntry> for NotificationLog {
    fn from_iter<I: IntoIterator<Item = NotificationEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Outcome of reading the persisted log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLog {
    /// The stored value was absent or a well-formed array.
    Ok(NotificationLog),
    /// The stored value was unreadable and has been replaced by an empty log.
    Recovered(NotificationLog),
}

impl ParsedLog {
    pub fn into_log(self) -> NotificationLog {
        match self {
            ParsedLog::Ok(log) | ParsedLog::Recovered(log) => log,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, ParsedLog::Recovered(_))
    }
}

/// Parse a stored log value. Never fails: anything that is not a JSON array
/// of strings is treated as an empty log.
pub fn parse_log_or_empty(raw: Option<&str>) -> ParsedLog {
    let Some(raw) = raw else {
        return ParsedLog::Ok(NotificationLog::new());
    };

    match serde_json::from_str::<NotificationLog>(raw) {
        Ok(log) => ParsedLog::Ok(log),
        Err(e) => {
            let err = BridgeError::MalformedState(e.to_string());
            warn!(raw_len = raw.len(), "discarding persisted notification log: {err}");
            ParsedLog::Recovered(NotificationLog::new())
        }
    }
}

/// Shared handle on the persisted log.
///
/// Every read-modify-write goes through [`NotificationLogStore::begin`], which
/// holds one process-wide guard for its lifetime. The aggregator and the
/// foreground gate both use it, so a push can never interleave with a clear.
pub struct NotificationLogStore {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
    key: String,
    guard: Mutex<()>,
}

impl NotificationLogStore {
    pub fn new(store: Arc<dyn KeyValueStore>, config: &BridgeConfig) -> Self {
        Self {
            store,
            namespace: config.prefs_namespace.clone(),
            key: config.log_key.clone(),
            guard: Mutex::new(()),
        }
    }

    /// Start an exclusive transaction on the log.
    pub fn begin(&self) -> Result<LogTransaction<'_>> {
        let guard = self
            .guard
            .lock()
            .map_err(|_| BridgeError::Storage("notification log lock poisoned".into()))?;
        Ok(LogTransaction {
            owner: self,
            _guard: guard,
        })
    }

    /// Read the current log.
    pub fn snapshot(&self) -> Result<NotificationLog> {
        self.begin()?.load()
    }
}

/// Exclusive access to the persisted log, released on drop.
pub struct LogTransaction<'a> {
    owner: &'a NotificationLogStore,
    _guard: MutexGuard<'a, ()>,
}

impl LogTransaction<'_> {
    /// Load the log, recovering malformed state as empty.
    pub fn load(&self) -> Result<NotificationLog> {
        let raw = self
            .owner
            .store
            .get(&self.owner.namespace, &self.owner.key)?;
        Ok(parse_log_or_empty(raw.as_deref()).into_log())
    }

    /// Append one entry and persist before returning the updated log.
    pub fn append(&self, entry: NotificationEntry) -> Result<NotificationLog> {
        let mut log = self.load()?;
        log.push(entry);
        self.write(&log)?;
        debug!(count = log.len(), "notification log appended");
        Ok(log)
    }

    /// Replace the log with an empty one.
    pub fn clear(&self) -> Result<()> {
        self.write(&NotificationLog::new())?;
        debug!("notification log cleared");
        Ok(())
    }

    fn write(&self, log: &NotificationLog) -> Result<()> {
        self.owner
            .store
            .set(&self.owner.namespace, &self.owner.key, &log.to_json()?)
    }
}
