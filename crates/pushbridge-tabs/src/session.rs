// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tab session manager.
//
// Binding to the browser's tab service is asynchronous and may never
// complete. Until it does, launches go out without a session; once bound,
// the first launch creates a session and every later one reuses it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pushbridge_bridge::traits::{
    ActivityProvider, BrowserService, TabClient, TabLaunch, TabServiceConnection, TabSession,
};
use pushbridge_core::BridgeConfig;
use pushbridge_core::error::{BridgeError, Result};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Connection lifecycle, moved only by the bind result and the service
/// callbacks.
enum ConnectionState {
    Unbound,
    Binding,
    Bound {
        client: Arc<dyn TabClient>,
        session: Option<Arc<dyn TabSession>>,
    },
}

/// Observable summary of the connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Unbound,
    Binding,
    Bound,
}

/// Receives the platform's connection callbacks.
struct ConnectionSlot {
    state: Mutex<ConnectionState>,
}

impl ConnectionSlot {
    fn lock(&self) -> MutexGuard<'_, ConnectionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TabServiceConnection for ConnectionSlot {
    fn on_service_connected(&self, client: Arc<dyn TabClient>) {
        *self.lock() = ConnectionState::Bound {
            client,
            session: None,
        };
        info!("tab service connected");
    }

    fn on_service_disconnected(&self) {
        *self.lock() = ConnectionState::Unbound;
        info!("tab service disconnected");
    }
}

pub struct TabSessionManager {
    browser: Arc<dyn BrowserService>,
    activities: Arc<dyn ActivityProvider>,
    slot: Arc<ConnectionSlot>,
    package: String,
    service_action: String,
}

impl TabSessionManager {
    /// Create the manager and start binding to the configured browser.
    ///
    /// A refused or failed bind is not an error; the manager simply never
    /// gets a session.
    #[instrument(skip_all, fields(package = %config.browser_package))]
    pub fn new(
        browser: Arc<dyn BrowserService>,
        activities: Arc<dyn ActivityProvider>,
        config: &BridgeConfig,
    ) -> Self {
        let slot = Arc::new(ConnectionSlot {
            state: Mutex::new(ConnectionState::Unbound),
        });

        match browser.bind_tab_service(&config.browser_package, slot.clone()) {
            Ok(true) => {
                // The callback may already have fired during the bind call.
                let mut state = slot.lock();
                if matches!(*state, ConnectionState::Unbound) {
                    *state = ConnectionState::Binding;
                }
            }
            Ok(false) => debug!("tab service bind refused"),
            Err(e) => warn!("tab service bind failed: {e}"),
        }

        Self {
            browser,
            activities,
            slot,
            package: config.browser_package.clone(),
            service_action: config.tab_service_action.clone(),
        }
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        match &*self.slot.lock() {
            ConnectionState::Unbound => ConnectionStatus::Unbound,
            ConnectionState::Binding => ConnectionStatus::Binding,
            ConnectionState::Bound { .. } => ConnectionStatus::Bound,
        }
    }

    /// The session for the live connection, created on first use.
    ///
    /// `None` while no connection is bound. A session only ever lives inside
    /// the bound state, so losing the connection drops it too.
    pub fn get_session(&self) -> Option<Arc<dyn TabSession>> {
        let mut state = self.slot.lock();
        match &mut *state {
            ConnectionState::Bound { client, session } => {
                if session.is_none() {
                    *session = client.new_session();
                    debug!(created = session.is_some(), "tab session requested");
                }
                session.clone()
            }
            ConnectionState::Unbound | ConnectionState::Binding => None,
        }
    }

    /// Open `location`, failing loudly on anything that prevents it.
    ///
    /// Returns `Ok(false)` only if the foreground screen went away after
    /// the initial check.
    #[instrument(skip(self))]
    pub fn show(&self, location: &str) -> Result<bool> {
        if self.activities.current_activity().is_none() {
            return Err(BridgeError::NoActiveContext);
        }
        self.ensure_service()?;
        validate_location(location)?;
        self.launch(location)
    }

    /// Open `location`, treating a missing foreground screen as a quiet
    /// `Ok(false)`. A missing browser or a bad URL still fail.
    #[instrument(skip(self))]
    pub fn navigate(&self, location: &str) -> Result<bool> {
        self.ensure_service()?;
        validate_location(location)?;
        self.launch(location)
    }

    fn ensure_service(&self) -> Result<()> {
        if self
            .browser
            .resolve_tab_service(&self.service_action, &self.package)
        {
            Ok(())
        } else {
            Err(BridgeError::ServiceUnavailable(self.package.clone()))
        }
    }

    fn launch(&self, location: &str) -> Result<bool> {
        let Some(activity) = self.activities.current_activity() else {
            debug!("no foreground activity at launch time");
            return Ok(false);
        };

        let launch = TabLaunch {
            url: location.to_string(),
            package: self.package.clone(),
            session: self.get_session(),
        };
        activity.launch_tab(&launch)?;

        info!(url = %launch.url, with_session = launch.session.is_some(), "tab launched");
        Ok(true)
    }
}

/// The browser receives `location` exactly as given; parsing only rejects
/// strings that are not absolute URLs.
fn validate_location(location: &str) -> Result<()> {
    Url::parse(location)
        .map(drop)
        .map_err(|_| BridgeError::InvalidInput(location.to_string()))
}
