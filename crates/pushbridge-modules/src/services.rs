// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — builds every subsystem on top of one platform
// bridge and exposes the entry points the native host calls.

use std::sync::Arc;

use pushbridge_bridge::platform_bridge;
use pushbridge_bridge::traits::PlatformBridge;
use pushbridge_core::BridgeConfig;
use pushbridge_core::error::Result;
use pushbridge_core::types::PushPayload;
use pushbridge_notify::{NotificationAggregator, NotificationCenter, PushOutcome};
use pushbridge_tabs::TabSessionManager;
use tracing::info;

use crate::host::ActivityHost;
use crate::modules::{AndroidTokenModule, ChromeCustomTabModule, RandomBytesModule};
use crate::registry::ModuleRegistry;

/// Everything the native host needs, constructed once per process.
pub struct BridgeServices {
    config: BridgeConfig,
    registry: ModuleRegistry,
    notifications: NotificationCenter,
    aggregator: NotificationAggregator,
    tabs: Arc<TabSessionManager>,
    host: ActivityHost,
}

impl BridgeServices {
    /// Initialise on the bridge for the current target OS.
    pub fn init(config: BridgeConfig) -> Result<Self> {
        Self::with_platform(platform_bridge(), config)
    }

    /// Initialise on an explicit platform bridge.
    pub fn with_platform<P: PlatformBridge + 'static>(
        platform: Arc<P>,
        config: BridgeConfig,
    ) -> Result<Self> {
        config.validate()?;
        info!(platform = platform.platform_name(), "initialising bridge services");

        let notifications = NotificationCenter::new(platform.clone(), platform.clone(), &config);
        let aggregator = notifications.aggregator();
        let tabs = Arc::new(TabSessionManager::new(
            platform.clone(),
            platform.clone(),
            &config,
        ));

        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(RandomBytesModule::new(config.seed_len)))?;
        registry.register(Arc::new(AndroidTokenModule::new(platform)))?;
        registry.register(Arc::new(ChromeCustomTabModule::new(tabs.clone())))?;

        let host = ActivityHost::new(notifications.gate(), &config);

        info!(modules = ?registry.names(), "bridge services initialised");
        Ok(Self {
            config,
            registry,
            notifications,
            aggregator,
            tabs,
            host,
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn tabs(&self) -> &Arc<TabSessionManager> {
        &self.tabs
    }

    pub fn host(&self) -> &ActivityHost {
        &self.host
    }

    /// Entry point for the push-delivery callback.
    pub fn on_push(&self, payload: &PushPayload) -> Result<PushOutcome> {
        self.aggregator.on_push(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use pushbridge_bridge::prefs::MemoryStore;
    use pushbridge_bridge::traits::*;
    use pushbridge_core::error::BridgeError;
    use pushbridge_core::types::NotificationRequest;
    use serde_json::json;

    use crate::registry::Reply;

    #[derive(Debug)]
    struct Session;

    impl TabSession for Session {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Client;

    impl TabClient for Client {
        fn new_session(&self) -> Option<Arc<dyn TabSession>> {
            Some(Arc::new(Session))
        }
    }

    #[derive(Default)]
    struct Screen {
        launched: Mutex<Vec<String>>,
    }

    impl Activity for Screen {
        fn launch_tab(&self, launch: &TabLaunch) -> Result<()> {
            self.launched.lock().expect("lock").push(launch.url.clone());
            Ok(())
        }
    }

    /// Phone with a browser installed whose tab service binds immediately.
    #[derive(Default)]
    struct FakePhone {
        prefs: MemoryStore,
        raised: Mutex<Vec<NotificationRequest>>,
        cancelled: Mutex<Vec<i32>>,
        screen: Arc<Screen>,
        screen_visible: AtomicBool,
    }

    impl PlatformBridge for FakePhone {
        fn platform_name(&self) -> &str {
            "Fake phone"
        }
    }

    impl KeyValueStore for FakePhone {
        fn get(&self, namespace: &str, key: &str) -> Result<Option<String>> {
            self.prefs.get(namespace, key)
        }

        fn set(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
            self.prefs.set(namespace, key, value)
        }
    }

    impl NotificationPresenter for FakePhone {
        fn notify(&self, request: &NotificationRequest) -> Result<()> {
            self.raised.lock().expect("lock").push(request.clone());
            Ok(())
        }

        fn cancel(&self, id: i32) -> Result<()> {
            self.cancelled.lock().expect("lock").push(id);
            Ok(())
        }
    }

    impl BrowserService for FakePhone {
        fn bind_tab_service(
            &self,
            _package: &str,
            connection: Arc<dyn TabServiceConnection>,
        ) -> Result<bool> {
            connection.on_service_connected(Arc::new(Client));
            Ok(true)
        }

        fn resolve_tab_service(&self, _action: &str, package: &str) -> bool {
            package == "com.android.chrome"
        }
    }

    impl ActivityProvider for FakePhone {
        fn current_activity(&self) -> Option<Arc<dyn Activity>> {
            if self.screen_visible.load(Ordering::SeqCst) {
                Some(self.screen.clone() as Arc<dyn Activity>)
            } else {
                None
            }
        }
    }

    impl PushTokenProvider for FakePhone {
        fn push_token(&self) -> Result<Option<String>> {
            Ok(Some("token-abc".into()))
        }
    }

    fn services() -> (BridgeServices, Arc<FakePhone>) {
        let phone = Arc::new(FakePhone::default());
        let services =
            BridgeServices::with_platform(phone.clone(), BridgeConfig::default()).expect("init");
        (services, phone)
    }

    #[test]
    fn registers_the_three_named_modules() {
        let (services, _phone) = services();
        assert_eq!(
            services.registry().names(),
            ["AndroidToken", "ChromeCustomTab", "RNRandomBytes"]
        );
    }

    #[test]
    fn synchronous_bind_is_not_downgraded() {
        let (services, _phone) = services();
        assert_eq!(
            services.tabs().connection_status(),
            pushbridge_tabs::ConnectionStatus::Bound
        );
    }

    #[test]
    fn background_pushes_aggregate_until_resume() {
        let (services, phone) = services();

        services.on_push(&PushPayload::with_body("first")).expect("push");
        services.on_push(&PushPayload::with_body("second")).expect("push");
        {
            let raised = phone.raised.lock().expect("lock");
            assert_eq!(raised.len(), 2);
            assert_eq!(raised[1].title, "2 new alerts");
            assert_eq!(raised[1].expanded_body, "first\nsecond");
        }

        services.host().on_resume().expect("resume");
        assert_eq!(*phone.cancelled.lock().expect("lock"), [666]);
        assert!(services.notifications().pending().expect("pending").is_empty());

        let outcome = services.on_push(&PushPayload::with_body("while open")).expect("push");
        assert_eq!(outcome, PushOutcome::Suppressed);
        assert_eq!(phone.raised.lock().expect("lock").len(), 2);
    }

    #[test]
    fn custom_tab_show_and_navigate_through_registry() {
        let (services, phone) = services();
        let registry = services.registry();

        // No visible screen yet.
        match registry.call("ChromeCustomTab", "show", &[json!("https://example.com")]) {
            Reply::Rejected { code, .. } => assert_eq!(code, "E_NO_ACTIVITY"),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(
            registry
                .invoke("ChromeCustomTab", "navigate", &[json!("https://example.com")])
                .expect("navigate"),
            json!(false)
        );

        phone.screen_visible.store(true, Ordering::SeqCst);
        assert_eq!(
            registry
                .invoke("ChromeCustomTab", "show", &[json!("https://example.com/a")])
                .expect("show"),
            json!(true)
        );
        assert_eq!(*phone.screen.launched.lock().expect("lock"), ["https://example.com/a"]);

        for method in ["show", "navigate"] {
            assert!(matches!(
                registry.invoke("ChromeCustomTab", method, &[json!("not a url")]),
                Err(BridgeError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn missing_browser_rejects_both_modes() {
        let phone = Arc::new(FakePhone::default());
        phone.screen_visible.store(true, Ordering::SeqCst);
        let config = BridgeConfig {
            browser_package: "org.example.nobrowser".into(),
            ..Default::default()
        };
        let services = BridgeServices::with_platform(phone, config).expect("init");

        for method in ["show", "navigate"] {
            match services
                .registry()
                .call("ChromeCustomTab", method, &[json!("https://example.com")])
            {
                Reply::Rejected { code, message } => {
                    assert_eq!(code, "E_NOT_INSTALLED");
                    assert!(message.contains("org.example.nobrowser"));
                }
                other => panic!("expected rejection, got {other:?}"),
            }
        }
    }

    #[test]
    fn token_module_reads_from_platform() {
        let (services, _phone) = services();
        assert_eq!(
            services
                .registry()
                .invoke("AndroidToken", "GetInstanceId", &[])
                .expect("token"),
            json!("token-abc")
        );
    }

    #[test]
    fn invalid_config_is_rejected_at_init() {
        let config = BridgeConfig {
            display_window: 0,
            ..Default::default()
        };
        assert!(matches!(
            BridgeServices::with_platform(Arc::new(FakePhone::default()), config),
            Err(BridgeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn stub_platform_initialises_without_browser() {
        let services = BridgeServices::init(BridgeConfig::default()).expect("init");
        assert_eq!(
            services.tabs().connection_status(),
            pushbridge_tabs::ConnectionStatus::Unbound
        );
        assert_eq!(services.config().notification_id, 666);
    }
}
