//! Safe Client Factory
//!
//! Builds the process-wide `client`, `databases` and `storage` handles. Any
//! construction failure degrades to stubs instead of failing startup; each
//! service degrades on its own, so a broken storage client leaves databases
//! live.

use crate::{
    env::{AppwriteEnv, RuntimeMode},
    error::ServiceName,
    handle::{ClientHandle, ClientRef, DatabasesRef, HandleStatus, StorageRef, StubClient},
    services::{BaseClient, Sdk, Setting},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The three backend handles, built once and shared read-only.
#[derive(Clone, Debug)]
pub struct Clients {
    pub client: ClientRef,
    pub databases: DatabasesRef,
    pub storage: StorageRef,
}

/// Live/stub state of each handle, as reported by the health endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ClientsStatus {
    pub client: HandleStatus,
    pub databases: HandleStatus,
    pub storage: HandleStatus,
}

impl Clients {
    /// Three stubs.
    pub fn stubs() -> Self {
        Self {
            client: ClientHandle::Stub(ServiceName::Client),
            databases: ClientHandle::Stub(ServiceName::Databases),
            storage: ClientHandle::Stub(ServiceName::Storage),
        }
    }

    pub fn status(&self) -> ClientsStatus {
        ClientsStatus {
            client: self.client.status(),
            databases: self.databases.status(),
            storage: self.storage.status(),
        }
    }

    #[cfg(test)]
    fn is_fully_degraded(&self) -> bool {
        self.client.is_stub() && self.databases.is_stub() && self.storage.is_stub()
    }
}

/// The SDK compiled into this build, if any.
#[cfg(feature = "appwrite")]
pub fn default_sdk() -> Option<Box<dyn Sdk>> {
    Some(Box::new(crate::appwrite::AppwriteSdk::default()))
}

/// The SDK compiled into this build, if any.
#[cfg(not(feature = "appwrite"))]
pub fn default_sdk() -> Option<Box<dyn Sdk>> {
    None
}

/// Builds the backend handles. Never fails; unavailable pieces become stubs.
pub fn build_clients(config: &AppwriteEnv, sdk: Option<&dyn Sdk>, mode: RuntimeMode) -> Clients {
    if config.is_unconfigured() {
        if !mode.is_production() {
            warn!(
                "NEXT_PUBLIC_APPWRITE_ENDPOINT or APPWRITE_ENDPOINT is not set. Using safe stubs for client/databases/storage."
            );
        }
        return degraded(config);
    }

    let Some(sdk) = sdk else {
        if !mode.is_production() {
            warn!(
                "Appwrite SDK not compiled in. Using safe stubs for client/databases/storage. Build with the `appwrite` feature to enable full functionality."
            );
        }
        return degraded(config);
    };

    let mut base = match sdk.new_client() {
        Ok(base) => base,
        Err(e) => {
            if !mode.is_production() {
                warn!(sdk = sdk.name(), error = %e, "Appwrite SDK not initialized. Using safe stubs for client/databases/storage.");
            }
            return degraded(config);
        }
    };

    configure(base.as_mut(), config);

    let databases = match base.databases() {
        Ok(databases) => ClientHandle::Live(databases),
        Err(e) => {
            if !mode.is_production() {
                warn!(error = %e, "Databases client unavailable, using stub.");
            }
            ClientHandle::Stub(ServiceName::Databases)
        }
    };

    let storage = match base.storage() {
        Ok(storage) => ClientHandle::Live(storage),
        Err(e) => {
            if !mode.is_production() {
                warn!(error = %e, "Storage client unavailable, using stub.");
            }
            ClientHandle::Stub(ServiceName::Storage)
        }
    };

    let clients = Clients {
        client: ClientHandle::Live(Arc::from(base)),
        databases,
        storage,
    };
    info!(
        sdk = sdk.name(),
        endpoint = %config.endpoint,
        status = ?clients.status(),
        "Appwrite clients initialized."
    );
    clients
}

/// Runs the settings through the stub base client, which skips each one, and
/// returns three stubs.
fn degraded(config: &AppwriteEnv) -> Clients {
    configure(&mut StubClient, config);
    Clients::stubs()
}

fn configure(base: &mut dyn BaseClient, config: &AppwriteEnv) {
    skip_unsupported("endpoint", base.set_endpoint(&config.endpoint));
    skip_unsupported("project", base.set_project(&config.project_id));
    if !config.api_key.is_empty() {
        skip_unsupported("key", base.set_key(&config.api_key));
    }
}

fn skip_unsupported(setting: &str, outcome: Setting) {
    if outcome == Setting::Unsupported {
        debug!(setting, "SDK client does not support this setting, skipped.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::SdkError,
        services::{
            DocumentStore, MockBaseClient, MockDocumentStore, MockObjectStore, MockSdk,
            ObjectStore,
        },
    };

    fn live_databases() -> Arc<dyn DocumentStore> {
        Arc::new(MockDocumentStore::new())
    }

    fn live_storage() -> Arc<dyn ObjectStore> {
        Arc::new(MockObjectStore::new())
    }

    fn configured_env() -> AppwriteEnv {
        AppwriteEnv {
            endpoint: "https://cdn.example.com/v1".to_string(),
            project_id: "proj1".to_string(),
            api_key: String::new(),
        }
    }

    fn permissive_client() -> MockBaseClient {
        let mut client = MockBaseClient::new();
        client.expect_set_endpoint().return_const(Setting::Applied);
        client.expect_set_project().return_const(Setting::Applied);
        client.expect_set_key().return_const(Setting::Applied);
        client
    }

    fn sdk_returning(build: fn() -> MockBaseClient) -> MockSdk {
        let mut sdk = MockSdk::new();
        sdk.expect_name().return_const("mock");
        sdk.expect_new_client()
            .times(1)
            .returning(move || {
                let client: Box<dyn BaseClient> = Box::new(build());
                Ok(client)
            });
        sdk
    }

    #[test]
    fn test_empty_endpoint_yields_stubs_without_loading_sdk() {
        let mut sdk = MockSdk::new();
        sdk.expect_name().return_const("mock");
        sdk.expect_new_client().times(0);

        let env = AppwriteEnv {
            endpoint: String::new(),
            project_id: "proj1".to_string(),
            api_key: "key".to_string(),
        };
        for mode in [RuntimeMode::Development, RuntimeMode::Production] {
            let clients = build_clients(&env, Some(&sdk), mode);
            assert!(clients.is_fully_degraded());
        }
    }

    #[test]
    fn test_missing_sdk_yields_stubs() {
        let clients = build_clients(&configured_env(), None, RuntimeMode::Development);
        assert!(clients.is_fully_degraded());
    }

    #[test]
    fn test_sdk_construction_failure_yields_stubs() {
        let mut sdk = MockSdk::new();
        sdk.expect_name().return_const("mock");
        sdk.expect_new_client()
            .times(1)
            .returning(|| Err(SdkError::construction(ServiceName::Client, "no runtime")));

        let clients = build_clients(&configured_env(), Some(&sdk), RuntimeMode::Development);
        assert!(clients.is_fully_degraded());
    }

    #[test]
    fn test_all_services_live() {
        let sdk = sdk_returning(|| {
            let mut client = permissive_client();
            client
                .expect_databases()
                .returning(|| Ok(live_databases()));
            client
                .expect_storage()
                .returning(|| Ok(live_storage()));
            client
        });

        let clients = build_clients(&configured_env(), Some(&sdk), RuntimeMode::Production);
        assert_eq!(
            clients.status(),
            ClientsStatus {
                client: HandleStatus::Live,
                databases: HandleStatus::Live,
                storage: HandleStatus::Live,
            }
        );
    }

    #[test]
    fn test_database_failure_degrades_only_databases() {
        let sdk = sdk_returning(|| {
            let mut client = permissive_client();
            client.expect_databases().returning(|| {
                Err(SdkError::construction(ServiceName::Databases, "boom"))
            });
            client
                .expect_storage()
                .returning(|| Ok(live_storage()));
            client
        });

        let clients = build_clients(&configured_env(), Some(&sdk), RuntimeMode::Development);
        assert!(clients.client.is_live());
        assert!(clients.databases.is_stub());
        assert!(clients.storage.is_live());
    }

    #[test]
    fn test_every_service_failing_keeps_base_client_live() {
        let sdk = sdk_returning(|| {
            let mut client = permissive_client();
            client
                .expect_databases()
                .returning(|| Err(SdkError::Missing(ServiceName::Databases)));
            client
                .expect_storage()
                .returning(|| Err(SdkError::construction(ServiceName::Storage, "boom")));
            client
        });

        let clients = build_clients(&configured_env(), Some(&sdk), RuntimeMode::Development);
        assert!(clients.client.is_live());
        assert!(clients.databases.is_stub());
        assert!(clients.storage.is_stub());
        assert!(!clients.is_fully_degraded());
    }

    #[test]
    fn test_unsupported_settings_are_skipped() {
        let sdk = sdk_returning(|| {
            let mut client = MockBaseClient::new();
            client
                .expect_set_endpoint()
                .withf(|endpoint| endpoint == "https://cdn.example.com/v1")
                .times(1)
                .return_const(Setting::Applied);
            client
                .expect_set_project()
                .times(1)
                .return_const(Setting::Unsupported);
            client.expect_set_key().times(0);
            client
                .expect_databases()
                .returning(|| Ok(live_databases()));
            client
                .expect_storage()
                .returning(|| Ok(live_storage()));
            client
        });

        let clients = build_clients(&configured_env(), Some(&sdk), RuntimeMode::Development);
        assert!(clients.databases.is_live());
    }

    #[test]
    fn test_api_key_applied_when_present() {
        let sdk = sdk_returning(|| {
            let mut client = MockBaseClient::new();
            client.expect_set_endpoint().return_const(Setting::Applied);
            client.expect_set_project().return_const(Setting::Applied);
            client
                .expect_set_key()
                .withf(|key| key == "secret")
                .times(1)
                .return_const(Setting::Applied);
            client
                .expect_databases()
                .returning(|| Ok(live_databases()));
            client
                .expect_storage()
                .returning(|| Ok(live_storage()));
            client
        });

        let mut env = configured_env();
        env.api_key = "secret".to_string();
        let clients = build_clients(&env, Some(&sdk), RuntimeMode::Development);
        assert!(clients.client.is_live());
    }

    mod diagnostics {
        use super::*;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use tracing::{Event, Level, Metadata, Subscriber, span};

        /// Counts WARN events seen on the current thread.
        struct WarnCounter(Arc<AtomicUsize>);

        impl Subscriber for WarnCounter {
            fn enabled(&self, _: &Metadata<'_>) -> bool {
                true
            }

            fn new_span(&self, _: &span::Attributes<'_>) -> span::Id {
                span::Id::from_u64(1)
            }

            fn record(&self, _: &span::Id, _: &span::Record<'_>) {}

            fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}

            fn event(&self, event: &Event<'_>) {
                if *event.metadata().level() == Level::WARN {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }

            fn enter(&self, _: &span::Id) {}

            fn exit(&self, _: &span::Id) {}
        }

        fn warnings_while(build: impl FnOnce() -> Clients) -> (Clients, usize) {
            let count = Arc::new(AtomicUsize::new(0));
            let clients =
                tracing::subscriber::with_default(WarnCounter(Arc::clone(&count)), build);
            (clients, count.load(Ordering::SeqCst))
        }

        fn unconfigured_env() -> AppwriteEnv {
            AppwriteEnv {
                endpoint: String::new(),
                project_id: "proj1".to_string(),
                api_key: "key".to_string(),
            }
        }

        #[test]
        fn test_empty_endpoint_warns_only_outside_production() {
            let (clients, warnings) = warnings_while(|| {
                build_clients(&unconfigured_env(), None, RuntimeMode::Development)
            });
            assert!(clients.is_fully_degraded());
            assert!(warnings >= 1);

            let (clients, warnings) = warnings_while(|| {
                build_clients(&unconfigured_env(), None, RuntimeMode::Production)
            });
            assert!(clients.is_fully_degraded());
            assert_eq!(warnings, 0);
        }

        #[test]
        fn test_missing_sdk_warns_only_outside_production() {
            let (clients, warnings) = warnings_while(|| {
                build_clients(&configured_env(), None, RuntimeMode::Development)
            });
            assert!(clients.is_fully_degraded());
            assert!(warnings >= 1);

            let (clients, warnings) = warnings_while(|| {
                build_clients(&configured_env(), None, RuntimeMode::Production)
            });
            assert!(clients.is_fully_degraded());
            assert_eq!(warnings, 0);
        }
    }

    #[test]
    fn test_stub_clients_debug_does_not_fail() {
        let clients = Clients::stubs();
        let printed = format!("{:?}", clients);
        assert!(printed.contains("Stub(databases)"));
        assert!(printed.contains("Stub(storage)"));
    }
}
