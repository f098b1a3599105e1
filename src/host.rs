//! Host application integration.
//!
//! The plugin runs inside a host process it does not control. The host
//! exposes two attachment points, modeled here as the [`HostApp`]
//! trait: merging a router into its web application and subscribing a
//! handler on its websocket message bus.
//!
//! The host's singleton may not exist yet when the plugin loads, so
//! registration goes through [`register_when_ready`]: a bounded number
//! of attempts with a fixed delay in between. Exhausting the attempts
//! yields [`HostError::HostUnavailable`]; the caller decides whether
//! that aborts anything. Registration never blocks plugin
//! construction.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::constants::WEBSOCKET_MESSAGE_TYPE;
use crate::{bridge, server, PluginConfig};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum HostError {
    #[error("host application did not become available")]
    HostUnavailable,

    #[error("router registration failed: {0}")]
    RouterRegistration(String),

    #[error("message handler registration failed: {0}")]
    HandlerRegistration(String),
}

impl serde::Serialize for HostError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

// ============================================================================
// Host contract
// ============================================================================

/// A websocket bus subscriber. Returns `None` for messages it does not
/// claim.
pub type MessageHandler = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// The attachment points the host offers to loaded plugins.
pub trait HostApp: Send + Sync {
    fn register_router(&self, router: Router) -> Result<(), HostError>;

    fn add_message_handler(
        &self,
        message_type: &str,
        handler: MessageHandler,
    ) -> Result<(), HostError>;
}

// ============================================================================
// Plugin
// ============================================================================

/// Everything the plugin contributes to a host, built from explicit
/// configuration. No environment variables, no config files.
pub struct Plugin {
    config: Arc<PluginConfig>,
}

impl Plugin {
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The HTTP surface, ready to merge into the host's router.
    pub fn router(&self) -> Router {
        server::router(Arc::clone(&self.config))
    }

    /// The websocket bus subscriber.
    pub fn message_handler(&self) -> MessageHandler {
        Arc::new(bridge::handle_message)
    }
}

// ============================================================================
// Registration
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(3),
        }
    }
}

/// Registers the plugin once the host singleton is reachable.
///
/// `get_host` is polled up to `retry.attempts` times, sleeping
/// `retry.delay` between attempts. A reachable host that then refuses
/// registration is an immediate error, not a retry.
pub async fn register_when_ready<F>(
    get_host: F,
    plugin: &Plugin,
    retry: RetryConfig,
) -> Result<(), HostError>
where
    F: Fn() -> Option<Arc<dyn HostApp>>,
{
    let attempts = retry.attempts.max(1);

    for attempt in 1..=attempts {
        if let Some(host) = get_host() {
            host.register_router(plugin.router())?;
            host.add_message_handler(WEBSOCKET_MESSAGE_TYPE, plugin.message_handler())?;
            info!(attempt, "plugin registered with host");
            return Ok(());
        }

        warn!(attempt, attempts, "host not ready");
        if attempt < attempts {
            tokio::time::sleep(retry.delay).await;
        }
    }

    error!(attempts, "host never became available");
    Err(HostError::HostUnavailable)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::constants::WEBSOCKET_RESPONSE_TYPE;

    #[derive(Default)]
    struct MockHost {
        routers: AtomicU32,
        handlers: Mutex<Vec<String>>,
    }

    impl HostApp for MockHost {
        fn register_router(&self, _router: Router) -> Result<(), HostError> {
            self.routers.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn add_message_handler(
            &self,
            message_type: &str,
            _handler: MessageHandler,
        ) -> Result<(), HostError> {
            self.handlers.lock().unwrap().push(message_type.to_string());
            Ok(())
        }
    }

    fn test_plugin() -> Plugin {
        Plugin::new(PluginConfig {
            web_root: std::env::temp_dir(),
        })
    }

    fn fast_retry(attempts: u32) -> RetryConfig {
        RetryConfig {
            attempts,
            delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_registers_on_first_attempt() {
        let host = Arc::new(MockHost::default());
        let plugin = test_plugin();
        let get_host = {
            let host = Arc::clone(&host);
            move || Some(Arc::clone(&host) as Arc<dyn HostApp>)
        };

        register_when_ready(get_host, &plugin, fast_retry(3))
            .await
            .unwrap();

        assert_eq!(host.routers.load(Ordering::SeqCst), 1);
        assert_eq!(
            host.handlers.lock().unwrap().as_slice(),
            &[WEBSOCKET_MESSAGE_TYPE.to_string()]
        );
    }

    #[tokio::test]
    async fn test_registers_after_host_becomes_available() {
        let host = Arc::new(MockHost::default());
        let plugin = test_plugin();
        let polls = AtomicU32::new(0);

        let get_host = {
            let host = Arc::clone(&host);
            move || {
                if polls.fetch_add(1, Ordering::SeqCst) < 2 {
                    None
                } else {
                    Some(Arc::clone(&host) as Arc<dyn HostApp>)
                }
            }
        };

        register_when_ready(get_host, &plugin, fast_retry(3))
            .await
            .unwrap();

        assert_eq!(host.routers.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_bounded_attempts() {
        let plugin = test_plugin();
        let polls = AtomicU32::new(0);

        let result = register_when_ready(
            || {
                polls.fetch_add(1, Ordering::SeqCst);
                None
            },
            &plugin,
            fast_retry(3),
        )
        .await;

        assert!(matches!(result, Err(HostError::HostUnavailable)));
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_registration_failure_is_not_retried() {
        struct RefusingHost;

        impl HostApp for RefusingHost {
            fn register_router(&self, _router: Router) -> Result<(), HostError> {
                Err(HostError::RouterRegistration("route conflict".into()))
            }

            fn add_message_handler(
                &self,
                _message_type: &str,
                _handler: MessageHandler,
            ) -> Result<(), HostError> {
                Ok(())
            }
        }

        let plugin = test_plugin();
        let result = register_when_ready(
            || Some(Arc::new(RefusingHost) as Arc<dyn HostApp>),
            &plugin,
            fast_retry(3),
        )
        .await;

        assert!(matches!(result, Err(HostError::RouterRegistration(_))));
    }

    #[test]
    fn test_message_handler_routes_bus_messages() {
        let plugin = test_plugin();
        let handler = plugin.message_handler();

        assert!(handler(&json!({ "type": "something_else" })).is_none());

        let response = handler(&json!({
            "type": WEBSOCKET_MESSAGE_TYPE,
            "action": "bogus",
        }))
        .unwrap();
        assert_eq!(response["type"], WEBSOCKET_RESPONSE_TYPE);
    }
}
