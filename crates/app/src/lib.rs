//! Wiring for the order placement domain.
//!
//! Builds the order service from configuration with the in-memory
//! collaborators, and sets up structured logging (tracing).

pub mod config;
pub mod error;
pub mod request;

use domain::{
    InMemoryClientProvider, InMemoryOrderRepository, OrderAccessPolicy, OrderService,
    PremiumProductPolicy,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::{Config, LogFormat};

/// Order service backed by the in-memory collaborators.
pub type DefaultOrderService = OrderService<InMemoryClientProvider, InMemoryOrderRepository>;

/// Builds the access policy with every product policy enabled by the configuration.
pub fn create_access_policy(config: &Config) -> OrderAccessPolicy {
    OrderAccessPolicy::default().with_policy(PremiumProductPolicy::new(
        config.premium_products.iter().cloned(),
    ))
}

/// Creates the default order service with in-memory client lookup and storage.
pub fn create_default_service(config: &Config) -> DefaultOrderService {
    let clients: InMemoryClientProvider = config.clients.iter().cloned().collect();
    let access_policy = create_access_policy(config);
    tracing::debug!(
        clients = clients.client_count(),
        policies = ?access_policy,
        "order service configured"
    );
    OrderService::new(clients, access_policy, InMemoryOrderRepository::new())
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// Does nothing if a subscriber is already installed. An unparsable filter
/// falls back to `info` and logs a warning.
pub fn init_tracing(config: &Config) {
    let (filter, invalid_filter) = match EnvFilter::try_new(&config.log_level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    };
    let json = config.log_format == LogFormat::Json;

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .try_init();

    if let Some(e) = invalid_filter {
        tracing::warn!(filter = %config.log_level, error = %e, "invalid log filter, using info");
    }
}
