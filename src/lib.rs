//! Provider-routed chat completions with concurrent fan-out.
//!
//! `quorum` sends a chat message history to one or many chat model
//! backends. A model is named by an identifier such as
//! "deepseek/deepseek-chat": the namespace before the `/` selects the
//! backend, and each backend adapter translates the shared request
//! shape into its own wire format. Queries against several models run
//! concurrently, and a backend failure is never observable as an error.
//! Every query independently produces either a response or nothing.
//!
//! The free functions [`query_model`] and [`query_models_parallel`]
//! operate on a process-wide registry built lazily, on first use, from
//! the discovered configuration and the credentials in the environment.
//! Callers needing their own registry (or their own configuration) can
//! build one with [`registry::populated_registry`] and use the
//! [`dispatch`] functions directly.

pub mod chat;
pub mod config;
pub mod dispatch;
pub mod providers;
pub mod registry;

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

pub use chat::Message;
pub use config::Config;
pub use providers::providers::ProviderIdentifier;
pub use providers::{ChatProvider, ProviderResponse};
pub use registry::{populated_registry, Registry};

lazy_static! {
    // Built once, on first use. Both failure modes downgrade rather
    // than abort: an unreadable config falls back to the defaults, and
    // a population error leaves an empty registry behind, where every
    // query resolves to nothing.
    static ref GLOBAL_CONFIG: Config = match config::read_config(None) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "falling back to the default configuration");

            Config::default()
        }
    };
    static ref GLOBAL_REGISTRY: Registry = match populated_registry(&GLOBAL_CONFIG) {
        Ok(registry) => registry,
        Err(err) => {
            warn!(error = %err, "failed to populate the provider registry");

            Registry::new()
        }
    };
}

/// Query a single model through the process-wide registry.
///
/// The outcome is `None` when no provider serves the identifier or when
/// the query fails in any way.
pub async fn query_model(
    model: &str,
    messages: &[Message],
    timeout: Duration,
) -> Option<ProviderResponse> {
    dispatch::query_model(&GLOBAL_REGISTRY, model, messages, timeout).await
}

/// Query several models concurrently through the process-wide registry,
/// using the configured default timeout for each query.
///
/// Returns one entry per unique identifier; an entry is `None` when
/// that model's query failed. The call returns once every query has
/// completed.
pub async fn query_models_parallel(
    models: &[String],
    messages: &[Message],
) -> HashMap<String, Option<ProviderResponse>> {
    dispatch::query_models_parallel(&GLOBAL_REGISTRY, models, messages, GLOBAL_CONFIG.timeout())
        .await
}
