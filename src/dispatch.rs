//! Query dispatch: single-model resolution and concurrent fan-out.
//!
//! The dispatch functions are the crate's entry points for executing
//! queries against a populated registry. They uphold one guarantee the
//! providers alone cannot: no failure of any kind escapes as an error.
//! An identifier that resolves to no provider, a refused connection, an
//! exceeded timeout, a non-success status, or a malformed response body
//! all yield an absent outcome for that model and nothing else.

use futures_util::future::join_all;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

use crate::chat::Message;
use crate::providers::ProviderResponse;
use crate::registry::Registry;

/// Query a single model through whichever provider the registry
/// resolves for it.
///
/// When resolution fails, no backend is contacted and the outcome is
/// `None`.
pub async fn query_model(
    registry: &Registry,
    model: &str,
    messages: &[Message],
    timeout: Duration,
) -> Option<ProviderResponse> {
    let provider = match registry.resolve(model) {
        Ok(provider) => provider,
        Err(err) => {
            warn!(model, error = %err, "failed to resolve a provider");

            return None;
        }
    };

    provider
        .query(provider.native_model_name(model), messages, timeout)
        .await
}

/// Query several models concurrently with the same message history.
///
/// All queries are started before any is awaited and the call returns
/// once every one of them has completed. Each query fences its own
/// failures, so one model's outage delays or degrades only its own map
/// entry. Duplicate identifiers run as independent queries and collapse
/// onto one map key, leaving one entry per unique identifier.
pub async fn query_models_parallel(
    registry: &Registry,
    models: &[String],
    messages: &[Message],
    timeout: Duration,
) -> HashMap<String, Option<ProviderResponse>> {
    let queries = models
        .iter()
        .map(|model| query_model(registry, model, messages, timeout));

    let outcomes = join_all(queries).await;

    models.iter().cloned().zip(outcomes).collect()
}
