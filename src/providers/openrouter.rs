//! The OpenRouter provider
//!
//! OpenRouter fronts many upstream organizations behind one API, so it
//! claims a fixed set of namespaces rather than a single token. Its
//! payload also differs from the other backends in that it wants the
//! full `namespace/name` identifier as the model, not the bare name.

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use crate::chat::Message;
use crate::providers::chatapi::{self, ChatCompletionsApi};
use crate::providers::providers::ProviderIdentifier;
use crate::providers::{ChatProvider, ProviderResponse};

const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

// Namespaces OpenRouter is known to serve. Routing is namespace-based,
// so this table needs a new entry whenever another upstream organization
// should be reachable through OpenRouter.
const SUPPORTED_NAMESPACES: [&str; 10] = [
    "openai",
    "anthropic",
    "google",
    "meta-llama",
    "x-ai",
    "mistralai",
    "microsoft",
    "cohere",
    "perplexity",
    "qwen",
];

pub struct OpenRouterProvider {
    api: ChatCompletionsApi,
}

impl OpenRouterProvider {
    pub fn with_api_key(api_key: &str) -> OpenRouterProvider {
        OpenRouterProvider {
            api: ChatCompletionsApi::new(api_key, OPENROUTER_ENDPOINT).unwrap(),
        }
    }

    pub(crate) fn with_endpoint(
        api_key: &str,
        endpoint: &str,
    ) -> Result<OpenRouterProvider, chatapi::Error> {
        Ok(OpenRouterProvider {
            api: ChatCompletionsApi::new(api_key, endpoint)?,
        })
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn id(&self) -> ProviderIdentifier {
        ProviderIdentifier::OpenRouter
    }

    fn supports_model(&self, model: &str) -> bool {
        match model.split_once('/') {
            Some((namespace, _)) => SUPPORTED_NAMESPACES.contains(&namespace),
            None => false,
        }
    }

    // OpenRouter routes on the full identifier (e.g. "openai/gpt-4o")
    fn native_model_name<'m>(&self, model: &'m str) -> &'m str {
        model
    }

    async fn query(
        &self,
        model: &str,
        messages: &[Message],
        timeout: Duration,
    ) -> Option<ProviderResponse> {
        match self.api.completion(model, messages, timeout).await {
            Ok(message) => Some(ProviderResponse {
                content: message.content,
                reasoning_details: message.reasoning_details,
            }),
            Err(err) => {
                warn!(provider = "openrouter", model, error = %err, "query failed");

                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_the_namespaces_it_fronts() {
        let provider = OpenRouterProvider::with_api_key("test-key");

        assert!(provider.supports_model("openai/gpt-4o"));
        assert!(provider.supports_model("anthropic/claude-sonnet-4.5"));
        assert!(provider.supports_model("meta-llama/llama-3.1-70b"));
        assert!(provider.supports_model("x-ai/grok-4"));

        assert!(!provider.supports_model("deepseek/deepseek-chat"));
        assert!(!provider.supports_model("zhipu/glm-4-plus"));
        assert!(!provider.supports_model("unknown-org/some-model"));
        assert!(!provider.supports_model("gpt-4o"));
    }

    #[test]
    fn namespace_match_is_case_sensitive() {
        let provider = OpenRouterProvider::with_api_key("test-key");

        assert!(!provider.supports_model("OpenAI/gpt-4o"));
    }

    #[test]
    fn keeps_the_full_identifier_as_the_model_name() {
        let provider = OpenRouterProvider::with_api_key("test-key");

        assert_eq!(
            provider.native_model_name("openai/gpt-4o"),
            "openai/gpt-4o"
        );
    }
}
