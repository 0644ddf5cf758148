//! The DeepSeek provider
//!
//! DeepSeek serves its own models behind the single `deepseek`
//! namespace, so the default routing policy applies. Its reasoning
//! models report their chain of thought through the `reasoning_content`
//! response field, which is forwarded opaquely.

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use crate::chat::Message;
use crate::providers::chatapi::{self, ChatCompletionsApi};
use crate::providers::providers::ProviderIdentifier;
use crate::providers::{ChatProvider, ProviderResponse};

const DEEPSEEK_ENDPOINT: &str = "https://api.deepseek.com/chat/completions";

pub struct DeepSeekProvider {
    api: ChatCompletionsApi,
}

impl DeepSeekProvider {
    pub fn with_api_key(api_key: &str) -> DeepSeekProvider {
        DeepSeekProvider {
            api: ChatCompletionsApi::new(api_key, DEEPSEEK_ENDPOINT).unwrap(),
        }
    }

    pub(crate) fn with_endpoint(
        api_key: &str,
        endpoint: &str,
    ) -> Result<DeepSeekProvider, chatapi::Error> {
        Ok(DeepSeekProvider {
            api: ChatCompletionsApi::new(api_key, endpoint)?,
        })
    }
}

#[async_trait]
impl ChatProvider for DeepSeekProvider {
    fn id(&self) -> ProviderIdentifier {
        ProviderIdentifier::DeepSeek
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
                reasoning_details: message.reasoning_content,
            }),
            Err(err) => {
                warn!(provider = "deepseek", model, error = %err, "query failed");

                None
            }
        }
    }
}
