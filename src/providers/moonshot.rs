//! The Moonshot provider
//!
//! Moonshot serves the Kimi model family and answers to either its
//! company token or the family token, matched case-insensitively. The
//! API exposes no reasoning field.

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use crate::chat::Message;
use crate::providers::chatapi::{self, ChatCompletionsApi};
use crate::providers::providers::ProviderIdentifier;
use crate::providers::{ChatProvider, ProviderResponse};

const MOONSHOT_ENDPOINT: &str = "https://api.moonshot.cn/v1/chat/completions";

pub struct MoonshotProvider {
    api: ChatCompletionsApi,
}

impl MoonshotProvider {
    pub fn with_api_key(api_key: &str) -> MoonshotProvider {
        MoonshotProvider {
            api: ChatCompletionsApi::new(api_key, MOONSHOT_ENDPOINT).unwrap(),
        }
    }

    pub(crate) fn with_endpoint(
        api_key: &str,
        endpoint: &str,
    ) -> Result<MoonshotProvider, chatapi::Error> {
        Ok(MoonshotProvider {
            api: ChatCompletionsApi::new(api_key, endpoint)?,
        })
    }
}

#[async_trait]
impl ChatProvider for MoonshotProvider {
    fn id(&self) -> ProviderIdentifier {
        ProviderIdentifier::Moonshot
    }

    fn supports_model(&self, model: &str) -> bool {
        match model.split_once('/') {
            Some((namespace, _)) => {
                let namespace = namespace.to_lowercase();

                namespace == "moonshot" || namespace == "kimi"
            }
            None => false,
        }
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
                reasoning_details: None,
            }),
            Err(err) => {
                warn!(provider = "moonshot", model, error = %err, "query failed");

                None
            }
        }
    }
}
