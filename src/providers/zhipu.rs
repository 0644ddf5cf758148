//! The Zhipu provider
//!
//! Zhipu serves the GLM model family and answers to either its company
//! token or the family token, matched case-insensitively. The API
//! exposes no reasoning field.

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use crate::chat::Message;
use crate::providers::chatapi::{self, ChatCompletionsApi};
use crate::providers::providers::ProviderIdentifier;
use crate::providers::{ChatProvider, ProviderResponse};

const ZHIPU_ENDPOINT: &str = "https://open.bigmodel.cn/api/paas/v4/chat/completions";

pub struct ZhipuProvider {
    api: ChatCompletionsApi,
}

impl ZhipuProvider {
    pub fn with_api_key(api_key: &str) -> ZhipuProvider {
        ZhipuProvider {
            api: ChatCompletionsApi::new(api_key, ZHIPU_ENDPOINT).unwrap(),
        }
    }

    pub(crate) fn with_endpoint(
        api_key: &str,
        endpoint: &str,
    ) -> Result<ZhipuProvider, chatapi::Error> {
        Ok(ZhipuProvider {
            api: ChatCompletionsApi::new(api_key, endpoint)?,
        })
    }
}

#[async_trait]
impl ChatProvider for ZhipuProvider {
    fn id(&self) -> ProviderIdentifier {
        ProviderIdentifier::Zhipu
    }

    fn supports_model(&self, model: &str) -> bool {
        match model.split_once('/') {
            Some((namespace, _)) => {
                let namespace = namespace.to_lowercase();

                namespace == "zhipu" || namespace == "glm"
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
                warn!(provider = "zhipu", model, error = %err, "query failed");

                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_both_the_company_and_family_namespaces() {
        let provider = ZhipuProvider::with_api_key("test-key");

        assert!(provider.supports_model("zhipu/glm-4-plus"));
        assert!(provider.supports_model("glm/glm-4"));
        assert!(provider.supports_model("GLM/glm-4"));

        assert!(!provider.supports_model("deepseek/deepseek-chat"));
        assert!(!provider.supports_model("glm-4"));
    }

    #[test]
    fn strips_the_namespace_from_the_model_name() {
        let provider = ZhipuProvider::with_api_key("test-key");

        assert_eq!(provider.native_model_name("zhipu/glm-4-plus"), "glm-4-plus");
        assert_eq!(provider.native_model_name("glm/glm-4"), "glm-4");
    }
}
