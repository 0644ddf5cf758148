use thiserror::Error;

use crate::providers::providers::ProviderIdentifier;
use crate::providers::ChatProvider;

#[derive(Error, Debug)]
pub enum Error {
    /// No provider claims the model identifier and no default provider
    /// is available
    #[error("no provider is available for model \"{0}\"")]
    NoProvider(String),
}

pub struct Registry {
    /// Providers in registration order. Order decides which provider
    /// wins when resolving, so it must stay stable for the registry's
    /// lifetime.
    providers: Vec<Box<dyn ChatProvider>>,
    default_provider: Option<ProviderIdentifier>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry {
            providers: Vec::new(),
            default_provider: None,
        }
    }

    /// Add a provider to the registry.
    ///
    /// Panics if a provider with the same identifier was already added.
    pub fn add_provider(&mut self, provider: Box<dyn ChatProvider>) {
        let id = provider.id();

        if self.contains(id) {
            panic!("the same provider was added to the registry twice");
        }

        self.providers.push(provider);
    }

    /// Designate the provider that serves identifiers no namespace
    /// claims.
    ///
    /// Panics if that provider has not been added to the registry.
    pub fn set_default_provider(&mut self, id: ProviderIdentifier) {
        assert!(
            self.contains(id),
            "the default provider must be registered before it is designated"
        );

        self.default_provider = Some(id);
    }

    pub fn contains(&self, id: ProviderIdentifier) -> bool {
        self.providers.iter().any(|p| p.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn default_provider(&self) -> Option<ProviderIdentifier> {
        self.default_provider
    }

    /// Resolve a model identifier to the provider that serves it.
    ///
    /// Providers are consulted in registration order and the first to
    /// claim the identifier wins. Unclaimed identifiers fall through to
    /// the default provider, if one is designated.
    pub fn resolve(&self, model: &str) -> Result<&dyn ChatProvider, Error> {
        if let Some(provider) = self.providers.iter().find(|p| p.supports_model(model)) {
            return Ok(provider.as_ref());
        }

        self.default_provider
            .and_then(|id| self.providers.iter().find(|p| p.id() == id))
            .map(|p| p.as_ref())
            .ok_or_else(|| Error::NoProvider(model.to_string()))
    }
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::providers::{
        DeepSeekProvider, MoonshotProvider, OpenRouterProvider, ZhipuProvider,
    };

    fn full_registry() -> Registry {
        let mut registry = Registry::new();

        registry.add_provider(Box::new(OpenRouterProvider::with_api_key("test-key")));
        registry.add_provider(Box::new(DeepSeekProvider::with_api_key("test-key")));
        registry.add_provider(Box::new(ZhipuProvider::with_api_key("test-key")));
        registry.add_provider(Box::new(MoonshotProvider::with_api_key("test-key")));

        registry
    }

    #[test]
    fn namespaces_partition_across_providers() {
        let registry = full_registry();

        let expectations = [
            ("deepseek/deepseek-chat", ProviderIdentifier::DeepSeek),
            ("zhipu/glm-4-plus", ProviderIdentifier::Zhipu),
            ("glm/glm-4", ProviderIdentifier::Zhipu),
            ("moonshot/moonshot-v1-8k", ProviderIdentifier::Moonshot),
            ("kimi/moonshot-v1-128k", ProviderIdentifier::Moonshot),
            ("openai/gpt-4o", ProviderIdentifier::OpenRouter),
            ("anthropic/claude-sonnet-4.5", ProviderIdentifier::OpenRouter),
        ];

        for (model, id) in expectations {
            assert_eq!(registry.resolve(model).unwrap().id(), id, "model {}", model);
        }
    }

    #[test]
    fn each_namespaced_identifier_has_exactly_one_claimant() {
        let providers: [Box<dyn ChatProvider>; 4] = [
            Box::new(OpenRouterProvider::with_api_key("test-key")),
            Box::new(DeepSeekProvider::with_api_key("test-key")),
            Box::new(ZhipuProvider::with_api_key("test-key")),
            Box::new(MoonshotProvider::with_api_key("test-key")),
        ];

        for model in [
            "deepseek/x",
            "zhipu/x",
            "glm/x",
            "moonshot/x",
            "kimi/x",
            "openai/x",
            "qwen/x",
        ] {
            let claimants = providers
                .iter()
                .filter(|p| p.supports_model(model))
                .count();

            assert_eq!(claimants, 1, "model {}", model);
        }
    }

    #[test]
    fn unclaimed_identifiers_fall_through_to_the_default() {
        let mut registry = full_registry();

        registry.set_default_provider(ProviderIdentifier::OpenRouter);

        // No namespace
        assert_eq!(
            registry.resolve("deepseek-chat").unwrap().id(),
            ProviderIdentifier::OpenRouter
        );
        // Unclaimed namespace
        assert_eq!(
            registry.resolve("unknown-org/model").unwrap().id(),
            ProviderIdentifier::OpenRouter
        );
    }

    #[test]
    fn unclaimed_identifiers_fail_without_a_default() {
        let registry = full_registry();

        assert!(matches!(
            registry.resolve("deepseek-chat"),
            Err(Error::NoProvider(_))
        ));
        assert!(matches!(
            registry.resolve("unknown-org/model"),
            Err(Error::NoProvider(_))
        ));
    }

    #[test]
    fn resolution_fails_on_an_empty_registry() {
        let registry = Registry::new();

        assert!(matches!(
            registry.resolve("deepseek/deepseek-chat"),
            Err(Error::NoProvider(_))
        ));
    }

    #[test]
    fn resolution_is_deterministic() {
        let registry = full_registry();

        let first = registry.resolve("zhipu/glm-4").unwrap().id();
        let second = registry.resolve("zhipu/glm-4").unwrap().id();

        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "added to the registry twice")]
    fn duplicate_registration_panics() {
        let mut registry = Registry::new();

        registry.add_provider(Box::new(DeepSeekProvider::with_api_key("test-key")));
        registry.add_provider(Box::new(DeepSeekProvider::with_api_key("other-key")));
    }

    #[test]
    #[should_panic(expected = "must be registered")]
    fn unregistered_default_panics() {
        let mut registry = Registry::new();

        registry.set_default_provider(ProviderIdentifier::OpenRouter);
    }
}
