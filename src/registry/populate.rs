use std::env::VarError;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

use super::registry::Registry;
use crate::config::{Config, ProviderActivationPolicy, ProviderConfig};
use crate::providers::providers::{
    DeepSeekProvider, MoonshotProvider, OpenRouterProvider, ProviderIdentifier, ZhipuProvider,
};

/// The provider that serves unclaimed identifiers unless the
/// configuration names another. OpenRouter fronts the broadest set of
/// upstream organizations, which makes it the only sensible catch-all.
const DEFAULT_PROVIDER: ProviderIdentifier = ProviderIdentifier::OpenRouter;

const OPENROUTER_ENV_KEY_VAR: &str = "OPENROUTER_API_KEY";
const DEEPSEEK_ENV_KEY_VAR: &str = "DEEPSEEK_API_KEY";
const ZHIPU_ENV_KEY_VAR: &str = "ZHIPU_API_KEY";
const MOONSHOT_ENV_KEY_VAR: &str = "MOONSHOT_API_KEY";

#[derive(Error, Debug)]
pub enum Error {
    /// A provider is forced on but holds no credential
    #[error(
        "the \"{0}\" provider is activated but no API key is configured, \
         add one to the config or define {1}"
    )]
    MissingApiKey(ProviderIdentifier, &'static str),

    /// The configured default provider names an unknown token
    #[error("unknown default provider \"{0}\"")]
    UnknownDefaultProvider(String),

    /// The environment variable exists but does not hold unicode
    #[error("failed to parse the contents of {0}")]
    MalformedEnvKey(&'static str),
}

fn env_api_key(var: &'static str) -> Result<Option<String>, Error> {
    match std::env::var(var) {
        Ok(api_key) => Ok(Some(api_key)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(Error::MalformedEnvKey(var)),
    }
}

/// Resolve the credential for one provider under its activation policy.
/// A key in the config wins over the environment.
fn activated_api_key(
    id: ProviderIdentifier,
    provider: &ProviderConfig,
    var: &'static str,
) -> Result<Option<String>, Error> {
    if matches!(provider.activate, ProviderActivationPolicy::Disabled) {
        return Ok(None);
    }

    let api_key = match &provider.api_key {
        Some(api_key) => Some(api_key.clone()),
        None => env_api_key(var)?,
    };

    if matches!(provider.activate, ProviderActivationPolicy::Enabled) && api_key.is_none() {
        return Err(Error::MissingApiKey(id, var));
    }

    Ok(api_key)
}

/// Populate a registry with the providers whose credentials are
/// available. A provider without a credential is left out entirely: it
/// is never a routing candidate and never the fallback.
pub fn populated_registry(config: &Config) -> Result<Registry, Error> {
    let mut registry = Registry::new();

    let providers = &config.providers;

    if let Some(api_key) = activated_api_key(
        ProviderIdentifier::OpenRouter,
        &providers.openrouter,
        OPENROUTER_ENV_KEY_VAR,
    )? {
        registry.add_provider(Box::new(OpenRouterProvider::with_api_key(&api_key)));
    }

    if let Some(api_key) = activated_api_key(
        ProviderIdentifier::DeepSeek,
        &providers.deepseek,
        DEEPSEEK_ENV_KEY_VAR,
    )? {
        registry.add_provider(Box::new(DeepSeekProvider::with_api_key(&api_key)));
    }

    if let Some(api_key) = activated_api_key(
        ProviderIdentifier::Zhipu,
        &providers.zhipu,
        ZHIPU_ENV_KEY_VAR,
    )? {
        registry.add_provider(Box::new(ZhipuProvider::with_api_key(&api_key)));
    }

    if let Some(api_key) = activated_api_key(
        ProviderIdentifier::Moonshot,
        &providers.moonshot,
        MOONSHOT_ENV_KEY_VAR,
    )? {
        registry.add_provider(Box::new(MoonshotProvider::with_api_key(&api_key)));
    }

    let default_provider = match &config.default_provider {
        Some(name) => ProviderIdentifier::from_str(name)
            .map_err(|_| Error::UnknownDefaultProvider(name.clone()))?,
        None => DEFAULT_PROVIDER,
    };

    if registry.contains(default_provider) {
        registry.set_default_provider(default_provider);
    } else {
        debug!(
            "default provider \"{}\" is not activated, identifiers without \
             a recognized namespace will not resolve",
            default_provider
        );
    }

    if registry.is_empty() {
        warn!("no provider credentials are available, every query will fail");
    }

    Ok(registry)
}
