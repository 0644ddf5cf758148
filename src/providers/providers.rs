//! Concrete types for providers, along with their identifier variants

use strum_macros;

/// The `ProviderIdentifier` is a unique per-provider identifier. It is
/// used to differentiate providers at runtime in code which is generic
/// over different providers.
///
/// The `to_string` and `FromStr` forms appear in configuration files and
/// should remain stable.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ProviderIdentifier {
    OpenRouter,
    DeepSeek,
    Zhipu,
    Moonshot,
}

pub use super::deepseek::DeepSeekProvider;
pub use super::moonshot::MoonshotProvider;
pub use super::openrouter::OpenRouterProvider;
pub use super::zhipu::ZhipuProvider;

#[cfg(test)]
mod tests {
    use super::ProviderIdentifier;
    use std::str::FromStr;

    #[test]
    fn identifier_tokens_are_stable() {
        assert_eq!(ProviderIdentifier::OpenRouter.to_string(), "openrouter");
        assert_eq!(ProviderIdentifier::DeepSeek.to_string(), "deepseek");
        assert_eq!(ProviderIdentifier::Zhipu.to_string(), "zhipu");
        assert_eq!(ProviderIdentifier::Moonshot.to_string(), "moonshot");
    }

    #[test]
    fn identifier_tokens_round_trip() {
        for id in [
            ProviderIdentifier::OpenRouter,
            ProviderIdentifier::DeepSeek,
            ProviderIdentifier::Zhipu,
            ProviderIdentifier::Moonshot,
        ] {
            assert_eq!(
                ProviderIdentifier::from_str(&id.to_string()).unwrap(),
                id
            );
        }
    }
}
