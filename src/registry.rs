//! The registry handles provider resolution. It is populated once, at
//! startup, with the providers whose API credentials are available. When
//! a caller names a model, it uses a "model identifier". In BNF:
//!
//! ```text
//! <model identifier> := <namespace> "/" <model name> | <model name>
//! ```
//!
//! The namespace selects a backend. For example, "deepseek/deepseek-chat"
//! is served by the DeepSeek provider because it claims the `deepseek`
//! namespace. An identifier without a namespace, or one whose namespace
//! no registered provider claims, falls through to the default provider.
//! The default is an explicit configuration choice rather than an
//! artifact of registration order, so it stays the same across
//! deployments regardless of which credentials happen to exist. If the
//! configured default holds no credential, there is no fallback and
//! resolution of unclaimed identifiers fails.
//!
//! Resolution is deterministic: providers are consulted in registration
//! order and the first to claim an identifier serves it.

pub mod populate;
pub mod registry;

pub use self::populate::populated_registry;
pub use self::registry::Registry;
