//! Traits and type definitions for provider-routed chat completions.
//!
//! The `providers` module contains the components for talking to chat
//! model backends. The interface shared by all backends is the
//! [`ChatProvider`] trait, which gives each backend an identity, a
//! routing policy over model identifiers, and a query operation that
//! produces a normalized [`ProviderResponse`].
//!
//! ## Chat Providers
//!
//! Each API service (OpenRouter, DeepSeek, Zhipu, and Moonshot) must
//! implement the [`ChatProvider`] trait to be routable. A provider
//! supports three essential operations:
//! - Routing: decide whether the provider serves a given model
//!   identifier, judged from the namespace portion of the identifier
//!   (the part before the first `/`).
//! - Naming: translate an identifier into the model name its API
//!   expects. Most backends want the bare name with the namespace
//!   stripped, while OpenRouter wants the full identifier.
//! - Query: send one message history and return the message the model
//!   generated in response.
//!
//! ## Error Handling
//!
//! A provider never surfaces an error through [`ChatProvider::query`].
//! Transport failures, non-success statuses, and malformed response
//! bodies are logged where they occur and collapse into `None`, so a
//! failing backend cannot disturb callers fanning a query out across
//! several backends. The wire-level error classification lives in the
//! shared `chatapi` client.

pub(crate) mod chatapi;

mod deepseek;
mod moonshot;
mod openrouter;
mod zhipu;

pub mod providers;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use self::providers::ProviderIdentifier;
use crate::chat::Message;

/// A completion produced by any backend, reduced to the fields shared
/// across them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The content of the generated message, when the backend returned
    /// one.
    pub content: Option<String>,
    /// A backend-specific reasoning payload (chain of thought). Its shape
    /// varies between backends and is passed through opaquely.
    pub reasoning_details: Option<serde_json::Value>,
}

/// A trait implemented by all chat providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the provider identifier.
    fn id(&self) -> ProviderIdentifier;

    /// Returns true if this provider serves `model`.
    ///
    /// The default policy claims identifiers whose namespace equals the
    /// provider identifier's token. An identifier without a namespace is
    /// never claimed. Providers recognizing several namespaces override
    /// this.
    fn supports_model(&self, model: &str) -> bool {
        match model.split_once('/') {
            Some((namespace, _)) => self.id().to_string() == namespace,
            None => false,
        }
    }

    /// Translates `model` into the name the backend's API expects.
    ///
    /// By default the namespace prefix is stripped, and an identifier
    /// without a namespace is returned unchanged. Backends whose payload
    /// wants the full identifier override this to a no-op.
    fn native_model_name<'m>(&self, model: &'m str) -> &'m str {
        match model.split_once('/') {
            Some((_, name)) => name,
            None => model,
        }
    }

    /// Takes a series of messages that are part of a chat conversation
    /// and produces the message generated by the model in response.
    ///
    /// `model` is the backend-native model name, usually obtained from
    /// [`ChatProvider::native_model_name`]. The query is bounded by
    /// `timeout`. Every failure is handled inside the provider and
    /// reported as `None`.
    async fn query(
        &self,
        model: &str,
        messages: &[Message],
        timeout: Duration,
    ) -> Option<ProviderResponse>;
}
