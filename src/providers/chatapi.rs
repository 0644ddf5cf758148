//! A utility module with helpers for making chat completion API requests.
//!
//! Every backend served by this crate speaks the same completions
//! dialect: a JSON POST carrying a model name and a message history,
//! answered with a JSON object whose first choice holds the generated
//! message. The [`ChatCompletionsApi`] client implements that dialect
//! once. Providers differ only in their endpoint, their routing policy,
//! and which reasoning field (if any) they surface.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::chat::Message;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    /// The endpoint is not a URL that can be used in a network request
    #[error("invalid endpoint")]
    InvalidEndpoint(
        #[from]
        #[source]
        url::ParseError,
    ),

    /// The request could not be sent or the transport broke down
    /// mid-response. Connection errors and exceeded timeouts land here.
    #[error("request failed: {0}")]
    RequestFailed(
        #[from]
        #[source]
        reqwest::Error,
    ),

    /// The request was malformed or missing a required parameter
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An API key was not accepted or lacks the needed permissions
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The requested resource does not exist. This likely means the
    /// requested model is unknown to the backend.
    #[error("not found: {0}")]
    NotFound(String),

    /// A rate limit was reached or a quota was exceeded
    #[error("rate limited: {0}")]
    RateLimit(String),

    /// The backend is currently overloaded
    #[error("api overloaded: {0}")]
    ApiOverloaded(String),

    /// The backend encountered an internal error
    #[error("internal server error: {0}")]
    InternalError(String),

    /// Some unknown status was returned by the API
    #[error("unexpected status {0}: {1}")]
    UnknownStatus(u16, String),

    /// A success status whose body violated the expected response shape
    #[error("malformed response: {0}")]
    MalformedResponse(&'static str),
}

impl Error {
    fn from_status(status: StatusCode, body: String) -> Error {
        match status.as_u16() {
            400 | 409 | 422 => Error::BadRequest(body),
            401 | 403 => Error::Authentication(body),
            404 => Error::NotFound(body),
            429 => Error::RateLimit(body),
            503 => Error::ApiOverloaded(body),
            500..=599 => Error::InternalError(body),
            status => Error::UnknownStatus(status, body),
        }
    }
}

/* Structures to serialize /chat/completions */

#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'o> {
    model: &'o str,
    messages: &'o [Message],
}

/* Structures to deserialize /chat/completions */

/// The message of the first choice, holding the fields the providers
/// care about. Backends report reasoning under different names; both are
/// captured here and the provider picks the one its backend defines.
#[derive(Deserialize, Debug)]
pub(crate) struct AssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reasoning_content: Option<serde_json::Value>,
    #[serde(default)]
    pub reasoning_details: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize, Debug)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

pub(crate) struct ChatCompletionsApi {
    endpoint: Url,
    api_key: String,
}

impl ChatCompletionsApi {
    pub(crate) fn new(api_key: &str, endpoint: &str) -> Result<ChatCompletionsApi, Error> {
        let endpoint = Url::parse(endpoint)?;

        Ok(ChatCompletionsApi {
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    /// POSTs one completion request and extracts the first choice's
    /// message. The messages are serialized in the order given, verbatim.
    pub(crate) async fn completion(
        &self,
        model: &str,
        messages: &[Message],
        timeout: Duration,
    ) -> Result<AssistantMessage, Error> {
        let res = Client::new()
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&ChatCompletionRequest { model, messages })
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();

            return Err(Error::from_status(status, body));
        }

        let completion: ChatCompletion = res
            .json()
            .await
            .map_err(|_| Error::MalformedResponse("body is not a chat completion object"))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(Error::MalformedResponse("completion contains no choices"))?;

        Ok(choice.message)
    }
}
