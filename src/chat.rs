//! Type definitions for chat primitives
//!

use serde::{Deserialize, Serialize};

/// A `Message` in a chat conversation.
///
/// The `role` names the author of the message. Backends accept a small
/// open set of roles ("system", "user", "assistant", and occasionally
/// others); the role is carried to the wire verbatim and is never
/// validated or rewritten by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The author of the message
    pub role: String,
    /// The contents of the message
    pub content: String,
}

impl Message {
    pub fn new(role: String, content: String) -> Message {
        Message { role, content }
    }

    /// An authoritative message used to instruct the model. Usually, it
    /// appears as the first message in a dialog.
    pub fn system(content: String) -> Message {
        Message::new("system".to_string(), content)
    }

    /// A message authored by the user
    pub fn user(content: String) -> Message {
        Message::new("user".to_string(), content)
    }

    /// A message authored by a model
    pub fn assistant(content: String) -> Message {
        Message::new("assistant".to_string(), content)
    }
}
