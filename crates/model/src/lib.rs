pub mod client;

pub use client::EndpointClient;

use std::future::Future;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request to text-generation endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("text-generation endpoint returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("text-generation endpoint returned no choices")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message in a chat-style prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Fixed generation parameters for one call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
}

/// Capability seam over a black-box text-generation service.
///
/// The orchestrator only depends on this trait; production wires in two
/// configured [`EndpointClient`] instances, tests substitute fakes.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        messages: &[ChatMessage],
        params: GenerationParams,
    ) -> impl Future<Output = Result<String, ModelError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let message = ChatMessage::system("be careful");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be careful");

        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
    }
}
