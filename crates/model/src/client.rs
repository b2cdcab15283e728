use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ChatMessage, GenerationParams, ModelError, TextGenerator};

/// Client for one hosted text-generation endpoint speaking the
/// chat-completions protocol.
///
/// Stateless apart from connection pooling; the whole round-trip is bounded
/// by the timeout given at construction, and a timeout surfaces as a
/// transport error like any other network failure.
#[derive(Clone)]
pub struct EndpointClient {
    endpoint_url: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

impl EndpointClient {
    pub fn new(
        endpoint_url: String,
        token: String,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint_url,
            token,
            client,
        })
    }

    async fn chat(
        &self,
        messages: &[ChatMessage],
        params: GenerationParams,
    ) -> Result<String, ModelError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.endpoint_url.trim_end_matches('/')
        );

        let request = ChatRequest {
            messages,
            max_tokens: params.max_new_tokens,
            temperature: params.temperature,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "text-generation endpoint refused request");
            return Err(ModelError::Status(status));
        }

        let chat_response: ChatResponse = response.json().await?;
        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(ModelError::EmptyResponse)?;

        Ok(choice.message.content)
    }
}

impl TextGenerator for EndpointClient {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        params: GenerationParams,
    ) -> Result<String, ModelError> {
        self.chat(messages, params).await
    }
}
