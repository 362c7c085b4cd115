//! Thin proxy client for the upstream chat-completion service.
//!
//! The platform treats the chatbot as a black box: a string goes up, a
//! string comes back. Upstream semantics (model, prompting) are configured
//! server-side and never exposed to clients.

use serde::{Deserialize, Serialize};

/// System prompt prepended to every conversation.
const SYSTEM_PROMPT: &str = "You are a helpful assistant for a pet adoption platform. \
    Answer questions about pet care, the adoption process, and lost-pet reports.";

#[derive(Debug, Serialize)]
struct UpstreamRequest<'a> {
    messages: Vec<UpstreamMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct UpstreamMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct UpstreamResponse {
    reply: String,
}

/// Client for the configured chat-completion upstream.
pub struct ChatbotClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl ChatbotClient {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }

    /// Send one user message upstream and return the reply text.
    pub async fn ask(&self, message: &str) -> Result<String, reqwest::Error> {
        let body = UpstreamRequest {
            messages: vec![
                UpstreamMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                UpstreamMessage {
                    role: "user",
                    content: message,
                },
            ],
        };

        let mut request = self.http.post(&self.api_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let parsed: UpstreamResponse = response.json().await?;
        Ok(parsed.reply)
    }
}
