use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::MatcherConfig;

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Send `prompt` as a single user message and return the text of the first
/// choice. One attempt, bounded by the configured timeout.
pub async fn complete(
    client: &reqwest::Client,
    config: &MatcherConfig,
    prompt: &str,
) -> Result<String> {
    let api_key = config
        .api_key
        .as_deref()
        .context("No API key configured for chat completion")?;
    let url = format!("{}/v1/chat/completions", config.base_url.trim_end_matches('/'));

    let req = ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }],
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };

    let resp = client
        .post(&url)
        .timeout(config.timeout())
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await
        .context("Failed to call chat completion API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Chat completion API returned {status}: {body}");
    }

    let body: ChatCompletionResponse = resp
        .json()
        .await
        .context("Failed to decode chat completion response")?;

    body.choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .context("Chat completion response contained no choices")
}
