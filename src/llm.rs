/* src/llm.rs */

use crate::git::StagedFile;
use crate::prompt::SYSTEM_PROMPT;
use crate::suggestions::{CommitSuggestion, fallback_suggestions, parse_suggestions};
use anyhow::{Context, Result, bail};
use serde::Deserialize;

const API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const MAX_TOKENS: u32 = 2048;
const TEMPERATURE: f32 = 0.7;

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

pub struct GroqService {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GroqService {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            model,
        }
    }

    /// One attempt, then a deterministic degraded result. Any request failure
    /// (network, auth, model) is replaced by the four flagged fallback
    /// suggestions; a successful call whose text cannot be parsed goes through
    /// the parser's own fallback chain and may yield an empty list.
    pub fn generate(&self, prompt: &str, staged_files: &[StagedFile]) -> Vec<CommitSuggestion> {
        match self.request(prompt) {
            Ok(text) => parse_suggestions(&text),
            Err(_) => fallback_suggestions(staged_files),
        }
    }

    fn request(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        let res = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .context("Failed to send request to Groq API")?;

        if !res.status().is_success() {
            let status = res.status();
            let error_body = res
                .text()
                .unwrap_or_else(|_| "Could not read error body".to_string());
            bail!("Groq API request failed with status: {status}\nBody: {error_body}");
        }

        let response: ChatResponse = res.json().context("Failed to parse Groq API response")?;
        let content = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            bail!("No response from Groq API");
        }
        Ok(content)
    }
}
