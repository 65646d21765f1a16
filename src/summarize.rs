//! LLM summarization over the Gemini `generateContent` REST API.
//!
//! The [`Summarizer`] trait is the seam the pipeline depends on; tests
//! substitute a stub so no network or API key is needed.

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TIMEOUT_SECS: u64 = 120;

/// Produces a summary for a block of extracted text.
pub trait Summarizer {
    /// Summarizes `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// usable text.
    fn summarize(&self, text: &str) -> Result<String>;
}

/// Gemini-backed [`Summarizer`] using a blocking HTTP client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Builds a client from configuration, reading the API key from the
    /// configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the key variable is unset or the HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            Error::config(format!(
                "API key environment variable '{}' is not set",
                config.api_key_env
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(Error::from)?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            prompt: config.prompt.clone(),
        })
    }
}

impl Summarizer for GeminiClient {
    fn summarize(&self, text: &str) -> Result<String> {
        let url = format!(
            "{GEMINI_BASE_URL}/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": format!("{}: \n {}", self.prompt, text) }]
            }]
        });

        debug!("Requesting summary from model {}", self.model);
        let response = self.client.post(&url).json(&body).send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(Error::summarize(format!(
                "API returned {status}: {}",
                detail.chars().take(500).collect::<String>()
            )));
        }

        let parsed: GenerateContentResponse = response.json()?;
        let summary = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        if summary.trim().is_empty() {
            return Err(Error::summarize("model returned no text"));
        }

        Ok(summary.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "  a summary  " } ] } }
            ]
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(parsed.candidates[0].content.parts[0].text, "  a summary  ");
    }

    #[test]
    fn test_empty_candidates_parse() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = Config::builder()
            .root_dir(temp.path())
            .api_key_env("MKPILOT_TEST_KEY_THAT_IS_NEVER_SET")
            .build()
            .unwrap();

        let result = GeminiClient::from_config(&config);
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
