use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{GenerateFuture, TextGenerator};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the `generateContent` endpoint of the Gemini REST API.
pub(crate) struct GeminiClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
pub(super) struct GenerateRequest<'a> {
    pub(super) contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct Content<'a> {
    pub(super) parts: Vec<PartOut<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct PartOut<'a> {
    pub(super) text: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartIn>,
}

#[derive(Debug, Deserialize)]
struct PartIn {
    text: Option<String>,
}

impl<'a> GenerateRequest<'a> {
    pub(super) fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![PartOut { text: prompt }],
            }],
        }
    }
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, trimmed.
    pub(super) fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl GeminiClient {
    pub(crate) fn new(endpoint: &str, model: &str, api_key: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            url: generate_url(endpoint, model),
            api_key: api_key.to_string(),
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let resp = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::new(prompt))
            .send()
            .await
            .context("gemini request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("gemini error: {status} {txt}");
        }

        let out: GenerateResponse = resp.json().await.context("parse gemini response")?;
        out.text()
            .ok_or_else(|| anyhow::anyhow!("gemini response had no text"))
    }
}

impl TextGenerator for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.complete(prompt))
    }
}

pub(super) fn generate_url(endpoint: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        endpoint.trim_end_matches('/'),
        model
    )
}
