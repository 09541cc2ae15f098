use super::TextGenerator;
use crate::config::LlmConfig;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone)]
pub struct LLMService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    n_predict: usize,
    temperature: f32,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    stream: bool,
    n_predict: usize,
    temperature: f32,
    stop: Vec<String>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

impl LLMService {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms)) // hard timeout, surfaces as a transport failure
                .build()
                .unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            n_predict: config.n_predict,
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl TextGenerator for LLMService {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request_body = CompletionRequest {
            prompt,
            stream: false, // one-shot only
            n_predict: self.n_predict,
            temperature: self.temperature,
            stop: vec!["Utterance:".to_string()],
        };

        // llama-server style /completion endpoint
        let mut request = self.client.post(format!("{}/completion", self.base_url)).json(&request_body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(anyhow!("LLM Server Error: {}", response.status()));
        }

        let resp_json: CompletionResponse = response.json().await?;
        Ok(resp_json.content.trim().to_string())
    }
}
