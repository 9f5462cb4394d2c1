use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::prompt::build_grounding_prompt;
use super::provider::{Embedder, Generator, LlmError};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GENERATION_MODEL: &str = "gemini-2.5-flash";
const EMBEDDING_MODEL: &str = "models/embedding-001";
const GENERATION_TEMPERATURE: f64 = 0.3;
// No timeout is specified upstream; a hung model call must not pin a worker
// forever, so the client carries its own.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the Google Generative Language API, covering both the
/// embedding model and the answer-generation model.
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: BASE_URL.to_string(),
            api_key,
            client,
        })
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, LlmError> {
        let res = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("{}: {}", status, text)));
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl Embedder for GeminiClient {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
        let url = format!("{}/{}:batchEmbedContents", self.base_url, EMBEDDING_MODEL);

        let requests: Vec<Value> = inputs
            .iter()
            .map(|text| {
                json!({
                    "model": EMBEDDING_MODEL,
                    "content": { "parts": [{ "text": text }] },
                })
            })
            .collect();

        let payload = self.post_json(&url, &json!({ "requests": requests })).await?;

        let embeddings = payload["embeddings"]
            .as_array()
            .ok_or_else(|| LlmError::BadResponse("missing embeddings array".to_string()))?;

        let mut vectors = Vec::with_capacity(embeddings.len());
        for item in embeddings {
            let values = item["values"]
                .as_array()
                .ok_or_else(|| LlmError::BadResponse("missing embedding values".to_string()))?;
            let vector: Vec<f32> = values
                .iter()
                .filter_map(|v| v.as_f64().map(|f| f as f32))
                .collect();
            vectors.push(vector);
        }

        Ok(vectors)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, context: &str, question: &str) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, GENERATION_MODEL);
        let prompt = build_grounding_prompt(context, question);

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": GENERATION_TEMPERATURE },
        });

        let payload = self.post_json(&url, &body).await?;

        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| LlmError::BadResponse("missing candidate text".to_string()))
    }
}
