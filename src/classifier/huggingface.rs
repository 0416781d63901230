use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

use super::{ClassifyOptions, Classifier, Prediction, top_k};

const USER_AGENT: &str = concat!("babel/", env!("CARGO_PKG_VERSION"));

/// A text-classification model served through the Hugging Face Inference API
/// (or any server speaking the same protocol, e.g. text-embeddings-inference).
pub struct HuggingFaceClassifier {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HuggingFaceClassifier {
    pub fn new(model: Option<String>, endpoint: Option<String>, token: Option<String>) -> Result<Self> {
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            url: model_url(&endpoint, &model),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Read the access token from `HF_TOKEN`, if any.
    pub fn from_env(model: Option<String>, endpoint: Option<String>) -> Result<Self> {
        Self::new(model, endpoint, std::env::var("HF_TOKEN").ok())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn parse_response(body: &str, k: usize) -> Result<Vec<Prediction>> {
        let response: ApiResponse = serde_json::from_str(body)
            .map_err(|e| anyhow::anyhow!("failed to parse classifier response: {}\nraw: {}", e, body))?;

        let predictions = match response {
            ApiResponse::Flat(predictions) => predictions,
            // One list per input; we only ever send one.
            ApiResponse::Nested(mut batches) => {
                if batches.is_empty() {
                    Vec::new()
                } else {
                    batches.swap_remove(0)
                }
            }
        };

        Ok(top_k(predictions, k))
    }
}

#[async_trait]
impl Classifier for HuggingFaceClassifier {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn classify(&self, text: &str, options: &ClassifyOptions) -> Result<Vec<Prediction>> {
        let body = ApiRequest {
            inputs: text,
            parameters: Parameters {
                top_k: options.top_k,
                truncation: options.truncation,
                max_length: options.max_length,
            },
        };

        let mut req = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!(
                "Hugging Face API error ({}): {}",
                status.as_u16(),
                error_message(&text)
            );
        }

        let text = resp.text().await.context("failed to read classifier response")?;
        Self::parse_response(&text, options.top_k)
    }
}

fn model_url(endpoint: &str, model: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), model)
}

/// Pull `error` out of a JSON error body; fall back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    top_k: usize,
    truncation: bool,
    max_length: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ApiResponse {
    Flat(Vec<Prediction>),
    Nested(Vec<Vec<Prediction>>),
}

#[derive(Deserialize)]
struct ApiError {
    error: String,
}
