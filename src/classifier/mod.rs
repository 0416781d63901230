pub mod huggingface;
pub mod mock;
pub mod whatlang;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_TEXT_LENGTH;

/// A single scored label produced by a classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Knobs passed through to the classifier on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// How many of the highest-scoring labels to return.
    pub top_k: usize,
    /// Cut input longer than `max_length` instead of failing.
    pub truncation: bool,
    pub max_length: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            top_k: 1,
            truncation: true,
            max_length: MAX_TEXT_LENGTH,
        }
    }
}

/// The borrowed model. Could be a hosted transformer, a local trigram
/// detector, or a test script. Built once at startup and shared read-only.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Short identifier shown in the banner, logs and health probe.
    fn name(&self) -> &str;

    /// Returns at most `options.top_k` predictions, best first.
    async fn classify(&self, text: &str, options: &ClassifyOptions) -> Result<Vec<Prediction>>;
}

/// Sort best-first and keep the top `k`. Shared by backends whose upstream
/// does not guarantee ordering.
pub fn top_k(mut predictions: Vec<Prediction>, k: usize) -> Vec<Prediction> {
    predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
    predictions.truncate(k);
    predictions
}
