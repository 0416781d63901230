use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ClassifyOptions, Classifier, Prediction};

enum Script {
    Predict(Vec<Prediction>),
    Fail(String),
}

/// A scripted classifier for tests. Answers every call the same way.
pub struct MockClassifier {
    script: Script,
    calls: AtomicUsize,
}

impl MockClassifier {
    /// Always return these predictions (may be empty).
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self {
            script: Script::Predict(predictions),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always return a single prediction.
    pub fn single(label: &str, score: f64) -> Self {
        Self::new(vec![Prediction::new(label, score)])
    }

    /// Always fail with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            script: Script::Fail(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times `classify` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn classify(&self, _text: &str, options: &ClassifyOptions) -> Result<Vec<Prediction>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Predict(predictions) => Ok(predictions.iter().take(options.top_k).cloned().collect()),
            Script::Fail(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}
