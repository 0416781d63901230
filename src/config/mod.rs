//! Startup configuration: where to listen and which classifier to load.
//!
//! Filled from the command line (see `main.rs`); every field has a default
//! matching the reference deployment.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tokio::net::TcpListener;

use crate::classifier::Classifier;
use crate::classifier::huggingface::HuggingFaceClassifier;
use crate::classifier::whatlang::WhatlangClassifier;
use crate::consts::{DEFAULT_HOST, DEFAULT_PORT};

/// Which classifier backend answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Provider {
    /// Transformer model behind the Hugging Face Inference API.
    #[default]
    #[value(name = "huggingface")]
    HuggingFace,
    /// Offline trigram detector.
    Whatlang,
}

#[derive(Debug, Clone, Default)]
pub struct ClassifierConfig {
    pub provider: Provider,
    /// Model id (Hugging Face only).
    pub model: Option<String>,
    /// Inference API base URL (Hugging Face only).
    pub endpoint: Option<String>,
}

impl ClassifierConfig {
    /// Construct the classifier. Runs once, before the listener is bound.
    pub fn build(&self) -> Result<Arc<dyn Classifier>> {
        let classifier: Arc<dyn Classifier> = match self.provider {
            Provider::HuggingFace => Arc::new(
                HuggingFaceClassifier::from_env(self.model.clone(), self.endpoint.clone())
                    .context("failed to initialize Hugging Face classifier")?,
            ),
            Provider::Whatlang => Arc::new(WhatlangClassifier::new()),
        };
        Ok(classifier)
    }

    /// True when `model` or `endpoint` is set but the provider has no use for them.
    pub fn has_ignored_options(&self) -> bool {
        self.provider == Provider::Whatlang && (self.model.is_some() || self.endpoint.is_some())
    }

    /// Model label for the banner.
    pub fn model_label(&self) -> &str {
        match self.provider {
            Provider::HuggingFace => self
                .model
                .as_deref()
                .unwrap_or(crate::consts::DEFAULT_MODEL),
            Provider::Whatlang => "trigram",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parse `host:port` as a literal socket address. Host names are
    /// rejected here; use [`ServerConfig::bind`] to resolve them.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.address()
            .parse()
            .with_context(|| format!("invalid listen address {}", self.address()))
    }

    /// Bind the listener. Host names are resolved.
    pub async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("failed to bind {}", self.address()))
    }
}
