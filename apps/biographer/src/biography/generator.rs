//! Biography Generator — turns a request string into a biography.
//!
//! Flow: parse request → strategy.write() → trimmed biography.
//!
//! `generate` returns a tagged result. Callers that only print use
//! `render_failure`, which turns a failure into text carrying `ERROR_MARKER`
//! and the failure message.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::biography::request::GenerationRequest;
use crate::biography::strategy::{
    BiographyStrategy, GenerationMode, LocalTemplateStrategy, RemoteServiceStrategy,
};
use crate::config::{Config, Credential};
use crate::llm_client::{CompletionError, CompletionService, OpenAiClient, MODEL};

/// Prefix of every in-band failure rendered by `render_failure`.
pub const ERROR_MARKER: &str = "***ERROR DE GENERACIÓN IA";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Renders a failure as biography text.
pub fn render_failure(err: &GenerationError) -> String {
    format!("{ERROR_MARKER}: {err}***")
}

pub struct BiographyGenerator {
    strategy: Box<dyn BiographyStrategy>,
}

impl BiographyGenerator {
    pub fn new(strategy: Box<dyn BiographyStrategy>) -> Self {
        Self { strategy }
    }

    pub fn local() -> Self {
        Self::new(Box::new(LocalTemplateStrategy))
    }

    pub fn remote(service: Arc<dyn CompletionService>) -> Self {
        Self::new(Box::new(RemoteServiceStrategy::new(service)))
    }

    /// Picks the strategy from the resolved credential. The HTTP client is
    /// only built when a credential is configured.
    pub fn from_config(config: &Config) -> Result<Self, CompletionError> {
        Self::select(&config.credential, |key| {
            let client = OpenAiClient::new(
                key.to_string(),
                config.api_url.clone(),
                config.completion_timeout,
            )?;
            info!("Completion client initialized (model: {})", MODEL);
            let service: Arc<dyn CompletionService> = Arc::new(client);
            Ok(service)
        })
    }

    /// `connect` runs only for `Credential::Configured`.
    pub fn select<F>(credential: &Credential, connect: F) -> Result<Self, CompletionError>
    where
        F: FnOnce(&str) -> Result<Arc<dyn CompletionService>, CompletionError>,
    {
        match credential {
            Credential::Unconfigured => {
                info!("No completion credential configured; using local template biographies");
                Ok(Self::local())
            }
            Credential::Configured(key) => Ok(Self::remote(connect(key)?)),
        }
    }

    pub fn mode(&self) -> GenerationMode {
        self.strategy.mode()
    }

    /// Parses the wire-form request `raw` and writes one biography for it.
    pub async fn generate(&self, raw: &str) -> Result<String, GenerationError> {
        let request = GenerationRequest::parse(raw)?;
        info!("Generating biography for {} ({})", request.name, self.mode());

        let biography = self.strategy.write(&request).await;
        if let Err(e) = &biography {
            warn!("Biography generation failed for {}: {e}", request.name);
        }
        biography
    }
}
