//! Biography strategies — pluggable, trait-based writers selected once at startup.
//!
//! `LocalTemplateStrategy`: deterministic template, no I/O.
//! `RemoteServiceStrategy`: one completion call per biography, no retries.
//!
//! `BiographyGenerator` holds a `Box<dyn BiographyStrategy>` picked from the
//! resolved credential.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::biography::prompts::{
    BIOGRAPHY_PROMPT_TEMPLATE, BIOGRAPHY_SYSTEM, LOCAL_TEMPLATE, LOCAL_TEMPLATE_NO_CONDITION,
    MAX_OUTPUT_TOKENS, TEMPERATURE,
};
use crate::biography::{GenerationError, GenerationRequest};
use crate::llm_client::{CompletionRequest, CompletionService};

/// Which path produced a biography. Logged per animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    LocalTemplate,
    RemoteService,
}

impl GenerationMode {
    /// Spanish name shown in the printed report header.
    pub fn label(&self) -> &'static str {
        match self {
            GenerationMode::LocalTemplate => "simulación local",
            GenerationMode::RemoteService => "servicio de IA",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::LocalTemplate => f.write_str("local template"),
            GenerationMode::RemoteService => f.write_str("completion service"),
        }
    }
}

/// Implement this to add a biography backend without touching the generator or walker.
#[async_trait]
pub trait BiographyStrategy: Send + Sync {
    fn mode(&self) -> GenerationMode;

    async fn write(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LocalTemplateStrategy — fallback when no credential is configured
// ────────────────────────────────────────────────────────────────────────────

pub struct LocalTemplateStrategy;

#[async_trait]
impl BiographyStrategy for LocalTemplateStrategy {
    fn mode(&self) -> GenerationMode {
        GenerationMode::LocalTemplate
    }

    async fn write(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        Ok(render_local(request))
    }
}

/// Fills the local template. Pure: same request, same bytes.
pub fn render_local(request: &GenerationRequest) -> String {
    let template = if request.has_condition() {
        LOCAL_TEMPLATE
    } else {
        LOCAL_TEMPLATE_NO_CONDITION
    };

    template
        .replace("{name}", &request.name)
        .replace("{age}", &request.age.to_string())
        .replace("{breed}", &request.breed)
        .replace("{condition}", &request.condition)
}

// ────────────────────────────────────────────────────────────────────────────
// RemoteServiceStrategy — delegates to the completion service
// ────────────────────────────────────────────────────────────────────────────

pub struct RemoteServiceStrategy {
    service: Arc<dyn CompletionService>,
}

impl RemoteServiceStrategy {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl BiographyStrategy for RemoteServiceStrategy {
    fn mode(&self) -> GenerationMode {
        GenerationMode::RemoteService
    }

    async fn write(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let completion = build_completion_request(request);
        let text = self.service.complete(&completion).await?;
        Ok(text.trim().to_string())
    }
}

pub fn build_completion_request(request: &GenerationRequest) -> CompletionRequest {
    CompletionRequest {
        system: BIOGRAPHY_SYSTEM.to_string(),
        prompt: BIOGRAPHY_PROMPT_TEMPLATE.replace("{request}", &request.to_string()),
        max_tokens: MAX_OUTPUT_TOKENS,
        temperature: TEMPERATURE,
    }
}
