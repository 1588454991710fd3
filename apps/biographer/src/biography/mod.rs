// Biography generation: request parsing, the two generation strategies
// (local template and completion service), and the generator that owns one.
// Only strategy.rs talks to llm_client.

pub mod generator;
pub mod prompts;
pub mod request;
pub mod strategy;

pub use generator::{render_failure, BiographyGenerator, GenerationError};
pub use request::GenerationRequest;
