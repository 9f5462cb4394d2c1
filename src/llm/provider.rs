use async_trait::async_trait;
use thiserror::Error;

/// Failure of a call to an external model service.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("unexpected response shape: {0}")]
    BadResponse(String),
}

/// Turns texts into fixed-dimension vectors, one per input, in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, LlmError>;
}

/// Produces an answer grounded in the supplied context.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, context: &str, question: &str) -> Result<String, LlmError>;
}
