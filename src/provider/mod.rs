//! Content-intelligence provider abstraction
//!
//! The session controller only ever talks to `dyn AnalysisProvider`. Which
//! implementation sits behind it is decided once at startup from config.
//!
//! # Architecture
//!
//! ```text
//! AnalysisProvider trait
//! ├── GeminiProvider (live, generateContent + JSON response mode)
//! └── MockProvider   (deterministic, keyword-derived, optional latency)
//! ```
//!
//! Both operations are single-shot: no retries happen here or in the
//! controller. A provider either returns a structurally valid result or a
//! `ProviderError`.

pub mod gemini;
pub mod mock;
pub mod prompts;

use crate::config::{ProviderConfig, ProviderKind};
use crate::models::{
    AnalysisResult, AnalyzeRequest, ArticleSettings, ContractViolation, GeneratedArticle,
};
use async_trait::async_trait;
use std::sync::Arc;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;

/// Errors that can occur while talking to the provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Provider is missing credentials or was disabled
    #[error("provider not configured: {0}")]
    NotConfigured(String),
    /// Transport failure (DNS, connect, timeout)
    #[error("network error: {0}")]
    Network(String),
    /// Non-success HTTP status from the provider
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// HTTP 429
    #[error("rate limited")]
    RateLimited,
    /// Response body could not be decoded into the expected shape
    #[error("failed to parse provider response: {0}")]
    Parse(String),
    /// Response decoded but breaks the result contract
    #[error("invalid provider response: {0}")]
    InvalidResponse(#[from] ContractViolation),
    /// The task running the call panicked or was cancelled
    #[error("provider task failed: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Parse(e.to_string())
        } else {
            ProviderError::Network(e.to_string())
        }
    }
}

/// Contract consumed by the session controller
///
/// # Thread Safety
///
/// Calls are spawned onto the tokio runtime, so providers must be
/// `Send + Sync` and are shared behind an `Arc`.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Human-readable name for logging and the startup banner
    fn name(&self) -> &'static str;

    /// Analyze a keyword's SEO landscape for the given targeting
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ProviderError>;

    /// Generate an article from a completed analysis
    ///
    /// When `topic` is given the article should focus on it while still
    /// honoring `settings`.
    async fn generate(
        &self,
        analysis: &AnalysisResult,
        settings: &ArticleSettings,
        topic: Option<&str>,
    ) -> Result<GeneratedArticle, ProviderError>;
}

/// Shared provider handle
pub type SharedProvider = Arc<dyn AnalysisProvider>;

/// Create the provider selected by configuration
///
/// A live provider that cannot be built (e.g. no API key) is an error, never a
/// fallback to mock data.
pub fn create_provider(config: &ProviderConfig) -> Result<SharedProvider, ProviderError> {
    match config.kind {
        ProviderKind::Mock => Ok(Arc::new(MockProvider::with_delay(
            std::time::Duration::from_millis(config.mock_delay_ms),
        ))),
        ProviderKind::Gemini => Ok(Arc::new(GeminiProvider::new(config)?)),
    }
}
