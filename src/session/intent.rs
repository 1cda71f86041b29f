// Intents in, provider requests and completions out
//
// Everything the presentation layer can ask of the session is an `Intent`.
// Everything the session asks of the provider is a `ProviderRequest`, and
// the provider's answer comes back as a `Completion` carrying the same
// `Ticket` so stale answers can be told apart from current ones.

use crate::models::{
    AnalysisResult, AnalyzeRequest, ArticleSettings, GeneratedArticle, SettingsError,
};
use crate::provider::ProviderError;

/// A user action against the session
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Start a keyword analysis
    Analyze(AnalyzeRequest),
    /// Generate an article from the current analysis
    Generate {
        settings: ArticleSettings,
        /// Explicit focus topic; falls back to the pending topic when `None`
        topic: Option<String>,
    },
    /// Pick a topic from the dashboard and open the editor
    SelectTopic(String),
    /// Leave the editor, discarding the article
    BackToDashboard,
    /// Full reset to the search screen
    BackToHome,
}

impl Intent {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Analyze(_) => "analyze",
            Intent::Generate { .. } => "generate",
            Intent::SelectTopic(_) => "select_topic",
            Intent::BackToDashboard => "back_to_dashboard",
            Intent::BackToHome => "back_to_home",
        }
    }
}

/// Pipeline stage a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Analyze,
    Generate,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Analyze => "analyze",
            Stage::Generate => "generate",
        }
    }
}

/// Identity of one dispatched provider call
///
/// Only the completion whose ticket equals the session's in-flight ticket is
/// applied. Every dispatch and every reset moves the generation forward, so
/// older tickets can never match again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: u64,
    stage: Stage,
}

impl Ticket {
    pub(super) fn new(generation: u64, stage: Stage) -> Self {
        Self { generation, stage }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }
}

/// Work the driver must hand to the provider
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderRequest {
    Analyze {
        ticket: Ticket,
        request: AnalyzeRequest,
    },
    Generate {
        ticket: Ticket,
        analysis: AnalysisResult,
        settings: ArticleSettings,
        topic: Option<String>,
    },
}

impl ProviderRequest {
    pub fn ticket(&self) -> Ticket {
        match self {
            ProviderRequest::Analyze { ticket, .. } | ProviderRequest::Generate { ticket, .. } => {
                *ticket
            }
        }
    }
}

/// What `dispatch` did with an intent
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Session is now loading; the request must be sent to the provider
    Started(ProviderRequest),
    /// Synchronous transition applied
    Applied,
    /// Intent arrived while a call was in flight and was dropped
    Ignored,
}

/// Provider answer for one ticket
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub enum Outcome {
    Analyzed(Result<AnalysisResult, ProviderError>),
    Generated(Result<GeneratedArticle, ProviderError>),
}

impl Outcome {
    /// Failure outcome for the given stage
    pub fn failed(stage: Stage, error: ProviderError) -> Self {
        match stage {
            Stage::Analyze => Outcome::Analyzed(Err(error)),
            Stage::Generate => Outcome::Generated(Err(error)),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Outcome::Analyzed(_) => Stage::Analyze,
            Outcome::Generated(_) => Stage::Generate,
        }
    }
}

/// What `complete` did with a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Applied,
    /// Ticket no longer current (reset or superseded); result dropped
    Stale,
}

/// An intent that can never be valid in the current state
///
/// Returned from `dispatch` without touching the session. These are caller
/// bugs or bad input, not provider failures, so they never reach
/// `Session::error`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("keyword must not be empty")]
    EmptyKeyword,
    #[error("no analysis available; analyze a keyword first")]
    MissingAnalysis,
    #[error("invalid article settings: {0}")]
    InvalidSettings(String),
}

impl From<SettingsError> for ValidationError {
    fn from(e: SettingsError) -> Self {
        ValidationError::InvalidSettings(e.to_string())
    }
}
