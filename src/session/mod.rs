//! Session state and the analyze → generate pipeline
//!
//! # Architecture
//!
//! ```text
//! TUI / CLI ──Intent──▶ SessionDriver ──dispatch──▶ SessionController ──▶ Session
//!                           │  ▲                          ▲
//!              tokio::spawn │  │ mpsc<Completion>         │ complete(ticket)
//!                           ▼  │                          │
//!                     AnalysisProvider ───────────────────┘
//! ```
//!
//! The controller is a synchronous state machine with no I/O; the driver owns
//! it together with the provider handle and does the async plumbing. The
//! presentation layer only ever sees `&Session`.

mod controller;
mod driver;
mod intent;

pub use driver::{Completions, SessionDriver, Submitted};
pub use intent::{Completion, Intent, Outcome, Reconciled, Stage};

use intent::Ticket;

use crate::models::{AnalysisResult, GeneratedArticle};

/// Screen the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Keyword entry
    #[default]
    Search,
    /// Analysis dashboard
    Results,
    /// Article settings and generated article
    Editor,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Search => "Search",
            View::Results => "Results",
            View::Editor => "Editor",
        }
    }
}

/// The single application state root
///
/// Fields are private: every mutation goes through `SessionController`, which
/// is the only place the invariants in `check_invariants` can be broken and
/// the only place they are checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    view: View,
    /// Ticket of the outstanding provider call; `Some` means loading
    in_flight: Option<Ticket>,
    /// Localized message for the most recent failure
    error: Option<String>,
    analysis: Option<AnalysisResult>,
    article: Option<GeneratedArticle>,
    /// Topic picked on the dashboard, used by the next generation
    pending_topic: Option<String>,
    /// Bumped on every reset and every dispatched request
    generation: u64,
}

impl Session {
    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Stage of the outstanding call, if any
    pub fn loading_stage(&self) -> Option<Stage> {
        self.in_flight.map(|t| t.stage())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn article(&self) -> Option<&GeneratedArticle> {
        self.article.as_ref()
    }

    pub fn pending_topic(&self) -> Option<&str> {
        self.pending_topic.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Observable state equals a fresh session (the generation is ignored)
    pub fn is_initial(&self) -> bool {
        self.view == View::Search
            && self.in_flight.is_none()
            && self.error.is_none()
            && self.analysis.is_none()
            && self.article.is_none()
            && self.pending_topic.is_none()
    }

    /// Verify the structural invariants of the session
    pub fn check_invariants(&self) -> Result<(), StateInconsistency> {
        if self.analysis.is_none() && self.view != View::Search {
            return Err(StateInconsistency::ViewWithoutAnalysis(self.view));
        }
        if self.view == View::Results && self.article.is_some() {
            return Err(StateInconsistency::ArticleOnDashboard);
        }
        if self.article.is_some() && self.analysis.is_none() {
            return Err(StateInconsistency::ArticleWithoutAnalysis);
        }
        if let Some(ticket) = self.in_flight {
            if ticket.generation() != self.generation {
                return Err(StateInconsistency::TicketMismatch {
                    ticket: ticket.generation(),
                    session: self.generation,
                });
            }
        }
        Ok(())
    }
}

/// A session combination the UI must never observe
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateInconsistency {
    #[error("view {0:?} requires an analysis")]
    ViewWithoutAnalysis(View),
    #[error("dashboard shown while an article is present")]
    ArticleOnDashboard,
    #[error("article present without an analysis")]
    ArticleWithoutAnalysis,
    #[error("in-flight ticket generation {ticket} does not match session generation {session}")]
    TicketMismatch { ticket: u64, session: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{analysis, article};

    #[test]
    fn fresh_session_is_initial_and_consistent() {
        let session = Session::default();
        assert!(session.is_initial());
        assert_eq!(session.view(), View::Search);
        assert_eq!(session.generation(), 0);
        assert!(session.check_invariants().is_ok());
    }

    #[test]
    fn results_without_analysis_is_inconsistent() {
        let session = Session {
            view: View::Results,
            ..Default::default()
        };
        assert_eq!(
            session.check_invariants(),
            Err(StateInconsistency::ViewWithoutAnalysis(View::Results))
        );
    }

    #[test]
    fn article_on_dashboard_is_inconsistent() {
        let session = Session {
            view: View::Results,
            analysis: Some(analysis("k")),
            article: Some(article("t")),
            ..Default::default()
        };
        assert_eq!(
            session.check_invariants(),
            Err(StateInconsistency::ArticleOnDashboard)
        );
    }

    #[test]
    fn article_without_analysis_is_inconsistent() {
        let session = Session {
            article: Some(article("t")),
            ..Default::default()
        };
        assert_eq!(
            session.check_invariants(),
            Err(StateInconsistency::ArticleWithoutAnalysis)
        );
    }

    #[test]
    fn generation_is_not_observable_state() {
        let session = Session {
            generation: 7,
            ..Default::default()
        };
        assert!(session.is_initial());
    }
}
