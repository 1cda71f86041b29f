// Session controller - the single choke point for session mutation
//
// Synchronous and free of I/O: `dispatch` turns an intent into a transition
// (and possibly a provider request), `complete` folds a provider answer back
// in. The async side lives in `driver.rs`.

use super::intent::{
    Completion, Dispatch, Intent, Outcome, ProviderRequest, Reconciled, Stage, Ticket,
    ValidationError,
};
use super::{Session, View};
use crate::models::{AnalysisResult, AnalyzeRequest, ArticleSettings};
use crate::provider::ProviderError;
use tracing::{debug, error, warn};

/// Shown when the analysis stage fails, whatever the cause
pub const ANALYZE_FAILED_MESSAGE: &str = "فشل تحليل الكلمة المفتاحية. يرجى المحاولة مرة أخرى.";

/// Shown when the generation stage fails, whatever the cause
pub const GENERATE_FAILED_MESSAGE: &str = "فشل توليد المقال. يرجى المحاولة مرة أخرى.";

/// Owns the session and applies every transition to it
#[derive(Debug, Default)]
pub struct SessionController {
    session: Session,
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only snapshot for rendering
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply an intent
    ///
    /// Hard guard violations return `Err` and leave the session untouched.
    /// While a call is in flight every intent except `BackToHome` is ignored.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Dispatch, ValidationError> {
        if self.session.is_loading() && !matches!(intent, Intent::BackToHome) {
            debug!(intent = intent.name(), "ignored while loading");
            return Ok(Dispatch::Ignored);
        }

        let dispatch = match intent {
            Intent::Analyze(request) => self.start_analysis(request)?,
            Intent::Generate { settings, topic } => self.start_generation(settings, topic)?,
            Intent::SelectTopic(topic) => {
                self.require_analysis()?;
                self.session.pending_topic = non_empty(Some(topic));
                self.session.view = View::Editor;
                debug!(topic = ?self.session.pending_topic, "topic selected");
                Dispatch::Applied
            }
            Intent::BackToDashboard => {
                self.require_analysis()?;
                self.session.article = None;
                self.session.view = View::Results;
                debug!("back to dashboard");
                Dispatch::Applied
            }
            Intent::BackToHome => {
                if self.session.is_initial() {
                    debug!("already home");
                } else if let Some(ticket) = self.session.in_flight {
                    debug!(
                        stage = ticket.stage().as_str(),
                        generation = ticket.generation(),
                        "reset orphans in-flight call"
                    );
                }
                self.reset();
                debug!(generation = self.session.generation, "back to home");
                Dispatch::Applied
            }
        };

        self.enforce_invariants();
        Ok(dispatch)
    }

    /// Fold a provider answer into the session
    ///
    /// Completions for anything but the current in-flight ticket are dropped.
    pub fn complete(&mut self, completion: Completion) -> Reconciled {
        let Completion { ticket, outcome } = completion;

        if self.session.in_flight != Some(ticket) || outcome.stage() != ticket.stage() {
            debug!(
                stage = ticket.stage().as_str(),
                generation = ticket.generation(),
                current = self.session.generation,
                "discarding stale completion"
            );
            return Reconciled::Stale;
        }

        self.session.in_flight = None;

        match outcome {
            Outcome::Analyzed(result) => match result.and_then(|analysis| {
                analysis
                    .validate()
                    .map(|()| analysis)
                    .map_err(ProviderError::from)
            }) {
                Ok(analysis) => {
                    debug!(keyword = %analysis.keyword, "analysis applied");
                    self.session.analysis = Some(analysis);
                    self.session.view = View::Results;
                }
                Err(e) => {
                    warn!(error = %e, "keyword analysis failed");
                    self.session.error = Some(ANALYZE_FAILED_MESSAGE.to_string());
                    self.session.view = View::Search;
                }
            },
            Outcome::Generated(result) => match result.and_then(|article| {
                article
                    .validate()
                    .map(|()| article)
                    .map_err(ProviderError::from)
            }) {
                Ok(article) => {
                    debug!(title = %article.title, "article applied");
                    self.session.article = Some(article);
                    self.session.pending_topic = None;
                    self.session.view = View::Editor;
                }
                Err(e) => {
                    warn!(error = %e, "article generation failed");
                    self.session.error = Some(GENERATE_FAILED_MESSAGE.to_string());
                }
            },
        }

        self.enforce_invariants();
        Reconciled::Applied
    }

    fn start_analysis(&mut self, request: AnalyzeRequest) -> Result<Dispatch, ValidationError> {
        let keyword = request.keyword.trim();
        if keyword.is_empty() {
            return Err(ValidationError::EmptyKeyword);
        }
        let request = AnalyzeRequest {
            keyword: keyword.to_string(),
            ..request
        };

        // A new analysis invalidates everything derived from the old one
        self.session.analysis = None;
        self.session.article = None;
        self.session.pending_topic = None;
        self.session.view = View::Search;

        let ticket = self.begin(Stage::Analyze);
        debug!(keyword = %request.keyword, generation = ticket.generation(), "analysis started");
        Ok(Dispatch::Started(ProviderRequest::Analyze { ticket, request }))
    }

    fn start_generation(
        &mut self,
        settings: ArticleSettings,
        topic: Option<String>,
    ) -> Result<Dispatch, ValidationError> {
        let analysis = self.require_analysis()?.clone();
        settings.validate()?;

        let topic = non_empty(topic).or_else(|| self.session.pending_topic.clone());

        let ticket = self.begin(Stage::Generate);
        debug!(
            topic = ?topic,
            target_words = settings.target_words,
            generation = ticket.generation(),
            "generation started"
        );
        Ok(Dispatch::Started(ProviderRequest::Generate {
            ticket,
            analysis,
            settings,
            topic,
        }))
    }

    /// Clear the error, then mark a new call in flight
    fn begin(&mut self, stage: Stage) -> Ticket {
        self.session.error = None;
        self.session.generation += 1;
        let ticket = Ticket::new(self.session.generation, stage);
        self.session.in_flight = Some(ticket);
        ticket
    }

    fn require_analysis(&self) -> Result<&AnalysisResult, ValidationError> {
        self.session
            .analysis
            .as_ref()
            .ok_or(ValidationError::MissingAnalysis)
    }

    fn reset(&mut self) {
        self.session = Session {
            generation: self.session.generation + 1,
            ..Session::default()
        };
    }

    fn enforce_invariants(&mut self) {
        if let Err(e) = self.session.check_invariants() {
            error!(error = %e, "session invariant violated, resetting");
            self.reset();
        }
    }
}
