// Session driver - async orchestration around the controller
//
// Provider calls run as spawned tokio tasks. Their results come back over an
// unbounded mpsc channel as `Completion`s and are applied one at a time by
// whoever owns the receiver (the TUI event loop or the CLI).

use super::controller::SessionController;
use super::intent::{
    Completion, Dispatch, Intent, Outcome, ProviderRequest, Reconciled, Ticket, ValidationError,
};
use super::Session;
use crate::provider::{ProviderError, SharedProvider};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Receiving end for provider completions
pub type Completions = mpsc::UnboundedReceiver<Completion>;

/// What `submit` did with an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    /// A provider call was spawned for this ticket
    Started(Ticket),
    Applied,
    Ignored,
}

/// Owns the controller and the provider handle
pub struct SessionDriver {
    controller: SessionController,
    provider: SharedProvider,
    tx: mpsc::UnboundedSender<Completion>,
}

impl SessionDriver {
    /// Create a driver and the receiver its completions arrive on
    ///
    /// The receiver is returned separately so an event loop can `select!` on
    /// it while still holding `&mut` to the driver in the other arms.
    pub fn new(provider: SharedProvider) -> (Self, Completions) {
        let (tx, rx) = mpsc::unbounded_channel();
        info!(provider = provider.name(), "session driver ready");
        (
            Self {
                controller: SessionController::new(),
                provider,
                tx,
            },
            rx,
        )
    }

    pub fn session(&self) -> &Session {
        self.controller.session()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Dispatch an intent, spawning the provider call if one is needed
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, intent: Intent) -> Result<Submitted, ValidationError> {
        Ok(match self.controller.dispatch(intent)? {
            Dispatch::Started(request) => {
                let ticket = request.ticket();
                self.spawn(request);
                Submitted::Started(ticket)
            }
            Dispatch::Applied => Submitted::Applied,
            Dispatch::Ignored => Submitted::Ignored,
        })
    }

    /// Apply one completion received from `Completions`
    pub fn apply(&mut self, completion: Completion) -> Reconciled {
        let reconciled = self.controller.complete(completion);
        debug!(
            generation = self.session().generation(),
            ?reconciled,
            "completion reconciled"
        );
        reconciled
    }

    /// Wait until no call is in flight, applying completions as they arrive
    ///
    /// Stale completions that arrive in between are dropped by the
    /// controller. Returns immediately when the session is idle.
    pub async fn settle(&mut self, completions: &mut Completions) {
        while self.session().is_loading() {
            // The driver holds a sender, so the channel cannot close here
            let Some(completion) = completions.recv().await else {
                return;
            };
            self.apply(completion);
        }
    }

    fn spawn(&self, request: ProviderRequest) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        let ticket = request.ticket();

        tokio::spawn(async move {
            // Inner task so a panicking provider still yields a completion
            let outcome = match tokio::spawn(call_provider(provider, request)).await {
                Ok(outcome) => outcome,
                Err(e) => Outcome::failed(ticket.stage(), ProviderError::Internal(e.to_string())),
            };
            debug!(
                stage = ticket.stage().as_str(),
                generation = ticket.generation(),
                "provider call finished"
            );
            // Receiver gone means the app is shutting down
            let _ = tx.send(Completion { ticket, outcome });
        });
    }
}

async fn call_provider(provider: SharedProvider, request: ProviderRequest) -> Outcome {
    match request {
        ProviderRequest::Analyze { request, .. } => {
            Outcome::Analyzed(provider.analyze(&request).await)
        }
        ProviderRequest::Generate {
            analysis,
            settings,
            topic,
            ..
        } => Outcome::Generated(
            provider
                .generate(&analysis, &settings, topic.as_deref())
                .await,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{analysis, article};
    use crate::models::{
        AnalysisResult, AnalyzeRequest, ArticleSettings, GeneratedArticle,
    };
    use crate::provider::{AnalysisProvider, MockProvider};
    use crate::session::controller::{ANALYZE_FAILED_MESSAGE, GENERATE_FAILED_MESSAGE};
    use crate::session::View;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    /// Provider double: counts calls, records topics, optionally fails, and
    /// can hold every call until the test releases it.
    #[derive(Default)]
    struct TestProvider {
        analyze_calls: AtomicUsize,
        generate_calls: AtomicUsize,
        topics: Mutex<Vec<Option<String>>>,
        fail_analyze: bool,
        fail_generate: bool,
        panic_on_analyze: bool,
        gate: Option<Arc<Semaphore>>,
    }

    impl TestProvider {
        fn gated() -> (Self, Arc<Semaphore>) {
            let gate = Arc::new(Semaphore::new(0));
            (
                Self {
                    gate: Some(Arc::clone(&gate)),
                    ..Default::default()
                },
                gate,
            )
        }

        async fn wait_for_gate(&self) {
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
        }
    }

    #[async_trait]
    impl AnalysisProvider for TestProvider {
        fn name(&self) -> &'static str {
            "test"
        }

        async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ProviderError> {
            self.analyze_calls.fetch_add(1, Ordering::SeqCst);
            self.wait_for_gate().await;
            if self.panic_on_analyze {
                panic!("provider exploded");
            }
            if self.fail_analyze {
                return Err(ProviderError::Network("connection refused".to_string()));
            }
            Ok(analysis(&request.keyword))
        }

        async fn generate(
            &self,
            _analysis: &AnalysisResult,
            _settings: &ArticleSettings,
            topic: Option<&str>,
        ) -> Result<GeneratedArticle, ProviderError> {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            self.topics.lock().unwrap().push(topic.map(str::to_string));
            self.wait_for_gate().await;
            if self.fail_generate {
                return Err(ProviderError::Api {
                    status: 500,
                    message: "internal".to_string(),
                });
            }
            Ok(article(topic.unwrap_or("Untitled")))
        }
    }

    fn analyze_intent(keyword: &str) -> Intent {
        Intent::Analyze(AnalyzeRequest::new(keyword, "US", "desktop", "en"))
    }

    fn generate_intent(topic: Option<&str>) -> Intent {
        Intent::Generate {
            settings: ArticleSettings::default(),
            topic: topic.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn analyze_then_generate_end_to_end() {
        let provider = Arc::new(TestProvider::default());
        let (mut driver, mut completions) = SessionDriver::new(provider.clone());

        assert!(matches!(
            driver.submit(analyze_intent("best running shoes")),
            Ok(Submitted::Started(_))
        ));
        assert!(driver.session().is_loading());
        driver.settle(&mut completions).await;
        assert_eq!(driver.session().view(), View::Results);

        driver
            .submit(generate_intent(Some("how shoes are made")))
            .unwrap();
        driver.settle(&mut completions).await;

        let session = driver.session();
        assert_eq!(session.view(), View::Editor);
        assert_eq!(
            session.article().map(|a| a.title.as_str()),
            Some("how shoes are made")
        );
        assert_eq!(provider.analyze_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.generate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_analyze_reaches_provider_once() {
        let (provider, gate) = TestProvider::gated();
        let provider = Arc::new(provider);
        let (mut driver, mut completions) = SessionDriver::new(provider.clone());

        driver.submit(analyze_intent("shoes")).unwrap();
        assert_eq!(
            driver.submit(analyze_intent("shoes")),
            Ok(Submitted::Ignored)
        );
        assert_eq!(
            driver.submit(generate_intent(None)),
            Ok(Submitted::Ignored)
        );

        gate.add_permits(10);
        driver.settle(&mut completions).await;

        assert_eq!(provider.analyze_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.generate_calls.load(Ordering::SeqCst), 0);
        assert_eq!(driver.session().view(), View::Results);
    }

    #[tokio::test]
    async fn late_result_after_reset_is_discarded() {
        let (provider, gate) = TestProvider::gated();
        let (mut driver, mut completions) = SessionDriver::new(Arc::new(provider));

        driver.submit(analyze_intent("shoes")).unwrap();
        driver.submit(Intent::BackToHome).unwrap();
        assert!(driver.session().is_initial());

        gate.add_permits(1);
        let completion = completions.recv().await.unwrap();
        assert_eq!(driver.apply(completion), Reconciled::Stale);
        assert!(driver.session().is_initial());
    }

    #[tokio::test]
    async fn late_generation_after_reset_and_new_analysis_is_discarded() {
        let (provider, gate) = TestProvider::gated();
        let (mut driver, mut completions) = SessionDriver::new(Arc::new(provider));

        driver.submit(analyze_intent("old")).unwrap();
        gate.add_permits(1);
        driver.settle(&mut completions).await;

        driver.submit(generate_intent(Some("old topic"))).unwrap();
        driver.submit(Intent::BackToHome).unwrap();
        driver.submit(analyze_intent("new")).unwrap();

        // Release both the orphaned generation and the new analysis
        gate.add_permits(2);
        let mut outcomes = Vec::new();
        for _ in 0..2 {
            let completion = completions.recv().await.unwrap();
            outcomes.push(driver.apply(completion));
        }

        assert!(outcomes.contains(&Reconciled::Stale));
        assert!(outcomes.contains(&Reconciled::Applied));
        let session = driver.session();
        assert_eq!(session.view(), View::Results);
        assert_eq!(session.analysis().map(|a| a.keyword.as_str()), Some("new"));
        assert!(session.article().is_none());
    }

    #[tokio::test]
    async fn pending_topic_reaches_provider() {
        let provider = Arc::new(TestProvider::default());
        let (mut driver, mut completions) = SessionDriver::new(provider.clone());

        driver.submit(analyze_intent("shoes")).unwrap();
        driver.settle(&mut completions).await;
        driver
            .submit(Intent::SelectTopic("how shoes are made".to_string()))
            .unwrap();
        driver.submit(generate_intent(None)).unwrap();
        driver.settle(&mut completions).await;

        assert_eq!(
            *provider.topics.lock().unwrap(),
            vec![Some("how shoes are made".to_string())]
        );
        assert!(driver.session().pending_topic().is_none());
    }

    #[tokio::test]
    async fn provider_failures_become_localized_messages() {
        let provider = Arc::new(TestProvider {
            fail_analyze: true,
            ..Default::default()
        });
        let (mut driver, mut completions) = SessionDriver::new(provider);
        driver.submit(analyze_intent("shoes")).unwrap();
        driver.settle(&mut completions).await;
        assert_eq!(driver.session().error(), Some(ANALYZE_FAILED_MESSAGE));
        assert_eq!(driver.session().view(), View::Search);

        let provider = Arc::new(TestProvider {
            fail_generate: true,
            ..Default::default()
        });
        let (mut driver, mut completions) = SessionDriver::new(provider);
        driver.submit(analyze_intent("shoes")).unwrap();
        driver.settle(&mut completions).await;
        driver.submit(generate_intent(None)).unwrap();
        driver.settle(&mut completions).await;
        assert_eq!(driver.session().error(), Some(GENERATE_FAILED_MESSAGE));
        assert_eq!(driver.session().view(), View::Results);
    }

    #[tokio::test]
    async fn panicking_provider_still_settles() {
        let provider = Arc::new(TestProvider {
            panic_on_analyze: true,
            ..Default::default()
        });
        let (mut driver, mut completions) = SessionDriver::new(provider);
        driver.submit(analyze_intent("shoes")).unwrap();
        driver.settle(&mut completions).await;
        assert!(!driver.session().is_loading());
        assert_eq!(driver.session().error(), Some(ANALYZE_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn validation_errors_never_reach_provider() {
        let provider = Arc::new(TestProvider::default());
        let (mut driver, _completions) = SessionDriver::new(provider.clone());
        assert_eq!(
            driver.submit(generate_intent(None)),
            Err(ValidationError::MissingAnalysis)
        );
        assert_eq!(
            driver.submit(analyze_intent("")),
            Err(ValidationError::EmptyKeyword)
        );
        assert_eq!(provider.analyze_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.generate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn mock_provider_drives_full_pipeline() {
        let provider = Arc::new(MockProvider::with_delay(Duration::from_millis(5)));
        let (mut driver, mut completions) = SessionDriver::new(provider);
        assert_eq!(driver.provider_name(), "mock");

        driver.submit(analyze_intent("coffee grinders")).unwrap();
        driver.settle(&mut completions).await;
        let settings = ArticleSettings::from_analysis(
            driver.session().analysis().unwrap(),
            &ArticleSettings::default(),
        );
        driver
            .submit(Intent::Generate {
                settings,
                topic: None,
            })
            .unwrap();
        driver.settle(&mut completions).await;

        let session = driver.session();
        assert_eq!(session.view(), View::Editor);
        assert!(session.article().is_some());
        assert!(session.error().is_none());
    }
}
