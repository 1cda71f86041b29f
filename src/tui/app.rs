// TUI application state
//
// App wraps the SessionDriver with the UI-only state the views need: the
// search form, the article settings being edited, list selection, scroll
// offsets and toasts. Every session change goes through `submit`; App never
// mutates the session directly.

use super::clipboard;
use super::components::Toast;
use super::input::SearchForm;
use super::theme::Theme;
use crate::config::{Config, SearchDefaults};
use crate::export;
use crate::logging::LogBuffer;
use crate::models::{ArticleSettings, Tone};
use crate::seo::{self, SeoAnalysis};
use crate::session::{
    Completion, Intent, Outcome, Reconciled, Session, SessionDriver, Submitted, View,
};
use std::path::PathBuf;
use tracing::{info, warn};

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Step for the target word count in the editor
const WORD_STEP: u32 = 100;
const MIN_WORDS: u32 = 300;
const MAX_WORDS: u32 = 10_000;
const MAX_IMAGES: u32 = 10;

pub struct App {
    driver: SessionDriver,

    /// Search view form
    pub form: SearchForm,
    search_defaults: SearchDefaults,

    /// Article settings as configured, before an analysis tunes the length
    article_defaults: ArticleSettings,
    /// Settings shown and edited in the Editor view
    pub settings: ArticleSettings,
    /// Typing goes into the custom tone text while set
    pub editing_custom_tone: bool,

    /// Selected entry of the Results topic list
    pub topic_index: usize,
    pub results_scroll: u16,
    pub article_scroll: u16,

    /// Language of the request the current analysis was made for
    analysis_lang: String,

    pub toast: Option<Toast>,
    pub log_buffer: LogBuffer,
    pub theme: Theme,
    pub should_quit: bool,
    animation_frame: usize,
}

impl App {
    pub fn new(driver: SessionDriver, log_buffer: LogBuffer, config: &Config) -> Self {
        let article_defaults = config.article.to_settings();
        Self {
            driver,
            form: SearchForm::new(&config.search),
            search_defaults: config.search.clone(),
            settings: article_defaults.clone(),
            article_defaults,
            editing_custom_tone: false,
            topic_index: 0,
            results_scroll: 0,
            article_scroll: 0,
            analysis_lang: config.search.lang.clone(),
            toast: None,
            log_buffer,
            theme: Theme::default(),
            should_quit: false,
            animation_frame: 0,
        }
    }

    pub fn session(&self) -> &Session {
        self.driver.session()
    }

    pub fn view(&self) -> View {
        self.session().view()
    }

    pub fn provider_name(&self) -> &'static str {
        self.driver.provider_name()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Animation and toasts
    // ─────────────────────────────────────────────────────────────────────────

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn show_error_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::error(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session intents
    // ─────────────────────────────────────────────────────────────────────────

    fn submit(&mut self, intent: Intent) {
        let name = intent.name();
        match self.driver.submit(intent) {
            Ok(Submitted::Started(_)) => {}
            Ok(Submitted::Applied) => {
                self.results_scroll = 0;
                self.article_scroll = 0;
            }
            Ok(Submitted::Ignored) => {
                self.show_toast("Busy: wait for the current request to finish");
            }
            Err(e) => {
                warn!(intent = name, error = %e, "intent rejected");
                self.show_error_toast(e.to_string());
            }
        }
    }

    pub fn analyze(&mut self) {
        let request = self.form.to_request(&self.search_defaults);
        let lang = request.lang.clone();
        self.submit(Intent::Analyze(request));
        if self.session().is_loading() {
            self.analysis_lang = lang;
        }
    }

    /// Outline entries followed by suggested titles
    pub fn topics(&self) -> Vec<&str> {
        self.session()
            .analysis()
            .map(|a| {
                a.suggested_outline
                    .iter()
                    .chain(a.suggested_titles.iter())
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn select_next_topic(&mut self) {
        let count = self.topics().len();
        if count > 0 {
            self.topic_index = (self.topic_index + 1).min(count - 1);
        }
    }

    pub fn select_prev_topic(&mut self) {
        self.topic_index = self.topic_index.saturating_sub(1);
    }

    /// Open the editor for the highlighted topic
    pub fn select_topic(&mut self) {
        let topic = self
            .topics()
            .get(self.topic_index)
            .map(|t| t.to_string())
            .unwrap_or_default();
        self.submit(Intent::SelectTopic(topic));
    }

    /// Open the editor without a topic
    pub fn open_editor(&mut self) {
        self.submit(Intent::SelectTopic(String::new()));
    }

    pub fn generate(&mut self) {
        self.editing_custom_tone = false;
        self.submit(Intent::Generate {
            settings: self.settings.clone(),
            topic: None,
        });
    }

    pub fn back_to_dashboard(&mut self) {
        self.submit(Intent::BackToDashboard);
    }

    pub fn go_home(&mut self) {
        self.editing_custom_tone = false;
        self.submit(Intent::BackToHome);
        self.topic_index = 0;
        self.settings = self.article_defaults.clone();
    }

    /// Apply a provider completion from the event loop
    pub fn on_completion(&mut self, completion: Completion) {
        let analyzed = matches!(completion.outcome, Outcome::Analyzed(Ok(_)));
        let generated = matches!(completion.outcome, Outcome::Generated(Ok(_)));

        if self.driver.apply(completion) == Reconciled::Stale {
            return;
        }

        if analyzed {
            if let Some(analysis) = self.driver.session().analysis() {
                self.settings = ArticleSettings::from_analysis(analysis, &self.article_defaults);
            }
            self.topic_index = 0;
            self.results_scroll = 0;
        }
        if generated {
            self.article_scroll = 0;
            self.show_toast("Article ready");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editor settings
    // ─────────────────────────────────────────────────────────────────────────

    /// Cycle the tone; landing on Custom without text starts editing it
    pub fn cycle_tone(&mut self) {
        self.settings.tone = self.settings.tone.next();
        let has_text = self
            .settings
            .custom_tone
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        self.editing_custom_tone = self.settings.tone == Tone::Custom && !has_text;
    }

    pub fn edit_custom_tone(&mut self) {
        if self.settings.tone == Tone::Custom {
            self.editing_custom_tone = true;
        }
    }

    pub fn custom_tone_input(&mut self, c: char) {
        if !c.is_control() {
            self.settings.custom_tone.get_or_insert_with(String::new).push(c);
        }
    }

    pub fn custom_tone_backspace(&mut self) {
        if let Some(text) = self.settings.custom_tone.as_mut() {
            text.pop();
        }
    }

    pub fn adjust_words(&mut self, up: bool) {
        let words = &mut self.settings.target_words;
        *words = if up {
            words.saturating_add(WORD_STEP).min(MAX_WORDS)
        } else {
            words.saturating_sub(WORD_STEP).max(MIN_WORDS)
        };
    }

    pub fn adjust_images(&mut self, up: bool) {
        let images = &mut self.settings.max_images;
        *images = if up {
            (*images + 1).min(MAX_IMAGES)
        } else {
            images.saturating_sub(1)
        };
    }

    pub fn toggle_media(&mut self) {
        self.settings.include_media = !self.settings.include_media;
    }

    pub fn toggle_image_source(&mut self) {
        self.settings.image_source = self.settings.image_source.toggle();
    }

    pub fn toggle_table(&mut self) {
        self.settings.include_table = !self.settings.include_table;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Article output
    // ─────────────────────────────────────────────────────────────────────────

    /// SEO audit of the current article, if there is one
    pub fn audit(&self) -> Option<SeoAnalysis> {
        let session = self.session();
        Some(seo::analyze_article(session.article()?, session.analysis()?))
    }

    pub fn copy_article(&mut self) {
        let Some(article) = self.session().article() else {
            self.show_toast("No article to copy yet");
            return;
        };
        let result = clipboard::copy_article(article);
        match result {
            Ok(()) => self.show_toast("Copied article to clipboard"),
            Err(e) => {
                warn!("Clipboard copy failed: {:#}", e);
                self.show_error_toast("Clipboard unavailable");
            }
        }
    }

    /// Write the article next to the working directory as HTML
    pub fn export_article(&mut self) {
        let session = self.driver.session();
        let (Some(article), Some(analysis)) = (session.article(), session.analysis()) else {
            self.show_toast("No article to export yet");
            return;
        };
        let path = article_filename(&analysis.keyword);
        let result = export::write_html(&path, article, analysis, &self.analysis_lang);
        match result {
            Ok(()) => {
                info!(path = %path.display(), "article saved from editor");
                self.show_toast(format!("Saved {}", path.display()));
            }
            Err(e) => {
                warn!("Export failed: {:#}", e);
                self.show_error_toast("Export failed, see logs");
            }
        }
    }
}

/// `best-running-shoes.html` for "Best Running Shoes!"
///
/// Non-ASCII letters are kept so Arabic keywords still get a readable name.
pub fn article_filename(keyword: &str) -> PathBuf {
    let mut slug = String::new();
    for c in keyword.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let stem = if slug.is_empty() { "article" } else { slug };
    PathBuf::from(format!("{}.html", stem))
}
