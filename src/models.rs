// Domain models shared by the provider, the session controller and the views
//
// Field names serialize in camelCase because that is the shape the provider
// returns (and the shape the mock produces), so the same types are used on
// the wire and in the Session without a translation layer.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

// ─────────────────────────────────────────────────────────────────────────────
// Analysis
// ─────────────────────────────────────────────────────────────────────────────

/// Parameters of a keyword analysis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub keyword: String,
    /// ISO country code the SERP is targeted at (e.g. "US", "SA")
    pub country: String,
    /// "desktop" or "mobile"
    pub device: String,
    /// Content language code (e.g. "en", "ar")
    pub lang: String,
}

impl AnalyzeRequest {
    pub fn new(
        keyword: impl Into<String>,
        country: impl Into<String>,
        device: impl Into<String>,
        lang: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            country: country.into(),
            device: device.into(),
            lang: lang.into(),
        }
    }
}

/// How hard it is to rank for the keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoDifficulty {
    /// 0 (trivial) to 100 (very hard)
    pub score: u32,
    pub explanation: String,
}

/// Recommended article length band
///
/// `min <= recommended <= max`; a degenerate band where all three are equal
/// is valid. `average` is not bound by the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCountSuggestion {
    pub min: u32,
    pub max: u32,
    pub recommended: u32,
    /// Average length of the ranking pages (informational)
    pub average: u32,
}

impl WordCountSuggestion {
    pub fn is_ordered(&self) -> bool {
        self.min <= self.recommended && self.recommended <= self.max
    }
}

/// Summary of one ranking competitor page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorInfo {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

/// Structured SEO assessment of a keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub keyword: String,
    pub search_intent: String,
    pub seo_difficulty: SeoDifficulty,
    pub word_count_suggestion: WordCountSuggestion,
    #[serde(default)]
    pub faq_suggestions: Vec<String>,
    #[serde(default)]
    pub related_keywords: Vec<String>,
    #[serde(default)]
    pub competitors: Vec<CompetitorInfo>,
    #[serde(default)]
    pub suggested_outline: Vec<String>,
    #[serde(default)]
    pub suggested_titles: Vec<String>,
}

impl AnalysisResult {
    /// Check the structural contract every provider must honor
    pub fn validate(&self) -> Result<(), ContractViolation> {
        if self.keyword.trim().is_empty() {
            return Err(ContractViolation::EmptyKeyword);
        }
        if self.seo_difficulty.score > 100 {
            return Err(ContractViolation::ScoreOutOfRange(self.seo_difficulty.score));
        }
        if !self.word_count_suggestion.is_ordered() {
            return Err(ContractViolation::UnorderedBand(self.word_count_suggestion));
        }
        Ok(())
    }

    /// Human label for the difficulty score
    pub fn difficulty_label(&self) -> &'static str {
        match self.seo_difficulty.score {
            0..=29 => "Easy",
            30..=59 => "Medium",
            60..=79 => "Hard",
            _ => "Very hard",
        }
    }
}

/// A provider returned something that breaks the result contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    #[error("analysis keyword is empty")]
    EmptyKeyword,
    #[error("difficulty score {0} is outside 0..=100")]
    ScoreOutOfRange(u32),
    #[error(
        "word count band is not ordered (min={}, recommended={}, max={})",
        .0.min, .0.recommended, .0.max
    )]
    UnorderedBand(WordCountSuggestion),
    #[error("generated article has an empty {0}")]
    EmptyArticleField(&'static str),
}

// ─────────────────────────────────────────────────────────────────────────────
// Article settings
// ─────────────────────────────────────────────────────────────────────────────

/// Stock photo library used for article images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSource {
    #[default]
    Pexels,
    Unsplash,
}

impl ImageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pexels => "Pexels",
            Self::Unsplash => "Unsplash",
        }
    }

    /// Parse from config/CLI, unknown values fall back to Pexels
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "unsplash" => Self::Unsplash,
            _ => Self::Pexels,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Pexels => Self::Unsplash,
            Self::Unsplash => Self::Pexels,
        }
    }
}

/// Writing tone selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Informative,
    Persuasive,
    Casual,
    /// Use `ArticleSettings::custom_tone`
    Custom,
}

impl Tone {
    pub fn all() -> &'static [Tone] {
        &[
            Tone::Professional,
            Tone::Friendly,
            Tone::Informative,
            Tone::Persuasive,
            Tone::Casual,
            Tone::Custom,
        ]
    }

    pub fn next(self) -> Self {
        let tones = Self::all();
        let current = tones.iter().position(|&t| t == self).unwrap_or(0);
        tones[(current + 1) % tones.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Informative => "informative",
            Tone::Persuasive => "persuasive",
            Tone::Casual => "casual",
            Tone::Custom => "custom",
        }
    }

    /// Parse from config/CLI, unknown values fall back to professional
    pub fn from_str(s: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-chosen parameters controlling the generated article's shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSettings {
    pub target_words: u32,
    pub include_media: bool,
    pub image_source: ImageSource,
    pub max_images: u32,
    pub include_table: bool,
    /// Free-form table descriptor, e.g. "comparison" or "pros and cons"
    pub table_type: String,
    pub tone: Tone,
    /// Only read when `tone == Tone::Custom`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_tone: Option<String>,
}

impl Default for ArticleSettings {
    fn default() -> Self {
        Self {
            target_words: 1200,
            include_media: true,
            image_source: ImageSource::Pexels,
            max_images: 3,
            include_table: false,
            table_type: "comparison".to_string(),
            tone: Tone::Professional,
            custom_tone: None,
        }
    }
}

/// Article settings that cannot be sent to the provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("target word count must be positive")]
    ZeroTargetWords,
    #[error("custom tone selected but no tone text given")]
    MissingCustomTone,
}

impl ArticleSettings {
    /// Seed settings from an analysis: target the recommended length
    pub fn from_analysis(analysis: &AnalysisResult, base: &ArticleSettings) -> Self {
        let recommended = analysis.word_count_suggestion.recommended;
        Self {
            target_words: if recommended > 0 {
                recommended
            } else {
                base.target_words
            },
            ..base.clone()
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.target_words == 0 {
            return Err(SettingsError::ZeroTargetWords);
        }
        if self.tone == Tone::Custom
            && self
                .custom_tone
                .as_deref()
                .map_or(true, |t| t.trim().is_empty())
        {
            return Err(SettingsError::MissingCustomTone);
        }
        Ok(())
    }

    /// Tone text to hand to the provider
    pub fn effective_tone(&self) -> Cow<'_, str> {
        match (self.tone, self.custom_tone.as_deref()) {
            (Tone::Custom, Some(custom)) if !custom.trim().is_empty() => {
                Cow::Borrowed(custom.trim())
            }
            (tone, _) => Cow::Borrowed(tone.as_str()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generated article
// ─────────────────────────────────────────────────────────────────────────────

/// Article produced by the generation stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArticle {
    pub title: String,
    pub meta_title: String,
    pub meta_description: String,
    /// HTML body
    pub content: String,
}

fn tag_regex() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"))
}

impl GeneratedArticle {
    pub fn validate(&self) -> Result<(), ContractViolation> {
        if self.title.trim().is_empty() {
            return Err(ContractViolation::EmptyArticleField("title"));
        }
        if self.content.trim().is_empty() {
            return Err(ContractViolation::EmptyArticleField("content"));
        }
        Ok(())
    }

    /// Body with HTML tags removed, block tags turned into line breaks
    pub fn plain_text(&self) -> String {
        let with_breaks = self
            .content
            .replace("</p>", "</p>\n")
            .replace("</h2>", "</h2>\n")
            .replace("</h3>", "</h3>\n")
            .replace("</li>", "</li>\n")
            .replace("<br>", "\n");
        let stripped = tag_regex().replace_all(&with_breaks, "");
        stripped
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn word_count(&self) -> usize {
        self.plain_text().split_whitespace().count()
    }

    /// Second-level and third-level headings in document order
    pub fn headings(&self) -> Vec<String> {
        static HEADINGS: OnceLock<Regex> = OnceLock::new();
        let re = HEADINGS.get_or_init(|| {
            Regex::new(r"(?is)<h[23][^>]*>(.*?)</h[23]>").expect("static regex")
        });
        re.captures_iter(&self.content)
            .map(|c| tag_regex().replace_all(&c[1], "").trim().to_string())
            .filter(|h| !h.is_empty())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Analysis used across controller/driver/seo tests
    pub fn analysis(keyword: &str) -> AnalysisResult {
        AnalysisResult {
            keyword: keyword.to_string(),
            search_intent: "Commercial investigation".to_string(),
            seo_difficulty: SeoDifficulty {
                score: 62,
                explanation: "Established review sites dominate page one".to_string(),
            },
            word_count_suggestion: WordCountSuggestion {
                min: 1500,
                max: 2500,
                recommended: 2000,
                average: 1900,
            },
            faq_suggestions: vec!["How often should running shoes be replaced?".to_string()],
            related_keywords: vec!["running shoes for flat feet".to_string()],
            competitors: vec![CompetitorInfo {
                title: "The 10 Best Running Shoes".to_string(),
                url: "https://example.com/best-running-shoes".to_string(),
                strengths: vec!["Lab testing".to_string()],
                weaknesses: vec!["No buying guide".to_string()],
            }],
            suggested_outline: vec![
                "How we tested".to_string(),
                "how shoes are made".to_string(),
            ],
            suggested_titles: vec!["Best Running Shoes of the Year".to_string()],
        }
    }

    pub fn article(title: &str) -> GeneratedArticle {
        GeneratedArticle {
            title: title.to_string(),
            meta_title: title.to_string(),
            meta_description: "A hands-on guide.".to_string(),
            content: "<h2>Intro</h2><p>Some body text.</p>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn degenerate_word_band_is_valid() {
        let mut a = analysis("k");
        a.word_count_suggestion = WordCountSuggestion {
            min: 1000,
            max: 1000,
            recommended: 1000,
            average: 1000,
        };
        assert!(a.validate().is_ok());
    }

    #[test]
    fn average_outside_band_is_valid() {
        let mut a = analysis("k");
        a.word_count_suggestion = WordCountSuggestion {
            min: 1500,
            max: 2500,
            recommended: 2000,
            average: 3100,
        };
        assert!(a.validate().is_ok());

        a.word_count_suggestion.average = 900;
        assert!(a.validate().is_ok());
    }

    #[test]
    fn zero_average_without_competitor_data_is_valid() {
        let mut a = analysis("k");
        a.word_count_suggestion.average = 0;
        a.competitors.clear();
        assert!(a.validate().is_ok());
    }

    #[test]
    fn unordered_band_is_rejected() {
        let mut a = analysis("k");
        a.word_count_suggestion.recommended = 3000;
        assert!(matches!(
            a.validate(),
            Err(ContractViolation::UnorderedBand(_))
        ));
    }

    #[test]
    fn score_above_hundred_is_rejected() {
        let mut a = analysis("k");
        a.seo_difficulty.score = 101;
        assert_eq!(a.validate(), Err(ContractViolation::ScoreOutOfRange(101)));
    }

    #[test]
    fn analysis_parses_provider_json() {
        let json = r#"{
            "keyword": "best running shoes",
            "searchIntent": "Commercial",
            "seoDifficulty": { "score": 40, "explanation": "Moderate" },
            "wordCountSuggestion": { "min": 800, "max": 1600, "recommended": 1200, "average": 1100 },
            "faqSuggestions": ["q1"],
            "relatedKeywords": [],
            "competitors": [{ "title": "t", "url": "https://x.test" }],
            "suggestedOutline": ["a", "b"],
            "suggestedTitles": ["t1"]
        }"#;
        let parsed: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.keyword, "best running shoes");
        assert_eq!(parsed.word_count_suggestion.recommended, 1200);
        assert!(parsed.competitors[0].strengths.is_empty());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn custom_tone_requires_text() {
        let settings = ArticleSettings {
            tone: Tone::Custom,
            custom_tone: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::MissingCustomTone));

        let settings = ArticleSettings {
            tone: Tone::Custom,
            custom_tone: Some("witty but precise".to_string()),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
        assert_eq!(settings.effective_tone(), "witty but precise");
    }

    #[test]
    fn custom_tone_text_ignored_for_preset_tones() {
        let settings = ArticleSettings {
            tone: Tone::Friendly,
            custom_tone: Some("ignored".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.effective_tone(), "friendly");
    }

    #[test]
    fn zero_target_words_rejected() {
        let settings = ArticleSettings {
            target_words: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroTargetWords));
    }

    #[test]
    fn settings_seeded_from_recommended_length() {
        let settings = ArticleSettings::from_analysis(&analysis("k"), &ArticleSettings::default());
        assert_eq!(settings.target_words, 2000);
    }

    #[test]
    fn tone_parsing_and_cycle() {
        assert_eq!(Tone::from_str("Casual"), Tone::Casual);
        assert_eq!(Tone::from_str("nonsense"), Tone::Professional);
        assert_eq!(Tone::Custom.next(), Tone::Professional);
    }

    #[test]
    fn plain_text_and_headings() {
        let article = GeneratedArticle {
            title: "T".to_string(),
            meta_title: "T".to_string(),
            meta_description: "D".to_string(),
            content: "<h2>First <em>part</em></h2><p>one two</p><h3>Sub</h3><ul><li>three</li></ul>"
                .to_string(),
        };
        assert_eq!(article.plain_text(), "First part\none two\nSub\nthree");
        assert_eq!(article.word_count(), 6);
        assert_eq!(article.headings(), vec!["First part", "Sub"]);
    }

    #[test]
    fn empty_article_title_violates_contract() {
        let mut a = article("t");
        a.title = " ".to_string();
        assert_eq!(a.validate(), Err(ContractViolation::EmptyArticleField("title")));
    }
}
