// Mock provider: deterministic analyses and articles for offline development
//
// Everything is derived from the keyword (and topic/settings for articles),
// so the same input always produces the same output. Used by demo mode and
// by `--mock` on the CLI.
//
// Run with: SEOSCRIBE_DEMO=1 cargo run --release

use super::{AnalysisProvider, ProviderError};
use crate::models::{
    AnalysisResult, AnalyzeRequest, ArticleSettings, CompetitorInfo, GeneratedArticle,
    SeoDifficulty, WordCountSuggestion,
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

/// Deterministic provider with optional artificial latency
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    delay: Duration,
}

impl MockProvider {
    /// Mock that waits `delay` before answering, to exercise loading states
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

/// FNV-1a over the normalized keyword
fn seed(keyword: &str) -> u64 {
    keyword
        .trim()
        .to_lowercase()
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325u64, |hash, b| {
            (hash ^ b as u64).wrapping_mul(0x0100_0000_01b3)
        })
}

fn slug(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the analysis for a keyword (pure, no latency)
pub fn mock_analysis(request: &AnalyzeRequest) -> AnalysisResult {
    let keyword = request.keyword.trim();
    let s = seed(keyword);
    let score = (s % 81) as u32 + 10;
    let recommended = 900 + ((s >> 8) % 13) as u32 * 100;
    let min = recommended - 300;
    let max = recommended + 600;
    let average = recommended + ((s >> 16) % 4) as u32 * 100;
    let kw_title = title_case(keyword);

    let intent = match s % 4 {
        0 => "Informational",
        1 => "Commercial investigation",
        2 => "Transactional",
        _ => "Navigational",
    };

    let explanation = if score < 30 {
        "Few authoritative pages target this phrase; a thorough guide can rank quickly."
    } else if score < 60 {
        "A mix of niche blogs and mid-size publishers rank; depth and freshness win."
    } else {
        "Large publishers with strong backlink profiles dominate the first page."
    };

    AnalysisResult {
        keyword: keyword.to_string(),
        search_intent: intent.to_string(),
        seo_difficulty: SeoDifficulty {
            score,
            explanation: explanation.to_string(),
        },
        word_count_suggestion: WordCountSuggestion {
            min,
            max,
            recommended,
            average,
        },
        faq_suggestions: vec![
            format!("What is {}?", keyword),
            format!("How do I choose {}?", keyword),
            format!("Is {} worth it?", keyword),
            format!("What are the alternatives to {}?", keyword),
            format!("How much does {} cost?", keyword),
        ],
        related_keywords: vec![
            format!("{} guide", keyword),
            format!("{} review", keyword),
            format!("{} for beginners", keyword),
            format!("cheap {}", keyword),
            format!("{} comparison", keyword),
            format!("{} tips", keyword),
            format!("{} near me", keyword),
            format!("best {} 2025", keyword),
        ],
        competitors: (1..=3)
            .map(|i| CompetitorInfo {
                title: format!("{} - Complete Guide #{}", kw_title, i),
                url: format!("https://competitor{}.example.com/{}", i, slug(keyword)),
                strengths: vec![
                    "Clear structure with scannable headings".to_string(),
                    format!("Ranks for {} related queries", 10 * i),
                ],
                weaknesses: vec![
                    "Outdated statistics".to_string(),
                    "No FAQ section".to_string(),
                ],
            })
            .collect(),
        suggested_outline: vec![
            format!("What is {}?", kw_title),
            format!("Why {} matters", keyword),
            format!("How to choose {}", keyword),
            format!("Common mistakes with {}", keyword),
            "Frequently asked questions".to_string(),
        ],
        suggested_titles: vec![
            format!("The Ultimate Guide to {}", kw_title),
            format!("{}: Everything You Need to Know", kw_title),
            format!("{} Explained in 10 Minutes", kw_title),
        ],
    }
}

/// Build the article for an analysis (pure, no latency)
pub fn mock_article(
    analysis: &AnalysisResult,
    settings: &ArticleSettings,
    topic: Option<&str>,
) -> GeneratedArticle {
    let keyword = analysis.keyword.as_str();
    let subject = topic.unwrap_or(keyword);
    let title = match topic {
        Some(topic) => format!("{}: {}", title_case(keyword), title_case(topic)),
        None => analysis
            .suggested_titles
            .first()
            .cloned()
            .unwrap_or_else(|| title_case(keyword)),
    };

    let mut content = format!(
        "<p>This {} guide covers {} in depth, written for readers searching for \"{}\".</p>\n",
        settings.effective_tone(),
        subject,
        keyword
    );

    let sections = analysis.suggested_outline.len().max(1);
    let words_per_section = (settings.target_words as usize / sections).max(20);
    let filler_sentence = format!(
        "Understanding {} helps you make better decisions about {}. ",
        subject, keyword
    );
    let filler_words = filler_sentence.split_whitespace().count();

    for (i, heading) in analysis.suggested_outline.iter().enumerate() {
        content.push_str(&format!("<h2>{}</h2>\n", heading));
        let repeats = (words_per_section / filler_words).max(1);
        content.push_str(&format!("<p>{}</p>\n", filler_sentence.repeat(repeats).trim()));

        if settings.include_media && (i as u32) < settings.max_images {
            content.push_str(&format!(
                "<img src=\"https://images.{}.example/{}-{}.jpg\" alt=\"{} illustration {}\">\n",
                settings.image_source.as_str().to_lowercase(),
                slug(keyword),
                i + 1,
                keyword,
                i + 1
            ));
        }

        if settings.include_table && i == 0 {
            content.push_str(&format!(
                "<table><caption>{} ({})</caption><tr><th>Option</th><th>Notes</th></tr>\
                 <tr><td>{}</td><td>Baseline</td></tr></table>\n",
                title_case(&settings.table_type),
                keyword,
                subject
            ));
        }
    }

    if !analysis.faq_suggestions.is_empty() {
        content.push_str("<h2>FAQ</h2>\n");
        for question in &analysis.faq_suggestions {
            content.push_str(&format!(
                "<h3>{}</h3>\n<p>Short answer about {}.</p>\n",
                question, subject
            ));
        }
    }

    let meta_title: String = title.chars().take(60).collect();
    let meta_description = format!(
        "Learn everything about {}: practical advice, common mistakes and answers to the questions readers ask most about {}.",
        subject, keyword
    );

    GeneratedArticle {
        title,
        meta_title,
        meta_description,
        content,
    }
}

#[async_trait]
impl AnalysisProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ProviderError> {
        self.simulate_latency().await;
        let result = mock_analysis(request);
        result.validate()?;
        Ok(result)
    }

    async fn generate(
        &self,
        analysis: &AnalysisResult,
        settings: &ArticleSettings,
        topic: Option<&str>,
    ) -> Result<GeneratedArticle, ProviderError> {
        self.simulate_latency().await;
        let article = mock_article(analysis, settings, topic);
        article.validate()?;
        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(keyword: &str) -> AnalyzeRequest {
        AnalyzeRequest::new(keyword, "US", "desktop", "en")
    }

    #[test]
    fn analysis_is_deterministic() {
        let a = mock_analysis(&request("best running shoes"));
        let b = mock_analysis(&request("best running shoes"));
        assert_eq!(a, b);
        assert_eq!(a.keyword, "best running shoes");
    }

    #[test]
    fn analysis_always_honors_contract() {
        for keyword in ["a", "seo", "best running shoes", "أحذية الجري", "x y z w"] {
            let analysis = mock_analysis(&request(keyword));
            assert!(analysis.validate().is_ok(), "keyword {:?}", keyword);
            assert!(analysis.seo_difficulty.score <= 100);
        }
    }

    #[test]
    fn targeting_does_not_change_the_analysis() {
        let us = mock_analysis(&request("best running shoes"));
        let sa = mock_analysis(&AnalyzeRequest::new("best running shoes", "SA", "mobile", "ar"));
        assert_eq!(us, sa);
    }

    #[test]
    fn different_keywords_differ() {
        let a = mock_analysis(&request("coffee grinders"));
        let b = mock_analysis(&request("garden hoses"));
        assert_ne!(a.suggested_titles, b.suggested_titles);
    }

    #[test]
    fn article_follows_topic_and_settings() {
        let analysis = mock_analysis(&request("best running shoes"));
        let settings = ArticleSettings {
            include_table: true,
            include_media: true,
            max_images: 2,
            ..Default::default()
        };
        let article = mock_article(&analysis, &settings, Some("how shoes are made"));
        assert!(article.title.contains("How Shoes Are Made"));
        assert!(article.content.contains("<table>"));
        assert_eq!(article.content.matches("<img").count(), 2);
        assert!(article.meta_title.chars().count() <= 60);
        assert!(article.validate().is_ok());
    }

    #[test]
    fn article_without_topic_uses_first_title() {
        let analysis = mock_analysis(&request("coffee grinders"));
        let settings = ArticleSettings {
            include_media: false,
            ..Default::default()
        };
        let article = mock_article(&analysis, &settings, None);
        assert_eq!(article.title, analysis.suggested_titles[0]);
        assert!(!article.content.contains("<img"));
    }

    #[tokio::test]
    async fn provider_round_trip() {
        let provider = MockProvider::default();
        let analysis = provider.analyze(&request("seo tools")).await.unwrap();
        let article = provider
            .generate(&analysis, &ArticleSettings::default(), None)
            .await
            .unwrap();
        assert!(!article.title.is_empty());
    }
}
