// On-page SEO audit of a generated article
//
// Runs locally against the article and the analysis it was written from.
// Each check is pass/fail; the score is the share of passed checks (0-100).

use crate::models::{AnalysisResult, GeneratedArticle};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Recommended meta title length in characters
const META_TITLE_RANGE: (usize, usize) = (30, 60);

/// Recommended meta description length in characters
const META_DESCRIPTION_RANGE: (usize, usize) = (120, 160);

/// Words at the start of the body the keyword should appear in
const INTRO_WORDS: usize = 100;

/// One audit rule and whether the article passed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoCheck {
    pub passed: bool,
    pub text: String,
}

/// Audit result for one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoAnalysis {
    pub score: u32,
    pub checks: Vec<SeoCheck>,
}

impl SeoAnalysis {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Label for the score, matching the difficulty labels' granularity
    pub fn grade(&self) -> &'static str {
        match self.score {
            80..=100 => "Good",
            50..=79 => "Needs work",
            _ => "Poor",
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn img_regex() -> &'static Regex {
    static IMG: OnceLock<Regex> = OnceLock::new();
    IMG.get_or_init(|| Regex::new(r"(?is)<img\b[^>]*>").expect("static regex"))
}

fn alt_regex() -> &'static Regex {
    static ALT: OnceLock<Regex> = OnceLock::new();
    ALT.get_or_init(|| Regex::new(r#"(?is)\balt\s*=\s*"[^"]*[^"\s][^"]*""#).expect("static regex"))
}

fn check(passed: bool, text: String) -> SeoCheck {
    SeoCheck { passed, text }
}

/// Audit `article` against the keyword and word band of `analysis`
pub fn analyze_article(article: &GeneratedArticle, analysis: &AnalysisResult) -> SeoAnalysis {
    let keyword = analysis.keyword.trim();
    let plain = article.plain_text();
    let words = plain.split_whitespace().count();
    let headings = article.headings();
    let band = analysis.word_count_suggestion;

    let mut checks = Vec::new();

    checks.push(check(
        contains_ci(&article.title, keyword),
        format!("Keyword \"{}\" appears in the title", keyword),
    ));

    let title_len = article.meta_title.chars().count();
    checks.push(check(
        (META_TITLE_RANGE.0..=META_TITLE_RANGE.1).contains(&title_len),
        format!(
            "Meta title is {}-{} characters ({})",
            META_TITLE_RANGE.0, META_TITLE_RANGE.1, title_len
        ),
    ));

    let description_len = article.meta_description.chars().count();
    checks.push(check(
        (META_DESCRIPTION_RANGE.0..=META_DESCRIPTION_RANGE.1).contains(&description_len),
        format!(
            "Meta description is {}-{} characters ({})",
            META_DESCRIPTION_RANGE.0, META_DESCRIPTION_RANGE.1, description_len
        ),
    ));

    checks.push(check(
        contains_ci(&article.meta_description, keyword),
        "Keyword appears in the meta description".to_string(),
    ));

    let intro: Vec<&str> = plain.split_whitespace().take(INTRO_WORDS).collect();
    checks.push(check(
        contains_ci(&intro.join(" "), keyword),
        format!("Keyword appears in the first {} words", INTRO_WORDS),
    ));

    checks.push(check(
        headings.len() >= 2,
        format!("Content is structured with subheadings ({})", headings.len()),
    ));

    checks.push(check(
        (band.min as usize..=band.max as usize).contains(&words),
        format!(
            "Length is within the recommended {}-{} words ({})",
            band.min, band.max, words
        ),
    ));

    let images: Vec<&str> = img_regex()
        .find_iter(&article.content)
        .map(|m| m.as_str())
        .collect();
    if !images.is_empty() {
        let with_alt = images.iter().filter(|tag| alt_regex().is_match(tag)).count();
        checks.push(check(
            with_alt == images.len(),
            format!("Images have alt text ({}/{})", with_alt, images.len()),
        ));
    }

    if !analysis.related_keywords.is_empty() {
        let used = analysis
            .related_keywords
            .iter()
            .filter(|k| contains_ci(&plain, k))
            .count();
        checks.push(check(
            used > 0,
            format!(
                "Related keywords used ({}/{})",
                used,
                analysis.related_keywords.len()
            ),
        ));
    }

    let passed = checks.iter().filter(|c| c.passed).count();
    let score = (passed * 100 / checks.len()) as u32;

    SeoAnalysis { score, checks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::analysis;

    fn strong_article() -> GeneratedArticle {
        let body = "best running shoes ".repeat(170);
        GeneratedArticle {
            title: "Best Running Shoes for Every Runner".to_string(),
            meta_title: "Best Running Shoes for Every Runner in 2025".to_string(),
            meta_description: "Our guide to the best running shoes covers cushioning, fit and \
                durability, with lab-tested picks for road, trail and running shoes for flat feet."
                .to_string(),
            content: format!(
                "<p>{body}</p><h2>How we tested</h2><p>{body}</p>\
                 <img src=\"a.jpg\" alt=\"Runner lacing shoes\">\
                 <h2>Running shoes for flat feet</h2><p>{body}</p>\
                 <p>running shoes for flat feet need support.</p>",
                body = body
            ),
        }
    }

    #[test]
    fn well_optimized_article_passes_everything() {
        let audit = analyze_article(&strong_article(), &analysis("best running shoes"));
        let failed: Vec<_> = audit.checks.iter().filter(|c| !c.passed).collect();
        assert!(failed.is_empty(), "failed checks: {:?}", failed);
        assert_eq!(audit.score, 100);
        assert_eq!(audit.grade(), "Good");
    }

    #[test]
    fn missing_keyword_and_short_meta_lower_the_score() {
        let article = GeneratedArticle {
            title: "Footwear".to_string(),
            meta_title: "Shoes".to_string(),
            meta_description: "Short.".to_string(),
            content: "<p>Nothing relevant here.</p>".to_string(),
        };
        let audit = analyze_article(&article, &analysis("best running shoes"));
        assert!(audit.score < 20, "score {}", audit.score);
        assert_eq!(audit.grade(), "Poor");
        assert!(!audit.checks[0].passed);
    }

    #[test]
    fn images_without_alt_fail_their_check() {
        let mut article = strong_article();
        article.content.push_str("<img src=\"b.jpg\"><img src=\"c.jpg\" alt=\"\">");
        let audit = analyze_article(&article, &analysis("best running shoes"));
        let image_check = audit
            .checks
            .iter()
            .find(|c| c.text.starts_with("Images have alt text"))
            .unwrap();
        assert!(!image_check.passed);
        assert!(image_check.text.contains("(1/3)"));
    }

    #[test]
    fn image_check_omitted_without_images() {
        let mut article = strong_article();
        article.content = article.content.replace(
            "<img src=\"a.jpg\" alt=\"Runner lacing shoes\">",
            "",
        );
        let audit = analyze_article(&article, &analysis("best running shoes"));
        assert!(audit
            .checks
            .iter()
            .all(|c| !c.text.starts_with("Images have alt text")));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let mut article = strong_article();
        article.title = "BEST RUNNING SHOES, Ranked".to_string();
        let audit = analyze_article(&article, &analysis("best running shoes"));
        assert!(audit.checks[0].passed);
    }
}
