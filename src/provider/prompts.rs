//! Prompt builders and JSON response schemas for the live provider
//!
//! Kept separate from the HTTP client so prompt wording can be tested without
//! a network and without an API key.

use crate::models::{AnalysisResult, AnalyzeRequest, ArticleSettings};
use serde_json::{json, Value};

/// Prompt for the keyword analysis stage
pub fn analysis_prompt(request: &AnalyzeRequest) -> String {
    format!(
        "You are a senior SEO strategist. Analyze the search landscape for the keyword \
         \"{keyword}\" as it appears to a {device} user in country \"{country}\" searching \
         in language \"{lang}\".\n\n\
         Return:\n\
         - the dominant search intent\n\
         - an SEO difficulty score from 0 to 100 with a short explanation\n\
         - a word count band (min, max, recommended, average of the top results) where \
           min <= recommended <= max\n\
         - 5 to 8 FAQ questions people ask\n\
         - 8 to 12 related keywords\n\
         - 3 to 5 top competitor pages with title, url, strengths and weaknesses\n\
         - a suggested outline of H2 section headings\n\
         - 3 to 5 suggested article titles\n\n\
         Write every text value in language \"{lang}\". Echo the keyword exactly as given.",
        keyword = request.keyword,
        device = request.device,
        country = request.country,
        lang = request.lang,
    )
}

/// Prompt for the article generation stage
pub fn generation_prompt(
    analysis: &AnalysisResult,
    settings: &ArticleSettings,
    topic: Option<&str>,
) -> String {
    let mut prompt = format!(
        "You are an expert SEO copywriter. Write a complete article for the keyword \"{}\".\n\n\
         SEARCH INTENT: {}\n\
         TARGET LENGTH: about {} words\n\
         TONE: {}\n",
        analysis.keyword,
        analysis.search_intent,
        settings.target_words,
        settings.effective_tone(),
    );

    if let Some(topic) = topic {
        prompt.push_str(&format!(
            "FOCUS TOPIC: center the article on \"{}\" while still targeting the keyword.\n",
            topic
        ));
    }

    if !analysis.suggested_outline.is_empty() {
        prompt.push_str("\nOUTLINE TO COVER:\n");
        for heading in &analysis.suggested_outline {
            prompt.push_str(&format!("- {}\n", heading));
        }
    }

    if !analysis.related_keywords.is_empty() {
        prompt.push_str(&format!(
            "\nWEAVE IN RELATED KEYWORDS: {}\n",
            analysis.related_keywords.join(", ")
        ));
    }

    if !analysis.faq_suggestions.is_empty() {
        prompt.push_str("\nEND WITH AN FAQ SECTION ANSWERING:\n");
        for question in &analysis.faq_suggestions {
            prompt.push_str(&format!("- {}\n", question));
        }
    }

    let weaknesses: Vec<&str> = analysis
        .competitors
        .iter()
        .flat_map(|c| c.weaknesses.iter().map(String::as_str))
        .collect();
    if !weaknesses.is_empty() {
        prompt.push_str(&format!(
            "\nOUTPERFORM COMPETITORS WHERE THEY ARE WEAK: {}\n",
            weaknesses.join("; ")
        ));
    }

    prompt.push_str("\nFORMAT RULES:\n");
    prompt.push_str("- content is HTML using <h2>, <h3>, <p>, <ul>, <li>; no <html> or <body>\n");
    if settings.include_media && settings.max_images > 0 {
        prompt.push_str(&format!(
            "- include up to {} <img> tags with royalty-free {} image URLs and descriptive alt text\n",
            settings.max_images,
            settings.image_source.as_str()
        ));
    } else {
        prompt.push_str("- do not include images\n");
    }
    if settings.include_table {
        prompt.push_str(&format!(
            "- include one HTML <table> of type \"{}\"\n",
            settings.table_type
        ));
    }
    prompt.push_str("- metaTitle at most 60 characters, metaDescription 120 to 160 characters\n");

    prompt
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

/// Response schema for the analysis stage (Gemini OpenAPI subset)
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "keyword": { "type": "STRING" },
            "searchIntent": { "type": "STRING" },
            "seoDifficulty": {
                "type": "OBJECT",
                "properties": {
                    "score": { "type": "INTEGER" },
                    "explanation": { "type": "STRING" }
                },
                "required": ["score", "explanation"]
            },
            "wordCountSuggestion": {
                "type": "OBJECT",
                "properties": {
                    "min": { "type": "INTEGER" },
                    "max": { "type": "INTEGER" },
                    "recommended": { "type": "INTEGER" },
                    "average": { "type": "INTEGER" }
                },
                "required": ["min", "max", "recommended", "average"]
            },
            "faqSuggestions": string_array(),
            "relatedKeywords": string_array(),
            "competitors": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "url": { "type": "STRING" },
                        "strengths": string_array(),
                        "weaknesses": string_array()
                    },
                    "required": ["title", "url", "strengths", "weaknesses"]
                }
            },
            "suggestedOutline": string_array(),
            "suggestedTitles": string_array()
        },
        "required": [
            "keyword", "searchIntent", "seoDifficulty", "wordCountSuggestion",
            "faqSuggestions", "relatedKeywords", "competitors",
            "suggestedOutline", "suggestedTitles"
        ]
    })
}

/// Response schema for the generation stage
pub fn article_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "metaTitle": { "type": "STRING" },
            "metaDescription": { "type": "STRING" },
            "content": { "type": "STRING" }
        },
        "required": ["title", "metaTitle", "metaDescription", "content"]
    })
}

/// Pull the JSON document out of a model reply
///
/// JSON response mode normally returns a bare object, but some models still
/// wrap it in a ```json fence or add a sentence around it.
pub fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);

    match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start < end => &unfenced[start..=end],
        _ => unfenced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::analysis;
    use crate::models::{ImageSource, Tone};

    #[test]
    fn analysis_prompt_carries_targeting() {
        let prompt = analysis_prompt(&AnalyzeRequest::new(
            "best running shoes",
            "US",
            "desktop",
            "en",
        ));
        assert!(prompt.contains("\"best running shoes\""));
        assert!(prompt.contains("desktop user"));
        assert!(prompt.contains("country \"US\""));
        assert!(prompt.contains("language \"en\""));
    }

    #[test]
    fn generation_prompt_includes_topic_and_settings() {
        let settings = ArticleSettings {
            target_words: 1200,
            include_media: true,
            image_source: ImageSource::Unsplash,
            max_images: 2,
            include_table: true,
            table_type: "pros and cons".to_string(),
            tone: Tone::Custom,
            custom_tone: Some("playful".to_string()),
        };
        let prompt = generation_prompt(&analysis("k"), &settings, Some("how shoes are made"));
        assert!(prompt.contains("about 1200 words"));
        assert!(prompt.contains("TONE: playful"));
        assert!(prompt.contains("FOCUS TOPIC: center the article on \"how shoes are made\""));
        assert!(prompt.contains("up to 2 <img> tags"));
        assert!(prompt.contains("Unsplash"));
        assert!(prompt.contains("\"pros and cons\""));
        assert!(prompt.contains("No buying guide"));
    }

    #[test]
    fn generation_prompt_without_topic_or_media() {
        let settings = ArticleSettings {
            include_media: false,
            ..Default::default()
        };
        let prompt = generation_prompt(&analysis("k"), &settings, None);
        assert!(!prompt.contains("FOCUS TOPIC"));
        assert!(prompt.contains("do not include images"));
        assert!(!prompt.contains("<table>"));
    }

    #[test]
    fn extract_json_handles_fences_and_chatter() {
        assert_eq!(extract_json("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(extract_json("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json("```\n{\"a\":1}\n```\n"), "{\"a\":1}");
        assert_eq!(extract_json("Here you go: {\"a\":{\"b\":2}} enjoy"), "{\"a\":{\"b\":2}}");
        assert_eq!(extract_json("no json"), "no json");
    }

    #[test]
    fn schemas_require_contract_fields() {
        let schema = analysis_schema();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "wordCountSuggestion"));
        assert_eq!(article_schema()["required"].as_array().unwrap().len(), 4);
    }
}
