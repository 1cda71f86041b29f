// Article export - standalone HTML document
//
// The article body is already HTML; export wraps it in a document with the
// meta title/description in <head> so it can be opened or pasted into a CMS.

use crate::models::{AnalysisResult, GeneratedArticle};
use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;

/// Escape text for use inside HTML text nodes and quoted attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Right-to-left languages get `dir="rtl"` on the document
fn text_direction(lang: &str) -> &'static str {
    match lang.split(['-', '_']).next().unwrap_or_default() {
        "ar" | "fa" | "he" | "ur" => "rtl",
        _ => "ltr",
    }
}

/// Render a complete HTML document for the article
pub fn render_html(article: &GeneratedArticle, analysis: &AnalysisResult, lang: &str) -> String {
    let keywords = std::iter::once(analysis.keyword.as_str())
        .chain(analysis.related_keywords.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}" dir="{dir}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{meta_title}</title>
<meta name="description" content="{meta_description}">
<meta name="keywords" content="{keywords}">
<meta name="generator" content="seoscribe {version}">
<meta name="date" content="{date}">
</head>
<body>
<article>
<h1>{title}</h1>
{content}
</article>
</body>
</html>
"#,
        lang = escape(lang),
        dir = text_direction(lang),
        meta_title = escape(&article.meta_title),
        meta_description = escape(&article.meta_description),
        keywords = escape(&keywords),
        version = crate::config::VERSION,
        date = Local::now().format("%Y-%m-%d"),
        title = escape(&article.title),
        content = article.content.trim(),
    )
}

/// Write the article as an HTML file, creating parent directories
pub fn write_html(
    path: &Path,
    article: &GeneratedArticle,
    analysis: &AnalysisResult,
    lang: &str,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, render_html(article, analysis, lang))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "article exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{analysis, article};

    #[test]
    fn document_carries_meta_and_body() {
        let mut a = article("Shoes & Socks");
        a.meta_description = "Say \"hi\" <now>".to_string();
        let html = render_html(&a, &analysis("best running shoes"), "en");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Shoes &amp; Socks</h1>"));
        assert!(html.contains("content=\"Say &quot;hi&quot; &lt;now&gt;\""));
        assert!(html.contains("best running shoes, running shoes for flat feet"));
        assert!(html.contains("<h2>Intro</h2><p>Some body text.</p>"));
        assert!(html.contains("dir=\"ltr\""));
    }

    #[test]
    fn arabic_documents_are_rtl() {
        let html = render_html(&article("t"), &analysis("k"), "ar");
        assert!(html.contains("<html lang=\"ar\" dir=\"rtl\">"));
        assert_eq!(text_direction("ar-SA"), "rtl");
        assert_eq!(text_direction("en_US"), "ltr");
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("article.html");
        write_html(&path, &article("Title"), &analysis("k"), "en").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<title>Title</title>"));
    }
}
