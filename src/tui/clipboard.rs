//! Copy a generated article to the system clipboard
//!
//! `arboard` handles Windows, macOS and Linux. A fresh clipboard handle is
//! opened per copy; on headless Linux there is no display and the copy fails.

use crate::models::GeneratedArticle;
use anyhow::{Context, Result};
use arboard::Clipboard;

/// Text placed on the clipboard for an article: title, then the HTML body
pub fn article_clipboard_text(article: &GeneratedArticle) -> String {
    format!("<h1>{}</h1>\n{}", article.title.trim(), article.content.trim())
}

pub fn copy_article(article: &GeneratedArticle) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(article_clipboard_text(article))
        .context("Failed to set clipboard text")?;
    Ok(())
}
