// Search form input
//
// The Search view edits four fields. Keyword, country and language are free
// text; device flips between desktop and mobile. Characters typed in the
// Search view always land in the focused field, so view-level shortcuts
// there use non-character keys.

use crate::config::{normalize_device, SearchDefaults};
use crate::models::AnalyzeRequest;

/// Longest accepted field value, in characters
const MAX_FIELD_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Keyword,
    Country,
    Device,
    Language,
}

impl SearchField {
    pub fn all() -> &'static [SearchField] {
        &[
            SearchField::Keyword,
            SearchField::Country,
            SearchField::Device,
            SearchField::Language,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchField::Keyword => "Keyword",
            SearchField::Country => "Country",
            SearchField::Device => "Device",
            SearchField::Language => "Language",
        }
    }

    fn next(self) -> Self {
        let fields = Self::all();
        let i = fields.iter().position(|&f| f == self).unwrap_or(0);
        fields[(i + 1) % fields.len()]
    }

    fn prev(self) -> Self {
        let fields = Self::all();
        let i = fields.iter().position(|&f| f == self).unwrap_or(0);
        fields[(i + fields.len() - 1) % fields.len()]
    }
}

/// Editable state of the Search view
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub keyword: String,
    pub country: String,
    pub device: String,
    pub lang: String,
    pub focus: SearchField,
}

impl SearchForm {
    pub fn new(defaults: &SearchDefaults) -> Self {
        Self {
            keyword: String::new(),
            country: defaults.country.clone(),
            device: normalize_device(&defaults.device),
            lang: defaults.lang.clone(),
            focus: SearchField::Keyword,
        }
    }

    pub fn value(&self, field: SearchField) -> &str {
        match field {
            SearchField::Keyword => &self.keyword,
            SearchField::Country => &self.country,
            SearchField::Device => &self.device,
            SearchField::Language => &self.lang,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            SearchField::Keyword => Some(&mut self.keyword),
            SearchField::Country => Some(&mut self.country),
            SearchField::Language => Some(&mut self.lang),
            SearchField::Device => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Type a character into the focused field
    ///
    /// On the device field any character toggles desktop/mobile.
    pub fn insert(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        match self.text_mut() {
            Some(text) if text.chars().count() < MAX_FIELD_CHARS => text.push(c),
            Some(_) => {}
            None => self.toggle_device(),
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    pub fn toggle_device(&mut self) {
        self.device = if self.device == "mobile" {
            "desktop".to_string()
        } else {
            "mobile".to_string()
        };
    }

    /// Build the analysis request; blank targeting falls back to defaults
    pub fn to_request(&self, defaults: &SearchDefaults) -> AnalyzeRequest {
        let or_default = |value: &str, default: &str| {
            let value = value.trim();
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };
        AnalyzeRequest::new(
            self.keyword.clone(),
            or_default(&self.country, &defaults.country).to_uppercase(),
            normalize_device(&self.device),
            or_default(&self.lang, &defaults.lang).to_lowercase(),
        )
    }
}
