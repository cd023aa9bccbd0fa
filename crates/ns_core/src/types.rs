use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Outcome of resolving a URL to article text.
pub type FetchResult = Result<String>;

/// Outcome of summarizing article text.
pub type SummaryResult = Result<String>;

/// Hosted summarization models offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelChoice {
    #[default]
    Bart,
    Pegasus,
    #[value(name = "t5-large")]
    #[serde(rename = "t5-large")]
    T5Large,
}

impl ModelChoice {
    pub const ALL: [ModelChoice; 3] = [ModelChoice::Bart, ModelChoice::Pegasus, ModelChoice::T5Large];

    /// Identifier of the model on the inference endpoint.
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelChoice::Bart => "facebook/bart-large-cnn",
            ModelChoice::Pegasus => "google/pegasus-xsum",
            ModelChoice::T5Large => "t5-large",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ModelChoice::Bart => "bart",
            ModelChoice::Pegasus => "pegasus",
            ModelChoice::T5Large => "t5-large",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelChoice::Bart => "BART (Stable)",
            ModelChoice::Pegasus => "Pegasus (Best for News)",
            ModelChoice::T5Large => "T5-Large (Best for Long Docs)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModelChoice::Bart => "Bidirectional Auto-Regressive Transformer (pre-trained BART, works well for general summarization)",
            ModelChoice::Pegasus => "Transformer-based model (pre-trained Pegasus, optimized for news summarization)",
            ModelChoice::T5Large => "Text-To-Text Transfer Transformer (general model with strong summarization ability)",
        }
    }
}

/// Length ranges offered by the user-facing surfaces.
pub struct LengthBounds;

impl LengthBounds {
    pub const MIN_LENGTH_RANGE: RangeInclusive<u32> = 30..=300;
    pub const MAX_LENGTH_RANGE: RangeInclusive<u32> = 50..=600;
    pub const DEFAULT_MIN_LENGTH: u32 = 50;
    pub const DEFAULT_MAX_LENGTH: u32 = 150;

    /// Checks both bounds against the offered ranges.
    pub fn check(min_length: u32, max_length: u32) -> Result<()> {
        if !Self::MIN_LENGTH_RANGE.contains(&min_length) {
            return Err(Error::InvalidInput(format!(
                "min length {} outside {}..={}",
                min_length,
                Self::MIN_LENGTH_RANGE.start(),
                Self::MIN_LENGTH_RANGE.end()
            )));
        }
        if !Self::MAX_LENGTH_RANGE.contains(&max_length) {
            return Err(Error::InvalidInput(format!(
                "max length {} outside {}..={}",
                max_length,
                Self::MAX_LENGTH_RANGE.start(),
                Self::MAX_LENGTH_RANGE.end()
            )));
        }
        Ok(())
    }
}

/// A single summarization request. Lives for one summarize call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub text: String,
    pub model_id: String,
    pub min_length: u32,
    pub max_length: u32,
}

impl SummaryRequest {
    pub fn new(text: impl Into<String>, model_id: impl Into<String>, min_length: u32, max_length: u32) -> Self {
        Self {
            text: text.into(),
            model_id: model_id.into(),
            min_length,
            max_length,
        }
    }

    /// Checks the length parameters and model id. Must pass before any remote call.
    pub fn validate_parameters(&self) -> Result<()> {
        if self.model_id.trim().is_empty() {
            return Err(Error::InvalidInput("model id must not be empty".to_string()));
        }
        if self.min_length == 0 || self.max_length == 0 {
            return Err(Error::InvalidInput("length bounds must be positive".to_string()));
        }
        if self.min_length > self.max_length {
            return Err(Error::InvalidInput(format!(
                "min length {} exceeds max length {}",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_parameters()?;
        if self.text.trim().is_empty() {
            return Err(Error::InvalidInput("article text is empty".to_string()));
        }
        Ok(())
    }
}

/// Where the article text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleInput {
    Text(String),
    Url(String),
}

impl ArticleInput {
    /// Pasted text wins over a URL when both are given.
    pub fn from_parts(url: Option<String>, text: Option<String>) -> Result<Self> {
        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            return Ok(ArticleInput::Text(text));
        }
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            return Ok(ArticleInput::Url(url.trim().to_string()));
        }
        Err(Error::InvalidInput("provide an article URL or article text".to_string()))
    }

    pub fn describe(&self) -> &str {
        match self {
            ArticleInput::Text(_) => "pasted text",
            ArticleInput::Url(url) => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_choice_ids() {
        assert_eq!(ModelChoice::default().model_id(), "facebook/bart-large-cnn");
        assert_eq!(ModelChoice::Pegasus.model_id(), "google/pegasus-xsum");
        assert_eq!(ModelChoice::T5Large.key(), "t5-large");
        assert_eq!(
            serde_json::to_string(&ModelChoice::T5Large).unwrap(),
            "\"t5-large\""
        );
        let parsed: ModelChoice = serde_json::from_str("\"pegasus\"").unwrap();
        assert_eq!(parsed, ModelChoice::Pegasus);
    }

    #[test]
    fn test_request_rejects_inverted_bounds() {
        let request = SummaryRequest::new("Some text.", "t5-large", 200, 100);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_request_rejects_zero_and_blank() {
        assert!(SummaryRequest::new("text", "t5-large", 0, 10).validate().is_err());
        assert!(SummaryRequest::new("   ", "t5-large", 10, 20).validate().is_err());
        assert!(SummaryRequest::new("text", "", 10, 20).validate().is_err());
        assert!(SummaryRequest::new("text", "t5-large", 20, 20).validate().is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert!(LengthBounds::check(30, 50).is_ok());
        assert!(LengthBounds::check(300, 600).is_ok());
        assert!(LengthBounds::check(29, 100).is_err());
        assert!(LengthBounds::check(50, 601).is_err());
    }

    #[test]
    fn test_article_input_prefers_text() {
        let input = ArticleInput::from_parts(
            Some("https://example.com/a".to_string()),
            Some("Pasted body".to_string()),
        )
        .unwrap();
        assert_eq!(input, ArticleInput::Text("Pasted body".to_string()));

        let input = ArticleInput::from_parts(Some(" https://example.com/a ".to_string()), Some("  ".to_string())).unwrap();
        assert_eq!(input, ArticleInput::Url("https://example.com/a".to_string()));

        assert!(ArticleInput::from_parts(None, None).is_err());
    }
}
