use chrono::{DateTime, Utc};
use ns_core::{ArticleInput, Result, SummaryRequest};
use ns_inference::highlight::{render_highlight_html, select_highlight};
use ns_inference::summarizer::truncate_chars;
use ns_inference::SummarizationClient;
use serde::{Deserialize, Serialize};

use crate::fetcher::ArticleFetcher;
use crate::logging::Logger;

pub const PREVIEW_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryJob {
    pub input: ArticleInput,
    pub model_id: String,
    pub min_length: u32,
    pub max_length: u32,
    pub highlight: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub source: String,
    pub model_id: String,
    pub article_preview: String,
    pub article_chars: usize,
    pub summary: String,
    pub highlight: Option<String>,
    pub highlighted_html: Option<String>,
    pub generated_at: DateTime<Utc>,
}

fn preview(text: &str) -> String {
    let head = truncate_chars(text, PREVIEW_CHARS);
    if head.len() < text.len() {
        format!("{}...", head)
    } else {
        head.to_string()
    }
}

/// fetch -> summarize -> highlight, for a single request.
#[derive(Debug)]
pub struct SummaryPipeline {
    fetcher: ArticleFetcher,
    client: SummarizationClient,
}

impl SummaryPipeline {
    pub fn new(fetcher: ArticleFetcher, client: SummarizationClient) -> Self {
        Self { fetcher, client }
    }

    pub fn client(&self) -> &SummarizationClient {
        &self.client
    }

    pub async fn run(&self, job: SummaryJob) -> Result<SummaryReport> {
        let logger = match &job.input {
            ArticleInput::Text(_) => Logger::new().with_prefix("text"),
            ArticleInput::Url(url) => Logger::new().with_prefix(url.clone()),
        };

        // Bounds are checked before anything touches the network.
        SummaryRequest::new(String::new(), job.model_id.clone(), job.min_length, job.max_length)
            .validate_parameters()?;

        let source = job.input.describe().to_string();
        let text = match job.input {
            ArticleInput::Text(text) => text,
            ArticleInput::Url(url) => {
                logger.info("Fetching article");
                self.fetcher.fetch(&url).await?
            }
        };

        logger.info(&format!(
            "Summarizing {} chars with {} via {}",
            text.chars().count(),
            job.model_id,
            self.client.model_name()
        ));
        let request = SummaryRequest::new(text, job.model_id, job.min_length, job.max_length);
        let summary = match self.client.summarize(&request).await {
            Ok(summary) => summary,
            Err(e) => {
                logger.error(&format!("Summarization failed: {}", e));
                return Err(e);
            }
        };

        let highlight = if job.highlight { select_highlight(&summary) } else { None };
        let highlighted_html = highlight
            .as_deref()
            .map(|sentence| render_highlight_html(&summary, sentence));
        logger.info("Summary ready");

        Ok(SummaryReport {
            source,
            model_id: request.model_id,
            article_preview: preview(&request.text),
            article_chars: request.text.chars().count(),
            summary,
            highlight,
            highlighted_html,
            generated_at: Utc::now(),
        })
    }
}
