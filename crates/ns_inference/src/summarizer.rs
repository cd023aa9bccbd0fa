use std::fmt;
use std::sync::Arc;

use futures_util::future::join_all;
use ns_core::{Result, SummarizationModel, SummaryRequest, SummaryResult};

/// Characters per chunk of article text.
pub const CHUNK_SIZE: usize = 3000;
/// Only this many leading chunks are summarized; text past
/// `CHUNK_SIZE * MAX_CHUNKS` characters is dropped.
pub const MAX_CHUNKS: usize = 2;
/// Input limit of the remote model, applied to each chunk.
pub const CHUNK_INPUT_LIMIT: usize = 1500;

/// Splits `text` into sequential, non-overlapping slices of at most `size` characters.
pub fn chunk_text(text: &str, size: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (idx, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// First `limit` characters of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub struct SummarizationClient {
    model: Arc<dyn SummarizationModel>,
}

impl fmt::Debug for SummarizationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummarizationClient")
            .field("model", &self.model.name())
            .finish()
    }
}

impl SummarizationClient {
    pub fn new(model: Arc<dyn SummarizationModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Summarizes the leading chunks concurrently and joins them in chunk order.
    /// Any chunk failure fails the whole call.
    pub async fn summarize(&self, request: &SummaryRequest) -> SummaryResult {
        request.validate()?;

        let chunks = chunk_text(&request.text, CHUNK_SIZE);
        if chunks.len() > MAX_CHUNKS {
            tracing::info!(
                "Article has {} chunks, summarizing the first {}",
                chunks.len(),
                MAX_CHUNKS
            );
        }

        let calls = chunks.iter().take(MAX_CHUNKS).enumerate().map(|(i, chunk)| {
            let input = truncate_chars(chunk, CHUNK_INPUT_LIMIT);
            async move {
                tracing::debug!("Summarizing chunk {} ({} chars)", i + 1, input.chars().count());
                self.model.summarize_chunk(request, input).await
            }
        });

        let summaries = join_all(calls)
            .await
            .into_iter()
            .collect::<Result<Vec<String>>>()?;

        Ok(summaries.join(" "))
    }
}
