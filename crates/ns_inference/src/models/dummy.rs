use std::fmt;

use ns_core::{Result, SummarizationModel, SummaryRequest};

/// Deterministic stand-in for a hosted model: keeps the first `max_length` words.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SummarizationModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize_chunk(&self, request: &SummaryRequest, chunk: &str) -> Result<String> {
        let words: Vec<&str> = chunk
            .split_whitespace()
            .take(request.max_length as usize)
            .collect();
        Ok(words.join(" "))
    }
}
