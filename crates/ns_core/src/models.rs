use std::fmt;

use async_trait::async_trait;

use crate::types::SummaryRequest;
use crate::Result;

#[async_trait]
pub trait SummarizationModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Summarize one already-bounded chunk of the request's text.
    async fn summarize_chunk(&self, request: &SummaryRequest, chunk: &str) -> Result<String>;
}
