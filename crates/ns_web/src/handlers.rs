use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use ns_core::{ArticleInput, LengthBounds, ModelChoice};
use ns_fetcher::{SummaryJob, SummaryReport};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub key: String,
    pub id: String,
    pub label: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeBody {
    pub url: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub model: ModelChoice,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    #[serde(default)]
    pub highlight: bool,
}

pub async fn list_models() -> Json<Vec<ModelInfo>> {
    Json(
        ModelChoice::ALL
            .iter()
            .map(|m| ModelInfo {
                key: m.key().to_string(),
                id: m.model_id().to_string(),
                label: m.label().to_string(),
                description: m.description().to_string(),
            })
            .collect(),
    )
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SummarizeBody>,
) -> Result<Json<SummaryReport>, ApiError> {
    let min_length = body.min_length.unwrap_or(LengthBounds::DEFAULT_MIN_LENGTH);
    let max_length = body.max_length.unwrap_or(LengthBounds::DEFAULT_MAX_LENGTH);
    LengthBounds::check(min_length, max_length)?;

    let job = SummaryJob {
        input: ArticleInput::from_parts(body.url, body.text)?,
        model_id: body.model.model_id().to_string(),
        min_length,
        max_length,
        highlight: body.highlight,
    };
    let report = state.pipeline.run(job).await?;
    Ok(Json(report))
}
