pub mod error;
pub mod models;
pub mod types;

pub use error::{Error, Result};
pub use models::SummarizationModel;
pub use types::{ArticleInput, FetchResult, LengthBounds, ModelChoice, SummaryRequest, SummaryResult};
