use std::sync::Arc;

use ns_core::{Result, SummarizationModel};

use crate::{Backend, Config};

pub mod dummy;
pub mod huggingface;

pub use dummy::DummyModel;
pub use huggingface::HuggingFaceModel;

/// Builds the configured backend. Called once at startup; an error here is fatal.
pub fn create_model(config: &Config) -> Result<Arc<dyn SummarizationModel>> {
    config.validate()?;
    let model: Arc<dyn SummarizationModel> = match config.backend {
        Backend::HuggingFace => Arc::new(HuggingFaceModel::new(config)?),
        Backend::Dummy => Arc::new(DummyModel::new()),
    };
    tracing::debug!("Created summarization model {}", model.name());
    Ok(model)
}
