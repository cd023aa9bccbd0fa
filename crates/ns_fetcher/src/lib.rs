pub mod extract;
pub mod fetcher;
pub mod logging;
pub mod pipeline;

pub use fetcher::{ArticleFetcher, FetchConfig};
pub use logging::{init_logging, Logger};
pub use pipeline::{SummaryJob, SummaryPipeline, SummaryReport};

pub mod prelude {
    pub use super::fetcher::ArticleFetcher;
    pub use super::pipeline::{SummaryJob, SummaryPipeline, SummaryReport};
    pub use ns_core::{ArticleInput, Error, Result};
}
