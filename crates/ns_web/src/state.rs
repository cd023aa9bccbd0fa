use ns_fetcher::SummaryPipeline;

pub struct AppState {
    pub pipeline: SummaryPipeline,
}
