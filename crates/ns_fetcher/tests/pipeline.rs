use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use ns_core::{ArticleInput, Error};
use ns_fetcher::{ArticleFetcher, FetchConfig, SummaryJob, SummaryPipeline};
use ns_inference::models::DummyModel;
use ns_inference::SummarizationClient;

fn pipeline() -> SummaryPipeline {
    SummaryPipeline::new(
        ArticleFetcher::new(FetchConfig::default()).unwrap(),
        SummarizationClient::new(Arc::new(DummyModel::new())),
    )
}

fn job(input: ArticleInput, min_length: u32, max_length: u32) -> SummaryJob {
    SummaryJob {
        input,
        model_id: "facebook/bart-large-cnn".to_string(),
        min_length,
        max_length,
        highlight: true,
    }
}

#[tokio::test]
async fn test_pasted_text_is_summarized_and_highlighted() {
    let text = "Cats are great. Dogs are great too. Cats sleep a lot.";
    let report = pipeline()
        .run(job(ArticleInput::Text(text.to_string()), 30, 50))
        .await
        .unwrap();

    assert_eq!(report.source, "pasted text");
    assert_eq!(report.summary, text);
    assert_eq!(report.highlight.as_deref(), Some("Cats are great"));
    assert_eq!(
        report.highlighted_html.as_deref(),
        Some("<span class=\"highlight\">Cats are great</span>. Dogs are great too. Cats sleep a lot.")
    );
    assert_eq!(report.article_chars, text.len());
}

#[tokio::test]
async fn test_highlight_is_optional() {
    let mut job = job(ArticleInput::Text("One. Two.".to_string()), 30, 50);
    job.highlight = false;
    let report = pipeline().run(job).await.unwrap();
    assert!(report.highlight.is_none());
    assert!(report.highlighted_html.is_none());
}

#[tokio::test]
async fn test_url_input_goes_through_fetcher() {
    let app = Router::new().route(
        "/story",
        get(|| async { Html("<html><body><p>Rain fell.</p><p>Roads flooded.</p></body></html>") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let url = format!("http://{}/story", addr);
    let report = pipeline()
        .run(job(ArticleInput::Url(url.clone()), 30, 50))
        .await
        .unwrap();
    assert_eq!(report.source, url);
    assert_eq!(report.summary, "Rain fell. Roads flooded.");
}

#[tokio::test]
async fn test_invalid_bounds_fail_before_fetching() {
    // The URL is unreachable, so reaching the fetcher would produce a fetch error instead.
    let err = pipeline()
        .run(job(ArticleInput::Url("http://127.0.0.1:9/never".to_string()), 300, 100))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn test_invalid_url_is_reported() {
    let err = pipeline()
        .run(job(ArticleInput::Url("not a url".to_string()), 30, 50))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}
