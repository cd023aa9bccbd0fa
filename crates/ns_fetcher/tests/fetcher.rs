use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use ns_core::Error;
use ns_fetcher::{ArticleFetcher, FetchConfig};

const PLAIN_PAGE: &str = "<html><body><p>A.</p><p>B.</p><p>C.</p></body></html>";
const LEAD: &str = "The city council voted on Tuesday to expand the downtown bus network, adding four new routes, longer evening hours, and a free transfer window for riders who switch lines.";
const FOLLOW_UP: &str = "Mayor Smith said the plan, which had been debated for nearly two years, would be paid for by a mix of state grants, parking revenue, and savings from the retired tram contract.";

fn story_page() -> String {
    format!(
        r#"<html><head><title>Council expands bus network</title></head><body>
            <nav><p>Home | World | Sports</p></nav>
            <div class="story-body"><p>{}</p><p>{}</p></div>
            <footer><p>Subscribe to our newsletter</p><p>Copyright 2024</p></footer>
        </body></html>"#,
        LEAD, FOLLOW_UP
    )
}

#[derive(Clone, Default)]
struct Hits {
    plain: Arc<AtomicUsize>,
    user_agents: Arc<std::sync::Mutex<Vec<String>>>,
}

async fn plain(State(hits): State<Hits>, headers: HeaderMap) -> Html<&'static str> {
    hits.plain.fetch_add(1, Ordering::SeqCst);
    let agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    hits.user_agents.lock().unwrap().push(agent);
    Html(PLAIN_PAGE)
}

async fn spawn_site(hits: Hits) -> String {
    let app = Router::new()
        .route("/plain", get(plain))
        .route("/story", get(|| async { Html(story_page()) }))
        .route("/empty", get(|| async { Html("<html><body><div>no paragraphs</div></body></html>") }))
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "gone") }))
        .with_state(hits);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn fetcher() -> ArticleFetcher {
    ArticleFetcher::new(FetchConfig::default()).unwrap()
}

#[tokio::test]
async fn test_falls_back_to_paragraph_scraper() {
    let hits = Hits::default();
    let base = spawn_site(hits.clone()).await;

    let text = fetcher().fetch(&format!("{}/plain", base)).await.unwrap();
    assert_eq!(text, "A.\nB.\nC.");

    // one request per path, no retries
    assert_eq!(hits.plain.load(Ordering::SeqCst), 2);
    assert!(hits
        .user_agents
        .lock()
        .unwrap()
        .iter()
        .all(|agent| agent == "Mozilla/5.0"));
}

#[tokio::test]
async fn test_readable_story_skips_page_chrome() {
    let base = spawn_site(Hits::default()).await;
    let text = fetcher().fetch(&format!("{}/story", base)).await.unwrap();
    assert!(text.contains(LEAD));
    assert!(text.contains(FOLLOW_UP));
    assert!(!text.contains("Home | World | Sports"));
    assert!(!text.contains("Subscribe to our newsletter"));
    assert!(!text.contains("Copyright 2024"));
}

#[tokio::test]
async fn test_non_200_reports_status() {
    let base = spawn_site(Hits::default()).await;
    let err = fetcher().fetch(&format!("{}/missing", base)).await.unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
    assert!(err.to_string().contains("status code: 404"));
}

#[tokio::test]
async fn test_page_without_text_is_a_failure() {
    let base = spawn_site(Hits::default()).await;
    let err = fetcher().fetch(&format!("{}/empty", base)).await.unwrap_err();
    assert!(matches!(err, Error::Fetch(ref msg) if msg == "no extractable text"));
}

#[tokio::test]
async fn test_connection_error_is_a_value() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetcher().fetch(&format!("http://{}/story", addr)).await.unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
    assert!(err.to_string().contains("could not fetch article"));
}
