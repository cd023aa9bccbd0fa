use ns_core::{Error, Result};
use scraper::{Html, Selector};
use url::Url;

/// Absolute `http`/`https` URL with a host.
pub fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|_| Error::InvalidInput("invalid URL".to_string()))?;
    let has_host = parsed.host_str().map_or(false, |h| !h.is_empty());
    if !matches!(parsed.scheme(), "http" | "https") || !has_host {
        return Err(Error::InvalidInput("invalid URL".to_string()));
    }
    Ok(parsed)
}

fn element_texts(document: &Html, selector: &str) -> Vec<String> {
    match Selector::parse(selector) {
        Ok(selector) => document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect(),
        Err(_) => Vec::new(),
    }
}

fn find_article_body(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Array(items) => items.iter().find_map(find_article_body),
        serde_json::Value::Object(obj) => {
            if let Some(body) = obj.get("articleBody").and_then(|b| b.as_str()) {
                if !body.trim().is_empty() {
                    return Some(body.trim().to_string());
                }
            }
            obj.get("@graph").and_then(find_article_body)
        }
        _ => None,
    }
}

/// `articleBody` from the page's JSON-LD metadata.
pub fn extract_json_ld_body(document: &Html) -> Option<String> {
    let selector = Selector::parse("script[type='application/ld+json']").ok()?;
    document.select(&selector).find_map(|script| {
        serde_json::from_str::<serde_json::Value>(script.text().collect::<String>().trim())
            .ok()
            .and_then(|json| find_article_body(&json))
    })
}

/// Readability output shorter than this is not treated as an article.
pub const MIN_ARTICLE_CHARS: usize = 200;

/// Main content of the page as picked by readability, one paragraph per block.
pub fn extract_readable(html: &str, url: &Url) -> Option<String> {
    let mut reader = html.as_bytes();
    let product = match readability::extractor::extract(&mut reader, url) {
        Ok(product) => product,
        Err(e) => {
            tracing::debug!("readability failed for {}: {:?}", url, e);
            return None;
        }
    };

    let document = Html::parse_fragment(&product.content);
    let paragraphs: Vec<String> = element_texts(&document, "p")
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    let text = if paragraphs.is_empty() {
        product.text.trim().to_string()
    } else {
        paragraphs.join("\n\n")
    };

    if text.chars().count() < MIN_ARTICLE_CHARS {
        None
    } else {
        Some(text)
    }
}

/// Structured article text: the publisher's JSON-LD body first, then readability.
/// `None` when the page does not look like an article.
pub fn extract_structured(html: &str, url: &Url) -> Option<String> {
    let document = Html::parse_document(html);
    if let Some(body) = extract_json_ld_body(&document) {
        return Some(body);
    }
    extract_readable(html, url)
}

/// Text of every `<p>` element, one per line.
pub fn extract_paragraphs(html: &str) -> String {
    let document = Html::parse_document(html);
    element_texts(&document, "p").join("\n")
}
