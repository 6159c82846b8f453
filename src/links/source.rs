use super::types::Article;
use crate::summarize::Summarizer;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

/// Whole-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);
/// Short connect timeout so one dead host does not stall the batch.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
pub const MAX_REDIRECTS: usize = 5;
pub const USER_AGENT: &str = concat!("linkdigest/", env!("CARGO_PKG_VERSION"));

/// Page download, parsing and summarization, seen as one black-box service.
///
/// Implementations report any failure as an error; the fetcher turns it into
/// data so the rest of the batch keeps going.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Download and parse the page at `url`.
    async fn download(&self, url: &str) -> Result<Article>;

    /// Condense an already-parsed article.
    fn summarize(&self, article: &Article) -> Result<String>;
}

/// `reqwest` + `scraper` backed source. Only the HTML or plain-text document
/// itself is requested; images and other media are never fetched.
pub struct HttpArticleSource {
    client: reqwest::Client,
    summarizer: Summarizer,
}

impl HttpArticleSource {
    pub fn new(summarizer: Summarizer) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, summarizer })
    }
}

#[async_trait]
impl ArticleSource for HttpArticleSource {
    async fn download(&self, url: &str) -> Result<Article> {
        let parsed = Url::parse(url).with_context(|| format!("invalid URL {url}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("unsupported scheme '{}'", parsed.scheme());
        }

        let response = self
            .client
            .get(parsed.as_str())
            .header(reqwest::header::ACCEPT, "text/html, text/plain;q=0.9")
            .send()
            .await?
            .error_for_status()?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_ascii_lowercase();

        let body = response.text().await?;

        if content_type.contains("html") {
            Ok(extract_from_html(&parsed, &body))
        } else if content_type.starts_with("text/") {
            Ok(Article {
                url: url.to_string(),
                title: fallback_title(&parsed),
                text: body.trim().to_string(),
            })
        } else {
            bail!("unsupported content type '{content_type}'")
        }
    }

    fn summarize(&self, article: &Article) -> Result<String> {
        self.summarizer.summarize(&article.title, &article.text)
    }
}

fn extract_from_html(url: &Url, html: &str) -> Article {
    let document = Html::parse_document(html);

    let title = select_first(&document, "title")
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| fallback_title(url));

    let text = ["article", "main", "body"]
        .iter()
        .find_map(|sel| extract_element_text(&document, sel))
        .unwrap_or_default();

    Article {
        url: url.to_string(),
        title,
        text,
    }
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    document.select(&sel).next()
}

/// Paragraph-level blocks joined by blank lines, falling back to all text
/// in the element when it has no block children.
fn extract_element_text(document: &Html, selector: &str) -> Option<String> {
    let root = select_first(document, selector)?;
    let blocks = Selector::parse("p, h1, h2, h3, h4, li, blockquote, pre").ok()?;

    let paragraphs: Vec<String> = root
        .select(&blocks)
        .map(|el| normalize_whitespace(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|p| !p.is_empty())
        .collect();

    let text = if paragraphs.is_empty() {
        normalize_whitespace(&root.text().collect::<Vec<_>>().join(" "))
    } else {
        paragraphs.join("\n\n")
    };

    if text.is_empty() { None } else { Some(text) }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fallback_title(url: &Url) -> String {
    url.host_str().map_or_else(|| url.to_string(), str::to_string)
}
