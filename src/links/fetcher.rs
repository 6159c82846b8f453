use super::source::ArticleSource;
use super::types::{FetchResult, FetchedArticle};
use anyhow::Result;

/// Length bounds for a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    /// Carried for callers that pass it; no current policy reads it.
    pub min_length: i64,
    /// Summarize once the body reaches this many characters. Negative
    /// disables summarization.
    pub max_length: i64,
}

/// Fetch one URL and summarize it if its body is too long.
///
/// Never fails: any download, parse or summarization error is logged and
/// returned as [`FetchResult::Failure`].
pub async fn fetch(source: &dyn ArticleSource, url: &str, limits: FetchLimits) -> FetchResult {
    match try_fetch(source, url, limits).await {
        Ok(article) => FetchResult::Success(article),
        Err(e) => {
            tracing::warn!(url, error = %format_args!("{e:#}"), "article fetch failed");
            FetchResult::Failure {
                url: url.to_string(),
            }
        }
    }
}

async fn try_fetch(
    source: &dyn ArticleSource,
    url: &str,
    limits: FetchLimits,
) -> Result<FetchedArticle> {
    let article = source.download(url).await?;
    tracing::debug!(url, title = %article.title, "fetched article");

    let body_len = char_len(&article.text);
    if limits.max_length < 0 || body_len < limits.max_length {
        tracing::debug!(
            url,
            body_len,
            min_length = limits.min_length,
            max_length = limits.max_length,
            "no summary needed"
        );
        return Ok(FetchedArticle {
            url: url.to_string(),
            is_summary: false,
            title: article.title,
            body: article.text,
            summary: String::new(),
        });
    }

    tracing::info!(url, body_len, max_length = limits.max_length, "summarizing article");
    let summary = source.summarize(&article)?;
    Ok(FetchedArticle {
        url: url.to_string(),
        is_summary: true,
        title: article.title,
        body: article.text,
        summary,
    })
}

/// Character count as the signed type budgets are kept in.
pub(crate) fn char_len(text: &str) -> i64 {
    i64::try_from(text.chars().count()).unwrap_or(i64::MAX)
}
