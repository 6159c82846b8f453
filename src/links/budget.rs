use super::detector::extract_urls;
use super::fetcher::{FetchLimits, char_len, fetch};
use super::source::ArticleSource;
use super::types::{FetchResult, ResultMap};
use crate::config::{BudgetPolicy, PipelineOptions};
use crate::error::LinkError;

/// Starting budget: the total minus the share held back for the footer.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn initial_budget(total_max_length: i64, remaining_buffer: f64) -> i64 {
    let total = total_max_length as f64;
    (total - total * remaining_buffer) as i64
}

/// Fetch every unique URL in `message`, in order of first appearance.
///
/// Per-URL failures are recorded and skipped over. Running out of budget
/// before the last URL aborts the whole batch with
/// [`LinkError::BudgetExceeded`].
pub async fn collect_articles(
    message: &str,
    total_max_length: i64,
    options: &PipelineOptions,
    source: &dyn ArticleSource,
) -> Result<ResultMap, LinkError> {
    let mut budget = initial_budget(total_max_length, options.remaining_buffer);
    let mut articles = ResultMap::new();

    for url in extract_urls(message) {
        if articles.contains_key(&url) {
            continue;
        }
        if budget <= 0 {
            return Err(LinkError::BudgetExceeded {
                limit: total_max_length,
            });
        }

        let limits = FetchLimits {
            min_length: options.min_length,
            max_length: budget,
        };
        let result = fetch(source, &url, limits).await;

        if let FetchResult::Success(article) = &result {
            let consumed = char_len(article.content());
            budget = match options.budget_policy {
                BudgetPolicy::MostRecent => total_max_length - consumed,
                BudgetPolicy::RunningTotal => budget - consumed,
            };
            tracing::debug!(url = %url, consumed, budget, "budget updated");
        }
        articles.insert(result);
    }

    Ok(articles)
}
