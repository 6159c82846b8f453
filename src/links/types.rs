use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A downloaded and parsed page, as returned by an
/// [`ArticleSource`](super::source::ArticleSource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedArticle {
    pub url: String,
    /// The body reached the length ceiling and `summary` holds the condensed text.
    pub is_summary: bool,
    pub title: String,
    pub body: String,
    pub summary: String,
}

impl FetchedArticle {
    /// The text that ends up in the footer and counts against the budget.
    pub fn content(&self) -> &str {
        if self.is_summary {
            &self.summary
        } else {
            &self.body
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchResult {
    Success(FetchedArticle),
    Failure { url: String },
}

impl FetchResult {
    pub fn url(&self) -> &str {
        match self {
            Self::Success(article) => &article.url,
            Self::Failure { url } => url,
        }
    }

    pub fn article(&self) -> Option<&FetchedArticle> {
        match self {
            Self::Success(article) => Some(article),
            Self::Failure { .. } => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// Fetch results keyed by URL, iterated in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct ResultMap {
    entries: Vec<FetchResult>,
    index: HashMap<String, usize>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result under its own URL. Returns `false` (and keeps the
    /// existing entry) when the URL is already present.
    pub fn insert(&mut self, result: FetchResult) -> bool {
        if self.index.contains_key(result.url()) {
            return false;
        }
        self.index.insert(result.url().to_string(), self.entries.len());
        self.entries.push(result);
        true
    }

    pub fn get(&self, url: &str) -> Option<&FetchResult> {
        self.index.get(url).map(|&i| &self.entries[i])
    }

    pub fn contains_key(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FetchResult> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(FetchResult::url)
    }

    pub fn successes(&self) -> impl Iterator<Item = &FetchedArticle> {
        self.entries.iter().filter_map(FetchResult::article)
    }

    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|r| r.is_failure())
            .map(FetchResult::url)
    }
}

/// One quoted block in the footer of a rewritten message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterEntry {
    pub url: String,
    /// Link text the user wrote, when the URL was already a markdown link.
    pub user_description: Option<String>,
    pub title: String,
    pub summary_text: String,
}

impl FooterEntry {
    pub fn heading(&self) -> &str {
        self.user_description.as_deref().unwrap_or(&self.title)
    }
}
