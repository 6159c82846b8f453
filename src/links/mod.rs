pub mod budget;
pub mod detector;
pub mod fetcher;
pub mod rewriter;
pub mod source;
pub mod types;

pub use budget::collect_articles;
pub use detector::{extract_urls, find_urls};
pub use fetcher::{FetchLimits, fetch};
pub use rewriter::{footer_entries, rewrite};
pub use source::{ArticleSource, HttpArticleSource};
pub use types::{Article, FetchResult, FetchedArticle, FooterEntry, ResultMap};
