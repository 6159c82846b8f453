use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Not really RFC 3986: a short scheme, `://`, then anything but whitespace.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w{2,6}://\S+").unwrap());

/// A cleaned URL and where it sits in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch {
    pub url: String,
    /// Byte range of the cleaned URL; trailing junk is outside it.
    pub span: Range<usize>,
}

/// Detect scheme URLs in text. Returns every occurrence in order of
/// appearance, duplicates included.
pub fn extract_urls(text: &str) -> Vec<String> {
    find_urls(text).into_iter().map(|m| m.url).collect()
}

/// Like [`extract_urls`], keeping byte offsets for in-place rewriting.
pub fn find_urls(text: &str) -> Vec<UrlMatch> {
    URL_RE
        .find_iter(text)
        .map(|m| {
            let cleaned = clean_url(m.as_str());
            UrlMatch {
                url: cleaned.to_string(),
                span: m.start()..m.start() + cleaned.len(),
            }
        })
        .collect()
}

/// Drop the trailing run of characters outside `[a-zA-Z0-9/]`.
pub fn clean_url(s: &str) -> &str {
    s.trim_end_matches(|c: char| !(c.is_ascii_alphanumeric() || c == '/'))
}
