use super::detector::{UrlMatch, clean_url, find_urls};
use super::types::{FetchResult, FooterEntry, ResultMap};
use crate::config::RewriteStrategy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::ops::Range;
use std::sync::LazyLock;

/// `[description](url)`, where the url may hold one level of balanced parens.
static MARKDOWN_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]*)\]\(((?:[^()\s]|\([^()\s]*\))+)\)").unwrap()
});

/// `description(url)` where the description is any run without parentheses.
static LOOSE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^()]+)\(([^)]+)\)").unwrap());

/// Turn fetched URLs into markdown links, mark failed ones in red and
/// append one quoted summary block per fetched article.
///
/// Pure: the output depends only on `text`, `results` (including its order)
/// and `strategy`.
pub fn rewrite(text: &str, results: &ResultMap, strategy: RewriteStrategy) -> String {
    if results.is_empty() {
        return text.to_string();
    }

    let entries = footer_entries(text, results, strategy);
    let mut out = match strategy {
        RewriteStrategy::Tokenized => rewrite_spans(text, results),
        RewriteStrategy::Literal => rewrite_literal(text, results, &entries),
    };
    out.push_str(&render_footer(&entries));
    out
}

/// One entry per successful result, in result order. A URL the user had
/// already written as a markdown link keeps the first link text as its
/// description.
pub fn footer_entries(
    text: &str,
    results: &ResultMap,
    strategy: RewriteStrategy,
) -> Vec<FooterEntry> {
    let descriptions = user_descriptions(text, results, strategy);
    results
        .successes()
        .map(|article| FooterEntry {
            url: article.url.clone(),
            user_description: descriptions.get(article.url.as_str()).cloned(),
            title: article.title.clone(),
            summary_text: article.content().to_string(),
        })
        .collect()
}

fn user_descriptions(
    text: &str,
    results: &ResultMap,
    strategy: RewriteStrategy,
) -> HashMap<String, String> {
    let pairs: Vec<(String, &str)> = match strategy {
        RewriteStrategy::Tokenized => link_spans(text, &find_urls(text))
            .into_iter()
            .map(|link| (link.key, link.description))
            .collect(),
        RewriteStrategy::Literal => LOOSE_LINK_RE
            .captures_iter(text)
            .filter_map(|caps| Some((caps.get(2)?.as_str().to_string(), caps.get(1)?.as_str())))
            .collect(),
    };

    let mut descriptions = HashMap::new();
    for (url, description) in pairs {
        if matches!(results.get(&url), Some(FetchResult::Success(_))) {
            descriptions
                .entry(url)
                .or_insert_with(|| description.to_string());
        }
    }
    descriptions
}

/// A markdown link whose target is exactly one detected URL.
struct LinkSpan<'a> {
    whole: Range<usize>,
    description: &'a str,
    target: &'a str,
    key: String,
}

/// Markdown links that line up with the detector's matches: the only match
/// inside the link starts at the target and cleans to the same URL. Links a
/// greedy match runs through are left to the bare-URL pass.
fn link_spans<'a>(text: &'a str, urls: &[UrlMatch]) -> Vec<LinkSpan<'a>> {
    MARKDOWN_LINK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let (whole, description, target) = (caps.get(0)?, caps.get(1)?, caps.get(2)?);
            let mut inside = urls.iter().filter(|m| whole.range().contains(&m.span.start));
            let found = inside.next()?;
            if inside.next().is_some()
                || found.span.start != target.start()
                || found.url != clean_url(target.as_str())
            {
                return None;
            }
            Some(LinkSpan {
                whole: whole.range(),
                description: description.as_str(),
                target: target.as_str(),
                key: found.url.clone(),
            })
        })
        .collect()
}

/// Rewrite every detected URL exactly once, either as the markdown link it
/// sits in or as a bare URL. Walks the same matches the allocator keyed on.
fn rewrite_spans(text: &str, results: &ResultMap) -> String {
    let urls = find_urls(text);
    let links = link_spans(text, &urls);
    let mut links = links.iter().peekable();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for found in &urls {
        if let Some(link) = links.next_if(|l| l.whole.contains(&found.span.start)) {
            out.push_str(&text[cursor..link.whole.start]);
            match results.get(&link.key) {
                Some(FetchResult::Success(article)) => {
                    out.push_str(&markdown_link(&article.title, link.target));
                }
                Some(FetchResult::Failure { .. }) => {
                    let _ = write!(
                        out,
                        "[{}]({})",
                        link.description,
                        error_marker(link.target)
                    );
                }
                None => out.push_str(&text[link.whole.clone()]),
            }
            cursor = link.whole.end;
            continue;
        }

        let replacement = match results.get(&found.url) {
            Some(FetchResult::Success(article)) => markdown_link(&article.title, &found.url),
            Some(FetchResult::Failure { url }) => error_marker(url),
            None => continue,
        };
        out.push_str(&text[cursor..found.span.start]);
        out.push_str(&replacement);
        cursor = found.span.end;
    }

    out.push_str(&text[cursor..]);
    out
}

/// Replace-all over the whole text, one URL at a time. Links the user
/// already wrote get wrapped again, and a URL that prefixes another one
/// rewrites inside it.
fn rewrite_literal(text: &str, results: &ResultMap, entries: &[FooterEntry]) -> String {
    let mut out = text.to_string();
    for entry in entries {
        out = out.replace(&entry.url, &markdown_link(&entry.title, &entry.url));
    }
    for url in results.failures() {
        out = out.replace(url, &error_marker(url));
    }
    out
}

fn markdown_link(title: &str, url: &str) -> String {
    format!("[{title}]({url})")
}

fn error_marker(url: &str) -> String {
    format!("<span style='color: red'>{url}</span>")
}

fn render_footer(entries: &[FooterEntry]) -> String {
    let mut footer = String::new();
    for entry in entries {
        let quoted = entry
            .summary_text
            .split('\n')
            .map(|line| format!("> {line}"))
            .collect::<Vec<_>>()
            .join("\n");
        let _ = write!(footer, "\n\n> # {}\n{quoted}", entry.heading());
    }
    footer
}
