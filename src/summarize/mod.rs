//! Extractive summarization.
//!
//! Sentences are scored on keyword density, overlap with the title, length
//! and position; the best few are returned in their original order, one per
//! line.

pub mod tokenizer;

use crate::error::SetupError;
use anyhow::{Result, bail};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub use tokenizer::{SentenceTokenizer, TokenizerData};

const SUMMARY_SENTENCES: usize = 5;
const TOP_KEYWORDS: usize = 10;
const IDEAL_SENTENCE_WORDS: f64 = 20.0;

/// One-time startup acquisition of the sentence tokenizer data, from
/// `data_path` when given, else the built-in tables.
pub fn setup(data_path: Option<&Path>) -> Result<SentenceTokenizer, SetupError> {
    let data = match data_path {
        Some(path) => TokenizerData::from_file(path)?,
        None => TokenizerData::builtin(),
    };
    let tokenizer = SentenceTokenizer::new(data)?;
    tracing::debug!(source = ?data_path, "sentence tokenizer ready");
    Ok(tokenizer)
}

#[derive(Debug, Clone)]
pub struct Summarizer {
    tokenizer: SentenceTokenizer,
    max_sentences: usize,
}

impl Summarizer {
    pub fn new(tokenizer: SentenceTokenizer) -> Self {
        Self {
            tokenizer,
            max_sentences: SUMMARY_SENTENCES,
        }
    }

    pub fn with_max_sentences(mut self, max_sentences: usize) -> Self {
        self.max_sentences = max_sentences.max(1);
        self
    }

    pub fn summarize(&self, title: &str, text: &str) -> Result<String> {
        let sentences = self.tokenizer.sentences(text);
        if sentences.is_empty() {
            bail!("no sentences to summarize");
        }

        let keywords = self.keywords(text);
        let title_words: HashSet<String> = self
            .tokenizer
            .words(title)
            .filter(|w| !self.tokenizer.is_stopword(w))
            .collect();

        let total = sentences.len();
        let mut scored: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(i, s)| (i, self.score(s, i, total, &keywords, &title_words)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(self.max_sentences);
        scored.sort_by_key(|&(i, _)| i);

        Ok(scored
            .into_iter()
            .map(|(i, _)| sentences[i].as_str())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Most frequent non-stopwords, weighted relative to the top one.
    fn keywords(&self, text: &str) -> HashMap<String, f64> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in self.tokenizer.words(text) {
            if !self.tokenizer.is_stopword(&word) {
                *counts.entry(word).or_default() += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(TOP_KEYWORDS);

        let top = ranked.first().map_or(1, |(_, n)| *n);
        ranked
            .into_iter()
            .map(|(w, n)| (w, as_f64(n) / as_f64(top)))
            .collect()
    }

    fn score(
        &self,
        sentence: &str,
        index: usize,
        total: usize,
        keywords: &HashMap<String, f64>,
        title_words: &HashSet<String>,
    ) -> f64 {
        let words: Vec<String> = self.tokenizer.words(sentence).collect();
        if words.is_empty() {
            return 0.0;
        }
        let len = as_f64(words.len());

        let keyword_score = words.iter().filter_map(|w| keywords.get(w)).sum::<f64>() / len;
        let title_score = if title_words.is_empty() {
            0.0
        } else {
            let hits = words
                .iter()
                .filter(|w| title_words.contains(w.as_str()))
                .collect::<HashSet<_>>()
                .len();
            as_f64(hits) / as_f64(title_words.len())
        };
        let length_score = (1.0 - (IDEAL_SENTENCE_WORDS - len).abs() / IDEAL_SENTENCE_WORDS).max(0.0);
        let position_score = 1.0 - 0.8 * as_f64(index) / as_f64(total);

        (keyword_score * 2.0 + title_score * 1.5 + length_score * 0.5 + position_score) / 5.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn as_f64(n: usize) -> f64 {
    n as f64
}
