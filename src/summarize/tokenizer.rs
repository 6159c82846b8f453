use crate::error::SetupError;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co", "corp",
    "dept", "univ", "gen", "gov", "sen", "rep", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
    "sep", "sept", "oct", "nov", "dec", "no", "vol", "fig", "approx", "e.g", "i.e", "u.s", "u.k",
];

const BUILTIN_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "said", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Abbreviations and stopwords the summarizer depends on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenizerData {
    #[serde(default)]
    pub abbreviations: Vec<String>,
    #[serde(default)]
    pub stopwords: Vec<String>,
}

impl TokenizerData {
    pub fn builtin() -> Self {
        Self {
            abbreviations: BUILTIN_ABBREVIATIONS.iter().map(|s| (*s).to_string()).collect(),
            stopwords: BUILTIN_STOPWORDS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Read a JSON file of the form `{"abbreviations": [...], "stopwords": [...]}`.
    pub fn from_file(path: &Path) -> Result<Self, SetupError> {
        let contents = fs::read_to_string(path).map_err(|source| SetupError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SetupError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Splits text into sentences and words.
#[derive(Debug, Clone)]
pub struct SentenceTokenizer {
    abbreviations: HashSet<String>,
    stopwords: HashSet<String>,
}

impl SentenceTokenizer {
    pub fn new(data: TokenizerData) -> Result<Self, SetupError> {
        if data.stopwords.is_empty() {
            return Err(SetupError::EmptyData("stopwords"));
        }
        let normalize = |words: Vec<String>| -> HashSet<String> {
            words
                .into_iter()
                .map(|w| w.trim().trim_end_matches('.').to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };
        Ok(Self {
            abbreviations: normalize(data.abbreviations),
            stopwords: normalize(data.stopwords),
        })
    }

    /// Sentences in order. Line breaks always end a sentence; `.`, `!` and
    /// `?` end one when followed by whitespace, unless the `.` closes an
    /// abbreviation or a single-letter initial.
    pub fn sentences(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        for line in text.lines() {
            self.split_line(line, &mut out);
        }
        out
    }

    fn split_line(&self, line: &str, out: &mut Vec<String>) {
        let mut start = 0;
        let mut chars = line.char_indices().peekable();

        while let Some((index, ch)) = chars.next() {
            if matches!(ch, '.' | '!' | '?')
                && let Some((next_index, next_char)) = chars.peek().copied()
                && next_char.is_whitespace()
                && !(ch == '.' && self.ends_with_abbreviation(&line[start..index]))
            {
                push_trimmed(&line[start..next_index], out);
                start = next_index;
            }
        }

        if start < line.len() {
            push_trimmed(&line[start..], out);
        }
    }

    fn ends_with_abbreviation(&self, before_dot: &str) -> bool {
        let last = before_dot
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default()
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        let is_initial = last.chars().count() == 1 && last.chars().all(char::is_alphabetic);
        is_initial || self.abbreviations.contains(&last)
    }

    /// Lowercased alphanumeric words.
    pub fn words<'a>(&self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split(|c: char| !c.is_alphanumeric() && c != '\'')
            .map(|w| w.trim_matches('\'').to_lowercase())
            .filter(|w| !w.is_empty())
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}

fn push_trimmed(sentence: &str, out: &mut Vec<String>) {
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}
