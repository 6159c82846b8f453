#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use async_trait::async_trait;

use linkdigest::config::{PipelineOptions, Settings};
use linkdigest::links::{Article, ArticleSource};
use linkdigest::pipeline::Pipeline;

#[derive(Clone)]
struct Page {
    title: String,
    body: String,
    summary: Option<String>,
}

/// In-memory article source. Unknown URLs fail like a dead host would.
#[derive(Default)]
pub struct ScriptedSource {
    pages: HashMap<String, Page>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, title: &str, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            Page {
                title: title.to_string(),
                body: body.to_string(),
                summary: None,
            },
        );
        self
    }

    pub fn summarized_page(mut self, url: &str, title: &str, body: &str, summary: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            Page {
                title: title.to_string(),
                body: body.to_string(),
                summary: Some(summary.to_string()),
            },
        );
        self
    }

    /// Shared log of every download call, in order.
    pub fn download_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.downloads)
    }
}

#[async_trait]
impl ArticleSource for ScriptedSource {
    async fn download(&self, url: &str) -> Result<Article> {
        self.downloads.lock().unwrap().push(url.to_string());
        let Some(page) = self.pages.get(url) else {
            bail!("connection refused: {url}");
        };
        Ok(Article {
            url: url.to_string(),
            title: page.title.clone(),
            text: page.body.clone(),
        })
    }

    fn summarize(&self, article: &Article) -> Result<String> {
        match self.pages.get(&article.url).and_then(|p| p.summary.clone()) {
            Some(summary) => Ok(summary),
            None => bail!("no summary scripted for {}", article.url),
        }
    }
}

pub fn pipeline(source: ScriptedSource) -> Pipeline {
    Pipeline::new(Box::new(source), PipelineOptions::default())
}

pub fn pipeline_with(source: ScriptedSource, options: PipelineOptions) -> Pipeline {
    Pipeline::new(Box::new(source), options)
}

pub fn settings() -> Settings {
    Settings::default()
}
