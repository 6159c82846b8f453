//! Host-facing entry points.
//!
//! The host owns the one mutable [`Settings`] value and passes it into every
//! call; nothing here keeps settings between calls.

pub mod mode;

use crate::config::{PipelineOptions, Settings};
use crate::error::LinkError;
use crate::links::{ArticleSource, collect_articles, rewrite};
use serde::Serialize;

pub use mode::CallSite;

/// Both copies of a chat message after the transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatInput {
    /// The copy the model sees.
    pub text: String,
    /// The copy shown in the chat history.
    pub visible_text: String,
}

pub struct Pipeline {
    source: Box<dyn ArticleSource>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(source: Box<dyn ArticleSource>, options: PipelineOptions) -> Self {
        Self { source, options }
    }

    /// Collect articles for every URL in `text` and rewrite it. Text without
    /// URLs comes back unchanged.
    pub async fn run(&self, text: &str, settings: &Settings) -> Result<String, LinkError> {
        let articles = collect_articles(
            text,
            settings.max_summarization_length,
            &self.options,
            self.source.as_ref(),
        )
        .await?;
        if articles.is_empty() {
            return Ok(text.to_string());
        }
        tracing::info!(
            urls = articles.len(),
            failed = articles.failures().count(),
            "rewriting message"
        );
        Ok(rewrite(text, &articles, self.options.rewrite_strategy))
    }

    /// Chat call site. The model-facing `text` is always replaced when the
    /// pipeline runs; `visible_text` only when `enable_visible` is set.
    pub async fn try_chat_input(
        &self,
        text: &str,
        visible_text: &str,
        settings: &Settings,
    ) -> Result<ChatInput, LinkError> {
        if !settings.use_for.runs_for(CallSite::Chat) {
            return Ok(ChatInput {
                text: text.to_string(),
                visible_text: visible_text.to_string(),
            });
        }

        let altered = self.run(text, settings).await?;
        let visible_text = if settings.enable_visible {
            altered.clone()
        } else {
            visible_text.to_string()
        };
        Ok(ChatInput {
            text: altered,
            visible_text,
        })
    }

    /// [`try_chat_input`](Self::try_chat_input), returning the message
    /// untouched when the batch fails.
    pub async fn chat_input(&self, text: &str, visible_text: &str, settings: &Settings) -> ChatInput {
        match self.try_chat_input(text, visible_text, settings).await {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!(error = %e, "link digest skipped for chat message");
                ChatInput {
                    text: text.to_string(),
                    visible_text: visible_text.to_string(),
                }
            }
        }
    }

    /// Notebook/default call site.
    pub async fn try_generic_input(
        &self,
        text: &str,
        settings: &Settings,
    ) -> Result<String, LinkError> {
        if !settings.use_for.runs_for(CallSite::Generic) {
            return Ok(text.to_string());
        }
        self.run(text, settings).await
    }

    pub async fn generic_input(&self, text: &str, settings: &Settings) -> String {
        match self.try_generic_input(text, settings).await {
            Ok(altered) => altered,
            Err(e) => {
                tracing::warn!(error = %e, "link digest skipped for prompt");
                text.to_string()
            }
        }
    }
}
