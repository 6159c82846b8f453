use crate::cli::commands::{Cli, Commands, SettingsCommands};
use anyhow::{Context, Result};
use linkdigest::config::{PipelineOptions, Settings, SettingsStore};
use linkdigest::error::SettingsError;
use linkdigest::links::{HttpArticleSource, extract_urls};
use linkdigest::pipeline::Pipeline;
use linkdigest::summarize::{self, Summarizer};
use std::io::Read;
use tracing::info;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Chat {
            ref text,
            ref visible,
            strict,
        } => {
            let settings = settings_store(&cli)?.load_or_default()?;
            let pipeline = build_pipeline(&cli)?;
            let text = read_text(text.clone())?;
            let visible = visible.clone().unwrap_or_else(|| text.clone());

            let input = if strict {
                pipeline.try_chat_input(&text, &visible, &settings).await?
            } else {
                pipeline.chat_input(&text, &visible, &settings).await
            };
            println!("{}", serde_json::to_string_pretty(&input)?);
            Ok(())
        }
        Commands::Generic { ref text, strict } => {
            let settings = settings_store(&cli)?.load_or_default()?;
            let pipeline = build_pipeline(&cli)?;
            let text = read_text(text.clone())?;

            let altered = if strict {
                pipeline.try_generic_input(&text, &settings).await?
            } else {
                pipeline.generic_input(&text, &settings).await
            };
            println!("{altered}");
            Ok(())
        }
        Commands::Extract { ref text } => {
            for url in extract_urls(&read_text(text.clone())?) {
                println!("{url}");
            }
            Ok(())
        }
        Commands::Settings(ref command) => Ok(run_settings(&settings_store(&cli)?, command)?),
    }
}

/// Only commands that read or write settings locate the file.
fn settings_store(cli: &Cli) -> Result<SettingsStore, SettingsError> {
    match &cli.settings {
        Some(path) => Ok(SettingsStore::new(path)),
        None => SettingsStore::at_default_location(),
    }
}

/// Startup: tokenizer data first, so a missing or broken data file stops the
/// process before any network work.
fn build_pipeline(cli: &Cli) -> linkdigest::Result<Pipeline> {
    let tokenizer = summarize::setup(cli.tokenizer_data.as_deref())?;
    let source = HttpArticleSource::new(Summarizer::new(tokenizer))?;
    let options = PipelineOptions {
        remaining_buffer: cli.remaining_buffer,
        budget_policy: cli.budget_policy,
        rewrite_strategy: cli.rewrite_strategy,
        ..PipelineOptions::default()
    };
    Ok(Pipeline::new(Box::new(source), options))
}

fn run_settings(store: &SettingsStore, command: &SettingsCommands) -> linkdigest::Result<()> {
    match command {
        SettingsCommands::Show => print_settings(&store.load_or_default()?)?,
        SettingsCommands::Path => println!("{}", store.path().display()),
        SettingsCommands::Load => {
            let mut settings = Settings::default();
            store.reload_into(&mut settings)?;
            print_settings(&settings)?;
        }
        SettingsCommands::Set {
            summary_length_trigger,
            max_summarization_length,
            use_for,
            enable_visible,
        } => {
            let mut settings = store.load_or_default()?;
            if let Some(v) = *summary_length_trigger {
                settings.summary_length_trigger = v;
            }
            if let Some(v) = *max_summarization_length {
                settings.max_summarization_length = v;
            }
            if let Some(v) = *use_for {
                settings.use_for = v;
            }
            if let Some(v) = *enable_visible {
                settings.enable_visible = v;
            }
            store.save(&settings)?;
            print_settings(&settings)?;
        }
        SettingsCommands::Reset => {
            store.save(&Settings::default())?;
            info!("settings reset to defaults");
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings) -> Result<(), SettingsError> {
    let json = serde_json::to_string_pretty(settings).map_err(SettingsError::Serialize)?;
    println!("{json}");
    Ok(())
}

fn read_text(arg: Option<String>) -> Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read message from stdin")?;
    Ok(buf.trim_end_matches('\n').to_string())
}
