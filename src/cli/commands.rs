use clap::{Parser, Subcommand};
use linkdigest::config::{BudgetPolicy, RewriteStrategy, UseFor};
use std::path::PathBuf;

/// `linkdigest` - turn URLs in a message into markdown links with quoted page summaries.
#[derive(Parser, Debug)]
#[command(name = "linkdigest")]
#[command(version)]
#[command(about = "Fetch, summarize and footnote the links in a message.", long_about = None)]
pub struct Cli {
    /// Settings file (default: ~/.linkdigest/settings.json)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// JSON file with sentence tokenizer abbreviations and stopwords
    #[arg(long, global = true)]
    pub tokenizer_data: Option<PathBuf>,

    /// How the budget shrinks after each article (most-recent, running-total)
    #[arg(long, global = true, default_value = "most-recent")]
    pub budget_policy: BudgetPolicy,

    /// How URLs in the body are rewritten (tokenized, literal)
    #[arg(long = "rewrite", global = true, default_value = "tokenized")]
    pub rewrite_strategy: RewriteStrategy,

    /// Share of the summarization budget reserved for the footer
    #[arg(long, global = true, default_value = "0.3")]
    pub remaining_buffer: f64,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform a chat message; prints the model and visible copies as JSON
    Chat {
        /// Message text (read from stdin when omitted)
        text: Option<String>,

        /// Visible copy of the message (defaults to the message text)
        #[arg(long)]
        visible: Option<String>,

        /// Fail instead of passing the message through when the batch fails
        #[arg(long)]
        strict: bool,
    },

    /// Transform a notebook/default-mode prompt
    Generic {
        /// Prompt text (read from stdin when omitted)
        text: Option<String>,

        /// Fail instead of passing the prompt through when the batch fails
        #[arg(long)]
        strict: bool,
    },

    /// List the URLs detected in a message without fetching anything
    Extract {
        /// Message text (read from stdin when omitted)
        text: Option<String>,
    },

    /// Inspect and persist settings
    #[command(subcommand)]
    Settings(SettingsCommands),
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print the settings in effect
    Show,

    /// Print the settings file location
    Path,

    /// Read the settings file as-is; a missing or malformed file is an error
    Load,

    /// Change one or more settings and save them
    Set {
        #[arg(long)]
        summary_length_trigger: Option<i64>,

        #[arg(long)]
        max_summarization_length: Option<i64>,

        /// chats, notebook, both or disabled
        #[arg(long)]
        use_for: Option<UseFor>,

        #[arg(long)]
        enable_visible: Option<bool>,
    },

    /// Overwrite the settings file with the defaults
    Reset,
}
