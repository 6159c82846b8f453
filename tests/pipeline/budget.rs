use linkdigest::config::{BudgetPolicy, PipelineOptions, Settings};
use linkdigest::error::LinkError;

use super::source_harness::{ScriptedSource, pipeline, pipeline_with, settings};

fn three_urls(first_summary: &str) -> ScriptedSource {
    ScriptedSource::new()
        .summarized_page("https://one.test", "One", &"x".repeat(120), first_summary)
        .page("https://two.test", "Two", "two")
        .page("https://three.test", "Three", "three")
}

const MESSAGE: &str = "https://one.test https://two.test https://three.test";

#[tokio::test]
async fn exhausted_budget_fails_the_whole_batch() {
    let source = three_urls(&"s".repeat(100));
    let log = source.download_log();
    let p = pipeline(source);
    let settings = Settings {
        max_summarization_length: 100,
        ..settings()
    };

    let err = p.try_chat_input(MESSAGE, MESSAGE, &settings).await.unwrap_err();

    assert!(matches!(err, LinkError::BudgetExceeded { limit: 100 }));
    assert!(err.to_string().contains("(100)"));
    assert_eq!(*log.lock().unwrap(), vec!["https://one.test"]);
}

#[tokio::test]
async fn exhausted_budget_leaves_message_untouched() {
    let p = pipeline(three_urls(&"s".repeat(100)));
    let settings = Settings {
        max_summarization_length: 100,
        ..settings()
    };

    let out = p.chat_input(MESSAGE, "visible", &settings).await;
    assert_eq!(out.text, MESSAGE);
    assert_eq!(out.visible_text, "visible");

    let out = p.generic_input(MESSAGE, &settings).await;
    assert_eq!(out, MESSAGE);
}

#[tokio::test]
async fn budget_recovers_after_a_short_article() {
    // 100 - 40 = 60 left after the summary, enough for the rest
    let p = pipeline(three_urls(&"s".repeat(40)));
    let settings = Settings {
        max_summarization_length: 100,
        ..settings()
    };

    let out = p.try_generic_input(MESSAGE, &settings).await.unwrap();
    assert!(out.starts_with(
        "[One](https://one.test) [Two](https://two.test) [Three](https://three.test)\n\n"
    ));
}

#[tokio::test]
async fn running_total_policy_runs_out_sooner() {
    // 70 - 40 = 30 left after the first article, then 30 - 3 = 27, still positive
    let p = pipeline_with(
        three_urls(&"s".repeat(40)),
        PipelineOptions {
            budget_policy: BudgetPolicy::RunningTotal,
            ..PipelineOptions::default()
        },
    );
    let settings = Settings {
        max_summarization_length: 100,
        ..settings()
    };
    assert!(p.try_generic_input(MESSAGE, &settings).await.is_ok());

    // 70 - 70 = 0 after the first article: the second URL cannot be fetched
    let p = pipeline_with(
        three_urls(&"s".repeat(70)),
        PipelineOptions {
            budget_policy: BudgetPolicy::RunningTotal,
            ..PipelineOptions::default()
        },
    );
    let err = p.try_generic_input(MESSAGE, &settings).await.unwrap_err();
    assert!(matches!(err, LinkError::BudgetExceeded { limit: 100 }));
}

#[tokio::test]
async fn non_positive_total_fails_on_first_url() {
    let p = pipeline(three_urls("s"));
    let settings = Settings {
        max_summarization_length: 0,
        ..settings()
    };
    let err = p.try_generic_input(MESSAGE, &settings).await.unwrap_err();
    assert!(matches!(err, LinkError::BudgetExceeded { limit: 0 }));
}
