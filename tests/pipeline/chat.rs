use linkdigest::config::{PipelineOptions, RewriteStrategy, Settings, UseFor};
use linkdigest::pipeline::ChatInput;

use super::source_harness::{ScriptedSource, pipeline, pipeline_with, settings};

#[tokio::test]
async fn bare_url_rewritten_in_both_copies() {
    let p = pipeline(ScriptedSource::new().page("https://example.com/a", "A", "hello"));
    let text = "Check this out: https://example.com/a";

    let out = p.chat_input(text, text, &settings()).await;

    let expected = "Check this out: [A](https://example.com/a)\n\n> # A\n> hello";
    assert_eq!(
        out,
        ChatInput {
            text: expected.into(),
            visible_text: expected.into(),
        }
    );
}

#[tokio::test]
async fn user_link_text_becomes_footer_heading() {
    let body = "word ".repeat(400);
    let p = pipeline(ScriptedSource::new().summarized_page("https://x.test/p", "P", &body, "sum"));

    let out = p
        .try_chat_input("See [cool](https://x.test/p)", "", &settings())
        .await
        .unwrap();

    assert_eq!(out.text, "See [P](https://x.test/p)\n\n> # cool\n> sum");
}

#[tokio::test]
async fn visible_copy_kept_when_disabled() {
    let p = pipeline(ScriptedSource::new().page("https://a.test", "A", "x"));
    let settings = Settings {
        enable_visible: false,
        ..settings()
    };

    let out = p
        .try_chat_input("https://a.test", "what the user typed", &settings)
        .await
        .unwrap();

    assert!(out.text.starts_with("[A](https://a.test)"));
    assert_eq!(out.visible_text, "what the user typed");
}

#[tokio::test]
async fn notebook_only_mode_passes_chat_through() {
    let source = ScriptedSource::new().page("https://a.test", "A", "x");
    let log = source.download_log();
    let p = pipeline(source);
    let settings = Settings {
        use_for: UseFor::NotebookAndDefault,
        ..settings()
    };

    let out = p.chat_input("https://a.test", "visible", &settings).await;

    assert_eq!(out.text, "https://a.test");
    assert_eq!(out.visible_text, "visible");
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn message_without_urls_is_untouched() {
    let source = ScriptedSource::new();
    let log = source.download_log();
    let p = pipeline(source);

    let out = p
        .try_chat_input("no links (really)", "no links (really)", &settings())
        .await
        .unwrap();

    assert_eq!(out.text, "no links (really)");
    assert_eq!(out.visible_text, "no links (really)");
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn repeated_url_fetched_once_and_footed_once() {
    let source = ScriptedSource::new().page("https://a.test", "A", "body");
    let log = source.download_log();
    let p = pipeline(source);

    let out = p
        .try_chat_input("https://a.test, then https://a.test!", "", &settings())
        .await
        .unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["https://a.test"]);
    assert_eq!(
        out.text,
        "[A](https://a.test), then [A](https://a.test)!\n\n> # A\n> body"
    );
}

#[tokio::test]
async fn dead_link_marked_red_without_footer() {
    let p = pipeline(
        ScriptedSource::new().page("https://ok.test", "OK", "fine"),
    );

    let out = p
        .try_chat_input("https://dead.test and https://ok.test", "", &settings())
        .await
        .unwrap();

    assert_eq!(
        out.text,
        "<span style='color: red'>https://dead.test</span> and [OK](https://ok.test)\n\n> # OK\n> fine"
    );
}

#[tokio::test]
async fn literal_strategy_reproduces_replace_all() {
    let body = "word ".repeat(400);
    let p = pipeline_with(
        ScriptedSource::new().summarized_page("https://x.test/p", "P", &body, "sum"),
        PipelineOptions {
            rewrite_strategy: RewriteStrategy::Literal,
            ..PipelineOptions::default()
        },
    );

    let out = p
        .try_chat_input("See [cool](https://x.test/p)", "", &settings())
        .await
        .unwrap();

    assert_eq!(
        out.text,
        "See [cool]([P](https://x.test/p))\n\n> # See [cool]\n> sum"
    );
}

#[tokio::test]
async fn footer_order_follows_first_appearance() {
    let p = pipeline(
        ScriptedSource::new()
            .page("https://one.test", "One", "1")
            .page("https://two.test", "Two", "2")
            .page("https://three.test", "Three", "3"),
    );

    let out = p
        .try_chat_input(
            "https://two.test [first](https://one.test) https://three.test https://two.test",
            "",
            &settings(),
        )
        .await
        .unwrap();

    let headings: Vec<&str> = out
        .text
        .lines()
        .filter_map(|line| line.strip_prefix("> # "))
        .collect();
    assert_eq!(headings, vec!["Two", "first", "Three"]);
}

#[tokio::test]
async fn pasted_link_to_dead_page_is_marked_red() {
    let p = pipeline(ScriptedSource::new());

    let out = p
        .try_chat_input("see [https://a.test](https://a.test) now", "", &settings())
        .await
        .unwrap();

    assert_eq!(
        out.text,
        "see [<span style='color: red'>https://a.test](https://a.test</span>) now"
    );
}

#[tokio::test]
async fn link_with_parens_keeps_user_text_as_heading() {
    let p = pipeline(ScriptedSource::new().page(
        "https://en.wikipedia.org/wiki/Rust_(language",
        "Rust",
        "b",
    ));

    let out = p
        .try_chat_input(
            "read [wiki](https://en.wikipedia.org/wiki/Rust_(language))",
            "",
            &settings(),
        )
        .await
        .unwrap();

    assert_eq!(
        out.text,
        "read [Rust](https://en.wikipedia.org/wiki/Rust_(language))\n\n> # wiki\n> b"
    );
}
