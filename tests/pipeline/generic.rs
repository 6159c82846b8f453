use linkdigest::config::{Settings, UseFor};

use super::source_harness::{ScriptedSource, pipeline, settings};

#[tokio::test]
async fn generic_call_runs_for_notebook_and_both() {
    for use_for in [UseFor::NotebookAndDefault, UseFor::Both] {
        let p = pipeline(ScriptedSource::new().page("https://a.test", "A", "x"));
        let settings = Settings {
            use_for,
            ..settings()
        };

        let out = p.try_generic_input("read https://a.test", &settings).await.unwrap();

        assert_eq!(out, "read [A](https://a.test)\n\n> # A\n> x", "{use_for}");
    }
}

#[tokio::test]
async fn generic_call_passes_through_for_chats_and_disabled() {
    for use_for in [UseFor::Chats, UseFor::Disabled] {
        let source = ScriptedSource::new().page("https://a.test", "A", "x");
        let log = source.download_log();
        let p = pipeline(source);
        let settings = Settings {
            use_for,
            ..settings()
        };

        let out = p.generic_input("read https://a.test", &settings).await;

        assert_eq!(out, "read https://a.test", "{use_for}");
        assert!(log.lock().unwrap().is_empty(), "{use_for}");
    }
}

#[tokio::test]
async fn disabled_mode_passes_chat_through() {
    let p = pipeline(ScriptedSource::new().page("https://a.test", "A", "x"));
    let settings = Settings {
        use_for: UseFor::Disabled,
        ..settings()
    };

    let out = p.chat_input("https://a.test", "https://a.test", &settings).await;

    assert_eq!(out.text, "https://a.test");
}
