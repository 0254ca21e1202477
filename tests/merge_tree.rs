#![allow(clippy::unwrap_used)]
//! Hierarchical merge contract tests.

mod common;

use lingo_cache::error::{MergeError, RemoteError, TranslateError};
use lingo_cache::merge::MergeEngine;
use lingo_cache::tree::TranslationTree;

use common::{FakeGateway, translator};

#[tokio::test]
async fn test_existing_values_are_never_retranslated() {
    let t = translator(FakeGateway::new());
    let engine = MergeEngine::new(&t);

    let source = TranslationTree::new().with("key", "New value");
    let existing = TranslationTree::new().with("key", "Old translated value");

    let outcome = engine
        .merge_translate(&source, &existing, None, None)
        .await
        .unwrap();

    assert_eq!(outcome.tree, existing);
    assert_eq!(outcome.translated, 0);
    assert_eq!(t.gateway().call_count(), 0);
}

#[tokio::test]
async fn test_keys_only_in_existing_are_dropped() {
    let t = translator(FakeGateway::new());
    let engine = MergeEngine::new(&t);

    let source = TranslationTree::new().with("a", "x");
    let existing = TranslationTree::new().with("a", "y").with("b", "z");

    let outcome = engine
        .merge_translate(&source, &existing, None, None)
        .await
        .unwrap();

    assert_eq!(outcome.tree, TranslationTree::new().with("a", "y"));
}

#[tokio::test]
async fn test_nested_groups_merge_recursively() {
    let t = translator(FakeGateway::with_dictionary(&[
        ("Log in", "Anmelden"),
        ("Too many attempts.", "Zu viele Versuche."),
    ]));
    let engine = MergeEngine::new(&t);

    let source = TranslationTree::new()
        .with("title", "Log in")
        .with(
            "auth",
            TranslationTree::new()
                .with("failed", "Wrong credentials.")
                .with("throttle", "Too many attempts."),
        );
    let existing = TranslationTree::new().with(
        "auth",
        TranslationTree::new().with("failed", "Falsche Zugangsdaten."),
    );

    let outcome = engine
        .merge_translate(&source, &existing, None, None)
        .await
        .unwrap();

    assert_eq!(outcome.translated, 2);
    assert_eq!(outcome.tree.get_path("title"), Some("Anmelden"));
    assert_eq!(outcome.tree.get_path("auth.failed"), Some("Falsche Zugangsdaten."));
    assert_eq!(outcome.tree.get_path("auth.throttle"), Some("Zu viele Versuche."));

    // source key order is kept
    let keys: Vec<&str> = outcome.tree.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["title", "auth"]);
}

#[tokio::test]
async fn test_missing_leaves_share_one_call() {
    let t = translator(FakeGateway::new());
    let engine = MergeEngine::new(&t);

    let source = TranslationTree::new()
        .with("a", "one")
        .with("g", TranslationTree::new().with("b", "two").with("c", "three"));

    engine
        .merge_translate(&source, &TranslationTree::new(), None, None)
        .await
        .unwrap();

    let calls = t.gateway().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].texts, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_batch_size_splits_calls() {
    let t = translator(FakeGateway::new());
    let engine = MergeEngine::new(&t).with_batch_size(2);

    let source: TranslationTree = [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")]
        .into_iter()
        .collect();

    let outcome = engine
        .merge_translate(&source, &TranslationTree::new(), None, None)
        .await
        .unwrap();

    let sizes: Vec<usize> = t.gateway().calls().iter().map(|c| c.texts.len()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
    assert_eq!(outcome.tree.get_path("e"), Some("de:5"));
}

#[tokio::test]
async fn test_placeholders_are_kept_in_merged_leaves() {
    let t = translator(FakeGateway::with_dictionary(&[
        ("The", "Das Feld"),
        ("field is required.", "ist erforderlich."),
    ]));
    let engine = MergeEngine::new(&t);

    let source = TranslationTree::new().with("required", "The :attribute field is required.");

    let outcome = engine
        .merge_translate(&source, &TranslationTree::new(), None, None)
        .await
        .unwrap();

    assert_eq!(
        outcome.tree.get_path("required"),
        Some("Das Feld :attribute ist erforderlich.")
    );
}

#[tokio::test]
async fn test_failed_leaf_fails_whole_merge() {
    let t = translator(FakeGateway::new());
    t.gateway().fail_with(RemoteError::Auth("403".into()));
    let engine = MergeEngine::new(&t);

    let source = TranslationTree::new().with("a", "x").with("b", "y");

    let err = engine
        .merge_translate(&source, &TranslationTree::new(), None, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MergeError::Translation {
            leaves: 2,
            source: TranslateError::Remote(RemoteError::Auth(_))
        }
    ));
}

#[tokio::test]
async fn test_stale_group_where_string_expected_fails_fast() {
    let t = translator(FakeGateway::new());
    let engine = MergeEngine::new(&t);

    let source = TranslationTree::new().with("welcome", "Hi").with("other", "new");
    let existing = TranslationTree::new().with("welcome", TranslationTree::new().with("x", "y"));

    let err = engine
        .merge_translate(&source, &existing, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, MergeError::ShapeMismatch { ref key, .. } if key == "welcome"));
    assert_eq!(t.gateway().call_count(), 0);
}

#[tokio::test]
async fn test_merge_respects_cache_flag() {
    let t = translator(FakeGateway::new());
    let source = TranslationTree::new().with("a", "x");

    MergeEngine::new(&t)
        .with_cache(false)
        .merge_translate(&source, &TranslationTree::new(), None, None)
        .await
        .unwrap();
    assert_eq!(t.store().lookup_count(), 0);

    MergeEngine::new(&t)
        .merge_translate(&source, &TranslationTree::new(), None, None)
        .await
        .unwrap();
    assert_eq!(t.store().lookup_count(), 1);
}
