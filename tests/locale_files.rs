#![allow(clippy::unwrap_used)]
//! Locale file, folder and missing-key translation tests.

mod common;

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use lingo_cache::error::{FileError, RemoteError};
use lingo_cache::files;
use lingo_cache::merge::MergeEngine;
use lingo_cache::on_the_fly::{self, KeyResolver, MissingKey};
use lingo_cache::tree::TreeFormat;

use common::{FakeGateway, translator};

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_translate_json_file_creates_target() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("en.json");
    write(&source, r#"{"greeting": "Hello", "nav": {"home": "Home"}}"#);

    let t = translator(FakeGateway::with_dictionary(&[("Hello", "Ahoj"), ("Home", "Domů")]));
    let engine = MergeEngine::new(&t);

    let outcome = files::translate_file(&engine, &source, "en", "cs")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(outcome.target_path, temp_dir.path().join("cs.json"));
    assert_eq!(outcome.translated, 2);
    assert_eq!(
        fs::read_to_string(&outcome.target_path).unwrap(),
        "{\n    \"greeting\": \"Ahoj\",\n    \"nav\": {\n        \"home\": \"Domů\"\n    }\n}\n"
    );
}

#[tokio::test]
async fn test_translate_file_keeps_existing_target_values() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("en").join("auth.toml");
    let target = temp_dir.path().join("cs").join("auth.toml");
    write(&source, "failed = \"Wrong credentials\"\nthrottle = \"Slow down\"\n");
    write(&target, "failed = \"Špatné údaje\"\nobsolete = \"Staré\"\n");

    let t = translator(FakeGateway::new());
    let engine = MergeEngine::new(&t);

    let outcome = files::translate_file(&engine, &source, "en", "cs")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(outcome.target_path, target);
    assert_eq!(outcome.translated, 1);

    let written = TreeFormat::load(&target).unwrap();
    assert_eq!(written.get_path("failed"), Some("Špatné údaje"));
    assert_eq!(written.get_path("throttle"), Some("cs:Slow down"));
    assert_eq!(written.get("obsolete"), None);
}

#[tokio::test]
async fn test_failed_merge_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("en.json");
    write(&source, r#"{"greeting": "Hello"}"#);

    let t = translator(FakeGateway::new());
    t.gateway().fail_with(RemoteError::Transient("503".into()));
    let engine = MergeEngine::new(&t);

    let err = files::translate_file(&engine, &source, "en", "cs")
        .await
        .unwrap_err();

    assert!(matches!(err, FileError::Merge { .. }));
    assert!(!temp_dir.path().join("cs.json").exists());
}

#[tokio::test]
async fn test_translate_file_errors() {
    let temp_dir = TempDir::new().unwrap();
    let t = translator(FakeGateway::new());
    let engine = MergeEngine::new(&t);

    let missing = files::translate_file(&engine, &temp_dir.path().join("en.json"), "en", "cs").await;
    assert!(matches!(missing, Err(FileError::SourceMissing(_))));

    let php = temp_dir.path().join("en.php");
    write(&php, "<?php return [];");
    let unsupported = files::translate_file(&engine, &php, "en", "cs").await;
    assert!(matches!(unsupported, Err(FileError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_translate_file_without_target_path_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("messages.json");
    write(&source, r#"{"a": "b"}"#);

    let t = translator(FakeGateway::new());
    let engine = MergeEngine::new(&t);

    let outcome = files::translate_file(&engine, &source, "en", "cs").await.unwrap();
    assert!(outcome.is_none());
    assert_eq!(t.gateway().call_count(), 0);
}

#[tokio::test]
async fn test_translate_folder_walks_sorted_files() {
    let temp_dir = TempDir::new().unwrap();
    let lang = temp_dir.path().join("lang");
    write(&lang.join("en").join("validation.json"), r#"{"required": "Required"}"#);
    write(&lang.join("en").join("auth.toml"), "failed = \"Failed\"\n");
    write(&lang.join("en.json"), r#"{"Welcome": "Welcome"}"#);
    write(&lang.join("README.md"), "not a locale file");

    let t = translator(FakeGateway::new());
    let engine = MergeEngine::new(&t);

    let outcomes = files::translate_folder(&engine, &lang, "en", "cs").await.unwrap();

    let targets: Vec<_> = outcomes.iter().map(|o| o.target_path.clone()).collect();
    assert_eq!(
        targets,
        vec![
            lang.join("cs").join("auth.toml"),
            lang.join("cs").join("validation.json"),
            lang.join("cs.json"),
        ]
    );
    assert!(targets.iter().all(|p| p.is_file()));

    // a second run finds every key already translated
    let again = files::translate_folder(&engine, &lang, "en", "cs").await.unwrap();
    assert!(again.iter().all(|o| o.translated == 0));
    assert_eq!(t.gateway().call_count(), 3);
}

#[tokio::test]
async fn test_translate_folder_requires_directory() {
    let temp_dir = TempDir::new().unwrap();
    let t = translator(FakeGateway::new());
    let engine = MergeEngine::new(&t);

    let result = files::translate_folder(&engine, &temp_dir.path().join("nope"), "en", "cs").await;
    assert!(matches!(result, Err(FileError::FolderMissing(_))));
}

#[tokio::test]
async fn test_missing_key_in_group_file() {
    let temp_dir = TempDir::new().unwrap();
    let lang = temp_dir.path().join("lang");
    write(
        &lang.join("en").join("auth.json"),
        r#"{"welcome": "Welcome back, :name", "failed": "Failed"}"#,
    );

    let t = translator(FakeGateway::with_dictionary(&[("Welcome back,", "Vítejte zpět,")]));
    let resolver = KeyResolver::new(MergeEngine::new(&t), &lang, "en");

    let job = MissingKey::new("auth.welcome", "cs").with_replacement("name", "taylor");
    let value = resolver.resolve(&job).await.unwrap();

    assert_eq!(value.as_deref(), Some("Vítejte zpět, taylor"));
    assert!(lang.join("cs").join("auth.json").is_file());
}

#[tokio::test]
async fn test_missing_key_in_flat_file() {
    let temp_dir = TempDir::new().unwrap();
    let lang = temp_dir.path().join("lang");
    write(&lang.join("en.json"), r#"{"Log out": "Log out"}"#);

    let t = translator(FakeGateway::new());
    let resolver = KeyResolver::new(MergeEngine::new(&t), &lang, "en");

    let value = resolver.resolve(&MissingKey::new("Log out", "de")).await.unwrap();
    assert_eq!(value.as_deref(), Some("de:Log out"));
    assert!(lang.join("de.json").is_file());
}

#[tokio::test]
async fn test_missing_key_without_source_file() {
    let temp_dir = TempDir::new().unwrap();
    let t = translator(FakeGateway::new());
    let resolver = KeyResolver::new(MergeEngine::new(&t), temp_dir.path(), "en");

    let value = resolver
        .resolve(&MissingKey::new("auth.unknown", "cs"))
        .await
        .unwrap();

    assert!(value.is_none());
    assert_eq!(t.gateway().call_count(), 0);
}

#[test]
fn test_candidates_for_keys() {
    let t = translator(FakeGateway::new());
    let resolver = KeyResolver::new(MergeEngine::new(&t), "lang", "en");

    let grouped = resolver.candidates("auth.throttle.short");
    assert_eq!(
        grouped,
        vec![
            (Path::new("lang/en/auth.json").to_path_buf(), "throttle.short".to_string()),
            (Path::new("lang/en/auth.toml").to_path_buf(), "throttle.short".to_string()),
        ]
    );

    let flat = resolver.candidates("Log out");
    assert_eq!(
        flat,
        vec![(Path::new("lang/en.json").to_path_buf(), "Log out".to_string())]
    );
}

#[tokio::test]
async fn test_queue_worker_processes_jobs_and_survives_failures() {
    let temp_dir = TempDir::new().unwrap();
    let lang = temp_dir.path().join("lang");
    write(&lang.join("en").join("auth.json"), r#"{"failed": "Failed"}"#);
    write(&lang.join("en").join("broken.json"), "{ nope");

    let t = translator(FakeGateway::new());
    let resolver = KeyResolver::new(MergeEngine::new(&t), &lang, "en");
    let (queue, jobs) = on_the_fly::queue(8);

    let producer = async move {
        assert!(queue.enqueue(MissingKey::new("broken.key", "cs")).await);
        assert!(queue.enqueue(MissingKey::new("auth.failed", "cs")).await);
        assert!(queue.enqueue(MissingKey::new("auth.failed", "de")).await);
        // dropping the queue lets the worker finish
    };

    let ((), resolved) = tokio::join!(producer, on_the_fly::run_worker(&resolver, jobs));

    assert_eq!(resolved, 2);
    assert!(lang.join("cs").join("auth.json").is_file());
    assert!(lang.join("de").join("auth.json").is_file());
}
