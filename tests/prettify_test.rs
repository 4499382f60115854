use sitegrab::error::Error;
use sitegrab::prettify::{is_pretty_copy, json_sources, prettify_dir, prettify_file, prettify_json};
use sitegrab::storage::{is_pretty_path, pretty_path, store_document};
use std::fs;
use std::path::{Path, PathBuf};

// ===========================================================================================
// storage Tests
// ===========================================================================================

#[test]
fn test_pretty_path_inserts_suffix_before_extension() {
    assert_eq!(
        pretty_path(Path::new("products/a.json"), "-pretty"),
        PathBuf::from("products/a-pretty.json")
    );
    assert_eq!(
        pretty_path(Path::new("products/noext"), "-pretty"),
        PathBuf::from("products/noext-pretty")
    );
}

#[test]
fn test_is_pretty_path() {
    assert!(is_pretty_path(Path::new("a-pretty.json"), "-pretty"));
    assert!(!is_pretty_path(Path::new("a.json"), "-pretty"));
    assert!(!is_pretty_path(Path::new("pretty-a.json"), "-pretty"));
}

#[test]
fn test_store_document_creates_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let target = temp_dir.path().join("nested").join("products");

    let path = store_document(&target, "a.json", b"{}").unwrap();
    assert_eq!(path, target.join("a.json"));
    assert_eq!(fs::read(&path).unwrap(), b"{}");
}

// ===========================================================================================
// prettify Tests
// ===========================================================================================

#[test]
fn test_prettify_json_keeps_key_order() {
    let pretty = prettify_json(br#"{"b":1,"a":2}"#).unwrap();
    assert_eq!(pretty, "{\n  \"b\": 1,\n  \"a\": 2\n}");
}

#[test]
fn test_prettify_json_keeps_non_ascii() {
    let pretty = prettify_json(r#"{"title":"Café é","tags":["日本"]}"#.as_bytes()).unwrap();
    assert_eq!(
        pretty,
        "{\n  \"title\": \"Café é\",\n  \"tags\": [\n    \"日本\"\n  ]\n}"
    );
}

#[test]
fn test_prettify_file_writes_sibling_and_keeps_original() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("a.json");
    fs::write(&source, r#"{"b":1,"a":2}"#).unwrap();

    let target = prettify_file(&source, "-pretty").unwrap();

    assert_eq!(target, temp_dir.path().join("a-pretty.json"));
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "{\n  \"b\": 1,\n  \"a\": 2\n}"
    );
    assert_eq!(fs::read_to_string(&source).unwrap(), r#"{"b":1,"a":2}"#);
}

#[test]
fn test_prettify_file_is_idempotent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("board.json");
    fs::write(
        &source,
        r#"{"product":{"id":9,"title":"Fin Ü","variants":[{"price":"49.00","sku":null}],"published":true}}"#,
    )
    .unwrap();

    let first_path = prettify_file(&source, "-pretty").unwrap();
    let first = fs::read(&first_path).unwrap();
    let second_path = prettify_file(&source, "-pretty").unwrap();
    let second = fs::read(&second_path).unwrap();

    assert_eq!(first_path, second_path);
    assert_eq!(first, second);

    // Prettifying pretty output changes nothing either.
    assert_eq!(prettify_json(&first).unwrap().as_bytes(), first.as_slice());
}

#[test]
fn test_prettify_file_invalid_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = temp_dir.path().join("broken.json");
    fs::write(&source, "{not json").unwrap();

    let result = prettify_file(&source, "-pretty");
    assert!(matches!(result, Err(Error::Json { .. })));
    assert!(!temp_dir.path().join("broken-pretty.json").exists());
}

#[test]
fn test_json_sources_skips_pretty_and_other_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("b.json"), "{}").unwrap();
    fs::write(dir.join("a.json"), "{}").unwrap();
    fs::write(dir.join("a-pretty.json"), "{\n  \"x\": 1\n}").unwrap();
    fs::write(dir.join("notes.txt"), "{}").unwrap();
    fs::create_dir(dir.join("sub.json")).unwrap();

    let (sources, failed) = json_sources(dir, "-pretty");
    assert_eq!(sources, vec![dir.join("a.json"), dir.join("b.json")]);
    assert!(failed.is_empty());
}

#[test]
fn test_json_sources_missing_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (sources, failed) = json_sources(&temp_dir.path().join("absent"), "-pretty");
    assert!(sources.is_empty());
    assert!(failed.is_empty());
}

#[test]
fn test_prettify_dir_skips_broken_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("a.json"), r#"{"x":1}"#).unwrap();
    fs::write(dir.join("b.json"), "oops").unwrap();
    fs::write(dir.join("c.json"), r#"[1,2]"#).unwrap();

    let outcome = prettify_dir(dir, "-pretty");

    assert_eq!(
        outcome.written,
        vec![dir.join("a-pretty.json"), dir.join("c-pretty.json")]
    );
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, dir.join("b.json"));
    assert_eq!(
        fs::read_to_string(dir.join("c-pretty.json")).unwrap(),
        "[\n  1,\n  2\n]"
    );

    // A second pass rewrites the same copies and never prettifies a copy.
    let again = prettify_dir(dir, "-pretty");
    assert_eq!(again.written, outcome.written);
    assert!(!dir.join("a-pretty-pretty.json").exists());
}

#[test]
fn test_is_pretty_copy_requires_suffix_and_pretty_content() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("a-pretty.json"), "{\n  \"x\": 1\n}").unwrap();
    fs::write(dir.join("fin-pretty.json"), r#"{"x":1}"#).unwrap();
    fs::write(dir.join("a.json"), "{\n  \"x\": 1\n}").unwrap();

    assert!(is_pretty_copy(&dir.join("a-pretty.json"), "-pretty"));
    assert!(!is_pretty_copy(&dir.join("fin-pretty.json"), "-pretty"));
    assert!(!is_pretty_copy(&dir.join("a.json"), "-pretty"));
    assert!(!is_pretty_copy(&dir.join("missing-pretty.json"), "-pretty"));
}

#[test]
fn test_prettify_file_refuses_to_overwrite_fetched_document() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("fin.json"), r#"{"a":1}"#).unwrap();
    fs::write(dir.join("fin-pretty.json"), r#"{"other":true}"#).unwrap();

    let result = prettify_file(&dir.join("fin.json"), "-pretty");

    assert!(matches!(result, Err(Error::Collision(ref path)) if path == &dir.join("fin-pretty.json")));
    assert_eq!(
        fs::read_to_string(dir.join("fin-pretty.json")).unwrap(),
        r#"{"other":true}"#
    );
}

#[test]
fn test_prettify_dir_product_named_like_pretty_copy() {
    let temp_dir = tempfile::tempdir().unwrap();
    let dir = temp_dir.path();
    fs::write(dir.join("fin.json"), r#"{"a":1}"#).unwrap();
    fs::write(dir.join("fin-pretty.json"), r#"{"other":true}"#).unwrap();

    let outcome = prettify_dir(dir, "-pretty");

    // Both files are products, the second one is prettified under its own name.
    assert_eq!(outcome.written, vec![dir.join("fin-pretty-pretty.json")]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, dir.join("fin.json"));
    assert!(matches!(outcome.failed[0].1, Error::Collision(_)));

    assert_eq!(
        fs::read_to_string(dir.join("fin-pretty.json")).unwrap(),
        r#"{"other":true}"#
    );
    assert_eq!(fs::read_to_string(dir.join("fin.json")).unwrap(), r#"{"a":1}"#);
    assert_eq!(
        fs::read_to_string(dir.join("fin-pretty-pretty.json")).unwrap(),
        "{\n  \"other\": true\n}"
    );
}

#[test]
fn test_prettify_dir_unlistable_directory_is_recorded() {
    let temp_dir = tempfile::tempdir().unwrap();
    let not_a_dir = temp_dir.path().join("products");
    fs::write(&not_a_dir, "plain file").unwrap();

    let outcome = prettify_dir(&not_a_dir, "-pretty");

    assert!(outcome.written.is_empty());
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, not_a_dir);
    assert!(matches!(outcome.failed[0].1, Error::Io { .. }));
}
