//! Conversion integration tests.
//!
//! Run with: `cargo test -p mdconvert-api --test convert_test`

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::{file_form, setup_native_app, setup_relative_app, setup_test_app, StubBehavior};
use std::path::Path;
use serde_json::Value;

/// `{stem}_{token}.md` with an eight character token.
fn assert_generated_name(name: &str, stem: &str, token: &str) {
    assert_eq!(token.len(), 8, "token {token:?}");
    assert_eq!(name, format!("{}_{}.md", stem, token));
}

#[tokio::test]
async fn test_convert_by_filename_form() {
    let app = setup_test_app(StubBehavior::Echo).await;
    app.seed_upload("notes.txt", b"hello");

    let response = app
        .client()
        .post("/convert-by-filename")
        .form(&[("file_name", "notes.txt")])
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "File converted successfully");
    assert_eq!(body["original_filename"], "notes.txt");
    assert_eq!(body["metadata"]["original_extension"], ".txt");

    let token = body["metadata"]["conversion_id"].as_str().unwrap_or_default();
    let converted = body["converted_filename"].as_str().unwrap_or_default();
    assert_generated_name(converted, "notes", token);

    let markdown = std::fs::read_to_string(app.converted_dir.join(converted)).expect("output");
    assert_eq!(markdown, "# Converted\n\nhello");
    assert_eq!(body["file_size"], markdown.chars().count());
    assert!(body["input_path"]
        .as_str()
        .unwrap_or_default()
        .ends_with("notes.txt"));
    assert!(body["output_path"]
        .as_str()
        .unwrap_or_default()
        .ends_with(converted));

    // Source upload stays in place.
    assert_eq!(app.upload_names(), vec!["notes.txt".to_string()]);
}

#[tokio::test]
async fn test_convert_by_filename_multipart_fields() {
    let app = setup_test_app(StubBehavior::Echo).await;
    app.seed_upload("notes.txt", b"hello");

    let form = MultipartForm::new()
        .add_text("file_name", "notes.txt")
        .add_text("output_filename", "summary");
    let response = app
        .client()
        .post("/convert-by-filename")
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["converted_filename"], "summary.md");
    assert_eq!(app.converted_names(), vec!["summary.md".to_string()]);
}

#[tokio::test]
async fn test_convert_by_filename_get_with_output_name() {
    let app = setup_test_app(StubBehavior::Echo).await;
    app.seed_upload("slides.pptx", b"deck");

    let response = app
        .client()
        .get("/convert-by-filename/slides.pptx")
        .add_query_param("output_filename", "deck")
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["converted_filename"], "deck.md");
    assert_eq!(body["metadata"]["original_extension"], ".pptx");
    let markdown = std::fs::read_to_string(app.converted_dir.join("deck.md")).expect("output");
    assert_eq!(markdown, "# Converted\n\ndeck");
}

#[tokio::test]
async fn test_get_and_post_variants_agree() {
    let app = setup_test_app(StubBehavior::Echo).await;
    app.seed_upload("doc.txt", b"same input");

    let post: Value = app
        .client()
        .post("/convert-by-filename")
        .form(&[("file_name", "doc.txt"), ("output_filename", "from_post")])
        .await
        .json();
    let get: Value = app
        .client()
        .get("/convert-by-filename/doc.txt")
        .add_query_param("output_filename", "from_get")
        .await
        .json();

    for key in ["status", "message", "original_filename", "file_size", "input_path"] {
        assert_eq!(post[key], get[key], "field {key}");
    }
    assert_eq!(
        post["metadata"]["original_extension"],
        get["metadata"]["original_extension"]
    );

    let a = std::fs::read_to_string(app.converted_dir.join("from_post.md")).expect("post output");
    let b = std::fs::read_to_string(app.converted_dir.join("from_get.md")).expect("get output");
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_empty_output_override_falls_back_to_generated_name() {
    let app = setup_test_app(StubBehavior::Echo).await;
    app.seed_upload("notes.txt", b"hello");

    let body: Value = app
        .client()
        .post("/convert-by-filename")
        .form(&[("file_name", "notes.txt"), ("output_filename", "")])
        .await
        .json();

    let token = body["metadata"]["conversion_id"].as_str().unwrap_or_default();
    let converted = body["converted_filename"].as_str().unwrap_or_default();
    assert_generated_name(converted, "notes", token);
}

#[tokio::test]
async fn test_output_override_cannot_escape_converted_dir() {
    let app = setup_test_app(StubBehavior::Echo).await;
    app.seed_upload("notes.txt", b"hello");

    let body: Value = app
        .client()
        .post("/convert-by-filename")
        .form(&[("file_name", "notes.txt"), ("output_filename", "../../escaped")])
        .await
        .json();

    assert_eq!(body["converted_filename"], "escaped.md");
    assert_eq!(app.converted_names(), vec!["escaped.md".to_string()]);
}

#[tokio::test]
async fn test_repeated_conversions_use_distinct_names() {
    let app = setup_test_app(StubBehavior::Echo).await;
    app.seed_upload("notes.txt", b"hello");

    let first: Value = app
        .client()
        .get("/convert-by-filename/notes.txt")
        .await
        .json();
    let second: Value = app
        .client()
        .get("/convert-by-filename/notes.txt")
        .await
        .json();

    assert_ne!(first["converted_filename"], second["converted_filename"]);
    assert_eq!(app.converted_names().len(), 2);
}

#[tokio::test]
async fn test_convert_by_filename_missing_upload() {
    let app = setup_test_app(StubBehavior::Echo).await;

    let response = app
        .client()
        .post("/convert-by-filename")
        .form(&[("file_name", "missing.txt")])
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(
        body["detail"],
        "File 'missing.txt' not found in uploads directory"
    );
    assert!(app.stub().seen().is_empty());

    let get = app.client().get("/convert-by-filename/missing.txt").await;
    assert_eq!(get.status_code(), 404);
}

#[tokio::test]
async fn test_convert_by_filename_without_name() {
    let app = setup_test_app(StubBehavior::Echo).await;

    let response = app
        .client()
        .post("/convert-by-filename")
        .form(&[("output_filename", "x")])
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_converter_failure_is_reported() {
    let app = setup_test_app(StubBehavior::Fail("boom".to_string())).await;
    app.seed_upload("notes.txt", b"hello");

    let response = app.client().get("/convert-by-filename/notes.txt").await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(body["code"], "CONVERSION_FAILED");
    assert!(body["detail"]
        .as_str()
        .unwrap_or_default()
        .starts_with("Conversion failed: boom"));
    assert!(app.converted_names().is_empty());
}

#[tokio::test]
async fn test_empty_conversion_output() {
    for behavior in [StubBehavior::Empty, StubBehavior::Nothing] {
        let app = setup_test_app(behavior).await;
        app.seed_upload("blank.txt", b"");

        let response = app.client().get("/convert-by-filename/blank.txt").await;

        assert_eq!(response.status_code(), 422);
        let body: Value = response.json();
        assert_eq!(body["detail"], "Unable to convert file: blank.txt");
        assert_eq!(body["code"], "EMPTY_OUTPUT");
        assert!(app.converted_names().is_empty());
    }
}

#[tokio::test]
async fn test_convert_upload() {
    let app = setup_test_app(StubBehavior::Echo).await;

    let response = app
        .client()
        .post("/convert")
        .multipart(file_form("memo.txt", b"direct"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["original_filename"], "memo.txt");
    assert!(body.get("input_path").is_none());

    let token = body["metadata"]["conversion_id"].as_str().unwrap_or_default();
    let converted = body["converted_filename"].as_str().unwrap_or_default();
    assert_generated_name(converted, "memo", token);

    // The converter saw a token-prefixed copy in the uploads directory.
    let seen = app.stub().seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].content, b"direct");
    assert_eq!(
        seen[0].path.file_name().and_then(|n| n.to_str()),
        Some(format!("{}_memo.txt", token).as_str())
    );
    assert_eq!(seen[0].path.parent(), Some(app.upload_dir.as_path()));

    // Nothing is left behind in uploads.
    assert!(app.upload_names().is_empty());
    let markdown = std::fs::read_to_string(app.converted_dir.join(converted)).expect("output");
    assert_eq!(markdown, "# Converted\n\ndirect");
}

#[tokio::test]
async fn test_convert_upload_with_output_name() {
    let app = setup_test_app(StubBehavior::Fixed("# Fixed".to_string())).await;

    let form = file_form("memo.txt", b"direct").add_text("output_filename", "memo_out");
    let response = app.client().post("/convert").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["converted_filename"], "memo_out.md");
    assert_eq!(body["file_size"], 7);
}

#[tokio::test]
async fn test_convert_upload_failure_removes_temporary_file() {
    let app = setup_test_app(StubBehavior::Fail("unsupported".to_string())).await;

    let response = app
        .client()
        .post("/convert")
        .multipart(file_form("memo.bin", b"\x00\x01"))
        .await;

    assert_eq!(response.status_code(), 422);
    assert_eq!(app.stub().seen().len(), 1);
    assert!(app.upload_names().is_empty());
    assert!(app.converted_names().is_empty());
}

#[tokio::test]
async fn test_convert_upload_empty_output_removes_temporary_file() {
    let app = setup_test_app(StubBehavior::Empty).await;

    let response = app
        .client()
        .post("/convert")
        .multipart(file_form("memo.txt", b"text"))
        .await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Unable to convert file: memo.txt");
    assert!(app.upload_names().is_empty());
}

#[tokio::test]
async fn test_convert_upload_without_file() {
    let app = setup_test_app(StubBehavior::Echo).await;

    let form = MultipartForm::new().add_text("output_filename", "x");
    let response = app.client().post("/convert").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["detail"], "No file provided");
    assert!(app.stub().seen().is_empty());
}

#[tokio::test]
async fn test_native_backend_converts_csv() {
    let app = setup_native_app().await;
    app.seed_upload("table.csv", b"name,qty\napple,3\n");

    let response = app
        .client()
        .get("/convert-by-filename/table.csv")
        .add_query_param("output_filename", "table")
        .await;

    assert_eq!(response.status_code(), 200);
    let markdown = std::fs::read_to_string(app.converted_dir.join("table.md")).expect("output");
    assert!(markdown.contains("| name | qty |"));
    assert!(markdown.contains("| apple | 3 |"));
}

#[tokio::test]
async fn test_native_backend_rejects_unknown_type() {
    let app = setup_native_app().await;
    app.seed_upload("image.xyz", b"???");

    let response = app.client().get("/convert-by-filename/image.xyz").await;

    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(body["code"], "CONVERSION_FAILED");
}

#[tokio::test]
async fn test_relative_directories_yield_absolute_paths() {
    let app = setup_relative_app(StubBehavior::Echo).await;
    app.seed_upload("a.txt", b"relative");

    let response = app.client().get("/convert-by-filename/a.txt").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let input_path = body["input_path"].as_str().unwrap_or_default();
    let output_path = body["output_path"].as_str().unwrap_or_default();
    assert!(Path::new(input_path).is_absolute(), "{input_path}");
    assert!(Path::new(output_path).is_absolute(), "{output_path}");

    let seen = app.stub().seen();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].path.is_absolute());
    assert_eq!(seen[0].path, app.upload_dir.join("a.txt"));

    let info: Value = app.client().get("/").await.json();
    assert!(Path::new(info["upload_dir"].as_str().unwrap_or_default()).is_absolute());
}

#[tokio::test]
async fn test_staging_lookalike_output_name_is_accepted() {
    let app = setup_test_app(StubBehavior::Echo).await;

    let form = file_form("memo.txt", b"direct").add_text("output_filename", ".staging-out");
    let response = app.client().post("/convert").multipart(form).await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["converted_filename"], ".staging-out.md");
    assert_eq!(app.converted_names(), vec![".staging-out.md".to_string()]);
}
