//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p mdconvert-api`. Each test app gets its own
//! pair of temporary directories and a scripted converter, so no external binary is
//! needed.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use mdconvert_api::setup::routes;
use mdconvert_api::state::AppState;
use mdconvert_core::Config;
use mdconvert_processing::{ConversionGateway, Converter, ConverterOutput, NativeConverter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// What the scripted converter does with a file.
#[derive(Debug, Clone)]
pub enum StubBehavior {
    /// Return `# Converted\n\n` followed by the file content.
    Echo,
    /// Return the given text regardless of input.
    Fixed(String),
    /// Return an empty string.
    Empty,
    /// Return no result at all.
    Nothing,
    /// Fail with the given message.
    Fail(String),
}

/// Converter that follows a [`StubBehavior`] and records every path it was given.
pub struct StubConverter {
    behavior: StubBehavior,
    seen: Mutex<Vec<SeenInput>>,
}

/// A path handed to the converter together with what was on disk at that moment.
#[derive(Debug, Clone)]
pub struct SeenInput {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

impl StubConverter {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<SeenInput> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Converter for StubConverter {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn convert(&self, path: &Path) -> anyhow::Result<Option<ConverterOutput>> {
        let content = tokio::fs::read(path).await?;
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(SeenInput {
                path: path.to_path_buf(),
                content: content.clone(),
            });
        }

        match &self.behavior {
            StubBehavior::Echo => Ok(Some(ConverterOutput::new(format!(
                "# Converted\n\n{}",
                String::from_utf8_lossy(&content)
            )))),
            StubBehavior::Fixed(text) => Ok(Some(ConverterOutput::new(text.clone()))),
            StubBehavior::Empty => Ok(Some(ConverterOutput::new(String::new()))),
            StubBehavior::Nothing => Ok(None),
            StubBehavior::Fail(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}

/// Test application: server plus the directories it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub stub: Option<Arc<StubConverter>>,
    pub upload_dir: PathBuf,
    pub converted_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn stub(&self) -> &StubConverter {
        self.stub
            .as_deref()
            .expect("test app was not built with a stub converter")
    }

    /// Place a file in the uploads directory without going through the API.
    pub fn seed_upload(&self, name: &str, content: &[u8]) {
        std::fs::write(self.upload_dir.join(name), content).expect("seed upload");
    }

    /// Place a file in the converted directory without going through the API.
    pub fn seed_converted(&self, name: &str, content: &str) {
        std::fs::write(self.converted_dir.join(name), content).expect("seed converted file");
    }

    pub fn upload_names(&self) -> Vec<String> {
        dir_names(&self.upload_dir)
    }

    pub fn converted_names(&self) -> Vec<String> {
        dir_names(&self.converted_dir)
    }
}

fn dir_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

async fn build_app(
    temp_dir: TempDir,
    gateway: ConversionGateway,
    stub: Option<Arc<StubConverter>>,
    max_upload_size_bytes: Option<usize>,
) -> TestApp {
    let upload_dir = temp_dir.path().join("uploads");
    let converted_dir = temp_dir.path().join("converted");

    let mut config = Config::with_directories(&upload_dir, &converted_dir);
    if let Some(limit) = max_upload_size_bytes {
        config.0.max_upload_size_bytes = limit;
    }

    let state = AppState::with_gateway(config.clone(), gateway)
        .await
        .expect("app state");
    let router = routes::setup_routes(&config, Arc::new(state)).expect("routes");
    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");

    // The stores report canonical paths; mirror them so assertions compare like with like.
    let upload_dir = std::fs::canonicalize(&upload_dir).expect("canonical upload dir");
    let converted_dir = std::fs::canonicalize(&converted_dir).expect("canonical converted dir");

    TestApp {
        server,
        stub,
        upload_dir,
        converted_dir,
        _temp_dir: temp_dir,
    }
}

/// Setup a test app whose converter follows `behavior`.
pub async fn setup_test_app(behavior: StubBehavior) -> TestApp {
    let stub = StubConverter::new(behavior);
    let gateway = ConversionGateway::new(stub.clone());
    build_app(TempDir::new().expect("temp dir"), gateway, Some(stub), None).await
}

/// Setup a test app with a small request body limit.
pub async fn setup_test_app_with_limit(max_upload_size_bytes: usize) -> TestApp {
    let stub = StubConverter::new(StubBehavior::Echo);
    let gateway = ConversionGateway::new(stub.clone());
    build_app(
        TempDir::new().expect("temp dir"),
        gateway,
        Some(stub),
        Some(max_upload_size_bytes),
    )
    .await
}

/// Setup a test app backed by the built-in native converter.
pub async fn setup_native_app() -> TestApp {
    let gateway = ConversionGateway::new(Arc::new(NativeConverter::new()));
    build_app(TempDir::new().expect("temp dir"), gateway, None, None).await
}

/// Setup a test app whose directories are configured as relative paths.
pub async fn setup_relative_app(behavior: StubBehavior) -> TestApp {
    let temp_dir = tempfile::Builder::new()
        .prefix("relative-app")
        .tempdir_in(".")
        .expect("temp dir in working directory");
    assert!(temp_dir.path().is_relative());

    let stub = StubConverter::new(behavior);
    let gateway = ConversionGateway::new(stub.clone());
    build_app(temp_dir, gateway, Some(stub), None).await
}

/// Multipart form with a single `file` part.
pub fn file_form(file_name: &str, content: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(content.to_vec())
            .file_name(file_name.to_string())
            .mime_type("application/octet-stream"),
    )
}
