use std::collections::VecDeque;
use std::io::Cursor;
use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use image::RgbImage;
use serde_json::Value;
use tempfile::TempDir;

use scansheet::document::{DocumentError, PageRasterizer};
use scansheet::ocr::{OcrError, RecognizedLine, TextRecognizer};
use scansheet::server::{create_app, AppState};

/// Recognizer that replays a scripted sequence of per-page outputs.
struct ScriptedRecognizer {
    outputs: Mutex<VecDeque<Option<Vec<String>>>>,
}

impl ScriptedRecognizer {
    fn new(outputs: Vec<Option<Vec<&str>>>) -> Self {
        Self {
            outputs: Mutex::new(
                outputs
                    .into_iter()
                    .map(|page| {
                        page.map(|lines| lines.into_iter().map(String::from).collect())
                    })
                    .collect(),
            ),
        }
    }
}

impl TextRecognizer for ScriptedRecognizer {
    fn recognize(&self, _image: &RgbImage) -> Result<Option<Vec<RecognizedLine>>, OcrError> {
        let next = self.outputs.lock().unwrap().pop_front().flatten();
        Ok(next.map(|lines| lines.into_iter().map(RecognizedLine::new).collect()))
    }
}

/// Rasterizer that produces a fixed number of blank pages.
struct FakeRasterizer {
    pages: usize,
}

impl PageRasterizer for FakeRasterizer {
    fn rasterize(&self, _pdf_path: &Path) -> Result<Vec<RgbImage>, DocumentError> {
        Ok(vec![RgbImage::new(2, 2); self.pages])
    }
}

struct FailingRasterizer;

impl PageRasterizer for FailingRasterizer {
    fn rasterize(&self, _pdf_path: &Path) -> Result<Vec<RgbImage>, DocumentError> {
        Err(DocumentError::ProcessingError {
            message: "document is corrupt".to_string(),
        })
    }
}

fn test_state(
    storage: &TempDir,
    recognizer: Arc<dyn TextRecognizer>,
    rasterizer: Arc<dyn PageRasterizer>,
) -> AppState {
    AppState {
        recognizer,
        rasterizer,
        storage_dir: storage.path().to_path_buf(),
        max_file_size: 10 * 1024 * 1024,
    }
}

fn png_bytes() -> Vec<u8> {
    let img = RgbImage::new(4, 4);
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

fn upload_form(filename: &str, bytes: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes)
            .file_name(filename)
            .mime_type("application/octet-stream"),
    )
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();

    reader
        .records()
        .map(|record| {
            record
                .unwrap()
                .iter()
                .map(|field| field.to_string())
                .collect()
        })
        .collect()
}

fn storage_entries(storage: &TempDir) -> usize {
    std::fs::read_dir(storage.path()).unwrap().count()
}

#[tokio::test]
async fn test_image_upload_yields_single_record() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![Some(vec!["Hello", "World"])]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    let response = server
        .post("/ocr")
        .multipart(upload_form("photo.png", png_bytes()))
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Hello"));
    assert!(body.contains("World"));
    assert!(body.contains("/download/photo.csv"));

    let rows = read_rows(&storage.path().join("photo.csv"));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["Page", "Text"]);
    assert_eq!(rows[1], vec!["1", "Hello\nWorld"]);
}

#[tokio::test]
async fn test_pdf_upload_yields_contiguous_page_records() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![
        Some(vec!["page one"]),
        None,
        Some(vec!["page three"]),
    ]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 3 }));
    let server = TestServer::new(create_app(state)).unwrap();

    let response = server
        .post("/ocr")
        .multipart(upload_form("scan.pdf", b"%PDF-1.4 fake".to_vec()))
        .await;

    response.assert_status_ok();

    let rows = read_rows(&storage.path().join("scan.csv"));
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], vec!["Page", "Text"]);
    assert_eq!(rows[1], vec!["1", "page one"]);
    assert_eq!(rows[2], vec!["2", ""]);
    assert_eq!(rows[3], vec!["3", "page three"]);
}

#[tokio::test]
async fn test_empty_filename_is_rejected_without_artifacts() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    let form = MultipartForm::new().add_part("file", Part::bytes(png_bytes()));
    let response = server.post("/ocr").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body.get("error").is_some());
    assert_eq!(storage_entries(&storage), 0);
}

#[tokio::test]
async fn test_missing_file_field_is_rejected_without_artifacts() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    let form = MultipartForm::new().add_part(
        "attachment",
        Part::bytes(png_bytes()).file_name("photo.png"),
    );
    let response = server.post("/ocr").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body.get("error").is_some());
    assert_eq!(storage_entries(&storage), 0);
}

#[tokio::test]
async fn test_rasterization_failure_is_a_client_error() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![]));
    let state = test_state(&storage, recognizer, Arc::new(FailingRasterizer));
    let server = TestServer::new(create_app(state)).unwrap();

    let response = server
        .post("/ocr")
        .multipart(upload_form("broken.pdf", b"not a pdf".to_vec()))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Error converting PDF to images"));
    assert!(message.contains("document is corrupt"));
}

#[tokio::test]
async fn test_undecodable_image_is_a_client_error() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    let response = server
        .post("/ocr")
        .multipart(upload_form("photo.png", b"definitely not a png".to_vec()))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Error processing the image"));
}

#[tokio::test]
async fn test_non_post_access_returns_advisory() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    let response = server.get("/ocr").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("POST"));
    assert_eq!(storage_entries(&storage), 0);
}

#[tokio::test]
async fn test_same_name_reupload_overwrites_artifact() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![
        Some(vec!["first pass"]),
        Some(vec!["second pass"]),
    ]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    for _ in 0..2 {
        let response = server
            .post("/ocr")
            .multipart(upload_form("photo.png", png_bytes()))
            .await;
        response.assert_status_ok();
    }

    let rows = read_rows(&storage.path().join("photo.csv"));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec!["1", "second pass"]);
}

#[tokio::test]
async fn test_download_streams_artifact_as_attachment() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![Some(vec!["Hello"])]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    server
        .post("/ocr")
        .multipart(upload_form("photo.png", png_bytes()))
        .await
        .assert_status_ok();

    let response = server.get("/download/photo.csv").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "text/csv");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"photo.csv\""
    );
    assert!(response.text().starts_with("Page,Text"));
}

#[tokio::test]
async fn test_download_missing_artifact_is_not_found() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    let response = server.get("/download/nothing.csv").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn test_download_rejects_unsanitized_names() {
    let storage = TempDir::new().unwrap();
    std::fs::write(storage.path().join("secret.csv"), "data").unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    let response = server.get("/download/..%2Fsecret.csv").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoint() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_index_serves_upload_form() {
    let storage = TempDir::new().unwrap();
    let recognizer = Arc::new(ScriptedRecognizer::new(vec![]));
    let state = test_state(&storage, recognizer, Arc::new(FakeRasterizer { pages: 0 }));
    let server = TestServer::new(create_app(state)).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("multipart/form-data"));
    assert!(body.contains("name=\"file\""));
}
