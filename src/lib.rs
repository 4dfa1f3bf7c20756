pub mod document;
pub mod export;
pub mod ocr;
pub mod server;
pub mod utils;

pub use document::{DocumentError, DocumentKind, PageRasterizer, PageRecord, PdfiumRasterizer};
pub use export::{derive_artifact_name, write_spreadsheet, ExportError};
pub use ocr::{OcrError, RecognizedLine, TesseractRecognizer, TextRecognizer};
pub use server::{create_app, start_server, AppState};
