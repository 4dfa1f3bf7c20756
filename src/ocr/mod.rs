//! Text recognition collaborator.
//!
//! Recognition is consumed through the [`TextRecognizer`] trait rather than a
//! concrete engine so the rest of the pipeline stays agnostic about where text
//! comes from. The production implementation ([`TesseractRecognizer`]) drives
//! the Tesseract CLI; tests substitute fakes.

pub mod tesseract;

pub use tesseract::TesseractRecognizer;

use image::RgbImage;
use thiserror::Error;

/// One recognized line of text from a page image.
///
/// The engine may report a confidence score alongside the text; downstream
/// normalization keeps only the text.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedLine {
    pub text: String,
    pub confidence: Option<f32>,
}

impl RecognizedLine {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }
}

/// Recognition engine interface.
///
/// `recognize` takes a 3-channel page image and returns the ordered lines of
/// text found on it, or `None` when the page yields no text at all. An absent
/// result is an ordinary outcome, not an error.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &RgbImage) -> Result<Option<Vec<RecognizedLine>>, OcrError>;
}

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineUnavailable(String),

    #[error("Failed to prepare page image: {0}")]
    ImagePreparation(String),

    #[error("OCR processing failed: {0}")]
    Processing(String),
}
