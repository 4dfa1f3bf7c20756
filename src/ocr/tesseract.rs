//! Tesseract-backed text recognition.
//!
//! Drives the `tesseract` command-line binary: the page image is written to a
//! scratch PNG, recognized, and the emitted text file is read back. Requires
//! a Tesseract installation on the host.

use std::process::Command;

use image::RgbImage;
use tracing::debug;

use super::{OcrError, RecognizedLine, TextRecognizer};

/// Text recognizer that shells out to the Tesseract CLI.
///
/// Construct one instance at startup and share it behind an
/// `Arc<dyn TextRecognizer>`; the engine itself is stateless between calls.
pub struct TesseractRecognizer {
    language: String,
}

impl TesseractRecognizer {
    /// Page segmentation mode: fully automatic layout analysis.
    const PAGE_SEGMENTATION_MODE: &'static str = "3";

    #[must_use]
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    /// Returns `true` if the `tesseract` binary is invocable on this host.
    #[must_use]
    pub fn is_available() -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .is_ok()
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &RgbImage) -> Result<Option<Vec<RecognizedLine>>, OcrError> {
        let scratch = tempfile::tempdir()
            .map_err(|e| OcrError::ImagePreparation(e.to_string()))?;

        let input_path = scratch.path().join("page.png");
        image
            .save(&input_path)
            .map_err(|e| OcrError::ImagePreparation(e.to_string()))?;

        // Tesseract appends ".txt" to the output base name itself.
        let output_base = scratch.path().join("page");

        let output = Command::new("tesseract")
            .arg(&input_path)
            .arg(&output_base)
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(Self::PAGE_SEGMENTATION_MODE)
            .output()
            .map_err(|e| OcrError::EngineUnavailable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Processing(stderr.trim().to_string()));
        }

        let text = std::fs::read_to_string(output_base.with_extension("txt"))
            .map_err(|e| OcrError::Processing(e.to_string()))?;

        let lines: Vec<RecognizedLine> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(RecognizedLine::new)
            .collect();

        debug!("recognized {} line(s)", lines.len());

        if lines.is_empty() {
            Ok(None)
        } else {
            Ok(Some(lines))
        }
    }
}
