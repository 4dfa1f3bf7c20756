//! Page extraction and result normalization.
//!
//! Folds heterogeneous recognition output into a uniform ordered list of
//! per-page records, tolerating pages where recognition finds nothing.

use image::RgbImage;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::DocumentError;
use crate::ocr::{RecognizedLine, TextRecognizer};

/// Normalized OCR output for one page.
///
/// `page_number` is 1-based and strictly increasing in emission order;
/// single-image input yields exactly one record numbered 1. `text` holds the
/// recognized lines in reading order and is empty when the page yields no
/// text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub page_number: usize,
    pub text: Vec<String>,
}

/// Normalizes one page's recognition output into a [`PageRecord`].
///
/// Absent or empty output produces a record with an empty text sequence
/// rather than failing; otherwise the per-line structure is flattened to its
/// text content and any confidence data is discarded.
#[must_use]
pub fn normalize_page(page_number: usize, output: Option<Vec<RecognizedLine>>) -> PageRecord {
    let text = output
        .map(|lines| lines.into_iter().map(|line| line.text).collect())
        .unwrap_or_default();

    PageRecord { page_number, text }
}

/// Decodes an uploaded image into the 3-channel color model recognition
/// expects.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, DocumentError> {
    let img = image::load_from_memory(bytes)
        .map_err(|source| DocumentError::ImageDecodeError { source })?
        .to_rgb8();

    Ok(img)
}

/// Runs recognition over page images in order and normalizes each result.
///
/// A page whose recognition call fails degrades to an empty record instead of
/// aborting the document, so page numbering stays contiguous with the page
/// sequence.
#[must_use]
pub fn extract_records(images: &[RgbImage], recognizer: &dyn TextRecognizer) -> Vec<PageRecord> {
    images
        .iter()
        .enumerate()
        .map(|(index, image)| {
            let page_number = index + 1;
            let output = match recognizer.recognize(image) {
                Ok(output) => output,
                Err(err) => {
                    warn!(page_number, "recognition failed, emitting empty page: {err}");
                    None
                }
            };
            normalize_page(page_number, output)
        })
        .collect()
}
