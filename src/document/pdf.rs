//! PDF page rasterization.
//!
//! PDFs are handed to the pipeline as an ordered sequence of page images.
//! Rasterization is consumed through the [`PageRasterizer`] trait; the
//! production implementation uses the `pdfium-render` crate, which requires
//! the PDFium library to be available at runtime (bundled or
//! system-installed).

use std::path::Path;

use image::RgbImage;
use pdfium_render::prelude::*;

use super::error::DocumentError;

/// Rendering resolution in dots per inch for PDF pages.
const PDF_RENDER_DPI: f32 = 300.0;

/// Rasterization collaborator interface.
///
/// `rasterize` converts the PDF at `pdf_path` into one RGB image per page, in
/// page order. Implementations report failure through [`DocumentError`]; the
/// caller surfaces it as a client error without retrying.
pub trait PageRasterizer: Send + Sync {
    fn rasterize(&self, pdf_path: &Path) -> Result<Vec<RgbImage>, DocumentError>;
}

/// PDFium-backed rasterizer.
///
/// Binds the PDFium library on each call, matching its thread-safety model:
/// the binding is cheap relative to rendering and keeps the type `Send + Sync`
/// without holding library state across requests.
#[derive(Debug, Default)]
pub struct PdfiumRasterizer;

impl PdfiumRasterizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PageRasterizer for PdfiumRasterizer {
    fn rasterize(&self, pdf_path: &Path) -> Result<Vec<RgbImage>, DocumentError> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name())
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|source| DocumentError::PdfRasterizeError { source })?,
        );

        let document = pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|source| DocumentError::PdfRasterizeError { source })?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(PDF_RENDER_DPI / 72.0);

        let total_pages = document.pages().len();
        let mut pages = Vec::with_capacity(total_pages as usize);

        for page_index in 0..total_pages {
            let page = document
                .pages()
                .get(page_index)
                .map_err(|source| DocumentError::PdfRasterizeError { source })?;

            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|source| DocumentError::PdfRasterizeError { source })?;

            pages.push(bitmap_to_rgb(&bitmap)?);
        }

        Ok(pages)
    }
}

/// Converts a PDFium BGRA bitmap into a 3-channel RGB image.
fn bitmap_to_rgb(bitmap: &PdfBitmap) -> Result<RgbImage, DocumentError> {
    let width = bitmap.width() as u32;
    let height = bitmap.height() as u32;
    let raw_bytes = bitmap.as_raw_bytes();

    let stride = width as usize * 4;
    let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);

    for y in 0..height {
        for x in 0..width {
            let pixel_index = y as usize * stride + x as usize * 4;
            if pixel_index + 2 < raw_bytes.len() {
                let b = raw_bytes[pixel_index];
                let g = raw_bytes[pixel_index + 1];
                let r = raw_bytes[pixel_index + 2];
                rgb_data.push(r);
                rgb_data.push(g);
                rgb_data.push(b);
            }
        }
    }

    RgbImage::from_raw(width, height, rgb_data).ok_or_else(|| DocumentError::ProcessingError {
        message: format!("rendered page bitmap has inconsistent dimensions {width}x{height}"),
    })
}
