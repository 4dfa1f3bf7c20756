use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to rasterize PDF content")]
    PdfRasterizeError {
        #[source]
        source: pdfium_render::prelude::PdfiumError,
    },

    #[error("Failed to decode image content")]
    ImageDecodeError {
        #[source]
        source: image::ImageError,
    },

    #[error("Processing error: {message}")]
    ProcessingError { message: String },
}

impl From<pdfium_render::prelude::PdfiumError> for DocumentError {
    fn from(source: pdfium_render::prelude::PdfiumError) -> Self {
        DocumentError::PdfRasterizeError { source }
    }
}
