pub mod error;
pub mod extract;
pub mod pdf;

pub use error::DocumentError;
pub use extract::{decode_image, extract_records, normalize_page, PageRecord};
pub use pdf::{PageRasterizer, PdfiumRasterizer};

/// Processing path for an upload, selected by filename extension.
///
/// A case-insensitive `.pdf` suffix selects the PDF path; every other name is
/// treated as a directly-decodable image.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DocumentKind {
    Pdf,
    Image,
}

impl DocumentKind {
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        let is_pdf = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            DocumentKind::Pdf
        } else {
            DocumentKind::Image
        }
    }
}

/// Fallback name for uploads whose filename sanitizes away to nothing.
const FALLBACK_FILENAME: &str = "upload";

/// Reduces a client-supplied filename to a safe path component.
///
/// Keeps only the final path segment, maps every character outside
/// `[A-Za-z0-9._-]` to `_`, and strips leading dots so the result can never
/// name a parent directory or hide as a dotfile. A name that sanitizes away
/// entirely becomes [`FALLBACK_FILENAME`].
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = basename
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Returns `true` if `filename` is already in sanitized form.
///
/// The download route admits only names that round-trip through the
/// upload-time sanitizer, so a client-supplied path segment can never reach
/// the filesystem unvetted.
#[must_use]
pub fn is_sanitized(filename: &str) -> bool {
    !filename.is_empty() && filename == sanitize_filename(filename)
}
