//! PDF text access backed by PDFium

use crate::error::{Error, Result};
use pdfium_render::prelude::*;

/// Get a PDFium instance (creates a new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    // Try to bind to a local library, a well-known install path, or the
    // system library, in that order.
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Extraction {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// Report whether a PDFium library can be located at all.
///
/// Useful for test harnesses that should skip pipeline tests on machines
/// without the native library installed.
pub fn is_available() -> bool {
    create_pdfium().is_ok()
}

/// Check whether the buffer decodes as a PDF document.
///
/// Opens the buffer and reads the text of the first page; any failure along
/// the way (bad header, malformed structure, zero pages, unreadable text
/// object) yields `false` and nothing propagates.
pub fn is_valid_pdf(data: &[u8]) -> bool {
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return false;
    }

    let Ok(pdfium) = create_pdfium() else {
        return false;
    };
    let Ok(document) = pdfium.load_pdf_from_byte_slice(data, None) else {
        return false;
    };

    let pages = document.pages();
    if pages.len() == 0 {
        return false;
    }

    let first_page_readable = match pages.get(0) {
        Ok(page) => page.text().is_ok(),
        Err(_) => false,
    };
    first_page_readable
}

/// Extract the text of every page, concatenated in ascending page order.
///
/// No separator is injected between pages; PDFium itself emits line breaks
/// within a page where the content stream has them. Any failure is returned
/// as-is for the caller to surface.
pub fn full_text(data: &[u8]) -> Result<String> {
    let pdfium = create_pdfium()?;

    let document = pdfium
        .load_pdf_from_byte_slice(data, None)
        .map_err(|e| Error::Extraction {
            reason: format!("Failed to open document: {}", e),
        })?;

    let pages = document.pages();
    tracing::debug!(page_count = pages.len(), "extracting page text");

    let mut text = String::new();
    for index in 0..pages.len() {
        let page = pages.get(index).map_err(|e| Error::Extraction {
            reason: format!("Failed to get page {}: {}", index + 1, e),
        })?;

        let page_text = page.text().map_err(|e| Error::Extraction {
            reason: format!("Failed to read text of page {}: {}", index + 1, e),
        })?;

        text.push_str(&page_text.all());
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_pdf_rejects_short_buffer() {
        assert!(!is_valid_pdf(b""));
        assert!(!is_valid_pdf(b"%PD"));
    }

    #[test]
    fn test_is_valid_pdf_rejects_non_pdf_header() {
        assert!(!is_valid_pdf(b"GIF89a not a pdf at all"));
        assert!(!is_valid_pdf(&[0u8; 1024]));
    }
}
