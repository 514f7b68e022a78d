//! PDF processing layer
//!
//! Narrow wrapper around PDFium: validate a buffer, count pages, extract the
//! text of each page. Everything else about the PDF format is PDFium's
//! problem.

mod reader;

pub use reader::{full_text, is_available, is_valid_pdf};
