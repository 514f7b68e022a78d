//! Background PDF text extraction with named-capture scanning
//!
//! Construct a [`PdfParser`] from PDF bytes or a file path, optionally with
//! a regular expression containing named capture groups. Validation and
//! pattern compilation happen synchronously at construction; text extraction
//! and capture collection then run on a shared worker pool. Accessors block
//! the calling thread until the stage they depend on has finished:
//!
//! - [`PdfParser::full_text`] waits for page-order text extraction
//! - [`PdfParser::captures`] is a read-only map from capture-group name to
//!   the ordered substrings that group matched across the whole text
//!
//! ```no_run
//! use pdf_capture::PdfParser;
//!
//! # fn main() -> pdf_capture::Result<()> {
//! let parser = PdfParser::from_path(
//!     "report.pdf",
//!     Some(r"(?<case>\d{4}-[A-Z]{2}-\d+)"),
//! )?;
//! for number in parser.captures().get("case")?.unwrap_or(&[]) {
//!     println!("{number}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod captures;
pub mod error;
pub mod parser;
pub mod pdf;
pub mod source;
mod stage;

pub use captures::{CaptureIndex, CaptureMap};
pub use error::{Error, Result};
pub use parser::PdfParser;
