//! The extraction/match pipeline
//!
//! Construction validates the document and compiles the pattern
//! synchronously, then launches two background units of work on a shared
//! worker pool: page-order text extraction, and (when a pattern exists)
//! capture collection chained strictly after extraction. Accessors block on
//! the corresponding stage.

use crate::captures::{CaptureIndex, CaptureMap};
use crate::error::{Error, Result};
use crate::pdf;
use crate::source;
use crate::stage::{StageCell, StageFault};
use regex::Regex;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::runtime::Runtime;

/// Worker pool shared by every parser instance in the process.
///
/// Stages run on the blocking pool because PDFium work is synchronous FFI.
/// A build failure is reported to each constructor rather than panicking.
fn shared_runtime() -> Result<&'static Runtime> {
    static RUNTIME: OnceLock<std::result::Result<Runtime, String>> = OnceLock::new();
    RUNTIME
        .get_or_init(|| {
            tokio::runtime::Builder::new_multi_thread()
                .thread_name("pdf-capture-worker")
                .enable_all()
                .build()
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|reason| Error::Worker {
            reason: reason.clone(),
        })
}

/// Compile an optional pattern string.
///
/// `None` means no matching was requested and is a valid configuration. An
/// empty or syntactically invalid pattern is rejected before any background
/// work is scheduled.
pub(crate) fn compile_pattern(pattern: Option<&str>) -> Result<Option<Regex>> {
    let Some(pattern) = pattern else {
        return Ok(None);
    };

    if pattern.is_empty() {
        return Err(Error::Pattern {
            pattern: String::new(),
            reason: "pattern is empty".to_string(),
        });
    }

    Regex::new(pattern).map(Some).map_err(|e| Error::Pattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Bucket captures by group name across the whole text.
///
/// A whole-text probe decides between "no keys at all" (pattern matched
/// nowhere) and "every named group keyed" (some sequences possibly empty).
/// Captures are appended in match order, left to right, so each group's
/// sequence reflects occurrence order.
pub(crate) fn collect_captures(re: &Regex, text: &str) -> CaptureIndex {
    let mut index = CaptureIndex::new();

    if !re.is_match(text) {
        return index;
    }

    for name in re.capture_names().flatten() {
        let mut values = Vec::new();
        for caps in re.captures_iter(text) {
            if let Some(found) = caps.name(name) {
                values.push(found.as_str().to_string());
            }
        }
        index.insert(name.to_string(), values);
    }

    index
}

fn fault_from(error: Error) -> StageFault {
    match error {
        Error::Extraction { reason } => StageFault::new(reason),
        other => StageFault::new(other.to_string()),
    }
}

/// A PDF document with background text extraction and optional
/// named-capture scanning.
pub struct PdfParser {
    document: Arc<[u8]>,
    pattern: Option<Regex>,
    text_stage: Arc<StageCell<String>>,
    captures: CaptureMap,
}

impl PdfParser {
    /// Construct from a file path.
    ///
    /// Fails with [`Error::Access`] before the bytes are loaded if the path
    /// is missing or unreadable, then behaves like [`Self::from_bytes`].
    pub fn from_path<P: AsRef<Path>>(path: P, pattern: Option<&str>) -> Result<Self> {
        let bytes = source::load_path(path)?;
        Self::from_bytes(bytes, pattern)
    }

    /// Construct from a byte buffer believed to contain a PDF document.
    ///
    /// Validation and pattern compilation are synchronous; every error a
    /// constructor can produce is raised here, before any background work is
    /// scheduled. Construction itself never blocks on extraction.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, pattern: Option<&str>) -> Result<Self> {
        let bytes = bytes.into();

        if !pdf::is_valid_pdf(&bytes) {
            return Err(Error::InvalidDocument);
        }

        let pattern = compile_pattern(pattern)?;
        let runtime = shared_runtime()?;

        let document: Arc<[u8]> = bytes.into();
        let text_stage = Arc::new(StageCell::new());

        {
            let data = Arc::clone(&document);
            let stage = Arc::clone(&text_stage);
            runtime.spawn_blocking(move || {
                let result = pdf::full_text(&data).map_err(fault_from);
                if let Err(fault) = &result {
                    tracing::warn!(reason = %fault.reason, "text extraction failed");
                }
                stage.publish(result);
            });
        }

        let match_stage = pattern.as_ref().map(|re| {
            let stage: Arc<StageCell<CaptureIndex>> = Arc::new(StageCell::new());
            let publish = Arc::clone(&stage);
            let extracted = Arc::clone(&text_stage);
            let re = re.clone();
            runtime.spawn_blocking(move || {
                // Waits for the extraction stage to publish, so the pattern
                // can never run against a partially written text. An
                // extraction fault becomes this stage's fault as well.
                let result = extracted.wait().map(|text| collect_captures(&re, text));
                publish.publish(result);
            });
            stage
        });

        Ok(Self {
            document,
            pattern,
            text_stage,
            captures: CaptureMap::new(match_stage),
        })
    }

    /// Block until text extraction finishes and return the page-order
    /// concatenated text. Available with or without a pattern.
    pub fn full_text(&self) -> Result<&str> {
        self.text_stage
            .wait()
            .map(String::as_str)
            .map_err(|fault| Error::Extraction {
                reason: fault.reason,
            })
    }

    /// Like [`Self::full_text`], but gives up after `timeout` with
    /// [`Error::Timeout`].
    pub fn full_text_within(&self, timeout: Duration) -> Result<&str> {
        match self.text_stage.wait_for(timeout) {
            Some(result) => result.map(String::as_str).map_err(|fault| Error::Extraction {
                reason: fault.reason,
            }),
            None => Err(Error::Timeout { waited: timeout }),
        }
    }

    /// Whether a pattern was supplied at construction.
    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }

    /// The compiled pattern, if one was supplied.
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// The read-only capture view. Its accessors fail with
    /// [`Error::NoPattern`] when no pattern was supplied, and otherwise
    /// block until capture collection finishes.
    pub fn captures(&self) -> &CaptureMap {
        &self.captures
    }

    /// The raw document bytes supplied at construction.
    pub fn document(&self) -> &[u8] {
        &self.document
    }
}
