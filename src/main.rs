//! pdf-capture - entry point
//!
//! Extracts the text of a PDF, or, when a pattern is given, prints the
//! named-capture results as JSON.

use anyhow::Context;
use pdf_capture::{CaptureIndex, PdfParser};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Serialize)]
struct CaptureReport {
    /// Pattern the document was scanned with
    pattern: String,
    /// Capture-group name → captured substrings in occurrence order
    groups: CaptureIndex,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_capture=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: pdf-capture <file.pdf> [pattern]")?;
    let pattern = args.next();

    let parser = PdfParser::from_path(&path, pattern.as_deref())?;

    match parser.pattern() {
        Some(re) => {
            let report = CaptureReport {
                pattern: re.as_str().to_string(),
                groups: parser.captures().snapshot()?,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        None => println!("{}", parser.full_text()?),
    }

    Ok(())
}
