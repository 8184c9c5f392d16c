//! Error types for the wkpdf library.
//!
//! Every failure mode of a render maps onto one variant of [`RenderError`].
//! A render either succeeds completely (PDF bytes captured, temp files gone)
//! or fails with exactly one of these, propagated straight to the caller.
//! Nothing is retried internally.
//!
//! The output variants ([`RenderError::OutputFile`],
//! [`RenderError::OutputWrite`]) are raised only after the renderer already
//! succeeded. Callers that hold on to the bytes from
//! [`crate::Document::render`] can retry the write without re-running the
//! external process.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the wkpdf library.
#[derive(Debug, Error)]
pub enum RenderError {
    // ── Temp materialisation ──────────────────────────────────────────────
    /// Could not create the per-render temp directory.
    #[error("Failed to create temp directory under '{root}': {source}")]
    TempDir {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not write one in-memory page to its temp file.
    #[error("Failed to write temp page '{path}': {source}")]
    TempWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Renderer process ──────────────────────────────────────────────────
    /// The renderer executable could not be started at all.
    #[error(
        "Failed to launch renderer '{executable}': {source}\n\
Check that wkhtmltopdf is installed, or point WKPDF_EXECUTABLE at it."
    )]
    Launch {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The renderer ran but exited unsuccessfully. `stderr` is verbatim.
    #[error("Renderer failed ({}): {stderr}", exit_label(.code))]
    Process { code: Option<i32>, stderr: String },

    // ── Output ────────────────────────────────────────────────────────────
    /// Could not persist the rendered PDF to the requested file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not copy the rendered PDF into the caller's sink.
    #[error("Failed to write rendered PDF to output: {0}")]
    OutputWrite(#[source] std::io::Error),

    // ── Config / manifest ─────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A manifest was syntactically valid JSON but described an impossible document.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// A manifest file could not be read.
    #[error("Failed to read manifest '{path}': {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}
