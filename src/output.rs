//! Render results.

use crate::pipeline::delivery::DeliveryMode;
use serde::{Deserialize, Serialize};

/// Everything one render produced.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The rendered PDF, exactly as the renderer wrote it to stdout.
    pub pdf: Vec<u8>,

    /// Renderer stderr. wkhtmltopdf prints progress and warnings here even on
    /// success.
    pub stderr: String,

    pub stats: RenderStats,
}

/// Summary of a single render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// How in-memory pages were handed to the renderer.
    pub delivery: DeliveryMode,
    /// Pages passed to the renderer, cover included.
    pub page_count: usize,
    /// Pages written to temp files (0 unless `delivery` is `TempFiles`).
    pub temp_files: usize,
    /// Size of the rendered PDF.
    pub pdf_bytes: usize,
    /// Wall-clock time for the whole render.
    pub duration_ms: u64,
}
