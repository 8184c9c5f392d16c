//! # wkpdf
//!
//! Compose multi-page PDF documents from HTML sources by driving an external
//! renderer (`wkhtmltopdf`).
//!
//! Layout and PDF generation happen entirely inside the renderer. This crate
//! builds the invocation, gets every page's HTML to it, runs it once per
//! render, and hands back the PDF bytes.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Document (cover + pages + options)
//!  │
//!  ├─ 1. Delivery  0 in-memory pages → paths as given
//!  │               1 in-memory page  → piped through stdin as "-"
//!  │               ≥2                → written to <temp>/page00000001.html…
//!  ├─ 2. Args      [opts] [cover <path> <opts>] [<path> <opts>]… -
//!  ├─ 3. Process   spawn renderer, capture stdout (PDF) + stderr
//!  └─ 4. Output    bytes → Vec<u8>, file, or any io::Write
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wkpdf::{Document, Page, PdfOption, RendererConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut doc = Document::with_options(RendererConfig::default(), [PdfOption::quiet()]);
//!     doc.set_cover(Page::from_html("<h1>Annual report</h1>"));
//!     doc.add_page(Page::from_path("chapter1.html"));
//!     doc.add_page(Page::from_html("<p>Built at runtime</p>"));
//!
//!     let pdf = doc.render()?;
//!     std::fs::write("report.pdf", &pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `wkpdf` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod document;
pub mod error;
pub mod manifest;
pub mod option;
pub mod output;
pub mod page;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RendererConfig, RendererConfigBuilder};
pub use document::Document;
pub use error::RenderError;
pub use manifest::{DocumentManifest, PageSpec};
pub use option::PdfOption;
pub use output::{RenderOutput, RenderStats};
pub use page::{Page, PageSource};
pub use pipeline::delivery::DeliveryMode;
