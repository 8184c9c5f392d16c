//! Pipeline stages for a single render.
//!
//! Each submodule implements one step; [`crate::Document::render_output`]
//! strings them together.
//!
//! ## Data Flow
//!
//! ```text
//! pages ──▶ delivery ──▶ args ──▶ process ──▶ PDF bytes
//!          (direct /    (argv)   (spawn +
//!           stdin /              capture)
//!           temp files)
//! ```
//!
//! 1. [`delivery`]: decide how in-memory pages reach the renderer and, for
//!    two or more, write them to a scoped temp directory
//! 2. [`args`]:     assemble the renderer argv from options and resolved paths
//! 3. [`process`]:  run the renderer, feeding stdin when bound, and capture
//!    stdout/stderr

pub mod args;
pub mod delivery;
pub mod process;
