//! Input delivery: decide how each page's HTML reaches the renderer.
//!
//! wkhtmltopdf reads at most one page from stdin, so the strategy depends
//! only on how many pages are held in memory (cover included):
//!
//! | in-memory pages | strategy | effect |
//! |-----------------|----------|--------|
//! | 0   | [`DeliveryMode::Direct`]    | every page uses its own path |
//! | 1   | [`DeliveryMode::Stdin`]     | that page becomes `-`, its bytes go to stdin |
//! | ≥ 2 | [`DeliveryMode::TempFiles`] | each is written to `page%08d.html` in a fresh temp dir |
//!
//! The temp directory is a [`TempDir`] owned by the returned [`Delivery`].
//! Dropping it removes the directory, so cleanup happens whether the render
//! succeeds, fails, or panics.

use crate::error::RenderError;
use crate::page::{Page, PageSource};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// Filename that tells the renderer to read a page from stdin.
pub const STDIN_SENTINEL: &str = "-";

/// Prefix of the per-render temp directory name.
pub const TEMP_DIR_PREFIX: &str = "temp";

/// Which delivery strategy a render used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    Direct,
    Stdin,
    TempFiles,
}

impl DeliveryMode {
    /// Strategy for a given number of in-memory pages.
    pub fn for_in_memory_count(n: usize) -> Self {
        match n {
            0 => DeliveryMode::Direct,
            1 => DeliveryMode::Stdin,
            _ => DeliveryMode::TempFiles,
        }
    }
}

/// Name of the `seq`-th materialised page (1-based).
pub fn temp_page_name(seq: usize) -> String {
    format!("page{seq:08}.html")
}

/// The resolved view of a document's pages for one render.
#[derive(Debug)]
pub struct Delivery<'a> {
    mode: DeliveryMode,
    paths: Vec<PathBuf>,
    stdin: Option<&'a [u8]>,
    temp_dir: Option<TempDir>,
    temp_files: usize,
}

impl<'a> Delivery<'a> {
    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Resolved filename per page, in the order the pages were planned.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Bytes to feed the renderer's stdin, if one page is piped.
    pub fn stdin(&self) -> Option<&'a [u8]> {
        self.stdin
    }

    pub fn temp_dir(&self) -> Option<&Path> {
        self.temp_dir.as_ref().map(TempDir::path)
    }

    pub fn temp_files(&self) -> usize {
        self.temp_files
    }

    /// Remove the temp directory now and report failures as warnings.
    ///
    /// Dropping a `Delivery` also removes it, but silently.
    pub fn cleanup(mut self) {
        if let Some(dir) = self.temp_dir.take() {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => debug!("Removed temp directory {}", path.display()),
                Err(e) => warn!("Failed to remove temp directory {}: {}", path.display(), e),
            }
        }
    }
}

/// Resolve every page to the filename the renderer will see.
///
/// `pages` must be in render order: cover first (when present), then body
/// pages. With two or more in-memory pages a unique directory is created
/// under `temp_root` and each in-memory page is written there before this
/// returns.
pub fn plan<'a>(pages: &[&'a Page], temp_root: &Path) -> Result<Delivery<'a>, RenderError> {
    let in_memory = pages.iter().filter(|p| p.is_in_memory()).count();
    let mode = DeliveryMode::for_in_memory_count(in_memory);
    debug!("{} of {} pages in memory → {:?}", in_memory, pages.len(), mode);

    match mode {
        DeliveryMode::Direct => Ok(Delivery {
            mode,
            paths: pages.iter().map(|p| resolved_path(p)).collect(),
            stdin: None,
            temp_dir: None,
            temp_files: 0,
        }),
        DeliveryMode::Stdin => {
            let mut stdin = None;
            let paths = pages
                .iter()
                .map(|&p| match p.source() {
                    PageSource::Path(path) => path.clone(),
                    PageSource::Content(bytes) => {
                        stdin = Some(bytes.as_slice());
                        PathBuf::from(STDIN_SENTINEL)
                    }
                })
                .collect();
            Ok(Delivery {
                mode,
                paths,
                stdin,
                temp_dir: None,
                temp_files: 0,
            })
        }
        DeliveryMode::TempFiles => materialise(pages, temp_root, mode),
    }
}

fn resolved_path(page: &Page) -> PathBuf {
    match page.source() {
        PageSource::Path(path) => path.clone(),
        // Unreachable in Direct mode; kept total for the type.
        PageSource::Content(_) => PathBuf::from(STDIN_SENTINEL),
    }
}

fn materialise<'a>(
    pages: &[&'a Page],
    temp_root: &Path,
    mode: DeliveryMode,
) -> Result<Delivery<'a>, RenderError> {
    let dir = tempfile::Builder::new()
        .prefix(TEMP_DIR_PREFIX)
        .tempdir_in(temp_root)
        .map_err(|e| RenderError::TempDir {
            root: temp_root.to_path_buf(),
            source: e,
        })?;
    debug!("Created temp directory {}", dir.path().display());
    fill(dir, pages, mode, write_page)
}

fn write_page(path: &Path, bytes: &[u8]) -> io::Result<()> {
    std::fs::write(path, bytes)
}

/// Write every in-memory page into `dir` with `write`.
///
/// `dir` moves into the result, so an early return on a failed write drops it
/// and removes the pages already written.
fn fill<'a, W>(
    dir: TempDir,
    pages: &[&'a Page],
    mode: DeliveryMode,
    write: W,
) -> Result<Delivery<'a>, RenderError>
where
    W: Fn(&Path, &[u8]) -> io::Result<()>,
{
    let mut seq = 0usize;
    let mut paths = Vec::with_capacity(pages.len());
    for &page in pages {
        match page.source() {
            PageSource::Path(path) => paths.push(path.clone()),
            PageSource::Content(bytes) => {
                seq += 1;
                let path = dir.path().join(temp_page_name(seq));
                write(&path, bytes).map_err(|e| RenderError::TempWrite {
                    path: path.clone(),
                    source: e,
                })?;
                debug!("Wrote {} bytes → {}", bytes.len(), path.display());
                paths.push(path);
            }
        }
    }

    Ok(Delivery {
        mode,
        paths,
        stdin: None,
        temp_dir: Some(dir),
        temp_files: seq,
    })
}
