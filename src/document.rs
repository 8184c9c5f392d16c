//! The document builder: accumulate pages and options, then render.
//!
//! A [`Document`] is plain data until [`Document::render`] runs. Each render
//! recomputes the delivery strategy from scratch, spawns the renderer once,
//! and returns the PDF bytes. Nothing is cached between calls.
//!
//! Mutation takes `&mut self`, so one document cannot be modified from two
//! threads without external synchronisation. Rendering takes `&self`;
//! concurrent renders of the same document each get their own temp
//! directory.

use crate::config::RendererConfig;
use crate::error::RenderError;
use crate::option::PdfOption;
use crate::output::{RenderOutput, RenderStats};
use crate::page::Page;
use crate::pipeline::delivery::{self, DeliveryMode};
use crate::pipeline::{args, process};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A multi-page PDF document assembled from HTML pages.
///
/// # Example
/// ```rust,no_run
/// use wkpdf::{Document, Page, PdfOption, RendererConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut doc = Document::new(RendererConfig::from_env());
/// doc.add_option(PdfOption::page_size("A4"));
/// doc.set_cover(Page::from_html("<h1>Quarterly report</h1>"));
/// doc.add_pages([
///     Page::from_path("summary.html"),
///     Page::from_html("<p>Generated section</p>"),
/// ]);
/// doc.write_to_file("report.pdf")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    config: RendererConfig,
    cover: Option<Page>,
    pages: Vec<Page>,
    options: Vec<PdfOption>,
}

impl Document {
    /// An empty document rendered with `config`.
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            cover: None,
            pages: Vec::new(),
            options: Vec::new(),
        }
    }

    /// An empty document with initial global options.
    pub fn with_options<I, O>(config: RendererConfig, opts: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<PdfOption>,
    {
        let mut doc = Self::new(config);
        doc.add_options(opts);
        doc
    }

    // ── Accumulation ─────────────────────────────────────────────────────

    /// Append a body page. Pages render in insertion order.
    pub fn add_page(&mut self, page: Page) -> &mut Self {
        self.pages.push(page);
        self
    }

    pub fn add_pages(&mut self, pages: impl IntoIterator<Item = Page>) -> &mut Self {
        self.pages.extend(pages);
        self
    }

    /// Set or replace the cover page. It always renders first.
    pub fn set_cover(&mut self, cover: Page) -> &mut Self {
        self.cover = Some(cover);
        self
    }

    /// Append a global option after those already present.
    pub fn add_option(&mut self, opt: impl Into<PdfOption>) -> &mut Self {
        self.options.push(opt.into());
        self
    }

    pub fn add_options<I, O>(&mut self, opts: I) -> &mut Self
    where
        I: IntoIterator<Item = O>,
        O: Into<PdfOption>,
    {
        self.options.extend(opts.into_iter().map(Into::into));
        self
    }

    // ── Inspection ───────────────────────────────────────────────────────

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn cover(&self) -> Option<&Page> {
        self.cover.as_ref()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn options(&self) -> &[PdfOption] {
        &self.options
    }

    /// Pages handed to the renderer, cover included.
    pub fn page_count(&self) -> usize {
        self.pages.len() + usize::from(self.cover.is_some())
    }

    /// Strategy the next render will use for in-memory pages.
    pub fn delivery_mode(&self) -> DeliveryMode {
        let n = self.render_order().iter().filter(|p| p.is_in_memory()).count();
        DeliveryMode::for_in_memory_count(n)
    }

    fn render_order(&self) -> Vec<&Page> {
        self.cover.iter().chain(self.pages.iter()).collect()
    }

    // ── Rendering ────────────────────────────────────────────────────────

    /// Render the document and return the PDF bytes.
    ///
    /// # Errors
    /// [`RenderError::TempDir`], [`RenderError::TempWrite`],
    /// [`RenderError::Launch`] or [`RenderError::Process`]. Any temp
    /// directory created for this call is removed before returning, on
    /// success and on failure.
    pub fn render(&self) -> Result<Vec<u8>, RenderError> {
        self.render_output().map(|out| out.pdf)
    }

    /// Render the document, returning the PDF together with renderer stderr
    /// and stats.
    pub fn render_output(&self) -> Result<RenderOutput, RenderError> {
        let start = Instant::now();
        let order = self.render_order();
        info!(
            "Rendering {} pages with {}",
            order.len(),
            self.config.executable.display()
        );

        let delivery = delivery::plan(&order, &self.config.temp_root)?;
        let argv = args::build_args(
            &self.options,
            self.cover.as_ref(),
            &self.pages,
            delivery.paths(),
        );

        let captured = process::run(&self.config.executable, &argv, delivery.stdin())?;

        let mode = delivery.mode();
        let temp_files = delivery.temp_files();
        delivery.cleanup();

        if !captured.stderr.trim().is_empty() {
            debug!("Renderer stderr: {}", captured.stderr.trim());
        }

        let stats = RenderStats {
            delivery: mode,
            page_count: order.len(),
            temp_files,
            pdf_bytes: captured.stdout.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };
        if stats.pdf_bytes == 0 {
            warn!("Renderer succeeded but produced no output");
        }
        info!(
            "Rendered {} bytes in {}ms ({:?})",
            stats.pdf_bytes, stats.duration_ms, stats.delivery
        );

        Ok(RenderOutput {
            pdf: captured.stdout,
            stderr: captured.stderr,
            stats,
        })
    }

    /// Render, then write the PDF to `path`.
    ///
    /// The bytes go to a temp file next to `path` which is then renamed over
    /// it, so a failed render or write never leaves a partial file. Missing
    /// parent directories are created.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<RenderStats, RenderError> {
        let path = path.as_ref();
        let output = self.render_output()?;
        persist(path, &output.pdf)?;
        info!("Wrote {}", path.display());
        Ok(output.stats)
    }

    /// Render, then copy the PDF into `sink`.
    pub fn write_to(&self, mut sink: impl Write) -> Result<RenderStats, RenderError> {
        let output = self.render_output()?;
        sink.write_all(&output.pdf)
            .and_then(|()| sink.flush())
            .map_err(RenderError::OutputWrite)?;
        Ok(output.stats)
    }

    // ── Async wrappers ───────────────────────────────────────────────────

    /// [`Document::render`] on tokio's blocking pool.
    ///
    /// The document is cloned into the task, so it may be mutated again while
    /// the render runs.
    pub async fn render_async(&self) -> Result<Vec<u8>, RenderError> {
        self.render_output_async().await.map(|out| out.pdf)
    }

    /// [`Document::render_output`] on tokio's blocking pool.
    pub async fn render_output_async(&self) -> Result<RenderOutput, RenderError> {
        let doc = self.clone();
        tokio::task::spawn_blocking(move || doc.render_output())
            .await
            .map_err(|e| RenderError::Internal(format!("Render task panicked: {e}")))?
    }

    /// [`Document::write_to_file`] on tokio's blocking pool.
    pub async fn write_to_file_async(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<RenderStats, RenderError> {
        let doc = self.clone();
        let path = path.as_ref().to_path_buf();
        tokio::task::spawn_blocking(move || doc.write_to_file(path))
            .await
            .map_err(|e| RenderError::Internal(format!("Write task panicked: {e}")))?
    }
}

/// Atomic write: temp file in the target directory, then rename.
fn persist(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let file_err = |source: std::io::Error| RenderError::OutputFile {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(file_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(file_err)?;
    tmp.write_all(bytes).map_err(file_err)?;
    tmp.persist(path).map_err(|e| file_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSource;

    #[test]
    fn new_document_is_empty() {
        let doc = Document::new(RendererConfig::default());
        assert!(doc.cover().is_none());
        assert!(doc.pages().is_empty());
        assert!(doc.options().is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.delivery_mode(), DeliveryMode::Direct);
    }

    #[test]
    fn initial_options_come_first() {
        let mut doc = Document::with_options(RendererConfig::default(), ["--quiet"]);
        doc.add_option(PdfOption::grayscale());
        assert_eq!(
            doc.options(),
            &[PdfOption::from("--quiet"), PdfOption::grayscale()]
        );
    }

    #[test]
    fn pages_keep_insertion_order() {
        let mut doc = Document::default();
        doc.add_page(Page::from_path("1.html"))
            .add_pages([Page::from_path("2.html"), Page::from_path("3.html")]);
        let names: Vec<_> = doc.pages().iter().filter_map(Page::path).collect();
        assert_eq!(
            names,
            vec![Path::new("1.html"), Path::new("2.html"), Path::new("3.html")]
        );
    }

    #[test]
    fn cover_is_replaced() {
        let mut doc = Document::default();
        doc.set_cover(Page::from_path("old.html"));
        doc.set_cover(Page::from_html("<h1>new</h1>"));
        assert!(matches!(doc.cover().unwrap().source(), PageSource::Content(_)));
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn delivery_mode_counts_cover() {
        let mut doc = Document::default();
        doc.set_cover(Page::from_html("c"));
        assert_eq!(doc.delivery_mode(), DeliveryMode::Stdin);
        doc.add_page(Page::from_path("p.html"));
        assert_eq!(doc.delivery_mode(), DeliveryMode::Stdin);
        doc.add_page(Page::from_html("b"));
        assert_eq!(doc.delivery_mode(), DeliveryMode::TempFiles);
    }

    #[test]
    fn persist_creates_parents_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out.pdf");
        persist(&target, b"%PDF-1").unwrap();
        persist(&target, b"%PDF-2").unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-2");
        let leftovers = std::fs::read_dir(target.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn document_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document>();
    }
}
