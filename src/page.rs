//! Page sources.
//!
//! A [`Page`] is either backed by a file the renderer can open itself, or by
//! HTML bytes held in memory. In-memory pages have no path of their own; the
//! render pipeline decides per call whether to pipe one through stdin or
//! write several to temp files. That decision is made on a resolved view, so
//! a `Page` is never modified by rendering and can be reused across
//! documents and renders.

use crate::option::{self, PdfOption};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Where a page's HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// A file path or URL passed to the renderer unchanged.
    Path(PathBuf),
    /// HTML held in memory.
    Content(Vec<u8>),
}

/// One page source plus its page-specific options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    source: PageSource,
    options: Vec<PdfOption>,
}

impl Page {
    /// A page the renderer reads from `path` (or URL) directly.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(PageSource::Path(path.into()))
    }

    /// A page whose HTML is already in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(PageSource::Content(bytes.into()))
    }

    pub fn from_html(html: impl AsRef<str>) -> Self {
        Self::from_bytes(html.as_ref().as_bytes())
    }

    /// Drain `reader` into memory.
    pub fn from_reader(mut reader: impl Read) -> std::io::Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(Self::from_bytes(buf))
    }

    fn new(source: PageSource) -> Self {
        Self {
            source,
            options: Vec::new(),
        }
    }

    /// Append one page-specific option.
    pub fn with_option(mut self, opt: impl Into<PdfOption>) -> Self {
        self.options.push(opt.into());
        self
    }

    /// Append page-specific options in order.
    pub fn with_options<I, O>(mut self, opts: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<PdfOption>,
    {
        self.options.extend(opts.into_iter().map(Into::into));
        self
    }

    pub fn source(&self) -> &PageSource {
        &self.source
    }

    pub fn options(&self) -> &[PdfOption] {
        &self.options
    }

    /// True when the HTML is held in memory rather than at a path.
    pub fn is_in_memory(&self) -> bool {
        matches!(self.source, PageSource::Content(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            PageSource::Path(p) => Some(p),
            PageSource::Content(_) => None,
        }
    }

    pub fn content(&self) -> Option<&[u8]> {
        match &self.source {
            PageSource::Path(_) => None,
            PageSource::Content(bytes) => Some(bytes),
        }
    }

    pub(crate) fn option_args(&self) -> Vec<String> {
        option::expand(&self.options)
    }
}
