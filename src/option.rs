//! Renderer command-line options.
//!
//! [`PdfOption`] turns a flag into the argv tokens handed to the renderer.
//! It does not try to enumerate wkhtmltopdf's flag set; the few named
//! constructors below cover the flags almost every document sets, and
//! anything else goes through [`PdfOption::flag`], [`PdfOption::value`] or
//! raw tokens.
//!
//! Order is preserved exactly as options are added. Some renderer flags are
//! position-sensitive (global vs. per-page); callers own that ordering.

use serde::{Deserialize, Serialize};

/// A single renderer option, expanded into one or more argv tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PdfOption {
    /// A switch without a value: `--grayscale`.
    Flag(String),
    /// A switch followed by one value: `--page-size A4`.
    Value(String, String),
    /// Tokens passed through verbatim.
    Raw(Vec<String>),
}

impl PdfOption {
    pub fn flag(name: impl Into<String>) -> Self {
        PdfOption::Flag(name.into())
    }

    pub fn value(name: impl Into<String>, value: impl Into<String>) -> Self {
        PdfOption::Value(name.into(), value.into())
    }

    pub fn raw<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PdfOption::Raw(tokens.into_iter().map(Into::into).collect())
    }

    // ── Common flags ─────────────────────────────────────────────────────

    /// `--page-size <size>`, e.g. `A4`, `Letter`.
    pub fn page_size(size: impl Into<String>) -> Self {
        Self::value("page-size", size)
    }

    /// `--orientation Portrait|Landscape`.
    pub fn orientation(orientation: impl Into<String>) -> Self {
        Self::value("orientation", orientation)
    }

    /// `--title <title>`.
    pub fn title(title: impl Into<String>) -> Self {
        Self::value("title", title)
    }

    /// `--grayscale`.
    pub fn grayscale() -> Self {
        Self::flag("grayscale")
    }

    /// `--quiet`: suppress the renderer's progress chatter on stderr.
    pub fn quiet() -> Self {
        Self::flag("quiet")
    }

    /// `--margin-top`, `--margin-right`, `--margin-bottom`, `--margin-left`,
    /// all set to the same unit value (e.g. `"10mm"`).
    pub fn margins(margin: impl Into<String>) -> Self {
        let m = margin.into();
        Self::Raw(vec![
            "--margin-top".into(),
            m.clone(),
            "--margin-right".into(),
            m.clone(),
            "--margin-bottom".into(),
            m.clone(),
            "--margin-left".into(),
            m,
        ])
    }

    /// Expand into argv tokens.
    pub fn to_args(&self) -> Vec<String> {
        match self {
            PdfOption::Flag(name) => vec![switch(name)],
            PdfOption::Value(name, value) => vec![switch(name), value.clone()],
            PdfOption::Raw(tokens) => tokens.clone(),
        }
    }
}

/// A single verbatim token. `"--zoom".into()` is `Raw(["--zoom"])`.
impl From<&str> for PdfOption {
    fn from(token: &str) -> Self {
        PdfOption::Raw(vec![token.to_string()])
    }
}

impl From<String> for PdfOption {
    fn from(token: String) -> Self {
        PdfOption::Raw(vec![token])
    }
}

/// Names already carrying a dash prefix (`-g`, `--zoom`) are kept as-is.
fn switch(name: &str) -> String {
    if name.starts_with('-') {
        name.to_string()
    } else {
        format!("--{name}")
    }
}

/// Flatten options into argv tokens, preserving order.
pub(crate) fn expand<'a>(opts: impl IntoIterator<Item = &'a PdfOption>) -> Vec<String> {
    opts.into_iter().flat_map(PdfOption::to_args).collect()
}
