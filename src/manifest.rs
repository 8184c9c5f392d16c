//! JSON job files describing a whole document.
//!
//! ```json
//! {
//!   "options": ["--page-size", "A4"],
//!   "cover":   { "html": "<h1>Cover</h1>" },
//!   "pages":   [
//!     { "path": "report.html" },
//!     { "html": "<p>appendix</p>", "options": ["--zoom", "1.2"] }
//!   ]
//! }
//! ```
//!
//! Options are raw argv tokens. Every page names exactly one of `path` or
//! `html`. Relative paths resolve against the base directory passed to
//! [`DocumentManifest::into_document`]; URLs are left alone.

use crate::config::RendererConfig;
use crate::document::Document;
use crate::error::RenderError;
use crate::option::PdfOption;
use crate::page::Page;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A document as described in a job file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentManifest {
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub cover: Option<PageSpec>,
    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

/// One page in a job file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl DocumentManifest {
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        serde_json::from_str(json).map_err(|e| RenderError::InvalidManifest(e.to_string()))
    }

    /// Read and parse a job file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| RenderError::ManifestRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// Build a [`Document`], resolving relative page paths against `base_dir`.
    pub fn into_document(
        self,
        config: RendererConfig,
        base_dir: &Path,
    ) -> Result<Document, RenderError> {
        let mut doc = Document::with_options(config, self.options);

        if let Some(cover) = self.cover {
            doc.set_cover(cover.into_page(base_dir, "cover")?);
        }
        for (i, spec) in self.pages.into_iter().enumerate() {
            doc.add_page(spec.into_page(base_dir, &format!("page {}", i + 1))?);
        }

        debug!(
            "Manifest → {} pages, {} global options",
            doc.page_count(),
            doc.options().len()
        );
        Ok(doc)
    }
}

impl PageSpec {
    fn into_page(self, base_dir: &Path, label: &str) -> Result<Page, RenderError> {
        let page = match (self.path, self.html) {
            (Some(path), None) => Page::from_path(resolve(base_dir, path)),
            (None, Some(html)) => Page::from_bytes(html.into_bytes()),
            (Some(_), Some(_)) => {
                return Err(RenderError::InvalidManifest(format!(
                    "{label}: set either \"path\" or \"html\", not both"
                )))
            }
            (None, None) => {
                return Err(RenderError::InvalidManifest(format!(
                    "{label}: one of \"path\" or \"html\" is required"
                )))
            }
        };
        Ok(page.with_options(self.options.into_iter().map(PdfOption::from)))
    }
}

fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() || is_url(&path) {
        path
    } else {
        base_dir.join(path)
    }
}

fn is_url(path: &Path) -> bool {
    let s = path.to_string_lossy();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("file://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageSource;

    const JOB: &str = r#"{
        "options": ["--page-size", "A4"],
        "cover": { "html": "<h1>Cover</h1>" },
        "pages": [
            { "path": "report.html" },
            { "path": "https://example.com/status" },
            { "html": "<p>appendix</p>", "options": ["--zoom", "1.2"] }
        ]
    }"#;

    #[test]
    fn builds_document_in_order() {
        let doc = DocumentManifest::from_json(JOB)
            .unwrap()
            .into_document(RendererConfig::default(), Path::new("/jobs"))
            .unwrap();

        assert_eq!(
            doc.options(),
            &[PdfOption::from("--page-size"), PdfOption::from("A4")]
        );
        assert_eq!(
            doc.cover().unwrap().source(),
            &PageSource::Content(b"<h1>Cover</h1>".to_vec())
        );
        let pages = doc.pages();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].path(), Some(Path::new("/jobs/report.html")));
        assert_eq!(pages[1].path(), Some(Path::new("https://example.com/status")));
        assert_eq!(pages[2].content(), Some(&b"<p>appendix</p>"[..]));
        assert_eq!(pages[2].options().len(), 2);
    }

    #[test]
    fn empty_manifest_is_valid() {
        let m = DocumentManifest::from_json("{}").unwrap();
        assert_eq!(m, DocumentManifest::default());
    }

    #[test]
    fn page_needs_exactly_one_source() {
        let both = r#"{ "pages": [ { "path": "a.html", "html": "<p/>" } ] }"#;
        let err = DocumentManifest::from_json(both)
            .unwrap()
            .into_document(RendererConfig::default(), Path::new("."))
            .unwrap_err();
        assert!(err.to_string().contains("page 1"), "got: {err}");

        let neither = r#"{ "cover": { "options": ["--zoom", "2"] } }"#;
        let err = DocumentManifest::from_json(neither)
            .unwrap()
            .into_document(RendererConfig::default(), Path::new("."))
            .unwrap_err();
        assert!(err.to_string().contains("cover"), "got: {err}");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = DocumentManifest::from_json(r#"{ "pagez": [] }"#).unwrap_err();
        assert!(matches!(err, RenderError::InvalidManifest(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = DocumentManifest::from_file("/no/such/job.json").unwrap_err();
        assert!(matches!(err, RenderError::ManifestRead { .. }));
    }
}
