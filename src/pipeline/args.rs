//! Argument assembly for the renderer invocation.
//!
//! ```text
//! [global opts...] ["cover" <cover-path> <cover-opts...>] [<page-path> <page-opts...>]... "-"
//! ```
//!
//! The trailing `-` makes the renderer write the PDF to its stdout.

use crate::option::{self, PdfOption};
use crate::page::Page;
use std::ffi::OsString;
use std::path::PathBuf;

/// Keyword introducing the cover page.
pub const COVER_KEYWORD: &str = "cover";

/// Output target meaning "write the PDF to stdout".
pub const STDOUT_TARGET: &str = "-";

/// Build the full renderer argv.
///
/// `resolved` holds one path per page in render order (cover first when
/// present), as produced by [`crate::pipeline::delivery::plan`].
pub fn build_args(
    global: &[PdfOption],
    cover: Option<&Page>,
    pages: &[Page],
    resolved: &[PathBuf],
) -> Vec<OsString> {
    debug_assert_eq!(resolved.len(), pages.len() + usize::from(cover.is_some()));

    let mut args: Vec<OsString> = option::expand(global)
        .into_iter()
        .map(OsString::from)
        .collect();
    let mut resolved = resolved.iter();

    if let Some(cover) = cover {
        args.push(COVER_KEYWORD.into());
        if let Some(path) = resolved.next() {
            args.push(path.into());
        }
        args.extend(cover.option_args().into_iter().map(OsString::from));
    }

    for (page, path) in pages.iter().zip(resolved) {
        args.push(path.into());
        args.extend(page.option_args().into_iter().map(OsString::from));
    }

    args.push(STDOUT_TARGET.into());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn empty_document_is_options_then_stdout() {
        let args = build_args(&[PdfOption::quiet()], None, &[], &[]);
        assert_eq!(strings(&args), vec!["--quiet", "-"]);
    }

    #[test]
    fn no_options_no_pages() {
        assert_eq!(strings(&build_args(&[], None, &[], &[])), vec!["-"]);
    }

    #[test]
    fn full_ordering() {
        let global = vec![PdfOption::page_size("A4"), PdfOption::grayscale()];
        let cover = Page::from_html("<h1/>").with_option("--zoom").with_option("2");
        let pages = vec![
            Page::from_path("one.html").with_option(PdfOption::flag("no-images")),
            Page::from_path("two.html"),
        ];
        let resolved = vec![
            PathBuf::from("-"),
            PathBuf::from("one.html"),
            PathBuf::from("two.html"),
        ];
        let args = build_args(&global, Some(&cover), &pages, &resolved);
        assert_eq!(
            strings(&args),
            vec![
                "--page-size",
                "A4",
                "--grayscale",
                "cover",
                "-",
                "--zoom",
                "2",
                "one.html",
                "--no-images",
                "two.html",
                "-",
            ]
        );
    }

    #[test]
    fn cover_without_body() {
        let cover = Page::from_path("cover.html");
        let args = build_args(&[], Some(&cover), &[], &[PathBuf::from("cover.html")]);
        assert_eq!(strings(&args), vec!["cover", "cover.html", "-"]);
    }
}
