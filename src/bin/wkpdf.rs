//! CLI binary for wkpdf.
//!
//! A thin shim over the library crate that maps CLI flags to a `Document`
//! and writes the rendered PDF to a file or stdout.

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wkpdf::config::{ENV_EXECUTABLE, ENV_TEMP_DIR};
use wkpdf::{Document, DocumentManifest, Page, RenderError, RenderStats, RendererConfig};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

/// Source argument meaning "read this page's HTML from stdin".
const STDIN_SOURCE: &str = "-";

const AFTER_HELP: &str = r#"EXAMPLES:
  # Two files into one PDF
  wkpdf intro.html chapter1.html -o book.pdf

  # Cover page plus a page piped from another program
  render-report | wkpdf --cover cover.html - -o report.pdf

  # Global renderer options (repeat -O for each token)
  wkpdf -O --page-size -O A4 -O --grayscale page.html > page.pdf

  # Whole document described in a JSON job file
  wkpdf --manifest job.json -o out.pdf

MANIFEST FORMAT:
  {
    "options": ["--page-size", "A4"],
    "cover":   { "html": "<h1>Cover</h1>" },
    "pages":   [ { "path": "report.html" },
                 { "html": "<p>x</p>", "options": ["--zoom", "1.2"] } ]
  }
  Relative paths are resolved against the manifest's directory.
  Options and pages given on the command line are appended to the manifest's;
  a --cover given on the command line replaces the manifest's cover.

ENVIRONMENT VARIABLES:
  WKPDF_EXECUTABLE  Renderer binary (default: wkhtmltopdf on PATH)
  WKPDF_TEMP_DIR    Root for per-render temp directories (default: OS temp dir)
  WKPDF_OUTPUT      Default output file
  RUST_LOG          Override log filtering (e.g. wkpdf=debug)
"#;

/// Compose a PDF from HTML pages using wkhtmltopdf.
#[derive(Parser, Debug)]
#[command(
    name = "wkpdf",
    version,
    about = "Compose a PDF from HTML pages using wkhtmltopdf",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Page sources in order: file paths, URLs, or `-` for HTML on stdin.
    pages: Vec<String>,

    /// Cover page source (path, URL, or `-`). Always rendered first.
    #[arg(long)]
    cover: Option<String>,

    /// JSON job file describing options, cover and pages.
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Global renderer option token, passed verbatim. Repeatable.
    #[arg(short = 'O', long = "option", value_name = "TOKEN", allow_hyphen_values = true)]
    options: Vec<String>,

    /// Write the PDF to this file instead of stdout.
    #[arg(short, long, env = "WKPDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Renderer executable.
    #[arg(long, env = ENV_EXECUTABLE)]
    executable: Option<PathBuf>,

    /// Root directory for per-render temp directories.
    #[arg(long, env = ENV_TEMP_DIR)]
    temp_dir: Option<PathBuf>,

    /// Print render stats as JSON on stderr when done.
    #[arg(long)]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "WKPDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "WKPDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "WKPDF_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.verbose;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build document ───────────────────────────────────────────────────
    let config = build_config(&cli)?;
    let doc = build_document(&cli, config)?;
    if doc.page_count() == 0 {
        bail!("Nothing to render: give at least one page, a --cover, or a --manifest");
    }

    // ── Render ───────────────────────────────────────────────────────────
    let spinner = show_progress.then(|| spinner(doc.page_count()));

    let result = match cli.output {
        Some(ref path) => doc.write_to_file_async(path).await,
        None => render_to_stdout(&doc).await,
    };

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let stats = result.context("Rendering failed")?;

    // ── Summary ──────────────────────────────────────────────────────────
    if cli.json {
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
        );
    } else if !cli.quiet {
        print_summary(&stats, cli.output.as_deref());
    }

    Ok(())
}

/// Map CLI args to `RendererConfig`.
fn build_config(cli: &Cli) -> Result<RendererConfig> {
    let mut builder = RendererConfig::builder();
    if let Some(ref exe) = cli.executable {
        builder = builder.executable(exe);
    }
    if let Some(ref dir) = cli.temp_dir {
        builder = builder.temp_root(dir);
    }
    builder.build().context("Invalid configuration")
}

/// Manifest first (if any), then CLI options, cover and pages on top.
fn build_document(cli: &Cli, config: RendererConfig) -> Result<Document> {
    let stdin_uses = cli
        .pages
        .iter()
        .chain(cli.cover.iter())
        .filter(|s| *s == STDIN_SOURCE)
        .count();
    if stdin_uses > 1 {
        bail!("stdin (`-`) can supply only one page, got {stdin_uses}");
    }

    let mut doc = match cli.manifest {
        Some(ref path) => {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            DocumentManifest::from_file(path)
                .and_then(|m| m.into_document(config, base))
                .with_context(|| format!("Failed to load manifest {}", path.display()))?
        }
        None => Document::new(config),
    };

    doc.add_options(cli.options.iter().map(String::as_str));

    if let Some(ref cover) = cli.cover {
        doc.set_cover(page_from_source(cover)?);
    }
    for source in &cli.pages {
        doc.add_page(page_from_source(source)?);
    }

    Ok(doc)
}

fn page_from_source(source: &str) -> Result<Page> {
    if source == STDIN_SOURCE {
        Page::from_reader(io::stdin().lock()).context("Failed to read page HTML from stdin")
    } else {
        Ok(Page::from_path(source))
    }
}

async fn render_to_stdout(doc: &Document) -> Result<RenderStats, RenderError> {
    let output = doc.render_output_async().await?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(&output.pdf)
        .and_then(|()| handle.flush())
        .map_err(RenderError::OutputWrite)?;
    Ok(output.stats)
}

fn spinner(pages: usize) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_message(format!("Rendering {pages} pages…"));
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn print_summary(stats: &RenderStats, output: Option<&Path>) {
    let target = output
        .map(|p| bold(&p.display().to_string()))
        .unwrap_or_else(|| "stdout".to_string());
    eprintln!(
        "{}  {} pages  {} bytes  {}ms  →  {}",
        green("✔"),
        stats.page_count,
        stats.pdf_bytes,
        stats.duration_ms,
        target,
    );
    eprintln!(
        "   {}",
        dim(&format!(
            "delivery: {:?}, temp files: {}",
            stats.delivery, stats.temp_files
        ))
    );
}
