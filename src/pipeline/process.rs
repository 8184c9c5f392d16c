//! Renderer invocation: spawn the executable and capture its output.
//!
//! stdout is the rendered PDF and stderr is kept verbatim for error reports.
//! Both pipes are drained concurrently by `wait_with_output`. When a page is
//! piped, its bytes are written from a scoped thread so a renderer that
//! starts emitting output before it has read all of stdin cannot deadlock
//! against us.
//!
//! There is no timeout. A hung renderer blocks the caller.

use crate::error::RenderError;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Captured result of a successful renderer run.
#[derive(Debug, Clone, Default)]
pub struct Captured {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

/// Run `executable` with `args`, feeding `stdin` when given.
///
/// # Errors
/// - [`RenderError::Launch`] if the process cannot be started
/// - [`RenderError::Process`] if it exits unsuccessfully
pub fn run(
    executable: &Path,
    args: &[OsString],
    stdin: Option<&[u8]>,
) -> Result<Captured, RenderError> {
    debug!("Running {} {:?}", executable.display(), args);

    let mut child = Command::new(executable)
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| RenderError::Launch {
            executable: executable.to_path_buf(),
            source: e,
        })?;

    let output = match (stdin, child.stdin.take()) {
        (Some(bytes), Some(mut pipe)) => std::thread::scope(|s| {
            let writer = s.spawn(move || {
                let res = pipe.write_all(bytes);
                drop(pipe);
                res
            });
            let output = child.wait_with_output();
            match writer.join() {
                Ok(Ok(())) => debug!("Piped {} bytes to renderer stdin", bytes.len()),
                // The exit status decides; a renderer that fails early closes stdin.
                Ok(Err(e)) => warn!("Writing renderer stdin failed: {}", e),
                Err(_) => warn!("Renderer stdin writer panicked"),
            }
            output
        }),
        _ => child.wait_with_output(),
    }
    .map_err(|e| RenderError::Internal(format!("Failed to collect renderer output: {e}")))?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(RenderError::Process {
            code: output.status.code(),
            stderr,
        });
    }

    debug!(
        "Renderer exited OK: {} bytes stdout, {} bytes stderr",
        output.stdout.len(),
        stderr.len()
    );

    Ok(Captured {
        stdout: output.stdout,
        stderr,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str, extra: &[&str]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-c".into(), script.into(), "renderer".into()];
        args.extend(extra.iter().map(OsString::from));
        args
    }

    #[test]
    fn captures_stdout() {
        let out = run(Path::new("sh"), &sh("printf '%s|' \"$@\"", &["a", "b c"]), None).unwrap();
        assert_eq!(out.stdout, b"a|b c|");
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn feeds_stdin() {
        let out = run(Path::new("sh"), &sh("cat", &[]), Some(&b"<html></html>"[..])).unwrap();
        assert_eq!(out.stdout, b"<html></html>");
    }

    #[test]
    fn stdin_is_empty_when_unbound() {
        let out = run(Path::new("sh"), &sh("cat; printf end", &[]), None).unwrap();
        assert_eq!(out.stdout, b"end");
    }

    #[test]
    fn large_stdin_does_not_deadlock() {
        let big = vec![b'x'; 4 * 1024 * 1024];
        let out = run(Path::new("sh"), &sh("cat", &[]), Some(big.as_slice())).unwrap();
        assert_eq!(out.stdout.len(), big.len());
    }

    #[test]
    fn non_zero_exit_carries_stderr() {
        let err = run(Path::new("sh"), &sh("echo 'Error: boom' >&2; exit 3", &[]), None)
            .unwrap_err();
        match err {
            RenderError::Process { code, stderr } => {
                assert_eq!(code, Some(3));
                assert!(stderr.contains("Error: boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn early_exit_with_unread_stdin_is_reported_by_status() {
        let big = vec![b'x'; 1024 * 1024];
        let err = run(Path::new("sh"), &sh("exit 1", &[]), Some(big.as_slice())).unwrap_err();
        assert!(matches!(err, RenderError::Process { code: Some(1), .. }));
    }

    #[test]
    fn missing_executable_is_launch_error() {
        let err = run(Path::new("/definitely/not/a/renderer"), &[], None).unwrap_err();
        assert!(matches!(err, RenderError::Launch { .. }), "got: {err}");
    }
}
