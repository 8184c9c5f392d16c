//! Renderer configuration.
//!
//! Two knobs are consumed by every render: which executable to run and where
//! per-render temp directories are created. Both live in [`RendererConfig`],
//! handed to [`crate::Document::new`] and shared by all renders of that
//! document. There is no hidden process-wide state; two documents with
//! different configs can render side by side.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default renderer binary, resolved through `PATH`.
pub const DEFAULT_EXECUTABLE: &str = "wkhtmltopdf";

/// Environment variable overriding the renderer binary.
pub const ENV_EXECUTABLE: &str = "WKPDF_EXECUTABLE";

/// Environment variable overriding the temp root.
pub const ENV_TEMP_DIR: &str = "WKPDF_TEMP_DIR";

/// Configuration for the external renderer.
///
/// Built via [`RendererConfig::builder()`], [`RendererConfig::from_env()`] or
/// [`RendererConfig::default()`].
///
/// # Example
/// ```rust
/// use wkpdf::RendererConfig;
///
/// let config = RendererConfig::builder()
///     .executable("/usr/local/bin/wkhtmltopdf")
///     .temp_root("/var/tmp")
///     .build()
///     .unwrap();
/// assert_eq!(config.temp_root, std::path::PathBuf::from("/var/tmp"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Path or bare name of the renderer binary. Default: `wkhtmltopdf`.
    pub executable: PathBuf,

    /// Directory under which unique per-render temp directories are created
    /// when two or more pages come from memory. Default: the OS temp dir.
    pub temp_root: PathBuf,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            temp_root: std::env::temp_dir(),
        }
    }
}

impl RendererConfig {
    /// Create a new builder for `RendererConfig`.
    pub fn builder() -> RendererConfigBuilder {
        RendererConfigBuilder {
            config: Self::default(),
        }
    }

    /// Defaults, overridden by `WKPDF_EXECUTABLE` / `WKPDF_TEMP_DIR` when set
    /// and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(exe) = non_empty_var(ENV_EXECUTABLE) {
            config.executable = PathBuf::from(exe);
        }
        if let Some(dir) = non_empty_var(ENV_TEMP_DIR) {
            config.temp_root = PathBuf::from(dir);
        }
        config
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Builder for [`RendererConfig`].
#[derive(Debug)]
pub struct RendererConfigBuilder {
    config: RendererConfig,
}

impl RendererConfigBuilder {
    pub fn executable(mut self, exe: impl Into<PathBuf>) -> Self {
        self.config.executable = exe.into();
        self
    }

    pub fn temp_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_root = dir.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RendererConfig, RenderError> {
        let c = &self.config;
        if c.executable.as_os_str().is_empty() {
            return Err(RenderError::InvalidConfig(
                "Renderer executable must not be empty".into(),
            ));
        }
        if c.temp_root.as_os_str().is_empty() {
            return Err(RenderError::InvalidConfig(
                "Temp root must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_wkhtmltopdf_and_os_temp() {
        let c = RendererConfig::default();
        assert_eq!(c.executable, PathBuf::from("wkhtmltopdf"));
        assert_eq!(c.temp_root, std::env::temp_dir());
    }

    #[test]
    fn builder_overrides() {
        let c = RendererConfig::builder()
            .executable("/opt/wk/bin/wkhtmltopdf")
            .temp_root("/scratch")
            .build()
            .unwrap();
        assert_eq!(c.executable, PathBuf::from("/opt/wk/bin/wkhtmltopdf"));
        assert_eq!(c.temp_root, PathBuf::from("/scratch"));
    }

    #[test]
    fn builder_rejects_empty_executable() {
        let err = RendererConfig::builder().executable("").build().unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_empty_temp_root() {
        let err = RendererConfig::builder().temp_root("").build().unwrap_err();
        assert!(err.to_string().contains("Temp root"));
    }

    #[test]
    fn config_is_serialisable() {
        let c = RendererConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("wkhtmltopdf"));
        let back: RendererConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
