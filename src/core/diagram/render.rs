//! Rendering of the DOT diagram through the Graphviz `dot` executable
//!
//! Graphviz is an optional external tool: callers are expected to check
//! [`GraphvizRenderer::is_available`] and skip rendering with a warning when
//! it is missing.

use crate::core::error::{CurriculumError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;

/// Output formats supported by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Portable Document Format
    #[default]
    Pdf,
    /// Scalable Vector Graphics
    Svg,
    /// Raster image
    Png,
}

impl RenderFormat {
    /// File extension (also the `-T` argument of `dot`)
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(format!("Unknown render format: {s}")),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Wrapper around the Graphviz `dot` command
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    command: String,
}

impl GraphvizRenderer {
    /// Renderer invoking `command` (usually `dot`)
    #[must_use]
    pub fn new(command: &str) -> Self {
        let command = if command.trim().is_empty() {
            "dot"
        } else {
            command.trim()
        };
        Self {
            command: command.to_owned(),
        }
    }

    /// Command this renderer runs
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether `dot -V` runs successfully
    #[must_use]
    pub fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("-V")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    /// Path of the rendered file next to `diagram`
    #[must_use]
    pub fn output_path(diagram: &Path, format: RenderFormat) -> PathBuf {
        diagram.with_extension(format.extension())
    }

    /// Render `diagram` to `output` in `format`
    ///
    /// # Errors
    /// Returns [`CurriculumError::Render`] when `dot` cannot be started or exits
    /// unsuccessfully; its stderr is included in the message.
    pub fn render(&self, diagram: &Path, output: &Path, format: RenderFormat) -> Result<()> {
        let result = Command::new(&self.command)
            .arg(format!("-T{}", format.extension()))
            .arg(diagram)
            .arg("-o")
            .arg(output)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| CurriculumError::Render(format!("cannot run '{}': {e}", self.command)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(CurriculumError::Render(format!(
                "'{}' exited with {}: {}",
                self.command,
                result.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new("dot")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("PDF".parse::<RenderFormat>(), Ok(RenderFormat::Pdf));
        assert_eq!("svg".parse::<RenderFormat>(), Ok(RenderFormat::Svg));
        assert!("jpeg".parse::<RenderFormat>().is_err());
    }

    #[test]
    fn test_output_path() {
        let out = GraphvizRenderer::output_path(Path::new("out/diagram_bak_2025_ua.gv"), RenderFormat::Pdf);
        assert_eq!(out, PathBuf::from("out/diagram_bak_2025_ua.pdf"));
    }

    #[test]
    fn test_blank_command_falls_back_to_dot() {
        assert_eq!(GraphvizRenderer::new("  ").command(), "dot");
        assert_eq!(GraphvizRenderer::new("/usr/bin/dot").command(), "/usr/bin/dot");
    }

    #[test]
    fn test_missing_executable() {
        let renderer = GraphvizRenderer::new("definitely-not-graphviz-dot");
        assert!(!renderer.is_available());
        let err = renderer
            .render(Path::new("in.gv"), Path::new("out.pdf"), RenderFormat::Pdf)
            .unwrap_err();
        assert!(matches!(err, CurriculumError::Render(_)));
    }
}
