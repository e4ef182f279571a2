//! ASC-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, ScrollError>;

/// Coarse error taxonomy. Every category is fatal for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid or missing configuration. Flag errors are reported by clap.
    Argument,
    /// No terminal, unusable geometry, signal mask/wait failures.
    Environment,
    /// File open/read failures.
    Io,
    /// Terminal output or clock formatting failures during a frame.
    Render,
}

/// Top-level error type for autoscroll.
#[derive(Debug, Error)]
pub enum ScrollError {
    #[error("[ASC-1002] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[ASC-1003] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[ASC-1004] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[ASC-2001] standard input is not a terminal")]
    NotATerminal,

    #[error("[ASC-2002] terminal geometry query failed: {source}")]
    Geometry {
        #[source]
        source: std::io::Error,
    },

    #[error("[ASC-2003] terminal too small: {rows} rows x {cols} columns")]
    TerminalTooSmall { rows: u16, cols: u16 },

    #[error("[ASC-2004] signal handling failure in {context}: {details}")]
    Signal {
        context: &'static str,
        details: String,
    },

    #[error("[ASC-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[ASC-4001] render failure in {context}: {source}")]
    Render {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ScrollError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "ASC-1002",
            Self::MissingConfig { .. } => "ASC-1003",
            Self::ConfigParse { .. } => "ASC-1004",
            Self::NotATerminal => "ASC-2001",
            Self::Geometry { .. } => "ASC-2002",
            Self::TerminalTooSmall { .. } => "ASC-2003",
            Self::Signal { .. } => "ASC-2004",
            Self::Io { .. } => "ASC-3001",
            Self::Render { .. } => "ASC-4001",
        }
    }

    /// Which part of the error taxonomy this failure belongs to.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. }
            | Self::MissingConfig { .. }
            | Self::ConfigParse { .. } => ErrorCategory::Argument,
            Self::NotATerminal
            | Self::Geometry { .. }
            | Self::TerminalTooSmall { .. }
            | Self::Signal { .. } => ErrorCategory::Environment,
            Self::Io { .. } => ErrorCategory::Io,
            Self::Render { .. } => ErrorCategory::Render,
        }
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Convenience constructor for terminal output failures.
    #[must_use]
    pub fn render(context: &'static str, source: std::io::Error) -> Self {
        Self::Render { context, source }
    }

    /// Signal mask, wait, or raise failure reported by the OS.
    #[cfg(unix)]
    #[must_use]
    pub fn signal(context: &'static str, errno: nix::Error) -> Self {
        Self::Signal {
            context,
            details: errno.to_string(),
        }
    }

    /// Whether the failure came from a closed output pipe.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        matches!(
            self,
            Self::Render { source, .. } if source.kind() == std::io::ErrorKind::BrokenPipe
        )
    }
}

impl From<toml::de::Error> for ScrollError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_variant() -> Vec<ScrollError> {
        vec![
            ScrollError::InvalidConfig {
                details: String::new(),
            },
            ScrollError::MissingConfig {
                path: PathBuf::new(),
            },
            ScrollError::ConfigParse {
                context: "",
                details: String::new(),
            },
            ScrollError::NotATerminal,
            ScrollError::Geometry {
                source: std::io::Error::other("test"),
            },
            ScrollError::TerminalTooSmall { rows: 1, cols: 80 },
            ScrollError::Signal {
                context: "",
                details: String::new(),
            },
            ScrollError::Io {
                path: PathBuf::new(),
                source: std::io::Error::other("test"),
            },
            ScrollError::Render {
                context: "",
                source: std::io::Error::other("test"),
            },
        ]
    }

    #[test]
    fn error_codes_are_unique() {
        let errors = every_variant();
        let codes: Vec<&str> = errors.iter().map(ScrollError::code).collect();
        let unique: std::collections::HashSet<&&str> = codes.iter().collect();
        assert_eq!(
            codes.len(),
            unique.len(),
            "error codes must be unique: {codes:?}"
        );
    }

    #[test]
    fn display_includes_code() {
        for err in every_variant() {
            let msg = err.to_string();
            assert!(
                msg.contains(err.code()),
                "display should contain error code: {msg}"
            );
        }
    }

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(
            ScrollError::InvalidConfig {
                details: "interval_secs 0".to_string()
            }
            .category(),
            ErrorCategory::Argument
        );
        assert_eq!(
            ScrollError::NotATerminal.category(),
            ErrorCategory::Environment
        );
        assert_eq!(
            ScrollError::io("/tmp/x", std::io::Error::other("boom")).category(),
            ErrorCategory::Io
        );
        assert_eq!(
            ScrollError::render("status", std::io::Error::other("boom")).category(),
            ErrorCategory::Render
        );
    }

    #[test]
    fn io_convenience_constructor() {
        let err = ScrollError::io(
            "/tmp/test.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.code(), "ASC-3001");
        assert!(err.to_string().contains("/tmp/test.txt"));
    }

    #[test]
    fn broken_pipe_is_detected_only_for_render_errors() {
        let pipe = || std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(ScrollError::render("body", pipe()).is_broken_pipe());
        assert!(!ScrollError::io("/tmp/x", pipe()).is_broken_pipe());
        assert!(!ScrollError::render("body", std::io::Error::other("x")).is_broken_pipe());
    }

    #[test]
    fn from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= invalid").unwrap_err();
        let err: ScrollError = toml_err.into();
        assert_eq!(err.code(), "ASC-1004");
    }

    #[cfg(unix)]
    #[test]
    fn signal_constructor_keeps_context() {
        let err = ScrollError::signal("sigwait", nix::Error::EINTR);
        assert!(err.to_string().contains("sigwait"));
        assert_eq!(err.code(), "ASC-2004");
        assert_eq!(err.category(), ErrorCategory::Environment);
    }
}
