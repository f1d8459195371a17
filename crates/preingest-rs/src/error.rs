// crates/preingest-rs/src/error.rs

use preingest_rs_metadata::MetadataError;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while discovering chains or running a pass over a collection.
#[derive(Debug, Error)]
pub enum PreingestError {
    /// The folder layout does not match the expected archive structure.
    #[error("Structure error at {path:?}: {reason}")]
    Structure { path: PathBuf, reason: String },

    /// A binary or folder has no sidecar where the naming convention expects one.
    #[error("Missing sidecar: {path:?}")]
    MissingSidecar { path: PathBuf },

    /// A sidecar exists but could not be parsed.
    #[error("Malformed metadata in {path:?}: {source}")]
    MalformedMetadata {
        path: PathBuf,
        #[source]
        source: MetadataError,
    },

    /// A sidecar parsed, but could not be converted, written or mutated.
    #[error("Metadata error in {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: MetadataError,
    },

    /// The binary described by a leaf sidecar is absent.
    #[error("Binary not found: {path:?}")]
    BinaryNotFound { path: PathBuf },

    /// No DROID format table could be located.
    #[error("No format identification table found in {dir:?}")]
    FormatTableMissing { dir: PathBuf },

    /// The format table holds no row for the binary.
    #[error("No format match for {path:?}")]
    NoFormatMatch { path: PathBuf },

    /// The format table could not be read.
    #[error("CSV error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is unreadable or invalid.
    #[error("Invalid configuration {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Flat classification of `PreingestError`, used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Structure,
    MissingSidecar,
    MalformedMetadata,
    MissingRequiredField,
    UnsupportedShape,
    BinaryNotFound,
    NoFormatMatch,
    FormatTableMissing,
    Io,
    Config,
}

impl PreingestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PreingestError::Structure { .. } => ErrorKind::Structure,
            PreingestError::MissingSidecar { .. } => ErrorKind::MissingSidecar,
            PreingestError::MalformedMetadata { .. } => ErrorKind::MalformedMetadata,
            PreingestError::Metadata { source, .. } => match source {
                MetadataError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
                MetadataError::UnsupportedShape { .. } => ErrorKind::UnsupportedShape,
                _ => ErrorKind::MalformedMetadata,
            },
            PreingestError::BinaryNotFound { .. } => ErrorKind::BinaryNotFound,
            PreingestError::FormatTableMissing { .. } => ErrorKind::FormatTableMissing,
            PreingestError::NoFormatMatch { .. } => ErrorKind::NoFormatMatch,
            PreingestError::Csv { .. } => ErrorKind::FormatTableMissing,
            PreingestError::Io { .. } => ErrorKind::Io,
            PreingestError::Config { .. } => ErrorKind::Config,
        }
    }

    /// The file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            PreingestError::Structure { path, .. }
            | PreingestError::MissingSidecar { path }
            | PreingestError::MalformedMetadata { path, .. }
            | PreingestError::Metadata { path, .. }
            | PreingestError::BinaryNotFound { path }
            | PreingestError::NoFormatMatch { path }
            | PreingestError::Csv { path, .. }
            | PreingestError::Io { path, .. }
            | PreingestError::Config { path, .. } => path,
            PreingestError::FormatTableMissing { dir } => dir,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PreingestError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unsupported(
        path: impl Into<PathBuf>,
        dialect: &'static str,
        reason: &'static str,
    ) -> Self {
        PreingestError::Metadata {
            path: path.into(),
            source: MetadataError::UnsupportedShape { dialect, reason },
        }
    }
}

pub type Result<T> = std::result::Result<T, PreingestError>;
