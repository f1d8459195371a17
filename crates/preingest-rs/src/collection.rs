// crates/preingest-rs/src/collection.rs

//! Collection layout: archive-root selection, sidecar naming and the scan
//! that splits a tree into binaries and sidecars.

use crate::error::{PreingestError, Result};
use log::{debug, warn};
use preingest_rs_metadata::Dialect;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Every sidecar suffix of every dialect. Files ending in one of these are
/// never treated as binaries.
pub const SIDECAR_SUFFIXES: [&str; 4] = [".bestand.mdto.xml", ".mdto.xml", ".metadata", ".opex"];

/// The sidecar naming convention of one dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidecarConvention {
    ToPx,
    Mdto,
    Opex,
}

impl SidecarConvention {
    pub fn dialect(&self) -> Dialect {
        match self {
            SidecarConvention::ToPx => Dialect::ToPx,
            SidecarConvention::Mdto => Dialect::Mdto,
            SidecarConvention::Opex => Dialect::Opex,
        }
    }

    /// Suffix appended to a binary's full file name.
    pub fn leaf_suffix(&self) -> &'static str {
        match self {
            SidecarConvention::ToPx => ".metadata",
            SidecarConvention::Mdto => ".bestand.mdto.xml",
            SidecarConvention::Opex => ".opex",
        }
    }

    /// Suffix appended to a folder's name, inside that folder.
    pub fn folder_suffix(&self) -> &'static str {
        match self {
            SidecarConvention::ToPx => ".metadata",
            SidecarConvention::Mdto => ".mdto.xml",
            SidecarConvention::Opex => ".opex",
        }
    }

    /// `<dir>/<binary><leaf suffix>`
    pub fn leaf_sidecar(&self, binary: &Path) -> PathBuf {
        append_suffix(binary, self.leaf_suffix())
    }

    /// `<dir>/<dirname><folder suffix>`
    pub fn folder_sidecar(&self, dir: &Path) -> Option<PathBuf> {
        let name = dir.file_name()?;
        let mut file_name = OsString::from(name);
        file_name.push(self.folder_suffix());
        Some(dir.join(file_name))
    }
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(suffix))
}

/// True for any file following one of the sidecar conventions.
pub fn is_sidecar(path: &Path) -> bool {
    SIDECAR_SUFFIXES.iter().any(|suffix| has_suffix(path, suffix))
}

/// A session working directory and the archive root selected inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub working_dir: PathBuf,
    pub archive_root: PathBuf,
    /// Folder name of the archive root; anchors every chain.
    pub name: String,
}

/// Files found under the archive root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionScan {
    pub binaries: BTreeSet<PathBuf>,
    pub sidecars: BTreeSet<PathBuf>,
}

impl Collection {
    /// Opens a working directory and selects its archive root.
    ///
    /// With several immediate subdirectories the earliest created one wins;
    /// where the platform has no birth time the modification time is used,
    /// and the folder name breaks ties.
    pub fn open(working_dir: impl Into<PathBuf>) -> Result<Self> {
        let working_dir = working_dir.into();
        let entries =
            fs::read_dir(&working_dir).map_err(|e| PreingestError::io(&working_dir, e))?;

        let mut candidates: Vec<(SystemTime, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PreingestError::io(&working_dir, e))?;
            let metadata = entry
                .metadata()
                .map_err(|e| PreingestError::io(entry.path(), e))?;
            if !metadata.is_dir() {
                continue;
            }
            let stamp = metadata
                .created()
                .or_else(|_| metadata.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            candidates.push((stamp, entry.path()));
        }

        candidates.sort();
        if candidates.len() > 1 {
            warn!(
                "{} candidate archive roots in {:?}; selecting the earliest",
                candidates.len(),
                working_dir
            );
        }
        let (_, archive_root) =
            candidates
                .into_iter()
                .next()
                .ok_or_else(|| PreingestError::Structure {
                    path: working_dir.clone(),
                    reason: "working directory contains no archive folder".into(),
                })?;

        let name = archive_root
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .ok_or_else(|| PreingestError::Structure {
                path: archive_root.clone(),
                reason: "archive folder name is not valid UTF-8".into(),
            })?;

        debug!("Selected archive root {:?}", archive_root);
        Ok(Self {
            working_dir,
            archive_root,
            name,
        })
    }

    /// Walks the archive root and partitions its files.
    pub fn scan(&self) -> Result<CollectionScan> {
        let mut scan = CollectionScan::default();
        for entry in WalkDir::new(&self.archive_root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.archive_root.clone());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory loop"));
                PreingestError::io(path, source)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if is_sidecar(&path) {
                scan.sidecars.insert(path);
            } else {
                scan.binaries.insert(path);
            }
        }
        debug!(
            "Scanned {:?}: {} binaries, {} sidecars",
            self.archive_root,
            scan.binaries.len(),
            scan.sidecars.len()
        );
        Ok(scan)
    }
}
