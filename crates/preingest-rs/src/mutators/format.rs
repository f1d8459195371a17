// crates/preingest-rs/src/mutators/format.rs

//! Fills in the file format of every leaf from a DROID identification export.
//!
//! DROID writes one CSV row per scanned file; only the columns named in
//! `FormatRow` are read and any extra (multi-format) columns are ignored.

use super::write_document;
use crate::aggregator::{Chain, LeafNode};
use crate::config::FormatSettings;
use crate::error::{PreingestError, Result};
use crate::report::{OperationReport, Outcome, OutcomeSink};
use log::{debug, info, warn};
use preingest_rs_metadata::model::{mdto, topx};
use preingest_rs_metadata::{MdtoNode, MetadataDocument, ToPxNode};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// --- DROID column names ---

const COL_FILE_PATH: &str = "FILE_PATH";
const COL_TYPE: &str = "TYPE";
const COL_PUID: &str = "PUID";
const COL_MIME_TYPE: &str = "MIME_TYPE";
const COL_FORMAT_NAME: &str = "FORMAT_NAME";
const COL_FORMAT_VERSION: &str = "FORMAT_VERSION";

/// The identification result for one file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatRow {
    pub file_path: String,
    pub puid: String,
    pub mime_type: Option<String>,
    pub format_name: String,
    pub format_version: Option<String>,
}

impl FormatRow {
    /// Format name with the version appended when DROID reported one.
    pub fn label(&self) -> String {
        match self.format_version.as_deref() {
            Some(version) => format!("{} {}", self.format_name, version),
            None => self.format_name.clone(),
        }
    }
}

/// DROID rows indexed by lowercased file path.
#[derive(Debug, Clone, Default)]
pub struct FormatTable {
    source: PathBuf,
    rows: HashMap<String, FormatRow>,
}

impl FormatTable {
    /// Loads a DROID CSV from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| PreingestError::io(path, e))?;
        Self::from_reader(file, path)
    }

    /// Loads a DROID CSV from any reader. `source` is only used in errors.
    ///
    /// Folder rows and rows without a PUID are skipped. When a path occurs
    /// more than once, the first row wins.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let csv_error = |e: csv::Error| PreingestError::Csv {
            path: source.to_path_buf(),
            source: e,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        // 1. Resolve column positions from the header.
        let headers = reader.headers().map_err(csv_error)?.clone();
        let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let (Some(path_col), Some(puid_col)) = (column(COL_FILE_PATH), column(COL_PUID)) else {
            return Err(PreingestError::Structure {
                path: source.to_path_buf(),
                reason: format!("format table lacks {COL_FILE_PATH} or {COL_PUID} column"),
            });
        };
        let type_col = column(COL_TYPE);
        let mime_col = column(COL_MIME_TYPE);
        let name_col = column(COL_FORMAT_NAME);
        let version_col = column(COL_FORMAT_VERSION);

        // 2. Index the rows.
        let mut rows = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let field = |col: Option<usize>| {
                col.and_then(|i| record.get(i))
                    .filter(|v| !v.is_empty())
                    .map(String::from)
            };

            if field(type_col).is_some_and(|t| t.eq_ignore_ascii_case("Folder")) {
                continue;
            }
            let (Some(file_path), Some(puid)) = (field(Some(path_col)), field(Some(puid_col)))
            else {
                continue;
            };

            rows.entry(file_path.to_lowercase()).or_insert(FormatRow {
                file_path,
                puid,
                mime_type: field(mime_col),
                format_name: field(name_col).unwrap_or_default(),
                format_version: field(version_col),
            });
        }

        debug!("Loaded {} format rows from {:?}", rows.len(), source);
        Ok(Self {
            source: source.to_path_buf(),
            rows,
        })
    }

    /// Picks the most recently created `*.csv` directly inside `dir`.
    pub fn discover(dir: &Path) -> Result<PathBuf> {
        let entries = fs::read_dir(dir).map_err(|e| PreingestError::io(dir, e))?;
        let mut newest: Option<(SystemTime, PathBuf)> = None;
        for entry in entries {
            let entry = entry.map_err(|e| PreingestError::io(dir, e))?;
            let path = entry.path();
            let is_csv = path
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            let metadata = entry.metadata().map_err(|e| PreingestError::io(&path, e))?;
            if !metadata.is_file() {
                continue;
            }
            let stamp = metadata
                .created()
                .or_else(|_| metadata.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            if newest.as_ref().is_none_or(|(best, _)| stamp > *best) {
                newest = Some((stamp, path));
            }
        }
        newest
            .map(|(_, path)| path)
            .ok_or_else(|| PreingestError::FormatTableMissing {
                dir: dir.to_path_buf(),
            })
    }

    /// Case-insensitive lookup by full path.
    pub fn lookup(&self, path: &Path) -> Option<&FormatRow> {
        self.rows.get(&path.to_string_lossy().to_lowercase())
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct FormatEnrichmentPass<'a> {
    settings: &'a FormatSettings,
    table: FormatTable,
}

impl<'a> FormatEnrichmentPass<'a> {
    pub fn new(settings: &'a FormatSettings, table: FormatTable) -> Self {
        Self { settings, table }
    }

    /// Resolves the table to use (explicit, configured, or newest CSV in
    /// `working_dir`) and loads it.
    pub fn load(
        settings: &'a FormatSettings,
        working_dir: &Path,
        explicit: Option<&Path>,
    ) -> Result<Self> {
        let path = match explicit.or(settings.table_path.as_deref()) {
            Some(path) => path.to_path_buf(),
            None => FormatTable::discover(working_dir)?,
        };
        info!("Using format table {:?}", path);
        Ok(Self::new(settings, FormatTable::from_path(&path)?))
    }

    pub fn table(&self) -> &FormatTable {
        &self.table
    }

    /// Returns the leaf document with its format set from `row`.
    pub fn apply(&self, leaf: &LeafNode, row: &FormatRow) -> Result<MetadataDocument> {
        let mut document = (*leaf.document).clone();
        match &mut document {
            MetadataDocument::Mdto(MdtoNode::Bestand(bestand)) => {
                bestand.bestandsformaat = Some(mdto::BegripGegevens::new(
                    row.label(),
                    Some(row.puid.clone()),
                    self.settings.register_name.as_str(),
                ));
            }
            MetadataDocument::ToPx(ToPxNode::Bestand(bestand)) => {
                if bestand.formaat.is_empty() {
                    bestand.formaat.push(topx::Formaat::default());
                }
                if let Some(first) = bestand.formaat.first_mut() {
                    first.bestandsformaat = Some(row.puid.clone());
                }
            }
            MetadataDocument::Mdto(MdtoNode::Informatieobject(_))
            | MetadataDocument::ToPx(ToPxNode::Aggregatie(_)) => {
                return Err(PreingestError::unsupported(
                    &leaf.metadata_path,
                    leaf.document.dialect().as_str(),
                    "leaf sidecar describes an aggregation, not a file",
                ));
            }
            MetadataDocument::Opex(_) => {
                return Err(PreingestError::unsupported(
                    &leaf.metadata_path,
                    "OPEX",
                    "OPEX wrappers are not rewritten",
                ));
            }
        }
        Ok(document)
    }

    /// Looks up, updates and rewrites one leaf. Returns the PUID written.
    pub fn process(&self, leaf: &LeafNode) -> Result<String> {
        let row = self
            .table
            .lookup(&leaf.binary_path)
            .ok_or_else(|| PreingestError::NoFormatMatch {
                path: leaf.binary_path.clone(),
            })?;
        let document = self.apply(leaf, row)?;
        write_document(&leaf.metadata_path, &document)?;
        Ok(row.puid.clone())
    }

    pub fn run<'c>(
        &self,
        chains: impl IntoIterator<Item = &'c Chain>,
        report: &mut OperationReport,
        sink: &mut dyn OutcomeSink,
    ) {
        for chain in chains {
            let leaf = chain.leaf();
            let outcome = match self.process(leaf) {
                Ok(puid) => Outcome::accepted(&leaf.metadata_path, puid),
                Err(e) => {
                    if matches!(e, PreingestError::NoFormatMatch { .. }) {
                        warn!("{:?} not listed in {:?}", leaf.binary_path, self.table.source);
                    }
                    Outcome::rejected(&leaf.metadata_path, &e)
                }
            };
            report.record(outcome, sink);
        }
    }
}
