// crates/preingest-rs/src/mutators/fixity.rs

//! Recomputes the SHA-256 of every binary and replaces the checksum block of
//! its leaf sidecar.

use super::write_document;
use crate::aggregator::{Chain, LeafNode};
use crate::config::FixitySettings;
use crate::error::{PreingestError, Result};
use crate::report::{OperationReport, Outcome, OutcomeSink};
use chrono::Local;
use log::debug;
use preingest_rs_metadata::model::{mdto, topx};
use preingest_rs_metadata::{MdtoNode, MetadataDocument, ToPxNode};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const READ_CHUNK: usize = 1024 * 1024;

/// Streams `path` through SHA-256 and returns the lowercase hex digest.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PreingestError::BinaryNotFound {
            path: path.to_path_buf(),
        },
        _ => PreingestError::io(path, e),
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_CHUNK];
    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|e| PreingestError::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

pub struct FixityPass<'a> {
    settings: &'a FixitySettings,
}

impl<'a> FixityPass<'a> {
    pub fn new(settings: &'a FixitySettings) -> Self {
        Self { settings }
    }

    /// Returns the leaf document with its checksum block replaced by a single
    /// entry for `digest`, dated `timestamp`.
    pub fn apply(
        &self,
        leaf: &LeafNode,
        digest: &str,
        timestamp: &str,
    ) -> Result<MetadataDocument> {
        let mut document = (*leaf.document).clone();
        match &mut document {
            MetadataDocument::Mdto(MdtoNode::Bestand(bestand)) => {
                bestand.checksum = vec![mdto::ChecksumGegevens {
                    checksum_algoritme: mdto::BegripGegevens::new(
                        self.settings.algorithm_label.as_str(),
                        None,
                        self.settings.algorithm_list.as_str(),
                    ),
                    checksum_waarde: digest.to_string(),
                    checksum_datum: timestamp.to_string(),
                }];
            }
            MetadataDocument::ToPx(ToPxNode::Bestand(bestand)) => {
                if bestand.formaat.is_empty() {
                    bestand.formaat.push(topx::Formaat::default());
                }
                for formaat in bestand.formaat.iter_mut().skip(1) {
                    formaat.fysieke_integriteit = None;
                }
                if let Some(first) = bestand.formaat.first_mut() {
                    first.fysieke_integriteit = Some(topx::FysiekeIntegriteit {
                        algoritme: self.settings.algorithm_label.clone(),
                        waarde: digest.to_string(),
                        datum_en_tijd: timestamp.to_string(),
                    });
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

    /// Hashes, updates and rewrites one leaf. Returns the digest.
    pub fn process(&self, leaf: &LeafNode) -> Result<String> {
        let digest = sha256_file(&leaf.binary_path)?;
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        let document = self.apply(leaf, &digest, &timestamp)?;
        write_document(&leaf.metadata_path, &document)?;
        debug!("{:?}: sha256 {}", leaf.binary_path, digest);
        Ok(digest)
    }

    /// Processes the leaf of every chain; failures are recorded per node.
    pub fn run<'c>(
        &self,
        chains: impl IntoIterator<Item = &'c Chain>,
        report: &mut OperationReport,
        sink: &mut dyn OutcomeSink,
    ) {
        for chain in chains {
            let leaf = chain.leaf();
            let outcome = match self.process(leaf) {
                Ok(digest) => Outcome::accepted(
                    &leaf.metadata_path,
                    format!("{} {}", self.settings.algorithm_label, digest),
                ),
                Err(e) => Outcome::rejected(&leaf.metadata_path, &e),
            };
            report.record(outcome, sink);
        }
    }
}
