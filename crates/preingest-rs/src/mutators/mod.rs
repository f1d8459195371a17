// crates/preingest-rs/src/mutators/mod.rs

//! Passes that rewrite sidecars in place across the chains of a collection.

pub mod fixity;
pub mod format;
pub mod relationship;

pub use fixity::FixityPass;
pub use format::{FormatEnrichmentPass, FormatRow, FormatTable};
pub use relationship::{NodeCache, RelationshipPropagationPass};

use crate::error::{PreingestError, Result};
use crate::fsio;
use preingest_rs_metadata::{MetadataDocument, save_document_to_string};
use std::path::Path;

/// Serializes `document` and atomically replaces the sidecar at `path`.
pub(crate) fn write_document(path: &Path, document: &MetadataDocument) -> Result<()> {
    let xml = save_document_to_string(document).map_err(|source| PreingestError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    fsio::write_atomic(path, &xml)
}
