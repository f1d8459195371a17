// src/lib.rs

#![doc = "Parses, converts and writes archival sidecar metadata (ToPX, MDTO, OPEX)."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `load_document_from_str`: Resolving any sidecar into a `MetadataDocument`."]
#![doc = "- `convert_topx_to_mdto`: Mapping a ToPX node onto its MDTO equivalent."]
#![doc = "- `save_mdto_to_string` / `save_topx_to_string`: Schema-ordered serialization."]

// --- Crate Modules ---

mod builder;
pub mod converter;
mod error;
pub mod model;
mod parser;
mod types;

// --- Public API Re-exports ---

pub use builder::{save_document_to_string, save_mdto_to_string, save_topx_to_string};
pub use converter::{ConversionSettings, convert_topx_to_mdto, relabel_aggregation_level};
pub use error::MetadataError;
pub use parser::{
    detect_dialect, load_document_from_str, load_mdto_from_str, load_opex_from_str,
    load_topx_from_str,
};
pub use types::{Dialect, Identification, MdtoNode, MetadataDocument, NodeKind, ToPxNode};
