// crates/preingest-rs-metadata/src/builder.rs

//! Serializes resolved nodes back into schema-ordered XML strings.
//!
//! Element order is dictated by the field order of the `model` structs, which
//! mirror the `xs:sequence` declarations of each schema.

use crate::error::MetadataError;
use crate::model::{MdtoContainer, ToPxContainer};
use crate::types::{MdtoNode, MetadataDocument, ToPxNode};
use serde::Serialize;
use std::fmt::Write;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Serializes an MDTO node into a complete document with the MDTO root and
/// namespace declarations.
pub fn save_mdto_to_string(node: &MdtoNode) -> Result<String, MetadataError> {
    let container: MdtoContainer = node.clone().into();
    serialize_with_declaration(&container)
}

/// Serializes a ToPX node into a complete document with the ToPX root.
pub fn save_topx_to_string(node: &ToPxNode) -> Result<String, MetadataError> {
    let container: ToPxContainer = node.clone().into();
    serialize_with_declaration(&container)
}

/// Serializes any writable document.
///
/// # Errors
/// OPEX wrappers are read-only in this crate and yield
/// `MetadataError::UnsupportedShape`.
pub fn save_document_to_string(document: &MetadataDocument) -> Result<String, MetadataError> {
    match document {
        MetadataDocument::Mdto(node) => save_mdto_to_string(node),
        MetadataDocument::ToPx(node) => save_topx_to_string(node),
        MetadataDocument::Opex(_) => Err(MetadataError::UnsupportedShape {
            dialect: "OPEX",
            reason: "OPEX wrappers are not rewritten",
        }),
    }
}

fn serialize_with_declaration<T: Serialize>(root: &T) -> Result<String, MetadataError> {
    let mut buffer = String::new();
    write!(&mut buffer, "{}", XML_DECLARATION)?;

    let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
    serializer.indent(' ', 2);

    root.serialize(serializer)?;
    Ok(buffer)
}
