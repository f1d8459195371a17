// crates/preingest-rs-metadata/src/parser.rs

use crate::error::MetadataError;
use crate::model::{MdtoContainer, ToPxContainer, opex::OpexMetadata};
use crate::types::{Dialect, MdtoNode, MetadataDocument, ToPxNode};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Determines the dialect of a sidecar from its root element.
///
/// Only the local name is compared, so `<opex:OPEXMetadata>` and a
/// default-namespaced `<OPEXMetadata>` are treated the same.
///
/// # Errors
/// Returns `MetadataError::EmptyDocument` if no element is found and
/// `MetadataError::UnrecognizedRoot` for any other root.
pub fn detect_dialect(xml_content: &str) -> Result<Dialect, MetadataError> {
    let mut reader = Reader::from_str(xml_content);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let local = e.local_name();
                return match local.as_ref() {
                    b"ToPX" => Ok(Dialect::ToPx),
                    b"MDTO" => Ok(Dialect::Mdto),
                    b"OPEXMetadata" => Ok(Dialect::Opex),
                    other => Err(MetadataError::UnrecognizedRoot {
                        root: String::from_utf8_lossy(other).into_owned(),
                    }),
                };
            }
            Event::Eof => return Err(MetadataError::EmptyDocument),
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }
}

/// Parses any supported sidecar into a resolved `MetadataDocument`.
///
/// # Errors
/// Returns a `MetadataError` if the root is not recognized, the XML is
/// malformed, or the node shape is ambiguous.
pub fn load_document_from_str(xml_content: &str) -> Result<MetadataDocument, MetadataError> {
    match detect_dialect(xml_content)? {
        Dialect::ToPx => load_topx_from_str(xml_content).map(MetadataDocument::ToPx),
        Dialect::Mdto => load_mdto_from_str(xml_content).map(MetadataDocument::Mdto),
        Dialect::Opex => load_opex_from_str(xml_content).map(MetadataDocument::Opex),
    }
}

/// Parses a ToPX sidecar (`*.metadata`).
pub fn load_topx_from_str(xml_content: &str) -> Result<ToPxNode, MetadataError> {
    let container: ToPxContainer = quick_xml::de::from_str(xml_content)?;
    ToPxNode::try_from(container)
}

/// Parses an MDTO sidecar (`*.mdto.xml`, `*.bestand.mdto.xml`).
pub fn load_mdto_from_str(xml_content: &str) -> Result<MdtoNode, MetadataError> {
    let container: MdtoContainer = quick_xml::de::from_str(xml_content)?;
    MdtoNode::try_from(container)
}

/// Parses an OPEX wrapper (`*.opex`).
pub fn load_opex_from_str(xml_content: &str) -> Result<OpexMetadata, MetadataError> {
    Ok(quick_xml::de::from_str(xml_content)?)
}
