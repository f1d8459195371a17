// crates/preingest-rs-metadata/src/error.rs

use quick_xml::Error as XmlError;
use quick_xml::errors::serialize::{DeError, SeError};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing, converting or serializing sidecar metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// An error from the underlying `quick-xml` deserializer.
    #[error("XML parsing error: {0}")]
    XmlParsing(#[from] DeError),

    /// An error from the underlying `quick-xml` serializer.
    #[error("XML serializing error: {0}")]
    XmlSerializing(#[from] SeError),

    /// An error from the `quick-xml` reader while sniffing the root element.
    #[error("XML reading error: {0}")]
    XmlReading(#[from] XmlError),

    /// An error occurred during string formatting (e.g., writing the XML declaration).
    #[error("Formatting error: {0}")]
    Fmt(#[from] fmt::Error),

    /// The document has no root element at all.
    #[error("Document contains no root element")]
    EmptyDocument,

    /// The root element is not one of `ToPX`, `MDTO` or `OPEXMetadata`.
    #[error("Unrecognized root element: {root}")]
    UnrecognizedRoot { root: String },

    /// The root is recognized but holds neither of the expected node shapes,
    /// or the node shape is not supported by the requested operation.
    #[error("Unsupported {dialect} shape: {reason}")]
    UnsupportedShape {
        dialect: &'static str,
        reason: &'static str,
    },

    /// A field that the target schema requires is absent or empty in the source.
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },
}
