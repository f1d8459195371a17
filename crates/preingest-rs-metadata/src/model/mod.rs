//! Internal `serde` data structures that map directly to the sidecar XML schemas.
//!
//! This module defines the raw structure of ToPX, MDTO and OPEX documents.
//! These structs are annotated with `serde` attributes to facilitate parsing
//! and writing via `quick-xml`. Shape checks (which child is present) happen in
//! `types`, not here.

#![allow(clippy::pedantic)] // XML schema naming conventions differ from Rust

use serde::{Deserialize, Serialize};

pub mod mdto;
pub mod opex;
pub mod topx;

pub const TOPX_NAMESPACE: &str = "http://www.nationaalarchief.nl/ToPX/v2.3";
pub const MDTO_NAMESPACE: &str = "https://www.nationaalarchief.nl/mdto";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const MDTO_SCHEMA_LOCATION: &str =
    "https://www.nationaalarchief.nl/mdto https://www.nationaalarchief.nl/mdto/MDTO-XML1.0.1.xsd";

/// The root element of a ToPX sidecar.
///
/// Holds either an `<aggregatie>` or a `<bestand>`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "ToPX")]
pub struct ToPxContainer {
    #[serde(rename = "@xmlns", default)]
    pub xmlns: String,

    #[serde(rename = "aggregatie", default, skip_serializing_if = "Option::is_none")]
    pub aggregatie: Option<topx::Aggregatie>,

    #[serde(rename = "bestand", default, skip_serializing_if = "Option::is_none")]
    pub bestand: Option<topx::Bestand>,
}

impl Default for ToPxContainer {
    fn default() -> Self {
        Self {
            xmlns: TOPX_NAMESPACE.into(),
            aggregatie: None,
            bestand: None,
        }
    }
}

/// The root element of an MDTO sidecar.
///
/// Holds either an `<informatieobject>` or a `<bestand>`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "MDTO")]
pub struct MdtoContainer {
    #[serde(rename = "@xmlns", default)]
    pub xmlns: String,

    #[serde(rename = "@xmlns:xsi", default, skip_serializing_if = "Option::is_none")]
    pub xmlns_xsi: Option<String>,

    #[serde(
        rename = "@xsi:schemaLocation",
        alias = "@schemaLocation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub xsi_schema_location: Option<String>,

    #[serde(
        rename = "informatieobject",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub informatieobject: Option<mdto::Informatieobject>,

    #[serde(rename = "bestand", default, skip_serializing_if = "Option::is_none")]
    pub bestand: Option<mdto::Bestand>,
}

impl Default for MdtoContainer {
    fn default() -> Self {
        Self {
            xmlns: MDTO_NAMESPACE.into(),
            xmlns_xsi: Some(XSI_NAMESPACE.into()),
            xsi_schema_location: Some(MDTO_SCHEMA_LOCATION.into()),
            informatieobject: None,
            bestand: None,
        }
    }
}
