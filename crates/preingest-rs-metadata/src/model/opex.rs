//! Contains model structs for the OPEX packaging convention.
//!
//! (Schema: `OPEX-Metadata.xsd` v1.2, usually bound to the `opex:` prefix)
//!
//! Only the parts needed to identify and name a node are modelled. Each field
//! carries the bare local name plus an `opex:`-prefixed alias so both spellings
//! deserialize.

use serde::Deserialize;

/// `<opex:Fixity type="SHA-256" value="..."/>`
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Fixity {
    #[serde(rename = "@type", default)]
    pub fixity_type: String,

    #[serde(rename = "@value", default)]
    pub value: String,
}

/// `<opex:Fixities>`
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Fixities {
    #[serde(rename = "Fixity", alias = "opex:Fixity", default)]
    pub fixity: Vec<Fixity>,
}

/// `<opex:Transfer>`
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Transfer {
    #[serde(rename = "SourceID", alias = "opex:SourceID", default)]
    pub source_id: Option<String>,

    #[serde(rename = "Fixities", alias = "opex:Fixities", default)]
    pub fixities: Option<Fixities>,
}

/// `<opex:Identifier type="code">value</opex:Identifier>`
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Identifier {
    #[serde(rename = "@type", default)]
    pub identifier_type: String,

    #[serde(rename = "$text", default)]
    pub value: String,
}

/// `<opex:Identifiers>`
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Identifiers {
    #[serde(rename = "Identifier", alias = "opex:Identifier", default)]
    pub identifier: Vec<Identifier>,
}

/// `<opex:Properties>`
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Properties {
    #[serde(rename = "Title", alias = "opex:Title", default)]
    pub title: Option<String>,

    #[serde(rename = "Description", alias = "opex:Description", default)]
    pub description: Option<String>,

    #[serde(
        rename = "SecurityDescriptor",
        alias = "opex:SecurityDescriptor",
        default
    )]
    pub security_descriptor: Option<String>,

    #[serde(rename = "Identifiers", alias = "opex:Identifiers", default)]
    pub identifiers: Option<Identifiers>,
}

/// Represents the `<opex:OPEXMetadata>` root element.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct OpexMetadata {
    #[serde(rename = "Transfer", alias = "opex:Transfer", default)]
    pub transfer: Option<Transfer>,

    #[serde(rename = "Properties", alias = "opex:Properties", default)]
    pub properties: Option<Properties>,
}
