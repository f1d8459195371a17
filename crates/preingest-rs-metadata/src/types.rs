// crates/preingest-rs-metadata/src/types.rs

//! Public, ergonomic views over a parsed sidecar.
//!
//! A sidecar is resolved once into a sum type over its dialect and node shape,
//! so callers match exhaustively instead of probing optional children.

use crate::error::MetadataError;
use crate::model::{self, MdtoContainer, ToPxContainer, mdto, opex, topx};

/// The three sidecar conventions this crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    ToPx,
    Mdto,
    Opex,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::ToPx => "ToPX",
            Dialect::Mdto => "MDTO",
            Dialect::Opex => "OPEX",
        }
    }
}

/// Whether a node describes a grouping or a single binary object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Aggregation,
    File,
}

/// A ToPX node: either `<aggregatie>` or `<bestand>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToPxNode {
    Aggregatie(topx::Aggregatie),
    Bestand(topx::Bestand),
}

/// An MDTO node: either `<informatieobject>` or `<bestand>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MdtoNode {
    Informatieobject(mdto::Informatieobject),
    Bestand(mdto::Bestand),
}

/// A fully resolved sidecar document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataDocument {
    ToPx(ToPxNode),
    Mdto(MdtoNode),
    Opex(opex::OpexMetadata),
}

/// One identification tuple. ToPX carries no source, hence the `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identification {
    pub kenmerk: String,
    pub bron: Option<String>,
}

// --- Resolution from raw containers ---

impl TryFrom<ToPxContainer> for ToPxNode {
    type Error = MetadataError;

    fn try_from(container: ToPxContainer) -> Result<Self, Self::Error> {
        match (container.aggregatie, container.bestand) {
            (Some(aggregatie), None) => Ok(ToPxNode::Aggregatie(aggregatie)),
            (None, Some(bestand)) => Ok(ToPxNode::Bestand(bestand)),
            (Some(_), Some(_)) => Err(MetadataError::UnsupportedShape {
                dialect: "ToPX",
                reason: "both <aggregatie> and <bestand> present",
            }),
            (None, None) => Err(MetadataError::UnsupportedShape {
                dialect: "ToPX",
                reason: "neither <aggregatie> nor <bestand> present",
            }),
        }
    }
}

impl TryFrom<MdtoContainer> for MdtoNode {
    type Error = MetadataError;

    fn try_from(container: MdtoContainer) -> Result<Self, Self::Error> {
        match (container.informatieobject, container.bestand) {
            (Some(io), None) => Ok(MdtoNode::Informatieobject(io)),
            (None, Some(bestand)) => Ok(MdtoNode::Bestand(bestand)),
            (Some(_), Some(_)) => Err(MetadataError::UnsupportedShape {
                dialect: "MDTO",
                reason: "both <informatieobject> and <bestand> present",
            }),
            (None, None) => Err(MetadataError::UnsupportedShape {
                dialect: "MDTO",
                reason: "neither <informatieobject> nor <bestand> present",
            }),
        }
    }
}

impl From<ToPxNode> for ToPxContainer {
    fn from(node: ToPxNode) -> Self {
        match node {
            ToPxNode::Aggregatie(a) => ToPxContainer {
                aggregatie: Some(a),
                ..Default::default()
            },
            ToPxNode::Bestand(b) => ToPxContainer {
                bestand: Some(b),
                ..Default::default()
            },
        }
    }
}

impl From<MdtoNode> for MdtoContainer {
    fn from(node: MdtoNode) -> Self {
        match node {
            MdtoNode::Informatieobject(io) => MdtoContainer {
                informatieobject: Some(io),
                ..Default::default()
            },
            MdtoNode::Bestand(b) => MdtoContainer {
                bestand: Some(b),
                ..Default::default()
            },
        }
    }
}

// --- Accessors ---

impl MetadataDocument {
    pub fn dialect(&self) -> Dialect {
        match self {
            MetadataDocument::ToPx(_) => Dialect::ToPx,
            MetadataDocument::Mdto(_) => Dialect::Mdto,
            MetadataDocument::Opex(_) => Dialect::Opex,
        }
    }

    /// OPEX wrappers do not say whether they describe a folder or a file;
    /// they report `None`.
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            MetadataDocument::ToPx(ToPxNode::Aggregatie(_))
            | MetadataDocument::Mdto(MdtoNode::Informatieobject(_)) => Some(NodeKind::Aggregation),
            MetadataDocument::ToPx(ToPxNode::Bestand(_))
            | MetadataDocument::Mdto(MdtoNode::Bestand(_)) => Some(NodeKind::File),
            MetadataDocument::Opex(_) => None,
        }
    }

    /// All identification tuples declared by the node, in document order.
    pub fn identifications(&self) -> Vec<Identification> {
        match self {
            MetadataDocument::ToPx(ToPxNode::Aggregatie(a)) => topx_identification(
                a.identificatiekenmerk.as_deref(),
            ),
            MetadataDocument::ToPx(ToPxNode::Bestand(b)) => {
                topx_identification(b.identificatiekenmerk.as_deref())
            }
            MetadataDocument::Mdto(MdtoNode::Informatieobject(io)) => {
                mdto_identifications(&io.identificatie)
            }
            MetadataDocument::Mdto(MdtoNode::Bestand(b)) => mdto_identifications(&b.identificatie),
            MetadataDocument::Opex(o) => o
                .transfer
                .as_ref()
                .and_then(|t| t.source_id.clone())
                .map(|kenmerk| Identification {
                    kenmerk,
                    bron: Some("OPEX SourceID".into()),
                })
                .into_iter()
                .collect(),
        }
    }

    /// The human readable name. Multi-valued ToPX names are joined with " / ".
    pub fn name(&self) -> Option<String> {
        let joined = |names: &[String]| {
            if names.is_empty() {
                None
            } else {
                Some(names.join(" / "))
            }
        };
        match self {
            MetadataDocument::ToPx(ToPxNode::Aggregatie(a)) => joined(&a.naam),
            MetadataDocument::ToPx(ToPxNode::Bestand(b)) => joined(&b.naam),
            MetadataDocument::Mdto(MdtoNode::Informatieobject(io)) => non_empty(&io.naam),
            MetadataDocument::Mdto(MdtoNode::Bestand(b)) => non_empty(&b.naam),
            MetadataDocument::Opex(o) => o.properties.as_ref().and_then(|p| p.title.clone()),
        }
    }

    /// The aggregation level label read from the dialect's fixed location.
    pub fn level_label(&self) -> Option<&str> {
        let label = match self {
            MetadataDocument::ToPx(ToPxNode::Aggregatie(a)) => a.aggregatieniveau.as_deref(),
            MetadataDocument::ToPx(ToPxNode::Bestand(b)) => b.aggregatieniveau.as_deref(),
            MetadataDocument::Mdto(MdtoNode::Informatieobject(io)) => io
                .aggregatieniveau
                .as_ref()
                .map(|begrip| begrip.begrip_label.as_str()),
            MetadataDocument::Mdto(MdtoNode::Bestand(_)) => Some("Bestand"),
            MetadataDocument::Opex(_) => None,
        };
        label.map(str::trim).filter(|label| !label.is_empty())
    }
}

fn topx_identification(kenmerk: Option<&str>) -> Vec<Identification> {
    kenmerk
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(|k| Identification {
            kenmerk: k.to_string(),
            bron: None,
        })
        .into_iter()
        .collect()
}

fn mdto_identifications(ids: &[mdto::IdentificatieGegevens]) -> Vec<Identification> {
    ids.iter()
        .map(|id| Identification {
            kenmerk: id.identificatie_kenmerk.clone(),
            bron: Some(id.identificatie_bron.clone()),
        })
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl From<&Identification> for model::mdto::IdentificatieGegevens {
    fn from(id: &Identification) -> Self {
        model::mdto::IdentificatieGegevens::new(id.kenmerk.clone(), id.bron.clone().unwrap_or_default())
    }
}
