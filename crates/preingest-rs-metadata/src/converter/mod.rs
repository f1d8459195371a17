// crates/preingest-rs-metadata/src/converter/mod.rs

//! Converts ToPX nodes into their MDTO equivalents.
//!
//! The conversion is a pure function of the input node and the settings:
//! field order in the output is fixed by the MDTO model structs, and no
//! wall-clock values are introduced here.

use crate::error::MetadataError;
use crate::model::mdto::BegripGegevens;
use crate::types::{MdtoNode, ToPxNode};
use serde::Deserialize;

mod aggregatie;
mod bestand;
pub mod dates;

pub use dates::TemporalValue;

// --- Concept list names used for synthesized begrippen ---

pub(crate) const LIST_CLASSIFICATIE: &str = "Classificatieschema";
pub(crate) const LIST_EVENT_TYPE: &str = "ToPX eventGeschiedenis type";
pub(crate) const LIST_EVENT_PLAN: &str = "ToPX eventPlan type";
pub(crate) const LIST_DEKKING_IN_TIJD: &str = "Begrippenlijst Dekking In Tijd Type";
pub(crate) const LIST_RELATIE: &str = "ToPX relatie typeRelatie";
pub(crate) const LIST_GEBRUIKSRECHTEN: &str = "ToPX gebruiksrechten";
pub(crate) const LIST_VERTROUWELIJKHEID: &str = "ToPX vertrouwelijkheid";
pub(crate) const LIST_OPENBAARHEID: &str = "ToPX openbaarheid";
pub(crate) const LIST_REDACTIE_GENRE: &str = "ToPX vorm redactieGenre";
pub(crate) const LIST_VERSCHIJNINGSVORM: &str = "ToPX vorm verschijningsvorm";
pub(crate) const LIST_STRUCTUUR: &str = "ToPX vorm structuur";

/// Label of the synthetic event carrying a ToPX `integriteit` statement.
pub const INTEGRITY_EVENT_LABEL: &str = "Integriteit";

/// Tunables for the ToPX → MDTO mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionSettings {
    /// `identificatieBron` written next to every converted ToPX identifier.
    pub identification_source: String,
    /// Concept list name for `aggregatieniveau`.
    pub aggregation_level_list: String,
    /// Concept list name for the converted checksum algorithm.
    pub checksum_algorithm_list: String,
    /// Concept list name for the converted `bestandsformaat`.
    pub format_register: String,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            identification_source: "ToPX identificatiekenmerk".into(),
            aggregation_level_list: "Begrippenlijst Aggregatieniveau MDTO".into(),
            checksum_algorithm_list: "Begrippenlijst Checksum Algoritme MDTO".into(),
            format_register: "PRONOM-register".into(),
        }
    }
}

/// Converts one ToPX node into an MDTO node.
///
/// `<aggregatie>` becomes `<informatieobject>`, `<bestand>` stays `<bestand>`.
///
/// # Errors
/// Returns `MetadataError::MissingRequiredField` when the identification or
/// the name is absent or blank.
pub fn convert_topx_to_mdto(
    node: &ToPxNode,
    settings: &ConversionSettings,
) -> Result<MdtoNode, MetadataError> {
    match node {
        ToPxNode::Aggregatie(a) => {
            aggregatie::convert_aggregatie(a, settings).map(MdtoNode::Informatieobject)
        }
        ToPxNode::Bestand(b) => bestand::convert_bestand(b, settings).map(MdtoNode::Bestand),
    }
}

/// Maps a ToPX aggregation level onto the MDTO vocabulary.
///
/// Only "Record" is renamed; every other label passes through.
pub fn relabel_aggregation_level(label: &str) -> &str {
    match label {
        "Record" => "Archiefstuk",
        other => other,
    }
}

// --- Shared helpers ---

/// Trims and drops blank values.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn required_identifier<'a>(
    value: Option<&'a str>,
) -> Result<&'a str, MetadataError> {
    non_blank(value).ok_or(MetadataError::MissingRequiredField {
        field: "identificatiekenmerk",
    })
}

/// Joins multi-valued ToPX names; an all-blank list is a missing name.
pub(crate) fn required_name(names: &[String]) -> Result<String, MetadataError> {
    let parts: Vec<&str> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    if parts.is_empty() {
        return Err(MetadataError::MissingRequiredField { field: "naam" });
    }
    Ok(parts.join(" / "))
}

pub(crate) fn begrip(label: &str, lijst: &str) -> BegripGegevens {
    BegripGegevens::new(label.trim(), None, lijst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::topx;

    #[test]
    fn test_relabel_record_only() {
        assert_eq!(relabel_aggregation_level("Record"), "Archiefstuk");
        assert_eq!(relabel_aggregation_level("Dossier"), "Dossier");
        assert_eq!(relabel_aggregation_level("Serie"), "Serie");
        // Case matters: the ToPX vocabulary is capitalised.
        assert_eq!(relabel_aggregation_level("record"), "record");
    }

    #[test]
    fn test_required_name_skips_blank_parts() {
        let names = vec!["Notulen".to_string(), "  ".to_string(), "Raad".to_string()];
        assert_eq!(required_name(&names).unwrap(), "Notulen / Raad");
        assert!(matches!(
            required_name(&["".to_string()]),
            Err(MetadataError::MissingRequiredField { field: "naam" })
        ));
    }

    #[test]
    fn test_convert_dispatches_on_node_shape() {
        let settings = ConversionSettings::default();

        let aggregatie = ToPxNode::Aggregatie(topx::Aggregatie {
            identificatiekenmerk: Some("A-1".into()),
            aggregatieniveau: Some("Archief".into()),
            naam: vec!["Archief Gemeente".into()],
            ..Default::default()
        });
        assert!(matches!(
            convert_topx_to_mdto(&aggregatie, &settings),
            Ok(MdtoNode::Informatieobject(_))
        ));

        let bestand = ToPxNode::Bestand(topx::Bestand {
            identificatiekenmerk: Some("B-1".into()),
            naam: vec!["brief.pdf".into()],
            ..Default::default()
        });
        assert!(matches!(
            convert_topx_to_mdto(&bestand, &settings),
            Ok(MdtoNode::Bestand(_))
        ));
    }
}
