//! Contains model structs for the MDTO dialect.
//!
//! (Schema: `MDTO-XML1.0.1.xsd`, namespace `https://www.nationaalarchief.nl/mdto`)
//!
//! Field order follows the schema's `xs:sequence` declarations, which is also
//! the order `quick-xml` serializes in.

use serde::{Deserialize, Serialize};

// --- Shared "gegevens" groups ---

/// `identificatieGegevens`: a (kenmerk, bron) pair.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct IdentificatieGegevens {
    #[serde(rename = "identificatieKenmerk", default)]
    pub identificatie_kenmerk: String,

    #[serde(rename = "identificatieBron", default)]
    pub identificatie_bron: String,
}

/// `verwijzingGegevens`: a named reference to another object, optionally identified.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct VerwijzingGegevens {
    #[serde(rename = "verwijzingNaam", default)]
    pub verwijzing_naam: String,

    #[serde(
        rename = "verwijzingIdentificatie",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub verwijzing_identificatie: Option<IdentificatieGegevens>,
}

/// `begripGegevens`: a concept taken from a named concept list.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct BegripGegevens {
    #[serde(rename = "begripLabel", default)]
    pub begrip_label: String,

    #[serde(rename = "begripCode", default, skip_serializing_if = "Option::is_none")]
    pub begrip_code: Option<String>,

    #[serde(rename = "begripBegrippenlijst", default)]
    pub begrip_begrippenlijst: VerwijzingGegevens,
}

/// `termijnGegevens`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct TermijnGegevens {
    #[serde(
        rename = "termijnTriggerStartLooptijd",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub termijn_trigger_start_looptijd: Option<BegripGegevens>,

    #[serde(
        rename = "termijnStartdatumLooptijd",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub termijn_startdatum_looptijd: Option<String>,

    #[serde(
        rename = "termijnLooptijd",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub termijn_looptijd: Option<String>,

    #[serde(
        rename = "termijnEinddatum",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub termijn_einddatum: Option<String>,
}

/// `raadpleeglocatieGegevens`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct RaadpleeglocatieGegevens {
    #[serde(
        rename = "raadpleeglocatieFysiek",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub raadpleeglocatie_fysiek: Vec<VerwijzingGegevens>,

    #[serde(
        rename = "raadpleeglocatieOnline",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub raadpleeglocatie_online: Vec<String>,
}

/// `dekkingInTijdGegevens`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct DekkingInTijdGegevens {
    #[serde(rename = "dekkingInTijdType", default)]
    pub dekking_in_tijd_type: BegripGegevens,

    #[serde(rename = "dekkingInTijdBegindatum", default)]
    pub dekking_in_tijd_begindatum: String,

    #[serde(
        rename = "dekkingInTijdEinddatum",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dekking_in_tijd_einddatum: Option<String>,
}

/// `eventGegevens`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct EventGegevens {
    #[serde(rename = "eventType", default)]
    pub event_type: BegripGegevens,

    #[serde(rename = "eventTijd", default, skip_serializing_if = "Option::is_none")]
    pub event_tijd: Option<String>,

    #[serde(
        rename = "eventVerantwoordelijkeActor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub event_verantwoordelijke_actor: Option<VerwijzingGegevens>,

    #[serde(
        rename = "eventResultaat",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub event_resultaat: Option<String>,
}

/// `gerelateerdInformatieobjectGegevens`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct GerelateerdInformatieobjectGegevens {
    #[serde(rename = "gerelateerdInformatieobjectVerwijzing", default)]
    pub verwijzing: VerwijzingGegevens,

    #[serde(rename = "gerelateerdInformatieobjectTypeRelatie", default)]
    pub type_relatie: BegripGegevens,
}

/// `betrokkeneGegevens`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct BetrokkeneGegevens {
    #[serde(rename = "betrokkeneTypeRelatie", default)]
    pub type_relatie: BegripGegevens,

    #[serde(rename = "betrokkeneActor", default)]
    pub actor: VerwijzingGegevens,
}

/// `beperkingGebruikGegevens`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct BeperkingGebruikGegevens {
    #[serde(rename = "beperkingGebruikType", default)]
    pub beperking_gebruik_type: BegripGegevens,

    #[serde(
        rename = "beperkingGebruikNadereBeschrijving",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub nadere_beschrijving: Option<String>,

    #[serde(
        rename = "beperkingGebruikDocumentatie",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub documentatie: Vec<VerwijzingGegevens>,

    #[serde(
        rename = "beperkingGebruikTermijn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub termijn: Option<TermijnGegevens>,
}

/// `checksumGegevens`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ChecksumGegevens {
    #[serde(rename = "checksumAlgoritme", default)]
    pub checksum_algoritme: BegripGegevens,

    #[serde(rename = "checksumWaarde", default)]
    pub checksum_waarde: String,

    #[serde(rename = "checksumDatum", default)]
    pub checksum_datum: String,
}

// --- Objects ---

/// Represents the `<informatieobject>` element: every aggregation level
/// (Archief, Serie, Dossier, Zaak, Archiefstuk).
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Informatieobject {
    #[serde(rename = "identificatie", default)]
    pub identificatie: Vec<IdentificatieGegevens>,

    #[serde(rename = "naam", default)]
    pub naam: String,

    #[serde(rename = "aggregatieniveau", default, skip_serializing_if = "Option::is_none")]
    pub aggregatieniveau: Option<BegripGegevens>,

    #[serde(rename = "classificatie", default, skip_serializing_if = "Vec::is_empty")]
    pub classificatie: Vec<BegripGegevens>,

    #[serde(rename = "trefwoord", default, skip_serializing_if = "Vec::is_empty")]
    pub trefwoord: Vec<String>,

    #[serde(rename = "omschrijving", default, skip_serializing_if = "Vec::is_empty")]
    pub omschrijving: Vec<String>,

    #[serde(rename = "raadpleeglocatie", default, skip_serializing_if = "Vec::is_empty")]
    pub raadpleeglocatie: Vec<RaadpleeglocatieGegevens>,

    #[serde(rename = "dekkingInTijd", default, skip_serializing_if = "Vec::is_empty")]
    pub dekking_in_tijd: Vec<DekkingInTijdGegevens>,

    #[serde(rename = "dekkingInRuimte", default, skip_serializing_if = "Vec::is_empty")]
    pub dekking_in_ruimte: Vec<VerwijzingGegevens>,

    #[serde(rename = "taal", default, skip_serializing_if = "Vec::is_empty")]
    pub taal: Vec<String>,

    #[serde(rename = "event", default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<EventGegevens>,

    #[serde(rename = "waardering", default, skip_serializing_if = "Option::is_none")]
    pub waardering: Option<BegripGegevens>,

    #[serde(rename = "bewaartermijn", default, skip_serializing_if = "Option::is_none")]
    pub bewaartermijn: Option<TermijnGegevens>,

    #[serde(
        rename = "informatiecategorie",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub informatiecategorie: Option<VerwijzingGegevens>,

    #[serde(rename = "isOnderdeelVan", default, skip_serializing_if = "Vec::is_empty")]
    pub is_onderdeel_van: Vec<VerwijzingGegevens>,

    #[serde(rename = "bevatOnderdeel", default, skip_serializing_if = "Vec::is_empty")]
    pub bevat_onderdeel: Vec<VerwijzingGegevens>,

    #[serde(
        rename = "heeftRepresentatie",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub heeft_representatie: Vec<VerwijzingGegevens>,

    #[serde(
        rename = "aanvullendeMetagegevens",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub aanvullende_metagegevens: Vec<VerwijzingGegevens>,

    #[serde(
        rename = "gerelateerdInformatieobject",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub gerelateerd_informatieobject: Vec<GerelateerdInformatieobjectGegevens>,

    #[serde(rename = "archiefvormer", default, skip_serializing_if = "Vec::is_empty")]
    pub archiefvormer: Vec<VerwijzingGegevens>,

    #[serde(rename = "betrokkene", default, skip_serializing_if = "Vec::is_empty")]
    pub betrokkene: Vec<BetrokkeneGegevens>,

    #[serde(rename = "activiteit", default, skip_serializing_if = "Vec::is_empty")]
    pub activiteit: Vec<VerwijzingGegevens>,

    #[serde(rename = "beperkingGebruik", default, skip_serializing_if = "Vec::is_empty")]
    pub beperking_gebruik: Vec<BeperkingGebruikGegevens>,
}

/// Represents the `<bestand>` element: the digital representation of an
/// information object.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Bestand {
    #[serde(rename = "identificatie", default)]
    pub identificatie: Vec<IdentificatieGegevens>,

    #[serde(rename = "naam", default)]
    pub naam: String,

    #[serde(rename = "omvang", default, skip_serializing_if = "Option::is_none")]
    pub omvang: Option<u64>,

    #[serde(rename = "bestandsformaat", default, skip_serializing_if = "Option::is_none")]
    pub bestandsformaat: Option<BegripGegevens>,

    #[serde(rename = "checksum", default, skip_serializing_if = "Vec::is_empty")]
    pub checksum: Vec<ChecksumGegevens>,

    #[serde(rename = "URLBestand", default, skip_serializing_if = "Option::is_none")]
    pub url_bestand: Option<String>,

    #[serde(
        rename = "isRepresentatieVan",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_representatie_van: Option<VerwijzingGegevens>,
}

impl IdentificatieGegevens {
    pub fn new(kenmerk: impl Into<String>, bron: impl Into<String>) -> Self {
        Self {
            identificatie_kenmerk: kenmerk.into(),
            identificatie_bron: bron.into(),
        }
    }
}

impl BegripGegevens {
    /// Builds a concept with a label, an optional code and the name of the
    /// concept list it was taken from.
    pub fn new(label: impl Into<String>, code: Option<String>, lijst: impl Into<String>) -> Self {
        Self {
            begrip_label: label.into(),
            begrip_code: code,
            begrip_begrippenlijst: VerwijzingGegevens {
                verwijzing_naam: lijst.into(),
                verwijzing_identificatie: None,
            },
        }
    }
}

impl VerwijzingGegevens {
    pub fn named(naam: impl Into<String>) -> Self {
        Self {
            verwijzing_naam: naam.into(),
            verwijzing_identificatie: None,
        }
    }

    /// True when both references point to the same (kenmerk, bron) identity.
    /// References without an identification never match.
    pub fn same_identity(&self, other: &VerwijzingGegevens) -> bool {
        match (&self.verwijzing_identificatie, &other.verwijzing_identificatie) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
