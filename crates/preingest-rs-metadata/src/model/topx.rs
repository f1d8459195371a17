//! Contains model structs for the ToPX dialect.
//!
//! (Schema: `ToPX-2.3_2.xsd`, namespace `http://www.nationaalarchief.nl/ToPX/v2.3`)

use serde::{Deserialize, Serialize};

// --- Date containers ---

/// The `datumOfPeriode` / `datumOfJaar` choice group.
///
/// Exactly one of the three children is expected; the others stay `None`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct DatumOfPeriode {
    #[serde(rename = "datum", default, skip_serializing_if = "Option::is_none")]
    pub datum: Option<String>,

    #[serde(rename = "datumEnTijd", default, skip_serializing_if = "Option::is_none")]
    pub datum_en_tijd: Option<String>,

    #[serde(rename = "jaar", default, skip_serializing_if = "Option::is_none")]
    pub jaar: Option<String>,
}

// --- Aggregatie building blocks ---

/// `<classificatie>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Classificatie {
    #[serde(rename = "code", default)]
    pub code: String,

    #[serde(rename = "omschrijving", default, skip_serializing_if = "Option::is_none")]
    pub omschrijving: Option<String>,

    #[serde(rename = "bron", default)]
    pub bron: String,

    #[serde(rename = "datumOfPeriode", default, skip_serializing_if = "Option::is_none")]
    pub datum_of_periode: Option<DatumOfPeriode>,
}

/// `<inTijd>` inside `<dekking>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct InTijd {
    #[serde(rename = "begin", default)]
    pub begin: DatumOfPeriode,

    #[serde(rename = "eind", default, skip_serializing_if = "Option::is_none")]
    pub eind: Option<DatumOfPeriode>,
}

/// `<dekking>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Dekking {
    #[serde(rename = "inTijd", default, skip_serializing_if = "Option::is_none")]
    pub in_tijd: Option<InTijd>,

    #[serde(
        rename = "geografischGebied",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub geografisch_gebied: Vec<String>,
}

/// `<eventGeschiedenis>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct EventGeschiedenis {
    #[serde(rename = "datumOfPeriode", default)]
    pub datum_of_periode: DatumOfPeriode,

    #[serde(rename = "type", default)]
    pub event_type: String,

    #[serde(rename = "beschrijving", default, skip_serializing_if = "Option::is_none")]
    pub beschrijving: Option<String>,

    #[serde(
        rename = "verantwoordelijkeFunctionaris",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub verantwoordelijke_functionaris: Option<String>,
}

/// `<eventPlan>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct EventPlan {
    #[serde(rename = "datum", default, skip_serializing_if = "Option::is_none")]
    pub datum: Option<String>,

    #[serde(rename = "type", default)]
    pub event_type: String,

    #[serde(rename = "beschrijving", default, skip_serializing_if = "Option::is_none")]
    pub beschrijving: Option<String>,

    #[serde(rename = "aanleiding", default, skip_serializing_if = "Option::is_none")]
    pub aanleiding: Option<String>,
}

/// `<relatie>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Relatie {
    #[serde(rename = "relatieID", default)]
    pub relatie_id: String,

    #[serde(rename = "typeRelatie", default)]
    pub type_relatie: String,

    #[serde(rename = "datumOfPeriode", default, skip_serializing_if = "Option::is_none")]
    pub datum_of_periode: Option<DatumOfPeriode>,
}

/// `<actor>` inside `<context>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Actor {
    #[serde(rename = "identificatiekenmerk", default)]
    pub identificatiekenmerk: String,

    #[serde(rename = "aggregatieniveau", default, skip_serializing_if = "Option::is_none")]
    pub aggregatieniveau: Option<String>,

    #[serde(rename = "geautoriseerdeNaam", default)]
    pub geautoriseerde_naam: String,

    #[serde(rename = "plaats", default, skip_serializing_if = "Option::is_none")]
    pub plaats: Option<String>,

    #[serde(rename = "jurisdictie", default, skip_serializing_if = "Option::is_none")]
    pub jurisdictie: Option<String>,
}

/// `<activiteit>` inside `<context>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Activiteit {
    #[serde(rename = "identificatiekenmerk", default)]
    pub identificatiekenmerk: String,

    #[serde(rename = "aggregatieniveau", default, skip_serializing_if = "Option::is_none")]
    pub aggregatieniveau: Option<String>,

    #[serde(rename = "naam", default)]
    pub naam: String,
}

/// `<context>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Context {
    #[serde(rename = "actor", default, skip_serializing_if = "Vec::is_empty")]
    pub actor: Vec<Actor>,

    #[serde(rename = "activiteit", default, skip_serializing_if = "Vec::is_empty")]
    pub activiteit: Vec<Activiteit>,
}

/// `<externIdentificatiekenmerken>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ExternIdentificatiekenmerk {
    #[serde(rename = "nummerBinnenSysteem", default)]
    pub nummer_binnen_systeem: String,

    #[serde(rename = "kenmerkSysteem", default)]
    pub kenmerk_systeem: String,
}

/// `<vorm>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Vorm {
    #[serde(rename = "redactieGenre", default, skip_serializing_if = "Option::is_none")]
    pub redactie_genre: Option<String>,

    #[serde(
        rename = "verschijningsvorm",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub verschijningsvorm: Option<String>,

    #[serde(rename = "structuur", default, skip_serializing_if = "Option::is_none")]
    pub structuur: Option<String>,
}

/// `<openbaarheid>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Openbaarheid {
    #[serde(rename = "omschrijvingBeperkingen", default)]
    pub omschrijving_beperkingen: String,

    #[serde(rename = "datumOfPeriode", default, skip_serializing_if = "Option::is_none")]
    pub datum_of_periode: Option<DatumOfPeriode>,
}

/// `<vertrouwelijkheid>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Vertrouwelijkheid {
    #[serde(rename = "classificatieNiveau", default)]
    pub classificatie_niveau: String,

    #[serde(rename = "datumOfPeriode", default, skip_serializing_if = "Option::is_none")]
    pub datum_of_periode: Option<DatumOfPeriode>,
}

/// `<gebruiksrechten>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Gebruiksrechten {
    #[serde(rename = "omschrijvingVoorwaarden", default)]
    pub omschrijving_voorwaarden: String,

    #[serde(rename = "datumOfPeriode", default, skip_serializing_if = "Option::is_none")]
    pub datum_of_periode: Option<DatumOfPeriode>,
}

/// `<raadpleeglocatie>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Raadpleeglocatie {
    #[serde(rename = "fysiek", default, skip_serializing_if = "Vec::is_empty")]
    pub fysiek: Vec<String>,

    #[serde(rename = "online", default, skip_serializing_if = "Vec::is_empty")]
    pub online: Vec<String>,
}

/// Represents the `<aggregatie>` element (Archief, Serie, Dossier, Record).
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Aggregatie {
    #[serde(
        rename = "identificatiekenmerk",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub identificatiekenmerk: Option<String>,

    #[serde(rename = "aggregatieniveau", default, skip_serializing_if = "Option::is_none")]
    pub aggregatieniveau: Option<String>,

    #[serde(rename = "naam", default, skip_serializing_if = "Vec::is_empty")]
    pub naam: Vec<String>,

    #[serde(rename = "classificatie", default, skip_serializing_if = "Vec::is_empty")]
    pub classificatie: Vec<Classificatie>,

    #[serde(rename = "omschrijving", default, skip_serializing_if = "Vec::is_empty")]
    pub omschrijving: Vec<String>,

    #[serde(rename = "plaats", default, skip_serializing_if = "Vec::is_empty")]
    pub plaats: Vec<String>,

    #[serde(rename = "dekking", default, skip_serializing_if = "Vec::is_empty")]
    pub dekking: Vec<Dekking>,

    #[serde(rename = "taal", default, skip_serializing_if = "Vec::is_empty")]
    pub taal: Vec<String>,

    #[serde(rename = "eventGeschiedenis", default, skip_serializing_if = "Vec::is_empty")]
    pub event_geschiedenis: Vec<EventGeschiedenis>,

    #[serde(rename = "eventPlan", default, skip_serializing_if = "Vec::is_empty")]
    pub event_plan: Vec<EventPlan>,

    #[serde(rename = "relatie", default, skip_serializing_if = "Vec::is_empty")]
    pub relatie: Vec<Relatie>,

    #[serde(rename = "context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,

    #[serde(
        rename = "externIdentificatiekenmerken",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub extern_identificatiekenmerken: Vec<ExternIdentificatiekenmerk>,

    #[serde(rename = "vorm", default, skip_serializing_if = "Vec::is_empty")]
    pub vorm: Vec<Vorm>,

    #[serde(rename = "integriteit", default, skip_serializing_if = "Option::is_none")]
    pub integriteit: Option<String>,

    #[serde(rename = "openbaarheid", default, skip_serializing_if = "Vec::is_empty")]
    pub openbaarheid: Vec<Openbaarheid>,

    #[serde(rename = "vertrouwelijkheid", default, skip_serializing_if = "Vec::is_empty")]
    pub vertrouwelijkheid: Vec<Vertrouwelijkheid>,

    #[serde(rename = "gebruiksrechten", default, skip_serializing_if = "Vec::is_empty")]
    pub gebruiksrechten: Vec<Gebruiksrechten>,

    #[serde(rename = "raadpleeglocatie", default, skip_serializing_if = "Vec::is_empty")]
    pub raadpleeglocatie: Vec<Raadpleeglocatie>,
}

// --- Bestand building blocks ---

/// `<bestandsnaam>` inside `<formaat>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Bestandsnaam {
    #[serde(rename = "naam", default)]
    pub naam: String,

    #[serde(rename = "extensie", default, skip_serializing_if = "Option::is_none")]
    pub extensie: Option<String>,
}

/// `<creatieapplicatie>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Creatieapplicatie {
    #[serde(rename = "naam", default)]
    pub naam: String,

    #[serde(rename = "versie", default, skip_serializing_if = "Option::is_none")]
    pub versie: Option<String>,

    #[serde(rename = "datumAanmaak", default, skip_serializing_if = "Option::is_none")]
    pub datum_aanmaak: Option<String>,
}

/// `<fysiekeIntegriteit>`: the declared fixity of a file.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct FysiekeIntegriteit {
    #[serde(rename = "algoritme", default)]
    pub algoritme: String,

    #[serde(rename = "waarde", default)]
    pub waarde: String,

    #[serde(rename = "datumEnTijd", default)]
    pub datum_en_tijd: String,
}

/// `<formaat>`
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Formaat {
    #[serde(
        rename = "identificatiekenmerk",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub identificatiekenmerk: Option<String>,

    #[serde(rename = "bestandsnaam", default, skip_serializing_if = "Option::is_none")]
    pub bestandsnaam: Option<Bestandsnaam>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub formaat_type: Option<String>,

    #[serde(rename = "omvang", default, skip_serializing_if = "Option::is_none")]
    pub omvang: Option<u64>,

    #[serde(rename = "bestandsformaat", default, skip_serializing_if = "Option::is_none")]
    pub bestandsformaat: Option<String>,

    #[serde(
        rename = "creatieapplicatie",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub creatieapplicatie: Option<Creatieapplicatie>,

    #[serde(
        rename = "fysiekeIntegriteit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fysieke_integriteit: Option<FysiekeIntegriteit>,

    #[serde(rename = "datumAanmaak", default, skip_serializing_if = "Option::is_none")]
    pub datum_aanmaak: Option<String>,

    #[serde(rename = "eventPlan", default, skip_serializing_if = "Vec::is_empty")]
    pub event_plan: Vec<EventPlan>,

    #[serde(rename = "relatie", default, skip_serializing_if = "Vec::is_empty")]
    pub relatie: Vec<Relatie>,
}

/// Represents the `<bestand>` element: one binary object.
///
/// Fields follow the schema sequence so a parsed leaf serializes back
/// without losing elements.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Bestand {
    #[serde(
        rename = "identificatiekenmerk",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub identificatiekenmerk: Option<String>,

    #[serde(rename = "aggregatieniveau", default, skip_serializing_if = "Option::is_none")]
    pub aggregatieniveau: Option<String>,

    #[serde(rename = "naam", default, skip_serializing_if = "Vec::is_empty")]
    pub naam: Vec<String>,

    #[serde(rename = "omschrijving", default, skip_serializing_if = "Vec::is_empty")]
    pub omschrijving: Vec<String>,

    #[serde(rename = "taal", default, skip_serializing_if = "Vec::is_empty")]
    pub taal: Vec<String>,

    #[serde(rename = "eventGeschiedenis", default, skip_serializing_if = "Vec::is_empty")]
    pub event_geschiedenis: Vec<EventGeschiedenis>,

    #[serde(rename = "relatie", default, skip_serializing_if = "Vec::is_empty")]
    pub relatie: Vec<Relatie>,

    #[serde(rename = "context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,

    #[serde(rename = "vorm", default, skip_serializing_if = "Vec::is_empty")]
    pub vorm: Vec<Vorm>,

    #[serde(rename = "formaat", default, skip_serializing_if = "Vec::is_empty")]
    pub formaat: Vec<Formaat>,

    #[serde(rename = "integriteit", default, skip_serializing_if = "Option::is_none")]
    pub integriteit: Option<String>,

    #[serde(rename = "openbaarheid", default, skip_serializing_if = "Vec::is_empty")]
    pub openbaarheid: Vec<Openbaarheid>,

    #[serde(rename = "vertrouwelijkheid", default, skip_serializing_if = "Vec::is_empty")]
    pub vertrouwelijkheid: Vec<Vertrouwelijkheid>,

    #[serde(rename = "gebruiksrechten", default, skip_serializing_if = "Vec::is_empty")]
    pub gebruiksrechten: Vec<Gebruiksrechten>,
}
