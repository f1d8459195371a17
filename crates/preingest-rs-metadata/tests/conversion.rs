// crates/preingest-rs-metadata/tests/conversion.rs

use preingest_rs_metadata::{
    ConversionSettings, Dialect, MdtoNode, MetadataDocument, MetadataError, NodeKind, ToPxNode,
    convert_topx_to_mdto, load_document_from_str, load_mdto_from_str, load_topx_from_str,
    save_mdto_to_string, save_topx_to_string,
};
use std::fs;
use std::path::PathBuf;

/// Helper function to load a test file from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A full dossier converts into an informatieobject that carries every
/// mapped group.
#[test]
fn test_convert_dossier_fixture() {
    init_logger();
    let topx = load_topx_from_str(&load_test_file("dossier.metadata")).expect("parse ToPX");
    let ToPxNode::Aggregatie(_) = &topx else {
        panic!("fixture should be an aggregatie");
    };

    let mdto = convert_topx_to_mdto(&topx, &ConversionSettings::default()).expect("convert");
    let MdtoNode::Informatieobject(io) = &mdto else {
        panic!("aggregatie must become informatieobject");
    };

    assert_eq!(io.naam, "Bouwvergunning Kerkstraat 1 / Deel 1");
    assert_eq!(io.identificatie[0].identificatie_kenmerk, "NL-HlmNHA-3001-12");
    assert_eq!(
        io.aggregatieniveau.as_ref().map(|b| b.begrip_label.as_str()),
        Some("Dossier")
    );

    // classificatie + folded vorm
    assert_eq!(io.classificatie.len(), 2);
    assert_eq!(io.classificatie[1].begrip_label, "dossier");

    // eventGeschiedenis + integriteit
    assert_eq!(io.event.len(), 2);
    assert_eq!(io.event[1].event_type.begrip_label, "Integriteit");

    let termijn = io.bewaartermijn.as_ref().expect("bewaartermijn");
    assert_eq!(termijn.termijn_looptijd.as_deref(), Some("2023-01-01/2033-01-01"));

    assert_eq!(io.dekking_in_tijd[0].dekking_in_tijd_einddatum.as_deref(), Some("2013-01-01"));
    assert_eq!(io.dekking_in_ruimte[0].verwijzing_naam, "Haarlem");

    // gebruiksrechten precede openbaarheid
    let restrictions: Vec<&str> = io
        .beperking_gebruik
        .iter()
        .map(|b| b.beperking_gebruik_type.begrip_label.as_str())
        .collect();
    assert_eq!(restrictions, vec!["Geen", "Openbaar"]);
}

/// "Record" is the only relabelled aggregation level.
#[test]
fn test_convert_record_fixture_relabels_level() {
    let topx = load_topx_from_str(&load_test_file("record.metadata")).unwrap();
    let mdto = convert_topx_to_mdto(&topx, &ConversionSettings::default()).unwrap();
    let doc = MetadataDocument::Mdto(mdto);
    assert_eq!(doc.level_label(), Some("Archiefstuk"));
}

/// The file block is copied verbatim from `fysiekeIntegriteit`.
#[test]
fn test_convert_bestand_fixture() {
    let topx = load_topx_from_str(&load_test_file("bestand.metadata")).unwrap();
    let settings = ConversionSettings {
        identification_source: "Noord-Hollands Archief".into(),
        ..Default::default()
    };
    let MdtoNode::Bestand(b) = convert_topx_to_mdto(&topx, &settings).unwrap() else {
        panic!("bestand must stay bestand");
    };

    assert_eq!(b.identificatie[0].identificatie_bron, "Noord-Hollands Archief");
    assert_eq!(b.omvang, Some(48213));
    assert_eq!(
        b.bestandsformaat.as_ref().map(|f| f.begrip_label.as_str()),
        Some("fmt/354")
    );
    assert_eq!(b.checksum[0].checksum_algoritme.begrip_label, "SHA-256");
    assert_eq!(
        b.checksum[0].checksum_waarde,
        "2c26b46b68ffc68ff99b453c1d30413413422d706483bfa0f98a5e886266e7ae"
    );
    assert_eq!(b.checksum[0].checksum_datum, "2013-02-11T10:12:00");
}

/// A node without `naam` is rejected instead of producing an empty element.
#[test]
fn test_convert_missing_name_fixture() {
    let topx = load_topx_from_str(&load_test_file("missing_name.metadata")).unwrap();
    let result = convert_topx_to_mdto(&topx, &ConversionSettings::default());
    assert!(matches!(
        result,
        Err(MetadataError::MissingRequiredField { field: "naam" })
    ));
}

/// Converting twice and serializing yields byte-identical documents, which
/// also parse back into the same node.
#[test]
fn test_conversion_output_is_deterministic() {
    let topx = load_topx_from_str(&load_test_file("dossier.metadata")).unwrap();
    let settings = ConversionSettings::default();

    let first = save_mdto_to_string(&convert_topx_to_mdto(&topx, &settings).unwrap()).unwrap();
    let second = save_mdto_to_string(&convert_topx_to_mdto(&topx, &settings).unwrap()).unwrap();
    assert_eq!(first, second);

    let reparsed = load_mdto_from_str(&first).expect("written MDTO must parse");
    assert_eq!(reparsed, convert_topx_to_mdto(&topx, &settings).unwrap());
}

/// Every dialect is recognised from its root element.
#[test]
fn test_document_dialects() {
    let mdto = load_document_from_str(&load_test_file("archief.mdto.xml")).unwrap();
    assert_eq!(mdto.dialect(), Dialect::Mdto);
    assert_eq!(mdto.kind(), Some(NodeKind::Aggregation));
    assert_eq!(mdto.level_label(), Some("Archief"));

    let MetadataDocument::Mdto(MdtoNode::Informatieobject(io)) = &mdto else {
        panic!("expected informatieobject");
    };
    assert_eq!(io.bevat_onderdeel.len(), 1);

    let topx = load_document_from_str(&load_test_file("bestand.metadata")).unwrap();
    assert_eq!(topx.dialect(), Dialect::ToPx);
    assert_eq!(topx.kind(), Some(NodeKind::File));

    let opex = load_document_from_str(&load_test_file("transfer.opex")).unwrap();
    assert_eq!(opex.dialect(), Dialect::Opex);
    assert_eq!(opex.kind(), None);
    assert_eq!(opex.name().as_deref(), Some("Bouwvergunning Kerkstraat 1"));
}

/// A ToPX bestand carrying every optional group writes back unchanged.
#[test]
fn test_topx_bestand_round_trip_keeps_all_groups() {
    init_logger();
    let topx = load_topx_from_str(&load_test_file("bestand_full.metadata")).expect("parse ToPX");
    let ToPxNode::Bestand(bestand) = &topx else {
        panic!("fixture should be a bestand");
    };
    assert_eq!(bestand.taal, ["nl"]);
    assert_eq!(bestand.event_geschiedenis[0].event_type, "Vastgesteld");
    assert_eq!(bestand.relatie[0].relatie_id, "NL-Test-1-D1");
    assert_eq!(
        bestand.context.as_ref().map(|c| c.actor.len()),
        Some(1)
    );
    assert_eq!(bestand.vorm[0].redactie_genre.as_deref(), Some("verslag"));
    assert_eq!(bestand.integriteit.as_deref(), Some("Gecontroleerd bij overdracht"));
    assert_eq!(
        bestand.openbaarheid[0].omschrijving_beperkingen,
        "Beperkt openbaar"
    );
    assert_eq!(bestand.vertrouwelijkheid[0].classificatie_niveau, "Intern");
    assert_eq!(
        bestand.gebruiksrechten[0].omschrijving_voorwaarden,
        "Geen hergebruik"
    );

    let written = save_topx_to_string(&topx).expect("write ToPX");
    // Schema order: vorm before formaat before integriteit.
    let vorm = written.find("<vorm>").unwrap();
    let formaat = written.find("<formaat>").unwrap();
    let integriteit = written.find("<integriteit>").unwrap();
    assert!(vorm < formaat && formaat < integriteit, "{written}");

    let reparsed = load_topx_from_str(&written).expect("written ToPX must parse");
    assert_eq!(reparsed, topx);
}
