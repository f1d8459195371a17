// crates/preingest-rs/tests/end_to_end.rs

use preingest_rs::{
    ChainErrorPolicy, ErrorKind, NoOpSink, OperationReport, Outcome, OutcomeSink, Preingest,
    PreingestConfig, RunSummary, SidecarConvention,
};
use preingest_rs_metadata::model::topx;
use preingest_rs_metadata::{MdtoNode, ToPxNode, load_mdto_from_str, load_topx_from_str};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

const ROOT: &str = "NL-Test-1";
// sha256("hello"), the content of report.txt
const REPORT_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Copies `tests/data/collection` into `target`.
fn copy_fixture(target: &Path) {
    let mut fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    fixture.push("tests");
    fixture.push("data");
    fixture.push("collection");

    for entry in WalkDir::new(&fixture) {
        let entry = entry.expect("walk fixture");
        let relative = entry.path().strip_prefix(&fixture).unwrap();
        let path = target.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&path).unwrap();
        } else {
            fs::copy(entry.path(), &path)
                .unwrap_or_else(|e| panic!("Failed to copy {:?}: {}", entry.path(), e));
        }
    }
}

/// A fresh working directory holding the fixture collection.
fn working_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    copy_fixture(dir.path());
    dir
}

fn archive(dir: &Path) -> PathBuf {
    dir.join(ROOT)
}

fn read_mdto(path: &Path) -> MdtoNode {
    let content =
        fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));
    load_mdto_from_str(&content).expect("parse MDTO")
}

fn read_topx_bestand(path: &Path) -> topx::Bestand {
    let content =
        fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));
    let ToPxNode::Bestand(bestand) = load_topx_from_str(&content).expect("parse ToPX") else {
        panic!("{:?} must be a bestand", path);
    };
    bestand
}

/// Writes a DROID export listing `binary` as plain text into `dir`.
fn write_droid_csv(dir: &Path, binary: &Path) {
    let csv = format!(
        "\"ID\",\"PARENT_ID\",\"URI\",\"FILE_PATH\",\"NAME\",\"METHOD\",\"STATUS\",\"SIZE\",\"TYPE\",\"EXT\",\"LAST_MODIFIED\",\"EXTENSION_MISMATCH\",\"HASH\",\"FORMAT_COUNT\",\"PUID\",\"MIME_TYPE\",\"FORMAT_NAME\",\"FORMAT_VERSION\"\n\
         \"1\",\"\",\"\",\"{}\",\"report.txt\",\"Extension\",\"Done\",\"5\",\"File\",\"txt\",\"\",\"false\",\"\",\"1\",\"x-fmt/111\",\"text/plain\",\"Plain Text File\",\"\"\n",
        binary.display()
    );
    fs::write(dir.join("droid.csv"), csv).unwrap();
}

fn summary(processed: usize, accepted: usize, rejected: usize) -> RunSummary {
    RunSummary {
        processed,
        accepted,
        rejected,
    }
}

/// Converts the fixture with default settings and checks that it succeeded.
fn converted(engine: &Preingest) -> TempDir {
    let dir = working_dir();
    let report = engine.convert(dir.path(), &mut NoOpSink);
    assert_eq!(report.summary, summary(3, 3, 0), "{:#?}", report.outcomes);
    dir
}

struct CollectingSink(Vec<Outcome>);

impl OutcomeSink for CollectingSink {
    fn on_outcome(&mut self, outcome: &Outcome) {
        self.0.push(outcome.clone());
    }
}

/// Archief / Dossier / Bestand converts into three MDTO sidecars that pass
/// structural validation without findings.
#[test]
fn test_convert_then_validate() {
    init_logger();
    let engine = Preingest::default();
    let dir = converted(&engine);
    let root = archive(dir.path());

    assert!(root.join("NL-Test-1.mdto.xml").is_file());
    assert!(root.join("D1").join("D1.mdto.xml").is_file());
    assert!(root.join("D1").join("report.txt.bestand.mdto.xml").is_file());
    // Sources are kept by default.
    assert!(root.join("D1").join("D1.metadata").is_file());

    let MdtoNode::Informatieobject(dossier) = read_mdto(&root.join("D1").join("D1.mdto.xml")) else {
        panic!("dossier must be an informatieobject");
    };
    assert_eq!(
        dossier.aggregatieniveau.unwrap().begrip_label,
        "Dossier"
    );

    let report = engine.validate(dir.path(), SidecarConvention::Mdto, &mut NoOpSink);
    assert!(report.explanations.is_empty(), "{:#?}", report.explanations);
    assert_eq!(report.summary, summary(1, 1, 0));
}

/// The untouched ToPX source is structurally valid as well.
#[test]
fn test_validate_topx_source() {
    init_logger();
    let dir = working_dir();
    let report = Preingest::default().validate(dir.path(), SidecarConvention::ToPx, &mut NoOpSink);
    assert!(report.is_success(), "{:#?}", report.explanations);
}

/// A session folder named after the archive does not confuse the chain anchor.
#[test]
fn test_working_dir_named_like_archive() {
    init_logger();
    let tmp = tempfile::tempdir().unwrap();
    let session = tmp.path().join(ROOT);
    copy_fixture(&session);

    let report = Preingest::default().validate(&session, SidecarConvention::ToPx, &mut NoOpSink);
    assert_eq!(report.summary, summary(1, 1, 0), "{:#?}", report.outcomes);
}

/// A folder without its sidecar aborts the run before anything is written.
#[test]
fn test_missing_folder_sidecar_fails_run() {
    init_logger();
    let dir = working_dir();
    let missing = archive(dir.path()).join("D1").join("D1.metadata");
    fs::remove_file(&missing).unwrap();

    let mut sink = CollectingSink(Vec::new());
    let report = Preingest::default().convert(dir.path(), &mut sink);

    assert_eq!(report.summary, summary(1, 0, 1));
    assert_eq!(sink.0.len(), 1);
    assert_eq!(report.outcomes[0].target, missing);
    assert_eq!(report.outcomes[0].error_kind, Some(ErrorKind::MissingSidecar));
    assert!(!archive(dir.path()).join("NL-Test-1.mdto.xml").exists());
}

/// With `skip-chain`, a broken chain is rejected and the others still run.
#[test]
fn test_skip_chain_policy() {
    init_logger();
    let dir = working_dir();
    let d2 = archive(dir.path()).join("D2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(d2.join("notes.txt"), "notes").unwrap();
    fs::copy(
        archive(dir.path()).join("D1").join("report.txt.metadata"),
        d2.join("notes.txt.metadata"),
    )
    .unwrap();

    let config = PreingestConfig {
        chain_error_policy: ChainErrorPolicy::SkipChain,
        ..Default::default()
    };
    let report = Preingest::new(config).convert(dir.path(), &mut NoOpSink);

    assert_eq!(report.summary, summary(4, 3, 1));
    let rejected: Vec<&Outcome> = report.outcomes.iter().filter(|o| !o.success).collect();
    assert_eq!(rejected[0].target, d2.join("D2.metadata"));
    assert!(!d2.join("notes.txt.bestand.mdto.xml").exists());
}

/// `remove_converted_sources` deletes every ToPX sidecar that was converted.
#[test]
fn test_convert_removes_sources() {
    init_logger();
    let config = PreingestConfig {
        remove_converted_sources: true,
        ..Default::default()
    };
    let engine = Preingest::new(config);
    let dir = converted(&engine);

    let leftovers: Vec<PathBuf> = WalkDir::new(dir.path())
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "metadata"))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

/// Running fixity twice leaves a single checksum with the binary's digest.
#[test]
fn test_fixity_is_idempotent() {
    init_logger();
    let engine = Preingest::default();
    let dir = converted(&engine);

    for _ in 0..2 {
        let report = engine.fixity(dir.path(), SidecarConvention::Mdto, &mut NoOpSink);
        assert_eq!(report.summary, summary(1, 1, 0), "{:#?}", report.outcomes);
    }

    let leaf = archive(dir.path()).join("D1").join("report.txt.bestand.mdto.xml");
    let MdtoNode::Bestand(bestand) = read_mdto(&leaf) else {
        panic!("leaf must be a bestand");
    };
    assert_eq!(bestand.checksum.len(), 1);
    assert_eq!(bestand.checksum[0].checksum_waarde, REPORT_SHA256);
    assert_eq!(bestand.checksum[0].checksum_algoritme.begrip_label, "SHA-256");
}

/// Relationship propagation links every neighbour once, however often it runs.
#[test]
fn test_relationships_are_idempotent() {
    init_logger();
    let engine = Preingest::default();
    let dir = converted(&engine);
    let root = archive(dir.path());

    let first = engine.relationships(dir.path(), &mut NoOpSink);
    assert_eq!(first.summary, summary(3, 3, 0), "{:#?}", first.outcomes);
    let second = engine.relationships(dir.path(), &mut NoOpSink);
    assert!(second.is_success());
    assert!(
        second
            .outcomes
            .iter()
            .all(|o| o.messages == ["relaties ongewijzigd"])
    );

    let MdtoNode::Informatieobject(archief) = read_mdto(&root.join("NL-Test-1.mdto.xml")) else {
        panic!("archief must be an informatieobject");
    };
    assert!(archief.is_onderdeel_van.is_empty());
    assert_eq!(archief.bevat_onderdeel.len(), 1);

    let MdtoNode::Informatieobject(dossier) = read_mdto(&root.join("D1").join("D1.mdto.xml")) else {
        panic!("dossier must be an informatieobject");
    };
    assert_eq!(dossier.is_onderdeel_van.len(), 1);
    assert_eq!(
        dossier.is_onderdeel_van[0]
            .verwijzing_identificatie
            .as_ref()
            .unwrap()
            .identificatie_kenmerk,
        "NL-Test-1"
    );
    assert_eq!(dossier.bevat_onderdeel.len(), 1);
    assert!(dossier.heeft_representatie.is_empty());

    let MdtoNode::Bestand(bestand) =
        read_mdto(&root.join("D1").join("report.txt.bestand.mdto.xml"))
    else {
        panic!("leaf must be a bestand");
    };
    assert_eq!(
        bestand.is_representatie_van.unwrap().verwijzing_naam,
        "Subsidieaanvraag sportvereniging"
    );
}

/// The format pass picks up a DROID export from the working directory.
#[test]
fn test_format_with_droid_csv() {
    init_logger();
    let engine = Preingest::default();
    let dir = converted(&engine);
    let binary = archive(dir.path()).join("D1").join("report.txt");
    write_droid_csv(dir.path(), &binary);

    let report = engine.format(dir.path(), SidecarConvention::Mdto, None, &mut NoOpSink);
    assert_eq!(report.summary, summary(1, 1, 0), "{:#?}", report.outcomes);

    let MdtoNode::Bestand(bestand) =
        read_mdto(&archive(dir.path()).join("D1").join("report.txt.bestand.mdto.xml"))
    else {
        panic!("leaf must be a bestand");
    };
    let formaat = bestand.bestandsformaat.unwrap();
    assert_eq!(formaat.begrip_code.as_deref(), Some("x-fmt/111"));
    assert_eq!(formaat.begrip_label, "Plain Text File");
}

/// Fixity over the ToPX source rewrites the first checksum and keeps every
/// other element of the leaf.
#[test]
fn test_fixity_on_topx_keeps_other_elements() {
    init_logger();
    let dir = working_dir();
    let leaf = archive(dir.path()).join("D1").join("report.txt.metadata");
    let original = read_topx_bestand(&leaf);

    let report = Preingest::default().fixity(dir.path(), SidecarConvention::ToPx, &mut NoOpSink);
    assert_eq!(report.summary, summary(1, 1, 0), "{:#?}", report.outcomes);

    let rewritten = read_topx_bestand(&leaf);
    let integriteit = rewritten.formaat[0]
        .fysieke_integriteit
        .clone()
        .expect("fysiekeIntegriteit");
    assert_eq!(integriteit.algoritme, "SHA-256");
    assert_eq!(integriteit.waarde, REPORT_SHA256);
    assert_ne!(integriteit.datum_en_tijd, "2015-06-01T09:00:00");

    let mut expected = original;
    expected.formaat[0].fysieke_integriteit = Some(integriteit);
    assert_eq!(rewritten, expected);
    assert_eq!(rewritten.openbaarheid[0].omschrijving_beperkingen, "Beperkt openbaar");
}

/// The format pass over the ToPX source only fills in `bestandsformaat`.
#[test]
fn test_format_on_topx_keeps_other_elements() {
    init_logger();
    let dir = working_dir();
    let root = archive(dir.path());
    let leaf = root.join("D1").join("report.txt.metadata");
    let original = read_topx_bestand(&leaf);
    write_droid_csv(dir.path(), &root.join("D1").join("report.txt"));

    let report =
        Preingest::default().format(dir.path(), SidecarConvention::ToPx, None, &mut NoOpSink);
    assert_eq!(report.summary, summary(1, 1, 0), "{:#?}", report.outcomes);

    let mut expected = original;
    expected.formaat[0].bestandsformaat = Some("x-fmt/111".to_string());
    assert_eq!(read_topx_bestand(&leaf), expected);
}

/// Without any DROID export the format pass fails as a whole.
#[test]
fn test_format_without_table_fails_run() {
    init_logger();
    let engine = Preingest::default();
    let dir = converted(&engine);

    let report: OperationReport =
        engine.format(dir.path(), SidecarConvention::Mdto, None, &mut NoOpSink);
    assert_eq!(report.summary, summary(1, 0, 1));
    assert_eq!(
        report.outcomes[0].error_kind,
        Some(ErrorKind::FormatTableMissing)
    );
}

/// An empty working directory has no archive root.
#[test]
fn test_empty_working_dir() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let report = Preingest::default().validate(dir.path(), SidecarConvention::Mdto, &mut NoOpSink);
    assert_eq!(report.summary, summary(1, 0, 1));
    assert_eq!(report.outcomes[0].error_kind, Some(ErrorKind::Structure));
}
