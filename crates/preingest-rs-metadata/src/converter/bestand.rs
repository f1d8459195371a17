// crates/preingest-rs-metadata/src/converter/bestand.rs

use super::{ConversionSettings, non_blank, required_identifier, required_name};
use crate::error::MetadataError;
use crate::model::mdto::{self, BegripGegevens, ChecksumGegevens, IdentificatieGegevens};
use crate::model::topx;

/// Maps a ToPX `<bestand>` onto an MDTO `<bestand>`.
///
/// Size and format come from the first `formaat` entry that declares them;
/// checksums are copied verbatim from every `fysiekeIntegriteit` block.
pub(super) fn convert_bestand(
    source: &topx::Bestand,
    settings: &ConversionSettings,
) -> Result<mdto::Bestand, MetadataError> {
    let kenmerk = required_identifier(source.identificatiekenmerk.as_deref())?;
    let naam = required_name(&source.naam)?;

    let omvang = source.formaat.iter().find_map(|f| f.omvang);

    let bestandsformaat = source
        .formaat
        .iter()
        .find_map(|f| non_blank(f.bestandsformaat.as_deref()))
        .map(|format| BegripGegevens::new(format, None, settings.format_register.as_str()));

    let checksum = source
        .formaat
        .iter()
        .filter_map(|f| f.fysieke_integriteit.as_ref())
        .map(|integriteit| ChecksumGegevens {
            checksum_algoritme: BegripGegevens::new(
                integriteit.algoritme.trim(),
                None,
                settings.checksum_algorithm_list.as_str(),
            ),
            checksum_waarde: integriteit.waarde.trim().to_string(),
            checksum_datum: integriteit.datum_en_tijd.trim().to_string(),
        })
        .collect();

    Ok(mdto::Bestand {
        identificatie: vec![IdentificatieGegevens::new(
            kenmerk,
            settings.identification_source.as_str(),
        )],
        naam,
        omvang,
        bestandsformaat,
        checksum,
        url_bestand: None,
        is_representatie_van: None,
    })
}
