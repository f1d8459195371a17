// crates/preingest-rs-metadata/src/converter/aggregatie.rs

use super::dates::{TemporalValue, resolve_date_str, resolve_datum_of_periode};
use super::{
    ConversionSettings, INTEGRITY_EVENT_LABEL, LIST_CLASSIFICATIE, LIST_DEKKING_IN_TIJD,
    LIST_EVENT_PLAN, LIST_EVENT_TYPE, LIST_GEBRUIKSRECHTEN, LIST_OPENBAARHEID, LIST_REDACTIE_GENRE,
    LIST_RELATIE, LIST_STRUCTUUR, LIST_VERSCHIJNINGSVORM, LIST_VERTROUWELIJKHEID, begrip,
    non_blank, relabel_aggregation_level, required_identifier, required_name,
};
use crate::error::MetadataError;
use crate::model::mdto::{
    BegripGegevens, BeperkingGebruikGegevens, DekkingInTijdGegevens, EventGegevens,
    GerelateerdInformatieobjectGegevens, IdentificatieGegevens, Informatieobject,
    RaadpleeglocatieGegevens, TermijnGegevens, VerwijzingGegevens,
};
use crate::model::topx::{self, Aggregatie, DatumOfPeriode};
use log::trace;

/// Maps `<aggregatie>` onto `<informatieobject>`.
pub(super) fn convert_aggregatie(
    source: &Aggregatie,
    settings: &ConversionSettings,
) -> Result<Informatieobject, MetadataError> {
    // 1. Mandatory fields first, so a rejected node never half-converts.
    let kenmerk = required_identifier(source.identificatiekenmerk.as_deref())?;
    let naam = required_name(&source.naam)?;
    trace!("Converting aggregatie '{}' ({})", naam, kenmerk);

    let mut identificatie = vec![IdentificatieGegevens::new(
        kenmerk,
        settings.identification_source.as_str(),
    )];
    identificatie.extend(source.extern_identificatiekenmerken.iter().map(|ext| {
        IdentificatieGegevens::new(ext.nummer_binnen_systeem.trim(), ext.kenmerk_systeem.trim())
    }));

    // 2. Classification list: schema entries, then the folded-in `vorm` entries.
    let mut classificatie: Vec<BegripGegevens> =
        source.classificatie.iter().map(convert_classificatie).collect();
    classificatie.extend(source.vorm.iter().flat_map(convert_vorm));

    // 3. Events: history in document order, then the integrity statement.
    let mut event: Vec<EventGegevens> = source
        .event_geschiedenis
        .iter()
        .map(convert_event_geschiedenis)
        .collect();
    if let Some(integriteit) = non_blank(source.integriteit.as_deref()) {
        event.push(EventGegevens {
            event_type: begrip(INTEGRITY_EVENT_LABEL, LIST_EVENT_TYPE),
            event_resultaat: Some(integriteit.to_string()),
            ..Default::default()
        });
    }

    let (archiefvormer, activiteit) = match &source.context {
        Some(context) => convert_context(context, settings),
        None => (Vec::new(), Vec::new()),
    };

    Ok(Informatieobject {
        identificatie,
        naam,
        aggregatieniveau: non_blank(source.aggregatieniveau.as_deref()).map(|level| {
            BegripGegevens::new(
                relabel_aggregation_level(level),
                None,
                settings.aggregation_level_list.as_str(),
            )
        }),
        classificatie,
        trefwoord: Vec::new(),
        omschrijving: trimmed_values(&source.omschrijving),
        raadpleeglocatie: source
            .raadpleeglocatie
            .iter()
            .map(convert_raadpleeglocatie)
            .collect(),
        dekking_in_tijd: source
            .dekking
            .iter()
            .filter_map(|d| d.in_tijd.as_ref())
            .map(convert_in_tijd)
            .collect(),
        dekking_in_ruimte: convert_dekking_in_ruimte(source),
        taal: trimmed_values(&source.taal),
        event,
        waardering: None,
        bewaartermijn: convert_event_plan(&source.event_plan),
        informatiecategorie: None,
        is_onderdeel_van: Vec::new(),
        bevat_onderdeel: Vec::new(),
        heeft_representatie: Vec::new(),
        aanvullende_metagegevens: Vec::new(),
        gerelateerd_informatieobject: source
            .relatie
            .iter()
            .filter(|r| !r.relatie_id.trim().is_empty())
            .map(|r| convert_relatie(r, settings))
            .collect(),
        archiefvormer,
        betrokkene: Vec::new(),
        activiteit,
        beperking_gebruik: convert_beperkingen(source),
    })
}

// --- Field groups ---

fn convert_classificatie(source: &topx::Classificatie) -> BegripGegevens {
    let code = source.code.trim();
    let label = non_blank(source.omschrijving.as_deref()).unwrap_or(code);
    let lijst = non_blank(Some(source.bron.as_str())).unwrap_or(LIST_CLASSIFICATIE);
    BegripGegevens::new(
        label,
        (!code.is_empty()).then(|| code.to_string()),
        lijst,
    )
}

fn convert_vorm(source: &topx::Vorm) -> Vec<BegripGegevens> {
    [
        (source.redactie_genre.as_deref(), LIST_REDACTIE_GENRE),
        (source.verschijningsvorm.as_deref(), LIST_VERSCHIJNINGSVORM),
        (source.structuur.as_deref(), LIST_STRUCTUUR),
    ]
    .into_iter()
    .filter_map(|(value, lijst)| non_blank(value).map(|v| begrip(v, lijst)))
    .collect()
}

fn convert_raadpleeglocatie(source: &topx::Raadpleeglocatie) -> RaadpleeglocatieGegevens {
    RaadpleeglocatieGegevens {
        raadpleeglocatie_fysiek: source
            .fysiek
            .iter()
            .filter_map(|f| non_blank(Some(f.as_str())))
            .map(VerwijzingGegevens::named)
            .collect(),
        raadpleeglocatie_online: trimmed_values(&source.online),
    }
}

fn convert_in_tijd(source: &topx::InTijd) -> DekkingInTijdGegevens {
    DekkingInTijdGegevens {
        dekking_in_tijd_type: begrip("Periode", LIST_DEKKING_IN_TIJD),
        dekking_in_tijd_begindatum: resolve_datum_of_periode(&source.begin).to_mdto_string(),
        dekking_in_tijd_einddatum: source
            .eind
            .as_ref()
            .map(|eind| resolve_datum_of_periode(eind).to_mdto_string()),
    }
}

/// Geographic areas from every `dekking`, followed by `plaats`.
fn convert_dekking_in_ruimte(source: &Aggregatie) -> Vec<VerwijzingGegevens> {
    source
        .dekking
        .iter()
        .flat_map(|d| d.geografisch_gebied.iter())
        .chain(source.plaats.iter())
        .filter_map(|gebied| non_blank(Some(gebied.as_str())))
        .map(VerwijzingGegevens::named)
        .collect()
}

fn convert_event_geschiedenis(source: &topx::EventGeschiedenis) -> EventGegevens {
    EventGegevens {
        event_type: begrip(&source.event_type, LIST_EVENT_TYPE),
        event_tijd: Some(resolve_datum_of_periode(&source.datum_of_periode).to_mdto_string()),
        event_verantwoordelijke_actor: non_blank(source.verantwoordelijke_functionaris.as_deref())
            .map(VerwijzingGegevens::named),
        event_resultaat: non_blank(source.beschrijving.as_deref()).map(String::from),
    }
}

/// Folds the retention plan into one `bewaartermijn`.
///
/// The looptijd is `"<earliest>/<latest>"` over every dated plan entry.
/// Entries without a `datum` do not take part; unreadable dates resolve to
/// the sentinel and do.
fn convert_event_plan(plans: &[topx::EventPlan]) -> Option<TermijnGegevens> {
    let dates: Vec<TemporalValue> = plans
        .iter()
        .filter_map(|plan| non_blank(plan.datum.as_deref()))
        .map(resolve_date_str)
        .collect();

    let earliest = dates.iter().min()?;
    let latest = dates.iter().max()?;

    let trigger = plans
        .iter()
        .find_map(|plan| non_blank(Some(plan.event_type.as_str())))
        .map(|label| begrip(label, LIST_EVENT_PLAN));

    Some(TermijnGegevens {
        termijn_trigger_start_looptijd: trigger,
        termijn_startdatum_looptijd: Some(earliest.to_mdto_string()),
        termijn_looptijd: Some(format!(
            "{}/{}",
            earliest.to_mdto_string(),
            latest.to_mdto_string()
        )),
        termijn_einddatum: Some(latest.to_mdto_string()),
    })
}

fn convert_relatie(
    source: &topx::Relatie,
    settings: &ConversionSettings,
) -> GerelateerdInformatieobjectGegevens {
    let id = source.relatie_id.trim();
    GerelateerdInformatieobjectGegevens {
        verwijzing: VerwijzingGegevens {
            verwijzing_naam: id.to_string(),
            verwijzing_identificatie: Some(IdentificatieGegevens::new(
                id,
                settings.identification_source.as_str(),
            )),
        },
        type_relatie: begrip(&source.type_relatie, LIST_RELATIE),
    }
}

/// Actors become `archiefvormer`, activities become `activiteit`.
fn convert_context(
    context: &topx::Context,
    settings: &ConversionSettings,
) -> (Vec<VerwijzingGegevens>, Vec<VerwijzingGegevens>) {
    let reference = |naam: &str, kenmerk: &str| VerwijzingGegevens {
        verwijzing_naam: naam.trim().to_string(),
        verwijzing_identificatie: non_blank(Some(kenmerk)).map(|k| {
            IdentificatieGegevens::new(k, settings.identification_source.as_str())
        }),
    };

    let actors = context
        .actor
        .iter()
        .map(|a| reference(&a.geautoriseerde_naam, &a.identificatiekenmerk))
        .collect();
    let activities = context
        .activiteit
        .iter()
        .map(|a| reference(&a.naam, &a.identificatiekenmerk))
        .collect();
    (actors, activities)
}

/// Rights, confidentiality and openness, concatenated in that order.
fn convert_beperkingen(source: &Aggregatie) -> Vec<BeperkingGebruikGegevens> {
    let gebruiksrechten = source.gebruiksrechten.iter().map(|g| {
        beperking(
            &g.omschrijving_voorwaarden,
            LIST_GEBRUIKSRECHTEN,
            g.datum_of_periode.as_ref(),
        )
    });
    let vertrouwelijkheid = source.vertrouwelijkheid.iter().map(|v| {
        beperking(
            &v.classificatie_niveau,
            LIST_VERTROUWELIJKHEID,
            v.datum_of_periode.as_ref(),
        )
    });
    let openbaarheid = source.openbaarheid.iter().map(|o| {
        beperking(
            &o.omschrijving_beperkingen,
            LIST_OPENBAARHEID,
            o.datum_of_periode.as_ref(),
        )
    });

    gebruiksrechten
        .chain(vertrouwelijkheid)
        .chain(openbaarheid)
        .collect()
}

fn beperking(
    label: &str,
    lijst: &str,
    datum: Option<&DatumOfPeriode>,
) -> BeperkingGebruikGegevens {
    BeperkingGebruikGegevens {
        beperking_gebruik_type: begrip(label, lijst),
        termijn: datum.map(|d| TermijnGegevens {
            termijn_startdatum_looptijd: Some(resolve_datum_of_periode(d).to_mdto_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn trimmed_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| non_blank(Some(v.as_str())))
        .map(String::from)
        .collect()
}
