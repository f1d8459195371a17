// crates/preingest-rs/src/rules.rs

//! Structural validation of aggregation-level sequences.
//!
//! Level names are derived root-first from a chain and checked against the
//! dialect's transition table and a set of global invariants. Every
//! violation is reported; nothing short-circuits.

use crate::aggregator::Chain;
use preingest_rs_metadata::Dialect;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const LEVEL_ARCHIEF: &str = "Archief";
pub const LEVEL_ARCHIEFSTUK: &str = "Archiefstuk";
pub const LEVEL_BESTAND: &str = "Bestand";
/// Level name used when a node carries no recognised label.
pub const LEVEL_GEEN: &str = "Geen";

type Transitions = &'static [(&'static str, &'static [&'static str])];

const MDTO_TRANSITIONS: Transitions = &[
    ("Archief", &["Serie", "Dossier", "Zaak", "Archiefstuk"]),
    ("Serie", &["Serie", "Dossier", "Archiefstuk"]),
    ("Dossier", &["Zaak", "Archiefstuk"]),
    ("Zaak", &["Archiefstuk"]),
    ("Archiefstuk", &["Bestand"]),
    ("Bestand", &[]),
];

const TOPX_TRANSITIONS: Transitions = &[
    ("Archief", &["Serie", "Dossier"]),
    ("Serie", &["Serie", "Dossier"]),
    ("Dossier", &["Dossier", "Record", "Bestand"]),
    ("Record", &["Record", "Bestand"]),
    ("Bestand", &[]),
];

/// The permitted-successor table of one dialect.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    dialect: Dialect,
    transitions: Transitions,
}

impl RuleTable {
    /// OPEX carries no aggregation levels and has no table.
    pub fn for_dialect(dialect: Dialect) -> Option<Self> {
        let transitions = match dialect {
            Dialect::Mdto => MDTO_TRANSITIONS,
            Dialect::ToPx => TOPX_TRANSITIONS,
            Dialect::Opex => return None,
        };
        Some(Self {
            dialect,
            transitions,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn knows(&self, level: &str) -> bool {
        self.successors(level).is_some()
    }

    /// Permitted successors of `level`, or `None` for a level outside the table.
    pub fn successors(&self, level: &str) -> Option<&'static [&'static str]> {
        self.transitions
            .iter()
            .find(|(name, _)| *name == level)
            .map(|(_, next)| *next)
    }

    pub fn permits(&self, level: &str, next: &str) -> bool {
        self.successors(level)
            .is_some_and(|allowed| allowed.contains(&next))
    }
}

/// Which rule an explanation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExplanationKind {
    EmptyChain,
    StartLevel,
    EndLevel,
    ArchiefCount,
    BestandCount,
    UnknownLevel,
    Transition,
}

/// One structural violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationItem {
    pub kind: ExplanationKind,
    pub message: String,
    pub metadata_path: PathBuf,
}

impl ExplanationItem {
    fn new(kind: ExplanationKind, message: impl Into<String>, path: &Path) -> Self {
        Self {
            kind,
            message: message.into(),
            metadata_path: path.to_path_buf(),
        }
    }
}

/// Derives one level name per chain entry, root first.
///
/// The leaf is always "Bestand". Other entries use the label read from
/// their own document, or "Geen" when it is absent or not part of the
/// document's dialect.
pub fn derive_level_names(chain: &Chain) -> Vec<String> {
    chain
        .root_first()
        .map(|node| {
            if node.is_leaf() {
                return LEVEL_BESTAND.to_string();
            }
            let document = node.document();
            let known = RuleTable::for_dialect(document.dialect());
            match (document.level_label(), known) {
                (Some(label), Some(table)) if table.knows(label) => label.to_string(),
                _ => LEVEL_GEEN.to_string(),
            }
        })
        .collect()
}

/// Explains every structural defect of `levels` (root first, as produced by
/// `derive_level_names`) for `chain`.
///
/// For MDTO the final step into the trailing "Bestand" is covered by the
/// end-level and count invariants rather than by the transition table.
/// ToPX checks it like every other step.
pub fn explain(chain: &Chain, levels: &[String]) -> Vec<ExplanationItem> {
    let paths: Vec<&Path> = chain.root_first().map(|n| n.metadata_path()).collect();
    let leaf_path = chain.leaf().metadata_path.as_path();
    let path_at = |index: usize| paths.get(index).copied().unwrap_or(leaf_path);

    let mut items = Vec::new();

    // 1. Global invariants.
    let (Some(first), Some(last)) = (levels.first(), levels.last()) else {
        items.push(ExplanationItem::new(
            ExplanationKind::EmptyChain,
            "De keten bevat geen niveaus",
            leaf_path,
        ));
        return items;
    };

    if first != LEVEL_ARCHIEF {
        items.push(ExplanationItem::new(
            ExplanationKind::StartLevel,
            format!("Het eerste niveau moet '{LEVEL_ARCHIEF}' zijn, maar is '{first}'"),
            path_at(0),
        ));
    }
    if last != LEVEL_BESTAND {
        items.push(ExplanationItem::new(
            ExplanationKind::EndLevel,
            format!("Het laatste niveau moet '{LEVEL_BESTAND}' zijn, maar is '{last}'"),
            path_at(levels.len() - 1),
        ));
    }
    if count(levels, LEVEL_ARCHIEF) != 1 {
        let at = position_after_first(levels, LEVEL_ARCHIEF).unwrap_or(0);
        items.push(ExplanationItem::new(
            ExplanationKind::ArchiefCount,
            "Archief mag alleen 1 keer voorkomen",
            path_at(at),
        ));
    }
    if count(levels, LEVEL_BESTAND) != 1 {
        let at = position_after_first(levels, LEVEL_BESTAND).unwrap_or(levels.len() - 1);
        items.push(ExplanationItem::new(
            ExplanationKind::BestandCount,
            "Bestand mag alleen 1 keer voorkomen",
            path_at(at),
        ));
    }

    // 2. Transitions between consecutive levels.
    let Some(table) = RuleTable::for_dialect(chain.leaf().document.dialect()) else {
        return items;
    };
    let last_index = levels.len() - 1;
    // MDTO only lists "Archiefstuk -> Bestand"; any MDTO aggregation may hold files.
    let exempt_leaf = table.dialect() == Dialect::Mdto;
    for (index, pair) in levels.windows(2).enumerate() {
        let (current, next) = (pair[0].as_str(), pair[1].as_str());
        let next_index = index + 1;

        let Some(allowed) = table.successors(current) else {
            items.push(ExplanationItem::new(
                ExplanationKind::UnknownLevel,
                format!(
                    "Niveau '{current}' is onbekend binnen {}",
                    table.dialect().as_str()
                ),
                path_at(index),
            ));
            continue;
        };

        if exempt_leaf && next_index == last_index && next == LEVEL_BESTAND {
            continue;
        }
        if !allowed.contains(&next) {
            items.push(ExplanationItem::new(
                ExplanationKind::Transition,
                format!(
                    "Niveau '{current}' mag niet gevolgd worden door '{next}'; toegestaan: {}",
                    describe(allowed)
                ),
                path_at(next_index),
            ));
        }
    }

    items
}

/// `derive_level_names` followed by `explain`.
pub fn validate_chain(chain: &Chain) -> Vec<ExplanationItem> {
    let levels = derive_level_names(chain);
    explain(chain, &levels)
}

fn count(levels: &[String], level: &str) -> usize {
    levels.iter().filter(|l| *l == level).count()
}

/// Index of the second occurrence, which is where a duplicate is reported.
fn position_after_first(levels: &[String], level: &str) -> Option<usize> {
    levels
        .iter()
        .enumerate()
        .filter(|(_, l)| *l == level)
        .nth(1)
        .map(|(i, _)| i)
}

fn describe(allowed: &[&str]) -> String {
    if allowed.is_empty() {
        "(geen)".to_string()
    } else {
        allowed.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{AggregationNode, LeafNode};
    use preingest_rs_metadata::model::{mdto, topx};
    use preingest_rs_metadata::{MdtoNode, MetadataDocument, ToPxNode};
    use std::sync::Arc;

    fn informatieobject(level: &str) -> Arc<MetadataDocument> {
        Arc::new(MetadataDocument::Mdto(MdtoNode::Informatieobject(
            mdto::Informatieobject {
                naam: level.to_string(),
                aggregatieniveau: Some(mdto::BegripGegevens::new(
                    level,
                    None,
                    "Begrippenlijst Aggregatieniveau MDTO",
                )),
                ..Default::default()
            },
        )))
    }

    /// Builds an MDTO chain from root-first levels; the last one is the leaf.
    fn mdto_chain(levels: &[&str]) -> Chain {
        let (leaf_level, ancestors) = levels.split_last().unwrap();
        let mut dir = PathBuf::from("/w");
        let mut nodes = Vec::new();
        for (i, level) in ancestors.iter().enumerate() {
            dir.push(format!("n{i}"));
            nodes.push(AggregationNode {
                directory: dir.clone(),
                metadata_path: dir.join(format!("n{i}.mdto.xml")),
                document: informatieobject(level),
            });
        }
        nodes.reverse();

        let leaf_document = if *leaf_level == LEVEL_BESTAND {
            Arc::new(MetadataDocument::Mdto(MdtoNode::Bestand(mdto::Bestand::default())))
        } else {
            informatieobject(leaf_level)
        };
        Chain::new(
            LeafNode {
                binary_path: dir.join("x.pdf"),
                metadata_path: dir.join("x.pdf.bestand.mdto.xml"),
                document: leaf_document,
            },
            nodes,
        )
    }

    /// Builds a ToPX chain from root-first aggregation levels plus a bestand leaf.
    fn topx_chain(ancestors: &[&str]) -> Chain {
        let mut dir = PathBuf::from("/w");
        let mut nodes = Vec::new();
        for (i, level) in ancestors.iter().enumerate() {
            dir.push(format!("n{i}"));
            nodes.push(AggregationNode {
                directory: dir.clone(),
                metadata_path: dir.join(format!("n{i}.metadata")),
                document: Arc::new(MetadataDocument::ToPx(ToPxNode::Aggregatie(
                    topx::Aggregatie {
                        aggregatieniveau: Some(level.to_string()),
                        ..Default::default()
                    },
                ))),
            });
        }
        nodes.reverse();

        Chain::new(
            LeafNode {
                binary_path: dir.join("x.pdf"),
                metadata_path: dir.join("x.pdf.metadata"),
                document: Arc::new(MetadataDocument::ToPx(ToPxNode::Bestand(topx::Bestand {
                    aggregatieniveau: Some(LEVEL_BESTAND.to_string()),
                    ..Default::default()
                }))),
            },
            nodes,
        )
    }

    fn levels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mdto_series_dossier_chain_is_valid() {
        let chain = mdto_chain(&["Archief", "Serie", "Dossier", "Bestand"]);
        let derived = derive_level_names(&chain);
        assert_eq!(derived, levels(&["Archief", "Serie", "Dossier", "Bestand"]));
        assert!(explain(&chain, &derived).is_empty());
    }

    #[test]
    fn test_mdto_full_chain_is_valid() {
        let chain = mdto_chain(&["Archief", "Serie", "Dossier", "Zaak", "Archiefstuk", "Bestand"]);
        assert!(validate_chain(&chain).is_empty());
    }

    #[test]
    fn test_zaak_followed_by_serie_is_rejected() {
        let chain = mdto_chain(&["Archief", "Zaak", "Serie", "Bestand"]);
        let items = validate_chain(&chain);
        assert!(!items.is_empty());
        let transition = items
            .iter()
            .find(|i| i.kind == ExplanationKind::Transition)
            .expect("transition violation");
        assert!(transition.message.contains("'Zaak'"));
        assert!(transition.message.contains("'Serie'"));
        assert_eq!(
            transition.metadata_path,
            PathBuf::from("/w/n0/n1/n1.mdto.xml")
        );
    }

    #[test]
    fn test_start_level_always_reported() {
        let chain = mdto_chain(&["Serie", "Dossier", "Bestand"]);
        let items = validate_chain(&chain);
        assert!(items.iter().any(|i| i.kind == ExplanationKind::StartLevel));
        // Zero Archief is also a count violation.
        assert!(items.iter().any(|i| i.kind == ExplanationKind::ArchiefCount));
    }

    #[test]
    fn test_double_bestand_is_reported() {
        let chain = mdto_chain(&["Archief", "Dossier", "Bestand"]);
        let items = explain(&chain, &levels(&["Archief", "Bestand", "Bestand"]));
        assert!(
            items
                .iter()
                .any(|i| i.message == "Bestand mag alleen 1 keer voorkomen")
        );
        // "Bestand" in the middle has no permitted successor.
        assert!(items.iter().any(|i| i.kind == ExplanationKind::Transition));
    }

    #[test]
    fn test_double_archief_is_reported() {
        let chain = mdto_chain(&["Archief", "Archief", "Archiefstuk", "Bestand"]);
        let items = validate_chain(&chain);
        let item = items
            .iter()
            .find(|i| i.message == "Archief mag alleen 1 keer voorkomen")
            .unwrap();
        assert_eq!(item.metadata_path, PathBuf::from("/w/n0/n1/n1.mdto.xml"));
    }

    #[test]
    fn test_violations_accumulate() {
        let chain = mdto_chain(&["Zaak", "Serie", "Bestand"]);
        let items = explain(&chain, &levels(&["Zaak", "Serie", "Dossier"]));
        let kinds: Vec<ExplanationKind> = items.iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&ExplanationKind::StartLevel));
        assert!(kinds.contains(&ExplanationKind::EndLevel));
        assert!(kinds.contains(&ExplanationKind::ArchiefCount));
        assert!(kinds.contains(&ExplanationKind::BestandCount));
        assert!(kinds.contains(&ExplanationKind::Transition));
    }

    #[test]
    fn test_unknown_label_becomes_geen() {
        let chain = mdto_chain(&["Archief", "Map", "Bestand"]);
        let derived = derive_level_names(&chain);
        assert_eq!(derived[1], LEVEL_GEEN);
        let items = explain(&chain, &derived);
        assert!(items.iter().any(|i| i.kind == ExplanationKind::Transition));
        assert!(items.iter().any(|i| i.kind == ExplanationKind::UnknownLevel));
    }

    #[test]
    fn test_empty_levels() {
        let chain = mdto_chain(&["Archief", "Bestand"]);
        let items = explain(&chain, &[]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, ExplanationKind::EmptyChain);
    }

    #[test]
    fn test_mdto_any_aggregation_may_hold_the_file() {
        let chain = mdto_chain(&["Archief", "Serie", "Bestand"]);
        assert!(validate_chain(&chain).is_empty());
    }

    #[test]
    fn test_topx_dossier_and_record_may_hold_the_file() {
        assert!(validate_chain(&topx_chain(&["Archief", "Dossier"])).is_empty());
        assert!(validate_chain(&topx_chain(&["Archief", "Serie", "Dossier", "Record"])).is_empty());
    }

    #[test]
    fn test_topx_serie_followed_by_bestand_is_rejected() {
        let chain = topx_chain(&["Archief", "Serie"]);
        assert_eq!(
            derive_level_names(&chain),
            levels(&["Archief", "Serie", "Bestand"])
        );
        let items = validate_chain(&chain);
        assert_eq!(items.len(), 1, "{items:#?}");
        assert_eq!(items[0].kind, ExplanationKind::Transition);
        assert!(items[0].message.contains("'Serie'"));
        assert!(items[0].message.contains("'Bestand'"));
        assert_eq!(items[0].metadata_path, PathBuf::from("/w/n0/n1/x.pdf.metadata"));
    }

    #[test]
    fn test_topx_archief_followed_by_bestand_is_rejected() {
        let items = validate_chain(&topx_chain(&["Archief"]));
        assert_eq!(items.len(), 1, "{items:#?}");
        assert_eq!(items[0].kind, ExplanationKind::Transition);
        assert!(items[0].message.ends_with("toegestaan: Serie, Dossier"));
    }

    #[test]
    fn test_topx_table() {
        let table = RuleTable::for_dialect(Dialect::ToPx).unwrap();
        assert!(table.permits("Dossier", "Record"));
        assert!(table.permits("Record", "Record"));
        assert!(!table.permits("Archief", "Record"));
        assert!(!table.knows("Archiefstuk"));
        assert!(RuleTable::for_dialect(Dialect::Opex).is_none());
    }
}
