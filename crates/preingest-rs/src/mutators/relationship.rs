// crates/preingest-rs/src/mutators/relationship.rs

//! Links the MDTO nodes of every chain to their neighbours.
//!
//! Walking root to leaf, each aggregation gains an `isOnderdeelVan` to its
//! parent and a downward reference to its child (`heeftRepresentatie` on an
//! Archiefstuk, `bevatOnderdeel` elsewhere). The leaf gets a single
//! `isRepresentatieVan` to its parent. References are merged by
//! identification, so running the pass again changes nothing.

use super::write_document;
use crate::aggregator::{Chain, Node};
use crate::error::{PreingestError, Result};
use crate::report::{OperationReport, Outcome, OutcomeSink};
use crate::rules::{LEVEL_ARCHIEFSTUK, derive_level_names};
use log::{debug, trace};
use preingest_rs_metadata::model::mdto::{IdentificatieGegevens, VerwijzingGegevens};
use preingest_rs_metadata::{MdtoNode, MetadataDocument};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// References pointing at `node`, one per identification it declares.
pub fn references_to(node: Node<'_>) -> Vec<VerwijzingGegevens> {
    let document = node.document();
    let name = document.name().unwrap_or_default();
    let identifications = document.identifications();
    if identifications.is_empty() {
        return vec![VerwijzingGegevens::named(name)];
    }
    identifications
        .into_iter()
        .map(|id| VerwijzingGegevens {
            verwijzing_naam: name.clone(),
            verwijzing_identificatie: Some(IdentificatieGegevens::new(
                id.kenmerk,
                id.bron.unwrap_or_default(),
            )),
        })
        .collect()
}

/// Adds `candidate` unless an equivalent reference is already present.
/// Returns true when the list changed.
pub fn merge_reference(list: &mut Vec<VerwijzingGegevens>, candidate: VerwijzingGegevens) -> bool {
    let present = list.iter().any(|existing| {
        existing.same_identity(&candidate)
            || (candidate.verwijzing_identificatie.is_none() && *existing == candidate)
    });
    if present {
        false
    } else {
        list.push(candidate);
        true
    }
}

fn merge_all(list: &mut Vec<VerwijzingGegevens>, candidates: Vec<VerwijzingGegevens>) -> bool {
    candidates
        .into_iter()
        .fold(false, |changed, candidate| merge_reference(list, candidate) | changed)
}

struct CachedNode {
    node: MdtoNode,
    dirty: bool,
}

/// Working copies of every node touched during one pass, keyed by sidecar
/// path. Nodes shared by several chains are loaded once and written once.
#[derive(Default)]
pub struct NodeCache {
    entries: BTreeMap<PathBuf, CachedNode>,
}

impl NodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The working copy for `node`, seeded from its parsed document on first
    /// access.
    pub fn entry(&mut self, node: Node<'_>) -> Result<&mut MdtoNode> {
        let path = node.metadata_path();
        if !self.entries.contains_key(path) {
            let MetadataDocument::Mdto(mdto) = node.document() else {
                return Err(PreingestError::unsupported(
                    path,
                    node.document().dialect().as_str(),
                    "relationships are only written to MDTO sidecars",
                ));
            };
            self.entries.insert(
                path.to_path_buf(),
                CachedNode {
                    node: mdto.clone(),
                    dirty: false,
                },
            );
        }
        let cached = self
            .entries
            .get_mut(path)
            .ok_or_else(|| PreingestError::Structure {
                path: path.to_path_buf(),
                reason: "node cache entry vanished".into(),
            })?;
        Ok(&mut cached.node)
    }

    pub fn mark_dirty(&mut self, path: &Path) {
        if let Some(cached) = self.entries.get_mut(path) {
            cached.dirty = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes every modified node. Returns one result per cached node; the
    /// flag tells whether the sidecar was rewritten.
    pub fn flush(self) -> Vec<(PathBuf, Result<bool>)> {
        self.entries
            .into_iter()
            .map(|(path, cached)| {
                if !cached.dirty {
                    return (path, Ok(false));
                }
                let document = MetadataDocument::Mdto(cached.node);
                let result = write_document(&path, &document).map(|()| true);
                (path, result)
            })
            .collect()
    }
}

#[derive(Default)]
pub struct RelationshipPropagationPass {
    cache: NodeCache,
    /// Nodes already reported as rejected; shared ancestors are reported once.
    rejected: BTreeSet<PathBuf>,
}

impl RelationshipPropagationPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the neighbour references of one chain to the cache.
    pub fn link_chain(
        &mut self,
        chain: &Chain,
        report: &mut OperationReport,
        sink: &mut dyn OutcomeSink,
    ) {
        let nodes: Vec<Node<'_>> = chain.root_first().collect();
        let levels = derive_level_names(chain);

        for (index, node) in nodes.iter().copied().enumerate() {
            let path = node.metadata_path();
            if self.rejected.contains(path) {
                continue;
            }
            let previous = index.checked_sub(1).map(|i| nodes[i]);
            let next = nodes.get(index + 1).copied();
            let level = levels.get(index).map(String::as_str).unwrap_or_default();

            match self.link_node(node, previous, next, level) {
                Ok(true) => {
                    trace!("{:?}: references added", path);
                    self.cache.mark_dirty(path);
                }
                Ok(false) => {}
                Err(e) => {
                    self.rejected.insert(path.to_path_buf());
                    report.record(Outcome::rejected(path, &e), sink);
                }
            }
        }
    }

    fn link_node(
        &mut self,
        node: Node<'_>,
        previous: Option<Node<'_>>,
        next: Option<Node<'_>>,
        level: &str,
    ) -> Result<bool> {
        let upward = previous.map(references_to).unwrap_or_default();
        let downward = next.map(references_to).unwrap_or_default();
        let path = node.metadata_path();

        let entry = self.cache.entry(node)?;
        if node.is_leaf() != matches!(entry, MdtoNode::Bestand(_)) {
            return Err(PreingestError::unsupported(
                path,
                "MDTO",
                "bestand and informatieobject must sit at file and folder level",
            ));
        }

        match entry {
            MdtoNode::Bestand(bestand) => {
                let Some(reference) = upward.into_iter().next() else {
                    return Ok(false);
                };
                let unchanged = bestand
                    .is_representatie_van
                    .as_ref()
                    .is_some_and(|existing| {
                        existing.same_identity(&reference) || *existing == reference
                    });
                if unchanged {
                    return Ok(false);
                }
                bestand.is_representatie_van = Some(reference);
                Ok(true)
            }
            MdtoNode::Informatieobject(io) => {
                let mut changed = merge_all(&mut io.is_onderdeel_van, upward);
                let down_list = if level == LEVEL_ARCHIEFSTUK {
                    &mut io.heeft_representatie
                } else {
                    &mut io.bevat_onderdeel
                };
                changed |= merge_all(down_list, downward);
                Ok(changed)
            }
        }
    }

    /// Writes every modified node and records one outcome per node that was
    /// not already rejected.
    pub fn finish(self, report: &mut OperationReport, sink: &mut dyn OutcomeSink) {
        debug!("Flushing {} cached nodes", self.cache.len());
        for (path, result) in self.cache.flush() {
            if self.rejected.contains(&path) {
                continue;
            }
            let outcome = match result {
                Ok(true) => Outcome::accepted(path, "relaties bijgewerkt"),
                Ok(false) => Outcome::accepted(path, "relaties ongewijzigd"),
                Err(e) => Outcome::rejected(path, &e),
            };
            report.record(outcome, sink);
        }
    }

    /// Links every chain, then flushes.
    pub fn run<'c>(
        mut self,
        chains: impl IntoIterator<Item = &'c Chain>,
        report: &mut OperationReport,
        sink: &mut dyn OutcomeSink,
    ) {
        for chain in chains {
            self.link_chain(chain, report, sink);
        }
        self.finish(report, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{AggregationNode, LeafNode};
    use crate::report::NoOpSink;
    use preingest_rs_metadata::model::mdto::{BegripGegevens, Bestand, Informatieobject};
    use std::sync::Arc;

    fn informatieobject(dir: &Path, level: &str, id: &str) -> AggregationNode {
        let name = dir.file_name().unwrap().to_str().unwrap();
        AggregationNode {
            directory: dir.to_path_buf(),
            metadata_path: dir.join(format!("{name}.mdto.xml")),
            document: Arc::new(MetadataDocument::Mdto(MdtoNode::Informatieobject(
                Informatieobject {
                    identificatie: vec![IdentificatieGegevens::new(id, "test")],
                    naam: id.into(),
                    aggregatieniveau: Some(BegripGegevens::new(level, None, "lijst")),
                    ..Default::default()
                },
            ))),
        }
    }

    fn bestand(binary: &Path, id: &str) -> LeafNode {
        LeafNode {
            binary_path: binary.to_path_buf(),
            metadata_path: PathBuf::from(format!("{}.bestand.mdto.xml", binary.display())),
            document: Arc::new(MetadataDocument::Mdto(MdtoNode::Bestand(Bestand {
                identificatie: vec![IdentificatieGegevens::new(id, "test")],
                naam: id.into(),
                ..Default::default()
            }))),
        }
    }

    fn chain(root: &Path, middle_level: &str) -> Chain {
        let archief = informatieobject(root, "Archief", "A");
        let middle = informatieobject(&root.join("R"), middle_level, "R");
        let leaf = bestand(&root.join("R").join("f.pdf"), "F");
        Chain::new(leaf, vec![middle, archief])
    }

    fn link(chain: &Chain) -> NodeCache {
        let mut pass = RelationshipPropagationPass::new();
        let mut report = OperationReport::new("relationships", "A");
        pass.link_chain(chain, &mut report, &mut NoOpSink);
        assert!(report.outcomes.is_empty());
        pass.cache
    }

    fn cached_io<'a>(cache: &'a NodeCache, path: &Path) -> &'a Informatieobject {
        match &cache.entries[path].node {
            MdtoNode::Informatieobject(io) => io,
            MdtoNode::Bestand(_) => panic!("expected informatieobject"),
        }
    }

    #[test]
    fn test_merge_reference_deduplicates_by_identity() {
        let mut list = Vec::new();
        let reference = VerwijzingGegevens {
            verwijzing_naam: "A".into(),
            verwijzing_identificatie: Some(IdentificatieGegevens::new("A", "test")),
        };
        assert!(merge_reference(&mut list, reference.clone()));
        let renamed = VerwijzingGegevens {
            verwijzing_naam: "other name".into(),
            ..reference
        };
        assert!(!merge_reference(&mut list, renamed));
        assert!(merge_reference(&mut list, VerwijzingGegevens::named("x")));
        assert!(!merge_reference(&mut list, VerwijzingGegevens::named("x")));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_dossier_gets_bevat_onderdeel() {
        let root = PathBuf::from("/w/A");
        let chain = chain(&root, "Dossier");
        let cache = link(&chain);

        let archief = cached_io(&cache, &root.join("A.mdto.xml"));
        assert!(archief.is_onderdeel_van.is_empty());
        assert_eq!(archief.bevat_onderdeel.len(), 1);
        assert_eq!(archief.bevat_onderdeel[0].verwijzing_naam, "R");

        let dossier = cached_io(&cache, &root.join("R").join("R.mdto.xml"));
        assert_eq!(dossier.is_onderdeel_van[0].verwijzing_naam, "A");
        assert_eq!(dossier.bevat_onderdeel[0].verwijzing_naam, "F");
        assert!(dossier.heeft_representatie.is_empty());
    }

    #[test]
    fn test_archiefstuk_gets_heeft_representatie() {
        let root = PathBuf::from("/w/A");
        let chain = chain(&root, "Archiefstuk");
        let cache = link(&chain);

        let stuk = cached_io(&cache, &root.join("R").join("R.mdto.xml"));
        assert!(stuk.bevat_onderdeel.is_empty());
        assert_eq!(stuk.heeft_representatie.len(), 1);
        assert_eq!(
            stuk.heeft_representatie[0]
                .verwijzing_identificatie
                .as_ref()
                .unwrap()
                .identificatie_kenmerk,
            "F"
        );

        let leaf = &cache.entries[&chain.leaf().metadata_path].node;
        let MdtoNode::Bestand(bestand) = leaf else {
            panic!("expected bestand");
        };
        assert_eq!(
            bestand.is_representatie_van.as_ref().unwrap().verwijzing_naam,
            "R"
        );
    }

    #[test]
    fn test_shared_ancestor_linked_once_per_child() {
        let root = PathBuf::from("/w/A");
        let first = chain(&root, "Dossier");
        let second = Chain::new(
            bestand(&root.join("R").join("g.pdf"), "G"),
            first.ancestors().to_vec(),
        );

        let mut pass = RelationshipPropagationPass::new();
        let mut report = OperationReport::new("relationships", "A");
        for c in [&first, &second, &first] {
            pass.link_chain(c, &mut report, &mut NoOpSink);
        }

        let dossier = cached_io(&pass.cache, &root.join("R").join("R.mdto.xml"));
        assert_eq!(dossier.bevat_onderdeel.len(), 2);
        assert_eq!(dossier.is_onderdeel_van.len(), 1);
        let archief = cached_io(&pass.cache, &root.join("A.mdto.xml"));
        assert_eq!(archief.bevat_onderdeel.len(), 1);
    }

    #[test]
    fn test_non_mdto_ancestor_rejected_once() {
        let root = PathBuf::from("/w/A");
        let archief = AggregationNode {
            directory: root.clone(),
            metadata_path: root.join("A.metadata"),
            document: Arc::new(MetadataDocument::Opex(Default::default())),
        };
        let leaf_a = bestand(&root.join("a.pdf"), "a");
        let leaf_b = bestand(&root.join("b.pdf"), "b");
        let chains = [
            Chain::new(leaf_a, vec![archief.clone()]),
            Chain::new(leaf_b, vec![archief]),
        ];

        let mut pass = RelationshipPropagationPass::new();
        let mut report = OperationReport::new("relationships", "A");
        for c in &chains {
            pass.link_chain(c, &mut report, &mut NoOpSink);
        }
        assert_eq!(report.summary.rejected, 1);
        assert_eq!(report.outcomes[0].target, root.join("A.metadata"));
    }
}
