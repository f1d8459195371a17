// crates/preingest-rs/src/aggregator.rs

//! Reconstructs the aggregation hierarchy from the folder layout.
//!
//! Path segments are the only source of structure: for every binary the
//! chain runs from its own sidecar up through one folder sidecar per
//! directory until the archive root folder is reached.

use crate::collection::SidecarConvention;
use crate::error::{PreingestError, Result};
use crate::fsio;
use log::trace;
use preingest_rs_metadata::{MetadataDocument, load_document_from_str};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// A folder-level node (Archief, Serie, Dossier, ...).
#[derive(Debug, Clone)]
pub struct AggregationNode {
    pub directory: PathBuf,
    pub metadata_path: PathBuf,
    pub document: Arc<MetadataDocument>,
}

/// The file-level node describing one binary.
#[derive(Debug, Clone)]
pub struct LeafNode {
    pub binary_path: PathBuf,
    pub metadata_path: PathBuf,
    pub document: Arc<MetadataDocument>,
}

/// A borrowed view on one chain entry.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Aggregation(&'a AggregationNode),
    Leaf(&'a LeafNode),
}

impl<'a> Node<'a> {
    pub fn metadata_path(&self) -> &'a Path {
        match *self {
            Node::Aggregation(n) => &n.metadata_path,
            Node::Leaf(n) => &n.metadata_path,
        }
    }

    pub fn document(&self) -> &'a MetadataDocument {
        match *self {
            Node::Aggregation(n) => &n.document,
            Node::Leaf(n) => &n.document,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }
}

/// One binary's path to the archive root.
#[derive(Debug, Clone)]
pub struct Chain {
    leaf: LeafNode,
    /// Deepest first; the last entry is the archive root.
    ancestors: Vec<AggregationNode>,
}

impl Chain {
    pub fn new(leaf: LeafNode, ancestors: Vec<AggregationNode>) -> Self {
        Self { leaf, ancestors }
    }

    pub fn leaf(&self) -> &LeafNode {
        &self.leaf
    }

    pub fn ancestors(&self) -> &[AggregationNode] {
        &self.ancestors
    }

    /// Entries in discovery order: the leaf first, the archive root last.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = Node<'_>> {
        std::iter::once(Node::Leaf(&self.leaf))
            .chain(self.ancestors.iter().map(Node::Aggregation))
    }

    /// Entries from the archive root down to the leaf.
    pub fn root_first(&self) -> impl Iterator<Item = Node<'_>> {
        self.nodes().rev()
    }

    pub fn len(&self) -> usize {
        self.ancestors.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Builds chains against one set of known sidecars, parsing each sidecar at
/// most once.
pub struct ChainBuilder<'a> {
    metadata_files: &'a BTreeSet<PathBuf>,
    root_name: &'a str,
    /// Segments of this prefix are never taken as the archive root.
    within: Option<&'a Path>,
    convention: SidecarConvention,
    cache: HashMap<PathBuf, Arc<MetadataDocument>>,
}

impl<'a> ChainBuilder<'a> {
    pub fn new(
        metadata_files: &'a BTreeSet<PathBuf>,
        root_name: &'a str,
        convention: SidecarConvention,
    ) -> Self {
        Self {
            metadata_files,
            root_name,
            within: None,
            convention,
            cache: HashMap::new(),
        }
    }

    /// Looks for the archive root segment only below `prefix`, typically the
    /// session working directory, whose own path may repeat the archive name.
    pub fn within(mut self, prefix: &'a Path) -> Self {
        self.within = Some(prefix);
        self
    }

    /// Leaf sidecar path of `binary` under this builder's convention.
    pub fn leaf_sidecar(&self, binary: &Path) -> PathBuf {
        self.convention.leaf_sidecar(binary)
    }

    /// Builds the chain of a single binary.
    ///
    /// # Errors
    /// `MissingSidecar` when the leaf or any folder lacks its sidecar,
    /// `Structure` when no path segment names the archive root, and
    /// `MalformedMetadata` when a sidecar does not parse.
    pub fn build(&mut self, binary: &Path) -> Result<Chain> {
        // 1. The binary's own sidecar.
        let leaf_path = self.convention.leaf_sidecar(binary);
        self.require_known(&leaf_path)?;

        // 2. Anchor on the archive root segment.
        let directory = binary.parent().ok_or_else(|| PreingestError::Structure {
            path: binary.to_path_buf(),
            reason: "binary has no containing directory".into(),
        })?;
        let components: Vec<Component<'_>> = directory.components().collect();
        let skip = self
            .within
            .filter(|prefix| directory.starts_with(prefix))
            .map_or(0, |prefix| prefix.components().count());
        let root_index = components
            .iter()
            .enumerate()
            .skip(skip)
            .find(|(_, c)| matches!(c, Component::Normal(name) if *name == OsStr::new(self.root_name)))
            .map(|(index, _)| index)
            .ok_or_else(|| PreingestError::Structure {
                path: directory.to_path_buf(),
                reason: format!("path does not contain archive folder '{}'", self.root_name),
            })?;

        // 3. Walk up, deepest first, requiring a folder sidecar at each level.
        let mut ancestors = Vec::with_capacity(components.len() - root_index);
        for depth in (root_index..components.len()).rev() {
            let dir: PathBuf = components[..=depth].iter().collect();
            let sidecar = self.convention.folder_sidecar(&dir).ok_or_else(|| {
                PreingestError::Structure {
                    path: dir.clone(),
                    reason: "folder has no name".into(),
                }
            })?;
            self.require_known(&sidecar)?;
            let document = self.load(&sidecar)?;
            ancestors.push(AggregationNode {
                directory: dir,
                metadata_path: sidecar,
                document,
            });
        }

        // 4. Parse the leaf last so a missing ancestor is reported first.
        let document = self.load(&leaf_path)?;
        trace!("Chain for {:?}: {} levels", binary, ancestors.len() + 1);
        Ok(Chain::new(
            LeafNode {
                binary_path: binary.to_path_buf(),
                metadata_path: leaf_path,
                document,
            },
            ancestors,
        ))
    }

    /// Builds one chain per binary, keyed by the leaf sidecar path.
    ///
    /// Stops at the first binary whose chain cannot be discovered.
    pub fn build_all(&mut self, binaries: &BTreeSet<PathBuf>) -> Result<BTreeMap<PathBuf, Chain>> {
        binaries
            .iter()
            .map(|binary| {
                let chain = self.build(binary)?;
                Ok((chain.leaf().metadata_path.clone(), chain))
            })
            .collect()
    }

    fn require_known(&self, sidecar: &Path) -> Result<()> {
        if self.metadata_files.contains(sidecar) {
            Ok(())
        } else {
            Err(PreingestError::MissingSidecar {
                path: sidecar.to_path_buf(),
            })
        }
    }

    fn load(&mut self, path: &Path) -> Result<Arc<MetadataDocument>> {
        if let Some(document) = self.cache.get(path) {
            return Ok(Arc::clone(document));
        }
        let content = fsio::read_to_string(path)?;
        let document = load_document_from_str(&content).map_err(|source| {
            PreingestError::MalformedMetadata {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let document = Arc::new(document);
        self.cache.insert(path.to_path_buf(), Arc::clone(&document));
        Ok(document)
    }
}

/// Builds one chain per binary, keyed by the leaf sidecar path.
///
/// Stops at the first binary whose chain cannot be discovered.
pub fn build_chains(
    binaries: &BTreeSet<PathBuf>,
    metadata_files: &BTreeSet<PathBuf>,
    root_name: &str,
    convention: SidecarConvention,
) -> Result<BTreeMap<PathBuf, Chain>> {
    ChainBuilder::new(metadata_files, root_name, convention).build_all(binaries)
}
