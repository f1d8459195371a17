// crates/preingest-rs/src/operations.rs

//! Entry points for the passes over a session working directory.
//!
//! Every operation opens the collection, discovers its chains and returns an
//! `OperationReport`. Nothing is raised to the caller: failures that stop an
//! operation before any node is touched become a single rejected outcome.

use crate::aggregator::{Chain, ChainBuilder, Node};
use crate::collection::{Collection, SidecarConvention};
use crate::config::{ChainErrorPolicy, PreingestConfig};
use crate::error::{PreingestError, Result};
use crate::fsio;
use crate::log::{OperationContext, ctx_debug, ctx_error, ctx_info, ctx_warn};
use crate::mutators::{FixityPass, FormatEnrichmentPass, RelationshipPropagationPass, write_document};
use crate::report::{OperationReport, Outcome, OutcomeSink};
use crate::rules::validate_chain;
use preingest_rs_metadata::{MetadataDocument, convert_topx_to_mdto};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// --- Operation names ---

pub const OP_CONVERT: &str = "convert";
pub const OP_VALIDATE: &str = "validate";
pub const OP_FIXITY: &str = "fixity";
pub const OP_FORMAT: &str = "format";
pub const OP_RELATIONSHIPS: &str = "relationships";

/// Logs `error` and turns it into a failed run.
fn abort(
    ctx: OperationContext,
    error: &PreingestError,
    sink: &mut dyn OutcomeSink,
) -> OperationReport {
    ctx_error!(ctx, "{}", error);
    OperationReport::failed_run(ctx.operation, ctx.collection, error, sink)
}

/// A collection whose chains have been discovered.
struct Discovered {
    collection: Collection,
    chains: Vec<Chain>,
    report: OperationReport,
    ctx: OperationContext,
}

/// The preingest engine. Holds the configuration shared by all operations.
#[derive(Debug, Clone, Default)]
pub struct Preingest {
    config: PreingestConfig,
}

impl Preingest {
    pub fn new(config: PreingestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PreingestConfig {
        &self.config
    }

    /// Opens `working_dir`, scans it and builds every chain under
    /// `convention`, applying the configured chain error policy.
    fn discover(
        &self,
        operation: &'static str,
        working_dir: &Path,
        convention: SidecarConvention,
        sink: &mut dyn OutcomeSink,
    ) -> std::result::Result<Discovered, OperationReport> {
        // 1. Archive root and file inventory.
        let collection = match Collection::open(working_dir) {
            Ok(collection) => collection,
            Err(e) => {
                let ctx = OperationContext::new(operation, working_dir.display().to_string());
                return Err(abort(ctx, &e, sink));
            }
        };
        let ctx = OperationContext::new(operation, collection.name.clone());
        let scan = match collection.scan() {
            Ok(scan) => scan,
            Err(e) => return Err(abort(ctx, &e, sink)),
        };
        ctx_info!(
            ctx,
            "{} binaries, {} sidecars under {:?}",
            scan.binaries.len(),
            scan.sidecars.len(),
            collection.archive_root
        );

        // 2. Chains, one per binary.
        let mut report = OperationReport::new(operation, collection.name.clone());
        let chains = match self.config.chain_error_policy {
            ChainErrorPolicy::AbortOperation => {
                let mut builder = ChainBuilder::new(&scan.sidecars, &collection.name, convention)
                    .within(&collection.working_dir);
                match builder.build_all(&scan.binaries) {
                    Ok(chains) => chains.into_values().collect(),
                    Err(e) => return Err(abort(ctx, &e, sink)),
                }
            }
            ChainErrorPolicy::SkipChain => {
                let mut builder = ChainBuilder::new(&scan.sidecars, &collection.name, convention)
                    .within(&collection.working_dir);
                let mut chains = Vec::with_capacity(scan.binaries.len());
                for binary in &scan.binaries {
                    match builder.build(binary) {
                        Ok(chain) => chains.push(chain),
                        Err(e) => {
                            ctx_warn!(ctx, "Skipping chain of {:?}: {}", binary, e);
                            report.record(Outcome::rejected(e.path(), &e), sink);
                        }
                    }
                }
                chains
            }
        };
        ctx_debug!(ctx, "{} chains discovered", chains.len());

        Ok(Discovered {
            collection,
            chains,
            report,
            ctx,
        })
    }

    fn finish(ctx: OperationContext, report: OperationReport) -> OperationReport {
        ctx_info!(
            ctx,
            "Done: {} processed, {} accepted, {} rejected",
            report.summary.processed,
            report.summary.accepted,
            report.summary.rejected
        );
        report
    }

    // --- Conversion ---

    /// Converts every ToPX sidecar of the collection to MDTO.
    ///
    /// Leaves are written to `<binary>.bestand.mdto.xml`, folders to
    /// `<folder>/<folder>.mdto.xml`. Sidecars shared by several chains are
    /// converted once.
    pub fn convert(&self, working_dir: &Path, sink: &mut dyn OutcomeSink) -> OperationReport {
        let Discovered {
            chains,
            mut report,
            ctx,
            ..
        } = match self.discover(OP_CONVERT, working_dir, SidecarConvention::ToPx, sink) {
            Ok(discovered) => discovered,
            Err(report) => return report,
        };

        let mut seen: BTreeSet<PathBuf> = BTreeSet::new();
        let mut converted: Vec<PathBuf> = Vec::new();
        for chain in &chains {
            for node in chain.root_first() {
                let source = node.metadata_path();
                if !seen.insert(source.to_path_buf()) {
                    continue;
                }
                let outcome = match self.convert_node(node) {
                    Ok(target) => {
                        converted.push(source.to_path_buf());
                        Outcome::accepted(source, format!("geconverteerd naar {}", target.display()))
                    }
                    Err(e) => Outcome::rejected(source, &e),
                };
                report.record(outcome, sink);
            }
        }

        if self.config.remove_converted_sources {
            for source in &converted {
                match fsio::remove_file(source) {
                    Ok(()) => ctx_debug!(ctx, "Removed {:?}", source),
                    Err(e) => ctx_warn!(ctx, "Could not remove {:?}: {}", source, e),
                }
            }
        }

        Self::finish(ctx, report)
    }

    fn convert_node(&self, node: Node<'_>) -> Result<PathBuf> {
        let source = node.metadata_path();
        let MetadataDocument::ToPx(topx) = node.document() else {
            return Err(PreingestError::unsupported(
                source,
                node.document().dialect().as_str(),
                "only ToPX sidecars are converted",
            ));
        };

        let target = match node {
            Node::Leaf(leaf) => SidecarConvention::Mdto.leaf_sidecar(&leaf.binary_path),
            Node::Aggregation(aggregation) => SidecarConvention::Mdto
                .folder_sidecar(&aggregation.directory)
                .ok_or_else(|| PreingestError::Structure {
                    path: aggregation.directory.clone(),
                    reason: "folder has no name".into(),
                })?,
        };

        let mdto = convert_topx_to_mdto(topx, &self.config.conversion).map_err(|source_err| {
            PreingestError::Metadata {
                path: source.to_path_buf(),
                source: source_err,
            }
        })?;
        write_document(&target, &MetadataDocument::Mdto(mdto))?;
        Ok(target)
    }

    // --- Validation ---

    /// Checks every chain against the structural rules of its dialect.
    ///
    /// One outcome per chain, targeted at the leaf sidecar. All explanation
    /// items are also collected on the report.
    pub fn validate(
        &self,
        working_dir: &Path,
        convention: SidecarConvention,
        sink: &mut dyn OutcomeSink,
    ) -> OperationReport {
        let Discovered {
            chains,
            mut report,
            ctx,
            ..
        } = match self.discover(OP_VALIDATE, working_dir, convention, sink) {
            Ok(discovered) => discovered,
            Err(report) => return report,
        };

        for chain in &chains {
            let leaf_path = &chain.leaf().metadata_path;
            let items = validate_chain(chain);
            let outcome = if items.is_empty() {
                Outcome::accepted(leaf_path, "structuur is geldig")
            } else {
                ctx_debug!(ctx, "{:?}: {} findings", leaf_path, items.len());
                Outcome::rejected_with(leaf_path, items.iter().map(|i| i.message.clone()).collect())
            };
            report.explanations.extend(items);
            report.record(outcome, sink);
        }

        Self::finish(ctx, report)
    }

    // --- Mutators ---

    /// Recomputes the checksum of every binary.
    pub fn fixity(
        &self,
        working_dir: &Path,
        convention: SidecarConvention,
        sink: &mut dyn OutcomeSink,
    ) -> OperationReport {
        let Discovered {
            chains,
            mut report,
            ctx,
            ..
        } = match self.discover(OP_FIXITY, working_dir, convention, sink) {
            Ok(discovered) => discovered,
            Err(report) => return report,
        };

        FixityPass::new(&self.config.fixity).run(&chains, &mut report, sink);
        Self::finish(ctx, report)
    }

    /// Fills in file formats from a DROID table: `csv` when given, otherwise
    /// the configured table, otherwise the newest `*.csv` in `working_dir`.
    pub fn format(
        &self,
        working_dir: &Path,
        convention: SidecarConvention,
        csv: Option<&Path>,
        sink: &mut dyn OutcomeSink,
    ) -> OperationReport {
        let Discovered {
            chains,
            mut report,
            ctx,
            ..
        } = match self.discover(OP_FORMAT, working_dir, convention, sink) {
            Ok(discovered) => discovered,
            Err(report) => return report,
        };

        let pass = match FormatEnrichmentPass::load(&self.config.format, working_dir, csv) {
            Ok(pass) => pass,
            Err(e) => return abort(ctx, &e, sink),
        };
        ctx_info!(ctx, "{} format rows loaded", pass.table().len());

        pass.run(&chains, &mut report, sink);
        Self::finish(ctx, report)
    }

    /// Writes parent, child and representation references between the MDTO
    /// nodes of every chain.
    pub fn relationships(&self, working_dir: &Path, sink: &mut dyn OutcomeSink) -> OperationReport {
        let Discovered {
            chains,
            mut report,
            ctx,
            ..
        } = match self.discover(OP_RELATIONSHIPS, working_dir, SidecarConvention::Mdto, sink) {
            Ok(discovered) => discovered,
            Err(report) => return report,
        };

        RelationshipPropagationPass::new().run(&chains, &mut report, sink);
        Self::finish(ctx, report)
    }
}
