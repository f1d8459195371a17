// crates/preingest-rs/src/lib.rs

#![doc = "Preingest engine for archival collections."]
#![doc = ""]
#![doc = "Reconstructs one metadata chain per binary from the folder layout and runs"]
#![doc = "conversion, structural validation and the bottom-up fixity, format and"]
#![doc = "relationship passes over those chains."]

// --- Foundation Modules ---
pub mod config;
pub mod error;
mod fsio;
mod log;

// --- Collection and Chains ---
pub mod aggregator;
pub mod collection;

// --- Passes ---
pub mod mutators;
pub mod operations;
pub mod report;
pub mod rules;

// --- Top-level Exports ---
pub use aggregator::{AggregationNode, Chain, ChainBuilder, LeafNode, Node, build_chains};
pub use collection::{Collection, CollectionScan, SidecarConvention};
pub use config::{ChainErrorPolicy, PreingestConfig};
pub use error::{ErrorKind, PreingestError, Result};
pub use operations::Preingest;
pub use report::{LoggingSink, NoOpSink, OperationReport, Outcome, OutcomeSink, RunSummary};
pub use rules::{ExplanationItem, ExplanationKind, RuleTable, validate_chain};
