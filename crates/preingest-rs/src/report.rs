// crates/preingest-rs/src/report.rs

use crate::error::{ErrorKind, PreingestError};
use crate::rules::ExplanationItem;
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;

/// Result of processing one node (or one chain, for validation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Metadata file the outcome is about.
    pub target: PathBuf,
    pub success: bool,
    pub messages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Full error chain for rejected outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl Outcome {
    pub fn accepted(target: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            success: true,
            messages: vec![message.into()],
            error_kind: None,
            diagnostic: None,
        }
    }

    pub fn rejected(target: impl Into<PathBuf>, error: &PreingestError) -> Self {
        Self {
            target: target.into(),
            success: false,
            messages: vec![error.to_string()],
            error_kind: Some(error.kind()),
            diagnostic: Some(format!("{error:?}")),
        }
    }

    /// A rejection that is not backed by an error, e.g. structural findings.
    pub fn rejected_with(target: impl Into<PathBuf>, messages: Vec<String>) -> Self {
        Self {
            target: target.into(),
            success: false,
            messages,
            error_kind: None,
            diagnostic: None,
        }
    }
}

/// Processed / accepted / rejected counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl RunSummary {
    fn count(&mut self, outcome: &Outcome) {
        self.processed += 1;
        if outcome.success {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
    }
}

/// Receives every outcome as soon as it is recorded.
pub trait OutcomeSink {
    fn on_outcome(&mut self, outcome: &Outcome);
}

/// A sink that does nothing.
pub struct NoOpSink;

impl OutcomeSink for NoOpSink {
    fn on_outcome(&mut self, _outcome: &Outcome) {}
}

/// A sink that logs every outcome using the `log` facade.
pub struct LoggingSink;

impl OutcomeSink for LoggingSink {
    fn on_outcome(&mut self, outcome: &Outcome) {
        if outcome.success {
            info!("OK {:?}: {}", outcome.target, outcome.messages.join("; "));
        } else {
            warn!("REJECTED {:?}: {}", outcome.target, outcome.messages.join("; "));
        }
    }
}

/// Everything one operation produced.
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub operation: &'static str,
    pub collection: String,
    pub outcomes: Vec<Outcome>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explanations: Vec<ExplanationItem>,
    pub summary: RunSummary,
}

impl OperationReport {
    pub fn new(operation: &'static str, collection: impl Into<String>) -> Self {
        Self {
            operation,
            collection: collection.into(),
            outcomes: Vec::new(),
            explanations: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// An operation that stopped before touching any node: one rejected
    /// outcome, summary 1/0/1.
    pub fn failed_run(
        operation: &'static str,
        collection: impl Into<String>,
        error: &PreingestError,
        sink: &mut dyn OutcomeSink,
    ) -> Self {
        let mut report = Self::new(operation, collection);
        report.record(Outcome::rejected(error.path(), error), sink);
        report
    }

    pub fn record(&mut self, outcome: Outcome, sink: &mut dyn OutcomeSink) {
        sink.on_outcome(&outcome);
        self.summary.count(&outcome);
        self.outcomes.push(outcome);
    }

    pub fn is_success(&self) -> bool {
        self.summary.rejected == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CollectingSink(Vec<Outcome>);

    impl OutcomeSink for CollectingSink {
        fn on_outcome(&mut self, outcome: &Outcome) {
            self.0.push(outcome.clone());
        }
    }

    #[test]
    fn test_summary_counts_and_sink_sees_every_outcome() {
        let mut sink = CollectingSink(Vec::new());
        let mut report = OperationReport::new("fixity", "A");
        report.record(Outcome::accepted("a.metadata", "ok"), &mut sink);
        report.record(
            Outcome::rejected(
                "b.metadata",
                &PreingestError::BinaryNotFound {
                    path: "b.pdf".into(),
                },
            ),
            &mut sink,
        );

        assert_eq!(
            report.summary,
            RunSummary {
                processed: 2,
                accepted: 1,
                rejected: 1
            }
        );
        assert_eq!(sink.0.len(), 2);
        assert_eq!(sink.0[1].error_kind, Some(ErrorKind::BinaryNotFound));
        assert!(!report.is_success());
    }

    #[test]
    fn test_failed_run_is_one_rejection() {
        let err = PreingestError::MissingSidecar {
            path: "/w/A/D/D.metadata".into(),
        };
        let report = OperationReport::failed_run("convert", "A", &err, &mut NoOpSink);
        assert_eq!(
            report.summary,
            RunSummary {
                processed: 1,
                accepted: 0,
                rejected: 1
            }
        );
        assert_eq!(report.outcomes[0].target, PathBuf::from("/w/A/D/D.metadata"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut report = OperationReport::new("validate", "A");
        report.record(Outcome::accepted("a.mdto.xml", "ok"), &mut NoOpSink);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["accepted"], 1);
        assert!(json.get("explanations").is_none());
        assert!(json["outcomes"][0].get("error_kind").is_none());
    }
}
