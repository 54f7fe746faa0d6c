//! Graph persistence seam.
//!
//! Evaluation emits nodes and edges describing what was checked and what
//! was found. The orchestrator treats the sink as advisory: a failed
//! emission is logged and the evaluation result is unaffected.

use parking_lot::Mutex;

/// Errors a sink implementation may surface.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The backing store rejected the write or could not be reached.
    #[error("graph sink unavailable: {reason}")]
    Unavailable {
        /// Implementation-specific failure description.
        reason: String,
    },
}

/// One fact emitted during evaluation.
///
/// Document and issue events carry the project identifier so a sink can
/// materialize the `contains` and `generates` edges without holding state
/// between calls.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphEvent {
    /// The project under evaluation.
    ProjectNode {
        /// Identifier of the evaluated project.
        project_id: String,
        /// Human-readable project name.
        name: String,
    },
    /// A regulatory document the project was checked against, with its
    /// `contains` edge from the project node.
    DocumentNode {
        /// Identifier of the evaluated project.
        project_id: String,
        /// Stable document name within the corpus.
        document: String,
    },
    /// A compliance issue, with its `generates` edge from the document node.
    IssueNode {
        /// Identifier of the evaluated project.
        project_id: String,
        /// Document that generated the issue.
        document: String,
        /// Stable issue identifier.
        issue_id: String,
        /// Canonical severity label.
        severity: String,
    },
}

/// Destination for [`GraphEvent`]s.
///
/// Implementations must be `Send + Sync`; the orchestrator shares one sink
/// across concurrent evaluations and calls it inline.
pub trait GraphSink: Send + Sync {
    /// Record one event.
    fn emit(&self, event: GraphEvent) -> Result<(), SinkError>;
}

/// Sink that discards every event. The default when no graph store is
/// configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl GraphSink for NullSink {
    fn emit(&self, _event: GraphEvent) -> Result<(), SinkError> {
        Ok(())
    }
}

/// In-memory sink that records events in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<GraphEvent>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event emitted so far.
    pub fn events(&self) -> Vec<GraphEvent> {
        self.events.lock().clone()
    }

    /// Number of events emitted so far.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl GraphSink for MemorySink {
    fn emit(&self, event: GraphEvent) -> Result<(), SinkError> {
        self.events.lock().push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_preserves_emission_order() {
        let sink = MemorySink::new();
        sink.emit(GraphEvent::ProjectNode {
            project_id: "prj-1".into(),
            name: "Riverside block".into(),
        })
        .unwrap();
        sink.emit(GraphEvent::DocumentNode {
            project_id: "prj-1".into(),
            document: "cte-db-si".into(),
        })
        .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GraphEvent::ProjectNode { .. }));
        assert!(matches!(events[1], GraphEvent::DocumentNode { .. }));
    }

    #[test]
    fn null_sink_accepts_everything() {
        let sink = NullSink;
        assert!(sink
            .emit(GraphEvent::IssueNode {
                project_id: "prj-1".into(),
                document: "cte-db-he".into(),
                issue_id: "cte-db-he-0".into(),
                severity: "high".into(),
            })
            .is_ok());
    }

    #[test]
    fn graph_events_serialize_with_kind_tag() {
        let json = serde_json::to_value(GraphEvent::DocumentNode {
            project_id: "prj-9".into(),
            document: "zoning-universal".into(),
        })
        .unwrap();
        assert_eq!(json["kind"], "document_node");
        assert_eq!(json["document"], "zoning-universal");
    }
}
