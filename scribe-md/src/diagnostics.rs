//! Diagnostic sink for nodes the renderer does not know how to handle.
//!
//! Unsupported markup is dropped rather than failing the render; the sink is how that loss
//! stays visible. The default sink logs through `tracing` at info level.

/// Receives one event per skipped node.
pub trait DiagnosticSink {
    fn unknown_node(&mut self, kind: &str, depth: usize);
}

/// Logs unknown nodes as `tracing` info events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn unknown_node(&mut self, kind: &str, depth: usize) {
        tracing::info!(kind, depth, "skipping unsupported node");
    }
}

/// One recorded skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: String,
    pub depth: usize,
}

/// Keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    pub events: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.events.iter().map(|event| event.kind.as_str()).collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn unknown_node(&mut self, kind: &str, depth: usize) {
        self.events.push(Diagnostic {
            kind: kind.to_string(),
            depth,
        });
    }
}
