//! Diagnostic sink boundary.
//!
//! Dispatcher and descriptor logic MUST NOT write to any global surface.
//! Every runtime message and fault flows through a `DiagnosticSink`
//! supplied by the host at solve time; this module is the only bridge
//! between evaluation logic and host-side reporting.

use crate::{error::InvocationFault, message::RuntimeMessage};

///
/// DiagnosticSink
///

pub trait DiagnosticSink {
    /// A marshaling message, tagged with the originating slot name.
    fn message(&mut self, slot: &str, message: RuntimeMessage);

    /// A cycle-fatal fault from the named node instance.
    fn fault(&mut self, node: &str, fault: &InvocationFault);
}

///
/// MemorySink
///
/// Collecting sink for tests and host adapters that batch their reporting.
///

#[derive(Debug, Default)]
pub struct MemorySink {
    pub messages: Vec<(String, RuntimeMessage)>,
    pub faults: Vec<(String, InvocationFault)>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded for one slot, in arrival order.
    pub fn slot_messages(&self, slot: &str) -> impl Iterator<Item = &RuntimeMessage> {
        self.messages
            .iter()
            .filter(move |(s, _)| s == slot)
            .map(|(_, m)| m)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|(_, m)| m.severity == crate::message::Severity::Warning)
            .count()
    }
}

impl DiagnosticSink for MemorySink {
    fn message(&mut self, slot: &str, message: RuntimeMessage) {
        self.messages.push((slot.to_string(), message));
    }

    fn fault(&mut self, node: &str, fault: &InvocationFault) {
        self.faults.push((node.to_string(), fault.clone()));
    }
}

///
/// NullSink
///

#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn message(&mut self, _slot: &str, _message: RuntimeMessage) {}

    fn fault(&mut self, _node: &str, _fault: &InvocationFault) {}
}
