use crate::raw::{Access, Raw};
use std::collections::BTreeMap;

///
/// DataAccess
///
/// The host's per-instance data object: upstream values in, solved values
/// out, addressed by slot index. `get` returns the container adapted to
/// the requested shape, or `None` when the host has no data for the slot.
///

pub trait DataAccess {
    fn get(&self, slot: usize, access: Access) -> Option<Raw>;

    fn set(&mut self, slot: usize, raw: Raw) -> bool;

    /// Remove any value for an output slot (an omitted optional).
    fn clear(&mut self, slot: usize) -> bool;
}

///
/// MemoryAccess
///
/// In-memory reference implementation of the host contract, used by the
/// macro tests and by host adapters as a staging buffer. Input and output
/// slots are separate spaces, matching hosts that keep upstream wires and
/// solved results apart.
///

#[derive(Debug, Default)]
pub struct MemoryAccess {
    inputs: BTreeMap<usize, Raw>,
    outputs: BTreeMap<usize, Raw>,
}

impl MemoryAccess {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an upstream value for an input slot.
    pub fn seed(&mut self, slot: usize, raw: Raw) {
        self.inputs.insert(slot, raw);
    }

    #[must_use]
    pub fn with_seed(mut self, slot: usize, raw: Raw) -> Self {
        self.seed(slot, raw);
        self
    }

    /// Solved value written to an output slot, if any.
    #[must_use]
    pub fn output(&self, slot: usize) -> Option<&Raw> {
        self.outputs.get(&slot)
    }
}

impl DataAccess for MemoryAccess {
    fn get(&self, slot: usize, access: Access) -> Option<Raw> {
        self.inputs
            .get(&slot)
            .cloned()
            .and_then(|raw| raw.reshape(access))
    }

    fn set(&mut self, slot: usize, raw: Raw) -> bool {
        self.outputs.insert(slot, raw);
        true
    }

    fn clear(&mut self, slot: usize) -> bool {
        self.outputs.remove(&slot);
        true
    }
}

///
/// TESTS
///
