use serde::{Deserialize, Serialize};
use super::InterfaceKey;

/// A pair of interfaces that point at each other with the same circuit id.
///
/// Circuits are never created directly; the model re-derives them from
/// interface pairing on every validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Circuit {
    /// The smaller of the two interface keys
    pub a: InterfaceKey,
    /// The larger of the two interface keys
    pub b: InterfaceKey,
    /// Pairing key shared by both interfaces
    pub circuit_id: String,
}

impl Circuit {
    pub(crate) fn new(first: InterfaceKey, second: InterfaceKey, circuit_id: String) -> Self {
        if first <= second {
            Self { a: first, b: second, circuit_id }
        } else {
            Self { a: second, b: first, circuit_id }
        }
    }

    /// The member interface opposite `key`, if `key` belongs to this circuit
    pub fn peer_of(&self, key: &InterfaceKey) -> Option<&InterfaceKey> {
        if &self.a == key {
            Some(&self.b)
        } else if &self.b == key {
            Some(&self.a)
        } else {
            None
        }
    }

    pub fn contains(&self, key: &InterfaceKey) -> bool {
        &self.a == key || &self.b == key
    }
}
