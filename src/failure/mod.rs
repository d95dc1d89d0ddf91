use crate::model::{Model, ModelError};
use crate::types::InterfaceKey;

#[cfg(test)]
mod tests;

impl Model {
    /// Fail an interface and its remote counterpart
    pub fn fail_interface(&mut self, name: &str, node: &str) -> Result<(), ModelError> {
        let key = self.get_interface(name, node)?.key();
        self.fail_circuit(&key);
        tracing::debug!(interface = %key, "Interface failed");
        self.run_validation()
    }

    /// Bring an interface and its remote counterpart back up.
    ///
    /// Only possible while both endpoint nodes are up. Otherwise the call
    /// fails with `IllegalStateTransition` when `raise_on_failure` is set,
    /// and does nothing when it is not.
    pub fn unfail_interface(&mut self, name: &str, node: &str, raise_on_failure: bool) -> Result<(), ModelError> {
        let key = self.get_interface(name, node)?.key();
        if !self.restore_circuit(&key)? {
            if raise_on_failure {
                let interface = self.interface_by_key(&key)?;
                return Err(ModelError::IllegalStateTransition(format!(
                    "cannot unfail interface {} while node {} or {} is failed",
                    key, interface.node, interface.remote_node
                )));
            }
            return Ok(());
        }
        tracing::debug!(interface = %key, "Interface restored");
        self.run_validation()
    }

    /// Fail every interface on the node, then the node itself
    pub fn fail_node(&mut self, name: &str) -> Result<(), ModelError> {
        let id = self.get_node(name)?.name.clone();
        let owned: Vec<InterfaceKey> = self
            .interfaces
            .values()
            .filter(|interface| interface.node == id)
            .map(|interface| interface.key())
            .collect();
        for key in &owned {
            self.fail_circuit(key);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.failed = true;
        }
        tracing::debug!(node = %id, interfaces = owned.len(), "Node failed");
        self.run_validation()
    }

    /// Bring the node back up, then every interface whose remote node is up too
    pub fn unfail_node(&mut self, name: &str) -> Result<(), ModelError> {
        let id = self.get_node(name)?.name.clone();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.failed = false;
        }
        let owned: Vec<InterfaceKey> = self
            .interfaces
            .values()
            .filter(|interface| interface.node == id)
            .map(|interface| interface.key())
            .collect();
        let mut restored = 0;
        for key in &owned {
            if self.restore_circuit(key)? {
                restored += 1;
            }
        }
        tracing::debug!(node = %id, restored, still_failed = owned.len() - restored, "Node restored");
        self.run_validation()
    }

    /// Mark both sides of the circuit failed and tear down every LSP riding it
    fn fail_circuit(&mut self, key: &InterfaceKey) {
        let members: Vec<InterfaceKey> = std::iter::once(key.clone()).chain(self.circuit_peer(key)).collect();
        for member in &members {
            if let Some(interface) = self.interfaces.get_mut(member) {
                interface.failed = true;
            }
        }

        let mut torn_down = false;
        for lsp in self.lsps.values_mut() {
            if members.iter().any(|member| lsp.traverses(member)) {
                tracing::debug!(lsp = %lsp.key(), "Tearing down LSP over failed interface");
                lsp.tear_down();
                torn_down = true;
            }
        }
        if torn_down {
            self.recompute_reservations();
        }
    }

    /// Bring both sides of the circuit up if both endpoint nodes are up.
    /// Returns false, changing nothing, when an endpoint node is failed.
    fn restore_circuit(&mut self, key: &InterfaceKey) -> Result<bool, ModelError> {
        let interface = self.interface_by_key(key)?;
        let endpoints_up = [&interface.node, &interface.remote_node]
            .into_iter()
            .all(|node| self.nodes.get(node).is_some_and(|node| !node.failed));
        if !endpoints_up {
            return Ok(false);
        }

        let members: Vec<InterfaceKey> = std::iter::once(key.clone()).chain(self.circuit_peer(key)).collect();
        for member in &members {
            if let Some(interface) = self.interfaces.get_mut(member) {
                interface.failed = false;
            }
        }
        self.recompute_reservations();
        Ok(true)
    }
}
