//! Mutating API. Every call checks its inputs up front, applies the change,
//! then re-runs the validator; a change that fails validation is undone
//! before the error is returned.

use crate::types::constants::DEFAULT_DEMAND_NAME;
use crate::types::{Demand, DemandKey, Hop, Interface, InterfaceKey, Lsp, LspKey, LspPath, Node, RoutedPath};
use super::{Model, ModelError};

impl Model {
    /// Add a node with no interfaces
    pub fn add_node(&mut self, node: Node) -> Result<(), ModelError> {
        if self.nodes.contains_key(&node.name) {
            return Err(ModelError::DuplicateEntity(format!("node {}", node.name)));
        }
        let id = node.name.clone();
        self.nodes.insert(id.clone(), node);
        self.commit_or_rollback(|model| {
            model.nodes.remove(&id);
        })
    }

    /// Add both interfaces of a circuit at once
    pub fn add_circuit(&mut self, a: Interface, b: Interface) -> Result<(), ModelError> {
        if a.node != b.remote_node || b.node != a.remote_node {
            return Err(ModelError::InvalidInput(format!(
                "interfaces {} and {} do not point at each other",
                a.key(),
                b.key()
            )));
        }
        if a.circuit_id != b.circuit_id {
            return Err(ModelError::InvalidInput(format!(
                "interfaces {} and {} carry different circuit ids ({} / {})",
                a.key(),
                b.key(),
                a.circuit_id,
                b.circuit_id
            )));
        }
        self.add_interfaces(vec![a, b])
    }

    /// Add a batch of interfaces; the batch must pair up into circuits,
    /// possibly together with interfaces already in the model.
    ///
    /// Nodes referenced by the interfaces are created when missing.
    pub fn add_interfaces(&mut self, interfaces: Vec<Interface>) -> Result<(), ModelError> {
        let mut keys: Vec<InterfaceKey> = Vec::with_capacity(interfaces.len());
        for interface in &interfaces {
            check_interface_input(interface)?;
            let key = interface.key();
            if self.interfaces.contains_key(&key) || keys.contains(&key) {
                return Err(ModelError::DuplicateEntity(format!("interface {}", key)));
            }
            keys.push(key);
        }

        let mut created_nodes = Vec::new();
        for interface in interfaces {
            for node in [&interface.node, &interface.remote_node] {
                if !self.nodes.contains_key(node) {
                    self.nodes.insert(node.clone(), Node::new(node.clone()));
                    created_nodes.push(node.clone());
                }
            }
            self.interfaces.insert(interface.key(), interface);
        }

        self.commit_or_rollback(|model| {
            for key in &keys {
                model.interfaces.remove(key);
            }
            for node in &created_nodes {
                model.nodes.remove(node);
            }
        })
    }

    /// Add a demand between two existing nodes; `name` defaults to a fixed sentinel
    pub fn add_demand(&mut self, source: &str, dest: &str, traffic: f64, name: Option<&str>) -> Result<(), ModelError> {
        let source = self.get_node(source)?.name.clone();
        let dest = self.get_node(dest)?.name.clone();
        if !traffic.is_finite() || traffic < 0.0 {
            return Err(ModelError::InvalidInput(format!(
                "demand traffic must be a non-negative number, got {}",
                traffic
            )));
        }
        let demand = Demand::new(source, dest, traffic, name.unwrap_or(DEFAULT_DEMAND_NAME));
        let key = demand.key();
        if self.demands.contains_key(&key) {
            return Err(ModelError::DuplicateEntity(format!("demand {}", key)));
        }
        self.demands.insert(key.clone(), demand);
        self.commit_or_rollback(|model| {
            model.demands.remove(&key);
        })
    }

    /// Add an unsignaled LSP between two existing nodes
    pub fn add_lsp(&mut self, source: &str, dest: &str, name: &str) -> Result<(), ModelError> {
        let source = self.get_node(source)?.name.clone();
        let dest = self.get_node(dest)?.name.clone();
        if source == dest {
            return Err(ModelError::InvalidInput(format!("LSP {} starts and ends at {}", name, source)));
        }
        let lsp = Lsp::new(source, dest, name);
        let key = lsp.key();
        if self.lsps.contains_key(&key) {
            return Err(ModelError::DuplicateEntity(format!("{}", key)));
        }
        self.lsps.insert(key.clone(), lsp);
        self.commit_or_rollback(|model| {
            model.lsps.remove(&key);
        })
    }

    /// Rename an interface, rewriting every path that references it
    pub fn change_interface_name(&mut self, node: &str, current_name: &str, new_name: &str) -> Result<(), ModelError> {
        let old_key = self.get_interface(current_name, node)?.key();
        let new_key = InterfaceKey::new(new_name, old_key.node.clone());
        if self.interfaces.contains_key(&new_key) {
            return Err(ModelError::DuplicateEntity(format!("interface {}", new_key)));
        }

        self.rekey_interface(&old_key, &new_key);
        let (undo_from, undo_to) = (new_key.clone(), old_key.clone());
        self.commit_or_rollback(move |model| model.rekey_interface(&undo_from, &undo_to))
    }

    /// Change the cost of one interface; its remote counterpart keeps its own cost
    pub fn set_interface_cost(&mut self, name: &str, node: &str, cost: u32) -> Result<(), ModelError> {
        let key = self.get_interface(name, node)?.key();
        if cost == 0 {
            return Err(ModelError::InvalidInput(format!(
                "interface {} cost must be a positive integer",
                key
            )));
        }
        let Some(interface) = self.interfaces.get_mut(&key) else {
            return Err(ModelError::InterfaceNotFound(key));
        };
        let previous = std::mem::replace(&mut interface.cost, cost);
        self.commit_or_rollback(move |model| {
            if let Some(interface) = model.interfaces.get_mut(&key) {
                interface.cost = previous;
            }
        })
    }

    fn rekey_interface(&mut self, from: &InterfaceKey, to: &InterfaceKey) {
        let Some(mut interface) = self.interfaces.remove(from) else {
            return;
        };
        interface.name = to.name.clone();
        self.interfaces.insert(to.clone(), interface);

        for circuit in &mut self.circuits {
            for member in [&mut circuit.a, &mut circuit.b] {
                if member == from {
                    *member = to.clone();
                }
            }
        }
        for demand in self.demands.values_mut() {
            if let RoutedPath::Routed(paths) = &mut demand.path {
                for hop in paths.iter_mut().flatten() {
                    if matches!(hop, Hop::Interface(key) if key == from) {
                        *hop = Hop::Interface(to.clone());
                    }
                }
            }
        }
        for lsp in self.lsps.values_mut() {
            if let LspPath::Routed(path) = &mut lsp.path {
                for key in path.interfaces.iter_mut().filter(|key| *key == from) {
                    *key = to.clone();
                }
            }
        }
    }

    /// Validate and keep the change, or undo it with `rollback` and surface the error
    fn commit_or_rollback<F>(&mut self, rollback: F) -> Result<(), ModelError>
    where
        F: FnOnce(&mut Self),
    {
        if let Err(error) = self.run_validation() {
            rollback(self);
            return Err(error);
        }
        Ok(())
    }

    /// Remove a demand
    pub fn remove_demand(&mut self, source: &str, dest: &str, name: &str) -> Result<Demand, ModelError> {
        let key = DemandKey::new(source, dest, name);
        let demand = self.demands.remove(&key).ok_or(ModelError::DemandNotFound(key))?;
        self.run_validation()?;
        Ok(demand)
    }

    /// Remove an LSP and release the bandwidth it held
    pub fn remove_lsp(&mut self, source: &str, dest: &str, name: &str) -> Result<Lsp, ModelError> {
        let key = LspKey::new(source, dest, name);
        let lsp = self.lsps.remove(&key).ok_or(ModelError::LspNotFound(key))?;
        self.recompute_reservations();
        self.run_validation()?;
        Ok(lsp)
    }
}

/// Fail fast on values no interface may carry
fn check_interface_input(interface: &Interface) -> Result<(), ModelError> {
    if interface.cost == 0 {
        return Err(ModelError::InvalidInput(format!(
            "interface {} cost must be a positive integer",
            interface.key()
        )));
    }
    if !interface.capacity.is_finite() || interface.capacity <= 0.0 {
        return Err(ModelError::InvalidInput(format!(
            "interface {} capacity must be a positive number, got {}",
            interface.key(),
            interface.capacity
        )));
    }
    if !(0.0..=100.0).contains(&interface.percent_reservable_bandwidth) {
        return Err(ModelError::InvalidInput(format!(
            "interface {} reservable percentage must be within 0..=100, got {}",
            interface.key(),
            interface.percent_reservable_bandwidth
        )));
    }
    if interface.node == interface.remote_node {
        return Err(ModelError::InvalidInput(format!(
            "interface {} points back at its own node",
            interface.key()
        )));
    }
    Ok(())
}
