//! Topology builders shared by unit and integration tests.

use std::collections::BTreeMap;
use crate::model::Model;
use crate::types::{Interface, InterfaceKey};

/// Links of the six-node reference topology: (a, b, cost, capacity)
pub const REFERENCE_LINKS: [(&str, &str, u32, f64); 8] = [
    ("A", "B", 4, 100.0),
    ("A", "C", 1, 200.0),
    ("A", "D", 8, 150.0),
    ("B", "D", 7, 200.0),
    ("B", "E", 3, 200.0),
    ("D", "C", 6, 150.0),
    ("D", "E", 4, 100.0),
    ("D", "F", 3, 100.0),
];

/// Add a symmetric link `a-to-b` / `b-to-a` with the given cost and capacity
pub fn add_link(model: &mut Model, a: &str, b: &str, cost: u32, capacity: f64, circuit_id: &str) {
    model
        .add_circuit(
            Interface::new(format!("{}-to-{}", a, b), a, b, cost, capacity, circuit_id),
            Interface::new(format!("{}-to-{}", b, a), b, a, cost, capacity, circuit_id),
        )
        .expect("Failed to add link");
}

/// The reference topology with no demands or LSPs
pub fn reference_topology() -> Model {
    let mut model = Model::with_seed(7);
    for (index, (a, b, cost, capacity)) in REFERENCE_LINKS.iter().enumerate() {
        add_link(&mut model, a, b, *cost, *capacity, &(index + 1).to_string());
    }
    model
}

/// The reference topology carrying demands A->B (50) and B->D (40)
pub fn reference_model() -> Model {
    let mut model = reference_topology();
    model.add_demand("A", "B", 50.0, Some("dmd_a_b")).expect("Failed to add demand");
    model.add_demand("B", "D", 40.0, Some("dmd_b_d")).expect("Failed to add demand");
    model
}

/// Current traffic on an interface, panicking when it is down
pub fn load_on(model: &Model, name: &str, node: &str) -> f64 {
    model
        .get_interface(name, node)
        .expect("Interface not found")
        .traffic
        .load()
        .expect("Interface is down")
}

/// Bandwidth held by the LSPs crossing each interface, summed without any cap
pub fn lsp_bookings(model: &Model) -> BTreeMap<InterfaceKey, f64> {
    let mut bookings = BTreeMap::new();
    for lsp in model.lsps() {
        let held = lsp.reserved_bandwidth.unwrap_or(0.0);
        for interface in lsp.interfaces() {
            *bookings.entry(interface.clone()).or_insert(0.0) += held;
        }
    }
    bookings
}

/// Panic when the LSPs on any interface hold more than its reservable share
pub fn assert_admission_safe(model: &Model) {
    let bookings = lsp_bookings(model);
    for interface in model.interfaces() {
        let booked = bookings.get(&interface.key()).copied().unwrap_or(0.0);
        let reservable = interface.capacity * interface.percent_reservable_bandwidth / 100.0;
        assert!(
            booked <= reservable + 1e-9,
            "{} has {} booked by LSPs but only {} reservable",
            interface.key(),
            booked,
            reservable
        );
    }
}
