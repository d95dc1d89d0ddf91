use crate::test_helpers::{load_on, reference_model, reference_topology};
use crate::types::{Hop, InterfaceKey, RoutedPath};

/// Tests the baseline traffic of the reference model
#[test]
fn test_reference_traffic() {
    println!("\n=== Starting test_reference_traffic ===");
    let mut model = reference_model();
    model.update_simulation().unwrap();

    assert_eq!(load_on(&model, "A-to-B", "A"), 50.0);
    assert_eq!(load_on(&model, "B-to-D", "B"), 20.0);
    assert_eq!(load_on(&model, "B-to-E", "B"), 20.0);
    assert_eq!(load_on(&model, "E-to-D", "E"), 20.0);
    println!("[TEST]   ECMP split of dmd_b_d verified");

    let carrying: Vec<String> = model
        .interfaces()
        .filter(|interface| interface.traffic.load().unwrap_or(0.0) > 0.0)
        .map(|interface| interface.key().to_string())
        .collect();
    assert_eq!(carrying, vec!["A-to-B@A", "B-to-D@B", "B-to-E@B", "E-to-D@E"]);

    let utilization = model.get_interface("A-to-B", "A").unwrap().utilization();
    assert_eq!(utilization.load(), Some(0.5));
    println!("=== Test completed successfully ===\n");
}

/// Tests that traffic splits evenly along a single path end to end
#[test]
fn test_traffic_conserved_along_path() {
    let mut model = reference_topology();
    model.add_demand("A", "F", 30.0, Some("dmd_a_f")).unwrap();
    model.update_simulation().unwrap();

    let demand = model.get_demand("A", "F", "dmd_a_f").unwrap();
    assert_eq!(
        demand.path,
        RoutedPath::Routed(vec![vec![
            Hop::Interface(InterfaceKey::new("A-to-C", "A")),
            Hop::Interface(InterfaceKey::new("C-to-D", "C")),
            Hop::Interface(InterfaceKey::new("D-to-F", "D")),
        ]])
    );
    for (name, node) in [("A-to-C", "A"), ("C-to-D", "C"), ("D-to-F", "D")] {
        assert_eq!(load_on(&model, name, node), 30.0);
    }
    let total: f64 = model.interfaces().filter_map(|interface| interface.traffic.load()).sum();
    assert_eq!(total, 90.0);
}

/// Tests that demands between the same pair add up on shared interfaces
#[test]
fn test_demands_accumulate() {
    let mut model = reference_model();
    model.add_demand("A", "B", 25.0, Some("dmd_a_b_2")).unwrap();
    model.add_demand("A", "B", 0.0, Some("dmd_a_b_empty")).unwrap();
    model.update_simulation().unwrap();

    assert_eq!(load_on(&model, "A-to-B", "A"), 75.0);
    let empty = model.get_demand("A", "B", "dmd_a_b_empty").unwrap();
    assert!(!empty.path.is_unrouted());
}

/// Tests that a demand with no path is unrouted and credits nothing
#[test]
fn test_unreachable_demand() {
    let mut model = reference_model();
    model.add_demand("A", "A", 10.0, Some("dmd_a_a")).unwrap();
    model.add_demand("A", "F", 10.0, Some("dmd_a_f")).unwrap();
    model.fail_interface("D-to-F", "D").unwrap();
    model.update_simulation().unwrap();

    assert!(model.get_demand("A", "A", "dmd_a_a").unwrap().path.is_unrouted());
    assert!(model.get_demand("A", "F", "dmd_a_f").unwrap().path.is_unrouted());
    assert!(model.get_interface("D-to-F", "D").unwrap().traffic.is_down());
    assert_eq!(load_on(&model, "A-to-C", "A"), 0.0);
}

/// Tests that only demands sharing an LSP's endpoints ride the LSP mesh
#[test]
fn test_demands_ride_matching_lsps() {
    let mut model = reference_model();
    model.add_lsp("A", "D", "lsp_a_d").unwrap();
    model.add_demand("A", "D", 30.0, Some("dmd_a_d")).unwrap();
    model.update_simulation().unwrap();

    let lsp = model.get_lsp("A", "D", "lsp_a_d").unwrap();
    let over_lsp = model.get_demand("A", "D", "dmd_a_d").unwrap();
    assert_eq!(over_lsp.path.alternatives(), &[vec![Hop::Lsp(lsp.key())]]);
    assert_eq!(load_on(&model, "A-to-C", "A"), 30.0);
    assert_eq!(load_on(&model, "C-to-D", "C"), 30.0);

    // dmd_a_b shares no endpoints with an LSP and keeps its IGP path
    let over_igp = model.get_demand("A", "B", "dmd_a_b").unwrap();
    assert_eq!(
        over_igp.path.alternatives(),
        &[vec![Hop::Interface(InterfaceKey::new("A-to-B", "A"))]]
    );
}

/// Tests that routing the same model twice gives the same result
#[test]
fn test_routing_is_stable() {
    let mut model = reference_model();
    model.add_lsp("A", "D", "lsp_a_d").unwrap();
    model.update_simulation().unwrap();
    let first = model.dump();
    model.update_simulation().unwrap();
    assert_eq!(first, model.dump());
}
