use crate::test_helpers::{load_on, reference_model};
use crate::types::{Hop, InterfaceKey, Traffic};
use crate::ModelError;

/// Tests that failing an interface takes down both sides and re-routes around it
#[test]
fn test_fail_interface_reroutes() {
    println!("\n=== Starting test_fail_interface_reroutes ===");
    let mut model = reference_model();
    model.update_simulation().unwrap();
    assert_eq!(load_on(&model, "A-to-B", "A"), 50.0);

    model.fail_interface("A-to-B", "A").unwrap();
    assert!(model.get_interface("A-to-B", "A").unwrap().failed);
    assert!(model.get_interface("B-to-A", "B").unwrap().failed);
    println!("[TEST]   Both sides of circuit 1 failed");

    model.update_simulation().unwrap();
    assert_eq!(model.get_interface("A-to-B", "A").unwrap().traffic, Traffic::Down);
    assert!(model.get_interface("A-to-B", "A").unwrap().utilization().is_down());

    let demand = model.get_demand("A", "B", "dmd_a_b").unwrap();
    assert!(!demand.path.is_unrouted());
    assert_eq!(demand.path.alternatives().len(), 2);
    for alternative in demand.path.alternatives() {
        assert!(!alternative.contains(&Hop::Interface(InterfaceKey::new("A-to-B", "A"))));
    }
    assert_eq!(load_on(&model, "A-to-C", "A"), 50.0);
    assert_eq!(load_on(&model, "D-to-B", "D"), 25.0);
    println!("=== Test completed successfully ===\n");
}

/// Tests that an ECMP set shrinks when one of its links fails
#[test]
fn test_fail_interface_shrinks_ecmp() {
    let mut model = reference_model();
    model.update_simulation().unwrap();
    assert_eq!(model.get_demand("B", "D", "dmd_b_d").unwrap().path.alternatives().len(), 2);
    assert_eq!(load_on(&model, "B-to-E", "B"), 20.0);

    model.fail_interface("B-to-D", "B").unwrap();
    model.update_simulation().unwrap();
    assert_eq!(model.get_demand("B", "D", "dmd_b_d").unwrap().path.alternatives().len(), 1);
    assert_eq!(load_on(&model, "B-to-E", "B"), 40.0);
    assert_eq!(load_on(&model, "E-to-D", "E"), 40.0);
}

/// Tests that restoring an interface brings the original routing back
#[test]
fn test_unfail_interface() {
    let mut model = reference_model();
    model.fail_interface("B-to-A", "B").unwrap();
    model.update_simulation().unwrap();
    assert!(model.get_interface("A-to-B", "A").unwrap().traffic.is_down());

    model.unfail_interface("A-to-B", "A", true).unwrap();
    assert!(!model.get_interface("B-to-A", "B").unwrap().failed);
    model.update_simulation().unwrap();
    assert_eq!(load_on(&model, "A-to-B", "A"), 50.0);
    assert!(model.get_failed_interfaces().is_empty());
}

/// Tests that failing an already failed interface changes nothing
#[test]
fn test_fail_interface_twice() {
    let mut model = reference_model();
    model.fail_interface("A-to-B", "A").unwrap();
    model.fail_interface("A-to-B", "A").unwrap();
    assert_eq!(model.get_failed_interfaces().len(), 2);
}

/// Tests that unknown interfaces are rejected
#[test]
fn test_fail_unknown_interface() {
    let mut model = reference_model();
    assert!(matches!(model.fail_interface("A-to-Z", "A"), Err(ModelError::InterfaceNotFound(_))));
    assert!(matches!(
        model.unfail_interface("A-to-Z", "A", true),
        Err(ModelError::InterfaceNotFound(_))
    ));
}

/// Tests that LSPs riding a failed interface are torn down and re-signaled elsewhere
#[test]
fn test_fail_interface_tears_down_lsps() {
    let mut model = reference_model();
    model.add_lsp("A", "B", "lsp_a_b").unwrap();
    model.update_simulation().unwrap();
    assert_eq!(model.get_lsp("A", "B", "lsp_a_b").unwrap().path_cost(), Some(4));

    model.fail_interface("A-to-B", "A").unwrap();
    let lsp = model.get_lsp("A", "B", "lsp_a_b").unwrap();
    assert!(lsp.path.is_unrouted());
    assert_eq!(lsp.reserved_bandwidth, None);
    assert_eq!(model.get_interface("A-to-B", "A").unwrap().reserved_bandwidth, 0.0);

    model.update_simulation().unwrap();
    let lsp = model.get_lsp("A", "B", "lsp_a_b").unwrap();
    assert_eq!(lsp.path_cost(), Some(14));
    assert_eq!(lsp.reserved_bandwidth, Some(50.0));
    assert_eq!(model.get_interface("A-to-C", "A").unwrap().reserved_bandwidth, 50.0);
}
