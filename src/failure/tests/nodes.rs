use crate::test_helpers::{load_on, reference_model};
use crate::ModelError;

/// Tests that failing a node fails every interface touching it
#[test]
fn test_fail_node() {
    let mut model = reference_model();
    model.add_demand("A", "F", 10.0, Some("dmd_a_f")).unwrap();
    model.fail_node("D").unwrap();

    assert!(model.get_node("D").unwrap().failed);
    for (name, node) in [
        ("D-to-A", "D"),
        ("A-to-D", "A"),
        ("B-to-D", "B"),
        ("C-to-D", "C"),
        ("E-to-D", "E"),
        ("F-to-D", "F"),
    ] {
        assert!(model.get_interface(name, node).unwrap().failed, "{}@{} should be failed", name, node);
    }
    assert_eq!(model.get_failed_interfaces().len(), 10);

    model.update_simulation().unwrap();
    assert!(model.get_demand("A", "F", "dmd_a_f").unwrap().path.is_unrouted());
    assert!(model.get_demand("B", "D", "dmd_b_d").unwrap().path.is_unrouted());
    assert_eq!(load_on(&model, "A-to-B", "A"), 50.0);
}

/// Tests that an interface cannot come back while an endpoint node is down
#[test]
fn test_unfail_interface_on_failed_node() {
    let mut model = reference_model();
    model.fail_node("D").unwrap();

    match model.unfail_interface("D-to-F", "D", true) {
        Err(ModelError::IllegalStateTransition(message)) => assert!(message.contains("D-to-F@D")),
        other => panic!("Expected IllegalStateTransition, got {:?}", other),
    }
    model.unfail_interface("F-to-D", "F", false).unwrap();
    assert!(model.get_interface("F-to-D", "F").unwrap().failed);
    assert!(model.get_interface("D-to-F", "D").unwrap().failed);
}

/// Tests that restoring a node restores only the interfaces whose remote node is up
#[test]
fn test_unfail_node() {
    let mut model = reference_model();
    model.fail_node("B").unwrap();
    model.fail_node("D").unwrap();

    model.unfail_node("D").unwrap();
    assert!(!model.get_node("D").unwrap().failed);
    assert!(!model.get_interface("D-to-F", "D").unwrap().failed);
    assert!(!model.get_interface("C-to-D", "C").unwrap().failed);
    assert!(model.get_interface("D-to-B", "D").unwrap().failed);
    assert!(model.get_interface("B-to-D", "B").unwrap().failed);

    model.unfail_node("B").unwrap();
    assert!(model.get_failed_interfaces().is_empty());
    assert!(model.get_failed_nodes().is_empty());

    model.update_simulation().unwrap();
    assert_eq!(load_on(&model, "A-to-B", "A"), 50.0);
    assert_eq!(load_on(&model, "B-to-D", "B"), 20.0);
}

/// Tests that unknown nodes are rejected
#[test]
fn test_fail_unknown_node() {
    let mut model = reference_model();
    assert!(matches!(model.fail_node("Z"), Err(ModelError::NodeNotFound(_))));
    assert!(matches!(model.unfail_node("Z"), Err(ModelError::NodeNotFound(_))));
}
