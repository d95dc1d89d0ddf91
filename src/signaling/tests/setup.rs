use crate::test_helpers::reference_model;

/// Tests that the demand between two nodes is split across the LSPs sharing them
#[test]
fn test_setup_bandwidth_split() {
    println!("\n=== Starting test_setup_bandwidth_split ===");
    let mut model = reference_model();
    model.add_lsp("A", "B", "lsp_a_b_1").unwrap();
    model.add_lsp("A", "B", "lsp_a_b_2").unwrap();
    model.add_demand("A", "B", 10.0, Some("dmd_a_b_extra")).unwrap();
    model.update_simulation().unwrap();

    for name in ["lsp_a_b_1", "lsp_a_b_2"] {
        let lsp = model.get_lsp("A", "B", name).unwrap();
        assert_eq!(lsp.setup_bandwidth, 30.0);
        assert_eq!(lsp.reserved_bandwidth, Some(30.0));
        assert_eq!(lsp.path_cost(), Some(4));
        println!("[TEST]   {} reserved {:?} over cost {:?}", name, lsp.reserved_bandwidth, lsp.path_cost());
    }
    assert_eq!(model.get_interface("A-to-B", "A").unwrap().reserved_bandwidth, 60.0);
    println!("=== Test completed successfully ===\n");
}

/// Tests that an LSP with no matching demand is signaled with zero bandwidth
#[test]
fn test_setup_bandwidth_without_demand() {
    let mut model = reference_model();
    model.add_lsp("C", "E", "lsp_c_e").unwrap();
    model.update_simulation().unwrap();

    let lsp = model.get_lsp("C", "E", "lsp_c_e").unwrap();
    assert_eq!(lsp.setup_bandwidth, 0.0);
    assert_eq!(lsp.reserved_bandwidth, Some(0.0));
    assert!(lsp.is_signaled());
    assert_eq!(lsp.path_cost(), Some(8));
}

/// Tests that setup bandwidth follows demand changes on the next cycle
#[test]
fn test_setup_bandwidth_tracks_demands() {
    let mut model = reference_model();
    model.add_lsp("B", "D", "lsp_b_d").unwrap();
    model.update_simulation().unwrap();
    assert_eq!(model.get_lsp("B", "D", "lsp_b_d").unwrap().setup_bandwidth, 40.0);

    model.remove_demand("B", "D", "dmd_b_d").unwrap();
    model.update_simulation().unwrap();
    let lsp = model.get_lsp("B", "D", "lsp_b_d").unwrap();
    assert_eq!(lsp.setup_bandwidth, 0.0);
    assert_eq!(lsp.reserved_bandwidth, Some(0.0));
}
