use flowplane::types::constants::DEFAULT_DEMAND_NAME;
use flowplane::ModelError;
use simulator::topology::parse_tables;
use simulator::{parse_topology, TopologyFileError};

const REFERENCE: &str = include_str!("../topologies/reference.txt");

/// Tests that the bundled reference topology loads completely
#[test]
fn test_load_reference_topology() {
    println!("\n=== Starting test_load_reference_topology ===");
    let model = parse_topology(REFERENCE, 7).expect("Reference topology should load");

    assert_eq!(model.nodes().count(), 6);
    assert_eq!(model.interfaces().count(), 16);
    assert_eq!(model.circuits().len(), 8);
    assert_eq!(model.demands().count(), 5);
    assert_eq!(model.lsps().count(), 3);
    println!("[TEST]   Entity counts verified");

    let node = model.get_node("E").unwrap();
    assert_eq!((node.lat, node.lon), (50.0, 10.0));
    let interface = model.get_interface("D-to-F", "D").unwrap();
    assert_eq!(interface.cost, 3);
    assert_eq!(interface.capacity, 100.0);
    assert_eq!(interface.percent_reservable_bandwidth, 80.0);
    assert!(interface.rsvp_enabled);
    println!("=== Test completed successfully ===\n");
}

/// Tests comma separated rows, optional fields and their defaults
#[test]
fn test_optional_fields() {
    let text = "\
INTERFACES_TABLE
node,remote_node,name,cost,capacity
X,Y,X-to-Y,10,100
Y,X,Y-to-X,10,100

NODES_TABLE
name,lat,lon
X,not-a-number
Z

DEMANDS_TABLE
source,dest,traffic,name
X,Y,25,
";
    let model = parse_topology(text, 1).unwrap();

    assert_eq!(model.get_interface("X-to-Y", "X").unwrap().circuit_id, "X:Y");
    assert_eq!(model.get_interface("Y-to-X", "Y").unwrap().circuit_id, "X:Y");
    assert_eq!(model.get_remote_interface("X-to-Y", "X").unwrap().name, "Y-to-X");

    let node = model.get_node("X").unwrap();
    assert_eq!((node.lat, node.lon), (0.0, 0.0));
    assert_eq!(model.get_orphan_nodes().len(), 1);
    assert_eq!(model.get_demand("X", "Y", DEFAULT_DEMAND_NAME).unwrap().traffic, 25.0);
}

/// Tests that comments and blank lines between tables are ignored
#[test]
fn test_comments_ignored() {
    let text = "\
# leading comment

INTERFACES_TABLE
node\tremote_node\tname\tcost\tcapacity\tcircuit_id
# a commented-out row
X\tY\tX-to-Y\t10\t100\tc1
Y\tX\tY-to-X\t10\t100\tc1

RSVP_LSP_TABLE
source\tdest\tname
X\tY\tlsp_x_y
";
    let tables = parse_tables(text).unwrap();
    assert_eq!(tables.interfaces.len(), 2);
    assert_eq!(tables.lsps.len(), 1);
    assert!(tables.nodes.is_empty());
}

/// Tests that a circuit id must appear on exactly two interface rows
#[test]
fn test_circuit_id_count() {
    let text = "\
INTERFACES_TABLE
node,remote_node,name,cost,capacity,circuit_id
X,Y,X-to-Y,10,100,c1
Y,X,Y-to-X,10,100,c1
X,Y,X-to-Y-2,10,100,c1
";
    match parse_tables(text) {
        Err(TopologyFileError::CircuitIdCount { circuit_id, count }) => {
            assert_eq!(circuit_id, "c1");
            assert_eq!(count, 3);
        }
        other => panic!("Expected CircuitIdCount, got {:?}", other),
    }
}

/// Tests that malformed rows report their line number
#[test]
fn test_malformed_rows() {
    let outside = "X,Y,X-to-Y,10,100\n";
    assert!(matches!(
        parse_tables(outside),
        Err(TopologyFileError::MalformedLine { line: 1, .. })
    ));

    let short = "INTERFACES_TABLE\ntitles\nX,Y,X-to-Y,10\n";
    assert!(matches!(
        parse_tables(short),
        Err(TopologyFileError::MalformedLine { line: 3, .. })
    ));

    let bad_cost = "INTERFACES_TABLE\ntitles\nX,Y,X-to-Y,ten,100\n";
    assert!(matches!(
        parse_tables(bad_cost),
        Err(TopologyFileError::InvalidField { line: 3, field: "cost", .. })
    ));

    let bad_rsvp = "INTERFACES_TABLE\ntitles\nX,Y,X-to-Y,10,100,c1,maybe\nY,X,Y-to-X,10,100,c1\n";
    assert!(matches!(
        parse_tables(bad_rsvp),
        Err(TopologyFileError::InvalidField { field: "rsvp_enabled", .. })
    ));

    let bad_traffic = "DEMANDS_TABLE\ntitles\nX,Y,lots,dmd\n";
    assert!(matches!(
        parse_tables(bad_traffic),
        Err(TopologyFileError::InvalidField { field: "traffic", .. })
    ));
}

/// Tests that entities the model rejects surface as model errors
#[test]
fn test_model_rejections() {
    let unknown_node = "\
INTERFACES_TABLE
titles
X,Y,X-to-Y,10,100,c1
Y,X,Y-to-X,10,100,c1

DEMANDS_TABLE
titles
X,Q,10,dmd
";
    assert!(matches!(
        parse_topology(unknown_node, 1),
        Err(TopologyFileError::Model(ModelError::NodeNotFound(_)))
    ));

    let capacity_mismatch = "\
INTERFACES_TABLE
titles
X,Y,X-to-Y,10,100,c1
Y,X,Y-to-X,10,50,c1
";
    assert!(matches!(
        parse_topology(capacity_mismatch, 1),
        Err(TopologyFileError::Model(ModelError::Validation(_)))
    ));

    let duplicate_node = "NODES_TABLE\ntitles\nX\nX\n";
    assert!(matches!(
        parse_topology(duplicate_node, 1),
        Err(TopologyFileError::Model(ModelError::DuplicateEntity(_)))
    ));
}
