//! Integration tests for hl-graph.

use hl_graph::{GraphBuilder, GraphError, IncidenceMatrix};
use nalgebra::DVector;

#[test]
fn build_minimal_loop() {
    // Tank -> [Pump] -> Header -> [Return] -> Tank
    let mut builder = GraphBuilder::new();
    let tank = builder.add_node("Tank");
    let header = builder.add_node("Header");
    let pump = builder.add_branch("Pump", tank, header);
    builder.add_branch("Return", header, tank);

    let graph = builder.build().unwrap();

    assert_eq!(graph.nodes().len(), 2);
    assert_eq!(graph.branches().len(), 2);

    let branch = graph.branch(pump).unwrap();
    assert_eq!(branch.from, tank);
    assert_eq!(branch.to, header);
    assert_eq!(graph.node(header).unwrap().name, "Header");
    assert_eq!(graph.branches()[1].name, "Return");
}

#[test]
fn parallel_branches_share_endpoints() {
    let mut builder = GraphBuilder::new();
    builder.add_node("Suction");
    builder.add_node("Discharge");
    builder.add_branch_between("PumpA", "Suction", "Discharge").unwrap();
    builder.add_branch_between("PumpB", "Suction", "Discharge").unwrap();
    builder.add_branch_between("Return", "Discharge", "Suction").unwrap();
    let graph = builder.build().unwrap();

    let inc = IncidenceMatrix::from_graph(&graph);
    let q = DVector::from_vec(vec![0.1, 0.2, 0.3]);
    let net = inc.apply(&q).unwrap();
    assert!(net.iter().all(|v| v.abs() < 1e-15));

    let q = DVector::from_vec(vec![0.1, 0.2, 0.1]);
    let net = inc.apply(&q).unwrap();
    // Discharge receives 0.3 and sends 0.1
    assert!((net[1] - 0.2).abs() < 1e-15);
    assert!((net[0] + 0.2).abs() < 1e-15);
}

#[test]
fn duplicate_node_name_fails_build() {
    let mut builder = GraphBuilder::new();
    builder.add_node("Tank");
    builder.add_node("Tank");
    let err = builder.build().unwrap_err();
    assert_eq!(
        err,
        GraphError::DuplicateNodeName {
            name: "Tank".into()
        }
    );
}
