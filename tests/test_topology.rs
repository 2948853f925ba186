use sdn_flow_controller::domain::topology::topology::TopologyGraph;
use sdn_flow_controller::domain::utils::id::SwitchId;
use sdn_flow_controller::error::Error;

fn switch(name: &str) -> SwitchId {
    SwitchId::new(name)
}

/// Builds a graph from (source, target, port_source, port_target) tuples, all links
/// with weight 1 and 100 capacity units.
fn build_graph(edges: Vec<(&str, &str, u16, u16)>) -> TopologyGraph {
    let mut graph = TopologyGraph::new();

    for (a, b, port_a, port_b) in edges {
        graph.add_link(switch(a), switch(b), port_a, port_b, 1, 100);
    }

    return graph;
}

#[test]
fn add_link_creates_antiparallel_pair_with_independent_ports() {
    let graph = build_graph(vec![("s1", "s2", 4, 7)]);

    let forward = graph.link(&switch("s1"), &switch("s2")).expect("forward direction must exist");
    let backward = graph.link(&switch("s2"), &switch("s1")).expect("backward direction must exist");

    assert_eq!(forward.port, 4);
    assert_eq!(backward.port, 7);
    assert_eq!(graph.link_count(), 2);
    assert!(graph.contains_switch(&switch("s1")), "link endpoints become known switches");
    assert!(graph.contains_switch(&switch("s2")));
}

#[test]
fn re_adding_a_link_overwrites_with_last_writer_wins() {
    let mut graph = build_graph(vec![("s1", "s2", 4, 7)]);

    graph.reserve(&switch("s1"), &switch("s2"), 60).unwrap();

    // Re-discovery of the pair resets port, weight and capacity. No merge semantics.
    graph.add_link(switch("s1"), switch("s2"), 5, 8, 3, 200);

    let forward = graph.link(&switch("s1"), &switch("s2")).unwrap();
    assert_eq!(forward.port, 5);
    assert_eq!(forward.weight, 3);
    assert_eq!(forward.capacity, 200);
    assert_eq!(graph.link_count(), 2, "overwriting must not duplicate the pair");
}

#[test]
fn remove_link_drops_both_directions() {
    let mut graph = build_graph(vec![("s1", "s2", 1, 1), ("s2", "s3", 2, 2)]);

    assert!(graph.remove_link(&switch("s1"), &switch("s2")));

    assert!(graph.link(&switch("s1"), &switch("s2")).is_none());
    assert!(graph.link(&switch("s2"), &switch("s1")).is_none());
    assert_eq!(graph.link_count(), 2, "the unrelated pair must survive");
}

#[test]
fn removing_an_unknown_link_is_a_no_op() {
    let mut graph = build_graph(vec![("s1", "s2", 1, 1)]);

    assert!(!graph.remove_link(&switch("s1"), &switch("s9")));
    assert_eq!(graph.link_count(), 2);
}

#[test]
fn neighbors_of_unknown_switch_is_empty() {
    let graph = build_graph(vec![("s1", "s2", 1, 1)]);

    assert_eq!(graph.neighbors(&switch("s9")).count(), 0);
    assert_eq!(graph.neighbors(&switch("s1")).count(), 1);
}

#[test]
fn reserve_decrements_only_the_requested_direction() {
    let mut graph = build_graph(vec![("s1", "s2", 1, 1)]);

    graph.reserve(&switch("s1"), &switch("s2"), 30).unwrap();

    assert_eq!(graph.link(&switch("s1"), &switch("s2")).unwrap().capacity, 70);
    assert_eq!(graph.link(&switch("s2"), &switch("s1")).unwrap().capacity, 100, "reverse direction is accounted independently");
}

#[test]
fn reserve_beyond_capacity_fails_without_mutation() {
    let mut graph = build_graph(vec![("s1", "s2", 1, 1)]);

    let result = graph.reserve(&switch("s1"), &switch("s2"), 150);

    match result {
        Err(Error::InsufficientCapacity { requested, available, .. }) => {
            assert_eq!(requested, 150);
            assert_eq!(available, 100);
        }
        other => panic!("Expected InsufficientCapacity, got {:?}", other),
    }

    assert_eq!(graph.link(&switch("s1"), &switch("s2")).unwrap().capacity, 100);
}

#[test]
fn reserve_on_missing_link_reports_unknown_link() {
    let mut graph = build_graph(vec![("s1", "s2", 1, 1)]);

    let result = graph.reserve(&switch("s1"), &switch("s3"), 10);

    assert!(matches!(result, Err(Error::UnknownLink { .. })), "Expected UnknownLink, got {:?}", result);
}

#[test]
fn capacity_errors_render_both_link_endpoints() {
    let mut graph = build_graph(vec![("s1", "s2", 1, 1)]);

    let err = graph.reserve(&switch("s1"), &switch("s2"), 150).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("s1 -> s2"), "unexpected rendering: {}", rendered);
    assert!(rendered.contains("cannot reserve 150"), "unexpected rendering: {}", rendered);

    let err = graph.reserve(&switch("s1"), &switch("s9"), 1).unwrap_err();
    assert!(err.to_string().contains("No link s1 -> s9"), "unexpected rendering: {}", err);
}

#[test]
fn release_restores_capacity_and_clamps_at_provisioned_maximum() {
    let mut graph = build_graph(vec![("s1", "s2", 1, 1)]);

    graph.reserve(&switch("s1"), &switch("s2"), 40).unwrap();
    graph.release(&switch("s1"), &switch("s2"), 40);
    assert_eq!(graph.link(&switch("s1"), &switch("s2")).unwrap().capacity, 100);

    // A second release of the same amount is a defect upstream; the link must still
    // never exceed what it was provisioned with.
    graph.release(&switch("s1"), &switch("s2"), 40);
    assert_eq!(graph.link(&switch("s1"), &switch("s2")).unwrap().capacity, 100);
}

#[test]
fn release_on_removed_link_is_tolerated() {
    let mut graph = build_graph(vec![("s1", "s2", 1, 1)]);

    graph.reserve(&switch("s1"), &switch("s2"), 40).unwrap();
    graph.remove_link(&switch("s1"), &switch("s2"));

    // The flow holding the reservation may be torn down after the link went away.
    graph.release(&switch("s1"), &switch("s2"), 40);
    assert!(graph.link(&switch("s1"), &switch("s2")).is_none());
}
