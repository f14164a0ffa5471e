use prefnet_core::rng::RngHandle;
use prefnet_core::Network;
use prefnet_graph::{
    canonical_hash, network_from_bytes, network_from_json, network_to_bytes, network_to_json,
    GeneratorConfig, GraphBuilder,
};

fn grown(seed: u64) -> GraphBuilder {
    let mut graph = GraphBuilder::new(GeneratorConfig {
        initial_nodes: 3,
        max_nodes: 40,
        links_per_node: Some(2),
    })
    .unwrap();
    let mut rng = RngHandle::from_seed(seed);
    graph.generate(&mut rng).unwrap();
    graph
}

#[test]
fn binary_snapshot_round_trips() {
    let graph = grown(23);
    let bytes = network_to_bytes(&graph).unwrap();
    let restored = network_from_bytes(&bytes).unwrap();

    assert_eq!(restored.node_count(), graph.node_count());
    assert_eq!(restored.total_degree(), graph.total_degree());
    assert_eq!(restored.config(), graph.config());
    assert_eq!(
        canonical_hash(&restored).unwrap(),
        canonical_hash(&graph).unwrap()
    );
}

#[test]
fn json_snapshot_round_trips() {
    let graph = grown(29);
    let json = network_to_json(&graph).unwrap();
    let restored = network_from_json(&json).unwrap();

    assert_eq!(
        canonical_hash(&restored).unwrap(),
        canonical_hash(&graph).unwrap()
    );
}

#[test]
fn partial_snapshot_resumes_generation() {
    let mut graph = GraphBuilder::new(GeneratorConfig {
        initial_nodes: 3,
        max_nodes: 40,
        links_per_node: Some(2),
    })
    .unwrap();
    let mut rng = RngHandle::from_seed(41);
    for _ in 0..5 {
        graph.growth_step(&mut rng).unwrap();
    }

    let bytes = network_to_bytes(&graph).unwrap();
    let mut restored = network_from_bytes(&bytes).unwrap();
    assert_eq!(restored.node_count(), 8);
    assert!(!restored.is_complete());

    restored.generate(&mut rng).unwrap();
    assert_eq!(restored.node_count(), 40);
    assert_eq!(restored.total_degree(), 6 + 37 * 4);
}

fn snapshot_json(config: &str, total_degree: usize, neighbors: &str) -> String {
    format!(
        r#"{{
            "schema_version": {{"major": 1, "minor": 0, "patch": 0}},
            "config": {config},
            "total_degree": {total_degree},
            "neighbors": {neighbors}
        }}"#
    )
}

const PAIR_CONFIG: &str = r#"{"initial_nodes": 2, "max_nodes": 3, "links_per_node": 1}"#;

#[test]
fn asymmetric_snapshot_is_rejected() {
    let json = snapshot_json(PAIR_CONFIG, 1, "[[1], []]");
    let err = network_from_json(&json).unwrap_err();
    assert_eq!(err.info().code, "corrupt-snapshot");
    assert!(err.info().context.contains_key("neighbour"));
}

#[test]
fn drifted_degree_counter_is_rejected() {
    let json = snapshot_json(PAIR_CONFIG, 4, "[[1], [0]]");
    let err = network_from_json(&json).unwrap_err();
    assert_eq!(err.info().code, "corrupt-snapshot");
    assert_eq!(err.info().context.get("stored"), Some(&"4".to_string()));
    assert_eq!(err.info().context.get("actual"), Some(&"2".to_string()));
}

#[test]
fn self_loop_snapshot_is_rejected() {
    let json = snapshot_json(PAIR_CONFIG, 3, "[[0, 1], [0]]");
    let err = network_from_json(&json).unwrap_err();
    assert_eq!(err.info().code, "corrupt-snapshot");
}

#[test]
fn out_of_range_neighbour_is_rejected() {
    let json = snapshot_json(PAIR_CONFIG, 2, "[[5], [0]]");
    let err = network_from_json(&json).unwrap_err();
    assert_eq!(err.info().code, "corrupt-snapshot");
}

#[test]
fn node_count_outside_config_is_rejected() {
    let config = r#"{"initial_nodes": 3, "max_nodes": 3, "links_per_node": 2}"#;
    let json = snapshot_json(config, 2, "[[1], [0]]");
    let err = network_from_json(&json).unwrap_err();
    assert_eq!(err.info().code, "corrupt-snapshot");
    assert_eq!(err.info().context.get("node_count"), Some(&"2".to_string()));
}

#[test]
fn future_schema_major_is_rejected() {
    let json = format!(
        r#"{{
            "schema_version": {{"major": 2, "minor": 0, "patch": 0}},
            "config": {PAIR_CONFIG},
            "total_degree": 2,
            "neighbors": [[1], [0]]
        }}"#
    );
    let err = network_from_json(&json).unwrap_err();
    assert_eq!(err.info().code, "corrupt-snapshot");
    assert_eq!(err.info().context.get("schema_major"), Some(&"2".to_string()));
}

#[test]
fn invalid_config_inside_snapshot_is_rejected() {
    let config = r#"{"initial_nodes": 0, "max_nodes": 3, "links_per_node": 1}"#;
    let json = snapshot_json(config, 0, "[]");
    let err = network_from_json(&json).unwrap_err();
    assert_eq!(err.info().code, "invalid-configuration");
}
