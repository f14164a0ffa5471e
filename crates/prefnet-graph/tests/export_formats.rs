use prefnet_core::rng::RngHandle;
use prefnet_core::Network;
use prefnet_graph::{
    visual_graph, visual_graph_json, write_edge_list, write_edge_list_to_path, GeneratorConfig,
    GraphBuilder, VisualGraph, DEFAULT_SEPARATOR,
};

fn seed_triangle() -> GraphBuilder {
    GraphBuilder::new(GeneratorConfig {
        initial_nodes: 3,
        max_nodes: 3,
        links_per_node: None,
    })
    .unwrap()
}

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

fn edge_list_lines(graph: &GraphBuilder, separator: u8) -> Vec<String> {
    let mut buffer = Vec::new();
    write_edge_list(graph, &mut buffer, separator).unwrap();
    String::from_utf8(buffer)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn edge_list_doubles_every_undirected_edge() {
    let graph = seed_triangle();
    let lines = edge_list_lines(&graph, DEFAULT_SEPARATOR);

    assert_eq!(lines.len(), graph.total_degree());
    assert_eq!(
        lines,
        vec!["0,1", "0,2", "1,0", "1,2", "2,0", "2,1"]
    );
}

#[test]
fn edge_list_pairs_mirror_each_other() {
    let graph = grown(31);
    let lines = edge_list_lines(&graph, DEFAULT_SEPARATOR);
    assert_eq!(lines.len(), graph.total_degree());

    for line in &lines {
        let (source, target) = line.split_once(',').unwrap();
        let mirrored = format!("{target},{source}");
        assert!(lines.contains(&mirrored), "no mirror for {line}");
    }
}

#[test]
fn edge_list_honours_a_custom_separator() {
    let graph = seed_triangle();
    let lines = edge_list_lines(&graph, b';');
    assert_eq!(lines[0], "0;1");
    assert!(lines.iter().all(|line| line.contains(';')));
}

#[test]
fn edge_list_writes_to_a_file() {
    let graph = seed_triangle();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edges.csv");

    write_edge_list_to_path(&graph, &path, DEFAULT_SEPARATOR).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), graph.total_degree());
}

#[test]
fn edge_list_open_failure_is_reported() {
    let graph = seed_triangle();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("edges.csv");

    let err = write_edge_list_to_path(&graph, &path, DEFAULT_SEPARATOR).unwrap_err();
    assert_eq!(err.info().code, "edge-list-open");
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn visual_graph_carries_degrees_and_doubled_links() {
    let graph = grown(17);
    let visual = visual_graph(&graph).unwrap();

    assert_eq!(visual.nodes.len(), graph.node_count());
    assert_eq!(visual.links.len(), graph.total_degree());
    for (index, node) in visual.nodes.iter().enumerate() {
        assert_eq!(node.id, index as u64);
        assert_eq!(
            node.degree,
            graph
                .degree(prefnet_core::NodeId::from_raw(node.id))
                .unwrap()
        );
    }
}

#[test]
fn visual_json_lists_nodes_before_links() {
    let graph = seed_triangle();
    let json = visual_graph_json(&graph).unwrap();

    let nodes_at = json.find("\"nodes\"").unwrap();
    let links_at = json.find("\"links\"").unwrap();
    assert!(nodes_at < links_at);

    let decoded: VisualGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, visual_graph(&graph).unwrap());
}
