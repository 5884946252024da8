use std::path::PathBuf;
use trellis_core::{Error, build};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("graphml")
        .join(name);
    std::fs::read_to_string(&path).expect("fixture")
}

#[test]
fn services_fixture_resolves_keys_and_directedness() {
    let model = build(&fixture("services.graphml")).expect("build ok");

    assert_eq!(model.nodes().len(), 5);
    assert_eq!(model.edges().len(), 7);
    assert!(model.default_directed());

    let gateway = model.node("gateway").expect("gateway node");
    assert_eq!(gateway.label(), "API Gateway");
    assert_eq!(gateway.attributes["tier"], "edge");

    // No label attribute: the id is the label.
    assert_eq!(model.node("cache").expect("cache").label(), "cache");

    let directed: Vec<bool> = model.edges().iter().map(|e| e.directed).collect();
    assert_eq!(directed, vec![true, true, true, false, false, true, true]);

    assert_eq!(model.edges()[0].attributes["protocol"], "grpc");
    assert_eq!(model.edges()[0].attributes["weight"], "1.0");
    assert_eq!(model.edges()[6].attributes["d9"], "unresolved");
}

#[test]
fn services_fixture_keeps_parallel_edges_self_loops_and_dangling_targets() {
    let model = build(&fixture("services.graphml")).expect("build ok");

    let orders_cache = model
        .edges()
        .iter()
        .filter(|e| e.source_id == "orders" && e.target_id == "cache")
        .count();
    assert_eq!(orders_cache, 2);
    assert!(model.edges()[5].is_self_loop());

    let dangling = model.dangling_edges();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].target_id, "billing");
}

#[test]
fn rebuilding_the_same_text_is_idempotent() {
    let text = fixture("services.graphml");
    let first = build(&text).expect("build ok");
    let second = build(&text).expect("build ok");
    assert_eq!(first.nodes().len(), second.nodes().len());
    assert_eq!(first.edges().len(), second.edges().len());
    for (a, b) in first.nodes().iter().zip(second.nodes()) {
        assert_eq!(a.attributes, b.attributes);
    }
    for (a, b) in first.edges().iter().zip(second.edges()) {
        assert_eq!(a.attributes, b.attributes);
    }
}

#[test]
fn malformed_fixture_fails_with_parser_diagnostic() {
    let err = build(&fixture("malformed.graphml")).unwrap_err();
    match err {
        Error::MalformedDocument { message } => assert!(!message.is_empty()),
    }
}
