use std::path::PathBuf;
use trellis_core::{GraphModel, build};
use trellis_render::{
    ArrowShape, EdgePath, EdgeShape, LayoutKind, RenderEngine, RenderOptions, Scene, SceneStyle,
    SvgRenderOptions, render_scene_svg,
};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("graphml")
        .join(name);
    std::fs::read_to_string(&path).expect("fixture")
}

fn services() -> GraphModel {
    build(&fixture("services.graphml")).expect("build ok")
}

fn graphml(body: &str) -> GraphModel {
    let text = format!(
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="d0" for="node" attr.name="label"/>
  <graph edgedefault="undirected">{body}</graph>
</graphml>"#
    );
    build(&text).expect("build ok")
}

fn render(model: &GraphModel, layout: &str) -> Scene {
    RenderEngine::default().render(None, model, layout)
}

#[test]
fn dangling_endpoints_become_placeholders() {
    let scene = render(&services(), "grid");

    assert_eq!(scene.nodes().len(), 6);
    assert_eq!(scene.node_count(), 5);
    assert_eq!(scene.placeholder_count(), 1);
    assert_eq!(scene.edges().len(), 7);

    let billing = scene.node_index("billing").expect("placeholder");
    assert!(scene.nodes()[billing].placeholder);

    let dangling: Vec<bool> = scene.edges().iter().map(|e| e.dangling).collect();
    assert_eq!(dangling, vec![false, false, false, false, false, false, true]);
    assert_eq!(scene.edges()[6].target, billing);
    assert_eq!(scene.edges()[6].target_id, "billing");

    assert_eq!(
        scene.summary(),
        "nodes: 5  edges: 7  default: directed  missing: 1"
    );
}

#[test]
fn arrows_follow_the_directed_flag() {
    let scene = render(&services(), "grid");
    let arrows: Vec<ArrowShape> = scene.edges().iter().map(|e| e.arrow()).collect();
    use ArrowShape::{None as N, Triangle as T};
    assert_eq!(arrows, vec![T, T, T, N, N, T, T]);
}

#[test]
fn parallel_edges_curve_apart_and_self_loops_loop() {
    let scene = render(&services(), "grid");
    let edges = scene.edges();

    assert_eq!(edges[0].shape, EdgeShape::Straight);
    match (edges[3].shape, edges[4].shape) {
        (EdgeShape::Curved { offset: a }, EdgeShape::Curved { offset: b }) => {
            assert_eq!(a, -b);
            assert!(a != 0.0);
        }
        other => panic!("expected curved parallel edges, got {other:?}"),
    }
    assert!(matches!(edges[5].shape, EdgeShape::Loop { .. }));
}

#[test]
fn opposite_edges_between_a_pair_do_not_overlap() {
    let model = graphml(
        r#"<node id="a"/><node id="b"/>
           <edge source="a" target="b"/><edge source="b" target="a"/>"#,
    );
    let scene = render(&model, "grid");
    let p0 = scene.edge_path(&scene.edges()[0]);
    let p1 = scene.edge_path(&scene.edges()[1]);
    let (EdgePath::Quadratic { control: c0, .. }, EdgePath::Quadratic { control: c1, .. }) =
        (p0, p1)
    else {
        panic!("expected quadratic paths, got {p0:?} and {p1:?}");
    };
    assert!((c0.x - c1.x).abs() > 1.0 || (c0.y - c1.y).abs() > 1.0);
}

#[test]
fn every_named_layout_runs_without_fallback() {
    let model = services();
    for kind in LayoutKind::ALL {
        let scene = render(&model, kind.as_str());
        assert_eq!(scene.applied_layout(), kind, "{kind}");
        assert_eq!(scene.layout_name(), kind.as_str());
        assert!(scene.nodes().iter().all(|n| n.position.is_finite()));
    }
}

#[test]
fn unknown_layout_falls_back_to_grid_and_keeps_the_name() {
    let scene = render(&services(), "spiral");
    assert_eq!(scene.applied_layout(), LayoutKind::Grid);
    assert_eq!(scene.layout_name(), "spiral");
    assert_eq!(scene.nodes().len(), 6);

    let first = scene.nodes()[0].position;
    assert!(scene.nodes().iter().skip(1).any(|n| n.position != first));
}

#[test]
fn diverging_force_layout_falls_back_to_grid() {
    let mut options = RenderOptions::default();
    options.force.gravity = f64::NAN;
    let scene = RenderEngine::new(options).render(None, &services(), "force-directed");

    assert_eq!(scene.applied_layout(), LayoutKind::Grid);
    assert_eq!(scene.layout_name(), "force-directed");
    assert_eq!(scene.status(), None);
    assert_eq!(scene.nodes().len(), 6);
    assert!(scene.nodes().iter().all(|n| n.position.is_finite()));

    let grid = render(&services(), "grid");
    let positions: Vec<_> = scene.nodes().iter().map(|n| n.position).collect();
    let expected: Vec<_> = grid.nodes().iter().map(|n| n.position).collect();
    assert_eq!(positions, expected);
}

#[test]
fn layout_aliases_are_accepted() {
    let model = services();
    assert_eq!(render(&model, "cose").applied_layout(), LayoutKind::ForceDirected);
    assert_eq!(render(&model, "breadthfirst").applied_layout(), LayoutKind::Layered);
    assert_eq!(render(&model, "Grid").applied_layout(), LayoutKind::Grid);
}

#[test]
fn duplicate_ids_render_both_nodes_and_attach_edges_to_the_first() {
    let model = graphml(
        r#"<node id="a"><data key="d0">first</data></node>
           <node id="a"><data key="d0">second</data></node>
           <node id="b"/>
           <edge source="a" target="b"/>"#,
    );
    let scene = render(&model, "force-directed");

    assert_eq!(scene.nodes().len(), 3);
    assert_eq!(scene.nodes()[0].label, "first");
    assert_eq!(scene.nodes()[1].label, "second");
    assert_eq!(scene.edges()[0].source, 0);
    assert_eq!(scene.applied_layout(), LayoutKind::ForceDirected);
}

#[test]
fn labels_fall_back_to_ids_and_wrap() {
    let model = graphml(
        r#"<node id="plain"/>
           <node id="long"><data key="d0">Orders service primary database</data></node>"#,
    );
    let scene = render(&model, "grid");
    assert_eq!(scene.nodes()[0].label_lines, vec!["plain"]);
    assert_eq!(
        scene.nodes()[1].label_lines,
        vec!["Orders service", "primary database"]
    );
    assert!(scene.nodes()[1].label_height > scene.nodes()[0].label_height);
}

#[test]
fn fit_brings_every_node_into_view() {
    let scene = render(&services(), "force-directed");
    let visible = scene.viewport().visible_bounds();
    for n in scene.nodes() {
        assert!(visible.contains(n.position), "{} is off screen", n.id);
    }
}

#[test]
fn node_at_hits_nodes_by_screen_position() {
    let scene = render(&services(), "grid");
    let auth = &scene.nodes()[scene.node_index("auth").expect("auth")];
    let p = scene.viewport().to_screen(auth.position);

    let hit = scene.node_at(p.x, p.y).expect("hit");
    assert_eq!(hit.id, "auth");
    assert!(scene.node_at(0.0, 0.0).is_none());
}

#[test]
fn select_matching_is_a_literal_case_sensitive_substring() {
    let mut scene = render(&services(), "grid");

    assert_eq!(scene.select_matching("order"), 2);
    let selected: Vec<&str> = scene.selected().map(|n| n.id.as_str()).collect();
    assert_eq!(selected, vec!["orders", "orders-db"]);

    let vp = scene.viewport();
    let orders = scene.nodes()[scene.node_index("orders").expect("orders")].position;
    let centered = vp.to_screen(orders);
    assert!((centered.x - vp.width() / 2.0).abs() < 1e-6);
    assert!((centered.y - vp.height() / 2.0).abs() < 1e-6);

    assert_eq!(scene.select_matching("Order"), 0);
    assert_eq!(scene.selected().count(), 0);

    assert_eq!(scene.select_matching("o.*"), 0);
}

#[test]
fn select_matching_never_selects_placeholders() {
    let mut scene = render(&services(), "grid");
    assert_eq!(scene.select_matching("billing"), 0);
}

#[test]
fn empty_query_clears_the_selection() {
    let mut scene = render(&services(), "grid");
    scene.select_matching("auth");
    assert_eq!(scene.select_matching(""), 0);
    assert_eq!(scene.selected().count(), 0);

    let mut empty = RenderEngine::default().empty_scene("grid");
    assert_eq!(empty.select_matching(""), 0);
}

#[test]
fn rerender_keeps_selection_surface_size_and_replaces_elements() {
    let engine = RenderEngine::default();
    let mut first = engine.render(None, &services(), "grid");
    first.resize(400.0, 300.0);
    first.select_matching("auth");

    let smaller = graphml(r#"<node id="auth"/><node id="other"/>"#);
    let second = engine.render(Some(&first), &smaller, "grid");

    assert_eq!(second.nodes().len(), 2);
    assert_eq!(second.viewport().width(), 400.0);
    assert_eq!(second.viewport().height(), 300.0);
    let selected: Vec<&str> = second.selected().map(|n| n.id.as_str()).collect();
    assert_eq!(selected, vec!["auth"]);
}

#[test]
fn render_failure_clears_the_scene_and_sets_the_status() {
    let engine = RenderEngine::default();
    let mut first = engine.render(None, &services(), "concentric");
    first.resize(320.0, 200.0);

    let failed = engine.render_failure(Some(&first), first.layout_name(), "Parse error: boom");
    assert!(failed.is_empty());
    assert_eq!(failed.status(), Some("Parse error: boom"));
    assert_eq!(failed.layout_name(), "concentric");
    assert_eq!(failed.viewport().width(), 320.0);
    assert!(failed.bounds().is_none());
}

#[test]
fn empty_model_renders_an_empty_scene() {
    let scene = render(&graphml(""), "force-directed");
    assert!(scene.is_empty());
    assert_eq!(scene.summary(), "nodes: 0  edges: 0  default: undirected");
    assert_eq!(scene.status(), None);

    let svg = render_scene_svg(&scene, &SceneStyle::default(), &SvgRenderOptions::default());
    roxmltree::Document::parse(&svg).expect("valid svg");
}

#[test]
fn svg_contains_every_element_with_ids_and_markers() {
    let scene = render(&services(), "layered");
    let svg = render_scene_svg(&scene, &SceneStyle::default(), &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");

    let ids: Vec<&str> = doc
        .descendants()
        .filter_map(|n| n.attribute("data-id"))
        .collect();
    assert_eq!(
        ids,
        vec!["gateway", "auth", "orders", "orders-db", "cache", "billing"]
    );

    let edge_paths: Vec<roxmltree::Node> = doc
        .descendants()
        .filter(|n| n.attribute("class").is_some_and(|c| c.starts_with("edge")))
        .filter(|n| n.has_tag_name("path"))
        .collect();
    assert_eq!(edge_paths.len(), 7);
    assert_eq!(
        edge_paths
            .iter()
            .filter(|n| n.attribute("marker-end").is_some())
            .count(),
        5
    );
    assert!(doc.descendants().any(|n| n.has_tag_name("marker")));
    assert!(
        doc.descendants()
            .any(|n| n.attribute("class") == Some("node placeholder"))
    );
}

#[test]
fn svg_escapes_labels_and_ids() {
    let model = graphml(r#"<node id="a&amp;b"><data key="d0">x &lt; y</data></node>"#);
    let scene = render(&model, "grid");
    let svg = render_scene_svg(&scene, &SceneStyle::default(), &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");

    let group = doc
        .descendants()
        .find(|n| n.attribute("data-id").is_some())
        .expect("node group");
    assert_eq!(group.attribute("data-id"), Some("a&b"));
    let text: String = group
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(text, "x < y");
}

#[test]
fn selected_nodes_get_the_selection_border() {
    let mut scene = render(&services(), "grid");
    scene.select_matching("gateway");
    let style = SceneStyle::default();
    let svg = render_scene_svg(&scene, &style, &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).expect("valid svg");

    let ellipse = doc
        .descendants()
        .find(|n| n.attribute("data-id") == Some("gateway"))
        .and_then(|g| g.children().find(|c| c.has_tag_name("ellipse")))
        .expect("gateway ellipse");
    assert_eq!(ellipse.attribute("stroke"), Some(style.selected_border_color.as_str()));
    assert_eq!(ellipse.attribute("stroke-width"), Some("3"));
}
