use trellis_layout::{
    Algorithm, ConcentricOptions, Edge, Error, ForceOptions, Graph, GridOptions, LayeredOptions,
    LayoutKind, Node, layout,
};

fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> Graph {
    Graph {
        nodes: nodes
            .iter()
            .map(|id| Node {
                id: id.to_string(),
                width: 24.0,
                height: 24.0,
            })
            .collect(),
        edges: edges
            .iter()
            .enumerate()
            .map(|(i, (s, t))| Edge {
                id: format!("e{i}"),
                source: s.to_string(),
                target: t.to_string(),
            })
            .collect(),
    }
}

fn distance(a: trellis_layout::Point, b: trellis_layout::Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

#[test]
fn layout_kind_parses_canonical_and_cytoscape_names() {
    assert_eq!("force-directed".parse::<LayoutKind>(), Ok(LayoutKind::ForceDirected));
    assert_eq!("cose".parse::<LayoutKind>(), Ok(LayoutKind::ForceDirected));
    assert_eq!(" Grid ".parse::<LayoutKind>(), Ok(LayoutKind::Grid));
    assert_eq!("concentric".parse::<LayoutKind>(), Ok(LayoutKind::Concentric));
    assert_eq!("breadthfirst".parse::<LayoutKind>(), Ok(LayoutKind::Layered));
    assert_eq!(
        "spiral".parse::<LayoutKind>(),
        Err(Error::UnknownAlgorithm {
            name: "spiral".to_string()
        })
    );
    for kind in LayoutKind::ALL {
        assert_eq!(kind.as_str().parse::<LayoutKind>(), Ok(kind));
        assert_eq!(Algorithm::from(kind).kind(), kind);
    }
}

#[test]
fn grid_places_nodes_row_major_and_ignores_edge_validity() {
    let g = graph(&["a", "a", "b", "c", "d"], &[("a", "ghost")]);
    let out = layout(&g, &Algorithm::Grid(GridOptions::default())).unwrap();
    assert_eq!(out.positions.len(), 5);
    // 5 nodes -> 3 columns.
    assert_eq!(out.positions[0].y, out.positions[2].y);
    assert!(out.positions[3].y > out.positions[0].y);
    assert_eq!(out.positions[3].x, out.positions[0].x);
    assert!(out.positions[1].x > out.positions[0].x);
}

#[test]
fn grid_respects_fixed_columns() {
    let g = graph(&["a", "b", "c"], &[]);
    let out = trellis_layout::grid(
        &g,
        &GridOptions {
            columns: Some(1),
            spacing: 0.0,
        },
    );
    let xs: Vec<f64> = out.positions.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![12.0, 12.0, 12.0]);
    let ys: Vec<f64> = out.positions.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![12.0, 36.0, 60.0]);
}

#[test]
fn non_grid_algorithms_reject_missing_endpoints_and_duplicates() {
    let dangling = graph(&["a"], &[("a", "ghost")]);
    let dup = graph(&["a", "a"], &[]);
    for kind in [
        LayoutKind::ForceDirected,
        LayoutKind::Concentric,
        LayoutKind::Layered,
    ] {
        let algo = Algorithm::from(kind);
        assert_eq!(
            layout(&dangling, &algo).unwrap_err(),
            Error::MissingEndpoint {
                edge_id: "e0".to_string()
            }
        );
        assert_eq!(
            layout(&dup, &algo).unwrap_err(),
            Error::DuplicateNode {
                node_id: "a".to_string()
            }
        );
    }
}

#[test]
fn empty_graph_lays_out_to_nothing() {
    let g = Graph::default();
    for kind in LayoutKind::ALL {
        let out = layout(&g, &Algorithm::from(kind)).unwrap();
        assert!(out.positions.is_empty());
    }
}

#[test]
fn force_layout_is_deterministic_and_finite() {
    let g = graph(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "d")],
    );
    let algo = Algorithm::ForceDirected(ForceOptions::default());
    let first = layout(&g, &algo).unwrap();
    let second = layout(&g, &algo).unwrap();
    assert_eq!(first.positions, second.positions);
    assert!(first.positions.iter().all(|p| p.is_finite()));

    for i in 0..4 {
        for j in (i + 1)..4 {
            assert!(distance(first.positions[i], first.positions[j]) > 1.0);
        }
    }
}

#[test]
fn force_layout_keeps_connected_nodes_closer_than_isolated_ones() {
    let g = graph(&["a", "b", "c", "d", "e"], &[("a", "b"), ("b", "c"), ("c", "a")]);
    let out = layout(&g, &Algorithm::ForceDirected(ForceOptions::default())).unwrap();
    let ab = distance(out.positions[0], out.positions[1]);
    let de = distance(out.positions[3], out.positions[4]);
    assert!(ab < de, "ab={ab} de={de}");
}

#[test]
fn concentric_puts_highest_degree_node_in_the_center() {
    let g = graph(
        &["leaf1", "hub", "leaf2", "leaf3", "leaf4"],
        &[("hub", "leaf1"), ("hub", "leaf2"), ("hub", "leaf3"), ("hub", "leaf4")],
    );
    let out = layout(&g, &Algorithm::Concentric(ConcentricOptions::default())).unwrap();
    let hub = out.positions[1];
    assert!(hub.x.abs() < 1e-9 && hub.y.abs() < 1e-9);

    let radii: Vec<f64> = [0usize, 2, 3, 4]
        .iter()
        .map(|&i| distance(out.positions[i], hub))
        .collect();
    for r in &radii {
        assert!((r - radii[0]).abs() < 1e-9);
        assert!(*r >= 24.0);
    }
}

#[test]
fn concentric_edgeless_graph_uses_one_ring() {
    let g = graph(&["a", "b", "c"], &[]);
    let out = layout(&g, &Algorithm::Concentric(ConcentricOptions::default())).unwrap();
    let origin = trellis_layout::Point::default();
    let r0 = distance(out.positions[0], origin);
    for p in &out.positions {
        assert!((distance(*p, origin) - r0).abs() < 1e-9);
    }
}

#[test]
fn layered_directed_rows_follow_edge_direction() {
    let g = graph(&["c", "b", "a"], &[("a", "b"), ("b", "c")]);
    let out = layout(
        &g,
        &Algorithm::Layered(LayeredOptions {
            directed: true,
            ..Default::default()
        }),
    )
    .unwrap();
    let (c, b, a) = (out.positions[0], out.positions[1], out.positions[2]);
    assert!(a.y < b.y && b.y < c.y);
}

#[test]
fn layered_undirected_roots_each_component_at_its_hub() {
    let g = graph(
        &["x", "hub", "y", "lonely"],
        &[("x", "hub"), ("hub", "y")],
    );
    let out = layout(&g, &Algorithm::Layered(LayeredOptions::default())).unwrap();
    let (x, hub, y, lonely) = (
        out.positions[0],
        out.positions[1],
        out.positions[2],
        out.positions[3],
    );
    assert_eq!(hub.y, lonely.y);
    assert_eq!(x.y, y.y);
    assert!(x.y > hub.y);
    assert!(x.x != y.x);
}

#[test]
fn layered_directed_cycle_without_roots_still_places_every_node() {
    let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
    let out = layout(
        &g,
        &Algorithm::Layered(LayeredOptions {
            directed: true,
            ..Default::default()
        }),
    )
    .unwrap();
    let ys: Vec<f64> = out.positions.iter().map(|p| p.y).collect();
    assert!(ys[0] < ys[1] && ys[1] < ys[2]);
}
