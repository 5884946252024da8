use crate::scene::{EdgeShape, Scene, SceneEdge, SceneNode, assign_shapes};
use crate::style::SceneStyle;
use crate::text::{DeterministicTextMeasurer, TextMeasurer, wrap_label};
use crate::viewport::{Viewport, ViewportOptions};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use trellis_core::{Attributes, GraphModel};
use trellis_layout::{
    Algorithm, ConcentricOptions, ForceOptions, GridOptions, LayeredOptions, LayoutKind,
    LayoutResult,
};

#[derive(Clone)]
pub struct RenderOptions {
    pub style: SceneStyle,
    pub viewport: ViewportOptions,
    pub force: ForceOptions,
    pub grid: GridOptions,
    pub concentric: ConcentricOptions,
    pub layered: LayeredOptions,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: SceneStyle::default(),
            viewport: ViewportOptions::default(),
            force: ForceOptions::default(),
            grid: GridOptions::default(),
            concentric: ConcentricOptions::default(),
            layered: LayeredOptions::default(),
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

impl std::fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("style", &self.style)
            .field("viewport", &self.viewport)
            .field("force", &self.force)
            .field("grid", &self.grid)
            .field("concentric", &self.concentric)
            .field("layered", &self.layered)
            .finish_non_exhaustive()
    }
}

/// Turns graph models into laid-out scenes.
///
/// The engine itself is stateless; viewer state lives in the [`Scene`] handed back to it on the
/// next render.
#[derive(Debug, Clone, Default)]
pub struct RenderEngine {
    options: RenderOptions,
}

impl RenderEngine {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// A scene with no elements, for hosts that have nothing to show yet.
    pub fn empty_scene(&self, layout_name: &str) -> Scene {
        Scene::new(
            Viewport::new(&self.options.viewport),
            layout_name.to_string(),
        )
    }

    /// Builds a scene for `model`, replacing every element of `previous`.
    ///
    /// The surface size of `previous` and the selection (by node id) carry over. A layout that
    /// cannot run falls back to grid; the result is always fit to the surface.
    pub fn render(&self, previous: Option<&Scene>, model: &GraphModel, layout_name: &str) -> Scene {
        let mut scene = self.empty_scene(layout_name);
        let selected: FxHashSet<&str> = previous
            .map(|p| p.selected().map(|n| n.id.as_str()).collect())
            .unwrap_or_default();
        if let Some(prev) = previous {
            let vp = prev.viewport();
            scene.resize(vp.width(), vp.height());
        }

        self.populate(&mut scene, model, &selected);
        self.apply_layout(&mut scene);
        scene.fit();

        tracing::debug!(
            nodes = scene.node_count(),
            placeholders = scene.placeholder_count(),
            edges = scene.edges().len(),
            layout = %scene.applied_layout(),
            "scene rendered"
        );
        scene
    }

    /// An unusable model: nothing is drawn, and `message` becomes the status.
    pub fn render_failure(
        &self,
        previous: Option<&Scene>,
        layout_name: &str,
        message: impl Into<String>,
    ) -> Scene {
        let mut scene = self.empty_scene(layout_name);
        if let Some(prev) = previous {
            let vp = prev.viewport();
            scene.resize(vp.width(), vp.height());
        }
        scene.set_status(Some(message.into()));
        scene
    }

    fn populate(&self, scene: &mut Scene, model: &GraphModel, selected: &FxHashSet<&str>) {
        let style = &self.options.style;
        scene.default_directed = model.default_directed();

        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        for record in model.nodes() {
            let i = scene.nodes.len();
            index.entry(record.id.clone()).or_insert(i);
            let mut node = self.node(&record.id, record.label(), record.attributes.clone(), false);
            node.selected = selected.contains(record.id.as_str());
            scene.nodes.push(node);
        }

        for record in model.edges() {
            let mut dangling = false;
            let mut endpoint = |id: &str, scene: &mut Scene| -> usize {
                if let Some(&i) = index.get(id) {
                    if scene.nodes[i].placeholder {
                        dangling = true;
                    }
                    return i;
                }
                dangling = true;
                let i = scene.nodes.len();
                index.insert(id.to_string(), i);
                scene
                    .nodes
                    .push(self.node(id, id, Attributes::default(), true));
                i
            };
            let source = endpoint(&record.source_id, &mut *scene);
            let target = endpoint(&record.target_id, &mut *scene);
            scene.edges.push(SceneEdge {
                source,
                target,
                source_id: record.source_id.clone(),
                target_id: record.target_id.clone(),
                directed: record.directed,
                dangling,
                attributes: record.attributes.clone(),
                shape: EdgeShape::Straight,
            });
        }

        assign_shapes(
            &mut scene.edges,
            style.parallel_edge_spacing,
            style.self_loop_size,
        );
    }

    fn node(&self, id: &str, label: &str, attributes: Attributes, placeholder: bool) -> SceneNode {
        let style = &self.options.style;
        let measurer = self.options.text_measurer.as_ref();
        let label_lines = wrap_label(label, style.text_max_width, &style.label, measurer);
        let metrics = measurer.measure(&label_lines.join("\n"), &style.label);
        SceneNode {
            id: id.to_string(),
            label: label.to_string(),
            label_lines,
            label_width: metrics.width,
            label_height: metrics.height,
            attributes,
            position: Default::default(),
            width: style.node_width,
            height: style.node_height,
            selected: false,
            placeholder,
        }
    }

    fn algorithm(&self, kind: LayoutKind, directed: bool) -> Algorithm {
        let o = &self.options;
        match kind {
            LayoutKind::ForceDirected => Algorithm::ForceDirected(o.force.clone()),
            LayoutKind::Grid => Algorithm::Grid(o.grid.clone()),
            LayoutKind::Concentric => Algorithm::Concentric(o.concentric.clone()),
            LayoutKind::Layered => Algorithm::Layered(LayeredOptions {
                directed: o.layered.directed || directed,
                ..o.layered.clone()
            }),
        }
    }

    fn apply_layout(&self, scene: &mut Scene) {
        let graph = scene.layout_graph();
        let attempt = scene
            .layout_name
            .parse::<LayoutKind>()
            .and_then(|kind| {
                let algorithm = self.algorithm(kind, scene.default_directed);
                trellis_layout::layout(&graph, &algorithm).map(|r| (kind, r))
            })
            .and_then(|(kind, r)| check_positions(&graph, kind, r));

        let (kind, result) = match attempt {
            Ok(ok) => ok,
            Err(err) => {
                tracing::warn!(
                    layout = %scene.layout_name,
                    error = %err,
                    "layout failed; falling back to grid"
                );
                (
                    LayoutKind::Grid,
                    trellis_layout::grid(&graph, &self.options.grid),
                )
            }
        };
        scene.set_positions(&result.positions);
        scene.applied_layout = kind;
    }
}

fn check_positions(
    graph: &trellis_layout::Graph,
    kind: LayoutKind,
    result: LayoutResult,
) -> trellis_layout::Result<(LayoutKind, LayoutResult)> {
    if result.positions.len() != graph.nodes.len()
        || !result.positions.iter().all(|p| p.is_finite())
    {
        return Err(trellis_layout::Error::Diverged { iterations: 0 });
    }
    Ok((kind, result))
}
