use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Resolved attribute name -> text value, in first-insertion order.
///
/// GraphML is schema-free, so no typing is attempted on the values.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRecord {
    pub id: String,
    pub attributes: Attributes,
}

impl NodeRecord {
    /// Display label: the `label` attribute when present and non-empty, otherwise the id.
    pub fn label(&self) -> &str {
        self.attributes
            .get("label")
            .map(String::as_str)
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    /// Opaque endpoint id; not guaranteed to name a node of the same graph.
    pub source_id: String,
    pub target_id: String,
    pub directed: bool,
    pub attributes: Attributes,
}

impl EdgeRecord {
    pub fn is_self_loop(&self) -> bool {
        self.source_id == self.target_id
    }
}

/// One parse worth of graph: nodes and edges in document order plus the document-level
/// directedness default.
///
/// A model is never mutated after [`crate::build`] returns it; document updates produce a new
/// model that replaces the old one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphModel {
    nodes: Vec<NodeRecord>,
    edges: Vec<EdgeRecord>,
    default_directed: bool,
}

impl GraphModel {
    pub(crate) fn new(
        nodes: Vec<NodeRecord>,
        edges: Vec<EdgeRecord>,
        default_directed: bool,
    ) -> Self {
        Self {
            nodes,
            edges,
            default_directed,
        }
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn default_directed(&self) -> bool {
        self.default_directed
    }

    /// First node carrying `id`. Duplicate ids are legal; later duplicates are only reachable
    /// through [`GraphModel::nodes`].
    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Edges whose source or target does not name any node.
    pub fn dangling_edges(&self) -> Vec<&EdgeRecord> {
        let ids: FxHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| {
                !ids.contains(e.source_id.as_str()) || !ids.contains(e.target_id.as_str())
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
