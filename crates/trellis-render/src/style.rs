use crate::text::TextStyle;
use serde::{Deserialize, Serialize};

/// Visual constants applied to every scene element.
///
/// The defaults draw small grey discs with centered wrapped labels and light grey edges. Selected
/// nodes get a thick blue ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    pub node_width: f64,
    pub node_height: f64,
    pub node_fill: String,
    pub node_border_color: String,
    pub node_border_width: f64,
    pub selected_border_color: String,
    pub selected_border_width: f64,
    pub placeholder_fill: String,
    pub placeholder_border_color: String,
    pub label_color: String,
    pub label: TextStyle,
    /// Labels wrap at whitespace past this width.
    pub text_max_width: f64,
    pub edge_color: String,
    pub edge_width: f64,
    /// Distance between neighbouring parallel edges at their midpoint.
    pub parallel_edge_spacing: f64,
    pub self_loop_size: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            node_width: 24.0,
            node_height: 24.0,
            node_fill: "#888".to_string(),
            node_border_color: "#333".to_string(),
            node_border_width: 1.0,
            selected_border_color: "#0a84ff".to_string(),
            selected_border_width: 3.0,
            placeholder_fill: "#fff".to_string(),
            placeholder_border_color: "#c33".to_string(),
            label_color: "#111".to_string(),
            label: TextStyle::default(),
            text_max_width: 100.0,
            edge_color: "#bbb".to_string(),
            edge_width: 1.0,
            parallel_edge_spacing: 16.0,
            self_loop_size: 14.0,
        }
    }
}
