use crate::scene::{ArrowShape, EdgePath, Scene, SceneNode};
use crate::style::SceneStyle;
use std::fmt::Write as _;
use trellis_layout::Point;

const ARROW_MARKER_ID: &str = "trellis-arrow";

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Margin around the scene bounds.
    pub padding: f64,
    /// Painted as a full-size rect behind the scene. `None` leaves the canvas transparent.
    pub background: Option<String>,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            padding: 20.0,
            background: None,
        }
    }
}

/// Serializes the whole scene (not only the visible part of the viewport) to standalone SVG.
///
/// Node groups carry `data-id` so a host can map clicks on the SVG back to node ids. An empty
/// scene produces a minimal 1x1 document.
pub fn render_scene_svg(scene: &Scene, style: &SceneStyle, options: &SvgRenderOptions) -> String {
    let pad = options.padding.max(0.0);
    let (x, y, w, h) = match scene.bounds() {
        Some(b) => (
            b.min_x - pad,
            b.min_y - pad,
            (b.width() + 2.0 * pad).max(1.0),
            (b.height() + 2.0 * pad).max(1.0),
        ),
        None => (0.0, 0.0, 1.0, 1.0),
    };

    let mut out = String::with_capacity(256 + scene.nodes().len() * 256);
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        fmt(w),
        fmt(h),
        fmt(x),
        fmt(y),
        fmt(w),
        fmt(h)
    );

    if scene.edges().iter().any(|e| e.arrow() == ArrowShape::Triangle) {
        let _ = write!(
            &mut out,
            r#"<defs><marker id="{ARROW_MARKER_ID}" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="6" markerHeight="6" orient="auto"><path d="M0,0L10,5L0,10z" fill="{}"/></marker></defs>"#,
            escape_xml(&style.edge_color)
        );
    }

    if let Some(bg) = options.background.as_deref() {
        let _ = write!(
            &mut out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            fmt(x),
            fmt(y),
            fmt(w),
            fmt(h),
            escape_xml(bg)
        );
    }

    out.push_str(r#"<g class="edges">"#);
    for edge in scene.edges() {
        let path = scene.edge_path(edge);
        let _ = write!(
            &mut out,
            r#"<path class="edge{}" d="{}" fill="none" stroke="{}" stroke-width="{}""#,
            if edge.dangling { " dangling" } else { "" },
            path_data(&path),
            escape_xml(&style.edge_color),
            fmt(style.edge_width)
        );
        if edge.dangling {
            out.push_str(r#" stroke-dasharray="4 3""#);
        }
        if edge.arrow() == ArrowShape::Triangle {
            let _ = write!(&mut out, r#" marker-end="url(#{ARROW_MARKER_ID})""#);
        }
        out.push_str("/>");
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in scene.nodes() {
        write_node(&mut out, node, style);
    }
    out.push_str("</g></svg>");
    out
}

fn write_node(out: &mut String, node: &SceneNode, style: &SceneStyle) {
    let mut class = String::from("node");
    if node.selected {
        class.push_str(" selected");
    }
    if node.placeholder {
        class.push_str(" placeholder");
    }
    let (fill, stroke, stroke_width) = if node.selected {
        (
            style.node_fill.as_str(),
            style.selected_border_color.as_str(),
            style.selected_border_width,
        )
    } else if node.placeholder {
        (
            style.placeholder_fill.as_str(),
            style.placeholder_border_color.as_str(),
            style.node_border_width,
        )
    } else {
        (
            style.node_fill.as_str(),
            style.node_border_color.as_str(),
            style.node_border_width,
        )
    };

    let Point { x, y } = node.position;
    let _ = write!(
        out,
        r#"<g class="{class}" data-id="{}"><ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}" stroke="{}" stroke-width="{}""#,
        escape_xml(&node.id),
        fmt(x),
        fmt(y),
        fmt(node.width / 2.0),
        fmt(node.height / 2.0),
        escape_xml(fill),
        escape_xml(stroke),
        fmt(stroke_width)
    );
    if node.placeholder {
        out.push_str(r#" stroke-dasharray="3 2""#);
    }
    out.push_str("/>");

    if !node.label_lines.is_empty() {
        let font_size = style.label.font_size;
        let line_height = if node.label_lines.len() > 1 {
            node.label_height / node.label_lines.len() as f64
        } else {
            node.label_height
        };
        let first_dy = -(node.label_lines.len() as f64 - 1.0) * line_height / 2.0;
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-size="{}" fill="{}""#,
            fmt(x),
            fmt(y),
            fmt(font_size),
            escape_xml(&style.label_color)
        );
        if let Some(family) = style.label.font_family.as_deref() {
            let _ = write!(out, r#" font-family="{}""#, escape_xml(family));
        }
        out.push('>');
        for (i, line) in node.label_lines.iter().enumerate() {
            let dy = if i == 0 { first_dy } else { line_height };
            let _ = write!(
                out,
                r#"<tspan x="{}" dy="{}">{}</tspan>"#,
                fmt(x),
                fmt(dy),
                escape_xml(line)
            );
        }
        out.push_str("</text>");
    }
    out.push_str("</g>");
}

fn path_data(path: &EdgePath) -> String {
    match *path {
        EdgePath::Line { start, end } => format!(
            "M{},{}L{},{}",
            fmt(start.x),
            fmt(start.y),
            fmt(end.x),
            fmt(end.y)
        ),
        EdgePath::Quadratic {
            start,
            control,
            end,
        } => format!(
            "M{},{}Q{},{},{},{}",
            fmt(start.x),
            fmt(start.y),
            fmt(control.x),
            fmt(control.y),
            fmt(end.x),
            fmt(end.y)
        ),
        EdgePath::Cubic { start, c1, c2, end } => format!(
            "M{},{}C{},{},{},{},{},{}",
            fmt(start.x),
            fmt(start.y),
            fmt(c1.x),
            fmt(c1.y),
            fmt(c2.x),
            fmt(c2.y),
            fmt(end.x),
            fmt(end.y)
        ),
    }
}

/// Shortest round-trippable decimal, with float noise and `-0` cleaned up.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = (v * 1000.0).round() / 1000.0;
    if v == -0.0 {
        v = 0.0;
    }
    format!("{v}")
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
    out
}
