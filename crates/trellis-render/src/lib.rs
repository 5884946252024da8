#![forbid(unsafe_code)]

//! Headless scene building for trellis graph models.
//!
//! [`RenderEngine::render`] turns a [`trellis_core::GraphModel`] into a [`Scene`]: every node and
//! edge as a positioned element, plus the viewer state around them (viewport, selection, status
//! line). Scenes serialize to SVG with [`render_scene_svg`].

mod engine;
pub mod scene;
pub mod style;
pub mod svg;
pub mod text;
pub mod viewport;

pub use engine::{RenderEngine, RenderOptions};
pub use scene::{ArrowShape, EdgePath, EdgeShape, Scene, SceneEdge, SceneNode};
pub use style::SceneStyle;
pub use svg::{SvgRenderOptions, render_scene_svg};
pub use text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
pub use trellis_layout::{LayoutKind, Point};
pub use viewport::{Bounds, Viewport, ViewportOptions};
