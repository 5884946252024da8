#![forbid(unsafe_code)]

//! `trellis` is a headless GraphML viewer.
//!
//! A [`Session`] parses a document, lays it out and keeps the resulting scene alive across
//! document updates, layout changes, searches and exports. Hosts drive it with [`ViewerEvent`]s
//! and receive [`HostMessage`]s back; [`reveal::locate_node_id`] maps an activated node to a
//! position in the document text.
//!
//! # Features
//!
//! - `raster` (default): PNG/JPG export via pure-Rust SVG rasterization

pub mod config;
mod controller;
pub mod error;
pub mod event;
#[cfg(feature = "raster")]
pub mod raster;
pub mod reveal;
mod session;

pub use config::{RasterConfig, ViewerConfig};
pub use controller::ExportedImage;
pub use error::{Error, Result};
pub use event::{HostMessage, ViewerEvent};
pub use session::{ExportOptions, Session};

pub use trellis_core::{
    AttributeKeyTable, Attributes, EdgeRecord, GraphBuilder, GraphModel, NodeRecord,
    ParseOptions, build,
};
pub use trellis_layout::LayoutKind;

pub mod render {
    pub use trellis_render::{
        ArrowShape, Bounds, DeterministicTextMeasurer, EdgePath, EdgeShape, RenderEngine,
        RenderOptions, Scene, SceneEdge, SceneNode, SceneStyle, SvgRenderOptions, TextMeasurer,
        TextStyle, Viewport, ViewportOptions, render_scene_svg,
    };
}
