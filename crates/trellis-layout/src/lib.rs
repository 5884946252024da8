#![forbid(unsafe_code)]

//! Headless layout algorithms for plain node/edge graphs.
//!
//! `trellis-layout` is used by `trellis-render` as a runtime-agnostic layout engine. Every
//! algorithm is deterministic: the same graph and options always produce the same positions.

pub mod algo;
pub mod error;
pub mod graph;

pub use algo::{
    Algorithm, ConcentricOptions, ForceOptions, GridOptions, LayeredOptions, LayoutKind,
};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, LayoutResult, Node, Point};

/// Headless layout entry point.
pub fn layout(graph: &Graph, algorithm: &Algorithm) -> Result<LayoutResult> {
    match algorithm {
        Algorithm::ForceDirected(opts) => algo::force::layout(graph, opts),
        Algorithm::Grid(opts) => Ok(algo::grid::layout(graph, opts)),
        Algorithm::Concentric(opts) => algo::concentric::layout(graph, opts),
        Algorithm::Layered(opts) => algo::layered::layout(graph, opts),
    }
}

/// Grid layout never fails, which makes it the fallback for every other algorithm.
pub fn grid(graph: &Graph, options: &GridOptions) -> LayoutResult {
    algo::grid::layout(graph, options)
}
