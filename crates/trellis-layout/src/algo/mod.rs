pub mod concentric;
pub mod force;
pub mod grid;
pub mod layered;

use crate::error::Error;

/// The closed set of layouts a viewer can ask for by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutKind {
    #[default]
    ForceDirected,
    Grid,
    Concentric,
    Layered,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 4] = [
        LayoutKind::ForceDirected,
        LayoutKind::Grid,
        LayoutKind::Concentric,
        LayoutKind::Layered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::ForceDirected => "force-directed",
            LayoutKind::Grid => "grid",
            LayoutKind::Concentric => "concentric",
            LayoutKind::Layered => "layered",
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LayoutKind {
    type Err = Error;

    /// Accepts the canonical names plus the Cytoscape names (`cose`, `breadthfirst`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "force-directed" | "force" | "cose" => Ok(Self::ForceDirected),
            "grid" => Ok(Self::Grid),
            "concentric" => Ok(Self::Concentric),
            "layered" | "breadthfirst" => Ok(Self::Layered),
            _ => Err(Error::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Spring embedder (Cytoscape `cose` equivalent).
    ForceDirected(ForceOptions),
    Grid(GridOptions),
    Concentric(ConcentricOptions),
    /// Breadth-first levels (Cytoscape `breadthfirst` equivalent).
    Layered(LayeredOptions),
}

impl Algorithm {
    pub fn kind(&self) -> LayoutKind {
        match self {
            Algorithm::ForceDirected(_) => LayoutKind::ForceDirected,
            Algorithm::Grid(_) => LayoutKind::Grid,
            Algorithm::Concentric(_) => LayoutKind::Concentric,
            Algorithm::Layered(_) => LayoutKind::Layered,
        }
    }
}

impl From<LayoutKind> for Algorithm {
    fn from(kind: LayoutKind) -> Self {
        match kind {
            LayoutKind::ForceDirected => Algorithm::ForceDirected(ForceOptions::default()),
            LayoutKind::Grid => Algorithm::Grid(GridOptions::default()),
            LayoutKind::Concentric => Algorithm::Concentric(ConcentricOptions::default()),
            LayoutKind::Layered => Algorithm::Layered(LayeredOptions::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForceOptions {
    /// Seed for the initial jitter that breaks symmetric starts.
    pub random_seed: u64,
    pub ideal_edge_length: f64,
    pub max_iterations: usize,
    /// Initial per-iteration step limit; multiplied by `cooling` after every iteration.
    pub initial_temperature: f64,
    pub cooling: f64,
    pub gravity: f64,
    /// Stop once no node moves further than this in one iteration.
    pub convergence_threshold: f64,
}

impl Default for ForceOptions {
    fn default() -> Self {
        Self {
            random_seed: 0,
            ideal_edge_length: 80.0,
            max_iterations: 500,
            initial_temperature: 100.0,
            cooling: 0.97,
            gravity: 0.05,
            convergence_threshold: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Fixed column count; `None` picks `ceil(sqrt(n))`.
    pub columns: Option<usize>,
    pub spacing: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            columns: None,
            spacing: 40.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConcentricOptions {
    pub spacing: f64,
    /// Angle of the first node on each ring, in radians (Cytoscape default: 3/2 PI).
    pub start_angle: f64,
    pub clockwise: bool,
}

impl Default for ConcentricOptions {
    fn default() -> Self {
        Self {
            spacing: 10.0,
            start_angle: 1.5 * std::f64::consts::PI,
            clockwise: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayeredOptions {
    /// Follow edges source -> target only, rooting levels at nodes without incoming edges.
    pub directed: bool,
    pub rank_spacing: f64,
    pub node_spacing: f64,
}

impl Default for LayeredOptions {
    fn default() -> Self {
        Self {
            directed: false,
            rank_spacing: 60.0,
            node_spacing: 30.0,
        }
    }
}
