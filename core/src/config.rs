use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Whether edges are directional. Fixed for the lifetime of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Directed,
    #[default]
    Undirected,
}

impl Orientation {
    pub fn is_directed(self) -> bool {
        matches!(self, Orientation::Directed)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Directed => f.write_str("directed"),
            Orientation::Undirected => f.write_str("undirected"),
        }
    }
}

/// How cycle detection treats undirected graphs.
///
/// Directed graphs always use the white/gray/black walk; this setting only
/// changes how a mirrored edge back to the discovering node is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleMode {
    /// Skip the edge back to the node a vertex was discovered from, so only
    /// genuine cycles (three or more distinct nodes) are reported.
    #[default]
    ParentAware,
    /// Run the directed walk unmodified. Every undirected edge then reads as
    /// a two-node cycle.
    Strict,
}

/// Construction-time settings for a [`Graph`](crate::Graph).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub orientation: Orientation,
    pub cycle_mode: CycleMode,
    /// Pre-allocation hint for the adjacency map.
    pub node_capacity: usize,
}

impl GraphConfig {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cycle_mode(mut self, mode: CycleMode) -> Self {
        self.cycle_mode = mode;
        self
    }

    #[must_use]
    pub fn with_node_capacity(mut self, capacity: usize) -> Self {
        self.node_capacity = capacity;
        self
    }

    /// Parse a configuration from TOML. Missing keys fall back to defaults.
    ///
    /// ```toml
    /// orientation = "directed"
    /// cycle_mode = "strict"
    /// node_capacity = 1024
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GraphError::Config(e.to_string()))
    }
}
