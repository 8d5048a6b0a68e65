//! Graph builder: renderer-agnostic node/edge views of a filtered triple set.
//!
//! The builder emits plain serializable data structures. Force-directed
//! layout, physics tuning, and interaction are the rendering library's
//! concern; a view is a snapshot, and a newer snapshot simply replaces an
//! in-flight layout (last write wins).

pub mod builder;
pub mod expand;
pub mod palette;

use serde::{Deserialize, Serialize};

/// Structural identity of an aggregated edge.
///
/// A composite key type rather than a delimited string, so entity names
/// containing any particular character cannot collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    pub subject: String,
    pub object: String,
    pub relation: String,
}

/// One graph node: a distinct entity name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub name: String,
    /// First-observed entity type; conflicting observations are surfaced by
    /// the multi-typed-entities analytic, not here.
    pub entity_type: String,
    /// Number of extractions touching this name, as subject or object.
    pub degree: usize,
    /// Display size: clamped square-root scaling of degree.
    pub size: f64,
    /// Hex color assigned deterministically from the type palette.
    pub color: String,
}

/// One aggregated edge: all parallel extractions sharing an [`EdgeKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub subject: String,
    pub object: String,
    pub relation: String,
    /// How many extractions collapsed into this edge.
    pub weight: usize,
    /// Union of surface-form variants, sorted.
    pub surface_forms: Vec<String>,
    /// Bounded sample of evidence texts for tooltips.
    pub evidence_sample: Vec<String>,
    /// Display width: clamped linear scaling of weight.
    pub width: f64,
}

/// A complete node/edge view ready for force-directed rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphView {
    /// An empty view renders as an explicit "no data" placeholder, never a
    /// blank canvas.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
