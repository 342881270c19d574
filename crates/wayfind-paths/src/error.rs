use std::fmt;

use wayfind_core::Point;

/// Errors from [`GridMap`](crate::GridMap) mutators and accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// Coordinate outside the map rectangle.
    OutOfBounds { pos: Point, cols: i32, rows: i32 },
    /// Terrain cost multiplier below zero.
    NegativeMultiplier { pos: Point, value: f32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, cols, rows } => {
                write!(f, "cell {pos} is outside the {cols}x{rows} map")
            }
            Self::NegativeMultiplier { pos, value } => {
                write!(f, "cell {pos} given negative cost multiplier {value}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Errors from [`WeightedGraph`](crate::WeightedGraph) construction.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// An edge was declared with a negative cost.
    NegativeCost { from: String, to: String, cost: f64 },
    /// A name that has never been added to the graph.
    UnknownNode { name: String },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeCost { from, to, cost } => {
                write!(f, "edge {from} -> {to} has negative cost {cost}")
            }
            Self::UnknownNode { name } => write!(f, "unknown node {name:?}"),
        }
    }
}

impl std::error::Error for GraphError {}
