//! Pathfinding for grid- and graph-based game worlds.
//!
//! Two independent engines share the comparator heap from `wayfind-core`:
//!
//! - **A\*** over a cell [`GridMap`] ([`AStarSearch::find_path`]), with
//!   pluggable heuristics ([`manhattan`], [`euclidean`], [`octile`]) and
//!   precomputed 8-way neighbor links.
//! - **Dijkstra** over a named [`WeightedGraph`]
//!   ([`DijkstraSearch::find_path`]), returning the total cost and the node
//!   path.
//!
//! Raw A* paths can be post-processed by [`PathReducer`]: collinear cells
//! collapse to key points, and string-pulling smoothing removes the turns a
//! straight walk with line of sight would skip.
//!
//! # Workflow
//!
//! Build a [`GridMap`] or [`WeightedGraph`], select start and end, run
//! [`cache_around_links`](GridMap::cache_around_links) (grids only), then
//! hand the world to a search object. Searches report failure as an
//! ordinary outcome: `false` from A*, [`NO_PATH`] from Dijkstra.

mod astar;
mod dijkstra;
mod error;
mod graph;
mod grid;
mod heuristic;
mod reduce;

pub use astar::AStarSearch;
pub use dijkstra::{DijkstraSearch, NO_PATH, SearchState};
pub use error::{GraphError, GridError};
pub use graph::{GraphLink, GraphNode, WeightedGraph};
pub use grid::{DIAG_COST, GridLink, GridMap, GridNode, STRAIGHT_COST};
pub use heuristic::{Heuristic, euclidean, manhattan, octile};
pub use reduce::PathReducer;
