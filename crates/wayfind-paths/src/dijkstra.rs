//! Dijkstra shortest-path search over a [`WeightedGraph`].

use std::cmp::Ordering;

use wayfind_core::BinaryHeap;

use crate::graph::WeightedGraph;

/// Cost reported when no path exists.
pub const NO_PATH: f64 = -1.0;

/// Lifecycle of a [`DijkstraSearch`] object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// No search has run since construction or the last
    /// [`clear`](DijkstraSearch::clear).
    #[default]
    Idle,
    /// A search is in progress.
    Running,
    /// The last search found a path.
    Success,
    /// The last search found no path.
    Failure,
}

/// Queue entry: node index plus its tentative distance from the start.
#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    idx: usize,
    dist: f64,
}

fn lowest_dist_first(a: &QueueEntry, b: &QueueEntry) -> Ordering {
    b.dist.total_cmp(&a.dist)
}

/// Single-source shortest path over non-negative edge weights.
///
/// The classical relaxation loop: every known node enters the priority
/// queue up front keyed by tentative distance, the cheapest unsettled node
/// is settled each round, and improved neighbors are re-keyed in place.
/// Ties between equal-cost nodes follow heap extraction order, so the first
/// equal-cost node dequeued settles first; the outcome is deterministic for
/// a given construction sequence.
///
/// Negative edge weights are rejected at graph construction; weights
/// injected past that precondition produce undefined results.
pub struct DijkstraSearch {
    state: SearchState,
    cost: f64,
    path: Vec<String>,
    dist: Vec<f64>,
    prev: Vec<usize>,
    settled: Vec<bool>,
}

impl Default for DijkstraSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl DijkstraSearch {
    /// Create an idle search object.
    pub fn new() -> Self {
        Self {
            state: SearchState::Idle,
            cost: NO_PATH,
            path: Vec::new(),
            dist: Vec::new(),
            prev: Vec::new(),
            settled: Vec::new(),
        }
    }

    /// The current lifecycle state.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Total cost of the last successful search, or [`NO_PATH`].
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Node names from start to end inclusive for the last successful
    /// search. Empty after a failed or same-node search.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Reset to [`SearchState::Idle`], dropping the last result. Also
    /// happens implicitly at the start of the next
    /// [`find_path`](Self::find_path) call.
    pub fn clear(&mut self) {
        self.state = SearchState::Idle;
        self.cost = NO_PATH;
        self.path.clear();
    }

    /// Search `graph` from its start node to its end node.
    ///
    /// Returns the total path cost, or [`NO_PATH`] when the target is
    /// unreachable or the graph has no start/end selected. A same-node
    /// search short-circuits to cost `0` with an empty path.
    pub fn find_path(&mut self, graph: &WeightedGraph) -> f64 {
        self.clear();
        self.state = SearchState::Running;

        let (Some(start), Some(end)) = (graph.start_index(), graph.end_index()) else {
            self.state = SearchState::Failure;
            return NO_PATH;
        };
        if start == end {
            self.state = SearchState::Success;
            self.cost = 0.0;
            return 0.0;
        }

        let n = graph.len();
        self.dist.clear();
        self.dist.resize(n, f64::INFINITY);
        self.prev.clear();
        self.prev.resize(n, usize::MAX);
        self.settled.clear();
        self.settled.resize(n, false);
        self.dist[start] = 0.0;

        // The full node set enters the queue up front; unreached nodes
        // carry an infinite key and sink to the back.
        let mut open: BinaryHeap<QueueEntry, fn(&QueueEntry, &QueueEntry) -> Ordering> =
            BinaryHeap::with_capacity(n, lowest_dist_first);
        for idx in 0..n {
            open.enqueue(QueueEntry {
                idx,
                dist: self.dist[idx],
            });
        }

        while let Some(entry) = open.dequeue() {
            if entry.dist.is_infinite() {
                // Everything still queued is unreachable.
                break;
            }
            let u = entry.idx;
            if u == end {
                self.build_path(graph, end);
                self.cost = self.dist[end];
                self.state = SearchState::Success;
                return self.cost;
            }
            self.settled[u] = true;

            for link in graph.nodes()[u].links() {
                let v = link.to;
                if self.settled[v] {
                    continue;
                }
                let relaxed = self.dist[u] + link.cost;
                if relaxed < self.dist[v] {
                    let old = QueueEntry {
                        idx: v,
                        dist: self.dist[v],
                    };
                    self.dist[v] = relaxed;
                    self.prev[v] = u;
                    open.update(
                        &old,
                        QueueEntry {
                            idx: v,
                            dist: relaxed,
                        },
                    );
                }
            }
        }

        self.state = SearchState::Failure;
        NO_PATH
    }

    fn build_path(&mut self, graph: &WeightedGraph, end: usize) {
        let mut idx = end;
        while idx != usize::MAX {
            self.path.push(graph.nodes()[idx].name().to_owned());
            idx = self.prev[idx];
        }
        self.path.reverse();
    }
}
