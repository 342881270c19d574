//! A* search over a [`GridMap`].

use std::cmp::Ordering;

use wayfind_core::{BinaryHeap, Point};

use crate::grid::GridMap;
use crate::heuristic::{self, Heuristic};

/// Open-set entry: flat cell index plus estimated total cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    idx: usize,
    f: i32,
}

fn lowest_f_first(a: &OpenEntry, b: &OpenEntry) -> Ordering {
    b.f.cmp(&a.f)
}

/// Per-cell search bookkeeping, lazily invalidated by generation number.
#[derive(Clone, Copy)]
struct CellState {
    g: i32,
    f: i32,
    parent: usize,
    generation: u32,
}

impl Default for CellState {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: usize::MAX,
            generation: 0,
        }
    }
}

/// Best-first search over a [`GridMap`]'s cached links.
///
/// The open set lives in a [`BinaryHeap`] ordered by lowest `f = g + h`.
/// Instead of resetting per-cell state between runs, each touched cell is
/// stamped with the run's generation number; a cell whose stamp differs from
/// the current run counts as untouched. One search object can therefore be
/// reused across many maps and runs without O(map) clearing work.
///
/// A search object is exclusively owned for the duration of one
/// [`find_path`](Self::find_path) call; run independent searches on
/// independent objects.
pub struct AStarSearch {
    heuristic: Heuristic,
    open: BinaryHeap<OpenEntry, fn(&OpenEntry, &OpenEntry) -> Ordering>,
    cells: Vec<CellState>,
    generation: u32,
    path: Vec<Point>,
}

impl Default for AStarSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl AStarSearch {
    /// Create a search using the [`manhattan`](heuristic::manhattan)
    /// heuristic.
    pub fn new() -> Self {
        Self::with_heuristic(heuristic::manhattan)
    }

    /// Create a search using the given heuristic.
    pub fn with_heuristic(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            open: BinaryHeap::new(lowest_f_first),
            cells: Vec::new(),
            generation: 0,
            path: Vec::new(),
        }
    }

    /// The path found by the last successful [`find_path`](Self::find_path)
    /// run, start and end cells inclusive. Empty after a failed run.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Release per-run state. Also happens implicitly at the start of the
    /// next [`find_path`](Self::find_path) call.
    pub fn clear(&mut self) {
        self.open.clear();
        self.path.clear();
    }

    /// Search `grid` from its start cell to its end cell.
    ///
    /// Requires [`GridMap::cache_around_links`] to have run since the last
    /// walkability or terrain edit. Returns `false` when no path exists or
    /// the grid has no start/end selected; the path of a successful run is
    /// available from [`path`](Self::path) until the next run.
    pub fn find_path(&mut self, grid: &GridMap) -> bool {
        self.clear();
        let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
            return false;
        };
        let (Some(start_idx), Some(end_idx)) = (grid.index(start), grid.index(end)) else {
            return false;
        };

        if self.cells.len() != grid.len() {
            self.cells.clear();
            self.cells.resize(grid.len(), CellState::default());
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;

        self.cells[start_idx] = CellState {
            g: 0,
            f: (self.heuristic)(start, end),
            parent: usize::MAX,
            generation,
        };

        let mut current = start_idx;
        while current != end_idx {
            let current_g = self.cells[current].g;
            for link in grid.node_at(current).links() {
                let ni = link.to;
                let g = current_g + link.cost;
                let h = (self.heuristic)(grid.point(ni), end);
                let f = g + h;
                let cell = &mut self.cells[ni];
                if cell.generation == generation {
                    if f < cell.f {
                        let old = OpenEntry { idx: ni, f: cell.f };
                        cell.f = f;
                        cell.g = g;
                        cell.parent = current;
                        // Absent means the cell was already expanded; the
                        // improved cost is recorded but not re-opened.
                        self.open.update(&old, OpenEntry { idx: ni, f });
                    }
                } else {
                    *cell = CellState {
                        g,
                        f,
                        parent: current,
                        generation,
                    };
                    self.open.enqueue(OpenEntry { idx: ni, f });
                }
            }
            let Some(next) = self.open.dequeue() else {
                return false;
            };
            current = next.idx;
        }

        self.build_path(grid, start_idx, end_idx);
        true
    }

    fn build_path(&mut self, grid: &GridMap, start_idx: usize, end_idx: usize) {
        let mut idx = end_idx;
        self.path.push(grid.point(idx));
        while idx != start_idx {
            idx = self.cells[idx].parent;
            self.path.push(grid.point(idx));
        }
        self.path.reverse();
    }
}
