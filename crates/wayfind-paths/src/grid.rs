//! A 2D cell map with cached movement links.

use wayfind_core::Point;

use crate::error::GridError;

/// Cost of an orthogonal move between adjacent cells.
pub const STRAIGHT_COST: i32 = 10;

/// Cost of a diagonal move. Fixed-point approximation of `10 * sqrt(2)`.
pub const DIAG_COST: i32 = 14;

/// A cached movement edge from one cell to a walkable neighbor.
///
/// `to` is the flat row-major index of the target cell; convert with
/// [`GridMap::point`]. `cost` already includes the target cell's terrain
/// multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLink {
    pub to: usize,
    pub cost: i32,
}

/// A single cell of a [`GridMap`].
#[derive(Debug, Clone)]
pub struct GridNode {
    pos: Point,
    /// Whether the cell can be entered at all.
    pub walkable: bool,
    /// Terrain cost scale applied to moves entering this cell. Must be >= 0;
    /// 1.0 leaves the base costs untouched.
    pub cost_multiplier: f32,
    links: Vec<GridLink>,
}

impl GridNode {
    /// Create a walkable cell with neutral terrain.
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            walkable: true,
            cost_multiplier: 1.0,
            links: Vec::new(),
        }
    }

    /// The cell's map coordinate.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Cached movement links, valid since the last
    /// [`GridMap::cache_around_links`] run.
    #[inline]
    pub fn links(&self) -> &[GridLink] {
        &self.links
    }
}

/// A fixed-size 2D map of cells for grid pathfinding.
///
/// Build the map, edit walkability and terrain with
/// [`set_walkable`](Self::set_walkable) /
/// [`set_cost_multiplier`](Self::set_cost_multiplier), then call
/// [`cache_around_links`](Self::cache_around_links) once before searching.
/// Any later walkability or terrain edit invalidates the cached links until
/// the next `cache_around_links` run.
#[derive(Debug, Clone)]
pub struct GridMap {
    cols: i32,
    rows: i32,
    nodes: Vec<GridNode>,
    start: Option<usize>,
    end: Option<usize>,
}

impl GridMap {
    /// Create a `cols` x `rows` map of walkable, neutral-terrain cells.
    pub fn new(cols: i32, rows: i32) -> Self {
        Self::with_factory(cols, rows, GridNode::new)
    }

    /// Create a map whose cells are produced by `factory`.
    ///
    /// The factory is called once per cell in row-major order and may set
    /// walkability and terrain from external map data.
    pub fn with_factory(cols: i32, rows: i32, mut factory: impl FnMut(Point) -> GridNode) -> Self {
        assert!(cols > 0 && rows > 0, "map dimensions must be positive");
        let mut nodes = Vec::with_capacity((cols * rows) as usize);
        for y in 0..rows {
            for x in 0..cols {
                nodes.push(factory(Point::new(x, y)));
            }
        }
        Self {
            cols,
            rows,
            nodes,
            start: None,
            end: None,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the map has no cells. Never true for a constructed map.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Convert a coordinate to a flat index. `None` if out of range.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.x >= self.cols || p.y < 0 || p.y >= self.rows {
            return None;
        }
        Some((p.y * self.cols + p.x) as usize)
    }

    /// Convert a flat index back to a coordinate.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        Point::new(idx as i32 % self.cols, idx as i32 / self.cols)
    }

    /// The cell at `p`, if in range.
    #[inline]
    pub fn node(&self, p: Point) -> Option<&GridNode> {
        self.index(p).map(|i| &self.nodes[i])
    }

    /// The cell at flat index `idx`.
    #[inline]
    pub fn node_at(&self, idx: usize) -> &GridNode {
        &self.nodes[idx]
    }

    /// Whether `p` is in range and walkable.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.node(p).is_some_and(|n| n.walkable)
    }

    /// Set a cell's walkability. Cached links become stale until the next
    /// [`cache_around_links`](Self::cache_around_links) run.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> Result<(), GridError> {
        let i = self.checked_index(p)?;
        self.nodes[i].walkable = walkable;
        Ok(())
    }

    /// Set a cell's terrain cost multiplier. Cached links become stale until
    /// the next [`cache_around_links`](Self::cache_around_links) run.
    pub fn set_cost_multiplier(&mut self, p: Point, value: f32) -> Result<(), GridError> {
        if value < 0.0 {
            return Err(GridError::NegativeMultiplier { pos: p, value });
        }
        let i = self.checked_index(p)?;
        self.nodes[i].cost_multiplier = value;
        Ok(())
    }

    /// Select the search start cell.
    pub fn set_start(&mut self, p: Point) -> Result<(), GridError> {
        self.start = Some(self.checked_index(p)?);
        Ok(())
    }

    /// Select the search end cell.
    pub fn set_end(&mut self, p: Point) -> Result<(), GridError> {
        self.end = Some(self.checked_index(p)?);
        Ok(())
    }

    /// The selected start cell, if any.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start.map(|i| self.nodes[i].pos)
    }

    /// The selected end cell, if any.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end.map(|i| self.nodes[i].pos)
    }

    /// Precompute every cell's movement links.
    ///
    /// Each cell links to the surrounding eight cells that are walkable,
    /// except diagonal neighbors whose two shared orthogonal cells are not
    /// both walkable (no cutting through wall corners). Orthogonal links
    /// cost [`STRAIGHT_COST`], diagonal links [`DIAG_COST`], both scaled by
    /// the target cell's `cost_multiplier`.
    ///
    /// Run once after all walkability and terrain edits; re-run after any
    /// further edit.
    pub fn cache_around_links(&mut self) {
        for i in 0..self.nodes.len() {
            let links = self.compute_links(i);
            self.nodes[i].links = links;
        }
    }

    fn compute_links(&self, idx: usize) -> Vec<GridLink> {
        let p = self.nodes[idx].pos;
        let mut links = Vec::new();
        let x0 = (p.x - 1).max(0);
        let x1 = (p.x + 1).min(self.cols - 1);
        let y0 = (p.y - 1).max(0);
        let y1 = (p.y + 1).min(self.rows - 1);
        for ny in y0..=y1 {
            for nx in x0..=x1 {
                if nx == p.x && ny == p.y {
                    continue;
                }
                let ti = (ny * self.cols + nx) as usize;
                let test = &self.nodes[ti];
                if !test.walkable {
                    continue;
                }
                // The two cells sharing an axis with both endpoints must be
                // walkable; for a diagonal neighbor these are the corner
                // cells the move would squeeze past.
                if !self.flat(p.x, ny).walkable || !self.flat(nx, p.y).walkable {
                    continue;
                }
                let base = if nx == p.x || ny == p.y {
                    STRAIGHT_COST
                } else {
                    DIAG_COST
                };
                let cost = (base as f32 * test.cost_multiplier).round() as i32;
                links.push(GridLink { to: ti, cost });
            }
        }
        links
    }

    #[inline]
    fn flat(&self, x: i32, y: i32) -> &GridNode {
        &self.nodes[(y * self.cols + x) as usize]
    }

    fn checked_index(&self, p: Point) -> Result<usize, GridError> {
        self.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            cols: self.cols,
            rows: self.rows,
        })
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;

    /// Persisted form: topology only. Links are rebuilt on deserialize.
    #[derive(serde::Serialize, serde::Deserialize)]
    struct GridMapRepr {
        cols: i32,
        rows: i32,
        walkable: Vec<bool>,
        cost_multiplier: Vec<f32>,
        start: Option<Point>,
        end: Option<Point>,
    }

    impl serde::Serialize for GridMap {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let repr = GridMapRepr {
                cols: self.cols,
                rows: self.rows,
                walkable: self.nodes.iter().map(|n| n.walkable).collect(),
                cost_multiplier: self.nodes.iter().map(|n| n.cost_multiplier).collect(),
                start: self.start(),
                end: self.end(),
            };
            repr.serialize(serializer)
        }
    }

    impl<'de> serde::Deserialize<'de> for GridMap {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            use serde::de::Error;

            let repr = GridMapRepr::deserialize(deserializer)?;
            if repr.cols <= 0 || repr.rows <= 0 {
                return Err(D::Error::custom("map dimensions must be positive"));
            }
            let len = (repr.cols * repr.rows) as usize;
            if repr.walkable.len() != len || repr.cost_multiplier.len() != len {
                return Err(D::Error::custom("cell data does not match dimensions"));
            }
            let mut map = GridMap::with_factory(repr.cols, repr.rows, |p| {
                let i = (p.y * repr.cols + p.x) as usize;
                let mut node = GridNode::new(p);
                node.walkable = repr.walkable[i];
                node.cost_multiplier = repr.cost_multiplier[i];
                node
            });
            if let Some(p) = repr.start {
                map.set_start(p).map_err(D::Error::custom)?;
            }
            if let Some(p) = repr.end {
                map.set_end(p).map_err(D::Error::custom)?;
            }
            map.cache_around_links();
            Ok(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_all_walkable() {
        let map = GridMap::new(4, 3);
        assert_eq!(map.cols(), 4);
        assert_eq!(map.rows(), 3);
        assert_eq!(map.len(), 12);
        for idx in 0..map.len() {
            let n = map.node_at(idx);
            assert!(n.walkable);
            assert_eq!(n.cost_multiplier, 1.0);
        }
    }

    #[test]
    fn factory_drives_cell_state() {
        let map = GridMap::with_factory(3, 3, |p| {
            let mut n = GridNode::new(p);
            n.walkable = p.x != 1;
            n
        });
        assert!(map.is_walkable(Point::new(0, 0)));
        assert!(!map.is_walkable(Point::new(1, 2)));
    }

    #[test]
    fn index_round_trip() {
        let map = GridMap::new(5, 4);
        for idx in 0..map.len() {
            assert_eq!(map.index(map.point(idx)), Some(idx));
        }
        assert_eq!(map.index(Point::new(5, 0)), None);
        assert_eq!(map.index(Point::new(0, 4)), None);
        assert_eq!(map.index(Point::new(-1, 0)), None);
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut map = GridMap::new(3, 3);
        let p = Point::new(3, 1);
        assert!(matches!(
            map.set_walkable(p, false),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            map.set_start(p),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(map.node(p).is_none());
        assert!(map.start().is_none());
    }

    #[test]
    fn negative_multiplier_is_an_error() {
        let mut map = GridMap::new(3, 3);
        let err = map.set_cost_multiplier(Point::new(1, 1), -0.5);
        assert!(matches!(err, Err(GridError::NegativeMultiplier { .. })));
    }

    #[test]
    fn interior_cell_links_to_eight_neighbors() {
        let mut map = GridMap::new(3, 3);
        map.cache_around_links();
        let center = map.node(Point::new(1, 1)).unwrap();
        assert_eq!(center.links().len(), 8);
        let diag: i32 = center.links().iter().filter(|l| l.cost == DIAG_COST).count() as i32;
        let straight: i32 = center
            .links()
            .iter()
            .filter(|l| l.cost == STRAIGHT_COST)
            .count() as i32;
        assert_eq!(diag, 4);
        assert_eq!(straight, 4);
    }

    #[test]
    fn corner_cell_links_to_three_neighbors() {
        let mut map = GridMap::new(3, 3);
        map.cache_around_links();
        assert_eq!(map.node(Point::new(0, 0)).unwrap().links().len(), 3);
        assert_eq!(map.node(Point::new(2, 2)).unwrap().links().len(), 3);
    }

    #[test]
    fn unwalkable_neighbors_are_not_linked() {
        let mut map = GridMap::new(3, 3);
        map.set_walkable(Point::new(2, 1), false).unwrap();
        map.cache_around_links();
        let center = map.node(Point::new(1, 1)).unwrap();
        assert!(center.links().iter().all(|l| map.point(l.to) != Point::new(2, 1)));
    }

    #[test]
    fn diagonal_corner_cutting_is_excluded() {
        // Wall at (1, 0): the diagonal (0, 0) -> (1, 1) would squeeze past it.
        let mut map = GridMap::new(3, 3);
        map.set_walkable(Point::new(1, 0), false).unwrap();
        map.cache_around_links();
        let origin = map.node(Point::new(0, 0)).unwrap();
        assert!(origin.links().iter().all(|l| map.point(l.to) != Point::new(1, 1)));
        // The orthogonal neighbor below is unaffected.
        assert!(origin.links().iter().any(|l| map.point(l.to) == Point::new(0, 1)));
    }

    #[test]
    fn cost_multiplier_scales_link_cost() {
        let mut map = GridMap::new(3, 1);
        map.set_cost_multiplier(Point::new(1, 0), 2.0).unwrap();
        map.cache_around_links();
        let origin = map.node(Point::new(0, 0)).unwrap();
        let link = origin
            .links()
            .iter()
            .find(|l| map.point(l.to) == Point::new(1, 0))
            .unwrap();
        assert_eq!(link.cost, 2 * STRAIGHT_COST);
    }

    #[test]
    fn recaching_without_edits_is_identical() {
        let mut map = GridMap::new(6, 6);
        map.set_walkable(Point::new(2, 2), false).unwrap();
        map.set_walkable(Point::new(3, 2), false).unwrap();
        map.set_cost_multiplier(Point::new(4, 4), 3.0).unwrap();
        map.cache_around_links();
        let first: Vec<Vec<GridLink>> = (0..map.len())
            .map(|i| map.node_at(i).links().to_vec())
            .collect();
        map.cache_around_links();
        let second: Vec<Vec<GridLink>> = (0..map.len())
            .map(|i| map.node_at(i).links().to_vec())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn start_end_selection() {
        let mut map = GridMap::new(4, 4);
        assert!(map.start().is_none());
        assert!(map.end().is_none());
        map.set_start(Point::new(0, 0)).unwrap();
        map.set_end(Point::new(3, 3)).unwrap();
        assert_eq!(map.start(), Some(Point::new(0, 0)));
        assert_eq!(map.end(), Some(Point::new(3, 3)));
    }
}
