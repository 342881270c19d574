//! Path post-processing: key-point reduction and line-of-sight smoothing.

use wayfind_core::Point;

use crate::grid::GridMap;

/// Post-processes raw cell paths against a grid's walkability data.
///
/// A raw search path visits every cell it crosses.
/// [`key_points`](Self::key_points) drops the cells inside straight runs,
/// leaving only endpoints and turns; [`smooth`](Self::smooth) additionally
/// string-pulls the turns away wherever a straight segment has line of
/// sight, producing the path an agent would actually walk.
pub struct PathReducer<'a> {
    grid: &'a GridMap,
}

impl<'a> PathReducer<'a> {
    /// Create a reducer over `grid`'s walkability data.
    pub fn new(grid: &'a GridMap) -> Self {
        Self { grid }
    }

    /// Collapse straight runs, keeping only the first cell, the last cell,
    /// and every cell where the step direction changes.
    pub fn key_points(&self, path: &[Point]) -> Vec<Point> {
        if path.len() < 3 {
            return path.to_vec();
        }
        let mut result = vec![path[0]];
        let mut step = path[0] - path[1];
        for i in 1..path.len() - 1 {
            let next = path[i] - path[i + 1];
            if next != step {
                result.push(path[i]);
                step = next;
            }
        }
        result.push(path[path.len() - 1]);
        result
    }

    /// String-pull `path`: reduce to key points, then greedily merge
    /// consecutive segments whenever the direct line between them crosses no
    /// blocked cell.
    ///
    /// The result never visits more cells than the key-point path and never
    /// crosses a blocked cell, except possibly at the grid's own start and
    /// end cells, which are assumed walkable by construction.
    pub fn smooth(&self, path: &[Point]) -> Vec<Point> {
        let path = self.key_points(path);
        if path.len() < 3 {
            return path;
        }
        let mut result = vec![path[0]];
        let mut anchor = 0;
        let mut test = 2;
        while test < path.len() {
            if self.has_obstacle(path[anchor], path[test]) {
                // Line of sight broke: the previous point becomes the next
                // committed anchor.
                result.push(path[test - 1]);
                anchor = test - 1;
            }
            test += 1;
        }
        result.push(path[path.len() - 1]);
        result
    }

    /// Whether the straight segment between the centers of `a` and `b`
    /// crosses a blocked cell.
    ///
    /// Adjacent cells (both axis deltas below 2) never obstruct. Axis-aligned
    /// and 45-degree segments walk their cells directly; any other slope
    /// walks every straddled cell with exact integer geometry. The grid's
    /// start and end cells are exempt from the slope test, matching their
    /// role as path endpoints.
    pub fn has_obstacle(&self, a: Point, b: Point) -> bool {
        let (dx, dy) = a.abs_delta(b);
        if dx < 2 && dy < 2 {
            false
        } else if dx == 0 {
            self.vertical_blocked(a, b)
        } else if dy == 0 {
            self.horizontal_blocked(a, b)
        } else if dx == dy {
            self.diagonal_blocked(a, b)
        } else {
            self.slope_blocked(a, b)
        }
    }

    fn vertical_blocked(&self, a: Point, b: Point) -> bool {
        let col = a.x;
        let (min, max) = if a.y > b.y { (b.y, a.y) } else { (a.y, b.y) };
        (min + 1..max).any(|y| !self.grid.is_walkable(Point::new(col, y)))
    }

    fn horizontal_blocked(&self, a: Point, b: Point) -> bool {
        let row = a.y;
        let (min, max) = if a.x > b.x { (b.x, a.x) } else { (a.x, b.x) };
        (min + 1..max).any(|x| !self.grid.is_walkable(Point::new(x, row)))
    }

    /// 45-degree segments: walk the diagonal, checking the flanking cells
    /// the segment squeezes between at each step.
    fn diagonal_blocked(&self, a: Point, b: Point) -> bool {
        let (left, right) = if a.x > b.x { (b, a) } else { (a, b) };
        let dy = if left.y > right.y { -1 } else { 1 };
        let len = right.x - left.x + 1;
        let mut x = left.x;
        let mut y = left.y;
        for i in 0..len {
            if i == 0 {
                if !self.grid.is_walkable(Point::new(x + 1, y)) {
                    return true;
                }
            } else if i == len - 1 {
                if !self.grid.is_walkable(Point::new(x - 1, y)) {
                    return true;
                }
            } else {
                for j in -1..=1 {
                    if !self.grid.is_walkable(Point::new(x + j, y)) {
                        return true;
                    }
                }
            }
            x += 1;
            y += dy;
        }
        false
    }

    /// Arbitrary slopes: supercover walk from cell center to cell center in
    /// doubled coordinates, so that centers, boundaries, and corners stay
    /// exact integers. Every cell the open segment passes through is
    /// checked; a segment through a lattice corner checks both straddled
    /// side cells (the corner's other two cells are the walk's own current
    /// and next cells).
    fn slope_blocked(&self, a: Point, b: Point) -> bool {
        let start = self.grid.start();
        let end = self.grid.end();
        let blocked = |p: Point| {
            start != Some(p) && end != Some(p) && !self.grid.is_walkable(p)
        };

        let steps_x = (b.x - a.x).abs();
        let steps_y = (b.y - a.y).abs();
        let sx = (b.x - a.x).signum();
        let sy = (b.y - a.y).signum();
        // Doubled-coordinate deltas; boundary k is crossed at parameter
        // (2k + 1) / (2 * steps), compared by cross-multiplication.
        let adx = (2 * steps_x) as i64;
        let ady = (2 * steps_y) as i64;

        let mut cx = a.x;
        let mut cy = a.y;
        let mut k: i64 = 0;
        let mut m: i64 = 0;
        while k < steps_x as i64 || m < steps_y as i64 {
            let tx = if k < steps_x as i64 {
                (2 * k + 1) * ady
            } else {
                i64::MAX
            };
            let ty = if m < steps_y as i64 {
                (2 * m + 1) * adx
            } else {
                i64::MAX
            };
            if tx < ty {
                cx += sx;
                k += 1;
            } else if ty < tx {
                cy += sy;
                m += 1;
            } else {
                if blocked(Point::new(cx + sx, cy)) || blocked(Point::new(cx, cy + sy)) {
                    return true;
                }
                cx += sx;
                cy += sy;
                k += 1;
                m += 1;
            }
            if blocked(Point::new(cx, cy)) {
                return true;
            }
        }
        false
    }
}
