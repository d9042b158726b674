use std::collections::VecDeque;

use tracing::{debug, info};

use crate::bitgrid::BitGrid;
use crate::config::{ClearConfig, TraversalOrder};

/// A cell coordinate. Signed so that neighbours of border cells can be
/// expressed and rejected by the grid's bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub row: isize,
    pub col: isize,
}

impl Pixel {
    pub fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    /// The four edge-sharing neighbours: up, down, left, right.
    pub fn neighbors(self) -> [Pixel; 4] {
        [
            Pixel::new(self.row - 1, self.col),
            Pixel::new(self.row + 1, self.col),
            Pixel::new(self.row, self.col - 1),
            Pixel::new(self.row, self.col + 1),
        ]
    }
}

/// Counters collected during one edge-clearing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClearStats {
    /// Set border cells that seeded the worklist.
    pub seeds: usize,
    /// Bits changed from 1 to 0.
    pub cleared: usize,
    /// Largest worklist length observed.
    pub max_frontier: usize,
}

/// Pending coordinates. Stack or queue depending on the traversal order.
enum Frontier {
    Stack(Vec<Pixel>),
    Queue(VecDeque<Pixel>),
}

impl Frontier {
    fn new(order: TraversalOrder) -> Self {
        match order {
            TraversalOrder::DepthFirst => Self::Stack(Vec::new()),
            TraversalOrder::BreadthFirst => Self::Queue(VecDeque::new()),
        }
    }

    fn push(&mut self, pixel: Pixel) {
        match self {
            Self::Stack(v) => v.push(pixel),
            Self::Queue(q) => q.push_back(pixel),
        }
    }

    fn pop(&mut self) -> Option<Pixel> {
        match self {
            Self::Stack(v) => v.pop(),
            Self::Queue(q) => q.pop_front(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Stack(v) => v.len(),
            Self::Queue(q) => q.len(),
        }
    }
}

/// Every border cell of a `rows x cols` grid, each exactly once.
///
/// Order: top row, bottom row, left column, right column. The side columns
/// skip the corners already produced by the top and bottom rows, and a
/// single-row or single-column grid yields each cell once.
pub fn border_cells(rows: usize, cols: usize) -> impl Iterator<Item = Pixel> {
    let (r, c) = (rows as isize, cols as isize);
    let last_row = r - 1;
    let last_col = c - 1;

    let top = (0..c).map(|col| Pixel::new(0, col));
    let bottom = (0..c)
        .filter(move |_| last_row > 0)
        .map(move |col| Pixel::new(last_row, col));
    let left = (1..last_row.max(1)).map(|row| Pixel::new(row, 0));
    let right = (1..last_row.max(1))
        .filter(move |_| last_col > 0)
        .map(move |row| Pixel::new(row, last_col));

    top.chain(bottom).chain(left).chain(right)
}

/// Clear every set bit that is 4-connected to the grid border, depth-first.
pub fn clear_edges(grid: &mut BitGrid) -> ClearStats {
    clear_edges_with(grid, &ClearConfig::default())
}

/// Clear every set bit that is 4-connected to the grid border.
///
/// Runs an explicit worklist, so memory use grows with the number of set bits
/// and never with call depth. Bits in components that do not touch the border
/// are left as they were.
pub fn clear_edges_with(grid: &mut BitGrid, config: &ClearConfig) -> ClearStats {
    let mut stats = ClearStats::default();
    let mut frontier = Frontier::new(config.order);

    for pixel in border_cells(grid.height(), grid.width()) {
        if is_set(grid, pixel) {
            frontier.push(pixel);
            stats.seeds += 1;
        }
    }
    stats.max_frontier = frontier.len();
    debug!(
        seeds = stats.seeds,
        order = %config.order,
        "Border scan complete"
    );

    while let Some(pixel) = frontier.pop() {
        // Out-of-range and already-cleared entries are dropped here.
        if !matches!(grid.set(pixel.row, pixel.col, false), Ok(true)) {
            continue;
        }
        stats.cleared += 1;

        for next in pixel.neighbors() {
            if grid.is_in_bounds(next.row, next.col) && is_set(grid, next) {
                frontier.push(next);
            }
        }
        stats.max_frontier = stats.max_frontier.max(frontier.len());
    }

    info!(
        seeds = stats.seeds,
        cleared = stats.cleared,
        max_frontier = stats.max_frontier,
        "Edge clear complete"
    );
    stats
}

fn is_set(grid: &BitGrid, pixel: Pixel) -> bool {
    matches!(grid.get(pixel.row, pixel.col), Ok(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(rows: usize, cols: usize) -> Vec<(isize, isize)> {
        border_cells(rows, cols).map(|p| (p.row, p.col)).collect()
    }

    #[test]
    fn test_border_cells_3x3() {
        assert_eq!(
            collect(3, 3),
            vec![(0, 0), (0, 1), (0, 2), (2, 0), (2, 1), (2, 2), (1, 0), (1, 2)]
        );
    }

    #[test]
    fn test_border_cells_single_row() {
        assert_eq!(collect(1, 4), vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_border_cells_single_column() {
        assert_eq!(collect(3, 1), vec![(0, 0), (2, 0), (1, 0)]);
    }

    #[test]
    fn test_border_cells_single_cell() {
        assert_eq!(collect(1, 1), vec![(0, 0)]);
    }

    #[test]
    fn test_border_cells_count_matches_perimeter() {
        for (rows, cols) in [(2, 2), (4, 7), (10, 3)] {
            assert_eq!(collect(rows, cols).len(), 2 * (rows + cols) - 4);
        }
    }

    #[test]
    fn test_frontier_orders() {
        let a = Pixel::new(0, 0);
        let b = Pixel::new(0, 1);

        let mut stack = Frontier::new(TraversalOrder::DepthFirst);
        stack.push(a);
        stack.push(b);
        assert_eq!(stack.pop(), Some(b));

        let mut queue = Frontier::new(TraversalOrder::BreadthFirst);
        queue.push(a);
        queue.push(b);
        assert_eq!(queue.pop(), Some(a));
        assert_eq!(queue.len(), 1);
    }
}
