#![allow(dead_code)]

use unblack_core::BitGrid;

/// Build a grid from rows of `0`/`1` characters, e.g. `["010", "111"]`.
pub fn grid_from_rows(rows: &[&str]) -> BitGrid {
    let cols = rows[0].len();
    let bits = rows.iter().flat_map(|r| {
        assert_eq!(r.len(), cols, "ragged test grid");
        r.bytes().map(|b| b == b'1')
    });
    BitGrid::from_bits(rows.len() as isize, cols as isize, bits).expect("valid test grid")
}

/// Grid with every bit set.
pub fn filled(rows: usize, cols: usize) -> BitGrid {
    BitGrid::from_bits(rows as isize, cols as isize, std::iter::repeat(true).take(rows * cols))
        .expect("valid test grid")
}

/// Snapshot of every bit as `(row, col, value)` in row-major order.
pub fn cells(grid: &BitGrid) -> Vec<(usize, usize, bool)> {
    let mut out = Vec::with_capacity(grid.len());
    grid.for_each_row_major(|row, col, bit| out.push((row, col, bit)));
    out
}

/// True if every cell on the outer border is cleared.
pub fn border_is_clear(grid: &BitGrid) -> bool {
    let (h, w) = (grid.height(), grid.width());
    cells(grid)
        .into_iter()
        .filter(|&(r, c, _)| r == 0 || c == 0 || r == h - 1 || c == w - 1)
        .all(|(_, _, bit)| !bit)
}

/// Deterministic pseudo-random grid (xorshift) with roughly `density` percent set bits.
pub fn noise_grid(rows: usize, cols: usize, density: u32, seed: u64) -> BitGrid {
    let mut state = seed.max(1);
    let bits = (0..rows * cols).map(move |_| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 100) < u64::from(density)
    });
    BitGrid::from_bits(rows as isize, cols as isize, bits).expect("valid test grid")
}
