use std::fmt;

use ndarray::Array2;

use crate::consts::BITS_PER_WORD;
use crate::error::{Result, UnblackError};

/// Dense two-dimensional bit array, row-major, one bit per cell.
///
/// Dimensions are fixed at construction. Every access through [`get`](Self::get)
/// and [`set`](Self::set) is bounds checked; an out-of-range coordinate is
/// reported as [`UnblackError::OutOfBounds`] and never wraps into a
/// neighbouring row.
#[derive(Clone, PartialEq, Eq)]
pub struct BitGrid {
    rows: usize,
    cols: usize,
    words: Box<[u64]>,
}

impl BitGrid {
    /// Create a grid with every bit cleared.
    ///
    /// Signed dimensions so that negative requests reach the check instead of
    /// wrapping around at the call site.
    pub fn new(rows: isize, cols: isize) -> Result<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(UnblackError::InvalidDimensions { rows, cols });
        }
        let bits = (rows as usize)
            .checked_mul(cols as usize)
            .ok_or(UnblackError::InvalidDimensions { rows, cols })?;
        let word_count = bits.div_ceil(BITS_PER_WORD);

        Ok(Self {
            rows: rows as usize,
            cols: cols as usize,
            words: vec![0u64; word_count].into_boxed_slice(),
        })
    }

    /// Build a grid from a row-major stream of bits.
    ///
    /// The stream must hold exactly `rows * cols` values. At most one value
    /// past the end is read, so an endless stream is reported as too long.
    pub fn from_bits<I>(rows: isize, cols: isize, bits: I) -> Result<Self>
    where
        I: IntoIterator<Item = bool>,
    {
        let mut grid = Self::new(rows, cols)?;
        let expected = grid.len();
        let mut actual = 0usize;

        for bit in bits.into_iter().take(expected.saturating_add(1)) {
            if actual < expected && bit {
                grid.put(actual, true);
            }
            actual += 1;
        }

        if actual != expected {
            return Err(UnblackError::PixelCount { expected, actual });
        }
        Ok(grid)
    }

    /// Build a grid from a boolean mask of shape `(rows, cols)`.
    pub fn from_mask(mask: &Array2<bool>) -> Result<Self> {
        let (h, w) = mask.dim();
        // Array2 iterates in logical row-major order regardless of memory layout.
        Self::from_bits(h as isize, w as isize, mask.iter().copied())
    }

    /// Copy the grid into a boolean mask of shape `(rows, cols)`.
    pub fn to_mask(&self) -> Array2<bool> {
        Array2::from_shape_fn((self.rows, self.cols), |(row, col)| {
            self.bit(row * self.cols + col)
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false: a live grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub fn get(&self, row: isize, col: isize) -> Result<bool> {
        let index = self.index(row, col)?;
        Ok(self.bit(index))
    }

    /// Write one bit and return the value it replaced.
    pub fn set(&mut self, row: isize, col: isize, value: bool) -> Result<bool> {
        let index = self.index(row, col)?;
        Ok(self.put(index, value))
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Visit every cell as `(row, col, value)`, row by row.
    ///
    /// The grid stays immutably borrowed for the whole traversal, so the
    /// visitor cannot modify it. Collect changes and apply them afterwards.
    pub fn for_each_row_major<F>(&self, mut visit: F)
    where
        F: FnMut(usize, usize, bool),
    {
        for row in 0..self.rows {
            for col in 0..self.cols {
                visit(row, col, self.bit(row * self.cols + col));
            }
        }
    }

    /// Visit every cell as `(row, col, value)`, column by column.
    ///
    /// Same borrowing rules as [`for_each_row_major`](Self::for_each_row_major).
    pub fn for_each_col_major<F>(&self, mut visit: F)
    where
        F: FnMut(usize, usize, bool),
    {
        for col in 0..self.cols {
            for row in 0..self.rows {
                visit(row, col, self.bit(row * self.cols + col));
            }
        }
    }

    /// Bits in row-major order.
    pub fn iter_row_major(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| self.bit(i))
    }

    fn index(&self, row: isize, col: isize) -> Result<usize> {
        if !self.is_in_bounds(row, col) {
            return Err(UnblackError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row as usize * self.cols + col as usize)
    }

    fn bit(&self, index: usize) -> bool {
        self.words[index / BITS_PER_WORD] >> (index % BITS_PER_WORD) & 1 == 1
    }

    fn put(&mut self, index: usize, value: bool) -> bool {
        let word = &mut self.words[index / BITS_PER_WORD];
        let mask = 1u64 << (index % BITS_PER_WORD);
        let previous = *word & mask != 0;
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
        previous
    }
}

impl fmt::Debug for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitGrid {}x{}", self.rows, self.cols)?;
        fmt::Display::fmt(self, f)
    }
}

/// One line per row, cells written as `0`/`1` without separators.
impl fmt::Display for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let c = if self.bit(row * self.cols + col) { '1' } else { '0' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
