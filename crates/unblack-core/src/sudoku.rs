use ndarray::Array2;
use thiserror::Error;

use crate::consts::{SUDOKU_BOX_SIDE, SUDOKU_SIDE};

/// First rule a board breaks, scanning cells in row-major order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SudokuViolation {
    #[error("Board is {rows}x{cols}, expected 9x9")]
    Shape { rows: usize, cols: usize },

    #[error("Cell ({row}, {col}) holds {value}, expected a digit 1-9")]
    InvalidDigit { row: usize, col: usize, value: u16 },

    #[error("Digit {digit} repeats in row {row}")]
    RepeatedInRow { digit: u16, row: usize },

    #[error("Digit {digit} repeats in column {col}")]
    RepeatedInColumn { digit: u16, col: usize },

    #[error("Digit {digit} repeats in box {box_index}")]
    RepeatedInBox { digit: u16, box_index: usize },
}

/// Index of the 3x3 box holding `(row, col)`, numbered 0..9 left to right,
/// top to bottom.
pub fn box_index(row: usize, col: usize) -> usize {
    (row / SUDOKU_BOX_SIDE) * SUDOKU_BOX_SIDE + col / SUDOKU_BOX_SIDE
}

/// Check that `board` is a solved sudoku: 9x9, every cell a digit 1-9, and no
/// digit repeated within a row, a column or a box.
pub fn check_solution(board: &Array2<u16>) -> Result<(), SudokuViolation> {
    let (rows, cols) = board.dim();
    if rows != SUDOKU_SIDE || cols != SUDOKU_SIDE {
        return Err(SudokuViolation::Shape { rows, cols });
    }

    // Bit d set once digit d has been seen in that row/column/box.
    let mut in_row = [0u16; SUDOKU_SIDE];
    let mut in_col = [0u16; SUDOKU_SIDE];
    let mut in_box = [0u16; SUDOKU_SIDE];

    for ((row, col), &value) in board.indexed_iter() {
        if !(1..=SUDOKU_SIDE as u16).contains(&value) {
            return Err(SudokuViolation::InvalidDigit { row, col, value });
        }
        let bit = 1u16 << value;
        let b = box_index(row, col);

        if in_row[row] & bit != 0 {
            return Err(SudokuViolation::RepeatedInRow { digit: value, row });
        }
        if in_col[col] & bit != 0 {
            return Err(SudokuViolation::RepeatedInColumn { digit: value, col });
        }
        if in_box[b] & bit != 0 {
            return Err(SudokuViolation::RepeatedInBox {
                digit: value,
                box_index: b,
            });
        }
        in_row[row] |= bit;
        in_col[col] |= bit;
        in_box[b] |= bit;
    }

    Ok(())
}

pub fn is_valid_solution(board: &Array2<u16>) -> bool {
    check_solution(board).is_ok()
}
