pub mod bitgrid;
pub mod config;
pub mod consts;
pub mod edge_clear;
pub mod error;
pub mod io;
pub mod sudoku;

pub use bitgrid::BitGrid;
pub use config::{ClearConfig, TraversalOrder};
pub use edge_clear::{clear_edges, clear_edges_with, ClearStats};
pub use error::{Result, UnblackError};
