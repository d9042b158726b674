/// Number of bits held by one storage word of a `BitGrid`.
pub const BITS_PER_WORD: usize = u64::BITS as usize;

/// Largest maxval a PGM header may declare.
pub const PGM_MAX_MAXVAL: u16 = 65_535;

/// PGM samples above this maxval are stored as two big-endian bytes in raw files.
pub const PGM_ONE_BYTE_MAXVAL: u16 = 255;

/// Side length of a sudoku board.
pub const SUDOKU_SIDE: usize = 9;

/// Side length of one sudoku box.
pub const SUDOKU_BOX_SIDE: usize = 3;

/// Luma written for a set bit in exported previews.
pub const PREVIEW_INK: u8 = 0;

/// Luma written for a cleared bit in exported previews.
pub const PREVIEW_PAPER: u8 = 255;
