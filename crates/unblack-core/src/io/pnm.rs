use std::fmt;
use std::io::{Read, Write};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bitgrid::BitGrid;
use crate::consts::{PGM_MAX_MAXVAL, PGM_ONE_BYTE_MAXVAL};
use crate::error::{Result, UnblackError};

/// Encoding used when writing a PBM file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PbmFormat {
    /// `P1`: ASCII digits, one text line per row.
    #[default]
    Plain,
    /// `P4`: eight pixels per byte, rows padded to a byte boundary.
    Raw,
}

impl fmt::Display for PbmFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "Plain (P1)"),
            Self::Raw => write!(f, "Raw (P4)"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PnmKind {
    PlainPbm,
    PlainPgm,
    RawPbm,
    RawPgm,
}

impl PnmKind {
    fn from_magic(magic: &[u8]) -> Result<Self> {
        match magic {
            b"P1" => Ok(Self::PlainPbm),
            b"P2" => Ok(Self::PlainPgm),
            b"P4" => Ok(Self::RawPbm),
            b"P5" => Ok(Self::RawPgm),
            _ => Err(UnblackError::InvalidPnm(format!(
                "unsupported magic number {:?}",
                String::from_utf8_lossy(magic)
            ))),
        }
    }
}

/// Parsed PNM header.
#[derive(Clone, Copy, Debug)]
struct PnmHeader {
    kind: PnmKind,
    width: u32,
    height: u32,
    /// 1 for bitmaps.
    maxval: u16,
}

impl PnmHeader {
    fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Byte cursor over a fully buffered PNM stream.
struct Scanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Skip whitespace and `#` comments, which run to the end of the line.
    fn skip_filler(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn magic(&mut self) -> Result<PnmKind> {
        let magic = self
            .data
            .get(..2)
            .ok_or_else(|| UnblackError::InvalidPnm("missing magic number".into()))?;
        let kind = PnmKind::from_magic(magic)?;
        self.pos = 2;
        Ok(kind)
    }

    fn uint(&mut self, field: &str) -> Result<u32> {
        self.skip_filler();
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(&b) = self.data.get(self.pos) {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u32::from(b - b'0')))
                .ok_or_else(|| UnblackError::InvalidPnm(format!("{field} is too large")))?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(UnblackError::InvalidPnm(format!("expected {field}")));
        }
        Ok(value)
    }

    /// Raw rasters begin after exactly one whitespace byte.
    fn raster_separator(&mut self) -> Result<()> {
        match self.data.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(UnblackError::InvalidPnm(
                "expected whitespace before raster".into(),
            )),
        }
    }

    fn header(&mut self) -> Result<PnmHeader> {
        let kind = self.magic()?;
        let width = self.uint("width")?;
        let height = self.uint("height")?;
        if width == 0 || height == 0 {
            return Err(UnblackError::InvalidDimensions {
                rows: height as isize,
                cols: width as isize,
            });
        }

        let maxval = match kind {
            PnmKind::PlainPbm | PnmKind::RawPbm => 1,
            PnmKind::PlainPgm | PnmKind::RawPgm => {
                let maxval = self.uint("maxval")?;
                if maxval == 0 || maxval > u32::from(PGM_MAX_MAXVAL) {
                    return Err(UnblackError::InvalidPnm(format!(
                        "maxval {maxval} outside 1..={PGM_MAX_MAXVAL}"
                    )));
                }
                maxval as u16
            }
        };

        if matches!(kind, PnmKind::RawPbm | PnmKind::RawPgm) {
            self.raster_separator()?;
        }

        debug!(?kind, width, height, maxval, "Parsed PNM header");
        Ok(PnmHeader {
            kind,
            width,
            height,
            maxval,
        })
    }

    /// Next plain-PBM pixel. Separators between pixels are optional.
    fn plain_bit(&mut self) -> Option<Result<bool>> {
        self.skip_filler();
        let b = *self.data.get(self.pos)?;
        self.pos += 1;
        match b {
            b'0' => Some(Ok(false)),
            b'1' => Some(Ok(true)),
            other => Some(Err(UnblackError::InvalidPnm(format!(
                "unexpected byte {:?} in bitmap raster",
                other as char
            )))),
        }
    }
}

fn read_all<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(data)
}

/// Read a PBM bitmap (`P1` or `P4`) into a new grid.
///
/// A pixel value of 1 (black) becomes a set bit. Data after the last pixel
/// is ignored.
pub fn read_pbm<R: Read>(reader: R) -> Result<BitGrid> {
    let data = read_all(reader)?;
    let mut scanner = Scanner::new(&data);
    let header = scanner.header()?;
    let expected = header.pixel_count();

    let bits = match header.kind {
        PnmKind::PlainPbm => {
            // The header is untrusted until the raster proves it.
            let mut bits = Vec::with_capacity(expected.min(scanner.remaining().len()));
            while bits.len() < expected {
                match scanner.plain_bit() {
                    Some(bit) => bits.push(bit?),
                    None => {
                        return Err(UnblackError::PixelCount {
                            expected,
                            actual: bits.len(),
                        })
                    }
                }
            }
            bits
        }
        PnmKind::RawPbm => unpack_rows(
            scanner.remaining(),
            header.width as usize,
            header.height as usize,
        )?,
        PnmKind::PlainPgm | PnmKind::RawPgm => {
            return Err(UnblackError::InvalidPnm(
                "expected a PBM bitmap, found a PGM graymap".into(),
            ))
        }
    };

    BitGrid::from_bits(header.height as isize, header.width as isize, bits)
}

/// Unpack `P4` rows: most significant bit first, each row padded to whole bytes.
fn unpack_rows(raster: &[u8], width: usize, height: usize) -> Result<Vec<bool>> {
    let row_bytes = width.div_ceil(8);
    let available_rows = raster.len() / row_bytes;
    if available_rows < height {
        let partial = (raster.len() % row_bytes * 8).min(width);
        return Err(UnblackError::PixelCount {
            expected: width * height,
            actual: available_rows * width + partial,
        });
    }

    let mut bits = Vec::with_capacity(width * height);
    for row in raster.chunks_exact(row_bytes).take(height) {
        for col in 0..width {
            bits.push(row[col / 8] >> (7 - col % 8) & 1 == 1);
        }
    }
    Ok(bits)
}

/// Write a grid as a PBM bitmap.
///
/// The plain form is the `P1` header line, a `"<width> <height>"` line, then
/// one line of space-separated `0`/`1` values per grid row.
pub fn write_pbm<W: Write>(grid: &BitGrid, mut writer: W, format: PbmFormat) -> Result<()> {
    let (w, h) = (grid.width(), grid.height());
    let mut bits = grid.iter_row_major();

    match format {
        PbmFormat::Plain => {
            writeln!(writer, "P1")?;
            writeln!(writer, "{w} {h}")?;
            let mut line = String::with_capacity(w * 2);
            for _ in 0..h {
                line.clear();
                for (col, bit) in bits.by_ref().take(w).enumerate() {
                    if col > 0 {
                        line.push(' ');
                    }
                    line.push(if bit { '1' } else { '0' });
                }
                writeln!(writer, "{line}")?;
            }
        }
        PbmFormat::Raw => {
            write!(writer, "P4\n{w} {h}\n")?;
            let mut row = vec![0u8; w.div_ceil(8)];
            for _ in 0..h {
                row.fill(0);
                for (col, bit) in bits.by_ref().take(w).enumerate() {
                    if bit {
                        row[col / 8] |= 0x80 >> (col % 8);
                    }
                }
                writer.write_all(&row)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Read a PGM graymap (`P2` or `P5`) into an array of shape `(height, width)`.
///
/// Samples larger than the header's maxval are rejected.
pub fn read_pgm<R: Read>(reader: R) -> Result<Array2<u16>> {
    let data = read_all(reader)?;
    let mut scanner = Scanner::new(&data);
    let header = scanner.header()?;
    let expected = header.pixel_count();
    let maxval = header.maxval;

    let samples: Vec<u16> = match header.kind {
        PnmKind::PlainPgm => {
            let mut samples = Vec::with_capacity(expected.min(scanner.remaining().len()));
            while samples.len() < expected {
                scanner.skip_filler();
                if scanner.remaining().is_empty() {
                    return Err(UnblackError::PixelCount {
                        expected,
                        actual: samples.len(),
                    });
                }
                let v = scanner.uint("sample")?;
                samples.push(checked_sample(v, maxval)?);
            }
            samples
        }
        PnmKind::RawPgm => {
            let sample_bytes = if maxval > PGM_ONE_BYTE_MAXVAL { 2 } else { 1 };
            let raster = scanner.remaining();
            if raster.len() / sample_bytes < expected {
                return Err(UnblackError::PixelCount {
                    expected,
                    actual: raster.len() / sample_bytes,
                });
            }
            if sample_bytes == 2 {
                raster
                    .chunks_exact(2)
                    .take(expected)
                    .map(|pair| {
                        let v = u16::from_be_bytes([pair[0], pair[1]]);
                        checked_sample(u32::from(v), maxval)
                    })
                    .collect::<Result<_>>()?
            } else {
                raster
                    .iter()
                    .take(expected)
                    .map(|&b| checked_sample(u32::from(b), maxval))
                    .collect::<Result<_>>()?
            }
        }
        PnmKind::PlainPbm | PnmKind::RawPbm => {
            return Err(UnblackError::InvalidPnm(
                "expected a PGM graymap, found a PBM bitmap".into(),
            ))
        }
    };

    Array2::from_shape_vec((header.height as usize, header.width as usize), samples)
        .map_err(|e| UnblackError::InvalidPnm(e.to_string()))
}

fn checked_sample(value: u32, maxval: u16) -> Result<u16> {
    if value > u32::from(maxval) {
        return Err(UnblackError::InvalidPnm(format!(
            "sample {value} exceeds maxval {maxval}"
        )));
    }
    Ok(value as u16)
}
