//! Threshold matrices for ordered dithering.
//!
//! A [`ThresholdMatrix`] is a square grid of ranks tiled over the image
//! with modulo indexing. Generated Bayer matrices hold every integer in
//! `0..n²` exactly once.

use crate::{Error, Result};

/// A square matrix of dither ranks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThresholdMatrix {
    size: usize,
    cells: Vec<u32>,
}

impl ThresholdMatrix {
    /// Builds a matrix from its rows.
    ///
    /// Fails unless the rows form a non-empty square holding each value of
    /// `0..n²` exactly once.
    pub fn new<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(Error::Matrix("matrix is empty".into()));
        }
        if let Some(row) = rows.iter().position(|r| r.as_ref().len() != size) {
            return Err(Error::Matrix(format!(
                "row {row} has {} cells, expected {size}",
                rows[row].as_ref().len()
            )));
        }

        let cells: Vec<u32> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        let mut seen = vec![false; cells.len()];
        for &v in &cells {
            match seen.get_mut(v as usize) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(Error::Matrix(format!("value {v} appears twice"))),
                None => {
                    return Err(Error::Matrix(format!(
                        "value {v} is outside 0..{}",
                        cells.len()
                    )));
                }
            }
        }

        Ok(Self { size, cells })
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size²`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true for a constructed matrix.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The rank stored at row `y`, column `x`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.cells[y * self.size + x]
    }

    /// The rank covering image position `(x, y)` when the matrix is tiled.
    #[inline]
    pub fn tiled(&self, x: usize, y: usize) -> u32 {
        self.get(x % self.size, y % self.size)
    }

    /// Gray-scale cutoff for a rank: `(rank + 0.5) * 255 / n²`.
    #[inline]
    pub fn cutoff(&self, rank: u32) -> f64 {
        (f64::from(rank) + 0.5) * 255.0 / self.cells.len() as f64
    }

    /// Rows of the matrix, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks_exact(self.size)
    }
}

/// Clustered-dot 4x4 screen, ranks growing outwards from the centre.
///
/// ```text
/// 15  8  9 16
///  7  1  2 10
///  6  4  3 11
/// 14 13 12  5
/// ```
///
/// The table is one-based, so unlike a generated matrix it holds `1..=16`
/// rather than `0..16`. It is used as published: the cell holding 16 gets a
/// cutoff above 255 and always stays black.
pub const CLUSTERED_4X4: [[u32; 4]; 4] = [
    [15, 8, 9, 16],
    [7, 1, 2, 10],
    [6, 4, 3, 11],
    [14, 13, 12, 5],
];

/// The clustered-dot 4x4 matrix as a [`ThresholdMatrix`].
pub fn clustered_4x4() -> ThresholdMatrix {
    ThresholdMatrix {
        size: 4,
        cells: CLUSTERED_4X4.iter().flatten().copied().collect(),
    }
}

/// Generates the `n x n` Bayer dispersed-dot matrix.
///
/// Starts from the `2x2` seed `[[0, 2], [3, 1]]` and expands level by level:
/// a cell with value `v` in the half-size matrix becomes `4v`, `4v + 2`,
/// `4v + 3` and `4v + 1` in the top-left, top-right, bottom-left and
/// bottom-right quadrants.
///
/// Fails unless `n` is a power of two and at least 2.
pub fn bayer(n: usize) -> Result<ThresholdMatrix> {
    if n < 2 || !n.is_power_of_two() {
        return Err(Error::BayerSize(n));
    }
    Ok(expand_bayer(n))
}

/// Bayer expansion for a size already known to be a power of two.
pub(crate) fn expand_bayer(n: usize) -> ThresholdMatrix {
    debug_assert!(n >= 2 && n.is_power_of_two());

    let mut size = 2;
    let mut cells = vec![0, 2, 3, 1];
    while size < n {
        let next = size * 2;
        let mut expanded = vec![0; next * next];
        for y in 0..size {
            for x in 0..size {
                let v = 4 * cells[y * size + x];
                expanded[y * next + x] = v;
                expanded[y * next + x + size] = v + 2;
                expanded[(y + size) * next + x] = v + 3;
                expanded[(y + size) * next + x + size] = v + 1;
            }
        }
        size = next;
        cells = expanded;
    }

    ThresholdMatrix { size, cells }
}
