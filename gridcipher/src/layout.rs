use crate::error::LayoutError;

/// Placement of a bit sequence on a square tile grid.
///
/// Derived once per encode call from the bit count and the pixel budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Tiles per row and per column.
    pub dimension: u32,
    /// Pixel edge length of one tile.
    pub tile_size: u32,
    /// Number of data tiles. Tiles at index `>= bit_count` are padding.
    pub bit_count: usize,
}

impl GridLayout {
    /// Plan the smallest square grid holding `bit_count` tiles inside `max_budget` pixels.
    ///
    /// `dimension = ceil(sqrt(bit_count))`, `tile_size = max_budget / dimension`.
    pub fn plan(bit_count: usize, max_budget: u32) -> Result<GridLayout, LayoutError> {
        if bit_count == 0 {
            return Err(LayoutError::EmptyPayload);
        }
        let dimension = ceil_sqrt(bit_count);
        let tile_size = u32::try_from(dimension).map_or(0, |d| max_budget / d);
        if tile_size < 1 {
            return Err(LayoutError::Infeasible {
                bits: bit_count,
                grid: dimension,
                budget: max_budget,
            });
        }
        let dimension = dimension as u32;
        log::debug!(
            "planned {bit_count} bits as {dimension}x{dimension} tiles of {tile_size}px"
        );
        Ok(GridLayout {
            dimension,
            tile_size,
            bit_count,
        })
    }

    /// Edge length of the rendered image in pixels.
    pub fn image_size(&self) -> u32 {
        self.dimension * self.tile_size
    }

    /// Total number of tiles, data and padding.
    pub fn tile_count(&self) -> usize {
        self.dimension as usize * self.dimension as usize
    }

    /// Grid position `(row, col)` of a row-major tile index.
    pub fn position(&self, index: usize) -> (u32, u32) {
        let s = self.dimension as usize;
        ((index / s) as u32, (index % s) as u32)
    }
}

/// Smallest `s` with `s * s >= n`.
pub fn ceil_sqrt(n: usize) -> usize {
    let mut s = (n as f64).sqrt() as usize;
    while s.saturating_mul(s) < n {
        s += 1;
    }
    while s > 0 && (s - 1) * (s - 1) >= n {
        s -= 1;
    }
    s
}
