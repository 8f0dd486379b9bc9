//! Tile size recovery from pixels alone.
//!
//! No layout is stored in the image. Every color edge in a row lies on a
//! tile boundary, so every gap between consecutive edges is a multiple of
//! the tile size, and the GCD of enough gaps is the tile size itself.

use crate::error::InferenceError;
use crate::image::RgbImage;

/// Greatest common divisor (Euclid).
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Collect the x-distance between consecutive color edges in the scanned rows.
///
/// Each row starts a run at x = 0; an edge is a pixel whose color differs from
/// its left neighbour. The trailing run of a row has no closing edge and is
/// not measured. `rows = None` scans every row.
pub fn collect_edge_gaps(image: &RgbImage, rows: Option<u32>) -> Vec<u32> {
    let nrows = rows.map_or(image.height, |n| n.min(image.height));
    let mut gaps = Vec::new();

    for y in 0..nrows {
        if image.width == 0 {
            break;
        }
        let before = gaps.len();
        let mut run_color = image.get(0, y);
        let mut run_start = 0u32;
        for x in 1..image.width {
            let color = image.get(x, y);
            if color != run_color {
                gaps.push(x - run_start);
                run_color = color;
                run_start = x;
            }
        }
        log::trace!("row {y}: {} edges", gaps.len() - before);
    }
    gaps
}

/// Reduce edge gaps to their GCD, stopping early once it reaches 1.
pub fn reduce_gaps(gaps: &[u32]) -> Option<u32> {
    let (&first, rest) = gaps.split_first()?;
    let mut size = first;
    for &gap in rest {
        size = gcd(size, gap);
        if size == 1 {
            break;
        }
    }
    Some(size)
}

/// Infer the tile edge length of a rendered grid.
///
/// Only the leading `rows` rows are scanned when given (the classic setting
/// is 5). If those rows happen to contain only runs of two or more tiles the
/// result is a multiple of the true size.
pub fn infer_tile_size(image: &RgbImage, rows: Option<u32>) -> Result<u32, InferenceError> {
    let rows_scanned = rows.map_or(image.height, |n| n.min(image.height));
    let gaps = collect_edge_gaps(image, rows);
    let size = reduce_gaps(&gaps).ok_or(InferenceError::NoColorTransition { rows_scanned })?;
    log::debug!(
        "inferred tile size {size}px from {} edge gaps in {rows_scanned} rows",
        gaps.len()
    );
    Ok(size)
}
