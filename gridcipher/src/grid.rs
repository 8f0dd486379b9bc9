use crate::bits;
use crate::config::{CodecConfig, ColorPolicy};
use crate::error::{Error, LayoutError, ReadError};
use crate::image::RgbImage;
use crate::infer;
use crate::layout::GridLayout;
use crate::types::TileColor;

/// Paint a bit sequence onto a new image according to `layout`.
///
/// Tile `k` (row-major) covers `[col * t, row * t]` to `[(col + 1) * t, (row + 1) * t)`
/// and is black for 1, grey for 0, and white past the end of `bits`.
pub fn render_grid(layout: &GridLayout, bits: &[bool]) -> RgbImage {
    let size = layout.image_size();
    let t = layout.tile_size;
    let mut image = RgbImage::filled(size, size, TileColor::Unused.rgb());

    for (index, &bit) in bits.iter().take(layout.tile_count()).enumerate() {
        let (row, col) = layout.position(index);
        image.fill_rect(col * t, row * t, t, t, TileColor::for_bit(bit).rgb());
    }
    image
}

/// Sample tile centers in row-major order and read back the bit sequence.
///
/// The grid dimension is `width / tile_size`. The scan ends at the first
/// unused tile, which is how the bit count is recovered. Tiles whose center
/// falls below the image also end the scan.
pub fn read_grid(
    image: &RgbImage,
    tile_size: u32,
    policy: ColorPolicy,
) -> Result<Vec<bool>, ReadError> {
    if tile_size == 0 {
        return Ok(Vec::new());
    }
    let dimension = image.width / tile_size;
    let half = tile_size / 2;
    let mut bits = Vec::new();

    'rows: for row in 0..dimension {
        let y = row * tile_size + half;
        if y >= image.height {
            break;
        }
        for col in 0..dimension {
            let x = col * tile_size + half;
            let color = image.get(x, y);
            match TileColor::from_rgb(color).map(TileColor::bit) {
                Some(Some(bit)) => bits.push(bit),
                Some(None) => break 'rows,
                None => match policy {
                    ColorPolicy::Lenient => break 'rows,
                    ColorPolicy::Strict => {
                        log::warn!("foreign color {color} at tile ({row}, {col})");
                        return Err(ReadError::UnrecognizedTileColor { row, col, color });
                    }
                },
            }
        }
    }
    Ok(bits)
}

/// What a decoder recovers from an image before any decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridScan {
    pub tile_size: u32,
    pub dimension: u32,
    pub bits: Vec<bool>,
}

impl GridScan {
    /// Complete bytes carried by the scanned bits.
    pub fn bytes(&self) -> Vec<u8> {
        bits::bits_to_bytes(&self.bits)
    }
}

/// Infer the tile size and read all data tiles of an image.
pub fn scan_grid(image: &RgbImage, config: &CodecConfig) -> Result<GridScan, Error> {
    let tile_size = infer::infer_tile_size(image, config.scan_rows)?;
    let bits = read_grid(image, tile_size, config.color_policy)?;
    log::debug!("read {} data tiles", bits.len());
    Ok(GridScan {
        tile_size,
        dimension: image.width / tile_size,
        bits,
    })
}

/// Render raw bytes without any cipher.
pub fn encode_payload(
    bytes: &[u8],
    max_budget: u32,
) -> Result<(GridLayout, RgbImage), LayoutError> {
    let bits = bits::bytes_to_bits(bytes);
    let layout = GridLayout::plan(bits.len(), max_budget)?;
    let image = render_grid(&layout, &bits);
    Ok((layout, image))
}

/// Recover raw bytes from an image without any cipher.
pub fn decode_payload(image: &RgbImage, config: &CodecConfig) -> Result<Vec<u8>, Error> {
    Ok(scan_grid(image, config)?.bytes())
}
