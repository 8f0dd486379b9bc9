//! PNG reading and writing for grid images.

use anyhow::{Context, Result};
use gridcipher::image::RgbImage;
use std::path::{Path, PathBuf};

/// Append `.png` unless the path already ends in it.
pub fn with_png_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("png") => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".png");
            PathBuf::from(name)
        }
    }
}

/// Write an RGB grid image as an 8-bit PNG.
pub fn write_grid_png(image: &RgbImage, path: &Path) -> Result<()> {
    let file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let w = std::io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, image.width, image.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("writing PNG header for {}", path.display()))?;
    writer
        .write_image_data(&image.buf)
        .with_context(|| format!("writing PNG data for {}", path.display()))?;

    Ok(())
}

/// Load any supported image and convert it to 8-bit RGB.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to open image: {}", path.display()))?
        .into_rgb8();

    let width = img.width();
    let height = img.height();
    Ok(RgbImage::from_raw(width, height, img.into_raw()))
}
