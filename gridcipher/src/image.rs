use crate::types::Rgb;

/// 8-bit RGB image with row-major, tightly packed pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub width: u32,
    pub height: u32,
    /// 3 bytes per pixel, `width * height * 3` bytes.
    pub buf: Vec<u8>,
}

impl RgbImage {
    /// Create a new image filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let buf = color.0.repeat(width as usize * height as usize);
        Self { width, height, buf }
    }

    /// Create an image from existing RGB data.
    ///
    /// `buf` must contain exactly `width * height * 3` bytes.
    pub fn from_raw(width: u32, height: u32, buf: Vec<u8>) -> Self {
        assert_eq!(buf.len(), width as usize * height as usize * 3);
        Self { width, height, buf }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// Get the pixel value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        let i = self.offset(x, y);
        Rgb([self.buf[i], self.buf[i + 1], self.buf[i + 2]])
    }

    /// Fill the rectangle `[x, x + w) x [y, y + h)`, clipped to the image.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        if x >= x_end {
            return;
        }
        let row: Vec<u8> = color.0.repeat((x_end - x) as usize);
        for py in y..y_end {
            let start = self.offset(x, py);
            self.buf[start..start + row.len()].copy_from_slice(&row);
        }
    }
}
