/// An 8-bit RGB pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const GREY: Rgb = Rgb([128, 128, 128]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "({r}, {g}, {b})")
    }
}

/// The classification of one grid tile.
///
/// The RGB values are a fixed protocol: any encoder and decoder must agree
/// on them bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileColor {
    /// A data tile carrying a 1 bit (black).
    DataOne,
    /// A data tile carrying a 0 bit (grey).
    DataZero,
    /// Padding past the end of the bit sequence (white).
    Unused,
}

impl TileColor {
    /// Color for a data bit.
    pub fn for_bit(bit: bool) -> TileColor {
        if bit {
            TileColor::DataOne
        } else {
            TileColor::DataZero
        }
    }

    /// The exact pixel value painted for this tile.
    pub fn rgb(self) -> Rgb {
        match self {
            TileColor::DataOne => Rgb::BLACK,
            TileColor::DataZero => Rgb::GREY,
            TileColor::Unused => Rgb::WHITE,
        }
    }

    /// Classify a sampled pixel by exact match. Returns `None` for foreign colors.
    pub fn from_rgb(rgb: Rgb) -> Option<TileColor> {
        match rgb {
            Rgb::BLACK => Some(TileColor::DataOne),
            Rgb::GREY => Some(TileColor::DataZero),
            Rgb::WHITE => Some(TileColor::Unused),
            _ => None,
        }
    }

    /// The bit carried by this tile, if it is a data tile.
    pub fn bit(self) -> Option<bool> {
        match self {
            TileColor::DataOne => Some(true),
            TileColor::DataZero => Some(false),
            TileColor::Unused => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_colors_are_exact() {
        assert_eq!(TileColor::DataOne.rgb(), Rgb([0, 0, 0]));
        assert_eq!(TileColor::DataZero.rgb(), Rgb([128, 128, 128]));
        assert_eq!(TileColor::Unused.rgb(), Rgb([255, 255, 255]));
    }

    #[test]
    fn from_rgb_requires_exact_match() {
        assert_eq!(TileColor::from_rgb(Rgb([0, 0, 0])), Some(TileColor::DataOne));
        assert_eq!(TileColor::from_rgb(Rgb([128, 128, 128])), Some(TileColor::DataZero));
        assert_eq!(TileColor::from_rgb(Rgb([255, 255, 255])), Some(TileColor::Unused));
        assert_eq!(TileColor::from_rgb(Rgb([127, 128, 128])), None);
        assert_eq!(TileColor::from_rgb(Rgb([1, 0, 0])), None);
    }

    #[test]
    fn bits_map_to_data_colors() {
        assert_eq!(TileColor::for_bit(true).bit(), Some(true));
        assert_eq!(TileColor::for_bit(false).bit(), Some(false));
        assert_eq!(TileColor::Unused.bit(), None);
    }
}
