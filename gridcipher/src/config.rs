/// Default edge length budget for rendered images, in pixels.
pub const DEFAULT_MAX_BUDGET: u32 = 400;

/// Number of leading rows the classic decoder scans for tile edges.
pub const LEGACY_SCAN_ROWS: u32 = 5;

/// What the reader does with a tile whose color is not one of the three protocol colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorPolicy {
    /// Treat it like an unused tile and end the scan.
    #[default]
    Lenient,
    /// Fail with `UnrecognizedTileColor`.
    Strict,
}

/// Settings shared by the encoder and decoder pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecConfig {
    /// Maximum rendered image edge length in pixels.
    pub max_budget: u32,
    /// Leading rows scanned for tile size inference. `None` scans the whole image.
    pub scan_rows: Option<u32>,
    pub color_policy: ColorPolicy,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_budget: DEFAULT_MAX_BUDGET,
            scan_rows: None,
            color_policy: ColorPolicy::Lenient,
        }
    }
}

impl CodecConfig {
    /// Settings matching the classic decoder: 5 scanned rows, lenient colors.
    pub fn legacy() -> Self {
        Self {
            scan_rows: Some(LEGACY_SCAN_ROWS),
            ..Self::default()
        }
    }

    /// Parse a TOML document. Missing keys take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.max_budget, 400);
        assert_eq!(config.scan_rows, None);
        assert_eq!(config.color_policy, ColorPolicy::Lenient);
    }

    #[test]
    fn legacy_scans_five_rows() {
        let config = CodecConfig::legacy();
        assert_eq!(config.scan_rows, Some(5));
        assert_eq!(config.max_budget, DEFAULT_MAX_BUDGET);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parse_partial_toml() {
        let config = CodecConfig::from_toml_str("max_budget = 800\ncolor_policy = \"strict\"\n").unwrap();
        assert_eq!(config.max_budget, 800);
        assert_eq!(config.scan_rows, None);
        assert_eq!(config.color_policy, ColorPolicy::Strict);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parse_scan_rows() {
        let config = CodecConfig::from_toml_str("scan_rows = 5").unwrap();
        assert_eq!(config, CodecConfig::legacy());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parse_rejects_bad_policy() {
        assert!(CodecConfig::from_toml_str("color_policy = \"loose\"").is_err());
    }
}
