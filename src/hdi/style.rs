/// Visual category of a region on the development-index map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorBand {
    VeryHigh, // >= 0.90
    High,     // [0.80, 0.90)
    Medium,   // [0.70, 0.80)
    Low,      // [0.60, 0.70)
    VeryLow,  // < 0.60
    Unknown,  // not in the index table
}

impl ColorBand {
    /// Bands shown in the legend, highest first
    pub const LEGEND: [ColorBand; 5] = [
        ColorBand::VeryHigh,
        ColorBand::High,
        ColorBand::Medium,
        ColorBand::Low,
        ColorBand::VeryLow,
    ];

    /// Select a band from an index value (half-open thresholds)
    pub fn from_index(value: f64) -> Self {
        if value >= 0.90 {
            ColorBand::VeryHigh
        } else if value >= 0.80 {
            ColorBand::High
        } else if value >= 0.70 {
            ColorBand::Medium
        } else if value >= 0.60 {
            ColorBand::Low
        } else {
            ColorBand::VeryLow
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            ColorBand::VeryHigh => "#2c7bb6",
            ColorBand::High => "#abd9e9",
            ColorBand::Medium => "#ffffbf",
            ColorBand::Low => "#fdae61",
            ColorBand::VeryLow => "#d7191c",
            ColorBand::Unknown => "#e0e0e0",
        }
    }

    /// Legend label
    pub fn label(self) -> &'static str {
        match self {
            ColorBand::VeryHigh => "Très élevé (≥ 0.9)",
            ColorBand::High => "Élevé (0.8–0.9)",
            ColorBand::Medium => "Moyen (0.7–0.8)",
            ColorBand::Low => "Faible (0.6–0.7)",
            ColorBand::VeryLow => "Très faible (< 0.6)",
            ColorBand::Unknown => "Non renseigné",
        }
    }
}

/// Fill and border style of one map region
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionStyle {
    pub fill_color: &'static str,
    pub border_color: &'static str,
    pub border_weight: f32,
    pub fill_opacity: f32,
}

impl RegionStyle {
    /// Style for the hovered or selected region
    pub const HIGHLIGHT: RegionStyle = RegionStyle {
        fill_color: "#ffcc66",
        border_color: "#333",
        border_weight: 1.0,
        fill_opacity: 0.9,
    };

    pub fn for_band(band: ColorBand) -> Self {
        Self {
            fill_color: band.hex(),
            border_color: "#555",
            border_weight: 0.4,
            fill_opacity: 0.8,
        }
    }

    /// Borders of weight 1 and above are drawn thick
    pub fn is_thick(&self) -> bool {
        self.border_weight >= 1.0
    }

    /// Fill color composited over a background at this style's opacity
    pub fn blended_fill(&self, background: (u8, u8, u8)) -> (u8, u8, u8) {
        let fill = parse_hex(self.fill_color).unwrap_or(background);
        let a = self.fill_opacity.clamp(0.0, 1.0);
        let mix = |f: u8, b: u8| (f as f32 * a + b as f32 * (1.0 - a)).round() as u8;
        (
            mix(fill.0, background.0),
            mix(fill.1, background.1),
            mix(fill.2, background.2),
        )
    }
}

/// Parse `#rgb` or `#rrggbb` into an RGB triple
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    match digits.len() {
        3 => {
            let mut it = digits.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((it.next()??, it.next()??, it.next()??))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_hex() {
        assert_eq!(ColorBand::VeryHigh.hex(), "#2c7bb6");
        assert_eq!(ColorBand::High.hex(), "#abd9e9");
        assert_eq!(ColorBand::Medium.hex(), "#ffffbf");
        assert_eq!(ColorBand::Low.hex(), "#fdae61");
        assert_eq!(ColorBand::VeryLow.hex(), "#d7191c");
        assert_eq!(ColorBand::Unknown.hex(), "#e0e0e0");
    }

    #[test]
    fn test_default_and_highlight_style() {
        let style = RegionStyle::for_band(ColorBand::Low);
        assert_eq!(style.fill_color, "#fdae61");
        assert_eq!(style.border_color, "#555");
        assert_eq!(style.border_weight, 0.4);
        assert_eq!(style.fill_opacity, 0.8);
        assert!(!style.is_thick());

        let hl = RegionStyle::HIGHLIGHT;
        assert_eq!(hl.fill_color, "#ffcc66");
        assert_eq!(hl.border_color, "#333");
        assert_eq!(hl.border_weight, 1.0);
        assert_eq!(hl.fill_opacity, 0.9);
        assert!(hl.is_thick());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#555"), Some((0x55, 0x55, 0x55)));
        assert_eq!(parse_hex("#2c7bb6"), Some((0x2c, 0x7b, 0xb6)));
        assert_eq!(parse_hex("2c7bb6"), None);
        assert_eq!(parse_hex("#zz0000"), None);
        assert_eq!(parse_hex("#12345"), None);
    }

    #[test]
    fn test_blend() {
        let opaque = RegionStyle {
            fill_opacity: 1.0,
            ..RegionStyle::for_band(ColorBand::VeryLow)
        };
        assert_eq!(opaque.blended_fill((0, 0, 0)), (0xd7, 0x19, 0x1c));

        let clear = RegionStyle {
            fill_opacity: 0.0,
            ..RegionStyle::for_band(ColorBand::VeryLow)
        };
        assert_eq!(clear.blended_fill((10, 20, 30)), (10, 20, 30));
    }
}
