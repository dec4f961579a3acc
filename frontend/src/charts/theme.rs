use plotters::style::RGBColor;

/// Brand palette shared by every chart on the site.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub primary: &'static str,
    pub primary_light: &'static str,
    pub primary_dark: &'static str,
    pub white: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#7FB069",
            primary_light: "#94C37F",
            primary_dark: "#6BA055",
            white: "#ffffff",
        }
    }
}

/// Chart-wide defaults passed explicitly to every render call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub font_family: &'static str,
    pub font_size: u32,
    pub text_color: &'static str,
    pub tick_color: &'static str,
    pub grid_color: &'static str,
    pub palette: Palette,
    /// Series colours for the demo comparison charts (current, optimized).
    pub comparison: [&'static str; 2],
    pub efficiency: [&'static str; 3],
    pub savings: [&'static str; 4],
    /// Fill opacity under line series.
    pub area_opacity: f64,
    pub line_width: u32,
    pub point_radius: u32,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            font_family: "Inter, Segoe UI, Tahoma, Geneva, Verdana, sans-serif",
            font_size: 12,
            text_color: "#374151",
            tick_color: "#a0aec0",
            grid_color: "#f0fdf4",
            palette: Palette::default(),
            comparison: ["#f56565", "#4299e1"],
            efficiency: ["#48bb78", "#f56565", "#ed8936"],
            savings: ["#4299e1", "#3182ce", "#63b3ed", "#90cdf4"],
            area_opacity: 0.1,
            line_width: 3,
            point_radius: 6,
        }
    }
}

impl ChartTheme {
    /// Colours for the showcase charts, cycling through the green shades.
    pub fn greens(&self) -> [&'static str; 3] {
        [self.palette.primary, self.palette.primary_light, self.palette.primary_dark]
    }

    pub fn node_series(&self) -> [&'static str; 4] {
        [
            self.palette.primary,
            self.palette.primary_light,
            self.palette.primary_dark,
            self.palette.primary,
        ]
    }

    pub fn color(&self, hex: &str) -> RGBColor {
        parse_hex(hex).unwrap_or(RGBColor(0x37, 0x41, 0x51))
    }
}

/// Parses `#rrggbb` or `#rgb`.
pub fn parse_hex(hex: &str) -> Option<RGBColor> {
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        6 => Some(RGBColor(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        3 => {
            let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
            Some(RGBColor(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_hex("#7FB069"), Some(RGBColor(0x7f, 0xb0, 0x69)));
        assert_eq!(parse_hex("#fff"), Some(RGBColor(255, 255, 255)));
        assert_eq!(parse_hex("7FB069"), None);
        assert_eq!(parse_hex("#7FB06"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
        assert_eq!(parse_hex("#é12"), None);
    }

    #[test]
    fn theme_colours_are_all_valid() {
        let theme = ChartTheme::default();
        let p = &theme.palette;
        for hex in [p.primary, p.primary_light, p.primary_dark, p.white]
            .iter()
            .chain(theme.comparison.iter())
            .chain(theme.efficiency.iter())
            .chain(theme.savings.iter())
            .chain([theme.text_color, theme.tick_color, theme.grid_color].iter())
        {
            assert!(parse_hex(hex).is_some(), "{}", hex);
        }
    }
}
