//! Colors and colormaps used by the charts.

use anyhow::{Result, bail};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// matplotlib's default categorical palette.
pub static TAB10: [(&str, RGBColor); 10] = [
    ("tab:blue", RGBColor(31, 119, 180)),
    ("tab:orange", RGBColor(255, 127, 14)),
    ("tab:green", RGBColor(44, 160, 44)),
    ("tab:red", RGBColor(214, 39, 40)),
    ("tab:purple", RGBColor(148, 103, 189)),
    ("tab:brown", RGBColor(140, 86, 75)),
    ("tab:pink", RGBColor(227, 119, 194)),
    ("tab:gray", RGBColor(127, 127, 127)),
    ("tab:olive", RGBColor(188, 189, 34)),
    ("tab:cyan", RGBColor(23, 190, 207)),
];

/// Low and high experience bucket colors.
pub static EXPERIENCE_BUCKET_COLORS: [RGBColor; 2] =
    [RGBColor(0xFF, 0x99, 0x99), RGBColor(0x66, 0xC2, 0xA5)];

static VIRIDIS: [RGBColor; 5] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
];

static COOLWARM: [RGBColor; 5] = [
    RGBColor(59, 76, 192),
    RGBColor(141, 176, 254),
    RGBColor(221, 221, 221),
    RGBColor(244, 154, 123),
    RGBColor(180, 4, 38),
];

static RD_YL_GN: [RGBColor; 5] = [
    RGBColor(165, 0, 38),
    RGBColor(244, 109, 67),
    RGBColor(255, 255, 191),
    RGBColor(102, 189, 99),
    RGBColor(0, 104, 55),
];

/// Continuous colormaps a location report may use for its distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Colormap {
    #[default]
    #[serde(rename = "viridis")]
    Viridis,
    #[serde(rename = "coolwarm")]
    Coolwarm,
    #[serde(rename = "RdYlGn")]
    RdYlGn,
}

impl Colormap {
    fn stops(self) -> &'static [RGBColor] {
        match self {
            Colormap::Viridis => &VIRIDIS,
            Colormap::Coolwarm => &COOLWARM,
            Colormap::RdYlGn => &RD_YL_GN,
        }
    }

    /// `n` colors evenly spaced over the map, first stop to last.
    pub fn sample(self, n: usize) -> Vec<RGBColor> {
        let stops = self.stops();
        match n {
            0 => Vec::new(),
            1 => vec![stops[0]],
            _ => (0..n)
                .map(|i| interpolate(stops, i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

fn interpolate(stops: &[RGBColor], t: f64) -> RGBColor {
    let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(stops.len() - 1);
    let frac = scaled - lo as f64;

    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    let (a, b) = (stops[lo], stops[hi]);
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Categorical color for the `i`th series, cycling through [`TAB10`].
pub fn categorical(i: usize) -> RGBColor {
    TAB10[i % TAB10.len()].1
}

/// Parses a `tab:` palette name or a `#rrggbb` hex color.
pub fn parse_color(spec: &str) -> Result<RGBColor> {
    if let Some((_, color)) = TAB10.iter().find(|(name, _)| *name == spec) {
        return Ok(*color);
    }

    let Some(hex) = spec.strip_prefix('#') else {
        bail!("unknown color {spec:?}: expected a tab: name or #rrggbb");
    };
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("invalid hex color {spec:?}");
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
