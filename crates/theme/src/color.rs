//! Color parsing, blending and easing.
//!
//! Every function here is total: malformed input falls back to returning
//! the first color unchanged instead of failing.

use regex::Regex;
use std::sync::OnceLock;

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Encode as `#rrggbb`.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }
}

/// Functional `rgb()`/`rgba()` color with unrounded channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Parse `#rrggbb` (the `#` is optional, digits are case-insensitive).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    Some(Rgb {
        r: u8::from_str_radix(&digits[0..2], 16).ok()?,
        g: u8::from_str_radix(&digits[2..4], 16).ok()?,
        b: u8::from_str_radix(&digits[4..6], 16).ok()?,
    })
}

/// Encode channels as lowercase, zero-padded `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn rgba_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"rgba?\(([^)]+)\)").expect("rgba pattern is valid"))
}

/// Parse the first `rgb(...)` or `rgba(...)` found in `input`.
///
/// At least three numeric components are required; alpha defaults to 1.0.
pub fn parse_rgba(input: &str) -> Option<Rgba> {
    let captures = rgba_pattern().captures(input)?;
    let values = captures[1]
        .split(',')
        .map(|v| v.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;

    if values.len() < 3 {
        return None;
    }

    Some(Rgba {
        r: values[0],
        g: values[1],
        b: values[2],
        a: values.get(3).copied().unwrap_or(1.0),
    })
}

fn lerp(from: f64, to: f64, ratio: f64) -> f64 {
    from + (to - from) * ratio
}

fn lerp_channel(from: f64, to: f64, ratio: f64) -> u8 {
    lerp(from, to, ratio).round().clamp(0.0, 255.0) as u8
}

/// Interpolate two hex colors channel by channel.
///
/// Returns `from` unchanged when either input is not a valid hex color.
pub fn blend_hex(from: &str, to: &str, ratio: f64) -> String {
    let (Some(a), Some(b)) = (hex_to_rgb(from), hex_to_rgb(to)) else {
        return from.to_string();
    };

    rgb_to_hex(
        lerp_channel(a.r.into(), b.r.into(), ratio),
        lerp_channel(a.g.into(), b.g.into(), ratio),
        lerp_channel(a.b.into(), b.b.into(), ratio),
    )
}

/// Interpolate two `rgb()`/`rgba()` colors, alpha included.
///
/// Output is always `rgba(r, g, b, a)` with alpha at three decimals.
/// Returns `from` unchanged when either input does not parse.
pub fn blend_rgba(from: &str, to: &str, ratio: f64) -> String {
    let (Some(a), Some(b)) = (parse_rgba(from), parse_rgba(to)) else {
        return from.to_string();
    };

    format!(
        "rgba({}, {}, {}, {:.3})",
        lerp_channel(a.r, b.r, ratio),
        lerp_channel(a.g, b.g, ratio),
        lerp_channel(a.b, b.b, ratio),
        lerp(a.a, b.a, ratio).clamp(0.0, 1.0),
    )
}

/// Cubic ease-in-out: slow start, slow finish, symmetric around 0.5.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#ffffff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(hex_to_rgb("#ECBB4F"), Some(Rgb::new(236, 187, 79)));
        assert_eq!(hex_to_rgb("1a1a1a"), Some(Rgb::new(26, 26, 26)));
    }

    #[test]
    fn test_hex_to_rgb_rejects_malformed() {
        assert_eq!(hex_to_rgb("not-a-color"), None);
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#fffffff"), None);
        assert_eq!(hex_to_rgb("#gggggg"), None);
        assert_eq!(hex_to_rgb("##ffffff"), None);
        assert_eq!(hex_to_rgb(""), None);
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(255, 255, 255), "#ffffff");
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
        assert_eq!(rgb_to_hex(1, 10, 171), "#010aab");
        assert_eq!(Rgb::new(212, 175, 55).to_hex(), "#d4af37");
    }

    #[test]
    fn test_hex_round_trip_all_channels() {
        for r in 0..=255u8 {
            for g in 0..=255u8 {
                for b in [0u8, 1, 79, 128, 254, 255] {
                    let hex = rgb_to_hex(r, g, b);
                    assert_eq!(hex_to_rgb(&hex), Some(Rgb::new(r, g, b)), "{}", hex);
                }
            }
        }
    }

    #[test]
    fn test_blend_hex_midpoint() {
        assert_eq!(blend_hex("#ffffff", "#000000", 0.5), "#808080");
        assert_eq!(blend_hex("#000000", "#ffffff", 0.5), "#808080");
    }

    #[test]
    fn test_blend_hex_endpoints() {
        assert_eq!(blend_hex("#ecbb4f", "#d4af37", 0.0), "#ecbb4f");
        assert_eq!(blend_hex("#ecbb4f", "#d4af37", 1.0), "#d4af37");
    }

    #[test]
    fn test_blend_hex_clamps_channels() {
        assert_eq!(blend_hex("#000000", "#ffffff", 2.0), "#ffffff");
        assert_eq!(blend_hex("#000000", "#ffffff", -1.0), "#000000");
    }

    #[test]
    fn test_blend_hex_malformed_returns_first() {
        assert_eq!(blend_hex("not-a-color", "#000000", 0.5), "not-a-color");
        assert_eq!(blend_hex("#ffffff", "black", 0.5), "#ffffff");
    }

    #[test]
    fn test_parse_rgba() {
        let c = parse_rgba("rgba(236, 187, 79, 0.1)").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (236.0, 187.0, 79.0, 0.1));

        let opaque = parse_rgba("rgb(1,2,3)").unwrap();
        assert_eq!(opaque.a, 1.0);

        assert!(parse_rgba("rgba(1, 2)").is_none());
        assert!(parse_rgba("rgba(a, b, c, d)").is_none());
        assert!(parse_rgba("#ffffff").is_none());
    }

    #[test]
    fn test_blend_rgba() {
        assert_eq!(
            blend_rgba("rgba(236, 187, 79, 0.1)", "rgba(212, 175, 55, 0.15)", 0.5),
            "rgba(224, 181, 67, 0.125)"
        );
        assert_eq!(
            blend_rgba("rgba(0, 0, 0, 0)", "rgba(255, 255, 255, 1)", 1.0),
            "rgba(255, 255, 255, 1.000)"
        );
    }

    #[test]
    fn test_blend_rgba_malformed_returns_first() {
        assert_eq!(blend_rgba("shadow", "rgba(0, 0, 0, 1)", 0.5), "shadow");
        assert_eq!(
            blend_rgba("rgba(0, 0, 0, 1)", "none", 0.5),
            "rgba(0, 0, 0, 1)"
        );
    }

    #[test]
    fn test_ease_in_out_cubic_boundaries() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
    }

    #[test]
    fn test_ease_in_out_cubic_symmetric_and_monotonic() {
        let mut previous = 0.0;
        for i in 1..=100 {
            let t = i as f64 / 100.0;
            let eased = ease_in_out_cubic(t);
            assert!(eased >= previous);
            assert!((eased + ease_in_out_cubic(1.0 - t) - 1.0).abs() < 1e-12);
            previous = eased;
        }
    }
}
