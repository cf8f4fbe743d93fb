//! Temperature-to-colour mapping

use crate::core::math::bracket;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colour anchored at a temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub at: f64,
    pub color: Color,
}

/// Blue when cold, green in the comfortable middle, red when hot
pub const DEFAULT_STOPS: [ColorStop; 3] = [
    ColorStop { at: 16.0, color: Color::new(0, 0, 255) },
    ColorStop { at: 21.0, color: Color::new(0, 255, 0) },
    ColorStop { at: 26.0, color: Color::new(255, 0, 0) },
];

/// Colour for a temperature, interpolating each channel between stops
///
/// Black for an empty stop list.
pub fn temperature_color(value: f64, stops: &[ColorStop]) -> Color {
    let Some((lo, hi, t)) = bracket(value, stops, |s| s.at) else {
        return Color::new(0, 0, 0);
    };
    let (a, b) = (stops[lo].color, stops[hi].color);
    let mix = |from: u8, to: u8| {
        (from as f64 + (to as f64 - from as f64) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Color::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_colors_exact() {
        assert_eq!(temperature_color(16.0, &DEFAULT_STOPS), Color::new(0, 0, 255));
        assert_eq!(temperature_color(21.0, &DEFAULT_STOPS), Color::new(0, 255, 0));
        assert_eq!(temperature_color(26.0, &DEFAULT_STOPS), Color::new(255, 0, 0));
    }

    #[test]
    fn test_midpoint_blends() {
        assert_eq!(temperature_color(23.5, &DEFAULT_STOPS), Color::new(128, 128, 0));
    }

    #[test]
    fn test_extremes_clamp() {
        assert_eq!(temperature_color(-5.0, &DEFAULT_STOPS), Color::new(0, 0, 255));
        assert_eq!(temperature_color(80.0, &DEFAULT_STOPS), Color::new(255, 0, 0));
    }

    #[test]
    fn test_empty_and_single_stop() {
        assert_eq!(temperature_color(20.0, &[]), Color::new(0, 0, 0));
        let single = [ColorStop { at: 20.0, color: Color::new(9, 8, 7) }];
        assert_eq!(temperature_color(-100.0, &single), Color::new(9, 8, 7));
        assert_eq!(temperature_color(100.0, &single), Color::new(9, 8, 7));
    }
}
