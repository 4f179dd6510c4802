//! Series colors and marker shapes.
//!
//! A series' style depends only on its position in the ascending threshold
//! order, so the data pass and the legend pass always agree.

use std::fmt;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `[0, 1]`.
    #[must_use]
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed colors used by the chart frame.
pub mod colors {
    use super::Rgb;

    /// Black - spines, ticks and axis text.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// White - figure and legend background.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Light gray - grid lines.
    pub const GRID: Rgb = Rgb::new(0xd9, 0xd9, 0xd9);
    /// Gray - legend frame.
    pub const LEGEND_EDGE: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);
}

/// Default categorical color cycle (`C0` through `C9`).
pub const PALETTE: [Rgb; 10] = [
    Rgb::new(0x1f, 0x77, 0xb4),
    Rgb::new(0xff, 0x7f, 0x0e),
    Rgb::new(0x2c, 0xa0, 0x2c),
    Rgb::new(0xd6, 0x27, 0x28),
    Rgb::new(0x94, 0x67, 0xbd),
    Rgb::new(0x8c, 0x56, 0x4b),
    Rgb::new(0xe3, 0x77, 0xc2),
    Rgb::new(0x7f, 0x7f, 0x7f),
    Rgb::new(0xbc, 0xbd, 0x22),
    Rgb::new(0x17, 0xbe, 0xcf),
];

/// Marker shape drawn at each data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Filled circle.
    Circle,
    /// Filled triangle pointing down.
    TriangleDown,
    /// Filled plus sign.
    PlusFilled,
    /// Filled square.
    Square,
    /// Filled square rotated by 45 degrees.
    Diamond,
    /// Stroked diagonal cross.
    Cross,
}

/// Marker cycle, indexed by series position.
pub const MARKERS: [Marker; 6] = [
    Marker::Circle,
    Marker::TriangleDown,
    Marker::PlusFilled,
    Marker::Square,
    Marker::Diamond,
    Marker::Cross,
];

impl Marker {
    /// Outline vertices for a marker of nominal size `size`, centered on the
    /// origin (y grows downward). `None` for markers drawn as strokes only.
    #[must_use]
    pub fn outline(self, size: f64) -> Option<Vec<(f64, f64)>> {
        let h = size / 2.0;
        let points = match self {
            Self::Circle | Self::Cross => return None,
            Self::TriangleDown => vec![(-h, -h), (h, -h), (0.0, h)],
            Self::Square => vec![(-h, -h), (h, -h), (h, h), (-h, h)],
            Self::Diamond => {
                let d = h * std::f64::consts::SQRT_2;
                vec![(0.0, -d), (d, 0.0), (0.0, d), (-d, 0.0)]
            }
            Self::PlusFilled => {
                let a = size / 6.0;
                vec![
                    (-a, -h),
                    (a, -h),
                    (a, -a),
                    (h, -a),
                    (h, a),
                    (a, a),
                    (a, h),
                    (-a, h),
                    (-a, a),
                    (-h, a),
                    (-h, -a),
                    (-a, -a),
                ]
            }
        };
        Some(points)
    }
}

/// Color and marker of one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesStyle {
    /// Marker fill, edge and annotation color.
    pub color: Rgb,
    /// Marker shape.
    pub marker: Marker,
}

impl SeriesStyle {
    /// Style of the series at position `index` in ascending threshold order.
    ///
    /// Markers cycle every 6 series, colors every 10.
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        Self {
            color: PALETTE[index % PALETTE.len()],
            marker: MARKERS[index % MARKERS.len()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_cycles() {
        assert_eq!(SeriesStyle::for_index(0).marker, Marker::Circle);
        assert_eq!(SeriesStyle::for_index(5).marker, Marker::Cross);
        assert_eq!(SeriesStyle::for_index(6).marker, Marker::Circle);
        assert_eq!(SeriesStyle::for_index(7).marker, Marker::TriangleDown);

        assert_eq!(SeriesStyle::for_index(6).color, PALETTE[6]);
        assert_eq!(SeriesStyle::for_index(10).color, PALETTE[0]);
        assert_eq!(SeriesStyle::for_index(13).color, PALETTE[3]);
    }

    #[test]
    fn test_style_is_pure() {
        for i in 0..40 {
            assert_eq!(SeriesStyle::for_index(i), SeriesStyle::for_index(i));
        }
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(colors::GRID.to_string(), "#d9d9d9");
        assert_eq!(PALETTE[0].to_string(), "#1f77b4");
    }

    #[test]
    fn test_outline_spans_marker_size() {
        for marker in [Marker::TriangleDown, Marker::Square, Marker::PlusFilled] {
            let pts = marker.outline(3.0).unwrap();
            let min_x = pts.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
            let max_x = pts.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
            assert!((max_x - min_x - 3.0).abs() < 1e-9, "{marker:?}");
        }
        assert!(Marker::Circle.outline(3.0).is_none());
    }
}
