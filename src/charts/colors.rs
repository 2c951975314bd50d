//! Color scales and palettes shared by all charts.

/// Plain RGB triple, independent of any UI toolkit.
pub type Rgb = [u8; 3];

pub const POINT_COLOR: Rgb = [52, 152, 219];
pub const REFERENCE_RED: Rgb = [220, 53, 69];

/// Bar colors, cycled per bar
pub const PALETTE: [Rgb; 10] = [
    [231, 76, 60],  // Red
    [46, 204, 113], // Green
    [155, 89, 182], // Purple
    [243, 156, 18], // Orange
    [26, 188, 156], // Teal
    [233, 30, 99],  // Pink
    [0, 188, 212],  // Cyan
    [255, 87, 34],  // Deep Orange
    [121, 85, 72],  // Brown
    [96, 125, 139], // Blue Grey
];

pub fn palette_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

/// A continuous scale given by evenly spaced stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub name: &'static str,
    stops: &'static [Rgb],
}

/// Perceptually uniform Viridis, 11 evenly spaced stops.
pub const VIRIDIS: ColorScale = ColorScale {
    name: "Viridis",
    stops: &[
        [68, 1, 84],
        [72, 36, 117],
        [65, 68, 135],
        [53, 95, 141],
        [42, 120, 142],
        [33, 145, 140],
        [34, 168, 132],
        [68, 191, 112],
        [122, 209, 81],
        [189, 223, 38],
        [253, 231, 37],
    ],
};

impl ColorScale {
    /// Color at position `t` in [0, 1]; out-of-range positions are clamped.
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.stops.len() - 1;
        let scaled = t * last as f64;
        let lower = (scaled.floor() as usize).min(last);
        let upper = (lower + 1).min(last);
        let frac = scaled - lower as f64;

        let a = self.stops[lower];
        let b = self.stops[upper];
        let mix = |i: usize| (a[i] as f64 + (b[i] as f64 - a[i] as f64) * frac).round() as u8;
        [mix(0), mix(1), mix(2)]
    }

    /// Color for `value` with the scale stretched over `[min, max]`.
    /// A degenerate range maps to the middle of the scale.
    pub fn map(&self, value: f64, min: f64, max: f64) -> Rgb {
        if max > min {
            self.sample((value - min) / (max - min))
        } else {
            self.sample(0.5)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints() {
        assert_eq!(VIRIDIS.sample(0.0), [68, 1, 84]);
        assert_eq!(VIRIDIS.sample(1.0), [253, 231, 37]);
        assert_eq!(VIRIDIS.sample(0.5), [33, 145, 140]);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(VIRIDIS.sample(-3.0), VIRIDIS.sample(0.0));
        assert_eq!(VIRIDIS.sample(7.0), VIRIDIS.sample(1.0));
        assert_eq!(VIRIDIS.sample(f64::NAN), VIRIDIS.sample(0.0));
    }

    #[test]
    fn map_stretches_over_range() {
        assert_eq!(VIRIDIS.map(50.0, 50.0, 90.0), VIRIDIS.sample(0.0));
        assert_eq!(VIRIDIS.map(90.0, 50.0, 90.0), VIRIDIS.sample(1.0));
        assert_eq!(VIRIDIS.map(72.0, 72.0, 72.0), VIRIDIS.sample(0.5));
    }

    #[test]
    fn interpolates_between_stops() {
        let [r, g, b] = VIRIDIS.sample(0.05);
        assert_eq!([r, g, b], [70, 19, 101]);
    }
}
