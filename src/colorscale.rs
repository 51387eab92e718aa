//! Continuous color scale for map temperatures.
//!
//! A scale is a list of evenly spaced RGB stops; sampling linearly interpolates
//! between the two stops around `t`.

use crate::domain::Rgb;

/// Plasma stops, dark blue (cold) to yellow (hot).
const PLASMA: [Rgb; 10] = [
    Rgb(0x0d, 0x08, 0x87),
    Rgb(0x46, 0x03, 0x9f),
    Rgb(0x72, 0x01, 0xa8),
    Rgb(0x9c, 0x17, 0x9e),
    Rgb(0xbd, 0x37, 0x86),
    Rgb(0xd8, 0x57, 0x6b),
    Rgb(0xed, 0x79, 0x53),
    Rgb(0xfb, 0x9f, 0x3a),
    Rgb(0xfd, 0xca, 0x26),
    Rgb(0xf0, 0xf9, 0x21),
];

#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<Rgb>,
}

impl ColorScale {
    pub fn plasma() -> Self {
        Self { stops: PLASMA.to_vec() }
    }

    /// Color at position `t` in `[0, 1]`; out-of-range and NaN inputs are clamped.
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.stops.len();
        if n == 1 {
            return self.stops[0];
        }

        let pos = t * (n - 1) as f64;
        let i = (pos.floor() as usize).min(n - 2);
        let frac = pos - i as f64;
        lerp(self.stops[i], self.stops[i + 1], frac)
    }

    /// Color for `value` normalized into `[min, max]`.
    ///
    /// A degenerate range (all values equal) maps to the scale midpoint.
    pub fn sample_range(&self, value: f64, min: f64, max: f64) -> Rgb {
        let span = max - min;
        if !(span.is_finite() && span > 0.0) {
            return self.sample(0.5);
        }
        self.sample((value - min) / span)
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::plasma()
    }
}

fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let ch = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round().clamp(0.0, 255.0) as u8;
    Rgb(ch(a.0, b.0), ch(a.1, b.1), ch(a.2, b.2))
}
