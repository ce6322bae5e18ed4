use std::f64::consts::{FRAC_PI_2, TAU};

pub const RADIUS: f64 = 1.0;
const MARGIN: f64 = 1.2;
const SAMPLES: usize = 240;

/// Canvas bounds that keep the ring round in a `width` x `height` cell area.
/// Terminal cells are roughly twice as tall as they are wide.
pub fn ring_bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    if width == 0 || height == 0 {
        return ([-MARGIN, MARGIN], [-MARGIN, MARGIN]);
    }
    let aspect = width as f64 / (height as f64 * 2.0);
    let scale = if aspect < 1.0 { 1.0 / aspect } else { 1.0 };
    let y = MARGIN * scale;
    let x = y * aspect;
    ([-x, x], [-y, y])
}

/// Points of the arc still remaining, starting at twelve o'clock and
/// running clockwise. `fraction` is clamped to [0, 1].
pub fn arc_points(fraction: f64) -> Vec<(f64, f64)> {
    let fraction = fraction.clamp(0.0, 1.0);
    let count = (SAMPLES as f64 * fraction).round() as usize;
    (0..count)
        .map(|k| {
            let angle = FRAC_PI_2 - TAU * k as f64 / SAMPLES as f64;
            (RADIUS * angle.cos(), RADIUS * angle.sin())
        })
        .collect()
}
