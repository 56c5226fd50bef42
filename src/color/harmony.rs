//! Harmony families derived from one base color by rotating its hue in HSV space.

use palette::ShiftHue;

use super::codec::{Hsv, Rgb, hsv_to_rgb, rgb_to_hsv};

/// Hue offset used for analogous neighbours (roughly 30 degrees), in turns.
const ANALOGOUS_OFFSET: f64 = 0.083;
const TRIADIC_OFFSETS: [f64; 2] = [1.0 / 3.0, 2.0 / 3.0];
const TETRADIC_OFFSETS: [f64; 3] = [0.25, 0.5, 0.75];
/// Value multipliers of the monochromatic ramp, darkest first.
const MONOCHROMATIC_MULTIPLIERS: [f64; 5] = [0.8, 0.9, 1.0, 1.1, 1.2];

fn rotate(hsv: Hsv, turns: f64) -> Rgb {
    hsv_to_rgb(hsv.shift_hue(turns * 360.0))
}

fn rotations<const N: usize>(hsv: Hsv, offsets: [f64; N]) -> [Rgb; N] {
    offsets.map(|offset| rotate(hsv, offset))
}

/// Opposite hue on the color wheel.
pub fn complementary(rgb: Rgb) -> Rgb {
    rotate(rgb_to_hsv(rgb), 0.5)
}

/// The two neighbours of the base hue: `[+offset, -offset]`.
pub fn analogous(rgb: Rgb) -> [Rgb; 2] {
    rotations(rgb_to_hsv(rgb), [ANALOGOUS_OFFSET, -ANALOGOUS_OFFSET])
}

/// Hues a third and two thirds of a turn away.
pub fn triadic(rgb: Rgb) -> [Rgb; 2] {
    rotations(rgb_to_hsv(rgb), TRIADIC_OFFSETS)
}

/// Hues a quarter, a half and three quarters of a turn away.
pub fn tetradic(rgb: Rgb) -> [Rgb; 3] {
    rotations(rgb_to_hsv(rgb), TETRADIC_OFFSETS)
}

/// Five shades sharing the base hue and saturation.
///
/// The value of each shade is the multiplier itself clamped to `[0, 1]`, not the base value
/// scaled by it, so the last three shades are always identical.
pub fn monochromatic(rgb: Rgb) -> [Rgb; 5] {
    let hsv = rgb_to_hsv(rgb);
    MONOCHROMATIC_MULTIPLIERS.map(|multiplier| {
        let mut shade = hsv;
        shade.value = multiplier.clamp(0.0, 1.0);
        hsv_to_rgb(shade)
    })
}
