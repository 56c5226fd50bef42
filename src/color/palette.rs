use serde::Serialize;
use utoipa::ToSchema;

use super::{
    codec::Rgb,
    harmony::{analogous, complementary, monochromatic, tetradic, triadic},
};

/// Base color together with its five harmony families.
///
/// Family sizes are fixed by the array lengths, so a serialized palette always carries
/// exactly six keys with 1, 1, 2, 2, 3 and 5 triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Palette {
    /// Color the palette was derived from.
    #[schema(value_type = Vec<u8>)]
    pub original: Rgb,
    /// Opposite hue.
    #[schema(value_type = Vec<u8>)]
    pub complementary: Rgb,
    /// `[+30°, -30°]` neighbours.
    #[schema(value_type = Vec<Vec<u8>>)]
    pub analogous: [Rgb; 2],
    /// `[+120°, +240°]` rotations.
    #[schema(value_type = Vec<Vec<u8>>)]
    pub triadic: [Rgb; 2],
    /// `[+90°, +180°, +270°]` rotations.
    #[schema(value_type = Vec<Vec<u8>>)]
    pub tetradic: [Rgb; 3],
    /// Five shades ordered by increasing value.
    #[schema(value_type = Vec<Vec<u8>>)]
    pub monochromatic: [Rgb; 5],
}

/// Expand one color into its full palette.
pub fn assemble(rgb: Rgb) -> Palette {
    Palette {
        original: rgb,
        complementary: complementary(rgb),
        analogous: analogous(rgb),
        triadic: triadic(rgb),
        tetradic: tetradic(rgb),
        monochromatic: monochromatic(rgb),
    }
}
