//! Color codec, harmony engine and palette assembly.

pub mod codec;
pub mod harmony;
pub mod palette;

pub use codec::{ColorFormatError, Hsv, Rgb};
pub use self::palette::{Palette, assemble};
