//! Conversions between RGB triples, their textual forms and HSV.

use palette::{FromColor, Srgb, encoding};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised while decoding a textual color value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorFormatError {
    /// Hex value does not hold exactly six digits once the `#` prefix is removed.
    #[error("hex color `{value}` must contain exactly 6 hexadecimal digits")]
    HexLength { value: String },
    /// One of the two-digit hex groups is not hexadecimal.
    #[error("hex color `{value}` contains a non-hexadecimal digit")]
    HexDigit { value: String },
    /// Decimal list does not split into exactly three tokens.
    #[error("decimal color `{value}` must list exactly 3 comma-separated channels (got {count})")]
    ChannelCount { value: String, count: usize },
    /// A decimal token is not an integer.
    #[error("decimal color channel `{token}` is not an integer")]
    ChannelNotInteger { token: String },
    /// A decimal token parsed but falls outside 0..=255.
    #[error("decimal color channel {channel} is outside 0..=255")]
    ChannelOutOfRange { channel: i64 },
}

/// Red, green and blue channel intensities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Build a triple from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(rgb: Rgb) -> Self {
        [rgb.r, rgb.g, rgb.b]
    }
}

/// Hue in degrees, saturation and value in `[0, 1]`, over the sRGB standard.
pub type Hsv = palette::Hsv<encoding::Srgb, f64>;

/// Decode `rrggbb` or `#rrggbb` into a triple.
pub fn rgb_from_hex(text: &str) -> Result<Rgb, ColorFormatError> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    if digits.len() != 6 {
        return Err(ColorFormatError::HexLength {
            value: text.to_string(),
        });
    }
    if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(ColorFormatError::HexDigit {
            value: text.to_string(),
        });
    }

    let channel = |offset: usize| {
        u8::from_str_radix(&digits[offset..offset + 2], 16).map_err(|_| {
            ColorFormatError::HexDigit {
                value: text.to_string(),
            }
        })
    };

    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Encode a triple as lowercase `#rrggbb`.
pub fn hex_from_rgb(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Decode `r,g,b` decimal channels. Channels outside 0..=255 are rejected.
pub fn rgb_from_decimal_list(text: &str) -> Result<Rgb, ColorFormatError> {
    let tokens = text.split(',').map(str::trim).collect::<Vec<_>>();
    let [r, g, b] = tokens.as_slice() else {
        return Err(ColorFormatError::ChannelCount {
            value: text.to_string(),
            count: tokens.len(),
        });
    };

    Ok(Rgb::new(
        decimal_channel(r)?,
        decimal_channel(g)?,
        decimal_channel(b)?,
    ))
}

fn decimal_channel(token: &str) -> Result<u8, ColorFormatError> {
    let channel = token
        .parse::<i64>()
        .map_err(|_| ColorFormatError::ChannelNotInteger {
            token: token.to_string(),
        })?;
    u8::try_from(channel).map_err(|_| ColorFormatError::ChannelOutOfRange { channel })
}

/// Convert to HSV. Achromatic colors get hue and saturation 0.
pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    Hsv::from_color(Srgb::<f64>::new(
        unit_from_channel(rgb.r),
        unit_from_channel(rgb.g),
        unit_from_channel(rgb.b),
    ))
}

/// Convert back to RGB, rounding every channel half-to-even and clamping it to 0..=255.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let srgb = Srgb::<f64>::from_color(hsv);
    Rgb::new(
        unit_to_channel(srgb.red),
        unit_to_channel(srgb.green),
        unit_to_channel(srgb.blue),
    )
}

fn unit_from_channel(channel: u8) -> f64 {
    f64::from(channel) / 255.0
}

/// Scale a `[0, 1]` intensity to a channel, clamping anything that rounds outside 0..=255.
pub(crate) fn unit_to_channel(value: f64) -> u8 {
    let scaled = (value * 255.0).round_ties_even();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_accepts_optional_prefix() {
        assert_eq!(rgb_from_hex("#FF0000").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(rgb_from_hex("336699").unwrap(), Rgb::new(0x33, 0x66, 0x99));
        assert_eq!(rgb_from_hex("#aBcDeF").unwrap(), Rgb::new(0xab, 0xcd, 0xef));
    }

    #[test]
    fn hex_rejects_wrong_length() {
        assert!(matches!(
            rgb_from_hex("#FFF"),
            Err(ColorFormatError::HexLength { .. })
        ));
        assert!(matches!(
            rgb_from_hex("#FF00000"),
            Err(ColorFormatError::HexLength { .. })
        ));
        assert!(matches!(
            rgb_from_hex(""),
            Err(ColorFormatError::HexLength { .. })
        ));
    }

    #[test]
    fn hex_rejects_non_hex_digits() {
        assert!(matches!(
            rgb_from_hex("#GG0000"),
            Err(ColorFormatError::HexDigit { .. })
        ));
        assert!(matches!(
            rgb_from_hex("#+f0000"),
            Err(ColorFormatError::HexDigit { .. })
        ));
        // Six bytes but not six characters.
        assert!(rgb_from_hex("#éé00").is_err());
    }

    #[test]
    fn hex_round_trip_is_case_insensitive() {
        for hex in ["#ff0000", "#00FF7f", "#123456", "#abcdef", "#000000", "#FFFFFF"] {
            let rgb = rgb_from_hex(hex).unwrap();
            assert_eq!(hex_from_rgb(rgb), hex.to_ascii_lowercase());
        }
    }

    #[test]
    fn decimal_list_parses_three_channels() {
        assert_eq!(
            rgb_from_decimal_list("10,20,30").unwrap(),
            Rgb::new(10, 20, 30)
        );
        assert_eq!(
            rgb_from_decimal_list(" 12, 200 ,5 ").unwrap(),
            Rgb::new(12, 200, 5)
        );
    }

    #[test]
    fn decimal_list_rejects_wrong_token_count() {
        assert_eq!(
            rgb_from_decimal_list("10,20"),
            Err(ColorFormatError::ChannelCount {
                value: "10,20".into(),
                count: 2
            })
        );
        assert!(rgb_from_decimal_list("1,2,3,4").is_err());
        assert!(rgb_from_decimal_list("").is_err());
    }

    #[test]
    fn decimal_list_rejects_out_of_range_channels() {
        assert_eq!(
            rgb_from_decimal_list("10,20,300"),
            Err(ColorFormatError::ChannelOutOfRange { channel: 300 })
        );
        assert_eq!(
            rgb_from_decimal_list("-1,20,30"),
            Err(ColorFormatError::ChannelOutOfRange { channel: -1 })
        );
    }

    #[test]
    fn decimal_list_rejects_non_integers() {
        assert!(matches!(
            rgb_from_decimal_list("10,twenty,30"),
            Err(ColorFormatError::ChannelNotInteger { .. })
        ));
        assert!(rgb_from_decimal_list("10,2.5,30").is_err());
    }

    #[test]
    fn rgb_to_hsv_primary_and_gray() {
        let red = rgb_to_hsv(Rgb::new(255, 0, 0));
        assert_eq!(red.hue.into_positive_degrees(), 0.0);
        assert_eq!((red.saturation, red.value), (1.0, 1.0));

        let gray = rgb_to_hsv(Rgb::new(128, 128, 128));
        assert_eq!(gray.hue.into_positive_degrees(), 0.0);
        assert_eq!(gray.saturation, 0.0);
        assert!((gray.value - 128.0 / 255.0).abs() < 1e-12);

        let blue = rgb_to_hsv(Rgb::new(0, 0, 255));
        assert!((blue.hue.into_positive_degrees() - 240.0).abs() < 1e-9);
    }

    #[test]
    fn hsv_round_trip_is_exact_on_a_grid() {
        for r in (0..=255u8).step_by(5) {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(5) {
                    let rgb = Rgb::new(r, g, b);
                    assert_eq!(hsv_to_rgb(rgb_to_hsv(rgb)), rgb);
                }
            }
        }
    }

    #[test]
    fn hsv_to_rgb_wraps_full_turn_hue() {
        assert_eq!(hsv_to_rgb(Hsv::new(360.0, 1.0, 1.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(-120.0, 1.0, 1.0)), Rgb::new(0, 0, 255));
    }

    #[test]
    fn hsv_to_rgb_rounds_half_channels_to_even() {
        // 150 degrees at value 15/255 puts blue exactly on 7.5.
        let hsv = Hsv::new(150.0, 1.0, 15.0 / 255.0);
        assert_eq!(hsv_to_rgb(hsv), Rgb::new(0, 15, 8));
    }

    #[test]
    fn unit_to_channel_clamps() {
        assert_eq!(unit_to_channel(1.2), 255);
        assert_eq!(unit_to_channel(-0.1), 0);
        assert_eq!(unit_to_channel(f64::NAN), 0);
        assert_eq!(unit_to_channel(0.5), 128);
    }

    #[test]
    fn rgb_serializes_as_array() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::new(1, 2, 3));
    }
}
