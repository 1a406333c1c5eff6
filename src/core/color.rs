//! Grid colors
//!
//! Colors are plain 24-bit RGB values. Everywhere the demo format or a
//! renderer sees a color it is written as a `#rrggbb` hex string, so the
//! type converts to and from that form (including through serde).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Default foreground color
    pub const DEFAULT_FOREGROUND: Color = Color::rgb(0xee, 0xee, 0xee);
    /// Default background color
    pub const DEFAULT_BACKGROUND: Color = Color::rgb(0x11, 0x11, 0x11);
    /// Default border color
    pub const DEFAULT_BORDER: Color = Color::rgb(0x22, 0x22, 0x22);

    /// The selectable color palette
    pub const PALETTE: [Color; 10] = [
        Color::rgb(0xff, 0x00, 0x00), // Red
        Color::rgb(0x00, 0xff, 0x00), // Green
        Color::rgb(0x33, 0x99, 0xff), // Lighter blue
        Color::rgb(0xff, 0xff, 0x00), // Yellow
        Color::rgb(0xff, 0x00, 0xff), // Magenta
        Color::rgb(0x00, 0xff, 0xff), // Cyan
        Color::rgb(0xff, 0x99, 0x00), // Orange
        Color::rgb(0x99, 0x00, 0xff), // Purple
        Color::rgb(0xee, 0xee, 0xee), // Almost white
        Color::rgb(0x11, 0x11, 0x11), // Almost black
    ];

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        // Byte length alone is not enough: multi-byte characters would
        // make the digit slices below straddle a char boundary.
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let parse =
            |range| u8::from_str_radix(&hex[range], 16).map_err(|_| Error::InvalidColor(s.to_string()));
        Ok(Color {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let color: Color = "#3399ff".parse().unwrap();
        assert_eq!(color, Color::rgb(0x33, 0x99, 0xff));
        assert_eq!(color.to_string(), "#3399ff");
    }

    #[test]
    fn test_parse_uppercase() {
        let color: Color = "#FF9900".parse().unwrap();
        assert_eq!(color, Color::rgb(0xff, 0x99, 0x00));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("3399ff".parse::<Color>().is_err());
        assert!("#33f".parse::<Color>().is_err());
        assert!("#33zzff".parse::<Color>().is_err());
        assert!("#3399ff00".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_rejects_multibyte_input() {
        // "€" is three bytes, so the hex portion is 6 bytes long but not
        // six ASCII digits; parsing must fail instead of panicking
        assert!("#\u{20ac}abc".parse::<Color>().is_err());
        assert!("#ab\u{20ac}c".parse::<Color>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Color::DEFAULT_BORDER).unwrap();
        assert_eq!(json, "\"#222222\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::DEFAULT_BORDER);
    }
}
