use plotters::style::RGBColor;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Invalid color '{0}'. Expected '#RRGGBB' (e.g., '#1f77b4').")]
pub struct ColorParseError(pub String);

/// An sRGB color, written and parsed as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const GRAY: Rgb = Rgb::new(0x80, 0x80, 0x80);
    pub const TAB_BLUE: Rgb = Rgb::new(0x1f, 0x77, 0xb4);
    pub const TAB_ORANGE: Rgb = Rgb::new(0xff, 0x7f, 0x0e);
    pub const TAB_GREEN: Rgb = Rgb::new(0x2c, 0xa0, 0x2c);
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lower_and_upper_case_hex() {
        assert_eq!("#1f77b4".parse::<Rgb>(), Ok(Rgb::TAB_BLUE));
        assert_eq!("#FF7F0E".parse::<Rgb>(), Ok(Rgb::TAB_ORANGE));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let color = Rgb::new(3, 200, 17);
        assert_eq!(color.to_string(), "#03c811");
        assert_eq!(color.to_string().parse::<Rgb>(), Ok(color));
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["1f77b4", "#1f77b", "#1f77b4ff", "#gg0000", "red", "#ééé"] {
            assert_eq!(
                bad.parse::<Rgb>(),
                Err(ColorParseError(bad.to_string())),
                "{bad} should be rejected"
            );
        }
    }
}
