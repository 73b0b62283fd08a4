use std::{error::Error, fmt, str::FromStr};

use serde_with::{DeserializeFromStr, SerializeDisplay};

/// RGBA color, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const MAGENTA: Color = Color::rgb(0xff, 0x00, 0xff);
    pub const CYAN: Color = Color::rgb(0x00, 0xff, 0xff);
    pub const DODGER_BLUE: Color = Color::rgb(0x1e, 0x90, 0xff);
    pub const LAWN_GREEN: Color = Color::rgb(0x7c, 0xfc, 0x00);
    pub const TRANSPARENT: Color = Color {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 0,
    };

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 0xff,
        }
    }

    /// Same color with the given opacity in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            alpha: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn opacity(&self) -> f64 {
        self.alpha as f64 / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)?;
        if self.alpha != 0xff {
            write!(f, "{:02x}", self.alpha)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}', expected #rrggbb or #rrggbbaa", self.0)
    }
}

impl Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(invalid());
        }
        let channel = |index: usize| {
            u8::from_str_radix(&hex[index * 2..index * 2 + 2], 16).map_err(|_| invalid())
        };
        Ok(Color {
            red: channel(0)?,
            green: channel(1)?,
            blue: channel(2)?,
            alpha: if hex.len() == 8 { channel(3)? } else { 0xff },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let color: Color = "#1e90ff".parse().unwrap();
        assert_eq!(color, Color::DODGER_BLUE);
        assert_eq!(color.to_string(), "#1e90ff");

        let translucent: Color = "#7cfc0066".parse().unwrap();
        assert_eq!(translucent, Color::LAWN_GREEN.with_opacity(0.4));
        assert_eq!(translucent.to_string(), "#7cfc0066");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!("1e90ff".parse::<Color>().is_err());
        assert!("#1e90f".parse::<Color>().is_err());
        assert!("#zz90ff".parse::<Color>().is_err());
    }

    #[test]
    fn serde_uses_hex_string() {
        let json = serde_json::to_string(&Color::MAGENTA).unwrap();
        assert_eq!(json, "\"#ff00ff\"");
        let color: Color = serde_json::from_str("\"#00ffff\"").unwrap();
        assert_eq!(color, Color::CYAN);
    }
}
