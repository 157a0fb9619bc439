// Display lines and their style

use serde::Deserialize;
use std::fmt;

/// One rendered line of the overlay. Built once per tick, handed to the renderer, dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine(String);

impl DisplayLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Colour written as `"white"` or `"#rrggbb"` in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "white" => return Some(Self::WHITE),
            "black" => return Some(Rgb { r: 0, g: 0, b: 0 }),
            _ => {}
        }
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value).ok_or_else(|| format!("invalid colour {value:?}, expected \"#rrggbb\""))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgb,
    pub font_size: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            font_size: 13.0,
        }
    }
}

/// Terminal cells covered by the drawn panel, zero-based like crossterm coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRect {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl PanelRect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.left
            && row >= self.top
            && u32::from(column) < u32::from(self.left) + u32::from(self.width)
            && u32::from(row) < u32::from(self.top) + u32::from(self.height)
    }
}
