//! Plot colors

use crate::Result;
use plotters::style::RGBColor;
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

/// RGB color, with components in the [0, 1] range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component
    pub red: f64,

    /// Green component
    pub green: f64,

    /// Blue component
    pub blue: f64,
}
//
impl Color {
    /// Parse an `#RRGGBB` hexadecimal color
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|digits| digits.len() == 6 && digits.is_ascii())
            .ok_or_else(|| anyhow::format_err!("color {hex:?} is not of the #RRGGBB form"))?;
        let component = |range: std::ops::Range<usize>| -> Result<f64> {
            let value = u8::from_str_radix(&digits[range], 16)
                .map_err(|e| anyhow::format_err!("color {hex:?} is not hexadecimal: {e}"))?;
            Ok(f64::from(value) / 255.0)
        };
        Ok(Self {
            red: component(0..2)?,
            green: component(2..4)?,
            blue: component(4..6)?,
        })
    }

    /// Convert to a plotters color
    pub fn to_rgb(self) -> RGBColor {
        let quantize = |component: f64| (component.clamp(0.0, 1.0) * 255.0).round() as u8;
        RGBColor(quantize(self.red), quantize(self.green), quantize(self.blue))
    }
}
//
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RGBColor(r, g, b) = self.to_rgb();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}
//
impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
//
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Two-color linear gradient
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Gradient {
    /// Color of the first bar
    pub start: Color,

    /// Color that the bars tend towards
    pub end: Color,
}
//
impl Gradient {
    /// Parse a gradient from two `#RRGGBB` colors
    pub fn from_hex(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: Color::from_hex(start)?,
            end: Color::from_hex(end)?,
        })
    }

    /// Evenly spaced colors going from the start color towards the end color
    ///
    /// The step is `(end - start) / amount`, so the end color itself is never
    /// reached.
    pub fn colors(&self, amount: usize) -> Vec<Color> {
        let steps = amount as f64;
        let step = |from: f64, to: f64| (to - from) / steps;
        let (dr, dg, db) = (
            step(self.start.red, self.end.red),
            step(self.start.green, self.end.green),
            step(self.start.blue, self.end.blue),
        );
        (0..amount)
            .map(|i| {
                let i = i as f64;
                Color {
                    red: self.start.red + i * dr,
                    green: self.start.green + i * dg,
                    blue: self.start.blue + i * db,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        let color = Color::from_hex("#682876").unwrap();
        assert_eq!(color.to_rgb(), RGBColor(0x68, 0x28, 0x76));
        assert_eq!(color.to_string(), "#682876");
        assert_eq!("#f89820".parse::<Color>().unwrap().to_string(), "#F89820");
    }

    #[test]
    fn bad_hex_is_rejected() {
        for bad in ["682876", "#68287", "#6828761", "#GG2876", "#68é876"] {
            assert!(Color::from_hex(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn gradient_interpolation() {
        let gradient = Gradient::from_hex("#000000", "#FF0000").unwrap();
        let colors = gradient.colors(4);
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], gradient.start);
        let reds = colors.iter().map(|c| c.red).collect::<Vec<_>>();
        for (actual, expected) in reds.iter().zip([0.0, 0.25, 0.5, 0.75]) {
            assert!((actual - expected).abs() < 1e-12);
        }
        assert!(colors.iter().all(|c| c.green == 0.0 && c.blue == 0.0));
    }

    #[test]
    fn empty_gradient() {
        let gradient = Gradient::from_hex("#000000", "#FFFFFF").unwrap();
        assert!(gradient.colors(0).is_empty());
    }
}
