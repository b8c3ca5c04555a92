//! Color types for materials, vertex colors and the trail canvas.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Linear RGB color, each channel 0-1.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// Creates a color from channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a `0xRRGGBB` literal.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    /// Interpolates toward `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Appends an alpha channel.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// Converts to array.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// RGB plus alpha.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Rgba {
    /// Creates a color from channels.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Converts `hsla(h, s, l, a)` with hue in degrees and s/l in 0-1.
    #[must_use]
    pub fn from_hsla(hue_deg: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue_deg.rem_euclid(360.0) / 360.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::new(l, l, l, alpha);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            alpha,
        )
    }

    /// Converts to array.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Site palette.
pub mod palette {
    use super::Rgb;

    /// Page background `#030014`.
    pub const VOID: u32 = 0x03_00_14;
    /// Primary accent `#00d4ff`.
    pub const CYAN: u32 = 0x00_d4_ff;
    /// Secondary accent `#a855f7`.
    pub const PURPLE: u32 = 0xa8_55_f7;
    /// Tertiary accent `#ec4899`.
    pub const PINK: u32 = 0xec_48_99;
    /// Plain white.
    pub const WHITE: u32 = 0xff_ff_ff;

    /// Resolves a palette entry.
    #[must_use]
    pub fn rgb(hex: u32) -> Rgb {
        Rgb::from_hex(hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Rgb::from_hex(0xff_00_80);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_hsla_primaries() {
        let red = Rgba::from_hsla(0.0, 1.0, 0.5, 1.0);
        assert!((red.r - 1.0).abs() < 1e-5 && red.g.abs() < 1e-5 && red.b.abs() < 1e-5);

        let cyan = Rgba::from_hsla(180.0, 1.0, 0.5, 0.25);
        assert!(cyan.r.abs() < 1e-5);
        assert!((cyan.g - 1.0).abs() < 1e-5 && (cyan.b - 1.0).abs() < 1e-5);
        assert_eq!(cyan.a, 0.25);
    }
}
