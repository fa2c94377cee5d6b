//! RGBA8 colour and the named palette.
//!
//! A pixel whose four channels are all zero is "unpainted"; flood fill only
//! spreads through unpainted pixels, so every palette colour is opaque.

// ============================================================================
// Color
// ============================================================================

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const AQUA: Color = Color::new(0, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const BLUE: Color = Color::new(0, 0, 255, 255);
    pub const FUCHSIA: Color = Color::new(255, 0, 255, 255);
    pub const GRAY: Color = Color::new(128, 128, 128, 255);
    pub const GREEN: Color = Color::new(0, 128, 0, 255);
    pub const LIME: Color = Color::new(0, 255, 0, 255);
    pub const MAROON: Color = Color::new(128, 0, 0, 255);
    pub const NAVY: Color = Color::new(0, 0, 128, 255);
    pub const OLIVE: Color = Color::new(128, 128, 0, 255);
    pub const PURPLE: Color = Color::new(128, 0, 128, 255);
    pub const RED: Color = Color::new(255, 0, 0, 255);
    pub const SILVER: Color = Color::new(192, 192, 192, 255);
    pub const TEAL: Color = Color::new(0, 128, 128, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0, 255);

    /// All channels zero: the state of a freshly created surface.
    pub const UNPAINTED: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    #[inline]
    pub fn is_unpainted(&self) -> bool {
        *self == Self::UNPAINTED
    }

    /// Channel-wise linear interpolation, `t = 0` gives `self`, `t = 1`
    /// gives `other`. Each channel is rounded half up and `t` is clamped.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * t;
            crate::basics::round_half_up(v).clamp(0.0, 255.0) as u8
        };
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// The four channels in RGBA byte order.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_bytes(b: [u8; 4]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_opaque() {
        let palette = [
            Color::AQUA,
            Color::BLACK,
            Color::BLUE,
            Color::FUCHSIA,
            Color::GRAY,
            Color::GREEN,
            Color::LIME,
            Color::MAROON,
            Color::NAVY,
            Color::OLIVE,
            Color::PURPLE,
            Color::RED,
            Color::SILVER,
            Color::TEAL,
            Color::WHITE,
            Color::YELLOW,
        ];
        for c in palette {
            assert_eq!(c.a, 255);
            assert!(!c.is_unpainted());
        }
        assert!(Color::UNPAINTED.is_unpainted());
        assert_eq!(Color::default(), Color::UNPAINTED);
    }

    #[test]
    fn test_lerp() {
        let a = Color::new(0, 0, 0, 255);
        let b = Color::new(200, 100, 50, 255);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), Color::new(100, 50, 25, 255));
        assert_eq!(a.lerp(&b, 2.0), b);
    }

    #[test]
    fn test_bytes() {
        let c = Color::new(1, 2, 3, 4);
        assert_eq!(c.to_bytes(), [1, 2, 3, 4]);
        assert_eq!(Color::from_bytes([1, 2, 3, 4]), c);
    }
}
