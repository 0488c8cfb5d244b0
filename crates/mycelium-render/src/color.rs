//! 24-bit colour and HSV conversion.

use std::fmt;

/// A 24-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Writes the truecolour foreground escape, `ESC[38;2;r;g;bm`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

/// Convert HSV to RGB.
///
/// `h` wraps into `[0, 1)`; `s` and `v` are clamped to `[0, 1]`. Channels
/// are truncated, not rounded, after scaling by 255.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = if h.is_finite() {
        h.rem_euclid(1.0)
    } else {
        0.0
    };
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(channel(r), channel(g), channel(b))
}

#[inline]
fn channel(x: f32) -> u8 {
    (x * 255.0).clamp(0.0, 255.0) as u8
}
