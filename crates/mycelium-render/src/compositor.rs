//! Turns the four grids into a frame of glyphs and colours.
//!
//! Compositing also advances the decay buffers: glow and vein are scaled
//! in place before they contribute to the cell, so a frame always shows
//! the post-decay state and deposits fade over successive frames.

use mycelium_arena::{CompositeView, FieldStore, WaveTables};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::color::hsv_to_rgb;
use crate::frame::{Cell, Frame};

/// Sparse to dense.
pub const GLYPH_RAMP: [char; 10] = [' ', '.', '·', '*', 'o', '0', '#', '▒', '▓', '█'];

const FLICKER_RATE: f64 = 0.33;
const SWIRL_RATE: f64 = 0.19;
const HUE_RATE: f64 = 0.23;
const SPORE_RATE: f64 = 0.52;
const PARALLAX_RATE: f64 = 0.17;
const SWIRL_STRETCH: f64 = 1.3;
const SPORE_SLOW: f64 = 0.8;

/// Parameters for [`Compositor`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorParams {
    /// Per-frame glow multiplier.
    pub glow_decay: f32,
    /// Per-frame vein multiplier.
    pub vein_decay: f32,
    /// Cells whose ramp level is at or below this are printed uncoloured.
    pub color_threshold: f32,
}

impl Default for CompositorParams {
    fn default() -> Self {
        Self {
            glow_decay: 0.92,
            vein_decay: 0.955,
            color_threshold: 0.05,
        }
    }
}

impl CompositorParams {
    /// Decay factors must lie in `[0, 1]`.
    pub fn validate(&self) -> Result<(), String> {
        for (name, v) in [
            ("glow_decay", self.glow_decay),
            ("vein_decay", self.vein_decay),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("{name} must be in [0, 1], got {v}"));
            }
        }
        if !self.color_threshold.is_finite() {
            return Err(format!(
                "color_threshold must be finite, got {}",
                self.color_threshold
            ));
        }
        Ok(())
    }
}

/// Frame-wide phases, computed once per frame.
///
/// Each phase is reduced modulo `TAU` in `f64` before narrowing, so the
/// animation keeps its per-frame resolution however large `time` grows.
/// Phases that enter a scaled argument carry the scale already.
#[derive(Clone, Copy, Debug)]
struct Phases {
    flicker: f32,
    /// `1.3 * SWIRL_RATE * t`.
    swirl: f32,
    hue: f32,
    spore: f32,
    /// `0.8 * SPORE_RATE * t`.
    spore_slow: f32,
    parallax: f32,
}

impl Phases {
    fn at(time: f64) -> Self {
        Self {
            flicker: 0.55 + 0.45 * (time * FLICKER_RATE).sin() as f32,
            swirl: angle(time * SWIRL_RATE * SWIRL_STRETCH),
            hue: angle(time * HUE_RATE),
            spore: angle(time * SPORE_RATE),
            spore_slow: angle(time * SPORE_RATE * SPORE_SLOW),
            parallax: angle(time * PARALLAX_RATE),
        }
    }
}

fn angle(radians: f64) -> f32 {
    radians.rem_euclid(TAU) as f32
}

/// Inputs for one cell after decay.
#[derive(Clone, Copy, Debug)]
struct Sample {
    u: f32,
    v: f32,
    glow: f32,
    vein: f32,
    col: f32,
    row: f32,
}

/// Maps grid state to a [`Frame`].
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    params: CompositorParams,
}

impl Compositor {
    /// Create a compositor.
    pub fn new(params: CompositorParams) -> Self {
        Self { params }
    }

    /// The compositor's parameters.
    pub fn params(&self) -> &CompositorParams {
        &self.params
    }

    /// Decay glow and vein in place and render the frame at `time`.
    ///
    /// A degenerate store yields an empty frame.
    pub fn compose(&self, store: &mut FieldStore, waves: &WaveTables, time: f64) -> Frame {
        let (w, h) = store.dims();
        let (width, height) = (w as usize, h as usize);
        let mut frame = Frame::blank(width, height);
        if frame.is_empty() {
            return frame;
        }

        let phases = Phases::at(time);
        let CompositeView { u, v, glow, vein } = store.composite_view();
        let cells = frame.cells_mut();

        for y in 0..height {
            let row = waves.row.get(y).copied().unwrap_or(0.0);
            for x in 0..width {
                let i = y * width + x;
                glow[i] *= self.params.glow_decay;
                vein[i] *= self.params.vein_decay;
                let sample = Sample {
                    u: u[i],
                    v: v[i],
                    glow: glow[i],
                    vein: vein[i],
                    col: waves.column.get(x).copied().unwrap_or(0.0),
                    row,
                };
                cells[i] = self.shade(&phases, sample, (x, y), (width, height));
            }
        }
        frame
    }

    fn shade(
        &self,
        ph: &Phases,
        s: Sample,
        (x, y): (usize, usize),
        (w, h): (usize, usize),
    ) -> Cell {
        let (xf, yf) = (x as f32, y as f32);

        let swirl = (ph.swirl + (s.col + s.row) * SWIRL_STRETCH as f32).sin();
        let spore_wave = (ph.spore + xf * 0.18 + s.row * 1.7).sin()
            + 0.6 * (ph.spore_slow + xf * 0.07 - yf * 0.11).cos();
        let spore = spore_wave.max(0.0) * (0.22 + 0.55 * (s.v + s.glow));

        let mut lum = s.v - 0.33 * s.u + s.glow + 0.18 * s.vein + 0.18 * swirl;
        lum += 0.32 * spore;
        let lum = lum.clamp(0.0, 1.4);
        let lum = lum * (0.6 + lum * 0.4);
        let lum_norm = lum.clamp(0.0, 1.0);

        let ramp = (lum_norm + 0.35 * s.vein + 0.18 * spore).min(1.0);
        let top = GLYPH_RAMP.len() - 1;
        let level = ((ramp * top as f32) as usize).min(top);
        let glyph = GLYPH_RAMP[level];

        if ramp <= self.params.color_threshold {
            return Cell { glyph, color: None };
        }

        let (cx, cy) = (xf - w as f32 * 0.5, yf - h as f32 * 0.5);
        let parallax = ph.parallax + cx * 0.07 + cy * 0.05 + s.v * 0.9 - s.u * 0.6;
        let depth = (0.5 + 0.5 * parallax.sin()).clamp(0.0, 1.0);

        let hue = 0.56
            + 0.22 * (ph.hue + s.col * 1.8 + s.row * 1.2).sin()
            + 0.25 * (depth - 0.5)
            + 0.14 * ramp;
        let sat = 0.6 + 0.32 * ramp + 0.12 * spore_wave.max(0.0);
        let light = lum_norm * ph.flicker + s.glow.min(1.0) * 0.35 + depth * 0.25 + s.vein * 0.28;
        let val = 0.26 + 0.74 * light;

        Cell {
            glyph,
            color: Some(hsv_to_rgb(hue, sat, val)),
        }
    }
}
