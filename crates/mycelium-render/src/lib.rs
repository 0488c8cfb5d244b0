//! Glyph and colour compositing for the Mycelium growth simulator.
//!
//! [`Compositor::compose`] decays the glow and vein buffers, then maps
//! every cell to a glyph from [`GLYPH_RAMP`] and an optional truecolour
//! [`Rgb`]. [`Frame::to_ansi_rows`] turns the result into terminal-ready
//! strings; the crate itself performs no I/O.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod color;
pub mod compositor;
pub mod frame;

pub use color::{hsv_to_rgb, Rgb};
pub use compositor::{Compositor, CompositorParams, GLYPH_RAMP};
pub use frame::{Cell, Frame, RESET};
