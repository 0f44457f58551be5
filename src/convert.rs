//! The projection-and-resampling engine.
//!
//! One render produces one cube face: every output pixel is mapped through
//! the face orientation table onto the sphere and projected into the source
//! panorama, where a separable kernel convolution reconstructs it.
//!
//! Coordinate conventions:
//! - face-local (u, v) in [-1, 1], u rightward, v downward
//! - source coordinates are fractional pixels, integer = pixel center
//! - taps outside the source reuse the nearest edge pixel (clamp, no wrap)
//!
//! Output rows are independent, so the pixel loop runs on the rayon pool.

use log::debug;
use rayon::prelude::*;

use crate::face::Face;
use crate::imagebuf::{CHANNELS, ImageBuf};
use crate::kernel::Filter;
use crate::projection;

/// Largest per-axis tap count (`2 * radius`) across the known filters.
const MAX_TAPS: usize = 10;

/// Conversion failures. Every condition is terminal for the current render
/// request; the orchestrator decides what happens to the remaining faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Source buffer does not match its declared dimensions, or the source
    /// is too narrow to derive a single output pixel.
    InvalidImage(String),
    /// Face identifier is not one of rt/lf/ft/bk/up/dn.
    UnknownFace(String),
    /// Interpolation mode is not one of linear/lanczos.
    UnknownKernel(String),
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::InvalidImage(msg) => write!(f, "Invalid image: {}", msg),
            ConvertError::UnknownFace(name) => write!(f, "Unknown face: '{}'", name),
            ConvertError::UnknownKernel(name) => write!(f, "Unknown kernel: '{}'", name),
        }
    }
}

impl std::error::Error for ConvertError {}

/// One face render order: which face, how the sphere is spun, which kernel
/// reconstructs the source, and an optional cap on the face edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub face: Face,
    /// Horizontal rotation in radians, added to longitude before lookup.
    pub rotation: f32,
    pub filter: Filter,
    /// Cap on the output edge; `None` derives it from the source width.
    pub max_width: Option<usize>,
}

/// Fractional-coordinate sampler bound to one source image and filter.
///
/// Constructed once per render; the per-sample scratch lives on the stack so
/// a single sampler serves any number of rayon workers through `&self`.
pub struct Resampler<'a> {
    src: &'a ImageBuf,
    filter: Filter,
    radius: i64,
    x_max: i64,
    y_max: i64,
}

impl<'a> Resampler<'a> {
    pub fn new(src: &'a ImageBuf, filter: Filter) -> Self {
        Self {
            src,
            filter,
            radius: filter.radius() as i64,
            x_max: src.width() as i64 - 1,
            y_max: src.height() as i64 - 1,
        }
    }

    /// Reconstruct the source at fractional (x, y) as one RGB triple.
    ///
    /// Separable convolution over a `2r x 2r` window anchored at
    /// `floor(coord) - r + 1` per axis: the two 1D weight vectors are
    /// combined as an outer product while walking the window once.
    /// Accumulated sums are rounded and saturated to 0..=255, which absorbs
    /// the Lanczos side-lobe overshoot next to hard edges.
    pub fn sample(&self, x_from: f32, y_from: f32) -> [u8; 3] {
        let taps = (2 * self.radius) as usize;
        let x_start = x_from.floor() as i64 - self.radius + 1;
        let y_start = y_from.floor() as i64 - self.radius + 1;

        let mut x_kernel = [0.0f32; MAX_TAPS];
        let mut y_kernel = [0.0f32; MAX_TAPS];
        for i in 0..taps {
            x_kernel[i] = self.filter.weight(x_from - (x_start + i as i64) as f32);
            y_kernel[i] = self.filter.weight(y_from - (y_start + i as i64) as f32);
        }

        let mut acc = [0.0f32; 3];
        for i in 0..taps {
            let sy = (y_start + i as i64).clamp(0, self.y_max) as usize;
            let mut row = [0.0f32; 3];
            for j in 0..taps {
                let sx = (x_start + j as i64).clamp(0, self.x_max) as usize;
                let px = self.src.pixel(sx, sy);
                let wx = x_kernel[j];
                row[0] += px[0] as f32 * wx;
                row[1] += px[1] as f32 * wx;
                row[2] += px[2] as f32 * wx;
            }
            let wy = y_kernel[i];
            acc[0] += row[0] * wy;
            acc[1] += row[1] * wy;
            acc[2] += row[2] * wy;
        }

        [
            acc[0].round().clamp(0.0, 255.0) as u8,
            acc[1].round().clamp(0.0, 255.0) as u8,
            acc[2].round().clamp(0.0, 255.0) as u8,
        ]
    }
}

/// Render one cube face from an equirectangular source.
///
/// The face edge is `min(max_width, source_width / 4)`; each output pixel is
/// projected onto the sphere and reconstructed from the source with the
/// requested kernel. Output is opaque RGBA.
pub fn render_face(src: &ImageBuf, req: &RenderRequest) -> Result<ImageBuf, ConvertError> {
    let natural = src.width() / 4;
    let out_size = match req.max_width {
        Some(cap) => natural.min(cap),
        None => natural,
    };
    if out_size == 0 {
        return Err(ConvertError::InvalidImage(format!(
            "source width {} is too narrow to derive a cube face",
            src.width()
        )));
    }

    debug!(
        "Rendering face {} at {}x{} ({}, rotation {:.3} rad)",
        req.face, out_size, out_size, req.filter, req.rotation
    );

    let sampler = Resampler::new(src, req.filter);
    let scale = 2.0 / out_size as f32;
    let mut data = vec![0u8; CHANNELS * out_size * out_size];

    data.par_chunks_mut(CHANNELS * out_size)
        .enumerate()
        .for_each(|(y, row)| {
            let v = scale * (y as f32 + 0.5) - 1.0;
            for x in 0..out_size {
                let u = scale * (x as f32 + 0.5) - 1.0;
                let dir = req.face.orient(u, v);
                let (x_from, y_from) =
                    projection::project(dir, req.rotation, src.width(), src.height());
                let rgb = sampler.sample(x_from, y_from);
                let o = CHANNELS * x;
                row[o] = rgb[0];
                row[o + 1] = rgb[1];
                row[o + 2] = rgb[2];
                row[o + 3] = 255;
            }
        });

    ImageBuf::from_raw(out_size, out_size, data)
}
