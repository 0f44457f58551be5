//! ImageBuf - owned RGBA8 pixel buffer shared by the whole pipeline.
//!
//! **Why**: decoded panoramas and rendered faces need one in-memory layout
//! (interleaved RGBA, row-major, stride = 4 * width) that the resampler, the
//! job pool and the encoders all agree on, independent of the on-disk format.
//!
//! **Used by**: convert (source taps), jobs (shared source across face
//! tasks), encode and compose (persisting results).

use crate::convert::ConvertError;

/// Bytes per pixel (interleaved RGBA).
pub const CHANNELS: usize = 4;

/// Owned RGBA8 image: `width * height` pixels, row-major, no row padding.
///
/// Dimensions and buffer length are validated at construction and the
/// fields stay private, so a malformed image can never reach the sampling
/// code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuf {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ImageBuf {
    /// Zeroed image (black, fully transparent).
    ///
    /// Panics when either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "image dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            data: vec![0; CHANNELS * width * height],
        }
    }

    /// Wrap an existing interleaved RGBA buffer.
    ///
    /// Fails with [`ConvertError::InvalidImage`] when either dimension is
    /// zero, or when the buffer length does not match `4 * width * height`
    /// exactly (no partial rows).
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ConvertError> {
        if width == 0 || height == 0 {
            return Err(ConvertError::InvalidImage(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = CHANNELS * width * height;
        if data.len() != expected {
            return Err(ConvertError::InvalidImage(format!(
                "buffer length {} does not match {}x{} RGBA (expected {})",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take over a decoded `image` crate buffer (already RGBA8, so the
    /// length invariant holds by construction).
    ///
    /// Panics when either dimension is zero.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        assert!(
            w > 0 && h > 0,
            "image dimensions must be positive, got {}x{}",
            w,
            h
        );
        Self {
            width: w as usize,
            height: h as usize,
            data: img.into_raw(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw interleaved RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw bytes (length is fixed, the invariant
    /// cannot be broken through this).
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte offset of pixel (x, y).
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        CHANNELS * (y * self.width + x)
    }

    /// RGBA bytes of pixel (x, y). Coordinates must be in bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let o = self.offset(x, y);
        &self.data[o..o + CHANNELS]
    }

    /// Overwrite pixel (x, y).
    pub fn put_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let o = self.offset(x, y);
        self.data[o..o + CHANNELS].copy_from_slice(&rgba);
    }

    /// Flood the whole image with one color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.data.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Hand the buffer over to the `image` crate for encoding.
    pub fn into_rgba_image(self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width as u32, self.height as u32, self.data)
            .expect("buffer length matches dimensions")
    }

    /// Alpha-stripped copy for encoders without alpha support (JPEG).
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let mut rgb = Vec::with_capacity(3 * self.width * self.height);
        for px in self.data.chunks_exact(CHANNELS) {
            rgb.extend_from_slice(&px[..3]);
        }
        image::RgbImage::from_raw(self.width as u32, self.height as u32, rgb)
            .expect("buffer length matches dimensions")
    }
}
