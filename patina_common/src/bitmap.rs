// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bitmap sources: raw pixel buffers, their formats, and the surfaces the
//! backend paints from.

use crate::color::PremulRgba8;
use crate::error::{Error, Result};
use crate::pixmap::Pixmap;
use std::sync::{Arc, OnceLock};

/// The in-memory layout of a bitmap's pixel buffer.
///
/// Direct formats store color per pixel in little-endian BGRA byte order,
/// the layout GDI-family APIs hand around. Indexed formats store palette
/// indices and have no direct surface form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 32 bits per pixel, `[b, g, r, x]` bytes; the `x` byte is ignored.
    Rgb32,
    /// 32 bits per pixel, `[b, g, r, a]` bytes, straight alpha.
    Argb32,
    /// 32 bits per pixel, `[b, g, r, a]` bytes, premultiplied alpha.
    PArgb32,
    /// 1 bit per pixel, palette indices, most significant bit first.
    Indexed1,
    /// 4 bits per pixel, palette indices, high nibble first.
    Indexed4,
    /// 8 bits per pixel, palette indices.
    Indexed8,
}

impl PixelFormat {
    /// Bits occupied by a single pixel.
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Rgb32 | Self::Argb32 | Self::PArgb32 => 32,
            Self::Indexed1 => 1,
            Self::Indexed4 => 4,
            Self::Indexed8 => 8,
        }
    }

    /// Whether pixels are palette indices rather than direct color.
    pub const fn is_indexed(self) -> bool {
        matches!(self, Self::Indexed1 | Self::Indexed4 | Self::Indexed8)
    }

    /// The smallest stride able to hold a row of `width` pixels.
    pub const fn min_stride(self, width: u16) -> usize {
        (width as usize * self.bits_per_pixel() as usize).div_ceil(8)
    }
}

/// A raw-buffer bitmap plus the lazily-built surface the backend paints
/// from.
///
/// The surface is converted from the raw buffer on first use and shared by
/// reference count from then on; the raw buffer itself is never mutated.
#[derive(Debug)]
pub struct Bitmap {
    width: u16,
    height: u16,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
    /// Palette entries as packed `0xAARRGGBB`, for indexed formats.
    palette: Vec<u32>,
    surface: OnceLock<Arc<Pixmap>>,
}

impl Bitmap {
    /// Wrap a raw pixel buffer.
    ///
    /// `data` must hold at least `stride * height` bytes, `stride` must
    /// cover a full row, and indexed formats must carry a non-empty
    /// palette.
    pub fn new(
        width: u16,
        height: u16,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
        palette: Vec<u32>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter);
        }
        if stride < format.min_stride(width) {
            return Err(Error::InvalidParameter);
        }
        if data.len() < stride * usize::from(height) {
            return Err(Error::InvalidParameter);
        }
        if format.is_indexed() && palette.is_empty() {
            return Err(Error::InvalidParameter);
        }
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
            palette,
            surface: OnceLock::new(),
        })
    }

    /// Wrap an already-premultiplied surface as a [`PixelFormat::PArgb32`]
    /// bitmap.
    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let mut data = Vec::with_capacity(pixmap.data().len() * 4);
        for pixel in pixmap.data() {
            data.extend_from_slice(&[pixel.b, pixel.g, pixel.r, pixel.a]);
        }
        Self {
            width: pixmap.width(),
            height: pixmap.height(),
            stride: usize::from(pixmap.width()) * 4,
            format: PixelFormat::PArgb32,
            data,
            palette: Vec::new(),
            surface: OnceLock::new(),
        }
    }

    /// Width of the bitmap in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height of the bitmap in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes per scanline of the raw buffer.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The layout of the raw buffer.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The raw scanline buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Palette entries as packed `0xAARRGGBB`; empty for direct formats.
    pub fn palette(&self) -> &[u32] {
        &self.palette
    }

    /// The backend surface for this bitmap.
    ///
    /// Built from the raw buffer on first call and shared thereafter.
    /// Indexed formats have no direct surface form; expand them with
    /// [`to_direct_rgb`](Self::to_direct_rgb) first.
    pub fn surface(&self) -> Result<Arc<Pixmap>> {
        if self.format.is_indexed() {
            return Err(Error::InvalidParameter);
        }
        let surface = self.surface.get_or_init(|| {
            log::debug!(
                "building {}x{} surface from a {:?} bitmap",
                self.width,
                self.height,
                self.format
            );
            Arc::new(self.convert_direct())
        });
        Ok(surface.clone())
    }

    /// Convert the direct-color raw buffer into a premultiplied surface.
    fn convert_direct(&self) -> Pixmap {
        let width = usize::from(self.width);
        let mut buf = Vec::with_capacity(width * usize::from(self.height));
        for y in 0..usize::from(self.height) {
            let row = &self.data[y * self.stride..y * self.stride + width * 4];
            for px in row.chunks_exact(4) {
                let [b, g, r, a] = [px[0], px[1], px[2], px[3]];
                buf.push(match self.format {
                    PixelFormat::Rgb32 => PremulRgba8 { r, g, b, a: 255 },
                    PixelFormat::Argb32 => premultiply(r, g, b, a),
                    PixelFormat::PArgb32 => PremulRgba8 { r, g, b, a },
                    _ => unreachable!("indexed formats are rejected by surface()"),
                });
            }
        }
        Pixmap::from_parts(buf, self.width, self.height)
    }

    /// Expand an indexed bitmap into a direct-color [`PixelFormat::Argb32`]
    /// copy, leaving this bitmap untouched.
    pub fn to_direct_rgb(&self) -> Result<Self> {
        if !self.format.is_indexed() {
            return Err(Error::InvalidParameter);
        }
        let width = usize::from(self.width);
        let mut data = Vec::with_capacity(width * usize::from(self.height) * 4);
        for y in 0..usize::from(self.height) {
            let row = &self.data[y * self.stride..(y + 1) * self.stride];
            for x in 0..width {
                let index = match self.format {
                    PixelFormat::Indexed8 => row[x],
                    PixelFormat::Indexed4 => {
                        let byte = row[x / 2];
                        if x % 2 == 0 { byte >> 4 } else { byte & 0x0f }
                    }
                    PixelFormat::Indexed1 => (row[x / 8] >> (7 - x % 8)) & 1,
                    _ => unreachable!("direct formats are rejected above"),
                };
                // Indices past the palette decode as transparent black.
                let argb = self.palette.get(usize::from(index)).copied().unwrap_or(0);
                let [a, r, g, b] = argb.to_be_bytes();
                data.extend_from_slice(&[b, g, r, a]);
            }
        }
        Self::new(
            self.width,
            self.height,
            width * 4,
            PixelFormat::Argb32,
            data,
            Vec::new(),
        )
    }
}

fn premultiply(r: u8, g: u8, b: u8, a: u8) -> PremulRgba8 {
    let alpha = u16::from(a);
    let multiply = |c: u8| ((alpha * u16::from(c)) / 255) as u8;
    PremulRgba8 {
        r: multiply(r),
        g: multiply(g),
        b: multiply(b),
        a,
    }
}

/// An image a brush can sample from.
///
/// Pixel storage is shared: cloning an `Image` clones a reference, and
/// every holder keeps the underlying bitmap alive until the last one is
/// dropped.
#[derive(Clone, Debug)]
pub enum Image {
    /// A bitmap-backed image.
    Bitmap(Arc<Bitmap>),
    /// A recorded-command image. Playback is not supported; texture brushes
    /// reject metafile sources.
    Metafile,
}

impl Image {
    /// The bitmap behind this image, if it is bitmap-backed.
    pub fn as_bitmap(&self) -> Option<&Arc<Bitmap>> {
        match self {
            Self::Bitmap(bitmap) => Some(bitmap),
            Self::Metafile => None,
        }
    }
}

impl From<Bitmap> for Image {
    fn from(bitmap: Bitmap) -> Self {
        Self::Bitmap(Arc::new(bitmap))
    }
}
