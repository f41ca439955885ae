// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture fills: tiled, mirrored, and clamped image patterns.

use crate::graphics::{Graphics, Paint};
use crate::transform::{MatrixOrder, combine};
use patina_common::bitmap::{Bitmap, Image};
use patina_common::error::{Error, Result};
use patina_common::kurbo::Affine;
use patina_common::pattern::SurfacePattern;
use patina_common::peniko::Extend;
use patina_common::pixmap::Pixmap;
use patina_common::rect::IntRect;
use std::sync::Arc;

/// How a texture repeats outside its source rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapMode {
    /// Repeat the source rectangle edge to edge.
    #[default]
    Tile,
    /// Alternate mirroring along the X axis.
    TileFlipX,
    /// Alternate mirroring along the Y axis.
    TileFlipY,
    /// Alternate mirroring along both axes.
    TileFlipXY,
    /// Paint the source rectangle once; edge pixels extend outward.
    Clamp,
}

/// A brush painting a repeated image pattern.
///
/// The derived pattern is built lazily: mutators only mark the brush
/// changed, and the next setup rebuilds the pattern for the active wrap
/// mode before painting. The source image's pixel storage is shared by
/// reference count, so the brush, its clones, and the caller can all hold
/// the image at once.
#[derive(Debug)]
pub struct TextureBrush {
    image: Image,
    rectangle: IntRect,
    wrap_mode: WrapMode,
    transform: Affine,
    changed: bool,
    pattern: Option<SurfacePattern>,
    rebuilds: u64,
}

impl TextureBrush {
    /// Create a texture brush sampling the whole image.
    ///
    /// Fails with [`Error::NotImplemented`] for images without bitmap
    /// backing.
    pub fn new(image: &Image, wrap_mode: WrapMode) -> Result<Self> {
        let bitmap = require_bitmap(image)?;
        let rectangle = IntRect::new(
            0,
            0,
            i32::from(bitmap.width()),
            i32::from(bitmap.height()),
        );
        Ok(Self::assemble(image.clone(), rectangle, wrap_mode))
    }

    /// Create a texture brush sampling a sub-rectangle of the image.
    ///
    /// Fails with [`Error::OutOfRange`] unless the rectangle lies fully
    /// inside the image bounds.
    pub fn with_rect(image: &Image, wrap_mode: WrapMode, rectangle: IntRect) -> Result<Self> {
        let bitmap = require_bitmap(image)?;
        if !rectangle.contained_in(bitmap.width(), bitmap.height()) {
            return Err(Error::OutOfRange);
        }
        Ok(Self::assemble(image.clone(), rectangle, wrap_mode))
    }

    /// Like [`with_rect`](Self::with_rect), with float coordinates
    /// truncated toward zero.
    pub fn with_rect_f32(
        image: &Image,
        wrap_mode: WrapMode,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<Self> {
        Self::with_rect(image, wrap_mode, IntRect::from_f32(x, y, width, height))
    }

    fn assemble(image: Image, rectangle: IntRect, wrap_mode: WrapMode) -> Self {
        Self {
            image,
            rectangle,
            wrap_mode,
            transform: Affine::IDENTITY,
            changed: false,
            pattern: None,
            rebuilds: 0,
        }
    }

    /// The source image.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// The sampled sub-rectangle.
    pub fn rectangle(&self) -> IntRect {
        self.rectangle
    }

    /// The active wrap mode.
    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap_mode
    }

    /// Change the wrap mode. The pattern is rebuilt at the next setup.
    pub fn set_wrap_mode(&mut self, wrap_mode: WrapMode) {
        self.wrap_mode = wrap_mode;
        self.changed = true;
    }

    /// The brush transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replace the brush transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.changed = true;
    }

    /// Reset the brush transform to identity.
    pub fn reset_transform(&mut self) {
        self.transform = Affine::IDENTITY;
        self.changed = true;
    }

    /// Combine a translation into the brush transform.
    pub fn translate_transform(&mut self, dx: f64, dy: f64, order: MatrixOrder) {
        self.transform = combine(self.transform, Affine::translate((dx, dy)), order);
        self.changed = true;
    }

    /// Combine a scale into the brush transform.
    pub fn scale_transform(&mut self, sx: f64, sy: f64, order: MatrixOrder) {
        self.transform = combine(self.transform, Affine::scale_non_uniform(sx, sy), order);
        self.changed = true;
    }

    /// Combine another transform into the brush transform.
    pub fn multiply_transform(&mut self, other: Affine, order: MatrixOrder) {
        self.transform = combine(self.transform, other, order);
        self.changed = true;
    }

    /// Rotate the brush transform by `degrees`.
    ///
    /// The backend rotates about the origin, while a texture rotates about
    /// its own visual center: (width, height), the midpoint of the doubled
    /// pattern rectangle. Shift the axis there, rotate, and shift back.
    pub fn rotate_transform(&mut self, degrees: f64, order: MatrixOrder) {
        let ax = f64::from(self.rectangle.width);
        let ay = f64::from(self.rectangle.height);
        self.transform = combine(self.transform, Affine::translate((-ax, -ay)), order);
        self.transform = combine(self.transform, Affine::rotate(degrees.to_radians()), order);
        self.transform = combine(self.transform, Affine::translate((ax, ay)), order);
        self.changed = true;
    }

    /// How many times the derived pattern has been rebuilt.
    ///
    /// Diagnostic; a setup with no intervening mutation leaves this
    /// unchanged.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Regenerate the derived pattern if needed, compose the paint
    /// transform, and install the pattern as the context's paint source.
    pub(crate) fn setup(&mut self, graphics: &mut Graphics) -> Result<()> {
        let bitmap = require_bitmap(&self.image)?.clone();

        if self.changed || self.pattern.is_none() {
            self.pattern = None;
            let surface = source_surface(&bitmap)?;
            let tile = surface.region(&self.rectangle)?;
            self.pattern = Some(build_pattern(&tile, self.wrap_mode)?);
            self.rebuilds += 1;
            self.changed = false;
            log::debug!(
                "rebuilt {:?} texture pattern (build #{})",
                self.wrap_mode,
                self.rebuilds
            );
        }

        let pattern = self.pattern.as_mut().ok_or(Error::Generic)?;
        // The pattern must stay fixed in texture space no matter how the
        // destination context is transformed at paint time: compose the
        // brush transform with the context transform and sample through
        // the inverse of the product.
        let product = (graphics.transform() * self.transform).inverse();
        pattern.set_transform(product);
        graphics.set_paint(Paint::Pattern(pattern.clone()));
        Ok(())
    }
}

impl Clone for TextureBrush {
    /// A clone shares the image's pixel storage but no derived state: it
    /// starts unbuilt and regenerates its own pattern at first setup.
    fn clone(&self) -> Self {
        Self {
            image: self.image.clone(),
            rectangle: self.rectangle,
            wrap_mode: self.wrap_mode,
            transform: self.transform,
            changed: true,
            pattern: None,
            rebuilds: 0,
        }
    }
}

fn require_bitmap(image: &Image) -> Result<&Arc<Bitmap>> {
    image.as_bitmap().ok_or(Error::NotImplemented)
}

/// The surface to build the pattern from.
///
/// Indexed sources have no direct surface form; those build from a
/// transient direct-color copy that is dropped with the returned surface.
fn source_surface(bitmap: &Bitmap) -> Result<Arc<Pixmap>> {
    if bitmap.format().is_indexed() {
        bitmap.to_direct_rgb()?.surface()
    } else {
        bitmap.surface()
    }
}

/// Build the derived pattern for `wrap_mode` from the cropped source tile.
fn build_pattern(tile: &Pixmap, wrap_mode: WrapMode) -> Result<SurfacePattern> {
    let (surface, extend) = match wrap_mode {
        WrapMode::Tile => (tiled(tile)?, Extend::Repeat),
        WrapMode::TileFlipX => (mirrored_x(tile)?, Extend::Repeat),
        WrapMode::TileFlipY => (mirrored_y(tile)?, Extend::Repeat),
        WrapMode::TileFlipXY => (mirrored_xy(tile)?, Extend::Repeat),
        WrapMode::Clamp => (tile.clone(), Extend::Pad),
    };
    Ok(SurfacePattern::new(Arc::new(surface), extend))
}

/// `2W x 2H`: the source repeated edge to edge.
fn tiled(src: &Pixmap) -> Result<Pixmap> {
    let (width, height) = doubled(src, true, true)?;
    let mut out = Pixmap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            out.set_pixel(x, y, src.sample(x % src.width(), y % src.height()));
        }
    }
    Ok(out)
}

/// `2W x H`: the source, then its mirror image.
///
/// The mirror axis is the last source column rather than the tile edge, so
/// that column appears twice; mirroring about the edge itself leaves a
/// visible seam between repeats.
fn mirrored_x(src: &Pixmap) -> Result<Pixmap> {
    let (width, height) = doubled(src, true, false)?;
    let mut out = Pixmap::new(width, height);
    for y in 0..src.height() {
        for x in 0..src.width() {
            let pixel = src.sample(x, y);
            out.set_pixel(x, y, pixel);
            out.set_pixel(width - 1 - x, y, pixel);
        }
    }
    Ok(out)
}

/// `W x 2H`: the X-axis symmetric construction, mirroring about the last
/// source row.
fn mirrored_y(src: &Pixmap) -> Result<Pixmap> {
    let (width, height) = doubled(src, false, true)?;
    let mut out = Pixmap::new(width, height);
    for y in 0..src.height() {
        for x in 0..src.width() {
            let pixel = src.sample(x, y);
            out.set_pixel(x, y, pixel);
            out.set_pixel(x, height - 1 - y, pixel);
        }
    }
    Ok(out)
}

/// `2W x 2H`, four quadrants: the source, its X mirror, its Y mirror, and
/// its XY mirror, with the same duplicated-edge offsets as the single-axis
/// modes.
fn mirrored_xy(src: &Pixmap) -> Result<Pixmap> {
    let (width, height) = doubled(src, true, true)?;
    let mut out = Pixmap::new(width, height);
    for y in 0..src.height() {
        for x in 0..src.width() {
            let pixel = src.sample(x, y);
            out.set_pixel(x, y, pixel);
            out.set_pixel(width - 1 - x, y, pixel);
            out.set_pixel(x, height - 1 - y, pixel);
            out.set_pixel(width - 1 - x, height - 1 - y, pixel);
        }
    }
    Ok(out)
}

/// The derived-surface size, doubling the requested axes.
///
/// Fails with [`Error::OutOfMemory`] past the backend coordinate limit.
fn doubled(src: &Pixmap, double_x: bool, double_y: bool) -> Result<(u16, u16)> {
    let width = u32::from(src.width()) * if double_x { 2 } else { 1 };
    let height = u32::from(src.height()) * if double_y { 2 } else { 1 };
    if width > Pixmap::MAX_DIMENSION || height > Pixmap::MAX_DIMENSION {
        return Err(Error::OutOfMemory);
    }
    Ok((width as u16, height as u16))
}

#[cfg(test)]
mod tests {
    use super::{TextureBrush, WrapMode, build_pattern, mirrored_x, mirrored_xy, mirrored_y, tiled};
    use crate::graphics::{Graphics, Paint};
    use crate::transform::MatrixOrder;
    use patina_common::bitmap::{Bitmap, Image};
    use patina_common::color::PremulRgba8;
    use patina_common::error::Error;
    use patina_common::kurbo::Affine;
    use patina_common::peniko::Extend;
    use patina_common::pixmap::Pixmap;
    use patina_common::rect::IntRect;

    fn gray(v: u8) -> PremulRgba8 {
        PremulRgba8 { r: v, g: v, b: v, a: 255 }
    }

    /// A pixmap whose pixel at (x, y) is `gray(16 * y + x)`.
    fn numbered(width: u16, height: u16) -> Pixmap {
        let mut pixmap = Pixmap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                pixmap.set_pixel(x, y, gray((16 * y + x) as u8));
            }
        }
        pixmap
    }

    fn numbered_image(width: u16, height: u16) -> Image {
        Image::from(Bitmap::from_pixmap(&numbered(width, height)))
    }

    #[test]
    fn tiled_repeats_the_source() {
        let src = numbered(3, 2);
        let out = tiled(&src).unwrap();

        assert_eq!((out.width(), out.height()), (6, 4));
        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(out.sample(x, y), src.sample(x % 3, y % 2));
            }
        }
    }

    #[test]
    fn mirrored_x_duplicates_the_last_column() {
        let src = numbered(4, 2);
        let out = mirrored_x(&src).unwrap();

        assert_eq!((out.width(), out.height()), (8, 2));
        for y in 0..2 {
            for x in 0..4 {
                assert_eq!(out.sample(x, y), src.sample(x, y));
                assert_eq!(out.sample(7 - x, y), src.sample(x, y));
            }
            // The mirror offset is width - 1, not width: the edge column
            // shows up on both sides of the axis.
            assert_eq!(out.sample(3, y), src.sample(3, y));
            assert_eq!(out.sample(4, y), src.sample(3, y));
        }
    }

    #[test]
    fn mirrored_y_duplicates_the_last_row() {
        let src = numbered(2, 3);
        let out = mirrored_y(&src).unwrap();

        assert_eq!((out.width(), out.height()), (2, 6));
        for x in 0..2 {
            assert_eq!(out.sample(x, 2), src.sample(x, 2));
            assert_eq!(out.sample(x, 3), src.sample(x, 2));
            assert_eq!(out.sample(x, 5), src.sample(x, 0));
        }
    }

    #[test]
    fn mirrored_xy_fills_all_four_quadrants() {
        let src = numbered(3, 3);
        let out = mirrored_xy(&src).unwrap();

        assert_eq!((out.width(), out.height()), (6, 6));
        for y in 0..3 {
            for x in 0..3 {
                let pixel = src.sample(x, y);
                assert_eq!(out.sample(x, y), pixel);
                assert_eq!(out.sample(5 - x, y), pixel);
                assert_eq!(out.sample(x, 5 - y), pixel);
                assert_eq!(out.sample(5 - x, 5 - y), pixel);
            }
        }
    }

    #[test]
    fn clamp_keeps_the_source_size_and_pads() {
        let src = numbered(3, 2);
        let pattern = build_pattern(&src, WrapMode::Clamp).unwrap();

        assert_eq!(pattern.surface().width(), 3);
        assert_eq!(pattern.surface().height(), 2);
        assert_eq!(pattern.extend(), Extend::Pad);
        // Outside the surface, edge pixels repeat.
        assert_eq!(pattern.sample(10.5, 0.5), src.sample(2, 0));
    }

    #[test]
    fn tile_modes_repeat() {
        let src = numbered(3, 2);
        for mode in [
            WrapMode::Tile,
            WrapMode::TileFlipX,
            WrapMode::TileFlipY,
            WrapMode::TileFlipXY,
        ] {
            assert_eq!(build_pattern(&src, mode).unwrap().extend(), Extend::Repeat);
        }
    }

    #[test]
    fn setup_is_idempotent_without_mutation() {
        let image = numbered_image(4, 4);
        let mut graphics = Graphics::new(16, 16);
        let mut brush = TextureBrush::new(&image, WrapMode::Tile).unwrap();

        brush.setup(&mut graphics).unwrap();
        let first = match graphics.paint() {
            Some(Paint::Pattern(pattern)) => pattern.transform(),
            other => panic!("expected a pattern paint source, got {other:?}"),
        };
        brush.setup(&mut graphics).unwrap();
        let second = match graphics.paint() {
            Some(Paint::Pattern(pattern)) => pattern.transform(),
            other => panic!("expected a pattern paint source, got {other:?}"),
        };

        assert_eq!(brush.rebuild_count(), 1);
        assert_eq!(first.as_coeffs(), second.as_coeffs());
    }

    #[test]
    fn each_mutation_forces_exactly_one_rebuild() {
        let image = numbered_image(4, 4);
        let mut graphics = Graphics::new(16, 16);
        let mut brush = TextureBrush::new(&image, WrapMode::Tile).unwrap();

        brush.setup(&mut graphics).unwrap();
        brush.translate_transform(2.0, 0.0, MatrixOrder::Prepend);
        brush.setup(&mut graphics).unwrap();
        assert_eq!(brush.rebuild_count(), 2);

        brush.set_wrap_mode(WrapMode::TileFlipXY);
        brush.setup(&mut graphics).unwrap();
        brush.setup(&mut graphics).unwrap();
        assert_eq!(brush.rebuild_count(), 3);
    }

    #[test]
    fn setup_composes_the_inverted_product_transform() {
        let image = numbered_image(4, 4);
        let mut graphics = Graphics::new(16, 16);
        graphics.set_transform(Affine::scale(2.0));
        let mut brush = TextureBrush::new(&image, WrapMode::Tile).unwrap();
        brush.translate_transform(3.0, 1.0, MatrixOrder::Prepend);

        brush.setup(&mut graphics).unwrap();
        let expected = (graphics.transform() * brush.transform()).inverse();
        match graphics.paint() {
            Some(Paint::Pattern(pattern)) => {
                assert_eq!(pattern.transform().as_coeffs(), expected.as_coeffs());
            }
            other => panic!("expected a pattern paint source, got {other:?}"),
        }
    }

    #[test]
    fn rotation_recenters_on_the_pattern_midpoint() {
        let image = numbered_image(5, 3);
        let mut brush = TextureBrush::with_rect(&image, WrapMode::Tile, IntRect::new(0, 0, 5, 3))
            .unwrap();
        brush.translate_transform(7.0, 2.0, MatrixOrder::Prepend);
        let before = brush.transform();

        brush.rotate_transform(30.0, MatrixOrder::Prepend);

        let mut expected = before;
        expected = expected * Affine::translate((-5.0, -3.0));
        expected = expected * Affine::rotate(30.0_f64.to_radians());
        expected = expected * Affine::translate((5.0, 3.0));
        assert_eq!(brush.transform().as_coeffs(), expected.as_coeffs());
    }

    #[test]
    fn out_of_bounds_rectangles_are_rejected() {
        let image = numbered_image(4, 4);
        for rect in [
            IntRect::new(2, 0, 3, 2),
            IntRect::new(-1, 0, 2, 2),
            IntRect::new(0, 0, 0, 4),
        ] {
            assert_eq!(
                TextureBrush::with_rect(&image, WrapMode::Tile, rect).unwrap_err(),
                Error::OutOfRange
            );
        }
    }

    #[test]
    fn float_rectangles_truncate_toward_zero() {
        let image = numbered_image(4, 4);
        let brush =
            TextureBrush::with_rect_f32(&image, WrapMode::Tile, 1.9, 0.2, 2.8, 3.9).unwrap();
        assert_eq!(brush.rectangle(), IntRect::new(1, 0, 2, 3));
    }

    #[test]
    fn metafile_sources_are_not_implemented() {
        assert_eq!(
            TextureBrush::new(&Image::Metafile, WrapMode::Tile).unwrap_err(),
            Error::NotImplemented
        );
    }

    #[test]
    fn clones_rebuild_independently() {
        let image = numbered_image(4, 4);
        let mut graphics = Graphics::new(16, 16);
        let mut brush = TextureBrush::new(&image, WrapMode::Tile).unwrap();
        brush.setup(&mut graphics).unwrap();

        let mut clone = brush.clone();
        assert_eq!(clone.rebuild_count(), 0);

        clone.scale_transform(2.0, 2.0, MatrixOrder::Prepend);
        assert_eq!(brush.transform(), Affine::IDENTITY);

        clone.setup(&mut graphics).unwrap();
        brush.setup(&mut graphics).unwrap();
        assert_eq!(clone.rebuild_count(), 1);
        // The original was never mutated; its first pattern survives.
        assert_eq!(brush.rebuild_count(), 1);
    }

    #[test]
    fn dropping_an_unbuilt_brush_is_safe() {
        let image = numbered_image(4, 4);
        let brush = TextureBrush::new(&image, WrapMode::Clamp).unwrap();
        drop(brush);
    }
}
