// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graphics context: a destination surface, a current transform, and
//! the active paint source.

use crate::brush::Brush;
use patina_common::color::PremulRgba8;
use patina_common::error::{Error, Result};
use patina_common::kurbo::Affine;
use patina_common::pattern::SurfacePattern;
use patina_common::pixmap::Pixmap;
use patina_common::rect::IntRect;

/// The active paint source of a graphics context.
#[derive(Clone, Debug)]
pub enum Paint {
    /// A premultiplied solid color.
    Solid(PremulRgba8),
    /// A surface pattern, sampled per pixel through its transform.
    Pattern(SurfacePattern),
}

/// A drawing destination with a current transformation matrix and a paint
/// source installed by the last brush setup.
#[derive(Debug)]
pub struct Graphics {
    target: Pixmap,
    transform: Affine,
    paint: Option<Paint>,
}

impl Graphics {
    /// Create a context rendering into a transparent `width` x `height`
    /// target.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            target: Pixmap::new(width, height),
            transform: Affine::IDENTITY,
            paint: None,
        }
    }

    /// The current transformation matrix.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replace the current transformation matrix.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// The active paint source, if a brush has been set up.
    pub fn paint(&self) -> Option<&Paint> {
        self.paint.as_ref()
    }

    /// Install a paint source. Brushes call this from their setup.
    pub fn set_paint(&mut self, paint: Paint) {
        self.paint = Some(paint);
    }

    /// Fill an axis-aligned device-space rectangle with `brush`.
    ///
    /// The brush is set up against this context first, so a changed brush
    /// regenerates its pattern before any pixel is written. The rectangle
    /// is clipped to the target.
    pub fn fill_rect(&mut self, brush: &mut Brush, rect: IntRect) -> Result<()> {
        brush.setup(self)?;
        let paint = self.paint.clone().ok_or(Error::Generic)?;

        let x0 = rect.x.clamp(0, i32::from(self.target.width()));
        let y0 = rect.y.clamp(0, i32::from(self.target.height()));
        let x1 = rect
            .x
            .saturating_add(rect.width)
            .clamp(x0, i32::from(self.target.width()));
        let y1 = rect
            .y
            .saturating_add(rect.height)
            .clamp(y0, i32::from(self.target.height()));

        for y in y0..y1 {
            for x in x0..x1 {
                let src = match &paint {
                    Paint::Solid(color) => *color,
                    // Sample at the pixel center.
                    Paint::Pattern(pattern) => {
                        pattern.sample(f64::from(x) + 0.5, f64::from(y) + 0.5)
                    }
                };
                let dst = self.target.sample(x as u16, y as u16);
                self.target.set_pixel(x as u16, y as u16, over(src, dst));
            }
        }
        Ok(())
    }

    /// The rendered target.
    pub fn target(&self) -> &Pixmap {
        &self.target
    }

    /// Consume the context and hand back the rendered target.
    pub fn into_pixmap(self) -> Pixmap {
        self.target
    }
}

/// Premultiplied source-over compositing.
fn over(src: PremulRgba8, dst: PremulRgba8) -> PremulRgba8 {
    let inv = 255 - u16::from(src.a);
    let blend = |s: u8, d: u8| (u16::from(s) + (u16::from(d) * inv) / 255) as u8;
    PremulRgba8 {
        r: blend(src.r, dst.r),
        g: blend(src.g, dst.g),
        b: blend(src.b, dst.b),
        a: blend(src.a, dst.a),
    }
}
