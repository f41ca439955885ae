// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brush dispatch: one closed sum over every brush variant.

use crate::graphics::Graphics;
use crate::solid::SolidBrush;
use crate::texture::TextureBrush;
use patina_common::error::Result;

/// The type tag of a brush variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushType {
    /// A solid color fill.
    SolidColor,
    /// A texture fill sampling from an image.
    TextureFill,
}

/// A paint source determining how fill operations color a shape.
///
/// The variants form a closed set and every protocol operation dispatches
/// on the tag. Cloning follows per-variant semantics: a texture clone
/// shares the source image's pixel storage but regenerates its own derived
/// pattern. Dropping a brush releases the cached pattern and the brush's
/// reference to the shared image.
#[derive(Clone, Debug)]
pub enum Brush {
    /// A solid color fill.
    Solid(SolidBrush),
    /// A texture fill.
    Texture(TextureBrush),
}

impl Brush {
    /// The tag identifying this brush's variant.
    pub fn brush_type(&self) -> BrushType {
        match self {
            Self::Solid(_) => BrushType::SolidColor,
            Self::Texture(_) => BrushType::TextureFill,
        }
    }

    /// Install this brush as the context's active paint source.
    ///
    /// Drawing operations call this immediately before painting. A texture
    /// brush regenerates its derived pattern here if it was mutated since
    /// the last setup.
    pub fn setup(&mut self, graphics: &mut Graphics) -> Result<()> {
        match self {
            Self::Solid(solid) => solid.setup(graphics),
            Self::Texture(texture) => texture.setup(graphics),
        }
    }
}

impl From<SolidBrush> for Brush {
    fn from(brush: SolidBrush) -> Self {
        Self::Solid(brush)
    }
}

impl From<TextureBrush> for Brush {
    fn from(brush: TextureBrush) -> Self {
        Self::Texture(brush)
    }
}
