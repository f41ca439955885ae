// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Solid color fills.

use crate::color::Argb;
use crate::graphics::{Graphics, Paint};
use patina_common::error::Result;

/// A brush filling with a single color.
#[derive(Clone, Debug)]
pub struct SolidBrush {
    color: Argb,
}

impl SolidBrush {
    /// Create a brush with the given fill color.
    pub fn new(color: Argb) -> Self {
        Self { color }
    }

    /// The current fill color.
    pub fn color(&self) -> Argb {
        self.color
    }

    /// Replace the fill color. Takes effect at the next setup.
    pub fn set_color(&mut self, color: Argb) {
        self.color = color;
    }

    /// Decompose the color into normalized channels and install it as the
    /// context's paint source.
    ///
    /// A solid brush holds no derived state, so setup never rebuilds
    /// anything and always succeeds.
    pub(crate) fn setup(&self, graphics: &mut Graphics) -> Result<()> {
        let premul = self.color.to_opaque_color().premultiply().to_rgba8();
        graphics.set_paint(Paint::Solid(premul));
        Ok(())
    }
}
