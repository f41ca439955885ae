// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface patterns: repeatable, transformable paint sources.

use crate::color::PremulRgba8;
use crate::kurbo::{Affine, Point};
use crate::peniko::Extend;
use crate::pixmap::Pixmap;
use std::sync::Arc;

const TRANSPARENT: PremulRgba8 = PremulRgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

/// A paintable source backed by a pixel surface.
///
/// The pattern holds its surface by reference count: cloning a pattern
/// shares the surface and copies the extend policy and sampling transform,
/// so a consumer can keep a snapshot while the producer rebuilds its own.
#[derive(Debug, Clone)]
pub struct SurfacePattern {
    surface: Arc<Pixmap>,
    extend: Extend,
    transform: Affine,
}

impl SurfacePattern {
    /// Wrap a surface in a pattern with the given extend policy and an
    /// identity sampling transform.
    pub fn new(surface: Arc<Pixmap>, extend: Extend) -> Self {
        Self {
            surface,
            extend,
            transform: Affine::IDENTITY,
        }
    }

    /// The surface the pattern samples from.
    pub fn surface(&self) -> &Arc<Pixmap> {
        &self.surface
    }

    /// How positions outside the surface resolve.
    pub fn extend(&self) -> Extend {
        self.extend
    }

    /// The sampling transform, mapping device space into pattern space.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Replace the sampling transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Sample the pattern at a device-space position.
    ///
    /// The position is pushed through the sampling transform, snapped to
    /// the nearest pixel, and resolved against the extend policy. An empty
    /// surface samples as transparent black.
    pub fn sample(&self, x: f64, y: f64) -> PremulRgba8 {
        let p = self.transform * Point::new(x, y);
        let px = resolve(p.x.floor() as i64, self.surface.width(), self.extend);
        let py = resolve(p.y.floor() as i64, self.surface.height(), self.extend);
        match (px, py) {
            (Some(px), Some(py)) => self.surface.sample(px, py),
            _ => TRANSPARENT,
        }
    }
}

/// Map a pattern-space coordinate onto `0..len` per the extend policy.
fn resolve(coord: i64, len: u16, extend: Extend) -> Option<u16> {
    if len == 0 {
        return None;
    }
    let len = i64::from(len);
    let resolved = match extend {
        Extend::Pad => coord.clamp(0, len - 1),
        Extend::Repeat => coord.rem_euclid(len),
        Extend::Reflect => {
            let m = coord.rem_euclid(2 * len);
            if m < len { m } else { 2 * len - 1 - m }
        }
    };
    Some(resolved as u16)
}
