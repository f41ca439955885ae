// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A GDI+-style brush engine over a CPU pixel backend.
//!
//! Patina implements the brush subsystem of a GDI+-compatible 2D API: solid
//! color fills and texture fills with the five GDI+ wrap modes. A texture
//! brush samples a rectangle out of a [`Bitmap`], derives a tiled, mirrored,
//! or clamped surface from it, and keeps that derived pattern cached until a
//! mutation marks the brush changed. Drawing operations set a brush up
//! against a [`Graphics`] context immediately before painting; setup
//! composes the brush transform with the context's current transform and
//! installs the pattern as the active paint source.
//!
//! ```
//! use patina::{Argb, Brush, Graphics, IntRect, SolidBrush};
//!
//! let mut graphics = Graphics::new(64, 64);
//! let mut brush = Brush::from(SolidBrush::new(Argb::from_argb(255, 200, 40, 40)));
//! graphics.fill_rect(&mut brush, IntRect::new(8, 8, 48, 48))?;
//! # Ok::<(), patina::Error>(())
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(clippy::print_stdout, clippy::print_stderr)]
#![forbid(unsafe_code)]

mod brush;
mod color;
mod graphics;
mod reclaim;
mod solid;
mod texture;
mod transform;

pub use brush::{Brush, BrushType};
pub use color::Argb;
pub use graphics::{Graphics, Paint};
pub use reclaim::ReclaimQueue;
pub use solid::SolidBrush;
pub use texture::{TextureBrush, WrapMode};
pub use transform::MatrixOrder;

pub use patina_common::bitmap::{Bitmap, Image, PixelFormat};
pub use patina_common::error::{Error, Result};
pub use patina_common::pattern::SurfacePattern;
pub use patina_common::pixmap::Pixmap;
pub use patina_common::rect::IntRect;
pub use patina_common::{kurbo, peniko};
