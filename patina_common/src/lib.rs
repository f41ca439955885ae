// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend primitives shared across the Patina brush engine: pixel surfaces,
//! surface patterns, bitmap formats, and the status taxonomy every public
//! operation reports through.
//!
//! This crate knows nothing about brushes. It models the rendering backend a
//! brush is composed onto: a [`Pixmap`][pixmap::Pixmap] is a surface, a
//! [`SurfacePattern`][pattern::SurfacePattern] is a repeatable paint source
//! over one, and a [`Bitmap`][bitmap::Bitmap] is the raw-buffer image an
//! application hands in. Use [`patina`](https://crates.io/crates/patina) for
//! the brush API itself.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(clippy::print_stdout, clippy::print_stderr)]
#![forbid(unsafe_code)]

pub mod bitmap;
pub mod error;
pub mod pattern;
pub mod pixmap;
pub mod rect;

pub use peniko;
pub use peniko::color;
pub use peniko::kurbo;
