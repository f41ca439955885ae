// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The status taxonomy shared by every public operation.

use thiserror::Error;

/// Errors reported by brush and backend operations.
///
/// The set mirrors the status codes of the GDI+ API this engine is modeled
/// on, with one correction: a bounds-violating source rectangle reports
/// [`Error::OutOfRange`] instead of being folded into
/// [`Error::OutOfMemory`] as the original API did.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// An argument was malformed or an object is not in a usable state.
    #[error("invalid parameter")]
    InvalidParameter,
    /// A source rectangle reaches outside the bounds of its image.
    #[error("source rectangle out of image bounds")]
    OutOfRange,
    /// A backend surface could not be allocated.
    #[error("surface allocation failed")]
    OutOfMemory,
    /// The operation is not supported for this image type.
    #[error("not implemented for this image type")]
    NotImplemented,
    /// The backend reported success but left no usable pattern behind.
    #[error("backend produced no pattern")]
    Generic,
}

/// The result type used throughout the workspace.
pub type Result<T, E = Error> = core::result::Result<T, E>;
