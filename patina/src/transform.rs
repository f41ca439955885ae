// Copyright 2026 the Patina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matrix-order composition helpers.

use patina_common::kurbo::Affine;

/// The order in which a new transform combines with an existing one.
///
/// `Prepend` applies the new transform before the existing one, `Append`
/// after it. Prepend is the GDI+ default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatrixOrder {
    /// The new transform runs first.
    #[default]
    Prepend,
    /// The new transform runs last.
    Append,
}

/// Combine `op` into `current` in the given order.
pub(crate) fn combine(current: Affine, op: Affine, order: MatrixOrder) -> Affine {
    match order {
        MatrixOrder::Prepend => current * op,
        MatrixOrder::Append => op * current,
    }
}

#[cfg(test)]
mod tests {
    use super::{MatrixOrder, combine};
    use patina_common::kurbo::{Affine, Point};

    #[test]
    fn prepend_applies_the_new_transform_first() {
        let current = Affine::scale(2.0);
        let op = Affine::translate((1.0, 0.0));

        // Translate, then scale.
        let prepended = combine(current, op, MatrixOrder::Prepend);
        assert_eq!(prepended * Point::new(0.0, 0.0), Point::new(2.0, 0.0));

        // Scale, then translate.
        let appended = combine(current, op, MatrixOrder::Append);
        assert_eq!(appended * Point::new(0.0, 0.0), Point::new(1.0, 0.0));
    }
}
