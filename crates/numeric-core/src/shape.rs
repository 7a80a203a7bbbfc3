// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Shape descriptors and extent checks.

use crate::TensorError;
use std::fmt;

/// Realized extents of a container, one per axis.
///
/// Containers carry their extents inline as fixed-rank arrays; `Shape` is
/// the owned, rank-erased form used in error reports, queries, and
/// serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    extents: Vec<u32>,
}

impl Shape {
    /// Creates a shape from per-axis extents.
    ///
    /// # Examples
    /// ```
    /// use numeric_core::Shape;
    /// let s = Shape::new(vec![2, 3]);
    /// assert_eq!(s.rank(), 2);
    /// assert_eq!(s.count(), 6);
    /// ```
    pub fn new(extents: Vec<u32>) -> Self {
        Self { extents }
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// Per-axis extents.
    #[inline]
    pub fn extents(&self) -> &[u32] {
        &self.extents
    }

    /// Total element count: the product of all extents.
    pub fn count(&self) -> usize {
        self.extents.iter().map(|&e| e as usize).product()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, e) in self.extents.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        write!(f, ")")
    }
}

impl From<&[u32]> for Shape {
    fn from(extents: &[u32]) -> Self {
        Self::new(extents.to_vec())
    }
}

impl From<Vec<u32>> for Shape {
    fn from(extents: Vec<u32>) -> Self {
        Self::new(extents)
    }
}

/// Verifies that two extent lists agree, rank and all.
///
/// Every shape check in the crate funnels through here so that mismatch
/// errors carry both offending shapes and the operation name.
pub(crate) fn check_match(
    op: &'static str,
    lhs: &[u32],
    rhs: &[u32],
) -> Result<(), TensorError> {
    if lhs != rhs {
        return Err(TensorError::ShapeMismatch {
            op,
            lhs: Shape::from(lhs),
            rhs: Shape::from(rhs),
        });
    }
    Ok(())
}
