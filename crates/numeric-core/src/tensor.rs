// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rank-generic containers.
//!
//! `Tensor<T, R>` carries `R` runtime extents and heap storage. It uses the
//! same first-axis-fastest (column-major) linear addressing as
//! [`Matrix`](crate::Matrix): the offset of an index tuple is the
//! accumulated-stride sum `i0 + d0*(i1 + d1*(i2 + ...))`.
//!
//! Compile-time extents exist for ranks 1 and 2 through
//! [`Vector`](crate::Vector) and [`Matrix`](crate::Matrix); higher ranks
//! are runtime-shaped.

use crate::dense::Dense;
use crate::element::Element;
use crate::error::TensorError;
use crate::shape;
use numeric_store::Store;

/// A rank-`R` numeric container with runtime extents.
///
/// # Examples
/// ```
/// use numeric_core::{Dense, Tensor};
///
/// let mut t: Tensor<f64, 3> = Tensor::with_extents([2, 3, 4]);
/// assert_eq!(t.len(), 24);
/// t[[1, 2, 3]] = 5.0;
/// assert_eq!(t[[1, 2, 3]], 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct Tensor<T: Element, const R: usize> {
    store: Store<T, [T; 0]>,
    shape: [u32; R],
}

impl<T: Element, const R: usize> Tensor<T, R> {
    /// A fresh, unallocated tensor.
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            shape: [0; R],
        }
    }

    /// A zero-filled tensor with the given per-axis extents.
    pub fn with_extents(extents: [u32; R]) -> Self {
        let mut t = Self::new();
        t.alloc(extents);
        t
    }

    /// Reserves zero-filled storage for `extents`. A silent no-op when
    /// storage already exists; resize by calling [`Tensor::free`] first.
    pub fn alloc(&mut self, extents: [u32; R]) {
        if self.store.is_allocated() {
            return;
        }
        let count = extents.iter().map(|&e| e as usize).product::<usize>();
        self.store.alloc(count);
        self.shape = extents;
    }

    /// Releases the storage and returns to the unallocated state.
    pub fn free(&mut self) {
        self.store.free();
        self.shape = [0; R];
    }

    /// Number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        R
    }

    /// Flat offset of an index tuple (first axis fastest).
    #[inline]
    pub fn offset(&self, index: [usize; R]) -> usize {
        let mut offset = 0;
        let mut stride = 1;
        for i in 0..R {
            offset += index[i] * stride;
            stride *= self.shape[i] as usize;
        }
        offset
    }
}

impl<T: Element, const R: usize> Dense for Tensor<T, R> {
    type Elem = T;

    #[inline]
    fn extents(&self) -> &[u32] {
        &self.shape
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        self.store.as_slice()
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.store.as_mut_slice()
    }

    #[inline]
    fn is_allocated(&self) -> bool {
        self.store.is_allocated()
    }

    fn realize(&mut self, op: &'static str, extents: &[u32]) -> Result<(), TensorError> {
        if self.store.is_allocated() {
            return shape::check_match(op, &self.shape, extents);
        }
        match <[u32; R]>::try_from(extents) {
            Ok(e) => {
                self.alloc(e);
                Ok(())
            }
            Err(_) => Err(TensorError::ShapeMismatch {
                op,
                lhs: (&self.shape[..]).into(),
                rhs: extents.into(),
            }),
        }
    }
}

impl<T: Element, const R: usize> Default for Tensor<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element, const R: usize> std::ops::Index<usize> for Tensor<T, R> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.as_slice()[i]
    }
}

impl<T: Element, const R: usize> std::ops::IndexMut<usize> for Tensor<T, R> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.as_mut_slice()[i]
    }
}

impl<T: Element, const R: usize> std::ops::Index<[usize; R]> for Tensor<T, R> {
    type Output = T;

    #[inline]
    fn index(&self, index: [usize; R]) -> &T {
        let offset = self.offset(index);
        &self.as_slice()[offset]
    }
}

impl<T: Element, const R: usize> std::ops::IndexMut<[usize; R]> for Tensor<T, R> {
    #[inline]
    fn index_mut(&mut self, index: [usize; R]) -> &mut T {
        let offset = self.offset(index);
        &mut self.as_mut_slice()[offset]
    }
}

impl<T: Element, const R: usize> PartialEq for Tensor<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.as_slice() == other.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_and_extents() {
        let t: Tensor<f64, 2> = Tensor::with_extents([2, 3]);
        assert!(t.is_allocated());
        assert_eq!(t.len(), 6);
        assert_eq!(t.extents(), &[2, 3]);
        assert_eq!(t.rank(), 2);
    }

    #[test]
    fn test_offset_is_first_axis_fastest() {
        let t: Tensor<f64, 3> = Tensor::with_extents([2, 3, 4]);
        assert_eq!(t.offset([0, 0, 0]), 0);
        assert_eq!(t.offset([1, 0, 0]), 1);
        assert_eq!(t.offset([0, 1, 0]), 2);
        assert_eq!(t.offset([0, 0, 1]), 6);
        assert_eq!(t.offset([1, 2, 3]), 1 + 2 * 2 + 3 * 6);
    }

    #[test]
    fn test_index_tuple() {
        let mut t: Tensor<f64, 2> = Tensor::with_extents([2, 3]);
        t[[1, 2]] = 8.0;
        assert_eq!(t[1 + 2 * 2], 8.0);
    }

    #[test]
    fn test_assign_matching_extents() {
        let mut a: Tensor<f64, 2> = Tensor::with_extents([2, 3]);
        a.set_constant(4.0);

        let mut b: Tensor<f64, 2> = Tensor::with_extents([2, 3]);
        b.assign(&a).unwrap();
        assert_eq!(b.as_slice(), &[4.0; 6]);

        a[[0, 0]] = 0.0;
        assert_eq!(b[[0, 0]], 4.0);
    }

    #[test]
    fn test_assign_transposed_extents_fails() {
        let a: Tensor<f64, 2> = Tensor::with_extents([2, 3]);
        let mut b: Tensor<f64, 2> = Tensor::with_extents([3, 2]);
        let err = b.assign(&a).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_assign_allocates_unallocated() {
        let a: Tensor<f64, 2> = Tensor::with_extents([2, 3]);
        let mut b: Tensor<f64, 2> = Tensor::new();
        b.assign(&a).unwrap();
        assert_eq!(b.extents(), &[2, 3]);
    }

    #[test]
    fn test_free_and_reallocate() {
        let mut t: Tensor<f64, 1> = Tensor::with_extents([3]);
        t.set_one();
        t.free();
        assert!(!t.is_allocated());
        t.alloc([1]);
        assert_eq!(t.len(), 1);
        assert_eq!(t[0], 0.0);
    }

    #[test]
    fn test_expression_over_tensors() {
        let mut a: Tensor<f64, 3> = Tensor::with_extents([2, 2, 2]);
        a.set_constant(3.0);

        let mut out: Tensor<f64, 3> = Tensor::with_extents([2, 2, 2]);
        out.set_one();
        out.add_from(&a * 2.0).unwrap();
        assert_eq!(out.as_slice(), &[7.0; 8]);
    }
}
