// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The container seam: uniform access plus the destination-combining
//! operations that consume deferred expressions.
//!
//! [`Dense`] is implemented by every container ([`Vector`](crate::Vector),
//! [`Matrix`](crate::Matrix), [`Tensor`](crate::Tensor)) and is the type the
//! expression layer is generic over. Its provided methods are the five
//! destination combines — `assign`, `add_from`, `sub_from`,
//! `mul_from`, `div_from` — each accepting anything that implements
//! [`Eval`]: a deferred scalar or pair expression, or a plain `&container`
//! (the degenerate case that dispatches straight to the elementwise
//! kernels).
//!
//! Shape checks always run before any kernel touches the destination, so a
//! failed combine leaves the destination bit-for-bit unchanged.

use crate::element::Element;
use crate::error::TensorError;
use crate::expr::{tag, ScalarExpr};
use crate::shape;
use num_traits::{One, Zero};

/// A contiguous, shaped, homogeneous numeric container.
pub trait Dense {
    /// The element type.
    type Elem: Element;

    /// Realized per-axis extents (all zero while a dynamic container is
    /// unallocated).
    fn extents(&self) -> &[u32];

    /// All elements in storage order (empty while unallocated).
    fn as_slice(&self) -> &[Self::Elem];

    /// All elements, mutably.
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];

    /// Whether the container currently holds storage.
    fn is_allocated(&self) -> bool;

    /// Makes the container match `extents`: verifies them when storage
    /// exists, allocates zero-filled storage when a dynamic container is
    /// still unallocated. Fails with [`TensorError::ShapeMismatch`] when
    /// the extents cannot be satisfied.
    fn realize(&mut self, op: &'static str, extents: &[u32]) -> Result<(), TensorError>;

    /// Total element count.
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the container holds zero elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── fills ──────────────────────────────────────────────────────

    /// Sets every element to zero. A no-op on unallocated containers.
    fn set_zero(&mut self) {
        self.set_constant(<Self::Elem as Zero>::zero());
    }

    /// Sets every element to one. A no-op on unallocated containers.
    fn set_one(&mut self) {
        self.set_constant(<Self::Elem as One>::one());
    }

    /// Sets every element to `value`. A no-op on unallocated containers.
    fn set_constant(&mut self, value: Self::Elem) {
        self.as_mut_slice().fill(value);
    }

    // ── destination combines ───────────────────────────────────────

    /// `self := src`, elementwise.
    ///
    /// An unallocated dynamic destination is first allocated to the
    /// source's shape; otherwise the shapes must already match.
    ///
    /// # Examples
    /// ```
    /// use numeric_core::{Dense, Vector};
    ///
    /// let mut a: Vector<f64, 4> = Vector::new();
    /// a.set_constant(2.0);
    ///
    /// let mut b: Vector<f64, 4> = Vector::new();
    /// b.assign(&a * 3.0).unwrap();
    /// assert_eq!(b.as_slice(), &[6.0; 4]);
    /// ```
    fn assign<E: Eval<Self::Elem>>(&mut self, src: E) -> Result<(), TensorError>
    where
        Self: Sized,
    {
        self.realize("assign", src.extents())?;
        src.assign_to(self.as_mut_slice());
        Ok(())
    }

    /// `self += src`, elementwise. The destination must be allocated.
    fn add_from<E: Eval<Self::Elem>>(&mut self, src: E) -> Result<(), TensorError>
    where
        Self: Sized,
    {
        if !self.is_allocated() {
            return Err(TensorError::Unallocated { op: "add_from" });
        }
        shape::check_match("add_from", self.extents(), src.extents())?;
        src.add_to(self.as_mut_slice());
        Ok(())
    }

    /// `self -= src`, elementwise. The destination must be allocated.
    fn sub_from<E: Eval<Self::Elem>>(&mut self, src: E) -> Result<(), TensorError>
    where
        Self: Sized,
    {
        if !self.is_allocated() {
            return Err(TensorError::Unallocated { op: "sub_from" });
        }
        shape::check_match("sub_from", self.extents(), src.extents())?;
        src.sub_to(self.as_mut_slice());
        Ok(())
    }

    /// `self *= src`, elementwise (not a matrix product). The destination
    /// must be allocated.
    fn mul_from<E: Eval<Self::Elem>>(&mut self, src: E) -> Result<(), TensorError>
    where
        Self: Sized,
    {
        if !self.is_allocated() {
            return Err(TensorError::Unallocated { op: "mul_from" });
        }
        shape::check_match("mul_from", self.extents(), src.extents())?;
        src.mul_to(self.as_mut_slice());
        Ok(())
    }

    /// `self /= src`, elementwise. The destination must be allocated.
    fn div_from<E: Eval<Self::Elem>>(&mut self, src: E) -> Result<(), TensorError>
    where
        Self: Sized,
    {
        if !self.is_allocated() {
            return Err(TensorError::Unallocated { op: "div_from" });
        }
        shape::check_match("div_from", self.extents(), src.extents())?;
        src.div_to(self.as_mut_slice());
        Ok(())
    }

    // ── reversed scalar expressions ────────────────────────────────

    /// Deferred `scalar - self`. The operator form (`s - &v`) exists for
    /// `f32`/`f64`; this method covers every element type.
    fn rsub(&self, scalar: Self::Elem) -> ScalarExpr<'_, Self, tag::RSub>
    where
        Self: Sized,
    {
        ScalarExpr::new(self, scalar)
    }

    /// Deferred `scalar / self`, elementwise.
    fn rdiv(&self, scalar: Self::Elem) -> ScalarExpr<'_, Self, tag::RDiv>
    where
        Self: Sized,
    {
        ScalarExpr::new(self, scalar)
    }
}

/// A value that can be combined into a destination buffer: a deferred
/// expression, or a plain container reference.
///
/// The five methods are the destination-operator axis of the dispatch
/// matrix; which kernel each one reaches is decided entirely by the
/// implementing type's source tag and the element type.
pub trait Eval<T: Element>: Sized {
    /// Realized extents of the operand(s), used for the pre-kernel check.
    fn extents(&self) -> &[u32];

    /// `dest := R`.
    fn assign_to(self, dest: &mut [T]);
    /// `dest += R`.
    fn add_to(self, dest: &mut [T]);
    /// `dest -= R`.
    fn sub_to(self, dest: &mut [T]);
    /// `dest *= R`.
    fn mul_to(self, dest: &mut [T]);
    /// `dest /= R`.
    fn div_to(self, dest: &mut [T]);
}

/// Plain containers are the degenerate expression: the identity source,
/// dispatched straight to the direct elementwise kernels.
impl<T: Element, C: Dense<Elem = T>> Eval<T> for &C {
    #[inline]
    fn extents(&self) -> &[u32] {
        Dense::extents(*self)
    }

    fn assign_to(self, dest: &mut [T]) {
        T::vcopy(dest, self.as_slice());
    }

    fn add_to(self, dest: &mut [T]) {
        T::vadd(dest, self.as_slice());
    }

    fn sub_to(self, dest: &mut [T]) {
        T::vsub(dest, self.as_slice());
    }

    fn mul_to(self, dest: &mut [T]) {
        T::vmul(dest, self.as_slice());
    }

    fn div_to(self, dest: &mut [T]) {
        T::vdiv(dest, self.as_slice());
    }
}
