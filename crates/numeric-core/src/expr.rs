// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Deferred-operation expressions.
//!
//! Arithmetic operators on containers do not compute anything. They build a
//! small descriptor — [`ScalarExpr`] for `container OP scalar`, [`PairExpr`]
//! for `container OP container` — that records the operands by reference
//! plus a type-level source-operator tag. The descriptor is evaluated only
//! when one of the destination combines on [`Dense`] consumes it, at which
//! point the (source tag, destination tag, element type) triple selects one
//! fused kernel from the [`Element`] table.
//!
//! Descriptors borrow their operands and are consumed by value, so they
//! cannot outlive a statement that mutates an operand: misuse is a borrow
//! error, not undefined behaviour.
//!
//! Operand shapes of a pair expression are checked here, at construction —
//! once dispatch runs, the individual operand shapes are no longer
//! available to report. Rust operators cannot return a `Result`, so the
//! construction check fails by panicking with the rendered shape error.

use crate::dense::{Dense, Eval};
use crate::element::Element;
use crate::error::TensorError;
use crate::matrix::Matrix;
use crate::tensor::Tensor;
use crate::vector::Vector;
use std::marker::PhantomData;

/// Source-operator tags.
///
/// Each tag is a zero-sized type naming the operator that produced a
/// deferred expression. `RSub` and `RDiv` are the operand-reversed forms
/// (`scalar - x`, `scalar / x`), which need their own tags only in the
/// scalar family — with two container operands both orders are directly
/// expressible.
pub mod tag {
    /// `x + s` / `a + b`.
    #[derive(Debug, Clone, Copy)]
    pub struct Add;
    /// `x - s` / `a - b`.
    #[derive(Debug, Clone, Copy)]
    pub struct Sub;
    /// `s - x`.
    #[derive(Debug, Clone, Copy)]
    pub struct RSub;
    /// `x * s` / `a * b` (elementwise).
    #[derive(Debug, Clone, Copy)]
    pub struct Mul;
    /// `x / s` / `a / b` (elementwise).
    #[derive(Debug, Clone, Copy)]
    pub struct Div;
    /// `s / x`.
    #[derive(Debug, Clone, Copy)]
    pub struct RDiv;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::tag::Add {}
    impl Sealed for super::tag::Sub {}
    impl Sealed for super::tag::RSub {}
    impl Sealed for super::tag::Mul {}
    impl Sealed for super::tag::Div {}
    impl Sealed for super::tag::RDiv {}
}

/// Maps a scalar-family source tag onto its row of the kernel table.
pub trait ScalarOp: sealed::Sealed + 'static {
    /// Operator name for error reports.
    const NAME: &'static str;

    fn assign<T: Element>(dest: &mut [T], x: &[T], s: T);
    fn add<T: Element>(dest: &mut [T], x: &[T], s: T);
    fn sub<T: Element>(dest: &mut [T], x: &[T], s: T);
    fn mul<T: Element>(dest: &mut [T], x: &[T], s: T);
    fn div<T: Element>(dest: &mut [T], x: &[T], s: T);
}

/// Maps a pair-family source tag onto its row of the kernel table.
pub trait PairOp: sealed::Sealed + 'static {
    /// Operator name for error reports.
    const NAME: &'static str;

    fn assign<T: Element>(dest: &mut [T], a: &[T], b: &[T]);
    fn add<T: Element>(dest: &mut [T], a: &[T], b: &[T]);
    fn sub<T: Element>(dest: &mut [T], a: &[T], b: &[T]);
    fn mul<T: Element>(dest: &mut [T], a: &[T], b: &[T]);
    fn div<T: Element>(dest: &mut [T], a: &[T], b: &[T]);
}

macro_rules! impl_scalar_op {
    ($tag:ty, $name:literal, $assign:ident, $add:ident, $sub:ident, $mul:ident, $div:ident) => {
        impl ScalarOp for $tag {
            const NAME: &'static str = $name;

            #[inline]
            fn assign<T: Element>(dest: &mut [T], x: &[T], s: T) {
                T::$assign(dest, x, s);
            }
            #[inline]
            fn add<T: Element>(dest: &mut [T], x: &[T], s: T) {
                T::$add(dest, x, s);
            }
            #[inline]
            fn sub<T: Element>(dest: &mut [T], x: &[T], s: T) {
                T::$sub(dest, x, s);
            }
            #[inline]
            fn mul<T: Element>(dest: &mut [T], x: &[T], s: T) {
                T::$mul(dest, x, s);
            }
            #[inline]
            fn div<T: Element>(dest: &mut [T], x: &[T], s: T) {
                T::$div(dest, x, s);
            }
        }
    };
}

impl_scalar_op!(tag::Add, "add", s_add_assign, s_add_add, s_add_sub, s_add_mul, s_add_div);
impl_scalar_op!(tag::Sub, "sub", s_sub_assign, s_sub_add, s_sub_sub, s_sub_mul, s_sub_div);
impl_scalar_op!(tag::RSub, "rsub", s_rsub_assign, s_rsub_add, s_rsub_sub, s_rsub_mul, s_rsub_div);
impl_scalar_op!(tag::Mul, "mul", s_mul_assign, s_mul_add, s_mul_sub, s_mul_mul, s_mul_div);
impl_scalar_op!(tag::Div, "div", s_div_assign, s_div_add, s_div_sub, s_div_mul, s_div_div);
impl_scalar_op!(tag::RDiv, "rdiv", s_rdiv_assign, s_rdiv_add, s_rdiv_sub, s_rdiv_mul, s_rdiv_div);

macro_rules! impl_pair_op {
    ($tag:ty, $name:literal, $assign:ident, $add:ident, $sub:ident, $mul:ident, $div:ident) => {
        impl PairOp for $tag {
            const NAME: &'static str = $name;

            #[inline]
            fn assign<T: Element>(dest: &mut [T], a: &[T], b: &[T]) {
                T::$assign(dest, a, b);
            }
            #[inline]
            fn add<T: Element>(dest: &mut [T], a: &[T], b: &[T]) {
                T::$add(dest, a, b);
            }
            #[inline]
            fn sub<T: Element>(dest: &mut [T], a: &[T], b: &[T]) {
                T::$sub(dest, a, b);
            }
            #[inline]
            fn mul<T: Element>(dest: &mut [T], a: &[T], b: &[T]) {
                T::$mul(dest, a, b);
            }
            #[inline]
            fn div<T: Element>(dest: &mut [T], a: &[T], b: &[T]) {
                T::$div(dest, a, b);
            }
        }
    };
}

impl_pair_op!(tag::Add, "add", p_add_assign, p_add_add, p_add_sub, p_add_mul, p_add_div);
impl_pair_op!(tag::Sub, "sub", p_sub_assign, p_sub_add, p_sub_sub, p_sub_mul, p_sub_div);
impl_pair_op!(tag::Mul, "mul", p_mul_assign, p_mul_add, p_mul_sub, p_mul_mul, p_mul_div);
impl_pair_op!(tag::Div, "div", p_div_assign, p_div_add, p_div_sub, p_div_mul, p_div_div);

/// A deferred `container OP scalar` (or reversed) expression.
///
/// Holds the operand by reference and the scalar by value; nothing is
/// computed until a destination combine consumes it.
#[must_use = "a deferred expression does nothing until a combining operation consumes it"]
pub struct ScalarExpr<'a, C: Dense, Op> {
    operand: &'a C,
    scalar: C::Elem,
    _op: PhantomData<Op>,
}

impl<'a, C: Dense, Op> ScalarExpr<'a, C, Op> {
    pub(crate) fn new(operand: &'a C, scalar: C::Elem) -> Self {
        Self {
            operand,
            scalar,
            _op: PhantomData,
        }
    }
}

impl<T, C, Op> Eval<T> for ScalarExpr<'_, C, Op>
where
    T: Element,
    C: Dense<Elem = T>,
    Op: ScalarOp,
{
    #[inline]
    fn extents(&self) -> &[u32] {
        self.operand.extents()
    }

    fn assign_to(self, dest: &mut [T]) {
        Op::assign(dest, self.operand.as_slice(), self.scalar);
    }

    fn add_to(self, dest: &mut [T]) {
        Op::add(dest, self.operand.as_slice(), self.scalar);
    }

    fn sub_to(self, dest: &mut [T]) {
        Op::sub(dest, self.operand.as_slice(), self.scalar);
    }

    fn mul_to(self, dest: &mut [T]) {
        Op::mul(dest, self.operand.as_slice(), self.scalar);
    }

    fn div_to(self, dest: &mut [T]) {
        Op::div(dest, self.operand.as_slice(), self.scalar);
    }
}

/// A deferred `container OP container` expression.
///
/// Operand extents are verified at construction; see the module docs for
/// why the check is eager.
#[must_use = "a deferred expression does nothing until a combining operation consumes it"]
pub struct PairExpr<'a, C: Dense, D: Dense, Op> {
    lhs: &'a C,
    rhs: &'a D,
    _op: PhantomData<Op>,
}

impl<'a, T, C, D, Op> PairExpr<'a, C, D, Op>
where
    T: Element,
    C: Dense<Elem = T>,
    D: Dense<Elem = T>,
    Op: PairOp,
{
    /// # Panics
    /// Panics with the rendered [`TensorError::ShapeMismatch`] when the
    /// operand extents differ.
    pub(crate) fn new(lhs: &'a C, rhs: &'a D) -> Self {
        if lhs.extents() != rhs.extents() {
            panic!(
                "{}",
                TensorError::ShapeMismatch {
                    op: Op::NAME,
                    lhs: lhs.extents().into(),
                    rhs: rhs.extents().into(),
                }
            );
        }
        Self {
            lhs,
            rhs,
            _op: PhantomData,
        }
    }
}

impl<T, C, D, Op> Eval<T> for PairExpr<'_, C, D, Op>
where
    T: Element,
    C: Dense<Elem = T>,
    D: Dense<Elem = T>,
    Op: PairOp,
{
    #[inline]
    fn extents(&self) -> &[u32] {
        self.lhs.extents()
    }

    fn assign_to(self, dest: &mut [T]) {
        Op::assign(dest, self.lhs.as_slice(), self.rhs.as_slice());
    }

    fn add_to(self, dest: &mut [T]) {
        Op::add(dest, self.lhs.as_slice(), self.rhs.as_slice());
    }

    fn sub_to(self, dest: &mut [T]) {
        Op::sub(dest, self.lhs.as_slice(), self.rhs.as_slice());
    }

    fn mul_to(self, dest: &mut [T]) {
        Op::mul(dest, self.lhs.as_slice(), self.rhs.as_slice());
    }

    fn div_to(self, dest: &mut [T]) {
        Op::div(dest, self.lhs.as_slice(), self.rhs.as_slice());
    }
}

// ── operator surface ───────────────────────────────────────────────
//
// All expression-building operators live here, one macro invocation per
// container type. Only `&container` forms exist: the descriptor borrows
// its operand, so a by-value operand would have nothing to borrow from.

macro_rules! impl_expr_ops {
    ($ty:ty, [$($gen:tt)*]) => {
        impl<'a, $($gen)*> std::ops::Add<T> for &'a $ty {
            type Output = ScalarExpr<'a, $ty, tag::Add>;
            #[inline]
            fn add(self, scalar: T) -> Self::Output {
                ScalarExpr::new(self, scalar)
            }
        }

        impl<'a, $($gen)*> std::ops::Sub<T> for &'a $ty {
            type Output = ScalarExpr<'a, $ty, tag::Sub>;
            #[inline]
            fn sub(self, scalar: T) -> Self::Output {
                ScalarExpr::new(self, scalar)
            }
        }

        impl<'a, $($gen)*> std::ops::Mul<T> for &'a $ty {
            type Output = ScalarExpr<'a, $ty, tag::Mul>;
            #[inline]
            fn mul(self, scalar: T) -> Self::Output {
                ScalarExpr::new(self, scalar)
            }
        }

        impl<'a, $($gen)*> std::ops::Div<T> for &'a $ty {
            type Output = ScalarExpr<'a, $ty, tag::Div>;
            #[inline]
            fn div(self, scalar: T) -> Self::Output {
                ScalarExpr::new(self, scalar)
            }
        }

        impl<'a, $($gen)*> std::ops::Neg for &'a $ty
        where
            T: num_traits::Signed,
        {
            type Output = ScalarExpr<'a, $ty, tag::Mul>;
            #[inline]
            fn neg(self) -> Self::Output {
                ScalarExpr::new(self, -T::one())
            }
        }
    };
}

impl_expr_ops!(Vector<T, N>, [T: Element, const N: usize]);
impl_expr_ops!(Matrix<T, R, C>, [T: Element, const R: usize, const C: usize]);
impl_expr_ops!(Tensor<T, R>, [T: Element, const R: usize]);

macro_rules! impl_pair_ops {
    ($lhs:ty, $rhs:ty, [$($gen:tt)*]) => {
        impl<'a, $($gen)*> std::ops::Add<&'a $rhs> for &'a $lhs {
            type Output = PairExpr<'a, $lhs, $rhs, tag::Add>;
            #[inline]
            fn add(self, rhs: &'a $rhs) -> Self::Output {
                PairExpr::new(self, rhs)
            }
        }

        impl<'a, $($gen)*> std::ops::Sub<&'a $rhs> for &'a $lhs {
            type Output = PairExpr<'a, $lhs, $rhs, tag::Sub>;
            #[inline]
            fn sub(self, rhs: &'a $rhs) -> Self::Output {
                PairExpr::new(self, rhs)
            }
        }

        impl<'a, $($gen)*> std::ops::Mul<&'a $rhs> for &'a $lhs {
            type Output = PairExpr<'a, $lhs, $rhs, tag::Mul>;
            #[inline]
            fn mul(self, rhs: &'a $rhs) -> Self::Output {
                PairExpr::new(self, rhs)
            }
        }

        impl<'a, $($gen)*> std::ops::Div<&'a $rhs> for &'a $lhs {
            type Output = PairExpr<'a, $lhs, $rhs, tag::Div>;
            #[inline]
            fn div(self, rhs: &'a $rhs) -> Self::Output {
                PairExpr::new(self, rhs)
            }
        }
    };
}

impl_pair_ops!(Vector<T, N>, Vector<T, M>, [T: Element, const N: usize, const M: usize]);
impl_pair_ops!(
    Matrix<T, R1, C1>,
    Matrix<T, R2, C2>,
    [T: Element, const R1: usize, const C1: usize, const R2: usize, const C2: usize]
);
impl_pair_ops!(Tensor<T, R>, Tensor<T, R>, [T: Element, const R: usize]);

// `scalar OP &container` needs a concrete scalar type on the left (the
// orphan rules forbid the fully generic form), so the reversed operators
// exist for the two accelerated types; `rsub`/`rdiv` on `Dense` cover the
// rest.
macro_rules! impl_scalar_lhs_ops {
    ($s:ty, $ty:ty, [$($gen:tt)*]) => {
        impl<'a, $($gen)*> std::ops::Add<&'a $ty> for $s {
            type Output = ScalarExpr<'a, $ty, tag::Add>;
            #[inline]
            fn add(self, operand: &'a $ty) -> Self::Output {
                ScalarExpr::new(operand, self)
            }
        }

        impl<'a, $($gen)*> std::ops::Sub<&'a $ty> for $s {
            type Output = ScalarExpr<'a, $ty, tag::RSub>;
            #[inline]
            fn sub(self, operand: &'a $ty) -> Self::Output {
                ScalarExpr::new(operand, self)
            }
        }

        impl<'a, $($gen)*> std::ops::Mul<&'a $ty> for $s {
            type Output = ScalarExpr<'a, $ty, tag::Mul>;
            #[inline]
            fn mul(self, operand: &'a $ty) -> Self::Output {
                ScalarExpr::new(operand, self)
            }
        }

        impl<'a, $($gen)*> std::ops::Div<&'a $ty> for $s {
            type Output = ScalarExpr<'a, $ty, tag::RDiv>;
            #[inline]
            fn div(self, operand: &'a $ty) -> Self::Output {
                ScalarExpr::new(operand, self)
            }
        }
    };
}

impl_scalar_lhs_ops!(f64, Vector<f64, N>, [const N: usize]);
impl_scalar_lhs_ops!(f32, Vector<f32, N>, [const N: usize]);
impl_scalar_lhs_ops!(f64, Matrix<f64, R, C>, [const R: usize, const C: usize]);
impl_scalar_lhs_ops!(f32, Matrix<f32, R, C>, [const R: usize, const C: usize]);
impl_scalar_lhs_ops!(f64, Tensor<f64, R>, [const R: usize]);
impl_scalar_lhs_ops!(f32, Tensor<f32, R>, [const R: usize]);

// `container OP= scalar` cannot shape-mismatch, so the native operator
// sugar applies; container and expression right-hand sides go through the
// fallible combines on `Dense`.
macro_rules! impl_scalar_compound {
    ($ty:ty, [$($gen:tt)*]) => {
        impl<$($gen)*> std::ops::AddAssign<T> for $ty {
            #[inline]
            fn add_assign(&mut self, scalar: T) {
                T::sadd(self.as_mut_slice(), scalar);
            }
        }

        impl<$($gen)*> std::ops::SubAssign<T> for $ty {
            #[inline]
            fn sub_assign(&mut self, scalar: T) {
                T::ssub(self.as_mut_slice(), scalar);
            }
        }

        impl<$($gen)*> std::ops::MulAssign<T> for $ty {
            #[inline]
            fn mul_assign(&mut self, scalar: T) {
                T::smul(self.as_mut_slice(), scalar);
            }
        }

        impl<$($gen)*> std::ops::DivAssign<T> for $ty {
            #[inline]
            fn div_assign(&mut self, scalar: T) {
                T::sdiv(self.as_mut_slice(), scalar);
            }
        }
    };
}

impl_scalar_compound!(Vector<T, N>, [T: Element, const N: usize]);
impl_scalar_compound!(Matrix<T, R, C>, [T: Element, const R: usize, const C: usize]);
impl_scalar_compound!(Tensor<T, R>, [T: Element, const R: usize]);
