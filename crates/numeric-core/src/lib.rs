// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # numeric-core
//!
//! Tensor/matrix/vector arithmetic in which whole expressions execute as a
//! single fused pass over memory.
//!
//! Arithmetic operators on containers build lightweight deferred
//! descriptors instead of computing; the descriptor is evaluated when a
//! destination combine (`assign`, `add_from`, ...) consumes it, and the
//! (source operator, destination operator, element type) triple selects one
//! fused kernel at compile time. `f32` and `f64` route the eligible kernels
//! through an accelerated scaled-vector-add backend; every other numeric
//! type uses portable single-pass loops.
//!
//! This crate provides:
//! - [`Vector`], [`Matrix`], [`Tensor`] — containers over inline
//!   (compile-time shape) or aligned heap (runtime shape) storage.
//! - [`ScalarExpr`], [`PairExpr`] — the deferred-operation descriptors.
//! - [`Dense`] — the uniform container surface, including the five
//!   destination combines.
//! - [`Element`] — element bounds plus the kernel dispatch table.
//! - [`math`] — vector norms, dot and cross products.
//!
//! # Example
//! ```
//! use numeric_core::{Dense, Vector};
//!
//! let mut a: Vector<f64, 4> = Vector::new();
//! a.set_constant(2.0);
//!
//! // `&a * 3.0` is a descriptor; `assign` runs one fused kernel pass.
//! let mut b: Vector<f64, 4> = Vector::new();
//! b.assign(&a * 3.0).unwrap();
//! assert_eq!(b.as_slice(), &[6.0; 4]);
//!
//! // Compound combines fuse too: b += a * 4.0 is a single fma loop.
//! b.add_from(&a * 4.0).unwrap();
//! assert_eq!(b.as_slice(), &[14.0; 4]);
//! ```

pub mod accel;
mod dense;
mod element;
mod error;
pub mod expr;
pub mod math;
mod matrix;
mod shape;
mod tensor;
mod vector;

pub use dense::{Dense, Eval};
pub use element::Element;
pub use error::TensorError;
pub use expr::{tag, PairExpr, ScalarExpr};
pub use matrix::Matrix;
pub use shape::Shape;
pub use tensor::Tensor;
pub use vector::Vector;

// Convenient aliases for the common small f64 containers.

pub type Vector1 = Vector<f64, 1>;
pub type Vector2 = Vector<f64, 2>;
pub type Vector3 = Vector<f64, 3>;
pub type Vector4 = Vector<f64, 4>;
pub type Vector5 = Vector<f64, 5>;
pub type Vector6 = Vector<f64, 6>;

pub type Matrix11 = Matrix<f64, 1, 1>;
pub type Matrix12 = Matrix<f64, 1, 2>;
pub type Matrix13 = Matrix<f64, 1, 3>;
pub type Matrix14 = Matrix<f64, 1, 4>;
pub type Matrix15 = Matrix<f64, 1, 5>;
pub type Matrix16 = Matrix<f64, 1, 6>;

pub type Matrix21 = Matrix<f64, 2, 1>;
pub type Matrix22 = Matrix<f64, 2, 2>;
pub type Matrix23 = Matrix<f64, 2, 3>;
pub type Matrix24 = Matrix<f64, 2, 4>;
pub type Matrix25 = Matrix<f64, 2, 5>;
pub type Matrix26 = Matrix<f64, 2, 6>;

pub type Matrix31 = Matrix<f64, 3, 1>;
pub type Matrix32 = Matrix<f64, 3, 2>;
pub type Matrix33 = Matrix<f64, 3, 3>;
pub type Matrix34 = Matrix<f64, 3, 4>;
pub type Matrix35 = Matrix<f64, 3, 5>;
pub type Matrix36 = Matrix<f64, 3, 6>;

pub type Matrix41 = Matrix<f64, 4, 1>;
pub type Matrix42 = Matrix<f64, 4, 2>;
pub type Matrix43 = Matrix<f64, 4, 3>;
pub type Matrix44 = Matrix<f64, 4, 4>;
pub type Matrix45 = Matrix<f64, 4, 5>;
pub type Matrix46 = Matrix<f64, 4, 6>;

pub type Matrix51 = Matrix<f64, 5, 1>;
pub type Matrix52 = Matrix<f64, 5, 2>;
pub type Matrix53 = Matrix<f64, 5, 3>;
pub type Matrix54 = Matrix<f64, 5, 4>;
pub type Matrix55 = Matrix<f64, 5, 5>;
pub type Matrix56 = Matrix<f64, 5, 6>;
