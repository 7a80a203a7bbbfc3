// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: container lifecycle, deferred expressions, and the
//! failure paths, end to end across both storage modes.

use approx::assert_abs_diff_eq;
use numeric_core::{math, Dense, Matrix, Tensor, TensorError, Vector, Vector4};

// ── Deferred expressions into destinations ─────────────────────────

#[test]
fn test_scaled_vector_assignment() {
    // b = a * 3.0 with a ≡ 2.0 must give b ≡ 6.0.
    let mut a: Vector4 = Vector::new();
    a.set_constant(2.0);

    let mut b: Vector4 = Vector::new();
    b.assign(&a * 3.0).unwrap();
    for i in 0..4 {
        assert_abs_diff_eq!(b[i], 6.0, epsilon = 1e-12);
    }
}

#[test]
fn test_scaled_vector_accumulation() {
    // b ≡ 1.0, then b += a * 4.0 with a ≡ 2.0 must give b ≡ 9.0.
    let mut a: Vector4 = Vector::new();
    a.set_constant(2.0);

    let mut b: Vector4 = Vector::new();
    b.set_one();
    b.add_from(&a * 4.0).unwrap();
    for i in 0..4 {
        assert_abs_diff_eq!(b[i], 9.0, epsilon = 1e-12);
    }
}

#[test]
fn test_chained_statements_fuse_per_statement() {
    // c = 3*a + b, written as two combines over one destination.
    let a: Vector<f64> = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let b: Vector<f64> = Vector::from_slice(&[10.0, 20.0, 30.0]);

    let mut c: Vector<f64> = Vector::new();
    c.assign(&a * 3.0).unwrap();
    c.add_from(&b).unwrap();
    assert_eq!(c.as_slice(), &[13.0, 26.0, 39.0]);
}

#[test]
fn test_expression_size_matches_operands() {
    let a: Vector<f64> = Vector::with_len(5);
    let b: Vector<f64> = Vector::with_len(5);

    let mut c: Vector<f64> = Vector::new();
    c.assign(&a + &b).unwrap();
    assert_eq!(c.len(), a.len());
}

#[test]
fn test_plain_container_compound_paths() {
    // dest OP= container dispatches to the direct elementwise kernels.
    let other: Vector<f64> = Vector::from_slice(&[2.0, 4.0, 8.0]);

    let mut v: Vector<f64> = Vector::from_slice(&[16.0, 16.0, 16.0]);
    v.add_from(&other).unwrap();
    assert_eq!(v.as_slice(), &[18.0, 20.0, 24.0]);
    v.sub_from(&other).unwrap();
    assert_eq!(v.as_slice(), &[16.0; 3]);
    v.mul_from(&other).unwrap();
    assert_eq!(v.as_slice(), &[32.0, 64.0, 128.0]);
    v.div_from(&other).unwrap();
    assert_eq!(v.as_slice(), &[16.0; 3]);
}

#[test]
fn test_integer_vectors_use_generic_kernels() {
    let a: Vector<i32> = Vector::from_slice(&[1, 2, 3]);
    let mut b: Vector<i32> = Vector::new();
    b.assign(&a * 5).unwrap();
    assert_eq!(b.as_slice(), &[5, 10, 15]);

    b.sub_from(&a).unwrap();
    assert_eq!(b.as_slice(), &[4, 8, 12]);
}

// ── Failure paths ──────────────────────────────────────────────────

#[test]
fn test_mismatched_compound_is_rejected_and_harmless() {
    let a: Vector<f64> = Vector::with_len(3);
    let mut b: Vector<f64> = Vector::from_slice(&[1.0, 2.0]);

    let err = b.add_from(&a * 2.0).unwrap_err();
    assert!(matches!(err, TensorError::ShapeMismatch { .. }));
    // The failed combine never touched the destination.
    assert_eq!(b.as_slice(), &[1.0, 2.0]);
}

#[test]
fn test_error_reports_both_shapes() {
    let a: Matrix<f64> = Matrix::with_dims(2, 3);
    let mut b: Matrix<f64> = Matrix::with_dims(3, 2);
    let msg = b.assign(&a).unwrap_err().to_string();
    assert!(msg.contains("(3, 2)"));
    assert!(msg.contains("(2, 3)"));
}

#[test]
fn test_unallocated_destination_compound() {
    let a: Vector<f64> = Vector::with_len(2);
    let mut b: Vector<f64> = Vector::new();
    assert!(matches!(
        b.mul_from(&a),
        Err(TensorError::Unallocated { .. })
    ));
}

// ── Storage lifecycle ──────────────────────────────────────────────

#[test]
fn test_dynamic_vector_lifecycle() {
    // Size 3 filled with ones, freed, re-allocated at size 1, set to 42.
    let mut v: Vector<f64> = Vector::with_len(3);
    v.set_one();
    v.free();

    v.alloc(1);
    v.set_constant(42.0);
    assert_eq!(v.len(), 1);
    assert_abs_diff_eq!(v[0], 42.0, epsilon = 1e-12);
}

#[test]
fn test_alloc_after_free_zero_fills() {
    let mut v: Vector<f64> = Vector::with_len(4);
    v.set_constant(9.0);
    v.free();
    v.alloc(6);
    assert_eq!(v.len(), 6);
    assert!(v.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn test_fill_idempotence_smallest_and_large() {
    let mut small: Vector<f64> = Vector::with_len(1);
    small.set_constant(0.25);
    assert_eq!(small.as_slice(), &[0.25]);

    let mut large: Vector<f64> = Vector::with_len(10_000);
    large.set_constant(0.25);
    assert!(large.as_slice().iter().all(|&x| x == 0.25));
}

// ── Rank-2 / rank-N round trips ────────────────────────────────────

#[test]
fn test_tensor_copy_independence() {
    let mut src: Tensor<f64, 2> = Tensor::with_extents([2, 3]);
    src.set_constant(1.5);

    let mut dst: Tensor<f64, 2> = Tensor::with_extents([2, 3]);
    dst.assign(&src).unwrap();

    src.set_constant(-1.0);
    assert!(dst.as_slice().iter().all(|&x| x == 1.5));

    let mut transposed: Tensor<f64, 2> = Tensor::with_extents([3, 2]);
    assert!(transposed.assign(&src).is_err());
}

#[test]
fn test_matrix_views_round_trip() {
    let v: Vector<f64, 3> = Vector::from_slice(&[1.0, 2.0, 3.0]);

    let diag = v.as_diagonal_matrix();
    assert_eq!(diag[(0, 0)], 1.0);
    assert_eq!(diag[(1, 1)], 2.0);
    assert_eq!(diag[(2, 2)], 3.0);
    assert_eq!(diag[(0, 1)], 0.0);
    assert_eq!(diag.diagonal(), v);

    let row = v.as_row_matrix();
    assert_eq!(row.row(0), v);
}

#[test]
fn test_matrix_expression_pipeline() {
    let mut m: Matrix<f64, 2, 2> = Matrix::new();
    m.set_constant(2.0);

    let mut out: Matrix<f64, 2, 2> = Matrix::new();
    out.assign(&m * 3.0).unwrap();
    out.mul_from(&m).unwrap();
    assert_eq!(out.as_slice(), &[12.0; 4]);
}

// ── Math helpers over expression results ───────────────────────────

#[test]
fn test_norm_of_expression_result() {
    let a: Vector<f64, 2> = Vector::from_slice(&[0.3, 0.4]);
    let mut scaled: Vector<f64, 2> = Vector::new();
    scaled.assign(&a * 10.0).unwrap();
    assert_abs_diff_eq!(math::norm2(&scaled), 5.0, epsilon = 1e-12);

    let unit = math::normalize(&scaled);
    assert_abs_diff_eq!(math::norm2(&unit), 1.0, epsilon = 1e-12);
}

#[test]
fn test_dot_and_cross_consistency() {
    let x: Vector<f64, 3> = Vector::from_slice(&[2.0, 0.0, 0.0]);
    let y: Vector<f64, 3> = Vector::from_slice(&[0.0, 3.0, 0.0]);

    let z = math::cross(&x, &y);
    // The cross product is orthogonal to both operands.
    assert_abs_diff_eq!(math::dot(&z, &x), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(math::dot(&z, &y), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(z[2], 6.0, epsilon = 1e-12);
}
