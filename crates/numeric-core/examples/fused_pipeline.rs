// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: deferred expressions over both storage modes.
//!
//! Run with buffer tracing enabled to watch which containers actually
//! allocate:
//!
//! ```bash
//! RUST_LOG=trace cargo run -p numeric-core --example fused_pipeline
//! ```

use numeric_core::{math, Dense, Matrix, Vector, Vector4};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Fixed-size vectors live entirely on the stack.
    let mut a: Vector4 = Vector::new();
    a.set_constant(2.0);

    let mut b: Vector4 = Vector::new();
    b.assign(&a * 3.0)?;
    b.add_from(&a)?;
    println!("b = 3a + a           -> {b}");

    // Runtime-sized vectors allocate one aligned buffer each.
    let x: Vector<f64> = Vector::from_slice(&[3.0, 4.0, 12.0]);
    let mut y: Vector<f64> = Vector::new();
    y.assign(10.0 - &x)?;
    println!("y = 10 - x           -> {y}");
    println!("|x|                  -> {}", math::norm2(&x));

    // Destination combines fuse with the deferred source operator:
    // y /= (x * 0.5) runs as a single elementwise pass.
    y.div_from(&x * 0.5)?;
    println!("y /= x * 0.5         -> {y}");

    // Matrices share the same expression machinery.
    let mut m: Matrix<f64, 2, 2> = Matrix::new();
    m.set_one();
    m.mul_from(&m.clone() * 4.0)?;
    println!("m *= m * 4           -> {m}");

    let diag = Vector::<f64>::from_slice(&[1.0, 2.0, 3.0]).as_diagonal_matrix();
    let ones = Vector::<f64>::from_slice(&[1.0, 1.0, 1.0]);
    println!("diag(1,2,3) trace    -> {}", math::dot(&diag.diagonal(), &ones));

    Ok(())
}
