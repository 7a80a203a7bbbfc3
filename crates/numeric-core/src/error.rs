// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for container arithmetic.

use crate::Shape;

/// Errors raised at the boundaries of container operations.
///
/// Shape and allocation-state problems are detected *before* any kernel
/// writes to the destination, so a failed operation leaves every container
/// in its pre-call state. Allocation failure itself is not represented
/// here: the storage layer treats it as fatal and aborts through
/// `std::alloc::handle_alloc_error`.
#[derive(Debug, thiserror::Error)]
pub enum TensorError {
    /// Operand or destination extents disagree at an arithmetic or
    /// assignment boundary.
    #[error("incompatible shapes for {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// The operation needs allocated storage, but the dynamic container has
    /// never been allocated or has been freed.
    #[error("{op} requires an allocated container")]
    Unallocated { op: &'static str },
}
