// Copyright 2025 the Locus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Invalid input to a constructor.
///
/// Only construction can fail. Once a tree exists, inserting an out-of-bounds
/// point reports `false` and searching an empty tree reports no point.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum QuadtreeError {
    /// Width or height is zero, negative, NaN or infinite.
    #[error("rectangle size must be positive and finite, got {width} x {height}")]
    InvalidSize {
        /// The rejected width.
        width: f64,
        /// The rejected height.
        height: f64,
    },
    /// An origin coordinate is NaN or infinite.
    #[error("rectangle origin must be finite, got ({x}, {y})")]
    NonFiniteOrigin {
        /// The rejected x.
        x: f64,
        /// The rejected y.
        y: f64,
    },
    /// A node capacity of zero would never hold a point.
    #[error("node capacity must be at least 1")]
    ZeroCapacity,
}
