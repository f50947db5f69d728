// Copyright 2025 the Locus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear-scan nearest neighbor.
//!
//! This is the O(N) reference the quadtree is checked against. It visits every
//! point, so it is only worth using for tiny sets or as a test oracle.

use crate::node::Nearest;
use crate::types::Point;

/// The point of `points` closest to `query`, with its **squared** distance.
///
/// Returns `(None, f64::INFINITY)` for an empty slice. Among equidistant points
/// the earliest one in `points` wins.
pub fn closest_of<'a>(query: &Point, points: &'a [Point]) -> (Option<&'a Point>, f64) {
    let mut best = Nearest::new();
    for p in points {
        best.offer(p, query);
    }
    (best.point(), best.distance_sq())
}
