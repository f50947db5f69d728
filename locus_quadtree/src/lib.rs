// Copyright 2025 the Locus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=locus_quadtree --heading-base-level=0

//! Locus Quadtree: a region quadtree for nearest-neighbor proximity matching.
//!
//! Locus Quadtree answers "which of these many locations is closest to here?"
//! without scanning every location.
//!
//! - Insert labeled points into a fixed rectangular region.
//! - Leaves split into four equal quadrants once they exceed a capacity.
//! - Find the nearest stored point to any query, inside the region or not.
//!
//! Searches prune every quadrant whose bounds are farther from the query than
//! the best match so far. The bound never overestimates, so the answer is
//! always exactly what a full linear scan ([`scan::closest_of`]) would report.
//!
//! # Example
//!
//! ```rust
//! use locus_quadtree::{Point, Quadtree, Rectangle};
//!
//! let map = Rectangle::new(0.0, 0.0, 1000.0, 1000.0)?;
//! let mut drivers = Quadtree::new(map, 4)?;
//!
//! assert!(drivers.insert(Point::labeled(100.0, 200.0, "Driver-0")));
//! assert!(drivers.insert(Point::labeled(510.0, 530.0, "Driver-1")));
//! assert!(drivers.insert(Point::labeled(900.0, 50.0, "Driver-2")));
//! // Outside the map: rejected.
//! assert!(!drivers.insert(Point::labeled(1500.0, 10.0, "Driver-3")));
//!
//! let rider = Point::labeled(512.0, 512.0, "Rider");
//! let (nearest, distance) = drivers.find_nearest(&rider);
//! assert_eq!(nearest.and_then(Point::label), Some("Driver-1"));
//! assert!((distance - 18.11).abs() < 0.01);
//! # Ok::<(), locus_quadtree::QuadtreeError>(())
//! ```
//!
//! ## Search order
//!
//! Children of an internal node can be visited nearest-bounds-first
//! ([`SearchOrder::NearestBounds`], the default) or containing-quadrant-first
//! ([`SearchOrder::ContainingFirst`]). Both give the same distance; the
//! default tends to tighten the running best sooner and prune more.
//!
//! ## Depth limit
//!
//! Splitting never separates coincident points, so leaves stop splitting at a
//! maximum depth ([`DEFAULT_MAX_DEPTH`] unless set with
//! [`Quadtree::with_max_depth`]). Leaves at that depth hold any number of
//! points; [`TreeStats::overfull_leaves`] reports how many do.
//!
//! ## Features
//!
//! - `std` *(default)*: use the standard library for float math.
//! - `libm`: `no_std` float math through `kurbo`'s `libm` support.
//!
//! ### Float semantics
//!
//! Coordinates are expected to be finite. Points with NaN coordinates are never
//! inside any rectangle, so inserting them is rejected.
//!
//! ### Concurrency
//!
//! Insertion needs `&mut Quadtree` and searches need `&Quadtree`, so a tree can
//! be shared across threads for queries once it is fully built.

#![no_std]

extern crate alloc;

mod error;
mod node;
pub mod scan;
mod tree;
mod types;

pub use error::QuadtreeError;
pub use node::{Nearest, SearchOrder};
pub use tree::{DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH, Iter, Quadtree, TreeStats};
pub use types::{Point, Rectangle};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_find_nearest() {
        let mut qt = Quadtree::new(Rectangle::new(0.0, 0.0, 100.0, 100.0).unwrap(), 2).unwrap();
        assert!(qt.insert(Point::labeled(10.0, 10.0, "a")));
        assert!(qt.insert(Point::labeled(80.0, 20.0, "b")));
        assert!(qt.insert(Point::labeled(60.0, 90.0, "c")));
        assert_eq!(qt.len(), 3);

        let (p, d) = qt.find_nearest(&Point::new(70.0, 20.0));
        assert_eq!(p.and_then(Point::label), Some("b"));
        assert_eq!(d, 10.0);
    }

    #[test]
    fn rejected_point_leaves_tree_unchanged() {
        let mut qt = Quadtree::new(Rectangle::new(0.0, 0.0, 10.0, 10.0).unwrap(), 1).unwrap();
        assert!(qt.insert(Point::new(1.0, 1.0)));
        let before = qt.stats();
        assert!(!qt.insert(Point::new(10.0, 10.0)));
        assert_eq!(qt.stats(), before);
        assert_eq!(qt.len(), 1);
    }

    #[test]
    fn errors_render_messages() {
        use alloc::string::ToString;
        assert_eq!(
            QuadtreeError::ZeroCapacity.to_string(),
            "node capacity must be at least 1"
        );
        assert_eq!(
            QuadtreeError::InvalidSize {
                width: 0.0,
                height: 2.0
            }
            .to_string(),
            "rectangle size must be positive and finite, got 0 x 2"
        );
    }
}
