// Copyright 2025 the Locus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Quadtree` API over the recursive node structure.

use alloc::vec::Vec;
use core::fmt::{self, Debug};

use crate::error::QuadtreeError;
use crate::node::{Limits, Nearest, QuadtreeNode, SearchOrder};
use crate::types::{Point, Rectangle};

/// Capacity used when callers have no better estimate.
pub const DEFAULT_CAPACITY: usize = 4;

/// Depth at which leaves stop splitting and start overflowing.
///
/// At depth 32 the cells of a 1000-unit root are about 2e-7 units wide.
pub const DEFAULT_MAX_DEPTH: u32 = 32;

/// Region quadtree over labeled points.
///
/// The boundary is fixed at construction. Points outside it are rejected,
/// points inside are always accepted.
#[derive(Clone)]
pub struct Quadtree {
    root: QuadtreeNode,
    limits: Limits,
    len: usize,
}

impl Debug for Quadtree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("Quadtree")
            .field("boundary", self.root.boundary())
            .field("capacity", &self.limits.capacity)
            .field("max_depth", &self.limits.max_depth)
            .field("len", &self.len)
            .field("nodes", &stats.nodes)
            .field("depth", &stats.depth)
            .finish_non_exhaustive()
    }
}

impl Quadtree {
    /// Create an empty tree covering `boundary` whose leaves split once they
    /// hold `capacity` points.
    ///
    /// # Errors
    ///
    /// Returns [`QuadtreeError::ZeroCapacity`] if `capacity` is 0.
    pub fn new(boundary: Rectangle, capacity: usize) -> Result<Self, QuadtreeError> {
        Self::with_max_depth(boundary, capacity, DEFAULT_MAX_DEPTH)
    }

    /// Like [`new`][Self::new], with an explicit depth limit.
    ///
    /// Leaves at `max_depth` never split, so they may hold more than
    /// `capacity` points. This bounds the tree when many points coincide.
    /// A `max_depth` of 0 keeps every point in the root.
    ///
    /// # Errors
    ///
    /// Returns [`QuadtreeError::ZeroCapacity`] if `capacity` is 0.
    pub fn with_max_depth(
        boundary: Rectangle,
        capacity: usize,
        max_depth: u32,
    ) -> Result<Self, QuadtreeError> {
        if capacity == 0 {
            return Err(QuadtreeError::ZeroCapacity);
        }
        Ok(Self {
            root: QuadtreeNode::new(boundary, 0),
            limits: Limits {
                capacity,
                max_depth,
            },
            len: 0,
        })
    }

    /// The region this tree covers.
    pub fn boundary(&self) -> &Rectangle {
        self.root.boundary()
    }

    /// Points a leaf holds before it splits.
    pub fn capacity(&self) -> usize {
        self.limits.capacity
    }

    /// Depth beyond which leaves no longer split.
    pub fn max_depth(&self) -> u32 {
        self.limits.max_depth
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no point has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a point. Returns `false` if it lies outside the boundary, in
    /// which case the tree is unchanged.
    pub fn insert(&mut self, point: Point) -> bool {
        let accepted = self.root.insert(point, self.limits);
        if accepted {
            self.len += 1;
        }
        accepted
    }

    /// Insert every point from `points`, returning how many were accepted.
    pub fn extend_points<I: IntoIterator<Item = Point>>(&mut self, points: I) -> usize {
        let mut accepted = 0;
        for p in points {
            if self.insert(p) {
                accepted += 1;
            }
        }
        accepted
    }

    /// The stored point nearest to `query` and its Euclidean distance.
    ///
    /// An empty tree yields `(None, f64::INFINITY)`. When several points are
    /// equally near, any one of them may be returned.
    pub fn find_nearest(&self, query: &Point) -> (Option<&Point>, f64) {
        self.find_nearest_with(query, SearchOrder::default())
    }

    /// Like [`find_nearest`][Self::find_nearest], visiting children in `order`.
    pub fn find_nearest_with(&self, query: &Point, order: SearchOrder) -> (Option<&Point>, f64) {
        let mut best = Nearest::new();
        self.root.search(query, order, &mut best);
        best.into_parts()
    }

    /// Fold this tree into a caller-owned accumulator.
    ///
    /// Subtrees farther away than `best` already is are skipped, so a seeded
    /// accumulator prunes more, and one accumulator can be run across several
    /// trees to find the nearest point among all of them.
    pub fn query<'a>(&'a self, query: &Point, best: &mut Nearest<'a>) {
        self.root.search(query, SearchOrder::default(), best);
    }

    /// Iterate over all stored points, depth-first in NW, NE, SW, SE order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: alloc::vec![&self.root],
            current: [].iter(),
        }
    }

    /// Shape summary of the tree.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        tally(&self.root, self.limits.capacity, &mut stats);
        stats
    }
}

fn tally(node: &QuadtreeNode, capacity: usize, stats: &mut TreeStats) {
    stats.nodes += 1;
    stats.depth = stats.depth.max(node.depth());
    match node.children() {
        Some(children) => {
            stats.internal_nodes += 1;
            for child in children {
                tally(child, capacity, stats);
            }
        }
        None => {
            let n = node.points().len();
            stats.leaves += 1;
            stats.points += n;
            stats.largest_leaf = stats.largest_leaf.max(n);
            if n > capacity {
                stats.overfull_leaves += 1;
            }
        }
    }
}

/// Shape summary returned by [`Quadtree::stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Stored points.
    pub points: usize,
    /// All nodes, root included.
    pub nodes: usize,
    /// Nodes without children.
    pub leaves: usize,
    /// Nodes with four children.
    pub internal_nodes: usize,
    /// Depth of the deepest node; the root is 0.
    pub depth: u32,
    /// Most points held by a single leaf.
    pub largest_leaf: usize,
    /// Leaves holding more than the capacity. Only leaves at the depth limit
    /// can end up here.
    pub overfull_leaves: usize,
}

/// Iterator over the points of a [`Quadtree`].
pub struct Iter<'a> {
    stack: Vec<&'a QuadtreeNode>,
    current: core::slice::Iter<'a, Point>,
}

impl Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("pending_nodes", &self.stack.len())
            .field("pending_points", &self.current.len())
            .finish_non_exhaustive()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Point;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(p) = self.current.next() {
                return Some(p);
            }
            let node = self.stack.pop()?;
            self.current = node.points().iter();
            if let Some(children) = node.children() {
                self.stack.extend(children.iter().rev());
            }
        }
    }
}

impl<'a> IntoIterator for &'a Quadtree {
    type Item = &'a Point;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
