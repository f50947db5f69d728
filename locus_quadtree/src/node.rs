// Copyright 2025 the Locus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree nodes: capacity-triggered subdivision and pruned nearest-neighbor search.

use alloc::boxed::Box;
use core::mem;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use smallvec::SmallVec;

use crate::types::{Point, Rectangle};

/// Resident points of a leaf. Inline storage matches the default capacity.
pub(crate) type Points = SmallVec<[Point; 4]>;

/// Split policy shared by every node of a tree.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Limits {
    pub(crate) capacity: usize,
    pub(crate) max_depth: u32,
}

/// Order in which the children of an internal node are searched.
///
/// Both orders return the same nearest distance; they differ only in how soon
/// the running best tightens and therefore how many subtrees get pruned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchOrder {
    /// Visit children by ascending distance from the query to their bounds.
    #[default]
    NearestBounds,
    /// Visit the child containing the query first, then the rest in
    /// NW, NE, SW, SE order.
    ContainingFirst,
}

/// Running best match of a nearest-neighbor search.
///
/// A fresh accumulator holds no point and an infinite distance. Every node the
/// search visits offers its points; the accumulator keeps the strictly closest
/// one seen so far, so among equidistant points the first offered wins.
#[derive(Clone, Debug)]
pub struct Nearest<'a> {
    point: Option<&'a Point>,
    distance_sq: f64,
}

impl Default for Nearest<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Nearest<'a> {
    /// An accumulator with no match yet.
    pub const fn new() -> Self {
        Self {
            point: None,
            distance_sq: f64::INFINITY,
        }
    }

    /// Best point found so far.
    pub fn point(&self) -> Option<&'a Point> {
        self.point
    }

    /// Squared distance of the best point, or infinity if there is none.
    pub fn distance_sq(&self) -> f64 {
        self.distance_sq
    }

    /// Euclidean distance of the best point, or infinity if there is none.
    pub fn distance(&self) -> f64 {
        self.distance_sq.sqrt()
    }

    /// Consider `candidate` as an answer for `query`.
    ///
    /// Returns `true` if it is strictly closer than the current best and has
    /// replaced it.
    pub fn offer(&mut self, candidate: &'a Point, query: &Point) -> bool {
        let d = candidate.distance_sq(query);
        if d < self.distance_sq {
            self.distance_sq = d;
            self.point = Some(candidate);
            true
        } else {
            false
        }
    }

    /// The best point and its Euclidean distance.
    pub fn into_parts(self) -> (Option<&'a Point>, f64) {
        let distance = self.distance();
        (self.point, distance)
    }
}

#[derive(Clone, Debug)]
enum Contents {
    Leaf(Points),
    /// Children in NW, NE, SW, SE order.
    Internal(Box<[QuadtreeNode; 4]>),
}

/// One region of the tree. A node is either a leaf holding points or an
/// internal node owning exactly four children, never both.
#[derive(Clone, Debug)]
pub(crate) struct QuadtreeNode {
    boundary: Rectangle,
    depth: u32,
    contents: Contents,
}

impl QuadtreeNode {
    pub(crate) fn new(boundary: Rectangle, depth: u32) -> Self {
        Self {
            boundary,
            depth,
            contents: Contents::Leaf(Points::new()),
        }
    }

    pub(crate) fn boundary(&self) -> &Rectangle {
        &self.boundary
    }

    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }

    /// Points resident in this node; always empty for internal nodes.
    pub(crate) fn points(&self) -> &[Point] {
        match &self.contents {
            Contents::Leaf(points) => points,
            Contents::Internal(_) => &[],
        }
    }

    pub(crate) fn children(&self) -> Option<&[Self; 4]> {
        match &self.contents {
            Contents::Leaf(_) => None,
            Contents::Internal(children) => Some(&**children),
        }
    }

    /// Insert a point, splitting full leaves on the way down.
    ///
    /// Returns `false` without touching the tree if the point lies outside
    /// this node's boundary.
    pub(crate) fn insert(&mut self, point: Point, limits: Limits) -> bool {
        if !self.boundary.contains(&point) {
            return false;
        }
        self.insert_contained(point, limits);
        true
    }

    fn insert_contained(&mut self, point: Point, limits: Limits) {
        let splittable = self.depth < limits.max_depth && self.boundary.can_split();
        if let Contents::Leaf(points) = &mut self.contents {
            // A full leaf at the depth limit keeps growing instead of splitting,
            // so coincident points cannot recurse forever.
            if points.len() < limits.capacity || !splittable {
                points.push(point);
                return;
            }
            let residents = mem::take(points);
            self.subdivide(residents, limits);
        }
        let quadrant = self.quadrant_of(&point);
        if let Contents::Internal(children) = &mut self.contents {
            children[quadrant].insert_contained(point, limits);
        }
    }

    fn subdivide(&mut self, residents: Points, limits: Limits) {
        let depth = self.depth + 1;
        let children = self.boundary.quadrants().map(|q| Self::new(q, depth));
        self.contents = Contents::Internal(Box::new(children));
        for p in residents {
            self.insert_contained(p, limits);
        }
    }

    /// Index of the child whose half-open quadrant holds `p`.
    ///
    /// A point on a split line goes east (or south), matching the quadrant
    /// whose interval starts at that line.
    fn quadrant_of(&self, p: &Point) -> usize {
        let (mx, my) = self.boundary.split();
        usize::from(p.x() >= mx) + 2 * usize::from(p.y() >= my)
    }

    /// Fold the points under this node into `best`, skipping any subtree whose
    /// bounds are already farther away than the current best.
    pub(crate) fn search<'a>(&'a self, query: &Point, order: SearchOrder, best: &mut Nearest<'a>) {
        if self.boundary.distance_sq_to_point(query) > best.distance_sq {
            return;
        }
        match &self.contents {
            Contents::Leaf(points) => {
                for p in points {
                    best.offer(p, query);
                }
            }
            Contents::Internal(children) => match order {
                SearchOrder::NearestBounds => {
                    let mut ranked =
                        children.each_ref().map(|c| (c.boundary.distance_sq_to_point(query), c));
                    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
                    for (_, child) in ranked {
                        child.search(query, order, best);
                    }
                }
                SearchOrder::ContainingFirst => {
                    let mut ranked = children.each_ref();
                    ranked.sort_by_key(|c| !c.boundary.contains(query));
                    for child in ranked {
                        child.search(query, order, best);
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    const LIMITS: Limits = Limits {
        capacity: 4,
        max_depth: 32,
    };

    fn root() -> QuadtreeNode {
        QuadtreeNode::new(Rectangle::new(0.0, 0.0, 100.0, 100.0).unwrap(), 0)
    }

    fn count(node: &QuadtreeNode) -> usize {
        node.points().len() + node.children().map_or(0, |c| c.iter().map(count).sum())
    }

    #[test]
    fn fills_then_splits_on_overflow() {
        let mut node = root();
        for i in 0..4 {
            let v = f64::from(i) * 10.0;
            assert!(node.insert(Point::new(v, v), LIMITS));
        }
        assert!(node.children().is_none());
        assert_eq!(node.points().len(), 4);

        assert!(node.insert(Point::new(90.0, 90.0), LIMITS));
        let children = node.children().expect("fifth point splits the root");
        assert!(node.points().is_empty());
        // (0,0) (10,10) (20,20) (30,30) land NW, (90,90) lands SE.
        assert_eq!(children[0].points().len(), 4);
        assert_eq!(children[3].points(), &[Point::new(90.0, 90.0)]);
        assert!(children.iter().all(|c| c.depth() == 1));
        assert_eq!(count(&node), 5);
    }

    #[test]
    fn outside_point_is_rejected_without_mutation() {
        let mut node = root();
        assert!(!node.insert(Point::new(100.0, 50.0), LIMITS));
        assert!(!node.insert(Point::new(-1.0, 50.0), LIMITS));
        assert_eq!(count(&node), 0);
    }

    #[test]
    fn split_line_points_are_stored_once() {
        let limits = Limits {
            capacity: 1,
            max_depth: 32,
        };
        let mut node = root();
        node.insert(Point::new(10.0, 10.0), limits);
        // Exactly on both split lines of the root.
        node.insert(Point::labeled(50.0, 50.0, "center"), limits);
        let children = node.children().unwrap();
        assert_eq!(children[3].points(), &[Point::labeled(50.0, 50.0, "center")]);
        assert_eq!(children.iter().map(count).sum::<usize>(), 2);
    }

    #[test]
    fn coincident_points_stop_at_depth_limit() {
        let limits = Limits {
            capacity: 2,
            max_depth: 5,
        };
        let mut node = root();
        for i in 0..10 {
            assert!(node.insert(Point::labeled(1.0, 1.0, format!("dup-{i}")), limits));
        }
        assert_eq!(count(&node), 10);

        let mut deepest = &node;
        while let Some(children) = deepest.children() {
            deepest = &children[0];
        }
        assert_eq!(deepest.depth(), 5);
        assert_eq!(deepest.points().len(), 10);
    }

    #[test]
    fn both_orders_find_the_same_distance() {
        let mut node = root();
        let mut pts = Vec::new();
        for i in 0..200_u32 {
            let x = f64::from((i * 37) % 100);
            let y = f64::from((i * 61 + 13) % 100);
            pts.push(Point::new(x, y));
            node.insert(Point::new(x, y), LIMITS);
        }
        for q in [Point::new(50.5, 49.5), Point::new(-20.0, 130.0), Point::new(3.3, 97.1)] {
            let mut a = Nearest::new();
            node.search(&q, SearchOrder::NearestBounds, &mut a);
            let mut b = Nearest::new();
            node.search(&q, SearchOrder::ContainingFirst, &mut b);
            let expected = pts
                .iter()
                .map(|p| p.distance_sq(&q))
                .fold(f64::INFINITY, f64::min);
            assert_eq!(a.distance_sq(), expected);
            assert_eq!(b.distance_sq(), expected);
        }
    }

    #[test]
    fn accumulator_keeps_first_of_equal_candidates() {
        let q = Point::new(0.0, 0.0);
        let first = Point::labeled(3.0, 4.0, "first");
        let second = Point::labeled(-3.0, -4.0, "second");
        let mut best = Nearest::new();
        assert!(best.point().is_none());
        assert_eq!(best.distance(), f64::INFINITY);
        assert!(best.offer(&first, &q));
        assert!(!best.offer(&second, &q));
        let (p, d) = best.into_parts();
        assert_eq!(p, Some(&first));
        assert_eq!(d, 5.0);
    }
}
