// Copyright 2025 the Locus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Check a random rider against both search orders and the linear scan.
//!
//! The map comes from a `kurbo::Rect`, as it would when the caller already
//! works in kurbo geometry.
//!
//! Run:
//! - `cargo run -p locus_demos --example random_rider`

use kurbo::Rect;
use locus_demos::scatter_drivers;
use locus_quadtree::{Point, Quadtree, Rectangle, SearchOrder, scan};
use rand::Rng;

fn main() -> Result<(), locus_quadtree::QuadtreeError> {
    let map = Rectangle::try_from(Rect::new(0.0, 0.0, 1000.0, 1000.0))?;
    let mut qt = Quadtree::new(map, 4)?;

    let mut rng = rand::rng();
    let drivers = scatter_drivers(&mut rng, &map, 5000);
    qt.extend_points(drivers.iter().cloned());

    let rider = Point::from(kurbo::Point::new(
        rng.random_range(0.0..1000.0),
        rng.random_range(0.0..1000.0),
    ));

    let (bf_point, bf_distance_sq) = scan::closest_of(&rider, &drivers);
    println!("Query point: {rider}");
    for order in [SearchOrder::NearestBounds, SearchOrder::ContainingFirst] {
        let (found, distance) = qt.find_nearest_with(&rider, order);
        assert!(
            (distance - bf_distance_sq.sqrt()).abs() < 1e-9,
            "{order:?} disagrees with the linear scan"
        );
        if let Some(p) = found {
            println!("{order:?}: {p} at distance {distance:.2}");
        }
    }
    if let Some(p) = bf_point {
        println!("Brute force: {p} at distance {:.2}", bf_distance_sq.sqrt());
    }
    println!("Both search orders found the nearest point.");
    Ok(())
}
