// Copyright 2025 the Locus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Match a rider to the nearest of 5000 drivers, quadtree vs linear scan.
//!
//! Run:
//! - `cargo run -p locus_demos --example nearest_driver`

use locus_demos::{millis, scatter_drivers, timed};
use locus_quadtree::{Point, Quadtree, Rectangle, scan};

const DRIVERS: usize = 5000;

fn main() -> Result<(), locus_quadtree::QuadtreeError> {
    let map = Rectangle::new(0.0, 0.0, 1000.0, 1000.0)?;
    let mut qt = Quadtree::new(map, 4)?;

    let drivers = scatter_drivers(&mut rand::rng(), &map, DRIVERS);
    qt.extend_points(drivers.iter().cloned());

    let rider = Point::labeled(512.0, 512.0, "Rider");
    println!("--- Searching for nearest to {rider} among {DRIVERS} points ---\n");

    let ((qt_point, qt_distance), qt_time) = timed(|| qt.find_nearest(&rider));
    if let Some(p) = qt_point {
        println!("Quadtree search found: {p} at distance {qt_distance:.2}");
    }
    println!("Time taken: {:.6} ms\n", millis(qt_time));

    let ((bf_point, bf_distance_sq), bf_time) = timed(|| scan::closest_of(&rider, &drivers));
    if let Some(p) = bf_point {
        println!(
            "Brute-force search found: {p} at distance {:.2}",
            bf_distance_sq.sqrt()
        );
    }
    println!("Time taken: {:.6} ms\n", millis(bf_time));

    assert!(
        (qt_distance - bf_distance_sq.sqrt()).abs() < 1e-9,
        "quadtree and linear scan disagree"
    );
    println!(
        "Quadtree was {:.2}x faster than brute force.",
        bf_time.as_secs_f64() / qt_time.as_secs_f64().max(f64::MIN_POSITIVE)
    );
    println!("{:?}", qt.stats());
    Ok(())
}
