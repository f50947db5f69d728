// Copyright 2025 the Locus Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the Locus demos.

use std::time::{Duration, Instant};

use locus_quadtree::{Point, Rectangle};
use rand::Rng;

/// Scatter `n` points labeled `Driver-0..n` uniformly over `area`.
pub fn scatter_drivers(rng: &mut impl Rng, area: &Rectangle, n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            Point::labeled(
                rng.random_range(area.x()..area.x() + area.width()),
                rng.random_range(area.y()..area.y() + area.height()),
                format!("Driver-{i}"),
            )
        })
        .collect()
}

/// Run `f` once and report how long it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Milliseconds with sub-microsecond resolution, for printing.
pub fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
