//! Colour frequency histograms of raster regions.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;

use super::luminosity::relative_luminosity;
use super::raster::RasterRegion;

/// One distinct colour of a region and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint {
    pub color: [u8; 3],
    pub luminosity: f64,
    pub count: usize,
}

impl DataPoint {
    pub fn new(color: [u8; 3], count: usize) -> Self {
        Self {
            color,
            luminosity: relative_luminosity(color),
            count,
        }
    }

    /// Placeholder for a missing colour; its luminosity is -1.
    pub fn absent() -> Self {
        Self {
            color: [0, 0, 0],
            luminosity: -1.0,
            count: 0,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.luminosity < 0.0
    }
}

/// Count pixels by exact colour.
///
/// Rows are folded in parallel when `parallel` is set; every pixel is
/// counted exactly once either way.
pub fn color_counts(region: &RasterRegion<'_>, parallel: bool) -> HashMap<[u8; 3], usize> {
    if !parallel {
        let mut counts = HashMap::new();
        for row in region.rows() {
            count_row(&mut counts, row);
        }
        return counts;
    }

    (0..region.height())
        .into_par_iter()
        .fold(HashMap::new, |mut counts, r| {
            count_row(&mut counts, region.row(r));
            counts
        })
        .reduce(HashMap::new, merge_counts)
}

/// Distinct colours of `region` sorted by ascending luminosity.
///
/// Colours of equal luminosity are ordered by RGB value so the output does
/// not depend on hash order.
pub fn histogram(region: &RasterRegion<'_>, parallel: bool) -> Vec<DataPoint> {
    let mut points: Vec<DataPoint> = color_counts(region, parallel)
        .into_iter()
        .map(|(color, count)| DataPoint::new(color, count))
        .collect();
    points.sort_by(|a, b| {
        a.luminosity
            .total_cmp(&b.luminosity)
            .then_with(|| a.color.cmp(&b.color))
    });
    points
}

fn count_row(counts: &mut HashMap<[u8; 3], usize>, row: &[[u8; 3]]) {
    for pixel in row {
        *counts.entry(*pixel).or_insert(0) += 1;
    }
}

fn merge_counts(
    mut a: HashMap<[u8; 3], usize>,
    b: HashMap<[u8; 3], usize>,
) -> HashMap<[u8; 3], usize> {
    if a.len() < b.len() {
        return merge_counts(b, a);
    }
    for (color, count) in b {
        *a.entry(color).or_insert(0) += count;
    }
    a
}
