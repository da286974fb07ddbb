// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Plain xyz coordinate extraction.

use super::grid::RecordGrid;
use crate::core::{CodecError, ColumnData, Result};

/// Pull the `x`, `y`, `z` columns out of a grid as row-major `f64` triples.
///
/// With `remove_nans`, records where any coordinate is NaN or infinite are
/// dropped first.
pub fn get_xyz_points(grid: &RecordGrid, remove_nans: bool) -> Result<Vec<[f64; 3]>> {
    let [x, y, z] = ["x", "y", "z"].map(|name| coordinate(grid, name));
    let (x, y, z) = (x?, y?, z?);

    let point = |i: usize| -> [f64; 3] {
        [
            x.get_f64(i).unwrap_or(f64::NAN),
            y.get_f64(i).unwrap_or(f64::NAN),
            z.get_f64(i).unwrap_or(f64::NAN),
        ]
    };

    if !remove_nans {
        return Ok((0..grid.len()).map(point).collect());
    }

    let keep: Vec<bool> = (0..grid.len())
        .map(|i| point(i).iter().all(|v| v.is_finite()))
        .collect();
    let finite = grid.filter_records(&keep)?;
    get_xyz_points(&finite, false)
}

fn coordinate<'a>(grid: &'a RecordGrid, name: &str) -> Result<&'a ColumnData> {
    let entry = grid
        .schema()
        .entry(name)
        .ok_or_else(|| CodecError::missing_field(name))?;
    if entry.count != 1 {
        return Err(CodecError::shape_mismatch(
            format!("count of column '{name}'"),
            1,
            entry.count,
        ));
    }
    grid.column(name)
        .ok_or_else(|| CodecError::missing_field(name))
}
