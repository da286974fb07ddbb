// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Packed RGB helpers.
//!
//! PCL stores colour as a single float32 `rgb` field whose bit pattern is
//! `(r << 16) | (g << 8) | b`. The conversion between the two forms is a
//! bit reinterpretation, never a numeric cast.

use super::grid::{Column, RecordGrid};
use crate::core::{CodecError, ColumnData, ElementType, Result};

const CHANNELS: [&str; 3] = ["r", "g", "b"];

/// Replace the `r`, `g`, `b` uint8 columns with a single float32 `rgb` column.
///
/// The remaining columns keep their order and `rgb` is appended after them.
/// The result is tightly packed.
pub fn merge_rgb_fields(grid: &RecordGrid) -> Result<RecordGrid> {
    let r = channel(grid, "r")?;
    let g = channel(grid, "g")?;
    let b = channel(grid, "b")?;

    let packed: Vec<u32> = r
        .iter()
        .zip(g)
        .zip(b)
        .map(|((&r, &g), &b)| (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
        .collect();
    let rgb: Vec<f32> = bytemuck::cast_slice::<u32, f32>(&packed).to_vec();

    let mut columns = kept_columns(grid, |name| CHANNELS.contains(&name));
    columns.push(Column::new("rgb", rgb));
    RecordGrid::from_columns(grid.shape(), columns)
}

/// Replace the packed `rgb` column with `r`, `g`, `b` uint8 columns.
///
/// `rgb` may be float32 or uint32; its bits are read as-is. The remaining
/// columns keep their order and `r`, `g`, `b` are appended after them.
pub fn split_rgb_field(grid: &RecordGrid) -> Result<RecordGrid> {
    let packed: &[u32] = match scalar_column(grid, "rgb")? {
        ColumnData::Float32(values) => bytemuck::cast_slice(values.as_slice()),
        ColumnData::UInt32(values) => values.as_slice(),
        other => {
            return Err(CodecError::shape_mismatch(
                "element type of column 'rgb'",
                "float32 or uint32",
                other.element_type(),
            ))
        }
    };

    let r: Vec<u8> = packed.iter().map(|v| ((v >> 16) & 0xff) as u8).collect();
    let g: Vec<u8> = packed.iter().map(|v| ((v >> 8) & 0xff) as u8).collect();
    let b: Vec<u8> = packed.iter().map(|v| (v & 0xff) as u8).collect();

    let mut columns = kept_columns(grid, |name| name == "rgb");
    columns.push(Column::new("r", r));
    columns.push(Column::new("g", g));
    columns.push(Column::new("b", b));
    RecordGrid::from_columns(grid.shape(), columns)
}

fn kept_columns(grid: &RecordGrid, dropped: impl Fn(&str) -> bool) -> Vec<Column> {
    grid.iter()
        .filter(|(entry, _)| !dropped(entry.name.as_str()))
        .map(|(entry, data)| Column::with_count(entry.name.clone(), entry.count, data.clone()))
        .collect()
}

fn scalar_column<'a>(grid: &'a RecordGrid, name: &str) -> Result<&'a ColumnData> {
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

fn channel<'a>(grid: &'a RecordGrid, name: &str) -> Result<&'a [u8]> {
    let data = scalar_column(grid, name)?;
    data.as_u8().ok_or_else(|| {
        CodecError::shape_mismatch(
            format!("element type of column '{name}'"),
            ElementType::UInt8,
            data.element_type(),
        )
    })
}
