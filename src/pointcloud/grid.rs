// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Columnar record grids.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::layout::{is_padding_name, RecordSchema, SchemaEntry, DUMMY_FIELD_PREFIX};
use crate::core::{CodecError, ColumnData, Endianness, Result};

/// Shape of a record grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridShape {
    /// A flat sequence of records (a squeezed single-row cloud)
    Flat(usize),
    /// `height` rows of `width` records
    Grid { height: usize, width: usize },
}

impl GridShape {
    /// Total number of records.
    pub fn len(&self) -> usize {
        match *self {
            GridShape::Flat(len) => len,
            GridShape::Grid { height, width } => height * width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(height, width)`, promoting a flat sequence to a single row.
    pub fn as_2d(&self) -> (usize, usize) {
        match *self {
            GridShape::Flat(len) => (1, len),
            GridShape::Grid { height, width } => (height, width),
        }
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, GridShape::Flat(_))
    }
}

/// A named column used to assemble a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Elements per record
    pub count: usize,
    pub data: ColumnData,
}

impl Column {
    /// Scalar column, one element per record.
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self::with_count(name, 1, data)
    }

    /// Fixed-length array column, `count` elements per record.
    pub fn with_count(name: impl Into<String>, count: usize, data: impl Into<ColumnData>) -> Self {
        Self {
            name: name.into(),
            count,
            data: data.into(),
        }
    }
}

/// Structured columnar array: one named column per record field.
///
/// Record `i` of column `c` occupies elements `i * count .. (i + 1) * count`
/// of that column, records in row-major order. The schema keeps each column's
/// byte offset and the record stride so the grid can be written back to the
/// same packed layout it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGrid {
    shape: GridShape,
    schema: RecordSchema,
    columns: Vec<ColumnData>,
}

impl RecordGrid {
    /// Build a grid whose records are tightly packed in column order.
    pub fn from_columns(shape: GridShape, columns: Vec<Column>) -> Result<Self> {
        let schema = RecordSchema::packed(
            columns
                .iter()
                .map(|c| (c.name.clone(), c.data.element_type(), c.count)),
        )?;
        let data = columns.into_iter().map(|c| c.data).collect();
        Self::with_schema(shape, schema, data)
    }

    /// Build a grid over an explicit schema; `columns` follow `schema` order.
    pub fn with_schema(
        shape: GridShape,
        schema: RecordSchema,
        columns: Vec<ColumnData>,
    ) -> Result<Self> {
        if schema.len() != columns.len() {
            return Err(CodecError::shape_mismatch(
                "record grid columns",
                schema.len(),
                columns.len(),
            ));
        }
        for (entry, data) in schema.entries().iter().zip(&columns) {
            if is_padding_name(&entry.name) {
                return Err(CodecError::invalid_layout(format!(
                    "column '{}' uses the reserved prefix '{DUMMY_FIELD_PREFIX}'",
                    entry.name
                )));
            }
            if data.element_type() != entry.element_type {
                return Err(CodecError::shape_mismatch(
                    format!("element type of column '{}'", entry.name),
                    entry.element_type,
                    data.element_type(),
                ));
            }
            let expected = shape.len() * entry.count;
            if data.len() != expected {
                return Err(CodecError::shape_mismatch(
                    format!("length of column '{}'", entry.name),
                    expected,
                    data.len(),
                ));
            }
        }
        Ok(Self {
            shape,
            schema,
            columns,
        })
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Record stride in bytes.
    pub fn stride(&self) -> usize {
        self.schema.stride()
    }

    /// Column names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schema.entries().iter().map(|e| e.name.as_str())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.schema
            .entries()
            .iter()
            .position(|e| e.name == name)
            .map(|i| &self.columns[i])
    }

    /// Iterate over `(entry, data)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&SchemaEntry, &ColumnData)> {
        self.schema.entries().iter().zip(&self.columns)
    }

    /// Consume the grid into named columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.schema
            .entries()
            .iter()
            .zip(self.columns)
            .map(|(entry, data)| Column::with_count(entry.name.clone(), entry.count, data))
            .collect()
    }

    /// True when every element of every column is finite.
    pub fn is_dense(&self) -> bool {
        self.columns.iter().all(ColumnData::all_finite)
    }

    /// Collapse a single-row grid to a flat sequence.
    pub fn squeeze(mut self) -> Self {
        if let GridShape::Grid { height: 1, width } = self.shape {
            self.shape = GridShape::Flat(width);
        }
        self
    }

    /// Promote a flat sequence to a single-row grid.
    pub fn at_least_2d(mut self) -> Self {
        let (height, width) = self.shape.as_2d();
        self.shape = GridShape::Grid { height, width };
        self
    }

    /// Change the shape without touching the data.
    pub fn reshape(mut self, shape: GridShape) -> Result<Self> {
        if shape.len() != self.len() {
            return Err(CodecError::shape_mismatch(
                "record grid reshape",
                self.len(),
                shape.len(),
            ));
        }
        self.shape = shape;
        Ok(self)
    }

    /// Keep the records whose flag is set, as a flat sequence.
    pub fn filter_records(&self, keep: &[bool]) -> Result<Self> {
        if keep.len() != self.len() {
            return Err(CodecError::shape_mismatch(
                "record mask",
                self.len(),
                keep.len(),
            ));
        }
        let kept = keep.iter().filter(|&&k| k).count();
        let columns = self
            .iter()
            .map(|(entry, data)| data.filter_records(entry.count, keep))
            .collect();
        Ok(Self {
            shape: GridShape::Flat(kept),
            schema: self.schema.clone(),
            columns,
        })
    }

    /// Serialize every record contiguously, row-major.
    ///
    /// Each column is written at its schema offset; padding bytes are zero.
    pub fn to_bytes(&self, endianness: Endianness) -> Vec<u8> {
        match endianness {
            Endianness::Little => self.write_records::<LittleEndian>(),
            Endianness::Big => self.write_records::<BigEndian>(),
        }
    }

    fn write_records<B: ByteOrder>(&self) -> Vec<u8> {
        let stride = self.stride();
        let mut out = vec![0u8; self.len() * stride];
        for (entry, data) in self.iter() {
            let size = entry.element_type.size();
            for (record, bytes) in out.chunks_exact_mut(stride).enumerate() {
                for k in 0..entry.count {
                    let start = entry.offset + k * size;
                    let index = record * entry.count + k;
                    data.write_to_bytes::<B>(index, &mut bytes[start..start + size]);
                }
            }
        }
        out
    }

    /// Decode records from `data` under a padding-free `schema`.
    ///
    /// `data` must hold exactly `shape.len() * schema.stride()` bytes.
    pub(crate) fn read_records<B: ByteOrder>(
        shape: GridShape,
        schema: RecordSchema,
        data: &[u8],
    ) -> Result<Self> {
        let rows = shape.len();
        let columns = schema
            .entries()
            .iter()
            .map(|entry| {
                let size = entry.element_type.size();
                let mut column =
                    ColumnData::with_capacity(entry.element_type, rows * entry.count);
                for record in data.chunks_exact(schema.stride()) {
                    for k in 0..entry.count {
                        let start = entry.offset + k * size;
                        column.push_from_bytes::<B>(&record[start..start + size]);
                    }
                }
                column
            })
            .collect();
        Self::with_schema(shape, schema, columns)
    }
}
