// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Record layouts and the schemas derived from them.
//!
//! A [`RecordLayout`] is the wire description of one packed point: an ordered
//! list of [`FieldDescriptor`]s plus the record stride (`point_step`). A
//! [`RecordSchema`] is the columnar view of the same bytes: one
//! [`SchemaEntry`] per column, each tagged with its intra-record offset.
//!
//! [`fields_to_schema`] walks the descriptors left to right and materializes
//! every byte not claimed by a real field as a one-byte padding entry named
//! `__<offset>`, so the schema covers the whole stride. [`schema_to_fields`]
//! goes the other way and drops padding entries again; padding is always
//! re-derived from offset gaps, never from the synthetic names.

use std::collections::HashSet;

use tracing::debug;

use crate::core::{CodecError, ElementType, Endianness, Result, ScalarType};
use crate::msgs::{PointCloud2, PointField};

/// Prefix of the synthetic padding entries inserted to keep offsets aligned.
///
/// Real field names must not start with this prefix.
pub const DUMMY_FIELD_PREFIX: &str = "__";

/// Check if a column name is reserved for padding.
#[inline]
pub fn is_padding_name(name: &str) -> bool {
    name.starts_with(DUMMY_FIELD_PREFIX)
}

/// One scalar or fixed-size array field within a packed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Byte offset from the start of the record
    pub offset: usize,
    pub scalar_type: ScalarType,
    /// Number of contiguous elements; 1 for a scalar field
    pub count: usize,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        offset: usize,
        scalar_type: ScalarType,
        count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            offset,
            scalar_type,
            count,
        }
    }

    /// Bytes occupied by this field.
    pub fn byte_len(&self) -> usize {
        self.count * self.scalar_type.size()
    }

    fn byte_len_checked(&self) -> Option<usize> {
        self.count.checked_mul(self.scalar_type.size())
    }

    /// Offset one past the last byte of this field.
    pub fn end(&self) -> usize {
        self.offset + self.byte_len()
    }
}

impl TryFrom<&PointField> for FieldDescriptor {
    type Error = CodecError;

    fn try_from(field: &PointField) -> Result<Self> {
        let scalar_type = ScalarType::from_code(field.datatype)?;
        Ok(Self {
            name: field.name.clone(),
            offset: field.offset as usize,
            scalar_type,
            count: field.count as usize,
        })
    }
}

impl From<&FieldDescriptor> for PointField {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            offset: field.offset as u32,
            datatype: field.scalar_type.code().into(),
            count: field.count as u32,
        }
    }
}

/// Wire description of a packed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    /// Fields in ascending offset order
    pub fields: Vec<FieldDescriptor>,
    /// Record stride in bytes
    pub point_step: usize,
    pub endianness: Endianness,
}

impl RecordLayout {
    pub fn new(fields: Vec<FieldDescriptor>, point_step: usize, endianness: Endianness) -> Self {
        Self {
            fields,
            point_step,
            endianness,
        }
    }

    /// Read the layout from a point cloud header.
    ///
    /// Every datatype code is checked here, before the payload is touched.
    pub fn from_cloud(cloud: &PointCloud2) -> Result<Self> {
        let fields = cloud
            .fields
            .iter()
            .map(FieldDescriptor::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            fields,
            point_step: cloud.point_step as usize,
            endianness: Endianness::from_big_endian_flag(cloud.is_bigendian),
        })
    }

    /// Derive the padded columnar schema for this layout.
    pub fn schema(&self) -> Result<RecordSchema> {
        fields_to_schema(&self.fields, self.point_step)
    }

    /// Same as [`schema`](Self::schema) followed by
    /// [`RecordSchema::without_padding`], without building the padding
    /// entries first.
    pub fn unpadded_schema(&self) -> Result<RecordSchema> {
        derive_schema(&self.fields, self.point_step, false)
    }
}

/// One column of a record schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub name: String,
    pub element_type: ElementType,
    /// Elements per record
    pub count: usize,
    /// Byte offset within the record
    pub offset: usize,
}

impl SchemaEntry {
    pub fn new(
        name: impl Into<String>,
        element_type: ElementType,
        count: usize,
        offset: usize,
    ) -> Self {
        Self {
            name: name.into(),
            element_type,
            count,
            offset,
        }
    }

    /// One padding byte at `offset`.
    pub fn padding(offset: usize) -> Self {
        Self::new(
            format!("{DUMMY_FIELD_PREFIX}{offset}"),
            ElementType::UInt8,
            1,
            offset,
        )
    }

    pub fn is_padding(&self) -> bool {
        is_padding_name(&self.name)
    }

    pub fn byte_len(&self) -> usize {
        self.count * self.element_type.size()
    }

    pub fn end(&self) -> usize {
        self.offset + self.byte_len()
    }
}

/// Ordered columns of a record plus its stride.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSchema {
    entries: Vec<SchemaEntry>,
    stride: usize,
}

impl RecordSchema {
    /// Build a schema with explicit offsets.
    ///
    /// Entries may be declared in any order but must have unique names, a
    /// non-zero count, and non-overlapping byte ranges inside `stride`.
    pub fn new(entries: Vec<SchemaEntry>, stride: usize) -> Result<Self> {
        let mut names = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.count == 0 {
                return Err(CodecError::invalid_layout(format!(
                    "column '{}' has a count of zero",
                    entry.name
                )));
            }
            if !names.insert(entry.name.as_str()) {
                return Err(CodecError::invalid_layout(format!(
                    "duplicate column '{}'",
                    entry.name
                )));
            }
            if entry.end() > stride {
                return Err(CodecError::invalid_layout(format!(
                    "column '{}' ends at byte {} past the {stride}-byte stride",
                    entry.name,
                    entry.end()
                )));
            }
        }

        let mut ranges: Vec<&SchemaEntry> = entries.iter().collect();
        ranges.sort_by_key(|e| e.offset);
        for pair in ranges.windows(2) {
            if pair[1].offset < pair[0].end() {
                return Err(CodecError::invalid_layout(format!(
                    "column '{}' at offset {} overlaps '{}'",
                    pair[1].name, pair[1].offset, pair[0].name
                )));
            }
        }

        Ok(Self { entries, stride })
    }

    /// Build a tightly packed schema, offsets assigned in declaration order.
    pub fn packed<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ElementType, usize)>,
        S: Into<String>,
    {
        let mut offset = 0;
        let mut entries = Vec::new();
        for (name, element_type, count) in columns {
            let entry = SchemaEntry::new(name, element_type, count, offset);
            offset = entry.end();
            entries.push(entry);
        }
        Self::new(entries, offset)
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// Record stride in bytes, including padding.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find an entry by name.
    pub fn entry(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of padding entries.
    pub fn padding_len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_padding()).count()
    }

    /// Same schema with padding entries removed; offsets and stride are kept.
    pub fn without_padding(&self) -> RecordSchema {
        RecordSchema {
            entries: self
                .entries
                .iter()
                .filter(|e| !e.is_padding())
                .cloned()
                .collect(),
            stride: self.stride,
        }
    }
}

/// Derive the padded columnar schema of a record.
///
/// `fields` must be in ascending offset order; they are not sorted here. Every
/// byte between fields, and between the last field and `point_step`, becomes a
/// one-byte `uint8` padding entry.
pub fn fields_to_schema(fields: &[FieldDescriptor], point_step: usize) -> Result<RecordSchema> {
    derive_schema(fields, point_step, true)
}

/// Validate and place the fields; padding entries are materialized only when
/// `with_padding` is set.
fn derive_schema(
    fields: &[FieldDescriptor],
    point_step: usize,
    with_padding: bool,
) -> Result<RecordSchema> {
    let mut entries = Vec::with_capacity(fields.len());
    let mut names = HashSet::with_capacity(fields.len());
    let mut cursor = 0usize;

    for field in fields {
        if field.count == 0 {
            return Err(CodecError::invalid_layout(format!(
                "field '{}' has a count of zero",
                field.name
            )));
        }
        if is_padding_name(&field.name) {
            return Err(CodecError::invalid_layout(format!(
                "field '{}' uses the reserved prefix '{DUMMY_FIELD_PREFIX}'",
                field.name
            )));
        }
        if !names.insert(field.name.as_str()) {
            return Err(CodecError::invalid_layout(format!(
                "duplicate field '{}'",
                field.name
            )));
        }
        if field.offset < cursor {
            return Err(CodecError::invalid_layout(format!(
                "field '{}' at offset {} overlaps the previous field ending at {cursor}",
                field.name, field.offset
            )));
        }

        // Bounds are checked before any padding for the gap is emitted.
        let end = field
            .byte_len_checked()
            .and_then(|len| field.offset.checked_add(len))
            .filter(|&end| end <= point_step)
            .ok_or_else(|| {
                CodecError::invalid_layout(format!(
                    "field '{}' at offset {} does not fit in point_step {point_step}",
                    field.name, field.offset
                ))
            })?;

        if with_padding {
            entries.extend((cursor..field.offset).map(SchemaEntry::padding));
        }

        entries.push(SchemaEntry::new(
            field.name.clone(),
            field.scalar_type.element_type(),
            field.count,
            field.offset,
        ));
        cursor = end;
    }

    if with_padding {
        entries.extend((cursor..point_step).map(SchemaEntry::padding));
    }

    let schema = RecordSchema {
        entries,
        stride: point_step,
    };
    debug!(
        fields = fields.len(),
        padding = schema.padding_len(),
        point_step,
        "derived record schema"
    );
    Ok(schema)
}

/// Derive the field descriptors of the real (non-padding) schema entries.
///
/// Offsets come straight from the schema. Fails with
/// [`CodecError::UnsupportedType`] for element types without a wire code.
pub fn schema_to_fields(schema: &RecordSchema) -> Result<Vec<FieldDescriptor>> {
    schema
        .entries()
        .iter()
        .filter(|e| !e.is_padding())
        .map(|e| {
            Ok(FieldDescriptor {
                name: e.name.clone(),
                offset: e.offset,
                scalar_type: ScalarType::try_from(e.element_type)?,
                count: e.count,
            })
        })
        .collect()
}
