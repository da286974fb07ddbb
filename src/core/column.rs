// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed column storage.
//!
//! A [`ColumnData`] owns one contiguous `Vec` of a single element type. It is
//! the columnar counterpart of a packed record field: the codec reads each
//! element out of the record bytes into the column, and writes it back at
//! the same offset on the way out.

use byteorder::ByteOrder;

use super::types::ElementType;

/// Contiguous values of a single element type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Bool(Vec<bool>),
    Int8(Vec<i8>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

/// Apply the same expression to the inner `Vec` of every variant.
macro_rules! each_variant {
    ($data:expr, $values:ident => $body:expr) => {
        match $data {
            ColumnData::Bool($values) => $body,
            ColumnData::Int8($values) => $body,
            ColumnData::UInt8($values) => $body,
            ColumnData::Int16($values) => $body,
            ColumnData::UInt16($values) => $body,
            ColumnData::Int32($values) => $body,
            ColumnData::UInt32($values) => $body,
            ColumnData::Int64($values) => $body,
            ColumnData::UInt64($values) => $body,
            ColumnData::Float32($values) => $body,
            ColumnData::Float64($values) => $body,
        }
    };
}

/// `From<Vec<T>>` plus a borrowing accessor per element type.
macro_rules! typed_access {
    ($($variant:ident, $ty:ty, $accessor:ident;)*) => {
        $(
            impl From<Vec<$ty>> for ColumnData {
                fn from(values: Vec<$ty>) -> Self {
                    ColumnData::$variant(values)
                }
            }
        )*

        impl ColumnData {
            $(
                #[doc = concat!("Borrow the values if this column holds `", stringify!($ty), "`.")]
                pub fn $accessor(&self) -> Option<&[$ty]> {
                    match self {
                        ColumnData::$variant(values) => Some(values.as_slice()),
                        _ => None,
                    }
                }
            )*
        }
    };
}

typed_access! {
    Bool, bool, as_bool;
    Int8, i8, as_i8;
    UInt8, u8, as_u8;
    Int16, i16, as_i16;
    UInt16, u16, as_u16;
    Int32, i32, as_i32;
    UInt32, u32, as_u32;
    Int64, i64, as_i64;
    UInt64, u64, as_u64;
    Float32, f32, as_f32;
    Float64, f64, as_f64;
}

impl ColumnData {
    /// Create an empty column with room for `capacity` elements.
    pub fn with_capacity(element_type: ElementType, capacity: usize) -> Self {
        match element_type {
            ElementType::Bool => ColumnData::Bool(Vec::with_capacity(capacity)),
            ElementType::Int8 => ColumnData::Int8(Vec::with_capacity(capacity)),
            ElementType::UInt8 => ColumnData::UInt8(Vec::with_capacity(capacity)),
            ElementType::Int16 => ColumnData::Int16(Vec::with_capacity(capacity)),
            ElementType::UInt16 => ColumnData::UInt16(Vec::with_capacity(capacity)),
            ElementType::Int32 => ColumnData::Int32(Vec::with_capacity(capacity)),
            ElementType::UInt32 => ColumnData::UInt32(Vec::with_capacity(capacity)),
            ElementType::Int64 => ColumnData::Int64(Vec::with_capacity(capacity)),
            ElementType::UInt64 => ColumnData::UInt64(Vec::with_capacity(capacity)),
            ElementType::Float32 => ColumnData::Float32(Vec::with_capacity(capacity)),
            ElementType::Float64 => ColumnData::Float64(Vec::with_capacity(capacity)),
        }
    }

    /// Element type held by this column.
    pub fn element_type(&self) -> ElementType {
        match self {
            ColumnData::Bool(_) => ElementType::Bool,
            ColumnData::Int8(_) => ElementType::Int8,
            ColumnData::UInt8(_) => ElementType::UInt8,
            ColumnData::Int16(_) => ElementType::Int16,
            ColumnData::UInt16(_) => ElementType::UInt16,
            ColumnData::Int32(_) => ElementType::Int32,
            ColumnData::UInt32(_) => ElementType::UInt32,
            ColumnData::Int64(_) => ElementType::Int64,
            ColumnData::UInt64(_) => ElementType::UInt64,
            ColumnData::Float32(_) => ElementType::Float32,
            ColumnData::Float64(_) => ElementType::Float64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        each_variant!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when no element is NaN or infinite.
    ///
    /// Scans every element; integer and boolean columns are always finite.
    pub fn all_finite(&self) -> bool {
        match self {
            ColumnData::Float32(values) => values.iter().all(|v| v.is_finite()),
            ColumnData::Float64(values) => values.iter().all(|v| v.is_finite()),
            _ => true,
        }
    }

    /// Element at `index` widened to f64.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        match self {
            ColumnData::Bool(v) => v.get(index).map(|&b| if b { 1.0 } else { 0.0 }),
            ColumnData::Int8(v) => v.get(index).map(|&x| x as f64),
            ColumnData::UInt8(v) => v.get(index).map(|&x| x as f64),
            ColumnData::Int16(v) => v.get(index).map(|&x| x as f64),
            ColumnData::UInt16(v) => v.get(index).map(|&x| x as f64),
            ColumnData::Int32(v) => v.get(index).map(|&x| x as f64),
            ColumnData::UInt32(v) => v.get(index).map(|&x| x as f64),
            ColumnData::Int64(v) => v.get(index).map(|&x| x as f64),
            ColumnData::UInt64(v) => v.get(index).map(|&x| x as f64),
            ColumnData::Float32(v) => v.get(index).map(|&x| x as f64),
            ColumnData::Float64(v) => v.get(index).copied(),
        }
    }

    /// Keep only the elements whose `keep` flag is set.
    ///
    /// `keep` has one flag per record; each record spans `count` elements.
    pub fn filter_records(&self, count: usize, keep: &[bool]) -> ColumnData {
        fn select<T: Copy>(values: &[T], count: usize, keep: &[bool]) -> Vec<T> {
            values
                .chunks(count.max(1))
                .zip(keep)
                .filter(|&(_, &k)| k)
                .flat_map(|(chunk, _)| chunk.iter().copied())
                .collect()
        }
        match self {
            ColumnData::Bool(v) => ColumnData::Bool(select(v, count, keep)),
            ColumnData::Int8(v) => ColumnData::Int8(select(v, count, keep)),
            ColumnData::UInt8(v) => ColumnData::UInt8(select(v, count, keep)),
            ColumnData::Int16(v) => ColumnData::Int16(select(v, count, keep)),
            ColumnData::UInt16(v) => ColumnData::UInt16(select(v, count, keep)),
            ColumnData::Int32(v) => ColumnData::Int32(select(v, count, keep)),
            ColumnData::UInt32(v) => ColumnData::UInt32(select(v, count, keep)),
            ColumnData::Int64(v) => ColumnData::Int64(select(v, count, keep)),
            ColumnData::UInt64(v) => ColumnData::UInt64(select(v, count, keep)),
            ColumnData::Float32(v) => ColumnData::Float32(select(v, count, keep)),
            ColumnData::Float64(v) => ColumnData::Float64(select(v, count, keep)),
        }
    }

    /// Append one element decoded from `bytes`.
    ///
    /// `bytes` must be exactly `element_type().size()` long.
    pub(crate) fn push_from_bytes<B: ByteOrder>(&mut self, bytes: &[u8]) {
        match self {
            ColumnData::Bool(v) => v.push(bytes[0] != 0),
            ColumnData::Int8(v) => v.push(bytes[0] as i8),
            ColumnData::UInt8(v) => v.push(bytes[0]),
            ColumnData::Int16(v) => v.push(B::read_i16(bytes)),
            ColumnData::UInt16(v) => v.push(B::read_u16(bytes)),
            ColumnData::Int32(v) => v.push(B::read_i32(bytes)),
            ColumnData::UInt32(v) => v.push(B::read_u32(bytes)),
            ColumnData::Int64(v) => v.push(B::read_i64(bytes)),
            ColumnData::UInt64(v) => v.push(B::read_u64(bytes)),
            ColumnData::Float32(v) => v.push(B::read_f32(bytes)),
            ColumnData::Float64(v) => v.push(B::read_f64(bytes)),
        }
    }

    /// Encode the element at `index` into `out`.
    ///
    /// `out` must be exactly `element_type().size()` long.
    pub(crate) fn write_to_bytes<B: ByteOrder>(&self, index: usize, out: &mut [u8]) {
        match self {
            ColumnData::Bool(v) => out[0] = u8::from(v[index]),
            ColumnData::Int8(v) => out[0] = v[index] as u8,
            ColumnData::UInt8(v) => out[0] = v[index],
            ColumnData::Int16(v) => B::write_i16(out, v[index]),
            ColumnData::UInt16(v) => B::write_u16(out, v[index]),
            ColumnData::Int32(v) => B::write_i32(out, v[index]),
            ColumnData::UInt32(v) => B::write_u32(out, v[index]),
            ColumnData::Int64(v) => B::write_i64(out, v[index]),
            ColumnData::UInt64(v) => B::write_u64(out, v[index]),
            ColumnData::Float32(v) => B::write_f32(out, v[index]),
            ColumnData::Float64(v) => B::write_f64(out, v[index]),
        }
    }
}
