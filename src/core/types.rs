// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Scalar and element type tags.
//!
//! [`ScalarType`] is the closed wire enumeration used by `sensor_msgs/PointField`
//! (datatype codes 1 through 8). [`ElementType`] is the wider set of element
//! kinds a typed column can hold; only the subset with a wire code can be
//! written into a point cloud.

use std::fmt;

use crate::core::{CodecError, Result};

/// Scalar type of a point field, tagged with its wire datatype code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScalarType {
    Int8 = 1,
    UInt8 = 2,
    Int16 = 3,
    UInt16 = 4,
    Int32 = 5,
    UInt32 = 6,
    Float32 = 7,
    Float64 = 8,
}

impl ScalarType {
    /// All scalar types in datatype-code order.
    pub const ALL: [ScalarType; 8] = [
        ScalarType::Int8,
        ScalarType::UInt8,
        ScalarType::Int16,
        ScalarType::UInt16,
        ScalarType::Int32,
        ScalarType::UInt32,
        ScalarType::Float32,
        ScalarType::Float64,
    ];

    /// Look up a scalar type by its wire datatype code.
    pub fn from_code(code: u32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| u32::from(t.code()) == code)
            .ok_or_else(|| CodecError::unsupported_type(format!("datatype {code}")))
    }

    /// Wire datatype code.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Size of one element in bytes.
    #[inline]
    pub fn size(self) -> usize {
        self.element_type().size()
    }

    /// Matching column element type.
    pub fn element_type(self) -> ElementType {
        match self {
            ScalarType::Int8 => ElementType::Int8,
            ScalarType::UInt8 => ElementType::UInt8,
            ScalarType::Int16 => ElementType::Int16,
            ScalarType::UInt16 => ElementType::UInt16,
            ScalarType::Int32 => ElementType::Int32,
            ScalarType::UInt32 => ElementType::UInt32,
            ScalarType::Float32 => ElementType::Float32,
            ScalarType::Float64 => ElementType::Float64,
        }
    }

    /// Lower-case type name (e.g. "float32").
    pub fn name(self) -> &'static str {
        self.element_type().name()
    }
}

impl TryFrom<ElementType> for ScalarType {
    type Error = CodecError;

    fn try_from(element: ElementType) -> Result<Self> {
        match element {
            ElementType::Int8 => Ok(ScalarType::Int8),
            ElementType::UInt8 => Ok(ScalarType::UInt8),
            ElementType::Int16 => Ok(ScalarType::Int16),
            ElementType::UInt16 => Ok(ScalarType::UInt16),
            ElementType::Int32 => Ok(ScalarType::Int32),
            ElementType::UInt32 => Ok(ScalarType::UInt32),
            ElementType::Float32 => Ok(ScalarType::Float32),
            ElementType::Float64 => Ok(ScalarType::Float64),
            ElementType::Bool | ElementType::Int64 | ElementType::UInt64 => {
                Err(CodecError::unsupported_type(element.name()))
            }
        }
    }
}

impl TryFrom<u32> for ScalarType {
    type Error = CodecError;

    fn try_from(code: u32) -> Result<Self> {
        Self::from_code(code)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element type of a typed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl ElementType {
    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            ElementType::Bool | ElementType::Int8 | ElementType::UInt8 => 1,
            ElementType::Int16 | ElementType::UInt16 => 2,
            ElementType::Int32 | ElementType::UInt32 | ElementType::Float32 => 4,
            ElementType::Int64 | ElementType::UInt64 | ElementType::Float64 => 8,
        }
    }

    /// Lower-case type name.
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Bool => "bool",
            ElementType::Int8 => "int8",
            ElementType::UInt8 => "uint8",
            ElementType::Int16 => "int16",
            ElementType::UInt16 => "uint16",
            ElementType::Int32 => "int32",
            ElementType::UInt32 => "uint32",
            ElementType::Int64 => "int64",
            ElementType::UInt64 => "uint64",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
        }
    }

    /// Check if this is a floating-point type.
    pub fn is_float(self) -> bool {
        matches!(self, ElementType::Float32 | ElementType::Float64)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte order of multi-byte scalars in a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl Endianness {
    /// Byte order of the target platform.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    /// Map the wire `is_bigendian` flag.
    pub fn from_big_endian_flag(is_bigendian: bool) -> Self {
        if is_bigendian {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    pub fn is_big(self) -> bool {
        matches!(self, Endianness::Big)
    }
}
