// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout roboarray.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Typed conversion failures
//! - [`ScalarType`] / [`ElementType`] - Wire and column element type tags
//! - [`ColumnData`] - Typed contiguous column storage
//! - [`Endianness`] - Payload byte order

pub mod column;
pub mod error;
pub mod types;

pub use column::ColumnData;
pub use error::{CodecError, Result};
pub(crate) use error::to_wire_u32;
pub use types::{ElementType, Endianness, ScalarType};
