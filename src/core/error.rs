// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for roboarray.
//!
//! Every conversion reports violations synchronously as a typed failure:
//! - Unknown scalar types or encodings
//! - Buffer lengths, dimensions or element types that disagree
//! - Missing named columns
//! - Malformed record layouts

use std::fmt;

/// Errors that can occur while converting messages to or from arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Datatype code, element type or encoding outside the supported set
    UnsupportedType {
        /// The offending type as text (e.g. "datatype 9", "int64", "yuv422")
        type_name: String,
    },

    /// Buffer length, dimensions or element type inconsistent with expectations
    ShapeMismatch {
        /// What was being checked
        context: String,
        /// Expected value
        expected: String,
        /// Actual value
        actual: String,
    },

    /// A required named column is absent
    MissingField {
        /// Column name
        field: String,
    },

    /// Record layout cannot be laid out left-to-right within its stride
    InvalidLayout {
        /// Why the layout was rejected
        reason: String,
    },

    /// Value is well-typed but numerically invalid
    InvalidValue {
        /// What was being converted
        context: String,
        /// Error message
        message: String,
    },

    /// Parse error in wire text, base64 payload or configuration
    ParseError {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// Other error
    Other(String),
}

impl CodecError {
    /// Create an unsupported type error.
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        CodecError::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Create a shape mismatch error.
    pub fn shape_mismatch(
        context: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        CodecError::ShapeMismatch {
            context: context.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        CodecError::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid layout error.
    pub fn invalid_layout(reason: impl Into<String>) -> Self {
        CodecError::InvalidLayout {
            reason: reason.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::InvalidValue {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::ParseError {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::UnsupportedType { type_name } => vec![("type", type_name.clone())],
            CodecError::ShapeMismatch {
                context,
                expected,
                actual,
            } => vec![
                ("context", context.clone()),
                ("expected", expected.clone()),
                ("actual", actual.clone()),
            ],
            CodecError::MissingField { field } => vec![("field", field.clone())],
            CodecError::InvalidLayout { reason } => vec![("reason", reason.clone())],
            CodecError::InvalidValue { context, message }
            | CodecError::ParseError { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnsupportedType { type_name } => {
                write!(f, "Unsupported type: '{type_name}'")
            }
            CodecError::ShapeMismatch {
                context,
                expected,
                actual,
            } => write!(
                f,
                "Shape mismatch in {context}: expected {expected}, got {actual}"
            ),
            CodecError::MissingField { field } => {
                write!(f, "Missing field: '{field}'")
            }
            CodecError::InvalidLayout { reason } => {
                write!(f, "Invalid record layout: {reason}")
            }
            CodecError::InvalidValue { context, message } => {
                write!(f, "Invalid value in {context}: {message}")
            }
            CodecError::ParseError { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            CodecError::Other(msg) => write!(f, "Other error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::parse("json", err.to_string())
    }
}

/// Result type for roboarray operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Narrow a size to a `uint32` message field.
pub(crate) fn to_wire_u32(context: &str, value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| CodecError::shape_mismatch(context, format!("at most {}", u32::MAX), value))
}
