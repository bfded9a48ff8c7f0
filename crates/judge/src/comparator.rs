// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed assertions on values extracted from captured output.
//!
//! A [`TypedComparator`] carries its kind explicitly: the raw captured text
//! is converted to that kind before comparing, and a failed conversion is an
//! error rather than a silent mismatch.

use std::fmt;
use thiserror::Error;

/// Kind a raw captured value is converted to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Text => write!(f, "text"),
        }
    }
}

/// Raw captured text could not be converted to the comparator's kind
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("cannot convert '{raw}' to {kind}")]
pub struct ConversionError {
    pub raw: String,
    pub kind: ValueKind,
}

/// Exact expected value
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Half-open numeric interval `lo <= x < hi`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumericRange {
    Int { lo: i64, hi: i64 },
    Float { lo: f64, hi: f64 },
}

/// Expected value for one regex capture group
#[derive(Clone, Debug, PartialEq)]
pub enum TypedComparator {
    Strict(Scalar),
    Range(NumericRange),
}

impl TypedComparator {
    pub fn int(value: i64) -> Self {
        Self::Strict(Scalar::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Self::Strict(Scalar::Float(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Strict(Scalar::Text(value.into()))
    }

    /// Integer range; bounds are ordered so `int_range(20, 10)` equals `int_range(10, 20)`.
    pub fn int_range(a: i64, b: i64) -> Self {
        Self::Range(NumericRange::Int {
            lo: a.min(b),
            hi: a.max(b),
        })
    }

    /// Float range; bounds are ordered like [`TypedComparator::int_range`].
    pub fn float_range(a: f64, b: f64) -> Self {
        Self::Range(NumericRange::Float {
            lo: a.min(b),
            hi: a.max(b),
        })
    }

    /// Kind the raw value is converted to before comparing
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Strict(Scalar::Int(_)) | Self::Range(NumericRange::Int { .. }) => {
                ValueKind::Integer
            }
            Self::Strict(Scalar::Float(_)) | Self::Range(NumericRange::Float { .. }) => {
                ValueKind::Float
            }
            Self::Strict(Scalar::Text(_)) => ValueKind::Text,
        }
    }

    /// Convert `raw` to this comparator's kind and test it.
    pub fn matches(&self, raw: &str) -> Result<bool, ConversionError> {
        match self {
            Self::Strict(Scalar::Int(expected)) => Ok(parse_int(raw)? == *expected),
            Self::Strict(Scalar::Float(expected)) => Ok(parse_float(raw)? == *expected),
            Self::Strict(Scalar::Text(expected)) => Ok(raw == expected.as_str()),
            Self::Range(NumericRange::Int { lo, hi }) => {
                let value = parse_int(raw)?;
                Ok(*lo <= value && value < *hi)
            }
            Self::Range(NumericRange::Float { lo, hi }) => {
                let value = parse_float(raw)?;
                Ok(*lo <= value && value < *hi)
            }
        }
    }
}

impl fmt::Display for TypedComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict(Scalar::Int(v)) => write!(f, "{}", v),
            Self::Strict(Scalar::Float(v)) => write!(f, "{:?}", v),
            Self::Strict(Scalar::Text(v)) => write!(f, "{}", v),
            Self::Range(NumericRange::Int { lo, hi }) => {
                write!(f, "<in range from {} to {}>", lo, hi)
            }
            Self::Range(NumericRange::Float { lo, hi }) => {
                write!(f, "<in range from {:?} to {:?}>", lo, hi)
            }
        }
    }
}

fn parse_int(raw: &str) -> Result<i64, ConversionError> {
    raw.trim().parse().map_err(|_| ConversionError {
        raw: raw.to_string(),
        kind: ValueKind::Integer,
    })
}

fn parse_float(raw: &str) -> Result<f64, ConversionError> {
    raw.trim().parse().map_err(|_| ConversionError {
        raw: raw.to_string(),
        kind: ValueKind::Float,
    })
}

#[cfg(test)]
#[path = "comparator_tests.rs"]
mod tests;
