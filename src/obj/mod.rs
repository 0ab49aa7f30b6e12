//! Object codec: conversion between typed values and the generic JSON object model.
//!
//! A type crosses the JSON boundary by implementing [`ToObj`] (export) and
//! [`FromObj`] (import). Scalars pass through unchanged. The containers
//! [`ObjList`] and [`ObjDict`] and records declared with [`obj_struct!`]
//! delegate to their element types, so the element codec is picked at compile
//! time from the trait bounds.
//!
//! [`obj_struct!`]: crate::obj_struct

mod dict;
mod list;
mod structs;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use dict::ObjDict;
pub use list::ObjList;
pub use structs::{expect_fields, take_field};

/// The generic object representation: mappings, sequences and scalars.
pub type ObjType = serde_json::Value;

pub type ObjMap = serde_json::Map<String, ObjType>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("expected list input, got {0}")]
    ExpectedList(&'static str),

    #[error("expected dict input, got {0}")]
    ExpectedDict(&'static str),

    /// The keys of a record did not match its declared fields exactly.
    #[error("unexpected difference in obj keys: expected {expected:?}, got {got:?}")]
    FieldMismatch { expected: Vec<String>, got: Vec<String> },

    #[error("expected {expected}, got {got}")]
    InvalidValue { expected: &'static str, got: String },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("{0}")]
    Plain(String),
}

/// Export: value to generic object.
pub trait ToObj {
    fn to_obj(&self) -> ObjType;
}

/// Import: generic object to value, as a type-level factory.
pub trait FromObj: Sized {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError>;
}

/// Short name of the JSON kind, for error messages.
pub(crate) fn kind(obj: &ObjType) -> &'static str {
    match obj {
        ObjType::Null => "null",
        ObjType::Bool(_) => "bool",
        ObjType::Number(_) => "number",
        ObjType::String(_) => "string",
        ObjType::Array(_) => "list",
        ObjType::Object(_) => "dict",
    }
}

/// Default import for plain aggregate types: a mapping fills named fields,
/// anything else is handed to the type as its single value.
pub fn from_plain<T: DeserializeOwned>(obj: ObjType) -> Result<T, CodecError> {
    serde_json::from_value(obj).map_err(|e| CodecError::Plain(e.to_string()))
}

impl ToObj for ObjType {
    fn to_obj(&self) -> ObjType {
        self.clone()
    }
}

impl FromObj for ObjType {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
        Ok(obj)
    }
}

impl ToObj for bool {
    fn to_obj(&self) -> ObjType {
        ObjType::Bool(*self)
    }
}

impl FromObj for bool {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
        match obj {
            ObjType::Bool(b) => Ok(b),
            other => Err(CodecError::InvalidValue {
                expected: "bool",
                got: kind(&other).to_string(),
            }),
        }
    }
}

impl ToObj for String {
    fn to_obj(&self) -> ObjType {
        ObjType::String(self.clone())
    }
}

impl ToObj for &str {
    fn to_obj(&self) -> ObjType {
        ObjType::String(self.to_string())
    }
}

impl FromObj for String {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
        match obj {
            ObjType::String(s) => Ok(s),
            other => Err(CodecError::InvalidValue {
                expected: "string",
                got: kind(&other).to_string(),
            }),
        }
    }
}

// Node APIs quote large integers, so unsigned imports accept decimal strings too.
macro_rules! unsigned_obj {
    ($($t:ty),*) => {$(
        impl ToObj for $t {
            fn to_obj(&self) -> ObjType {
                ObjType::from(*self)
            }
        }

        impl FromObj for $t {
            fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
                let parsed = match &obj {
                    ObjType::Number(n) => n.as_u64().and_then(|v| <$t>::try_from(v).ok()),
                    ObjType::String(s) => s.parse::<$t>().ok(),
                    _ => None,
                };
                parsed.ok_or_else(|| CodecError::InvalidValue {
                    expected: stringify!($t),
                    got: obj.to_string(),
                })
            }
        }
    )*};
}

unsigned_obj!(u8, u16, u32, u64);

impl ToObj for i64 {
    fn to_obj(&self) -> ObjType {
        ObjType::from(*self)
    }
}

impl FromObj for i64 {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
        let parsed = match &obj {
            ObjType::Number(n) => n.as_i64(),
            ObjType::String(s) => s.parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| CodecError::InvalidValue {
            expected: "i64",
            got: obj.to_string(),
        })
    }
}

/// Byte vectors travel as `0x`-prefixed hex.
impl<const N: usize> ToObj for [u8; N] {
    fn to_obj(&self) -> ObjType {
        ObjType::String(format!("0x{}", hex::encode(self)))
    }
}

impl<const N: usize> FromObj for [u8; N] {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
        let text = match obj {
            ObjType::String(s) => s,
            other => {
                return Err(CodecError::InvalidValue {
                    expected: "hex string",
                    got: kind(&other).to_string(),
                });
            },
        };
        let digits = text.strip_prefix("0x").unwrap_or(&text);
        let bytes = hex::decode(digits).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
        let got = bytes.len();
        bytes
            .try_into()
            .map_err(|_| CodecError::InvalidLength { expected: N, got })
    }
}

impl<T: ToObj> ToObj for Option<T> {
    fn to_obj(&self) -> ObjType {
        match self {
            Some(v) => v.to_obj(),
            None => ObjType::Null,
        }
    }
}

/// Null stays absent; any other value goes through the inner type's import.
impl<T: FromObj> FromObj for Option<T> {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
        match obj {
            ObjType::Null => Ok(None),
            other => T::from_obj(other).map(Some),
        }
    }
}
