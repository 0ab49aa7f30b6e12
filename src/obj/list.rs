use std::ops::{Deref, DerefMut};

use super::{CodecError, FromObj, ObjType, ToObj, kind};
use crate::ssz::{SszDecode, SszEncode, SszFixed};

/// Ordered list whose elements go through their own codec.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjList<E>(pub Vec<E>);

impl<E> ObjList<E> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn into_inner(self) -> Vec<E> {
        self.0
    }
}

impl<E> Deref for ObjList<E> {
    type Target = Vec<E>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E> DerefMut for ObjList<E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<E> From<Vec<E>> for ObjList<E> {
    fn from(items: Vec<E>) -> Self {
        Self(items)
    }
}

impl<E> FromIterator<E> for ObjList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<E> IntoIterator for ObjList<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<E: ToObj> ToObj for ObjList<E> {
    fn to_obj(&self) -> ObjType {
        ObjType::Array(self.0.iter().map(ToObj::to_obj).collect())
    }
}

impl<E: FromObj> FromObj for ObjList<E> {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
        match obj {
            ObjType::Array(items) => items.into_iter().map(E::from_obj).collect(),
            other => Err(CodecError::ExpectedList(kind(&other))),
        }
    }
}

// A list of fixed-size elements is the concatenation of their encodings.
impl<E: SszFixed> SszEncode for ObjList<E> {
    fn encode_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.0.len() * E::FIXED_LEN);
        for item in &self.0 {
            item.write_bytes(&mut out);
        }
        out
    }
}

impl<E: SszFixed> SszDecode for ObjList<E> {
    fn decode_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if E::FIXED_LEN == 0 || bytes.len() % E::FIXED_LEN != 0 {
            return Err(CodecError::InvalidLength {
                expected: bytes.len().next_multiple_of(E::FIXED_LEN.max(1)),
                got: bytes.len(),
            });
        }
        bytes.chunks_exact(E::FIXED_LEN).map(E::decode_bytes).collect()
    }
}
