//! Binary (SSZ) codec interface.
//!
//! Only fixed-size values are covered: little-endian integers, booleans, byte
//! vectors, containers of fixed-size fields (declared with [`ssz_container!`])
//! and lists of fixed-size elements. Values that cannot be encoded simply do
//! not implement these traits, and the provider refuses to send them as SSZ.
//!
//! [`ssz_container!`]: crate::ssz_container

use crate::obj::CodecError;

pub trait SszEncode {
    fn encode_bytes(&self) -> Vec<u8>;

    /// Fails for values holding data that has no SSZ form.
    fn try_encode_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(self.encode_bytes())
    }
}

pub trait SszDecode: Sized {
    fn decode_bytes(bytes: &[u8]) -> Result<Self, CodecError>;
}

/// A value whose encoding always has the same length.
pub trait SszFixed: SszEncode + SszDecode {
    const FIXED_LEN: usize;

    fn write_bytes(&self, out: &mut Vec<u8>);
}

/// Checks the input length of a fixed-size decode.
pub fn expect_len(bytes: &[u8], expected: usize) -> Result<(), CodecError> {
    if bytes.len() != expected {
        return Err(CodecError::InvalidLength {
            expected,
            got: bytes.len(),
        });
    }
    Ok(())
}

macro_rules! ssz_uint {
    ($($t:ty),*) => {$(
        impl SszEncode for $t {
            fn encode_bytes(&self) -> Vec<u8> {
                self.to_le_bytes().to_vec()
            }
        }

        impl SszDecode for $t {
            fn decode_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
                let array = bytes.try_into().map_err(|_| CodecError::InvalidLength {
                    expected: size_of::<$t>(),
                    got: bytes.len(),
                })?;
                Ok(<$t>::from_le_bytes(array))
            }
        }

        impl SszFixed for $t {
            const FIXED_LEN: usize = size_of::<$t>();

            fn write_bytes(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

ssz_uint!(u8, u16, u32, u64);

impl SszEncode for bool {
    fn encode_bytes(&self) -> Vec<u8> {
        vec![u8::from(*self)]
    }
}

impl SszDecode for bool {
    fn decode_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        match bytes {
            [0] => Ok(false),
            [1] => Ok(true),
            [b] => Err(CodecError::InvalidValue {
                expected: "boolean byte",
                got: b.to_string(),
            }),
            _ => Err(CodecError::InvalidLength {
                expected: 1,
                got: bytes.len(),
            }),
        }
    }
}

impl SszFixed for bool {
    const FIXED_LEN: usize = 1;

    fn write_bytes(&self, out: &mut Vec<u8>) {
        out.push(u8::from(*self));
    }
}

impl<const N: usize> SszEncode for [u8; N] {
    fn encode_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }
}

impl<const N: usize> SszDecode for [u8; N] {
    fn decode_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        bytes.try_into().map_err(|_| CodecError::InvalidLength {
            expected: N,
            got: bytes.len(),
        })
    }
}

impl<const N: usize> SszFixed for [u8; N] {
    const FIXED_LEN: usize = N;

    fn write_bytes(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }
}

/// Declares a fixed-size container: an [`obj_struct!`] record whose SSZ
/// encoding is the concatenation of its fields.
///
/// [`obj_struct!`]: crate::obj_struct
#[macro_export]
macro_rules! ssz_container {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $crate::obj_struct! {
            @define ssz
            $(#[$meta])*
            $vis struct $name {
                $( $(#[$fmeta])* $fvis $field: $ty, )*
            }
        }

        impl $crate::ssz::SszEncode for $name {
            fn encode_bytes(&self) -> Vec<u8> {
                let mut out = Vec::with_capacity(<Self as $crate::ssz::SszFixed>::FIXED_LEN);
                $crate::ssz::SszFixed::write_bytes(self, &mut out);
                out
            }
        }

        impl $crate::ssz::SszDecode for $name {
            fn decode_bytes(bytes: &[u8]) -> Result<Self, $crate::obj::CodecError> {
                $crate::ssz::expect_len(bytes, <Self as $crate::ssz::SszFixed>::FIXED_LEN)?;
                let mut offset = 0usize;
                $(
                    let end = offset + <$ty as $crate::ssz::SszFixed>::FIXED_LEN;
                    let $field = <$ty as $crate::ssz::SszDecode>::decode_bytes(&bytes[offset..end])?;
                    offset = end;
                )*
                let _ = offset;
                Ok(Self { $( $field, )* })
            }
        }

        impl $crate::ssz::SszFixed for $name {
            const FIXED_LEN: usize = 0 $( + <$ty as $crate::ssz::SszFixed>::FIXED_LEN )*;

            fn write_bytes(&self, out: &mut Vec<u8>) {
                $( $crate::ssz::SszFixed::write_bytes(&self.$field, out); )*
            }
        }
    };
}
