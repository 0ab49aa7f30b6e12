//! Consensus value types shared by the API models.
//!
//! Integers travel as JSON numbers (quoted decimals are accepted on import)
//! and byte vectors as `0x`-prefixed hex. All types here have a fixed SSZ
//! size, except the opaque payloads of states and blocks.

use std::fmt;
use std::str::FromStr;

use crate::obj::{CodecError, FromObj, ObjType, ToObj};
use crate::route::Arg;
use crate::ssz::{SszDecode, SszEncode, SszFixed};
use crate::ssz_container;

macro_rules! uint_newtype {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub u64);

        impl ToObj for $name {
            fn to_obj(&self) -> ObjType {
                self.0.to_obj()
            }
        }

        impl FromObj for $name {
            fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
                u64::from_obj(obj).map(Self)
            }
        }

        impl SszEncode for $name {
            fn encode_bytes(&self) -> Vec<u8> {
                self.0.encode_bytes()
            }
        }

        impl SszDecode for $name {
            fn decode_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
                u64::decode_bytes(bytes).map(Self)
            }
        }

        impl SszFixed for $name {
            const FIXED_LEN: usize = 8;

            fn write_bytes(&self, out: &mut Vec<u8>) {
                self.0.write_bytes(out);
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Arg {
            fn from(value: $name) -> Self {
                Arg::ssz(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    )*};
}

uint_newtype!(Slot, Epoch, ValidatorIndex, CommitteeIndex, Gwei);

macro_rules! bytes_newtype {
    ($($(#[$meta:meta])* $name:ident($len:expr)),* $(,)?) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub fn hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self([0u8; $len])
            }
        }

        impl ToObj for $name {
            fn to_obj(&self) -> ObjType {
                self.0.to_obj()
            }
        }

        impl FromObj for $name {
            fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
                <[u8; $len]>::from_obj(obj).map(Self)
            }
        }

        impl SszEncode for $name {
            fn encode_bytes(&self) -> Vec<u8> {
                self.0.to_vec()
            }
        }

        impl SszDecode for $name {
            fn decode_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
                <[u8; $len]>::decode_bytes(bytes).map(Self)
            }
        }

        impl SszFixed for $name {
            const FIXED_LEN: usize = $len;

            fn write_bytes(&self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.0);
            }
        }

        impl From<$name> for Arg {
            fn from(value: $name) -> Self {
                Arg::ssz(value)
            }
        }

        impl FromStr for $name {
            type Err = CodecError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_obj(ObjType::String(s.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", self.hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }
    )*};
}

bytes_newtype!(
    /// A hash-tree-root.
    Root(32),
    BlsPubkey(48),
    BlsSignature(96),
    /// A fork version.
    Version(4),
);

ssz_container! {
    pub struct Fork {
        pub previous_version: Version,
        pub current_version: Version,
        pub epoch: Epoch,
    }
}

ssz_container! {
    pub struct Checkpoint {
        pub epoch: Epoch,
        pub root: Root,
    }
}

ssz_container! {
    #[derive(Default)]
    pub struct BeaconBlockHeader {
        pub slot: Slot,
        pub proposer_index: ValidatorIndex,
        pub parent_root: Root,
        pub state_root: Root,
        pub body_root: Root,
    }
}

ssz_container! {
    #[derive(Default)]
    pub struct SignedBeaconBlockHeader {
        pub message: BeaconBlockHeader,
        pub signature: BlsSignature,
    }
}

ssz_container! {
    #[derive(Default)]
    pub struct ProposerSlashing {
        pub signed_header_1: SignedBeaconBlockHeader,
        pub signed_header_2: SignedBeaconBlockHeader,
    }
}

ssz_container! {
    pub struct Validator {
        pub pubkey: BlsPubkey,
        pub withdrawal_credentials: Root,
        pub effective_balance: Gwei,
        pub slashed: bool,
        pub activation_eligibility_epoch: Epoch,
        pub activation_epoch: Epoch,
        pub exit_epoch: Epoch,
        pub withdrawable_epoch: Epoch,
    }
}

ssz_container! {
    /// Summary of the node's view of the chain head.
    pub struct HeadInfo {
        pub slot: Slot,
        pub block_root: Root,
        pub state_root: Root,
        pub finalized_slot: Slot,
        pub finalized_block_root: Root,
        pub justified_slot: Slot,
        pub justified_block_root: Root,
        pub previous_justified_slot: Slot,
        pub previous_justified_block_root: Root,
    }
}

/// A consensus object this crate does not model field by field, such as a
/// full beacon state. It keeps whichever representation the node sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Opaque {
    Obj(ObjType),
    Ssz(Vec<u8>),
}

impl Opaque {
    pub fn as_obj(&self) -> Option<&ObjType> {
        match self {
            Opaque::Obj(obj) => Some(obj),
            Opaque::Ssz(_) => None,
        }
    }
}

impl ToObj for Opaque {
    fn to_obj(&self) -> ObjType {
        match self {
            Opaque::Obj(obj) => obj.clone(),
            Opaque::Ssz(bytes) => ObjType::String(format!("0x{}", hex::encode(bytes))),
        }
    }
}

impl FromObj for Opaque {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
        Ok(Opaque::Obj(obj))
    }
}

// Layout of a container holding a root and one variable-size field: the root,
// then a 4-byte offset to the variable part, then the variable part.
const ROOTED_OFFSET: usize = 32 + 4;

pub(crate) fn encode_rooted(root: &Root, payload: &Opaque) -> Result<Vec<u8>, CodecError> {
    let bytes = match payload {
        Opaque::Ssz(bytes) => bytes,
        Opaque::Obj(_) => {
            return Err(CodecError::InvalidValue {
                expected: "ssz payload",
                got: "json object".to_string(),
            });
        },
    };
    let mut out = Vec::with_capacity(ROOTED_OFFSET + bytes.len());
    root.write_bytes(&mut out);
    (ROOTED_OFFSET as u32).write_bytes(&mut out);
    out.extend_from_slice(bytes);
    Ok(out)
}

pub(crate) fn decode_rooted(bytes: &[u8]) -> Result<(Root, Opaque), CodecError> {
    if bytes.len() < ROOTED_OFFSET {
        return Err(CodecError::InvalidLength {
            expected: ROOTED_OFFSET,
            got: bytes.len(),
        });
    }
    let root = Root::decode_bytes(&bytes[..32])?;
    let offset = u32::decode_bytes(&bytes[32..ROOTED_OFFSET])? as usize;
    if offset != ROOTED_OFFSET {
        return Err(CodecError::InvalidValue {
            expected: "offset 36",
            got: offset.to_string(),
        });
    }
    Ok((root, Opaque::Ssz(bytes[ROOTED_OFFSET..].to_vec())))
}

/// Declares an `{ root, <payload> }` record with an opaque payload, as the
/// state and block endpoints return.
macro_rules! rooted_container {
    ($(#[$meta:meta])* $name:ident { $payload:ident }) => {
        $crate::obj_struct! {
            @define ssz
            $(#[$meta])*
            pub struct $name {
                pub root: $crate::models::primitives::Root,
                pub $payload: $crate::models::primitives::Opaque,
            }
        }

        impl $crate::ssz::SszEncode for $name {
            // Empty when the payload came from JSON.
            fn encode_bytes(&self) -> Vec<u8> {
                $crate::ssz::SszEncode::try_encode_bytes(self).unwrap_or_default()
            }

            fn try_encode_bytes(&self) -> Result<Vec<u8>, $crate::obj::CodecError> {
                $crate::models::primitives::encode_rooted(&self.root, &self.$payload)
            }
        }

        impl $crate::ssz::SszDecode for $name {
            fn decode_bytes(bytes: &[u8]) -> Result<Self, $crate::obj::CodecError> {
                let (root, $payload) = $crate::models::primitives::decode_rooted(bytes)?;
                Ok(Self { root, $payload })
            }
        }
    };
}

pub(crate) use rooted_container;

rooted_container!(
    /// A beacon state with its state root.
    ApiState { beacon_state }
);
