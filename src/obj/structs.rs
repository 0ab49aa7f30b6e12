use std::collections::BTreeSet;

use super::{CodecError, FromObj, ObjMap, ObjType, kind};

/// Checks that `obj` is a mapping whose keys are exactly `fields`.
///
/// Extra keys and missing keys are both rejected.
pub fn expect_fields(obj: ObjType, fields: &[&str]) -> Result<ObjMap, CodecError> {
    let map = match obj {
        ObjType::Object(map) => map,
        other => return Err(CodecError::ExpectedDict(kind(&other))),
    };
    let expected: BTreeSet<&str> = fields.iter().copied().collect();
    let got: BTreeSet<&str> = map.keys().map(String::as_str).collect();
    if expected != got {
        return Err(CodecError::FieldMismatch {
            expected: expected.into_iter().map(str::to_string).collect(),
            got: got.into_iter().map(str::to_string).collect(),
        });
    }
    Ok(map)
}

/// Removes and imports one field of a mapping already checked by [`expect_fields`].
pub fn take_field<T: FromObj>(map: &mut ObjMap, name: &str) -> Result<T, CodecError> {
    let value = map.remove(name).ok_or_else(|| CodecError::FieldMismatch {
        expected: vec![name.to_string()],
        got: map.keys().cloned().collect(),
    })?;
    T::from_obj(value)
}

/// Declares a record type that crosses the JSON boundary field by field.
///
/// Export writes every declared field through its own codec. Import requires
/// the incoming key set to equal the declared field names, then imports each
/// field; `Option<T>` fields accept null as absent.
///
/// ```
/// eth2_api::obj_struct! {
///     pub struct GlobalVotes {
///         pub current_epoch_active_gwei: u64,
///         pub previous_epoch_active_gwei: u64,
///     }
/// }
/// ```
#[macro_export]
macro_rules! obj_struct {
    (
        @define $arg:ident
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty, )*
        }

        impl $name {
            /// Declared field names, in declaration order.
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];
        }

        impl $crate::obj::ToObj for $name {
            fn to_obj(&self) -> $crate::obj::ObjType {
                let mut map = $crate::obj::ObjMap::new();
                $( map.insert(stringify!($field).to_string(), $crate::obj::ToObj::to_obj(&self.$field)); )*
                $crate::obj::ObjType::Object(map)
            }
        }

        impl $crate::obj::FromObj for $name {
            #[allow(unused_mut)]
            fn from_obj(obj: $crate::obj::ObjType) -> Result<Self, $crate::obj::CodecError> {
                let mut map = $crate::obj::expect_fields(obj, Self::FIELDS)?;
                Ok(Self {
                    $( $field: $crate::obj::take_field(&mut map, stringify!($field))?, )*
                })
            }
        }

        impl From<$name> for $crate::route::Arg {
            fn from(value: $name) -> Self {
                $crate::route::Arg::$arg(value)
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $crate::obj_struct! {
            @define obj
            $(#[$meta])*
            $vis struct $name {
                $( $(#[$fmeta])* $fvis $field: $ty, )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::obj::{FromObj, ObjList, ToObj};

    obj_struct! {
        pub struct ForkchoiceNode {
            pub slot: u64,
            pub parent: Option<u64>,
            pub weight: u64,
        }
    }

    obj_struct! {
        pub struct VoteQuery {
            pub epoch: u64,
            pub pubkeys: ObjList<String>,
        }
    }

    #[test]
    fn import_reverses_export() {
        let node = ForkchoiceNode { slot: 3, parent: Some(1), weight: 32 };
        assert_eq!(ForkchoiceNode::from_obj(node.to_obj()).unwrap(), node);

        let query = VoteQuery { epoch: 2, pubkeys: vec!["0xab".to_string()].into() };
        assert_eq!(query.to_obj(), json!({"epoch": 2, "pubkeys": ["0xab"]}));
        assert_eq!(VoteQuery::from_obj(query.to_obj()).unwrap(), query);
    }

    #[test]
    fn null_optional_field_is_absent() {
        let node = ForkchoiceNode::from_obj(json!({"slot": 0, "parent": null, "weight": 0})).unwrap();
        assert_eq!(node.parent, None);
    }

    #[test]
    fn superset_of_fields_is_rejected() {
        let err = ForkchoiceNode::from_obj(json!({"slot": 0, "parent": null, "weight": 0, "extra": 1}));
        assert!(matches!(err, Err(super::CodecError::FieldMismatch { .. })));
    }

    #[test]
    fn subset_of_fields_is_rejected() {
        // A missing optional field is still a missing key.
        let err = ForkchoiceNode::from_obj(json!({"slot": 0, "weight": 0}));
        assert!(matches!(err, Err(super::CodecError::FieldMismatch { .. })));
    }

    #[test]
    fn non_mapping_is_rejected() {
        assert!(matches!(
            VoteQuery::from_obj(json!([2, []])),
            Err(super::CodecError::ExpectedDict("list"))
        ));
    }
}
