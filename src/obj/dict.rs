use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use super::{CodecError, FromObj, ObjMap, ObjType, ToObj, kind};

/// Typed key-value mapping; keys and values each go through their own codec.
///
/// JSON object keys are strings, so exported keys that are not strings are
/// written as their JSON text, and keys are imported from their string form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjDict<K: Ord, V>(pub BTreeMap<K, V>);

impl<K: Ord, V> ObjDict<K, V> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }
}

impl<K: Ord, V> Deref for ObjDict<K, V> {
    type Target = BTreeMap<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Ord, V> DerefMut for ObjDict<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for ObjDict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn key_to_string(key: ObjType) -> String {
    match key {
        ObjType::String(s) => s,
        other => other.to_string(),
    }
}

impl<K: Ord + ToObj, V: ToObj> ToObj for ObjDict<K, V> {
    fn to_obj(&self) -> ObjType {
        let map: ObjMap = self
            .0
            .iter()
            .map(|(k, v)| (key_to_string(k.to_obj()), v.to_obj()))
            .collect();
        ObjType::Object(map)
    }
}

impl<K: Ord + FromObj, V: FromObj> FromObj for ObjDict<K, V> {
    fn from_obj(obj: ObjType) -> Result<Self, CodecError> {
        match obj {
            ObjType::Object(map) => map
                .into_iter()
                .map(|(k, v)| Ok((K::from_obj(ObjType::String(k))?, V::from_obj(v)?)))
                .collect(),
            other => Err(CodecError::ExpectedDict(kind(&other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keys_and_values_use_their_own_codecs() {
        let mut indices: ObjDict<u64, Option<u64>> = ObjDict::new();
        indices.insert(10, Some(1));
        indices.insert(2, None);
        let obj = indices.to_obj();
        assert_eq!(obj, json!({"10": 1, "2": null}));
        assert_eq!(ObjDict::<u64, Option<u64>>::from_obj(obj).unwrap(), indices);
    }

    #[test]
    fn raw_values_pass_through() {
        let obj = json!({"lighthouse": {"version": "v0.2"}});
        let dict = ObjDict::<String, ObjType>::from_obj(obj.clone()).unwrap();
        assert_eq!(dict["lighthouse"], json!({"version": "v0.2"}));
        assert_eq!(dict.to_obj(), obj);
    }

    #[test]
    fn rejects_non_mappings() {
        assert_eq!(
            ObjDict::<String, u64>::from_obj(json!([1, 2])),
            Err(CodecError::ExpectedDict("list"))
        );
        assert!(ObjDict::<u64, u64>::from_obj(json!({"not-a-number": 1})).is_err());
    }
}
