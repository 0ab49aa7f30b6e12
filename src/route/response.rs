use std::any::{Any, type_name};
use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::obj::{CodecError, FromObj, ObjType, from_plain};
use crate::ssz::SszDecode;

type JsonDecodeFn = fn(ObjType) -> Result<Box<dyn Any + Send>, CodecError>;
type SszDecodeFn = fn(&[u8]) -> Result<Box<dyn Any + Send>, CodecError>;

fn import_obj<T: FromObj + Send + 'static>(obj: ObjType) -> Result<Box<dyn Any + Send>, CodecError> {
    Ok(Box::new(T::from_obj(obj)?))
}

fn import_plain<T: DeserializeOwned + Send + 'static>(obj: ObjType) -> Result<Box<dyn Any + Send>, CodecError> {
    Ok(Box::new(from_plain::<T>(obj)?))
}

fn decode_ssz<T: SszDecode + Send + 'static>(bytes: &[u8]) -> Result<Box<dyn Any + Send>, CodecError> {
    Ok(Box::new(T::decode_bytes(bytes)?))
}

/// The declared result type of an endpoint.
#[derive(Clone, Copy, Debug)]
pub enum ResponseType {
    /// No body expected; whatever the server sends is ignored.
    None,
    /// The parsed JSON is returned unchanged.
    Obj,
    Typed {
        type_name: &'static str,
        json: JsonDecodeFn,
        ssz: Option<SszDecodeFn>,
    },
}

impl ResponseType {
    /// A consensus type, decodable from both JSON and SSZ.
    pub fn ssz<T: FromObj + SszDecode + Send + 'static>() -> Self {
        ResponseType::Typed {
            type_name: type_name::<T>(),
            json: import_obj::<T>,
            ssz: Some(decode_ssz::<T>),
        }
    }

    /// A type with an object-codec import only.
    pub fn obj<T: FromObj + Send + 'static>() -> Self {
        ResponseType::Typed {
            type_name: type_name::<T>(),
            json: import_obj::<T>,
            ssz: None,
        }
    }

    /// A plain aggregate type, built from the fields of the parsed JSON.
    pub fn plain<T: DeserializeOwned + Send + 'static>() -> Self {
        ResponseType::Typed {
            type_name: type_name::<T>(),
            json: import_plain::<T>,
            ssz: None,
        }
    }

    pub(crate) fn decode_json(&self, body: &[u8]) -> Result<ApiResponse, ApiError> {
        match self {
            ResponseType::None => Ok(ApiResponse::Empty),
            ResponseType::Obj => Ok(ApiResponse::Obj(serde_json::from_slice(body)?)),
            ResponseType::Typed { json, .. } => {
                let obj: ObjType = serde_json::from_slice(body)?;
                Ok(ApiResponse::Value(json(obj)?))
            },
        }
    }

    pub(crate) fn decode_ssz(&self, body: &[u8]) -> Result<ApiResponse, ApiError> {
        match self {
            ResponseType::None => Ok(ApiResponse::Empty),
            ResponseType::Obj => Err(ApiError::NotSszType("raw object".to_string())),
            ResponseType::Typed { type_name, ssz, .. } => match ssz {
                Some(decode) => Ok(ApiResponse::Value(decode(body)?)),
                None => Err(ApiError::NotSszType(type_name.to_string())),
            },
        }
    }
}

/// Result of an endpoint call.
pub enum ApiResponse {
    Empty,
    Obj(ObjType),
    Value(Box<dyn Any + Send>),
}

impl ApiResponse {
    pub fn is_empty(&self) -> bool {
        matches!(self, ApiResponse::Empty)
    }

    /// Extracts the decoded value. `Empty` extracts as `()` and a raw object
    /// as [`ObjType`].
    pub fn into_value<T: 'static>(self) -> Result<T, ApiError> {
        let boxed: Box<dyn Any + Send> = match self {
            ApiResponse::Empty => Box::new(()),
            ApiResponse::Obj(obj) => Box::new(obj),
            ApiResponse::Value(value) => value,
        };
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| ApiError::UnexpectedResult {
                expected: type_name::<T>(),
            })
    }
}

impl fmt::Debug for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiResponse::Empty => f.write_str("Empty"),
            ApiResponse::Obj(obj) => f.debug_tuple("Obj").field(obj).finish(),
            ApiResponse::Value(_) => f.write_str("Value(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::obj::ObjList;

    #[test]
    fn no_declared_type_ignores_the_body() {
        let response = ResponseType::None.decode_json(b"not even json").unwrap();
        assert!(response.is_empty());
        response.into_value::<()>().unwrap();
    }

    #[test]
    fn raw_objects_are_returned_unchanged() {
        let response = ResponseType::Obj.decode_json(br#"["/ip4/127.0.0.1"]"#).unwrap();
        assert_eq!(response.into_value::<ObjType>().unwrap(), json!(["/ip4/127.0.0.1"]));
    }

    #[test]
    fn typed_results_use_the_import() {
        let response = ResponseType::obj::<ObjList<u64>>().decode_json(b"[1, \"2\"]").unwrap();
        assert_eq!(response.into_value::<ObjList<u64>>().unwrap(), ObjList(vec![1, 2]));
    }

    #[test]
    fn plain_results_fill_fields() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct PeerCount {
            connected: u64,
        }
        let response = ResponseType::plain::<PeerCount>().decode_json(br#"{"connected": 4}"#).unwrap();
        assert_eq!(response.into_value::<PeerCount>().unwrap(), PeerCount { connected: 4 });
    }

    #[test]
    fn ssz_needs_a_binary_decoder() {
        assert!(matches!(
            ResponseType::obj::<u64>().decode_ssz(&[0; 8]),
            Err(ApiError::NotSszType(_))
        ));
        let response = ResponseType::ssz::<u64>().decode_ssz(&[5, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(response.into_value::<u64>().unwrap(), 5);
    }

    #[test]
    fn wrong_type_extraction_fails() {
        let response = ResponseType::ssz::<u64>().decode_json(b"5").unwrap();
        assert!(matches!(
            response.into_value::<String>(),
            Err(ApiError::UnexpectedResult { .. })
        ));
    }
}
