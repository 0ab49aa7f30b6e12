use std::fmt;
use std::sync::Arc;

use crate::obj::{ObjType, ToObj};
use crate::ssz::SszEncode;

trait ArgValue: fmt::Debug + Send + Sync {
    fn to_obj(&self) -> ObjType;

    fn encode_ssz(&self) -> Option<Vec<u8>>;
}

#[derive(Debug)]
struct ObjArg<T>(T);

impl<T: ToObj + fmt::Debug + Send + Sync> ArgValue for ObjArg<T> {
    fn to_obj(&self) -> ObjType {
        self.0.to_obj()
    }

    fn encode_ssz(&self) -> Option<Vec<u8>> {
        None
    }
}

#[derive(Debug)]
struct SszArg<T>(T);

impl<T: ToObj + SszEncode + fmt::Debug + Send + Sync> ArgValue for SszArg<T> {
    fn to_obj(&self) -> ObjType {
        self.0.to_obj()
    }

    fn encode_ssz(&self) -> Option<Vec<u8>> {
        self.0.try_encode_bytes().ok()
    }
}

/// One argument of an endpoint call.
///
/// An argument always exports to the object model; it additionally carries
/// its SSZ encoding when it was built with [`Arg::ssz`]. An empty argument
/// stands for `None` and is left out of the query string.
#[derive(Debug, Clone, Default)]
pub struct Arg(Option<Arc<dyn ArgValue>>);

impl Arg {
    pub fn obj<T: ToObj + fmt::Debug + Send + Sync + 'static>(value: T) -> Self {
        Self(Some(Arc::new(ObjArg(value))))
    }

    pub fn ssz<T: ToObj + SszEncode + fmt::Debug + Send + Sync + 'static>(value: T) -> Self {
        Self(Some(Arc::new(SszArg(value))))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn to_obj(&self) -> ObjType {
        self.0.as_ref().map_or(ObjType::Null, |v| v.to_obj())
    }

    /// SSZ encoding, when the value supports it.
    pub fn ssz_bytes(&self) -> Option<Vec<u8>> {
        self.0.as_ref().and_then(|v| v.encode_ssz())
    }
}

impl From<ObjType> for Arg {
    fn from(value: ObjType) -> Self {
        Arg::obj(value)
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::obj(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::obj(value.to_string())
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::ssz(value)
    }
}

impl From<u64> for Arg {
    fn from(value: u64) -> Self {
        Arg::ssz(value)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Arg::none, Into::into)
    }
}

/// Positional and keyword arguments of one call, in the order supplied.
#[derive(Debug, Clone, Default)]
pub struct Args {
    positional: Vec<Arg>,
    keyword: Vec<(String, Arg)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Arg>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a keyword argument, replacing an earlier one with the same name.
    pub fn kw(mut self, name: &str, value: impl Into<Arg>) -> Self {
        let value = value.into();
        match self.keyword.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value,
            None => self.keyword.push((name.to_string(), value)),
        }
        self
    }

    pub fn positional(&self) -> &[Arg] {
        &self.positional
    }

    pub fn keywords(&self) -> &[(String, Arg)] {
        &self.keyword
    }

    pub fn has_keyword(&self, name: &str) -> bool {
        self.keyword.iter().any(|(k, _)| k == name)
    }

    pub fn take_keyword(&mut self, name: &str) -> Option<Arg> {
        let idx = self.keyword.iter().position(|(k, _)| k == name)?;
        Some(self.keyword.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn into_parts(self) -> (Vec<Arg>, Vec<(String, Arg)>) {
        (self.positional, self.keyword)
    }
}
