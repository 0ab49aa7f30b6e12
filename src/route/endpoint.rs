use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::core::{ApiPath, ContentType, Eth2Provider, Method};
use crate::error::{ApiError, DeclarationError};

use super::{ApiResponse, Args, ResponseType};

/// A provider and the path an endpoint was resolved at.
#[derive(Clone)]
pub struct BoundCall {
    provider: Arc<dyn Eth2Provider>,
    path: ApiPath,
}

impl BoundCall {
    pub fn path(&self) -> &ApiPath {
        &self.path
    }
}

impl fmt::Debug for BoundCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCall").field("path", &self.path.to_string()).finish()
    }
}

/// Descriptor of one callable API operation.
///
/// Declared once per route model with [`api`]. Resolving it through a node
/// produces a copy with `call` set; the declared descriptor itself is never
/// bound, so one model can serve several providers at once. The fields of a
/// bound copy may still be adjusted, and the call uses the copy's settings.
#[derive(Debug, Clone)]
pub struct EndpointFn {
    pub typ: ResponseType,
    /// Name the endpoint is declared under in its route model.
    pub decl_name: String,
    /// Custom path name, used instead of `decl_name` when set.
    pub name: Option<String>,
    pub arg_keys: Vec<String>,
    pub method: Method,
    pub req_type: Option<ContentType>,
    pub resp_type: Option<ContentType>,
    pub data: Option<String>,
    pub supports: BTreeSet<ContentType>,
    pub call: Option<BoundCall>,
}

impl EndpointFn {
    /// Path name of the endpoint.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.decl_name)
    }

    pub fn is_bound(&self) -> bool {
        self.call.is_some()
    }

    /// Returns a copy bound to `provider` at `path`.
    pub fn bind(&self, provider: Arc<dyn Eth2Provider>, path: ApiPath) -> EndpointFn {
        let mut bound = self.clone();
        bound.call = Some(BoundCall { provider, path });
        bound
    }

    pub async fn call(&self, args: Args) -> Result<ApiResponse, ApiError> {
        let bound = self
            .call
            .as_ref()
            .ok_or_else(|| ApiError::ProviderRequired(self.decl_name.clone()))?;
        bound.provider.api_request(&bound.path, self, args).await
    }
}

/// Starts the declaration of an endpoint named `decl_name`.
///
/// Defaults: `GET`, no parameters, no result, JSON-only responses, request
/// and response content types left to the provider.
pub fn api(decl_name: &str) -> ApiBuilder {
    ApiBuilder {
        decl_name: decl_name.to_string(),
        name: None,
        arg_keys: Vec::new(),
        method: Method::Get,
        req_type: None,
        resp_type: None,
        data: None,
        supports: None,
        typ: ResponseType::None,
    }
}

#[derive(Debug, Clone)]
pub struct ApiBuilder {
    decl_name: String,
    name: Option<String>,
    arg_keys: Vec<String>,
    method: Method,
    req_type: Option<ContentType>,
    resp_type: Option<ContentType>,
    data: Option<String>,
    supports: Option<BTreeSet<ContentType>>,
    typ: ResponseType,
}

impl ApiBuilder {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Content types the *response* may come in.
    pub fn supports(mut self, supports: &[ContentType]) -> Self {
        self.supports = Some(supports.iter().copied().collect());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn params(mut self, keys: &[&str]) -> Self {
        self.arg_keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn req_type(mut self, req_type: ContentType) -> Self {
        self.req_type = Some(req_type);
        self
    }

    pub fn resp_type(mut self, resp_type: ContentType) -> Self {
        self.resp_type = Some(resp_type);
        self
    }

    /// Takes the request payload from the named parameter.
    pub fn data(mut self, key: &str) -> Self {
        self.data = Some(key.to_string());
        self
    }

    pub fn returns(mut self, typ: ResponseType) -> Self {
        self.typ = typ;
        self
    }

    pub fn build(self) -> Result<EndpointFn, DeclarationError> {
        let supports = self.supports.unwrap_or_else(|| BTreeSet::from([ContentType::Json]));
        if supports.is_empty() {
            return Err(DeclarationError::NoSupportedTypes(self.decl_name));
        }
        if let Some(data) = &self.data {
            if !self.arg_keys.contains(data) {
                return Err(DeclarationError::UnknownDataParam {
                    endpoint: self.decl_name,
                    data: data.clone(),
                });
            }
        }
        if let Some(resp_type) = self.resp_type {
            if !supports.contains(&resp_type) {
                return Err(DeclarationError::UnsupportedResponseType {
                    endpoint: self.decl_name,
                    resp_type,
                });
            }
        }
        Ok(EndpointFn {
            typ: self.typ,
            decl_name: self.decl_name,
            name: self.name,
            arg_keys: self.arg_keys,
            method: self.method,
            req_type: self.req_type,
            resp_type: self.resp_type,
            data: self.data,
            supports,
            call: None,
        })
    }
}
