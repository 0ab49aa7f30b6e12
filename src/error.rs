//! Error types shared by the route model, the resolution engine and providers.
//!
//! [`DeclarationError`] is raised while a route model is being built.
//! [`ApiError`] is what every traversal step and every endpoint call returns;
//! it wraps the codec and transport errors of the lower layers.

use thiserror::Error;

use crate::core::ContentType;
use crate::http::HttpError;
use crate::obj::CodecError;

/// Mistakes in a route model, detected when the model is declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// A variable path segment must take exactly one value.
    #[error("variable path segment '{name}' must declare exactly one parameter, got {got}")]
    VarPathParams { name: String, got: usize },

    /// A variable path segment must name the model reached after it.
    #[error("variable path segment '{0}' has no target model")]
    VarPathTarget(String),

    /// The body parameter has to be one of the declared parameters.
    #[error("endpoint '{endpoint}' takes its body from unknown parameter '{data}'")]
    UnknownDataParam { endpoint: String, data: String },

    #[error("endpoint '{0}' must support at least one response content type")]
    NoSupportedTypes(String),

    /// A pinned response type that the endpoint cannot return would fail every call.
    #[error("endpoint '{endpoint}' pins response type {resp_type} which it does not support")]
    UnsupportedResponseType { endpoint: String, resp_type: ContentType },

    #[error("route model '{model}' declares '{name}' more than once")]
    DuplicateRoute { model: String, name: String },
}

/// Errors returned while resolving routes and calling endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid route declaration: {0}")]
    Declaration(#[from] DeclarationError),

    /// No field, endpoint or variable segment with this name exists on the model.
    #[error("unknown route '{name}' at '{path}'")]
    UnknownRoute { path: String, name: String },

    #[error("route at '{0}' is not callable")]
    NotCallable(String),

    /// The name resolved, but to a different kind of member than the caller asked for.
    #[error("'{name}' at '{path}' is not {expected}")]
    UnexpectedRouteKind { path: String, name: String, expected: &'static str },

    /// A value was supplied to a node that is not a variable path segment.
    #[error("route at '{0}' is not a variable path segment")]
    NotVarPath(String),

    /// A variable segment was traversed before its value was supplied.
    #[error("must supply the variable value for '{path}' first, before accessing '{name}'")]
    MissingPathValue { path: String, name: String },

    #[error("invalid value for variable path segment '{segment}': {reason}")]
    InvalidPathValue { segment: String, reason: String },

    #[error("unexpected arguments, got {got} args but expected {expected} ({keys})")]
    ArgumentMismatch { got: usize, expected: usize, keys: String },

    #[error("no args or suitable kwarg for data '{0}' key")]
    MissingBody(String),

    #[error("Eth2 API provider required to call API function '{0}'")]
    ProviderRequired(String),

    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a content type other than the one the endpoint pins.
    #[error("unsupported content type: expected {expected}, got {got}")]
    ContentTypeMismatch { expected: ContentType, got: ContentType },

    #[error("selected content type '{0}' is not supported by api function")]
    NotSupported(ContentType),

    #[error("unknown content type '{0}'")]
    UnknownContentType(String),

    #[error("input of type {0} is not a SSZ type")]
    NotSszType(String),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response did not hold a value of the requested type.
    #[error("response does not hold a value of type {expected}")]
    UnexpectedResult { expected: &'static str },
}
