use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ApiError, DeclarationError};

use super::{ApiResponse, Args, EndpointFn, VarPathFn};

/// A plain function attached to a route model as its call operator.
pub type HelperFn = Arc<dyn Fn(Args) -> Result<ApiResponse, ApiError> + Send + Sync>;

/// One named member of a route model.
#[derive(Debug, Clone)]
pub enum RouteEntry {
    /// A nested route group, reached by name.
    Route(Arc<RouteModel>),
    Endpoint(EndpointFn),
    VarPath(Arc<VarPathFn>),
}

/// What happens when a node sitting on a route model is invoked directly.
#[derive(Clone)]
pub enum CallOperator {
    /// Bound at the node's own path and called like any other endpoint.
    Endpoint(EndpointFn),
    Helper(HelperFn),
}

impl fmt::Debug for CallOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallOperator::Endpoint(endpoint) => f.debug_tuple("Endpoint").field(endpoint).finish(),
            CallOperator::Helper(_) => f.write_str("Helper(..)"),
        }
    }
}

/// A declared API surface: a registry of named sub-routes, endpoints and
/// variable path segments, plus an optional call operator.
///
/// Models are built once and shared behind an `Arc`; resolution only reads them.
#[derive(Debug, Clone)]
pub struct RouteModel {
    name: String,
    entries: BTreeMap<String, RouteEntry>,
    call: Option<CallOperator>,
}

impl RouteModel {
    pub fn builder(name: &str) -> RouteModelBuilder {
        RouteModelBuilder {
            model: RouteModel {
                name: name.to_string(),
                entries: BTreeMap::new(),
                call: None,
            },
            duplicate: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &RouteEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn call_operator(&self) -> Option<&CallOperator> {
        self.call.as_ref()
    }

    pub fn is_callable(&self) -> bool {
        self.call.is_some()
    }
}

pub struct RouteModelBuilder {
    model: RouteModel,
    duplicate: Option<String>,
}

impl RouteModelBuilder {
    fn insert(mut self, name: &str, entry: RouteEntry) -> Self {
        if self.model.entries.insert(name.to_string(), entry).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(name.to_string());
        }
        self
    }

    /// Adds a nested route group under `name`.
    pub fn route(self, name: &str, model: Arc<RouteModel>) -> Self {
        self.insert(name, RouteEntry::Route(model))
    }

    /// Adds an endpoint under its declared name.
    pub fn endpoint(self, endpoint: EndpointFn) -> Self {
        let name = endpoint.decl_name.clone();
        self.insert(&name, RouteEntry::Endpoint(endpoint))
    }

    pub fn var_path(self, segment: VarPathFn) -> Self {
        let name = segment.name.clone();
        self.insert(&name, RouteEntry::VarPath(Arc::new(segment)))
    }

    /// Makes the model itself callable as an endpoint at its own path.
    pub fn call_endpoint(mut self, endpoint: EndpointFn) -> Self {
        self.model.call = Some(CallOperator::Endpoint(endpoint));
        self
    }

    /// Makes the model callable as a plain helper function.
    pub fn helper<F>(mut self, f: F) -> Self
    where
        F: Fn(Args) -> Result<ApiResponse, ApiError> + Send + Sync + 'static,
    {
        self.model.call = Some(CallOperator::Helper(Arc::new(f)));
        self
    }

    pub fn build(self) -> Result<Arc<RouteModel>, DeclarationError> {
        if let Some(name) = self.duplicate {
            return Err(DeclarationError::DuplicateRoute {
                model: self.model.name,
                name,
            });
        }
        Ok(Arc::new(self.model))
    }
}
