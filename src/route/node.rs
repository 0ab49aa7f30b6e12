use std::fmt;
use std::sync::Arc;

use crate::core::{ApiPath, Eth2Provider};
use crate::error::ApiError;

use super::{ApiResponse, Arg, Args, CallOperator, EndpointFn, RouteEntry, RouteModel, VarPathFn};

/// Where in the declared tree a node sits.
#[derive(Debug, Clone)]
enum NodeModel {
    Route(Arc<RouteModel>),
    /// A variable segment that still waits for its value.
    VarPath(Arc<VarPathFn>),
}

/// Outcome of a sub-route access.
#[derive(Debug)]
pub enum Resolved {
    Node(EndpointNode),
    /// A terminal endpoint, already bound to the provider.
    Endpoint(EndpointFn),
}

/// Outcome of invoking a node.
#[derive(Debug)]
pub enum Invoked {
    /// A variable segment received its value; traversal continues from here.
    Node(EndpointNode),
    Response(ApiResponse),
}

/// Walks a route model on behalf of a provider, accumulating the request path.
///
/// Every step returns a new node; the node it was taken from is left as is, so
/// one node can be the starting point of any number of independent walks.
#[derive(Clone)]
pub struct EndpointNode {
    provider: Arc<dyn Eth2Provider>,
    path: ApiPath,
    model: NodeModel,
}

impl EndpointNode {
    /// The node for `model` at the root path.
    pub fn root(provider: Arc<dyn Eth2Provider>, model: Arc<RouteModel>) -> Self {
        Self {
            provider,
            path: ApiPath::root(),
            model: NodeModel::Route(model),
        }
    }

    pub fn path(&self) -> &ApiPath {
        &self.path
    }

    fn descend(&self, path: ApiPath, model: NodeModel) -> Self {
        Self {
            provider: self.provider.clone(),
            path,
            model,
        }
    }

    fn supply(&self, segment: &VarPathFn, args: &Args) -> Result<EndpointNode, ApiError> {
        let fragment = segment.render(args)?;
        Ok(self.descend(
            self.path.join_fragment(&fragment),
            NodeModel::Route(segment.target.clone()),
        ))
    }

    /// Resolves the sub-route `name`: a nested route group or variable segment
    /// gives a new node, a declared endpoint gives the endpoint bound at its path.
    pub fn resolve(&self, name: &str) -> Result<Resolved, ApiError> {
        let model = match &self.model {
            NodeModel::Route(model) => model,
            NodeModel::VarPath(_) => {
                return Err(ApiError::MissingPathValue {
                    path: self.path.to_string(),
                    name: name.to_string(),
                });
            },
        };
        match model.get(name) {
            Some(RouteEntry::Route(sub)) => Ok(Resolved::Node(
                self.descend(self.path.join(name), NodeModel::Route(sub.clone())),
            )),
            Some(RouteEntry::Endpoint(endpoint)) => {
                let path = self.path.join(endpoint.name());
                Ok(Resolved::Endpoint(endpoint.bind(self.provider.clone(), path)))
            },
            Some(RouteEntry::VarPath(segment)) => Ok(Resolved::Node(
                self.descend(self.path.join(&segment.name), NodeModel::VarPath(segment.clone())),
            )),
            None => Err(ApiError::UnknownRoute {
                path: self.path.to_string(),
                name: name.to_string(),
            }),
        }
    }

    /// Invokes the node: supplies the value of a pending variable segment, or
    /// runs the model's own call operator.
    pub async fn invoke(&self, args: Args) -> Result<Invoked, ApiError> {
        let model = match &self.model {
            NodeModel::VarPath(segment) => return Ok(Invoked::Node(self.supply(segment, &args)?)),
            NodeModel::Route(model) => model,
        };
        match model.call_operator() {
            Some(CallOperator::Endpoint(endpoint)) => {
                let bound = endpoint.bind(self.provider.clone(), self.path.clone());
                Ok(Invoked::Response(bound.call(args).await?))
            },
            Some(CallOperator::Helper(helper)) => Ok(Invoked::Response(helper(args)?)),
            None => Err(ApiError::NotCallable(self.path.to_string())),
        }
    }

    /// Resolves `name`, which must be a route group or a variable segment.
    pub fn route(&self, name: &str) -> Result<EndpointNode, ApiError> {
        match self.resolve(name)? {
            Resolved::Node(node) => Ok(node),
            Resolved::Endpoint(_) => Err(self.unexpected(name, "a route")),
        }
    }

    /// Resolves `name`, which must be a declared endpoint.
    pub fn endpoint(&self, name: &str) -> Result<EndpointFn, ApiError> {
        match self.resolve(name)? {
            Resolved::Endpoint(endpoint) => Ok(endpoint),
            Resolved::Node(_) => Err(self.unexpected(name, "an endpoint")),
        }
    }

    /// Supplies the value of the pending variable segment. Issues no request.
    pub fn at(&self, value: impl Into<Arg>) -> Result<EndpointNode, ApiError> {
        match &self.model {
            NodeModel::VarPath(segment) => self.supply(segment, &Args::new().arg(value)),
            NodeModel::Route(_) => Err(ApiError::NotVarPath(self.path.to_string())),
        }
    }

    /// Calls the node's own call operator.
    pub async fn call(&self, args: Args) -> Result<ApiResponse, ApiError> {
        match self.invoke(args).await? {
            Invoked::Response(response) => Ok(response),
            Invoked::Node(_) => Err(ApiError::NotCallable(self.path.to_string())),
        }
    }

    fn unexpected(&self, name: &str, expected: &'static str) -> ApiError {
        ApiError::UnexpectedRouteKind {
            path: self.path.to_string(),
            name: name.to_string(),
            expected,
        }
    }
}

impl fmt::Debug for EndpointNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = match &self.model {
            NodeModel::Route(model) => model.name().to_string(),
            NodeModel::VarPath(segment) => format!("<{}>", segment.name),
        };
        f.debug_struct("EndpointNode")
            .field("path", &self.path.to_string())
            .field("model", &model)
            .finish()
    }
}
