//! Route declarations and the resolution engine that walks them.
//!
//! A route model is declared once with [`RouteModel::builder`], [`api`] and
//! [`var_path`]. An [`EndpointNode`] pairs a model with a provider and turns
//! sub-route access and invocation into bound endpoint calls.

mod args;
mod endpoint;
mod model;
mod node;
mod response;
mod var_path;

pub use args::{Arg, Args};
pub use endpoint::{ApiBuilder, BoundCall, EndpointFn, api};
pub use model::{CallOperator, HelperFn, RouteEntry, RouteModel, RouteModelBuilder};
pub use node::{EndpointNode, Invoked, Resolved};
pub use response::{ApiResponse, ResponseType};
pub use var_path::{PathFormat, VarPathBuilder, VarPathFn, default_format, var_path};
