use std::sync::Arc;

use crate::error::{ApiError, DeclarationError};
use crate::obj::ObjType;

use super::{Arg, Args, RouteModel};

/// Renders a variable value as a path fragment.
pub type PathFormat = fn(&Arg) -> Result<String, String>;

/// Generic string conversion: strings as-is, numbers and booleans as text.
pub fn default_format(value: &Arg) -> Result<String, String> {
    match value.to_obj() {
        ObjType::String(s) => Ok(s),
        ObjType::Number(n) => Ok(n.to_string()),
        ObjType::Bool(b) => Ok(b.to_string()),
        ObjType::Null => Err("no value supplied".to_string()),
        other => Err(format!("cannot use {other} as a path segment")),
    }
}

/// A parameterized route segment, such as "states by slot".
#[derive(Debug, Clone)]
pub struct VarPathFn {
    pub name: String,
    pub target: Arc<RouteModel>,
    format: PathFormat,
}

impl VarPathFn {
    /// Renders the path fragment for the single value in `args`.
    pub fn render(&self, args: &Args) -> Result<String, ApiError> {
        let value = match (args.positional(), args.keywords()) {
            ([value], []) => value,
            ([], [(_, value)]) => value,
            _ => {
                return Err(ApiError::ArgumentMismatch {
                    got: args.len(),
                    expected: 1,
                    keys: self.name.clone(),
                });
            },
        };
        (self.format)(value).map_err(|reason| ApiError::InvalidPathValue {
            segment: self.name.clone(),
            reason,
        })
    }
}

/// Starts the declaration of a variable path segment named `name`.
pub fn var_path(name: &str) -> VarPathBuilder {
    VarPathBuilder {
        name: name.to_string(),
        params: Vec::new(),
        target: None,
        format: default_format,
    }
}

#[derive(Debug, Clone)]
pub struct VarPathBuilder {
    name: String,
    params: Vec<String>,
    target: Option<Arc<RouteModel>>,
    format: PathFormat,
}

impl VarPathBuilder {
    /// The declared input parameters; exactly one is allowed.
    pub fn params(mut self, keys: &[&str]) -> Self {
        self.params = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    /// The sub-model reached once the value is supplied.
    pub fn returns(mut self, target: Arc<RouteModel>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn format(mut self, format: PathFormat) -> Self {
        self.format = format;
        self
    }

    pub fn build(self) -> Result<VarPathFn, DeclarationError> {
        if self.params.len() != 1 {
            return Err(DeclarationError::VarPathParams {
                name: self.name,
                got: self.params.len(),
            });
        }
        let target = self.target.ok_or_else(|| DeclarationError::VarPathTarget(self.name.clone()))?;
        Ok(VarPathFn {
            name: self.name,
            target,
            format: self.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf() -> Arc<RouteModel> {
        RouteModel::builder("Leaf").build().unwrap()
    }

    #[test]
    fn needs_exactly_one_parameter() {
        let none = var_path("slot").returns(leaf()).build().unwrap_err();
        assert_eq!(none, DeclarationError::VarPathParams { name: "slot".into(), got: 0 });
        let two = var_path("slot").params(&["a", "b"]).returns(leaf()).build().unwrap_err();
        assert!(matches!(two, DeclarationError::VarPathParams { got: 2, .. }));
    }

    #[test]
    fn needs_a_target_model() {
        let err = var_path("slot").params(&["value"]).build().unwrap_err();
        assert_eq!(err, DeclarationError::VarPathTarget("slot".into()));
    }

    #[test]
    fn renders_single_value() {
        let slot = var_path("slot").params(&["value"]).returns(leaf()).build().unwrap();
        assert_eq!(slot.render(&Args::new().arg(12u64)).unwrap(), "12");
        assert_eq!(slot.render(&Args::new().kw("value", "head")).unwrap(), "head");
        assert!(matches!(
            slot.render(&Args::new().arg(1u64).arg(2u64)),
            Err(ApiError::ArgumentMismatch { got: 2, expected: 1, .. })
        ));
        assert!(matches!(
            slot.render(&Args::new().arg(None::<u64>)),
            Err(ApiError::InvalidPathValue { .. })
        ));
    }

    #[test]
    fn custom_format() {
        fn epoch_slot(value: &Arg) -> Result<String, String> {
            default_format(value).map(|s| format!("slot-{s}"))
        }
        let slot = var_path("slot")
            .params(&["value"])
            .returns(leaf())
            .format(epoch_slot)
            .build()
            .unwrap();
        assert_eq!(slot.render(&Args::new().arg(3u64)).unwrap(), "slot-3");
    }
}
