// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge module registry.
//
// The JavaScript shell addresses native functionality by module name and
// method name, passing JSON arguments. Each module answers with a JSON value
// or a typed error; `Reply` is the serialized form the shell receives.

use std::collections::BTreeMap;
use std::sync::Arc;

use pushbridge_core::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

/// A named native module callable from JavaScript.
pub trait BridgeModule: Send + Sync {
    /// Name the shell uses to look the module up.
    fn name(&self) -> &str;

    /// Values exported to the shell once at startup.
    fn constants(&self) -> Result<Map<String, Value>> {
        Ok(Map::new())
    }

    /// Run `method` with positional JSON arguments.
    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value>;
}

/// Settled result of a bridge call, as delivered to the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Reply {
    Resolved { value: Value },
    Rejected { code: String, message: String },
}

impl From<Result<Value>> for Reply {
    fn from(result: Result<Value>) -> Self {
        match result {
            Ok(value) => Reply::Resolved { value },
            Err(e) => Reply::Rejected {
                code: e.code().to_string(),
                message: e.to_string(),
            },
        }
    }
}

#[derive(Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, Arc<dyn BridgeModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module. Names must be unique.
    pub fn register(&mut self, module: Arc<dyn BridgeModule>) -> Result<()> {
        let name = module.name().to_string();
        if self.modules.contains_key(&name) {
            return Err(BridgeError::DuplicateModule(name));
        }
        debug!(module = %name, "bridge module registered");
        self.modules.insert(name, module);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn BridgeModule>> {
        self.modules.get(name)
    }

    /// Registered module names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    pub fn constants(&self, module: &str) -> Result<Map<String, Value>> {
        self.lookup(module)?.constants()
    }

    #[instrument(skip(self, args), fields(argc = args.len()))]
    pub fn invoke(&self, module: &str, method: &str, args: &[Value]) -> Result<Value> {
        let result = self.lookup(module)?.invoke(method, args);
        if let Err(e) = &result {
            warn!(code = e.code(), "bridge call failed: {e}");
        }
        result
    }

    /// Like [`ModuleRegistry::invoke`], settled into a [`Reply`].
    pub fn call(&self, module: &str, method: &str, args: &[Value]) -> Reply {
        self.invoke(module, method, args).into()
    }

    fn lookup(&self, module: &str) -> Result<&Arc<dyn BridgeModule>> {
        self.modules
            .get(module)
            .ok_or_else(|| BridgeError::UnknownModule(module.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

pub(crate) fn unknown_method(module: &str, method: &str) -> BridgeError {
    BridgeError::UnknownMethod {
        module: module.to_string(),
        method: method.to_string(),
    }
}

pub(crate) fn arg_str<'a>(args: &'a [Value], index: usize, method: &str) -> Result<&'a str> {
    args.get(index).and_then(Value::as_str).ok_or_else(|| {
        BridgeError::InvalidArgument(format!("{method}: argument {index} must be a string"))
    })
}

pub(crate) fn arg_usize(args: &[Value], index: usize, method: &str) -> Result<usize> {
    args.get(index)
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            BridgeError::InvalidArgument(format!(
                "{method}: argument {index} must be a non-negative integer"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    impl BridgeModule for Echo {
        fn name(&self) -> &str {
            "Echo"
        }

        fn invoke(&self, method: &str, args: &[Value]) -> Result<Value> {
            match method {
                "echo" => Ok(Value::String(arg_str(args, 0, method)?.to_string())),
                _ => Err(unknown_method(self.name(), method)),
            }
        }
    }

    #[test]
    fn dispatches_by_module_and_method() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(Echo)).expect("register");

        let value = registry.invoke("Echo", "echo", &[json!("hi")]).expect("invoke");
        assert_eq!(value, json!("hi"));
        assert_eq!(registry.names(), ["Echo"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(Echo)).expect("first");
        assert!(matches!(
            registry.register(Arc::new(Echo)),
            Err(BridgeError::DuplicateModule(_))
        ));
    }

    #[test]
    fn unknown_module_and_method_are_typed_errors() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(Echo)).expect("register");

        assert!(matches!(
            registry.invoke("Nope", "echo", &[]),
            Err(BridgeError::UnknownModule(_))
        ));
        assert!(matches!(
            registry.invoke("Echo", "shout", &[]),
            Err(BridgeError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn reply_serializes_with_status_tag() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(Echo)).expect("register");

        let ok = serde_json::to_value(registry.call("Echo", "echo", &[json!("x")])).expect("json");
        assert_eq!(ok, json!({"status": "resolved", "value": "x"}));

        let err = serde_json::to_value(registry.call("Echo", "echo", &[json!(1)])).expect("json");
        assert_eq!(err["status"], "rejected");
        assert_eq!(err["code"], "E_INVALID_ARGUMENT");
    }

    #[test]
    fn default_constants_are_empty() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(Echo)).expect("register");
        assert!(registry.constants("Echo").expect("constants").is_empty());
    }

    #[test]
    fn usize_argument_rejects_negative_and_missing() {
        assert_eq!(arg_usize(&[json!(16)], 0, "m").expect("16"), 16);
        assert!(arg_usize(&[json!(-1)], 0, "m").is_err());
        assert!(arg_usize(&[], 0, "m").is_err());
    }
}
