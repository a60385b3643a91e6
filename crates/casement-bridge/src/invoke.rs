//! Invocation lookup, argument decoding, and dispatch.

use serde_json::Value;

use casement_common::BridgeError;

use crate::binding::{json_type_name, BoundObjectTable, ParamSpec};

/// Dispatches renderer invocations onto the bound object table.
///
/// Lookups are read-only, so the bridge is freely shareable across
/// threads. Invocations on different objects carry no ordering
/// guarantee; invocations on the same object are serialized only if the
/// object itself does so.
pub struct MethodBindingBridge {
    table: BoundObjectTable,
}

impl MethodBindingBridge {
    pub fn new(table: BoundObjectTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &BoundObjectTable {
        &self.table
    }

    /// Invoke `object.method` with the given argument payload.
    ///
    /// `args` is either a positional array, an object keyed by declared
    /// parameter names, or null/absent for nullary methods. Every failure
    /// is returned to the caller as a [`BridgeError`]; nothing here is
    /// fatal to the process.
    pub fn invoke(&self, object: &str, method: &str, args: &Value) -> Result<Value, BridgeError> {
        let bound = self
            .table
            .get(object)
            .ok_or_else(|| BridgeError::not_bound(object))?;
        let descriptor = bound
            .method(method)
            .ok_or_else(|| BridgeError::not_bound(format!("{object}.{method}")))?;

        let decoded = decode_args(object, method, descriptor.params(), args)?;

        tracing::debug!(object, method, argc = decoded.len(), "invoking bound method");
        match descriptor.invoke(&decoded) {
            Ok(value) => Ok(value),
            Err(message) => {
                tracing::warn!(object, method, error = %message, "bound method reported failure");
                Err(BridgeError::invocation(message))
            }
        }
    }
}

/// Decode an argument payload into declared positional order.
fn decode_args(
    object: &str,
    method: &str,
    params: &[ParamSpec],
    args: &Value,
) -> Result<Vec<Value>, BridgeError> {
    let positional: Vec<Value> = match args {
        Value::Null => Vec::new(),
        Value::Array(list) => list.clone(),
        Value::Object(map) => {
            // By-name call: reorder into declared order, rejecting
            // missing and unknown names.
            for key in map.keys() {
                if !params.iter().any(|param| param.name() == key) {
                    return Err(BridgeError::argument(format!(
                        "{object}.{method} has no parameter '{key}'"
                    )));
                }
            }
            params
                .iter()
                .map(|param| {
                    map.get(param.name()).cloned().ok_or_else(|| {
                        BridgeError::argument(format!(
                            "{object}.{method} missing argument '{}'",
                            param.name()
                        ))
                    })
                })
                .collect::<Result<_, _>>()?
        }
        other => {
            return Err(BridgeError::argument(format!(
                "{object}.{method} arguments must be an array or object, got {}",
                json_type_name(other)
            )));
        }
    };

    if positional.len() != params.len() {
        return Err(BridgeError::argument(format!(
            "{object}.{method} expects {} argument(s), got {}",
            params.len(),
            positional.len()
        )));
    }

    for (param, value) in params.iter().zip(&positional) {
        if !param.shape().matches(value) {
            return Err(BridgeError::argument(format!(
                "{object}.{method} argument '{}' expects {}, got {}",
                param.name(),
                param.shape().name(),
                json_type_name(value)
            )));
        }
    }

    Ok(positional)
}
