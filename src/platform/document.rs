use crate::error::DefinitionError;
use serde_json::{Map, Value};

/// A read-only view over a flow definition.
///
/// The platform owns this schema and documents only part of it, so every accessor returns
/// `None` for a missing or differently-typed field instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowDocument {
    root: Value,
}

impl FlowDocument {
    /// Reads a definition as listed by the platform.
    ///
    /// Accepts an object, `null` (an empty definition), or a string holding encoded JSON.
    pub fn parse(flow_id: &str, raw: &Value) -> Result<Self, DefinitionError> {
        match raw {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Ok(Self { root: raw.clone() }),
            Value::String(text) if text.trim().is_empty() => Ok(Self::default()),
            Value::String(text) => {
                let root: Value =
                    serde_json::from_str(text).map_err(|e| DefinitionError::Malformed {
                        flow_id: flow_id.to_string(),
                        message: e.to_string(),
                    })?;
                match root {
                    Value::Object(_) | Value::Null => Ok(Self { root }),
                    other => Err(Self::unexpected(flow_id, &other)),
                }
            }
            other => Err(Self::unexpected(flow_id, other)),
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Follows a path of object keys from the root.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        lookup(&self.root, path)
    }

    pub fn object(&self, path: &[&str]) -> Option<&Map<String, Value>> {
        self.get(path).and_then(Value::as_object)
    }

    /// The top-level action map.
    pub fn actions(&self) -> Option<&Map<String, Value>> {
        self.object(&["actions"])
    }

    fn unexpected(flow_id: &str, value: &Value) -> DefinitionError {
        let kind = match value {
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::Array(_) => "an array",
            _ => "a string",
        };
        DefinitionError::Malformed {
            flow_id: flow_id.to_string(),
            message: format!("expected an object, found {}", kind),
        }
    }
}

/// Path lookup on any JSON value, returning `None` as soon as a step is missing.
pub fn lookup<'v>(value: &'v Value, path: &[&str]) -> Option<&'v Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// Path lookup that only succeeds on a non-empty string.
pub fn lookup_str<'v>(value: &'v Value, path: &[&str]) -> Option<&'v str> {
    lookup(value, path)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
