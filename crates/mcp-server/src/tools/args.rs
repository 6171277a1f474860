//! Strict extraction of tool arguments.
//!
//! Tool calls arrive as an untyped JSON object. Each request type declares its arguments
//! through [`FromArgs`]; a value of the wrong JSON kind is rejected instead of coerced, and
//! `null` is the same as absent.

use rmcp::model::JsonObject;
use serde_json::Value;

use crate::error::{ToolError, ToolResult};

pub(crate) trait FromArgs: Sized {
    fn from_args(args: &Args<'_>) -> ToolResult<Self>;
}

pub(crate) fn parse<T: FromArgs>(arguments: Option<&JsonObject>) -> ToolResult<T> {
    let empty = JsonObject::new();
    T::from_args(&Args::new(arguments.unwrap_or(&empty)))
}

pub(crate) struct Args<'a> {
    object: &'a JsonObject,
    prefix: String,
}

impl<'a> Args<'a> {
    pub(crate) fn new(object: &'a JsonObject) -> Self {
        Self {
            object,
            prefix: String::new(),
        }
    }

    fn field(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }

    fn wrong_kind(&self, key: &str, expected: &str, value: &Value) -> ToolError {
        ToolError::invalid(format!(
            "Invalid argument '{}': expected {expected}, got {}",
            self.field(key),
            json_kind(value)
        ))
    }

    /// Blank strings count as absent.
    pub(crate) fn optional_str(&self, key: &str) -> ToolResult<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(raw)) => {
                let trimmed = raw.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Some(other) => Err(self.wrong_kind(key, "a string", other)),
        }
    }

    pub(crate) fn required_str(&self, key: &str) -> ToolResult<String> {
        self.optional_str(key)?.ok_or_else(|| {
            ToolError::invalid(format!("Missing required argument: {}", self.field(key)))
        })
    }

    /// A required, non-empty array of objects, each exposed as nested [`Args`].
    pub(crate) fn required_objects(&self, key: &str) -> ToolResult<Vec<Args<'a>>> {
        let items = match self.get(key) {
            None => {
                return Err(ToolError::invalid(format!(
                    "Missing required argument: {}",
                    self.field(key)
                )))
            }
            Some(Value::Array(items)) => items,
            Some(other) => return Err(self.wrong_kind(key, "an array", other)),
        };
        if items.is_empty() {
            return Err(ToolError::invalid(format!(
                "Argument '{}' must contain at least one entry",
                self.field(key)
            )));
        }

        items
            .iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(object) => Ok(Args {
                    object,
                    prefix: format!("{}{key}[{idx}].", self.prefix),
                }),
                other => Err(ToolError::invalid(format!(
                    "Invalid argument '{}[{idx}]': expected an object, got {}",
                    self.field(key),
                    json_kind(other)
                ))),
            })
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn strings_are_trimmed_and_blank_means_absent() {
        let raw = object(json!({"a": "  x ", "b": "   ", "c": null}));
        let args = Args::new(&raw);
        assert_eq!(args.optional_str("a").unwrap(), Some("x".to_string()));
        assert_eq!(args.optional_str("b").unwrap(), None);
        assert_eq!(args.optional_str("c").unwrap(), None);
        assert_eq!(args.optional_str("missing").unwrap(), None);
    }

    #[test]
    fn wrong_kind_is_rejected_not_coerced() {
        let raw = object(json!({"value": 42}));
        let args = Args::new(&raw);
        let err = args.optional_str("value").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument 'value': expected a string, got a number"
        );
    }

    #[test]
    fn required_string_names_the_field() {
        let raw = object(json!({"name": ""}));
        let err = Args::new(&raw).required_str("name").unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
        assert_eq!(err.to_string(), "Missing required argument: name");
    }

    #[test]
    fn nested_objects_carry_their_path_in_errors() {
        let raw = object(json!({"entitlements": [{"feature_name": "SSO"}, {"value": true}]}));
        let args = Args::new(&raw);
        let items = args.required_objects("entitlements").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].optional_str("feature_name").unwrap(),
            Some("SSO".to_string())
        );
        let err = items[1].optional_str("value").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument 'entitlements[1].value': expected a string, got a boolean"
        );
    }

    #[test]
    fn arrays_must_be_non_empty_objects() {
        let raw = object(json!({"empty": [], "scalars": ["a"], "scalar": "a"}));
        let args = Args::new(&raw);
        assert!(args.required_objects("empty").is_err());
        assert!(args.required_objects("scalars").is_err());
        assert!(args.required_objects("scalar").is_err());
        assert!(args.required_objects("missing").is_err());
    }
}
