//! Deep merge of JSON values
//!
//! Override keys are merged into base keys recursively:
//! - object + object → merged key by key (base order first, new keys appended)
//! - array + array → depends on [`ArrayMode`]
//! - anything else → override wins
//!
//! Mismatched shapes (array vs object) are resolved in favour of the override
//! by [`deep_merge`]. Callers that need to catch those use [`try_deep_merge`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{HelperError, Result};

/// Strategy for merging two arrays found at the same key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMode {
    /// Keep the override array, discard the base array
    Replace,
    /// Base then override, duplicates removed (first occurrence kept)
    #[default]
    Merge,
}

impl FromStr for ArrayMode {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "replace" => Ok(ArrayMode::Replace),
            "merge" => Ok(ArrayMode::Merge),
            other => Err(HelperError::InvalidArrayMode {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ArrayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayMode::Replace => write!(f, "replace"),
            ArrayMode::Merge => write!(f, "merge"),
        }
    }
}

/// Deep merge `over` into `base`, returning a new value
pub fn deep_merge(base: &Value, over: &Value, mode: ArrayMode) -> Value {
    match (base, over) {
        (Value::Object(b), Value::Object(o)) => {
            let mut merged = b.clone();
            for (key, value) in o {
                let next = match b.get(key) {
                    Some(existing) => deep_merge(existing, value, mode),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (Value::Array(b), Value::Array(o)) => merge_arrays(b, o, mode),
        _ => over.clone(),
    }
}

/// Merge any number of values left to right
///
/// An empty slice yields an empty object.
pub fn deep_merge_all(values: &[Value], mode: ArrayMode) -> Value {
    values
        .iter()
        .fold(Value::Object(Map::new()), |acc, next| deep_merge(&acc, next, mode))
}

/// Strict deep merge: fails when a path holds values of incompatible shapes
///
/// A mismatch is reported when both sides hold a value at the same path,
/// their kinds differ, and at least one of them is an array or object.
pub fn try_deep_merge(base: &Value, over: &Value, mode: ArrayMode) -> Result<Value> {
    merge_strict(base, over, mode, "$")
}

fn merge_strict(base: &Value, over: &Value, mode: ArrayMode, path: &str) -> Result<Value> {
    match (base, over) {
        (Value::Object(b), Value::Object(o)) => {
            let mut merged = b.clone();
            for (key, value) in o {
                let next = match b.get(key) {
                    Some(existing) => {
                        merge_strict(existing, value, mode, &format!("{path}.{key}"))?
                    }
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Ok(Value::Object(merged))
        }
        (Value::Array(b), Value::Array(o)) => Ok(merge_arrays(b, o, mode)),
        (b, o) if is_structured(b) || is_structured(o) => Err(HelperError::ShapeMismatch {
            path: path.to_string(),
            base_kind: kind_of(b),
            override_kind: kind_of(o),
        }),
        _ => Ok(over.clone()),
    }
}

fn merge_arrays(base: &[Value], over: &[Value], mode: ArrayMode) -> Value {
    match mode {
        ArrayMode::Replace => Value::Array(over.to_vec()),
        ArrayMode::Merge => {
            let mut merged: Vec<Value> = Vec::with_capacity(base.len() + over.len());
            for item in base.iter().chain(over) {
                if !merged.iter().any(|seen| same_value(seen, item)) {
                    merged.push(item.clone());
                }
            }
            Value::Array(merged)
        }
    }
}

/// Structural equality where numbers compare by numeric value (`1 == 1.0`)
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => same_number(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| same_value(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, l)| y.get(k).is_some_and(|r| same_value(l, r)))
        }
        _ => a == b,
    }
}

fn same_number(x: &Number, y: &Number) -> bool {
    if let (Some(l), Some(r)) = (x.as_i64(), y.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (x.as_u64(), y.as_u64()) {
        return l == r;
    }
    x.as_f64() == y.as_f64()
}

fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Human-readable kind name of a JSON value
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
