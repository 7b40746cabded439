//! Shared-reference value graph
//!
//! Unlike `serde_json::Value`, arrays and objects here are reference
//! counted and interior-mutable, so a graph can hold shared sub-objects
//! and cycles (`a.self = a`). Cloning a [`GraphValue`] clones the
//! reference, never the contents. Use [`crate::deep_copy()`] for that.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde_json::{Map, Number, Value};

use crate::error::{HelperError, Result};

pub type SharedArray = Rc<RefCell<Vec<GraphValue>>>;
pub type SharedObject = Rc<RefCell<IndexMap<String, GraphValue>>>;

#[derive(Clone, Default)]
pub enum GraphValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(Rc<str>),
    Array(SharedArray),
    Object(SharedObject),
}

impl GraphValue {
    /// New array node
    pub fn array(items: impl IntoIterator<Item = GraphValue>) -> Self {
        GraphValue::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// New object node, entries kept in insertion order
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, GraphValue)>) -> Self {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        GraphValue::Object(Rc::new(RefCell::new(map)))
    }

    pub fn string(s: &str) -> Self {
        GraphValue::String(Rc::from(s))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GraphValue::Null => "null",
            GraphValue::Bool(_) => "boolean",
            GraphValue::Number(_) => "number",
            GraphValue::String(_) => "string",
            GraphValue::Array(_) => "array",
            GraphValue::Object(_) => "object",
        }
    }

    /// Address of the shared allocation, `None` for scalars
    #[inline]
    pub fn identity(&self) -> Option<*const ()> {
        match self {
            GraphValue::Array(rc) => Some(Rc::as_ptr(rc) as *const ()),
            GraphValue::Object(rc) => Some(Rc::as_ptr(rc) as *const ()),
            _ => None,
        }
    }

    /// Reference equality for arrays and objects
    ///
    /// Scalars never compare identical.
    pub fn ptr_eq(&self, other: &GraphValue) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Object field lookup (clones the reference)
    pub fn get(&self, key: &str) -> Option<GraphValue> {
        match self {
            GraphValue::Object(map) => map.borrow().get(key).cloned(),
            _ => None,
        }
    }

    /// Array element lookup (clones the reference)
    pub fn at(&self, index: usize) -> Option<GraphValue> {
        match self {
            GraphValue::Array(items) => items.borrow().get(index).cloned(),
            _ => None,
        }
    }

    /// Insert or replace an object field
    pub fn set(&self, key: impl Into<String>, value: GraphValue) -> Result<()> {
        match self {
            GraphValue::Object(map) => {
                map.borrow_mut().insert(key.into(), value);
                Ok(())
            }
            other => Err(HelperError::NotAnObject {
                key: key.into(),
                kind: other.kind(),
            }),
        }
    }

    /// Append to an array
    pub fn push(&self, value: GraphValue) -> Result<()> {
        match self {
            GraphValue::Array(items) => {
                items.borrow_mut().push(value);
                Ok(())
            }
            other => Err(HelperError::NotAnArray { kind: other.kind() }),
        }
    }

    /// Number of entries for arrays and objects, 0 for scalars
    pub fn len(&self) -> usize {
        match self {
            GraphValue::Array(items) => items.borrow().len(),
            GraphValue::Object(map) => map.borrow().len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to JSON
    ///
    /// Shared sub-objects are written out once per reference. A cycle
    /// fails with [`HelperError::CyclicValue`].
    pub fn to_json(&self) -> Result<Value> {
        let mut ancestors = FxHashSet::default();
        to_json_inner(self, "$", &mut ancestors)
    }
}

fn to_json_inner(
    value: &GraphValue,
    path: &str,
    ancestors: &mut FxHashSet<*const ()>,
) -> Result<Value> {
    match value {
        GraphValue::Null => Ok(Value::Null),
        GraphValue::Bool(b) => Ok(Value::Bool(*b)),
        GraphValue::Number(n) => Ok(Value::Number(n.clone())),
        GraphValue::String(s) => Ok(Value::String(s.to_string())),
        GraphValue::Array(items) => {
            let id = enter(ancestors, Rc::as_ptr(items) as *const (), path)?;
            let items = items.borrow();
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(to_json_inner(item, &format!("{path}[{i}]"), ancestors)?);
            }
            ancestors.remove(&id);
            Ok(Value::Array(out))
        }
        GraphValue::Object(map) => {
            let id = enter(ancestors, Rc::as_ptr(map) as *const (), path)?;
            let map = map.borrow();
            let mut out = Map::with_capacity(map.len());
            for (key, item) in map.iter() {
                out.insert(key.clone(), to_json_inner(item, &format!("{path}.{key}"), ancestors)?);
            }
            ancestors.remove(&id);
            Ok(Value::Object(out))
        }
    }
}

/// Push `id` onto the ancestor set, failing if it is already on the path
fn enter(ancestors: &mut FxHashSet<*const ()>, id: *const (), path: &str) -> Result<*const ()> {
    if ancestors.insert(id) {
        Ok(id)
    } else {
        Err(HelperError::CyclicValue {
            path: path.to_string(),
        })
    }
}

impl From<Value> for GraphValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => GraphValue::Null,
            Value::Bool(b) => GraphValue::Bool(b),
            Value::Number(n) => GraphValue::Number(n),
            Value::String(s) => GraphValue::String(Rc::from(s)),
            Value::Array(items) => GraphValue::array(items.into_iter().map(GraphValue::from)),
            Value::Object(map) => {
                GraphValue::object(map.into_iter().map(|(k, v)| (k, GraphValue::from(v))))
            }
        }
    }
}

impl From<bool> for GraphValue {
    fn from(b: bool) -> Self {
        GraphValue::Bool(b)
    }
}

impl From<i64> for GraphValue {
    fn from(n: i64) -> Self {
        GraphValue::Number(n.into())
    }
}

impl From<&str> for GraphValue {
    fn from(s: &str) -> Self {
        GraphValue::string(s)
    }
}

// Cycles make a derived Debug recurse forever, so containers print shallow
impl fmt::Debug for GraphValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphValue::Null => write!(f, "Null"),
            GraphValue::Bool(b) => write!(f, "Bool({b})"),
            GraphValue::Number(n) => write!(f, "Number({n})"),
            GraphValue::String(s) => write!(f, "String({s:?})"),
            GraphValue::Array(items) => {
                write!(f, "Array({:p}, len={})", Rc::as_ptr(items), items.borrow().len())
            }
            GraphValue::Object(map) => {
                write!(f, "Object({:p}, len={})", Rc::as_ptr(map), map.borrow().len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_round_trip_keeps_order() {
        let input = json!({"z": 1, "a": [true, null, "s"], "m": {"n": 2.5}});
        let graph = GraphValue::from(input.clone());
        let back = graph.to_json().unwrap();
        assert_eq!(back, input);

        let keys: Vec<String> = back.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn clone_shares_reference() {
        let obj = GraphValue::object([("a", GraphValue::from(1_i64))]);
        let alias = obj.clone();
        alias.set("b", GraphValue::from(2_i64)).unwrap();

        assert!(obj.ptr_eq(&alias));
        assert_eq!(obj.len(), 2);
    }

    #[test]
    fn scalars_are_never_identical() {
        let a = GraphValue::from(1_i64);
        assert!(!a.ptr_eq(&a.clone()));
        assert_eq!(a.identity(), None);
    }

    #[test]
    fn to_json_rejects_cycles() {
        let a = GraphValue::object(Vec::<(String, GraphValue)>::new());
        a.set("self", a.clone()).unwrap();

        let err = a.to_json().unwrap_err();
        assert!(matches!(err, HelperError::CyclicValue { ref path } if path == "$.self"));

        // Break the cycle so the Rc can be freed
        a.set("self", GraphValue::Null).unwrap();
    }

    #[test]
    fn to_json_allows_shared_acyclic_refs() {
        let shared = GraphValue::array([GraphValue::from(1_i64)]);
        let root = GraphValue::object([("x", shared.clone()), ("y", shared)]);
        assert_eq!(root.to_json().unwrap(), json!({"x": [1], "y": [1]}));
    }

    #[test]
    fn set_and_push_check_kind() {
        let arr = GraphValue::array([]);
        assert!(matches!(
            arr.set("k", GraphValue::Null),
            Err(HelperError::NotAnObject { kind: "array", .. })
        ));

        let obj = GraphValue::object([("k", GraphValue::Null)]);
        assert!(matches!(obj.push(GraphValue::Null), Err(HelperError::NotAnArray { kind: "object" })));

        arr.push("x".into()).unwrap();
        assert_eq!(arr.len(), 1);
        assert!(matches!(arr.at(0), Some(GraphValue::String(ref s)) if &**s == "x"));
    }

    #[test]
    fn debug_is_shallow() {
        let a = GraphValue::array([]);
        a.push(a.clone()).unwrap();
        let printed = format!("{a:?}");
        assert!(printed.starts_with("Array(0x"));
        assert!(printed.ends_with("len=1)"));

        if let GraphValue::Array(items) = &a {
            items.borrow_mut().clear();
        }
    }
}
