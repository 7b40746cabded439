//! Cycle-safe deep copy of a [`GraphValue`]
//!
//! Keeps an identity map (source allocation → copy) for the duration of
//! one top-level call. A container is registered before its contents are
//! copied, so back-references resolve to the copy under construction and
//! shared sub-objects stay shared in the output.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::graph::GraphValue;

type IdentityMap = FxHashMap<*const (), GraphValue>;

/// Structurally independent copy of `value`
///
/// Scalars are returned as-is. Arrays and objects get fresh allocations;
/// self-references and shared references are remapped onto the copy.
///
/// A cyclic source yields a cyclic copy. Like any `Rc` cycle it is never
/// freed until the caller breaks it (e.g. by overwriting the back-reference).
pub fn deep_copy(value: &GraphValue) -> GraphValue {
    let mut seen = IdentityMap::default();
    copy_with(value, &mut seen)
}

fn copy_with(value: &GraphValue, seen: &mut IdentityMap) -> GraphValue {
    match value {
        GraphValue::Array(items) => {
            let key = Rc::as_ptr(items) as *const ();
            if let Some(existing) = seen.get(&key) {
                return existing.clone();
            }

            let source = items.borrow();
            let copy = Rc::new(RefCell::new(Vec::with_capacity(source.len())));
            seen.insert(key, GraphValue::Array(Rc::clone(&copy)));

            for item in source.iter() {
                let item = copy_with(item, seen);
                copy.borrow_mut().push(item);
            }
            GraphValue::Array(copy)
        }
        GraphValue::Object(map) => {
            let key = Rc::as_ptr(map) as *const ();
            if let Some(existing) = seen.get(&key) {
                return existing.clone();
            }

            let source = map.borrow();
            let copy = Rc::new(RefCell::new(IndexMap::with_capacity(source.len())));
            seen.insert(key, GraphValue::Object(Rc::clone(&copy)));

            for (k, v) in source.iter() {
                let v = copy_with(v, seen);
                copy.borrow_mut().insert(k.clone(), v);
            }
            GraphValue::Object(copy)
        }
        scalar => scalar.clone(),
    }
}
