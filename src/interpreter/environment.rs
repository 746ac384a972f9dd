use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use super::value::Value;

/// Variable bindings an expression is evaluated against.
///
/// The evaluator only ever reads through this trait; ownership and lifetime
/// of the bindings stay with the caller.
pub trait Environment {
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl<S: BuildHasher> Environment for HashMap<String, Value, S> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Environment for BTreeMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, name: &str) -> Option<&Value> {
        (**self).lookup(name)
    }
}
