// src/core/assignment.rs — Variable assignments and their values

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use crate::infra::errors::WozEvalError;

/// A value bound to a variable: boolean, integer, numeric, or string.
///
/// Numeric values compare and hash by canonical bit pattern so that
/// assignments can serve as map keys. `Int(5)` and `Num(5.0)` are
/// distinct values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Num(f64),
    Str(String),
}

impl Value {
    /// Numeric view of the value, when one exists.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(_) | Value::Str(_) => None,
            Value::Int(i) => Some(*i as f64),
            Value::Num(n) => Some(*n),
        }
    }

    fn canonical_bits(n: f64) -> u64 {
        // Fold -0.0 into 0.0 so the two hash and compare as one value.
        if n == 0.0 {
            0.0f64.to_bits()
        } else {
            n.to_bits()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => {
                Value::canonical_bits(*a) == Value::canonical_bits(*b)
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Num(n) => Value::canonical_bits(*n).hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Num(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// An immutable-by-convention map from variable names to values.
///
/// Equality and hashing are structural over the full variable set, so
/// an assignment can key the per-action utility table and the empirical
/// distribution. Variables iterate in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    pairs: BTreeMap<String, Value>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-variable assignment.
    pub fn pair(variable: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut pairs = BTreeMap::new();
        pairs.insert(variable.into(), value.into());
        Self { pairs }
    }

    /// Extends the assignment with one more binding, replacing any
    /// previous value for the same variable.
    pub fn with(mut self, variable: impl Into<String>, value: impl Into<Value>) -> Self {
        self.pairs.insert(variable.into(), value.into());
        self
    }

    pub fn get(&self, variable: &str) -> Option<&Value> {
        self.pairs.get(variable)
    }

    pub fn contains_variable(&self, variable: &str) -> bool {
        self.pairs.contains_key(variable)
    }

    pub fn variables(&self) -> BTreeSet<String> {
        self.pairs.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.pairs.iter()
    }

    /// Whether every binding of `other` appears in `self` with an equal
    /// value. Used to match a sample's action against the gold action.
    pub fn contains(&self, other: &Assignment) -> bool {
        other
            .pairs
            .iter()
            .all(|(var, val)| self.pairs.get(var) == Some(val))
    }

    /// Restriction of the assignment to the given variables. Variables
    /// absent from the assignment are silently dropped.
    pub fn project(&self, variables: &BTreeSet<String>) -> Assignment {
        let pairs = self
            .pairs
            .iter()
            .filter(|(var, _)| variables.contains(var.as_str()))
            .map(|(var, val)| (var.clone(), val.clone()))
            .collect();
        Assignment { pairs }
    }

    /// Restriction that requires every requested variable to be bound.
    pub fn try_project(&self, variables: &BTreeSet<String>) -> Result<Assignment, WozEvalError> {
        for var in variables {
            if !self.pairs.contains_key(var) {
                return Err(WozEvalError::InconsistentAssignment(var.clone()));
            }
        }
        Ok(self.project(variables))
    }
}

impl FromIterator<(String, Value)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (var, val)) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{var}={val}")?;
        }
        write!(f, "}}")
    }
}
