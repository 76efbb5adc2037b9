use std::fmt::{Display, Formatter};

use super::{EResult, EvalError, Kind, MapValue, OptionalValue};

/// Every runtime value. The set of kinds is closed; each variant maps
/// onto exactly one [`Kind`].
///
/// `PartialEq` is host-side structural equality (useful for tests and
/// for embedding code). The language-level `=` operator is
/// [`Value::equals`], which can fail and, for maps, is not symmetric.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    Optional(OptionalValue),
    Map(MapValue),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Boolean,
            Value::Int(_) => Kind::Integer,
            Value::Str(_) => Kind::String,
            Value::Optional(_) => Kind::Optional,
            Value::Map(_) => Kind::Map,
        }
    }

    /// String form used to identify map keys. Two values of the same
    /// kind have the same canonical key iff they are the same key.
    pub fn canonical_key(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Str(s) => s.clone(),
            Value::Optional(opt) => opt.canonical_key(),
            Value::Map(map) => map.canonical_key(),
        }
    }

    /// Canonical key of a value nested inside a composite key.
    /// Kind-tagged and length-prefixed so concatenations stay unambiguous.
    pub(crate) fn tagged_key(&self) -> String {
        let key = self.canonical_key();
        format!("{}:{}:{}", self.kind(), key.len(), key)
    }

    /// The `=` operator
    pub fn equals(&self, other: &Value) -> EResult<bool> {
        match (self, other) {
            (Value::Bool(lhs), Value::Bool(rhs)) => Ok(lhs == rhs),
            (Value::Int(lhs), Value::Int(rhs)) => Ok(lhs == rhs),
            (Value::Str(lhs), Value::Str(rhs)) => Ok(lhs == rhs),
            (Value::Optional(opt), _) => opt.equals(other),
            (Value::Map(map), _) => map.equals(other),
            _ => {
                Err(EvalError::type_mismatch(
                    self.kind().name(),
                    other.kind().name(),
                ))
            },
        }
    }

    /// The `+` operator.
    /// (Int, Int) -> Int, (Str, Str) -> Str, (Map, Map) -> Map
    pub fn add(&self, other: &Value) -> EResult<Value> {
        match (self, other) {
            (Value::Int(lhs), Value::Int(rhs)) => {
                lhs.checked_add(*rhs)
                    .map(Value::Int)
                    .ok_or(EvalError::Overflow {
                        lhs: *lhs,
                        rhs: *rhs,
                    })
            },
            (Value::Str(lhs), Value::Str(rhs)) => {
                Ok(Value::Str(format!("{lhs}{rhs}")))
            },
            (Value::Map(map), _) => map.union(other).map(Value::Map),
            (lhs, rhs) if lhs.kind() == rhs.kind() => {
                Err(EvalError::type_mismatch(
                    "integer, string or map operands",
                    lhs.kind().name(),
                ))
            },
            (lhs, rhs) => {
                Err(EvalError::type_mismatch(
                    lhs.kind().name(),
                    rhs.kind().name(),
                ))
            },
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(x) => x.fmt(f),
            Value::Int(x) => x.fmt(f),
            Value::Str(x) => x.fmt(f),
            Value::Optional(x) => x.fmt(f),
            Value::Map(x) => x.fmt(f),
        }
    }
}
