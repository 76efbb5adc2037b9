use std::fmt::{Display, Formatter};

use super::{EResult, EvalError, Value};
use crate::State;

/// A value that may be absent. Lookups hand these out instead of a
/// bare `Option` so absence is itself a runtime value.
#[derive(Debug, Clone)]
pub struct OptionalValue {
    value: Option<Box<Value>>,
    state: State,
}

impl OptionalValue {
    pub fn new(value: Option<Value>, state: State) -> Self {
        OptionalValue {
            value: value.map(Box::new),
            state,
        }
    }

    pub fn some(value: Value, state: State) -> Self {
        OptionalValue::new(Some(value), state)
    }

    pub fn none(state: State) -> Self {
        OptionalValue::new(None, state)
    }

    pub fn is_some(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_deref()
    }

    pub fn into_inner(self) -> Option<Value> {
        self.value.map(|boxed| *boxed)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub(crate) fn canonical_key(&self) -> String {
        match self.value() {
            None => "none".to_string(),
            Some(inner) => format!("some({})", inner.tagged_key()),
        }
    }

    pub fn equals(&self, other: &Value) -> EResult<bool> {
        let Value::Optional(other) = other else {
            return Err(EvalError::type_mismatch(
                "optional",
                other.kind().name(),
            ));
        };

        match (self.value(), other.value()) {
            (None, None) => Ok(true),
            // contents of different kinds are simply unequal
            (Some(lhs), Some(rhs)) if lhs.kind() == rhs.kind() => {
                lhs.equals(rhs)
            },
            _ => Ok(false),
        }
    }
}

// the state is context, not content
impl PartialEq for OptionalValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Display for OptionalValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(inner) => write!(f, "some({inner})"),
            None => write!(f, "none"),
        }
    }
}
