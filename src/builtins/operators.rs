use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{EResult, EvalError, Value};

pub type BinaryOp = fn(&Value, &Value) -> EResult<Value>;

pub(super) trait BuiltinOperator {
    fn register(table: &mut HashMap<&'static str, BinaryOp>) {
        Self::symbols()
            .into_iter()
            .for_each(|symbol| {
                table.insert(symbol, Self::eval);
            })
    }

    /// symbols to bind to this operator
    fn symbols() -> Vec<&'static str>;

    /// Apply the operator to already-evaluated operands
    fn eval(lhs: &Value, rhs: &Value) -> EResult<Value>;
}

lazy_static! {
    static ref OPERATORS: HashMap<&'static str, BinaryOp> = {
        let mut table = HashMap::new();
        EqOperator::register(&mut table);
        NeqOperator::register(&mut table);
        AddOperator::register(&mut table);
        table
    };
}

/// Look up `symbol` and apply it to the two operands
pub fn apply_operator(symbol: &str, lhs: &Value, rhs: &Value) -> EResult<Value> {
    let op = OPERATORS
        .get(symbol)
        .ok_or_else(|| EvalError::UnknownOperator(symbol.to_string()))?;
    op(lhs, rhs)
}

/************\
|* Equality *|
\************/
pub(super) struct EqOperator {}
impl BuiltinOperator for EqOperator {
    fn symbols() -> Vec<&'static str> {
        vec!["=", "==", "eq"]
    }

    fn eval(lhs: &Value, rhs: &Value) -> EResult<Value> {
        lhs.equals(rhs).map(Value::Bool)
    }
}

pub(super) struct NeqOperator {}
impl BuiltinOperator for NeqOperator {
    fn symbols() -> Vec<&'static str> {
        vec!["!=", "ne"]
    }

    fn eval(lhs: &Value, rhs: &Value) -> EResult<Value> {
        lhs.equals(rhs)
            .map(|eq| Value::Bool(!eq))
    }
}

/*******\
|* Add *|
\*******/
pub(super) struct AddOperator {}
impl BuiltinOperator for AddOperator {
    fn symbols() -> Vec<&'static str> {
        vec!["+", "add"]
    }

    fn eval(lhs: &Value, rhs: &Value) -> EResult<Value> {
        lhs.add(rhs)
    }
}
