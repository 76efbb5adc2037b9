use std::collections::HashMap;

use lazy_static::lazy_static;

use super::Arity;
use crate::{EResult, EvalError, MapValue, Value};

type MethodFn = fn(&MapValue, &[Value]) -> EResult<Value>;

/// A named map method with a fixed number of arguments
#[derive(Debug, Clone, Copy)]
pub struct Method {
    name: &'static str,
    arity: Arity,
    eval: MethodFn,
}

impl Method {
    pub fn evaluate(&self, map: &MapValue, args: &[Value]) -> EResult<Value> {
        self.arity
            .check(self.name, args.len())?;
        (self.eval)(map, args)
    }
}

pub(super) trait BuiltinMethod {
    fn register(table: &mut HashMap<&'static str, Method>) {
        let names = Self::names();
        let Some(&name) = names.first() else {
            return;
        };
        let method = Method {
            name,
            arity: Self::arity(),
            eval: Self::eval,
        };

        names
            .into_iter()
            .for_each(|s| {
                table.insert(s, method);
            })
    }

    /// names to bind to this method
    fn names() -> Vec<&'static str>;

    fn arity() -> Arity;

    /// Callback to evaluate a call on `map`.
    /// Argument count has already been checked against `arity`.
    fn eval(map: &MapValue, args: &[Value]) -> EResult<Value>;
}

lazy_static! {
    static ref MAP_METHODS: HashMap<&'static str, Method> = {
        let mut table = HashMap::new();
        LenMethod::register(&mut table);
        GetMethod::register(&mut table);
        HasMethod::register(&mut table);
        DelMethod::register(&mut table);
        SetMethod::register(&mut table);
        table
    };
}

/// Call method `name` on `receiver`. Only maps have methods.
pub fn call_method(receiver: &Value, name: &str, args: &[Value]) -> EResult<Value> {
    let unknown = || EvalError::UnknownMethod {
        kind: receiver.kind(),
        method: name.to_string(),
    };

    let Value::Map(map) = receiver else {
        return Err(unknown());
    };
    MAP_METHODS
        .get(name)
        .ok_or_else(unknown)?
        .evaluate(map, args)
}

/*******\
|* Len *|
\*******/
pub(super) struct LenMethod {}
impl BuiltinMethod for LenMethod {
    fn names() -> Vec<&'static str> {
        vec!["len", "size"]
    }

    fn arity() -> Arity {
        Arity(0)
    }

    fn eval(map: &MapValue, _args: &[Value]) -> EResult<Value> {
        Ok(map.size())
    }
}

/***********\
|* Lookups *|
\***********/
pub(super) struct GetMethod {}
impl BuiltinMethod for GetMethod {
    fn names() -> Vec<&'static str> {
        vec!["get"]
    }

    fn arity() -> Arity {
        Arity(1)
    }

    fn eval(map: &MapValue, args: &[Value]) -> EResult<Value> {
        map.get(&args[0]).map(Value::Optional)
    }
}

pub(super) struct HasMethod {}
impl BuiltinMethod for HasMethod {
    fn names() -> Vec<&'static str> {
        vec!["has"]
    }

    fn arity() -> Arity {
        Arity(1)
    }

    fn eval(map: &MapValue, args: &[Value]) -> EResult<Value> {
        map.contains(&args[0]).map(Value::Bool)
    }
}

/*************\
|* Mutations *|
\*************/
pub(super) struct DelMethod {}
impl BuiltinMethod for DelMethod {
    fn names() -> Vec<&'static str> {
        vec!["del", "delete"]
    }

    fn arity() -> Arity {
        Arity(1)
    }

    fn eval(map: &MapValue, args: &[Value]) -> EResult<Value> {
        map.delete(&args[0]).map(Value::Map)
    }
}

pub(super) struct SetMethod {}
impl BuiltinMethod for SetMethod {
    fn names() -> Vec<&'static str> {
        vec!["set"]
    }

    fn arity() -> Arity {
        Arity(2)
    }

    fn eval(map: &MapValue, args: &[Value]) -> EResult<Value> {
        map.set(args[0].clone(), args[1].clone())
            .map(Value::Map)
    }
}
