mod methods;
mod operators;

pub use methods::call_method;
pub use operators::apply_operator;

use crate::{EResult, EvalError};

/// Number of arguments a builtin takes
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Arity(pub usize);

impl Arity {
    pub fn check(&self, name: &str, n_args: usize) -> EResult<()> {
        if n_args != self.0 {
            return Err(EvalError::Arity {
                name: name.to_string(),
                arity: self.0,
                num_args_provided: n_args,
            });
        }

        Ok(())
    }
}
