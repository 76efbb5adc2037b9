pub mod builtins;
mod state;
pub mod values;

pub use builtins::{apply_operator, call_method};
pub use state::*;
pub use values::*;
