pub mod coercions;
pub mod errors;
pub mod kinds;
pub mod map;
pub mod optional;
pub mod value;

pub use errors::*;
pub use kinds::*;
pub use map::*;
pub use optional::*;
pub use value::*;
