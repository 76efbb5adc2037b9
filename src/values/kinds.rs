use std::fmt::{Display, Formatter};

/// Runtime type tag carried by every value.
///
/// Container kinds are not parameterized: a map of ints and a map of
/// strings are both `Kind::Map`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Boolean,
    Integer,
    String,
    Optional,
    Map,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::String => "string",
            Kind::Optional => "optional",
            Kind::Map => "map",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
