use super::{InternalError, MapValue, OptionalValue, Value};

/******************************\
|* Rust types <-> Value types *|
\******************************/
// `From<rust_type> for Value` is infallible: each rust type maps onto
// exactly one variant. The other direction can fail, since an arbitrary
// `Value` may hold some other variant, so it's a `TryFrom`.
macro_rules! impl_value_conversions {
    ($($t:ty, $v:ident);* $(;)?) => {
        $(
            impl TryFrom<&Value> for $t {
                type Error = InternalError;

                fn try_from(value: &Value) -> Result<Self, Self::Error> {
                    if let Value::$v(native_val) = value {
                        Ok(native_val.clone())
                    } else {
                        Err(InternalError::Conversion {
                            builtin_type: value.kind().to_string(),
                            rust_type: stringify!($t).to_string(),
                        })
                    }
                }
            }

            impl From<$t> for Value {
                fn from(val: $t) -> Self {
                    Value::$v(val)
                }
            }
        )*
    };
}

// The first element is the rust type, the second is the Value variant.
impl_value_conversions! {
    bool, Bool;
    i64, Int;
    String, Str;
    OptionalValue, Optional;
    MapValue, Map;
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Str(val.to_string())
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = InternalError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        if let Value::Str(native_s) = value {
            Ok(native_s)
        } else {
            Err(InternalError::Conversion {
                builtin_type: value.kind().to_string(),
                rust_type: "&str".to_string(),
            })
        }
    }
}

impl<'a> TryFrom<&'a Value> for &'a MapValue {
    type Error = InternalError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        if let Value::Map(map) = value {
            Ok(map)
        } else {
            Err(InternalError::Conversion {
                builtin_type: value.kind().to_string(),
                rust_type: "&MapValue".to_string(),
            })
        }
    }
}
