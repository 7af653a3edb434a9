use indexmap::IndexMap;
use std::any::Any;
use std::sync::Arc;

/// A dynamic runtime value crossing the resolver boundary.
///
/// Resolvers return arbitrary host values; the executor inspects them
/// structurally and drives completion by the declared type, not the runtime
/// tag. [`HostValue::Opaque`] carries values the engine never needs to look
/// inside (enum payloads, host domain objects handed from parent to child
/// resolvers).
#[derive(Clone, Debug)]
pub enum HostValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// An enum variant, by name. The variant's payload is looked up on the
    /// enum type during serialization.
    Enum(String),
    List(Vec<HostValue>),
    Object(IndexMap<String, HostValue>),
    Opaque(Arc<dyn Any + Send + Sync>),
}
impl HostValue {
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        HostValue::Opaque(Arc::new(value))
    }

    pub fn downcast_opaque<T: Any + Send + Sync>(&self) -> Option<&T> {
        match self {
            HostValue::Opaque(any) => any.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// A short name for the value's runtime tag. Used in coercion error
    /// messages.
    pub fn kind_str(&self) -> &'static str {
        match self {
            HostValue::Null => "null",
            HostValue::Bool(_) => "boolean",
            HostValue::Int(_) => "integer",
            HostValue::Float(_) => "float",
            HostValue::Str(_) => "string",
            HostValue::Enum(_) => "enum value",
            HostValue::List(_) => "list",
            HostValue::Object(_) => "object",
            HostValue::Opaque(_) => "opaque value",
        }
    }

    /// Fetch a property by name, for the default property resolver. Only
    /// object values have properties.
    pub fn property(&self, name: &str) -> Option<&HostValue> {
        match self {
            HostValue::Object(fields) => fields.get(name),
            _ => None,
        }
    }
}
impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostValue::Null, HostValue::Null) => true,
            (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
            (HostValue::Int(a), HostValue::Int(b)) => a == b,
            (HostValue::Float(a), HostValue::Float(b)) => a == b,
            (HostValue::Str(a), HostValue::Str(b)) => a == b,
            (HostValue::Enum(a), HostValue::Enum(b)) => a == b,
            (HostValue::List(a), HostValue::List(b)) => a == b,
            (HostValue::Object(a), HostValue::Object(b)) => a == b,
            (HostValue::Opaque(a), HostValue::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}
impl From<i32> for HostValue {
    fn from(value: i32) -> Self {
        HostValue::Int(value.into())
    }
}
impl From<i64> for HostValue {
    fn from(value: i64) -> Self {
        HostValue::Int(value)
    }
}
impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Float(value)
    }
}
impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::Str(value.to_string())
    }
}
impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::Str(value)
    }
}
impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => HostValue::Null,
        }
    }
}
impl<T: Into<HostValue>> From<Vec<T>> for HostValue {
    fn from(values: Vec<T>) -> Self {
        HostValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for HostValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => HostValue::Null,
            serde_json::Value::Bool(value) => HostValue::Bool(value),
            serde_json::Value::Number(num) => {
                if let Some(int) = num.as_i64() {
                    HostValue::Int(int)
                } else {
                    HostValue::Float(num.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(value) => HostValue::Str(value),
            serde_json::Value::Array(items) => {
                HostValue::List(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(fields) => HostValue::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<&HostValue> for serde_json::Value {
    type Error = String;

    fn try_from(value: &HostValue) -> Result<Self, String> {
        Ok(match value {
            HostValue::Null => serde_json::Value::Null,
            HostValue::Bool(value) => serde_json::Value::Bool(*value),
            HostValue::Int(value) => serde_json::Value::Number((*value).into()),
            HostValue::Float(value) => serde_json::Number::from_f64(*value)
                .map(serde_json::Value::Number)
                .ok_or_else(|| format!("non-finite float value: {value}"))?,
            HostValue::Str(value) => serde_json::Value::String(value.clone()),
            HostValue::Enum(name) => serde_json::Value::String(name.clone()),
            HostValue::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            HostValue::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| {
                        serde_json::Value::try_from(value).map(|value| (key.clone(), value))
                    })
                    .collect::<Result<_, _>>()?,
            ),
            HostValue::Opaque(_) => {
                return Err("opaque host value cannot be serialized".to_string());
            }
        })
    }
}
