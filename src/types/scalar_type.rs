use crate::host_value::HostValue;
use crate::loc;
use crate::types::ParseLiteralFn;
use crate::types::ParseValueFn;
use crate::types::SerializeFn;
use crate::types::TypeBuilder;
use crate::value::Value;
use inherent::inherent;
use std::sync::Arc;

/// Represents a
/// [scalar type](https://spec.graphql.org/October2021/#sec-Scalars): a leaf
/// type defined by its three host-supplied functions.
///
/// `parse_value` coerces external input (variable values), `parse_literal`
/// coerces document literals, and `serialize` converts resolved values into
/// their output form.
#[derive(Clone)]
pub struct ScalarType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) name: String,
    pub(crate) parse_literal: ParseLiteralFn,
    pub(crate) parse_value: ParseValueFn,
    pub(crate) serialize: SerializeFn,
    pub(crate) specified_by_url: Option<String>,
}
impl ScalarType {
    pub fn builder(name: impl Into<String>) -> ScalarTypeBuilder {
        ScalarTypeBuilder::new(name)
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn specified_by_url(&self) -> Option<&str> {
        self.specified_by_url.as_deref()
    }

    pub fn parse_value(&self, value: &HostValue) -> Result<HostValue, String> {
        (self.parse_value)(value)
    }

    pub fn parse_literal(&self, literal: &Value) -> Result<HostValue, String> {
        (self.parse_literal)(literal)
    }

    pub fn serialize(&self, value: &HostValue) -> Result<HostValue, String> {
        (self.serialize)(value)
    }
}
impl std::fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarType")
            .field("name", &self.name)
            .field("def_location", &self.def_location)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ScalarTypeBuilder {
    description: Option<String>,
    name: String,
    parse_literal: Option<ParseLiteralFn>,
    parse_value: Option<ParseValueFn>,
    serialize: Option<SerializeFn>,
    specified_by_url: Option<String>,
}
impl ScalarTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            description: None,
            name: name.into(),
            parse_literal: None,
            parse_value: None,
            serialize: None,
            specified_by_url: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn specified_by_url(mut self, url: impl Into<String>) -> Self {
        self.specified_by_url = Some(url.into());
        self
    }

    pub fn parse_value(
        mut self,
        parse_value: impl Fn(&HostValue) -> Result<HostValue, String> + Send + Sync + 'static,
    ) -> Self {
        self.parse_value = Some(Arc::new(parse_value));
        self
    }

    pub fn parse_literal(
        mut self,
        parse_literal: impl Fn(&Value) -> Result<HostValue, String> + Send + Sync + 'static,
    ) -> Self {
        self.parse_literal = Some(Arc::new(parse_literal));
        self
    }

    pub fn serialize(
        mut self,
        serialize: impl Fn(&HostValue) -> Result<HostValue, String> + Send + Sync + 'static,
    ) -> Self {
        self.serialize = Some(Arc::new(serialize));
        self
    }
}

#[inherent]
impl TypeBuilder for ScalarTypeBuilder {
    type Output = ScalarType;

    pub fn build(self) -> ScalarType {
        let name = self.name;
        // An omitted function means the scalar passes values through
        // unchanged; this is how most custom scalars behave for at least one
        // of the three directions.
        ScalarType {
            def_location: loc::SchemaDefLocation::HostDefined,
            description: self.description,
            name,
            parse_literal: self
                .parse_literal
                .unwrap_or_else(|| Arc::new(passthrough_parse_literal)),
            parse_value: self
                .parse_value
                .unwrap_or_else(|| Arc::new(passthrough_parse_value)),
            serialize: self
                .serialize
                .unwrap_or_else(|| Arc::new(passthrough_serialize)),
            specified_by_url: self.specified_by_url,
        }
    }
}

fn passthrough_parse_value(value: &HostValue) -> Result<HostValue, String> {
    Ok(value.clone())
}

fn passthrough_serialize(value: &HostValue) -> Result<HostValue, String> {
    Ok(value.clone())
}

fn passthrough_parse_literal(literal: &Value) -> Result<HostValue, String> {
    Ok(match literal {
        Value::Variable(_) => {
            return Err("variable literals must be substituted before scalar parsing".to_string());
        }
        Value::Int(value) => HostValue::Int(*value),
        Value::Float(value) => HostValue::Float(*value),
        Value::String(value) => HostValue::Str(value.clone()),
        Value::Bool(value) => HostValue::Bool(*value),
        Value::Null => HostValue::Null,
        Value::Enum(name) => HostValue::Enum(name.clone()),
        Value::List(items) => HostValue::List(
            items
                .iter()
                .map(passthrough_parse_literal)
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(fields) => HostValue::Object(
            fields
                .iter()
                .map(|(name, value)| {
                    passthrough_parse_literal(value).map(|value| (name.clone(), value))
                })
                .collect::<Result<_, _>>()?,
        ),
    })
}

pub(crate) mod builtins {
    use super::*;

    pub fn all() -> Vec<ScalarType> {
        vec![int(), float(), string(), boolean(), id()]
    }

    fn int_from_f64(value: f64) -> Result<HostValue, String> {
        if value.fract() == 0.0 && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&value) {
            Ok(HostValue::Int(value as i64))
        } else {
            Err(format!("Int cannot represent non-integer value: {value}"))
        }
    }

    fn parse_int_value(value: &HostValue) -> Result<HostValue, String> {
        match value {
            HostValue::Int(int) => {
                if i32::try_from(*int).is_ok() {
                    Ok(HostValue::Int(*int))
                } else {
                    Err(format!(
                        "Int cannot represent non 32-bit signed integer value: {int}",
                    ))
                }
            }
            HostValue::Float(float) => int_from_f64(*float),
            other => Err(format!(
                "Int cannot represent non-integer value: {other:?}",
            )),
        }
    }

    fn parse_float_value(value: &HostValue) -> Result<HostValue, String> {
        match value {
            HostValue::Int(int) => Ok(HostValue::Float(*int as f64)),
            HostValue::Float(float) => Ok(HostValue::Float(*float)),
            other => Err(format!(
                "Float cannot represent non numeric value: {other:?}",
            )),
        }
    }

    fn parse_string_value(value: &HostValue) -> Result<HostValue, String> {
        match value {
            HostValue::Str(string) => Ok(HostValue::Str(string.clone())),
            other => Err(format!(
                "String cannot represent a non string value: {other:?}",
            )),
        }
    }

    fn parse_boolean_value(value: &HostValue) -> Result<HostValue, String> {
        match value {
            HostValue::Bool(boolean) => Ok(HostValue::Bool(*boolean)),
            other => Err(format!(
                "Boolean cannot represent a non boolean value: {other:?}",
            )),
        }
    }

    fn parse_id_value(value: &HostValue) -> Result<HostValue, String> {
        match value {
            HostValue::Str(string) => Ok(HostValue::Str(string.clone())),
            HostValue::Int(int) => Ok(HostValue::Str(int.to_string())),
            other => Err(format!("ID cannot represent value: {other:?}")),
        }
    }

    fn builtin(
        name: &str,
        description: &str,
        parse_value: fn(&HostValue) -> Result<HostValue, String>,
        parse_literal: fn(&Value) -> Result<HostValue, String>,
    ) -> ScalarType {
        ScalarType {
            def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
            description: Some(description.to_string()),
            name: name.to_string(),
            parse_literal: Arc::new(parse_literal),
            // Built-in scalars serialize with the same check they parse with.
            parse_value: Arc::new(parse_value),
            serialize: Arc::new(parse_value),
            specified_by_url: None,
        }
    }

    pub fn int() -> ScalarType {
        builtin(
            "Int",
            "The `Int` scalar type represents non-fractional signed whole numeric values.",
            parse_int_value,
            |literal| match literal {
                Value::Int(value) => parse_int_value(&HostValue::Int(*value)),
                other => Err(format!("Int cannot represent non-integer value: {other}")),
            },
        )
    }

    pub fn float() -> ScalarType {
        builtin(
            "Float",
            "The `Float` scalar type represents signed double-precision fractional values.",
            parse_float_value,
            |literal| match literal {
                Value::Int(value) => Ok(HostValue::Float(*value as f64)),
                Value::Float(value) => Ok(HostValue::Float(*value)),
                other => Err(format!("Float cannot represent non numeric value: {other}")),
            },
        )
    }

    pub fn string() -> ScalarType {
        builtin(
            "String",
            "The `String` scalar type represents textual data, represented as UTF-8 character sequences.",
            parse_string_value,
            |literal| match literal {
                Value::String(value) => Ok(HostValue::Str(value.clone())),
                other => Err(format!(
                    "String cannot represent a non string value: {other}",
                )),
            },
        )
    }

    pub fn boolean() -> ScalarType {
        builtin(
            "Boolean",
            "The `Boolean` scalar type represents `true` or `false`.",
            parse_boolean_value,
            |literal| match literal {
                Value::Bool(value) => Ok(HostValue::Bool(*value)),
                other => Err(format!(
                    "Boolean cannot represent a non boolean value: {other}",
                )),
            },
        )
    }

    pub fn id() -> ScalarType {
        builtin(
            "ID",
            "The `ID` scalar type represents a unique identifier.",
            parse_id_value,
            |literal| match literal {
                Value::String(value) => Ok(HostValue::Str(value.clone())),
                Value::Int(value) => Ok(HostValue::Str(value.to_string())),
                other => Err(format!("ID cannot represent value: {other}")),
            },
        )
    }
}
