use crate::ast;
use std::collections::BTreeMap;

/// A literal value as written in an executable document: either a constant or
/// a reference to an operation variable.
///
/// Coercion into typed runtime values happens in [crate::coerce]; this type
/// only mirrors the shape of the AST value node.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable(String),
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}
impl Value {
    pub(crate) fn from_ast(ast_value: &ast::Value) -> Self {
        match ast_value {
            ast::Value::Variable(var_name) => Value::Variable(var_name.clone()),

            // The parser's arbitrary-precision number narrows to i64; the Int
            // scalar range check happens during coercion.
            ast::Value::Int(value) => Value::Int(value.as_i64().unwrap_or(0)),

            ast::Value::Float(value) => Value::Float(*value),

            ast::Value::String(value) => Value::String(value.clone()),

            ast::Value::Boolean(value) => Value::Bool(*value),

            ast::Value::Null => Value::Null,

            ast::Value::Enum(value) => Value::Enum(value.clone()),

            ast::Value::List(values) => Value::List(
                values.iter().map(Value::from_ast).collect(),
            ),

            ast::Value::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, ast_value)| (key.clone(), Value::from_ast(ast_value)))
                    .collect(),
            ),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Variable(name) => write!(f, "${name}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::String(value) => write!(f, "{value:?}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Null => write!(f, "null"),
            Value::Enum(name) => write!(f, "{name}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(fields) => {
                write!(f, "{{")?;
                for (idx, (name, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
