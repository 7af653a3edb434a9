use crate::types::TypeAnnotation;
use crate::value::Value;

/// Represents a field declared on an
/// [`InputObjectType`](crate::types::InputObjectType).
#[derive(Clone, Debug, PartialEq)]
pub struct InputField {
    pub(crate) default_value: Option<Value>,
    pub(crate) description: Option<String>,
    pub(crate) name: String,
    pub(crate) type_annotation: TypeAnnotation,
}
impl InputField {
    pub fn new(name: impl Into<String>, type_annotation: TypeAnnotation) -> Self {
        Self {
            default_value: None,
            description: None,
            name: name.into(),
            type_annotation,
        }
    }

    pub fn with_default(mut self, default_value: Value) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }

    pub fn is_required(&self) -> bool {
        !self.type_annotation.nullable() && self.default_value.is_none()
    }
}
