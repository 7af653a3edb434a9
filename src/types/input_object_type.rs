use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::InputField;
use crate::types::TypeBuilder;
use indexmap::IndexMap;
use inherent::inherent;

/// Represents an
/// [input object type](https://spec.graphql.org/October2021/#sec-Input-Objects).
#[derive(Clone, Debug)]
pub struct InputObjectType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, InputField>,
    pub(crate) name: String,
}
impl InputObjectType {
    pub fn builder(name: impl Into<String>) -> InputObjectTypeBuilder {
        InputObjectTypeBuilder::new(name)
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The input fields, in declaration order.
    pub fn fields(&self) -> &IndexMap<String, InputField> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&InputField> {
        self.fields.get(name)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Debug)]
pub struct InputObjectTypeBuilder {
    description: Option<String>,
    duplicate_field: Option<String>,
    fields: IndexMap<String, InputField>,
    name: String,
}
impl InputObjectTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            description: None,
            duplicate_field: None,
            fields: IndexMap::new(),
            name: name.into(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: InputField) -> Self {
        let field_name = field.name().to_string();
        if self.fields.insert(field_name.clone(), field).is_some() {
            self.duplicate_field.get_or_insert(field_name);
        }
        self
    }
}

#[inherent]
impl TypeBuilder for InputObjectTypeBuilder {
    type Output = Result<InputObjectType, SchemaBuildError>;

    pub fn build(self) -> Result<InputObjectType, SchemaBuildError> {
        if let Some(field_name) = self.duplicate_field {
            return Err(SchemaBuildError::DuplicateFieldName {
                type_name: self.name,
                field_name,
            });
        }
        Ok(InputObjectType {
            def_location: loc::SchemaDefLocation::HostDefined,
            description: self.description,
            fields: self.fields,
            name: self.name,
        })
    }
}
