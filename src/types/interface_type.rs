use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::Field;
use crate::types::FieldBuilder;
use crate::types::NamedGraphQLTypeRef;
use crate::types::ResolveTypeFn;
use crate::types::TypeBuilder;
use indexmap::IndexMap;
use inherent::inherent;
use std::sync::Arc;

/// Represents an
/// [interface type](https://spec.graphql.org/October2021/#sec-Interfaces).
///
/// `resolve_type` picks the concrete object type for a value resolved at a
/// position of this interface; without it the executor probes each possible
/// type's `is_type_of`.
#[derive(Clone)]
pub struct InterfaceType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, Field>,
    pub(crate) interfaces: Vec<NamedGraphQLTypeRef>,
    pub(crate) name: String,
    pub(crate) resolve_type: Option<ResolveTypeFn>,
}
impl InterfaceType {
    pub fn builder(name: impl Into<String>) -> InterfaceTypeBuilder {
        InterfaceTypeBuilder::new(name)
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn interfaces(&self) -> &Vec<NamedGraphQLTypeRef> {
        &self.interfaces
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn resolve_type(&self) -> Option<&ResolveTypeFn> {
        self.resolve_type.as_ref()
    }
}
impl std::fmt::Debug for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("interfaces", &self.interfaces)
            .finish_non_exhaustive()
    }
}

pub struct InterfaceTypeBuilder {
    description: Option<String>,
    duplicate_field: Option<String>,
    field_error: Option<SchemaBuildError>,
    fields: IndexMap<String, Field>,
    interfaces: Vec<NamedGraphQLTypeRef>,
    name: String,
    resolve_type: Option<ResolveTypeFn>,
}
impl InterfaceTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            description: None,
            duplicate_field: None,
            field_error: None,
            fields: IndexMap::new(),
            interfaces: vec![],
            name: name.into(),
            resolve_type: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: FieldBuilder) -> Self {
        if let Some(argument_name) = field.duplicate_argument() {
            self.field_error
                .get_or_insert(SchemaBuildError::DuplicateArgumentName {
                    type_name: self.name.clone(),
                    field_name: field.name().to_string(),
                    argument_name: argument_name.to_string(),
                });
        }
        let field = field.finish();
        let field_name = field.name().to_string();
        if self.fields.insert(field_name.clone(), field).is_some() {
            self.duplicate_field.get_or_insert(field_name);
        }
        self
    }

    pub fn interface(mut self, interface_name: impl Into<String>) -> Self {
        self.interfaces
            .push(NamedGraphQLTypeRef::new(interface_name));
        self
    }

    pub fn resolve_type(
        mut self,
        resolve_type: impl Fn(&crate::host_value::HostValue) -> Option<String>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.resolve_type = Some(Arc::new(resolve_type));
        self
    }
}

#[inherent]
impl TypeBuilder for InterfaceTypeBuilder {
    type Output = Result<InterfaceType, SchemaBuildError>;

    pub fn build(self) -> Result<InterfaceType, SchemaBuildError> {
        if let Some(error) = self.field_error {
            return Err(error);
        }
        if let Some(field_name) = self.duplicate_field {
            return Err(SchemaBuildError::DuplicateFieldName {
                type_name: self.name,
                field_name,
            });
        }
        Ok(InterfaceType {
            def_location: loc::SchemaDefLocation::HostDefined,
            description: self.description,
            fields: self.fields,
            interfaces: self.interfaces,
            name: self.name,
            resolve_type: self.resolve_type,
        })
    }
}
