use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::Field;
use crate::types::FieldBuilder;
use crate::types::GraphQLType;
use crate::types::IsTypeOfFn;
use crate::types::NamedGraphQLTypeRef;
use crate::types::TypeBuilder;
use indexmap::IndexMap;
use inherent::inherent;
use std::sync::Arc;

/// Represents an
/// [object type](https://spec.graphql.org/October2021/#sec-Objects): the
/// concrete composite type fields resolve against.
#[derive(Clone)]
pub struct ObjectType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) fields: IndexMap<String, Field>,
    pub(crate) interfaces: Vec<NamedGraphQLTypeRef>,
    pub(crate) is_type_of: Option<IsTypeOfFn>,
    pub(crate) name: String,
}
impl ObjectType {
    pub fn builder(name: impl Into<String>) -> ObjectTypeBuilder {
        ObjectTypeBuilder::new(name)
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

    /// The interfaces this type declares, in declaration order.
    pub fn interfaces(&self) -> &Vec<NamedGraphQLTypeRef> {
        &self.interfaces
    }

    pub fn implements(&self, interface_name: &str) -> bool {
        self.interfaces
            .iter()
            .any(|interface_ref| interface_ref.name() == interface_name)
    }

    pub fn is_type_of(&self) -> Option<&IsTypeOfFn> {
        self.is_type_of.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
impl std::fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("interfaces", &self.interfaces)
            .finish_non_exhaustive()
    }
}

pub struct ObjectTypeBuilder {
    description: Option<String>,
    duplicate_field: Option<String>,
    fields: IndexMap<String, Field>,
    field_error: Option<SchemaBuildError>,
    interfaces: Vec<NamedGraphQLTypeRef>,
    is_type_of: Option<IsTypeOfFn>,
    name: String,
}
impl ObjectTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            description: None,
            duplicate_field: None,
            fields: IndexMap::new(),
            field_error: None,
            interfaces: vec![],
            is_type_of: None,
            name: name.into(),
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

    pub fn is_type_of(
        mut self,
        is_type_of: impl Fn(&crate::host_value::HostValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_type_of = Some(Arc::new(is_type_of));
        self
    }
}

impl ObjectTypeBuilder {
    /// Build one of the engine's own (introspection) types; their shape is
    /// static and well-formed by construction.
    pub(crate) fn build_builtin(self) -> ObjectType {
        let mut object_type = self.build().expect("built-in types are well-formed");
        object_type.def_location = loc::SchemaDefLocation::GraphQLBuiltIn;
        object_type
    }
}

#[inherent]
impl TypeBuilder for ObjectTypeBuilder {
    type Output = Result<ObjectType, SchemaBuildError>;

    pub fn build(self) -> Result<ObjectType, SchemaBuildError> {
        if let Some(error) = self.field_error {
            return Err(error);
        }
        if let Some(field_name) = self.duplicate_field {
            return Err(SchemaBuildError::DuplicateFieldName {
                type_name: self.name,
                field_name,
            });
        }
        Ok(ObjectType {
            def_location: loc::SchemaDefLocation::HostDefined,
            description: self.description,
            fields: self.fields,
            interfaces: self.interfaces,
            is_type_of: self.is_type_of,
            name: self.name,
        })
    }
}

/// Resolve the full interface set (declared plus transitive) for an object
/// or interface type. Dangling references resolve to nothing here; schema
/// validation reports them.
pub(crate) fn transitive_interfaces(
    schema: &crate::schema::Schema,
    interfaces: &[NamedGraphQLTypeRef],
) -> Vec<Arc<GraphQLType>> {
    let mut seen: Vec<Arc<GraphQLType>> = vec![];
    let mut pending: Vec<NamedGraphQLTypeRef> = interfaces.to_vec();
    while let Some(interface_ref) = pending.pop() {
        let Ok(interface_type) = interface_ref.try_deref(schema) else {
            continue;
        };
        if seen
            .iter()
            .any(|known| known.name() == interface_type.name())
        {
            continue;
        }
        if let GraphQLType::Interface(interface) = interface_type.as_ref() {
            pending.extend(interface.interfaces().iter().cloned());
        }
        seen.push(interface_type);
    }
    seen
}
