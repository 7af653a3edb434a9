use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::Schema;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::UnionType;
use std::sync::Arc;

/// Represents a defined GraphQL type.
///
/// The five standard scalars are ordinary [`ScalarType`] entries (flagged as
/// built-in), as are the introspection types; every named type in a schema is
/// one of these six shapes.
#[derive(Debug)]
pub enum GraphQLType {
    Enum(EnumType),
    InputObject(InputObjectType),
    Interface(InterfaceType),
    Object(ObjectType),
    Scalar(ScalarType),
    Union(UnionType),
}
impl GraphQLType {
    pub fn name(&self) -> &str {
        match self {
            GraphQLType::Enum(t) => t.name(),
            GraphQLType::InputObject(t) => t.name(),
            GraphQLType::Interface(t) => t.name(),
            GraphQLType::Object(t) => t.name(),
            GraphQLType::Scalar(t) => t.name(),
            GraphQLType::Union(t) => t.name(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            GraphQLType::Enum(t) => t.description(),
            GraphQLType::InputObject(t) => t.description(),
            GraphQLType::Interface(t) => t.description(),
            GraphQLType::Object(t) => t.description(),
            GraphQLType::Scalar(t) => t.description(),
            GraphQLType::Union(t) => t.description(),
        }
    }

    /// The type-kind name used in error messages and introspection
    /// (`SCALAR`, `OBJECT`, ...).
    pub fn kind_name(&self) -> &'static str {
        match self {
            GraphQLType::Enum(_) => "ENUM",
            GraphQLType::InputObject(_) => "INPUT_OBJECT",
            GraphQLType::Interface(_) => "INTERFACE",
            GraphQLType::Object(_) => "OBJECT",
            GraphQLType::Scalar(_) => "SCALAR",
            GraphQLType::Union(_) => "UNION",
        }
    }

    pub fn is_builtin(&self) -> bool {
        match self {
            GraphQLType::Scalar(t) => t.def_location().is_builtin(),
            GraphQLType::Enum(t) => t.def_location().is_builtin(),
            GraphQLType::Object(t) => t.def_location().is_builtin(),
            GraphQLType::Interface(t) => t.def_location().is_builtin(),
            GraphQLType::Union(t) => t.def_location().is_builtin(),
            GraphQLType::InputObject(t) => t.def_location().is_builtin(),
        }
    }

    /// Introspection types and meta-fields are spelled with a `__` prefix.
    pub fn is_introspection(&self) -> bool {
        self.name().starts_with("__")
    }

    /// Input types can appear in argument, input-field, and variable
    /// positions.
    pub fn is_input_type(&self) -> bool {
        matches!(
            self,
            GraphQLType::Scalar(_) | GraphQLType::Enum(_) | GraphQLType::InputObject(_),
        )
    }

    /// Output types can appear in field positions.
    pub fn is_output_type(&self) -> bool {
        !matches!(self, GraphQLType::InputObject(_))
    }

    /// Leaf types complete without a sub-selection.
    pub fn is_leaf(&self) -> bool {
        matches!(self, GraphQLType::Scalar(_) | GraphQLType::Enum(_))
    }

    /// Composite types require a sub-selection.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            GraphQLType::Object(_) | GraphQLType::Interface(_) | GraphQLType::Union(_),
        )
    }

    /// Abstract types resolve to a concrete object type at execution time.
    pub fn is_abstract(&self) -> bool {
        matches!(self, GraphQLType::Interface(_) | GraphQLType::Union(_))
    }

    /// The fields selectable on this type, for object and interface types.
    pub fn fields(&self) -> Option<&indexmap::IndexMap<String, Field>> {
        match self {
            GraphQLType::Object(t) => Some(t.fields()),
            GraphQLType::Interface(t) => Some(t.fields()),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().and_then(|fields| fields.get(name))
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        if let Self::Enum(type_) = self {
            Some(type_)
        } else {
            None
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        if let Self::InputObject(type_) = self {
            Some(type_)
        } else {
            None
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceType> {
        if let Self::Interface(type_) = self {
            Some(type_)
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        if let Self::Object(type_) = self {
            Some(type_)
        } else {
            None
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        if let Self::Scalar(type_) = self {
            Some(type_)
        } else {
            None
        }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        if let Self::Union(type_) = self {
            Some(type_)
        } else {
            None
        }
    }
}
impl DerefByName for GraphQLType {
    type Source = Schema;

    fn deref_name(schema: &Schema, name: &str) -> Result<Arc<Self>, DerefByNameError> {
        schema
            .type_named(name)
            .ok_or_else(|| DerefByNameError::DanglingReference(name.to_string()))
    }
}
impl From<ScalarType> for GraphQLType {
    fn from(type_: ScalarType) -> Self {
        GraphQLType::Scalar(type_)
    }
}
impl From<EnumType> for GraphQLType {
    fn from(type_: EnumType) -> Self {
        GraphQLType::Enum(type_)
    }
}
impl From<ObjectType> for GraphQLType {
    fn from(type_: ObjectType) -> Self {
        GraphQLType::Object(type_)
    }
}
impl From<InterfaceType> for GraphQLType {
    fn from(type_: InterfaceType) -> Self {
        GraphQLType::Interface(type_)
    }
}
impl From<UnionType> for GraphQLType {
    fn from(type_: UnionType) -> Self {
        GraphQLType::Union(type_)
    }
}
impl From<InputObjectType> for GraphQLType {
    fn from(type_: InputObjectType) -> Self {
        GraphQLType::InputObject(type_)
    }
}

pub type NamedGraphQLTypeRef = NamedRef<Schema, GraphQLType>;
