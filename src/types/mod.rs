mod argument;
mod directive;
mod directive_location;
mod enum_type;
mod field;
mod graphql_type;
mod host_fns;
mod input_field;
mod input_object_type;
mod interface_type;
pub(crate) mod object_type;
pub(crate) mod scalar_type;
mod type_annotation;
mod type_builder;
mod union_type;

pub use argument::Argument;
pub use directive::Directive;
pub use directive::NamedDirectiveRef;
pub use directive_location::DirectiveLocation;
pub use enum_type::EnumType;
pub use enum_type::EnumTypeBuilder;
pub use enum_type::EnumVariant;
pub use field::Field;
pub use field::FieldBuilder;
pub use graphql_type::GraphQLType;
pub use graphql_type::NamedGraphQLTypeRef;
pub use host_fns::ComplexityFn;
pub use host_fns::IsTypeOfFn;
pub use host_fns::ParseLiteralFn;
pub use host_fns::ParseValueFn;
pub use host_fns::ResolveTypeFn;
pub use host_fns::ResolverFn;
pub use host_fns::ResolverOutcome;
pub use host_fns::SerializeFn;
pub use input_field::InputField;
pub use input_object_type::InputObjectType;
pub use input_object_type::InputObjectTypeBuilder;
pub use interface_type::InterfaceType;
pub use interface_type::InterfaceTypeBuilder;
pub use object_type::ObjectType;
pub use object_type::ObjectTypeBuilder;
pub use scalar_type::ScalarType;
pub use scalar_type::ScalarTypeBuilder;
pub use type_annotation::TypeAnnotation;
pub use type_builder::TypeBuilder;
pub use union_type::UnionType;
pub use union_type::UnionTypeBuilder;

#[cfg(test)]
pub(crate) mod tests;
