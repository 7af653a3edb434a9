use crate::types::TypeAnnotation;
use thiserror::Error;

/// Structural invariant violations detected at schema-build time. These are
/// host configuration bugs, so they fail [`SchemaBuilder::build()`](
/// crate::schema::SchemaBuilder::build) rather than surfacing per request.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeValidationError {
    #[error(
        "The `{root}` root operation type `{type_name}` must be an object \
        type, but is a {kind} type"
    )]
    RootTypeNotObject {
        root: String,
        type_name: String,
        kind: String,
    },

    #[error("The `{type_name}` type must define at least one field")]
    NoFieldsDefined { type_name: String },

    #[error("The `{type_name}` union must define at least one member")]
    NoUnionMembersDefined { type_name: String },

    #[error("The `{type_name}` enum must define at least one value")]
    NoEnumVariantsDefined { type_name: String },

    #[error(
        "The `{type_name}` enum defines a value named `{variant_name}`; enum \
        values may not be named `true`, `false` or `null`"
    )]
    ReservedEnumVariantName {
        type_name: String,
        variant_name: String,
    },

    #[error(
        "Output fields can not be declared with an input type: The \
        `{parent_type_name}.{field_name}` field is an output field, but the \
        `{input_type_name}` type is an input-only type"
    )]
    InvalidOutputFieldWithInputType {
        parent_type_name: String,
        field_name: String,
        input_type_name: String,
    },

    #[error(
        "Arguments can only be declared with input-compatible types: The \
        `{argument_name}` argument on `{parent_type_name}.{field_name}` was \
        declared with the `{output_type_name}` type, which is not an \
        input-compatible type"
    )]
    InvalidArgumentWithOutputType {
        parent_type_name: String,
        field_name: String,
        argument_name: String,
        output_type_name: String,
    },

    #[error(
        "Input fields can only be declared with input-compatible types: The \
        `{parent_type_name}.{field_name}` field was declared with the \
        `{output_type_name}` type, which is not an input-compatible type"
    )]
    InvalidInputFieldWithOutputType {
        parent_type_name: String,
        field_name: String,
        output_type_name: String,
    },

    #[error(
        "The `{type_name}` input object cannot reference itself through a \
        chain of non-nullable fields: {cycle_path}"
    )]
    InputObjectNonNullableCycle {
        type_name: String,
        cycle_path: String,
    },

    #[error(
        "Invalid union member type: The `{union_type_name}` type defines one \
        of its members as `{member_name}`, but this type is a {member_kind} \
        type and union members can only be object types"
    )]
    InvalidUnionMemberTypeKind {
        union_type_name: String,
        member_name: String,
        member_kind: String,
    },

    #[error(
        "Attempted to implement a type that is not defined as an interface: \
        `{type_name}` implements `{non_interface_type_name}`"
    )]
    ImplementsNonInterfaceType {
        type_name: String,
        non_interface_type_name: String,
    },

    #[error(
        "The `{type_name}` type implements the `{interface_name}` interface, \
        but does not define a field named `{field_name}`"
    )]
    MissingInterfaceSpecifiedField {
        type_name: String,
        interface_name: String,
        field_name: String,
    },

    #[error(
        "Invalid interface-specified field type: The \
        `{type_name}.{field_name}` field's type is defined as \
        `{actual_field_type}` which is incompatible with \
        `{interface_name}.{field_name}` whose type is defined as \
        `{expected_field_type}`"
    )]
    InvalidInterfaceSpecifiedFieldType {
        type_name: String,
        interface_name: String,
        field_name: String,
        expected_field_type: TypeAnnotation,
        actual_field_type: TypeAnnotation,
    },

    #[error(
        "The `{type_name}` type implements the `{interface_name}` interface \
        which defines a `{argument_name}` argument on the `{field_name}` \
        field, but `{type_name}.{field_name}` has no `{argument_name}` \
        argument defined"
    )]
    MissingInterfaceSpecifiedFieldArgument {
        type_name: String,
        interface_name: String,
        field_name: String,
        argument_name: String,
    },

    #[error(
        "Invalid argument type: The `{type_name}.{field_name}` field defines \
        the `{argument_name}` argument with a type of \
        `{actual_argument_type}`, but `{interface_name}.{field_name}` \
        defines this argument with type `{expected_argument_type}`"
    )]
    InvalidInterfaceSpecifiedFieldArgumentType {
        type_name: String,
        interface_name: String,
        field_name: String,
        argument_name: String,
        expected_argument_type: TypeAnnotation,
        actual_argument_type: TypeAnnotation,
    },

    #[error(
        "Additional arguments defined on interface-specified fields must not \
        be required: `{type_name}.{field_name}` adds the required \
        `{argument_name}` argument which `{interface_name}.{field_name}` \
        does not define"
    )]
    RequiredAdditionalArgumentOnInterfaceSpecifiedField {
        type_name: String,
        interface_name: String,
        field_name: String,
        argument_name: String,
    },

    #[error(
        "The `{type_name}` type implements the `{interface_name}` interface, \
        which requires it to also declare the transitive `{transitive_name}` \
        interface"
    )]
    MissingTransitiveInterface {
        type_name: String,
        interface_name: String,
        transitive_name: String,
    },
}
