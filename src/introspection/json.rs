use crate::schema::Schema;
use crate::types::Argument;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use serde_json::json;
use serde_json::Value as Json;

/// Emit the standard introspection result for a schema, without going
/// through the executor.
///
/// The shape matches what executing the canonical introspection query would
/// produce: `{"__schema": {...}}` with types sorted by name for determinism.
pub fn introspection_json(schema: &Schema) -> Json {
    let mut type_names: Vec<&String> = schema.types().keys().collect();
    type_names.sort();
    let types: Vec<Json> = type_names
        .iter()
        .map(|name| type_json(schema, &schema.types()[*name]))
        .collect();

    let mut directive_names: Vec<&String> = schema.directives().keys().collect();
    directive_names.sort();
    let directives: Vec<Json> = directive_names
        .iter()
        .map(|name| directive_json(schema, &schema.directives()[*name]))
        .collect();

    json!({
        "__schema": {
            "queryType": { "name": schema.query_type().name() },
            "mutationType": schema
                .mutation_type()
                .map(|mutation_type| json!({ "name": mutation_type.name() }))
                .unwrap_or(Json::Null),
            "subscriptionType": schema
                .subscription_type()
                .map(|subscription_type| json!({ "name": subscription_type.name() }))
                .unwrap_or(Json::Null),
            "types": types,
            "directives": directives,
        }
    })
}

fn type_json(schema: &Schema, graphql_type: &GraphQLType) -> Json {
    match graphql_type {
        GraphQLType::Scalar(scalar_type) => json!({
            "kind": "SCALAR",
            "name": scalar_type.name(),
            "description": scalar_type.description(),
            "specifiedByURL": scalar_type.specified_by_url(),
        }),

        GraphQLType::Enum(enum_type) => json!({
            "kind": "ENUM",
            "name": enum_type.name(),
            "description": enum_type.description(),
            "enumValues": enum_type
                .variants()
                .values()
                .map(|variant| json!({
                    "name": variant.name(),
                    "description": variant.description(),
                    "isDeprecated": variant.is_deprecated(),
                    "deprecationReason": variant.deprecation_reason(),
                }))
                .collect::<Vec<_>>(),
        }),

        GraphQLType::Object(object_type) => json!({
            "kind": "OBJECT",
            "name": object_type.name(),
            "description": object_type.description(),
            "fields": fields_json(schema, object_type.fields().values()),
            "interfaces": object_type
                .interfaces()
                .iter()
                .map(|interface_ref| json!({
                    "kind": "INTERFACE",
                    "name": interface_ref.name(),
                }))
                .collect::<Vec<_>>(),
        }),

        GraphQLType::Interface(interface_type) => json!({
            "kind": "INTERFACE",
            "name": interface_type.name(),
            "description": interface_type.description(),
            "fields": fields_json(schema, interface_type.fields().values()),
            "interfaces": interface_type
                .interfaces()
                .iter()
                .map(|interface_ref| json!({
                    "kind": "INTERFACE",
                    "name": interface_ref.name(),
                }))
                .collect::<Vec<_>>(),
            "possibleTypes": schema
                .possible_types(graphql_type)
                .iter()
                .map(|possible| json!({
                    "kind": "OBJECT",
                    "name": possible.name(),
                }))
                .collect::<Vec<_>>(),
        }),

        GraphQLType::Union(union_type) => json!({
            "kind": "UNION",
            "name": union_type.name(),
            "description": union_type.description(),
            "possibleTypes": union_type
                .members()
                .iter()
                .map(|member_ref| json!({
                    "kind": "OBJECT",
                    "name": member_ref.name(),
                }))
                .collect::<Vec<_>>(),
        }),

        GraphQLType::InputObject(input_object_type) => json!({
            "kind": "INPUT_OBJECT",
            "name": input_object_type.name(),
            "description": input_object_type.description(),
            "inputFields": input_object_type
                .fields()
                .values()
                .map(|input_field| json!({
                    "name": input_field.name(),
                    "description": input_field.description(),
                    "type": annotation_json(schema, input_field.type_annotation()),
                    "defaultValue": input_field
                        .default_value()
                        .map(|default| default.to_string()),
                }))
                .collect::<Vec<_>>(),
        }),
    }
}

fn fields_json<'a>(schema: &Schema, fields: impl Iterator<Item = &'a Field>) -> Vec<Json> {
    fields
        .map(|field| {
            json!({
                "name": field.name(),
                "description": field.description(),
                "args": field
                    .arguments()
                    .values()
                    .map(|argument| argument_json(schema, argument))
                    .collect::<Vec<_>>(),
                "type": annotation_json(schema, field.type_annotation()),
                "isDeprecated": field.is_deprecated(),
                "deprecationReason": field.deprecation_reason(),
            })
        })
        .collect()
}

fn argument_json(schema: &Schema, argument: &Argument) -> Json {
    json!({
        "name": argument.name(),
        "description": argument.description(),
        "type": annotation_json(schema, argument.type_annotation()),
        "defaultValue": argument.default_value().map(|default| default.to_string()),
    })
}

/// A type reference as the nested `{kind, name, ofType}` chain.
fn annotation_json(schema: &Schema, annotation: &TypeAnnotation) -> Json {
    let inner = match annotation {
        TypeAnnotation::List { inner, .. } => json!({
            "kind": "LIST",
            "name": Json::Null,
            "ofType": annotation_json(schema, inner),
        }),
        TypeAnnotation::Named { type_ref, .. } => json!({
            "kind": schema
                .type_named(type_ref.name())
                .map(|named_type| Json::String(named_type.kind_name().to_string()))
                .unwrap_or(Json::Null),
            "name": type_ref.name(),
            "ofType": Json::Null,
        }),
    };
    if annotation.nullable() {
        inner
    } else {
        json!({
            "kind": "NON_NULL",
            "name": Json::Null,
            "ofType": inner,
        })
    }
}

fn directive_json(schema: &Schema, directive: &crate::types::Directive) -> Json {
    json!({
        "name": directive.name(),
        "description": directive.description(),
        "locations": directive
            .locations()
            .iter()
            .map(|location| location.name())
            .collect::<Vec<_>>(),
        "args": directive
            .arguments()
            .values()
            .map(|argument| argument_json(schema, argument))
            .collect::<Vec<_>>(),
        "isRepeatable": directive.is_repeatable(),
    })
}
