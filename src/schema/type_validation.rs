use crate::schema::type_utils::is_sub_type_of;
use crate::schema::Schema;
use crate::schema::TypeValidationError;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::NamedGraphQLTypeRef;
use indexmap::IndexMap;
use std::collections::HashSet;

type Result<T> = std::result::Result<T, TypeValidationError>;

/// Enforce the structural invariants of the type system over a fully
/// assembled schema.
///
/// References that cannot be resolved are skipped here; the reference scan
/// (or the lazy loader contract) owns dangling-name reporting.
pub(crate) fn validate_schema(schema: &Schema) -> Result<()> {
    check_root_types(schema)?;

    let mut names: Vec<&String> = schema.types().keys().collect();
    names.sort();
    for name in names {
        let graphql_type = &schema.types()[name];
        match graphql_type.as_ref() {
            GraphQLType::Object(object_type) => {
                check_fields(schema, object_type.name(), object_type.fields())?;
                check_interface_implementations(
                    schema,
                    object_type.name(),
                    object_type.fields(),
                    object_type.interfaces(),
                )?;
            }
            GraphQLType::Interface(interface_type) => {
                check_fields(schema, interface_type.name(), interface_type.fields())?;
                check_interface_implementations(
                    schema,
                    interface_type.name(),
                    interface_type.fields(),
                    interface_type.interfaces(),
                )?;
            }
            GraphQLType::Union(union_type) => {
                if union_type.members().is_empty() {
                    return Err(TypeValidationError::NoUnionMembersDefined {
                        type_name: union_type.name().to_string(),
                    });
                }
                for member_ref in union_type.members() {
                    let Ok(member_type) = member_ref.try_deref(schema) else {
                        continue;
                    };
                    if member_type.as_object().is_none() {
                        return Err(TypeValidationError::InvalidUnionMemberTypeKind {
                            union_type_name: union_type.name().to_string(),
                            member_name: member_type.name().to_string(),
                            member_kind: member_type.kind_name().to_string(),
                        });
                    }
                }
            }
            GraphQLType::Enum(enum_type) => {
                if enum_type.variants().is_empty() {
                    return Err(TypeValidationError::NoEnumVariantsDefined {
                        type_name: enum_type.name().to_string(),
                    });
                }
                for variant_name in enum_type.variants().keys() {
                    if matches!(variant_name.as_str(), "true" | "false" | "null") {
                        return Err(TypeValidationError::ReservedEnumVariantName {
                            type_name: enum_type.name().to_string(),
                            variant_name: variant_name.clone(),
                        });
                    }
                }
            }
            GraphQLType::InputObject(input_object_type) => {
                check_input_object(schema, input_object_type)?;
            }
            GraphQLType::Scalar(_) => {}
        }
    }

    Ok(())
}

fn check_root_types(schema: &Schema) -> Result<()> {
    let roots = [
        ("query", Some(schema.query_type.clone())),
        ("mutation", schema.mutation_type.clone()),
        ("subscription", schema.subscription_type.clone()),
    ];
    for (root, type_ref) in roots {
        let Some(type_ref) = type_ref else {
            continue;
        };
        let Ok(root_type) = type_ref.try_deref(schema) else {
            continue;
        };
        if root_type.as_object().is_none() {
            return Err(TypeValidationError::RootTypeNotObject {
                root: root.to_string(),
                type_name: root_type.name().to_string(),
                kind: root_type.kind_name().to_string(),
            });
        }
    }
    Ok(())
}

fn check_fields(
    schema: &Schema,
    type_name: &str,
    fields: &IndexMap<String, Field>,
) -> Result<()> {
    if fields.is_empty() {
        return Err(TypeValidationError::NoFieldsDefined {
            type_name: type_name.to_string(),
        });
    }

    for field in fields.values() {
        if let Some(field_type) =
            field.type_annotation().innermost_named_type(schema)
        {
            if !field_type.is_output_type() {
                return Err(TypeValidationError::InvalidOutputFieldWithInputType {
                    parent_type_name: type_name.to_string(),
                    field_name: field.name().to_string(),
                    input_type_name: field_type.name().to_string(),
                });
            }
        }
        for argument in field.arguments().values() {
            if let Some(argument_type) =
                argument.type_annotation().innermost_named_type(schema)
            {
                if !argument_type.is_input_type() {
                    return Err(TypeValidationError::InvalidArgumentWithOutputType {
                        parent_type_name: type_name.to_string(),
                        field_name: field.name().to_string(),
                        argument_name: argument.name().to_string(),
                        output_type_name: argument_type.name().to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}

fn check_input_object(schema: &Schema, input_object_type: &InputObjectType) -> Result<()> {
    if input_object_type.fields().is_empty() {
        return Err(TypeValidationError::NoFieldsDefined {
            type_name: input_object_type.name().to_string(),
        });
    }

    for input_field in input_object_type.fields().values() {
        if let Some(field_type) =
            input_field.type_annotation().innermost_named_type(schema)
        {
            if !field_type.is_input_type() {
                return Err(TypeValidationError::InvalidInputFieldWithOutputType {
                    parent_type_name: input_object_type.name().to_string(),
                    field_name: input_field.name().to_string(),
                    output_type_name: field_type.name().to_string(),
                });
            }
        }
    }

    let mut path = vec![];
    let mut visiting = HashSet::new();
    check_input_object_cycle(schema, input_object_type, &mut path, &mut visiting)
}

/// DFS over the chains of non-nullable, non-list input-object fields. A
/// cycle through such a chain can never be satisfied by any finite input.
fn check_input_object_cycle(
    schema: &Schema,
    input_object_type: &InputObjectType,
    path: &mut Vec<String>,
    visiting: &mut HashSet<String>,
) -> Result<()> {
    if !visiting.insert(input_object_type.name().to_string()) {
        return Err(TypeValidationError::InputObjectNonNullableCycle {
            type_name: input_object_type.name().to_string(),
            cycle_path: path.join(" -> "),
        });
    }

    for input_field in input_object_type.fields().values() {
        let annotation = input_field.type_annotation();
        if annotation.nullable() || annotation.is_list() {
            continue;
        }
        let Some(field_type) = annotation.innermost_named_type(schema) else {
            continue;
        };
        if let GraphQLType::InputObject(inner) = field_type.as_ref() {
            path.push(format!(
                "{}.{}",
                input_object_type.name(),
                input_field.name(),
            ));
            check_input_object_cycle(schema, inner, path, visiting)?;
            path.pop();
        }
    }

    visiting.remove(input_object_type.name());
    Ok(())
}

fn check_interface_implementations(
    schema: &Schema,
    type_name: &str,
    fields: &IndexMap<String, Field>,
    interfaces: &[NamedGraphQLTypeRef],
) -> Result<()> {
    let declared: HashSet<&str> = interfaces
        .iter()
        .map(|interface_ref| interface_ref.name())
        .collect();

    for interface_ref in interfaces {
        let Ok(interface_type) = interface_ref.try_deref(schema) else {
            continue;
        };
        let Some(interface) = interface_type.as_interface() else {
            return Err(TypeValidationError::ImplementsNonInterfaceType {
                type_name: type_name.to_string(),
                non_interface_type_name: interface_type.name().to_string(),
            });
        };

        // Transitive interfaces must be declared explicitly.
        for transitive_ref in interface.interfaces() {
            if !declared.contains(transitive_ref.name()) {
                return Err(TypeValidationError::MissingTransitiveInterface {
                    type_name: type_name.to_string(),
                    interface_name: interface.name().to_string(),
                    transitive_name: transitive_ref.name().to_string(),
                });
            }
        }

        for interface_field in interface.fields().values() {
            let Some(field) = fields.get(interface_field.name()) else {
                return Err(TypeValidationError::MissingInterfaceSpecifiedField {
                    type_name: type_name.to_string(),
                    interface_name: interface.name().to_string(),
                    field_name: interface_field.name().to_string(),
                });
            };

            // Field types are covariant.
            if !is_sub_type_of(
                schema,
                field.type_annotation(),
                interface_field.type_annotation(),
            ) {
                return Err(TypeValidationError::InvalidInterfaceSpecifiedFieldType {
                    type_name: type_name.to_string(),
                    interface_name: interface.name().to_string(),
                    field_name: field.name().to_string(),
                    expected_field_type: interface_field.type_annotation().clone(),
                    actual_field_type: field.type_annotation().clone(),
                });
            }

            // Argument types are invariant.
            for interface_argument in interface_field.arguments().values() {
                let Some(argument) = field.argument(interface_argument.name()) else {
                    return Err(
                        TypeValidationError::MissingInterfaceSpecifiedFieldArgument {
                            type_name: type_name.to_string(),
                            interface_name: interface.name().to_string(),
                            field_name: field.name().to_string(),
                            argument_name: interface_argument.name().to_string(),
                        },
                    );
                };
                if argument.type_annotation() != interface_argument.type_annotation() {
                    return Err(
                        TypeValidationError::InvalidInterfaceSpecifiedFieldArgumentType {
                            type_name: type_name.to_string(),
                            interface_name: interface.name().to_string(),
                            field_name: field.name().to_string(),
                            argument_name: interface_argument.name().to_string(),
                            expected_argument_type: interface_argument
                                .type_annotation()
                                .clone(),
                            actual_argument_type: argument.type_annotation().clone(),
                        },
                    );
                }
            }

            // Extra arguments are fine as long as they're optional.
            for argument in field.arguments().values() {
                if interface_field.argument(argument.name()).is_none()
                    && argument.is_required()
                {
                    return Err(
                        TypeValidationError::RequiredAdditionalArgumentOnInterfaceSpecifiedField {
                            type_name: type_name.to_string(),
                            interface_name: interface.name().to_string(),
                            field_name: field.name().to_string(),
                            argument_name: argument.name().to_string(),
                        },
                    );
                }
            }
        }
    }

    Ok(())
}
