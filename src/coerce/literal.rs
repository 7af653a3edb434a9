use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use crate::value::Value;
use indexmap::IndexMap;

/// Coerce a document literal to the given input type, resolving variable
/// references through `variables` (already-coerced values).
///
/// Returns `None` when the literal is invalid for the type or references a
/// variable that has no value; the validator owns reporting those cases with
/// positions attached.
pub fn coerce_literal(
    literal: &Value,
    annotation: &TypeAnnotation,
    schema: &Schema,
    variables: &IndexMap<String, HostValue>,
) -> Option<HostValue> {
    if let Value::Variable(var_name) = literal {
        // A variable that is absent (or explicitly undefined) provides no
        // value at all; only an explicit null literal produces null.
        let value = variables.get(var_name)?;
        if value.is_null() && !annotation.nullable() {
            return None;
        }
        return Some(value.clone());
    }

    if literal.is_null() {
        return annotation.nullable().then_some(HostValue::Null);
    }

    match annotation {
        TypeAnnotation::List { inner, .. } => match literal {
            Value::List(items) => {
                let mut coerced_items = Vec::with_capacity(items.len());
                for item in items {
                    // An unset variable inside a list position becomes null
                    // when the item type allows it.
                    match coerce_literal(item, inner, schema, variables) {
                        Some(coerced) => coerced_items.push(coerced),
                        None => {
                            if matches!(item, Value::Variable(_)) && inner.nullable() {
                                coerced_items.push(HostValue::Null);
                            } else {
                                return None;
                            }
                        }
                    }
                }
                Some(HostValue::List(coerced_items))
            }
            // A non-list literal coerces as a list of one.
            single => {
                let coerced = coerce_literal(single, inner, schema, variables)?;
                Some(HostValue::List(vec![coerced]))
            }
        },

        TypeAnnotation::Named { type_ref, .. } => {
            let named_type = type_ref.try_deref(schema).ok()?;
            coerce_named_literal(literal, &named_type, schema, variables)
        }
    }
}

fn coerce_named_literal(
    literal: &Value,
    named_type: &GraphQLType,
    schema: &Schema,
    variables: &IndexMap<String, HostValue>,
) -> Option<HostValue> {
    match named_type {
        GraphQLType::Scalar(scalar_type) => scalar_type.parse_literal(literal).ok(),

        GraphQLType::Enum(enum_type) => match literal {
            Value::Enum(variant_name) => enum_type
                .variant(variant_name)
                .map(|variant| variant.payload().clone()),
            _ => None,
        },

        GraphQLType::InputObject(input_object_type) => {
            let Value::Object(literal_fields) = literal else {
                return None;
            };

            // Extra literal fields are an error.
            for field_name in literal_fields.keys() {
                if input_object_type.field(field_name).is_none() {
                    return None;
                }
            }

            // Field order follows the type's declared order, not the
            // literal's.
            let mut coerced_fields = IndexMap::new();
            for input_field in input_object_type.fields().values() {
                match literal_fields.get(input_field.name()) {
                    Some(field_literal) => {
                        match coerce_literal(
                            field_literal,
                            input_field.type_annotation(),
                            schema,
                            variables,
                        ) {
                            Some(coerced) => {
                                coerced_fields
                                    .insert(input_field.name().to_string(), coerced);
                            }
                            None if matches!(field_literal, Value::Variable(_)) => {
                                // An unset variable leaves the field unset;
                                // fall back to the default if there is one.
                                if let Some(default) = input_field.default_value() {
                                    let coerced = coerce_literal(
                                        default,
                                        input_field.type_annotation(),
                                        schema,
                                        variables,
                                    )?;
                                    coerced_fields
                                        .insert(input_field.name().to_string(), coerced);
                                } else if !input_field.type_annotation().nullable() {
                                    return None;
                                }
                            }
                            None => return None,
                        }
                    }
                    None => {
                        if let Some(default) = input_field.default_value() {
                            let coerced = coerce_literal(
                                default,
                                input_field.type_annotation(),
                                schema,
                                variables,
                            )?;
                            coerced_fields
                                .insert(input_field.name().to_string(), coerced);
                        } else if !input_field.type_annotation().nullable() {
                            return None;
                        }
                    }
                }
            }
            Some(HostValue::Object(coerced_fields))
        }

        _ => None,
    }
}
