use crate::coerce::suggestions::did_you_mean;
use crate::coerce::suggestions::suggestion_list;
use crate::error::PathSegment;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;

/// One coercion failure, with the path from the root input value to the
/// offending position.
#[derive(Clone, Debug, PartialEq)]
pub struct CoercionError {
    pub message: String,
    pub path: Vec<PathSegment>,
}
impl CoercionError {
    fn new(message: String, path: &[PathSegment]) -> Self {
        Self {
            message,
            path: path.to_vec(),
        }
    }

    /// Render the path as `value.0.name` for inclusion in messages.
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(|segment| match segment {
                PathSegment::Field(name) => name.clone(),
                PathSegment::Index(index) => index.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Coerce an external (host) input value to the given input type.
///
/// Returns either a pure value or a non-empty error list; list items and
/// input-object fields accumulate errors rather than failing fast.
pub fn coerce_input_value(
    value: &HostValue,
    annotation: &TypeAnnotation,
    schema: &Schema,
) -> Result<HostValue, Vec<CoercionError>> {
    let mut errors = vec![];
    let mut path = vec![];
    let coerced = coerce_impl(value, annotation, schema, &mut path, &mut errors);
    match coerced {
        Some(coerced) if errors.is_empty() => Ok(coerced),
        _ => Err(errors),
    }
}

fn coerce_impl(
    value: &HostValue,
    annotation: &TypeAnnotation,
    schema: &Schema,
    path: &mut Vec<PathSegment>,
    errors: &mut Vec<CoercionError>,
) -> Option<HostValue> {
    if value.is_null() {
        if annotation.nullable() {
            return Some(HostValue::Null);
        }
        errors.push(CoercionError::new(
            format!("Expected non-nullable type \"{annotation}\" not to be null."),
            path,
        ));
        return None;
    }

    match annotation {
        TypeAnnotation::List { inner, .. } => match value {
            HostValue::List(items) => {
                let mut coerced_items = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    path.push(PathSegment::Index(index));
                    if let Some(coerced) = coerce_impl(item, inner, schema, path, errors) {
                        coerced_items.push(coerced);
                    }
                    path.pop();
                }
                errors.is_empty().then_some(HostValue::List(coerced_items))
            }
            // A non-iterable value coerces as a list of one.
            single => {
                let coerced = coerce_impl(single, inner, schema, path, errors)?;
                Some(HostValue::List(vec![coerced]))
            }
        },

        TypeAnnotation::Named { type_ref, .. } => {
            let named_type = match type_ref.try_deref(schema) {
                Ok(named_type) => named_type,
                Err(_) => {
                    errors.push(CoercionError::new(
                        format!("Unknown type \"{}\".", type_ref.name()),
                        path,
                    ));
                    return None;
                }
            };
            coerce_named(value, &named_type, schema, path, errors)
        }
    }
}

fn coerce_named(
    value: &HostValue,
    named_type: &GraphQLType,
    schema: &Schema,
    path: &mut Vec<PathSegment>,
    errors: &mut Vec<CoercionError>,
) -> Option<HostValue> {
    match named_type {
        GraphQLType::Scalar(scalar_type) => match scalar_type.parse_value(value) {
            Ok(coerced) => Some(coerced),
            Err(cause) => {
                errors.push(CoercionError::new(
                    format!("Expected type \"{}\". {cause}", scalar_type.name()),
                    path,
                ));
                None
            }
        },

        GraphQLType::Enum(enum_type) => {
            let variant_name = match value {
                HostValue::Str(name) | HostValue::Enum(name) => Some(name.as_str()),
                _ => None,
            };
            if let Some(variant) = variant_name.and_then(|name| enum_type.variant(name)) {
                return Some(variant.payload().clone());
            }

            let input = variant_name.map(str::to_string).unwrap_or_else(|| {
                format!("{value:?}")
            });
            let suggestions = suggestion_list(
                &input,
                enum_type.variants().keys().cloned(),
            );
            errors.push(CoercionError::new(
                format!(
                    "Value \"{input}\" does not exist in \"{}\" enum.{}",
                    enum_type.name(),
                    did_you_mean(Some("the enum value"), &suggestions),
                ),
                path,
            ));
            None
        }

        GraphQLType::InputObject(input_object_type) => {
            let HostValue::Object(fields) = value else {
                errors.push(CoercionError::new(
                    format!(
                        "Expected type \"{}\" to be an object.",
                        input_object_type.name(),
                    ),
                    path,
                ));
                return None;
            };

            let mut coerced_fields = IndexMap::new();
            for input_field in input_object_type.fields().values() {
                match fields.get(input_field.name()) {
                    Some(field_value) => {
                        path.push(PathSegment::Field(input_field.name().to_string()));
                        if let Some(coerced) = coerce_impl(
                            field_value,
                            input_field.type_annotation(),
                            schema,
                            path,
                            errors,
                        ) {
                            coerced_fields
                                .insert(input_field.name().to_string(), coerced);
                        }
                        path.pop();
                    }
                    None => {
                        if let Some(default) = input_field.default_value() {
                            if let Some(coerced) = crate::coerce::coerce_literal(
                                default,
                                input_field.type_annotation(),
                                schema,
                                &IndexMap::new(),
                            ) {
                                coerced_fields
                                    .insert(input_field.name().to_string(), coerced);
                            }
                        } else if !input_field.type_annotation().nullable() {
                            errors.push(CoercionError::new(
                                format!(
                                    "Field \"{}\" of required type \"{}\" was not provided.",
                                    input_field.name(),
                                    input_field.type_annotation(),
                                ),
                                path,
                            ));
                        }
                    }
                }
            }

            for field_name in fields.keys() {
                if input_object_type.field(field_name).is_none() {
                    let suggestions = suggestion_list(
                        field_name,
                        input_object_type.fields().keys().cloned(),
                    );
                    errors.push(CoercionError::new(
                        format!(
                            "Field \"{field_name}\" is not defined by type \"{}\".{}",
                            input_object_type.name(),
                            did_you_mean(None, &suggestions),
                        ),
                        path,
                    ));
                }
            }

            errors
                .is_empty()
                .then_some(HostValue::Object(coerced_fields))
        }

        output_only => {
            errors.push(CoercionError::new(
                format!(
                    "Type \"{}\" is not an input type.",
                    output_only.name(),
                ),
                path,
            ));
            None
        }
    }
}
