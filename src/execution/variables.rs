use crate::ast;
use crate::coerce::coerce_input_value;
use crate::coerce::coerce_literal;
use crate::error::GraphQLError;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::TypeAnnotation;
use crate::value::Value;
use indexmap::IndexMap;

/// Coerce the request's raw variable values against the operation's declared
/// variable definitions.
///
/// Either every declared variable coerces cleanly, or the full error list is
/// returned and execution never starts. A variable that is absent from the
/// raw map falls back to its default if one is declared, errors if its type
/// is non-null, and otherwise stays unset.
pub(crate) fn coerce_variable_values(
    schema: &Schema,
    variable_definitions: &[ast::VariableDefinition],
    raw_values: &IndexMap<String, HostValue>,
) -> Result<IndexMap<String, HostValue>, Vec<GraphQLError>> {
    let mut coerced = IndexMap::new();
    let mut errors = vec![];

    for definition in variable_definitions {
        let variable_name = definition.name.as_str();
        let annotation = TypeAnnotation::from_ast_type(&definition.var_type);

        let Some(named_type) = annotation.innermost_named_type(schema) else {
            errors.push(
                GraphQLError::new(format!(
                    "Variable \"${variable_name}\" expected value of type \
                    \"{annotation}\" which cannot be used as an input type.",
                ))
                .at(definition.position.into()),
            );
            continue;
        };
        if !named_type.is_input_type() {
            errors.push(
                GraphQLError::new(format!(
                    "Variable \"${variable_name}\" expected value of type \
                    \"{annotation}\" which cannot be used as an input type.",
                ))
                .at(definition.position.into()),
            );
            continue;
        }

        match raw_values.get(variable_name) {
            None => {
                if let Some(default_literal) = &definition.default_value {
                    let default = Value::from_ast(default_literal);
                    if let Some(value) =
                        coerce_literal(&default, &annotation, schema, &IndexMap::new())
                    {
                        coerced.insert(variable_name.to_string(), value);
                    }
                } else if !annotation.nullable() {
                    errors.push(
                        GraphQLError::new(format!(
                            "Variable \"${variable_name}\" of required type \
                            \"{annotation}\" was not provided.",
                        ))
                        .at(definition.position.into()),
                    );
                }
                // Absent with no default and a nullable type: left unset.
            }
            Some(raw_value) => {
                match coerce_input_value(raw_value, &annotation, schema) {
                    Ok(value) => {
                        coerced.insert(variable_name.to_string(), value);
                    }
                    Err(coercion_errors) => {
                        for coercion_error in coercion_errors {
                            let at_path = if coercion_error.path.is_empty() {
                                String::new()
                            } else {
                                format!(
                                    " at \"{variable_name}.{}\"",
                                    coercion_error.path_string(),
                                )
                            };
                            errors.push(
                                GraphQLError::new(format!(
                                    "Variable \"${variable_name}\" got invalid value \
                                    {}{at_path}; {}",
                                    render_raw_value(raw_value),
                                    coercion_error.message,
                                ))
                                .at(definition.position.into()),
                            );
                        }
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(coerced)
    } else {
        Err(errors)
    }
}

/// Render a raw host value the way it would appear in a request body, for
/// variable coercion error messages.
fn render_raw_value(value: &HostValue) -> String {
    match serde_json::Value::try_from(value) {
        Ok(json) => json.to_string(),
        Err(_) => format!("<{}>", value.kind_str()),
    }
}
