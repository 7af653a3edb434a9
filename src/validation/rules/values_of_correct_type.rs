use crate::ast;
use crate::coerce::suggestions::did_you_mean;
use crate::coerce::suggestions::suggestion_list;
use crate::error::GraphQLError;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use crate::validation::ArgumentOwner;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// Literal values must be coercible to their location's declared input
/// type. Runs the coercion-equivalent checks over argument values and
/// variable defaults, reporting granular errors with suggestions.
///
/// Variable references are skipped here; VariablesInAllowedPosition owns
/// their compatibility.
#[derive(Default)]
pub struct ValuesOfCorrectType;
impl ValidationRule for ValuesOfCorrectType {
    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        _owner: ArgumentOwner<'_>,
        _name: &str,
        value: &ast::Value,
        position: ast::AstPos,
    ) {
        let Some(annotation) = ctx.type_info().input_type().cloned() else {
            return;
        };
        check_value(ctx, value, &annotation, position);
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        variable_definition: &ast::VariableDefinition,
        _operation: &ast::OperationDefinition,
    ) {
        if let Some(default_value) = &variable_definition.default_value {
            let annotation = TypeAnnotation::from_ast_type(&variable_definition.var_type);
            check_value(ctx, default_value, &annotation, variable_definition.position);
        }
    }
}

fn check_value(
    ctx: &mut ValidationContext<'_>,
    value: &ast::Value,
    annotation: &TypeAnnotation,
    position: ast::AstPos,
) {
    // The value of a variable usage is checked at the usage site by the
    // variable rules, not here.
    if matches!(value, ast::Value::Variable(_)) {
        return;
    }

    if matches!(value, ast::Value::Null) {
        if !annotation.nullable() {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Expected value of type \"{annotation}\", found null.",
                ))
                .at(position.into()),
            );
        }
        return;
    }

    match annotation {
        TypeAnnotation::List { inner, .. } => match value {
            ast::Value::List(items) => {
                for item in items {
                    check_value(ctx, item, inner, position);
                }
            }
            // The list-of-one rule: a single value checks against the item
            // type.
            single => check_value(ctx, single, inner, position),
        },

        TypeAnnotation::Named { type_ref, .. } => {
            let Ok(named_type) = type_ref.try_deref(ctx.schema()) else {
                return;
            };
            check_named_value(ctx, value, &named_type, position);
        }
    }
}

fn check_named_value(
    ctx: &mut ValidationContext<'_>,
    value: &ast::Value,
    named_type: &GraphQLType,
    position: ast::AstPos,
) {
    match named_type {
        GraphQLType::Scalar(scalar_type) => {
            let literal = crate::value::Value::from_ast(value);
            if scalar_type.parse_literal(&literal).is_err() {
                ctx.report_error(
                    GraphQLError::new(format!(
                        "Expected value of type \"{}\", found {}.",
                        scalar_type.name(),
                        ast::print_value(value),
                    ))
                    .at(position.into()),
                );
            }
        }

        GraphQLType::Enum(enum_type) => match value {
            ast::Value::Enum(variant_name) => {
                if enum_type.variant(variant_name).is_none() {
                    let suggestions = suggestion_list(
                        variant_name,
                        enum_type.variants().keys().cloned(),
                    );
                    ctx.report_error(
                        GraphQLError::new(format!(
                            "Value \"{variant_name}\" does not exist in \"{}\" enum.{}",
                            enum_type.name(),
                            did_you_mean(Some("the enum value"), &suggestions),
                        ))
                        .at(position.into()),
                    );
                }
            }
            other => {
                ctx.report_error(
                    GraphQLError::new(format!(
                        "Enum \"{}\" cannot represent non-enum value: {}.",
                        enum_type.name(),
                        ast::print_value(other),
                    ))
                    .at(position.into()),
                );
            }
        },

        GraphQLType::InputObject(input_object_type) => {
            let ast::Value::Object(literal_fields) = value else {
                ctx.report_error(
                    GraphQLError::new(format!(
                        "Expected value of type \"{}\", found {}.",
                        input_object_type.name(),
                        ast::print_value(value),
                    ))
                    .at(position.into()),
                );
                return;
            };

            for input_field in input_object_type.fields().values() {
                let provided = literal_fields.contains_key(input_field.name());
                if !provided && input_field.is_required() {
                    ctx.report_error(
                        GraphQLError::new(format!(
                            "Field \"{}.{}\" of required type \"{}\" was not provided.",
                            input_object_type.name(),
                            input_field.name(),
                            input_field.type_annotation(),
                        ))
                        .at(position.into()),
                    );
                }
            }

            for (field_name, field_value) in literal_fields {
                match input_object_type.field(field_name) {
                    Some(input_field) => {
                        let field_annotation = input_field.type_annotation().clone();
                        check_value(ctx, field_value, &field_annotation, position);
                    }
                    None => {
                        let suggestions = suggestion_list(
                            field_name,
                            input_object_type.fields().keys().cloned(),
                        );
                        ctx.report_error(
                            GraphQLError::new(format!(
                                "Field \"{field_name}\" is not defined by type \"{}\".{}",
                                input_object_type.name(),
                                did_you_mean(None, &suggestions),
                            ))
                            .at(position.into()),
                        );
                    }
                }
            }
        }

        // Output-only location types are a schema bug caught elsewhere.
        _ => {}
    }
}
