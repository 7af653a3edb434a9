use crate::ast;
use crate::error::GraphQLError;
use crate::types::TypeAnnotation;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// Variables may only be declared with input types.
#[derive(Default)]
pub struct VariablesAreInputTypes;
impl ValidationRule for VariablesAreInputTypes {
    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        variable_definition: &ast::VariableDefinition,
        _operation: &ast::OperationDefinition,
    ) {
        let annotation = TypeAnnotation::from_ast_type(&variable_definition.var_type);
        let Some(named_type) = annotation.innermost_named_type(ctx.schema()) else {
            // Unknown type name; KnownTypeNames owns that report.
            return;
        };
        if !named_type.is_input_type() {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Variable \"${}\" cannot be non-input type \"{annotation}\".",
                    variable_definition.name,
                ))
                .at(variable_definition.position.into()),
            );
        }
    }
}
