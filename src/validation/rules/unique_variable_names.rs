use crate::ast;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use std::collections::HashSet;

/// No operation may declare two variables with the same name.
#[derive(Default)]
pub struct UniqueVariableNames {
    seen: HashSet<String>,
}
impl ValidationRule for UniqueVariableNames {
    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        _operation: &ast::OperationDefinition,
    ) {
        self.seen.clear();
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        variable_definition: &ast::VariableDefinition,
        _operation: &ast::OperationDefinition,
    ) {
        if !self.seen.insert(variable_definition.name.clone()) {
            ctx.report_error(
                GraphQLError::new(format!(
                    "There can be only one variable named \"${}\".",
                    variable_definition.name,
                ))
                .at(variable_definition.position.into()),
            );
        }
    }
}
