use crate::ast;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use std::collections::HashSet;

/// Every named operation in a document must have a distinct name.
#[derive(Default)]
pub struct UniqueOperationNames {
    seen: HashSet<String>,
}
impl ValidationRule for UniqueOperationNames {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        operation: &ast::OperationDefinition,
    ) {
        let Some(name) = ast::operation_name(operation) else {
            return;
        };
        if !self.seen.insert(name.to_string()) {
            ctx.report_error(
                GraphQLError::new(format!(
                    "There can be only one operation named \"{name}\".",
                ))
                .at(ast::operation_position(operation).into()),
            );
        }
    }
}
