use crate::ast;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// An anonymous operation must be the only operation in the document.
#[derive(Default)]
pub struct LoneAnonymousOperation {
    operation_count: usize,
}
impl ValidationRule for LoneAnonymousOperation {
    fn enter_document(&mut self, _ctx: &mut ValidationContext<'_>, document: &ast::Document) {
        self.operation_count = document
            .definitions
            .iter()
            .filter(|def| matches!(def, ast::Definition::Operation(_)))
            .count();
    }

    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        operation: &ast::OperationDefinition,
    ) {
        if ast::operation_name(operation).is_none() && self.operation_count > 1 {
            ctx.report_error(
                GraphQLError::new("This anonymous operation must be the only defined operation.")
                    .at(ast::operation_position(operation).into()),
            );
        }
    }
}
