use crate::ast;
use crate::error::GraphQLError;
use crate::types::DirectiveLocation;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use std::collections::HashSet;

/// No field selection or directive usage may supply the same argument name
/// twice.
#[derive(Default)]
pub struct UniqueArgumentNames;
impl UniqueArgumentNames {
    fn check_arguments(
        ctx: &mut ValidationContext<'_>,
        arguments: &[(String, ast::Value)],
        position: ast::AstPos,
    ) {
        let mut seen = HashSet::new();
        for (name, _) in arguments {
            if !seen.insert(name.as_str()) {
                ctx.report_error(
                    GraphQLError::new(format!(
                        "There can be only one argument named \"{name}\".",
                    ))
                    .at(position.into()),
                );
            }
        }
    }
}
impl ValidationRule for UniqueArgumentNames {
    fn enter_field(&mut self, ctx: &mut ValidationContext<'_>, field: &ast::Field) {
        Self::check_arguments(ctx, &field.arguments, field.position);
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        directive: &ast::Directive,
        _location: DirectiveLocation,
    ) {
        Self::check_arguments(ctx, &directive.arguments, directive.position);
    }
}
