use crate::ast;
use crate::error::GraphQLError;
use crate::types::DirectiveLocation;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// Every directive must be defined by the schema and used in a location its
/// definition allows.
#[derive(Default)]
pub struct KnownDirectives;
impl ValidationRule for KnownDirectives {
    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        directive: &ast::Directive,
        location: DirectiveLocation,
    ) {
        let Some(directive_def) = ctx.schema().directive_named(directive.name.as_str()) else {
            ctx.report_error(
                GraphQLError::new(format!("Unknown directive \"@{}\".", directive.name))
                    .at(directive.position.into()),
            );
            return;
        };

        if !directive_def.locations().contains(&location) {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Directive \"@{}\" may not be used on {location}.",
                    directive.name,
                ))
                .at(directive.position.into()),
            );
        }
    }
}
