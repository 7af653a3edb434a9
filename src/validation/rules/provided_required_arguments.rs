use crate::ast;
use crate::error::GraphQLError;
use crate::types::DirectiveLocation;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// Every required argument (non-null type, no default) must be supplied,
/// on fields and on directives alike.
#[derive(Default)]
pub struct ProvidedRequiredArguments;
impl ValidationRule for ProvidedRequiredArguments {
    fn leave_field(&mut self, ctx: &mut ValidationContext<'_>, field: &ast::Field) {
        let Some(field_def) = ctx.type_info().field_def() else {
            return;
        };

        let mut missing = vec![];
        for argument_def in field_def.arguments().values() {
            if !argument_def.is_required() {
                continue;
            }
            let supplied = field
                .arguments
                .iter()
                .any(|(name, _)| name == argument_def.name());
            if !supplied {
                missing.push((
                    argument_def.name().to_string(),
                    argument_def.type_annotation().to_string(),
                ));
            }
        }

        for (argument_name, type_string) in missing {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Field \"{}\" argument \"{argument_name}\" of type \
                    \"{type_string}\" is required, but it was not provided.",
                    field.name,
                ))
                .at(field.position.into()),
            );
        }
    }

    fn leave_directive(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        directive: &ast::Directive,
        _location: DirectiveLocation,
    ) {
        let Some(directive_def) = ctx.schema().directive_named(directive.name.as_str()) else {
            return;
        };

        let mut missing = vec![];
        for argument_def in directive_def.arguments().values() {
            if !argument_def.is_required() {
                continue;
            }
            let supplied = directive
                .arguments
                .iter()
                .any(|(name, _)| name == argument_def.name());
            if !supplied {
                missing.push((
                    argument_def.name().to_string(),
                    argument_def.type_annotation().to_string(),
                ));
            }
        }

        for (argument_name, type_string) in missing {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Directive \"@{}\" argument \"{argument_name}\" of type \
                    \"{type_string}\" is required, but it was not provided.",
                    directive.name,
                ))
                .at(directive.position.into()),
            );
        }
    }
}
