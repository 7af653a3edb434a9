use crate::ast;
use crate::coerce::suggestions::did_you_mean;
use crate::coerce::suggestions::suggestion_list;
use crate::error::GraphQLError;
use crate::validation::ArgumentOwner;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// Every supplied argument must be declared on its field or directive.
#[derive(Default)]
pub struct KnownArgumentNames;
impl ValidationRule for KnownArgumentNames {
    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        owner: ArgumentOwner<'_>,
        name: &str,
        _value: &ast::Value,
        position: ast::AstPos,
    ) {
        if ctx.type_info().argument_def().is_some() {
            return;
        }

        match owner {
            ArgumentOwner::Field(field) => {
                let Some(field_def) = ctx.type_info().field_def() else {
                    // The field itself is unknown; FieldsOnCorrectType owns
                    // that report.
                    return;
                };
                let Some(parent_type) = ctx.type_info().parent_type() else {
                    return;
                };
                let suggestions =
                    suggestion_list(name, field_def.arguments().keys().cloned());
                let message = format!(
                    "Unknown argument \"{name}\" on field \"{}.{}\".{}",
                    parent_type.name(),
                    field.name,
                    did_you_mean(None, &suggestions),
                );
                ctx.report_error(GraphQLError::new(message).at(position.into()));
            }
            ArgumentOwner::Directive(directive) => {
                let Some(directive_def) =
                    ctx.schema().directive_named(directive.name.as_str())
                else {
                    // Unknown directive; KnownDirectives owns that report.
                    return;
                };
                let suggestions =
                    suggestion_list(name, directive_def.arguments().keys().cloned());
                let message = format!(
                    "Unknown argument \"{name}\" on directive \"@{}\".{}",
                    directive.name,
                    did_you_mean(None, &suggestions),
                );
                ctx.report_error(GraphQLError::new(message).at(position.into()));
            }
        }
    }
}
