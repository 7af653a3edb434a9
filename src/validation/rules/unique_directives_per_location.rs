use crate::ast;
use crate::error::GraphQLError;
use crate::types::DirectiveLocation;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use std::collections::HashSet;

/// A non-repeatable directive may appear at most once per location.
///
/// The walker visits a node's directive list immediately after entering the
/// node, so resetting on every directive-bearing node gives exactly
/// per-location grouping.
#[derive(Default)]
pub struct UniqueDirectivesPerLocation {
    seen_at_location: HashSet<String>,
}
impl ValidationRule for UniqueDirectivesPerLocation {
    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        _operation: &ast::OperationDefinition,
    ) {
        self.seen_at_location.clear();
    }

    fn enter_field(&mut self, _ctx: &mut ValidationContext<'_>, _field: &ast::Field) {
        self.seen_at_location.clear();
    }

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        _spread: &ast::FragmentSpread,
    ) {
        self.seen_at_location.clear();
    }

    fn enter_inline_fragment(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        _inline: &ast::InlineFragment,
    ) {
        self.seen_at_location.clear();
    }

    fn enter_fragment_definition(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        _fragment: &ast::FragmentDefinition,
    ) {
        self.seen_at_location.clear();
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        directive: &ast::Directive,
        _location: DirectiveLocation,
    ) {
        let repeatable = ctx
            .schema()
            .directive_named(directive.name.as_str())
            .map(|def| def.is_repeatable())
            .unwrap_or(false);
        if repeatable {
            return;
        }
        if !self.seen_at_location.insert(directive.name.clone()) {
            ctx.report_error(
                GraphQLError::new(format!(
                    "The directive \"@{}\" can only be used once at this location.",
                    directive.name,
                ))
                .at(directive.position.into()),
            );
        }
    }
}
