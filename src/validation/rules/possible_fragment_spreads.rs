use crate::ast;
use crate::error::GraphQLError;
use crate::schema::do_types_overlap;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use std::sync::Arc;

/// A fragment can only be spread where its type condition overlaps the
/// enclosing composite type; otherwise it can never apply.
#[derive(Default)]
pub struct PossibleFragmentSpreads;
impl ValidationRule for PossibleFragmentSpreads {
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        spread: &ast::FragmentSpread,
    ) {
        let Some(parent_type) = ctx.type_info().parent_type().map(Arc::clone) else {
            return;
        };
        let Some(fragment) = ctx.fragment(spread.fragment_name.as_str()) else {
            return;
        };
        let ast::TypeCondition::On(condition_name) = &fragment.type_condition;
        let Some(condition_type) = ctx.schema().type_named(condition_name) else {
            return;
        };
        if !condition_type.is_composite() || !parent_type.is_composite() {
            return;
        }
        if !do_types_overlap(ctx.schema(), &condition_type, &parent_type) {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Fragment \"{}\" cannot be spread here as objects of type \"{}\" \
                    can never be of type \"{condition_name}\".",
                    spread.fragment_name,
                    parent_type.name(),
                ))
                .at(spread.position.into()),
            );
        }
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        inline: &ast::InlineFragment,
    ) {
        // The walker already pushed the condition type; the spread site's
        // type is one level up.
        let Some(condition_type) = ctx.type_info().parent_type().map(Arc::clone) else {
            return;
        };
        let Some(ast::TypeCondition::On(condition_name)) = &inline.type_condition else {
            return;
        };
        let Some(outer_type) = ctx.type_info().grandparent_type().map(Arc::clone) else {
            return;
        };
        if !condition_type.is_composite() || !outer_type.is_composite() {
            return;
        }
        if !do_types_overlap(ctx.schema(), &condition_type, &outer_type) {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Fragment cannot be spread here as objects of type \"{}\" can \
                    never be of type \"{condition_name}\".",
                    outer_type.name(),
                ))
                .at(inline.position.into()),
            );
        }
    }
}
