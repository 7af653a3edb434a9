use crate::ast;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// Fragments can only condition on composite types; conditioning on a leaf
/// or input type can never apply.
#[derive(Default)]
pub struct FragmentsOnCompositeTypes;
impl ValidationRule for FragmentsOnCompositeTypes {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        fragment: &ast::FragmentDefinition,
    ) {
        let ast::TypeCondition::On(condition_name) = &fragment.type_condition;
        let Some(condition_type) = ctx.schema().type_named(condition_name) else {
            return;
        };
        if !condition_type.is_composite() {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Fragment \"{}\" cannot condition on non composite type \"{condition_name}\".",
                    fragment.name,
                ))
                .at(fragment.position.into()),
            );
        }
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        inline: &ast::InlineFragment,
    ) {
        let Some(ast::TypeCondition::On(condition_name)) = &inline.type_condition else {
            return;
        };
        let Some(condition_type) = ctx.schema().type_named(condition_name) else {
            return;
        };
        if !condition_type.is_composite() {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Fragment cannot condition on non composite type \"{condition_name}\".",
                ))
                .at(inline.position.into()),
            );
        }
    }
}
