use crate::ast;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// A subscription operation's top-level selection set must resolve to
/// exactly one field after fragment expansion, `__typename` excluded.
#[derive(Default)]
pub struct SingleFieldSubscriptions;
impl SingleFieldSubscriptions {
    fn count_root_fields(
        ctx: &ValidationContext<'_>,
        selection_set: &ast::SelectionSet,
        expanded: &mut Vec<String>,
        seen_fragments: &mut Vec<String>,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::Selection::Field(field) => {
                    if field.name != "__typename" {
                        expanded.push(field.name.clone());
                    }
                }
                ast::Selection::InlineFragment(inline) => {
                    Self::count_root_fields(
                        ctx,
                        &inline.selection_set,
                        expanded,
                        seen_fragments,
                    );
                }
                ast::Selection::FragmentSpread(spread) => {
                    if seen_fragments.contains(&spread.fragment_name) {
                        continue;
                    }
                    seen_fragments.push(spread.fragment_name.clone());
                    if let Some(fragment) = ctx.fragment(spread.fragment_name.as_str()) {
                        Self::count_root_fields(
                            ctx,
                            &fragment.selection_set,
                            expanded,
                            seen_fragments,
                        );
                    }
                }
            }
        }
    }
}
impl ValidationRule for SingleFieldSubscriptions {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        operation: &ast::OperationDefinition,
    ) {
        let ast::OperationDefinition::Subscription(subscription) = operation else {
            return;
        };

        let mut expanded = vec![];
        let mut seen_fragments = vec![];
        Self::count_root_fields(
            ctx,
            &subscription.selection_set,
            &mut expanded,
            &mut seen_fragments,
        );

        if expanded.len() > 1 {
            let message = match &subscription.name {
                Some(name) => format!(
                    "Subscription \"{name}\" must select only one top level field.",
                ),
                None => "Anonymous Subscription must select only one top level field."
                    .to_string(),
            };
            ctx.report_error(GraphQLError::new(message).at(subscription.position.into()));
        }
    }
}
