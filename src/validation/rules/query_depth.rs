use crate::ast;
use crate::error::GraphQLError;
use crate::validation::rules::LimitRuleError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use crate::validation::ValidationRuleFactory;
use std::sync::Arc;

/// Rejects operations whose field nesting exceeds a host-chosen maximum.
///
/// Fragment spreads count at their expansion depth. Introspection subtrees
/// (fields spelled with a `__` prefix) are excluded, so schema tooling
/// queries are not penalized. Constructed with `-1`, the rule is disabled.
#[derive(Debug)]
pub struct QueryDepth {
    max_depth: i64,
}
impl QueryDepth {
    pub fn new(max_depth: i64) -> Result<Self, LimitRuleError> {
        if max_depth < -1 {
            return Err(LimitRuleError);
        }
        Ok(Self { max_depth })
    }

    pub fn factory(max_depth: i64) -> Result<ValidationRuleFactory, LimitRuleError> {
        Self::new(max_depth)?;
        Ok(Arc::new(move || {
            Box::new(Self { max_depth }) as Box<dyn ValidationRule>
        }))
    }

    fn selection_set_depth(
        ctx: &ValidationContext<'_>,
        selection_set: &ast::SelectionSet,
        spread_stack: &mut Vec<String>,
    ) -> usize {
        let mut depth = 0;
        for selection in &selection_set.items {
            let selection_depth = match selection {
                ast::Selection::Field(field) => {
                    if field.name.starts_with("__") {
                        0
                    } else {
                        1 + Self::selection_set_depth(
                            ctx,
                            &field.selection_set,
                            spread_stack,
                        )
                    }
                }
                ast::Selection::InlineFragment(inline) => {
                    Self::selection_set_depth(ctx, &inline.selection_set, spread_stack)
                }
                ast::Selection::FragmentSpread(spread) => {
                    if spread_stack.contains(&spread.fragment_name) {
                        // Cyclic spreads are NoFragmentCycles' problem.
                        0
                    } else {
                        match ctx.fragment(spread.fragment_name.as_str()) {
                            Some(fragment) => {
                                spread_stack.push(spread.fragment_name.clone());
                                let fragment_depth = Self::selection_set_depth(
                                    ctx,
                                    &fragment.selection_set,
                                    spread_stack,
                                );
                                spread_stack.pop();
                                fragment_depth
                            }
                            None => 0,
                        }
                    }
                }
            };
            depth = depth.max(selection_depth);
        }
        depth
    }
}
impl ValidationRule for QueryDepth {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        operation: &ast::OperationDefinition,
    ) {
        if self.max_depth == -1 {
            return;
        }

        let mut spread_stack = vec![];
        let depth = Self::selection_set_depth(
            ctx,
            ast::operation_selection_set(operation),
            &mut spread_stack,
        );
        if depth as i64 > self.max_depth {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Max query depth should be {} but got {depth}.",
                    self.max_depth,
                ))
                .at(ast::operation_position(operation).into()),
            );
        }
    }
}
