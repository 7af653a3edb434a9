use crate::ast;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use std::collections::HashSet;

/// Every fragment definition in a document must have a distinct name.
#[derive(Default)]
pub struct UniqueFragmentNames {
    seen: HashSet<String>,
}
impl ValidationRule for UniqueFragmentNames {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        fragment: &ast::FragmentDefinition,
    ) {
        if !self.seen.insert(fragment.name.clone()) {
            ctx.report_error(
                GraphQLError::new(format!(
                    "There can be only one fragment named \"{}\".",
                    fragment.name,
                ))
                .at(fragment.position.into()),
            );
        }
    }
}
