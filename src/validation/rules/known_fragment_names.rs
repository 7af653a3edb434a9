use crate::ast;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// Every fragment spread must name a fragment defined in the document.
#[derive(Default)]
pub struct KnownFragmentNames;
impl ValidationRule for KnownFragmentNames {
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        spread: &ast::FragmentSpread,
    ) {
        if ctx.fragment(spread.fragment_name.as_str()).is_none() {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Unknown fragment \"{}\".",
                    spread.fragment_name,
                ))
                .at(spread.position.into()),
            );
        }
    }
}
