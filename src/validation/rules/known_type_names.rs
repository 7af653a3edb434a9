use crate::ast;
use crate::coerce::suggestions::did_you_mean;
use crate::coerce::suggestions::suggestion_list;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// Every type name referenced by a document (fragment conditions and
/// variable definitions) must be defined by the schema.
#[derive(Default)]
pub struct KnownTypeNames;
impl KnownTypeNames {
    fn check(&self, ctx: &mut ValidationContext<'_>, type_name: &str, position: ast::AstPos) {
        if ctx.schema().has_type(type_name) {
            return;
        }
        let mut known: Vec<String> = ctx
            .schema()
            .types()
            .values()
            .filter(|known_type| !known_type.is_introspection())
            .map(|known_type| known_type.name().to_string())
            .collect();
        known.sort();
        let suggestions = suggestion_list(type_name, known);
        ctx.report_error(
            GraphQLError::new(format!(
                "Unknown type \"{type_name}\".{}",
                did_you_mean(None, &suggestions),
            ))
            .at(position.into()),
        );
    }
}
impl ValidationRule for KnownTypeNames {
    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        variable_definition: &ast::VariableDefinition,
        _operation: &ast::OperationDefinition,
    ) {
        let mut var_type = &variable_definition.var_type;
        loop {
            match var_type {
                ast::Type::NamedType(name) => {
                    self.check(ctx, name, variable_definition.position);
                    break;
                }
                ast::Type::ListType(inner) | ast::Type::NonNullType(inner) => {
                    var_type = inner;
                }
            }
        }
    }

    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        fragment: &ast::FragmentDefinition,
    ) {
        let ast::TypeCondition::On(condition_name) = &fragment.type_condition;
        self.check(ctx, condition_name, fragment.position);
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        inline: &ast::InlineFragment,
    ) {
        if let Some(ast::TypeCondition::On(condition_name)) = &inline.type_condition {
            self.check(ctx, condition_name, inline.position);
        }
    }
}
