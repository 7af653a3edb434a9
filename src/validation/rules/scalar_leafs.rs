use crate::ast;
use crate::error::GraphQLError;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// Leaf fields must not have sub-selections; composite fields must.
#[derive(Default)]
pub struct ScalarLeafs;
impl ValidationRule for ScalarLeafs {
    fn enter_field(&mut self, ctx: &mut ValidationContext<'_>, field: &ast::Field) {
        let Some(field_def) = ctx.type_info().field_def() else {
            return;
        };
        let annotation = field_def.type_annotation().clone();
        let Some(named_type) = annotation.innermost_named_type(ctx.schema()) else {
            return;
        };

        let has_selection = !field.selection_set.items.is_empty();
        if named_type.is_leaf() && has_selection {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Field \"{}\" must not have a selection since type \"{annotation}\" \
                    has no subfields.",
                    field.name,
                ))
                .at(field.position.into()),
            );
        } else if named_type.is_composite() && !has_selection {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Field \"{}\" of type \"{annotation}\" must have a selection of \
                    subfields. Did you mean \"{} {{ ... }}\"?",
                    field.name, field.name,
                ))
                .at(field.position.into()),
            );
        }
    }
}
