use crate::ast;
use crate::coerce::suggestions::did_you_mean;
use crate::coerce::suggestions::suggestion_list;
use crate::error::GraphQLError;
use crate::types::GraphQLType;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;

/// Every field selection must exist on its parent composite type.
///
/// Suggestions prefer an inline-fragment rewrite onto a possible type that
/// does define the field, then fall back to similarly spelled field names.
#[derive(Default)]
pub struct FieldsOnCorrectType;
impl ValidationRule for FieldsOnCorrectType {
    fn enter_field(&mut self, ctx: &mut ValidationContext<'_>, field: &ast::Field) {
        let Some(parent_type) = ctx.type_info().parent_type() else {
            return;
        };
        if ctx.type_info().field_def().is_some() {
            return;
        }

        let parent_type = std::sync::Arc::clone(parent_type);
        let type_suggestions = suggested_type_names(ctx, &parent_type, field.name.as_str());
        let suggestion_text = if type_suggestions.is_empty() {
            let field_suggestions = match parent_type.fields() {
                Some(fields) => suggestion_list(field.name.as_str(), fields.keys().cloned()),
                None => vec![],
            };
            did_you_mean(None, &field_suggestions)
        } else {
            did_you_mean(Some("to use an inline fragment on"), &type_suggestions)
        };

        ctx.report_error(
            GraphQLError::new(format!(
                "Cannot query field \"{}\" on type \"{}\".{suggestion_text}",
                field.name,
                parent_type.name(),
            ))
            .at(field.position.into()),
        );
    }
}

/// For abstract parents, the possible types (and implemented interfaces)
/// that do define the field, as inline-fragment targets.
fn suggested_type_names(
    ctx: &ValidationContext<'_>,
    parent_type: &GraphQLType,
    field_name: &str,
) -> Vec<String> {
    if !parent_type.is_abstract() {
        return vec![];
    }

    let mut names = vec![];
    for possible in ctx.schema().possible_types(parent_type) {
        let Some(object_type) = possible.as_object() else {
            continue;
        };
        if object_type.field(field_name).is_some() {
            names.push(object_type.name().to_string());
        }
        for interface_ref in object_type.interfaces() {
            let Ok(interface_type) = interface_ref.try_deref(ctx.schema()) else {
                continue;
            };
            if interface_type.field(field_name).is_some()
                && !names.contains(&interface_type.name().to_string())
            {
                names.push(interface_type.name().to_string());
            }
        }
    }
    names
}
