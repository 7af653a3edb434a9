use crate::ast;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::GraphQLType;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::collections::HashSet;

/// Produce the ordered map from response key to the field AST nodes that
/// share it, for a selection set applied to `object_type`.
///
/// Fragment spreads and inline fragments expand in place when their type
/// condition applies to the object type; `@skip`/`@include` are evaluated
/// with coerced directive arguments against the variables map. Field lists
/// for the same response key are concatenated; their sub-selections merge at
/// resolution time.
pub(crate) fn collect_fields(
    schema: &Schema,
    fragments: &HashMap<String, ast::FragmentDefinition>,
    variables: &IndexMap<String, HostValue>,
    object_type: &GraphQLType,
    selection_sets: &[&ast::SelectionSet],
) -> IndexMap<String, Vec<ast::Field>> {
    let mut grouped: IndexMap<String, Vec<ast::Field>> = IndexMap::new();
    let mut visited_fragments: HashSet<String> = HashSet::new();
    for selection_set in selection_sets {
        collect_into(
            schema,
            fragments,
            variables,
            object_type,
            selection_set,
            &mut grouped,
            &mut visited_fragments,
        );
    }
    grouped
}

fn collect_into(
    schema: &Schema,
    fragments: &HashMap<String, ast::FragmentDefinition>,
    variables: &IndexMap<String, HostValue>,
    object_type: &GraphQLType,
    selection_set: &ast::SelectionSet,
    grouped: &mut IndexMap<String, Vec<ast::Field>>,
    visited_fragments: &mut HashSet<String>,
) {
    for selection in &selection_set.items {
        match selection {
            ast::Selection::Field(field) => {
                if is_skipped(&field.directives, variables) {
                    continue;
                }
                let response_key = field
                    .alias
                    .clone()
                    .unwrap_or_else(|| field.name.clone());
                grouped.entry(response_key).or_default().push(field.clone());
            }

            ast::Selection::InlineFragment(inline) => {
                if is_skipped(&inline.directives, variables) {
                    continue;
                }
                if !condition_applies(schema, object_type, inline.type_condition.as_ref()) {
                    continue;
                }
                collect_into(
                    schema,
                    fragments,
                    variables,
                    object_type,
                    &inline.selection_set,
                    grouped,
                    visited_fragments,
                );
            }

            ast::Selection::FragmentSpread(spread) => {
                if is_skipped(&spread.directives, variables) {
                    continue;
                }
                if !visited_fragments.insert(spread.fragment_name.clone()) {
                    continue;
                }
                let Some(fragment) = fragments.get(&spread.fragment_name) else {
                    continue;
                };
                if !condition_applies(
                    schema,
                    object_type,
                    Some(&fragment.type_condition),
                ) {
                    continue;
                }
                collect_into(
                    schema,
                    fragments,
                    variables,
                    object_type,
                    &fragment.selection_set,
                    grouped,
                    visited_fragments,
                );
            }
        }
    }
}

/// `@skip(if: true)` or `@include(if: false)` removes a selection. A
/// directive whose `if` argument fails to coerce leaves the selection in
/// place.
fn is_skipped(
    directives: &[ast::Directive],
    variables: &IndexMap<String, HostValue>,
) -> bool {
    for directive in directives {
        let condition = match directive.name.as_str() {
            "skip" => Some(true),
            "include" => Some(false),
            _ => None,
        };
        let Some(skip_when) = condition else {
            continue;
        };
        let Some(if_value) = if_argument(directive, variables) else {
            continue;
        };
        if if_value == skip_when {
            return true;
        }
    }
    false
}

fn if_argument(
    directive: &ast::Directive,
    variables: &IndexMap<String, HostValue>,
) -> Option<bool> {
    let (_, value) = directive
        .arguments
        .iter()
        .find(|(name, _)| name == "if")?;
    match value {
        ast::Value::Boolean(boolean) => Some(*boolean),
        ast::Value::Variable(variable_name) => match variables.get(variable_name) {
            Some(HostValue::Bool(boolean)) => Some(*boolean),
            _ => None,
        },
        _ => None,
    }
}

/// Whether a fragment's type condition applies to the concrete object type
/// being collected on. An absent condition always applies.
fn condition_applies(
    schema: &Schema,
    object_type: &GraphQLType,
    condition: Option<&ast::TypeCondition>,
) -> bool {
    let Some(ast::TypeCondition::On(condition_name)) = condition else {
        return true;
    };
    if condition_name == object_type.name() {
        return true;
    }
    let Some(condition_type) = schema.type_named(condition_name) else {
        return false;
    };
    condition_type.is_abstract() && schema.is_possible_type(&condition_type, object_type.name())
}
