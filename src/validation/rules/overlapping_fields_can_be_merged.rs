use crate::ast;
use crate::error::GraphQLError;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use crate::validation::TypeInfo;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::Arc;

/// Two field selections sharing a response key must be mergeable: same field
/// name, equal arguments, compatible return types, and mergeable
/// sub-selections. Selections under mutually exclusive concrete parents are
/// exempt from the name/argument checks but must still agree on response
/// shape.
#[derive(Default)]
pub struct OverlappingFieldsCanBeMerged {
    compared_fragment_pairs: HashSet<(String, String, bool)>,
    /// Conflicts already reported, keyed by response key and the two node
    /// positions. The same pair can surface both while visiting an enclosing
    /// selection set (inline fragments expand in place) and while visiting
    /// the inner one.
    reported: HashSet<(String, (usize, usize), (usize, usize))>,
}

/// One collected field occurrence: the concrete-or-abstract parent it was
/// collected on, its definition (if any), and its AST node.
#[derive(Clone)]
struct FieldEntry {
    parent_type: Option<Arc<GraphQLType>>,
    field_def: Option<Field>,
    node: ast::Field,
}

type FieldMap = IndexMap<String, Vec<FieldEntry>>;

impl ValidationRule for OverlappingFieldsCanBeMerged {
    fn enter_selection_set(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        selection_set: &ast::SelectionSet,
    ) {
        let parent_type = ctx.type_info().parent_type().map(Arc::clone);
        self.check_selection_set(ctx, parent_type, selection_set);
    }
}

impl OverlappingFieldsCanBeMerged {
    fn check_selection_set(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        parent_type: Option<Arc<GraphQLType>>,
        selection_set: &ast::SelectionSet,
    ) {
        let (field_map, fragment_names) =
            collect_fields_and_fragments(ctx, parent_type, selection_set);

        self.check_conflicts_within(ctx, &field_map);

        for (index, fragment_name) in fragment_names.iter().enumerate() {
            self.check_fields_against_fragment(ctx, &field_map, fragment_name, false);
            for other_name in &fragment_names[index + 1..] {
                self.check_fragment_pair(ctx, fragment_name, other_name, false);
            }
        }
    }

    fn check_conflicts_within(&mut self, ctx: &mut ValidationContext<'_>, field_map: &FieldMap) {
        for (response_key, entries) in field_map {
            if entries.len() < 2 {
                continue;
            }
            for (index, first) in entries.iter().enumerate() {
                for second in &entries[index + 1..] {
                    self.check_pair(ctx, response_key, first, second, false);
                }
            }
        }
    }

    fn check_fields_against_fragment(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        field_map: &FieldMap,
        fragment_name: &str,
        mutually_exclusive: bool,
    ) {
        let Some(fragment) = ctx.fragment(fragment_name) else {
            return;
        };
        let ast::TypeCondition::On(condition_name) = &fragment.type_condition;
        let fragment_parent = ctx.schema().type_named(condition_name);
        let (fragment_fields, nested_fragments) = collect_fields_and_fragments(
            ctx,
            fragment_parent,
            &fragment.selection_set,
        );

        self.check_between_maps(ctx, field_map, &fragment_fields, mutually_exclusive);

        for nested in nested_fragments {
            if nested != fragment_name {
                self.check_fields_against_fragment(ctx, field_map, &nested, mutually_exclusive);
            }
        }
    }

    fn check_fragment_pair(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        first_name: &str,
        second_name: &str,
        mutually_exclusive: bool,
    ) {
        if first_name == second_name {
            return;
        }
        let pair_key = if first_name < second_name {
            (first_name.to_string(), second_name.to_string(), mutually_exclusive)
        } else {
            (second_name.to_string(), first_name.to_string(), mutually_exclusive)
        };
        // Fragments can reference each other; comparing a pair once is both
        // a termination guarantee and a de-duplication of reports.
        if !self.compared_fragment_pairs.insert(pair_key) {
            return;
        }

        let Some(first) = ctx.fragment(first_name) else {
            return;
        };
        let Some(second) = ctx.fragment(second_name) else {
            return;
        };
        let ast::TypeCondition::On(first_condition) = &first.type_condition;
        let ast::TypeCondition::On(second_condition) = &second.type_condition;
        let first_parent = ctx.schema().type_named(first_condition);
        let second_parent = ctx.schema().type_named(second_condition);

        let (first_fields, first_nested) =
            collect_fields_and_fragments(ctx, first_parent, &first.selection_set);
        let (second_fields, second_nested) =
            collect_fields_and_fragments(ctx, second_parent, &second.selection_set);

        self.check_between_maps(ctx, &first_fields, &second_fields, mutually_exclusive);

        for nested in &second_nested {
            self.check_fragment_pair(ctx, first_name, nested, mutually_exclusive);
        }
        for nested in &first_nested {
            self.check_fragment_pair(ctx, nested, second_name, mutually_exclusive);
        }
    }

    fn check_between_maps(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        first_map: &FieldMap,
        second_map: &FieldMap,
        mutually_exclusive: bool,
    ) {
        for (response_key, first_entries) in first_map {
            let Some(second_entries) = second_map.get(response_key) else {
                continue;
            };
            for first in first_entries {
                for second in second_entries {
                    self.check_pair(ctx, response_key, first, second, mutually_exclusive);
                }
            }
        }
    }

    fn check_pair(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        response_key: &str,
        first: &FieldEntry,
        second: &FieldEntry,
        parents_mutually_exclusive: bool,
    ) {
        let pair_key = {
            let first_pos = (first.node.position.line, first.node.position.column);
            let second_pos = (second.node.position.line, second.node.position.column);
            if first_pos <= second_pos {
                (response_key.to_string(), first_pos, second_pos)
            } else {
                (response_key.to_string(), second_pos, first_pos)
            }
        };
        if self.reported.contains(&pair_key) {
            return;
        }

        // Selections on provably distinct object types can never both apply
        // to one runtime value, so they only need to agree on shape.
        let mutually_exclusive = parents_mutually_exclusive
            || distinct_concrete_parents(first, second);

        if !mutually_exclusive {
            if first.node.name != second.node.name {
                self.reported.insert(pair_key);
                ctx.report_error(conflict_error(
                    response_key,
                    &format!(
                        "\"{}\" and \"{}\" are different fields",
                        first.node.name, second.node.name,
                    ),
                    first,
                    second,
                ));
                return;
            }

            if !same_arguments(&first.node.arguments, &second.node.arguments) {
                self.reported.insert(pair_key);
                ctx.report_error(conflict_error(
                    response_key,
                    "they have differing arguments",
                    first,
                    second,
                ));
                return;
            }
        }

        let first_type = first.field_def.as_ref().map(|def| def.type_annotation());
        let second_type = second.field_def.as_ref().map(|def| def.type_annotation());
        if let (Some(first_type), Some(second_type)) = (first_type, second_type) {
            if types_conflict(ctx.schema(), first_type, second_type) {
                self.reported.insert(pair_key);
                ctx.report_error(conflict_error(
                    response_key,
                    &format!(
                        "they return conflicting types \"{first_type}\" and \"{second_type}\"",
                    ),
                    first,
                    second,
                ));
                return;
            }
        }

        // Merge the sub-selections and recurse.
        let first_sub = &first.node.selection_set;
        let second_sub = &second.node.selection_set;
        if first_sub.items.is_empty() && second_sub.items.is_empty() {
            return;
        }
        let first_parent = sub_selection_parent(ctx, first);
        let second_parent = sub_selection_parent(ctx, second);
        let (first_fields, first_fragments) =
            collect_fields_and_fragments(ctx, first_parent, first_sub);
        let (second_fields, second_fragments) =
            collect_fields_and_fragments(ctx, second_parent, second_sub);

        self.check_between_maps(ctx, &first_fields, &second_fields, mutually_exclusive);
        for fragment_name in &second_fragments {
            self.check_fields_against_fragment(
                ctx,
                &first_fields,
                fragment_name,
                mutually_exclusive,
            );
        }
        for fragment_name in &first_fragments {
            self.check_fields_against_fragment(
                ctx,
                &second_fields,
                fragment_name,
                mutually_exclusive,
            );
        }
    }
}

fn distinct_concrete_parents(first: &FieldEntry, second: &FieldEntry) -> bool {
    match (&first.parent_type, &second.parent_type) {
        (Some(first_parent), Some(second_parent)) => {
            first_parent.name() != second_parent.name()
                && first_parent.as_object().is_some()
                && second_parent.as_object().is_some()
        }
        _ => false,
    }
}

fn sub_selection_parent(
    ctx: &ValidationContext<'_>,
    entry: &FieldEntry,
) -> Option<Arc<GraphQLType>> {
    entry
        .field_def
        .as_ref()
        .and_then(|def| def.type_annotation().innermost_named_type(ctx.schema()))
        .filter(|named| named.is_composite())
}

fn conflict_error(
    response_key: &str,
    reason: &str,
    first: &FieldEntry,
    second: &FieldEntry,
) -> GraphQLError {
    GraphQLError::new(format!(
        "Fields \"{response_key}\" conflict because {reason}. Use different \
        aliases on the fields to fetch both if this was intentional.",
    ))
    .at(first.node.position.into())
    .at(second.node.position.into())
}

/// Argument lists compare as name/value maps; order is irrelevant, values
/// compare structurally on the literal AST.
fn same_arguments(
    first: &[(String, ast::Value)],
    second: &[(String, ast::Value)],
) -> bool {
    if first.len() != second.len() {
        return false;
    }
    first.iter().all(|(name, value)| {
        second
            .iter()
            .any(|(other_name, other_value)| name == other_name && value == other_value)
    })
}

/// Two return types conflict when their shapes cannot produce one merged
/// response value: mismatched list or non-null wrapping, or distinct types
/// of which at least one is a leaf. Distinct composite types do not conflict
/// here; their sub-selections are merged and checked recursively.
fn types_conflict(
    schema: &crate::schema::Schema,
    first: &TypeAnnotation,
    second: &TypeAnnotation,
) -> bool {
    match (first, second) {
        (
            TypeAnnotation::List { inner: first_inner, nullable: first_nullable },
            TypeAnnotation::List { inner: second_inner, nullable: second_nullable },
        ) => {
            first_nullable != second_nullable
                || types_conflict(schema, first_inner, second_inner)
        }

        (TypeAnnotation::List { .. }, TypeAnnotation::Named { .. })
        | (TypeAnnotation::Named { .. }, TypeAnnotation::List { .. }) => true,

        (
            TypeAnnotation::Named { type_ref: first_ref, nullable: first_nullable },
            TypeAnnotation::Named { type_ref: second_ref, nullable: second_nullable },
        ) => {
            if first_nullable != second_nullable {
                return true;
            }
            if first_ref.name() == second_ref.name() {
                return false;
            }
            let first_is_leaf = schema
                .type_named(first_ref.name())
                .map(|named| named.is_leaf())
                .unwrap_or(true);
            let second_is_leaf = schema
                .type_named(second_ref.name())
                .map(|named| named.is_leaf())
                .unwrap_or(true);
            first_is_leaf || second_is_leaf
        }
    }
}

/// Collect the immediate fields of one selection set (inline fragments
/// expanded in place, their condition types tracked) plus the names of
/// spread fragments, without expanding the spreads.
fn collect_fields_and_fragments(
    ctx: &ValidationContext<'_>,
    parent_type: Option<Arc<GraphQLType>>,
    selection_set: &ast::SelectionSet,
) -> (FieldMap, Vec<String>) {
    let mut field_map = FieldMap::new();
    let mut fragment_names = vec![];
    collect_into(
        ctx,
        parent_type,
        selection_set,
        &mut field_map,
        &mut fragment_names,
    );
    (field_map, fragment_names)
}

fn collect_into(
    ctx: &ValidationContext<'_>,
    parent_type: Option<Arc<GraphQLType>>,
    selection_set: &ast::SelectionSet,
    field_map: &mut FieldMap,
    fragment_names: &mut Vec<String>,
) {
    for selection in &selection_set.items {
        match selection {
            ast::Selection::Field(field) => {
                let field_def = parent_type.as_ref().and_then(|parent| {
                    TypeInfo::field_def_for(ctx.schema(), parent, field.name.as_str())
                });
                let response_key = field
                    .alias
                    .clone()
                    .unwrap_or_else(|| field.name.clone());
                field_map.entry(response_key).or_default().push(FieldEntry {
                    parent_type: parent_type.clone(),
                    field_def,
                    node: field.clone(),
                });
            }
            ast::Selection::FragmentSpread(spread) => {
                if !fragment_names.contains(&spread.fragment_name) {
                    fragment_names.push(spread.fragment_name.clone());
                }
            }
            ast::Selection::InlineFragment(inline) => {
                let inline_parent = match &inline.type_condition {
                    Some(ast::TypeCondition::On(condition_name)) => {
                        ctx.schema().type_named(condition_name)
                    }
                    None => parent_type.clone(),
                };
                collect_into(
                    ctx,
                    inline_parent,
                    &inline.selection_set,
                    field_map,
                    fragment_names,
                );
            }
        }
    }
}
