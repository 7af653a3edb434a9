use crate::ast;
use crate::execution::ResponsePath;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use std::collections::HashMap;

/// The `(source, args, context, info)` tuple handed to every resolver.
pub struct ResolverParams<'a> {
    /// The parent value this field is being resolved on.
    pub source: &'a HostValue,
    /// Coerced argument values, keyed by argument name.
    pub args: &'a IndexMap<String, HostValue>,
    /// The opaque per-request value supplied by the host.
    pub context: &'a HostValue,
    /// Static information about the field and the surrounding execution.
    pub info: &'a ResolveInfo<'a>,
}

/// Everything a resolver can know about its position in the execution.
pub struct ResolveInfo<'a> {
    pub field_name: &'a str,
    pub field: &'a Field,
    pub return_type: &'a TypeAnnotation,
    pub parent_type: &'a GraphQLType,
    pub path: &'a ResponsePath,
    pub schema: &'a Schema,
    pub fragments: &'a HashMap<String, ast::FragmentDefinition>,
    pub root_value: &'a HostValue,
    pub operation: &'a ast::OperationDefinition,
    pub variable_values: &'a IndexMap<String, HostValue>,
    /// Every field AST node sharing this response key on the parent.
    pub field_nodes: &'a [ast::Field],
}
impl ResolveInfo<'_> {
    /// The response keys selected under this field, expanded through
    /// fragments, nested up to `depth` levels (1 = immediate children).
    pub fn field_selection(&self, depth: usize) -> SelectedFields {
        let mut selected = SelectedFields::default();
        if depth == 0 {
            return selected;
        }
        for node in self.field_nodes {
            self.collect_selected(&node.selection_set, depth, &mut selected, &mut vec![]);
        }
        selected
    }

    /// A walkable view of this field's sub-selections.
    pub fn look_ahead(&self) -> LookAhead<'_> {
        LookAhead {
            fragments: self.fragments,
            nodes: self.field_nodes.iter().collect(),
        }
    }

    fn collect_selected(
        &self,
        selection_set: &ast::SelectionSet,
        depth: usize,
        selected: &mut SelectedFields,
        spread_stack: &mut Vec<String>,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::Selection::Field(field) => {
                    let response_key = field
                        .alias
                        .clone()
                        .unwrap_or_else(|| field.name.clone());
                    let child = selected.fields.entry(response_key).or_default();
                    if depth > 1 {
                        self.collect_selected(
                            &field.selection_set,
                            depth - 1,
                            child,
                            spread_stack,
                        );
                    }
                }
                ast::Selection::InlineFragment(inline) => {
                    self.collect_selected(
                        &inline.selection_set,
                        depth,
                        selected,
                        spread_stack,
                    );
                }
                ast::Selection::FragmentSpread(spread) => {
                    if spread_stack.contains(&spread.fragment_name) {
                        continue;
                    }
                    if let Some(fragment) = self.fragments.get(&spread.fragment_name) {
                        spread_stack.push(spread.fragment_name.clone());
                        self.collect_selected(
                            &fragment.selection_set,
                            depth,
                            selected,
                            spread_stack,
                        );
                        spread_stack.pop();
                    }
                }
            }
        }
    }
}

/// Nested response keys, as returned by [`ResolveInfo::field_selection`].
#[derive(Debug, Default, PartialEq)]
pub struct SelectedFields {
    pub fields: IndexMap<String, SelectedFields>,
}
impl SelectedFields {
    pub fn contains(&self, response_key: &str) -> bool {
        self.fields.contains_key(response_key)
    }
}

/// Selection-set introspection for resolvers that want to tailor their work
/// to what was actually queried (e.g. skipping an expensive join when the
/// relevant child field is absent).
pub struct LookAhead<'a> {
    fragments: &'a HashMap<String, ast::FragmentDefinition>,
    nodes: Vec<&'a ast::Field>,
}
impl<'a> LookAhead<'a> {
    /// The merged child response keys, in declaration order.
    pub fn child_names(&self) -> Vec<String> {
        let mut names = vec![];
        for node in &self.nodes {
            self.collect_names(&node.selection_set, &mut names, &mut vec![]);
        }
        names
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child_names().iter().any(|child| child == name)
    }

    /// Descend into the named child field, merging every occurrence of it
    /// across this field's selection sets.
    pub fn child(&self, name: &str) -> Option<LookAhead<'a>> {
        let mut child_nodes = vec![];
        for node in &self.nodes {
            self.collect_child_nodes(&node.selection_set, name, &mut child_nodes, &mut vec![]);
        }
        if child_nodes.is_empty() {
            None
        } else {
            Some(LookAhead {
                fragments: self.fragments,
                nodes: child_nodes,
            })
        }
    }

    fn collect_names(
        &self,
        selection_set: &'a ast::SelectionSet,
        names: &mut Vec<String>,
        spread_stack: &mut Vec<&'a str>,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::Selection::Field(field) => {
                    let response_key = field
                        .alias
                        .clone()
                        .unwrap_or_else(|| field.name.clone());
                    if !names.contains(&response_key) {
                        names.push(response_key);
                    }
                }
                ast::Selection::InlineFragment(inline) => {
                    self.collect_names(&inline.selection_set, names, spread_stack);
                }
                ast::Selection::FragmentSpread(spread) => {
                    if spread_stack.contains(&spread.fragment_name.as_str()) {
                        continue;
                    }
                    if let Some(fragment) = self.fragments.get(&spread.fragment_name) {
                        spread_stack.push(spread.fragment_name.as_str());
                        self.collect_names(&fragment.selection_set, names, spread_stack);
                        spread_stack.pop();
                    }
                }
            }
        }
    }

    fn collect_child_nodes(
        &self,
        selection_set: &'a ast::SelectionSet,
        name: &str,
        child_nodes: &mut Vec<&'a ast::Field>,
        spread_stack: &mut Vec<&'a str>,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::Selection::Field(field) => {
                    let response_key =
                        field.alias.as_deref().unwrap_or(field.name.as_str());
                    if response_key == name {
                        child_nodes.push(field);
                    }
                }
                ast::Selection::InlineFragment(inline) => {
                    self.collect_child_nodes(
                        &inline.selection_set,
                        name,
                        child_nodes,
                        spread_stack,
                    );
                }
                ast::Selection::FragmentSpread(spread) => {
                    if spread_stack.contains(&spread.fragment_name.as_str()) {
                        continue;
                    }
                    if let Some(fragment) = self.fragments.get(&spread.fragment_name) {
                        spread_stack.push(spread.fragment_name.as_str());
                        self.collect_child_nodes(
                            &fragment.selection_set,
                            name,
                            child_nodes,
                            spread_stack,
                        );
                        spread_stack.pop();
                    }
                }
            }
        }
    }
}
