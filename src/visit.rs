//! Generic traversal over executable-document ASTs.
//!
//! The validator drives its rules through its own type-tracking walker; this
//! module is the standalone visitor surface for hosts and transforms. Enter
//! callbacks steer the walk with an explicit [`VisitFlow`]; node replacement
//! is only meaningful for owned-document transforms and lives in
//! [`map_selections`], which rebuilds the document instead of mutating it in
//! place.

use crate::ast;

/// What an enter callback tells the walk to do next.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VisitFlow {
    /// Descend into this node's children.
    Continue,
    /// Skip this node's children but keep walking its siblings.
    SkipSubtree,
    /// Abort the whole walk.
    Stop,
}

/// Per-kind enter/leave callbacks. Every method defaults to a pass-through,
/// so visitors implement only the kinds they care about.
#[allow(unused_variables)]
pub trait Visitor {
    fn enter_document(&mut self, document: &ast::Document) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_document(&mut self, document: &ast::Document) {}

    fn enter_operation(&mut self, operation: &ast::OperationDefinition) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_operation(&mut self, operation: &ast::OperationDefinition) {}

    fn enter_fragment_definition(&mut self, fragment: &ast::FragmentDefinition) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_fragment_definition(&mut self, fragment: &ast::FragmentDefinition) {}

    fn enter_variable_definition(
        &mut self,
        variable_definition: &ast::VariableDefinition,
    ) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_variable_definition(&mut self, variable_definition: &ast::VariableDefinition) {}

    fn enter_selection_set(&mut self, selection_set: &ast::SelectionSet) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_selection_set(&mut self, selection_set: &ast::SelectionSet) {}

    fn enter_field(&mut self, field: &ast::Field) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_field(&mut self, field: &ast::Field) {}

    fn enter_fragment_spread(&mut self, spread: &ast::FragmentSpread) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_fragment_spread(&mut self, spread: &ast::FragmentSpread) {}

    fn enter_inline_fragment(&mut self, inline: &ast::InlineFragment) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_inline_fragment(&mut self, inline: &ast::InlineFragment) {}

    fn enter_directive(&mut self, directive: &ast::Directive) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_directive(&mut self, directive: &ast::Directive) {}

    fn enter_argument(&mut self, name: &str, value: &ast::Value) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_argument(&mut self, name: &str, value: &ast::Value) {}

    fn enter_value(&mut self, value: &ast::Value) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_value(&mut self, value: &ast::Value) {}
}

/// Walk a document depth-first, honoring each enter callback's
/// [`VisitFlow`]. Returns [`VisitFlow::Stop`] if the walk was aborted.
pub fn visit_document(visitor: &mut impl Visitor, document: &ast::Document) -> VisitFlow {
    match visitor.enter_document(document) {
        VisitFlow::Stop => return VisitFlow::Stop,
        VisitFlow::SkipSubtree => {
            visitor.leave_document(document);
            return VisitFlow::Continue;
        }
        VisitFlow::Continue => {}
    }

    for definition in &document.definitions {
        let flow = match definition {
            ast::Definition::Operation(operation) => visit_operation(visitor, operation),
            ast::Definition::Fragment(fragment) => visit_fragment_definition(visitor, fragment),
        };
        if flow == VisitFlow::Stop {
            return VisitFlow::Stop;
        }
    }

    visitor.leave_document(document);
    VisitFlow::Continue
}

fn visit_operation(
    visitor: &mut impl Visitor,
    operation: &ast::OperationDefinition,
) -> VisitFlow {
    match visitor.enter_operation(operation) {
        VisitFlow::Stop => return VisitFlow::Stop,
        VisitFlow::SkipSubtree => {
            visitor.leave_operation(operation);
            return VisitFlow::Continue;
        }
        VisitFlow::Continue => {}
    }

    for variable_definition in ast::operation_variable_definitions(operation) {
        match visitor.enter_variable_definition(variable_definition) {
            VisitFlow::Stop => return VisitFlow::Stop,
            VisitFlow::SkipSubtree => {
                visitor.leave_variable_definition(variable_definition);
                continue;
            }
            VisitFlow::Continue => {}
        }
        if let Some(default_value) = &variable_definition.default_value {
            if visit_value(visitor, default_value) == VisitFlow::Stop {
                return VisitFlow::Stop;
            }
        }
        visitor.leave_variable_definition(variable_definition);
    }

    for directive in ast::operation_directives(operation) {
        if visit_directive(visitor, directive) == VisitFlow::Stop {
            return VisitFlow::Stop;
        }
    }

    if visit_selection_set(visitor, ast::operation_selection_set(operation)) == VisitFlow::Stop {
        return VisitFlow::Stop;
    }

    visitor.leave_operation(operation);
    VisitFlow::Continue
}

fn visit_fragment_definition(
    visitor: &mut impl Visitor,
    fragment: &ast::FragmentDefinition,
) -> VisitFlow {
    match visitor.enter_fragment_definition(fragment) {
        VisitFlow::Stop => return VisitFlow::Stop,
        VisitFlow::SkipSubtree => {
            visitor.leave_fragment_definition(fragment);
            return VisitFlow::Continue;
        }
        VisitFlow::Continue => {}
    }

    for directive in &fragment.directives {
        if visit_directive(visitor, directive) == VisitFlow::Stop {
            return VisitFlow::Stop;
        }
    }
    if visit_selection_set(visitor, &fragment.selection_set) == VisitFlow::Stop {
        return VisitFlow::Stop;
    }

    visitor.leave_fragment_definition(fragment);
    VisitFlow::Continue
}

fn visit_selection_set(
    visitor: &mut impl Visitor,
    selection_set: &ast::SelectionSet,
) -> VisitFlow {
    match visitor.enter_selection_set(selection_set) {
        VisitFlow::Stop => return VisitFlow::Stop,
        VisitFlow::SkipSubtree => {
            visitor.leave_selection_set(selection_set);
            return VisitFlow::Continue;
        }
        VisitFlow::Continue => {}
    }

    for selection in &selection_set.items {
        let flow = match selection {
            ast::Selection::Field(field) => visit_field(visitor, field),
            ast::Selection::FragmentSpread(spread) => visit_fragment_spread(visitor, spread),
            ast::Selection::InlineFragment(inline) => visit_inline_fragment(visitor, inline),
        };
        if flow == VisitFlow::Stop {
            return VisitFlow::Stop;
        }
    }

    visitor.leave_selection_set(selection_set);
    VisitFlow::Continue
}

fn visit_field(visitor: &mut impl Visitor, field: &ast::Field) -> VisitFlow {
    match visitor.enter_field(field) {
        VisitFlow::Stop => return VisitFlow::Stop,
        VisitFlow::SkipSubtree => {
            visitor.leave_field(field);
            return VisitFlow::Continue;
        }
        VisitFlow::Continue => {}
    }

    for (name, value) in &field.arguments {
        match visitor.enter_argument(name, value) {
            VisitFlow::Stop => return VisitFlow::Stop,
            VisitFlow::SkipSubtree => {
                visitor.leave_argument(name, value);
                continue;
            }
            VisitFlow::Continue => {}
        }
        if visit_value(visitor, value) == VisitFlow::Stop {
            return VisitFlow::Stop;
        }
        visitor.leave_argument(name, value);
    }

    for directive in &field.directives {
        if visit_directive(visitor, directive) == VisitFlow::Stop {
            return VisitFlow::Stop;
        }
    }

    if !field.selection_set.items.is_empty()
        && visit_selection_set(visitor, &field.selection_set) == VisitFlow::Stop
    {
        return VisitFlow::Stop;
    }

    visitor.leave_field(field);
    VisitFlow::Continue
}

fn visit_fragment_spread(
    visitor: &mut impl Visitor,
    spread: &ast::FragmentSpread,
) -> VisitFlow {
    match visitor.enter_fragment_spread(spread) {
        VisitFlow::Stop => return VisitFlow::Stop,
        VisitFlow::SkipSubtree => {
            visitor.leave_fragment_spread(spread);
            return VisitFlow::Continue;
        }
        VisitFlow::Continue => {}
    }
    for directive in &spread.directives {
        if visit_directive(visitor, directive) == VisitFlow::Stop {
            return VisitFlow::Stop;
        }
    }
    visitor.leave_fragment_spread(spread);
    VisitFlow::Continue
}

fn visit_inline_fragment(
    visitor: &mut impl Visitor,
    inline: &ast::InlineFragment,
) -> VisitFlow {
    match visitor.enter_inline_fragment(inline) {
        VisitFlow::Stop => return VisitFlow::Stop,
        VisitFlow::SkipSubtree => {
            visitor.leave_inline_fragment(inline);
            return VisitFlow::Continue;
        }
        VisitFlow::Continue => {}
    }
    for directive in &inline.directives {
        if visit_directive(visitor, directive) == VisitFlow::Stop {
            return VisitFlow::Stop;
        }
    }
    if visit_selection_set(visitor, &inline.selection_set) == VisitFlow::Stop {
        return VisitFlow::Stop;
    }
    visitor.leave_inline_fragment(inline);
    VisitFlow::Continue
}

fn visit_directive(visitor: &mut impl Visitor, directive: &ast::Directive) -> VisitFlow {
    match visitor.enter_directive(directive) {
        VisitFlow::Stop => return VisitFlow::Stop,
        VisitFlow::SkipSubtree => {
            visitor.leave_directive(directive);
            return VisitFlow::Continue;
        }
        VisitFlow::Continue => {}
    }
    for (name, value) in &directive.arguments {
        match visitor.enter_argument(name, value) {
            VisitFlow::Stop => return VisitFlow::Stop,
            VisitFlow::SkipSubtree => {
                visitor.leave_argument(name, value);
                continue;
            }
            VisitFlow::Continue => {}
        }
        if visit_value(visitor, value) == VisitFlow::Stop {
            return VisitFlow::Stop;
        }
        visitor.leave_argument(name, value);
    }
    visitor.leave_directive(directive);
    VisitFlow::Continue
}

fn visit_value(visitor: &mut impl Visitor, value: &ast::Value) -> VisitFlow {
    match visitor.enter_value(value) {
        VisitFlow::Stop => return VisitFlow::Stop,
        VisitFlow::SkipSubtree => {
            visitor.leave_value(value);
            return VisitFlow::Continue;
        }
        VisitFlow::Continue => {}
    }
    match value {
        ast::Value::List(items) => {
            for item in items {
                if visit_value(visitor, item) == VisitFlow::Stop {
                    return VisitFlow::Stop;
                }
            }
        }
        ast::Value::Object(fields) => {
            for item in fields.values() {
                if visit_value(visitor, item) == VisitFlow::Stop {
                    return VisitFlow::Stop;
                }
            }
        }
        _ => {}
    }
    visitor.leave_value(value);
    VisitFlow::Continue
}

/// A selection-level transform outcome for [`map_selections`].
pub enum SelectionTransform {
    Keep(ast::Selection),
    Replace(ast::Selection),
    Remove,
}

/// Rebuild a document, applying `transform` to every selection (innermost
/// first). This is the replacement half of the visitor protocol: read-only
/// walks steer with [`VisitFlow`], transforms consume and rebuild.
pub fn map_selections(
    document: ast::Document,
    transform: &mut impl FnMut(ast::Selection) -> SelectionTransform,
) -> ast::Document {
    let definitions = document
        .definitions
        .into_iter()
        .map(|definition| match definition {
            ast::Definition::Operation(operation) => {
                ast::Definition::Operation(map_operation(operation, transform))
            }
            ast::Definition::Fragment(mut fragment) => {
                fragment.selection_set = map_selection_set(fragment.selection_set, transform);
                ast::Definition::Fragment(fragment)
            }
        })
        .collect();
    ast::Document { definitions }
}

fn map_operation(
    operation: ast::OperationDefinition,
    transform: &mut impl FnMut(ast::Selection) -> SelectionTransform,
) -> ast::OperationDefinition {
    match operation {
        ast::OperationDefinition::SelectionSet(selection_set) => {
            ast::OperationDefinition::SelectionSet(map_selection_set(selection_set, transform))
        }
        ast::OperationDefinition::Query(mut query) => {
            query.selection_set = map_selection_set(query.selection_set, transform);
            ast::OperationDefinition::Query(query)
        }
        ast::OperationDefinition::Mutation(mut mutation) => {
            mutation.selection_set = map_selection_set(mutation.selection_set, transform);
            ast::OperationDefinition::Mutation(mutation)
        }
        ast::OperationDefinition::Subscription(mut subscription) => {
            subscription.selection_set = map_selection_set(subscription.selection_set, transform);
            ast::OperationDefinition::Subscription(subscription)
        }
    }
}

fn map_selection_set(
    selection_set: ast::SelectionSet,
    transform: &mut impl FnMut(ast::Selection) -> SelectionTransform,
) -> ast::SelectionSet {
    let items = selection_set
        .items
        .into_iter()
        .filter_map(|selection| {
            let selection = match selection {
                ast::Selection::Field(mut field) => {
                    field.selection_set = map_selection_set(field.selection_set, transform);
                    ast::Selection::Field(field)
                }
                ast::Selection::InlineFragment(mut inline) => {
                    inline.selection_set = map_selection_set(inline.selection_set, transform);
                    ast::Selection::InlineFragment(inline)
                }
                spread => spread,
            };
            match transform(selection) {
                SelectionTransform::Keep(selection) => Some(selection),
                SelectionTransform::Replace(replacement) => Some(replacement),
                SelectionTransform::Remove => None,
            }
        })
        .collect();
    ast::SelectionSet {
        span: selection_set.span,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FieldCounter {
        entered: Vec<String>,
        left: usize,
        skip_below: Option<String>,
        stop_at: Option<String>,
    }
    impl Visitor for FieldCounter {
        fn enter_field(&mut self, field: &ast::Field) -> VisitFlow {
            self.entered.push(field.name.clone());
            if self.stop_at.as_deref() == Some(field.name.as_str()) {
                return VisitFlow::Stop;
            }
            if self.skip_below.as_deref() == Some(field.name.as_str()) {
                return VisitFlow::SkipSubtree;
            }
            VisitFlow::Continue
        }

        fn leave_field(&mut self, _field: &ast::Field) {
            self.left += 1;
        }
    }

    fn doc(source: &str) -> ast::Document {
        ast::parse(source).unwrap()
    }

    #[test]
    fn walks_fields_in_document_order() {
        let document = doc("{ a { b c } d }");
        let mut counter = FieldCounter::default();
        assert_eq!(visit_document(&mut counter, &document), VisitFlow::Continue);
        assert_eq!(counter.entered, vec!["a", "b", "c", "d"]);
        assert_eq!(counter.left, 4);
    }

    #[test]
    fn skip_subtree_prunes_children_but_not_siblings() {
        let document = doc("{ a { b c } d }");
        let mut counter = FieldCounter {
            skip_below: Some("a".to_string()),
            ..Default::default()
        };
        visit_document(&mut counter, &document);
        assert_eq!(counter.entered, vec!["a", "d"]);
    }

    #[test]
    fn stop_aborts_the_walk() {
        let document = doc("{ a { b c } d }");
        let mut counter = FieldCounter {
            stop_at: Some("b".to_string()),
            ..Default::default()
        };
        assert_eq!(visit_document(&mut counter, &document), VisitFlow::Stop);
        assert_eq!(counter.entered, vec!["a", "b"]);
    }

    #[test]
    fn map_selections_replaces_and_removes() {
        let document = doc("{ a b }");
        let mapped = map_selections(document, &mut |selection| match &selection {
            ast::Selection::Field(field) if field.name == "a" => {
                let mut renamed = field.clone();
                renamed.alias = Some("renamed".to_string());
                SelectionTransform::Replace(ast::Selection::Field(renamed))
            }
            ast::Selection::Field(field) if field.name == "b" => SelectionTransform::Remove,
            _ => SelectionTransform::Keep(selection),
        });

        let ast::Definition::Operation(ast::OperationDefinition::SelectionSet(selection_set)) =
            &mapped.definitions[0]
        else {
            panic!("expected a bare selection set");
        };
        assert_eq!(selection_set.items.len(), 1);
        let ast::Selection::Field(field) = &selection_set.items[0] else {
            panic!("expected a field");
        };
        assert_eq!(field.alias.as_deref(), Some("renamed"));
    }
}
