use crate::ast;
use crate::error::GraphQLError;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::DirectiveLocation;
use crate::types::GraphQLType;
use crate::validation::TypeInfo;
use crate::validation::ValidationContext;
use indexmap::IndexMap;
use std::sync::Arc;

/// Identifies what an argument is attached to when
/// [`ValidationRule::enter_argument`] fires.
#[derive(Clone, Copy)]
pub enum ArgumentOwner<'a> {
    Field(&'a ast::Field),
    Directive(&'a ast::Directive),
}

/// One validation rule: a set of enter/leave callbacks over document nodes.
///
/// Rules hold per-run state, so they are constructed fresh for every
/// validation via [`ValidationRuleFactory`]. Every callback defaults to a
/// no-op; rules implement only the nodes they care about and report errors
/// through the shared context.
#[allow(unused_variables)]
pub trait ValidationRule {
    fn enter_document(&mut self, ctx: &mut ValidationContext<'_>, document: &ast::Document) {}
    fn leave_document(&mut self, ctx: &mut ValidationContext<'_>, document: &ast::Document) {}

    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        operation: &ast::OperationDefinition,
    ) {
    }
    fn leave_operation(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        operation: &ast::OperationDefinition,
    ) {
    }

    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        fragment: &ast::FragmentDefinition,
    ) {
    }
    fn leave_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        fragment: &ast::FragmentDefinition,
    ) {
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        variable_definition: &ast::VariableDefinition,
        operation: &ast::OperationDefinition,
    ) {
    }

    fn enter_selection_set(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        selection_set: &ast::SelectionSet,
    ) {
    }
    fn leave_selection_set(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        selection_set: &ast::SelectionSet,
    ) {
    }

    fn enter_field(&mut self, ctx: &mut ValidationContext<'_>, field: &ast::Field) {}
    fn leave_field(&mut self, ctx: &mut ValidationContext<'_>, field: &ast::Field) {}

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        spread: &ast::FragmentSpread,
    ) {
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        inline: &ast::InlineFragment,
    ) {
    }
    fn leave_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        inline: &ast::InlineFragment,
    ) {
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        directive: &ast::Directive,
        location: DirectiveLocation,
    ) {
    }
    fn leave_directive(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        directive: &ast::Directive,
        location: DirectiveLocation,
    ) {
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        owner: ArgumentOwner<'_>,
        name: &str,
        value: &ast::Value,
        position: ast::AstPos,
    ) {
    }
}

/// Constructs a fresh rule instance for one validation run.
pub type ValidationRuleFactory = Arc<dyn Fn() -> Box<dyn ValidationRule> + Send + Sync>;

/// Run `rules` over `document` in a single shared traversal and collect
/// every reported error, in traversal order per rule callback.
pub fn validate(
    schema: &Schema,
    document: &ast::Document,
    variables: &IndexMap<String, HostValue>,
    rules: &[ValidationRuleFactory],
) -> Vec<GraphQLError> {
    let mut ctx = ValidationContext::new(schema, document, variables);
    let mut rules: Vec<Box<dyn ValidationRule>> = rules.iter().map(|factory| factory()).collect();

    for rule in rules.iter_mut() {
        rule.enter_document(&mut ctx, document);
    }

    for def in &document.definitions {
        match def {
            ast::Definition::Operation(operation) => {
                walk_operation(&mut ctx, &mut rules, operation);
            }
            ast::Definition::Fragment(fragment) => {
                walk_fragment_definition(&mut ctx, &mut rules, fragment);
            }
        }
    }

    for rule in rules.iter_mut() {
        rule.leave_document(&mut ctx, document);
    }

    ctx.into_errors()
}

fn root_type_for(schema: &Schema, operation: &ast::OperationDefinition) -> Option<Arc<GraphQLType>> {
    match ast::OperationKind::of(operation) {
        ast::OperationKind::Query => Some(schema.query_type()),
        ast::OperationKind::Mutation => schema.mutation_type(),
        ast::OperationKind::Subscription => schema.subscription_type(),
    }
}

fn operation_directive_location(operation: &ast::OperationDefinition) -> DirectiveLocation {
    match ast::OperationKind::of(operation) {
        ast::OperationKind::Query => DirectiveLocation::Query,
        ast::OperationKind::Mutation => DirectiveLocation::Mutation,
        ast::OperationKind::Subscription => DirectiveLocation::Subscription,
    }
}

fn walk_operation(
    ctx: &mut ValidationContext<'_>,
    rules: &mut [Box<dyn ValidationRule>],
    operation: &ast::OperationDefinition,
) {
    let root_type = root_type_for(ctx.schema, operation);
    ctx.type_info.push_parent_type(root_type);

    for rule in rules.iter_mut() {
        rule.enter_operation(ctx, operation);
    }

    for variable_definition in ast::operation_variable_definitions(operation) {
        for rule in rules.iter_mut() {
            rule.enter_variable_definition(ctx, variable_definition, operation);
        }
    }

    walk_directives(
        ctx,
        rules,
        ast::operation_directives(operation),
        operation_directive_location(operation),
    );
    walk_selection_set(ctx, rules, ast::operation_selection_set(operation));

    for rule in rules.iter_mut() {
        rule.leave_operation(ctx, operation);
    }

    ctx.type_info.pop_parent_type();
}

fn walk_fragment_definition(
    ctx: &mut ValidationContext<'_>,
    rules: &mut [Box<dyn ValidationRule>],
    fragment: &ast::FragmentDefinition,
) {
    let ast::TypeCondition::On(condition_name) = &fragment.type_condition;
    let condition_type = ctx.schema.type_named(condition_name);
    ctx.type_info.push_parent_type(condition_type);

    for rule in rules.iter_mut() {
        rule.enter_fragment_definition(ctx, fragment);
    }

    walk_directives(
        ctx,
        rules,
        &fragment.directives,
        DirectiveLocation::FragmentDefinition,
    );
    walk_selection_set(ctx, rules, &fragment.selection_set);

    for rule in rules.iter_mut() {
        rule.leave_fragment_definition(ctx, fragment);
    }

    ctx.type_info.pop_parent_type();
}

fn walk_selection_set(
    ctx: &mut ValidationContext<'_>,
    rules: &mut [Box<dyn ValidationRule>],
    selection_set: &ast::SelectionSet,
) {
    for rule in rules.iter_mut() {
        rule.enter_selection_set(ctx, selection_set);
    }

    for selection in &selection_set.items {
        match selection {
            ast::Selection::Field(field) => walk_field(ctx, rules, field),
            ast::Selection::FragmentSpread(spread) => {
                for rule in rules.iter_mut() {
                    rule.enter_fragment_spread(ctx, spread);
                }
                walk_directives(
                    ctx,
                    rules,
                    &spread.directives,
                    DirectiveLocation::FragmentSpread,
                );
            }
            ast::Selection::InlineFragment(inline) => {
                walk_inline_fragment(ctx, rules, inline);
            }
        }
    }

    for rule in rules.iter_mut() {
        rule.leave_selection_set(ctx, selection_set);
    }
}

fn walk_field(
    ctx: &mut ValidationContext<'_>,
    rules: &mut [Box<dyn ValidationRule>],
    field: &ast::Field,
) {
    let field_def = ctx.type_info.parent_type().and_then(|parent| {
        TypeInfo::field_def_for(ctx.schema, parent, field.name.as_str())
    });
    ctx.type_info.push_field(field_def);

    for rule in rules.iter_mut() {
        rule.enter_field(ctx, field);
    }

    for (argument_name, argument_value) in &field.arguments {
        let argument_def = ctx
            .type_info
            .field_def()
            .and_then(|def| def.argument(argument_name).cloned());
        ctx.type_info.set_argument(argument_def);
        for rule in rules.iter_mut() {
            rule.enter_argument(
                ctx,
                ArgumentOwner::Field(field),
                argument_name,
                argument_value,
                field.position,
            );
        }
        ctx.type_info.clear_argument();
    }

    walk_directives(ctx, rules, &field.directives, DirectiveLocation::Field);

    if !field.selection_set.items.is_empty() {
        let sub_parent = ctx
            .type_info
            .field_def()
            .and_then(|def| def.type_annotation().innermost_named_type(ctx.schema))
            .filter(|named| named.is_composite());
        ctx.type_info.push_parent_type(sub_parent);
        walk_selection_set(ctx, rules, &field.selection_set);
        ctx.type_info.pop_parent_type();
    }

    for rule in rules.iter_mut() {
        rule.leave_field(ctx, field);
    }

    ctx.type_info.pop_field();
}

fn walk_inline_fragment(
    ctx: &mut ValidationContext<'_>,
    rules: &mut [Box<dyn ValidationRule>],
    inline: &ast::InlineFragment,
) {
    let parent = match &inline.type_condition {
        Some(ast::TypeCondition::On(condition_name)) => ctx.schema.type_named(condition_name),
        None => ctx.type_info.parent_type().map(Arc::clone),
    };
    ctx.type_info.push_parent_type(parent);

    for rule in rules.iter_mut() {
        rule.enter_inline_fragment(ctx, inline);
    }

    walk_directives(
        ctx,
        rules,
        &inline.directives,
        DirectiveLocation::InlineFragment,
    );
    walk_selection_set(ctx, rules, &inline.selection_set);

    for rule in rules.iter_mut() {
        rule.leave_inline_fragment(ctx, inline);
    }

    ctx.type_info.pop_parent_type();
}

fn walk_directives(
    ctx: &mut ValidationContext<'_>,
    rules: &mut [Box<dyn ValidationRule>],
    directives: &[ast::Directive],
    location: DirectiveLocation,
) {
    for directive in directives {
        let directive_def = ctx.schema.directive_named(directive.name.as_str());
        ctx.type_info.set_directive(directive_def.clone());

        for rule in rules.iter_mut() {
            rule.enter_directive(ctx, directive, location);
        }

        for (argument_name, argument_value) in &directive.arguments {
            let argument_def = directive_def
                .as_ref()
                .and_then(|def| def.argument(argument_name).cloned());
            ctx.type_info.set_argument(argument_def);
            for rule in rules.iter_mut() {
                rule.enter_argument(
                    ctx,
                    ArgumentOwner::Directive(directive),
                    argument_name,
                    argument_value,
                    directive.position,
                );
            }
            ctx.type_info.clear_argument();
        }

        for rule in rules.iter_mut() {
            rule.leave_directive(ctx, directive, location);
        }

        ctx.type_info.set_directive(None);
    }
}
