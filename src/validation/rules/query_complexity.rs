use crate::ast;
use crate::error::GraphQLError;
use crate::host_value::HostValue;
use crate::validation::rules::LimitRuleError;
use crate::validation::TypeInfo;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use crate::validation::ValidationRuleFactory;
use indexmap::IndexMap;
use std::sync::Arc;

/// Rejects operations whose additive complexity score exceeds a host-chosen
/// maximum.
///
/// Each field scores `1 + sum(children)` unless its definition carries a
/// complexity override, which receives the child total and the field's
/// arguments with variable values substituted. Constructed with `-1`, the
/// rule is disabled.
#[derive(Debug)]
pub struct QueryComplexity {
    max_complexity: i64,
}
impl QueryComplexity {
    pub fn new(max_complexity: i64) -> Result<Self, LimitRuleError> {
        if max_complexity < -1 {
            return Err(LimitRuleError);
        }
        Ok(Self { max_complexity })
    }

    pub fn factory(max_complexity: i64) -> Result<ValidationRuleFactory, LimitRuleError> {
        Self::new(max_complexity)?;
        Ok(Arc::new(move || {
            Box::new(Self { max_complexity }) as Box<dyn ValidationRule>
        }))
    }

    fn selection_set_complexity(
        ctx: &ValidationContext<'_>,
        parent_type: Option<&Arc<crate::types::GraphQLType>>,
        selection_set: &ast::SelectionSet,
        spread_stack: &mut Vec<String>,
    ) -> usize {
        let mut complexity = 0;
        for selection in &selection_set.items {
            complexity += match selection {
                ast::Selection::Field(field) => {
                    Self::field_complexity(ctx, parent_type, field, spread_stack)
                }
                ast::Selection::InlineFragment(inline) => {
                    let inline_parent = match &inline.type_condition {
                        Some(ast::TypeCondition::On(condition_name)) => {
                            ctx.schema().type_named(condition_name)
                        }
                        None => parent_type.cloned(),
                    };
                    Self::selection_set_complexity(
                        ctx,
                        inline_parent.as_ref(),
                        &inline.selection_set,
                        spread_stack,
                    )
                }
                ast::Selection::FragmentSpread(spread) => {
                    if spread_stack.contains(&spread.fragment_name) {
                        0
                    } else {
                        match ctx.fragment(spread.fragment_name.as_str()) {
                            Some(fragment) => {
                                let ast::TypeCondition::On(condition_name) =
                                    &fragment.type_condition;
                                let fragment_parent =
                                    ctx.schema().type_named(condition_name);
                                spread_stack.push(spread.fragment_name.clone());
                                let fragment_complexity =
                                    Self::selection_set_complexity(
                                        ctx,
                                        fragment_parent.as_ref(),
                                        &fragment.selection_set,
                                        spread_stack,
                                    );
                                spread_stack.pop();
                                fragment_complexity
                            }
                            None => 0,
                        }
                    }
                }
            };
        }
        complexity
    }

    fn field_complexity(
        ctx: &ValidationContext<'_>,
        parent_type: Option<&Arc<crate::types::GraphQLType>>,
        field: &ast::Field,
        spread_stack: &mut Vec<String>,
    ) -> usize {
        let field_def = parent_type.and_then(|parent| {
            TypeInfo::field_def_for(ctx.schema(), parent, field.name.as_str())
        });

        let child_parent = field_def
            .as_ref()
            .and_then(|def| def.type_annotation().innermost_named_type(ctx.schema()))
            .filter(|named| named.is_composite());
        let child_complexity = Self::selection_set_complexity(
            ctx,
            child_parent.as_ref(),
            &field.selection_set,
            spread_stack,
        );

        match field_def.as_ref().and_then(|def| def.complexity()) {
            Some(complexity_fn) => {
                let arguments = Self::resolved_arguments(ctx, field);
                complexity_fn(child_complexity, &arguments)
            }
            None => 1 + child_complexity,
        }
    }

    /// The field's arguments as host values, with variable references
    /// substituted from the request's raw variable values.
    fn resolved_arguments(
        ctx: &ValidationContext<'_>,
        field: &ast::Field,
    ) -> IndexMap<String, HostValue> {
        let mut arguments = IndexMap::new();
        for (name, value) in &field.arguments {
            arguments.insert(name.clone(), Self::resolve_value(ctx, value));
        }
        arguments
    }

    fn resolve_value(ctx: &ValidationContext<'_>, value: &ast::Value) -> HostValue {
        match value {
            ast::Value::Variable(variable_name) => ctx
                .variables()
                .get(variable_name)
                .cloned()
                .unwrap_or(HostValue::Null),
            ast::Value::Int(number) => HostValue::Int(number.as_i64().unwrap_or(0)),
            ast::Value::Float(float) => HostValue::Float(*float),
            ast::Value::String(string) => HostValue::Str(string.clone()),
            ast::Value::Boolean(boolean) => HostValue::Bool(*boolean),
            ast::Value::Null => HostValue::Null,
            ast::Value::Enum(name) => HostValue::Enum(name.clone()),
            ast::Value::List(items) => HostValue::List(
                items
                    .iter()
                    .map(|item| Self::resolve_value(ctx, item))
                    .collect(),
            ),
            ast::Value::Object(fields) => HostValue::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), Self::resolve_value(ctx, value)))
                    .collect(),
            ),
        }
    }
}
impl ValidationRule for QueryComplexity {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        operation: &ast::OperationDefinition,
    ) {
        if self.max_complexity == -1 {
            return;
        }

        let root_type = match ast::OperationKind::of(operation) {
            ast::OperationKind::Query => Some(ctx.schema().query_type()),
            ast::OperationKind::Mutation => ctx.schema().mutation_type(),
            ast::OperationKind::Subscription => ctx.schema().subscription_type(),
        };
        let mut spread_stack = vec![];
        let complexity = Self::selection_set_complexity(
            ctx,
            root_type.as_ref(),
            ast::operation_selection_set(operation),
            &mut spread_stack,
        );
        if complexity as i64 > self.max_complexity {
            ctx.report_error(
                GraphQLError::new(format!(
                    "Max query complexity should be {} but got {complexity}.",
                    self.max_complexity,
                ))
                .at(ast::operation_position(operation).into()),
            );
        }
    }
}
