use crate::ast;
use crate::error::GraphQLError;
use crate::schema::is_sub_type_of;
use crate::types::TypeAnnotation;
use crate::validation::ArgumentOwner;
use crate::validation::ValidationContext;
use crate::validation::ValidationRule;
use std::collections::HashMap;

/// At every usage site, a variable's declared type must be assignable to the
/// location's expected type.
///
/// Usages inside fragments count against every operation that (transitively)
/// spreads the fragment, so usages and spread edges are collected per scope
/// during the traversal and checked once the whole document has been walked.
#[derive(Default)]
pub struct VariablesInAllowedPosition {
    current_scope: Option<ScopeName>,
    /// Per scope: (variable name, expected location type, location default
    /// presence, position).
    usages: HashMap<ScopeName, Vec<VariableUsage>>,
    spreads: HashMap<ScopeName, Vec<String>>,
    /// Per operation: declared variable definitions.
    operations: Vec<(ScopeName, Vec<ast::VariableDefinition>, ast::AstPos)>,
}

type ScopeName = String;

#[derive(Clone)]
struct VariableUsage {
    variable_name: String,
    location_type: TypeAnnotation,
    location_has_default: bool,
    position: ast::AstPos,
}

impl VariablesInAllowedPosition {
    fn scope_for_operation(index: usize, operation: &ast::OperationDefinition) -> ScopeName {
        match ast::operation_name(operation) {
            Some(name) => format!("op:{name}"),
            None => format!("op#{index}"),
        }
    }

    fn record_usages_in_value(
        &mut self,
        value: &ast::Value,
        annotation: &TypeAnnotation,
        has_location_default: bool,
        position: ast::AstPos,
    ) {
        match value {
            ast::Value::Variable(variable_name) => {
                if let Some(scope) = &self.current_scope {
                    self.usages.entry(scope.clone()).or_default().push(
                        VariableUsage {
                            variable_name: variable_name.clone(),
                            location_type: annotation.clone(),
                            location_has_default: has_location_default,
                            position,
                        },
                    );
                }
            }
            ast::Value::List(items) => {
                if let TypeAnnotation::List { inner, .. } = annotation {
                    for item in items {
                        self.record_usages_in_value(item, inner, false, position);
                    }
                }
            }
            _ => {}
        }
    }
}

impl ValidationRule for VariablesInAllowedPosition {
    fn enter_operation(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        operation: &ast::OperationDefinition,
    ) {
        let index = self.operations.len();
        let scope = Self::scope_for_operation(index, operation);
        self.operations.push((
            scope.clone(),
            ast::operation_variable_definitions(operation).to_vec(),
            ast::operation_position(operation),
        ));
        self.current_scope = Some(scope);
    }

    fn enter_fragment_definition(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        fragment: &ast::FragmentDefinition,
    ) {
        self.current_scope = Some(format!("frag:{}", fragment.name));
    }

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut ValidationContext<'_>,
        spread: &ast::FragmentSpread,
    ) {
        if let Some(scope) = &self.current_scope {
            self.spreads
                .entry(scope.clone())
                .or_default()
                .push(format!("frag:{}", spread.fragment_name));
        }
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidationContext<'_>,
        _owner: ArgumentOwner<'_>,
        _name: &str,
        value: &ast::Value,
        position: ast::AstPos,
    ) {
        let Some(argument_def) = ctx.type_info().argument_def() else {
            return;
        };
        let annotation = argument_def.type_annotation().clone();
        let has_default = argument_def.default_value().is_some();
        self.record_argument_value(ctx, value, &annotation, has_default, position);
    }

    fn leave_document(&mut self, ctx: &mut ValidationContext<'_>, _document: &ast::Document) {
        let operations = std::mem::take(&mut self.operations);
        for (scope, variable_definitions, _position) in &operations {
            let definitions: HashMap<&str, &ast::VariableDefinition> = variable_definitions
                .iter()
                .map(|definition| (definition.name.as_str(), definition))
                .collect();

            let mut reachable: Vec<ScopeName> = vec![scope.clone()];
            let mut visited: Vec<ScopeName> = vec![];
            while let Some(current) = reachable.pop() {
                if visited.contains(&current) {
                    continue;
                }
                visited.push(current.clone());
                if let Some(next) = self.spreads.get(&current) {
                    reachable.extend(next.iter().cloned());
                }

                let Some(usages) = self.usages.get(&current) else {
                    continue;
                };
                for usage in usages {
                    let Some(definition) = definitions.get(usage.variable_name.as_str())
                    else {
                        // Undefined variable in this operation's scope.
                        ctx.report_error(
                            GraphQLError::new(format!(
                                "Variable \"${}\" is not defined.",
                                usage.variable_name,
                            ))
                            .at(usage.position.into()),
                        );
                        continue;
                    };

                    let declared = TypeAnnotation::from_ast_type(&definition.var_type);
                    let has_non_null_default = definition
                        .default_value
                        .as_ref()
                        .map(|default| !matches!(default, ast::Value::Null))
                        .unwrap_or(false);

                    // A nullable variable with a default still satisfies a
                    // non-null location.
                    let effective = if declared.nullable()
                        && !usage.location_type.nullable()
                        && (has_non_null_default || usage.location_has_default)
                    {
                        declared.clone().non_null()
                    } else {
                        declared.clone()
                    };

                    if !is_sub_type_of(ctx.schema(), &effective, &usage.location_type) {
                        ctx.report_error(
                            GraphQLError::new(format!(
                                "Variable \"${}\" of type \"{declared}\" used in \
                                position expecting type \"{}\".",
                                usage.variable_name, usage.location_type,
                            ))
                            .at(usage.position.into()),
                        );
                    }
                }
            }
        }
    }
}

impl VariablesInAllowedPosition {
    /// Record variable usages inside an argument value, tracking the
    /// expected type through list and input-object structure.
    fn record_argument_value(
        &mut self,
        ctx: &ValidationContext<'_>,
        value: &ast::Value,
        annotation: &TypeAnnotation,
        has_location_default: bool,
        position: ast::AstPos,
    ) {
        match value {
            ast::Value::Variable(_) | ast::Value::List(_) => {
                self.record_usages_in_value(value, annotation, has_location_default, position);
            }
            ast::Value::Object(fields) => {
                let Some(named_type) = annotation.innermost_named_type(ctx.schema()) else {
                    return;
                };
                let Some(input_object_type) = named_type.as_input_object() else {
                    return;
                };
                for (field_name, field_value) in fields {
                    if let Some(input_field) = input_object_type.field(field_name) {
                        let field_annotation = input_field.type_annotation().clone();
                        let field_has_default = input_field.default_value().is_some();
                        self.record_argument_value(
                            ctx,
                            field_value,
                            &field_annotation,
                            field_has_default,
                            position,
                        );
                    }
                }
            }
            _ => {}
        }
    }
}
