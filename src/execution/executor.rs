use crate::ast;
use crate::coerce::coerce_literal;
use crate::deferred::Deferred;
use crate::deferred::Settle;
use crate::error::FieldError;
use crate::error::GraphQLError;
use crate::execution::collect_fields::collect_fields;
use crate::execution::ResolveInfo;
use crate::execution::ResolverParams;
use crate::execution::ResponsePath;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::ResolverFn;
use crate::types::ResolverOutcome;
use crate::types::TypeAnnotation;
use crate::validation::TypeInfo;
use crate::value::Value;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// The outcome of completing one position of the response tree. `Err` means
/// a field error occurred at a non-null position and was already recorded;
/// the nearest nullable ancestor absorbs it by becoming null.
pub(crate) type Completed = Result<serde_json::Value, FieldFailure>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FieldFailure;

/// Per-request execution state. Owned behind `Rc` so deferred continuations
/// can capture it; nothing here is shared between requests.
pub(crate) struct ExecCtx {
    pub context_value: HostValue,
    pub default_resolver: ResolverFn,
    pub errors: RefCell<Vec<GraphQLError>>,
    pub fragments: HashMap<String, ast::FragmentDefinition>,
    pub operation: ast::OperationDefinition,
    pub root_value: HostValue,
    pub schema: Arc<Schema>,
    pub variables: IndexMap<String, HostValue>,
}
impl ExecCtx {
    pub(crate) fn record(&self, error: GraphQLError) {
        self.errors.borrow_mut().push(error);
    }
}

/// The host's default resolver: a property lookup by field name on the
/// parent value. Missing properties (and non-object parents) resolve to
/// null.
pub(crate) fn default_property_resolver(params: ResolverParams<'_>) -> ResolverOutcome {
    match params.source.property(params.info.field_name) {
        Some(value) => ResolverOutcome::ok(value.clone()),
        None => ResolverOutcome::ok(HostValue::Null),
    }
}

/// Execute the selected operation's top-level selection set against the
/// root type. Mutations run their top-level fields strictly sequentially;
/// queries and subscriptions start them in declaration order and let them
/// interleave through the scheduler.
pub(crate) fn execute_operation(
    ctx: &Rc<ExecCtx>,
    root_type: Arc<GraphQLType>,
    serial: bool,
) -> Deferred<Completed> {
    let selection_set = ast::operation_selection_set(&ctx.operation).clone();
    let grouped = collect_fields(
        &ctx.schema,
        &ctx.fragments,
        &ctx.variables,
        &root_type,
        &[&selection_set],
    );
    execute_fields(
        ctx,
        root_type,
        ctx.root_value.clone(),
        ResponsePath::root(),
        grouped,
        serial,
    )
}

fn execute_fields(
    ctx: &Rc<ExecCtx>,
    object_type: Arc<GraphQLType>,
    source: HostValue,
    path: ResponsePath,
    grouped: IndexMap<String, Vec<ast::Field>>,
    serial: bool,
) -> Deferred<Completed> {
    let mut entries: Vec<(String, Deferred<Completed>)> = vec![];

    for (response_key, nodes) in grouped {
        // A field with no definition is skipped entirely; validation owns
        // reporting it.
        let field_name = nodes[0].name.as_str();
        if TypeInfo::field_def_for(&ctx.schema, &object_type, field_name).is_none() {
            continue;
        }

        let field_deferred = resolve_grouped_field(
            ctx,
            Arc::clone(&object_type),
            source.clone(),
            response_key.clone(),
            nodes,
            path.clone(),
        );

        if serial {
            // Field n settles completely (its whole selection tree included)
            // before field n+1's resolver is invoked.
            let settled = match field_deferred.wait() {
                Ok(completed) => completed,
                Err(abandoned) => {
                    ctx.record(
                        GraphQLError::internal(abandoned.message)
                            .with_path(path.field(response_key.as_str()).to_vec()),
                    );
                    Err(FieldFailure)
                }
            };
            let failed = settled.is_err();
            entries.push((response_key, Deferred::fulfilled(settled)));
            if failed {
                break;
            }
        } else {
            entries.push((response_key, field_deferred));
        }
    }

    let keys: Vec<String> = entries.iter().map(|(key, _)| key.clone()).collect();
    let deferreds: Vec<Deferred<Completed>> =
        entries.into_iter().map(|(_, deferred)| deferred).collect();

    Deferred::all(deferreds).then(move |results| match results {
        Ok(results) => {
            let mut object = serde_json::Map::new();
            for (key, completed) in keys.into_iter().zip(results) {
                match completed {
                    Ok(json) => {
                        object.insert(key, json);
                    }
                    // A failed non-null field poisons the whole object.
                    Err(FieldFailure) => return Settle::Value(Err(FieldFailure)),
                }
            }
            Settle::Value(Ok(serde_json::Value::Object(object)))
        }
        Err(error) => Settle::Err(error),
    })
}

fn resolve_grouped_field(
    ctx: &Rc<ExecCtx>,
    object_type: Arc<GraphQLType>,
    source: HostValue,
    response_key: String,
    nodes: Vec<ast::Field>,
    parent_path: ResponsePath,
) -> Deferred<Completed> {
    let node = nodes[0].clone();
    let field_def = TypeInfo::field_def_for(&ctx.schema, &object_type, node.name.as_str())
        .expect("caller checked the field definition exists");
    let annotation = field_def.type_annotation().clone();
    let path = parent_path.field(response_key);

    // Coerce argument literals against the declared arguments, using the
    // variables map.
    let args = match build_argument_values(ctx, &field_def, &node) {
        Ok(args) => args,
        Err(message) => {
            return Deferred::fulfilled(field_error_outcome(
                ctx,
                FieldError::new(message),
                &node,
                &path,
                annotation.nullable(),
            ));
        }
    };

    let outcome = {
        let info = ResolveInfo {
            field_name: node.name.as_str(),
            field: &field_def,
            return_type: &annotation,
            parent_type: &object_type,
            path: &path,
            schema: &ctx.schema,
            fragments: &ctx.fragments,
            root_value: &ctx.root_value,
            operation: &ctx.operation,
            variable_values: &ctx.variables,
            field_nodes: &nodes,
        };
        let params = ResolverParams {
            source: &source,
            args: &args,
            context: &ctx.context_value,
            info: &info,
        };
        match field_def.resolver() {
            Some(resolver) => resolver(params),
            None => (ctx.default_resolver)(params),
        }
    };

    let nodes = Rc::new(nodes);
    match outcome {
        ResolverOutcome::Ready(Ok(value)) => complete_value(
            ctx,
            annotation,
            object_type.name().to_string(),
            node,
            nodes,
            path,
            value,
        ),
        ResolverOutcome::Ready(Err(error)) => Deferred::fulfilled(field_error_outcome(
            ctx,
            error,
            &node,
            &path,
            annotation.nullable(),
        )),
        ResolverOutcome::Deferred(deferred) => {
            let ctx = Rc::clone(ctx);
            let parent_name = object_type.name().to_string();
            deferred.then(move |result| match result {
                Ok(value) => Settle::Deferred(complete_value(
                    &ctx,
                    annotation,
                    parent_name,
                    node,
                    nodes,
                    path,
                    value,
                )),
                Err(error) => Settle::Value(field_error_outcome(
                    &ctx,
                    error,
                    &node,
                    &path,
                    annotation.nullable(),
                )),
            })
        }
    }
}

/// Record a field error (resolver raise or deferred rejection) and null the
/// field if its own position allows it.
fn field_error_outcome(
    ctx: &ExecCtx,
    error: FieldError,
    node: &ast::Field,
    path: &ResponsePath,
    nullable: bool,
) -> Completed {
    let graphql_error = if error.is_client_safe {
        GraphQLError::new(error.message)
    } else {
        GraphQLError::internal(error.message)
    };
    ctx.record(
        graphql_error
            .at(node.position.into())
            .with_path(path.to_vec()),
    );
    if nullable {
        Ok(serde_json::Value::Null)
    } else {
        Err(FieldFailure)
    }
}

fn build_argument_values(
    ctx: &ExecCtx,
    field_def: &Field,
    node: &ast::Field,
) -> Result<IndexMap<String, HostValue>, String> {
    let mut args = IndexMap::new();

    for argument_def in field_def.arguments().values() {
        let provided = node
            .arguments
            .iter()
            .find(|(name, _)| name == argument_def.name())
            .map(|(_, value)| Value::from_ast(value));

        match provided {
            Some(literal) => {
                match coerce_literal(
                    &literal,
                    argument_def.type_annotation(),
                    &ctx.schema,
                    &ctx.variables,
                ) {
                    Some(value) => {
                        args.insert(argument_def.name().to_string(), value);
                    }
                    None => match &literal {
                        // An unset variable behaves as if the argument were
                        // absent entirely.
                        Value::Variable(variable_name) => {
                            apply_default_or_require(
                                ctx,
                                argument_def,
                                &mut args,
                                Some(variable_name),
                            )?;
                        }
                        other => {
                            return Err(format!(
                                "Argument \"{}\" has invalid value {other}.",
                                argument_def.name(),
                            ));
                        }
                    },
                }
            }
            None => {
                apply_default_or_require(ctx, argument_def, &mut args, None)?;
            }
        }
    }

    Ok(args)
}

fn apply_default_or_require(
    ctx: &ExecCtx,
    argument_def: &crate::types::Argument,
    args: &mut IndexMap<String, HostValue>,
    unset_variable: Option<&String>,
) -> Result<(), String> {
    if let Some(default) = argument_def.default_value() {
        if let Some(value) = coerce_literal(
            default,
            argument_def.type_annotation(),
            &ctx.schema,
            &ctx.variables,
        ) {
            args.insert(argument_def.name().to_string(), value);
        }
        return Ok(());
    }
    if !argument_def.type_annotation().nullable() {
        return Err(match unset_variable {
            Some(variable_name) => format!(
                "Argument \"{}\" of required type \"{}\" was provided the variable \
                \"${variable_name}\" which was not provided a runtime value.",
                argument_def.name(),
                argument_def.type_annotation(),
            ),
            None => format!(
                "Argument \"{}\" of required type \"{}\" was not provided.",
                argument_def.name(),
                argument_def.type_annotation(),
            ),
        });
    }
    Ok(())
}

/// Complete a resolved value against its declared type. The returned
/// deferred settles with `Err` only when this position is non-null and a
/// field error occurred at or below it.
fn complete_value(
    ctx: &Rc<ExecCtx>,
    annotation: TypeAnnotation,
    parent_name: String,
    node: ast::Field,
    nodes: Rc<Vec<ast::Field>>,
    path: ResponsePath,
    value: HostValue,
) -> Deferred<Completed> {
    let nullable = annotation.nullable();

    if value.is_null() {
        if nullable {
            return Deferred::fulfilled(Ok(serde_json::Value::Null));
        }
        ctx.record(
            GraphQLError::new(format!(
                "Cannot return null for non-nullable field {parent_name}.{}",
                node.name,
            ))
            .at(node.position.into())
            .with_path(path.to_vec()),
        );
        return Deferred::fulfilled(Err(FieldFailure));
    }

    match annotation {
        TypeAnnotation::List { inner, .. } => {
            let HostValue::List(items) = value else {
                ctx.record(
                    GraphQLError::internal(format!(
                        "Expected Iterable, but did not find one for field \
                        {parent_name}.{}.",
                        node.name,
                    ))
                    .at(node.position.into())
                    .with_path(path.to_vec()),
                );
                return Deferred::fulfilled(absorb(nullable));
            };

            let element_deferreds: Vec<Deferred<Completed>> = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    complete_value(
                        ctx,
                        (*inner).clone(),
                        parent_name.clone(),
                        node.clone(),
                        Rc::clone(&nodes),
                        path.index(index),
                        item,
                    )
                })
                .collect();

            Deferred::all(element_deferreds).then(move |results| match results {
                Ok(results) => {
                    let mut completed_items = Vec::with_capacity(results.len());
                    for completed in results {
                        match completed {
                            Ok(json) => completed_items.push(json),
                            // A failed non-null element poisons the list.
                            Err(FieldFailure) => return Settle::Value(absorb(nullable)),
                        }
                    }
                    Settle::Value(Ok(serde_json::Value::Array(completed_items)))
                }
                Err(error) => Settle::Err(error),
            })
        }

        TypeAnnotation::Named { type_ref, .. } => {
            let Ok(named_type) = type_ref.try_deref(&ctx.schema) else {
                ctx.record(
                    GraphQLError::internal(format!(
                        "Unknown type \"{}\" for field {parent_name}.{}.",
                        type_ref.name(),
                        node.name,
                    ))
                    .at(node.position.into())
                    .with_path(path.to_vec()),
                );
                return Deferred::fulfilled(absorb(nullable));
            };

            match named_type.as_ref() {
                GraphQLType::Scalar(scalar_type) => {
                    let completed = match scalar_type.serialize(&value) {
                        Ok(serialized) => match serde_json::Value::try_from(&serialized) {
                            Ok(json) => Ok(json),
                            Err(cause) => {
                                ctx.record(
                                    GraphQLError::internal(cause)
                                        .at(node.position.into())
                                        .with_path(path.to_vec()),
                                );
                                absorb(nullable)
                            }
                        },
                        Err(cause) => {
                            ctx.record(
                                GraphQLError::internal(cause)
                                    .at(node.position.into())
                                    .with_path(path.to_vec()),
                            );
                            absorb(nullable)
                        }
                    };
                    Deferred::fulfilled(completed)
                }

                GraphQLType::Enum(enum_type) => {
                    let variant_name = match &value {
                        HostValue::Enum(name) | HostValue::Str(name)
                            if enum_type.variant(name).is_some() =>
                        {
                            Some(name.clone())
                        }
                        other => enum_type
                            .variant_for_payload(other)
                            .map(|variant| variant.name().to_string()),
                    };
                    let completed = match variant_name {
                        Some(name) => Ok(serde_json::Value::String(name)),
                        None => {
                            ctx.record(
                                GraphQLError::internal(format!(
                                    "Enum \"{}\" cannot represent value: {value:?}",
                                    enum_type.name(),
                                ))
                                .at(node.position.into())
                                .with_path(path.to_vec()),
                            );
                            absorb(nullable)
                        }
                    };
                    Deferred::fulfilled(completed)
                }

                composite if composite.is_composite() => complete_composite(
                    ctx,
                    Arc::clone(&named_type),
                    nullable,
                    parent_name,
                    node,
                    nodes,
                    path,
                    value,
                ),

                input_only => {
                    ctx.record(
                        GraphQLError::internal(format!(
                            "Field {parent_name}.{} has a non-output type \"{}\".",
                            node.name,
                            input_only.name(),
                        ))
                        .at(node.position.into())
                        .with_path(path.to_vec()),
                    );
                    Deferred::fulfilled(absorb(nullable))
                }
            }
        }
    }
}

fn absorb(nullable: bool) -> Completed {
    if nullable {
        Ok(serde_json::Value::Null)
    } else {
        Err(FieldFailure)
    }
}

#[allow(clippy::too_many_arguments)]
fn complete_composite(
    ctx: &Rc<ExecCtx>,
    declared_type: Arc<GraphQLType>,
    nullable: bool,
    parent_name: String,
    node: ast::Field,
    nodes: Rc<Vec<ast::Field>>,
    path: ResponsePath,
    value: HostValue,
) -> Deferred<Completed> {
    let concrete = if declared_type.is_abstract() {
        match resolve_concrete_type(ctx, &declared_type, &parent_name, &node, &value) {
            Ok(concrete) => concrete,
            Err(message) => {
                ctx.record(
                    GraphQLError::internal(message)
                        .at(node.position.into())
                        .with_path(path.to_vec()),
                );
                return Deferred::fulfilled(absorb(nullable));
            }
        }
    } else {
        declared_type
    };

    let selection_sets: Vec<&ast::SelectionSet> =
        nodes.iter().map(|field| &field.selection_set).collect();
    let grouped = collect_fields(
        &ctx.schema,
        &ctx.fragments,
        &ctx.variables,
        &concrete,
        &selection_sets,
    );

    execute_fields(ctx, concrete, value, path, grouped, false).then(move |result| {
        match result {
            Ok(Ok(json)) => Settle::Value(Ok(json)),
            Ok(Err(FieldFailure)) => Settle::Value(absorb(nullable)),
            Err(error) => Settle::Err(error),
        }
    })
}

/// Resolve the concrete object type for a value completed at an abstract
/// position: the type's own `resolve_type` first, each possible type's
/// `is_type_of` second, error third.
fn resolve_concrete_type(
    ctx: &Rc<ExecCtx>,
    abstract_type: &Arc<GraphQLType>,
    parent_name: &str,
    node: &ast::Field,
    value: &HostValue,
) -> Result<Arc<GraphQLType>, String> {
    let resolve_type = match abstract_type.as_ref() {
        GraphQLType::Interface(interface_type) => interface_type.resolve_type(),
        GraphQLType::Union(union_type) => union_type.resolve_type(),
        _ => None,
    };

    if let Some(resolve_type) = resolve_type {
        let Some(type_name) = resolve_type(value) else {
            return Err(format!(
                "Abstract type \"{}\" must resolve to an Object type at runtime \
                for field {parent_name}.{}.",
                abstract_type.name(),
                node.name,
            ));
        };
        let Some(concrete) = ctx.schema.type_named(&type_name) else {
            return Err(format!(
                "Abstract type \"{}\" was resolved to a type \"{type_name}\" \
                that does not exist inside the schema.",
                abstract_type.name(),
            ));
        };
        if !ctx.schema.is_possible_type(abstract_type, concrete.name()) {
            return Err(format!(
                "Runtime Object type \"{type_name}\" is not a possible type \
                for \"{}\".",
                abstract_type.name(),
            ));
        }
        return Ok(concrete);
    }

    for possible in ctx.schema.possible_types(abstract_type) {
        if let Some(object_type) = possible.as_object() {
            if let Some(is_type_of) = object_type.is_type_of() {
                if is_type_of(value) {
                    return Ok(possible);
                }
            }
        }
    }

    Err(format!(
        "Abstract type \"{}\" must resolve to an Object type at runtime for \
        field {parent_name}.{}. Either the \"{}\" type should provide a \
        \"resolve_type\" function or each possible type should provide an \
        \"is_type_of\" function.",
        abstract_type.name(),
        node.name,
        abstract_type.name(),
    ))
}
