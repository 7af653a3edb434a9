use crate::ast;
use crate::deferred::PromiseAdapter;
use crate::deferred::SyncPromiseAdapter;
use crate::error::GraphQLError;
use crate::error::Response;
use crate::execution::executor;
use crate::execution::executor::ExecCtx;
use crate::execution::variables::coerce_variable_values;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::ResolverFn;
use crate::types::ResolverOutcome;
use crate::validation;
use crate::validation::ValidationRuleFactory;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// The query to execute: source text (parsed here) or a pre-parsed
/// document.
pub enum Source {
    Text(String),
    Document(ast::Document),
}
impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}
impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}
impl From<ast::Document> for Source {
    fn from(document: ast::Document) -> Self {
        Source::Document(document)
    }
}

/// Everything one request needs. Construct with [`ExecuteParams::new`] and
/// chain the optional setters.
pub struct ExecuteParams {
    schema: Arc<Schema>,
    source: Source,
    root_value: HostValue,
    context_value: HostValue,
    variable_values: IndexMap<String, HostValue>,
    operation_name: Option<String>,
    field_resolver: Option<ResolverFn>,
    validation_rules: Option<Vec<ValidationRuleFactory>>,
    promise_adapter: Box<dyn PromiseAdapter>,
}
impl ExecuteParams {
    pub fn new(schema: Arc<Schema>, source: impl Into<Source>) -> Self {
        Self {
            schema,
            source: source.into(),
            root_value: HostValue::Null,
            context_value: HostValue::Null,
            variable_values: IndexMap::new(),
            operation_name: None,
            field_resolver: None,
            validation_rules: None,
            promise_adapter: Box::new(SyncPromiseAdapter),
        }
    }

    /// The value passed to top-level resolvers as `source`.
    pub fn root_value(mut self, root_value: impl Into<HostValue>) -> Self {
        self.root_value = root_value.into();
        self
    }

    /// An opaque value forwarded to every resolver.
    pub fn context_value(mut self, context_value: impl Into<HostValue>) -> Self {
        self.context_value = context_value.into();
        self
    }

    /// Raw (JSON-like) variable values, keyed by variable name.
    pub fn variable_values(mut self, variable_values: IndexMap<String, HostValue>) -> Self {
        self.variable_values = variable_values;
        self
    }

    /// Selects among multiple operations in the document.
    pub fn operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    /// The default resolver used when a field has none. Defaults to the
    /// property lookup resolver.
    pub fn field_resolver(
        mut self,
        field_resolver: impl Fn(crate::execution::ResolverParams<'_>) -> ResolverOutcome
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.field_resolver = Some(Arc::new(field_resolver));
        self
    }

    /// Overrides the default rule set. An empty list disables validation.
    pub fn validation_rules(mut self, validation_rules: Vec<ValidationRuleFactory>) -> Self {
        self.validation_rules = Some(validation_rules);
        self
    }

    /// Plugs in an external async integration.
    pub fn promise_adapter(mut self, promise_adapter: impl PromiseAdapter + 'static) -> Self {
        self.promise_adapter = Box::new(promise_adapter);
        self
    }

    pub fn execute(self) -> Response {
        execute(self)
    }
}

/// Validate and execute one request, producing the complete response.
///
/// Syntax and validation errors skip execution and come back with `data`
/// omitted; variable coercion errors come back with `data: null`; execution
/// errors attach to `errors` alongside whatever partial `data` completed.
pub fn execute(params: ExecuteParams) -> Response {
    let document = match params.source {
        Source::Document(document) => document,
        Source::Text(text) => match ast::parse(&text) {
            Ok(document) => document,
            Err(parse_error) => {
                return Response::from_errors(vec![GraphQLError::new(format!(
                    "Syntax Error: {parse_error}",
                ))]);
            }
        },
    };

    // Validation. An explicit empty rule list disables it.
    let rules = params
        .validation_rules
        .unwrap_or_else(validation::default_rules);
    if !rules.is_empty() {
        let errors = validation::validate(
            &params.schema,
            &document,
            &params.variable_values,
            &rules,
        );
        if !errors.is_empty() {
            return Response::from_errors(errors);
        }
    }

    // Operation selection.
    let operation = match select_operation(&document, params.operation_name.as_deref()) {
        Ok(operation) => operation.clone(),
        Err(error) => return Response::from_errors(vec![error]),
    };

    let root_type = match root_type_for(&params.schema, &operation) {
        Ok(root_type) => root_type,
        Err(error) => return Response::from_errors(vec![error]),
    };

    // Upfront variable coercion; failures abort with `data: null`.
    let variables = match coerce_variable_values(
        &params.schema,
        ast::operation_variable_definitions(&operation),
        &params.variable_values,
    ) {
        Ok(variables) => variables,
        Err(errors) => {
            return Response::from_data(serde_json::Value::Null, errors);
        }
    };

    let fragments: HashMap<String, ast::FragmentDefinition> = document
        .definitions
        .iter()
        .filter_map(|def| match def {
            ast::Definition::Fragment(fragment) => {
                Some((fragment.name.clone(), fragment.clone()))
            }
            ast::Definition::Operation(_) => None,
        })
        .collect();

    let serial = ast::OperationKind::of(&operation) == ast::OperationKind::Mutation;

    let ctx = Rc::new(ExecCtx {
        context_value: params.context_value,
        default_resolver: params
            .field_resolver
            .unwrap_or_else(|| Arc::new(executor::default_property_resolver)),
        errors: RefCell::new(vec![]),
        fragments,
        operation,
        root_value: params.root_value,
        schema: Arc::clone(&params.schema),
        variables,
    });

    let root_deferred = executor::execute_operation(&ctx, root_type, serial);
    params.promise_adapter.drain(&wrap_for_adapter(&root_deferred));

    let data = match root_deferred.wait() {
        Ok(Ok(json)) => json,
        Ok(Err(_)) => serde_json::Value::Null,
        Err(abandoned) => {
            ctx.record(GraphQLError::internal(abandoned.message));
            serde_json::Value::Null
        }
    };

    let errors = ctx.errors.borrow().clone();
    Response::from_data(data, errors)
}

/// The adapter drains against a `Deferred<HostValue>` view of the root; the
/// value itself is irrelevant, only settledness is observed.
fn wrap_for_adapter(
    root: &crate::deferred::Deferred<executor::Completed>,
) -> crate::deferred::Deferred<HostValue> {
    root.then(|result| match result {
        Ok(_) => crate::deferred::Settle::Value(HostValue::Null),
        Err(error) => crate::deferred::Settle::Err(error),
    })
}

fn select_operation<'a>(
    document: &'a ast::Document,
    operation_name: Option<&str>,
) -> Result<&'a ast::OperationDefinition, GraphQLError> {
    let operations: Vec<&ast::OperationDefinition> = document
        .definitions
        .iter()
        .filter_map(|def| match def {
            ast::Definition::Operation(operation) => Some(operation),
            ast::Definition::Fragment(_) => None,
        })
        .collect();

    match operation_name {
        None => {
            if operations.len() > 1 {
                return Err(GraphQLError::new(
                    "Must provide operation name if query contains multiple operations.",
                ));
            }
            operations
                .first()
                .copied()
                .ok_or_else(|| GraphQLError::new("Must provide an operation."))
        }
        Some(name) => operations
            .iter()
            .find(|operation| ast::operation_name(operation) == Some(name))
            .copied()
            .ok_or_else(|| {
                GraphQLError::new(format!("Unknown operation named \"{name}\"."))
            }),
    }
}

fn root_type_for(
    schema: &Schema,
    operation: &ast::OperationDefinition,
) -> Result<Arc<GraphQLType>, GraphQLError> {
    match ast::OperationKind::of(operation) {
        ast::OperationKind::Query => Ok(schema.query_type()),
        ast::OperationKind::Mutation => schema.mutation_type().ok_or_else(|| {
            GraphQLError::new("Schema is not configured to execute mutation operation.")
                .at(ast::operation_position(operation).into())
        }),
        ast::OperationKind::Subscription => schema.subscription_type().ok_or_else(|| {
            GraphQLError::new("Schema is not configured to execute subscription operation.")
                .at(ast::operation_position(operation).into())
        }),
    }
}
