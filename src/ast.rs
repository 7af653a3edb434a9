//! Type aliases over the executable-document AST produced by the external
//! [`graphql_parser`] crate.
//!
//! The engine never defines its own lexer or parser; everything downstream
//! (validation, execution) operates on these aliased node types. All nodes
//! are immutable after parse and support deep cloning via `Clone`.

pub use graphql_parser::query::ParseError;

pub type AstPos = graphql_parser::Pos;

pub type Definition = graphql_parser::query::Definition<'static, String>;
pub type Directive = graphql_parser::query::Directive<'static, String>;
pub type Document = graphql_parser::query::Document<'static, String>;
pub type Field = graphql_parser::query::Field<'static, String>;
pub type FragmentDefinition = graphql_parser::query::FragmentDefinition<'static, String>;
pub type FragmentSpread = graphql_parser::query::FragmentSpread<'static, String>;
pub type InlineFragment = graphql_parser::query::InlineFragment<'static, String>;
pub type Mutation = graphql_parser::query::Mutation<'static, String>;
pub type OperationDefinition = graphql_parser::query::OperationDefinition<'static, String>;
pub type Query = graphql_parser::query::Query<'static, String>;
pub type Selection = graphql_parser::query::Selection<'static, String>;
pub type SelectionSet = graphql_parser::query::SelectionSet<'static, String>;
pub type Subscription = graphql_parser::query::Subscription<'static, String>;
pub type Type = graphql_parser::query::Type<'static, String>;
pub type TypeCondition = graphql_parser::query::TypeCondition<'static, String>;
pub type Value = graphql_parser::query::Value<'static, String>;
pub type VariableDefinition = graphql_parser::query::VariableDefinition<'static, String>;

pub mod singletons {
    use crate::ast;

    lazy_static::lazy_static! {
        /// The declared type of the `if` argument on `@skip` and `@include`.
        pub static ref NONNULL_BOOLEAN_TYPE: ast::Type = {
            ast::Type::NonNullType(Box::new(
                ast::Type::NamedType("Boolean".to_string()),
            ))
        };
    }
}

/// Parse an executable document from source text.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    Ok(graphql_parser::parse_query::<String>(source)?.into_static())
}

/// The name of an operation definition, if it has one.
pub fn operation_name(op: &OperationDefinition) -> Option<&str> {
    match op {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(query) => query.name.as_deref(),
        OperationDefinition::Mutation(mutation) => mutation.name.as_deref(),
        OperationDefinition::Subscription(subscription) => subscription.name.as_deref(),
    }
}

/// The position at which an operation definition starts.
pub fn operation_position(op: &OperationDefinition) -> AstPos {
    match op {
        OperationDefinition::SelectionSet(sel_set) => sel_set.span.0,
        OperationDefinition::Query(query) => query.position,
        OperationDefinition::Mutation(mutation) => mutation.position,
        OperationDefinition::Subscription(subscription) => subscription.position,
    }
}

/// The top-level selection set of an operation definition.
pub fn operation_selection_set(op: &OperationDefinition) -> &SelectionSet {
    match op {
        OperationDefinition::SelectionSet(sel_set) => sel_set,
        OperationDefinition::Query(query) => &query.selection_set,
        OperationDefinition::Mutation(mutation) => &mutation.selection_set,
        OperationDefinition::Subscription(subscription) => &subscription.selection_set,
    }
}

/// The variable definitions declared by an operation definition.
pub fn operation_variable_definitions(op: &OperationDefinition) -> &[VariableDefinition] {
    match op {
        OperationDefinition::SelectionSet(_) => &[],
        OperationDefinition::Query(query) => &query.variable_definitions,
        OperationDefinition::Mutation(mutation) => &mutation.variable_definitions,
        OperationDefinition::Subscription(subscription) => &subscription.variable_definitions,
    }
}

/// The directives annotating an operation definition.
pub fn operation_directives(op: &OperationDefinition) -> &[Directive] {
    match op {
        OperationDefinition::SelectionSet(_) => &[],
        OperationDefinition::Query(query) => &query.directives,
        OperationDefinition::Mutation(mutation) => &mutation.directives,
        OperationDefinition::Subscription(subscription) => &subscription.directives,
    }
}

/// Which of the three operation kinds an operation definition is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}
impl OperationKind {
    pub fn of(op: &OperationDefinition) -> Self {
        match op {
            OperationDefinition::SelectionSet(_) | OperationDefinition::Query(_) => Self::Query,
            OperationDefinition::Mutation(_) => Self::Mutation,
            OperationDefinition::Subscription(_) => Self::Subscription,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

/// Render a literal value the way it would appear in a document. Used in
/// validation error messages.
pub fn print_value(value: &Value) -> String {
    format!("{value}")
}
