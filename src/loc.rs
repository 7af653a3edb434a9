use crate::ast;
use serde::Serialize;

/// A line/column position within the source text of an executable document.
///
/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), but kept as a
/// distinct type so error serialization doesn't depend on parser internals.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}
impl SourcePosition {
    pub(crate) fn from_pos(pos: ast::AstPos) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
        }
    }
}
impl std::convert::From<ast::AstPos> for SourcePosition {
    fn from(pos: ast::AstPos) -> Self {
        Self::from_pos(pos)
    }
}
impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Indicates where a schema definition came from.
///
/// Schemas are assembled programmatically, so most definitions carry either
/// [`SchemaDefLocation::HostDefined`] or [`SchemaDefLocation::GraphQLBuiltIn`]
/// (for the standard scalars, built-in directives, and introspection types).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SchemaDefLocation {
    GraphQLBuiltIn,
    HostDefined,
}
impl SchemaDefLocation {
    pub fn is_builtin(&self) -> bool {
        matches!(self, SchemaDefLocation::GraphQLBuiltIn)
    }
}
