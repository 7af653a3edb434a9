use crate::ast;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::NamedGraphQLTypeRef;
use std::sync::Arc;

/// Represents the annotated type for a [`Field`](crate::types::Field),
/// operation variable, [`Argument`](crate::types::Argument), or
/// [`InputField`](crate::types::InputField).
///
/// Wrapping is expressed structurally: a list annotation wraps an inner
/// annotation and either flavor carries its own nullability, so a non-null
/// can never wrap another non-null.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotation {
    List {
        inner: Box<TypeAnnotation>,
        nullable: bool,
    },
    Named {
        type_ref: NamedGraphQLTypeRef,
        nullable: bool,
    },
}
impl TypeAnnotation {
    /// A nullable reference to a named type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeAnnotation::Named {
            type_ref: NamedGraphQLTypeRef::new(name),
            nullable: true,
        }
    }

    /// A non-null reference to a named type.
    pub fn non_null_named(name: impl Into<String>) -> Self {
        TypeAnnotation::Named {
            type_ref: NamedGraphQLTypeRef::new(name),
            nullable: true,
        }
        .non_null()
    }

    /// A nullable list wrapping `inner`.
    pub fn list(inner: TypeAnnotation) -> Self {
        TypeAnnotation::List {
            inner: Box::new(inner),
            nullable: true,
        }
    }

    /// This annotation with nullability stripped.
    pub fn non_null(self) -> Self {
        match self {
            TypeAnnotation::List { inner, .. } => TypeAnnotation::List {
                inner,
                nullable: false,
            },
            TypeAnnotation::Named { type_ref, .. } => TypeAnnotation::Named {
                type_ref,
                nullable: false,
            },
        }
    }

    /// This annotation with nullability restored. Used when comparing a
    /// non-null location against a variable declared nullable.
    pub fn nullable_clone(&self) -> Self {
        match self {
            TypeAnnotation::List { inner, .. } => TypeAnnotation::List {
                inner: inner.clone(),
                nullable: true,
            },
            TypeAnnotation::Named { type_ref, .. } => TypeAnnotation::Named {
                type_ref: type_ref.clone(),
                nullable: true,
            },
        }
    }

    pub(crate) fn from_ast_type(ast_type: &ast::Type) -> Self {
        Self::from_ast_type_impl(ast_type, /* nullable = */ true)
    }

    fn from_ast_type_impl(ast_type: &ast::Type, nullable: bool) -> Self {
        match ast_type {
            ast::Type::ListType(inner) => TypeAnnotation::List {
                inner: Box::new(Self::from_ast_type_impl(inner, true)),
                nullable,
            },

            ast::Type::NamedType(name) => TypeAnnotation::Named {
                type_ref: NamedGraphQLTypeRef::new(name.clone()),
                nullable,
            },

            ast::Type::NonNullType(inner) => Self::from_ast_type_impl(inner, false),
        }
    }

    /// Indicates if this annotation is [nullable or
    /// non-nullable](https://spec.graphql.org/October2021/#sec-Non-Null).
    pub fn nullable(&self) -> bool {
        match self {
            TypeAnnotation::List { nullable, .. } => *nullable,
            TypeAnnotation::Named { nullable, .. } => *nullable,
        }
    }

    pub fn as_list(&self) -> Option<&TypeAnnotation> {
        match self {
            TypeAnnotation::List { inner, .. } => Some(inner),
            TypeAnnotation::Named { .. } => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeAnnotation::List { .. })
    }

    /// Recursively unwrap list wrappers and return the innermost named type
    /// reference.
    pub fn innermost_named_type_ref(&self) -> &NamedGraphQLTypeRef {
        match self {
            TypeAnnotation::List { inner, .. } => inner.innermost_named_type_ref(),
            TypeAnnotation::Named { type_ref, .. } => type_ref,
        }
    }

    /// Resolve the named type at this annotation's outermost position, if the
    /// outermost position is named (not a list).
    pub fn named_type(&self, schema: &Schema) -> Option<Arc<GraphQLType>> {
        match self {
            TypeAnnotation::List { .. } => None,
            TypeAnnotation::Named { type_ref, .. } => type_ref.try_deref(schema).ok(),
        }
    }

    /// Resolve the innermost named type through `schema`.
    pub fn innermost_named_type(&self, schema: &Schema) -> Option<Arc<GraphQLType>> {
        self.innermost_named_type_ref().try_deref(schema).ok()
    }
}
impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::List { inner, nullable } => {
                write!(f, "[{inner}]{}", if *nullable { "" } else { "!" })
            }
            TypeAnnotation::Named { type_ref, nullable } => {
                write!(f, "{}{}", type_ref.name(), if *nullable { "" } else { "!" })
            }
        }
    }
}
