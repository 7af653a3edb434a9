use crate::schema::type_validation;
use crate::schema::Schema;
use crate::schema::TypeLoaderFn;
use crate::schema::TypeValidationError;
use crate::types::Directive;
use crate::types::GraphQLType;
use crate::types::NamedGraphQLTypeRef;
use crate::types::TypeAnnotation;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error(
        "The `{type_name}.{field_name}` field declares the `{argument_name}` \
        argument more than once"
    )]
    DuplicateArgumentName {
        type_name: String,
        field_name: String,
        argument_name: String,
    },

    #[error("The `{type_name}` enum declares the `{variant_name}` value more than once")]
    DuplicateEnumVariant {
        type_name: String,
        variant_name: String,
    },

    #[error("The `{type_name}` type declares the `{field_name}` field more than once")]
    DuplicateFieldName {
        type_name: String,
        field_name: String,
    },

    #[error("A type named `{type_name}` is registered more than once")]
    DuplicateTypeName { type_name: String },

    #[error("The `{type_name}` union declares the `{member_name}` member more than once")]
    DuplicateUnionMember {
        type_name: String,
        member_name: String,
    },

    #[error("No query root operation type was defined")]
    NoQueryOperationTypeDefined,

    #[error(
        "The `{referencing_type}` type references the undefined type `{referenced_type}`"
    )]
    UndefinedTypeReference {
        referencing_type: String,
        referenced_type: String,
    },

    #[error("The `{root}` root operation type `{type_name}` is not defined in the schema")]
    UndefinedRootType { root: String, type_name: String },

    #[error(transparent)]
    TypeValidationError(Box<TypeValidationError>),
}
impl From<TypeValidationError> for SchemaBuildError {
    fn from(error: TypeValidationError) -> Self {
        SchemaBuildError::TypeValidationError(Box::new(error))
    }
}

/// Assembles and validates a [`Schema`].
///
/// Types register by value and reference each other by name, so mutually
/// recursive definitions need no special handling. `build()` verifies every
/// reference resolves (unless a lazy type loader is configured) and enforces
/// the structural invariants of the type system.
pub struct SchemaBuilder {
    directives: Vec<Directive>,
    mutation_type: Option<String>,
    query_type: Option<String>,
    subscription_type: Option<String>,
    type_loader: Option<TypeLoaderFn>,
    types: Vec<GraphQLType>,
}
impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            directives: vec![],
            mutation_type: None,
            query_type: None,
            subscription_type: None,
            type_loader: None,
            types: vec![],
        }
    }

    /// Register a named type. Anything convertible into [`GraphQLType`]
    /// works, so `register(obj_type)` and `register(enum_type)` both read
    /// naturally.
    pub fn register(mut self, graphql_type: impl Into<GraphQLType>) -> Self {
        self.types.push(graphql_type.into());
        self
    }

    pub fn directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn query_root(mut self, type_name: impl Into<String>) -> Self {
        self.query_type = Some(type_name.into());
        self
    }

    pub fn mutation_root(mut self, type_name: impl Into<String>) -> Self {
        self.mutation_type = Some(type_name.into());
        self
    }

    pub fn subscription_root(mut self, type_name: impl Into<String>) -> Self {
        self.subscription_type = Some(type_name.into());
        self
    }

    /// Configure a lazy type loader consulted for names absent from the
    /// registered type map. With a loader configured, unresolved references
    /// are not a build error.
    pub fn type_loader(
        mut self,
        loader: impl Fn(&str) -> Option<Arc<GraphQLType>> + Send + Sync + 'static,
    ) -> Self {
        self.type_loader = Some(Arc::new(loader));
        self
    }

    pub fn build(self) -> Result<Schema> {
        let query_type = self
            .query_type
            .ok_or(SchemaBuildError::NoQueryOperationTypeDefined)?;

        let mut types: HashMap<String, Arc<GraphQLType>> = HashMap::new();
        for builtin in crate::types::scalar_type::builtins::all() {
            types.insert(builtin.name().to_string(), Arc::new(builtin.into()));
        }
        for introspection_type in crate::introspection::introspection_types() {
            types.insert(
                introspection_type.name().to_string(),
                Arc::new(introspection_type),
            );
        }
        for registered in self.types {
            let type_name = registered.name().to_string();
            if types.insert(type_name.clone(), Arc::new(registered)).is_some() {
                return Err(SchemaBuildError::DuplicateTypeName { type_name });
            }
        }

        let mut directive_defs: HashMap<String, Arc<Directive>> = HashMap::new();
        for builtin in [Directive::Skip, Directive::Include, Directive::Deprecated] {
            directive_defs.insert(builtin.name().to_string(), Arc::new(builtin));
        }
        for directive in self.directives {
            directive_defs.insert(directive.name().to_string(), Arc::new(directive));
        }

        for (root, type_name) in [
            ("query", Some(&query_type)),
            ("mutation", self.mutation_type.as_ref()),
            ("subscription", self.subscription_type.as_ref()),
        ] {
            let Some(type_name) = type_name else {
                continue;
            };
            if !types.contains_key(type_name.as_str()) && self.type_loader.is_none() {
                return Err(SchemaBuildError::UndefinedRootType {
                    root: root.to_string(),
                    type_name: type_name.clone(),
                });
            }
        }

        let schema = Schema {
            directive_defs,
            loader_cache: Mutex::new(HashMap::new()),
            mutation_type: self.mutation_type.map(NamedGraphQLTypeRef::new),
            query_type: NamedGraphQLTypeRef::new(query_type),
            subscription_type: self.subscription_type.map(NamedGraphQLTypeRef::new),
            type_loader: self.type_loader,
            types,
        };

        if schema.type_loader.is_none() {
            check_references(&schema)?;
        }
        type_validation::validate_schema(&schema)?;

        Ok(schema)
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One-time transitive scan from the root types, directive argument types,
/// and registered types: every named reference must resolve.
fn check_references(schema: &Schema) -> Result<()> {
    let mut visited: HashSet<String> = HashSet::new();

    for graphql_type in schema.types.values() {
        check_type_references(schema, graphql_type, &mut visited)?;
    }
    for directive in schema.directive_defs.values() {
        for argument in directive.arguments().values() {
            check_annotation(
                schema,
                &format!("@{}", directive.name()),
                argument.type_annotation(),
            )?;
        }
    }

    Ok(())
}

fn check_type_references(
    schema: &Schema,
    graphql_type: &GraphQLType,
    visited: &mut HashSet<String>,
) -> Result<()> {
    if !visited.insert(graphql_type.name().to_string()) {
        return Ok(());
    }

    let type_name = graphql_type.name();
    match graphql_type {
        GraphQLType::Object(object_type) => {
            for interface_ref in object_type.interfaces() {
                check_named_ref(schema, type_name, interface_ref)?;
            }
            for field in object_type.fields().values() {
                check_annotation(schema, type_name, field.type_annotation())?;
                for argument in field.arguments().values() {
                    check_annotation(schema, type_name, argument.type_annotation())?;
                }
            }
        }
        GraphQLType::Interface(interface_type) => {
            for interface_ref in interface_type.interfaces() {
                check_named_ref(schema, type_name, interface_ref)?;
            }
            for field in interface_type.fields().values() {
                check_annotation(schema, type_name, field.type_annotation())?;
                for argument in field.arguments().values() {
                    check_annotation(schema, type_name, argument.type_annotation())?;
                }
            }
        }
        GraphQLType::Union(union_type) => {
            for member_ref in union_type.members() {
                check_named_ref(schema, type_name, member_ref)?;
            }
        }
        GraphQLType::InputObject(input_object_type) => {
            for input_field in input_object_type.fields().values() {
                check_annotation(schema, type_name, input_field.type_annotation())?;
            }
        }
        GraphQLType::Scalar(_) | GraphQLType::Enum(_) => {}
    }

    Ok(())
}

fn check_annotation(
    schema: &Schema,
    referencing_type: &str,
    annotation: &TypeAnnotation,
) -> Result<()> {
    let type_ref = annotation.innermost_named_type_ref();
    if schema.types.contains_key(type_ref.name()) {
        Ok(())
    } else {
        Err(SchemaBuildError::UndefinedTypeReference {
            referencing_type: referencing_type.to_string(),
            referenced_type: type_ref.name().to_string(),
        })
    }
}

fn check_named_ref(
    schema: &Schema,
    referencing_type: &str,
    named_ref: &NamedGraphQLTypeRef,
) -> Result<()> {
    if schema.types.contains_key(named_ref.name()) {
        Ok(())
    } else {
        Err(SchemaBuildError::UndefinedTypeReference {
            referencing_type: referencing_type.to_string(),
            referenced_type: named_ref.name().to_string(),
        })
    }
}
