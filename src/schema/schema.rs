use crate::schema::SchemaBuilder;
use crate::types::Directive;
use crate::types::GraphQLType;
use crate::types::NamedGraphQLTypeRef;
use crate::types::ObjectType;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

/// Resolves a type by name on first use. Loader results must be stable: a
/// second call for the same name must return the identical instance.
pub type TypeLoaderFn = Arc<dyn Fn(&str) -> Option<Arc<GraphQLType>> + Send + Sync>;

/// Represents a fully validated and immutable GraphQL schema.
///
/// Built once via [`SchemaBuilder`] and shared (behind `Arc`) across any
/// number of executions. The type map always contains the five standard
/// scalars and the introspection types in addition to host-registered types.
pub struct Schema {
    pub(crate) directive_defs: HashMap<String, Arc<Directive>>,
    pub(crate) loader_cache: Mutex<HashMap<String, Arc<GraphQLType>>>,
    pub(crate) mutation_type: Option<NamedGraphQLTypeRef>,
    pub(crate) query_type: NamedGraphQLTypeRef,
    pub(crate) subscription_type: Option<NamedGraphQLTypeRef>,
    pub(crate) type_loader: Option<TypeLoaderFn>,
    pub(crate) types: HashMap<String, Arc<GraphQLType>>,
}
impl Schema {
    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Look up a type by name: first in the type map, then (if configured)
    /// through the lazy type loader. Loader results are memoized; an
    /// unstable loader is a host configuration bug and fails the engine's
    /// stability assertion.
    pub fn type_named(&self, name: &str) -> Option<Arc<GraphQLType>> {
        if let Some(known) = self.types.get(name) {
            return Some(Arc::clone(known));
        }

        let loader = self.type_loader.as_ref()?;
        {
            let cache = self
                .loader_cache
                .lock()
                .expect("type loader cache lock is never poisoned");
            if let Some(cached) = cache.get(name) {
                return Some(Arc::clone(cached));
            }
        }

        // The loader runs outside the lock: it may itself look other types
        // up through this schema.
        let loaded = loader(name)?;
        let again = loader(name)?;
        assert!(
            Arc::ptr_eq(&loaded, &again),
            "type loader returned a different instance on a repeated lookup of type `{name}`",
        );
        self.loader_cache
            .lock()
            .expect("type loader cache lock is never poisoned")
            .insert(name.to_string(), Arc::clone(&loaded));
        Some(loaded)
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.type_named(name).is_some()
    }

    /// All statically known types, including built-ins. Types only reachable
    /// through a lazy loader appear once loaded.
    pub fn types(&self) -> &HashMap<String, Arc<GraphQLType>> {
        &self.types
    }

    pub fn directive_named(&self, name: &str) -> Option<Arc<Directive>> {
        self.directive_defs.get(name).map(Arc::clone)
    }

    pub fn directives(&self) -> &HashMap<String, Arc<Directive>> {
        &self.directive_defs
    }

    /// This schema's Query root operation type.
    pub fn query_type(&self) -> Arc<GraphQLType> {
        self.query_type.deref(self)
    }

    /// This schema's Mutation root operation type (if one was defined).
    pub fn mutation_type(&self) -> Option<Arc<GraphQLType>> {
        self.mutation_type
            .as_ref()
            .map(|named_ref| named_ref.deref(self))
    }

    /// This schema's Subscription root operation type (if one was defined).
    pub fn subscription_type(&self) -> Option<Arc<GraphQLType>> {
        self.subscription_type
            .as_ref()
            .map(|named_ref| named_ref.deref(self))
    }

    /// The concrete object types an abstract type can resolve to: a union's
    /// members, or every object type implementing an interface.
    pub fn possible_types(&self, abstract_type: &GraphQLType) -> Vec<Arc<GraphQLType>> {
        match abstract_type {
            GraphQLType::Union(union_type) => union_type
                .members()
                .iter()
                .filter_map(|member_ref| member_ref.try_deref(self).ok())
                .collect(),
            GraphQLType::Interface(interface_type) => {
                let mut possible: Vec<Arc<GraphQLType>> = self
                    .types
                    .values()
                    .filter(|candidate| match candidate.as_object() {
                        Some(object_type) => {
                            object_implements(self, object_type, interface_type.name())
                        }
                        None => false,
                    })
                    .map(Arc::clone)
                    .collect();
                // Scans over a HashMap are unordered; introspection output
                // must be deterministic.
                possible.sort_by(|a, b| a.name().cmp(b.name()));
                possible
            }
            _ => vec![],
        }
    }

    /// True when `object_type` is one of `abstract_type`'s possible types.
    pub fn is_possible_type(&self, abstract_type: &GraphQLType, object_name: &str) -> bool {
        match abstract_type {
            GraphQLType::Union(union_type) => union_type.has_member(object_name),
            GraphQLType::Interface(interface_type) => self
                .type_named(object_name)
                .and_then(|candidate| {
                    candidate
                        .as_object()
                        .map(|object_type| {
                            object_implements(self, object_type, interface_type.name())
                        })
                })
                .unwrap_or(false),
            _ => false,
        }
    }
}
impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("query_type", &self.query_type)
            .field("mutation_type", &self.mutation_type)
            .field("subscription_type", &self.subscription_type)
            .field("types", &self.types.keys())
            .finish_non_exhaustive()
    }
}

/// Whether `object_type` implements `interface_name`, directly or through a
/// transitive interface.
fn object_implements(schema: &Schema, object_type: &ObjectType, interface_name: &str) -> bool {
    crate::types::object_type::transitive_interfaces(schema, object_type.interfaces())
        .iter()
        .any(|interface| interface.name() == interface_name)
}
