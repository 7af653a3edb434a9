use crate::execution::ResolverParams;
use crate::types::Argument;
use crate::types::ComplexityFn;
use crate::types::ResolverFn;
use crate::types::ResolverOutcome;
use crate::types::TypeAnnotation;
use indexmap::IndexMap;
use std::sync::Arc;

/// Represents a defined field on an [`ObjectType`](crate::types::ObjectType)
/// or [`InterfaceType`](crate::types::InterfaceType).
///
/// A field without a resolver falls back to the execution's default resolver
/// (property lookup on the parent value).
#[derive(Clone)]
pub struct Field {
    pub(crate) arguments: IndexMap<String, Argument>,
    pub(crate) complexity: Option<ComplexityFn>,
    pub(crate) deprecation_reason: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) name: String,
    pub(crate) resolver: Option<ResolverFn>,
    pub(crate) type_annotation: TypeAnnotation,
}
impl Field {
    pub fn builder(name: impl Into<String>, type_annotation: TypeAnnotation) -> FieldBuilder {
        FieldBuilder::new(name, type_annotation)
    }

    pub fn arguments(&self) -> &IndexMap<String, Argument> {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.get(name)
    }

    pub fn complexity(&self) -> Option<&ComplexityFn> {
        self.complexity.as_ref()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation_reason.as_deref()
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason.is_some()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn resolver(&self) -> Option<&ResolverFn> {
        self.resolver.as_ref()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type_annotation", &self.type_annotation)
            .field("arguments", &self.arguments)
            .field("has_resolver", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct FieldBuilder {
    arguments: IndexMap<String, Argument>,
    complexity: Option<ComplexityFn>,
    deprecation_reason: Option<String>,
    description: Option<String>,
    duplicate_argument: Option<String>,
    name: String,
    resolver: Option<ResolverFn>,
    type_annotation: TypeAnnotation,
}
impl FieldBuilder {
    pub fn new(name: impl Into<String>, type_annotation: TypeAnnotation) -> Self {
        Self {
            arguments: IndexMap::new(),
            complexity: None,
            deprecation_reason: None,
            description: None,
            duplicate_argument: None,
            name: name.into(),
            resolver: None,
            type_annotation,
        }
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        let name = argument.name().to_string();
        if self.arguments.insert(name.clone(), argument).is_some() {
            self.duplicate_argument.get_or_insert(name);
        }
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }

    pub fn resolver(
        mut self,
        resolver: impl Fn(ResolverParams<'_>) -> ResolverOutcome + Send + Sync + 'static,
    ) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn complexity(
        mut self,
        complexity: impl Fn(usize, &IndexMap<String, crate::host_value::HostValue>) -> usize
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.complexity = Some(Arc::new(complexity));
        self
    }

    /// The name of an argument added twice, if any. Surfaced as a build
    /// error by the owning type builder.
    pub(crate) fn duplicate_argument(&self) -> Option<&str> {
        self.duplicate_argument.as_deref()
    }

    pub(crate) fn finish(self) -> Field {
        Field {
            arguments: self.arguments,
            complexity: self.complexity,
            deprecation_reason: self.deprecation_reason,
            description: self.description,
            name: self.name,
            resolver: self.resolver,
            type_annotation: self.type_annotation,
        }
    }

    pub(crate) fn name(&self) -> &str {
        self.name.as_str()
    }
}
