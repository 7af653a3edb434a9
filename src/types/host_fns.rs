use crate::deferred::Deferred;
use crate::error::FieldError;
use crate::host_value::HostValue;
use crate::value::Value;
use indexmap::IndexMap;
use std::sync::Arc;

/// What a resolver hands back to the executor: an immediate result, or a
/// deferred one driven to completion through the scheduler.
pub enum ResolverOutcome {
    Ready(Result<HostValue, FieldError>),
    Deferred(Deferred<HostValue>),
}
impl ResolverOutcome {
    pub fn ok(value: impl Into<HostValue>) -> Self {
        ResolverOutcome::Ready(Ok(value.into()))
    }

    pub fn err(error: impl Into<FieldError>) -> Self {
        ResolverOutcome::Ready(Err(error.into()))
    }
}
impl From<Deferred<HostValue>> for ResolverOutcome {
    fn from(deferred: Deferred<HostValue>) -> Self {
        ResolverOutcome::Deferred(deferred)
    }
}

/// A field resolver: `(source, args, context, info)` packaged as
/// [`ResolverParams`](crate::execution::ResolverParams).
pub type ResolverFn =
    Arc<dyn Fn(crate::execution::ResolverParams<'_>) -> ResolverOutcome + Send + Sync>;

/// Coerces an external input value (from the variables map) into the scalar's
/// runtime representation. An `Err` message becomes a coercion error carrying
/// the cause.
pub type ParseValueFn = Arc<dyn Fn(&HostValue) -> Result<HostValue, String> + Send + Sync>;

/// Coerces a constant literal (variables already substituted) into the
/// scalar's runtime representation.
pub type ParseLiteralFn = Arc<dyn Fn(&Value) -> Result<HostValue, String> + Send + Sync>;

/// Converts a resolved leaf value into its serialized output form.
pub type SerializeFn = Arc<dyn Fn(&HostValue) -> Result<HostValue, String> + Send + Sync>;

/// Picks the concrete object type (by name) for a value resolved at an
/// abstract type position.
pub type ResolveTypeFn = Arc<dyn Fn(&HostValue) -> Option<String> + Send + Sync>;

/// Tests whether a value resolved at an abstract type position belongs to a
/// particular object type.
pub type IsTypeOfFn = Arc<dyn Fn(&HostValue) -> bool + Send + Sync>;

/// Per-field complexity override for the query-complexity validation rule:
/// `(child_complexity, args) -> complexity`. Arguments have variable values
/// already substituted.
pub type ComplexityFn = Arc<dyn Fn(usize, &IndexMap<String, HostValue>) -> usize + Send + Sync>;
