//! The introspection system: the `__Schema`/`__Type`/... type definitions
//! (present in every schema's type map, with built-in resolvers that walk
//! the type system), the `__schema`/`__type`/`__typename` meta fields
//! injected at the executor level, and the deterministic schema exports.

mod json;
mod print_schema;
mod types;

pub use json::introspection_json;
pub use print_schema::print_schema;
pub(crate) use types::introspection_types;
pub(crate) use types::schema_meta_field;
pub(crate) use types::type_meta_field;
pub(crate) use types::typename_meta_field;

#[cfg(test)]
mod tests;
