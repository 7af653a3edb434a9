mod schema;
mod schema_builder;
mod type_utils;
mod type_validation;
mod type_validation_error;

pub use schema::Schema;
pub use schema::TypeLoaderFn;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use type_utils::do_types_overlap;
pub use type_utils::is_sub_type_of;
pub use type_validation_error::TypeValidationError;

#[cfg(test)]
mod tests;
