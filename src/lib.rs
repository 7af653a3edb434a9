//! A server-side GraphQL engine.
//!
//! Hosts supply a [`Schema`](schema::Schema) (type definitions plus field
//! resolvers) and a query document; the engine validates the document
//! against the schema and executes it to a JSON-shaped
//! [`Response`](error::Response). Parsing is delegated to the
//! [`graphql_parser`] crate; everything from the parsed AST onward —
//! validation rules, value coercion, cooperative scheduling of deferred
//! resolver work, field completion and error propagation — lives here.
//!
//! The smallest possible round trip:
//!
//! ```
//! use graphql_engine::execution::ExecuteParams;
//! use graphql_engine::schema::Schema;
//! use graphql_engine::types::{Field, ObjectType, ResolverOutcome, TypeAnnotation};
//! use std::sync::Arc;
//!
//! let schema = Arc::new(
//!     Schema::builder()
//!         .register(
//!             ObjectType::builder("Query")
//!                 .field(
//!                     Field::builder("hello", TypeAnnotation::named("String"))
//!                         .resolver(|_| ResolverOutcome::ok("world")),
//!                 )
//!                 .build()
//!                 .unwrap(),
//!         )
//!         .query_root("Query")
//!         .build()
//!         .unwrap(),
//! );
//!
//! let response = ExecuteParams::new(schema, "{ hello }").execute();
//! assert_eq!(response.to_json_string(), r#"{"data":{"hello":"world"}}"#);
//! ```

pub mod ast;
pub mod coerce;
pub mod deferred;
pub mod error;
pub mod execution;
pub mod host_value;
pub mod introspection;
pub mod loc;
pub mod named_ref;
pub mod schema;
pub mod types;
pub mod validation;
pub mod value;
pub mod visit;

pub use error::GraphQLError;
pub use error::Response;
pub use execution::execute;
pub use execution::ExecuteParams;
pub use host_value::HostValue;
pub use introspection::introspection_json;
pub use introspection::print_schema;
pub use value::Value;
