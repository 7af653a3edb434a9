use crate::deferred::Deferred;
use crate::deferred::Settle;
use crate::error::FieldError;
use crate::error::PathSegment;
use crate::execution::ExecuteParams;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::Argument;
use crate::types::Field;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ResolverOutcome;
use crate::types::TypeAnnotation;
use crate::value::Value;
use indexmap::IndexMap;
use serde_json::json;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn hello_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder()
            .register(
                ObjectType::builder("Query")
                    .field(
                        Field::builder("hello", TypeAnnotation::named("String"))
                            .resolver(|_| ResolverOutcome::ok("world")),
                    )
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .build()
            .unwrap(),
    )
}

fn response_json(response: &crate::error::Response) -> serde_json::Value {
    serde_json::to_value(response).unwrap()
}

mod basics {
    use super::*;

    #[test]
    fn hello_world() {
        let response = ExecuteParams::new(hello_schema(), "{ hello }").execute();
        assert_eq!(
            response_json(&response),
            json!({ "data": { "hello": "world" } }),
        );
    }

    #[test]
    fn aliases_rename_response_keys() {
        let response =
            ExecuteParams::new(hello_schema(), "{ greeting: hello hello }").execute();
        assert_eq!(
            response_json(&response),
            json!({ "data": { "greeting": "world", "hello": "world" } }),
        );
    }

    #[test]
    fn typename_resolves_on_any_composite() {
        let response =
            ExecuteParams::new(hello_schema(), "{ __typename hello }").execute();
        assert_eq!(
            response_json(&response),
            json!({ "data": { "__typename": "Query", "hello": "world" } }),
        );
    }

    #[test]
    fn syntax_error_omits_data() {
        let response = ExecuteParams::new(hello_schema(), "{ hello").execute();
        let json = response_json(&response);
        assert!(json.get("data").is_none());
        assert!(json["errors"][0]["message"]
            .as_str()
            .unwrap()
            .starts_with("Syntax Error:"));
    }

    #[test]
    fn validation_error_skips_execution() {
        let response = ExecuteParams::new(hello_schema(), "{ nope }").execute();
        let json = response_json(&response);
        assert!(json.get("data").is_none());
        assert_eq!(
            json["errors"][0]["message"],
            "Cannot query field \"nope\" on type \"Query\".",
        );
    }

    #[test]
    fn empty_rule_list_disables_validation() {
        let response = ExecuteParams::new(hello_schema(), "{ nope hello }")
            .validation_rules(vec![])
            .execute();
        // The unknown field is skipped by the executor; the rest completes.
        assert_eq!(
            response_json(&response),
            json!({ "data": { "hello": "world" } }),
        );
    }

    #[test]
    fn multiple_operations_require_a_name() {
        let source = "query A { hello } query B { hello }";
        let response = ExecuteParams::new(hello_schema(), source).execute();
        assert_eq!(
            response.errors()[0].message(),
            "Must provide operation name if query contains multiple operations.",
        );

        let response = ExecuteParams::new(hello_schema(), source)
            .operation_name("B")
            .execute();
        assert!(response.is_ok());

        let response = ExecuteParams::new(hello_schema(), source)
            .operation_name("C")
            .execute();
        assert_eq!(
            response.errors()[0].message(),
            "Unknown operation named \"C\".",
        );
    }
}

mod error_propagation {
    use super::*;

    fn nullability_schema() -> Arc<Schema> {
        Arc::new(
            Schema::builder()
                .register(
                    ObjectType::builder("Query")
                        .field(
                            Field::builder("x", TypeAnnotation::non_null_named("Int"))
                                .resolver(|_| ResolverOutcome::ok(HostValue::Null)),
                        )
                        .field(
                            Field::builder(
                                "items",
                                TypeAnnotation::list(TypeAnnotation::non_null_named(
                                    "Int",
                                )),
                            )
                            .resolver(|_| {
                                ResolverOutcome::ok(HostValue::List(vec![
                                    HostValue::Int(1),
                                    HostValue::Null,
                                    HostValue::Int(3),
                                ]))
                            }),
                        )
                        .field(
                            Field::builder("boom", TypeAnnotation::named("Int"))
                                .resolver(|_| {
                                    ResolverOutcome::err(FieldError::new("kaboom"))
                                }),
                        )
                        .field(
                            Field::builder("internal", TypeAnnotation::named("Int"))
                                .resolver(|_| {
                                    ResolverOutcome::err(FieldError::internal(
                                        "connection string leaked",
                                    ))
                                }),
                        )
                        .build()
                        .unwrap(),
                )
                .query_root("Query")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn null_for_non_null_field_nulls_data() {
        let response = ExecuteParams::new(nullability_schema(), "{ x }").execute();
        assert_eq!(
            response_json(&response),
            json!({
                "data": null,
                "errors": [{
                    "message": "Cannot return null for non-nullable field Query.x",
                    "locations": [{ "line": 1, "column": 3 }],
                    "path": ["x"],
                }],
            }),
        );
    }

    #[test]
    fn null_list_element_at_non_null_item_type_nulls_the_list() {
        let response = ExecuteParams::new(nullability_schema(), "{ items }").execute();
        assert_eq!(response.data(), Some(&json!({ "items": null })));
        assert_eq!(response.errors().len(), 1);
        assert_eq!(
            response.errors()[0].path(),
            Some(
                &[
                    PathSegment::Field("items".to_string()),
                    PathSegment::Index(1),
                ][..],
            ),
        );
    }

    #[test]
    fn resolver_error_nulls_the_field_and_attaches_path() {
        let response =
            ExecuteParams::new(nullability_schema(), "{ boom items: x }").execute();
        // boom is nullable: its error is recorded and the field nulls out,
        // while x's non-null violation nulls the whole data.
        let messages: Vec<&str> = response
            .errors()
            .iter()
            .map(|error| error.message())
            .collect();
        assert!(messages.contains(&"kaboom"));
        assert_eq!(response.data(), Some(&json!(null)));
    }

    #[test]
    fn internal_errors_are_redacted_unless_exposed() {
        let response =
            ExecuteParams::new(nullability_schema(), "{ internal }").execute();
        let json = response_json(&response);
        assert_eq!(json["errors"][0]["message"], "Internal server error");

        let exposed = ExecuteParams::new(nullability_schema(), "{ internal }")
            .execute()
            .expose_internal_errors();
        let json = response_json(&exposed);
        assert_eq!(json["errors"][0]["message"], "connection string leaked");
    }

    #[test]
    fn errors_are_never_deduplicated() {
        let response =
            ExecuteParams::new(nullability_schema(), "{ a: boom b: boom }").execute();
        assert_eq!(response.errors().len(), 2);
    }
}

mod arguments_and_variables {
    use super::*;

    fn echo_schema() -> Arc<Schema> {
        Arc::new(
            Schema::builder()
                .register(
                    ObjectType::builder("Query")
                        .field(
                            Field::builder("echo", TypeAnnotation::named("Int"))
                                .argument(Argument::new(
                                    "value",
                                    TypeAnnotation::named("Int"),
                                ))
                                .argument(
                                    Argument::new("shift", TypeAnnotation::named("Int"))
                                        .with_default(Value::Int(0)),
                                )
                                .resolver(|params| {
                                    let value = match params.args.get("value") {
                                        Some(HostValue::Int(value)) => *value,
                                        _ => return ResolverOutcome::ok(HostValue::Null),
                                    };
                                    let shift = match params.args.get("shift") {
                                        Some(HostValue::Int(shift)) => *shift,
                                        _ => 0,
                                    };
                                    ResolverOutcome::ok(value + shift)
                                }),
                        )
                        .build()
                        .unwrap(),
                )
                .query_root("Query")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn literals_and_defaults_coerce() {
        let response =
            ExecuteParams::new(echo_schema(), "{ echo(value: 40) }").execute();
        assert_eq!(response.data(), Some(&json!({ "echo": 40 })));
    }

    #[test]
    fn variables_flow_into_arguments() {
        let mut variables = IndexMap::new();
        variables.insert("v".to_string(), HostValue::Int(20));
        variables.insert("s".to_string(), HostValue::Int(2));
        let response = ExecuteParams::new(
            echo_schema(),
            "query ($v: Int, $s: Int) { echo(value: $v, shift: $s) }",
        )
        .variable_values(variables)
        .execute();
        assert_eq!(response.data(), Some(&json!({ "echo": 22 })));
    }

    #[test]
    fn invalid_variable_value_aborts_with_null_data() {
        let mut variables = IndexMap::new();
        variables.insert("v".to_string(), HostValue::Str("nope".to_string()));
        let response = ExecuteParams::new(
            echo_schema(),
            "query ($v: Int) { echo(value: $v) }",
        )
        .variable_values(variables)
        .execute();
        let json = response_json(&response);
        assert_eq!(json["data"], json!(null));
        assert!(json["errors"][0]["message"]
            .as_str()
            .unwrap()
            .starts_with("Variable \"$v\" got invalid value \"nope\";"));
    }

    #[test]
    fn missing_required_variable_errors_upfront() {
        let response = ExecuteParams::new(
            echo_schema(),
            "query ($v: Int!) { echo(value: $v) }",
        )
        .execute();
        assert_eq!(
            response.errors()[0].message(),
            "Variable \"$v\" of required type \"Int!\" was not provided.",
        );
    }

    #[test]
    fn absent_variable_falls_back_to_argument_default() {
        // shift: $s where $s is unset resolves through shift's default of 0.
        let response = ExecuteParams::new(
            echo_schema(),
            "query ($s: Int) { echo(value: 5, shift: $s) }",
        )
        .execute();
        assert_eq!(response.data(), Some(&json!({ "echo": 5 })));
    }

    #[test]
    fn skip_and_include_remove_selections() {
        let mut variables = IndexMap::new();
        variables.insert("yes".to_string(), HostValue::Bool(true));
        let response = ExecuteParams::new(
            hello_schema(),
            "query ($yes: Boolean!) { \
                a: hello @skip(if: $yes) \
                b: hello @include(if: $yes) \
                c: hello @include(if: false) \
            }",
        )
        .variable_values(variables)
        .execute();
        assert_eq!(response.data(), Some(&json!({ "b": "world" })));
    }
}

mod fragments_and_abstract_types {
    use super::*;

    fn pets_schema() -> Arc<Schema> {
        let pet = InterfaceType::builder("Pet")
            .field(Field::builder("name", TypeAnnotation::named("String")))
            .resolve_type(|value| {
                if value.property("meowVolume").is_some() {
                    Some("Cat".to_string())
                } else {
                    Some("Dog".to_string())
                }
            })
            .build()
            .unwrap();

        let dog = ObjectType::builder("Dog")
            .interface("Pet")
            .field(Field::builder("name", TypeAnnotation::named("String")))
            .field(Field::builder("barkVolume", TypeAnnotation::named("Int")))
            .build()
            .unwrap();

        let cat = ObjectType::builder("Cat")
            .interface("Pet")
            .field(Field::builder("name", TypeAnnotation::named("String")))
            .field(Field::builder("meowVolume", TypeAnnotation::named("Int")))
            .build()
            .unwrap();

        let query = ObjectType::builder("Query")
            .field(
                Field::builder(
                    "pets",
                    TypeAnnotation::list(TypeAnnotation::named("Pet")),
                )
                .resolver(|_| {
                    let mut dog = IndexMap::new();
                    dog.insert("name".to_string(), HostValue::from("Rex"));
                    dog.insert("barkVolume".to_string(), HostValue::Int(11));
                    let mut cat = IndexMap::new();
                    cat.insert("name".to_string(), HostValue::from("Whiskers"));
                    cat.insert("meowVolume".to_string(), HostValue::Int(3));
                    ResolverOutcome::ok(HostValue::List(vec![
                        HostValue::Object(dog),
                        HostValue::Object(cat),
                    ]))
                }),
            )
            .build()
            .unwrap();

        Arc::new(
            Schema::builder()
                .register(pet)
                .register(dog)
                .register(cat)
                .register(query)
                .query_root("Query")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn abstract_types_resolve_and_inline_fragments_apply() {
        let response = ExecuteParams::new(
            pets_schema(),
            "{ pets { __typename name \
                ...on Dog { barkVolume } \
                ...on Cat { meowVolume } } }",
        )
        .execute();
        assert_eq!(
            response.data(),
            Some(&json!({
                "pets": [
                    { "__typename": "Dog", "name": "Rex", "barkVolume": 11 },
                    { "__typename": "Cat", "name": "Whiskers", "meowVolume": 3 },
                ],
            })),
        );
    }

    #[test]
    fn fragment_spreads_produce_the_same_result_as_inline_selections() {
        let inline = ExecuteParams::new(
            pets_schema(),
            "{ pets { name ...on Dog { barkVolume } } }",
        )
        .execute();
        let with_fragment = ExecuteParams::new(
            pets_schema(),
            "{ pets { ...PetBits } } \
            fragment PetBits on Pet { name ...on Dog { barkVolume } }",
        )
        .execute();
        assert!(with_fragment.is_ok());
        assert_eq!(inline.data(), with_fragment.data());
    }

    #[test]
    fn duplicate_selections_through_fragments_merge() {
        let plain = ExecuteParams::new(
            pets_schema(),
            "{ pets { name __typename } }",
        )
        .execute();
        let duplicated = ExecuteParams::new(
            pets_schema(),
            "{ pets { name ...F } } fragment F on Pet { name __typename }",
        )
        .execute();
        assert!(duplicated.is_ok());
        assert_eq!(plain.data(), duplicated.data());
    }
}

mod deferred_resolvers {
    use super::*;

    #[test]
    fn deferred_values_complete_through_the_scheduler() {
        let schema = Arc::new(
            Schema::builder()
                .register(
                    ObjectType::builder("Query")
                        .field(
                            Field::builder("later", TypeAnnotation::named("Int"))
                                .resolver(|_| {
                                    let seed = Deferred::fulfilled(HostValue::Null);
                                    ResolverOutcome::Deferred(seed.then(|_| {
                                        Settle::Value(HostValue::Int(42))
                                    }))
                                }),
                        )
                        .build()
                        .unwrap(),
                )
                .query_root("Query")
                .build()
                .unwrap(),
        );
        let response = ExecuteParams::new(schema, "{ later }").execute();
        assert_eq!(response.data(), Some(&json!({ "later": 42 })));
    }

    #[test]
    fn deferred_rejection_becomes_a_field_error() {
        let schema = Arc::new(
            Schema::builder()
                .register(
                    ObjectType::builder("Query")
                        .field(
                            Field::builder("later", TypeAnnotation::named("Int"))
                                .resolver(|_| {
                                    ResolverOutcome::Deferred(Deferred::rejected(
                                        FieldError::new("deferred trouble"),
                                    ))
                                }),
                        )
                        .build()
                        .unwrap(),
                )
                .query_root("Query")
                .build()
                .unwrap(),
        );
        let response = ExecuteParams::new(schema, "{ later }").execute();
        assert_eq!(response.data(), Some(&json!({ "later": null })));
        assert_eq!(response.errors()[0].message(), "deferred trouble");
        assert_eq!(
            response.errors()[0].path(),
            Some(&[PathSegment::Field("later".to_string())][..]),
        );
    }
}

mod mutations {
    use super::*;

    /// Field `a` bumps a shared counter inside a deferred that settles on a
    /// later queue tick; field `b` reads the counter. Sequential top-level
    /// mutation execution must make `b` observe `a`'s write.
    #[test]
    fn top_level_mutation_fields_run_strictly_sequentially() {
        let counter = Arc::new(AtomicI64::new(0));

        let counter_for_a = Arc::clone(&counter);
        let counter_for_b = Arc::clone(&counter);
        let mutation = ObjectType::builder("Mutation")
            .field(
                Field::builder("a", TypeAnnotation::named("Int")).resolver(move |_| {
                    let counter = Arc::clone(&counter_for_a);
                    let seed = Deferred::fulfilled(HostValue::Null);
                    ResolverOutcome::Deferred(seed.then(move |_| {
                        counter.store(1, Ordering::SeqCst);
                        Settle::Value(HostValue::Int(1))
                    }))
                }),
            )
            .field(
                Field::builder("b", TypeAnnotation::named("Int")).resolver(move |_| {
                    ResolverOutcome::ok(counter_for_b.load(Ordering::SeqCst))
                }),
            )
            .build()
            .unwrap();

        let schema = Arc::new(
            Schema::builder()
                .register(
                    ObjectType::builder("Query")
                        .field(Field::builder("ping", TypeAnnotation::named("Int")))
                        .build()
                        .unwrap(),
                )
                .register(mutation)
                .query_root("Query")
                .mutation_root("Mutation")
                .build()
                .unwrap(),
        );

        let response = ExecuteParams::new(schema, "mutation { a b }").execute();
        assert_eq!(response.data(), Some(&json!({ "a": 1, "b": 1 })));
    }

    #[test]
    fn mutation_without_mutation_root_errors() {
        let response =
            ExecuteParams::new(hello_schema(), "mutation { anything }").execute();
        assert_eq!(
            response.errors()[0].message(),
            "Schema is not configured to execute mutation operation.",
        );
    }
}

mod default_resolver {
    use super::*;

    #[test]
    fn default_resolver_reads_properties_off_the_parent() {
        let schema = Arc::new(
            Schema::builder()
                .register(
                    ObjectType::builder("Query")
                        .field(
                            Field::builder("user", TypeAnnotation::named("User"))
                                .resolver(|_| {
                                    let mut user = IndexMap::new();
                                    user.insert(
                                        "name".to_string(),
                                        HostValue::from("Ada"),
                                    );
                                    user.insert("age".to_string(), HostValue::Int(36));
                                    ResolverOutcome::ok(HostValue::Object(user))
                                }),
                        )
                        .build()
                        .unwrap(),
                )
                .register(
                    ObjectType::builder("User")
                        .field(Field::builder("name", TypeAnnotation::named("String")))
                        .field(Field::builder("age", TypeAnnotation::named("Int")))
                        .build()
                        .unwrap(),
                )
                .query_root("Query")
                .build()
                .unwrap(),
        );
        let response =
            ExecuteParams::new(schema, "{ user { name age } }").execute();
        assert_eq!(
            response.data(),
            Some(&json!({ "user": { "name": "Ada", "age": 36 } })),
        );
    }

    #[test]
    fn host_supplied_field_resolver_overrides_the_default() {
        let schema = Arc::new(
            Schema::builder()
                .register(
                    ObjectType::builder("Query")
                        .field(Field::builder("anything", TypeAnnotation::named("String")))
                        .build()
                        .unwrap(),
                )
                .query_root("Query")
                .build()
                .unwrap(),
        );
        let response = ExecuteParams::new(schema, "{ anything }")
            .field_resolver(|params| {
                ResolverOutcome::ok(format!("resolved:{}", params.info.field_name))
            })
            .execute();
        assert_eq!(
            response.data(),
            Some(&json!({ "anything": "resolved:anything" })),
        );
    }
}
