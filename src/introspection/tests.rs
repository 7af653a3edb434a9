use crate::execution::ExecuteParams;
use crate::introspection::introspection_json;
use crate::introspection::print_schema;
use crate::schema::Schema;
use crate::types::Argument;
use crate::types::EnumType;
use crate::types::EnumVariant;
use crate::types::Field;
use crate::types::InputField;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ResolverOutcome;
use crate::types::TypeAnnotation;
use crate::value::Value;
use serde_json::json;
use std::sync::Arc;

fn sample_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder()
            .register(
                InterfaceType::builder("Node")
                    .field(Field::builder("id", TypeAnnotation::non_null_named("ID")))
                    .build()
                    .unwrap(),
            )
            .register(
                ObjectType::builder("User")
                    .description("A registered account.")
                    .interface("Node")
                    .field(Field::builder("id", TypeAnnotation::non_null_named("ID")))
                    .field(
                        Field::builder("nickname", TypeAnnotation::named("String"))
                            .deprecated("Use id instead."),
                    )
                    .build()
                    .unwrap(),
            )
            .register(
                EnumType::builder("Role")
                    .variant(EnumVariant::new("ADMIN"))
                    .variant(EnumVariant::new("MEMBER"))
                    .build()
                    .unwrap(),
            )
            .register(
                InputObjectType::builder("UserFilter")
                    .field(
                        InputField::new("role", TypeAnnotation::named("Role"))
                            .with_default(Value::Enum("MEMBER".to_string())),
                    )
                    .build()
                    .unwrap(),
            )
            .register(
                ObjectType::builder("Query")
                    .field(
                        Field::builder(
                            "users",
                            TypeAnnotation::list(TypeAnnotation::non_null_named("User")),
                        )
                        .argument(Argument::new(
                            "filter",
                            TypeAnnotation::named("UserFilter"),
                        ))
                        .resolver(|_| {
                            ResolverOutcome::ok(crate::host_value::HostValue::List(vec![]))
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

mod executor_surface {
    use super::*;

    #[test]
    fn schema_field_exposes_types_and_roots() {
        let response = ExecuteParams::new(
            sample_schema(),
            "{ __schema { queryType { name } types { name } } }",
        )
        .execute();
        assert!(response.is_ok(), "errors: {:?}", response.errors());
        let data = response.data().unwrap();
        assert_eq!(data["__schema"]["queryType"]["name"], "Query");
        let type_names: Vec<&str> = data["__schema"]["types"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["name"].as_str().unwrap())
            .collect();
        assert!(type_names.contains(&"User"));
        assert!(type_names.contains(&"__Schema"));
        assert!(type_names.contains(&"Int"));
    }

    #[test]
    fn type_field_walks_wrappers() {
        let response = ExecuteParams::new(
            sample_schema(),
            "{ __type(name: \"User\") { name kind \
                fields { name type { kind name ofType { kind name } } } } }",
        )
        .execute();
        assert!(response.is_ok(), "errors: {:?}", response.errors());
        let user = &response.data().unwrap()["__type"];
        assert_eq!(user["name"], "User");
        assert_eq!(user["kind"], "OBJECT");
        // Deprecated fields are excluded by default.
        let fields = user["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["name"], "id");
        assert_eq!(fields[0]["type"]["kind"], "NON_NULL");
        assert_eq!(fields[0]["type"]["ofType"]["name"], "ID");
    }

    #[test]
    fn deprecated_members_appear_on_request() {
        let response = ExecuteParams::new(
            sample_schema(),
            "{ __type(name: \"User\") { \
                fields(includeDeprecated: true) { name isDeprecated deprecationReason } } }",
        )
        .execute();
        let fields = response.data().unwrap()["__type"]["fields"]
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["name"], "nickname");
        assert_eq!(fields[1]["isDeprecated"], json!(true));
        assert_eq!(fields[1]["deprecationReason"], "Use id instead.");
    }

    #[test]
    fn unknown_type_lookup_is_null() {
        let response = ExecuteParams::new(
            sample_schema(),
            "{ __type(name: \"Nope\") { name } }",
        )
        .execute();
        assert_eq!(response.data().unwrap()["__type"], json!(null));
    }

    #[test]
    fn interface_exposes_possible_types() {
        let response = ExecuteParams::new(
            sample_schema(),
            "{ __type(name: \"Node\") { kind possibleTypes { name } } }",
        )
        .execute();
        let node = &response.data().unwrap()["__type"];
        assert_eq!(node["kind"], "INTERFACE");
        assert_eq!(node["possibleTypes"], json!([{ "name": "User" }]));
    }
}

mod exports {
    use super::*;

    #[test]
    fn printed_schema_is_deterministic_and_complete() {
        let schema = sample_schema();
        let printed = print_schema(&schema);
        assert_eq!(printed, print_schema(&schema));

        assert!(printed.contains("enum Role {\n  ADMIN\n  MEMBER\n}"));
        assert!(printed.contains("type User implements Node {"));
        assert!(printed.contains("  nickname: String @deprecated(reason: \"Use id instead.\")"));
        assert!(printed.contains("input UserFilter {\n  role: Role = MEMBER\n}"));
        assert!(printed.contains("users(filter: UserFilter): [User!]"));
        assert!(printed.contains("\"\"\"\nA registered account.\n\"\"\""));
        // Built-ins and introspection types stay out of the printed form.
        assert!(!printed.contains("scalar Int"));
        assert!(!printed.contains("__Schema"));
    }

    #[test]
    fn introspection_json_has_the_standard_shape() {
        let schema = sample_schema();
        let exported = introspection_json(&schema);
        assert_eq!(exported, introspection_json(&schema));

        let root = &exported["__schema"];
        assert_eq!(root["queryType"]["name"], "Query");
        assert_eq!(root["mutationType"], json!(null));

        let user = root["types"]
            .as_array()
            .unwrap()
            .iter()
            .find(|entry| entry["name"] == "User")
            .unwrap();
        assert_eq!(user["kind"], "OBJECT");
        assert_eq!(user["interfaces"], json!([{ "kind": "INTERFACE", "name": "Node" }]));

        let directive_names: Vec<&str> = root["directives"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["name"].as_str().unwrap())
            .collect();
        assert_eq!(directive_names, vec!["deprecated", "include", "skip"]);
    }
}
