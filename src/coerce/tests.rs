use crate::coerce::coerce_input_value;
use crate::coerce::coerce_literal;
use crate::error::PathSegment;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::EnumType;
use crate::types::EnumVariant;
use crate::types::Field;
use crate::types::InputField;
use crate::types::InputObjectType;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::value::Value;
use indexmap::IndexMap;

fn test_schema() -> Schema {
    Schema::builder()
        .register(
            ObjectType::builder("Query")
                .field(Field::builder("ping", TypeAnnotation::named("Int")))
                .build()
                .unwrap(),
        )
        .register(
            EnumType::builder("Color")
                .variant(EnumVariant::new("RED").with_payload(0))
                .variant(EnumVariant::new("GREEN").with_payload(1))
                .build()
                .unwrap(),
        )
        .register(
            InputObjectType::builder("Point")
                .field(InputField::new(
                    "x",
                    TypeAnnotation::non_null_named("Int"),
                ))
                .field(
                    InputField::new("y", TypeAnnotation::named("Int"))
                        .with_default(Value::Int(3)),
                )
                .field(InputField::new("label", TypeAnnotation::named("String")))
                .build()
                .unwrap(),
        )
        .query_root("Query")
        .build()
        .unwrap()
}

fn no_variables() -> IndexMap<String, HostValue> {
    IndexMap::new()
}

mod input_values {
    use super::*;

    #[test]
    fn scalar_coerces_through_parse_value() {
        let schema = test_schema();
        let coerced = coerce_input_value(
            &HostValue::Int(42),
            &TypeAnnotation::named("Int"),
            &schema,
        );
        assert_eq!(coerced, Ok(HostValue::Int(42)));
    }

    #[test]
    fn scalar_parse_failure_carries_cause() {
        let schema = test_schema();
        let errors = coerce_input_value(
            &HostValue::Str("not an int".to_string()),
            &TypeAnnotation::named("Int"),
            &schema,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("Expected type \"Int\"."));
    }

    #[test]
    fn null_for_non_null_type_is_an_error() {
        let schema = test_schema();
        let errors = coerce_input_value(
            &HostValue::Null,
            &TypeAnnotation::non_null_named("Int"),
            &schema,
        )
        .unwrap_err();
        assert_eq!(
            errors[0].message,
            "Expected non-nullable type \"Int!\" not to be null.",
        );
    }

    #[test]
    fn null_for_nullable_type_passes() {
        let schema = test_schema();
        let coerced = coerce_input_value(
            &HostValue::Null,
            &TypeAnnotation::named("Int"),
            &schema,
        );
        assert_eq!(coerced, Ok(HostValue::Null));
    }

    #[test]
    fn enum_name_maps_to_payload() {
        let schema = test_schema();
        let coerced = coerce_input_value(
            &HostValue::Str("GREEN".to_string()),
            &TypeAnnotation::named("Color"),
            &schema,
        );
        assert_eq!(coerced, Ok(HostValue::Int(1)));
    }

    #[test]
    fn unknown_enum_value_suggests_neighbors() {
        let schema = test_schema();
        let errors = coerce_input_value(
            &HostValue::Str("REDD".to_string()),
            &TypeAnnotation::named("Color"),
            &schema,
        )
        .unwrap_err();
        assert_eq!(
            errors[0].message,
            "Value \"REDD\" does not exist in \"Color\" enum. \
            Did you mean the enum value \"RED\"?",
        );
    }

    #[test]
    fn list_coerces_elementwise_and_accumulates_errors() {
        let schema = test_schema();
        let errors = coerce_input_value(
            &HostValue::List(vec![
                HostValue::Int(1),
                HostValue::Str("x".to_string()),
                HostValue::Str("y".to_string()),
            ]),
            &TypeAnnotation::list(TypeAnnotation::named("Int")),
            &schema,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, vec![PathSegment::Index(1)]);
        assert_eq!(errors[1].path, vec![PathSegment::Index(2)]);
    }

    #[test]
    fn non_list_value_coerces_as_list_of_one() {
        let schema = test_schema();
        let coerced = coerce_input_value(
            &HostValue::Int(7),
            &TypeAnnotation::list(TypeAnnotation::named("Int")),
            &schema,
        );
        assert_eq!(coerced, Ok(HostValue::List(vec![HostValue::Int(7)])));
    }

    #[test]
    fn input_object_applies_defaults_and_requires_fields() {
        let schema = test_schema();

        let mut provided = IndexMap::new();
        provided.insert("x".to_string(), HostValue::Int(1));
        let coerced = coerce_input_value(
            &HostValue::Object(provided),
            &TypeAnnotation::named("Point"),
            &schema,
        )
        .unwrap();
        let HostValue::Object(fields) = coerced else {
            panic!("expected an object");
        };
        assert_eq!(fields.get("x"), Some(&HostValue::Int(1)));
        assert_eq!(fields.get("y"), Some(&HostValue::Int(3)));
        assert_eq!(fields.get("label"), None);

        let errors = coerce_input_value(
            &HostValue::Object(IndexMap::new()),
            &TypeAnnotation::named("Point"),
            &schema,
        )
        .unwrap_err();
        assert_eq!(
            errors[0].message,
            "Field \"x\" of required type \"Int!\" was not provided.",
        );
    }

    #[test]
    fn unknown_input_field_suggests_neighbors() {
        let schema = test_schema();
        let mut provided = IndexMap::new();
        provided.insert("x".to_string(), HostValue::Int(1));
        provided.insert("lable".to_string(), HostValue::Str("p".to_string()));
        let errors = coerce_input_value(
            &HostValue::Object(provided),
            &TypeAnnotation::named("Point"),
            &schema,
        )
        .unwrap_err();
        assert_eq!(
            errors[0].message,
            "Field \"lable\" is not defined by type \"Point\". Did you mean \"label\"?",
        );
    }
}

mod literals {
    use super::*;

    #[test]
    fn const_literals_round_trip_with_input_coercion() {
        let schema = test_schema();
        let annotation = TypeAnnotation::list(TypeAnnotation::named("Int"));

        let from_literal = coerce_literal(
            &Value::List(vec![Value::Int(1), Value::Int(2)]),
            &annotation,
            &schema,
            &no_variables(),
        )
        .unwrap();
        let from_value = coerce_input_value(
            &HostValue::List(vec![HostValue::Int(1), HostValue::Int(2)]),
            &annotation,
            &schema,
        )
        .unwrap();
        assert_eq!(from_literal, from_value);
    }

    #[test]
    fn null_literal_fails_under_non_null() {
        let schema = test_schema();
        assert_eq!(
            coerce_literal(
                &Value::Null,
                &TypeAnnotation::non_null_named("Int"),
                &schema,
                &no_variables(),
            ),
            None,
        );
    }

    #[test]
    fn variable_reference_resolves_through_the_map() {
        let schema = test_schema();
        let mut variables = IndexMap::new();
        variables.insert("count".to_string(), HostValue::Int(10));

        assert_eq!(
            coerce_literal(
                &Value::Variable("count".to_string()),
                &TypeAnnotation::named("Int"),
                &schema,
                &variables,
            ),
            Some(HostValue::Int(10)),
        );

        // Unset variable: no value at all.
        assert_eq!(
            coerce_literal(
                &Value::Variable("missing".to_string()),
                &TypeAnnotation::named("Int"),
                &schema,
                &variables,
            ),
            None,
        );
    }

    #[test]
    fn non_list_literal_coerces_as_list_of_one() {
        let schema = test_schema();
        assert_eq!(
            coerce_literal(
                &Value::Int(5),
                &TypeAnnotation::list(TypeAnnotation::named("Int")),
                &schema,
                &no_variables(),
            ),
            Some(HostValue::List(vec![HostValue::Int(5)])),
        );
    }

    #[test]
    fn input_object_literal_follows_declared_field_order() {
        let schema = test_schema();
        let literal = Value::Object(
            [
                ("label".to_string(), Value::String("p".to_string())),
                ("x".to_string(), Value::Int(9)),
            ]
            .into_iter()
            .collect(),
        );
        let coerced = coerce_literal(
            &literal,
            &TypeAnnotation::named("Point"),
            &schema,
            &no_variables(),
        )
        .unwrap();
        let HostValue::Object(fields) = coerced else {
            panic!("expected an object");
        };
        let keys: Vec<&String> = fields.keys().collect();
        assert_eq!(keys, vec!["x", "y", "label"]);
    }

    #[test]
    fn extra_literal_field_fails() {
        let schema = test_schema();
        let literal = Value::Object(
            [
                ("x".to_string(), Value::Int(9)),
                ("z".to_string(), Value::Int(1)),
            ]
            .into_iter()
            .collect(),
        );
        assert_eq!(
            coerce_literal(
                &literal,
                &TypeAnnotation::named("Point"),
                &schema,
                &no_variables(),
            ),
            None,
        );
    }

    #[test]
    fn enum_literal_maps_to_payload_but_string_does_not() {
        let schema = test_schema();
        assert_eq!(
            coerce_literal(
                &Value::Enum("RED".to_string()),
                &TypeAnnotation::named("Color"),
                &schema,
                &no_variables(),
            ),
            Some(HostValue::Int(0)),
        );
        assert_eq!(
            coerce_literal(
                &Value::String("RED".to_string()),
                &TypeAnnotation::named("Color"),
                &schema,
                &no_variables(),
            ),
            None,
        );
    }
}
