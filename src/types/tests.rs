use crate::host_value::HostValue;
use crate::schema::SchemaBuildError;
use crate::types::Argument;
use crate::types::Directive;
use crate::types::DirectiveLocation;
use crate::types::EnumType;
use crate::types::EnumVariant;
use crate::types::Field;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::TypeAnnotation;
use crate::types::UnionType;
use crate::value::Value;

mod annotations {
    use super::*;

    #[test]
    fn display_matches_schema_language() {
        assert_eq!(TypeAnnotation::named("Int").to_string(), "Int");
        assert_eq!(TypeAnnotation::non_null_named("Int").to_string(), "Int!");
        assert_eq!(
            TypeAnnotation::list(TypeAnnotation::non_null_named("Int")).to_string(),
            "[Int!]",
        );
        assert_eq!(
            TypeAnnotation::list(TypeAnnotation::named("Int"))
                .non_null()
                .to_string(),
            "[Int]!",
        );
    }

    #[test]
    fn innermost_named_ref_unwraps_lists() {
        let annotation = TypeAnnotation::list(TypeAnnotation::list(
            TypeAnnotation::non_null_named("String"),
        ));
        assert_eq!(annotation.innermost_named_type_ref().name(), "String");
    }

    #[test]
    fn nullability_round_trips() {
        let annotation = TypeAnnotation::named("Int").non_null();
        assert!(!annotation.nullable());
        assert!(annotation.nullable_clone().nullable());
    }
}

mod builders {
    use super::*;

    #[test]
    fn duplicate_field_names_are_rejected() {
        let result = ObjectType::builder("Thing")
            .field(Field::builder("x", TypeAnnotation::named("Int")))
            .field(Field::builder("x", TypeAnnotation::named("Int")))
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::DuplicateFieldName { type_name, field_name }
                if type_name == "Thing" && field_name == "x",
        ));
    }

    #[test]
    fn duplicate_argument_names_are_rejected() {
        let result = ObjectType::builder("Thing")
            .field(
                Field::builder("x", TypeAnnotation::named("Int"))
                    .argument(Argument::new("a", TypeAnnotation::named("Int")))
                    .argument(Argument::new("a", TypeAnnotation::named("Int"))),
            )
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::DuplicateArgumentName { argument_name, .. }
                if argument_name == "a",
        ));
    }

    #[test]
    fn duplicate_union_members_are_rejected() {
        let result = UnionType::builder("U").member("A").member("A").build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::DuplicateUnionMember { member_name, .. }
                if member_name == "A",
        ));
    }

    #[test]
    fn fields_keep_declaration_order() {
        let object_type = ObjectType::builder("Thing")
            .field(Field::builder("zebra", TypeAnnotation::named("Int")))
            .field(Field::builder("aardvark", TypeAnnotation::named("Int")))
            .build()
            .unwrap();
        let names: Vec<&String> = object_type.fields().keys().collect();
        assert_eq!(names, vec!["zebra", "aardvark"]);
    }
}

mod enums {
    use super::*;

    #[test]
    fn variants_default_their_payload_to_their_name() {
        let enum_type = EnumType::builder("Color").value("RED").build().unwrap();
        assert_eq!(
            enum_type.variant("RED").unwrap().payload(),
            &HostValue::Str("RED".to_string()),
        );
    }

    #[test]
    fn payloads_map_back_to_variants() {
        let enum_type = EnumType::builder("Color")
            .variant(EnumVariant::new("RED").with_payload(0xff0000))
            .variant(EnumVariant::new("GREEN").with_payload(0x00ff00))
            .build()
            .unwrap();
        assert_eq!(
            enum_type
                .variant_for_payload(&HostValue::Int(0x00ff00))
                .unwrap()
                .name(),
            "GREEN",
        );
        assert!(enum_type
            .variant_for_payload(&HostValue::Int(42))
            .is_none());
    }
}

mod scalars {
    use super::*;

    #[test]
    fn builtin_int_rejects_out_of_range_and_non_integers() {
        let int = crate::types::scalar_type::builtins::int();
        assert_eq!(
            int.parse_value(&HostValue::Int(7)),
            Ok(HostValue::Int(7)),
        );
        assert!(int.parse_value(&HostValue::Int(i64::from(i32::MAX) + 1)).is_err());
        assert!(int.parse_value(&HostValue::Str("7".to_string())).is_err());
        assert!(int.parse_literal(&Value::String("7".to_string())).is_err());
    }

    #[test]
    fn builtin_id_accepts_strings_and_integers() {
        let id = crate::types::scalar_type::builtins::id();
        assert_eq!(
            id.parse_value(&HostValue::Int(12)),
            Ok(HostValue::Str("12".to_string())),
        );
        assert_eq!(
            id.parse_literal(&Value::String("abc".to_string())),
            Ok(HostValue::Str("abc".to_string())),
        );
    }

    #[test]
    fn custom_scalars_default_to_passthrough() {
        let custom = ScalarType::builder("JSON").build();
        let value = HostValue::Bool(true);
        assert_eq!(custom.parse_value(&value), Ok(value.clone()));
        assert_eq!(custom.serialize(&value), Ok(value));
    }
}

mod directives {
    use super::*;

    #[test]
    fn builtins_expose_their_if_argument() {
        let skip = Directive::Skip;
        let argument = skip.argument("if").unwrap();
        assert_eq!(argument.type_annotation().to_string(), "Boolean!");
        assert!(argument.is_required());
        assert!(!skip.is_repeatable());
        assert!(skip.locations().contains(&DirectiveLocation::Field));
    }

    #[test]
    fn custom_directives_carry_locations_and_repeatability() {
        let tag = Directive::custom("tag", vec![DirectiveLocation::Field])
            .argument(Argument::new(
                "name",
                TypeAnnotation::non_null_named("String"),
            ))
            .repeatable()
            .build();
        assert_eq!(tag.name(), "tag");
        assert!(tag.is_repeatable());
        assert!(!tag.is_builtin());
        assert_eq!(tag.locations(), &[DirectiveLocation::Field]);
    }
}
