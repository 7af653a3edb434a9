use crate::schema::do_types_overlap;
use crate::schema::is_sub_type_of;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::TypeValidationError;
use crate::types::Argument;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputField;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::types::UnionType;
use std::sync::Arc;

fn query_type() -> ObjectType {
    ObjectType::builder("Query")
        .field(Field::builder("ping", TypeAnnotation::named("Int")))
        .build()
        .unwrap()
}

mod building {
    use super::*;

    #[test]
    fn build_without_query_root_fails() {
        let result = Schema::builder().build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::NoQueryOperationTypeDefined,
        ));
    }

    #[test]
    fn minimal_schema_carries_builtins() {
        let schema = Schema::builder()
            .register(query_type())
            .query_root("Query")
            .build()
            .unwrap();

        for builtin in ["Int", "Float", "String", "Boolean", "ID"] {
            assert!(schema.has_type(builtin), "missing {builtin}");
        }
        for introspection in ["__Schema", "__Type", "__Field", "__TypeKind"] {
            assert!(schema.has_type(introspection), "missing {introspection}");
        }
        for directive in ["skip", "include", "deprecated"] {
            assert!(schema.directive_named(directive).is_some());
        }
        assert_eq!(schema.query_type().name(), "Query");
        assert!(schema.mutation_type().is_none());
    }

    #[test]
    fn duplicate_type_names_fail() {
        let result = Schema::builder()
            .register(query_type())
            .register(query_type())
            .query_root("Query")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::DuplicateTypeName { type_name } if type_name == "Query",
        ));
    }

    #[test]
    fn dangling_reference_fails_without_a_loader() {
        let result = Schema::builder()
            .register(
                ObjectType::builder("Query")
                    .field(Field::builder("ghost", TypeAnnotation::named("Ghost")))
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::UndefinedTypeReference { referenced_type, .. }
                if referenced_type == "Ghost",
        ));
    }

    #[test]
    fn type_loader_resolves_unregistered_names() {
        let ghost: Arc<GraphQLType> = Arc::new(
            ObjectType::builder("Ghost")
                .field(Field::builder("boo", TypeAnnotation::named("String")))
                .build()
                .unwrap()
                .into(),
        );

        let schema = Schema::builder()
            .register(
                ObjectType::builder("Query")
                    .field(Field::builder("ghost", TypeAnnotation::named("Ghost")))
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .type_loader(move |name| {
                (name == "Ghost").then(|| Arc::clone(&ghost))
            })
            .build()
            .unwrap();

        let loaded = schema.type_named("Ghost").unwrap();
        let again = schema.type_named("Ghost").unwrap();
        assert!(Arc::ptr_eq(&loaded, &again));
        assert!(schema.type_named("Phantom").is_none());
    }
}

mod invariants {
    use super::*;

    fn build_with(extra: impl Into<GraphQLType>) -> Result<Schema, SchemaBuildError> {
        Schema::builder()
            .register(query_type())
            .register(extra)
            .query_root("Query")
            .build()
    }

    #[test]
    fn object_without_fields_fails() {
        let result = build_with(ObjectType::builder("Empty").build().unwrap());
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::TypeValidationError(inner)
                if matches!(*inner, TypeValidationError::NoFieldsDefined { .. }),
        ));
    }

    #[test]
    fn union_member_must_be_an_object() {
        let result = Schema::builder()
            .register(query_type())
            .register(
                EnumType::builder("Flavor").value("SWEET").build().unwrap(),
            )
            .register(
                UnionType::builder("Sweets").member("Flavor").build().unwrap(),
            )
            .query_root("Query")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::TypeValidationError(inner)
                if matches!(*inner, TypeValidationError::InvalidUnionMemberTypeKind { .. }),
        ));
    }

    #[test]
    fn enum_values_may_not_shadow_keywords() {
        let result = build_with(
            EnumType::builder("Bad").value("true").build().unwrap(),
        );
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::TypeValidationError(inner)
                if matches!(*inner, TypeValidationError::ReservedEnumVariantName { .. }),
        ));
    }

    #[test]
    fn output_field_with_input_type_fails() {
        let result = Schema::builder()
            .register(
                InputObjectType::builder("Filter")
                    .field(InputField::new("q", TypeAnnotation::named("String")))
                    .build()
                    .unwrap(),
            )
            .register(
                ObjectType::builder("Query")
                    .field(Field::builder("bad", TypeAnnotation::named("Filter")))
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::TypeValidationError(inner)
                if matches!(*inner, TypeValidationError::InvalidOutputFieldWithInputType { .. }),
        ));
    }

    #[test]
    fn argument_with_output_type_fails() {
        let result = Schema::builder()
            .register(
                ObjectType::builder("Query")
                    .field(
                        Field::builder("bad", TypeAnnotation::named("Int")).argument(
                            Argument::new("arg", TypeAnnotation::named("Query")),
                        ),
                    )
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::TypeValidationError(inner)
                if matches!(*inner, TypeValidationError::InvalidArgumentWithOutputType { .. }),
        ));
    }

    #[test]
    fn non_nullable_input_cycle_fails() {
        let result = Schema::builder()
            .register(query_type())
            .register(
                InputObjectType::builder("A")
                    .field(InputField::new("b", TypeAnnotation::non_null_named("B")))
                    .build()
                    .unwrap(),
            )
            .register(
                InputObjectType::builder("B")
                    .field(InputField::new("a", TypeAnnotation::non_null_named("A")))
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::TypeValidationError(inner)
                if matches!(*inner, TypeValidationError::InputObjectNonNullableCycle { .. }),
        ));
    }

    #[test]
    fn nullable_input_cycle_is_allowed() {
        let result = Schema::builder()
            .register(query_type())
            .register(
                InputObjectType::builder("Node")
                    .field(InputField::new("next", TypeAnnotation::named("Node")))
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn interface_field_must_exist_on_implementer() {
        let result = Schema::builder()
            .register(query_type())
            .register(
                InterfaceType::builder("Named")
                    .field(Field::builder("name", TypeAnnotation::named("String")))
                    .build()
                    .unwrap(),
            )
            .register(
                ObjectType::builder("Thing")
                    .interface("Named")
                    .field(Field::builder("label", TypeAnnotation::named("String")))
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::TypeValidationError(inner)
                if matches!(*inner, TypeValidationError::MissingInterfaceSpecifiedField { .. }),
        ));
    }

    #[test]
    fn covariant_interface_field_type_is_allowed() {
        let result = Schema::builder()
            .register(query_type())
            .register(
                InterfaceType::builder("Named")
                    .field(Field::builder("name", TypeAnnotation::named("String")))
                    .build()
                    .unwrap(),
            )
            .register(
                ObjectType::builder("Thing")
                    .interface("Named")
                    .field(Field::builder(
                        "name",
                        TypeAnnotation::non_null_named("String"),
                    ))
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn contravariant_interface_field_type_fails() {
        let result = Schema::builder()
            .register(query_type())
            .register(
                InterfaceType::builder("Named")
                    .field(Field::builder(
                        "name",
                        TypeAnnotation::non_null_named("String"),
                    ))
                    .build()
                    .unwrap(),
            )
            .register(
                ObjectType::builder("Thing")
                    .interface("Named")
                    .field(Field::builder("name", TypeAnnotation::named("String")))
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .build();
        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::TypeValidationError(inner)
                if matches!(*inner, TypeValidationError::InvalidInterfaceSpecifiedFieldType { .. }),
        ));
    }
}

mod subtyping {
    use super::*;

    fn animal_schema() -> Schema {
        Schema::builder()
            .register(query_type())
            .register(
                InterfaceType::builder("Animal")
                    .field(Field::builder("name", TypeAnnotation::named("String")))
                    .build()
                    .unwrap(),
            )
            .register(
                ObjectType::builder("Dog")
                    .interface("Animal")
                    .field(Field::builder("name", TypeAnnotation::named("String")))
                    .build()
                    .unwrap(),
            )
            .register(
                ObjectType::builder("Rock")
                    .field(Field::builder("weight", TypeAnnotation::named("Int")))
                    .build()
                    .unwrap(),
            )
            .register(
                UnionType::builder("DogOrRock")
                    .member("Dog")
                    .member("Rock")
                    .build()
                    .unwrap(),
            )
            .query_root("Query")
            .build()
            .unwrap()
    }

    #[test]
    fn non_null_is_a_subtype_of_nullable() {
        let schema = animal_schema();
        assert!(is_sub_type_of(
            &schema,
            &TypeAnnotation::non_null_named("Int"),
            &TypeAnnotation::named("Int"),
        ));
        assert!(!is_sub_type_of(
            &schema,
            &TypeAnnotation::named("Int"),
            &TypeAnnotation::non_null_named("Int"),
        ));
    }

    #[test]
    fn object_is_a_subtype_of_its_interface_and_union() {
        let schema = animal_schema();
        assert!(is_sub_type_of(
            &schema,
            &TypeAnnotation::named("Dog"),
            &TypeAnnotation::named("Animal"),
        ));
        assert!(is_sub_type_of(
            &schema,
            &TypeAnnotation::named("Dog"),
            &TypeAnnotation::named("DogOrRock"),
        ));
        assert!(!is_sub_type_of(
            &schema,
            &TypeAnnotation::named("Rock"),
            &TypeAnnotation::named("Animal"),
        ));
    }

    #[test]
    fn lists_compare_covariantly_on_their_items() {
        let schema = animal_schema();
        assert!(is_sub_type_of(
            &schema,
            &TypeAnnotation::list(TypeAnnotation::named("Dog")),
            &TypeAnnotation::list(TypeAnnotation::named("Animal")),
        ));
        assert!(!is_sub_type_of(
            &schema,
            &TypeAnnotation::named("Dog"),
            &TypeAnnotation::list(TypeAnnotation::named("Animal")),
        ));
    }

    #[test]
    fn overlap_requires_a_shared_possible_type() {
        let schema = animal_schema();
        let animal = schema.type_named("Animal").unwrap();
        let dog = schema.type_named("Dog").unwrap();
        let rock = schema.type_named("Rock").unwrap();
        let dog_or_rock = schema.type_named("DogOrRock").unwrap();

        assert!(do_types_overlap(&schema, &animal, &dog));
        assert!(do_types_overlap(&schema, &animal, &dog_or_rock));
        assert!(!do_types_overlap(&schema, &animal, &rock));
    }
}
