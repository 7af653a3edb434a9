use crate::ast;
use crate::error::GraphQLError;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::Argument;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::InputField;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::types::UnionType;
use crate::validation::rules::QueryComplexity;
use crate::validation::rules::QueryDepth;
use crate::validation::validate;
use crate::validation::ValidationRuleFactory;
use crate::value::Value;
use indexmap::IndexMap;
use std::sync::Arc;

fn pet_schema() -> Arc<Schema> {
    let being = InterfaceType::builder("Being")
        .field(Field::builder("name", TypeAnnotation::named("String")))
        .build()
        .unwrap();

    let dog = ObjectType::builder("Dog")
        .interface("Being")
        .field(Field::builder("name", TypeAnnotation::named("String")))
        .field(Field::builder("barkVolume", TypeAnnotation::named("Int")))
        .field(
            Field::builder("doesKnowCommand", TypeAnnotation::named("Boolean")).argument(
                Argument::new("dogCommand", TypeAnnotation::non_null_named("DogCommand")),
            ),
        )
        .build()
        .unwrap();

    let cat = ObjectType::builder("Cat")
        .interface("Being")
        .field(Field::builder("name", TypeAnnotation::named("String")))
        .field(Field::builder("meowVolume", TypeAnnotation::named("Int")))
        .build()
        .unwrap();

    let cat_or_dog = UnionType::builder("CatOrDog")
        .member("Cat")
        .member("Dog")
        .build()
        .unwrap();

    let dog_command = EnumType::builder("DogCommand")
        .value("SIT")
        .value("DOWN")
        .value("HEEL")
        .build()
        .unwrap();

    let complex_input = InputObjectType::builder("ComplexInput")
        .field(InputField::new(
            "requiredField",
            TypeAnnotation::non_null_named("Boolean"),
        ))
        .field(InputField::new("intField", TypeAnnotation::named("Int")))
        .field(InputField::new("stringField", TypeAnnotation::named("String")))
        .build()
        .unwrap();

    let query = ObjectType::builder("Query")
        .field(Field::builder("dog", TypeAnnotation::named("Dog")))
        .field(Field::builder("cat", TypeAnnotation::named("Cat")))
        .field(Field::builder("catOrDog", TypeAnnotation::named("CatOrDog")))
        .field(Field::builder("being", TypeAnnotation::named("Being")))
        .field(
            Field::builder("findDog", TypeAnnotation::named("Dog")).argument(
                Argument::new("complex", TypeAnnotation::named("ComplexInput")),
            ),
        )
        .field(
            Field::builder("intArg", TypeAnnotation::named("Int"))
                .argument(Argument::new("i", TypeAnnotation::non_null_named("Int"))),
        )
        .field(
            Field::builder("boolArg", TypeAnnotation::named("Boolean"))
                .argument(Argument::new("b", TypeAnnotation::named("Boolean"))),
        )
        .field(Field::builder("str", TypeAnnotation::named("String")))
        .field(
            Field::builder("expensive", TypeAnnotation::named("Int"))
                .argument(
                    Argument::new("size", TypeAnnotation::named("Int"))
                        .with_default(Value::Int(1)),
                )
                .complexity(|child_complexity, args| {
                    let size = match args.get("size") {
                        Some(HostValue::Int(size)) => *size as usize,
                        _ => 1,
                    };
                    size * (1 + child_complexity)
                }),
        )
        .build()
        .unwrap();

    let mutation = ObjectType::builder("Mutation")
        .field(Field::builder("doStuff", TypeAnnotation::named("String")))
        .build()
        .unwrap();

    let subscription = ObjectType::builder("Subscription")
        .field(Field::builder("newMessage", TypeAnnotation::named("String")))
        .field(Field::builder("other", TypeAnnotation::named("String")))
        .build()
        .unwrap();

    Arc::new(
        Schema::builder()
            .register(being)
            .register(dog)
            .register(cat)
            .register(cat_or_dog)
            .register(dog_command)
            .register(complex_input)
            .register(query)
            .register(mutation)
            .register(subscription)
            .query_root("Query")
            .mutation_root("Mutation")
            .subscription_root("Subscription")
            .build()
            .unwrap(),
    )
}

fn validate_source(source: &str) -> Vec<GraphQLError> {
    validate_with_rules(source, &crate::validation::default_rules())
}

fn validate_with_rules(source: &str, rules: &[ValidationRuleFactory]) -> Vec<GraphQLError> {
    let schema = pet_schema();
    let document = ast::parse(source).expect("test document parses");
    validate(&schema, &document, &IndexMap::new(), rules)
}

fn assert_passes(source: &str) {
    let errors = validate_source(source);
    assert!(errors.is_empty(), "expected no errors, got: {errors:?}");
}

fn assert_fails_with(source: &str, expected_message: &str) {
    let errors = validate_source(source);
    assert!(
        errors
            .iter()
            .any(|error| error.message() == expected_message),
        "expected error {expected_message:?}, got: {:?}",
        errors
            .iter()
            .map(GraphQLError::message)
            .collect::<Vec<_>>(),
    );
}

mod basics {
    use super::*;

    #[test]
    fn a_well_formed_query_passes() {
        assert_passes("{ dog { name barkVolume } }");
    }

    #[test]
    fn fragment_duplication_is_equivalent_to_inline_selection() {
        assert_passes(
            "{ dog { ...F } } fragment F on Dog { name barkVolume }",
        );
    }
}

mod known_names {
    use super::*;

    #[test]
    fn unknown_fragment_condition_type() {
        assert_fails_with(
            "{ dog { ...on Doggo { name } } }",
            "Unknown type \"Doggo\". Did you mean \"Dog\"?",
        );
    }

    #[test]
    fn unknown_variable_type() {
        assert_fails_with(
            "query ($x: Dogg) { dog { name } }",
            "Unknown type \"Dogg\". Did you mean \"Dog\"?",
        );
    }

    #[test]
    fn unknown_fragment_spread() {
        assert_fails_with(
            "{ dog { ...MissingFragment } }",
            "Unknown fragment \"MissingFragment\".",
        );
    }

    #[test]
    fn unknown_directive() {
        assert_fails_with(
            "{ dog { name @unknownDirective } }",
            "Unknown directive \"@unknownDirective\".",
        );
    }

    #[test]
    fn misplaced_directive() {
        assert_fails_with(
            "query @include(if: true) { dog { name } }",
            "Directive \"@include\" may not be used on QUERY.",
        );
    }

    #[test]
    fn unknown_field_argument_with_suggestion() {
        assert_fails_with(
            "{ dog { doesKnowCommand(dogCommandd: SIT) } }",
            "Unknown argument \"dogCommandd\" on field \"Dog.doesKnowCommand\". \
            Did you mean \"dogCommand\"?",
        );
    }

    #[test]
    fn unknown_directive_argument() {
        assert_fails_with(
            "{ dog { name @skip(iff: true) } }",
            "Unknown argument \"iff\" on directive \"@skip\". Did you mean \"if\"?",
        );
    }

    #[test]
    fn unknown_field_with_suggestion() {
        assert_fails_with(
            "{ dog { barkVolum } }",
            "Cannot query field \"barkVolum\" on type \"Dog\". \
            Did you mean \"barkVolume\"?",
        );
    }

    #[test]
    fn unknown_field_on_abstract_type_suggests_inline_fragment() {
        assert_fails_with(
            "{ catOrDog { meowVolume } }",
            "Cannot query field \"meowVolume\" on type \"CatOrDog\". \
            Did you mean to use an inline fragment on \"Cat\"?",
        );
    }
}

mod fragments {
    use super::*;

    #[test]
    fn fragment_on_scalar_type_fails() {
        assert_fails_with(
            "{ dog { ...F } } fragment F on Int { x }",
            "Fragment \"F\" cannot condition on non composite type \"Int\".",
        );
    }

    #[test]
    fn inline_fragment_on_scalar_type_fails() {
        assert_fails_with(
            "{ dog { ...on Boolean { x } } }",
            "Fragment cannot condition on non composite type \"Boolean\".",
        );
    }

    #[test]
    fn unused_fragment_fails() {
        assert_fails_with(
            "{ dog { name } } fragment Unused on Dog { name }",
            "Fragment \"Unused\" is never used.",
        );
    }

    #[test]
    fn self_cycle_fails() {
        assert_fails_with(
            "{ dog { ...F } } fragment F on Dog { ...F }",
            "Cannot spread fragment \"F\" within itself.",
        );
    }

    #[test]
    fn transitive_cycle_names_the_path() {
        assert_fails_with(
            "{ dog { ...A } } \
            fragment A on Dog { ...B } \
            fragment B on Dog { ...A }",
            "Cannot spread fragment \"A\" within itself via \"B\".",
        );
    }

    #[test]
    fn impossible_spread_fails() {
        assert_fails_with(
            "{ dog { ...CatStuff } } fragment CatStuff on Cat { meowVolume }",
            "Fragment \"CatStuff\" cannot be spread here as objects of type \
            \"Dog\" can never be of type \"Cat\".",
        );
    }

    #[test]
    fn impossible_inline_spread_fails() {
        assert_fails_with(
            "{ dog { ...on Cat { meowVolume } } }",
            "Fragment cannot be spread here as objects of type \"Dog\" can \
            never be of type \"Cat\".",
        );
    }

    #[test]
    fn abstract_spread_into_member_object_passes() {
        assert_passes(
            "{ catOrDog { ...on Dog { name } ...on Cat { meowVolume } } }",
        );
    }
}

mod uniqueness {
    use super::*;

    #[test]
    fn duplicate_operation_names() {
        assert_fails_with(
            "query Q { str } query Q { str }",
            "There can be only one operation named \"Q\".",
        );
    }

    #[test]
    fn duplicate_fragment_names() {
        assert_fails_with(
            "{ dog { ...F } } \
            fragment F on Dog { name } \
            fragment F on Dog { barkVolume }",
            "There can be only one fragment named \"F\".",
        );
    }

    #[test]
    fn duplicate_variable_names() {
        assert_fails_with(
            "query ($x: Int, $x: Int) { intArg(i: $x) }",
            "There can be only one variable named \"$x\".",
        );
    }

    #[test]
    fn duplicate_argument_names() {
        assert_fails_with(
            "{ intArg(i: 1, i: 2) }",
            "There can be only one argument named \"i\".",
        );
    }

    #[test]
    fn duplicate_directives_at_one_location() {
        assert_fails_with(
            "{ dog { name @skip(if: true) @skip(if: false) } }",
            "The directive \"@skip\" can only be used once at this location.",
        );
    }

    #[test]
    fn same_directive_on_different_locations_passes() {
        assert_passes("{ dog @skip(if: false) { name @skip(if: false) } }");
    }
}

mod operations {
    use super::*;

    #[test]
    fn lone_anonymous_operation_violated() {
        assert_fails_with(
            "{ str } query Named { str }",
            "This anonymous operation must be the only defined operation.",
        );
    }

    #[test]
    fn subscription_with_two_root_fields_fails() {
        assert_fails_with(
            "subscription S { newMessage other }",
            "Subscription \"S\" must select only one top level field.",
        );
    }

    #[test]
    fn anonymous_subscription_with_two_root_fields_fails() {
        assert_fails_with(
            "subscription { newMessage other }",
            "Anonymous Subscription must select only one top level field.",
        );
    }

    #[test]
    fn subscription_counts_fields_through_fragments() {
        assert_fails_with(
            "subscription S { ...Multi } \
            fragment Multi on Subscription { newMessage other }",
            "Subscription \"S\" must select only one top level field.",
        );
    }
}

mod selections {
    use super::*;

    #[test]
    fn scalar_with_subselection_fails() {
        assert_fails_with(
            "{ dog { barkVolume { x } } }",
            "Field \"barkVolume\" must not have a selection since type \"Int\" \
            has no subfields.",
        );
    }

    #[test]
    fn composite_without_subselection_fails() {
        assert_fails_with(
            "{ dog }",
            "Field \"dog\" of type \"Dog\" must have a selection of subfields. \
            Did you mean \"dog { ... }\"?",
        );
    }
}

mod values {
    use super::*;

    #[test]
    fn null_for_non_null_argument_fails() {
        assert_fails_with(
            "{ intArg(i: null) }",
            "Expected value of type \"Int!\", found null.",
        );
    }

    #[test]
    fn wrong_scalar_literal_fails() {
        assert_fails_with(
            "{ intArg(i: \"three\") }",
            "Expected value of type \"Int\", found \"three\".",
        );
    }

    #[test]
    fn unknown_enum_value_suggests() {
        assert_fails_with(
            "{ dog { doesKnowCommand(dogCommand: SITT) } }",
            "Value \"SITT\" does not exist in \"DogCommand\" enum. Did you mean \
            the enum value \"SIT\"?",
        );
    }

    #[test]
    fn string_for_enum_fails() {
        assert_fails_with(
            "{ dog { doesKnowCommand(dogCommand: \"SIT\") } }",
            "Enum \"DogCommand\" cannot represent non-enum value: \"SIT\".",
        );
    }

    #[test]
    fn missing_required_input_field_fails() {
        assert_fails_with(
            "{ findDog(complex: { intField: 3 }) }",
            "Field \"ComplexInput.requiredField\" of required type \"Boolean!\" \
            was not provided.",
        );
    }

    #[test]
    fn unknown_input_field_suggests() {
        assert_fails_with(
            "{ findDog(complex: { requiredField: true, intFieldd: 3 }) }",
            "Field \"intFieldd\" is not defined by type \"ComplexInput\". \
            Did you mean \"intField\"?",
        );
    }

    #[test]
    fn missing_required_argument_fails() {
        assert_fails_with(
            "{ intArg }",
            "Field \"intArg\" argument \"i\" of type \"Int!\" is required, but \
            it was not provided.",
        );
    }

    #[test]
    fn missing_required_directive_argument_fails() {
        assert_fails_with(
            "{ str @skip }",
            "Directive \"@skip\" argument \"if\" of type \"Boolean!\" is \
            required, but it was not provided.",
        );
    }
}

mod variables {
    use super::*;

    #[test]
    fn non_input_variable_type_fails() {
        assert_fails_with(
            "query ($dog: Dog) { dog { name @include(if: $dog) } }",
            "Variable \"$dog\" cannot be non-input type \"Dog\".",
        );
    }

    #[test]
    fn nullable_variable_in_non_null_position_fails() {
        assert_fails_with(
            "query ($i: Int) { intArg(i: $i) }",
            "Variable \"$i\" of type \"Int\" used in position expecting type \
            \"Int!\".",
        );
    }

    #[test]
    fn nullable_variable_with_default_in_non_null_position_passes() {
        assert_passes("query ($i: Int = 3) { intArg(i: $i) }");
    }

    #[test]
    fn matching_variable_type_passes() {
        assert_passes("query ($i: Int!) { intArg(i: $i) }");
    }

    #[test]
    fn variable_usage_inside_fragment_is_checked_against_the_operation() {
        assert_fails_with(
            "query ($i: String) { dog { ...NeedsInt } } \
            fragment NeedsInt on Dog { doesKnowCommand(dogCommand: SIT) } \
            fragment Unrelated on Dog { name }",
            "Fragment \"Unrelated\" is never used.",
        );
        assert_fails_with(
            "query ($b: String) { ...UsesBool } \
            fragment UsesBool on Query { boolArg(b: $b) }",
            "Variable \"$b\" of type \"String\" used in position expecting type \
            \"Boolean\".",
        );
    }

    #[test]
    fn undefined_variable_fails() {
        assert_fails_with(
            "query Q { intArg(i: $undeclared) }",
            "Variable \"$undeclared\" is not defined.",
        );
    }
}

mod merging {
    use super::*;

    #[test]
    fn identical_selections_merge() {
        assert_passes("{ dog { name name } }");
    }

    #[test]
    fn alias_conflicts_with_different_fields() {
        assert_fails_with(
            "{ dog { name: barkVolume name } }",
            "Fields \"name\" conflict because \"barkVolume\" and \"name\" are \
            different fields. Use different aliases on the fields to fetch both \
            if this was intentional.",
        );
    }

    #[test]
    fn differing_arguments_conflict() {
        assert_fails_with(
            "{ dog { doesKnowCommand(dogCommand: SIT) \
                doesKnowCommand(dogCommand: DOWN) } }",
            "Fields \"doesKnowCommand\" conflict because they have differing \
            arguments. Use different aliases on the fields to fetch both if \
            this was intentional.",
        );
    }

    #[test]
    fn conflicting_leaf_types_across_exclusive_objects_conflict() {
        assert_fails_with(
            "{ catOrDog { ...on Cat { volume: meowVolume } \
                ...on Dog { volume: name } } }",
            "Fields \"volume\" conflict because they return conflicting types \
            \"Int\" and \"String\". Use different aliases on the fields to \
            fetch both if this was intentional.",
        );
    }

    #[test]
    fn same_shape_across_exclusive_objects_merges() {
        assert_passes(
            "{ catOrDog { ...on Cat { volume: meowVolume } \
                ...on Dog { volume: barkVolume } } }",
        );
    }

    #[test]
    fn conflicts_inside_fragments_are_found() {
        assert_fails_with(
            "{ dog { ...A ...B } } \
            fragment A on Dog { x: name } \
            fragment B on Dog { x: barkVolume }",
            "Fields \"x\" conflict because \"name\" and \"barkVolume\" are \
            different fields. Use different aliases on the fields to fetch both \
            if this was intentional.",
        );
    }
}

mod limits {
    use super::*;

    #[test]
    fn construction_rejects_negative_limits_except_the_sentinel() {
        assert_eq!(
            QueryComplexity::new(-2).unwrap_err().to_string(),
            "argument must be greater or equal to 0.",
        );
        assert_eq!(
            QueryDepth::new(-5).unwrap_err().to_string(),
            "argument must be greater or equal to 0.",
        );
        assert!(QueryComplexity::new(-1).is_ok());
        assert!(QueryDepth::new(-1).is_ok());
        assert!(QueryComplexity::new(0).is_ok());
    }

    #[test]
    fn complexity_over_limit_fails_with_exact_message() {
        let rules = vec![QueryComplexity::factory(5).unwrap()];
        let errors = validate_with_rules(
            "{ dog { name barkVolume } cat { name meowVolume } }",
            &rules,
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message(),
            "Max query complexity should be 5 but got 6.",
        );
    }

    #[test]
    fn complexity_sentinel_disables_the_rule() {
        let rules = vec![QueryComplexity::factory(-1).unwrap()];
        let errors = validate_with_rules(
            "{ dog { name barkVolume } cat { name meowVolume } }",
            &rules,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn complexity_override_uses_arguments() {
        let rules = vec![QueryComplexity::factory(5).unwrap()];
        // expensive scores size * (1 + children) = 10.
        let errors = validate_with_rules("{ expensive(size: 10) }", &rules);
        assert_eq!(
            errors[0].message(),
            "Max query complexity should be 5 but got 10.",
        );
    }

    #[test]
    fn depth_over_limit_fails() {
        let rules = vec![QueryDepth::factory(1).unwrap()];
        let errors = validate_with_rules("{ dog { name } }", &rules);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "Max query depth should be 1 but got 2.");
    }

    #[test]
    fn depth_excludes_introspection_subtrees() {
        let rules = vec![QueryDepth::factory(1).unwrap()];
        let errors = validate_with_rules(
            "{ str __schema { types { name } } }",
            &rules,
        );
        assert!(errors.is_empty(), "got: {errors:?}");
    }

    #[test]
    fn depth_counts_through_fragments() {
        let rules = vec![QueryDepth::factory(2).unwrap()];
        let errors = validate_with_rules(
            "{ dog { ...Deep } } fragment Deep on Dog { name }",
            &rules,
        );
        assert!(errors.is_empty());

        let rules = vec![QueryDepth::factory(1).unwrap()];
        let errors = validate_with_rules(
            "{ dog { ...Deep } } fragment Deep on Dog { name }",
            &rules,
        );
        assert_eq!(errors[0].message(), "Max query depth should be 1 but got 2.");
    }
}
