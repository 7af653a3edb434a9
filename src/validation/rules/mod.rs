mod executable_definitions;
mod fields_on_correct_type;
mod fragments_on_composite_types;
mod known_argument_names;
mod known_directives;
mod known_fragment_names;
mod known_type_names;
mod lone_anonymous_operation;
mod no_fragment_cycles;
mod no_unused_fragments;
mod overlapping_fields_can_be_merged;
mod possible_fragment_spreads;
mod provided_required_arguments;
mod query_complexity;
mod query_depth;
mod scalar_leafs;
mod single_field_subscriptions;
mod unique_argument_names;
mod unique_directives_per_location;
mod unique_fragment_names;
mod unique_input_field_names;
mod unique_operation_names;
mod unique_variable_names;
mod values_of_correct_type;
mod variables_are_input_types;
mod variables_in_allowed_position;

pub use executable_definitions::ExecutableDefinitions;
pub use fields_on_correct_type::FieldsOnCorrectType;
pub use fragments_on_composite_types::FragmentsOnCompositeTypes;
pub use known_argument_names::KnownArgumentNames;
pub use known_directives::KnownDirectives;
pub use known_fragment_names::KnownFragmentNames;
pub use known_type_names::KnownTypeNames;
pub use lone_anonymous_operation::LoneAnonymousOperation;
pub use no_fragment_cycles::NoFragmentCycles;
pub use no_unused_fragments::NoUnusedFragments;
pub use overlapping_fields_can_be_merged::OverlappingFieldsCanBeMerged;
pub use possible_fragment_spreads::PossibleFragmentSpreads;
pub use provided_required_arguments::ProvidedRequiredArguments;
pub use query_complexity::QueryComplexity;
pub use query_depth::QueryDepth;
pub use scalar_leafs::ScalarLeafs;
pub use single_field_subscriptions::SingleFieldSubscriptions;
pub use unique_argument_names::UniqueArgumentNames;
pub use unique_directives_per_location::UniqueDirectivesPerLocation;
pub use unique_fragment_names::UniqueFragmentNames;
pub use unique_input_field_names::UniqueInputFieldNames;
pub use unique_operation_names::UniqueOperationNames;
pub use unique_variable_names::UniqueVariableNames;
pub use values_of_correct_type::ValuesOfCorrectType;
pub use variables_are_input_types::VariablesAreInputTypes;
pub use variables_in_allowed_position::VariablesInAllowedPosition;

use crate::validation::ValidationRuleFactory;
use std::sync::Arc;
use thiserror::Error;

/// Construction error for the limit rules ([`QueryComplexity`],
/// [`QueryDepth`]): any negative limit other than the `-1` disable sentinel
/// is rejected.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("argument must be greater or equal to 0.")]
pub struct LimitRuleError;

macro_rules! rule_factory {
    ($rule:ty) => {
        Arc::new(|| Box::new(<$rule>::default()) as Box<dyn crate::validation::ValidationRule>)
            as ValidationRuleFactory
    };
}

/// The default rule set, run unless the host overrides `validation_rules`.
///
/// The limit rules are not part of it: they need a host-chosen maximum.
pub fn default_rules() -> Vec<ValidationRuleFactory> {
    vec![
        rule_factory!(ExecutableDefinitions),
        rule_factory!(UniqueOperationNames),
        rule_factory!(LoneAnonymousOperation),
        rule_factory!(SingleFieldSubscriptions),
        rule_factory!(KnownTypeNames),
        rule_factory!(FragmentsOnCompositeTypes),
        rule_factory!(VariablesAreInputTypes),
        rule_factory!(ScalarLeafs),
        rule_factory!(FieldsOnCorrectType),
        rule_factory!(UniqueFragmentNames),
        rule_factory!(KnownFragmentNames),
        rule_factory!(NoUnusedFragments),
        rule_factory!(PossibleFragmentSpreads),
        rule_factory!(NoFragmentCycles),
        rule_factory!(UniqueVariableNames),
        rule_factory!(KnownDirectives),
        rule_factory!(UniqueDirectivesPerLocation),
        rule_factory!(KnownArgumentNames),
        rule_factory!(UniqueArgumentNames),
        rule_factory!(ValuesOfCorrectType),
        rule_factory!(ProvidedRequiredArguments),
        rule_factory!(VariablesInAllowedPosition),
        rule_factory!(OverlappingFieldsCanBeMerged),
        rule_factory!(UniqueInputFieldNames),
    ]
}
