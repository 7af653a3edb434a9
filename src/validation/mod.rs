//! Query-document validation.
//!
//! All rules share one traversal: the walker in [`visitor`] drives the
//! type-info tracker and dispatches enter/leave callbacks to every rule.
//! Rules are independent; one rule's error never suppresses another's.

mod context;
pub mod rules;
mod type_info;
mod visitor;

pub use context::ValidationContext;
pub use rules::default_rules;
pub use rules::LimitRuleError;
pub use type_info::TypeInfo;
pub use visitor::validate;
pub use visitor::ArgumentOwner;
pub use visitor::ValidationRule;
pub use visitor::ValidationRuleFactory;

#[cfg(test)]
mod tests;
