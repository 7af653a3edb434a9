use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::Schema;
use crate::types::Argument;
use crate::types::DirectiveLocation;
use crate::types::TypeAnnotation;
use crate::value::Value;
use indexmap::IndexMap;
use std::sync::Arc;
use std::sync::OnceLock;

type DirectiveArgsMap = IndexMap<String, Argument>;

fn deprecated_directive_args() -> &'static DirectiveArgsMap {
    static ARGS: OnceLock<DirectiveArgsMap> = OnceLock::new();
    ARGS.get_or_init(|| {
        IndexMap::from([(
            "reason".to_string(),
            Argument::new("reason", TypeAnnotation::named("String"))
                .with_default(Value::String("No longer supported".to_string())),
        )])
    })
}

fn include_directive_args() -> &'static DirectiveArgsMap {
    static ARGS: OnceLock<DirectiveArgsMap> = OnceLock::new();
    ARGS.get_or_init(|| {
        IndexMap::from([(
            "if".to_string(),
            Argument::new(
                "if",
                TypeAnnotation::from_ast_type(&crate::ast::singletons::NONNULL_BOOLEAN_TYPE),
            ),
        )])
    })
}

fn skip_directive_args() -> &'static DirectiveArgsMap {
    static ARGS: OnceLock<DirectiveArgsMap> = OnceLock::new();
    ARGS.get_or_init(|| {
        IndexMap::from([(
            "if".to_string(),
            Argument::new(
                "if",
                TypeAnnotation::from_ast_type(&crate::ast::singletons::NONNULL_BOOLEAN_TYPE),
            ),
        )])
    })
}

/// Represents a defined directive.
///
/// Every schema carries the three built-in executable directives; hosts add
/// their own with [`Directive::custom`].
#[derive(Clone, Debug)]
pub enum Directive {
    Custom {
        arguments: IndexMap<String, Argument>,
        description: Option<String>,
        locations: Vec<DirectiveLocation>,
        name: String,
        repeatable: bool,
    },
    Deprecated,
    Include,
    Skip,
}
impl Directive {
    pub fn custom(
        name: impl Into<String>,
        locations: Vec<DirectiveLocation>,
    ) -> CustomDirectiveBuilder {
        CustomDirectiveBuilder {
            arguments: IndexMap::new(),
            description: None,
            locations,
            name: name.into(),
            repeatable: false,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Directive::Custom { name, .. } => name.as_str(),
            Directive::Deprecated => "deprecated",
            Directive::Include => "include",
            Directive::Skip => "skip",
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Directive::Custom { description, .. } => description.as_deref(),
            Directive::Deprecated => Some("Marks an element of a GraphQL schema as no longer supported."),
            Directive::Include => Some(
                "Directs the executor to include this field or fragment only when the `if` argument is true.",
            ),
            Directive::Skip => Some(
                "Directs the executor to skip this field or fragment when the `if` argument is true.",
            ),
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Directive::Custom { .. })
    }

    pub fn is_repeatable(&self) -> bool {
        match self {
            Directive::Custom { repeatable, .. } => *repeatable,
            Directive::Deprecated | Directive::Include | Directive::Skip => false,
        }
    }

    pub fn locations(&self) -> &[DirectiveLocation] {
        match self {
            Directive::Custom { locations, .. } => locations,
            Directive::Deprecated => &[
                DirectiveLocation::FieldDefinition,
                DirectiveLocation::ArgumentDefinition,
                DirectiveLocation::InputFieldDefinition,
                DirectiveLocation::EnumValue,
            ],
            Directive::Include | Directive::Skip => &[
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
        }
    }

    pub fn arguments(&self) -> &IndexMap<String, Argument> {
        match self {
            Directive::Custom { arguments, .. } => arguments,
            Directive::Deprecated => deprecated_directive_args(),
            Directive::Include => include_directive_args(),
            Directive::Skip => skip_directive_args(),
        }
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments().get(name)
    }
}
impl DerefByName for Directive {
    type Source = Schema;

    fn deref_name(schema: &Schema, name: &str) -> Result<Arc<Self>, DerefByNameError> {
        schema
            .directive_named(name)
            .ok_or_else(|| DerefByNameError::DanglingReference(name.to_string()))
    }
}

pub struct CustomDirectiveBuilder {
    arguments: IndexMap<String, Argument>,
    description: Option<String>,
    locations: Vec<DirectiveLocation>,
    name: String,
    repeatable: bool,
}
impl CustomDirectiveBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments
            .insert(argument.name().to_string(), argument);
        self
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    pub fn build(self) -> Directive {
        Directive::Custom {
            arguments: self.arguments,
            description: self.description,
            locations: self.locations,
            name: self.name,
            repeatable: self.repeatable,
        }
    }
}

pub type NamedDirectiveRef = NamedRef<Schema, Directive>;
