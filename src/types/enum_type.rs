use crate::host_value::HostValue;
use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::TypeBuilder;
use indexmap::IndexMap;
use inherent::inherent;

/// Represents an
/// [enum type](https://spec.graphql.org/October2021/#sec-Enums).
///
/// Variants are kept in declaration order; introspection and SDL output
/// preserve it.
#[derive(Clone, Debug)]
pub struct EnumType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) name: String,
    pub(crate) variants: IndexMap<String, EnumVariant>,
}
impl EnumType {
    pub fn builder(name: impl Into<String>) -> EnumTypeBuilder {
        EnumTypeBuilder::new(name)
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn variants(&self) -> &IndexMap<String, EnumVariant> {
        &self.variants
    }

    pub fn variant(&self, name: &str) -> Option<&EnumVariant> {
        self.variants.get(name)
    }

    /// Find the variant whose payload equals `payload`, for output
    /// serialization of resolver-returned payload values.
    pub fn variant_for_payload(&self, payload: &HostValue) -> Option<&EnumVariant> {
        self.variants
            .values()
            .find(|variant| &variant.payload == payload)
    }
}

/// Represents a defined variant for some [`EnumType`].
///
/// The payload is an opaque host value handed to resolvers when the variant
/// is used as an input, and matched against resolver return values on
/// output. It defaults to the variant's name.
#[derive(Clone, Debug)]
pub struct EnumVariant {
    pub(crate) deprecation_reason: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) name: String,
    pub(crate) payload: HostValue,
}
impl EnumVariant {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            deprecation_reason: None,
            description: None,
            payload: HostValue::Str(name.clone()),
            name,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<HostValue>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn payload(&self) -> &HostValue {
        &self.payload
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason.is_some()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation_reason.as_deref()
    }
}

#[derive(Clone, Debug)]
pub struct EnumTypeBuilder {
    description: Option<String>,
    name: String,
    variants: IndexMap<String, EnumVariant>,
    duplicate: Option<String>,
}
impl EnumTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            description: None,
            name: name.into(),
            variants: IndexMap::new(),
            duplicate: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn variant(mut self, variant: EnumVariant) -> Self {
        let name = variant.name().to_string();
        if self.variants.insert(name.clone(), variant).is_some() {
            self.duplicate.get_or_insert(name);
        }
        self
    }

    /// Shorthand for a plain variant whose payload is its own name.
    pub fn value(self, name: impl Into<String>) -> Self {
        self.variant(EnumVariant::new(name))
    }
}

impl EnumTypeBuilder {
    /// Build one of the engine's own (introspection) enums; their shape is
    /// static and well-formed by construction.
    pub(crate) fn build_builtin(self) -> EnumType {
        let mut enum_type = self.build().expect("built-in enums are well-formed");
        enum_type.def_location = loc::SchemaDefLocation::GraphQLBuiltIn;
        enum_type
    }
}

#[inherent]
impl TypeBuilder for EnumTypeBuilder {
    type Output = Result<EnumType, SchemaBuildError>;

    pub fn build(self) -> Result<EnumType, SchemaBuildError> {
        if let Some(variant_name) = self.duplicate {
            return Err(SchemaBuildError::DuplicateEnumVariant {
                type_name: self.name,
                variant_name,
            });
        }
        Ok(EnumType {
            def_location: loc::SchemaDefLocation::HostDefined,
            description: self.description,
            name: self.name,
            variants: self.variants,
        })
    }
}
