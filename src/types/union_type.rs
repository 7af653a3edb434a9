use crate::loc;
use crate::schema::SchemaBuildError;
use crate::types::NamedGraphQLTypeRef;
use crate::types::ResolveTypeFn;
use crate::types::TypeBuilder;
use inherent::inherent;
use std::sync::Arc;

/// Represents a
/// [union type](https://spec.graphql.org/October2021/#sec-Unions).
#[derive(Clone)]
pub struct UnionType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) description: Option<String>,
    pub(crate) members: Vec<NamedGraphQLTypeRef>,
    pub(crate) name: String,
    pub(crate) resolve_type: Option<ResolveTypeFn>,
}
impl UnionType {
    pub fn builder(name: impl Into<String>) -> UnionTypeBuilder {
        UnionTypeBuilder::new(name)
    }

    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The member object types, in declaration order.
    pub fn members(&self) -> &Vec<NamedGraphQLTypeRef> {
        &self.members
    }

    pub fn has_member(&self, type_name: &str) -> bool {
        self.members
            .iter()
            .any(|member_ref| member_ref.name() == type_name)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn resolve_type(&self) -> Option<&ResolveTypeFn> {
        self.resolve_type.as_ref()
    }
}
impl std::fmt::Debug for UnionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionType")
            .field("name", &self.name)
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

pub struct UnionTypeBuilder {
    description: Option<String>,
    duplicate_member: Option<String>,
    members: Vec<NamedGraphQLTypeRef>,
    name: String,
    resolve_type: Option<ResolveTypeFn>,
}
impl UnionTypeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            description: None,
            duplicate_member: None,
            members: vec![],
            name: name.into(),
            resolve_type: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn member(mut self, type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        if self.members.iter().any(|member| member.name() == type_name) {
            self.duplicate_member.get_or_insert(type_name);
        } else {
            self.members.push(NamedGraphQLTypeRef::new(type_name));
        }
        self
    }

    pub fn resolve_type(
        mut self,
        resolve_type: impl Fn(&crate::host_value::HostValue) -> Option<String>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.resolve_type = Some(Arc::new(resolve_type));
        self
    }
}

#[inherent]
impl TypeBuilder for UnionTypeBuilder {
    type Output = Result<UnionType, SchemaBuildError>;

    pub fn build(self) -> Result<UnionType, SchemaBuildError> {
        if let Some(member_name) = self.duplicate_member {
            return Err(SchemaBuildError::DuplicateUnionMember {
                type_name: self.name,
                member_name,
            });
        }
        Ok(UnionType {
            def_location: loc::SchemaDefLocation::HostDefined,
            description: self.description,
            members: self.members,
            name: self.name,
            resolve_type: self.resolve_type,
        })
    }
}
