use crate::ast;
use crate::error::GraphQLError;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::validation::TypeInfo;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Shared state for one validation run: the schema, the document's fragment
/// map, the raw variable values (used by the limit rules), the type-info
/// tracker, and the error sink every rule reports into.
pub struct ValidationContext<'a> {
    pub(crate) document: &'a ast::Document,
    errors: Vec<GraphQLError>,
    fragments: HashMap<&'a str, &'a ast::FragmentDefinition>,
    pub(crate) schema: &'a Schema,
    pub(crate) type_info: TypeInfo,
    pub(crate) variables: &'a IndexMap<String, HostValue>,
}
impl<'a> ValidationContext<'a> {
    pub(crate) fn new(
        schema: &'a Schema,
        document: &'a ast::Document,
        variables: &'a IndexMap<String, HostValue>,
    ) -> Self {
        let mut fragments = HashMap::new();
        for def in &document.definitions {
            if let ast::Definition::Fragment(frag_def) = def {
                // First definition wins; duplicate names are themselves a
                // rule violation.
                fragments
                    .entry(frag_def.name.as_str())
                    .or_insert(frag_def);
            }
        }
        Self {
            document,
            errors: vec![],
            fragments,
            schema,
            type_info: TypeInfo::new(),
            variables,
        }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn document(&self) -> &'a ast::Document {
        self.document
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    pub fn variables(&self) -> &'a IndexMap<String, HostValue> {
        self.variables
    }

    pub fn fragment(&self, name: &str) -> Option<&'a ast::FragmentDefinition> {
        self.fragments.get(name).copied()
    }

    pub fn fragment_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fragments.keys().copied()
    }

    pub fn report_error(&mut self, error: GraphQLError) {
        self.errors.push(error);
    }

    pub(crate) fn into_errors(self) -> Vec<GraphQLError> {
        self.errors
    }
}
