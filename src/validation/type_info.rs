use crate::schema::Schema;
use crate::types::Argument;
use crate::types::Directive;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use std::sync::Arc;

/// Tracks the type context at the current node while a document is walked:
/// the enclosing composite type, the current field definition and its return
/// type, and the current argument's declared input type.
///
/// The walker pushes and pops entries; rules only read.
#[derive(Default)]
pub struct TypeInfo {
    argument: Option<Argument>,
    directive: Option<Arc<Directive>>,
    field_def_stack: Vec<Option<Field>>,
    input_type_stack: Vec<Option<TypeAnnotation>>,
    output_type_stack: Vec<Option<TypeAnnotation>>,
    parent_type_stack: Vec<Option<Arc<GraphQLType>>>,
}
impl TypeInfo {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The composite type enclosing the current selection set.
    pub fn parent_type(&self) -> Option<&Arc<GraphQLType>> {
        self.parent_type_stack.last().and_then(Option::as_ref)
    }

    /// The composite type one level above [`TypeInfo::parent_type`]. Used at
    /// inline-fragment nodes, where the walker has already pushed the
    /// condition type.
    pub fn grandparent_type(&self) -> Option<&Arc<GraphQLType>> {
        let len = self.parent_type_stack.len();
        if len >= 2 {
            self.parent_type_stack[len - 2].as_ref()
        } else {
            None
        }
    }

    /// The declared return type of the current field.
    pub fn output_type(&self) -> Option<&TypeAnnotation> {
        self.output_type_stack.last().and_then(Option::as_ref)
    }

    /// The declared input type at the current argument position.
    pub fn input_type(&self) -> Option<&TypeAnnotation> {
        self.input_type_stack.last().and_then(Option::as_ref)
    }

    /// The definition of the field currently being visited, if it resolved.
    pub fn field_def(&self) -> Option<&Field> {
        self.field_def_stack.last().and_then(Option::as_ref)
    }

    /// The definition of the argument currently being visited.
    pub fn argument_def(&self) -> Option<&Argument> {
        self.argument.as_ref()
    }

    /// The definition of the directive currently being visited.
    pub fn directive_def(&self) -> Option<&Arc<Directive>> {
        self.directive.as_ref()
    }

    pub(crate) fn push_parent_type(&mut self, parent: Option<Arc<GraphQLType>>) {
        self.parent_type_stack.push(parent);
    }

    pub(crate) fn pop_parent_type(&mut self) {
        self.parent_type_stack.pop();
    }

    pub(crate) fn push_field(&mut self, field_def: Option<Field>) {
        self.output_type_stack
            .push(field_def.as_ref().map(|def| def.type_annotation().clone()));
        self.field_def_stack.push(field_def);
    }

    pub(crate) fn pop_field(&mut self) {
        self.output_type_stack.pop();
        self.field_def_stack.pop();
    }

    pub(crate) fn set_directive(&mut self, directive: Option<Arc<Directive>>) {
        self.directive = directive;
    }

    pub(crate) fn set_argument(&mut self, argument: Option<Argument>) {
        self.input_type_stack
            .push(argument.as_ref().map(|def| def.type_annotation().clone()));
        self.argument = argument;
    }

    pub(crate) fn clear_argument(&mut self) {
        self.input_type_stack.pop();
        self.argument = None;
    }

    /// Look up a field definition on `parent`, including the meta fields:
    /// `__typename` on any composite type, `__schema`/`__type` on the query
    /// root only.
    pub(crate) fn field_def_for(
        schema: &Schema,
        parent: &GraphQLType,
        field_name: &str,
    ) -> Option<Field> {
        if field_name == "__typename" && parent.is_composite() {
            return Some(crate::introspection::typename_meta_field());
        }
        if parent.name() == schema.query_type().name() {
            if field_name == "__schema" {
                return Some(crate::introspection::schema_meta_field());
            }
            if field_name == "__type" {
                return Some(crate::introspection::type_meta_field());
            }
        }
        parent.field(field_name).cloned()
    }
}
