use crate::schema::Schema;
use crate::types::Argument;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputField;
use std::fmt::Write;

/// Emit the schema-language representation of a schema.
///
/// Output is deterministic: types print sorted by name, fields and values in
/// declaration order. Built-in scalars, built-in directives, and the
/// introspection types are omitted, matching what a host would have written
/// by hand.
pub fn print_schema(schema: &Schema) -> String {
    let mut out = String::new();

    if let Some(root_block) = print_root_block(schema) {
        out.push_str(&root_block);
        out.push_str("\n\n");
    }

    let mut blocks: Vec<String> = vec![];

    let mut directive_names: Vec<&String> = schema.directives().keys().collect();
    directive_names.sort();
    for name in directive_names {
        let directive = &schema.directives()[name];
        if directive.is_builtin() {
            continue;
        }
        blocks.push(print_directive(directive));
    }

    let mut type_names: Vec<&String> = schema.types().keys().collect();
    type_names.sort();
    for name in type_names {
        let graphql_type = &schema.types()[name];
        if graphql_type.is_builtin() || graphql_type.is_introspection() {
            continue;
        }
        blocks.push(print_type(graphql_type));
    }

    out.push_str(&blocks.join("\n\n"));
    out.push('\n');
    out
}

/// The `schema { ... }` block, printed only when a root type deviates from
/// its conventional name.
fn print_root_block(schema: &Schema) -> Option<String> {
    let query_name = schema.query_type().name().to_string();
    let mutation_name = schema.mutation_type().map(|t| t.name().to_string());
    let subscription_name = schema.subscription_type().map(|t| t.name().to_string());

    let conventional = query_name == "Query"
        && mutation_name.as_deref().map_or(true, |name| name == "Mutation")
        && subscription_name
            .as_deref()
            .map_or(true, |name| name == "Subscription");
    if conventional {
        return None;
    }

    let mut block = String::from("schema {\n");
    let _ = writeln!(block, "  query: {query_name}");
    if let Some(mutation_name) = mutation_name {
        let _ = writeln!(block, "  mutation: {mutation_name}");
    }
    if let Some(subscription_name) = subscription_name {
        let _ = writeln!(block, "  subscription: {subscription_name}");
    }
    block.push('}');
    Some(block)
}

fn print_description(description: Option<&str>, indent: &str) -> String {
    match description {
        Some(description) => {
            format!("{indent}\"\"\"\n{indent}{description}\n{indent}\"\"\"\n")
        }
        None => String::new(),
    }
}

fn print_type(graphql_type: &GraphQLType) -> String {
    match graphql_type {
        GraphQLType::Scalar(scalar_type) => {
            let specified_by = scalar_type
                .specified_by_url()
                .map(|url| format!(" @specifiedBy(url: \"{url}\")"))
                .unwrap_or_default();
            format!(
                "{}scalar {}{specified_by}",
                print_description(scalar_type.description(), ""),
                scalar_type.name(),
            )
        }

        GraphQLType::Enum(enum_type) => {
            let mut block = format!(
                "{}enum {} {{\n",
                print_description(enum_type.description(), ""),
                enum_type.name(),
            );
            for variant in enum_type.variants().values() {
                block.push_str(&print_description(variant.description(), "  "));
                let deprecated = variant
                    .deprecation_reason()
                    .map(|reason| format!(" @deprecated(reason: \"{reason}\")"))
                    .unwrap_or_default();
                let _ = writeln!(block, "  {}{deprecated}", variant.name());
            }
            block.push('}');
            block
        }

        GraphQLType::Object(object_type) => {
            let implements = print_implements(
                object_type
                    .interfaces()
                    .iter()
                    .map(|interface_ref| interface_ref.name()),
            );
            let mut block = format!(
                "{}type {}{implements} {{\n",
                print_description(object_type.description(), ""),
                object_type.name(),
            );
            for field in object_type.fields().values() {
                block.push_str(&print_field(field));
            }
            block.push('}');
            block
        }

        GraphQLType::Interface(interface_type) => {
            let implements = print_implements(
                interface_type
                    .interfaces()
                    .iter()
                    .map(|interface_ref| interface_ref.name()),
            );
            let mut block = format!(
                "{}interface {}{implements} {{\n",
                print_description(interface_type.description(), ""),
                interface_type.name(),
            );
            for field in interface_type.fields().values() {
                block.push_str(&print_field(field));
            }
            block.push('}');
            block
        }

        GraphQLType::Union(union_type) => {
            let members: Vec<&str> = union_type
                .members()
                .iter()
                .map(|member_ref| member_ref.name())
                .collect();
            format!(
                "{}union {} = {}",
                print_description(union_type.description(), ""),
                union_type.name(),
                members.join(" | "),
            )
        }

        GraphQLType::InputObject(input_object_type) => {
            let mut block = format!(
                "{}input {} {{\n",
                print_description(input_object_type.description(), ""),
                input_object_type.name(),
            );
            for input_field in input_object_type.fields().values() {
                block.push_str(&print_input_field(input_field));
            }
            block.push('}');
            block
        }
    }
}

fn print_implements<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        String::new()
    } else {
        format!(" implements {}", names.join(" & "))
    }
}

fn print_field(field: &Field) -> String {
    let mut line = print_description(field.description(), "  ");
    let args = print_arguments(field.arguments().values());
    let deprecated = field
        .deprecation_reason()
        .map(|reason| format!(" @deprecated(reason: \"{reason}\")"))
        .unwrap_or_default();
    let _ = writeln!(
        line,
        "  {}{args}: {}{deprecated}",
        field.name(),
        field.type_annotation(),
    );
    line
}

fn print_arguments<'a>(arguments: impl Iterator<Item = &'a Argument>) -> String {
    let rendered: Vec<String> = arguments
        .map(|argument| {
            let default = argument
                .default_value()
                .map(|default| format!(" = {default}"))
                .unwrap_or_default();
            format!("{}: {}{default}", argument.name(), argument.type_annotation())
        })
        .collect();
    if rendered.is_empty() {
        String::new()
    } else {
        format!("({})", rendered.join(", "))
    }
}

fn print_input_field(input_field: &InputField) -> String {
    let mut line = print_description(input_field.description(), "  ");
    let default = input_field
        .default_value()
        .map(|default| format!(" = {default}"))
        .unwrap_or_default();
    let _ = writeln!(
        line,
        "  {}: {}{default}",
        input_field.name(),
        input_field.type_annotation(),
    );
    line
}

fn print_directive(directive: &crate::types::Directive) -> String {
    let args = print_arguments(directive.arguments().values());
    let repeatable = if directive.is_repeatable() {
        " repeatable"
    } else {
        ""
    };
    let locations: Vec<&str> = directive
        .locations()
        .iter()
        .map(|location| location.name())
        .collect();
    format!(
        "{}directive @{}{args}{repeatable} on {}",
        print_description(directive.description(), ""),
        directive.name(),
        locations.join(" | "),
    )
}
