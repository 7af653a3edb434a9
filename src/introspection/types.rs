use crate::execution::ResolverParams;
use crate::host_value::HostValue;
use crate::schema::Schema;
use crate::types::Argument;
use crate::types::EnumType;
use crate::types::EnumVariant;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::ObjectType;
use crate::types::ResolverOutcome;
use crate::types::TypeAnnotation;
use crate::value::Value;

/// A type reference carried through introspection resolution as an opaque
/// source value. Wrapping mirrors the annotation structure so `kind` and
/// `ofType` can walk it.
#[derive(Clone, Debug)]
pub(crate) enum TypeHandle {
    Named(String),
    List(Box<TypeHandle>),
    NonNull(Box<TypeHandle>),
}
impl TypeHandle {
    pub(crate) fn from_annotation(annotation: &TypeAnnotation) -> Self {
        let inner = match annotation {
            TypeAnnotation::List { inner, .. } => {
                TypeHandle::List(Box::new(Self::from_annotation(inner)))
            }
            TypeAnnotation::Named { type_ref, .. } => {
                TypeHandle::Named(type_ref.name().to_string())
            }
        };
        if annotation.nullable() {
            inner
        } else {
            TypeHandle::NonNull(Box::new(inner))
        }
    }

    fn to_host_value(&self) -> HostValue {
        HostValue::opaque(self.clone())
    }
}

/// Fully materialized snapshots of schema members, carried as opaque source
/// values so the introspection resolvers never need to re-borrow the
/// schema's internals.
#[derive(Clone, Debug)]
pub(crate) struct FieldSnapshot {
    name: String,
    description: Option<String>,
    deprecation_reason: Option<String>,
    args: Vec<InputValueSnapshot>,
    type_handle: TypeHandle,
    is_deprecated: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct InputValueSnapshot {
    name: String,
    description: Option<String>,
    type_handle: TypeHandle,
    default_value: Option<String>,
}
impl InputValueSnapshot {
    fn from_argument(argument: &Argument) -> Self {
        Self {
            name: argument.name().to_string(),
            description: argument.description().map(str::to_string),
            type_handle: TypeHandle::from_annotation(argument.type_annotation()),
            default_value: argument.default_value().map(Value::to_string),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct EnumValueSnapshot {
    name: String,
    description: Option<String>,
    deprecation_reason: Option<String>,
    is_deprecated: bool,
}
impl EnumValueSnapshot {
    fn from_variant(variant: &EnumVariant) -> Self {
        Self {
            name: variant.name().to_string(),
            description: variant.description().map(str::to_string),
            deprecation_reason: variant.deprecation_reason().map(str::to_string),
            is_deprecated: variant.is_deprecated(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct DirectiveSnapshot {
    name: String,
    description: Option<String>,
    locations: Vec<&'static str>,
    args: Vec<InputValueSnapshot>,
    repeatable: bool,
}

/// Marker source for `__Schema` fields; the resolvers read the schema from
/// their resolve info.
#[derive(Clone, Debug)]
pub(crate) struct SchemaHandle;

fn field_snapshot(field: &Field) -> FieldSnapshot {
    FieldSnapshot {
        name: field.name().to_string(),
        description: field.description().map(str::to_string),
        deprecation_reason: field.deprecation_reason().map(str::to_string),
        args: field
            .arguments()
            .values()
            .map(InputValueSnapshot::from_argument)
            .collect(),
        type_handle: TypeHandle::from_annotation(field.type_annotation()),
        is_deprecated: field.is_deprecated(),
    }
}

fn directive_snapshot(directive: &crate::types::Directive) -> DirectiveSnapshot {
    DirectiveSnapshot {
        name: directive.name().to_string(),
        description: directive.description().map(str::to_string),
        locations: directive
            .locations()
            .iter()
            .map(|location| location.name())
            .collect(),
        args: directive
            .arguments()
            .values()
            .map(InputValueSnapshot::from_argument)
            .collect(),
        repeatable: directive.is_repeatable(),
    }
}

fn opaque_list<T: Clone + std::fmt::Debug + Send + Sync + 'static>(
    items: impl IntoIterator<Item = T>,
) -> HostValue {
    HostValue::List(items.into_iter().map(HostValue::opaque).collect())
}

fn optional_str(value: Option<&str>) -> HostValue {
    match value {
        Some(value) => HostValue::Str(value.to_string()),
        None => HostValue::Null,
    }
}

/// Named types of a schema in deterministic (name-sorted) order.
fn sorted_types(schema: &Schema) -> Vec<String> {
    let mut names: Vec<String> = schema.types().keys().cloned().collect();
    names.sort();
    names
}

fn include_deprecated(params: &ResolverParams<'_>) -> bool {
    matches!(params.args.get("includeDeprecated"), Some(HostValue::Bool(true)))
}

/// The `__typename` meta field, available on every composite type.
pub(crate) fn typename_meta_field() -> Field {
    Field::builder("__typename", TypeAnnotation::non_null_named("String"))
        .resolver(|params: ResolverParams<'_>| {
            ResolverOutcome::ok(params.info.parent_type.name())
        })
        .finish()
}

/// The `__schema` meta field, available on the query root only.
pub(crate) fn schema_meta_field() -> Field {
    Field::builder("__schema", TypeAnnotation::non_null_named("__Schema"))
        .description("Access the current type schema of this server.")
        .resolver(|_params: ResolverParams<'_>| ResolverOutcome::ok(HostValue::opaque(SchemaHandle)))
        .finish()
}

/// The `__type` meta field, available on the query root only.
pub(crate) fn type_meta_field() -> Field {
    Field::builder("__type", TypeAnnotation::named("__Type"))
        .description("Request the type information of a single type.")
        .argument(Argument::new("name", TypeAnnotation::non_null_named("String")))
        .resolver(|params: ResolverParams<'_>| {
            let name = match params.args.get("name") {
                Some(HostValue::Str(name)) => name.clone(),
                _ => return ResolverOutcome::ok(HostValue::Null),
            };
            if params.info.schema.has_type(&name) {
                ResolverOutcome::ok(TypeHandle::Named(name).to_host_value())
            } else {
                ResolverOutcome::ok(HostValue::Null)
            }
        })
        .finish()
}

/// The introspection type definitions registered in every schema's type
/// map.
pub(crate) fn introspection_types() -> Vec<GraphQLType> {
    vec![
        schema_type().into(),
        type_type().into(),
        field_type().into(),
        input_value_type().into(),
        enum_value_type().into(),
        directive_type().into(),
        type_kind_enum().into(),
        directive_location_enum().into(),
    ]
}

fn schema_type() -> ObjectType {
    ObjectType::builder("__Schema")
        .description(
            "A GraphQL Schema defines the capabilities of a GraphQL server. It \
            exposes all available types and directives on the server, as well as \
            the entry points for query, mutation, and subscription operations.",
        )
        .field(Field::builder("description", TypeAnnotation::named("String")).resolver(
            |_params| ResolverOutcome::ok(HostValue::Null),
        ))
        .field(
            Field::builder(
                "types",
                TypeAnnotation::list(TypeAnnotation::non_null_named("__Type")).non_null(),
            )
            .description("A list of all types supported by this server.")
            .resolver(|params: ResolverParams<'_>| {
                let handles = sorted_types(params.info.schema)
                    .into_iter()
                    .map(TypeHandle::Named);
                ResolverOutcome::ok(opaque_list(handles))
            }),
        )
        .field(
            Field::builder("queryType", TypeAnnotation::non_null_named("__Type"))
                .description("The type that query operations will be rooted at.")
                .resolver(|params: ResolverParams<'_>| {
                    let name = params.info.schema.query_type().name().to_string();
                    ResolverOutcome::ok(TypeHandle::Named(name).to_host_value())
                }),
        )
        .field(
            Field::builder("mutationType", TypeAnnotation::named("__Type"))
                .description(
                    "If this server supports mutation, the type that mutation \
                    operations will be rooted at.",
                )
                .resolver(|params: ResolverParams<'_>| {
                    ResolverOutcome::ok(match params.info.schema.mutation_type() {
                        Some(mutation_type) => {
                            TypeHandle::Named(mutation_type.name().to_string())
                                .to_host_value()
                        }
                        None => HostValue::Null,
                    })
                }),
        )
        .field(
            Field::builder("subscriptionType", TypeAnnotation::named("__Type"))
                .description(
                    "If this server supports subscription, the type that \
                    subscription operations will be rooted at.",
                )
                .resolver(|params: ResolverParams<'_>| {
                    ResolverOutcome::ok(match params.info.schema.subscription_type() {
                        Some(subscription_type) => {
                            TypeHandle::Named(subscription_type.name().to_string())
                                .to_host_value()
                        }
                        None => HostValue::Null,
                    })
                }),
        )
        .field(
            Field::builder(
                "directives",
                TypeAnnotation::list(TypeAnnotation::non_null_named("__Directive"))
                    .non_null(),
            )
            .description("A list of all directives supported by this server.")
            .resolver(|params: ResolverParams<'_>| {
                let mut directives: Vec<_> =
                    params.info.schema.directives().values().collect();
                directives.sort_by(|a, b| a.name().cmp(b.name()));
                ResolverOutcome::ok(opaque_list(
                    directives
                        .into_iter()
                        .map(|directive| directive_snapshot(directive)),
                ))
            }),
        )
        .build_builtin()
}

fn type_type() -> ObjectType {
    ObjectType::builder("__Type")
        .description(
            "The fundamental unit of any GraphQL Schema is the type. There are \
            many kinds of types in GraphQL as represented by the `__TypeKind` \
            enum.",
        )
        .field(
            Field::builder("kind", TypeAnnotation::non_null_named("__TypeKind")).resolver(
                |params: ResolverParams<'_>| {
                    let Some(handle) = params.source.downcast_opaque::<TypeHandle>() else {
                        return ResolverOutcome::err("__Type resolved on a non-type source");
                    };
                    let kind = match handle {
                        TypeHandle::List(_) => "LIST",
                        TypeHandle::NonNull(_) => "NON_NULL",
                        TypeHandle::Named(name) => {
                            match params.info.schema.type_named(name) {
                                Some(named_type) => named_type.kind_name(),
                                None => {
                                    return ResolverOutcome::err(format!(
                                        "unknown type \"{name}\" in introspection",
                                    ));
                                }
                            }
                        }
                    };
                    ResolverOutcome::ok(HostValue::Enum(kind.to_string()))
                },
            ),
        )
        .field(
            Field::builder("name", TypeAnnotation::named("String")).resolver(
                |params: ResolverParams<'_>| {
                    ResolverOutcome::ok(match params.source.downcast_opaque::<TypeHandle>() {
                        Some(TypeHandle::Named(name)) => HostValue::Str(name.clone()),
                        _ => HostValue::Null,
                    })
                },
            ),
        )
        .field(
            Field::builder("description", TypeAnnotation::named("String")).resolver(
                |params: ResolverParams<'_>| {
                    ResolverOutcome::ok(match params.source.downcast_opaque::<TypeHandle>() {
                        Some(TypeHandle::Named(name)) => params
                            .info
                            .schema
                            .type_named(name)
                            .map(|named_type| {
                                optional_str(named_type.description())
                            })
                            .unwrap_or(HostValue::Null),
                        _ => HostValue::Null,
                    })
                },
            ),
        )
        .field(
            Field::builder("specifiedByURL", TypeAnnotation::named("String")).resolver(
                |params: ResolverParams<'_>| {
                    ResolverOutcome::ok(match params.source.downcast_opaque::<TypeHandle>() {
                        Some(TypeHandle::Named(name)) => params
                            .info
                            .schema
                            .type_named(name)
                            .and_then(|named_type| {
                                named_type.as_scalar().map(|scalar_type| {
                                    optional_str(scalar_type.specified_by_url())
                                })
                            })
                            .unwrap_or(HostValue::Null),
                        _ => HostValue::Null,
                    })
                },
            ),
        )
        .field(
            Field::builder(
                "fields",
                TypeAnnotation::list(TypeAnnotation::non_null_named("__Field")),
            )
            .argument(
                Argument::new("includeDeprecated", TypeAnnotation::named("Boolean"))
                    .with_default(Value::Bool(false)),
            )
            .resolver(|params: ResolverParams<'_>| {
                let Some(TypeHandle::Named(name)) =
                    params.source.downcast_opaque::<TypeHandle>()
                else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let Some(named_type) = params.info.schema.type_named(name) else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let Some(fields) = named_type.fields() else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let include_deprecated = include_deprecated(&params);
                ResolverOutcome::ok(opaque_list(
                    fields
                        .values()
                        .filter(|field| include_deprecated || !field.is_deprecated())
                        .map(field_snapshot),
                ))
            }),
        )
        .field(
            Field::builder(
                "interfaces",
                TypeAnnotation::list(TypeAnnotation::non_null_named("__Type")),
            )
            .resolver(|params: ResolverParams<'_>| {
                let Some(TypeHandle::Named(name)) =
                    params.source.downcast_opaque::<TypeHandle>()
                else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let Some(named_type) = params.info.schema.type_named(name) else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let interfaces = match named_type.as_ref() {
                    GraphQLType::Object(object_type) => object_type.interfaces(),
                    GraphQLType::Interface(interface_type) => interface_type.interfaces(),
                    _ => return ResolverOutcome::ok(HostValue::Null),
                };
                ResolverOutcome::ok(opaque_list(
                    interfaces
                        .iter()
                        .map(|interface_ref| {
                            TypeHandle::Named(interface_ref.name().to_string())
                        }),
                ))
            }),
        )
        .field(
            Field::builder(
                "possibleTypes",
                TypeAnnotation::list(TypeAnnotation::non_null_named("__Type")),
            )
            .resolver(|params: ResolverParams<'_>| {
                let Some(TypeHandle::Named(name)) =
                    params.source.downcast_opaque::<TypeHandle>()
                else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let Some(named_type) = params.info.schema.type_named(name) else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                if !named_type.is_abstract() {
                    return ResolverOutcome::ok(HostValue::Null);
                }
                ResolverOutcome::ok(opaque_list(
                    params
                        .info
                        .schema
                        .possible_types(&named_type)
                        .iter()
                        .map(|possible| TypeHandle::Named(possible.name().to_string())),
                ))
            }),
        )
        .field(
            Field::builder(
                "enumValues",
                TypeAnnotation::list(TypeAnnotation::non_null_named("__EnumValue")),
            )
            .argument(
                Argument::new("includeDeprecated", TypeAnnotation::named("Boolean"))
                    .with_default(Value::Bool(false)),
            )
            .resolver(|params: ResolverParams<'_>| {
                let Some(TypeHandle::Named(name)) =
                    params.source.downcast_opaque::<TypeHandle>()
                else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let Some(named_type) = params.info.schema.type_named(name) else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let Some(enum_type) = named_type.as_enum() else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let include_deprecated = include_deprecated(&params);
                ResolverOutcome::ok(opaque_list(
                    enum_type
                        .variants()
                        .values()
                        .filter(|variant| include_deprecated || !variant.is_deprecated())
                        .map(EnumValueSnapshot::from_variant),
                ))
            }),
        )
        .field(
            Field::builder(
                "inputFields",
                TypeAnnotation::list(TypeAnnotation::non_null_named("__InputValue")),
            )
            .resolver(|params: ResolverParams<'_>| {
                let Some(TypeHandle::Named(name)) =
                    params.source.downcast_opaque::<TypeHandle>()
                else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let Some(named_type) = params.info.schema.type_named(name) else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                let Some(input_object_type) = named_type.as_input_object() else {
                    return ResolverOutcome::ok(HostValue::Null);
                };
                ResolverOutcome::ok(opaque_list(
                    input_object_type.fields().values().map(|input_field| {
                        InputValueSnapshot {
                            name: input_field.name().to_string(),
                            description: input_field.description().map(str::to_string),
                            type_handle: TypeHandle::from_annotation(
                                input_field.type_annotation(),
                            ),
                            default_value: input_field
                                .default_value()
                                .map(Value::to_string),
                        }
                    }),
                ))
            }),
        )
        .field(
            Field::builder("ofType", TypeAnnotation::named("__Type")).resolver(
                |params: ResolverParams<'_>| {
                    ResolverOutcome::ok(match params.source.downcast_opaque::<TypeHandle>() {
                        Some(TypeHandle::List(inner)) | Some(TypeHandle::NonNull(inner)) => {
                            inner.to_host_value()
                        }
                        _ => HostValue::Null,
                    })
                },
            ),
        )
        .build_builtin()
}

fn field_type() -> ObjectType {
    ObjectType::builder("__Field")
        .description(
            "Object and Interface types are described by a list of Fields, each \
            of which has a name, potentially a list of arguments, and a return \
            type.",
        )
        .field(
            Field::builder("name", TypeAnnotation::non_null_named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_field(params, |snapshot| {
                        HostValue::Str(snapshot.name.clone())
                    })
                },
            ),
        )
        .field(
            Field::builder("description", TypeAnnotation::named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_field(params, |snapshot| {
                        optional_str(snapshot.description.as_deref())
                    })
                },
            ),
        )
        .field(
            Field::builder(
                "args",
                TypeAnnotation::list(TypeAnnotation::non_null_named("__InputValue"))
                    .non_null(),
            )
            .resolver(|params: ResolverParams<'_>| {
                snapshot_field(params, |snapshot| {
                    opaque_list(snapshot.args.iter().cloned())
                })
            }),
        )
        .field(
            Field::builder("type", TypeAnnotation::non_null_named("__Type")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_field(params, |snapshot| snapshot.type_handle.to_host_value())
                },
            ),
        )
        .field(
            Field::builder("isDeprecated", TypeAnnotation::non_null_named("Boolean"))
                .resolver(|params: ResolverParams<'_>| {
                    snapshot_field(params, |snapshot| {
                        HostValue::Bool(snapshot.is_deprecated)
                    })
                }),
        )
        .field(
            Field::builder("deprecationReason", TypeAnnotation::named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_field(params, |snapshot| {
                        optional_str(snapshot.deprecation_reason.as_deref())
                    })
                },
            ),
        )
        .build_builtin()
}

fn snapshot_field(
    params: ResolverParams<'_>,
    read: impl Fn(&FieldSnapshot) -> HostValue,
) -> ResolverOutcome {
    match params.source.downcast_opaque::<FieldSnapshot>() {
        Some(snapshot) => ResolverOutcome::ok(read(snapshot)),
        None => ResolverOutcome::err("__Field resolved on a non-field source"),
    }
}

fn input_value_type() -> ObjectType {
    ObjectType::builder("__InputValue")
        .description(
            "Arguments provided to Fields or Directives and the input fields of \
            an InputObject are represented as Input Values which describe their \
            type and optionally a default value.",
        )
        .field(
            Field::builder("name", TypeAnnotation::non_null_named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_input_value(params, |snapshot| {
                        HostValue::Str(snapshot.name.clone())
                    })
                },
            ),
        )
        .field(
            Field::builder("description", TypeAnnotation::named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_input_value(params, |snapshot| {
                        optional_str(snapshot.description.as_deref())
                    })
                },
            ),
        )
        .field(
            Field::builder("type", TypeAnnotation::non_null_named("__Type")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_input_value(params, |snapshot| {
                        snapshot.type_handle.to_host_value()
                    })
                },
            ),
        )
        .field(
            Field::builder("defaultValue", TypeAnnotation::named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_input_value(params, |snapshot| {
                        optional_str(snapshot.default_value.as_deref())
                    })
                },
            ),
        )
        .build_builtin()
}

fn snapshot_input_value(
    params: ResolverParams<'_>,
    read: impl Fn(&InputValueSnapshot) -> HostValue,
) -> ResolverOutcome {
    match params.source.downcast_opaque::<InputValueSnapshot>() {
        Some(snapshot) => ResolverOutcome::ok(read(snapshot)),
        None => ResolverOutcome::err("__InputValue resolved on a non-input-value source"),
    }
}

fn enum_value_type() -> ObjectType {
    ObjectType::builder("__EnumValue")
        .description(
            "One possible value for a given Enum. Enum values are unique values, \
            not a placeholder for a string or numeric value.",
        )
        .field(
            Field::builder("name", TypeAnnotation::non_null_named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_enum_value(params, |snapshot| {
                        HostValue::Str(snapshot.name.clone())
                    })
                },
            ),
        )
        .field(
            Field::builder("description", TypeAnnotation::named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_enum_value(params, |snapshot| {
                        optional_str(snapshot.description.as_deref())
                    })
                },
            ),
        )
        .field(
            Field::builder("isDeprecated", TypeAnnotation::non_null_named("Boolean"))
                .resolver(|params: ResolverParams<'_>| {
                    snapshot_enum_value(params, |snapshot| {
                        HostValue::Bool(snapshot.is_deprecated)
                    })
                }),
        )
        .field(
            Field::builder("deprecationReason", TypeAnnotation::named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_enum_value(params, |snapshot| {
                        optional_str(snapshot.deprecation_reason.as_deref())
                    })
                },
            ),
        )
        .build_builtin()
}

fn snapshot_enum_value(
    params: ResolverParams<'_>,
    read: impl Fn(&EnumValueSnapshot) -> HostValue,
) -> ResolverOutcome {
    match params.source.downcast_opaque::<EnumValueSnapshot>() {
        Some(snapshot) => ResolverOutcome::ok(read(snapshot)),
        None => ResolverOutcome::err("__EnumValue resolved on a non-enum-value source"),
    }
}

fn directive_type() -> ObjectType {
    ObjectType::builder("__Directive")
        .description(
            "A Directive provides a way to describe alternate runtime execution \
            and type validation behavior in a GraphQL document.",
        )
        .field(
            Field::builder("name", TypeAnnotation::non_null_named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_directive(params, |snapshot| {
                        HostValue::Str(snapshot.name.clone())
                    })
                },
            ),
        )
        .field(
            Field::builder("description", TypeAnnotation::named("String")).resolver(
                |params: ResolverParams<'_>| {
                    snapshot_directive(params, |snapshot| {
                        optional_str(snapshot.description.as_deref())
                    })
                },
            ),
        )
        .field(
            Field::builder(
                "locations",
                TypeAnnotation::list(TypeAnnotation::non_null_named(
                    "__DirectiveLocation",
                ))
                .non_null(),
            )
            .resolver(|params: ResolverParams<'_>| {
                snapshot_directive(params, |snapshot| {
                    HostValue::List(
                        snapshot
                            .locations
                            .iter()
                            .map(|location| HostValue::Enum(location.to_string()))
                            .collect(),
                    )
                })
            }),
        )
        .field(
            Field::builder(
                "args",
                TypeAnnotation::list(TypeAnnotation::non_null_named("__InputValue"))
                    .non_null(),
            )
            .resolver(|params: ResolverParams<'_>| {
                snapshot_directive(params, |snapshot| {
                    opaque_list(snapshot.args.iter().cloned())
                })
            }),
        )
        .field(
            Field::builder("isRepeatable", TypeAnnotation::non_null_named("Boolean"))
                .resolver(|params: ResolverParams<'_>| {
                    snapshot_directive(params, |snapshot| {
                        HostValue::Bool(snapshot.repeatable)
                    })
                }),
        )
        .build_builtin()
}

fn snapshot_directive(
    params: ResolverParams<'_>,
    read: impl Fn(&DirectiveSnapshot) -> HostValue,
) -> ResolverOutcome {
    match params.source.downcast_opaque::<DirectiveSnapshot>() {
        Some(snapshot) => ResolverOutcome::ok(read(snapshot)),
        None => ResolverOutcome::err("__Directive resolved on a non-directive source"),
    }
}

fn type_kind_enum() -> EnumType {
    let mut builder = EnumType::builder("__TypeKind").description(
        "An enum describing what kind of type a given `__Type` is.",
    );
    for kind in [
        "SCALAR",
        "OBJECT",
        "INTERFACE",
        "UNION",
        "ENUM",
        "INPUT_OBJECT",
        "LIST",
        "NON_NULL",
    ] {
        builder = builder.value(kind);
    }
    builder.build_builtin()
}

fn directive_location_enum() -> EnumType {
    let mut builder = EnumType::builder("__DirectiveLocation").description(
        "A Directive can be adjacent to many parts of the GraphQL language, a \
        __DirectiveLocation describes one such possible adjacencies.",
    );
    for location in [
        "QUERY",
        "MUTATION",
        "SUBSCRIPTION",
        "FIELD",
        "FRAGMENT_DEFINITION",
        "FRAGMENT_SPREAD",
        "INLINE_FRAGMENT",
        "SCHEMA",
        "SCALAR",
        "OBJECT",
        "FIELD_DEFINITION",
        "ARGUMENT_DEFINITION",
        "INTERFACE",
        "UNION",
        "ENUM",
        "ENUM_VALUE",
        "INPUT_OBJECT",
        "INPUT_FIELD_DEFINITION",
    ] {
        builder = builder.value(location);
    }
    builder.build_builtin()
}
