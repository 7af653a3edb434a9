use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;

/// Whether `maybe_subtype` is equal to, or a covariant subtype of,
/// `supertype`.
///
/// Non-null is a subtype of its nullable form, lists compare on their inner
/// annotations, and an object type is a subtype of any abstract type it
/// belongs to.
pub fn is_sub_type_of(
    schema: &Schema,
    maybe_subtype: &TypeAnnotation,
    supertype: &TypeAnnotation,
) -> bool {
    // A non-null location accepts only non-null; a nullable location accepts
    // either nullability.
    if !supertype.nullable() {
        return !maybe_subtype.nullable()
            && is_sub_type_of(
                schema,
                &maybe_subtype.nullable_clone(),
                &supertype.nullable_clone(),
            );
    }
    if !maybe_subtype.nullable() {
        return is_sub_type_of(schema, &maybe_subtype.nullable_clone(), supertype);
    }

    match (maybe_subtype, supertype) {
        (
            TypeAnnotation::List { inner: sub_inner, .. },
            TypeAnnotation::List { inner: super_inner, .. },
        ) => is_sub_type_of(schema, sub_inner, super_inner),

        (TypeAnnotation::List { .. }, TypeAnnotation::Named { .. })
        | (TypeAnnotation::Named { .. }, TypeAnnotation::List { .. }) => false,

        (
            TypeAnnotation::Named { type_ref: sub_ref, .. },
            TypeAnnotation::Named { type_ref: super_ref, .. },
        ) => {
            if sub_ref.name() == super_ref.name() {
                return true;
            }
            let Ok(super_type) = super_ref.try_deref(schema) else {
                return false;
            };
            super_type.is_abstract() && schema.is_possible_type(&super_type, sub_ref.name())
        }
    }
}

/// Whether two composite types can both apply to at least one runtime
/// object; fragments are only spreadable where this holds.
pub fn do_types_overlap(schema: &Schema, a: &GraphQLType, b: &GraphQLType) -> bool {
    if a.name() == b.name() {
        return true;
    }

    if a.is_abstract() {
        if b.is_abstract() {
            return schema
                .possible_types(a)
                .iter()
                .any(|possible| schema.is_possible_type(b, possible.name()));
        }
        return schema.is_possible_type(a, b.name());
    }

    if b.is_abstract() {
        return schema.is_possible_type(b, a.name());
    }

    false
}
