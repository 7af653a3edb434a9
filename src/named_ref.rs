use std::marker::PhantomData;
use std::sync::Arc;

/// Represents a reference to something by name.
///
/// For example, each field defined on an
/// [ObjectType](crate::types::ObjectType) specifies a named reference to some
/// well-defined [GraphQLType](crate::types::GraphQLType) to indicate the type
/// for that field.
///
/// Name-based references are what allow mutually recursive type definitions:
/// a type can be referenced before it has been registered, and the reference
/// is only resolved against the owning [Schema](crate::schema::Schema) on
/// first access.
pub struct NamedRef<TSource, TResource: DerefByName<Source = TSource>> {
    name: String,
    phantom: PhantomData<TResource>,
}
// Derives would demand `TSource: Clone`, but a reference is just a name; it
// clones regardless of what it resolves through.
impl<TSource, TResource: DerefByName<Source = TSource>> Clone for NamedRef<TSource, TResource> {
    fn clone(&self) -> Self {
        NamedRef {
            name: self.name.clone(),
            phantom: PhantomData,
        }
    }
}
impl<TSource, TResource: DerefByName<Source = TSource>> std::fmt::Debug
    for NamedRef<TSource, TResource>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("NamedRef").field(&self.name).finish()
    }
}
impl<TSource, TResource: DerefByName<Source = TSource>> NamedRef<TSource, TResource> {
    pub fn new(name: impl Into<String>) -> NamedRef<TSource, TResource> {
        NamedRef {
            name: name.into(),
            phantom: PhantomData,
        }
    }

    /// The name this reference will be resolved with.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Resolve this reference, panicking on a dangling name.
    ///
    /// Only call this on references that were checked at schema-build time.
    pub fn deref(&self, source: &TSource) -> Arc<TResource> {
        self.try_deref(source)
            .expect("named reference was checked at schema build time")
    }

    pub fn try_deref(&self, source: &TSource) -> Result<Arc<TResource>, DerefByNameError> {
        TResource::deref_name(source, self.name.as_str())
    }
}
impl<TSource, TResource: DerefByName<Source = TSource>> PartialEq
    for NamedRef<TSource, TResource>
{
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Implement this trait for any type that can be referenced by name. This
/// enables usage of [`NamedRef<T>`] for that type.
pub trait DerefByName: std::fmt::Debug {
    type Source;

    fn deref_name(
        source: &Self::Source,
        name: &str,
    ) -> Result<Arc<Self>, DerefByNameError>
    where
        Self: Sized;

    fn named_ref(name: impl Into<String>) -> NamedRef<Self::Source, Self>
    where
        Self: Sized,
    {
        NamedRef::<Self::Source, Self>::new(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DerefByNameError {
    DanglingReference(String),
}
