/// Common surface for the programmatic type builders.
///
/// Builders that can fail (duplicate member names) set `Output` to a
/// `Result`; infallible ones return the type directly. Implementations use
/// `#[inherent]` so callers never need the trait in scope.
pub trait TypeBuilder {
    type Output;

    fn build(self) -> Self::Output;
}
