use crate::error::PathSegment;
use std::rc::Rc;

/// The structured trail of response keys and list indices from the root of
/// the response to the value currently being completed.
///
/// A cons-list of `(prev, key)` shared by reference: extending is O(1) and
/// never touches the parent, which matters because sibling fields extend the
/// same parent path concurrently through deferred continuations.
#[derive(Clone, Default)]
pub struct ResponsePath(Option<Rc<PathNode>>);

struct PathNode {
    prev: ResponsePath,
    key: PathSegment,
}

impl ResponsePath {
    pub fn root() -> Self {
        ResponsePath(None)
    }

    pub fn field(&self, name: impl Into<String>) -> Self {
        self.extend(PathSegment::Field(name.into()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.extend(PathSegment::Index(index))
    }

    fn extend(&self, key: PathSegment) -> Self {
        ResponsePath(Some(Rc::new(PathNode {
            prev: self.clone(),
            key,
        })))
    }

    /// Materialize the root-to-here segments.
    pub fn to_vec(&self) -> Vec<PathSegment> {
        let mut segments = vec![];
        let mut current = &self.0;
        while let Some(node) = current {
            segments.push(node.key.clone());
            current = &node.prev.0;
        }
        segments.reverse();
        segments
    }
}
impl std::fmt::Debug for ResponsePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_share_parents() {
        let root = ResponsePath::root();
        let items = root.field("items");
        let first = items.index(0);
        let second = items.index(1);

        assert_eq!(
            first.to_vec(),
            vec![
                PathSegment::Field("items".to_string()),
                PathSegment::Index(0),
            ],
        );
        assert_eq!(
            second.to_vec(),
            vec![
                PathSegment::Field("items".to_string()),
                PathSegment::Index(1),
            ],
        );
        assert!(root.to_vec().is_empty());
    }
}
