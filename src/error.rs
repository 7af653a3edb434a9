use crate::loc;
use serde::ser::SerializeMap;
use serde::ser::SerializeSeq;
use serde::Serialize;
use serde::Serializer;
use std::sync::Arc;

/// One step of a response path: a response key or a list index.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}
impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSegment::Field(name) => serializer.serialize_str(name),
            PathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

/// An error attached to an execution result.
///
/// `is_client_safe` distinguishes user-actionable errors (validation,
/// coercion, resolver-raised domain errors) from internal ones; serialization
/// replaces the message of a non-client-safe error with a generic one unless
/// the host opts into exposing it.
#[derive(Clone, Debug)]
pub struct GraphQLError {
    message: String,
    locations: Vec<loc::SourcePosition>,
    path: Option<Vec<PathSegment>>,
    is_client_safe: bool,
    cause: Option<Arc<dyn std::error::Error + Send + Sync>>,
}
impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: None,
            is_client_safe: true,
            cause: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            is_client_safe: false,
            ..Self::new(message)
        }
    }

    pub fn at(mut self, position: loc::SourcePosition) -> Self {
        self.locations.push(position);
        self
    }

    pub fn at_all(mut self, positions: impl IntoIterator<Item = loc::SourcePosition>) -> Self {
        self.locations.extend(positions);
        self
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_cause(
        mut self,
        cause: Arc<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn locations(&self) -> &[loc::SourcePosition] {
        &self.locations
    }

    pub fn path(&self) -> Option<&[PathSegment]> {
        self.path.as_deref()
    }

    pub fn is_client_safe(&self) -> bool {
        self.is_client_safe
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync)> {
        self.cause.as_deref()
    }
}
impl PartialEq for GraphQLError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && self.locations == other.locations
            && self.path == other.path
            && self.is_client_safe == other.is_client_safe
    }
}
impl std::fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl std::error::Error for GraphQLError {}

/// An error raised from inside a resolver (or a scalar serialize function)
/// before the executor has attached path/location information.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub message: String,
    pub is_client_safe: bool,
}
impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_client_safe: true,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_client_safe: false,
        }
    }
}
impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::new(message)
    }
}
impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        FieldError::new(message)
    }
}
impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// The message substituted for non-client-safe errors during serialization.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// The complete result of one request.
///
/// JSON shape: `{"data": <value|null>, "errors": [...]}` where `errors` is
/// omitted when empty and `data` is omitted when a pre-execution error (parse,
/// validation, variable coercion) prevented execution from starting.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    data: Option<serde_json::Value>,
    errors: Vec<GraphQLError>,
    extensions: Option<serde_json::Value>,
    /// When false, serialization replaces messages of non-client-safe errors
    /// with [INTERNAL_ERROR_MESSAGE].
    expose_internal_errors: bool,
}
impl Response {
    pub(crate) fn from_data(data: serde_json::Value, errors: Vec<GraphQLError>) -> Self {
        Self {
            data: Some(data),
            errors,
            extensions: None,
            expose_internal_errors: false,
        }
    }

    pub(crate) fn from_errors(errors: Vec<GraphQLError>) -> Self {
        Self {
            data: None,
            errors,
            extensions: None,
            expose_internal_errors: false,
        }
    }

    /// Attach a host-defined `extensions` object to the serialized response.
    pub fn with_extensions(mut self, extensions: serde_json::Value) -> Self {
        self.extensions = Some(extensions);
        self
    }

    pub fn extensions(&self) -> Option<&serde_json::Value> {
        self.extensions.as_ref()
    }

    /// Serialize raw messages for non-client-safe errors instead of the
    /// generic internal-error message.
    pub fn expose_internal_errors(mut self) -> Self {
        self.expose_internal_errors = true;
        self
    }

    /// The `data` portion of the result. `None` means the field is omitted
    /// from the serialized response entirely; that only happens when a
    /// pre-execution error occurred.
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    pub fn errors(&self) -> &[GraphQLError] {
        &self.errors
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).expect("response serialization is infallible")
    }
}
impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(data) = &self.data {
            map.serialize_entry("data", data)?;
        }
        if !self.errors.is_empty() {
            map.serialize_entry(
                "errors",
                &SerializedErrors {
                    errors: &self.errors,
                    expose_internal_errors: self.expose_internal_errors,
                },
            )?;
        }
        if let Some(extensions) = &self.extensions {
            map.serialize_entry("extensions", extensions)?;
        }
        map.end()
    }
}

struct SerializedErrors<'a> {
    errors: &'a [GraphQLError],
    expose_internal_errors: bool,
}
impl Serialize for SerializedErrors<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.errors.len()))?;
        for error in self.errors {
            seq.serialize_element(&SerializedError {
                error,
                expose_internal_errors: self.expose_internal_errors,
            })?;
        }
        seq.end()
    }
}

struct SerializedError<'a> {
    error: &'a GraphQLError,
    expose_internal_errors: bool,
}
impl Serialize for SerializedError<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if self.error.is_client_safe() || self.expose_internal_errors {
            map.serialize_entry("message", self.error.message())?;
        } else {
            map.serialize_entry("message", INTERNAL_ERROR_MESSAGE)?;
        }
        if !self.error.locations().is_empty() {
            map.serialize_entry("locations", self.error.locations())?;
        }
        if let Some(path) = self.error.path() {
            map.serialize_entry("path", path)?;
        }
        map.end()
    }
}
