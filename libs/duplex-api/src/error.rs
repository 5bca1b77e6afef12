use std::fmt;

/// Error kind for conversion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transform,
    InverseTransform,
    KeyCollision,
    ArityMismatch,
    Task,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transform => write!(f, "transform"),
            ErrorKind::InverseTransform => write!(f, "inverse transform"),
            ErrorKind::KeyCollision => write!(f, "key collision"),
            ErrorKind::ArityMismatch => write!(f, "arity mismatch"),
            ErrorKind::Task => write!(f, "task"),
        }
    }
}

/// Conversion error, returned by every `apply` / `unapply`.
///
/// Errors carry no positional information: the grammar or printer driving
/// the conversion attaches that via [`ConversionError::with_context`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Forward direction could not interpret its input.
    #[error("transform: {0}")]
    Transform(String),

    /// Backward direction could not reconstruct an input.
    #[error("inverse transform: {0}")]
    InverseTransform(String),

    /// Two distinct source keys mapped to the same output key.
    #[error("key collision: {key}")]
    KeyCollision { key: String },

    /// A fixed-arity shape received the wrong number of slots.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// A concurrent batch unit panicked or was cancelled by the runtime.
    #[error("task: {0}")]
    Task(String),
}

impl ConversionError {
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform(msg.into())
    }

    pub fn inverse(msg: impl Into<String>) -> Self {
        Self::InverseTransform(msg.into())
    }

    /// Collision on `key`; the key is rendered with its `Debug` form.
    pub fn key_collision(key: &impl fmt::Debug) -> Self {
        Self::KeyCollision { key: format!("{key:?}") }
    }

    pub fn arity(expected: usize, actual: usize) -> Self {
        Self::ArityMismatch { expected, actual }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConversionError::Transform(_) => ErrorKind::Transform,
            ConversionError::InverseTransform(_) => ErrorKind::InverseTransform,
            ConversionError::KeyCollision { .. } => ErrorKind::KeyCollision,
            ConversionError::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            ConversionError::Task(_) => ErrorKind::Task,
        }
    }

    /// Add context to the error, preserving its kind.
    ///
    /// Produces: `"context: original message"`. Arity errors carry only
    /// numbers and are returned unchanged.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        match self {
            ConversionError::Transform(msg) => ConversionError::Transform(format!("{ctx}: {msg}")),
            ConversionError::InverseTransform(msg) => {
                ConversionError::InverseTransform(format!("{ctx}: {msg}"))
            }
            ConversionError::KeyCollision { key } => {
                ConversionError::KeyCollision { key: format!("{ctx}: {key}") }
            }
            ConversionError::Task(msg) => ConversionError::Task(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_keeps_kind() {
        let e = ConversionError::transform("not a number").with_context("field 'age'");
        assert_eq!(e.kind(), ErrorKind::Transform);
        assert_eq!(e.to_string(), "transform: field 'age': not a number");

        let e = ConversionError::arity(2, 3).with_context("row 7");
        assert_eq!(e, ConversionError::ArityMismatch { expected: 2, actual: 3 });
    }

    #[test]
    fn test_key_collision_renders_debug() {
        let e = ConversionError::key_collision(&"a");
        assert_eq!(e.to_string(), "key collision: \"a\"");
        assert_eq!(e.kind(), ErrorKind::KeyCollision);
    }
}
