/// Convenience result type used across cubist.
pub type CubistResult<T> = Result<T, CubistError>;

/// Top-level error taxonomy used by compiler APIs.
#[derive(thiserror::Error, Debug)]
pub enum CubistError {
    /// Malformed path-command or points syntax.
    #[error("path syntax error: {0}")]
    PathSyntax(String),

    /// Input uses a feature the compiler deliberately does not support.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Malformed numeric value in an attribute or argument list.
    #[error("numeric error: {0}")]
    Numeric(String),

    /// Malformed `transform` attribute.
    #[error("transform error: {0}")]
    Transform(String),

    /// Malformed color or style value.
    #[error("style error: {0}")]
    Style(String),

    /// Malformed or unreadable SVG document.
    #[error("document error: {0}")]
    Document(String),

    /// A named asset could not be located at any candidate path.
    #[error("asset '{name}' not found; attempted {attempted:?}")]
    AssetNotFound {
        /// The asset name as requested.
        name: String,
        /// Every candidate path probed, in order.
        attempted: Vec<std::path::PathBuf>,
    },

    /// Wrapped filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CubistError {
    /// Build a [`CubistError::PathSyntax`] value.
    pub fn path_syntax(msg: impl Into<String>) -> Self {
        Self::PathSyntax(msg.into())
    }

    /// Build a [`CubistError::NotImplemented`] value.
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Build a [`CubistError::Numeric`] value.
    pub fn numeric(msg: impl Into<String>) -> Self {
        Self::Numeric(msg.into())
    }

    /// Build a [`CubistError::Transform`] value.
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform(msg.into())
    }

    /// Build a [`CubistError::Style`] value.
    pub fn style(msg: impl Into<String>) -> Self {
        Self::Style(msg.into())
    }

    /// Build a [`CubistError::Document`] value.
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
