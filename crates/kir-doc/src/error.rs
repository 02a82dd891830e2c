//! Document Errors
//!
//! Hard failures stop the parse and surface as `DocError`; recoverable
//! degradations (an unresolvable module, a missing definition) keep the
//! parse going and are reported as `Warning`s.

/// Unrecoverable document failure
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("malformed KIR document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("not a KIR document (top level is not an object)")]
    NotAnObject,

    #[error("not a KIR document (format tag is {0:?})")]
    WrongFormat(String),

    #[error("document has no root component")]
    MissingRoot,
}

/// Recoverable degradation encountered while deserializing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A `$module:` reference could not be resolved; the node degraded to
    /// its preserved literal type (or a container).
    ModuleFallback { module: String, export: Option<String> },
    /// A reference named a definition the document does not carry.
    UnknownDefinition { name: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ModuleFallback { module, export } => match export {
                Some(e) => write!(f, "module {module:?} export {e:?} could not be resolved"),
                None => write!(f, "module {module:?} could not be resolved"),
            },
            Self::UnknownDefinition { name } => {
                write!(f, "no component definition named {name:?}")
            }
        }
    }
}
