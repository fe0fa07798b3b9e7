use thiserror::Error;

/// Raised when the controller cannot bind to the page it was loaded into.
/// The widget never runs with a partial set of surfaces.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("display surface `{0}` not found in document")]
    MissingSurface(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("no element matches `{0}`")]
    NotFound(String),
    #[error("element `{0}` is not actionable")]
    NotActionable(String),
    #[error("no element has focus")]
    NoFocus,
}
