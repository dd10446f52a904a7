use thiserror::Error;

/// Failures surfaced by the effect layer.
///
/// Frame updates never return these: a missing collaborator means the frame
/// is skipped. They are reported from setup paths only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FxError {
    #[error("resource not ready: {0}")]
    MissingResource(&'static str),
    #[error("invalid scene parameters: {0}")]
    InvalidParams(String),
}

pub type FxResult<T> = Result<T, FxError>;
