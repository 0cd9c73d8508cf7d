use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown canonical field '{0}'")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
