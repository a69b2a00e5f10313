use pharmalert_types::TypesError;
use pharmalert_uuid::UuidError;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A response, filter or locale string outside its closed vocabulary.
    #[error(transparent)]
    InvalidValue(#[from] TypesError),
    #[error("invalid id: {0}")]
    InvalidId(#[from] UuidError),
}

pub type RequestResult<T> = std::result::Result<T, RequestError>;
