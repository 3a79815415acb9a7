use thiserror::Error;

pub type InventoryResult<T> = Result<T, InventoryError>;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid food id: {0}")]
    InvalidId(String),

    #[error("Food item not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(String),
}

impl From<InventoryError> for freshkeep_shared::Error {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::Validation(errors) => freshkeep_shared::Error::Validate(errors),
            InventoryError::NotFound => freshkeep_shared::Error::NotFound,
            InventoryError::InvalidId(message) | InventoryError::Store(message) => {
                freshkeep_shared::Error::Server(message)
            }
        }
    }
}
