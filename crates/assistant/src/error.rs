use thiserror::Error;

pub type AssistantResult<T> = Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Store error: {0}")]
    Store(#[from] freshkeep_inventory::InventoryError),
}

impl From<AssistantError> for freshkeep_shared::Error {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::Store(inner) => inner.into(),
        }
    }
}
