//! Error spine shared by every crate sitting above the stores.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input failed its `validator` constraints.
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    /// A referenced item id is not in the inventory.
    #[error("not found")]
    NotFound,

    /// Infrastructure failure worth describing to the caller, like an
    /// unreadable snapshot file.
    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<chrono::ParseError> for Error {
    fn from(value: chrono::ParseError) -> Self {
        Self::Unknown(value.into())
    }
}

/// Return early with an [`Error::Server`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::Server(format!($($arg)*)))
    };
}
