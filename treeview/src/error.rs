use thiserror::Error;

/// Errors from the fallible edges of the widget: lifecycle misuse and data
/// loading. Navigation itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("tree view '{0}' is already mounted")]
    AlreadyMounted(String),

    #[error("tree view '{0}' is not mounted")]
    NotMounted(String),

    #[error("failed to read tree data: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tree data: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
