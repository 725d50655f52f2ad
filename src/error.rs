use thiserror::Error;

pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Error, Debug)]
pub enum ChatError {
    /// A setter received a value outside its allow-list.
    #[error("{prefix} {value} is not allowed value. You can use only one of values: {allowed}.")]
    InvalidValue {
        label: String,
        prefix: String,
        value: String,
        allowed: String,
    },

    #[error("At least KEY param must be set!")]
    MissingKey,

    #[error("Failed to write chat snippet: {0}")]
    Io(#[from] std::io::Error),
}
