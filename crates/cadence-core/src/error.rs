use thiserror::Error;

#[derive(Debug, Error)]
pub enum CadenceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}

impl CadenceError {
    /// Short, stable error code string for API responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            CadenceError::Config(_) => "CONFIG_ERROR",
            CadenceError::UnknownLocale(_) => "UNKNOWN_LOCALE",
        }
    }
}

pub type Result<T> = std::result::Result<T, CadenceError>;
