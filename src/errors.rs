use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoconfError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Window '{window}' still missing after relaunching {image}")]
    ProcessRecoveryFailure { window: String, image: String },

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Automation error: {0}")]
    Automation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialize error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Invalid element pattern: {0}")]
    Regex(#[from] regex::Error),
}

pub type AutoconfResult<T> = Result<T, AutoconfError>;
