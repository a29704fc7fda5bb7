use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Preference storage error: {message}")]
    StorageError { message: String },

    #[error("Unknown field: {name}")]
    UnknownFieldError { name: String },
}

impl FormError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FormError::HttpError(_) => "Could not set up the HTTP client.".to_string(),
            FormError::IoError(e) => format!("File access failed: {}", e),
            FormError::SerializationError(_) => "Could not encode or decode JSON data.".to_string(),
            FormError::TomlError(_) => "The configuration file is not valid TOML.".to_string(),
            FormError::ConfigError { message } => format!("Configuration problem: {}", message),
            FormError::MissingConfigError { field } => {
                format!("Required configuration '{}' is missing.", field)
            }
            FormError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration '{}' is invalid: {}", field, reason)
            }
            FormError::StorageError { message } => {
                format!("Could not access saved preferences: {}", message)
            }
            FormError::UnknownFieldError { name } => {
                format!("The form has no field named '{}'.", name)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FormError::HttpError(_) => "Check the TLS setup of this machine and try again.",
            FormError::IoError(_) => "Make sure the path exists and is readable.",
            FormError::SerializationError(_) => "Inspect the JSON document for syntax errors.",
            FormError::TomlError(_) | FormError::ConfigError { .. } => {
                "Fix the configuration file and run again."
            }
            FormError::MissingConfigError { .. } | FormError::InvalidConfigValueError { .. } => {
                "Review the [submission], [attachment] and [[fields]] sections."
            }
            FormError::StorageError { .. } => "Delete the preferences file to start fresh.",
            FormError::UnknownFieldError { .. } => "Use one of the field names from the form schema.",
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
