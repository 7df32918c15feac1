use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load restaurant data from {source_name}: {reason}")]
    Load { source_name: String, reason: String },

    #[error("No restaurants found for cuisine filter '{filter}'")]
    EmptyCandidateSet { filter: String },

    #[error("No cuisines available in the loaded catalog")]
    NoCuisines,

    #[error("Unknown selection policy: {0}")]
    UnknownPolicy(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PickerError {
    pub fn load(source_name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        PickerError::Load {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_load_error(&self) -> bool {
        matches!(self, PickerError::Load { .. })
    }

    /// Blocking errors stop the session; the rest are shown as a notice and the
    /// user can keep going.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            PickerError::EmptyCandidateSet { .. } | PickerError::NoCuisines
        )
    }
}

pub type Result<T> = std::result::Result<T, PickerError>;
