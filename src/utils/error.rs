use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("{message}")]
    Extraction { message: String },

    #[error("{message}")]
    NoMenuForToday { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfig { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Extraction,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MenuError {
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    pub fn no_menu_for_today(message: impl Into<String>) -> Self {
        Self::NoMenuForToday {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) | Self::Timeout { .. } | Self::HttpStatus { .. } => {
                ErrorCategory::Network
            }
            Self::Extraction { .. } | Self::NoMenuForToday { .. } => ErrorCategory::Extraction,
            Self::Config { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. }
            | Self::Toml(_) => ErrorCategory::Configuration,
            Self::Io(_) | Self::Serialization(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Extraction => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Message shown on a restaurant card or printed by the CLI.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Nepodařilo se načíst menu: {}", self),
            ErrorCategory::Extraction => self.to_string(),
            ErrorCategory::Configuration => format!("Chybná konfigurace: {}", self),
            ErrorCategory::Storage => format!("Nepodařilo se uložit data: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "Increase --timeout-seconds or check the restaurant site",
            Self::HttpStatus { .. } | Self::Network(_) => {
                "Check network connectivity and the source URL"
            }
            Self::Extraction { .. } | Self::NoMenuForToday { .. } => {
                "The page layout may have changed; review the source's strategy"
            }
            Self::Toml(_) | Self::Config { .. } => "Fix the configuration file syntax",
            Self::InvalidConfigValue { .. } | Self::MissingConfig { .. } => {
                "Correct the reported configuration field"
            }
            Self::Io(_) => "Check that the output directory exists and is writable",
            Self::Serialization(_) => "Remove the corrupted snapshot and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
