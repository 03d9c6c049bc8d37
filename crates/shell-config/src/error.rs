use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("Configuration invalid: {message} {location}")]
    Invalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("IO error at {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("TOML parse error in {path}: {source} {location}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
        location: ErrorLocation,
    },

    #[error("Failed to serialize config: {source} {location}")]
    TomlSerialize {
        #[source]
        source: toml::ser::Error,
        location: ErrorLocation,
    },

    #[error("User configuration directory not found {location}")]
    NoConfigDir { location: ErrorLocation },
}

impl ConfigError {
    /// Create an invalid-configuration error
    #[track_caller]
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::Invalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        Self::Io {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn toml_parse(path: PathBuf, source: toml::de::Error) -> Self {
        Self::TomlParse {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_config_dir() -> Self {
        Self::NoConfigDir {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::Invalid { .. } | Self::TomlParse { .. } => {
                "Configuration file has invalid settings. \
                   Fix the reported value or delete the config file to use defaults."
            }
            Self::Io { .. } => {
                "Unable to read or write the configuration file. \
                   Check file permissions in the application directory."
            }
            Self::TomlSerialize { .. } => {
                "Internal error preparing configuration data. Please report this issue."
            }
            Self::NoConfigDir { .. } => {
                "No per-user configuration directory is available on this system."
            }
        }
    }
}

impl From<toml::ser::Error> for ConfigError {
    #[track_caller]
    fn from(source: toml::ser::Error) -> Self {
        Self::TomlSerialize {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
