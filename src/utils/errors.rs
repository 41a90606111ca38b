use std::io;
use thiserror::Error;

/// Domain violation raised by the standard atmosphere.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AtmosphereError {
    #[error("Invalid altitude: {0} m is below sea level")]
    InvalidArgument(f64),

    #[error("Altitude out of range: {0} m exceeds the standard atmosphere ceiling")]
    OutOfRange(f64),
}

#[derive(Error, Debug)]
pub enum RotorError {
    #[error("Atmosphere error: {0}")]
    Atmosphere(#[from] AtmosphereError),

    #[error("Invalid rotor configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Invalid(String),
}

impl From<RotorError> for ConfigError {
    fn from(err: RotorError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}
