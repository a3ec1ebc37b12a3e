//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading a raw SAR trace
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read trace: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid value for {label} on line {line}: {value:?} is not an 8-bit hex number")]
    InvalidRegisterValue {
        line: usize,
        label: String,
        value: String,
    },
}

/// Errors raised by table-level operations (merge, trend assembly)
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Errors that can occur while loading pipeline configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid offsets: {0}")]
    InvalidOffsets(String),

    #[error("Invalid channel table: {0}")]
    InvalidChannels(String),
}

/// Errors that can occur during file input/output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Invalid table: {0}")]
    InvalidTable(#[from] TableError),

    #[error("Failed to render chart: {0}")]
    RenderFailed(String),
}
