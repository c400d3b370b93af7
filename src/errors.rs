use std::fmt;

/// Main error type for everything around the advisor engine.
///
/// The engine itself never fails; these cover loading reference data,
/// configuration and hand-off snapshots, plus bad requests from the front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    /// Error related to dex (species/move) data
    Data(DataError),
    /// Error related to the advisor configuration
    Config(ConfigError),
    /// Error related to a hand-off snapshot or slot selection
    Snapshot(SnapshotError),
    /// A request named something the advisor does not know, like a type name
    InvalidInput(String),
    /// A result could not be rendered
    Output(String),
}

/// Errors related to loading species and move reference data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A data file could not be read
    Io { path: String, details: String },
    /// A data file is not valid JSON of the expected shape
    MalformedJson { path: String, details: String },
    /// A compiled dex blob could not be encoded or decoded
    Compiled(String),
}

/// Errors related to the advisor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read
    Io { path: String, details: String },
    /// The configuration is not valid RON
    MalformedRon(String),
    /// The setup index is not valid JSON
    MalformedSetupIndex(String),
}

/// Errors related to hand-off snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The snapshot file could not be read
    Io { path: String, details: String },
    /// The payload is not valid JSON of the expected shape
    MalformedPayload(String),
    /// Slot index is outside the six-slot team
    InvalidSlot(usize),
    /// The selected slot holds no species
    EmptySlot(usize),
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorError::Data(err) => write!(f, "Data error: {}", err),
            AdvisorError::Config(err) => write!(f, "Config error: {}", err),
            AdvisorError::Snapshot(err) => write!(f, "Snapshot error: {}", err),
            AdvisorError::InvalidInput(details) => write!(f, "Invalid input: {}", details),
            AdvisorError::Output(details) => write!(f, "Output error: {}", details),
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io { path, details } => write!(f, "Cannot read {}: {}", path, details),
            DataError::MalformedJson { path, details } => {
                write!(f, "Malformed data in {}: {}", path, details)
            }
            DataError::Compiled(details) => write!(f, "Compiled dex error: {}", details),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, details } => write!(f, "Cannot read {}: {}", path, details),
            ConfigError::MalformedRon(details) => write!(f, "Malformed config: {}", details),
            ConfigError::MalformedSetupIndex(details) => {
                write!(f, "Malformed setup index: {}", details)
            }
        }
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io { path, details } => write!(f, "Cannot read {}: {}", path, details),
            SnapshotError::MalformedPayload(details) => {
                write!(f, "Malformed hand-off payload: {}", details)
            }
            SnapshotError::InvalidSlot(index) => write!(f, "Invalid team slot: {}", index + 1),
            SnapshotError::EmptySlot(index) => write!(f, "Team slot {} is empty", index + 1),
        }
    }
}

impl std::error::Error for AdvisorError {}
impl std::error::Error for DataError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for SnapshotError {}

impl From<DataError> for AdvisorError {
    fn from(err: DataError) -> Self {
        AdvisorError::Data(err)
    }
}

impl From<ConfigError> for AdvisorError {
    fn from(err: ConfigError) -> Self {
        AdvisorError::Config(err)
    }
}

impl From<SnapshotError> for AdvisorError {
    fn from(err: SnapshotError) -> Self {
        AdvisorError::Snapshot(err)
    }
}

/// Type alias for Results using AdvisorError
pub type AdvisorResult<T> = Result<T, AdvisorError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Type alias for Results using SnapshotError
pub type SnapshotResult<T> = Result<T, SnapshotError>;
