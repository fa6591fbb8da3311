use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty column name, bad delimiter, etc.).
    ConfigValidation(String),
    /// Input file does not exist.
    FileNotFound { path: String },
    /// Any other IO error (permissions, not a file, ...).
    Io(String),
    /// Malformed delimited text.
    CsvParse(String),
    /// Malformed JSON document.
    JsonParse(String),
    /// A configured column is absent from the CSV header row.
    MissingColumn { column: String },
    /// A segment of the geometries path does not exist.
    MissingPath { path: String },
    /// The geometries path resolves to something other than an array.
    NotAnArray { path: String },
    /// A geometry entry (or its properties) has the wrong JSON shape.
    InvalidGeometry { index: usize, reason: String },
}

/// Coarse error class, used by callers that map failures to exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    FileNotFound,
    Io,
    Parse,
    Schema,
}

impl ReconError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigParse(_) | Self::ConfigValidation(_) => ErrorKind::Config,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::Io(_) => ErrorKind::Io,
            Self::CsvParse(_) | Self::JsonParse(_) => ErrorKind::Parse,
            Self::MissingColumn { .. }
            | Self::MissingPath { .. }
            | Self::NotAnArray { .. }
            | Self::InvalidGeometry { .. } => ErrorKind::Schema,
        }
    }
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::FileNotFound { path } => write!(f, "file not found: {path}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::CsvParse(msg) => write!(f, "CSV parse error: {msg}"),
            Self::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingColumn { column } => {
                write!(f, "missing column '{column}' in CSV header")
            }
            Self::MissingPath { path } => write!(f, "JSON path '{path}' does not exist"),
            Self::NotAnArray { path } => write!(f, "JSON path '{path}' is not an array"),
            Self::InvalidGeometry { index, reason } => {
                write!(f, "geometry #{index}: {reason}")
            }
        }
    }
}

impl std::error::Error for ReconError {}
