// SchedScope - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every failure aborts the current run; no variant is recovered from
// silently.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all SchedScope operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum SchedScopeError {
    /// The log content does not follow the harness format.
    Format(FormatError),

    /// The parsed log holds no usable jobs for at least one task.
    EmptyData(EmptyDataError),

    /// Export of the computed statistics failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for SchedScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "Format error: {e}"),
            Self::EmptyData(e) => write!(f, "Empty data error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SchedScopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            Self::EmptyData(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Format errors
// ---------------------------------------------------------------------------

/// Errors raised while turning raw log lines into the typed model.
///
/// Line numbers are 1-based. `line` holds the offending content, truncated
/// to `DEBUG_MAX_LINE_PREVIEW` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The log ended without a `kstats` line.
    MissingKernelStats { lines_read: u64 },

    /// A job line carries fewer fields than the record requires.
    FieldCount {
        line_number: u64,
        line: String,
        found: usize,
        expected: usize,
    },

    /// A numeric field could not be converted to an integer.
    InvalidInteger {
        line_number: u64,
        line: String,
        field: String,
        value: String,
    },

    /// The kernel line lacks one of the required counters.
    MissingKernelKey {
        line_number: u64,
        line: String,
        key: &'static str,
    },

    /// A kernel line field is not a `key=value` pair.
    MalformedKernelPair {
        line_number: u64,
        line: String,
        pair: String,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKernelStats { lines_read } => write!(
                f,
                "no 'kstats' line found after {lines_read} lines; \
                 the kernel snapshot is required"
            ),
            Self::FieldCount {
                line_number,
                line,
                found,
                expected,
            } => write!(
                f,
                "line {line_number}: expected {expected} fields, found {found}: '{line}'"
            ),
            Self::InvalidInteger {
                line_number,
                line,
                field,
                value,
            } => write!(
                f,
                "line {line_number}: field '{field}' = '{value}' is not an integer: '{line}'"
            ),
            Self::MissingKernelKey {
                line_number,
                line,
                key,
            } => write!(
                f,
                "line {line_number}: kernel line is missing required key '{key}': '{line}'"
            ),
            Self::MalformedKernelPair {
                line_number,
                line,
                pair,
            } => write!(
                f,
                "line {line_number}: kernel field '{pair}' is not a key=value pair: '{line}'"
            ),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<FormatError> for SchedScopeError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

// ---------------------------------------------------------------------------
// Empty data errors
// ---------------------------------------------------------------------------

/// Errors raised when statistics would be computed over zero elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyDataError {
    /// The log contained no job records at all.
    NoTasks,

    /// A task id inside the dense range has no jobs.
    TaskWithoutJobs { task_id: usize },
}

impl fmt::Display for EmptyDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTasks => write!(f, "the log contains no job records"),
            Self::TaskWithoutJobs { task_id } => write!(
                f,
                "task {task_id} has no job records; task ids must form a contiguous range from 0"
            ),
        }
    }
}

impl std::error::Error for EmptyDataError {}

impl From<EmptyDataError> for SchedScopeError {
    fn from(e: EmptyDataError) -> Self {
        Self::EmptyData(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for SchedScopeError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for SchedScopeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for SchedScope results.
pub type Result<T> = std::result::Result<T, SchedScopeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_format_error_message_names_field_and_line() {
        let err = FormatError::InvalidInteger {
            line_number: 7,
            line: "0,1,x,3,4,5,0,1".to_string(),
            field: "release_ms".to_string(),
            value: "x".to_string(),
        };
        let msg = SchedScopeError::from(err).to_string();
        assert!(msg.starts_with("Format error:"), "got: {msg}");
        assert!(msg.contains("line 7"));
        assert!(msg.contains("release_ms"));
    }

    #[test]
    fn test_io_error_preserves_source_chain() {
        let err = SchedScopeError::Io {
            path: PathBuf::from("run.log"),
            operation: "open",
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("run.log"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_empty_data_error_names_task() {
        let msg = SchedScopeError::from(EmptyDataError::TaskWithoutJobs { task_id: 3 }).to_string();
        assert!(msg.contains("task 3"), "got: {msg}");
    }
}
