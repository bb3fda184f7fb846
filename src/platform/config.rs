// SchedScope - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::export::ExportFormat;
use crate::core::parser::InputFormat;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SchedScope configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/schedscope/ or %APPDATA%\SchedScope\)
    pub config_dir: PathBuf,

    /// Default config file inside `config_dir`.
    pub config_file: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        let config_dir = match ProjectDirs::from("", "", constants::APP_ID) {
            Some(proj_dirs) => proj_dirs.config_dir().to_path_buf(),
            None => {
                tracing::warn!("Could not determine platform directories, using current directory");
                PathBuf::from(".")
            }
        };
        let config_file = config_dir.join(constants::CONFIG_FILE_NAME);

        tracing::debug!(
            config = %config_dir.display(),
            file = %config_file.display(),
            "Platform paths resolved"
        );

        Self {
            config_dir,
            config_file,
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[parsing]` section.
    pub parsing: ParsingSection,
    /// `[output]` section.
    pub output: OutputSection,
    /// `[charts]` section.
    pub charts: ChartsSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// `[parsing]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ParsingSection {
    /// "text" or "csv".
    pub input_format: Option<String>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Open the chart window after printing.
    pub show_charts: Option<bool>,
    /// "json" or "csv", used when `--export` has no recognisable extension.
    pub export_format: Option<String>,
}

/// `[charts]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ChartsSection {
    pub window_width: Option<f32>,
    pub window_height: Option<f32>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    pub input_format: InputFormat,
    pub show_charts: bool,
    pub export_format: ExportFormat,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            input_format: InputFormat::default(),
            show_charts: true,
            export_format: ExportFormat::default(),
            window_width: constants::DEFAULT_WINDOW_WIDTH,
            window_height: constants::DEFAULT_WINDOW_HEIGHT,
        }
    }
}

fn out_of_range(field: &str, value: impl ToString, expected: String) -> String {
    ConfigError::ValueOutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
    .to_string()
}

/// Load and validate a config file.
///
/// With `required == false` (the platform default location) a missing file
/// yields defaults, and an unreadable or unparsable file yields defaults plus
/// a warning. With `required == true` (an explicit `--config` path) those
/// cases are errors.
pub fn load_config(path: &Path, required: bool) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if !required && !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return Ok((AppConfig::default(), Vec::new()));
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if required => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                path.display()
            );
            tracing::warn!("{}", msg);
            return Ok((AppConfig::default(), vec![msg]));
        }
    };

    match parse_config(&content, path) {
        Ok(loaded) => {
            tracing::info!(path = %path.display(), "Loaded config.toml");
            Ok(loaded)
        }
        Err(e) if required => Err(e),
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            Ok((AppConfig::default(), vec![msg]))
        }
    }
}

/// Parse and validate config.toml content.
///
/// Returns the validated config and a list of non-fatal warnings, one per
/// rejected value.
pub fn parse_config(content: &str, path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(out_of_range(
                "logging.level",
                level,
                constants::VALID_LOG_LEVELS.join(", "),
            ));
        }
    }

    // -- Parsing: input_format --
    if let Some(ref format) = raw.parsing.input_format {
        match format.parse() {
            Ok(f) => config.input_format = f,
            Err(_) => warnings.push(out_of_range(
                "parsing.input_format",
                format,
                "\"text\" or \"csv\"".to_string(),
            )),
        }
    }

    // -- Output --
    if let Some(show) = raw.output.show_charts {
        config.show_charts = show;
    }
    if let Some(ref format) = raw.output.export_format {
        match format.parse() {
            Ok(f) => config.export_format = f,
            Err(_) => warnings.push(out_of_range(
                "output.export_format",
                format,
                "\"json\" or \"csv\"".to_string(),
            )),
        }
    }

    // -- Charts: window size --
    let dims = constants::MIN_WINDOW_DIMENSION..=constants::MAX_WINDOW_DIMENSION;
    let expected_dims = format!(
        "{}-{}",
        constants::MIN_WINDOW_DIMENSION,
        constants::MAX_WINDOW_DIMENSION
    );
    if let Some(width) = raw.charts.window_width {
        if dims.contains(&width) {
            config.window_width = width;
        } else {
            warnings.push(out_of_range("charts.window_width", width, expected_dims.clone()));
        }
    }
    if let Some(height) = raw.charts.window_height {
        if dims.contains(&height) {
            config.window_height = height;
        } else {
            warnings.push(out_of_range("charts.window_height", height, expected_dims));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    Ok((config, warnings))
}
