// SchedScope - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. Input selection, parsing, and statistics
// 4. Console report and optional export
// 5. Chart window launch

mod gui;

// Re-export modules from the library crate so that `gui.rs` can
// use `crate::app::...`, `crate::ui::...` etc.
pub use schedscope::app;
pub use schedscope::core;
pub use schedscope::platform;
pub use schedscope::ui;
pub use schedscope::util;

use crate::core::export::{ExportFormat, Report};
use crate::core::parser::{InputFormat, ParseConfig};
use crate::util::error::{Result, SchedScopeError};
use clap::Parser;
use std::path::PathBuf;

/// SchedScope - scheduling-quality analyser for RTOS harness logs.
///
/// Reads a scheduler test harness log, prints wait-time and deadline-miss
/// statistics, and opens a chart window.
#[derive(Parser, Debug)]
#[command(name = "SchedScope", version, about)]
struct Cli {
    /// Harness log to analyse (prompted for if omitted).
    path: Option<PathBuf>,

    /// Input layout: "text" or "csv".
    #[arg(short = 'f', long = "input-format")]
    input_format: Option<InputFormat>,

    /// Write the statistics to this file after printing them.
    #[arg(short = 'e', long = "export")]
    export: Option<PathBuf>,

    /// Export layout: "json" or "csv" (default: from the file extension).
    #[arg(long = "export-format")]
    export_format: Option<ExportFormat>,

    /// Print the statistics only; do not open the chart window.
    #[arg(long = "no-gui")]
    no_gui: bool,

    /// Config file to use instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Config comes first so its log level can feed the subscriber.
    let (config, config_warnings) = match cli.config {
        Some(ref path) => platform::config::load_config(path, true)?,
        None => {
            let paths = platform::config::PlatformPaths::resolve();
            platform::config::load_config(&paths.config_file, false)?
        }
    };

    util::logging::init(cli.debug, config.log_level.as_deref());
    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "SchedScope starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let show_charts = config.show_charts && !cli.no_gui;
    let input = platform::input::resolve_input(cli.path, show_charts)?;

    let parse_config = ParseConfig {
        format: cli.input_format.unwrap_or(config.input_format),
    };
    let output = app::pipeline::analyse_file(&input, &parse_config)?;

    let stdout = std::io::stdout();
    crate::core::report::write_report(&output.analysis.results, stdout.lock()).map_err(|e| {
        SchedScopeError::Io {
            path: PathBuf::from("<stdout>"),
            operation: "write report",
            source: e,
        }
    })?;

    if let Some(ref export_path) = cli.export {
        let format = cli
            .export_format
            .or_else(|| ExportFormat::from_extension(export_path))
            .unwrap_or(config.export_format);
        let report = Report::new(&output.analysis, output.parse, &output.source);
        crate::core::export::export_to_path(&report, format, export_path)?;
    }

    if show_charts {
        gui::launch(output, config.window_width, config.window_height);
    }

    Ok(())
}
