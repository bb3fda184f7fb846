// SchedScope - platform/input.rs
//
// Input file selection when no path is given on the command line:
// a stdin prompt first, then a native file dialog.

use crate::util::constants;
use crate::util::error::{Result, SchedScopeError};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Prompt for a path on `output` and read one line from `input`.
///
/// Surrounding whitespace and one pair of matching quotes are stripped, since
/// terminals add quotes when a file is dragged in. Returns `None` for an
/// empty answer or end of input.
pub fn prompt_for_path<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<Option<PathBuf>> {
    write!(output, "{}", constants::INPUT_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let trimmed = line.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed);

    if unquoted.is_empty() {
        Ok(None)
    } else {
        Ok(Some(PathBuf::from(unquoted)))
    }
}

/// Open a native file dialog for choosing a harness log.
pub fn pick_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(format!("{} - open harness log", constants::APP_NAME))
        .add_filter("Harness logs", &["txt", "log", "csv"])
        .add_filter("All files", &["*"])
        .pick_file()
}

/// Work out which file to analyse.
///
/// Order: explicit CLI path, stdin prompt, then (if `allow_dialog`) a native
/// file dialog.
pub fn resolve_input(cli_path: Option<PathBuf>, allow_dialog: bool) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        return Ok(path);
    }

    let stdin = io::stdin();
    let prompted = prompt_for_path(stdin.lock(), io::stdout()).map_err(|e| SchedScopeError::Io {
        path: PathBuf::from("<stdin>"),
        operation: "read input path",
        source: e,
    })?;
    if let Some(path) = prompted {
        return Ok(path);
    }

    if allow_dialog {
        tracing::debug!("No path entered; opening file dialog");
        if let Some(path) = pick_file_dialog() {
            return Ok(path);
        }
    }

    Err(SchedScopeError::Io {
        path: PathBuf::new(),
        operation: "select input file",
        source: io::Error::new(io::ErrorKind::NotFound, "no input file selected"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(answer: &str) -> Option<PathBuf> {
        let mut shown = Vec::new();
        let path = prompt_for_path(answer.as_bytes(), &mut shown).unwrap();
        assert_eq!(String::from_utf8(shown).unwrap(), constants::INPUT_PROMPT);
        path
    }

    #[test]
    fn test_prompt_reads_trimmed_path() {
        assert_eq!(prompt("  /tmp/run.log \n"), Some(PathBuf::from("/tmp/run.log")));
    }

    #[test]
    fn test_prompt_strips_drag_and_drop_quotes() {
        assert_eq!(
            prompt("'/tmp/my run.log'\n"),
            Some(PathBuf::from("/tmp/my run.log"))
        );
        assert_eq!(prompt("\"C:\\logs\\run.txt\"\r\n"), Some(PathBuf::from("C:\\logs\\run.txt")));
    }

    #[test]
    fn test_prompt_empty_answer_is_none() {
        assert_eq!(prompt("\n"), None);
        assert_eq!(prompt(""), None);
    }

    #[test]
    fn test_cli_path_wins() {
        let path = resolve_input(Some(PathBuf::from("given.log")), false).unwrap();
        assert_eq!(path, PathBuf::from("given.log"));
    }
}
