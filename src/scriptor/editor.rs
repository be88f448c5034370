use crate::error::{Result, ScriptorError};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(ScriptorError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
///
/// The editor command may carry arguments (`code --wait`).
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ScriptorError::Api("Editor command is empty".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| ScriptorError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(ScriptorError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(ScriptorError::Io)
}

/// Opens the editor on `markup` and returns what was saved.
///
/// The buffer lives in a uniquely named `.html` file in the temp dir.
pub fn edit_markup(markup: &str) -> Result<String> {
    let temp_file =
        env::temp_dir().join(format!("scriptor-{}.html", uuid::Uuid::new_v4().simple()));
    fs::write(&temp_file, markup).map_err(ScriptorError::Io)?;

    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    result.map(strip_trailing_newline)
}

/// Drops the single newline editors add on save.
fn strip_trailing_newline(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_one_final_newline() {
        assert_eq!(strip_trailing_newline("<p>a</p>\n".into()), "<p>a</p>");
        assert_eq!(strip_trailing_newline("<p>a</p>\r\n".into()), "<p>a</p>");
        assert_eq!(strip_trailing_newline("a\n\n".into()), "a\n");
        assert_eq!(strip_trailing_newline("a".into()), "a");
    }
}
