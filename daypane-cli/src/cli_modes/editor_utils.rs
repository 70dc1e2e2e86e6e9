use anyhow::{Context, Result};
use std::{fs, io::Write, path::Path, process::Command};

pub fn resolve_editor(editor: &Option<String>) -> String {
    editor
        .as_deref()
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

/// Opens `editor_cmd` on a scratch file holding `initial` and returns what was saved.
pub fn edit_in_buffer(editor_cmd: &str, initial: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("daypane")
        .suffix(".md")
        .tempfile()?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    open_file_in_editor(editor_cmd, file.path())?;
    fs::read_to_string(file.path()).context("reading the edited note")
}

fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor_cmd)
        .arg(path)
        .status()
        .with_context(|| format!("launching editor `{editor_cmd}`"))?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(())
}
