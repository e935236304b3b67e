use std::{fs, io::Write, path::Path};

use tracing::debug;

use crate::{
    constants::VIM_SYNTAX,
    error::{Error, Result},
};

/// Append the vim syntax hint to `path` unless a line already carries it
pub fn syntax(path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    if contents.lines().any(|line| line == VIM_SYNTAX) {
        return Ok(());
    }

    let mut line = String::new();
    if !contents.is_empty() && !contents.ends_with('\n') {
        line.push('\n');
    }
    line.push_str(VIM_SYNTAX);
    line.push('\n');

    fs::OpenOptions::new()
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(line.as_bytes()))
        .map_err(|e| Error::io(path, e))?;

    debug!("Added syntax hint to {}", path.display());
    Ok(())
}
