use std::{
    fs,
    path::{Path, PathBuf},
};

use ini::{EscapePolicy, Ini, ParseOption, Properties};
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// One INI file held in memory as an ordered `section -> key -> value` map.
///
/// Section and key order survive a load/persist cycle. Comments do not.
/// Values are kept verbatim: backslashes and quotes are neither
/// interpreted on load nor escaped on write.
#[derive(Debug, Clone)]
pub struct IniStore {
    path: PathBuf,
    ini: Ini,
    private: bool,
}

impl IniStore {
    /// Load the file at `path`; a missing file yields an empty store
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let ini = if path.exists() {
            Ini::load_from_file_opt(&path, verbatim()).map_err(|source| Error::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            debug!("{} does not exist, starting empty", path.display());
            Ini::new()
        };

        Ok(Self {
            path,
            ini,
            private: false,
        })
    }

    /// Restrict the file to its owner whenever it is persisted
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Named sections in file order, without duplicates
    pub fn sections(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.ini.sections().flatten() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.ini.section(Some(name)).is_some()
    }

    pub fn section(&self, name: &str) -> Option<&Properties> {
        self.ini.section(Some(name))
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|props| props.get(key))
    }

    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.section(section)
            .is_some_and(|props| props.contains_key(key))
    }

    /// Create an empty section unless it already exists
    pub fn add_section(&mut self, name: &str) {
        self.ini
            .entry(Some(name.to_string()))
            .or_insert_with(Properties::new);
    }

    /// Set `key` in `section`, creating the section if needed
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Remove a section; returns whether it existed
    pub fn remove_section(&mut self, name: &str) -> bool {
        self.ini.delete(Some(name)).is_some()
    }

    /// Rewrite the whole file from the in-memory state
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        self.ini
            .write_to_file_policy(&self.path, EscapePolicy::Nothing)
            .map_err(|e| Error::io(&self.path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if self.private {
                fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                    .map_err(|e| Error::io(&self.path, e))?;
            }
        }

        trace!("Wrote {}", self.path.display());
        Ok(())
    }
}

fn verbatim() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}
