use std::path::Path;

use configparser::ini::Ini;

use crate::error::{Error, Result};

/// the `metadir/config` file: an INI document with at least a `core` section
#[derive(Clone, Debug)]
pub struct Config {
    ini: Ini,
}

impl Config {
    /// the configuration written by `Repository::create`
    pub fn init_default() -> Self {
        let mut ini = Ini::new();
        ini.setstr("core", "repositoryformatversion", Some("0"));
        ini.setstr("core", "filemode", Some("false"));
        ini.setstr("core", "bare", Some("false"));
        Self { ini }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "config file missing"),
            });
        }

        let mut ini = Ini::new();
        ini.load(path).map_err(Error::Config)?;
        Ok(Self { ini })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.ini
            .write(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })
    }

    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.ini.get(section, key)
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.setstr(section, key, Some(value));
    }

    /// `core.repositoryformatversion`, the only value the core validates
    pub fn repo_format_version(&self) -> Option<String> {
        self.get("core", "repositoryformatversion")
    }

    pub fn is_bare(&self) -> bool {
        self.get("core", "bare").as_deref() == Some("true")
    }
}
