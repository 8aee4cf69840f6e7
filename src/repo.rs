//! repository lifecycle: open an existing `.git`, create a fresh one, or
//! find one by walking up from a path.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, IoResultExt, Result};

const DESCRIPTION: &str = "Unnamed repository; edit this file 'description' to name the repository.\n";

/// a repository: a worktree root, its metadata directory, and parsed config
pub struct Repository {
    worktree: PathBuf,
    metadir: PathBuf,
    config: Config,
}

impl Repository {
    /// open an existing repository rooted at `worktree`
    ///
    /// when `force` is set, skips the format-version and directory checks
    /// entirely (used only by `create`, before `config` exists on disk).
    pub fn open(worktree: &Path, force: bool) -> Result<Self> {
        let metadir = worktree.join(".git");

        if force {
            return Ok(Self {
                worktree: worktree.to_path_buf(),
                metadir,
                config: Config::init_default(),
            });
        }

        if !metadir.is_dir() {
            return Err(Error::NotARepository(worktree.to_path_buf()));
        }

        let config_path = metadir.join("config");
        let config = Config::load(&config_path)?;
        match config.repo_format_version().as_deref() {
            Some("0") => {}
            other => {
                return Err(Error::UnsupportedFormat(
                    other.unwrap_or("<missing>").to_string(),
                ))
            }
        }

        Ok(Self {
            worktree: worktree.to_path_buf(),
            metadir,
            config,
        })
    }

    /// create a fresh repository at `worktree`, which must not exist or must
    /// be an empty directory
    pub fn create(worktree: &Path) -> Result<Self> {
        if worktree.exists() {
            if !worktree.is_dir() {
                return Err(Error::NotADirectory(worktree.to_path_buf()));
            }
            let mut entries = std::fs::read_dir(worktree).ctx(worktree)?;
            if entries.next().is_some() {
                return Err(Error::NotEmpty(worktree.to_path_buf()));
            }
        } else {
            std::fs::create_dir_all(worktree).ctx(worktree)?;
        }

        let repo = Self::open(worktree, true)?;
        let metadir = &repo.metadir;

        for parts in [
            &["branches"][..],
            &["objects"][..],
            &["refs", "tags"][..],
            &["refs", "heads"][..],
        ] {
            crate::path::repo_dir(metadir, parts, true)?;
        }

        let head_path = crate::path::repo_file(metadir, &["HEAD"], true)?;
        std::fs::write(&head_path, b"ref: refs/heads/master\n").ctx(&head_path)?;

        let desc_path = crate::path::repo_file(metadir, &["description"], true)?;
        std::fs::write(&desc_path, DESCRIPTION).ctx(&desc_path)?;

        let config_path = crate::path::repo_file(metadir, &["config"], true)?;
        let config = Config::init_default();
        config.save(&config_path)?;

        log::debug!("created repository at {}", worktree.display());

        Ok(Self {
            worktree: worktree.to_path_buf(),
            metadir: metadir.clone(),
            config,
        })
    }

    /// walk up from `start` looking for a `.git` directory
    ///
    /// returns `Ok(None)` rather than failing when `required` is false and no
    /// repository is found before the filesystem root.
    pub fn find(start: &Path, required: bool) -> Result<Option<Self>> {
        let start = std::fs::canonicalize(start).ctx(start)?;
        log::debug!("discovering repository starting from {}", start.display());
        let mut current = start.as_path();

        loop {
            if current.join(".git").is_dir() {
                log::debug!("found repository at {}", current.display());
                return Ok(Some(Self::open(current, false)?));
            }

            match current.parent() {
                Some(parent) => {
                    log::trace!("no .git at {}, walking up to {}", current.display(), parent.display());
                    current = parent;
                }
                None => {
                    log::debug!("no repository found above {}", start.display());
                    return if required {
                        Err(Error::NotARepository(start))
                    } else {
                        Ok(None)
                    }
                }
            }
        }
    }

    pub fn worktree(&self) -> &Path {
        &self.worktree
    }

    pub fn metadir(&self) -> &Path {
        &self.metadir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
