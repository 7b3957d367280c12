// Copyright 2025 ual Contributors
// SPDX-License-Identifier: Apache-2.0

//! Append-only artifact storage.
//!
//! Every run writes a new `<prefix><YYYYMMDD_HHMMSS>.<ext>` file and then
//! repoints a fixed alias (`latest.html`, `latest.json`, ...) at it. Existing
//! timestamped files are never overwritten: when the name for the current
//! second is taken, `_1`, `_2`, ... is appended to the stem.
//!
//! The alias is replaced atomically. A new link is created under a hidden
//! temporary name in the same directory and renamed over the alias, so a
//! reader sees either the previous or the new target.

use crate::error::{CoreError, Result};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Format of the timestamp embedded in artifact names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Paths produced by [`ArtifactStore::publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    /// The new timestamped artifact.
    pub artifact: PathBuf,
    /// The alias now pointing at it.
    pub alias: PathBuf,
}

/// A directory of timestamped artifacts with a "latest" alias.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| CoreError::io(&dir, e))?;
        Ok(Self { dir })
    }

    /// Write `contents` to a fresh timestamped file and repoint `alias` to it.
    pub fn publish(
        &self,
        prefix: &str,
        extension: &str,
        contents: &[u8],
        alias: &str,
        now: DateTime<Local>,
    ) -> Result<Published> {
        let artifact = self.write_timestamped(prefix, extension, contents, now)?;
        let alias = self.update_alias(alias, &artifact)?;
        tracing::info!(
            artifact = %artifact.display(),
            alias = %alias.display(),
            "artifact published"
        );
        Ok(Published { artifact, alias })
    }

    /// Create a new `<prefix><timestamp>[_n].<extension>` file.
    pub fn write_timestamped(
        &self,
        prefix: &str,
        extension: &str,
        contents: &[u8],
        now: DateTime<Local>,
    ) -> Result<PathBuf> {
        let stamp = now.format(TIMESTAMP_FORMAT).to_string();

        let mut attempt = 0u32;
        loop {
            let name = if attempt == 0 {
                format!("{prefix}{stamp}.{extension}")
            } else {
                format!("{prefix}{stamp}_{attempt}.{extension}")
            };
            let path = self.dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(contents)
                        .and_then(|_| file.flush())
                        .map_err(|e| CoreError::io(&path, e))?;
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::debug!(path = %path.display(), "artifact name taken, trying next suffix");
                    attempt += 1;
                }
                Err(e) => return Err(CoreError::io(&path, e)),
            }
        }
    }

    /// Atomically point `alias` at `target`, which must live in this store.
    pub fn update_alias(&self, alias: &str, target: &Path) -> Result<PathBuf> {
        let file_name = target
            .file_name()
            .ok_or_else(|| CoreError::AliasOutsideDir(target.to_path_buf()))?;
        let resolved = self.dir.join(file_name);
        if !resolved.is_file() {
            return Err(CoreError::AliasOutsideDir(target.to_path_buf()));
        }

        let alias_path = self.dir.join(alias);
        let staging = self
            .dir
            .join(format!(".{alias}.{}.tmp", std::process::id()));

        match fs::remove_file(&staging) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(CoreError::io(&staging, e)),
        }

        #[cfg(unix)]
        std::os::unix::fs::symlink(file_name, &staging).map_err(|e| CoreError::io(&staging, e))?;
        #[cfg(not(unix))]
        fs::copy(&resolved, &staging).map_err(|e| CoreError::io(&staging, e))?;

        fs::rename(&staging, &alias_path).map_err(|e| CoreError::io(&alias_path, e))?;
        Ok(alias_path)
    }
}
