//! Durable user profile record: one JSON file per installation.
//!
//! Absence of the file is the "no profile yet" state that gates the rest
//! of the application. Saves are wholesale overwrites; there is no partial
//! update.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::models::profile::validation;
use crate::models::UserProfile;

pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved profile, or `None` when none has been saved yet.
    /// A present-but-malformed record is an error, not `None`.
    pub fn load(&self) -> Result<Option<UserProfile>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// The saved profile, treating absence as a blocking error. For
    /// operations that cannot proceed without one.
    pub fn require(&self) -> Result<UserProfile> {
        self.load()?
            .ok_or_else(|| Error::DataNotFound(self.path.clone()))
    }

    /// Validate and overwrite the stored profile wholesale.
    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        validation::validate(profile)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, serde_json::to_string_pretty(profile)?)?;
        info!("profile saved to {}", self.path.display());
        Ok(())
    }
}
