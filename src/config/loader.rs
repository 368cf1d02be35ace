//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! attendance policy from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::AttendancePolicy;

/// Loads and provides access to the attendance policy.
///
/// The `ConfigLoader` reads the policy file from a directory and validates
/// its internal consistency before handing it to the engine.
///
/// # Directory Structure
///
/// ```text
/// config/attendance/
/// └── policy.yaml   # day schedule, thresholds, qualification rules
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/attendance").unwrap();
/// let policy = loader.policy();
/// println!("required hours: {}", policy.thresholds.required_daily_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: AttendancePolicy,
}

impl ConfigLoader {
    /// Loads the policy from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/attendance")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if the
    /// policy file is missing, contains invalid YAML, or fails validation.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/attendance")?;
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join("policy.yaml");
        let policy = Self::load_yaml::<AttendancePolicy>(&policy_path)?;
        policy.validate()?;
        Ok(Self { policy })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
