use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{OtpError, Result, ShelfError, DEFAULT_DIGITS, DEFAULT_PERIOD, MAX_DIGITS};

/// Code parameters shared by every entry a [`crate::manager::Manager`] renders.
///
/// ```toml
/// time_step = 30
/// digits = 6
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window length in seconds
    pub time_step: u64,
    pub digits: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_PERIOD,
            digits: DEFAULT_DIGITS,
        }
    }
}

impl Config {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ShelfError::Config)?;
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;

        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.time_step == 0 {
            return Err(OtpError::InvalidTimeStep.into());
        }
        if !(1..=MAX_DIGITS).contains(&self.digits) {
            return Err(ShelfError::DigitsOutOfRange(self.digits));
        }

        Ok(())
    }
}
