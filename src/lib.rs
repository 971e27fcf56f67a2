pub mod action;
pub mod base32;
pub mod config;
pub mod entry;
pub mod hotp;
pub mod manager;
pub mod store;
pub mod totp;

use std::{fmt::Display, time::SystemTimeError};

pub use base32::decode_base32;
pub use hotp::hotp;
pub use totp::{totp, TotpCode};

/// Seconds per TOTP window when none is configured.
pub const DEFAULT_PERIOD: u64 = 30;
/// Code length when none is configured.
pub const DEFAULT_DIGITS: u32 = 6;
/// Widest configurable code; the 31-bit truncated value never needs more.
pub const MAX_DIGITS: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum OtpError {
    #[error("The time step must be at least one second")]
    InvalidTimeStep,
    #[error("The system clock is set before the UNIX epoch")]
    Clock(#[from] SystemTimeError),
}

#[derive(Debug, thiserror::Error)]
pub enum ShelfError {
    #[error("The {0} field must not be empty")]
    EmptyField(&'static str),
    #[error("There is no entry at index {index}, the list holds {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Codes must have between 1 and {max} digits, found {0}", max = MAX_DIGITS)]
    DigitsOutOfRange(u32),
    #[error("Unknown move direction, found {0}. Expected one of: up or down")]
    UnknownDirection(String),
    #[error("Could not import the entry list")]
    Import(#[source] serde_json::Error),
    #[error("Could not export the entry list")]
    Export(#[source] serde_json::Error),
    #[error("The session store failed: {0}")]
    Store(String),
    #[error("Could not parse the configuration")]
    Config(#[source] toml::de::Error),
    #[error("Could not read the configuration")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Otp(#[from] OtpError),
}

pub type Result<T, E = ShelfError> = std::result::Result<T, E>;

/// A generated one-time password, rendered zero-padded to `digits` characters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OtpCode {
    code: u32,
    digits: u32,
}

impl OtpCode {
    pub fn integer(&self) -> u32 {
        self.code
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }
}

impl Display for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // A zero-width code would otherwise still print a lone "0"
        if self.digits == 0 {
            return Ok(());
        }

        write!(
            f,
            "{:0padding$}",
            self.code,
            padding = (self.digits as usize)
        )
    }
}
