use std::{
    fmt::Display,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{decode_base32, hotp, OtpCode, OtpError, DEFAULT_DIGITS, DEFAULT_PERIOD};

/// The code valid at a given instant, and how long it stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotpCode {
    pub code: OtpCode,
    /// Seconds until the counter moves on, always within `1..=period`
    pub seconds_remaining: u64,
}

impl Display for TotpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.code, f)
    }
}

/// Generates the TOTP for a Base32 secret.
///
/// `at_time` is in seconds since the UNIX epoch; when `None` the system clock
/// is read. Fails only for a zero `time_step` or a clock set before 1970.
pub fn totp(
    secret: &str,
    time_step: u64,
    digits: u32,
    at_time: Option<u64>,
) -> Result<TotpCode, OtpError> {
    let mut totp_base = Totp::new(secret.to_string());
    totp_base.with_period(time_step).with_digits(digits);

    match at_time {
        Some(seconds_since_epoch) => totp_base.generate(seconds_since_epoch),
        None => totp_base.generate_current(),
    }
}

/// Seconds since the UNIX epoch according to the system clock.
pub fn unix_time() -> Result<u64, OtpError> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Seconds left before `seconds_since_epoch` crosses into the next window.
pub fn seconds_remaining(seconds_since_epoch: u64, time_step: u64) -> Result<u64, OtpError> {
    if time_step == 0 {
        return Err(OtpError::InvalidTimeStep);
    }

    Ok(time_step - seconds_since_epoch % time_step)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Totp {
    pub(crate) secret: String,
    pub(crate) period: u64,
    pub(crate) digits: u32,
}

impl Totp {
    /// Creates the config for the [Time-based One-time Password Algorithm](http://en.wikipedia.org/wiki/Time-based_One-time_Password_Algorithm)
    /// (TOTP) given an RFC4648 base32 encoded secret
    ///
    /// Obs.: This method defaults to a 6-digit code and a period of 30 seconds
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            period: DEFAULT_PERIOD,
            digits: DEFAULT_DIGITS,
        }
    }

    ///  Sets the period in seconds
    pub fn with_period(&mut self, period: u64) -> &mut Self {
        self.period = period;

        self
    }

    ///  Sets the number of digits to generate
    pub fn with_digits(&mut self, digits: u32) -> &mut Self {
        self.digits = digits;

        self
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// The HOTP counter for the window containing `seconds_since_epoch`
    pub fn counter(&self, seconds_since_epoch: u64) -> Result<u64, OtpError> {
        if self.period == 0 {
            return Err(OtpError::InvalidTimeStep);
        }

        Ok(seconds_since_epoch / self.period)
    }

    /// Seconds until the code generated for `seconds_since_epoch` expires
    pub fn remaining_seconds(&self, seconds_since_epoch: u64) -> Result<u64, OtpError> {
        seconds_remaining(seconds_since_epoch, self.period)
    }

    /// Generates a Totp from the provided seconds since the UNIX epoch
    /// truncated to the specified number of digits
    pub fn generate(&self, seconds_since_epoch: u64) -> Result<TotpCode, OtpError> {
        let counter = self.counter(seconds_since_epoch)?;
        let key = decode_base32(&self.secret);

        Ok(TotpCode {
            code: hotp(&key, counter, self.digits),
            seconds_remaining: self.remaining_seconds(seconds_since_epoch)?,
        })
    }

    /// Generates a Totp for the current system time
    pub fn generate_current(&self) -> Result<TotpCode, OtpError> {
        self.generate(unix_time()?)
    }
}
