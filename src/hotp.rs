use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::{decode_base32, OtpCode, DEFAULT_DIGITS};

type HmacSha1 = Hmac<Sha1>;

/// Computes the [RFC 4226](https://www.rfc-editor.org/rfc/rfc4226) HOTP value
/// of `counter` under the raw `key`, truncated to `digits` decimal digits.
///
/// Any key length is accepted, including an empty one.
pub fn hotp(key: &[u8], counter: u64, digits: u32) -> OtpCode {
    let digest = calc_digest(key, counter);

    OtpCode {
        code: encode_digest_truncated(&digest, digits),
        digits,
    }
}

/// Calculates the HMAC-SHA1 digest of the big-endian counter.
///
/// # Panics
/// If the HMAC context cannot be constructed, which HMAC's definition rules
/// out for every key length
fn calc_digest(key: &[u8], counter: u64) -> Vec<u8> {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC takes keys of any size");
    mac.update(&counter.to_be_bytes());

    mac.finalize().into_bytes().to_vec()
}

/// Encodes the HMAC digest into a truncated integer.
fn encode_digest_truncated(digest: &[u8], target_digits_count: u32) -> u32 {
    // The low nibble of the last byte tells where the 4 code bytes start
    let offset = (digest[digest.len() - 1] & 0xf) as usize;

    let code = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);

    // A 31-bit value never reaches 10^10, so wider codes are only padded
    match 10u64.checked_pow(target_digits_count) {
        Some(truncation_factor) => (u64::from(code) % truncation_factor) as u32,
        None => code,
    }
}

/// An HOTP generator bound to one raw key.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotp {
    key: Vec<u8>,
    // How many digits to generate
    digits: u32,
}

impl Hotp {
    /// Creates a generator for an already decoded key.
    ///
    /// Obs.: This method defaults to a 6-digit code.
    pub fn new(key: Vec<u8>) -> Self {
        Self {
            key,
            digits: DEFAULT_DIGITS,
        }
    }

    /// Creates a generator from a Base32 secret, decoded permissively.
    pub fn from_base32(secret: &str) -> Self {
        Self::new(decode_base32(secret))
    }

    ///  Sets the number of digits to generate
    pub fn with_digits(&mut self, digits: u32) -> &mut Self {
        self.digits = digits;

        self
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Generates the code for the provided counter
    pub fn generate(&self, counter: u64) -> OtpCode {
        hotp(&self.key, counter, self.digits)
    }
}
