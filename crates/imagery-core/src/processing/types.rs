/// Fingerprint and batch result types
///
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A perceptual hash rendered as lowercase hexadecimal digits.
///
/// The digits are the base-16 numeral of the hash bit string read as one
/// unsigned integer, so leading zero digits never appear and an all-zero
/// hash is `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Build a fingerprint from bits in most-significant-first order
    pub fn from_bits(bits: &[bool]) -> Self {
        let significant = match bits.iter().position(|&bit| bit) {
            Some(first) => &bits[first..],
            None => return Fingerprint("0".to_string()),
        };

        // Group nibbles from the least significant end; the leading
        // digit takes whatever high bits are left over.
        let (head, tail) = significant.split_at(significant.len() % 4);

        let mut digits = String::with_capacity(significant.len().div_ceil(4));
        if !head.is_empty() {
            digits.push(hex_digit(head));
        }
        for nibble in tail.chunks(4) {
            digits.push(hex_digit(nibble));
        }

        Fingerprint(digits)
    }

    /// The hexadecimal digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the fingerprint, returning its digits
    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of hexadecimal digits
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a fingerprint has at least one digit
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn hex_digit(bits: &[bool]) -> char {
    let value = bits.iter().fold(0usize, |acc, &bit| (acc << 1) | bit as usize);
    HEX_DIGITS[value] as char
}

/// Result of hashing a single image file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashResult {
    /// Path to the image file
    pub path: PathBuf,
    /// Fingerprint, if the file could be hashed
    pub fingerprint: Option<Fingerprint>,
    /// Error message, if hashing failed
    pub error: Option<String>,
}

impl HashResult {
    /// Whether the file was hashed successfully
    pub fn is_ok(&self) -> bool {
        self.fingerprint.is_some()
    }
}
