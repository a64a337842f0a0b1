//! Fixed-width base-83 numerals.
//!
//! Every field of a hash is a non-negative integer written with a fixed
//! number of digits, most significant first. The alphabet is part of the
//! wire format and must never be reordered.

use thiserror::Error;

/// Digit symbols, indexed by digit value.
pub const ALPHABET: &[u8; 83] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz#$%*+,-.:;=?@[]^_{|}~";

const BASE: u64 = 83;

/// Reverse lookup: byte -> digit value, `u8::MAX` for bytes outside the alphabet.
const DIGIT_VALUES: [u8; 256] = {
    let mut table = [u8::MAX; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Errors that can occur while decoding a base-83 numeral.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base83Error {
    /// A character outside the base-83 alphabet.
    #[error("Invalid base-83 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// The numeral does not fit in 64 bits.
    #[error("Base-83 value {0:?} does not fit in 64 bits")]
    Overflow(String),
}

/// Append `value` to `out` as exactly `length` base-83 digits.
///
/// `value` must be below `83^length`; the quantizer guarantees this for
/// every field it writes.
pub fn encode_into(out: &mut String, value: u64, length: u32) {
    debug_assert!(
        BASE.checked_pow(length).map_or(true, |limit| value < limit),
        "{} does not fit in {} base-83 digits",
        value,
        length
    );

    for exponent in (0..length).rev() {
        let divisor = BASE.saturating_pow(exponent);
        let digit = (value / divisor) % BASE;
        out.push(ALPHABET[digit as usize] as char);
    }
}

/// Encode `value` as a string of exactly `length` base-83 digits.
pub fn encode(value: u64, length: u32) -> String {
    let mut out = String::with_capacity(length as usize);
    encode_into(&mut out, value, length);
    out
}

/// Decode a base-83 numeral.
///
/// Every character contributes a digit (`acc * 83 + digit`), left to right.
/// The empty string decodes to zero.
pub fn decode(digits: &str) -> Result<u64, Base83Error> {
    digits
        .chars()
        .enumerate()
        .try_fold(0u64, |acc, (position, character)| {
            let digit = digit_value(character)
                .ok_or(Base83Error::InvalidCharacter { character, position })?;
            acc.checked_mul(BASE)
                .and_then(|v| v.checked_add(digit as u64))
                .ok_or_else(|| Base83Error::Overflow(digits.to_string()))
        })
}

/// Digit value of a single symbol, if it belongs to the alphabet.
#[inline]
pub fn digit_value(character: char) -> Option<u8> {
    if !character.is_ascii() {
        return None;
    }
    match DIGIT_VALUES[character as usize] {
        u8::MAX => None,
        digit => Some(digit),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
