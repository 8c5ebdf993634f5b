//! Four-digit note access codes.
//!
//! A [`NoteCode`] is both the lookup key and the only credential for a note.
//! Codes are drawn uniformly from `1000..=9999`; collision handling is left to
//! the store, which enforces uniqueness and asks for a fresh code on conflict.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of digits in every note code.
pub const CODE_LENGTH: usize = 4;

/// Smallest code handed out by [`NoteCode::generate`].
pub const MIN_GENERATED_CODE: u16 = 1000;

/// Largest code handed out by [`NoteCode::generate`].
pub const MAX_GENERATED_CODE: u16 = 9999;

/// How many fresh codes a store tries before giving up on creating a note.
pub const MAX_CODE_ATTEMPTS: usize = 32;

/// A validated 4-digit numeric access code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteCode(String);

impl NoteCode {
    /// Parse user input into a code. Exactly four ASCII digits are accepted;
    /// surrounding whitespace is not trimmed.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        if input.len() == CODE_LENGTH && input.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(input.to_string()))
        } else {
            Err(CoreError::Validation(format!(
                "Note code must be exactly {CODE_LENGTH} digits, got '{input}'"
            )))
        }
    }

    /// Draw a random code uniformly from `1000..=9999`.
    ///
    /// Does not check whether the code is already taken.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let n = rng.random_range(MIN_GENERATED_CODE..=MAX_GENERATED_CODE);
        Self(n.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NoteCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NoteCode> for String {
    fn from(code: NoteCode) -> Self {
        code.0
    }
}

impl AsRef<str> for NoteCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Input-layer filter for a code entry field: keeps digits only and stops
/// after four of them.
///
/// Applied on every keystroke so that malformed codes never reach a store.
pub fn sanitize_code_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(CODE_LENGTH)
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn parse_accepts_four_digits() {
        let code = NoteCode::parse("4821").unwrap();
        assert_eq!(code.as_str(), "4821");
        assert_eq!(code.to_string(), "4821");
    }

    #[test]
    fn parse_accepts_leading_zero() {
        assert!(NoteCode::parse("0042").is_ok());
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_matches!(NoteCode::parse("123"), Err(CoreError::Validation(_)));
        assert_matches!(NoteCode::parse("12345"), Err(CoreError::Validation(_)));
        assert_matches!(NoteCode::parse(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert_matches!(NoteCode::parse("12a4"), Err(CoreError::Validation(_)));
        assert_matches!(NoteCode::parse(" 123"), Err(CoreError::Validation(_)));
        // Non-ASCII digits are not codes either.
        assert_matches!(NoteCode::parse("١٢٣٤"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn generated_codes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let code = NoteCode::generate(&mut rng);
            let n: u16 = code.as_str().parse().unwrap();
            assert!((MIN_GENERATED_CODE..=MAX_GENERATED_CODE).contains(&n));
            assert!(NoteCode::parse(code.as_str()).is_ok());
        }
    }

    #[test]
    fn sanitize_strips_and_truncates() {
        assert_eq!(sanitize_code_input("12-34"), "1234");
        assert_eq!(sanitize_code_input("abc"), "");
        assert_eq!(sanitize_code_input("987654"), "9876");
        assert_eq!(sanitize_code_input(" 4 8 2 1 "), "4821");
    }

    #[test]
    fn converts_to_and_from_string() {
        let code = NoteCode::try_from("1234".to_string()).unwrap();
        assert_eq!(String::from(code), "1234");
        assert_matches!(NoteCode::try_from("12".to_string()), Err(CoreError::Validation(_)));
    }
}
