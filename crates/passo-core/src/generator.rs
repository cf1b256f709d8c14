//! Random password generation.
//!
//! Characters come from the OS random source. Index selection uses
//! rejection sampling so every character of a class is equally likely.

use crate::error::{PassoError, Result};

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Shortest password the generator will produce.
pub const MIN_LENGTH: usize = 8;

/// Longest password the generator will produce.
///
/// Set well above a UI slider's range so that `passo generate` can fill
/// fields that accept long passphrases.
pub const MAX_LENGTH: usize = 128;

/// Which characters to use and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

impl PasswordPolicy {
    fn classes(&self) -> Vec<&'static [u8]> {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.numbers, NUMBERS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter_map(|(enabled, chars)| enabled.then_some(chars))
        .collect()
    }

    /// Check the policy can be satisfied.
    ///
    /// # Errors
    ///
    /// Returns `PassoError::InvalidInput` if the length is outside
    /// `MIN_LENGTH..=MAX_LENGTH` or no character class is enabled.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&self.length) {
            return Err(PassoError::InvalidInput(format!(
                "Password length must be between {} and {} (got {})",
                MIN_LENGTH, MAX_LENGTH, self.length
            )));
        }
        if self.classes().is_empty() {
            return Err(PassoError::InvalidInput(
                "At least one character class must be enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate a password following `policy`.
///
/// The result contains at least one character from every enabled class and
/// nothing outside them.
///
/// # Examples
///
/// ```
/// use passo_core::generator::{generate_password, PasswordPolicy};
///
/// let password = generate_password(&PasswordPolicy::default()).unwrap();
/// assert_eq!(password.len(), 16);
/// ```
pub fn generate_password(policy: &PasswordPolicy) -> Result<String> {
    policy.validate()?;
    let classes = policy.classes();
    let alphabet: Vec<u8> = classes.concat();

    let mut chars = Vec::with_capacity(policy.length);
    for class in &classes {
        chars.push(class[random_below(class.len())?]);
    }
    while chars.len() < policy.length {
        chars.push(alphabet[random_below(alphabet.len())?]);
    }

    // Fisher-Yates, so the guaranteed characters are not always up front.
    for i in (1..chars.len()).rev() {
        let j = random_below(i + 1)?;
        chars.swap(i, j);
    }

    String::from_utf8(chars)
        .map_err(|e| PassoError::InvalidInput(format!("Generated non-UTF-8 output: {}", e)))
}

/// Uniform random integer in `0..bound` (`bound` must be non-zero).
fn random_below(bound: usize) -> Result<usize> {
    let bound = bound as u32;
    // Largest multiple of `bound` that fits; values above it are redrawn.
    let zone = u32::MAX - (u32::MAX % bound);
    loop {
        let mut buf = [0u8; 4];
        getrandom::getrandom(&mut buf)
            .map_err(|e| PassoError::Crypto(format!("OS random source failed: {}", e)))?;
        let value = u32::from_le_bytes(buf);
        if value < zone {
            return Ok((value % bound) as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_in(password: &str, class: &[u8]) -> usize {
        password.bytes().filter(|b| class.contains(b)).count()
    }

    #[test]
    fn test_default_policy() {
        let password = generate_password(&PasswordPolicy::default()).unwrap();
        assert_eq!(password.len(), 16);
        for class in [UPPERCASE, LOWERCASE, NUMBERS, SYMBOLS] {
            assert!(count_in(&password, class) >= 1, "missing class in {}", password);
        }
    }

    #[test]
    fn test_only_enabled_classes_are_used() {
        let policy = PasswordPolicy {
            length: 32,
            uppercase: false,
            lowercase: false,
            numbers: true,
            symbols: false,
        };
        for _ in 0..20 {
            let password = generate_password(&policy).unwrap();
            assert_eq!(password.len(), 32);
            assert!(password.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_every_class_present_at_min_length() {
        let policy = PasswordPolicy {
            length: MIN_LENGTH,
            ..PasswordPolicy::default()
        };
        for _ in 0..50 {
            let password = generate_password(&policy).unwrap();
            for class in [UPPERCASE, LOWERCASE, NUMBERS, SYMBOLS] {
                assert!(count_in(&password, class) >= 1);
            }
        }
    }

    #[test]
    fn test_invalid_policies_rejected() {
        let too_short = PasswordPolicy {
            length: MIN_LENGTH - 1,
            ..PasswordPolicy::default()
        };
        assert!(matches!(
            generate_password(&too_short),
            Err(PassoError::InvalidInput(_))
        ));

        let too_long = PasswordPolicy {
            length: MAX_LENGTH + 1,
            ..PasswordPolicy::default()
        };
        assert!(generate_password(&too_long).is_err());

        let no_classes = PasswordPolicy {
            length: 12,
            uppercase: false,
            lowercase: false,
            numbers: false,
            symbols: false,
        };
        let err = generate_password(&no_classes).unwrap_err();
        assert!(err.to_string().contains("character class"));
    }

    #[test]
    fn test_max_length_is_accepted() {
        let policy = PasswordPolicy {
            length: MAX_LENGTH,
            ..PasswordPolicy::default()
        };
        assert_eq!(generate_password(&policy).unwrap().len(), MAX_LENGTH);
    }

    #[test]
    fn test_passwords_differ() {
        let policy = PasswordPolicy::default();
        let first = generate_password(&policy).unwrap();
        let second = generate_password(&policy).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_random_below_stays_in_range() {
        for bound in [1usize, 2, 10, 26, 88] {
            for _ in 0..100 {
                assert!(random_below(bound).unwrap() < bound);
            }
        }
    }
}
