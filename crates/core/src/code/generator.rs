//! Document code generator.

use chrono::{DateTime, Utc};

use super::error::CodeError;

/// Default number of candidate codes tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Generates `PREFIX_YYYYMMDD_HHMMSS` codes with a bounded counter suffix.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    max_attempts: u32,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl CodeGenerator {
    /// Creates a generator that tries at most `max_attempts` candidates (minimum 1).
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Maximum number of candidates tried.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The unsuffixed code for `prefix` at instant `at`.
    #[must_use]
    pub fn base_code(prefix: &str, at: DateTime<Utc>) -> String {
        format!("{prefix}_{}", at.format("%Y%m%d_%H%M%S"))
    }

    /// Candidate codes in the order they should be tried.
    ///
    /// The first candidate is the base code; the n-th retry appends `_NN`.
    pub fn candidates(&self, prefix: &str, at: DateTime<Utc>) -> impl Iterator<Item = String> {
        let base = Self::base_code(prefix, at);
        (0..self.max_attempts).map(move |attempt| {
            if attempt == 0 {
                base.clone()
            } else {
                format!("{base}_{attempt:02}")
            }
        })
    }

    /// Returns the first candidate for which `exists` is false.
    ///
    /// # Errors
    ///
    /// Returns `CodeError::Exhausted` when every candidate is taken.
    pub fn generate<E>(&self, prefix: &str, at: DateTime<Utc>, mut exists: E) -> Result<String, CodeError>
    where
        E: FnMut(&str) -> bool,
    {
        self.candidates(prefix, at)
            .find(|candidate| !exists(candidate))
            .ok_or_else(|| self.exhausted(prefix))
    }

    /// The error returned when every candidate for `prefix` is taken.
    #[must_use]
    pub fn exhausted(&self, prefix: &str) -> CodeError {
        CodeError::Exhausted {
            prefix: prefix.to_string(),
            attempts: self.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 14, 25, 1).unwrap()
    }

    #[test]
    fn test_base_code_format() {
        assert_eq!(CodeGenerator::base_code("PR", at()), "PR_20260315_142501");
    }

    #[test]
    fn test_generate_returns_base_when_free() {
        let code = CodeGenerator::default()
            .generate("SR", at(), |_| false)
            .unwrap();
        assert_eq!(code, "SR_20260315_142501");
    }

    #[test]
    fn test_generate_appends_counter_on_collision() {
        let taken: HashSet<&str> = ["PR_20260315_142501", "PR_20260315_142501_01"].into();
        let code = CodeGenerator::default()
            .generate("PR", at(), |c| taken.contains(c))
            .unwrap();
        assert_eq!(code, "PR_20260315_142501_02");
    }

    #[test]
    fn test_generate_exhausts() {
        let generator = CodeGenerator::new(3);
        let mut checked = Vec::new();
        let err = generator
            .generate("PV", at(), |c| {
                checked.push(c.to_string());
                true
            })
            .unwrap_err();

        assert_eq!(
            err,
            CodeError::Exhausted {
                prefix: "PV".to_string(),
                attempts: 3
            }
        );
        assert_eq!(checked.len(), 3);
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let generator = CodeGenerator::new(0);
        assert_eq!(generator.max_attempts(), 1);
        assert_eq!(generator.candidates("RV", at()).count(), 1);
    }
}
