//! Step size — the jog increment, in degrees.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValidationError};

/// Non-zero jog increment in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StepSize(u32);

impl StepSize {
    /// Increment used until the operator picks another one.
    pub const DEFAULT: Self = Self(5);

    /// Build a step size, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroStepSize`] when `degrees` is zero.
    pub fn new(degrees: u32) -> Result<Self, ValidationError> {
        if degrees == 0 {
            return Err(ValidationError::ZeroStepSize);
        }
        Ok(Self(degrees))
    }

    #[must_use]
    pub fn degrees(self) -> u32 {
        self.0
    }
}

impl Default for StepSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for StepSize {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StepSize> for u32 {
    fn from(value: StepSize) -> Self {
        value.0
    }
}

impl FromStr for StepSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: u32 = s
            .trim()
            .parse()
            .map_err(|_| ParseError::NotAnInteger(s.to_string()))?;
        Ok(Self::new(degrees)?)
    }
}

impl std::fmt::Display for StepSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_five_degrees() {
        assert_eq!(StepSize::default().degrees(), 5);
    }

    #[test]
    fn should_reject_zero() {
        assert_eq!(StepSize::new(0), Err(ValidationError::ZeroStepSize));
    }

    #[test]
    fn should_parse_from_trimmed_string() {
        let step: StepSize = " 10 ".parse().unwrap();
        assert_eq!(step.degrees(), 10);
    }

    #[test]
    fn should_fail_to_parse_non_integer() {
        let result: Result<StepSize, _> = "ten".parse();
        assert_eq!(result, Err(ParseError::NotAnInteger("ten".to_string())));
    }

    #[test]
    fn should_fail_to_parse_zero() {
        let result: Result<StepSize, _> = "0".parse();
        assert_eq!(
            result,
            Err(ParseError::Validation(ValidationError::ZeroStepSize))
        );
    }

    #[test]
    fn should_reject_zero_when_deserializing() {
        assert!(serde_json::from_str::<StepSize>("0").is_err());
        let step: StepSize = serde_json::from_str("1").unwrap();
        assert_eq!(step.degrees(), 1);
    }
}
