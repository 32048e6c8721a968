//! Range and consistency checks for configuration values.
//!
//! Runtime setters clamp silently; a configuration file is checked up front
//! so a typo is reported instead of being clamped into a surprising sound.

use thiserror::Error;

/// A rejected configuration value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Value outside its allowed range.
    #[error("'{field}' = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Dotted field path, e.g. `synth.echo_time_ms`.
        field: String,
        /// The rejected value.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Two parameters mapped to one controller number.
    #[error("controller {controller} is assigned to both '{first}' and '{second}'")]
    DuplicateController {
        /// The shared controller number.
        controller: u8,
        /// First field using it.
        first: String,
        /// Second field using it.
        second: String,
    },

    /// Multiple validation errors.
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Accumulates errors across a whole configuration.
#[derive(Debug, Default)]
pub(crate) struct Checker {
    errors: Vec<ValidationError>,
}

impl Checker {
    pub(crate) fn range(&mut self, field: &str, value: impl Into<f64>, min: f64, max: f64) {
        let value = value.into();
        if !(min..=max).contains(&value) {
            self.errors.push(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            });
        }
    }

    pub(crate) fn distinct(&mut self, fields: &[(&str, u8)]) {
        for (i, &(first, a)) in fields.iter().enumerate() {
            if let Some(&(second, _)) = fields[i + 1..].iter().find(|(_, b)| *b == a) {
                self.errors.push(ValidationError::DuplicateController {
                    controller: a,
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }
    }

    pub(crate) fn finish(mut self) -> ValidationResult<()> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(ValidationError::Multiple(self.errors)),
        }
    }
}
