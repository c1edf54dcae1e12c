//! Error type shared by every calculation step

use rust_decimal::Decimal;
use thiserror::Error;

/// Failure of a single calculation request
///
/// A failed request never yields a partially computed result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid numeric input: {0:?}")]
    InvalidNumericInput(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidStatValue { key: String, value: Decimal },
    #[error("Missing required value: {0}")]
    MissingStatValue(String),
    #[error("Arithmetic overflow computing {0}")]
    Overflow(String),
    #[error("Failed to parse config fragment `{fragment}`: {reason}")]
    ConfigParse { fragment: String, reason: String },
    #[error("Cannot merge field `{field}` of fragment `{fragment}`: {reason}")]
    ConfigMerge {
        fragment: String,
        field: String,
        reason: String,
    },
    #[error("Unknown weapon set: {0}")]
    UnknownWeaponSet(String),
    #[error("Character `{0}` is already registered")]
    DuplicateCharacter(String),
    #[error("Unknown character: {0}")]
    UnknownCharacter(String),
    #[error("Damage {threshold} not reached within {limit} crits (best: {best})")]
    ThresholdUnreachable {
        threshold: Decimal,
        limit: u32,
        best: Decimal,
    },
}

pub type Result<T> = std::result::Result<T, CalcError>;
