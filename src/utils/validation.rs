//! Centralized validation and helper functions.

use std::path::Path;

use crate::parsing::delimited::SourceFormat;

/// Input validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid position '{0}': expected a non-negative integer")]
    InvalidPosition(String),
    #[error("Position bounds must be non-negative, got {0}")]
    NegativePosition(i64),
    #[error("Invalid delimiter '{0}': expected a single ASCII character")]
    InvalidDelimiter(char),
}

/// Convert free-text input into an optional criterion.
///
/// Blank input (empty or whitespace only) means "no constraint".
///
/// # Examples
///
/// ```
/// use variant_explorer::utils::validation::non_blank;
///
/// assert_eq!(non_blank("  chr1 "), Some("chr1".to_string()));
/// assert_eq!(non_blank("   "), None);
/// ```
#[must_use]
pub fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse an optional genomic position; blank input yields `None`.
///
/// # Errors
///
/// Returns `ValidationError::NegativePosition` for a negative integer, or
/// `ValidationError::InvalidPosition` if the input is not blank and not an integer.
pub fn parse_position(input: &str) -> Result<Option<u64>, ValidationError> {
    non_blank(input)
        .map(|s| {
            s.parse::<u64>().map_err(|_| match s.parse::<i64>() {
                Ok(n) if n < 0 => ValidationError::NegativePosition(n),
                _ => ValidationError::InvalidPosition(s.clone()),
            })
        })
        .transpose()
}

/// Convert a delimiter character to the byte the record readers expect.
///
/// # Errors
///
/// Returns `ValidationError::InvalidDelimiter` for non-ASCII characters.
pub fn delimiter_byte(delimiter: char) -> Result<u8, ValidationError> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(ValidationError::InvalidDelimiter(delimiter))
}

/// Check whether `path` names a per-patient variant source (`PAC*.csv` by default).
#[must_use]
pub fn is_variant_source(path: &Path, format: &SourceFormat) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let extension_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == format.variant_extension);

    extension_ok && name.starts_with(&format.variant_prefix)
}

/// Patient id for a variant source: its file name without extension.
#[must_use]
pub fn patient_id_for_source(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}
