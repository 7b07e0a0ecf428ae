//! Centralized validation of buyer input before it reaches the scorer.

use crate::core::profile::BuyerHardwareProfile;
use crate::core::types::SequenceId;

/// Maximum number of props in a single buyer profile (DOS protection)
pub const MAX_PROPS: usize = 200;

/// Security-related constants for input validation
pub const MAX_PROP_NAME_LENGTH: usize = 100;
pub const MAX_SEQUENCE_ID_LENGTH: usize = 128;

/// Largest pixel budget accepted from a buyer
pub const MAX_PIXEL_COUNT: u64 = 10_000_000;

/// Input validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Too many props: at most {MAX_PROPS} are allowed")]
    TooManyProps,
    #[error("Prop name is empty")]
    EmptyPropName,
    #[error("Prop name too long: exceeds {MAX_PROP_NAME_LENGTH} characters")]
    PropNameTooLong,
    #[error("Prop name contains control characters")]
    InvalidPropName,
    #[error("Pixel count exceeds maximum of {MAX_PIXEL_COUNT}")]
    PixelCountTooLarge,
    #[error("Sequence id is empty")]
    EmptySequenceId,
    #[error("Sequence id too long: exceeds {MAX_SEQUENCE_ID_LENGTH} characters")]
    SequenceIdTooLong,
    #[error("Sequence id may only contain letters, digits, '-' and '_'")]
    InvalidSequenceId,
}

impl ValidationError {
    /// Short machine-readable tag for API error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::TooManyProps => "too_many_props",
            Self::EmptyPropName => "empty_prop_name",
            Self::PropNameTooLong => "prop_name_too_long",
            Self::InvalidPropName => "invalid_prop_name",
            Self::PixelCountTooLarge => "pixel_count_too_large",
            Self::EmptySequenceId => "empty_sequence_id",
            Self::SequenceIdTooLong => "sequence_id_too_long",
            Self::InvalidSequenceId => "invalid_sequence_id",
        }
    }
}

/// Validate a single prop name.
///
/// # Errors
///
/// Returns `ValidationError::EmptyPropName` for blank names,
/// `ValidationError::PropNameTooLong` past the length limit, or
/// `ValidationError::InvalidPropName` if it contains control characters.
pub fn validate_prop_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyPropName);
    }

    if name.chars().count() > MAX_PROP_NAME_LENGTH {
        return Err(ValidationError::PropNameTooLong);
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidPropName);
    }

    Ok(())
}

/// Validate a buyer profile before scoring.
///
/// The scorer itself accepts anything well-typed; this guards the service
/// boundary against oversized or blank input. A blank prop name would
/// otherwise partially match every sequence.
///
/// # Errors
///
/// Returns the first `ValidationError` found.
pub fn validate_buyer_profile(buyer: &BuyerHardwareProfile) -> Result<(), ValidationError> {
    if buyer.props.len() > MAX_PROPS {
        return Err(ValidationError::TooManyProps);
    }

    for prop in &buyer.props {
        validate_prop_name(&prop.name)?;
    }

    if buyer.pixel_count > MAX_PIXEL_COUNT {
        return Err(ValidationError::PixelCountTooLarge);
    }

    Ok(())
}

/// Validate and wrap a sequence id supplied by a client.
///
/// # Errors
///
/// Returns a `ValidationError` for empty, over-long, or non `[A-Za-z0-9_-]` ids.
pub fn validate_sequence_id(id: &str) -> Result<SequenceId, ValidationError> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::EmptySequenceId);
    }

    if id.len() > MAX_SEQUENCE_ID_LENGTH {
        return Err(ValidationError::SequenceIdTooLong);
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidSequenceId);
    }

    Ok(SequenceId::new(id))
}
