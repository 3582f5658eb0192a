//! Custom validation functions shared across configuration sections.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static ADDRESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Validate a mail address field that may be left empty (mail disabled).
pub fn validate_optional_address(address: &str) -> Result<(), ValidationError> {
    if address.is_empty() || ADDRESS.is_match(address) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_address"))
    }
}

/// Validate that every configured recipient looks like a mail address.
pub fn validate_address_list(addresses: &[String]) -> Result<(), ValidationError> {
    if addresses.iter().all(|a| ADDRESS.is_match(a)) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_address"))
    }
}
