//! ARN format check applied to function ARNs before any remote call.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AssociationError, Result};

// partition:service:region:account:resource, region and account optional
static ARN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^arn:[\w-]+:[a-zA-Z0-9\-]+:([a-z]{2}-(gov-)?[a-z]+-\d)?:(\d{12})?:(.*)$")
        .expect("valid ARN regex")
});

/// Returns `true` if `value` looks like an ARN.
pub fn is_valid_arn(value: &str) -> bool {
    ARN_REGEX.is_match(value)
}

/// Validate an ARN, returning [`AssociationError::InvalidArn`] otherwise.
pub fn validate_arn(value: &str) -> Result<()> {
    if is_valid_arn(value) {
        Ok(())
    } else {
        Err(AssociationError::invalid_arn(value))
    }
}
