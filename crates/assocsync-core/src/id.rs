//! Composite association IDs.
//!
//! The remote API has no identifier for an association, so one is derived
//! from the instance ID and the function ARN joined by [`ID_SEPARATOR`].
//! Neither component may contain the separator, which keeps the encoding
//! injective.

use crate::error::{AssociationError, Result};

/// Separator between the instance ID and the function ARN.
pub const ID_SEPARATOR: char = ',';

/// Build the composite ID for an association.
pub fn encode(instance_id: &str, function_arn: &str) -> Result<String> {
    check_component(instance_id, function_arn, instance_id, "instance ID")?;
    check_component(instance_id, function_arn, function_arn, "function ARN")?;
    Ok(format!("{instance_id}{ID_SEPARATOR}{function_arn}"))
}

/// Split a composite ID into `(instance_id, function_arn)`.
pub fn decode(id: &str) -> Result<(String, String)> {
    let malformed = || AssociationError::MalformedIdentifier {
        id: id.to_string(),
        separator: ID_SEPARATOR,
    };

    let (instance_id, function_arn) = id.split_once(ID_SEPARATOR).ok_or_else(malformed)?;
    if instance_id.is_empty() || function_arn.is_empty() || function_arn.contains(ID_SEPARATOR) {
        return Err(malformed());
    }

    Ok((instance_id.to_string(), function_arn.to_string()))
}

fn check_component(instance_id: &str, function_arn: &str, value: &str, what: &str) -> Result<()> {
    let reason = if value.is_empty() {
        format!("{what} is empty")
    } else if value.contains(ID_SEPARATOR) {
        format!("{what} contains the reserved separator {ID_SEPARATOR:?}")
    } else {
        return Ok(());
    };

    Err(AssociationError::Encoding {
        instance_id: instance_id.to_string(),
        function_arn: function_arn.to_string(),
        reason,
    })
}
