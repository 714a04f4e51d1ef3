use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::id;

/// An instance-to-function association.
///
/// Both fields are required and immutable; changing either one means
/// deleting the association and creating a new one under a new ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Association {
    pub instance_id: String,
    pub function_arn: String,
}

impl Association {
    pub fn new(instance_id: impl Into<String>, function_arn: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            function_arn: function_arn.into(),
        }
    }

    /// Composite ID tracked by the host for this association.
    pub fn id(&self) -> Result<String> {
        id::encode(&self.instance_id, &self.function_arn)
    }

    /// Rebuild an association from its composite ID.
    pub fn from_id(composite_id: &str) -> Result<Self> {
        let (instance_id, function_arn) = id::decode(composite_id)?;
        Ok(Self {
            instance_id,
            function_arn,
        })
    }
}

/// Lifecycle of a single association as seen by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationState {
    Absent,
    Creating,
    Present,
    Deleting,
}

impl fmt::Display for AssociationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Creating => write!(f, "creating"),
            Self::Present => write!(f, "present"),
            Self::Deleting => write!(f, "deleting"),
        }
    }
}

/// One page of function ARNs attached to an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationPage {
    pub function_arns: Vec<String>,
    /// Token for the next page, `None` on the last page.
    pub next_token: Option<String>,
}
