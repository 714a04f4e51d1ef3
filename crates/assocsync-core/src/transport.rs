//! Transport seam between the reconciler and the remote control plane.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::model::AssociationPage;

/// Largest page the remote list endpoint serves.
pub const MAX_PAGE_SIZE: u32 = 25;

/// Remote operations the reconciler relies on.
///
/// The remote offers no lookup by key, only associate, disassociate and a
/// paginated list per instance. Implementations must be thread-safe
/// (`Send + Sync`).
#[async_trait]
pub trait AssociationTransport: Send + Sync {
    /// Attach `function_arn` to `instance_id`.
    ///
    /// No idempotency is guaranteed; callers verify by listing afterwards.
    async fn associate(&self, instance_id: &str, function_arn: &str) -> Result<(), TransportError>;

    /// Detach `function_arn` from `instance_id`.
    ///
    /// # Errors
    ///
    /// May return `TransportError::ResourceNotFound` when the association is
    /// already gone.
    async fn disassociate(&self, instance_id: &str, function_arn: &str)
    -> Result<(), TransportError>;

    /// Fetch one page of function ARNs attached to `instance_id`.
    ///
    /// `page_token` is `None` for the first page.
    async fn list_associations(
        &self,
        instance_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<AssociationPage, TransportError>;

    /// Returns the name of this transport for logging/debugging.
    fn transport_name(&self) -> &'static str;
}
