//! Existence check for associations by scanning the remote list endpoint.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::TransportError;
use crate::transport::{AssociationTransport, MAX_PAGE_SIZE};

/// Scans every page of an instance's associations looking for one ARN.
///
/// Read-only and uncached: each call reflects remote state at call time.
pub struct AssociationFinder<'a> {
    transport: &'a dyn AssociationTransport,
    page_size: u32,
}

impl<'a> AssociationFinder<'a> {
    pub fn new(transport: &'a dyn AssociationTransport) -> Self {
        Self {
            transport,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Use a smaller page size. Values are clamped to `1..=MAX_PAGE_SIZE`.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Returns the matching ARN, or `None` when `function_arn` is not
    /// attached to `instance_id`.
    ///
    /// # Errors
    ///
    /// Listing failures are returned unchanged, never reported as absence.
    pub async fn find(
        &self,
        instance_id: &str,
        function_arn: &str,
    ) -> Result<Option<String>, TransportError> {
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();
        let mut pages = 0usize;

        loop {
            let page = self
                .transport
                .list_associations(instance_id, page_token.as_deref(), self.page_size)
                .await?;
            pages += 1;
            trace!(instance_id, pages, entries = page.function_arns.len(), "Listed association page");

            if let Some(found) = page.function_arns.into_iter().find(|arn| arn == function_arn) {
                debug!(instance_id, function_arn, pages, "Association found");
                return Ok(Some(found));
            }

            match page.next_token {
                Some(token) if !token.is_empty() => {
                    if !seen_tokens.insert(token.clone()) {
                        return Err(TransportError::Pagination { token });
                    }
                    page_token = Some(token);
                }
                _ => break,
            }
        }

        debug!(instance_id, function_arn, pages, "Association not found");
        Ok(None)
    }
}
